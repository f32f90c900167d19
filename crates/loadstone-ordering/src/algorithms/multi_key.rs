//! Configurable multi-key sort.
//!
//! A chain of comparators applied left to right, each breaking ties the
//! previous keys left unresolved. No dependency awareness: the caller is
//! expected to re-validate afterwards and surface any conflicts this
//! reordering introduces.

use std::cmp::Ordering;

use crate::domain::entities::ModEntry;
use crate::domain::value_objects::{ModuleId, SortField, SortKey};

/// Stable total reorder by the given key chain.
///
/// `native_id` is the distinguished module the `Native` key puts first.
/// If every key ties, the current relative order is preserved.
pub fn multi_key_sort(entries: &mut [ModEntry], keys: &[SortKey], native_id: &ModuleId) {
    entries.sort_by(|a, b| {
        for key in keys {
            let mut ordering = compare_by(a, b, key.field, native_id);
            if !key.ascending {
                ordering = ordering.reverse();
            }
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// Ascending semantics per field; descending is the exact reverse.
fn compare_by(a: &ModEntry, b: &ModEntry, field: SortField, native_id: &ModuleId) -> Ordering {
    match field {
        SortField::Id => a.id().cmp(b.id()),
        SortField::Name => {
            let lhs = a.display_name().bytes().map(|c| c.to_ascii_lowercase());
            let rhs = b.display_name().bytes().map(|c| c.to_ascii_lowercase());
            lhs.cmp(rhs)
        }
        SortField::Version => a.module.version.cmp(&b.module.version),
        // Boolean partitions: the distinguished group first when ascending.
        SortField::Official => (!a.module.official).cmp(&!b.module.official),
        SortField::Native => (a.id() != native_id).cmp(&(b.id() != native_id)),
        SortField::Selected => (!a.selected).cmp(&!b.selected),
    }
}
