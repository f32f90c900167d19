//! Inbound ports (driving API).

use crate::domain::entities::ModEntry;
use crate::domain::errors::OrderingError;
use crate::domain::value_objects::SortKey;

/// Primary load-order API, implemented by the application service.
///
/// Validation is pull-based: every mutating operation runs exactly one
/// validation pass before returning (bulk operations suppress the
/// intermediate ones), and `validate` can be invoked directly after
/// mutations made outside this trait.
pub trait LoadOrderApi {
    /// Rebuild the dependency graph and recompute every entry's conflicts.
    fn validate(&mut self);

    /// Dependency-respecting stable reorder. On a cycle the order is left
    /// unchanged and the error returned.
    fn sort(&mut self) -> Result<(), OrderingError>;

    /// Dependency-unaware reorder by a chain of sort keys.
    fn sort_by_keys(&mut self, keys: &[SortKey]);

    fn move_to_top(&mut self, index: usize) -> Result<(), OrderingError>;
    fn move_up(&mut self, index: usize) -> Result<(), OrderingError>;
    fn move_down(&mut self, index: usize) -> Result<(), OrderingError>;
    fn move_to_bottom(&mut self, index: usize) -> Result<(), OrderingError>;

    /// Set the selection flag of one entry.
    fn set_selected(&mut self, index: usize, selected: bool) -> Result<(), OrderingError>;

    /// Bulk toggles; they only touch eligible entries.
    fn check_all(&mut self);
    fn uncheck_all(&mut self);
    fn invert_check(&mut self);

    /// Current load order; position in the slice is the load position.
    fn entries(&self) -> &[ModEntry];

    /// Whether any entry carries a conflict.
    fn has_conflicts(&self) -> bool;

    /// Whether any entry carries a non-optional conflict.
    fn has_mandatory_conflicts(&self) -> bool;
}
