//! Value objects for load-order resolution.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::OrderingError;

/// Case-insensitive module identifier.
///
/// Two ids that differ only in ASCII case name the same logical module.
/// Display keeps the original spelling.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for ModuleId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for ModuleId {}

impl Ord for ModuleId {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let rhs = other.0.bytes().map(|b| b.to_ascii_lowercase());
        lhs.cmp(rhs)
    }
}

impl PartialOrd for ModuleId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for ModuleId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Release channel tag of a module version.
///
/// The derived order (Alpha < Beta < EarlyAccess < Release < Development <
/// Invalid) is the comparison priority of the type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VersionType {
    Alpha,
    Beta,
    EarlyAccess,
    Release,
    Development,
    Invalid,
}

impl VersionType {
    fn prefix(self) -> char {
        match self {
            VersionType::Alpha => 'a',
            VersionType::Beta => 'b',
            VersionType::EarlyAccess => 'e',
            VersionType::Release => 'v',
            VersionType::Development => 'd',
            VersionType::Invalid => 'i',
        }
    }

    fn from_prefix(prefix: char) -> Self {
        match prefix {
            'a' => VersionType::Alpha,
            'b' => VersionType::Beta,
            'e' => VersionType::EarlyAccess,
            'v' => VersionType::Release,
            'd' => VersionType::Development,
            _ => VersionType::Invalid,
        }
    }
}

/// Structured module version: `v1.2.3` or `v1.2.3.456`.
///
/// Ordered lexicographically by (type, major, minor, revision, changeset);
/// the derived ordering relies on this exact field order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleVersion {
    pub version_type: VersionType,
    pub major: i32,
    pub minor: i32,
    pub revision: i32,
    pub changeset: i32,
}

/// Changeset assumed when a version string carries only three fields.
/// Elided again when printing.
const DEFAULT_CHANGESET: i32 = 226_961;

impl ModuleVersion {
    /// Placeholder for modules whose version could not be parsed.
    pub const EMPTY: ModuleVersion = ModuleVersion {
        version_type: VersionType::Invalid,
        major: -1,
        minor: -1,
        revision: -1,
        changeset: -1,
    };

    pub fn new(version_type: VersionType, major: i32, minor: i32, revision: i32) -> Self {
        Self {
            version_type,
            major,
            minor,
            revision,
            changeset: DEFAULT_CHANGESET,
        }
    }

    pub fn with_changeset(mut self, changeset: i32) -> Self {
        self.changeset = changeset;
        self
    }
}

impl FromStr for ModuleVersion {
    type Err = OrderingError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(OrderingError::VersionParse(input.to_string()));
        }

        let mut head = parts[0].chars();
        let prefix = head
            .next()
            .ok_or_else(|| OrderingError::VersionParse(input.to_string()))?;
        let version_type = VersionType::from_prefix(prefix);

        let number = |s: &str| {
            s.parse::<i32>()
                .map_err(|_| OrderingError::VersionParse(input.to_string()))
        };
        let major = number(head.as_str())?;
        let minor = number(parts[1])?;
        let revision = number(parts[2])?;
        let changeset = match parts.get(3) {
            Some(raw) => number(raw)?,
            None => DEFAULT_CHANGESET,
        };

        Ok(Self {
            version_type,
            major,
            minor,
            revision,
            changeset,
        })
    }
}

impl fmt::Display for ModuleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}.{}",
            self.version_type.prefix(),
            self.major,
            self.minor,
            self.revision
        )?;
        if self.changeset != DEFAULT_CHANGESET {
            write!(f, ".{}", self.changeset)?;
        }
        Ok(())
    }
}

/// Origin and strength of a dependency edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Declared mandatory dependency.
    Mandatory,
    /// Declared optional dependency; soft ordering requirement.
    Optional,
    /// Inferred from a compiled-unit reference; a binary reference implies
    /// a hard runtime ordering requirement, so this ranks with Mandatory.
    Inferred,
}

impl EdgeKind {
    /// Whether the edge is a hard ordering requirement.
    pub fn is_hard(self) -> bool {
        !matches!(self, EdgeKind::Optional)
    }

    /// Keep the stronger of two tags when collapsing duplicate edges.
    pub fn strongest(self, other: EdgeKind) -> EdgeKind {
        if self.is_hard() {
            self
        } else {
            other
        }
    }
}

/// Kind of ordering problem attached to an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// This entry depends on a module ordered after it.
    DependencyBelow,
    /// Another entry ordered after this one depends on it; mirror of
    /// DependencyBelow, attached to the dependency.
    DependedByAbove,
    /// The dependency is not present among the currently selected entries.
    Missing,
}

/// A detected ordering or missing-dependency problem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub counterpart_id: ModuleId,
    pub counterpart_name: String,
    pub kind: ConflictKind,
    /// True when the underlying dependency was declared optional.
    pub optional: bool,
}

impl Conflict {
    pub fn new(
        counterpart_id: ModuleId,
        counterpart_name: impl Into<String>,
        kind: ConflictKind,
        optional: bool,
    ) -> Self {
        Self {
            counterpart_id,
            counterpart_name: counterpart_name.into(),
            kind,
            optional,
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "(optional) ")?;
        }
        match self.kind {
            ConflictKind::DependencyBelow => write!(f, "this depends on {}", self.counterpart_id),
            ConflictKind::DependedByAbove => write!(f, "{} depends on this", self.counterpart_id),
            ConflictKind::Missing => write!(f, "{} is missing", self.counterpart_id),
        }
    }
}

/// Field a multi-key sort can order by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    /// Case-insensitive id.
    Id,
    /// Case-insensitive display name.
    Name,
    /// Structured version order.
    Version,
    /// Official before community modules.
    Official,
    /// The distinguished native module first.
    Native,
    /// Selected before unselected.
    Selected,
}

/// One comparator of a composite sort; chained left to right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: SortField,
    pub ascending: bool,
}

impl SortKey {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            ascending: true,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            ascending: false,
        }
    }
}
