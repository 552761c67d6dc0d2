//! Relationship module - Lookup and Master-Detail attributes

/// What happens to a Lookup field when the referenced record is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteConstraint {
    /// Clear the field value (not allowed on required lookups)
    SetNull,
    /// Block deletion of the referenced record
    Restrict,
    /// Delete this record as well
    Cascade,
}

impl DeleteConstraint {
    /// Get the constraint name as written in metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteConstraint::SetNull => "SetNull",
            DeleteConstraint::Restrict => "Restrict",
            DeleteConstraint::Cascade => "Cascade",
        }
    }

    /// Parse a constraint name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SetNull" => Some(DeleteConstraint::SetNull),
            "Restrict" => Some(DeleteConstraint::Restrict),
            "Cascade" => Some(DeleteConstraint::Cascade),
            _ => None,
        }
    }
}

impl std::str::FromStr for DeleteConstraint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid delete constraint: {}", s))
    }
}

/// Attributes shared by both relationship types
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationshipTarget {
    /// API name of the referenced object
    pub reference_to: Option<String>,

    /// Child relationship API name
    pub relationship_name: Option<String>,

    /// Child relationship label
    pub relationship_label: Option<String>,
}

/// Lookup-specific attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupAttrs {
    /// Referenced object and relationship naming
    pub target: RelationshipTarget,

    /// Behaviour on parent deletion
    pub delete_constraint: Option<DeleteConstraint>,
}

/// Master-Detail-specific attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterDetailAttrs {
    /// Referenced object and relationship naming
    pub target: RelationshipTarget,

    /// 0 for the primary master, 1 for the secondary one
    pub relationship_order: Option<u32>,

    /// Whether detail records may be reparented
    pub reparentable: bool,

    /// Whether writing a detail requires read access on the master
    pub write_requires_master_read: bool,
}
