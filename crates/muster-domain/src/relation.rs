//! Relation module - the tag carried by linked enslaver/enslaved rows

use std::fmt;

/// Relationship between a roster entry and a person named inside it
///
/// Only one pairing is modelled: an enslaved person's entry points at the
/// enslaver named in its remarks, and the synthetic enslaver row points back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    /// The entry's person was enslaved by `owner_name`
    EnslavedBy,

    /// The synthetic row's person enslaved the referenced entry's person
    EnslaverOf,
}

impl RelationType {
    /// Get the relation as written to output
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::EnslavedBy => "enslaved_by",
            RelationType::EnslaverOf => "enslaver_of",
        }
    }

    /// Parse a relation from its output form
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "enslaved_by" => Some(RelationType::EnslavedBy),
            "enslaver_of" => Some(RelationType::EnslaverOf),
            _ => None,
        }
    }

    /// The relation seen from the other side
    pub fn inverse(&self) -> Self {
        match self {
            RelationType::EnslavedBy => RelationType::EnslaverOf,
            RelationType::EnslaverOf => RelationType::EnslavedBy,
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relation type: {}", s))
    }
}
