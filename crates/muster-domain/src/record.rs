//! Record module - the fixed-schema output row

use crate::RelationType;

/// One column of a [`FieldRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Person's name (`SURNAME, GIVEN`, a marker phrase, or an owner's name)
    Name,
    /// Rank, status, race or tribe descriptor
    RankOrRole,
    /// Residence, town or regiment
    Locality,
    /// Narrative text left after the structured fields
    Remarks,
    /// Source page the entry was read from
    SourcePage,
    /// Enslaver named in the remarks
    OwnerName,
    /// `enslaved_by` / `enslaver_of`
    RelationType,
}

impl Field {
    /// All fields in output column order
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::RankOrRole,
        Field::Locality,
        Field::Remarks,
        Field::SourcePage,
        Field::OwnerName,
        Field::RelationType,
    ];

    /// Column name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::RankOrRole => "rank_or_role",
            Field::Locality => "locality",
            Field::Remarks => "remarks",
            Field::SourcePage => "source_page",
            Field::OwnerName => "owner_name",
            Field::RelationType => "relation_type",
        }
    }
}

/// One output row
///
/// Every column is always present; a column nothing populated holds an
/// empty string. Writers can rely on the column set never changing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldRecord {
    /// Person's name
    pub name: String,

    /// Rank, status, race or tribe descriptor
    pub rank_or_role: String,

    /// Residence, town or regiment
    pub locality: String,

    /// Narrative remainder of the entry
    pub remarks: String,

    /// Source page reference
    pub source_page: String,

    /// Enslaver named in the remarks (linked states only)
    pub owner_name: String,

    /// Relation tag (linked states only)
    pub relation_type: String,
}

impl FieldRecord {
    /// Column names in output order
    pub const COLUMNS: [&'static str; 7] = [
        "name",
        "rank_or_role",
        "locality",
        "remarks",
        "source_page",
        "owner_name",
        "relation_type",
    ];

    /// Create an empty record for the given source page
    pub fn for_page(source_page: u32) -> Self {
        Self {
            source_page: source_page.to_string(),
            ..Self::default()
        }
    }

    /// Borrow a column by field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::RankOrRole => &self.rank_or_role,
            Field::Locality => &self.locality,
            Field::Remarks => &self.remarks,
            Field::SourcePage => &self.source_page,
            Field::OwnerName => &self.owner_name,
            Field::RelationType => &self.relation_type,
        }
    }

    /// Mutably borrow a column by field
    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::RankOrRole => &mut self.rank_or_role,
            Field::Locality => &mut self.locality,
            Field::Remarks => &mut self.remarks,
            Field::SourcePage => &mut self.source_page,
            Field::OwnerName => &mut self.owner_name,
            Field::RelationType => &mut self.relation_type,
        }
    }

    /// Column values in [`FieldRecord::COLUMNS`] order
    pub fn values(&self) -> [&str; 7] {
        Field::ALL.map(|field| self.get(field))
    }

    /// Column name/value pairs in output order
    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &str)> {
        Field::ALL.into_iter().map(move |field| (field.as_str(), self.get(field)))
    }

    /// Parsed relation tag, if any
    pub fn relation(&self) -> Option<RelationType> {
        RelationType::parse(&self.relation_type)
    }

    /// Whether the structured part of the entry was recognized
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Synthetic row for an enslaver named inside another entry
///
/// Always emitted directly after the entry it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedOwnerRecord {
    /// The row to write (`name` = owner, `relation_type` = `enslaver_of`)
    pub record: FieldRecord,

    /// Name field of the entry that mentioned the owner
    pub enslaved_name: String,
}

impl LinkedOwnerRecord {
    /// Build the linked row for `owner`, referencing the primary entry
    ///
    /// The row carries the inverse of the primary's relation, taking an
    /// untagged primary as `enslaved_by`.
    pub fn new(owner: &str, primary: &FieldRecord) -> Self {
        let reference = if primary.has_name() {
            primary.name.clone()
        } else {
            "unnamed entry".to_string()
        };

        let record = FieldRecord {
            name: owner.to_string(),
            remarks: format!("Enslaver of {}", reference),
            source_page: primary.source_page.clone(),
            relation_type: primary
                .relation()
                .unwrap_or(RelationType::EnslavedBy)
                .inverse()
                .as_str()
                .to_string(),
            ..FieldRecord::default()
        };

        Self {
            record,
            enslaved_name: primary.name.clone(),
        }
    }

    /// Unwrap into the plain output row
    pub fn into_record(self) -> FieldRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_has_every_column() {
        let record = FieldRecord::default();
        let pairs: Vec<_> = record.pairs().collect();
        assert_eq!(pairs.len(), FieldRecord::COLUMNS.len());
        for ((name, value), column) in pairs.iter().zip(FieldRecord::COLUMNS) {
            assert_eq!(*name, column);
            assert_eq!(*value, "");
        }
    }

    #[test]
    fn test_field_access_matches_columns() {
        let mut record = FieldRecord::for_page(245);
        record.get_mut(Field::Name).push_str("AARON, JOHN");
        record.get_mut(Field::Locality).push_str("Philadelphia");

        assert_eq!(record.get(Field::SourcePage), "245");
        assert_eq!(
            record.values(),
            ["AARON, JOHN", "", "Philadelphia", "", "245", "", ""]
        );
        for (field, column) in Field::ALL.iter().zip(FieldRecord::COLUMNS) {
            assert_eq!(field.as_str(), column);
        }
    }

    #[test]
    fn test_linked_owner_record() {
        let mut primary = FieldRecord::for_page(509);
        primary.name = "CAESAR".to_string();

        let linked = LinkedOwnerRecord::new("John Smith", &primary);
        assert_eq!(linked.record.name, "John Smith");
        assert_eq!(linked.record.relation(), Some(RelationType::EnslaverOf));
        assert_eq!(linked.record.remarks, "Enslaver of CAESAR");
        assert_eq!(linked.record.source_page, "509");
        assert_eq!(linked.enslaved_name, "CAESAR");
        assert!(linked.record.owner_name.is_empty());

        primary.relation_type = RelationType::EnslavedBy.as_str().to_string();
        let linked = LinkedOwnerRecord::new("John Smith", &primary);
        assert_eq!(linked.record.relation(), Some(RelationType::EnslaverOf));
    }

    #[test]
    fn test_linked_owner_record_for_unnamed_entry() {
        let primary = FieldRecord::for_page(1);
        let linked = LinkedOwnerRecord::new("Mary Jones", &primary);
        assert_eq!(linked.record.remarks, "Enslaver of unnamed entry");
        assert_eq!(linked.enslaved_name, "");
    }
}
