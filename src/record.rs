//! Business Partner records

use serde::{Deserialize, Serialize};

/// One Business Partner as loaded into a matching session.
///
/// Records are immutable once built: `combined_name` is derived at
/// construction and the name fields have no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    id: String,
    name1: String,
    name2: String,
    combined_name: String,
}

impl Record {
    pub fn new(id: impl Into<String>, name1: impl Into<String>, name2: impl Into<String>) -> Self {
        let name1 = name1.into();
        let name2 = name2.into();
        let combined_name = format!("{} {}", name1, name2).trim().to_string();
        Self {
            id: id.into(),
            name1,
            name2,
            combined_name,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name1(&self) -> &str {
        &self.name1
    }

    pub fn name2(&self) -> &str {
        &self.name2
    }

    /// `name1` and `name2` joined by a space, trimmed.
    pub fn combined_name(&self) -> &str {
        &self.combined_name
    }
}

/// An input row as produced by an input supplier.
///
/// Any field may be missing; the engine treats missing names as empty and
/// skips rows whose id is missing or blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub id: Option<String>,
    pub name1: Option<String>,
    pub name2: Option<String>,
}

impl RawRow {
    pub fn new(id: impl Into<String>, name1: impl Into<String>, name2: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name1: Some(name1.into()),
            name2: Some(name2.into()),
        }
    }

    /// Trimmed id, or `None` when it is missing or blank.
    pub fn usable_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Build the record for this row, trimming every field.
    ///
    /// Returns `None` when the row has no usable id.
    pub fn to_record(&self) -> Option<Record> {
        let id = self.usable_id()?;
        let field = |f: &Option<String>| f.as_deref().unwrap_or("").trim().to_string();
        Some(Record::new(id, field(&self.name1), field(&self.name2)))
    }
}

impl<A, B, C> From<(A, B, C)> for RawRow
where
    A: Into<String>,
    B: Into<String>,
    C: Into<String>,
{
    fn from((id, name1, name2): (A, B, C)) -> Self {
        Self::new(id, name1, name2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_name() {
        assert_eq!(Record::new("1", "XYZ Corp", "Tech").combined_name(), "XYZ Corp Tech");
        assert_eq!(Record::new("1", "XYZ Corp", "").combined_name(), "XYZ Corp");
        assert_eq!(Record::new("1", "", "Division").combined_name(), "Division");
        assert_eq!(Record::new("1", "", "").combined_name(), "");
    }

    #[test]
    fn test_usable_id() {
        assert_eq!(RawRow::new(" BP1 ", "a", "b").usable_id(), Some("BP1"));
        assert_eq!(RawRow::new("   ", "a", "b").usable_id(), None);
        assert_eq!(RawRow::default().usable_id(), None);
    }

    #[test]
    fn test_to_record_missing_names() {
        let row = RawRow {
            id: Some("BP9".to_string()),
            name1: None,
            name2: Some("  Tail ".to_string()),
        };
        let record = row.to_record().unwrap();
        assert_eq!(record.id(), "BP9");
        assert_eq!(record.name1(), "");
        assert_eq!(record.name2(), "Tail");
        assert_eq!(record.combined_name(), "Tail");
    }

    #[test]
    fn test_from_tuple() {
        let row: RawRow = ("A", "Acme", "").into();
        assert_eq!(row.to_record().unwrap().combined_name(), "Acme");
    }
}
