//! CSV input supplier
//!
//! Reads Business Partner rows from CSV. Header names are trimmed and
//! matched case-insensitively, and `BP_Number`, `Name1` and `Name2` must
//! all be present. Row content is never validated here: blank ids and
//! missing names are the engine's concern.

use crate::error::InputError;
use crate::record::RawRow;
use std::io::{Read, Write};
use std::path::Path;

/// Canonical id column name.
pub const ID_COLUMN: &str = "BP_Number";
/// Canonical first name column.
pub const NAME1_COLUMN: &str = "Name1";
/// Canonical second name column.
pub const NAME2_COLUMN: &str = "Name2";

/// Positions of the required columns in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    id: usize,
    name1: usize,
    name2: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, InputError> {
        let mut id = None;
        let mut name1 = None;
        let mut name2 = None;

        for (i, header) in headers.iter().enumerate() {
            match header.trim().to_lowercase().as_str() {
                "bp_number" | "id" => {
                    id.get_or_insert(i);
                }
                "name1" => {
                    name1.get_or_insert(i);
                }
                "name2" => {
                    name2.get_or_insert(i);
                }
                _ => {}
            }
        }

        match (id, name1, name2) {
            (Some(id), Some(name1), Some(name2)) => Ok(Self { id, name1, name2 }),
            _ => {
                let missing = [
                    (id.is_none(), ID_COLUMN),
                    (name1.is_none(), NAME1_COLUMN),
                    (name2.is_none(), NAME2_COLUMN),
                ]
                .into_iter()
                .filter(|&(is_missing, _)| is_missing)
                .map(|(_, name)| name.to_string())
                .collect();
                Err(InputError::MissingColumns(missing))
            }
        }
    }

    fn row(&self, record: &csv::StringRecord) -> RawRow {
        let field = |i: usize| record.get(i).map(str::to_string);
        RawRow {
            id: field(self.id),
            name1: field(self.name1),
            name2: field(self.name2),
        }
    }
}

/// Read rows from CSV with a header line.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, InputError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;
    let mut rows = Vec::new();
    for record in csv_reader.records() {
        rows.push(columns.row(&record?));
    }
    tracing::debug!(rows = rows.len(), "read input rows");
    Ok(rows)
}

/// Read rows from a CSV file.
pub fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<RawRow>, InputError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_rows(std::io::BufReader::new(file))
}

/// Sample dataset covering the common name variations.
const EXAMPLE_DATA: &[(&str, &str, &str)] = &[
    ("BP001", "ABC Company Ltd.", ""),
    ("BP002", "ABC Company Limited", ""),
    ("BP003", "Mrs. Jane Smith", ""),
    ("BP004", "Jane Smith", ""),
    ("BP005", "XYZ Corporation", "Technology Division"),
    ("BP006", "XYZ Corp.", "Tech Division"),
    ("BP007", "Global Trading Co.", ""),
    ("BP008", "Global Trading Company", "International"),
    ("BP009", "Mr. John Doe", ""),
    ("BP010", "John Doe", "Senior Partner"),
    ("BP011", "Smith & Associates LLC", ""),
    ("BP012", "Smith and Associates", "LLC"),
    ("BP013", "First National Bank", ""),
    ("BP014", "1st National Bank", ""),
    ("BP015", "Acme Industries", ""),
    ("BP016", "ACME INDUSTRIES LTD", ""),
    ("BP017", "Tech Solutions Inc.", ""),
    ("BP018", "Unique Company", "No Matches"),
    ("BP019", "Pacific Trading", "Enterprises"),
    ("BP020", "Pacific Trading Enterprises", ""),
];

/// The built-in example dataset as rows.
pub fn example_rows() -> Vec<RawRow> {
    EXAMPLE_DATA.iter().map(|&row| RawRow::from(row)).collect()
}

/// Write the example dataset as CSV with canonical headers.
pub fn write_example_csv<W: Write>(writer: W) -> Result<(), InputError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([ID_COLUMN, NAME1_COLUMN, NAME2_COLUMN])?;
    for (id, name1, name2) in EXAMPLE_DATA {
        csv_writer.write_record([id, name1, name2])?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rows_case_insensitive_headers() {
        let data = " bp_number ,NAME1,name2,Extra\nBP1,Acme,,x\nBP2,Beta,Two,y\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RawRow::new("BP1", "Acme", ""));
        assert_eq!(rows[1], RawRow::new("BP2", "Beta", "Two"));
    }

    #[test]
    fn test_read_rows_short_row() {
        let data = "BP_Number,Name1,Name2\nBP1,Acme\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[0].name1.as_deref(), Some("Acme"));
        assert_eq!(rows[0].name2, None);
    }

    #[test]
    fn test_missing_columns() {
        let err = read_rows("BP_Number,Name\nBP1,Acme\n".as_bytes()).unwrap_err();
        match err {
            InputError::MissingColumns(cols) => assert_eq!(cols, vec!["Name1", "Name2"]),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_id_alias() {
        let rows = read_rows("id,name1,name2\n7,Seven,\n".as_bytes()).unwrap();
        assert_eq!(rows[0].usable_id(), Some("7"));
    }

    #[test]
    fn test_example_round_trip() {
        let mut buf = Vec::new();
        write_example_csv(&mut buf).unwrap();
        let rows = read_rows(buf.as_slice()).unwrap();
        assert_eq!(rows, example_rows());
        assert_eq!(rows.len(), 20);
    }
}
