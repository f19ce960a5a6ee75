//! Minimal read-only parser for the dBASE III tables the station publishes.
//!
//! Only what the weather endpoints need is implemented: header and field
//! descriptors are decoded up front, records are fixed-width ASCII slices
//! read on demand. Numeric columns are right-justified text.

use thiserror::Error;

/// Offset of the record area relative byte layout: 32-byte file header,
/// then 32 bytes per field descriptor, then a 0x0D terminator.
const FILE_HEADER_LEN: usize = 32;
const DESCRIPTOR_LEN: usize = 32;
const DESCRIPTOR_TERMINATOR: u8 = 0x0D;
const DELETED_FLAG: u8 = b'*';

#[derive(Debug, Error)]
pub enum DbfError {
    #[error("table is truncated: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("malformed field descriptor at offset {0}")]
    BadDescriptor(usize),
    #[error("no field named {0} in table")]
    UnknownField(String),
    #[error("record {0} out of range")]
    RecordOutOfRange(usize),
    #[error("field {field} in record {record} is not a number: {value:?}")]
    NotANumber {
        field: String,
        record: usize,
        value: String,
    },
}

#[derive(Debug, Clone)]
struct FieldDescriptor {
    name: String,
    /// Offset of the field's value within a record, past the deletion flag
    offset: usize,
    length: usize,
}

/// A parsed dbf table held fully in memory.
#[derive(Debug, Clone)]
pub struct DbfTable {
    bytes: Vec<u8>,
    fields: Vec<FieldDescriptor>,
    record_count: usize,
    record_len: usize,
    header_len: usize,
}

impl DbfTable {
    pub fn parse(bytes: Vec<u8>) -> Result<Self, DbfError> {
        if bytes.len() < FILE_HEADER_LEN {
            return Err(DbfError::Truncated {
                expected: FILE_HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let record_count = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
        let header_len = u16::from_le_bytes([bytes[8], bytes[9]]) as usize;
        let record_len = u16::from_le_bytes([bytes[10], bytes[11]]) as usize;

        let mut fields = Vec::new();
        let mut offset = FILE_HEADER_LEN;
        // Field values start after the one-byte deletion flag.
        let mut value_offset = 1;
        loop {
            if offset >= bytes.len() {
                return Err(DbfError::Truncated {
                    expected: offset + 1,
                    actual: bytes.len(),
                });
            }
            if bytes[offset] == DESCRIPTOR_TERMINATOR {
                break;
            }
            if offset + DESCRIPTOR_LEN > bytes.len() || offset + DESCRIPTOR_LEN > header_len {
                return Err(DbfError::BadDescriptor(offset));
            }

            let descriptor = &bytes[offset..offset + DESCRIPTOR_LEN];
            let name_end = descriptor[..11]
                .iter()
                .position(|&b| b == 0)
                .unwrap_or(11);
            let name = String::from_utf8_lossy(&descriptor[..name_end])
                .trim()
                .to_string();
            if name.is_empty() {
                return Err(DbfError::BadDescriptor(offset));
            }
            let length = descriptor[16] as usize;

            fields.push(FieldDescriptor {
                name,
                offset: value_offset,
                length,
            });
            value_offset += length;
            offset += DESCRIPTOR_LEN;
        }

        // Descriptors must account for the whole record.
        if value_offset > record_len {
            return Err(DbfError::BadDescriptor(offset));
        }

        let expected = header_len + record_count * record_len;
        if bytes.len() < expected {
            return Err(DbfError::Truncated {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            bytes,
            fields,
            record_count,
            record_len,
            header_len,
        })
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Raw text of `field` in record `record`, trimmed.
    fn text_by_name(&self, record: usize, field: &str) -> Result<&str, DbfError> {
        if record >= self.record_count {
            return Err(DbfError::RecordOutOfRange(record));
        }
        let descriptor = self
            .fields
            .iter()
            .find(|d| d.name == field)
            .ok_or_else(|| DbfError::UnknownField(field.to_string()))?;

        let start = self.header_len + record * self.record_len + descriptor.offset;
        let raw = &self.bytes[start..start + descriptor.length];
        Ok(std::str::from_utf8(raw)
            .unwrap_or("")
            .trim_matches(|c: char| c.is_whitespace() || c == '\0'))
    }

    /// Numeric value of `field` in record `record`.
    pub fn f64_by_name(&self, record: usize, field: &str) -> Result<f64, DbfError> {
        let text = self.text_by_name(record, field)?;
        text.parse::<f64>().map_err(|_| DbfError::NotANumber {
            field: field.to_string(),
            record,
            value: text.to_string(),
        })
    }

    /// Whether record `record` carries the deletion flag.
    pub fn is_deleted(&self, record: usize) -> Result<bool, DbfError> {
        if record >= self.record_count {
            return Err(DbfError::RecordOutOfRange(record));
        }
        Ok(self.bytes[self.header_len + record * self.record_len] == DELETED_FLAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_utils::build_dbf;

    #[test]
    fn parses_header_and_reads_numeric_fields() {
        let bytes = build_dbf(&["CHN1_DEG", "RAIN_SUM"], &[vec![-3.25, 0.0], vec![1.5, 12.75]]);
        let table = DbfTable::parse(bytes).unwrap();

        assert_eq!(table.record_count(), 2);
        assert_eq!(table.f64_by_name(0, "CHN1_DEG").unwrap(), -3.25);
        assert_eq!(table.f64_by_name(1, "RAIN_SUM").unwrap(), 12.75);
    }

    #[test]
    fn unknown_field_is_an_error() {
        let bytes = build_dbf(&["CHN1_DEG"], &[vec![1.0]]);
        let table = DbfTable::parse(bytes).unwrap();
        assert!(matches!(
            table.f64_by_name(0, "WIND_SPEED"),
            Err(DbfError::UnknownField(_))
        ));
    }

    #[test]
    fn record_out_of_range_is_an_error() {
        let bytes = build_dbf(&["CHN1_DEG"], &[vec![1.0]]);
        let table = DbfTable::parse(bytes).unwrap();
        assert!(matches!(
            table.f64_by_name(1, "CHN1_DEG"),
            Err(DbfError::RecordOutOfRange(1))
        ));
    }

    #[test]
    fn truncated_record_area_is_rejected() {
        let mut bytes = build_dbf(&["CHN1_DEG"], &[vec![1.0], vec![2.0]]);
        bytes.truncate(bytes.len() - 4);
        assert!(matches!(
            DbfTable::parse(bytes),
            Err(DbfError::Truncated { .. })
        ));
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(matches!(
            DbfTable::parse(vec![0x03, 0x00]),
            Err(DbfError::Truncated { .. })
        ));
    }

    #[test]
    fn records_are_not_deleted_by_default() {
        let bytes = build_dbf(&["CHN1_DEG"], &[vec![1.0]]);
        let table = DbfTable::parse(bytes).unwrap();
        assert!(!table.is_deleted(0).unwrap());
    }
}
