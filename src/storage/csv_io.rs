//! CSV file I/O with atomic writes
//!
//! Record files are replaced wholesale: writes go to a temp file in the same
//! directory, are flushed and synced, then renamed over the target. A reader
//! never observes a partially written file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SpendlogError;

/// Read all records from a CSV file, returning an empty list if the file
/// doesn't exist
pub fn read_records<T, P>(path: P) -> Result<Vec<T>, SpendlogError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)
        .map_err(|e| SpendlogError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = csv::Reader::from_reader(BufReader::new(file));
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: T = result.map_err(|e| {
            SpendlogError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Write all records to a CSV file atomically (write to temp, then rename)
///
/// This ensures that the file is either completely written or not modified at
/// all, preventing corruption on crashes or power failures.
pub fn write_records_atomic<T, P>(path: P, records: &[T]) -> Result<(), SpendlogError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SpendlogError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Create temp file in same directory (important for atomic rename)
    let temp_path = path.with_extension("csv.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| SpendlogError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| SpendlogError::Storage(format!("Failed to serialize record: {}", e)))?;
    }

    let mut inner = writer
        .into_inner()
        .map_err(|e| SpendlogError::Storage(format!("Failed to flush data: {}", e)))?;
    inner
        .flush()
        .map_err(|e| SpendlogError::Storage(format!("Failed to flush data: {}", e)))?;

    // Sync to disk before rename
    inner
        .get_ref()
        .sync_all()
        .map_err(|e| SpendlogError::Storage(format!("Failed to sync data: {}", e)))?;

    // Atomic rename
    fs::rename(&temp_path, path).map_err(|e| {
        // Try to clean up temp file if rename fails
        let _ = fs::remove_file(&temp_path);
        SpendlogError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        name: String,
        value: i64,
    }

    #[test]
    fn test_read_nonexistent_returns_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.csv");

        let records: Vec<TestRecord> = read_records(&path).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.csv");

        let records = vec![
            TestRecord {
                name: "first".to_string(),
                value: 42,
            },
            TestRecord {
                name: "with, comma".to_string(),
                value: -7,
            },
        ];

        write_records_atomic(&path, &records).unwrap();
        assert!(path.exists());

        let loaded: Vec<TestRecord> = read_records(&path).unwrap();
        assert_eq!(records, loaded);
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.csv");
        let temp_path = temp_dir.path().join("test.csv.tmp");

        let records = vec![TestRecord {
            name: "test".to_string(),
            value: 42,
        }];

        write_records_atomic(&path, &records).unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("test.csv");

        let records = vec![TestRecord {
            name: "test".to_string(),
            value: 1,
        }];

        write_records_atomic(&path, &records).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_empty_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.csv");

        let records = vec![TestRecord {
            name: "test".to_string(),
            value: 1,
        }];
        write_records_atomic(&path, &records).unwrap();

        write_records_atomic::<TestRecord, _>(&path, &[]).unwrap();
        let loaded: Vec<TestRecord> = read_records(&path).unwrap();
        assert!(loaded.is_empty());
    }
}
