use crate::domain::PlaytimeRecord;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadRecordError {
    #[error("failed to read playtime record {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a valid playtime record ({source}). At least try to make it {{}}.")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum SaveRecordError {
    #[error("failed to encode playtime record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write playtime record: {0}")]
    Write(#[from] io::Error),
}

/// Loads the record, treating a missing file as empty. Anything that is not a
/// flat object of string values is rejected as a whole.
pub fn load_record(path: &Path) -> Result<PlaytimeRecord, LoadRecordError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Ok(PlaytimeRecord::default());
        }
        Err(source) => {
            return Err(LoadRecordError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| LoadRecordError::Corrupt {
        path: path.display().to_string(),
        source,
    })
}

/// Rewrites the whole record through a sibling temp file and a rename.
pub fn save_record(path: &Path, record: &PlaytimeRecord) -> Result<(), SaveRecordError> {
    let text = serde_json::to_string_pretty(record)?;
    let tmp = path.with_extension("json.tmp");
    if let Err(error) = fs::write(&tmp, text).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(error.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().expect("tempdir");
        let record = load_record(&dir.path().join("playtime.json")).expect("load");
        assert_eq!(record, PlaytimeRecord::default());
    }

    #[test]
    fn corrupt_file_fails_fast() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("playtime.json");

        for content in ["not json", "[]", r#"{"Chess": 12}"#, r#"{"Chess": "01:00:00""#] {
            fs::write(&path, content).expect("write");
            let error = load_record(&path).expect_err("should fail");
            assert!(matches!(error, LoadRecordError::Corrupt { .. }), "{content}");
        }
    }

    #[test]
    fn save_writes_sorted_pretty_json() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("playtime.json");
        let mut record = PlaytimeRecord::default();
        record.set("Zork", 1);
        record.set("Chess", 3723);

        save_record(&path, &record).expect("save");

        let text = fs::read_to_string(&path).expect("read");
        assert_eq!(
            text,
            "{\n  \"Chess\": \"01:02:03\",\n  \"Zork\": \"00:00:01\"\n}"
        );
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(load_record(&path).expect("reload"), record);
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("playtime.json");
        fs::write(&path, r#"{"Old": "09:09:09", "Chess": "00:00:01"}"#).expect("write");

        let mut record = PlaytimeRecord::default();
        record.set("Chess", 2);
        save_record(&path, &record).expect("save");

        assert_eq!(load_record(&path).expect("reload"), record);
    }

    #[test]
    fn save_reports_unwritable_destination() {
        let dir = tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").expect("write");

        let error = save_record(&blocker.join("playtime.json"), &PlaytimeRecord::default())
            .expect_err("should fail");
        assert!(matches!(error, SaveRecordError::Write(_)));
    }
}
