use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};
use crate::record::LedgerRecord;
use crate::store::LedgerStore;

/// A ledger persisted as one JSON record per line.
///
/// Each append is a single write of one line followed by a flush. A crash
/// mid-write can leave an unterminated final line; reads skip it and the
/// next append truncates it away, so it never lands mid-file. A missing
/// file reads as an empty ledger.
#[derive(Debug, Clone)]
pub struct JsonLinesLedger {
    path: PathBuf,
}

impl JsonLinesLedger {
    /// Use the ledger file at `path`. The file is created on first append.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cut an unterminated final line left by an interrupted append.
    fn drop_torn_tail(&self) -> LedgerResult<()> {
        let mut file = match OpenOptions::new().read(true).write(true).open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        if file.metadata()?.len() == 0 {
            return Ok(());
        }

        let mut last = [0u8; 1];
        file.seek(SeekFrom::End(-1))?;
        file.read_exact(&mut last)?;
        if last[0] == b'\n' {
            return Ok(());
        }

        let mut content = Vec::new();
        file.seek(SeekFrom::Start(0))?;
        file.read_to_end(&mut content)?;
        let keep = content
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        log::warn!(
            "dropping {} bytes of unterminated record from {}",
            content.len() - keep,
            self.path.display()
        );
        file.set_len(keep as u64)?;
        file.sync_all()?;
        Ok(())
    }
}

impl LedgerStore for JsonLinesLedger {
    fn append(&mut self, record: LedgerRecord) -> LedgerResult<()> {
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        self.drop_torn_tail()?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;
        log::debug!("appended {} record to {}", record.kind(), self.path.display());
        Ok(())
    }

    fn read_all(&self) -> LedgerResult<Vec<LedgerRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        // Only newline-terminated lines are committed records.
        let committed = match content.rfind('\n') {
            Some(i) => &content[..=i],
            None => "",
        };
        if committed.len() < content.len() {
            log::warn!(
                "ignoring unterminated final line in {}",
                self.path.display()
            );
        }

        committed
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| LedgerError::Corrupt {
                    line: i + 1,
                    message: e.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let ledger = JsonLinesLedger::open(dir.path().join("ledger.jsonl"));
        assert!(ledger.read_all().unwrap().is_empty());
    }

    #[test]
    fn append_then_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("ledger.jsonl");

        let mut ledger = JsonLinesLedger::open(&path);
        ledger
            .append(LedgerRecord::adjustment("Dock", "Lie Low", 0.0, -2.0))
            .unwrap();
        ledger
            .append(LedgerRecord::adjustment("Sea", "Proxy Charity", 0.0, -1.0))
            .unwrap();

        let reopened = JsonLinesLedger::open(&path);
        let records = reopened.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].ward, "Dock");
        assert_eq!(records[1].notoriety_delta, -1.0);
    }

    #[test]
    fn torn_tail_is_skipped_then_truncated_on_append() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.jsonl");
        let mut ledger = JsonLinesLedger::open(&path);
        ledger
            .append(LedgerRecord::adjustment("Dock", "Proxy Charity", 0.0, -1.0))
            .unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(br#"{"timestamp":"2024"#).unwrap();
        drop(file);

        let mut reopened = JsonLinesLedger::open(&path);
        assert_eq!(reopened.read_all().unwrap().len(), 1);

        reopened
            .append(LedgerRecord::adjustment("Dock", "Lie Low", 0.0, -2.0))
            .unwrap();
        let records = reopened.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].notoriety_delta, -2.0);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.ends_with('\n'));
    }

    #[test]
    fn torn_only_line_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.jsonl");
        fs::write(&path, "{\"timest").unwrap();

        let mut ledger = JsonLinesLedger::open(&path);
        assert!(ledger.read_all().unwrap().is_empty());
        ledger
            .append(LedgerRecord::adjustment("Sea", "ok", 0.0, 0.0))
            .unwrap();
        assert_eq!(ledger.read_all().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_line_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.jsonl");
        let mut ledger = JsonLinesLedger::open(&path);
        ledger
            .append(LedgerRecord::adjustment("Dock", "ok", 0.0, 0.0))
            .unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        file.write_all(b"{not json}\n").unwrap();

        match ledger.read_all() {
            Err(LedgerError::Corrupt { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected corrupt error, got {other:?}"),
        }
    }

    #[test]
    fn unwritable_path_is_unavailable() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending.
        let mut ledger = JsonLinesLedger::open(dir.path());
        let err = ledger
            .append(LedgerRecord::adjustment("Dock", "x", 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unavailable(_)));
    }
}
