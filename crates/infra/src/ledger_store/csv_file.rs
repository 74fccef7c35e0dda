use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use stockledger_inventory::LedgerRow;

use super::r#trait::{LedgerReader, LedgerStoreError, LedgerWriter};

/// CSV-file backed ledger with a `DATE,PRODUCT,TYPE,QUANTITY,COMMENTS` header.
///
/// A missing file reads as an empty ledger. Appends create the file (and its
/// parent directory) on first use. Rows shorter than the header are padded
/// with empty cells so missing columns surface as domain errors on parse;
/// rows longer than the header are rejected.
#[derive(Debug)]
pub struct CsvLedgerStore {
    path: PathBuf,
    append_lock: Mutex<()>,
}

impl CsvLedgerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerReader for CsvLedgerStore {
    fn fetch_all_records(&self) -> Result<Vec<LedgerRow>, LedgerStoreError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "ledger file missing; treating as empty");
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            let mut record = record?;
            if record.len() > headers.len() {
                return Err(LedgerStoreError::MalformedRow {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    found: record.len(),
                    expected: headers.len(),
                });
            }
            while record.len() < headers.len() {
                record.push_field("");
            }
            rows.push(record.deserialize::<LedgerRow>(Some(&headers))?);
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "ledger loaded");
        Ok(rows)
    }
}

impl LedgerWriter for CsvLedgerStore {
    fn append(&self, row: LedgerRow) -> Result<(), LedgerStoreError> {
        let _guard = self.append_lock.lock().map_err(|_| LedgerStoreError::LockPoisoned)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let len = file.metadata()?.len();
        let needs_header = len == 0;
        if len > 0 {
            // Terminate a last line left open by an external editor or export.
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                file.write_all(b"\n")?;
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(&row)?;
        writer.flush()?;
        Ok(())
    }
}
