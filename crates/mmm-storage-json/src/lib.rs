//! Filesystem JSON persistence for the MMM ledger blobs.
//!
//! Two pretty-printed JSON files under one data directory, one per logical
//! collection. Writes go through a tmp file and rename so a crashed save
//! never leaves a half-written blob behind.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::debug;

use mmm_core::{CoreError, LedgerStorage};
use mmm_domain::{Group, Transaction};

const TRANSACTIONS_FILE: &str = "mmm_transactions.json";
const GROUPS_FILE: &str = "mmm_groups.json";
const TMP_SUFFIX: &str = "tmp";

/// Stores the transaction and group ledgers as JSON files in `data_dir`.
#[derive(Debug, Clone)]
pub struct JsonLedgerStorage {
    data_dir: PathBuf,
}

impl JsonLedgerStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.data_dir.join(TRANSACTIONS_FILE)
    }

    pub fn groups_path(&self) -> PathBuf {
        self.data_dir.join(GROUPS_FILE)
    }

    fn write_blob<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn read_blob<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>, CoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
    }
}

impl LedgerStorage for JsonLedgerStorage {
    fn load(&self) -> Result<(Vec<Transaction>, Vec<Group>), CoreError> {
        let transactions = self.read_blob(&self.transactions_path())?;
        let groups = self.read_blob(&self.groups_path())?;
        debug!(
            transactions = transactions.len(),
            groups = groups.len(),
            "loaded ledger blobs"
        );
        Ok((transactions, groups))
    }

    fn save(&self, transactions: &[Transaction], groups: &[Group]) -> Result<(), CoreError> {
        self.write_blob(&self.transactions_path(), &transactions)?;
        self.write_blob(&self.groups_path(), &groups)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
