use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    core::utils::{ensure_dir, tmp_path, write_atomic},
    domain::{Category, Payment, User},
    errors::Result,
};

use super::{Dataset, ExpenseRepository};

/// Repository backed by a JSON snapshot file.
///
/// Every read goes back to disk so the reports always see the current file.
#[derive(Debug, Clone)]
pub struct JsonRepository {
    path: PathBuf,
}

impl JsonRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Dataset> {
        load_dataset_from_path(&self.path)
    }
}

impl ExpenseRepository for JsonRepository {
    fn users(&self) -> Result<Vec<User>> {
        Ok(self.load()?.users)
    }

    fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.load()?.categories)
    }

    fn payments(&self) -> Result<Vec<Payment>> {
        Ok(self.load()?.linked_payments())
    }

    fn snapshot(&self) -> Result<Dataset> {
        self.load()?.snapshot()
    }
}

/// Writes a dataset snapshot by staging to a temporary file first.
pub fn save_dataset_to_path(dataset: &Dataset, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(dataset)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_dataset_from_path(path: &Path) -> Result<Dataset> {
    let data = fs::read_to_string(path)?;
    let dataset: Dataset = serde_json::from_str(&data)?;
    debug!(
        users = dataset.users.len(),
        categories = dataset.categories.len(),
        payments = dataset.payments.len(),
        "loaded dataset snapshot"
    );
    Ok(dataset)
}
