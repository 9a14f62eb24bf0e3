use std::path::{Path, PathBuf};

/// Disease to symptom rows
pub const DATASET_FILE: &str = "dataset.csv";
/// Disease to description rows
pub const DESCRIPTION_FILE: &str = "disease_description.csv";
/// Disease to precaution rows
pub const PRECAUTION_FILE: &str = "disease_precaution.csv";
/// Symptom to severity rows
pub const SEVERITY_FILE: &str = "symptom_severity.csv";
/// Labeled training table of the optional classifier
pub const TRAINING_FILE: &str = "Training.csv";

pub const DEFAULT_PRIMARY_DIR: &str = "backend/dataset";
pub const DEFAULT_SECONDARY_DIR: &str = "public/data";

/// Two-tier search path for the tabular resources.
///
/// A file is taken from the primary directory when it exists there, otherwise
/// from the secondary directory (whether or not it exists).
#[derive(Debug, Clone)]
pub struct DataSources {
    pub primary: PathBuf,
    pub secondary: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            primary: PathBuf::from(DEFAULT_PRIMARY_DIR),
            secondary: PathBuf::from(DEFAULT_SECONDARY_DIR),
        }
    }
}

impl DataSources {
    pub fn new(primary: impl Into<PathBuf>, secondary: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Both tiers pointing at the same directory
    pub fn single(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref(), dir.as_ref())
    }

    #[must_use]
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        let primary = self.primary.join(file_name);
        if primary.exists() {
            primary
        } else {
            self.secondary.join(file_name)
        }
    }

    #[must_use]
    pub fn dataset(&self) -> PathBuf {
        self.resolve(DATASET_FILE)
    }

    #[must_use]
    pub fn descriptions(&self) -> PathBuf {
        self.resolve(DESCRIPTION_FILE)
    }

    #[must_use]
    pub fn precautions(&self) -> PathBuf {
        self.resolve(PRECAUTION_FILE)
    }

    #[must_use]
    pub fn severity(&self) -> PathBuf {
        self.resolve(SEVERITY_FILE)
    }

    #[must_use]
    pub fn training(&self) -> PathBuf {
        self.resolve(TRAINING_FILE)
    }
}
