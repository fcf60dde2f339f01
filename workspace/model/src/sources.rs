use std::path::{Path, PathBuf};

/// Filesystem locations of the two CSV sources a session works with.
///
/// The pair also acts as the identity of a loaded dataset: the cache that
/// holds cleaned tables is keyed by [`DataSources::cache_key`], so pointing
/// the service at different files never aliases a previously loaded pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    /// Daily transaction rows (one per store and date).
    pub transactions: PathBuf,
    /// Static per-store metadata.
    pub stores: PathBuf,
}

impl DataSources {
    /// Conventional file names under a data directory.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            transactions: dir.join("train.csv"),
            stores: dir.join("store.csv"),
        }
    }

    pub fn new(transactions: impl Into<PathBuf>, stores: impl Into<PathBuf>) -> Self {
        Self {
            transactions: transactions.into(),
            stores: stores.into(),
        }
    }

    /// Cache key identifying this source pair.
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}",
            self.transactions.display(),
            self.stores.display()
        )
    }

    /// The first source path that does not resolve to an existing file.
    pub fn missing_source(&self) -> Option<&Path> {
        [self.transactions.as_path(), self.stores.as_path()]
            .into_iter()
            .find(|p| !p.is_file())
    }
}
