// crates/countrydb-core/src/feed/file.rs
use super::common_io::open_stream;
use super::{decode_all, CountryFeed};
use crate::error::{CountryDbError, Result};
use crate::model::CountryRecord;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A feed backed by a JSON snapshot of the API's bulk response.
///
/// The file is re-read on every call; nothing is cached or written.
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The snapshot bundled with this crate (`data/sample_countries.json`).
    pub fn sample() -> Self {
        Self::new(Self::default_data_dir().join("sample_countries.json"))
    }

    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    fn read(&self) -> Result<Vec<CountryRecord>> {
        let mut reader = open_stream(&self.path)?;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| CountryDbError::feed(self.source(), e))?;
        decode_all(&self.source(), &bytes)
    }
}

impl CountryFeed for FileFeed {
    fn source(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_all(&self) -> Result<Vec<CountryRecord>> {
        self.read()
    }

    fn fetch_by_code(&self, code: &str) -> Result<CountryRecord> {
        self.read()?
            .into_iter()
            .find(|c| c.has_code(code))
            .ok_or_else(|| CountryDbError::RecordNotFound(code.to_owned()))
    }

    fn fetch_by_name(&self, name: &str) -> Result<CountryRecord> {
        self.read()?
            .into_iter()
            .find(|c| c.common_name == name)
            .ok_or_else(|| CountryDbError::RecordNotFound(name.to_owned()))
    }
}
