use crate::dataset::DatasetSource;
use crate::error::AgroError;
use std::path::PathBuf;

/// Dataset source backed by a local CSV file.
pub struct FileSource {
    path: PathBuf,
    label: String,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        FileSource { path, label }
    }
}

impl DatasetSource for FileSource {
    fn fetch(&self) -> Result<String, AgroError> {
        std::fs::read_to_string(&self.path)
            .map_err(|e| AgroError::DatasetFetch(format!("could not read {}: {e}", self.label)))
    }

    fn backend_name(&self) -> &str {
        &self.label
    }
}
