pub mod file;
pub mod http;
pub mod parse;

use crate::error::AgroError;
use crate::model::EnvironmentalReading;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Crop key (lowercase) -> reading.
pub type CropTable = BTreeMap<String, EnvironmentalReading>;

/// Trait for raw reference dataset backends.
pub trait DatasetSource: Send + Sync {
    /// Fetch the dataset as CSV text.
    fn fetch(&self) -> Result<String, AgroError>;

    /// Name of this source (for diagnostics).
    fn backend_name(&self) -> &str;
}

impl<T: DatasetSource + ?Sized> DatasetSource for Box<T> {
    fn fetch(&self) -> Result<String, AgroError> {
        (**self).fetch()
    }

    fn backend_name(&self) -> &str {
        (**self).backend_name()
    }
}

/// Per-crop reading lookup consumed by the estimator.
pub trait ReferenceData: Send + Sync {
    /// Look up a reading by normalized (lowercase) crop key.
    fn lookup(&self, crop_key: &str) -> Option<&EnvironmentalReading>;

    /// All crop keys in the dataset, sorted.
    fn crop_keys(&self) -> Vec<String>;
}

/// A dataset that is fetched and parsed once, then served from memory.
///
/// Fetch or parse failures collapse to an empty table, so every lookup
/// then reports the crop as missing. Concurrent first callers block on the
/// same initialization; the source is hit at most once.
pub struct CachedDataset<S: DatasetSource> {
    source: S,
    table: OnceLock<CropTable>,
}

impl<S: DatasetSource> CachedDataset<S> {
    pub fn new(source: S) -> Self {
        CachedDataset {
            source,
            table: OnceLock::new(),
        }
    }

    /// Fetch and parse the dataset if it has not been loaded yet.
    pub fn load(&self) -> &CropTable {
        self.table.get_or_init(|| load_table(&self.source))
    }

    /// Alias of [`CachedDataset::load`] for call sites that only need the
    /// side effect.
    pub fn ensure_loaded(&self) {
        self.load();
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }
}

impl<S: DatasetSource> ReferenceData for CachedDataset<S> {
    fn lookup(&self, crop_key: &str) -> Option<&EnvironmentalReading> {
        self.load().get(crop_key)
    }

    fn crop_keys(&self) -> Vec<String> {
        self.load().keys().cloned().collect()
    }
}

fn load_table(source: &dyn DatasetSource) -> CropTable {
    log::info!("Loading reference dataset from {}", source.backend_name());

    let text = match source.fetch() {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Reference dataset unavailable, continuing with no crops: {e}");
            return CropTable::new();
        }
    };

    match parse::parse_crop_table(&text) {
        Ok(table) => {
            log::info!("Loaded {} crop(s) from {}", table.len(), source.backend_name());
            table
        }
        Err(e) => {
            log::warn!("Reference dataset could not be parsed, continuing with no crops: {e}");
            CropTable::new()
        }
    }
}

/// A fixed in-memory dataset, already loaded.
#[derive(Debug, Clone, Default)]
pub struct StaticDataset {
    table: CropTable,
}

impl StaticDataset {
    /// Build from `(crop, reading)` pairs; crop names are lowercased.
    pub fn from_readings<I, K>(readings: I) -> Self
    where
        I: IntoIterator<Item = (K, EnvironmentalReading)>,
        K: AsRef<str>,
    {
        let table = readings
            .into_iter()
            .map(|(k, r)| (k.as_ref().trim().to_lowercase(), r))
            .collect();
        StaticDataset { table }
    }
}

impl ReferenceData for StaticDataset {
    fn lookup(&self, crop_key: &str) -> Option<&EnvironmentalReading> {
        self.table.get(crop_key)
    }

    fn crop_keys(&self) -> Vec<String> {
        self.table.keys().cloned().collect()
    }
}
