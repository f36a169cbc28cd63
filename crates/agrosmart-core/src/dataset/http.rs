use crate::dataset::DatasetSource;
use crate::error::AgroError;
use std::time::Duration;

/// Public copy of the crop recommendation dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/data_core-p27MBVeKwnlMfMaB3zigTErBOjbam5.csv";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Dataset source that downloads the CSV over HTTP(S).
///
/// The request is bounded by a timeout; expiry is reported as a fetch
/// failure like any other transport error.
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        HttpSource {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_URL)
    }
}

impl DatasetSource for HttpSource {
    fn fetch(&self) -> Result<String, AgroError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AgroError::DatasetFetch(format!("could not build HTTP client: {e}")))?;

        log::debug!("GET {} (timeout {:?})", self.url, self.timeout);

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AgroError::DatasetFetch(format!("request to {} timed out", self.url))
                } else {
                    AgroError::DatasetFetch(format!("request to {} failed: {e}", self.url))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgroError::DatasetFetch(format!(
                "{} returned HTTP {status}",
                self.url
            )));
        }

        response
            .text()
            .map_err(|e| AgroError::DatasetFetch(format!("could not read body from {}: {e}", self.url)))
    }

    fn backend_name(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_source() {
        let source = HttpSource::default();
        assert_eq!(source.url(), DEFAULT_DATASET_URL);
        assert_eq!(source.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_with_timeout() {
        let source = HttpSource::new("http://localhost/crops.csv").with_timeout(Duration::from_secs(5));
        assert_eq!(source.timeout(), Duration::from_secs(5));
        assert_eq!(source.backend_name(), "http://localhost/crops.csv");
    }

    #[test]
    fn test_malformed_url_is_fetch_error() {
        // Rejected while building the request, before any connection
        for url in ["not a url", "ftp://example.org/crops.csv"] {
            let source = HttpSource::new(url).with_timeout(Duration::from_secs(1));
            assert!(
                matches!(source.fetch(), Err(AgroError::DatasetFetch(_))),
                "{url}"
            );
        }
    }
}
