//! Fetching raw CSV text.
//!
//! The fetch is the only asynchronous boundary in the system; everything
//! downstream of it is synchronous and pure. We use a blocking client since
//! exactly one fetch happens per load.

use std::path::PathBuf;
use std::time::Duration;

use crate::data::sample::SAMPLE_CSV;
use crate::error::AppError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the CSV text comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
    /// The bundled 2012–2024 demo dataset.
    Sample,
}

impl DataSource {
    /// Resolve the source from an optional CLI argument.
    ///
    /// Precedence: explicit `--data` (URL or file path), then the
    /// `WDASH_DATA_URL` environment variable (a `.env` file is honored),
    /// then the bundled sample.
    pub fn resolve(data_arg: Option<&str>, use_sample: bool) -> Self {
        if use_sample {
            return DataSource::Sample;
        }
        if let Some(arg) = data_arg {
            return Self::from_spec(arg);
        }
        dotenvy::dotenv().ok();
        match std::env::var("WDASH_DATA_URL") {
            Ok(url) if !url.trim().is_empty() => DataSource::Url(url.trim().to_string()),
            _ => DataSource::Sample,
        }
    }

    fn from_spec(spec: &str) -> Self {
        if spec.starts_with("http://") || spec.starts_with("https://") {
            DataSource::Url(spec.to_string())
        } else {
            DataSource::File(PathBuf::from(spec))
        }
    }

    /// Human-readable origin for the run summary / TUI status line.
    pub fn describe(&self) -> String {
        match self {
            DataSource::Url(url) => url.clone(),
            DataSource::File(path) => path.display().to_string(),
            DataSource::Sample => "bundled sample (2012-2024)".to_string(),
        }
    }

    /// Fetch the raw CSV text. Any failure here is fatal for the current
    /// load and surfaces as a single error message; retry is up to the
    /// caller.
    pub fn fetch_text(&self) -> Result<String, AppError> {
        match self {
            DataSource::Sample => Ok(SAMPLE_CSV.to_string()),
            DataSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
                AppError::runtime(format!("Failed to read '{}': {e}", path.display()))
            }),
            DataSource::Url(url) => fetch_url(url),
        }
    }
}

fn fetch_url(url: &str) -> Result<String, AppError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| AppError::runtime(format!("Failed to build HTTP client: {e}")))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| AppError::runtime(format!("Fetch failed for '{url}': {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::runtime(format!("HTTP {status} fetching '{url}'.")));
    }

    response
        .text()
        .map_err(|e| AppError::runtime(format!("Failed to read response body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_specs_are_recognized() {
        match DataSource::from_spec("https://example.com/series.csv") {
            DataSource::Url(u) => assert!(u.ends_with("series.csv")),
            other => panic!("expected Url, got {other:?}"),
        }
        match DataSource::from_spec("data/series.csv") {
            DataSource::File(_) => {}
            other => panic!("expected File, got {other:?}"),
        }
    }

    #[test]
    fn sample_source_returns_embedded_text() {
        let text = DataSource::Sample.fetch_text().unwrap();
        assert!(text.starts_with("year,"));
        assert_eq!(text.lines().count(), 14); // header + 13 years
    }
}
