//! Shared test utilities

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use sdk_update_check::config::CheckConfig;
use sdk_update_check::notify::{LinkOpener, NotifyError};
use sdk_update_check::version::error::FetchError;
use sdk_update_check::version::fetcher::ReleaseFetcher;

pub const MARKER_DIR: &str = "Assets/GoogleMobileAds";
pub const LATEST_PATH: &str = "/repos/googleads/googleads-mobile-unity/releases/latest";

/// Fetcher returning a fixed body and counting calls
pub struct StubFetcher {
    body: Result<String, u16>,
    calls: Arc<Mutex<usize>>,
}

impl StubFetcher {
    pub fn with_body(body: &str) -> Self {
        Self {
            body: Ok(body.to_string()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_tag(tag: &str) -> Self {
        Self::with_body(&format!(r#"{{"tag_name": "{tag}"}}"#))
    }

    pub fn failing(status: u16) -> Self {
        Self {
            body: Err(status),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ReleaseFetcher for StubFetcher {
    async fn fetch_latest_release(&self) -> Result<String, FetchError> {
        *self.calls.lock().unwrap() += 1;
        match &self.body {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(FetchError::UnexpectedStatus(
                reqwest::StatusCode::from_u16(*status).unwrap(),
            )),
        }
    }
}

/// Link opener recording every opened URL
#[derive(Clone, Default)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), NotifyError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Link opener that cannot launch anything, as on a headless machine
pub struct FailingOpener;

impl LinkOpener for FailingOpener {
    fn open(&self, url: &str) -> Result<(), NotifyError> {
        Err(NotifyError::Launch {
            url: url.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "xdg-open not found"),
        })
    }
}

/// Create a project directory, optionally containing a marker for `version`
pub fn create_project(version: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    let marker_dir = dir.path().join(MARKER_DIR);
    std::fs::create_dir_all(&marker_dir).unwrap();
    if let Some(version) = version {
        write_marker(&marker_dir, version);
    }
    dir
}

pub fn write_marker(marker_dir: &Path, version: &str) {
    std::fs::write(
        marker_dir.join(format!("GoogleMobileAds_version-{version}_manifest.txt")),
        "",
    )
    .unwrap();
}

/// Default config pointed at a local API server
pub fn config_for(api_url: &str) -> CheckConfig {
    CheckConfig {
        release_api_url: api_url.to_string(),
        ..CheckConfig::default()
    }
}

/// Log lines written by the `tracing` subscriber installed with [`LogCapture::install`]
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Install a thread-local subscriber; logs are captured until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let capture = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || capture.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.buffer.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
