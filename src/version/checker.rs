//! Comparison of the installed version against the latest release

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::version::error::{CheckError, LocateError};
use crate::version::fetcher::{ReleaseDescriptor, ReleaseFetcher, parse_release};
use crate::version::locator::VersionSource;
use crate::version::semver::{SemanticVersion, compare_versions};

/// Release page for a tag; `{version}` is replaced with the remote tag
pub const DEFAULT_DOWNLOAD_URL_TEMPLATE: &str =
    "https://github.com/googleads/googleads-mobile-unity/releases/tag/{version}";

/// Lifecycle of a single check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Idle,
    Fetching,
    Succeeded,
    Failed,
}

/// How the installed version relates to the latest release
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// Installed version is older; the release page can be opened
    Outdated { download_url: String },
    /// Installed version is newer than the latest release
    Ahead,
    /// Installed version is the latest release
    Current,
}

/// Result of a successful check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Installed version as found locally
    pub local_version: String,
    /// Latest version as published remotely
    pub latest_version: String,
    pub comparison: Comparison,
}

/// Build the release page URL for `version`.
pub fn download_url(template: &str, version: &str) -> String {
    template.replace("{version}", version)
}

fn transition(from: CheckState, to: CheckState) {
    debug!("Check state: {:?} -> {:?}", from, to);
}

fn failed(from: CheckState, err: CheckError) -> CheckError {
    transition(from, CheckState::Failed);
    err
}

/// Compare the installed version with the latest release.
///
/// The release is fetched first, then `local_version` is checked: `None`
/// means the installed version could not be found and fails the check
/// without ordering anything.
pub async fn compare<F: ReleaseFetcher + ?Sized>(
    local_version: Option<&str>,
    fetcher: &F,
    download_url_template: &str,
) -> Result<CheckReport, CheckError> {
    transition(CheckState::Idle, CheckState::Fetching);

    let body = fetcher
        .fetch_latest_release()
        .await
        .map_err(|e| failed(CheckState::Fetching, e.into()))?;

    let ReleaseDescriptor {
        tag_name: latest_version,
    } = parse_release(&body).map_err(|e| failed(CheckState::Fetching, e.into()))?;
    debug!("Latest release: {}", latest_version);

    let Some(local_version) = local_version else {
        return Err(failed(
            CheckState::Fetching,
            CheckError::LocalVersionUnavailable,
        ));
    };

    let comparison = match compare_versions(local_version, &latest_version) {
        Some(Ordering::Less) => Comparison::Outdated {
            download_url: download_url(download_url_template, &latest_version),
        },
        Some(Ordering::Greater) => Comparison::Ahead,
        Some(Ordering::Equal) => Comparison::Current,
        None => {
            let invalid = if SemanticVersion::parse(local_version).is_none() {
                local_version
            } else {
                &latest_version
            };
            return Err(failed(
                CheckState::Fetching,
                CheckError::InvalidVersion(invalid.to_string()),
            ));
        }
    };

    transition(CheckState::Fetching, CheckState::Succeeded);
    Ok(CheckReport {
        local_version: local_version.to_string(),
        latest_version,
        comparison,
    })
}

/// Locates the installed version and compares it with the latest release
pub struct UpdateChecker<F: ReleaseFetcher> {
    source: VersionSource,
    fetcher: F,
    download_url_template: String,
}

impl<F: ReleaseFetcher> UpdateChecker<F> {
    pub fn new(source: VersionSource, fetcher: F, download_url_template: &str) -> Self {
        Self {
            source,
            fetcher,
            download_url_template: download_url_template.to_string(),
        }
    }

    /// Run a full check.
    ///
    /// Stops before any network access when the installed version cannot be found.
    pub async fn check(&self) -> Result<CheckReport, CheckError> {
        let local_version = self.local_version()?;
        info!("Installed version: {}", local_version);
        compare(
            Some(&local_version),
            &self.fetcher,
            &self.download_url_template,
        )
        .await
    }

    pub fn local_version(&self) -> Result<String, LocateError> {
        self.source.locate()
    }

    /// Fetch and parse the latest release without comparing.
    pub async fn latest_release(&self) -> Result<ReleaseDescriptor, CheckError> {
        let body = self.fetcher.fetch_latest_release().await?;
        Ok(parse_release(&body)?)
    }
}
