use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::version::checker::DEFAULT_DOWNLOAD_URL_TEMPLATE;
use crate::version::fetchers::github::{DEFAULT_BASE_URL, DEFAULT_REPOSITORY};
use crate::version::locator::VersionSource;

// =============================================================================
// Marker file convention
// =============================================================================

/// Directory holding the marker file, relative to the project
pub const DEFAULT_MANIFEST_DIRECTORY: &str = "Assets/GoogleMobileAds";

/// Prefix of the marker file name
pub const DEFAULT_MANIFEST_PREFIX: &str = "GoogleMobileAds_version-";

/// Suffix of the marker file name, before `.txt`
pub const DEFAULT_MANIFEST_SUFFIX: &str = "_manifest";

/// Configuration file looked up in the project directory
pub const PROJECT_CONFIG_FILE: &str = ".sdk-update-check.json";

/// Environment variable overriding the log filter
pub const LOG_ENV: &str = "SDK_UPDATE_CHECK_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Update check configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckConfig {
    /// Marker directory, relative to the project unless absolute
    pub manifest_directory: PathBuf,
    pub manifest_prefix: String,
    pub manifest_suffix: String,
    /// JSON version record used instead of the marker file when set
    pub sidecar_file: Option<PathBuf>,
    pub release_api_url: String,
    /// `owner/repo` on GitHub
    pub repository: String,
    /// Release page URL; `{version}` is replaced with the latest tag
    pub download_url_template: String,
    /// Name used in messages
    pub sdk_name: String,
    pub user_agent: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            manifest_directory: PathBuf::from(DEFAULT_MANIFEST_DIRECTORY),
            manifest_prefix: DEFAULT_MANIFEST_PREFIX.to_string(),
            manifest_suffix: DEFAULT_MANIFEST_SUFFIX.to_string(),
            sidecar_file: None,
            release_api_url: DEFAULT_BASE_URL.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
            download_url_template: DEFAULT_DOWNLOAD_URL_TEMPLATE.to_string(),
            sdk_name: "AdMob SDK".to_string(),
            user_agent: concat!("sdk-update-check/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CheckConfig {
    /// Load the configuration for a project.
    ///
    /// An explicit `path` must exist. Without one, `<project_dir>/.sdk-update-check.json`
    /// is used when present, otherwise defaults.
    pub fn load(project_dir: &Path, path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let candidate = project_dir.join(PROJECT_CONFIG_FILE);
                if candidate.is_file() {
                    Self::from_file(&candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command line values on top of the loaded configuration.
    ///
    /// Values that are `None` keep the configured ones.
    pub fn with_overrides(
        mut self,
        manifest_directory: Option<PathBuf>,
        sidecar_file: Option<PathBuf>,
        release_api_url: Option<String>,
    ) -> Self {
        if let Some(directory) = manifest_directory {
            self.manifest_directory = directory;
        }
        if sidecar_file.is_some() {
            self.sidecar_file = sidecar_file;
        }
        if let Some(url) = release_api_url {
            self.release_api_url = url;
        }
        self
    }

    /// Where the installed version is read from, resolved against `project_dir`.
    ///
    /// Absolute paths are used as is.
    pub fn version_source(&self, project_dir: &Path) -> VersionSource {
        match &self.sidecar_file {
            Some(sidecar) => VersionSource::Sidecar(project_dir.join(sidecar)),
            None => VersionSource::Manifest {
                directory: project_dir.join(&self.manifest_directory),
                prefix: self.manifest_prefix.clone(),
                suffix: self.manifest_suffix.clone(),
            },
        }
    }
}

/// Returns the path to the data directory for sdk-update-check.
/// Uses $XDG_DATA_HOME/sdk-update-check if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/sdk-update-check,
/// or ./sdk-update-check if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("sdk-update-check.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("sdk-update-check")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn check_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<CheckConfig>(json!({
            "sdkName": "Unity Ads"
        }))
        .unwrap();

        assert_eq!(result.sdk_name, "Unity Ads");
        assert_eq!(
            result.manifest_directory,
            PathBuf::from("Assets/GoogleMobileAds")
        );
        assert_eq!(result.release_api_url, "https://api.github.com");
    }

    #[test]
    fn check_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<CheckConfig>(json!({
            "manifestDirectory": "Plugins/Sdk",
            "manifestPrefix": "Sdk-",
            "manifestSuffix": "_marker",
            "sidecarFile": "sdk_version.json",
            "releaseApiUrl": "https://ghe.example.com/api/v3",
            "repository": "example/sdk",
            "downloadUrlTemplate": "https://example.com/sdk/{version}",
            "sdkName": "Example SDK",
            "userAgent": "custom-agent"
        }))
        .unwrap();

        assert_eq!(
            result,
            CheckConfig {
                manifest_directory: PathBuf::from("Plugins/Sdk"),
                manifest_prefix: "Sdk-".to_string(),
                manifest_suffix: "_marker".to_string(),
                sidecar_file: Some(PathBuf::from("sdk_version.json")),
                release_api_url: "https://ghe.example.com/api/v3".to_string(),
                repository: "example/sdk".to_string(),
                download_url_template: "https://example.com/sdk/{version}".to_string(),
                sdk_name: "Example SDK".to_string(),
                user_agent: "custom-agent".to_string(),
            }
        );
    }

    #[test]
    fn load_uses_project_config_file_when_present() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            r#"{"repository": "example/sdk"}"#,
        )
        .unwrap();

        let result = CheckConfig::load(dir.path(), None).unwrap();

        assert_eq!(result.repository, "example/sdk");
    }

    #[test]
    fn load_falls_back_to_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();

        let result = CheckConfig::load(dir.path(), None).unwrap();

        assert_eq!(result, CheckConfig::default());
    }

    #[test]
    fn load_reports_missing_explicit_config_file() {
        let dir = TempDir::new().unwrap();

        let result = CheckConfig::load(dir.path(), Some(&dir.path().join("missing.json")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn load_reports_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = CheckConfig::load(dir.path(), Some(&path));

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn with_overrides_prefers_flags_over_project_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            r#"{
                "manifestDirectory": "Plugins/FromFile",
                "releaseApiUrl": "https://file.example.com"
            }"#,
        )
        .unwrap();

        let result = CheckConfig::load(dir.path(), None).unwrap().with_overrides(
            Some(PathBuf::from("/work/FromFlag")),
            Some(PathBuf::from("/work/sdk_version.json")),
            None,
        );

        assert_eq!(result.manifest_directory, PathBuf::from("/work/FromFlag"));
        assert_eq!(
            result.sidecar_file,
            Some(PathBuf::from("/work/sdk_version.json"))
        );
        assert_eq!(result.release_api_url, "https://file.example.com");
    }

    #[test]
    fn with_overrides_without_flags_keeps_file_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"sidecarFile": "sdk_version.json", "releaseApiUrl": "https://file.example.com"}"#,
        )
        .unwrap();

        let loaded = CheckConfig::load(dir.path(), Some(&path)).unwrap();
        let result = loaded.clone().with_overrides(None, None, None);

        assert_eq!(result, loaded);
    }

    #[test]
    fn version_source_keeps_absolute_manifest_directory() {
        let config = CheckConfig::default().with_overrides(
            Some(PathBuf::from("/elsewhere/Sdk")),
            None,
            None,
        );

        assert_eq!(
            config.version_source(Path::new("/work/game")),
            VersionSource::Manifest {
                directory: PathBuf::from("/elsewhere/Sdk"),
                prefix: "GoogleMobileAds_version-".to_string(),
                suffix: "_manifest".to_string(),
            }
        );
    }

    #[test]
    fn version_source_resolves_manifest_against_project_dir() {
        let source = CheckConfig::default().version_source(Path::new("/work/game"));

        assert_eq!(
            source,
            VersionSource::Manifest {
                directory: PathBuf::from("/work/game/Assets/GoogleMobileAds"),
                prefix: "GoogleMobileAds_version-".to_string(),
                suffix: "_manifest".to_string(),
            }
        );
    }

    #[test]
    fn version_source_prefers_sidecar_when_configured() {
        let config = CheckConfig {
            sidecar_file: Some(PathBuf::from("sdk_version.json")),
            ..CheckConfig::default()
        };

        assert_eq!(
            config.version_source(Path::new("/work/game")),
            VersionSource::Sidecar(PathBuf::from("/work/game/sdk_version.json"))
        );
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/sdk-update-check"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/sdk-update-check")
        );
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./sdk-update-check"));
    }
}
