//! Command orchestration shared by the binary and integration tests

use std::io::Write;
use std::path::PathBuf;

use tracing::{error, warn};

use crate::config::CheckConfig;
use crate::notify::{LinkOpener, Prompter, present};
use crate::version::checker::UpdateChecker;
use crate::version::error::{CheckError, ErrorKind};
use crate::version::fetchers::GitHubReleaseFetcher;

/// What to do on invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Compare the installed version with the latest release and prompt
    Check,
    /// Print the installed version
    Local,
    /// Print the latest released version
    Latest,
}

pub struct App {
    config: CheckConfig,
    project_dir: PathBuf,
    prompter: Box<dyn Prompter>,
    opener: Box<dyn LinkOpener>,
}

impl App {
    pub fn new(
        config: CheckConfig,
        project_dir: PathBuf,
        prompter: Box<dyn Prompter>,
        opener: Box<dyn LinkOpener>,
    ) -> Self {
        Self {
            config,
            project_dir,
            prompter,
            opener,
        }
    }

    fn checker(&self) -> Result<UpdateChecker<GitHubReleaseFetcher>, CheckError> {
        let fetcher = GitHubReleaseFetcher::new(
            &self.config.release_api_url,
            &self.config.repository,
            &self.config.user_agent,
        )?;
        Ok(UpdateChecker::new(
            self.config.version_source(&self.project_dir),
            fetcher,
            &self.config.download_url_template,
        ))
    }

    /// Run `action`, writing printed versions to `out`.
    ///
    /// Failures are logged once here and reported as `false`; nothing is
    /// retried. A missing version marker is a warning, everything else an error.
    pub async fn run<W: Write>(&self, action: Action, out: &mut W) -> bool {
        match self.execute(action, out).await {
            Ok(()) => true,
            Err(e) => {
                let kind = e.downcast_ref::<CheckError>().map(CheckError::kind);
                if kind == Some(ErrorKind::NotFound) {
                    warn!("{}", e);
                } else {
                    error!("{}", e);
                }
                false
            }
        }
    }

    async fn execute<W: Write>(&self, action: Action, out: &mut W) -> anyhow::Result<()> {
        let checker = self.checker()?;
        match action {
            Action::Check => {
                let report = checker.check().await?;
                present(
                    &report,
                    &self.config.sdk_name,
                    self.prompter.as_ref(),
                    self.opener.as_ref(),
                );
            }
            Action::Local => {
                let version = checker.local_version().map_err(CheckError::from)?;
                writeln!(out, "{version}")?;
            }
            Action::Latest => {
                let release = checker.latest_release().await?;
                writeln!(out, "{}", release.tag_name)?;
            }
        }
        Ok(())
    }
}
