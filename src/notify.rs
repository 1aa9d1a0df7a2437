//! Presentation of a check outcome
//!
//! Outdated installations are offered the release page; opening it is
//! gated by a confirmation from the [`Prompter`].

use std::io::{self, BufRead, Write};
use std::process::{Command, ExitStatus};

#[cfg(test)]
use mockall::automock;

use thiserror::Error;
use tracing::{info, warn};

use crate::version::checker::{CheckReport, Comparison};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to read confirmation: {0}")]
    Prompt(#[from] io::Error),

    #[error("Failed to launch opener for {url}: {source}")]
    Launch {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("Opener for {url} exited with {status}")]
    OpenerFailed { url: String, status: ExitStatus },
}

/// Asks the user a yes/no question
#[cfg_attr(test, automock)]
pub trait Prompter: Send + Sync {
    fn confirm(&self, title: &str, message: &str) -> Result<bool, NotifyError>;
}

/// Opens a URL in the system's default handler
#[cfg_attr(test, automock)]
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), NotifyError>;
}

/// What was shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    UpToDate,
    Ahead,
    UpdateDeclined,
    UpdateOpened,
    /// The update was accepted but the release page could not be opened
    OpenFailed,
}

/// Prompts on stderr and reads the answer from stdin
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, title: &str, message: &str) -> Result<bool, NotifyError> {
        let stdin = io::stdin();
        let stderr = io::stderr();
        confirm_with(&mut stdin.lock(), &mut stderr.lock(), title, message)
    }
}

/// Answers every prompt the same way (`--yes` / `--no-open`)
pub struct AutoPrompter(pub bool);

impl Prompter for AutoPrompter {
    fn confirm(&self, title: &str, _message: &str) -> Result<bool, NotifyError> {
        info!("{}: answering {}", title, if self.0 { "yes" } else { "no" });
        Ok(self.0)
    }
}

/// Write the question to `output` and read a single answer line from `input`.
///
/// Only `y` and `yes` (any case) confirm; end of input declines.
pub fn confirm_with<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    title: &str,
    message: &str,
) -> Result<bool, NotifyError> {
    write!(output, "{title}\n{message} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Launches the platform URL handler
pub struct SystemLinkOpener;

impl SystemLinkOpener {
    fn command(url: &str) -> Command {
        #[cfg(target_os = "macos")]
        let command = {
            let mut command = Command::new("open");
            command.arg(url);
            command
        };
        #[cfg(target_os = "windows")]
        let command = {
            let mut command = Command::new("rundll32");
            command.args(["url.dll,FileProtocolHandler", url]);
            command
        };
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let command = {
            let mut command = Command::new("xdg-open");
            command.arg(url);
            command
        };
        command
    }
}

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &str) -> Result<(), NotifyError> {
        let status = Self::command(url)
            .status()
            .map_err(|source| NotifyError::Launch {
                url: url.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(NotifyError::OpenerFailed {
                url: url.to_string(),
                status,
            });
        }
        Ok(())
    }
}

fn display_version(version: &str) -> String {
    if version.starts_with(['v', 'V']) {
        version.to_string()
    } else {
        format!("v{version}")
    }
}

/// Log the outcome and, for an outdated installation, offer the release page.
///
/// The comparison has already completed here, so prompt and opener failures
/// are logged rather than returned.
pub fn present(
    report: &CheckReport,
    sdk_name: &str,
    prompter: &dyn Prompter,
    opener: &dyn LinkOpener,
) -> Presentation {
    let local = display_version(&report.local_version);
    let latest = &report.latest_version;

    match &report.comparison {
        Comparison::Current => {
            info!("Your {} version {} is up to date.", sdk_name, local);
            Presentation::UpToDate
        }
        Comparison::Ahead => {
            info!(
                "Your {} version {} is ahead of the latest release {}. Consider checking if this is a custom or experimental version.",
                sdk_name, local, latest
            );
            Presentation::Ahead
        }
        Comparison::Outdated { download_url } => {
            warn!(
                "Your {} version {} is outdated. Please update to the latest version {}. Link to update: {}",
                sdk_name, local, latest, download_url
            );

            let message = format!(
                "Your {sdk_name} version {local} is outdated. Do you want to download the latest version {latest}?"
            );
            match prompter.confirm("Update Available", &message) {
                Ok(true) => {}
                Ok(false) => return Presentation::UpdateDeclined,
                Err(e) => {
                    warn!("{}; not opening {}", e, download_url);
                    return Presentation::UpdateDeclined;
                }
            }

            match opener.open(download_url) {
                Ok(()) => {
                    info!("Opened {}", download_url);
                    Presentation::UpdateOpened
                }
                Err(e) => {
                    warn!("{}; open {} manually to update", e, download_url);
                    Presentation::OpenFailed
                }
            }
        }
    }
}
