use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use sdk_update_check::app::{Action, App};
use sdk_update_check::config::{CheckConfig, log_path};
use sdk_update_check::logging;
use sdk_update_check::notify::{AutoPrompter, Prompter, SystemLinkOpener, TerminalPrompter};

#[derive(Parser)]
#[command(name = "sdk-update-check")]
#[command(version, about = "Check the installed SDK version against its latest release")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    options: Options,
}

#[derive(Subcommand)]
enum Command {
    /// Compare the installed version with the latest release (default)
    Check,
    /// Print the installed version
    Local,
    /// Print the latest released version
    Latest,
}

#[derive(Args)]
struct Options {
    /// Project root the manifest directory is relative to
    #[arg(long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// JSON config file (default: <project-dir>/.sdk-update-check.json if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the version marker file (relative to the current directory)
    #[arg(long, global = true)]
    manifest_dir: Option<PathBuf>,

    /// JSON version record to read instead of the marker file (relative to the current directory)
    #[arg(long, global = true)]
    sidecar: Option<PathBuf>,

    /// Base URL of the GitHub API
    #[arg(long, global = true)]
    release_api_url: Option<String>,

    /// Open the release page without asking
    #[arg(long, global = true, conflicts_with = "no_open")]
    yes: bool,

    /// Never open the release page
    #[arg(long, global = true)]
    no_open: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also write JSON logs to a file (default: data directory)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<Option<PathBuf>>,
}

impl Options {
    fn resolve_config(&self) -> anyhow::Result<CheckConfig> {
        let config = CheckConfig::load(&self.project_dir, self.config.as_deref())?;
        let manifest_dir = self.manifest_dir.as_deref().map(std::path::absolute).transpose()?;
        let sidecar = self.sidecar.as_deref().map(std::path::absolute).transpose()?;
        Ok(config.with_overrides(manifest_dir, sidecar, self.release_api_url.clone()))
    }

    fn prompter(&self) -> Box<dyn Prompter> {
        if self.yes {
            Box::new(AutoPrompter(true))
        } else if self.no_open {
            Box::new(AutoPrompter(false))
        } else {
            Box::new(TerminalPrompter)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let options = cli.options;

    let log_file = options
        .log_file
        .clone()
        .map(|path| path.unwrap_or_else(log_path));
    let _guard = logging::init(options.verbose, log_file.as_deref())?;

    let config = options.resolve_config()?;
    let action = match cli.command.unwrap_or(Command::Check) {
        Command::Check => Action::Check,
        Command::Local => Action::Local,
        Command::Latest => Action::Latest,
    };

    let app = App::new(
        config,
        options.project_dir.clone(),
        options.prompter(),
        Box::new(SystemLinkOpener),
    );

    let succeeded = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(app.run(action, &mut std::io::stdout()));

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
