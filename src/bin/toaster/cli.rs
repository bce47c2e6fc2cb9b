use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use humantime::parse_duration;
use toaster::ToastOptions;
use toaster::types::{Position, Theme};

#[derive(Parser, Debug)]
#[command(author, version, about = "Show toast notifications in the terminal", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Explicit log filter (e.g. "toaster=debug").
    #[arg(long, value_name = "FILTER", global = true)]
    pub log_filter: Option<String>,

    /// Emit logs as JSON (requires `--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub json_logs: bool,

    /// Do not probe for the icon-font and utility-CSS assets.
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub skip_assets: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Green check-mark toast.
    Success(SeverityArgs),
    /// Red warning-triangle toast.
    Error(SeverityArgs),
    /// Yellow exclamation toast.
    Warning(SeverityArgs),
    /// Blue information toast.
    Info(SeverityArgs),
    /// Toast built from a JSON options object.
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct SeverityArgs {
    /// Message body; markup is kept unless the message gets truncated.
    pub message: String,

    /// Replace the severity's default title.
    #[arg(long)]
    pub title: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Options object, e.g. '{"title":"Hi","autoCloseDelay":3000}'.
    #[arg(long, value_name = "JSON")]
    pub options: Option<String>,

    #[command(flatten)]
    pub style: StyleArgs,
}

#[derive(Args, Debug, Default)]
pub struct StyleArgs {
    /// Keep the toast until Ctrl-C.
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_auto_close: bool,

    /// Auto-close delay (e.g. "3s").
    #[arg(long, value_parser = parse_duration)]
    pub delay: Option<Duration>,

    /// "light" or "dark"; anything else means light.
    #[arg(long)]
    pub theme: Option<String>,

    /// top-right, top-left, bottom-right or bottom-left.
    #[arg(long)]
    pub position: Option<String>,
}

impl StyleArgs {
    pub fn to_options(&self) -> ToastOptions {
        let mut options = ToastOptions::new();
        if self.no_auto_close {
            options = options.auto_close(false);
        }
        if let Some(delay) = self.delay {
            options = options.auto_close_delay(delay);
        }
        if let Some(theme) = self.theme.as_deref() {
            options = options.theme(Theme::parse_lossy(theme));
        }
        if let Some(position) = self.position.as_deref() {
            options = options.position(Position::parse_lossy(position));
        }
        options
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use std::time::Duration;
    use toaster::types::Theme;

    #[test]
    fn parses_severity_subcommand_with_style() {
        let cli = match Cli::try_parse_from([
            "toaster",
            "--skip-assets",
            "warning",
            "Disk almost full",
            "--title",
            "Storage",
            "--delay",
            "2s",
            "--theme",
            "dark",
        ]) {
            Ok(cli) => cli,
            Err(err) => panic!("arguments should parse: {err}"),
        };
        assert!(cli.skip_assets);
        let Command::Warning(args) = cli.command else {
            panic!("expected warning subcommand");
        };
        assert_eq!(args.title.as_deref(), Some("Storage"));
        let options = args.style.to_options();
        assert_eq!(options.auto_close_delay, Some(Duration::from_secs(2)));
        assert_eq!(options.theme, Some(Theme::Dark));
        assert_eq!(options.auto_close, None);
    }

    #[test]
    fn show_requires_no_message() {
        assert!(Cli::try_parse_from(["toaster", "show", "--no-auto-close"]).is_ok());
        assert!(Cli::try_parse_from(["toaster"]).is_err());
    }
}
