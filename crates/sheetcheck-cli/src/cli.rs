//! Command-line arguments for `sheetcheck`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use sheetcheck_cli::pipeline::{CheckOptions, NotifyMode, SheetSelection};

#[derive(Parser)]
#[command(
    name = "sheetcheck",
    version,
    about = "Validate spreadsheets against column rules and notify data owners",
    long_about = "Validate xlsx, xls, ods, and csv files against the column rules in a YAML \
                  config.\n\nFindings are printed as a table or JSON. With --notify, a summary \
                  email goes to the business units that own the affected columns."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow cell values in log output. Off by default because sheets may
    /// hold personal data.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a spreadsheet and print the findings.
    Check(CheckArgs),

    /// List the sheets of a workbook.
    Sheets {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the rule set loaded from the config.
    Rules {
        /// Config file (default: ./config.yaml when present).
        #[arg(long = "config", value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct CheckArgs {
    /// Spreadsheet to validate (xlsx, xlsm, xlsb, xls, ods, csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Sheet to validate (default: the first sheet).
    #[arg(long = "sheet", value_name = "NAME", conflicts_with = "all_sheets")]
    pub sheet: Option<String>,

    /// Validate every sheet of the workbook.
    #[arg(long = "all-sheets")]
    pub all_sheets: bool,

    /// Config file (default: ./config.yaml when present).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Email the report to the configured recipients.
    #[arg(long = "notify", conflicts_with = "dry_run_notify")]
    pub notify: bool,

    /// Build the notification and log it instead of sending.
    #[arg(long = "dry-run-notify")]
    pub dry_run_notify: bool,

    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Number of findings to list (default: notification.preview_limit).
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,
}

impl CheckArgs {
    pub fn to_options(&self) -> CheckOptions {
        let sheets = match (&self.sheet, self.all_sheets) {
            (_, true) => SheetSelection::All,
            (Some(name), false) => SheetSelection::Named(name.clone()),
            (None, false) => SheetSelection::First,
        };
        let notify = if self.notify {
            NotifyMode::Send
        } else if self.dry_run_notify {
            NotifyMode::DryRun
        } else {
            NotifyMode::Off
        };
        CheckOptions {
            file: self.file.clone(),
            sheets,
            config: self.config.clone(),
            notify,
            preview_limit: self.preview,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_flags_map_to_options() {
        let cli = Cli::parse_from([
            "sheetcheck",
            "check",
            "ledger.xlsx",
            "--sheet",
            "March",
            "--dry-run-notify",
            "--preview",
            "3",
        ]);
        let Command::Check(args) = cli.command else {
            panic!("expected check command");
        };
        let options = args.to_options();
        assert_eq!(options.sheets, SheetSelection::Named("March".to_string()));
        assert_eq!(options.notify, NotifyMode::DryRun);
        assert_eq!(options.preview_limit, Some(3));
    }

    #[test]
    fn sheet_and_all_sheets_conflict() {
        let result = Cli::try_parse_from([
            "sheetcheck",
            "check",
            "ledger.xlsx",
            "--sheet",
            "March",
            "--all-sheets",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sheetcheck", "rules", "--log-data", "--log-format", "json"]);
        assert!(cli.log_data);
        assert!(matches!(cli.log_format, LogFormatArg::Json));
    }
}
