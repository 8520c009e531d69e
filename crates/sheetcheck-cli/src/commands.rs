use std::path::Path;

use anyhow::{Context, Result};
use tracing::info_span;

use sheetcheck_cli::exit::{self, exit_code_for_error};
use sheetcheck_cli::pipeline::{load_app_config, run_check};
use sheetcheck_cli::summary::{check_json, print_check, print_rules};
use sheetcheck_ingest::Workbook;
use sheetcheck_model::RuleSet;

use crate::cli::{CheckArgs, OutputFormatArg};

pub fn run_check_command(args: &CheckArgs) -> i32 {
    let result = match run_check(&args.to_options()) {
        Ok(result) => result,
        Err(error) => return report_error(&error),
    };
    match args.format {
        OutputFormatArg::Table => print_check(&result),
        OutputFormatArg::Json => match check_json(&result) {
            Ok(json) => println!("{json}"),
            Err(error) => return report_error(&error),
        },
    }
    result.exit_code()
}

pub fn run_sheets(file: &Path) -> i32 {
    let span = info_span!("sheets", file = %file.display());
    let _guard = span.enter();
    match Workbook::open(file).with_context(|| format!("open {}", file.display())) {
        Ok(workbook) => {
            for name in workbook.sheet_names() {
                println!("{name}");
            }
            exit::SUCCESS
        }
        Err(error) => report_error(&error),
    }
}

pub fn run_rules(config: Option<&Path>) -> i32 {
    match load_rules(config) {
        Ok(rules) => {
            print_rules(&rules);
            exit::SUCCESS
        }
        Err(error) => report_error(&error),
    }
}

fn load_rules(config: Option<&Path>) -> Result<RuleSet> {
    let config = load_app_config(config)?;
    config.rules().context("build rule set")
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    exit_code_for_error(error)
}
