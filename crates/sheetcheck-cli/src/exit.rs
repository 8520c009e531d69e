//! Process exit codes.
//!
//! `2` is left to clap for usage errors.

use sheetcheck_config::ConfigError;
use sheetcheck_ingest::IngestError;
use sheetcheck_notify::{NotifyError, RecipientError, TransportError};

pub const SUCCESS: i32 = 0;
pub const VALIDATION_FAILED: i32 = 1;
pub const CONFIG_ERROR: i32 = 3;
pub const INPUT_ERROR: i32 = 4;
pub const TRANSPORT_ERROR: i32 = 5;
/// Failures outside the known categories, such as a broken output stream.
pub const INTERNAL_ERROR: i32 = 6;

/// Exit code for a run that could not produce its outcome.
///
/// The first error in the chain with a known type decides. Anything else
/// is [`INTERNAL_ERROR`], never the validation-failed code.
pub fn exit_code_for_error(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if cause.is::<ConfigError>() || cause.is::<RecipientError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<IngestError>() {
            return INPUT_ERROR;
        }
        if cause.is::<TransportError>() {
            return TRANSPORT_ERROR;
        }
        if let Some(notify) = cause.downcast_ref::<NotifyError>() {
            return match notify {
                NotifyError::Recipients(_) => CONFIG_ERROR,
                NotifyError::Transport(_) => TRANSPORT_ERROR,
            };
        }
    }
    INTERNAL_ERROR
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use anyhow::Context;

    use super::*;

    #[test]
    fn context_does_not_hide_the_cause() {
        let error = Err::<(), _>(IngestError::FileNotFound {
            path: PathBuf::from("missing.xlsx"),
        })
        .context("read missing.xlsx")
        .unwrap_err();
        assert_eq!(exit_code_for_error(&error), INPUT_ERROR);
    }

    #[test]
    fn config_and_recipient_errors() {
        let error = anyhow::Error::new(ConfigError::MissingEmailSection);
        assert_eq!(exit_code_for_error(&error), CONFIG_ERROR);

        let error = anyhow::Error::new(NotifyError::from(RecipientError::NoRecipients))
            .context("notify");
        assert_eq!(exit_code_for_error(&error), CONFIG_ERROR);
    }

    #[test]
    fn unknown_errors_are_not_validation_failures() {
        let error = anyhow::anyhow!("stdout closed");
        assert_eq!(exit_code_for_error(&error), INTERNAL_ERROR);

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = anyhow::Error::new(source).context("render json");
        assert_eq!(exit_code_for_error(&error), INTERNAL_ERROR);
        assert_ne!(exit_code_for_error(&error), VALIDATION_FAILED);
    }
}
