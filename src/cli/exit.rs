//! Mapping failures to process exit codes.

use thiserror::Error;

use crate::input::InputError;
use crate::merge::MergeError;
use crate::translation::TranslateError;

/// Marks a failure as a configuration problem.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ConfigError(#[from] pub anyhow::Error);

/// Exit code for `err`, taken from the first typed error in its chain.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<MergeError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<TranslateError>() {
            return e.exit_code();
        }
        if let Some(e) = cause.downcast_ref::<InputError>() {
            return e.exit_code();
        }
        if cause.is::<ConfigError>() {
            return exitcode::CONFIG;
        }
    }
    1
}
