//! Everything `metaballs` can fail with, and the exit code each maps to.
//!
//! Clap's own argument errors exit with 2 before any of this runs.

use std::path::PathBuf;

use metaballs_core::MetaballError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// The scene could not be built or a frame could not be classified.
    #[error(transparent)]
    Simulation(MetaballError),

    /// Writing the PNG or SVG failed.
    #[error("{0}")]
    Io(String),

    #[error("invalid --params JSON: {0}")]
    Params(#[source] serde_json::Error),

    #[error("invalid --pointer '{0}': expected \"x,y\"")]
    Pointer(String),

    #[error("unsupported output extension for {} (expected .png or .svg)", .0.display())]
    OutputFormat(PathBuf),

    /// Printing the `--json` report failed.
    #[error("failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Simulation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Params(_) | CliError::Pointer(_) | CliError::OutputFormat(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

/// Snapshot write failures surface from core as `MetaballError::Io`; they get
/// their own exit code rather than the simulation one.
impl From<MetaballError> for CliError {
    fn from(e: MetaballError) -> Self {
        match e {
            MetaballError::Io(msg) => CliError::Io(msg),
            other => CliError::Simulation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steering_error_keeps_core_message() {
        let err = CliError::from(MetaballError::SteeringOutOfRange { index: 9, len: 8 });
        assert_eq!(err.exit_code(), 10);
        assert_eq!(
            err.to_string(),
            MetaballError::SteeringOutOfRange { index: 9, len: 8 }.to_string()
        );
    }

    #[test]
    fn every_input_variant_shares_exit_code_12() {
        let params = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let inputs = [
            CliError::Params(params),
            CliError::Pointer("nope".into()),
            CliError::OutputFormat(PathBuf::from("frame.bmp")),
        ];
        for err in &inputs {
            assert_eq!(err.exit_code(), 12, "{err}");
        }
    }

    #[test]
    fn output_format_message_names_the_path() {
        let err = CliError::OutputFormat(PathBuf::from("out/frame.bmp"));
        assert!(err.to_string().contains("out/frame.bmp"));
    }
}
