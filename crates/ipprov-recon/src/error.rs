use thiserror::Error;

/// Result type alias for lookup operations
pub type ReconResult<T> = std::result::Result<T, ReconError>;

/// Errors from external lookup tools
#[derive(Error, Debug)]
pub enum ReconError {
    /// Lookup program could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that was invoked
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Lookup program exited unsuccessfully
    #[error("{program} exited with status {code:?}")]
    ExitStatus {
        /// Program that was invoked
        program: String,
        /// Exit code, if the process was not killed by a signal
        code: Option<i32>,
    },

    /// Lookup program did not finish in time
    #[error("{program} timed out after {timeout:?}")]
    Timeout {
        /// Program that was invoked
        program: String,
        /// Configured timeout
        timeout: std::time::Duration,
    },

    /// Lookup program produced no output
    #[error("{0} returned an empty response")]
    EmptyResponse(String),
}

impl From<ReconError> for ipprov_core::ProvenanceError {
    fn from(err: ReconError) -> Self {
        Self::Lookup(err.to_string())
    }
}
