use thiserror::Error;

/// Result type alias for provenance operations
pub type Result<T> = std::result::Result<T, ProvenanceError>;

/// Errors that can occur while building or reconciling address sets
#[derive(Error, Debug)]
pub enum ProvenanceError {
    /// Input stream could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited log stream could not be read
    #[error("log stream error: {0}")]
    Csv(String),

    /// Token is not an IPv4 or IPv6 literal
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// Suffix rule cannot be used for classification
    #[error("invalid suffix rule: {0}")]
    InvalidSuffix(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// External lookup failed
    #[error("lookup failed: {0}")]
    Lookup(String),
}

impl ProvenanceError {
    /// Returns true if the error must terminate the run.
    ///
    /// Malformed tokens and failed lookups are absorbed where they occur;
    /// losing the input stream itself leaves nothing meaningful to report.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Csv(_) | Self::Config(_))
    }
}

impl From<csv::Error> for ProvenanceError {
    fn from(err: csv::Error) -> Self {
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(e) => Self::Io(e),
                other => Self::Csv(format!("{other:?}")),
            }
        } else {
            Self::Csv(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "tv-dns.log");
        assert!(ProvenanceError::from(io).is_fatal());
        assert!(ProvenanceError::Config("bad".into()).is_fatal());
        assert!(!ProvenanceError::InvalidAddress("bogus".into()).is_fatal());
        assert!(!ProvenanceError::Lookup("whois timed out".into()).is_fatal());
    }

    #[test]
    fn test_csv_io_error_keeps_io_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ProvenanceError::from(csv::Error::from(io));
        assert!(matches!(err, ProvenanceError::Io(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied));
    }
}
