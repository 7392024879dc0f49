use thiserror::Error;

/// Errors surfaced at the classification boundary.
///
/// All conditions are detected before any distance computation begins;
/// nothing is recovered or retried internally.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Two lengths that must agree do not: the label vector does not match
    /// the training matrix's sample count, or a query vector's feature
    /// count differs from the training matrix's feature count.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected length.
        expected: usize,
        /// Length actually found.
        found: usize,
    },

    /// Fewer training samples than requested neighbours.
    #[error("insufficient data: k = {k} but only {n_samples} training samples")]
    InsufficientData {
        /// Requested neighbour count.
        k: usize,
        /// Number of training samples available.
        n_samples: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DimensionMismatch {
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "dimension mismatch: expected 4, found 3");

        let err = Error::InsufficientData { k: 5, n_samples: 3 };
        assert_eq!(
            err.to_string(),
            "insufficient data: k = 5 but only 3 training samples"
        );

        let err = Error::InvalidParameter {
            name: "p",
            message: "must be positive",
        };
        assert_eq!(err.to_string(), "invalid parameter p: must be positive");
    }
}
