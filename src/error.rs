use thiserror::Error;

pub type Result<T> = std::result::Result<T, RNNError>;

#[derive(Error, Debug)]
pub enum RNNError {
    /// A vector or matrix does not have the shape the network was built with.
    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Something a step needs was never supplied.
    #[error("{what} was never set")]
    UninitializedState { what: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl RNNError {
    pub(crate) fn mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        RNNError::DimensionMismatch {
            what,
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_part() {
        let e = RNNError::mismatch("input vector", 3, 2);
        assert_eq!(
            e.to_string(),
            "dimension mismatch in input vector: expected 3, got 2"
        );
        let e = RNNError::UninitializedState { what: "W_hy" };
        assert_eq!(e.to_string(), "W_hy was never set");
    }

    #[test]
    fn json_errors_convert() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("{");
        let e: RNNError = parse.unwrap_err().into();
        assert!(matches!(e, RNNError::Config(_)));
    }
}
