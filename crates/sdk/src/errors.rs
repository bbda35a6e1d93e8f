use launchcurve_core::LaunchCurveError;
use solana_program::pubkey::Pubkey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Account not found: {0}")]
    NotFound(Pubkey),

    #[error("Quote engine error: {0}")]
    Core(#[from] LaunchCurveError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for SdkError {
    fn from(err: toml::ser::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SdkError {
    fn from(err: toml::de::Error) -> Self {
        SdkError::Config(err.to_string())
    }
}

pub type SdkResult<T> = Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_conversion() {
        let err: SdkError = LaunchCurveError::CurveExhausted.into();
        assert!(matches!(err, SdkError::Core(LaunchCurveError::CurveExhausted)));
        assert_eq!(
            err.to_string(),
            "Quote engine error: Curve exhausted: not enough liquidity on the configured curve"
        );
    }

    #[test]
    fn test_not_found_message() {
        let key = Pubkey::new_from_array([1; 32]);
        let err = SdkError::NotFound(key);
        assert_eq!(err.to_string(), format!("Account not found: {key}"));
    }
}
