use std::fs;
use std::path::Path;

use launchcurve_core::constants::BASIS_POINT_MAX;
use launchcurve_core::{LaunchCurveError, SwapMode};
use serde::{Deserialize, Serialize};

use crate::errors::{SdkError, SdkResult};

/// Quoter configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuoterConfig {
    /// Slippage applied when a request does not name one (basis points)
    pub default_slippage_bps: u64,

    /// Largest slippage a request may ask for (basis points)
    pub max_slippage_bps: u64,

    /// Whether quotes assume a referral account by default
    #[serde(default)]
    pub default_has_referral: bool,

    /// Swap mode used when a request does not name one
    #[serde(default)]
    pub swap_mode: SwapMode,

    /// Added to the caller's current slot or timestamp before quoting
    #[serde(default)]
    pub clock_offset: u64,
}

impl QuoterConfig {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> SdkResult<Self> {
        let config: QuoterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> SdkResult<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SdkResult<()> {
        if self.max_slippage_bps > BASIS_POINT_MAX {
            return Err(SdkError::Config(format!(
                "max_slippage_bps {} above {}",
                self.max_slippage_bps, BASIS_POINT_MAX
            )));
        }
        if self.default_slippage_bps > self.max_slippage_bps {
            return Err(SdkError::Config(format!(
                "default_slippage_bps {} above max_slippage_bps {}",
                self.default_slippage_bps, self.max_slippage_bps
            )));
        }
        Ok(())
    }

    /// Slippage for a request, falling back to the default
    pub fn resolve_slippage(&self, requested: Option<u64>) -> SdkResult<u64> {
        let slippage_bps = requested.unwrap_or(self.default_slippage_bps);
        if slippage_bps > self.max_slippage_bps {
            return Err(SdkError::Config(format!(
                "requested slippage {} bps above configured max {} bps",
                slippage_bps, self.max_slippage_bps
            )));
        }
        Ok(slippage_bps)
    }

    /// Caller's point shifted by the configured clock offset
    pub fn effective_point(&self, current_point: u64) -> SdkResult<u64> {
        current_point
            .checked_add(self.clock_offset)
            .ok_or(SdkError::Core(LaunchCurveError::MathOverflow))
    }
}

impl Default for QuoterConfig {
    fn default() -> Self {
        Self {
            default_slippage_bps: 100, // 1%
            max_slippage_bps: 5_000,
            default_has_referral: false,
            swap_mode: SwapMode::ExactIn,
            clock_offset: 0,
        }
    }
}
