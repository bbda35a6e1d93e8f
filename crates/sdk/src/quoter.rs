//! Quote facade: fetches pool state through an [`AccountSource`] and runs the
//! core engine with the configured defaults.

use launchcurve_core::{MigrationQuote, QuoteResult, SwapMode};
use serde::Serialize;
use solana_program::pubkey::Pubkey;
use tracing::debug;

use crate::config::QuoterConfig;
use crate::errors::SdkResult;
use crate::metrics::{pool_metrics, PoolMetricsReport};
use crate::source::AccountSource;

/// Swap to be quoted; unset options fall back to the quoter config
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRequest {
    pub swap_base_for_quote: bool,
    pub amount_in: u64,
    pub slippage_bps: Option<u64>,
    pub has_referral: Option<bool>,
    pub swap_mode: Option<SwapMode>,
}

impl QuoteRequest {
    /// Spend `amount_in` quote for base
    pub fn buy(amount_in: u64) -> Self {
        Self {
            swap_base_for_quote: false,
            amount_in,
            slippage_bps: None,
            has_referral: None,
            swap_mode: None,
        }
    }

    /// Sell `amount_in` base for quote
    pub fn sell(amount_in: u64) -> Self {
        Self {
            swap_base_for_quote: true,
            ..Self::buy(amount_in)
        }
    }

    pub fn with_slippage(mut self, slippage_bps: u64) -> Self {
        self.slippage_bps = Some(slippage_bps);
        self
    }

    pub fn with_referral(mut self, has_referral: bool) -> Self {
        self.has_referral = Some(has_referral);
        self
    }

    pub fn with_mode(mut self, swap_mode: SwapMode) -> Self {
        self.swap_mode = Some(swap_mode);
        self
    }
}

/// Quote tagged with the pool and point it was computed for
#[derive(Debug, Clone, Serialize)]
pub struct QuoteReport {
    pub pool: String,
    pub swap_base_for_quote: bool,
    pub current_point: u64,
    pub slippage_bps: u64,
    pub result: QuoteResult,
}

impl QuoteReport {
    pub fn to_json(&self) -> SdkResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Quotes swaps against pools served by `S`
pub struct Quoter<S> {
    source: S,
    config: QuoterConfig,
}

impl<S: AccountSource> Quoter<S> {
    pub fn new(source: S, config: QuoterConfig) -> SdkResult<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &QuoterConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Quote a swap on `pool` at the caller's current slot or timestamp
    pub fn quote(
        &self,
        pool: &Pubkey,
        request: &QuoteRequest,
        current_point: u64,
    ) -> SdkResult<QuoteResult> {
        Ok(self.quote_report(pool, request, current_point)?.result)
    }

    /// Same as [`Quoter::quote`], keeping the request context
    pub fn quote_report(
        &self,
        pool: &Pubkey,
        request: &QuoteRequest,
        current_point: u64,
    ) -> SdkResult<QuoteReport> {
        let slippage_bps = self.config.resolve_slippage(request.slippage_bps)?;
        let has_referral = request
            .has_referral
            .unwrap_or(self.config.default_has_referral);
        let swap_mode = request.swap_mode.unwrap_or(self.config.swap_mode);
        let point = self.config.effective_point(current_point)?;

        debug!(
            %pool,
            swap_base_for_quote = request.swap_base_for_quote,
            amount_in = request.amount_in,
            slippage_bps,
            has_referral,
            ?swap_mode,
            point,
            "quote requested"
        );

        let (pool_account, config_account) = self.source.pool_with_config(pool)?;
        let result = launchcurve_core::quote_with_mode(
            &pool_account.pool,
            &config_account.config,
            request.swap_base_for_quote,
            request.amount_in,
            slippage_bps,
            has_referral,
            point,
            swap_mode,
        )?;

        debug!(
            %pool,
            amount_out = result.amount_out,
            minimum_amount_out = result.minimum_amount_out,
            fee = result.fee.total(),
            curve_complete = result.curve_complete,
            "quote computed"
        );

        Ok(QuoteReport {
            pool: pool.to_string(),
            swap_base_for_quote: request.swap_base_for_quote,
            current_point: point,
            slippage_bps,
            result,
        })
    }

    /// Quote needed to complete the curve of `pool`
    pub fn quote_to_migration(&self, pool: &Pubkey, current_point: u64) -> SdkResult<MigrationQuote> {
        let point = self.config.effective_point(current_point)?;
        let (pool_account, config_account) = self.source.pool_with_config(pool)?;
        let quote =
            launchcurve_core::quote_to_migration(&pool_account.pool, &config_account.config, point)?;
        debug!(%pool, amount_in = quote.amount_in, "migration quote computed");
        Ok(quote)
    }

    /// Progress and fee metrics of `pool`
    pub fn metrics(&self, pool: &Pubkey) -> SdkResult<PoolMetricsReport> {
        let (pool_account, config_account) = self.source.pool_with_config(pool)?;
        pool_metrics(&pool_account.pool, &config_account.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SdkError;
    use crate::source::InMemoryAccountSource;
    use crate::test_fixtures::{config_account, init_tracing, pool_account};
    use launchcurve_core::LaunchCurveError;

    fn quoter() -> (Quoter<InMemoryAccountSource>, Pubkey) {
        init_tracing();
        let config = config_account(Pubkey::new_unique());
        let pool = pool_account(Pubkey::new_unique(), config.address);
        let mut source = InMemoryAccountSource::new();
        source.insert_config(config);
        source.insert_pool(pool);
        (Quoter::new(source, QuoterConfig::default()).unwrap(), pool.address)
    }

    #[test]
    fn test_quote_uses_defaults() {
        let (quoter, pool) = quoter();
        let result = quoter.quote(&pool, &QuoteRequest::buy(1_000_000), 1_000).unwrap();

        // Default 1% slippage
        assert_eq!(result.minimum_amount_out, result.amount_out * 9_900 / 10_000);
        assert_eq!(result.fee.referral, 0);
        assert!(result.fee_on_input);
    }

    #[test]
    fn test_quote_matches_core() {
        let (quoter, pool) = quoter();
        let request = QuoteRequest::buy(5_000_000).with_slippage(0).with_referral(true);
        let via_sdk = quoter.quote(&pool, &request, 1_000).unwrap();

        let (pool_account, config_account) = quoter.source().pool_with_config(&pool).unwrap();
        let direct = launchcurve_core::quote(
            &pool_account.pool,
            &config_account.config,
            false,
            5_000_000,
            0,
            true,
            1_000,
        )
        .unwrap();
        assert_eq!(via_sdk, direct);
    }

    #[test]
    fn test_slippage_above_max_rejected() {
        let (quoter, pool) = quoter();
        let request = QuoteRequest::buy(1_000).with_slippage(6_000);
        assert!(matches!(
            quoter.quote(&pool, &request, 1_000),
            Err(SdkError::Config(_))
        ));
    }

    #[test]
    fn test_missing_pool() {
        let (quoter, _) = quoter();
        let missing = Pubkey::new_unique();
        assert!(matches!(
            quoter.quote(&missing, &QuoteRequest::buy(1), 0),
            Err(SdkError::NotFound(key)) if key == missing
        ));
    }

    #[test]
    fn test_core_errors_propagate() {
        let (quoter, pool) = quoter();
        assert!(matches!(
            quoter.quote(&pool, &QuoteRequest::buy(0), 0),
            Err(SdkError::Core(LaunchCurveError::InvalidAmount))
        ));
        // Nothing to sell into at the start price
        assert!(matches!(
            quoter.quote(&pool, &QuoteRequest::sell(1_000), 0),
            Err(SdkError::Core(LaunchCurveError::CurveExhausted))
        ));
    }

    #[test]
    fn test_migration_and_metrics() {
        let (quoter, pool) = quoter();
        let migration = quoter.quote_to_migration(&pool, 1_000).unwrap();
        let fill = quoter
            .quote(
                &pool,
                &QuoteRequest::buy(migration.amount_in).with_mode(SwapMode::PartialFill),
                1_000,
            )
            .unwrap();
        assert!(fill.curve_complete);
        assert_eq!(fill.amount_left, 0);

        let metrics = quoter.metrics(&pool).unwrap();
        assert_eq!(metrics.progress_bps, 0);
        assert_eq!(metrics.quote_remaining, metrics.migration_quote_threshold);
    }

    #[test]
    fn test_report_json() {
        let (quoter, pool) = quoter();
        let report = quoter
            .quote_report(&pool, &QuoteRequest::buy(1_000_000), 1_000)
            .unwrap();
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pool"], pool.to_string());
        assert_eq!(value["slippage_bps"], 100);
        assert_eq!(value["result"]["amount_in"], 1_000_000);
    }
}
