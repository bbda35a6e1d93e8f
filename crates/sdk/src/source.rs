//! Account snapshots keyed by address and the seam they are fetched through.

use std::collections::HashMap;

use launchcurve_core::{PoolConfig, VirtualPool};
use solana_program::pubkey::Pubkey;
use tracing::warn;

use crate::errors::{SdkError, SdkResult};

/// Pool config account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfigAccount {
    pub address: Pubkey,
    pub quote_mint: Pubkey,
    /// Partner receiving the non-creator share of trading fees
    pub fee_claimer: Pubkey,
    pub config: PoolConfig,
}

/// Virtual pool account
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualPoolAccount {
    pub address: Pubkey,
    /// Address of the pool config this pool trades under
    pub config: Pubkey,
    pub base_mint: Pubkey,
    pub creator: Pubkey,
    pub pool: VirtualPool,
}

/// Read access to pool accounts
pub trait AccountSource {
    fn pool_config(&self, address: &Pubkey) -> SdkResult<PoolConfigAccount>;

    fn virtual_pool(&self, address: &Pubkey) -> SdkResult<VirtualPoolAccount>;

    /// Pool together with the config it points at
    fn pool_with_config(
        &self,
        address: &Pubkey,
    ) -> SdkResult<(VirtualPoolAccount, PoolConfigAccount)> {
        let pool = self.virtual_pool(address)?;
        let config = self.pool_config(&pool.config)?;
        Ok((pool, config))
    }
}

/// Accounts held in memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountSource {
    configs: HashMap<Pubkey, PoolConfigAccount>,
    pools: HashMap<Pubkey, VirtualPoolAccount>,
}

impl InMemoryAccountSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a config account
    pub fn insert_config(&mut self, account: PoolConfigAccount) {
        self.configs.insert(account.address, account);
    }

    /// Insert or replace a pool account
    pub fn insert_pool(&mut self, account: VirtualPoolAccount) {
        self.pools.insert(account.address, account);
    }

    pub fn remove_pool(&mut self, address: &Pubkey) -> Option<VirtualPoolAccount> {
        self.pools.remove(address)
    }

    pub fn pool_addresses(&self) -> impl Iterator<Item = &Pubkey> {
        self.pools.keys()
    }
}

impl AccountSource for InMemoryAccountSource {
    fn pool_config(&self, address: &Pubkey) -> SdkResult<PoolConfigAccount> {
        self.configs.get(address).cloned().ok_or_else(|| {
            warn!(%address, "pool config not found");
            SdkError::NotFound(*address)
        })
    }

    fn virtual_pool(&self, address: &Pubkey) -> SdkResult<VirtualPoolAccount> {
        self.pools.get(address).copied().ok_or_else(|| {
            warn!(%address, "virtual pool not found");
            SdkError::NotFound(*address)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{config_account, pool_account};

    #[test]
    fn test_lookup() {
        let config = config_account(Pubkey::new_unique());
        let pool = pool_account(Pubkey::new_unique(), config.address);

        let mut source = InMemoryAccountSource::new();
        source.insert_config(config.clone());
        source.insert_pool(pool);

        let (found_pool, found_config) = source.pool_with_config(&pool.address).unwrap();
        assert_eq!(found_pool, pool);
        assert_eq!(found_config, config);
        assert_eq!(source.pool_addresses().count(), 1);
    }

    #[test]
    fn test_missing_accounts() {
        let mut source = InMemoryAccountSource::new();
        let missing = Pubkey::new_unique();
        assert!(matches!(source.virtual_pool(&missing), Err(SdkError::NotFound(key)) if key == missing));

        // Pool present, its config absent
        let dangling_config = Pubkey::new_unique();
        let pool = pool_account(Pubkey::new_unique(), dangling_config);
        source.insert_pool(pool);
        assert!(matches!(
            source.pool_with_config(&pool.address),
            Err(SdkError::NotFound(key)) if key == dangling_config
        ));

        assert_eq!(source.remove_pool(&pool.address), Some(pool));
        assert!(source.virtual_pool(&pool.address).is_err());
    }
}
