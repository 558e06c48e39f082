//! Configuration constants for the storefront.
//!
//! Fixed business rules live here as constants; the handful of values that
//! operators may want to tune are gathered in [`StorefrontConfig`], which
//! reads overrides from the environment.

use std::path::PathBuf;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Escrow fee charged on top of every purchase subtotal (2.5%).
pub const ESCROW_FEE_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 3);

/// Fractional digits kept when a purchase total is sent to the wallet.
pub const AMOUNT_DECIMAL_PLACES: u32 = 6;

/// Upper price bound is this multiple of the most expensive product.
pub const PRICE_CEILING_FACTOR: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Display name given to sellers that list through the storefront.
pub const DEFAULT_SELLER_NAME: &str = "Anonymous";

/// Simulated latency of the built-in seed source.
pub const DEFAULT_SEED_DELAY_MS: u64 = 1000;

/// Upper bound for a single wallet provider round-trip.
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;

/// Loyalty balance shown on every profile until rewards are tracked.
pub const STARTING_LOYALTY_POINTS: u64 = 2500;

/// Products shown on the home page, taken from the front of the catalog.
pub const FEATURED_PRODUCT_COUNT: usize = 4;

/// Entries in the generated purchase history on the profile page.
pub const PURCHASE_HISTORY_LEN: usize = 3;

/// Generated purchases are dated at most this many days back.
pub const PURCHASE_HISTORY_MAX_AGE_DAYS: u64 = 30;

/// Binance Smart Chain testnet.
pub const TARGET_CHAIN_ID: u64 = 97;

/// Marker file name written after a successful wallet connection.
pub const CONNECTION_MARKER_FILE: &str = "cached-provider";

/// Environment variable overriding the seed delay (milliseconds).
pub const SEED_DELAY_ENV: &str = "STOREFRONT_SEED_DELAY_MS";

/// Environment variable overriding the provider timeout (seconds).
pub const PROVIDER_TIMEOUT_ENV: &str = "STOREFRONT_PROVIDER_TIMEOUT_SECS";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "STOREFRONT_DATA_DIR";

/// Native currency of a wallet network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Parameters needed to register a network with a wallet that lacks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkParams {
    pub chain_id: u64,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl NetworkParams {
    pub fn bsc_testnet() -> Self {
        Self {
            chain_id: TARGET_CHAIN_ID,
            chain_name: "Binance Smart Chain Testnet".to_string(),
            native_currency: NativeCurrency {
                name: "BNB".to_string(),
                symbol: "BNB".to_string(),
                decimals: 18,
            },
            rpc_urls: vec!["https://data-seed-prebsc-1-s1.binance.org:8545/".to_string()],
            block_explorer_urls: vec!["https://testnet.bscscan.com/".to_string()],
        }
    }

    /// Chain id in the `0x`-prefixed hex form wallets expect.
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }
}

/// Runtime configuration for a storefront instance.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Network the wallet session insists on.
    pub network: NetworkParams,
    /// Simulated latency of the seed load.
    pub seed_delay: Duration,
    /// Upper bound for each wallet provider round-trip.
    pub provider_timeout: Duration,
    /// Directory holding the connection marker.
    pub data_dir: PathBuf,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            network: NetworkParams::bsc_testnet(),
            seed_delay: Duration::from_millis(DEFAULT_SEED_DELAY_MS),
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
            data_dir: default_data_dir(),
        }
    }
}

impl StorefrontConfig {
    /// Build a configuration from defaults plus environment overrides.
    pub fn from_env() -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(ms) = parse_env_u64(SEED_DELAY_ENV)? {
            config.seed_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_env_u64(PROVIDER_TIMEOUT_ENV)? {
            if secs == 0 {
                return Err(StoreError::Config(format!(
                    "{PROVIDER_TIMEOUT_ENV} must be greater than zero"
                )));
            }
            config.provider_timeout = Duration::from_secs(secs);
        }
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Path of the auto-reconnect marker file.
    pub fn marker_path(&self) -> PathBuf {
        self.data_dir.join(CONNECTION_MARKER_FILE)
    }
}

fn parse_env_u64(name: &str) -> StoreResult<Option<u64>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| StoreError::Config(format!("{name}={raw:?} is not a number: {e}"))),
        Err(_) => Ok(None),
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("storefront")
}
