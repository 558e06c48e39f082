//! Profile dashboard for the connected account.
//!
//! Orders are never recorded, so the purchase history tab is filled with
//! plausible entries drawn from the catalog.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogStore, Product};
use crate::config::{PURCHASE_HISTORY_LEN, PURCHASE_HISTORY_MAX_AGE_DAYS, STARTING_LOYALTY_POINTS};
use crate::error::{StoreError, StoreResult};
use crate::format::{format_points, generate_tx_hash, truncate_address};
use crate::shared_state::Storefront;
use crate::traits::{RandomSource, TimeProvider};
use crate::wallet::WalletSession;

/// Delivery state of a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseStatus {
    Delivered,
    Shipped,
    Processing,
}

impl PurchaseStatus {
    pub const ALL: [Self; 3] = [Self::Delivered, Self::Shipped, Self::Processing];
}

/// One row of the purchase history tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: String,
    pub product: Product,
    pub date: DateTime<Utc>,
    pub status: PurchaseStatus,
    pub tx_hash: String,
    pub quantity: u32,
}

/// Everything the profile page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub account: String,
    pub short_address: String,
    /// Balance with four decimals, e.g. `1.5000`.
    pub balance: String,
    pub loyalty_points: String,
    /// Products this account listed, newest first.
    pub listings: Vec<Product>,
    pub purchases: Vec<PurchaseRecord>,
}

impl ProfileView {
    pub fn for_account(
        catalog: &CatalogStore,
        session: &WalletSession,
        time: &dyn TimeProvider,
        random: &dyn RandomSource,
    ) -> StoreResult<Self> {
        let snapshot = session.snapshot().ok_or(StoreError::NotConnected)?;

        Ok(Self {
            short_address: truncate_address(&snapshot.account),
            balance: format_balance(snapshot.balance),
            loyalty_points: format_points(STARTING_LOYALTY_POINTS),
            listings: catalog.listings_by_seller(&snapshot.account),
            purchases: purchase_history(&catalog.products(), time, random),
            account: snapshot.account,
        })
    }
}

/// Profile page action.
pub fn view_profile(storefront: &Storefront) -> StoreResult<ProfileView> {
    ProfileView::for_account(
        storefront.catalog(),
        storefront.session(),
        storefront.time(),
        storefront.random(),
    )
}

/// Generated purchase history over `products`. Empty for an empty catalog.
pub fn purchase_history(
    products: &[Product],
    time: &dyn TimeProvider,
    random: &dyn RandomSource,
) -> Vec<PurchaseRecord> {
    if products.is_empty() {
        return Vec::new();
    }
    let now = time.now();

    (0..PURCHASE_HISTORY_LEN)
        .map(|i| {
            let product = products[random_below(random, products.len() as u64) as usize].clone();
            let days_ago = random_below(random, PURCHASE_HISTORY_MAX_AGE_DAYS) as i64;
            let status =
                PurchaseStatus::ALL[random_below(random, PurchaseStatus::ALL.len() as u64) as usize];
            PurchaseRecord {
                id: format!("purchase-{i}"),
                product,
                date: now - Duration::days(days_ago),
                status,
                tx_hash: generate_tx_hash(random),
                quantity: random_below(random, 3) as u32 + 1,
            }
        })
        .collect()
}

/// Uniform-enough value in `0..bound`; `bound` must be non-zero.
fn random_below(random: &dyn RandomSource, bound: u64) -> u64 {
    let mut bytes = [0u8; 8];
    random.fill_bytes(&mut bytes);
    u64::from_le_bytes(bytes) % bound
}

fn format_balance(balance: Decimal) -> String {
    format!("{:.4}", balance.round_dp(4))
}
