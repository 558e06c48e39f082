//! Buying a product through the connected wallet.
//!
//! The storefront has no escrow contract: the whole amount (subtotal plus
//! escrow fee) goes straight to the seller. Stock is not decremented and no
//! order record is kept.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::catalog::Product;
use crate::config::AMOUNT_DECIMAL_PLACES;
use crate::error::{StoreError, StoreResult};
use crate::format::escrow_fee;
use crate::shared_state::Storefront;
use crate::traits::TxHandle;
use crate::wallet::WalletSession;

/// Price breakdown shown before a purchase is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseQuote {
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
    pub fee: Decimal,
    /// Subtotal plus fee, rounded to six decimal places.
    pub total: Decimal,
}

impl PurchaseQuote {
    /// Price a purchase. Amounts too large for a `Decimal` are refused.
    pub fn new(unit_price: Decimal, quantity: u32) -> StoreResult<Self> {
        let overflow = || {
            StoreError::InvalidState(format!(
                "purchase of {quantity} x {unit_price} is too large to price"
            ))
        };
        let subtotal = unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(overflow)?;
        let fee = escrow_fee(subtotal).ok_or_else(overflow)?;
        let total = subtotal.checked_add(fee).ok_or_else(overflow)?;
        Ok(Self {
            unit_price,
            quantity,
            subtotal,
            fee,
            total: total.round_dp(AMOUNT_DECIMAL_PLACES),
        })
    }
}

/// Outcome of a successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub product_id: String,
    pub quote: PurchaseQuote,
    pub tx: TxHandle,
}

/// Pay the seller of `product` for `quantity` units.
///
/// Nothing is sent when the session is absent or the quantity falls outside
/// `1..=stock`.
pub async fn purchase(
    session: &WalletSession,
    product: &Product,
    quantity: u32,
) -> StoreResult<PurchaseReceipt> {
    if !session.is_connected() {
        return Err(StoreError::NotConnected);
    }
    if quantity == 0 || quantity > product.stock {
        return Err(StoreError::InvalidState(format!(
            "quantity {quantity} outside 1..={} for product {}",
            product.stock, product.id
        )));
    }

    let quote = PurchaseQuote::new(product.price, quantity)?;
    info!(
        product = %product.id,
        quantity,
        total = %quote.total,
        seller = %product.seller.address,
        "Sending purchase"
    );
    let tx = session.send_value(&product.seller.address, quote.total).await?;

    Ok(PurchaseReceipt {
        product_id: product.id.clone(),
        quote,
        tx,
    })
}

/// Product-page buy action: looks the product up, pays, reports one notice.
pub async fn buy(
    storefront: &Storefront,
    product_id: &str,
    quantity: u32,
) -> StoreResult<PurchaseReceipt> {
    let notifier = storefront.notifier();
    let Some(product) = storefront.catalog().get_by_id(product_id) else {
        notifier.error("Product not found");
        return Err(StoreError::NotFound(format!("product {product_id}")));
    };

    match purchase(storefront.session(), &product, quantity).await {
        Ok(receipt) => {
            notifier.success("Purchase successful! Transaction sent to escrow contract.");
            Ok(receipt)
        }
        Err(StoreError::NotConnected) => {
            notifier.warning("Please connect your wallet first");
            Err(StoreError::NotConnected)
        }
        Err(StoreError::Provider(e)) => {
            warn!("Purchase of {product_id} not completed: {e}");
            notifier.error("Transaction failed or was rejected");
            Err(StoreError::Provider(e))
        }
        Err(e) => {
            error!("Purchase error: {e}");
            notifier.error("Failed to process purchase");
            Err(e)
        }
    }
}
