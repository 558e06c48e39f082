pub mod catalog;
pub mod config;
pub mod error;
pub mod flows;
pub mod format;
pub mod pipeline;
pub mod shared_state;
pub mod traits;
pub mod wallet;

#[cfg(any(test, feature = "test-support"))]
pub mod mocks;

pub use catalog::{BuiltinSeed, CatalogStore, Category, NewProduct, Product, Rating, Review, Seller};
pub use config::StorefrontConfig;
pub use error::{ProviderError, StoreError, StoreResult};
pub use flows::{ListingForm, PurchaseQuote, PurchaseReceipt, ReviewForm, ValidationErrors};
pub use pipeline::{CatalogQuery, PriceRange, SortKey};
pub use shared_state::Storefront;
pub use traits::{ConnectionMarker, Notifier, RandomSource, SeedSource, TimeProvider, WalletProvider};
pub use wallet::{SessionEvent, SessionSnapshot, SessionStatus, SimulatedWallet, WalletSession};
