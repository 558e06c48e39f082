//! Trait abstractions for dependency injection and testability.
//!
//! Every collaborator the storefront does not own (the wallet bridge, the
//! seed source, the clock, the user-facing notification sink) sits behind a
//! trait here so the flows can be exercised without a browser wallet.

pub mod marker;
pub mod notifier;
pub mod random;
pub mod seed;
pub mod time;
pub mod wallet;

pub use marker::{ConnectionMarker, FileMarker, MemoryMarker};
pub use notifier::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use random::{RandomSource, ThreadRng};
pub use seed::SeedSource;
pub use time::{SystemTimeProvider, TimeProvider};
pub use wallet::{ProviderEvent, ProviderHandshake, TxHandle, TxRequest, WalletProvider};
