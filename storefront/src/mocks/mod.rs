//! Mock implementations for testing.
//!
//! This module provides mock implementations of the trait abstractions
//! that allow unit and integration testing without a browser wallet.

pub mod notifier;
pub mod random;
pub mod seed;
pub mod time;
pub mod wallet;

pub use crate::traits::MemoryMarker;
pub use notifier::MockNotifier;
pub use random::MockRandom;
pub use seed::MockSeed;
pub use time::MockTime;
pub use wallet::MockWallet;
