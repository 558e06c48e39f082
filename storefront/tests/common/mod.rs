pub mod harness;

pub use harness::{StorefrontHarness, BUYER, SELLER};
