//! Mock seed source for testing.

use crate::catalog::{builtin_products, Product};
use crate::traits::SeedSource;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Seed source that answers immediately with a fixed list or a failure.
#[derive(Debug, Clone)]
pub struct MockSeed {
    products: Result<Vec<Product>, String>,
    fetches: Arc<AtomicUsize>,
}

impl MockSeed {
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Ok(products),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The built-in catalog, without the simulated delay.
    pub fn builtin() -> Self {
        Self::with_products(builtin_products().unwrap_or_default())
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            products: Err(reason.to_string()),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeedSource for MockSeed {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.products.clone().map_err(|reason| anyhow!(reason))
    }
}
