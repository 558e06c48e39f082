//! Shared storefront context.
//!
//! `Storefront` bundles everything the presentation layer (or the headless
//! binary) needs: the catalog, the wallet session, the notice sink, the
//! clock and the entropy source. Clones are cheap and share state.

use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::{CatalogStore, Product};
use crate::config::{StorefrontConfig, FEATURED_PRODUCT_COUNT};
use crate::pipeline::CatalogQuery;
use crate::traits::{
    ConnectionMarker, FileMarker, Notifier, RandomSource, SeedSource, SystemTimeProvider,
    ThreadRng, TimeProvider, TracingNotifier, WalletProvider,
};
use crate::wallet::WalletSession;

#[derive(Clone)]
pub struct Storefront {
    catalog: CatalogStore,
    session: WalletSession,
    notifier: Arc<dyn Notifier>,
    time: Arc<dyn TimeProvider>,
    random: Arc<dyn RandomSource>,
}

impl Storefront {
    pub fn new(
        catalog: CatalogStore,
        session: WalletSession,
        notifier: Arc<dyn Notifier>,
        time: Arc<dyn TimeProvider>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            catalog,
            session,
            notifier,
            time,
            random,
        }
    }

    /// Production wiring: system clock, log-backed notices and a marker
    /// file under the configured data directory.
    pub fn from_config(config: &StorefrontConfig, provider: Arc<dyn WalletProvider>) -> Self {
        let time: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider::new());
        let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
        let marker: Arc<dyn ConnectionMarker> = Arc::new(FileMarker::new(config.marker_path()));

        let catalog = CatalogStore::with_time(time.clone());
        let session = WalletSession::new(provider, marker, notifier.clone(), config);
        Self::new(catalog, session, notifier, time, Arc::new(ThreadRng::new()))
    }

    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub const fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn time(&self) -> &dyn TimeProvider {
        self.time.as_ref()
    }

    pub fn random(&self) -> &dyn RandomSource {
        self.random.as_ref()
    }

    /// Startup: load the seed and, if a previous session exists, reconnect.
    ///
    /// Neither step is fatal. Seed failures are logged by the catalog and a
    /// failed reconnect has already been reported through the notifier.
    pub async fn start(&self, seed: &dyn SeedSource) {
        let (_, reconnect) = tokio::join!(
            self.catalog.initialize(seed),
            self.session.connect_on_load()
        );
        match reconnect {
            Ok(Some(session)) => info!(account = %session.account, "Restored wallet session"),
            Ok(None) => {}
            Err(e) => warn!("Auto-reconnect failed: {e}"),
        }
    }

    /// Home-page selection: the newest few products in catalog order.
    pub fn featured(&self) -> Vec<Product> {
        let mut products = self.catalog.products();
        products.truncate(FEATURED_PRODUCT_COUNT);
        products
    }

    /// Run the filter/sort pipeline over the current catalog.
    pub fn browse(&self, query: &CatalogQuery) -> Vec<Product> {
        query.apply(&self.catalog)
    }
}
