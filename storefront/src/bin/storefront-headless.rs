//! Headless storefront for scripted testing.
//!
//! Runs one storefront per process against a simulated wallet with
//! JSON-over-stdio IPC. Logging goes to stderr; stdout is reserved for the
//! IPC protocol.
//!
//! Usage:
//!   storefront-headless [--account 0x...] [--balance 10]
//!
//! On startup, emits a `Ready` JSON line to stdout once the catalog has
//! loaded. Then reads `Command` JSON lines from stdin and writes `Response`
//! lines.

use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storefront::config::{StorefrontConfig, TARGET_CHAIN_ID};
use storefront::flows::{buy, list_product, view_profile, write_review};
use storefront::{
    BuiltinSeed, CatalogQuery, Category, ListingForm, PriceRange, ReviewForm, SimulatedWallet,
    SortKey, Storefront,
};

const DEFAULT_ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
const DEFAULT_BALANCE: &str = "10";

// ── IPC types ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ReadyEvent {
    event: &'static str,
    products: usize,
    account: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "cmd")]
enum Command {
    Search {
        #[serde(default)]
        query: String,
        #[serde(default)]
        category: Option<Category>,
        #[serde(default)]
        min_price: Option<Decimal>,
        #[serde(default)]
        max_price: Option<Decimal>,
        #[serde(default)]
        sort: SortKey,
    },
    GetProduct {
        id: String,
    },
    Featured,
    Connect,
    Disconnect,
    Purchase {
        id: String,
        #[serde(default = "one")]
        quantity: u32,
    },
    List {
        listing: ListingForm,
    },
    Review {
        id: String,
        rating: u8,
        comment: String,
    },
    Profile,
    Shutdown,
}

const fn one() -> u32 {
    1
}

#[derive(Serialize)]
#[serde(tag = "status")]
enum Response {
    Ok { data: Option<serde_json::Value> },
    Err { message: String },
}

impl Response {
    fn from_result<T: Serialize>(result: storefront::StoreResult<T>) -> Self {
        match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(data) => Self::Ok { data: Some(data) },
                Err(e) => Self::Err {
                    message: format!("Response serialization failed: {e}"),
                },
            },
            Err(e) => Self::Err {
                message: e.to_string(),
            },
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

struct Args {
    account: String,
    balance: Decimal,
}

fn parse_args() -> Result<Args> {
    let mut account = DEFAULT_ACCOUNT.to_string();
    let mut balance = DEFAULT_BALANCE.to_string();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--account" => account = args.next().context("--account needs a value")?,
            "--balance" => balance = args.next().context("--balance needs a value")?,
            other => bail!("Usage: storefront-headless [--account <addr>] [--balance <amount>] (got {other})"),
        }
    }

    let balance = Decimal::from_str(&balance).context("--balance must be a decimal")?;
    Ok(Args { account, balance })
}

fn init_logging_stderr() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .init();
}

fn emit_json(value: &impl Serialize) -> Result<()> {
    let line = serde_json::to_string(value).context("JSON serialization failed")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}").context("stdout write failed")?;
    stdout.flush().context("stdout flush failed")
}

fn search_query(
    storefront: &Storefront,
    query: String,
    category: Option<Category>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    sort: SortKey,
) -> CatalogQuery {
    let mut range = PriceRange::for_catalog(storefront.catalog());
    if let Some(min) = min_price {
        range.min = min;
    }
    if let Some(max) = max_price {
        range.max = max;
    }
    CatalogQuery::default()
        .with_query(query)
        .with_category(category)
        .with_price(range)
        .with_sort(sort)
}

async fn handle(storefront: &Storefront, cmd: Command) -> Response {
    match cmd {
        Command::Search {
            query,
            category,
            min_price,
            max_price,
            sort,
        } => {
            let query = search_query(storefront, query, category, min_price, max_price, sort);
            Response::from_result(Ok(storefront.browse(&query)))
        }

        Command::GetProduct { id } => match storefront.catalog().get_by_id(&id) {
            Some(product) => Response::from_result(Ok(product)),
            None => Response::Err {
                message: format!("Product {id} not found"),
            },
        },

        Command::Featured => Response::from_result(Ok(storefront.featured())),

        Command::Connect => Response::from_result(storefront.session().connect().await),

        Command::Disconnect => {
            storefront.session().disconnect();
            Response::Ok { data: None }
        }

        Command::Purchase { id, quantity } => {
            Response::from_result(buy(storefront, &id, quantity).await)
        }

        Command::List { listing } => Response::from_result(list_product(storefront, &listing)),

        Command::Review {
            id,
            rating,
            comment,
        } => {
            let form = ReviewForm { rating, comment };
            Response::from_result(write_review(storefront, &id, &form))
        }

        Command::Profile => Response::from_result(view_profile(storefront)),

        // Handled by the command loop.
        Command::Shutdown => Response::Ok { data: None },
    }
}

// ── Main ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;
    init_logging_stderr();

    let config = StorefrontConfig::from_env()?;
    info!(
        account = %args.account,
        data_dir = %config.data_dir.display(),
        "storefront-headless starting"
    );

    let wallet = SimulatedWallet::new(args.account, TARGET_CHAIN_ID, args.balance);
    let storefront = Storefront::from_config(&config, Arc::new(wallet));
    storefront.start(&BuiltinSeed::new(config.seed_delay)).await;

    emit_json(&ReadyEvent {
        event: "Ready",
        products: storefront.catalog().len(),
        account: storefront.session().account(),
    })?;
    info!("Ready event emitted");

    // Command loop
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => {
                info!("stdin closed, shutting down");
                break;
            }
            Err(e) => {
                error!("stdin read error: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let cmd: Command = match serde_json::from_str(&line) {
            Ok(c) => c,
            Err(e) => {
                emit_json(&Response::Err {
                    message: format!("Invalid command JSON: {e}"),
                })?;
                continue;
            }
        };

        let shutdown = matches!(cmd, Command::Shutdown);
        emit_json(&handle(&storefront, cmd).await)?;
        if shutdown {
            info!("Shutdown command received");
            break;
        }
    }

    info!("Shutdown complete");
    Ok(())
}
