//! User-facing flows built on the catalog and the wallet session.
//!
//! Each flow has a core function that takes its collaborators explicitly
//! and a storefront-level action that adds the single user notice.

pub mod listing;
pub mod profile;
pub mod purchase;
pub mod review;

pub use listing::{list_product, FormField, ListingForm, ValidListing, ValidationErrors};
pub use profile::{view_profile, ProfileView, PurchaseRecord, PurchaseStatus};
pub use purchase::{buy, purchase, PurchaseQuote, PurchaseReceipt};
pub use review::{write_review, ReviewForm};
