//! Writing a product review.

use serde::{Deserialize, Serialize};
use tracing::error;

use super::listing::{FormField, ValidationErrors};
use crate::catalog::{CatalogStore, Product, Rating, Review};
use crate::error::{StoreError, StoreResult};
use crate::format::truncate_address;
use crate::shared_state::Storefront;
use crate::traits::TimeProvider;

/// Review form state. A fresh form starts at five stars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewForm {
    pub rating: u8,
    pub comment: String,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            rating: Rating::MAX,
            comment: String::new(),
        }
    }
}

impl ReviewForm {
    pub fn validate(&self) -> Result<(Rating, String), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let rating = Rating::new(self.rating);
        if rating.is_none() {
            errors.insert(FormField::Rating, "Rating must be between 1 and 5");
        }
        let comment = self.comment.trim();
        if comment.is_empty() {
            errors.insert(FormField::Comment, "Please enter a comment");
        }

        match rating {
            Some(rating) if errors.is_empty() => Ok((rating, comment.to_string())),
            _ => Err(errors),
        }
    }
}

/// Build a review authored by `account` and append it to the product.
pub fn submit(
    catalog: &CatalogStore,
    time: &dyn TimeProvider,
    product_id: &str,
    account: &str,
    form: &ReviewForm,
) -> StoreResult<Product> {
    let (rating, comment) = form.validate().map_err(StoreError::Validation)?;
    let review = Review {
        id: time.now_millis().to_string(),
        user: account.to_string(),
        username: truncate_address(account),
        rating,
        comment,
        date: time.now(),
    };
    catalog.add_review(product_id, review)
}

/// Product-page review action: requires a connected wallet, one notice.
pub fn write_review(
    storefront: &Storefront,
    product_id: &str,
    form: &ReviewForm,
) -> StoreResult<Product> {
    let notifier = storefront.notifier();
    let Some(account) = storefront.session().account() else {
        notifier.warning("Please connect your wallet first");
        return Err(StoreError::NotConnected);
    };

    match submit(
        storefront.catalog(),
        storefront.time(),
        product_id,
        &account,
        form,
    ) {
        Ok(product) => {
            notifier.success("Review submitted successfully!");
            Ok(product)
        }
        Err(StoreError::Validation(errors)) => {
            let message = errors
                .get(FormField::Comment)
                .or_else(|| errors.get(FormField::Rating))
                .unwrap_or("Please fix the review form")
                .to_string();
            notifier.warning(&message);
            Err(StoreError::Validation(errors))
        }
        Err(e) => {
            error!("Review submission error: {e}");
            notifier.error("Failed to submit review");
            Err(e)
        }
    }
}
