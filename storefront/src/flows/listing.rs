//! Listing a new product for sale.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::catalog::{CatalogStore, Category, NewProduct, Product};
use crate::error::{StoreError, StoreResult};
use crate::shared_state::Storefront;

/// Fields of the storefront's user-editable forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Description,
    Price,
    Category,
    Stock,
    Image,
    Rating,
    Comment,
}

impl FormField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Category => "category",
            Self::Stock => "stock",
            Self::Image => "image",
            Self::Rating => "rating",
            Self::Comment => "comment",
        }
    }
}

/// Field-keyed validation messages. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<FormField, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }

    /// `Ok(value)` when no error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.as_str())?;
            first = false;
        }
        Ok(())
    }
}

/// Raw sell-form input, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub stock: String,
    pub image: Option<String>,
}

impl Default for ListingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: String::new(),
            stock: "1".to_string(),
            image: None,
        }
    }
}

/// A listing form that passed every check, with normalized values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidListing {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub stock: u32,
    pub image: String,
}

impl ValidListing {
    pub fn into_new_product(self, seller_address: impl Into<String>) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            image: self.image,
            seller_address: seller_address.into(),
        }
    }
}

impl ListingForm {
    /// Run every check and collect all failures; never stops at the first.
    pub fn validate(&self) -> Result<ValidListing, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(FormField::Name, "Product name is required");
        }

        let description = self.description.trim();
        if description.is_empty() {
            errors.insert(FormField::Description, "Description is required");
        }

        let price = Decimal::from_str(self.price.trim())
            .ok()
            .filter(|p| *p > Decimal::ZERO);
        if price.is_none() {
            errors.insert(FormField::Price, "Price must be greater than 0");
        }

        let category = self.category.trim();
        let parsed_category = if category.is_empty() {
            errors.insert(FormField::Category, "Category is required");
            None
        } else {
            match category.parse::<Category>() {
                Ok(c) => Some(c),
                Err(e) => {
                    errors.insert(FormField::Category, e.to_string());
                    None
                }
            }
        };

        let stock = self.stock.trim().parse::<u32>().ok().filter(|s| *s >= 1);
        if stock.is_none() {
            errors.insert(FormField::Stock, "Stock must be at least 1");
        }

        let image = self
            .image
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty());
        if image.is_none() {
            errors.insert(FormField::Image, "Product image is required");
        }

        match (price, parsed_category, stock, image) {
            (Some(price), Some(category), Some(stock), Some(image)) if errors.is_empty() => {
                Ok(ValidListing {
                    name: name.to_string(),
                    description: description.to_string(),
                    price,
                    category,
                    stock,
                    image: image.to_string(),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Validate `form` and, if it passes, list it under `seller_address`.
///
/// A failing form leaves the catalog untouched.
pub fn submit(
    catalog: &CatalogStore,
    form: &ListingForm,
    seller_address: &str,
) -> StoreResult<Product> {
    let listing = form.validate().map_err(StoreError::Validation)?;
    catalog.add(listing.into_new_product(seller_address))
}

/// Sell-page action: requires a connected wallet and reports one notice.
pub fn list_product(storefront: &Storefront, form: &ListingForm) -> StoreResult<Product> {
    let notifier = storefront.notifier();
    let Some(account) = storefront.session().account() else {
        notifier.warning("Please connect your wallet first");
        return Err(StoreError::NotConnected);
    };

    match submit(storefront.catalog(), form, &account) {
        Ok(product) => {
            info!(id = %product.id, seller = %account, "Listing created");
            notifier.success("Product listed successfully!");
            Ok(product)
        }
        Err(StoreError::Validation(errors)) => {
            notifier.error("Please fix the errors in the form");
            Err(StoreError::Validation(errors))
        }
        Err(e) => {
            error!("Error listing product: {e}");
            notifier.error("Failed to list product");
            Err(e)
        }
    }
}
