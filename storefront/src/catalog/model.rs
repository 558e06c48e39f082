use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Electronics")]
    Electronics,
    #[serde(rename = "Smart Home")]
    SmartHome,
    #[serde(rename = "Computer Accessories")]
    ComputerAccessories,
    #[serde(rename = "Wearables")]
    Wearables,
    #[serde(rename = "Fashion")]
    Fashion,
    #[serde(rename = "Collectibles")]
    Collectibles,
    #[serde(rename = "Digital Art")]
    DigitalArt,
    #[serde(rename = "Gaming")]
    Gaming,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Self; 8] = [
        Self::Electronics,
        Self::SmartHome,
        Self::ComputerAccessories,
        Self::Wearables,
        Self::Fashion,
        Self::Collectibles,
        Self::DigitalArt,
        Self::Gaming,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::SmartHome => "Smart Home",
            Self::ComputerAccessories => "Computer Accessories",
            Self::Wearables => "Wearables",
            Self::Fashion => "Fashion",
            Self::Collectibles => "Collectibles",
            Self::DigitalArt => "Digital Art",
            Self::Gaming => "Gaming",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string is not one of the fixed category labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating {value} is outside 1..=5"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A buyer's review. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    /// Account that wrote the review.
    pub user: String,
    pub username: String,
    pub rating: Rating,
    pub comment: String,
    pub date: DateTime<Utc>,
}

/// The account selling a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A product in the catalog.
///
/// `reviews` can only grow through [`Product::push_review`], which keeps
/// `average_rating` in step with it. Deserialized products recompute the
/// average rather than trusting the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ProductRecord")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: Category,
    pub stock: u32,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub seller: Seller,
    reviews: Vec<Review>,
    average_rating: f64,
}

impl Product {
    /// Start building a product.
    pub fn builder() -> ProductBuilder {
        ProductBuilder::default()
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub const fn average_rating(&self) -> f64 {
        self.average_rating
    }

    /// Append a review and recompute the running average.
    pub(crate) fn push_review(&mut self, review: Review) {
        self.reviews.push(review);
        self.average_rating = average_rating(&self.reviews);
    }

    /// Case-insensitive substring match against name or description.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    /// Whether the product was listed by `address` (case-insensitive).
    pub fn is_sold_by(&self, address: &str) -> bool {
        self.seller.address.eq_ignore_ascii_case(address)
    }
}

/// Arithmetic mean of review ratings, or 0 for no reviews.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating.get())).sum();
    f64::from(total) / reviews.len() as f64
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductRecord {
    id: String,
    name: String,
    description: String,
    price: Decimal,
    category: Category,
    stock: u32,
    image: String,
    created_at: DateTime<Utc>,
    seller: Seller,
    #[serde(default)]
    reviews: Vec<Review>,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        let average_rating = average_rating(&record.reviews);
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            price: record.price,
            category: record.category,
            stock: record.stock,
            image: record.image,
            created_at: record.created_at,
            seller: record.seller,
            reviews: record.reviews,
            average_rating,
        }
    }
}

/// Builder for creating products
#[derive(Debug, Default)]
pub struct ProductBuilder {
    id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    price: Option<Decimal>,
    category: Option<Category>,
    stock: u32,
    image: Option<String>,
    created_at: Option<DateTime<Utc>>,
    seller: Option<Seller>,
    reviews: Vec<Review>,
}

impl ProductBuilder {
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub const fn stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    #[must_use]
    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn seller(mut self, address: impl Into<String>, name: Option<&str>) -> Self {
        self.seller = Some(Seller {
            address: address.into(),
            name: name.map(str::to_string),
        });
        self
    }

    #[must_use]
    pub fn review(mut self, review: Review) -> Self {
        self.reviews.push(review);
        self
    }

    /// Build the product (returns error if required fields are missing)
    pub fn build(self) -> StoreResult<Product> {
        let missing = |field: &str| StoreError::InvalidState(format!("product {field} is required"));

        let price = self.price.ok_or_else(|| missing("price"))?;
        if price.is_sign_negative() {
            return Err(StoreError::InvalidState(format!(
                "product price must not be negative, got {price}"
            )));
        }
        let average_rating = average_rating(&self.reviews);

        Ok(Product {
            id: self.id.ok_or_else(|| missing("id"))?,
            name: self.name.ok_or_else(|| missing("name"))?,
            description: self.description.ok_or_else(|| missing("description"))?,
            price,
            category: self.category.ok_or_else(|| missing("category"))?,
            stock: self.stock,
            image: self.image.unwrap_or_default(),
            created_at: self.created_at.ok_or_else(|| missing("created_at"))?,
            seller: self.seller.ok_or_else(|| missing("seller"))?,
            reviews: self.reviews,
            average_rating,
        })
    }
}
