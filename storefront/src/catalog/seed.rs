//! Built-in seed collection.
//!
//! With no backend behind the storefront, the catalog starts from this fixed
//! list every time the process starts.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use super::model::{Category, Product, Rating, Review};
use crate::config::DEFAULT_SEED_DELAY_MS;
use crate::traits::SeedSource;

fn at(timestamp: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(timestamp)?.with_timezone(&Utc))
}

fn review(
    id: &str,
    user: &str,
    username: &str,
    rating: u8,
    comment: &str,
    date: &str,
) -> Result<Review> {
    Ok(Review {
        id: id.to_string(),
        user: user.to_string(),
        username: username.to_string(),
        rating: Rating::try_from(rating).map_err(anyhow::Error::msg)?,
        comment: comment.to_string(),
        date: at(date)?,
    })
}

fn pexels(photo: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{photo}/pexels-photo-{photo}.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2"
    )
}

/// The fixed product list, newest first.
pub fn builtin_products() -> Result<Vec<Product>> {
    let products = vec![
        Product::builder()
            .id("1")
            .name("Wireless Noise-Cancelling Headphones")
            .description("Premium wireless headphones with active noise cancellation, 30-hour battery life, and immersive sound quality.")
            .price(Decimal::new(5, 2))
            .image(pexels(577_769))
            .category(Category::Electronics)
            .stock(15)
            .created_at(at("2023-08-15T10:30:00Z")?)
            .seller("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266", Some("TechGadgets"))
            .review(review(
                "101",
                "0xb0b16607a8c0b3eebe82f8d8cc9d417442dc9a9c",
                "AudioPhile",
                5,
                "Incredible sound quality and the noise cancellation is top-notch!",
                "2023-09-01T14:22:00Z",
            )?)
            .review(review(
                "102",
                "0x1a75bbc34642a7514d59de47f06ffcc094125bbb",
                "MusicLover",
                4,
                "Great headphones but the ear cushions could be more comfortable for extended use.",
                "2023-08-25T09:15:00Z",
            )?)
            .build()?,
        Product::builder()
            .id("2")
            .name("Smart Home Hub")
            .description("Central control for your smart home devices. Compatible with over 100 smart home products and voice assistants.")
            .price(Decimal::new(3, 2))
            .image(pexels(1_034_812))
            .category(Category::SmartHome)
            .stock(8)
            .created_at(at("2023-08-10T15:45:00Z")?)
            .seller("0x70997970C51812dc3A010C7d01b50e0d17dc79C8", Some("SmartLife"))
            .review(review(
                "201",
                "0x3c567a7ca36eda85a19f2ca8a32a53911f57e8a1",
                "TechEnthusiast",
                5,
                "Perfect central hub for all my smart devices. Easy setup and intuitive app!",
                "2023-08-30T11:10:00Z",
            )?)
            .build()?,
        Product::builder()
            .id("3")
            .name("Mechanical Keyboard")
            .description("RGB backlit mechanical keyboard with customizable switches. Perfect for gaming and professional typing.")
            .price(Decimal::new(2, 2))
            .image(pexels(4_584_532))
            .category(Category::ComputerAccessories)
            .stock(20)
            .created_at(at("2023-08-05T09:15:00Z")?)
            .seller("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC", Some("GamersChoice"))
            .review(review(
                "301",
                "0x7e384b7ccfdc8e96fb8b137e398a981f0d2b4a6e",
                "ProGamer",
                5,
                "The tactile feedback is amazing! Love the customizable RGB options too.",
                "2023-08-20T16:45:00Z",
            )?)
            .review(review(
                "302",
                "0x9d8a62f656e3a91a0d0f1aae4b5c7ebe4769c498",
                "CodeNinja",
                4,
                "Great for coding all day. Keys have nice travel and tactile bump.",
                "2023-08-15T13:20:00Z",
            )?)
            .build()?,
        Product::builder()
            .id("4")
            .name("Virtual Reality Headset")
            .description("Immersive VR experience with high-resolution displays, built-in speakers, and precise motion tracking.")
            .price(Decimal::new(8, 2))
            .image(pexels(3_761_823))
            .category(Category::Electronics)
            .stock(5)
            .created_at(at("2023-07-28T14:00:00Z")?)
            .seller("0x90F79bf6EB2c4f870365E785982E1f101E93b906", Some("VRWorld"))
            .review(review(
                "401",
                "0x4b5f3ad2e610f05ad55f461ca38752a0badb0e8c",
                "VREnthusiast",
                5,
                "Mind-blowing experience! The tracking is flawless and the resolution is stunning.",
                "2023-08-10T10:30:00Z",
            )?)
            .build()?,
        Product::builder()
            .id("5")
            .name("Smart Watch")
            .description("Track your fitness, receive notifications, and monitor your health with this sleek smartwatch.")
            .price(Decimal::new(15, 3))
            .image(pexels(393_047))
            .category(Category::Wearables)
            .stock(25)
            .created_at(at("2023-08-01T11:20:00Z")?)
            .seller("0x15d34AAf54267DB7D7c367839AAf71A00a2C6A65", Some("TimeWear"))
            .review(review(
                "501",
                "0x2d7e5c1d8d3c13b5ec72f4ef3e1f2a4e1b228f6b",
                "FitnessFreak",
                4,
                "Great fitness tracking features and battery life is impressive!",
                "2023-08-22T08:15:00Z",
            )?)
            .review(review(
                "502",
                "0x8c3d14d18d56e1d5b4a53e353603ed6c02b10574",
                "TechReviewer",
                5,
                "The best smartwatch I've used. Health metrics are surprisingly accurate!",
                "2023-08-18T17:40:00Z",
            )?)
            .build()?,
    ];

    Ok(products)
}

/// Seed source serving [`builtin_products`] after a simulated network delay.
#[derive(Debug, Clone)]
pub struct BuiltinSeed {
    delay: Duration,
}

impl BuiltinSeed {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for BuiltinSeed {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SEED_DELAY_MS))
    }
}

#[async_trait]
impl SeedSource for BuiltinSeed {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        debug!("Loading built-in seed after {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
        builtin_products()
    }
}
