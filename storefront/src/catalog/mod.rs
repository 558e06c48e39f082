pub mod model;
pub mod seed;
pub mod store;

pub use model::{average_rating, Category, Product, ProductBuilder, Rating, Review, Seller};
pub use seed::{builtin_products, BuiltinSeed};
pub use store::{CatalogStore, NewProduct};
