mod browsing;
mod error_cases;
mod listing;
mod reviews;
mod session;
