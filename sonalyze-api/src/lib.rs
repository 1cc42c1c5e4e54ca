pub mod client;
pub mod config;
pub mod endpoints;
pub mod token_store;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use endpoints::Endpoints;
pub use token_store::TokenStore;
