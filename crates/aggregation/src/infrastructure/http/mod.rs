// crates/aggregation/src/infrastructure/http/mod.rs

mod downstream_config;
mod product_http_client;
mod user_profile_http_client;

pub use downstream_config::DownstreamConfig;
pub use product_http_client::ProductHttpClient;
pub use user_profile_http_client::UserProfileHttpClient;

#[cfg(test)]
mod test_server;
