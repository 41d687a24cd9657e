// crates/aggregation/src/domain/ports/mod.rs

mod product_client;
mod user_profile_client;

pub use product_client::ProductClient;
pub use user_profile_client::{UserProfile, UserProfileClient};

#[cfg(any(test, feature = "test-utils"))]
mod downstream_client_stubs;
#[cfg(any(test, feature = "test-utils"))]
pub use downstream_client_stubs::{ProductClientStub, UserProfileClientStub};
