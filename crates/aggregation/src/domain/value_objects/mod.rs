// crates/aggregation/src/domain/value_objects/mod.rs

mod access_token;
mod email;
mod product_id;
mod request_id;
mod user_id;

pub use access_token::AccessToken;
pub use email::Email;
pub use product_id::ProductId;
pub use request_id::RequestId;
pub use user_id::UserId;
