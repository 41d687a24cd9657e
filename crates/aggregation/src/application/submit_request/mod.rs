// crates/aggregation/src/application/submit_request/mod.rs

mod submit_request_command;
mod submit_request_use_case;

pub use submit_request_command::SubmitRequestCommand;
pub use submit_request_use_case::SubmitRequestUseCase;
