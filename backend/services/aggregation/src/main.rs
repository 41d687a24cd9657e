// backend/services/aggregation/src/main.rs

use aggregation::infrastructure::bootstrap::run_aggregation_service;
use shared_kernel::errors::AppResult;

#[tokio::main]
async fn main() -> AppResult<()> {
    run_aggregation_service().await
}
