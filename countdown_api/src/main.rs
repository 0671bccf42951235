/**
 * This is the main entrypoint for the `countdown_api` service.
 *
 * The service renders countdown images toward a configured target date:
 * `/countdown.gif` (animated), `/countdown.png` and `/countdown.svg`.
 */
use std::sync::Arc;

use countdown_api::{AppContext, Config};

#[tokio::main]
async fn main() -> Result<(), axum::BoxError> {
    // Initialize the application context (which also initializes tracing)
    let app_context = countdown_app::create_app_context::<AppContext, Config>().await?;
    let addr = app_context.config.socket_addr();

    let app = countdown_api::app(Arc::new(app_context));

    countdown_axum::run_app(app, addr).await?;

    Ok(())
}
