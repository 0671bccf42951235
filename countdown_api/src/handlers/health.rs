use axum::response::IntoResponse;
use serde_json::json;
use tracing::instrument;

#[instrument]
pub async fn handler() -> impl IntoResponse {
    tracing::info!("health check");

    axum::Json(json!({ "status" : "UP" }))
}

#[cfg(test)]
mod tests {
    use tokio::runtime::Runtime;

    use super::*;

    #[test]
    fn test_health() {
        let rt = Runtime::new().unwrap();
        let response = rt.block_on(handler()).into_response();
        assert_eq!(response.status(), 200);
    }
}
