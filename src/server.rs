// HTTP surface: GET /hotels and GET /health

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::response::ListHotelsResponse;
use crate::service::{HotelService, ListHotelsRequest};

pub type AppState = Arc<HotelService>;

// Comma separated id lists, both optional
#[derive(Debug, Default, Deserialize)]
pub struct HotelsQuery {
    pub hotel_ids: Option<String>,
    pub destination_ids: Option<String>,
}

impl From<HotelsQuery> for ListHotelsRequest {
    fn from(query: HotelsQuery) -> Self {
        ListHotelsRequest::from_query(query.hotel_ids.as_deref(), query.destination_ids.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/hotels", get(list_hotels))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_hotels(
    State(service): State<AppState>,
    Query(query): Query<HotelsQuery>,
) -> Json<ListHotelsResponse> {
    let request = ListHotelsRequest::from(query);
    let response = service.list_hotels(&request).await;
    info!(
        hotel_ids = request.hotel_ids.len(),
        destination_ids = request.destination_ids.len(),
        returned = response.data.len(),
        "served hotels"
    );
    Json(response)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_into_request() {
        let request = ListHotelsRequest::from(HotelsQuery {
            hotel_ids: None,
            destination_ids: Some("5432, 1122".to_string()),
        });

        assert!(request.hotel_ids.is_empty());
        assert_eq!(request.destination_ids, vec!["5432", "1122"]);
    }

    #[test]
    fn test_health_payload() {
        let Json(health) = tokio_test::block_on(health_check());
        assert_eq!(health.status, "ok");
        assert_eq!(health.service, "hotel_merge");
    }
}
