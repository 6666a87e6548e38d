//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::alerts::AlertsState;
use crate::domain::{LineId, Station, StationId};
use crate::planner::PlannerError;
use crate::stations::{StationQuery, StorageError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/:id", get(station_detail))
        .route("/api/alerts", get(alerts))
        .route("/api/alerts/reload", post(reload_alerts))
        .route("/api/route", get(route))
        .route("/api/route/origin", put(select_origin))
        .route("/api/route/destination", put(select_destination))
        .route("/api/route/swap", post(swap_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List stations in line order, optionally filtered.
async fn list_stations(
    State(state): State<AppState>,
    query: Result<Query<StationSearchRequest>, QueryRejection>,
) -> Result<Json<StationListResponse>, AppError> {
    let Query(req) = query?;
    let query = StationQuery {
        text: req.q,
        line: req.line.map(LineId),
    };

    let stations = state.catalog.search(&query)?;

    Ok(Json(StationListResponse {
        stations: stations.iter().map(StationResult::from_station).collect(),
    }))
}

/// Details of a single station.
async fn station_detail(
    State(state): State<AppState>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<StationResult>, AppError> {
    let Path(id) = id?;
    let station = find_station(&state, id)?;
    Ok(Json(StationResult::from_station(&station)))
}

/// Current alert feed state.
async fn alerts(State(state): State<AppState>) -> Json<AlertsResponse> {
    Json(AlertsResponse::from_state(&state.alert_feed.current()))
}

/// Drop cached alerts and fetch them again.
async fn reload_alerts(State(state): State<AppState>) -> Json<AlertsResponse> {
    state.alerts.invalidate_cache();
    let next: AlertsState = state.alert_feed.reload(state.alerts.as_ref()).await;
    Json(AlertsResponse::from_state(&next))
}

/// Current selection and route.
async fn route(State(state): State<AppState>) -> Result<Json<RouteResponse>, AppError> {
    let view = state.planner.view().await?;
    Ok(Json(RouteResponse::from_view(&view)))
}

async fn select_origin(
    State(state): State<AppState>,
    body: Result<Json<SelectStationRequest>, JsonRejection>,
) -> Result<Json<RouteResponse>, AppError> {
    let Json(req) = body?;
    let station = resolve_selection(&state, req.station_id)?;
    let view = state.planner.select_origin(station).await?;
    Ok(Json(RouteResponse::from_view(&view)))
}

async fn select_destination(
    State(state): State<AppState>,
    body: Result<Json<SelectStationRequest>, JsonRejection>,
) -> Result<Json<RouteResponse>, AppError> {
    let Json(req) = body?;
    let station = resolve_selection(&state, req.station_id)?;
    let view = state.planner.select_destination(station).await?;
    Ok(Json(RouteResponse::from_view(&view)))
}

async fn swap_route(State(state): State<AppState>) -> Result<Json<RouteResponse>, AppError> {
    let view = state.planner.swap().await?;
    Ok(Json(RouteResponse::from_view(&view)))
}

fn find_station(state: &AppState, id: u32) -> Result<Station, AppError> {
    state
        .catalog
        .get(StationId(id))
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {id}"),
        })
}

/// Turn an optional id into the catalog's station; `None` clears.
fn resolve_selection(state: &AppState, id: Option<u32>) -> Result<Option<Station>, AppError> {
    id.map(|id| find_station(state, id)).transpose()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        AppError::Unavailable {
            message: e.to_string(),
        }
    }
}

impl From<PlannerError> for AppError {
    fn from(e: PlannerError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => {
                warn!(%message, "station catalog unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, message)
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::{AlertCacheConfig, AlertClient, AlertClientConfig, AlertFeed, CachedAlertClient};
    use crate::planner::{PlannerConfig, spawn_planner};
    use crate::stations::{MemoryStore, StationCatalog, seed};
    use std::sync::Arc;

    fn test_state() -> AppState {
        let catalog = StationCatalog::new(Arc::new(MemoryStore::with_stations(seed::line_one())));
        let planner = spawn_planner(PlannerConfig::default(), catalog.subscribe());
        let client = AlertClient::new(AlertClientConfig::new().with_base_url("http://127.0.0.1:9"))
            .unwrap();
        let alerts = CachedAlertClient::new(client, &AlertCacheConfig::default());
        AppState::new(catalog, planner, alerts, AlertFeed::new())
    }

    fn select(id: Option<u32>) -> Result<Json<SelectStationRequest>, JsonRejection> {
        Ok(Json(SelectStationRequest { station_id: id }))
    }

    #[tokio::test]
    async fn health_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn router_builds() {
        let _router = create_router(test_state());
    }

    #[tokio::test]
    async fn list_and_filter_stations() {
        let state = test_state();

        let Json(all) = list_stations(State(state.clone()), Ok(Query(StationSearchRequest::default())))
            .await
            .unwrap();
        assert_eq!(all.stations.len(), 26);
        assert_eq!(all.stations[0].name, "Bayóvar");

        let req = StationSearchRequest {
            q: Some("san borja".into()),
            line: Some(1),
        };
        let Json(found) = list_stations(State(state.clone()), Ok(Query(req))).await.unwrap();
        let names: Vec<_> = found.stations.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["La Cultura", "San Borja Sur", "Angamos"]);

        let req = StationSearchRequest {
            q: None,
            line: Some(2),
        };
        let Json(none) = list_stations(State(state), Ok(Query(req))).await.unwrap();
        assert!(none.stations.is_empty());
    }

    #[tokio::test]
    async fn station_detail_found_and_missing() {
        let state = test_state();

        let Json(station) = station_detail(State(state.clone()), Ok(Path(12))).await.unwrap();
        assert_eq!(station.name, "Gamarra");
        assert_eq!(station.district, "La Victoria");

        let err = station_detail(State(state), Ok(Path(999))).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn plan_swap_and_clear() {
        let state = test_state();

        let Json(route) = select_origin(State(state.clone()), select(Some(3))).await.unwrap();
        assert_eq!(route.state, "unselected");

        let Json(route) = select_destination(State(state.clone()), select(Some(1)))
            .await
            .unwrap();
        assert_eq!(route.state, "computed");
        let names: Vec<_> = route.steps.iter().map(|s| s.station_name.as_str()).collect();
        assert_eq!(names, ["San Martín", "Santa Rosa", "Bayóvar"]);
        assert_eq!(route.estimated_minutes, 6);

        let Json(route) = swap_route(State(state.clone())).await.unwrap();
        let names: Vec<_> = route.steps.iter().map(|s| s.station_name.as_str()).collect();
        assert_eq!(names, ["Bayóvar", "Santa Rosa", "San Martín"]);
        assert_eq!(route.origin.as_ref().unwrap().id, 1);

        let Json(route) = select_destination(State(state.clone()), select(None))
            .await
            .unwrap();
        assert_eq!(route.state, "unselected");
        assert!(route.destination.is_none());

        let Json(current) = super::route(State(state)).await.unwrap();
        assert_eq!(current.state, "unselected");
        assert_eq!(current.origin.unwrap().name, "Bayóvar");
    }

    #[tokio::test]
    async fn same_station_reports_error() {
        let state = test_state();

        let Json(route) = select_origin(State(state.clone()), select(Some(5)))
            .await
            .unwrap();
        assert_eq!(route.state, "unselected");
        let Json(route) = select_destination(State(state), select(Some(5)))
            .await
            .unwrap();
        assert_eq!(route.state, "invalid");
        assert_eq!(
            route.error.as_deref(),
            Some("origin and destination must differ")
        );
        assert!(route.steps.is_empty());
    }

    #[tokio::test]
    async fn unknown_station_selection_is_not_found() {
        let state = test_state();
        let err = select_origin(State(state), select(Some(404))).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn alerts_start_loading() {
        let Json(response) = alerts(State(test_state())).await;
        assert_eq!(response.status, "loading");
        assert!(response.alerts.is_empty());
    }

    #[test]
    fn error_status_codes() {
        let response = AppError::NotFound {
            message: "x".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::from(StorageError::Io {
            message: "disk".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = AppError::from(PlannerError::Closed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    /// Serve the full router on an ephemeral port and return its base URL.
    async fn serve(state: AppState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, create_router(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn expect_json_error(response: reqwest::Response, status: u16) -> String {
        assert_eq!(response.status().as_u16(), status);
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"), "{content_type}");

        let body: serde_json::Value = response.json().await.unwrap();
        body["error"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn malformed_requests_get_json_400() {
        let base = serve(test_state()).await;
        let http = reqwest::Client::new();

        let response = http
            .put(format!("{base}/api/route/origin"))
            .json(&serde_json::json!({ "station_id": "abc" }))
            .send()
            .await
            .unwrap();
        let message = expect_json_error(response, 400).await;
        assert!(!message.is_empty());

        let response = http
            .put(format!("{base}/api/route/destination"))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("not json")
            .send()
            .await
            .unwrap();
        expect_json_error(response, 400).await;

        let response = http
            .get(format!("{base}/api/stations/abc"))
            .send()
            .await
            .unwrap();
        expect_json_error(response, 400).await;

        let response = http
            .get(format!("{base}/api/stations?line=xyz"))
            .send()
            .await
            .unwrap();
        expect_json_error(response, 400).await;
    }

    #[tokio::test]
    async fn served_router_plans_and_reports_missing_stations() {
        let base = serve(test_state()).await;
        let http = reqwest::Client::new();

        let response = http
            .get(format!("{base}/api/stations/999"))
            .send()
            .await
            .unwrap();
        let message = expect_json_error(response, 404).await;
        assert_eq!(message, "Unknown station: 999");

        for (path, id) in [("origin", 3), ("destination", 1)] {
            let response = http
                .put(format!("{base}/api/route/{path}"))
                .json(&serde_json::json!({ "station_id": id }))
                .send()
                .await
                .unwrap();
            assert!(response.status().is_success());
        }

        let route: serde_json::Value = http
            .get(format!("{base}/api/route"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(route["state"], "computed");
        assert_eq!(route["estimated_minutes"], 6);
        assert_eq!(route["steps"][0]["station_name"], "San Martín");
    }

    #[test]
    fn bad_request_status_code() {
        let response = AppError::BadRequest {
            message: "bad".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
