//! 사이징/과도해석 HTTP API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::busbar::{
    compute_sizing_with, BusbarResult, RawBusbarInput, ShortCircuitTimeSeries, SimulationRequest,
    SizeCatalog, StandardSize, TableCatalog,
};
use crate::config::SimulationDefaults;
use crate::error::BusbarError;
use crate::material_db::{self, BuiltinMaterials, MaterialProperties};
use crate::presets::{self, StandardConfiguration, VoltageLevel};

/// 요청 간에 공유하는 읽기 전용 상태.
pub struct AppState {
    catalog: TableCatalog,
    simulation: SimulationDefaults,
}

impl AppState {
    pub fn new(catalog: TableCatalog, simulation: SimulationDefaults) -> Self {
        Self {
            catalog,
            simulation,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TableCatalog::builtin(), SimulationDefaults::default())
    }
}

/// Build the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/materials", get(materials_handler))
        .route("/api/voltage-levels", get(voltage_levels_handler))
        .route(
            "/api/standard-configurations/:voltage",
            get(standard_configurations_handler),
        )
        .route("/api/standard-sizes", get(standard_sizes_handler))
        .route("/api/calculate", post(calculate_handler))
        .route("/api/simulate", post(simulate_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn materials_handler() -> Json<&'static [MaterialProperties]> {
    Json(material_db::materials())
}

async fn voltage_levels_handler() -> Json<&'static [VoltageLevel]> {
    Json(presets::voltage_levels())
}

async fn standard_configurations_handler(
    Path(voltage): Path<f64>,
) -> Result<Json<Vec<StandardConfiguration>>, ApiError> {
    let configs = presets::standard_configurations(voltage);
    if configs.is_empty() {
        return Err(ApiError::NotFound(format!(
            "{voltage} kV 에 대한 표준 구성이 없습니다."
        )));
    }
    Ok(Json(configs))
}

async fn standard_sizes_handler(State(state): State<Arc<AppState>>) -> Json<Vec<StandardSize>> {
    Json(state.catalog.sizes().to_vec())
}

/// 사이징 계산
async fn calculate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RawBusbarInput>, JsonRejection>,
) -> Result<Json<BusbarResult>, ApiError> {
    let Json(raw) = payload?;
    let input = raw.parse().inspect_err(log_rejection)?;
    tracing::info!(
        current = input.current,
        material = %input.material,
        width = input.busbar_width,
        thickness = input.busbar_thickness,
        length = input.busbar_length,
        "sizing request"
    );
    let result = compute_sizing_with(&input, &BuiltinMaterials, &state.catalog)?;
    tracing::info!(
        sufficient = result.is_sizing_sufficient,
        required_area = result.required_cross_section_area,
        "sizing completed"
    );
    Ok(Json(result))
}

/// 단락 과도해석
async fn simulate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<Json<ShortCircuitTimeSeries>, ApiError> {
    let Json(request) = payload?;
    let series = request
        .run(state.simulation.as_tuple())
        .inspect_err(log_rejection)?;
    tracing::info!(steps = series.time_points.len(), "transient simulated");
    Ok(Json(series))
}

fn log_rejection(err: &BusbarError) {
    tracing::warn!(kind = err.kind(), fields = err.details().len(), "request rejected");
}

/// API Errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Calculation(#[from] BusbarError),
    #[error("{0}")]
    NotFound(String),
    /// 본문이 JSON이 아니거나 구조가 맞지 않는 요청.
    #[error(transparent)]
    MalformedBody(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, details) = match &self {
            ApiError::Calculation(err) => {
                let status = match err {
                    BusbarError::InvalidSimulationParameters { .. } => StatusCode::BAD_REQUEST,
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                (status, err.kind(), err.details())
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound", Vec::new()),
            ApiError::MalformedBody(rejection) => {
                tracing::warn!(status = %rejection.status(), "malformed request body");
                (rejection.status(), "MalformedRequest", Vec::new())
            }
        };

        let body = Json(json!({
            "error": kind,
            "message": self.to_string(),
            "details": details,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = create_router(AppState::default())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn calculate_accepts_numeric_strings() {
        let (status, body) = send(post_json(
            "/api/calculate",
            json!({
                "current": "1000", "voltage": 0.4, "material": "copper",
                "busbarWidth": "100", "busbarThickness": 10, "busbarLength": 1000,
                "shortCircuitCurrent": 50, "phaseDistance": 100
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!((body["requiredCrossSectionArea"].as_f64().unwrap() - 781.25).abs() < 1e-9);
        assert_eq!(body["recommendedStandardSizes"][0], "80mm x 10mm");
    }

    #[tokio::test]
    async fn validation_errors_are_listed_per_field() {
        let (status, body) = send(post_json(
            "/api/calculate",
            json!({ "current": "abc", "voltage": 0.4, "material": "copper" }),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "ValidationError");
        let fields = detail_fields(&body);
        assert!(fields.contains(&"current"));
        assert!(fields.contains(&"busbarWidth"));
        assert!(fields.contains(&"phaseDistance"));
    }

    fn detail_fields(body: &serde_json::Value) -> Vec<&str> {
        body["details"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|d| d["field"].as_str())
            .collect()
    }

    #[tokio::test]
    async fn wrongly_typed_fields_join_the_validation_list() {
        let (status, body) = send(post_json(
            "/api/calculate",
            json!({ "current": true, "voltage": 0.4, "material": "copper" }),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "ValidationError");
        let fields = detail_fields(&body);
        assert!(fields.contains(&"current"));
        assert!(fields.contains(&"busbarWidth"));
        assert!(fields.contains(&"phaseDistance"));
    }

    #[tokio::test]
    async fn flags_accept_text_and_reject_other_types() {
        let valid = json!({
            "current": 1000, "voltage": 0.4, "material": "copper",
            "busbarWidth": 100, "busbarThickness": 10, "busbarLength": 1000,
            "shortCircuitCurrent": 50, "phaseDistance": 100, "systemType": "singlePhase",
            "isBalanced": "false"
        });
        let (status, _) = send(post_json("/api/calculate", valid)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(post_json(
            "/api/calculate",
            json!({
                "current": [1000], "voltage": 0.4, "material": 7,
                "busbarWidth": 100, "busbarThickness": 10, "busbarLength": 1000,
                "shortCircuitCurrent": 50, "phaseDistance": 100,
                "useAdvancedCalculation": 1
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "ValidationError");
        let fields = detail_fields(&body);
        assert!(fields.contains(&"current"));
        assert!(fields.contains(&"material"));
        assert!(fields.contains(&"useAdvancedCalculation"));
    }

    #[tokio::test]
    async fn malformed_body_gets_a_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/calculate")
            .header("content-type", "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let (status, body) = send(request).await;
        assert!(status.is_client_error());
        assert_eq!(body["error"], "MalformedRequest");
        assert!(body["details"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn bad_simulation_parameters_are_bad_request() {
        let (status, body) = send(post_json(
            "/api/simulate",
            json!({
                "busbarData": { "ambientTemperature": 40, "shortCircuitCurrent": 50,
                                "busbarLength": 1000, "phaseDistance": 100 },
                "duration": 0, "timeSteps": 100
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidSimulationParameters");
        assert_eq!(detail_fields(&body), vec!["duration"]);
    }

    #[tokio::test]
    async fn simulate_uses_default_step_count() {
        let (status, body) = send(post_json(
            "/api/simulate",
            json!({
                "busbarData": { "ambientTemperature": 40, "shortCircuitCurrent": 50,
                                "busbarLength": 1000, "phaseDistance": 100 }
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timePoints"].as_array().unwrap().len(), 100);
    }

    #[tokio::test]
    async fn missing_busbar_data_names_every_field() {
        let (status, body) = send(post_json("/api/simulate", json!({ "duration": 0.5 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "MissingPrerequisiteData");
        assert_eq!(body["details"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn catalog_endpoints() {
        let (status, body) = send(get("/api/standard-sizes")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 16);

        let (status, body) = send(get("/api/standard-configurations/0.4")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.as_array().unwrap().is_empty());

        let (status, _) = send(get("/api/standard-configurations/132")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
