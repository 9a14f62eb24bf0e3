use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::sources::DataSources;
use crate::catalog::store::ReferenceTables;
use crate::cli::ServeArgs;
use crate::matching::classifier::{DiseaseClassifier, UnavailableClassifier};
use crate::matching::engine::PredictionEngine;
use crate::parsing::input::{symptoms_from_value, INVALID_SYMPTOMS_FORMAT};
use crate::utils::validation::{validate_symptoms, MAX_REQUEST_BODY_SIZE};

/// Maximum number of requests processed at once
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state, loaded once before the first request
pub struct AppState {
    pub tables: ReferenceTables,
    pub classifier: Box<dyn DiseaseClassifier>,
}

impl AppState {
    /// State with no trained classifier
    #[must_use]
    pub fn new(tables: ReferenceTables) -> Self {
        Self {
            tables,
            classifier: Box::new(UnavailableClassifier),
        }
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Box<dyn DiseaseClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    fn engine(&self) -> PredictionEngine<'_> {
        PredictionEngine::new(&self.tables).with_classifier(self.classifier.as_ref())
    }
}

/// Error body; internal details are logged, never returned
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

/// Request body of `POST /api/prediction`
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub symptoms: Vec<String>,
}

/// Response body of `GET /api/prediction`
#[derive(Debug, Serialize, Deserialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::debug!("Rejected request ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
    }
}

fn bad_request(error_type: &str, internal_error: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(create_safe_error_response(
            error_type,
            INVALID_SYMPTOMS_FORMAT,
            Some(internal_error),
        )),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs, sources: &DataSources) -> anyhow::Result<()> {
    // Tables are loaded before the runtime starts serving
    let state = Arc::new(AppState::new(ReferenceTables::load(sources)));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, state).await })
}

/// Create the application router with all routes and middleware configured.
///
/// Rate limiting is added by [`run`] because it needs the peer address of a
/// real connection.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/prediction",
            get(symptoms_handler).post(prediction_handler),
        )
        .route("/api/symptoms", get(symptoms_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE)),
        )
}

async fn run_server(args: ServeArgs, state: Arc<AppState>) -> anyhow::Result<()> {
    // IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit configuration"))?;

    let app = create_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    tracing::info!("Starting symptom-solver web server at http://{addr}");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Sorted list of every known symptom
async fn symptoms_handler(State(state): State<Arc<AppState>>) -> Json<SymptomsResponse> {
    Json(SymptomsResponse {
        symptoms: state.engine().known_symptoms(),
    })
}

/// Predict a disease from `{"symptoms": [...]}`
async fn prediction_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let value: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => return bad_request("invalid_json", &e.to_string()),
    };

    let Some(symptoms_value) = value.get("symptoms") else {
        return bad_request("missing_symptoms", "request has no 'symptoms' field");
    };

    let symptoms = match symptoms_from_value(symptoms_value) {
        Ok(symptoms) => symptoms,
        Err(e) => return bad_request("invalid_symptoms", &e.to_string()),
    };

    if let Err(e) = validate_symptoms(&symptoms) {
        return bad_request("too_large", &e.to_string());
    }

    Json(state.engine().predict(&symptoms)).into_response()
}
