// In crates/web-server/src/lib.rs

use std::sync::Arc;

use analysis::{AnalysisReply, AnalysisService, ValidationError};
use app_config::types::ServerSettings;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use core_types::{TradeId, TradeRecord, UserId};
use database::TradeStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use types::{CreateTradeRequest, ListTradesParams};
use uuid::Uuid;

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TradeStore>,
    /// `None` when the gateway credential is missing; analysis requests are then refused.
    pub analysis: Option<AnalysisService>,
    pub allowed_origin: HeaderValue,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TradeStore>,
        analysis: Option<AnalysisService>,
        allowed_origin: &str,
    ) -> Result<Self> {
        let allowed_origin = HeaderValue::from_str(allowed_origin)
            .map_err(|_| Error::InvalidOrigin(allowed_origin.to_string()))?;
        Ok(Self { store, analysis, allowed_origin })
    }
}

/// Creates the main application router with all routes and middleware.
///
/// CORS preflight (`OPTIONS`) requests are answered by the CORS layer with an empty body.
pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.allowed_origin.clone())
        .allow_methods([Method::POST, Method::OPTIONS, Method::GET, Method::DELETE])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]);

    let api_router = Router::new()
        .route("/trades", get(list_trades_handler).post(create_trade_handler))
        .route("/trades/{tradeId}", delete(delete_trade_handler));

    Router::new()
        .route("/health", get(health_check_handler))
        .route("/analyze-trades", post(analyze_trades_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// Handler for `POST /analyze-trades`.
///
/// Every outcome, including an unreadable body, is shaped as `{feedback}` or `{error}`.
async fn analyze_trades_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let reply = match &state.analysis {
        None => AnalysisReply::not_configured(),
        Some(service) => match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(value) => service.handle(&value).await,
            Err(e) => {
                tracing::warn!(error = %e, "Analysis request body is not JSON");
                AnalysisReply::error(400, ValidationError::MalformedRequest.to_string())
            }
        },
    };

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(reply.body)).into_response()
}

/// Handler for `GET /api/trades?user_id=...`
async fn list_trades_handler(
    State(state): State<AppState>,
    Query(params): Query<ListTradesParams>,
) -> Result<Json<Vec<TradeRecord>>> {
    let trades = state.store.list(UserId(params.user_id)).await?;
    Ok(Json(trades))
}

/// Handler for `POST /api/trades`
async fn create_trade_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateTradeRequest>,
) -> Result<(StatusCode, Json<TradeRecord>)> {
    let new_trade = risk::prepare_trade(UserId(request.user_id), &request.input)?;
    let record = state.store.create(new_trade).await?;
    tracing::info!(trade_id = %record.id, risk_percent = record.risk_percent, "Trade logged");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handler for `DELETE /api/trades/{tradeId}`
async fn delete_trade_handler(
    State(state): State<AppState>,
    Path(trade_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.store.delete(TradeId(trade_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The main entry point for running the web server.
///
/// It will run forever until the process is terminated.
pub async fn run(settings: ServerSettings, app_state: AppState) -> Result<()> {
    if app_state.analysis.is_none() {
        tracing::error!("Gateway credential missing; /analyze-trades will refuse every request.");
    }

    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    tracing::info!("Web server listening on {}", address);

    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServeError)?;

    Ok(())
}
