//! HTTP surface for the deck-based dealer.
//!
//! A single dealer lives for the lifetime of the process behind a
//! mutex, so concurrent requests see a consistent deck. `GET
//! /next-pair` deals one pair; 409 means the decks were reshuffled and
//! the caller should simply call again; 422 means no valid pairing is
//! feasible with the current configuration. `POST /reset` reshuffles
//! unconditionally.

use crate::config::Config;
use crate::dealer::{DealError, Dealer};
use crate::error::AppError;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Dealer plus its random source, locked together so deals stay
/// serialized.
pub struct DealerService {
    dealer: Dealer,
    rng: SmallRng,
}

pub type SharedDealer = Arc<Mutex<DealerService>>;

impl DealerService {
    /// Builds the service from the configured roster. A seed gives a
    /// deterministic deal order, otherwise the OS supplies entropy.
    pub fn from_config(config: &Config, seed: Option<u64>) -> Result<Self, AppError> {
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let dealer = Dealer::from_config(config, &mut rng)?;
        Ok(DealerService { dealer, rng })
    }

    pub fn shared(self) -> SharedDealer {
        Arc::new(Mutex::new(self))
    }
}

/// `GET /next-pair`
pub async fn next_pair(
    State(state): State<SharedDealer>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut service = state.lock().await;
    let DealerService { dealer, rng } = &mut *service;
    match dealer.deal_next(rng) {
        Ok(dealt) => Ok(Json(json!({
            "team": dealt.team,
            "remaining": dealt.remaining,
        }))),
        Err(err @ DealError::Reshuffled) => Err((
            StatusCode::CONFLICT,
            Json(json!({ "error": err.to_string() })),
        )),
        Err(err @ DealError::Infeasible(_)) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": err.to_string() })),
        )),
    }
}

/// `POST /reset`
pub async fn reset_decks(State(state): State<SharedDealer>) -> Json<Value> {
    let mut service = state.lock().await;
    let DealerService { dealer, rng } = &mut *service;
    dealer.reset(rng);
    info!("dealer decks reset to full membership");
    Json(json!({ "ok": true, "remaining": dealer.remaining() }))
}

/// Builds the dealer router with a permissive CORS layer.
pub fn router(service: DealerService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/next-pair", get(next_pair))
        .route("/reset", post(reset_decks))
        .layer(cors)
        .with_state(service.shared())
}

/// Runs the dealer server until the process is stopped.
pub async fn serve(addr: &str, config: &Config, seed: Option<u64>) -> Result<(), AppError> {
    let service = DealerService::from_config(config, seed)?;
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::server_error(format!("Failed to bind {addr}: {e}")))?;
    info!("dealer server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::server_error(e.to_string()))?;
    Ok(())
}
