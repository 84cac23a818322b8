//! # Módulo Web — API HTTP do Assistente
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Cliente (frontend de chat, curl, ...)                   │
//! ├─────────────────────────────────────────────────────────┤
//! │ TraceLayer + CorsLayer (permissivo)                     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Axum Router (este módulo)                               │
//! │  ├── POST /api/chat  → JSON {response, sessionId}       │
//! │  └── GET  /status    → JSON {ready, questions, sessions}│
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Submódulos
//!
//! | Módulo | Responsabilidade |
//! |--------|------------------|
//! | [`state`] | Estado compartilhado (`AppState`) |
//! | [`handlers`] | Handlers Axum e mapeamento de erros |

pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Cria o router Axum com as rotas da API.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/status", get(handlers::status))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
