//! # Handlers HTTP — API JSON do Chat
//!
//! | Handler | Método | Rota | Retorno |
//! |---------|--------|------|---------|
//! | `chat` | POST | `/api/chat` | `{response, sessionId}` |
//! | `status` | GET | `/status` | `{ready, questions, sessions}` |
//!
//! ## Erros
//!
//! Qualquer falha interna vira HTTP 500 com corpo `{"detail": "..."}`
//! (ver [`ApiError`]). "Nenhuma questão encontrada" não é erro: é uma
//! resposta normal do assistente.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::AppState;
use crate::error::DatasetError;

/// Mensagem anterior da conversa, como enviada pelo frontend.
#[derive(Debug, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

/// Corpo de `POST /api/chat`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// Aceito por compatibilidade; o contexto real vem da sessão.
    #[serde(default, alias = "conversation_history")]
    pub conversation_history: Vec<HistoryMessage>,
    #[serde(default, alias = "session_id")]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

/// Resposta de `GET /status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// `true` quando o dataset já foi carregado.
    pub ready: bool,
    pub questions: usize,
    pub sessions: usize,
}

/// Erro de handler, sempre servido como 500 + `{detail}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("falha interna ao processar a mensagem: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Falha ao processar requisição");
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// POST `/api/chat` — processa uma mensagem dentro de uma sessão.
///
/// Sem `sessionId` no corpo, uma nova sessão (UUID v4) é criada e
/// devolvida para que o cliente a reenvie nas próximas mensagens.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session_id = req
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::debug!(
        session = %session_id,
        history = req.conversation_history.len(),
        "Mensagem recebida"
    );

    // a primeira consulta pode ler o dataset do disco
    let orchestrator = state.orchestrator.clone();
    let sid = session_id.clone();
    let response =
        tokio::task::spawn_blocking(move || orchestrator.process_message(&sid, &req.message))
            .await??;

    Ok(Json(ChatResponse {
        response,
        session_id,
    }))
}

/// GET `/status` — estado do dataset e quantidade de sessões abertas.
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let loaded = state.orchestrator.dataset().loaded_len();
    Json(StatusResponse {
        ready: loaded.is_some(),
        questions: loaded.unwrap_or(0),
        sessions: state.orchestrator.sessions().len(),
    })
}
