//! # Estado da Aplicação Web
//!
//! ```text
//! AppState (Clone, barato)
//!  └── orchestrator: Arc<Orchestrator>
//!       ├── dataset:  Arc<DatasetStore>   (carga preguiçosa + cache)
//!       └── sessions: Arc<SessionStore>   (contexto por sessionId)
//! ```
//!
//! Não há fase de "modelo carregando": o dataset é lido na primeira
//! consulta, e `/status` apenas informa se isso já aconteceu.

use std::sync::Arc;

use crate::orchestrator::Orchestrator;

/// Estado compartilhado da aplicação Axum.
#[derive(Clone)]
pub struct AppState {
    /// Roteador de mensagens, compartilhado entre todas as requisições.
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self { orchestrator }
    }
}
