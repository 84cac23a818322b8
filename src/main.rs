#![allow(dead_code)]
//! # Exam Chat — Assistente de Questões de Eletrônica Digital
//!
//! **Ponto de entrada** da aplicação. Monta os componentes compartilhados e
//! executa um de dois modos:
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging (RUST_LOG, padrão "info")
//!   ├── Lê configuração (clap: flags + ambiente)
//!   ├── Monta DatasetStore, SessionStore, NluPipeline, Orchestrator
//!   └── Modo:
//!       ├── serve (padrão)
//!       │   ├── Pré-carrega o dataset (falha → warn, tenta de novo na 1ª consulta)
//!       │   ├── Spawn: varredura periódica de sessões ociosas
//!       │   └── axum::serve em BIND_ADDR
//!       └── repl
//!           └── laço stdin/stdout em spawn_blocking
//! ```
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Servidor HTTP em 0.0.0.0:8000
//! DATASET_PATH=data/questions.jsonl cargo run
//!
//! # Chat no terminal, com logs detalhados
//! RUST_LOG=debug cargo run -- repl
//! ```

mod composer;
mod config;
mod core;
mod error;
mod nlu;
mod orchestrator;
mod persistence;
mod repl;
mod session;
mod web;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use crate::config::{Command, Config};
use crate::nlu::NluPipeline;
use crate::orchestrator::Orchestrator;
use crate::persistence::DatasetStore;
use crate::session::SessionStore;
use crate::web::state::AppState;

/// Intervalo entre varreduras de sessões ociosas.
const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let dataset = Arc::new(DatasetStore::new(&config.dataset));
    let sessions = Arc::new(SessionStore::new(config.session_idle_ttl()));
    let nlu = Arc::new(NluPipeline::new());
    let orchestrator = Arc::new(match config.seed {
        Some(seed) => {
            tracing::info!(seed, "Usando semente fixa");
            Orchestrator::with_rng(nlu, dataset.clone(), sessions.clone(), StdRng::seed_from_u64(seed))
        }
        None => Orchestrator::new(nlu, dataset.clone(), sessions.clone()),
    });

    match config.command() {
        Command::Serve { addr } => serve(orchestrator, &addr).await,
        Command::Repl { session } => {
            tokio::task::spawn_blocking(move || {
                let stdin = std::io::stdin();
                repl::run(&orchestrator, &session, stdin.lock(), std::io::stdout())
            })
            .await
            .context("REPL encerrado inesperadamente")?
        }
    }
}

/// Servidor HTTP com varredura periódica de sessões ociosas.
async fn serve(orchestrator: Arc<Orchestrator>, addr: &str) -> Result<()> {
    tracing::info!("📚 Exam Chat — Starting...");

    // O servidor sobe mesmo sem dataset: a próxima consulta tenta de novo.
    let store = orchestrator.dataset();
    match store.get() {
        Ok(ds) => tracing::info!(
            path = %store.path().display(),
            questions = ds.len(),
            "Dataset pronto"
        ),
        Err(e) => tracing::warn!(
            path = %store.path().display(),
            error = %e,
            "Dataset indisponível, nova tentativa na primeira consulta"
        ),
    }

    let sessions = orchestrator.sessions().clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(EVICTION_INTERVAL);
        loop {
            ticker.tick().await;
            sessions.evict_idle(chrono::Utc::now());
        }
    });

    let app = web::create_router(AppState::new(orchestrator));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("falha ao abrir {addr}"))?;
    tracing::info!("🚀 Server running at http://{addr}");

    axum::serve(listener, app).await.context("servidor HTTP falhou")?;
    Ok(())
}
