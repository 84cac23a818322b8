//! # Configuração — Linha de Comando e Variáveis de Ambiente
//!
//! Todas as opções podem vir da linha de comando ou do ambiente:
//!
//! | Flag | Variável | Padrão |
//! |------|----------|--------|
//! | `--dataset` | `DATASET_PATH` | `updated_instruction_dataset.jsonl` |
//! | `--session-idle-minutes` | `SESSION_IDLE_MINUTES` | `30` |
//! | `--seed` | `CHAT_SEED` | aleatória |
//! | `serve --addr` | `BIND_ADDR` | `0.0.0.0:8000` |
//! | `repl --session` | — | `repl` |
//!
//! Sem subcomando, o servidor HTTP é iniciado.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub const DEFAULT_DATASET: &str = "updated_instruction_dataset.jsonl";
pub const DEFAULT_ADDR: &str = "0.0.0.0:8000";

#[derive(Parser, Debug)]
#[command(
    name = "exam-chat",
    version,
    about = "Digital Electronics exam practice assistant"
)]
pub struct Config {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// JSONL dataset with exam questions
    #[arg(long, env = "DATASET_PATH", default_value = DEFAULT_DATASET)]
    pub dataset: PathBuf,

    /// Minutes without activity before a session is discarded
    #[arg(long, env = "SESSION_IDLE_MINUTES", default_value_t = 30)]
    pub session_idle_minutes: u32,

    /// Fixed seed for question order and phrasing
    #[arg(long, env = "CHAT_SEED")]
    pub seed: Option<u64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the HTTP chat API (default)
    Serve {
        /// Address to bind
        #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_ADDR)]
        addr: String,
    },
    /// Interactive chat on the terminal
    Repl {
        /// Session id used for every line
        #[arg(long, default_value = "repl")]
        session: String,
    },
}

impl Config {
    /// Subcomando efetivo: `serve` com o endereço padrão quando omitido.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_else(|| Command::Serve {
            addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
        })
    }

    pub fn session_idle_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session_idle_minutes))
    }
}
