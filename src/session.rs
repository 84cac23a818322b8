//! # Sessões — Contexto de Follow-up por Conversa
//!
//! Cada conversa tem um [`SessionContext`] que lembra o último resultado
//! servido, para que "yes" / "next" mostre a próxima questão.
//!
//! ## Máquina de Estados
//!
//! ```text
//!            update(label, matches)            next() até cursor == len
//!  ┌───────┐ ───────────────────────▶ ┌────────┐ ────────────────────▶ ┌───────────┐
//!  │ Empty │                          │ Active │                       │ Exhausted │
//!  └───────┘ ◀─────────────────────── └────────┘ ◀──── clear() ─────── └───────────┘
//!                  clear()
//! ```
//!
//! - `cursor` conta quantas questões já foram mostradas: `update()` começa
//!   em 1 porque o chamador já exibiu a primeira.
//! - `Exhausted` mantém rótulo e resultados para a mensagem de "acabou".
//!
//! ## Isolamento
//!
//! O [`SessionStore`] guarda um contexto por identificador de conversa
//! fornecido pelo chamador. Duas conversas nunca compartilham cursor.
//! Entradas ociosas além do TTL são removidas por [`SessionStore::evict_idle`].

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::core::{MatchSet, QuestionRecord};

/// Contexto ativo: rótulo do escopo, resultados e cursor.
#[derive(Clone, Debug)]
struct ActiveContext {
    /// Nome do capítulo, ou "all chapters" para consultas só por ano.
    label: String,
    matches: MatchSet,
    /// Invariante: `1 <= cursor <= matches.len()`.
    cursor: usize,
}

/// Resultado de um pedido de "próxima questão".
#[derive(Debug, PartialEq)]
pub enum FollowUp<'a> {
    /// Próxima questão; `remaining` indica se ainda há outras depois dela.
    Next {
        label: &'a str,
        record: &'a QuestionRecord,
        remaining: bool,
    },
    /// Todas as questões do contexto já foram mostradas.
    Exhausted { label: &'a str },
}

/// Estado de follow-up de uma conversa.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    active: Option<ActiveContext>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` quando há resultados para continuar (Active ou Exhausted).
    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|a| !a.matches.is_empty())
    }

    /// `true` quando todas as questões do contexto já foram mostradas.
    pub fn is_exhausted(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.cursor >= a.matches.len())
    }

    /// Rótulo do contexto ativo.
    pub fn active_chapter(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.label.as_str())
    }

    /// Quantas questões já foram mostradas (0 quando vazio).
    pub fn cursor(&self) -> usize {
        self.active.as_ref().map_or(0, |a| a.cursor)
    }

    /// Entra em `Active` com a primeira questão considerada já exibida.
    ///
    /// Um `MatchSet` vazio equivale a [`clear()`](Self::clear).
    pub fn update(&mut self, label: impl Into<String>, matches: MatchSet) {
        if matches.is_empty() {
            self.active = None;
            return;
        }
        self.active = Some(ActiveContext {
            label: label.into(),
            matches,
            cursor: 1,
        });
    }

    /// Volta para `Empty`.
    pub fn clear(&mut self) {
        self.active = None;
    }

    /// Serve a próxima questão, ou informa exaustão.
    ///
    /// `None` quando a sessão está vazia.
    pub fn next(&mut self) -> Option<FollowUp<'_>> {
        let active = self.active.as_mut().filter(|a| !a.matches.is_empty())?;
        if active.cursor >= active.matches.len() {
            return Some(FollowUp::Exhausted {
                label: &active.label,
            });
        }
        let idx = active.cursor;
        active.cursor += 1;
        let active: &ActiveContext = active;
        let remaining = active.cursor < active.matches.len();
        let record = active.matches.get(idx)?;
        Some(FollowUp::Next {
            label: &active.label,
            record,
            remaining,
        })
    }
}

/// Entrada do store: contexto + instante da última atividade.
struct SessionEntry {
    context: SessionContext,
    last_seen: DateTime<Utc>,
}

/// Contextos de sessão indexados pelo identificador da conversa.
///
/// Compartilhado entre handlers via `Arc<SessionStore>`; o lock é
/// mantido só durante a closure de [`with_session`](Self::with_session).
pub struct SessionStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Executa `f` sobre o contexto de `session_id`, criando-o se preciso,
    /// e marca a sessão como ativa agora.
    pub fn with_session<T>(&self, session_id: &str, f: impl FnOnce(&mut SessionContext) -> T) -> T {
        let mut sessions = self.sessions.lock();
        let entry = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session = session_id, "Nova sessão criada");
                SessionEntry {
                    context: SessionContext::new(),
                    last_seen: Utc::now(),
                }
            });
        entry.last_seen = Utc::now();
        f(&mut entry.context)
    }

    /// Cópia do contexto atual, sem criar nem tocar a sessão.
    pub fn snapshot(&self, session_id: &str) -> Option<SessionContext> {
        self.sessions
            .lock()
            .get(session_id)
            .map(|e| e.context.clone())
    }

    /// Remove sessões sem atividade há mais que o TTL.
    ///
    /// # Retorno
    ///
    /// Quantidade de sessões removidas.
    pub fn evict_idle(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock();
        let before = sessions.len();
        sessions.retain(|_, e| now - e.last_seen <= self.idle_ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = sessions.len(), "Sessões ociosas removidas");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
