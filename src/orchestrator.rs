//! # Orquestrador — Roteamento de Intenções
//!
//! O [`Orchestrator`] recebe cada mensagem com o identificador da conversa e
//! decide qual caminho ela segue. A primeira regra que casar vence:
//!
//! ```text
//! Mensagem do Usuário (session_id, texto)
//!   │
//!   ├── 1. 👋 Greeting / About
//!   │   └── resposta fixa — sessão NÃO é lida nem alterada
//!   │
//!   ├── 2. 🔁 Follow-up (Affirmative + sessão ativa)
//!   │   └── próxima questão do MatchSet em cache, ou "acabou"
//!   │
//!   └── 3. 🔎 Nova consulta (limpa a sessão antes)
//!       ├── ano sem capítulo → busca em todos os capítulos
//!       ├── sem capítulo     → pede um capítulo
//!       └── com capítulo     → busca filtrada → primeira questão
//! ```
//!
//! ## Estado
//!
//! O orquestrador em si não guarda estado de conversa: o contexto de cada
//! conversa vive no [`SessionStore`] injetado. A fonte aleatória (ordem dos
//! resultados e escolha de templates) também é injetada, para que testes
//! possam fixar uma semente.

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::composer::Composer;
use crate::error::DatasetError;
use crate::nlu::intent::Intent;
use crate::nlu::NluPipeline;
use crate::persistence::DatasetStore;
use crate::session::{FollowUp, SessionContext, SessionStore};

/// Rótulo do contexto de uma consulta só por ano.
const ALL_CHAPTERS_LABEL: &str = "all chapters";

/// Roteador de mensagens do chat.
///
/// Todos os métodos recebem `&self`: pode ser compartilhado via `Arc`
/// entre handlers concorrentes.
pub struct Orchestrator {
    nlu: Arc<NluPipeline>,
    composer: Composer,
    dataset: Arc<DatasetStore>,
    sessions: Arc<SessionStore>,
    rng: Mutex<StdRng>,
}

impl Orchestrator {
    /// Cria um orquestrador com fonte aleatória semeada pelo sistema.
    pub fn new(
        nlu: Arc<NluPipeline>,
        dataset: Arc<DatasetStore>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self::with_rng(nlu, dataset, sessions, StdRng::from_entropy())
    }

    /// Cria um orquestrador com fonte aleatória explícita.
    pub fn with_rng(
        nlu: Arc<NluPipeline>,
        dataset: Arc<DatasetStore>,
        sessions: Arc<SessionStore>,
        rng: StdRng,
    ) -> Self {
        Self {
            nlu,
            composer: Composer::new(),
            dataset,
            sessions,
            rng: Mutex::new(rng),
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn dataset(&self) -> &Arc<DatasetStore> {
        &self.dataset
    }

    /// Processa uma mensagem e devolve a resposta do assistente.
    ///
    /// # Erros
    ///
    /// Só falha quando uma nova consulta precisa do dataset e ele não pode
    /// ser carregado. Saudações e follow-ups nunca tocam o disco.
    pub fn process_message(&self, session_id: &str, user_text: &str) -> Result<String, DatasetError> {
        let text = self.nlu.normalize(user_text);

        match self.nlu.classify_intent(&text) {
            Intent::Greeting => return Ok(self.composer.greeting(&mut *self.rng.lock())),
            Intent::About(topic) => return Ok(self.composer.about(topic)),
            Intent::Affirmative => {
                let follow_up = self
                    .sessions
                    .with_session(session_id, |ctx| self.handle_follow_up(ctx));
                if let Some(response) = follow_up {
                    tracing::debug!(session = session_id, "Follow-up servido");
                    return Ok(response);
                }
            }
            Intent::Query => {}
        }

        self.handle_query(session_id, &text)
    }

    /// Serve a próxima questão do contexto; `None` se a sessão estiver vazia.
    ///
    /// Chamado com o lock da sessão; o rng é travado depois (ordem
    /// sessões → rng, nunca o inverso).
    fn handle_follow_up(&self, ctx: &mut SessionContext) -> Option<String> {
        match ctx.next()? {
            FollowUp::Next {
                label,
                record,
                remaining,
            } => Some(
                self.composer
                    .follow_up_next(&mut *self.rng.lock(), label, record, remaining),
            ),
            FollowUp::Exhausted { label } => Some(self.composer.follow_up_exhausted(label)),
        }
    }

    /// Nova consulta estruturada. Sempre começa limpando a sessão.
    ///
    /// A carga do dataset acontece sem o rng travado; ele só é usado no
    /// embaralhamento e na escolha do template.
    fn handle_query(&self, session_id: &str, text: &str) -> Result<String, DatasetError> {
        self.sessions.with_session(session_id, |ctx| ctx.clear());

        let dataset = self.dataset.get()?;
        let filters = self.nlu.extract_filters(text);

        let Some(chapter) = filters.chapter else {
            // ─── Sem capítulo: só ano, ou pedir capítulo ─────────
            let Some(year) = filters.year.as_deref() else {
                return Ok(self.composer.chapter_prompt());
            };

            let (matches, response) = {
                let mut rng = self.rng.lock();
                let matches = dataset.select(&filters, &mut *rng);
                let response = matches
                    .first()
                    .map(|first| self.composer.year_match(&mut *rng, year, first, matches.len() > 1));
                (matches, response)
            };
            tracing::info!(session = session_id, year, matches = matches.len(), "Consulta por ano");
            let Some(response) = response else {
                return Ok(self.composer.no_year_match(year));
            };
            self.sessions
                .with_session(session_id, |ctx| ctx.update(ALL_CHAPTERS_LABEL, matches));
            return Ok(response);
        };

        // ─── Consulta por capítulo ───────────────────────────────
        let show_year = filters.year.is_some() || text.to_lowercase().contains("year");
        let (matches, response) = {
            let mut rng = self.rng.lock();
            let matches = dataset.select(&filters, &mut *rng);
            let response = matches.first().map(|first| {
                self.composer
                    .chapter_match(&mut *rng, chapter, first, show_year, matches.len() > 1)
            });
            (matches, response)
        };
        tracing::info!(
            session = session_id,
            chapter = %chapter,
            matches = matches.len(),
            "Consulta por capítulo"
        );
        let Some(response) = response else {
            return Ok(self.composer.no_match(chapter, &filters));
        };

        self.sessions
            .with_session(session_id, |ctx| ctx.update(chapter.name(), matches));
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::tests::sample;
    use crate::core::Chapter;
    use chrono::Duration;

    fn orchestrator(seed: u64) -> Orchestrator {
        Orchestrator::with_rng(
            Arc::new(NluPipeline::new()),
            Arc::new(DatasetStore::preloaded(sample())),
            Arc::new(SessionStore::new(Duration::minutes(30))),
            StdRng::seed_from_u64(seed),
        )
    }

    const BINARY_MEDIUM: [(&str, &str); 2] = [
        ("Convert (1011)2 to decimal.", "[5 marks"),
        ("Explain 2's complement representation.", "[10 marks"),
    ];

    fn which_binary_medium(response: &str) -> usize {
        BINARY_MEDIUM
            .iter()
            .position(|(q, m)| response.contains(q) && response.contains(m))
            .unwrap_or_else(|| panic!("resposta sem questão esperada: {response}"))
    }

    #[test]
    fn medium_binary_query_then_follow_ups() {
        let o = orchestrator(17);

        let first = o
            .process_message("s1", "Give me a medium question from Binary System")
            .unwrap();
        let first_idx = which_binary_medium(&first);
        assert!(!first.ends_with("\n\n"), "deveria oferecer mais questões");

        let second = o.process_message("s1", "yes").unwrap();
        let second_idx = which_binary_medium(&second);
        assert_ne!(first_idx, second_idx);
        assert!(second.ends_with("Would you like to try questions from a different chapter?"));

        let third = o.process_message("s1", "yes").unwrap();
        assert_eq!(
            third,
            "I've shown you all the questions I have from Binary System. Would you like to try questions from a different chapter?"
        );
    }

    #[test]
    fn greeting_never_touches_the_session() {
        let o = orchestrator(3);
        o.process_message("s1", "Give me a medium question from Binary System")
            .unwrap();
        let before = o.sessions().snapshot("s1").unwrap();

        let reply = o.process_message("s1", "hello").unwrap();
        assert!(Composer::greetings().contains(&reply));

        let after = o.sessions().snapshot("s1").unwrap();
        assert_eq!(before.cursor(), after.cursor());
        assert_eq!(after.active_chapter(), Some("Binary System"));

        // sessão inexistente também não é criada por uma saudação
        o.process_message("ghost", "hi").unwrap();
        assert!(o.sessions().snapshot("ghost").is_none());
    }

    #[test]
    fn sessions_do_not_share_cursors() {
        let o = orchestrator(8);
        o.process_message("a", "medium binary question").unwrap();
        o.process_message("b", "medium binary question").unwrap();

        o.process_message("a", "next").unwrap();
        let a_done = o.process_message("a", "next").unwrap();
        assert!(a_done.starts_with("I've shown you all the questions"));

        let b_next = o.process_message("b", "next").unwrap();
        assert!(!b_next.starts_with("I've shown you all the questions"));
        which_binary_medium(&b_next);
    }

    #[test]
    fn year_only_query_spans_all_chapters() {
        let o = orchestrator(21);
        let reply = o.process_message("y", "questions from 2023").unwrap();
        assert!(Composer::year_openings("2023")
            .iter()
            .any(|p| reply.starts_with(p.as_str())));
        assert!(reply.contains("Chapter: "));

        let next = o.process_message("y", "ok").unwrap();
        assert!(Composer::follow_up_openings("all chapters")
            .iter()
            .any(|p| next.starts_with(p.as_str())));
        assert_eq!(
            o.sessions().snapshot("y").unwrap().active_chapter(),
            Some("all chapters")
        );
    }

    #[test]
    fn year_without_matches() {
        let o = orchestrator(2);
        assert_eq!(
            o.process_message("y", "anything from 2005?").unwrap(),
            "I couldn't find any questions from the 2005 exam. Would you like to try a different year or specify a chapter?"
        );
    }

    #[test]
    fn unknown_topic_prompts_for_a_chapter_and_clears_context() {
        let o = orchestrator(4);
        o.process_message("s", "medium binary question").unwrap();
        assert!(o.sessions().snapshot("s").unwrap().is_active());

        let reply = o.process_message("s", "tell me something").unwrap();
        assert_eq!(reply, Composer::new().chapter_prompt());
        assert!(!o.sessions().snapshot("s").unwrap().is_active());
    }

    #[test]
    fn affirmative_without_context_is_a_new_query() {
        let o = orchestrator(4);
        assert_eq!(
            o.process_message("fresh", "yes").unwrap(),
            Composer::new().chapter_prompt()
        );
    }

    #[test]
    fn no_match_explains_the_filters() {
        let o = orchestrator(6);
        let reply = o
            .process_message("s", "a high question from sequential logic")
            .unwrap();
        assert_eq!(
            reply,
            "I couldn't find any questions from Sequential Logic matching difficulty level 'high'. Would you like me to show you other questions from this chapter?"
        );
        assert!(!o.sessions().snapshot("s").unwrap().is_active());
    }

    #[test]
    fn year_in_a_chapter_query_is_shown() {
        let o = orchestrator(9);
        let reply = o.process_message("s", "binary question from 2023").unwrap();
        assert!(reply.contains("Convert (1011)2 to decimal. [5 marks, appeared in 2023]"));
        // um único resultado: nenhum convite para continuar
        assert!(reply.ends_with("]\n\n"));
    }

    #[test]
    fn same_seed_same_conversation() {
        let a = orchestrator(99);
        let b = orchestrator(99);
        for msg in ["hello", "a 5 marks question", "binary", "yes", "yes"] {
            assert_eq!(
                a.process_message("s", msg).unwrap(),
                b.process_message("s", msg).unwrap()
            );
        }
    }

    #[test]
    fn dataset_failure_surfaces_only_for_queries() {
        let o = Orchestrator::with_rng(
            Arc::new(NluPipeline::new()),
            Arc::new(DatasetStore::new("/nonexistent/dataset.jsonl")),
            Arc::new(SessionStore::new(Duration::minutes(30))),
            StdRng::seed_from_u64(1),
        );
        assert!(o.process_message("s", "hello").is_ok());
        assert!(matches!(
            o.process_message("s", "binary please"),
            Err(DatasetError::Io { .. })
        ));
    }

    #[test]
    fn chapter_label_is_the_canonical_name() {
        let o = orchestrator(12);
        o.process_message("s", "logic gates").unwrap();
        assert_eq!(
            o.sessions().snapshot("s").unwrap().active_chapter(),
            Some(Chapter::BooleanAlgebra.name())
        );
    }

    #[test]
    fn oversized_marks_are_reported_not_dropped() {
        let o = orchestrator(5);
        assert_eq!(
            o.process_message("s", "binary 99999999999 marks").unwrap(),
            "I couldn't find any questions from Binary System matching 99999999999 marks. Would you like me to show you other questions from this chapter?"
        );
        assert!(!o.sessions().snapshot("s").unwrap().is_active());
    }

    #[test]
    fn dataset_load_does_not_wait_for_the_rng() {
        let o = Arc::new(Orchestrator::with_rng(
            Arc::new(NluPipeline::new()),
            Arc::new(DatasetStore::new("/nonexistent/dataset.jsonl")),
            Arc::new(SessionStore::new(Duration::minutes(30))),
            StdRng::seed_from_u64(1),
        ));

        // outra requisição segurando o rng
        let guard = o.rng.lock();
        let (tx, rx) = std::sync::mpsc::channel();
        let worker = Arc::clone(&o);
        std::thread::spawn(move || {
            let load_failed = worker.process_message("s", "binary please").is_err();
            let about = worker.process_message("s", "help").is_ok();
            let _ = tx.send((load_failed, about));
        });

        let outcome = rx.recv_timeout(std::time::Duration::from_secs(5));
        drop(guard);
        assert_eq!(outcome, Ok((true, true)));
    }
}
