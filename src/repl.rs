//! # REPL — Chat Interativo no Terminal
//!
//! Lê uma mensagem por linha e imprime a resposta do assistente. Todas as
//! linhas usam o mesmo identificador de sessão, então "yes" / "next"
//! continuam a consulta anterior. `quit` (ou fim da entrada) encerra.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::core::Chapter;
use crate::orchestrator::Orchestrator;

fn banner() -> String {
    let chapters: String = Chapter::ALL
        .iter()
        .map(|c| format!("- {}\n", c))
        .collect();
    format!(
        "Welcome to the Digital Electronics Question Assistant!\n\
         \n\
         Available chapters:\n{chapters}\n\
         You can ask for questions by:\n\
         - Chapter name\n\
         - Difficulty level (low/medium/high)\n\
         - Marks (e.g., '5 marks')\n\
         - Frequency (yearly/frequent/occasional)\n\
         \n\
         Type 'quit' to exit.\n"
    )
}

/// Executa o laço de leitura até `quit` ou EOF.
///
/// Falhas de dataset são impressas e o laço continua; só erros de E/S do
/// terminal interrompem.
pub fn run<R: BufRead, W: Write>(
    orchestrator: &Orchestrator,
    session_id: &str,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "{}", banner()).context("falha ao escrever no terminal")?;

    let mut lines = input.lines();
    loop {
        write!(output, "You: ").context("falha ao escrever no terminal")?;
        output.flush().context("falha ao escrever no terminal")?;

        let Some(line) = lines.next() else { break };
        let line = line.context("falha ao ler do terminal")?;
        let text = line.trim();
        if text.eq_ignore_ascii_case("quit") {
            break;
        }
        if text.is_empty() {
            continue;
        }

        match orchestrator.process_message(session_id, text) {
            Ok(response) => writeln!(output, "\nAssistant: {}\n", response),
            Err(e) => {
                tracing::error!(error = %e, "Falha ao processar mensagem");
                writeln!(output, "\nError: {}\n", e)
            }
        }
        .context("falha ao escrever no terminal")?;
    }
    writeln!(output).context("falha ao escrever no terminal")?;
    Ok(())
}
