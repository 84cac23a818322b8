//! # Erros do Assistente
//!
//! Só existe uma falha de verdade no fluxo de uma mensagem: o dataset não
//! pôde ser lido. "Nenhuma questão encontrada" e "capítulo não reconhecido"
//! são respostas normais do chat, não erros.

use std::path::PathBuf;

/// Falha ao carregar o dataset JSONL. Fatal para a requisição corrente.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Arquivo inexistente ou ilegível.
    #[error("falha ao ler dataset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Linha que não é um registro JSON válido.
    #[error("linha {line} malformada em {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
