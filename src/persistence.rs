//! # Persistência — Carga do Dataset JSONL em Disco
//!
//! O [`DatasetStore`] lê o arquivo JSONL na primeira consulta e mantém o
//! [`Dataset`] em cache para o processo inteiro. O dataset é imutável,
//! então o mesmo `Arc<Dataset>` é compartilhado entre todas as requisições.
//!
//! ## Falhas
//!
//! Uma carga que falha **não** é cacheada: a requisição corrente recebe o
//! [`DatasetError`] e a próxima tenta ler o arquivo de novo.
//!
//! ```text
//! get()
//!   ├── cache preenchido → Arc clone
//!   └── vazio → lê arquivo
//!       ├── Ok  → preenche cache
//!       └── Err → propaga (cache continua vazio)
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::core::Dataset;
use crate::error::DatasetError;

/// Lê o dataset JSONL de `path`.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Dataset::from_reader(BufReader::new(file), path)
}

/// Fonte do dataset com carga preguiçosa e cache.
pub struct DatasetStore {
    path: PathBuf,
    cached: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetStore {
    /// Store apontando para um arquivo, ainda não carregado.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: RwLock::new(None),
        }
    }

    /// Store já preenchido, usado em testes e quando o dataset vem de
    /// outra origem.
    pub fn preloaded(dataset: Dataset) -> Self {
        Self {
            path: PathBuf::from("<memória>"),
            cached: RwLock::new(Some(Arc::new(dataset))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Dataset em cache, carregando do disco se necessário.
    ///
    /// # Erros
    ///
    /// [`DatasetError`] se o arquivo não existir ou tiver linha malformada.
    pub fn get(&self) -> Result<Arc<Dataset>, DatasetError> {
        if let Some(dataset) = self.cached.read().as_ref() {
            return Ok(dataset.clone());
        }

        let mut cached = self.cached.write();
        // outra thread pode ter carregado enquanto esperávamos o lock
        if let Some(dataset) = cached.as_ref() {
            return Ok(dataset.clone());
        }

        let dataset = Arc::new(load_dataset(&self.path)?);
        tracing::info!(
            path = %self.path.display(),
            questions = dataset.len(),
            "Dataset carregado do disco"
        );
        *cached = Some(dataset.clone());
        Ok(dataset)
    }

    /// Quantidade de questões, se o dataset já estiver carregado.
    pub fn loaded_len(&self) -> Option<usize> {
        self.cached.read().as_ref().map(|d| d.len())
    }
}
