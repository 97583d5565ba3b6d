use crate::error::{FetchError, QuizError, QuizResult};
use crate::model::{QuizMode, Question};
use reqwest::blocking::Client;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Where question banks come from.
pub trait BankSource {
    /// Raw JSON text of the bank serving `mode`.
    fn fetch(&self, mode: QuizMode) -> Result<String, FetchError>;

    /// Human-readable location, for logs.
    fn locate(&self, mode: QuizMode) -> String;
}

/// Banks stored as static files in one directory.
#[derive(Debug, Clone)]
pub struct DirBank {
    root: PathBuf,
}

impl DirBank {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, mode: QuizMode) -> PathBuf {
        self.root.join(mode.resource())
    }
}

impl BankSource for DirBank {
    fn fetch(&self, mode: QuizMode) -> Result<String, FetchError> {
        let path = self.path_for(mode);
        fs::read_to_string(&path).map_err(|source| FetchError::Io { path, source })
    }

    fn locate(&self, mode: QuizMode) -> String {
        self.path_for(mode).display().to_string()
    }
}

/// Banks served over HTTP under a base URL. One GET per load, no retry.
#[derive(Debug, Clone)]
pub struct HttpBank {
    base_url: String,
    client: Client,
}

impl HttpBank {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self {
            base_url: base_url.into(),
            client: Client::builder().build()?,
        })
    }

    pub fn url_for(&self, mode: QuizMode) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), mode.resource())
    }
}

impl BankSource for HttpBank {
    fn fetch(&self, mode: QuizMode) -> Result<String, FetchError> {
        let url = self.url_for(mode);
        let response = self.client.get(&url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }

    fn locate(&self, mode: QuizMode) -> String {
        self.url_for(mode)
    }
}

/// The validated questions of one mode, immutable once loaded.
#[derive(Debug, Clone)]
pub struct QuestionStore {
    mode: QuizMode,
    questions: Vec<Arc<Question>>,
}

impl QuestionStore {
    /// Fetches, parses and checks the bank for `mode`.
    pub fn load(source: &dyn BankSource, mode: QuizMode) -> QuizResult<Self> {
        info!("📂 Loading {} bank: {}", mode, source.locate(mode));
        let body = source.fetch(mode)?;
        let store = Self::parse(mode, &body)?;
        if store.is_empty() {
            warn!("{} bank is empty", mode);
            return Err(QuizError::EmptyBank(mode));
        }
        Ok(store)
    }

    pub fn parse(mode: QuizMode, json: &str) -> QuizResult<Self> {
        let questions: Vec<Question> = serde_json::from_str(json).map_err(FetchError::Parse)?;
        Self::from_questions(mode, questions)
    }

    pub fn from_questions(mode: QuizMode, questions: Vec<Question>) -> QuizResult<Self> {
        let mut ids = HashSet::new();
        for q in &questions {
            q.validate()?;
            if !q.id.is_empty() && !ids.insert(q.id.clone()) {
                return Err(QuizError::Integrity {
                    question: q.id.clone(),
                    detail: "duplicate question id".to_string(),
                });
            }
        }
        info!("   -> {} {} questions", questions.len(), mode);
        Ok(Self {
            mode,
            questions: questions.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Question>> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Question>> {
        self.questions.iter()
    }
}
