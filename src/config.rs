use crate::error::QuizResult;
use crate::store::{BankSource, DirBank, HttpBank};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct BankConfig {
    /// Directory holding questions_qa.json, questions_trace.json and questions_table.json
    #[arg(long, default_value = "data")]
    pub bank_dir: PathBuf,

    /// Fetch banks over HTTP from this base URL instead of --bank-dir
    #[arg(long)]
    pub bank_url: Option<String>,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            bank_dir: PathBuf::from("data"),
            bank_url: None,
        }
    }
}

impl BankConfig {
    pub fn source(&self) -> QuizResult<Box<dyn BankSource>> {
        let source: Box<dyn BankSource> = match &self.bank_url {
            Some(url) => Box::new(HttpBank::new(url.clone())?),
            None => Box::new(DirBank::new(&self.bank_dir)),
        };
        Ok(source)
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlayConfig {
    /// Seed for piece shuffling; omit for a fresh order every run
    #[arg(long)]
    pub seed: Option<u64>,
}
