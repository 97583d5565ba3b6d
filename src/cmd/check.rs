use crate::reports;
use clap::Args;
use strum::IntoEnumIterator;
use tracequiz::config::BankConfig;
use tracequiz::error::QuizResult;
use tracequiz::model::QuizMode;
use tracequiz::store::QuestionStore;
use tracing::error;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub bank: BankConfig,
}

/// Loads every mode's bank and reports what would block a learner.
pub fn run(args: CheckArgs) -> QuizResult<()> {
    let source = args.bank.source()?;
    let mut rows = Vec::new();
    let mut first_err = None;

    println!("\n🔎 === BANK CHECK === 🔎");
    for mode in QuizMode::iter() {
        let location = source.locate(mode);
        match QuestionStore::load(source.as_ref(), mode) {
            Ok(store) => {
                let units = store.iter().map(|q| q.rows.len() + q.steps.len()).sum();
                rows.push((mode.to_string(), location, store.len(), units, Ok(())));
            }
            Err(e) => {
                error!("{} bank: {}", mode, e);
                rows.push((mode.to_string(), location, 0, 0, Err(e.to_string())));
                first_err.get_or_insert(e);
            }
        }
    }

    reports::print_bank_summary(&rows);
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
