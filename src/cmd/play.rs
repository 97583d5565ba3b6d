use crate::reports;
use clap::Args;
use std::io::{self, BufRead};
use strum::IntoEnumIterator;
use tracequiz::config::{BankConfig, PlayConfig};
use tracequiz::error::{QuizError, QuizResult};
use tracequiz::gesture::{GestureAdapter, GestureEvent, NoHitTest};
use tracequiz::model::QuizMode;
use tracequiz::quiz::{QuizSession, QuizView};
use tracequiz::shuffle;
use tracequiz::store::QuestionStore;
use tracequiz::trace_table::Piece;
use tracequiz::view::error_panel;
use tracing::{error, warn};

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// result, step-trace or trace-table; omit to pick from the menu
    pub mode: Option<QuizMode>,

    #[command(flatten)]
    pub bank: BankConfig,

    #[command(flatten)]
    pub play: PlayConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Place { variable: String, piece: usize },
    Remove(String),
    Confirm,
    Next,
    Answer(usize),
    Menu,
    Quit,
    Help,
}

enum Exit {
    Menu,
    Quit,
}

const HELP: &str =
    "commands: place <var> <piece#> | remove <var> | confirm | next | <letter> | menu | quit";

fn parse_command(line: &str) -> Option<Command> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["place", variable, piece] => Some(Command::Place {
            variable: variable.to_string(),
            piece: piece.parse().ok()?,
        }),
        ["remove", variable] => Some(Command::Remove(variable.to_string())),
        ["confirm"] => Some(Command::Confirm),
        ["next"] => Some(Command::Next),
        ["menu"] => Some(Command::Menu),
        ["quit"] | ["exit"] => Some(Command::Quit),
        ["help"] => Some(Command::Help),
        [letter] if letter.len() == 1 => {
            let c = letter.chars().next()?.to_ascii_lowercase();
            c.is_ascii_lowercase().then(|| Command::Answer((c as u8 - b'a') as usize))
        }
        _ => None,
    }
}

pub fn run(args: PlayArgs) -> QuizResult<()> {
    let source = args.bank.source()?;
    let mut rng = shuffle::make_rng(args.play.seed);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut pending = args.mode;

    loop {
        let mode = match pending.take() {
            Some(m) => m,
            None => match select_mode(&mut lines) {
                Some(m) => m,
                None => return Ok(()),
            },
        };

        let started = QuestionStore::load(source.as_ref(), mode)
            .and_then(|store| QuizSession::start(store, rng.fork()));
        let mut session = match started {
            Ok(s) => s,
            Err(e) => {
                error!("❌ {}", e);
                reports::print_error_panel(&error_panel(&e));
                continue;
            }
        };

        match play_session(&mut session, &mut lines) {
            Exit::Menu => continue,
            Exit::Quit => return Ok(()),
        }
    }
}

fn select_mode<I>(lines: &mut I) -> Option<QuizMode>
where
    I: Iterator<Item = io::Result<String>>,
{
    let names: Vec<String> = QuizMode::iter().map(|m| m.to_string()).collect();
    loop {
        reports::print_mode_menu(&names);
        let line = lines.next()?.ok()?;
        let choice = line.trim();
        if choice == "quit" || choice == "exit" {
            return None;
        }
        match choice.parse::<QuizMode>() {
            Ok(mode) => return Some(mode),
            Err(_) => warn!("unknown mode '{}'", choice),
        }
    }
}

fn play_session<I>(session: &mut QuizSession, lines: &mut I) -> Exit
where
    I: Iterator<Item = io::Result<String>>,
{
    // The terminal has no coordinates, so touch hit-testing never finds a slot;
    // text commands are replayed as pointer drags instead.
    let mut gestures = GestureAdapter::new(NoHitTest);

    loop {
        let view = session.view();
        reports::print_view(&view);
        let shown: Vec<Piece> = match &view {
            QuizView::TraceTable { view, .. } => view.available.clone(),
            _ => Vec::new(),
        };

        let Some(Ok(line)) = lines.next() else {
            return Exit::Quit;
        };
        let Some(command) = parse_command(&line) else {
            warn!("unrecognized command '{}'", line.trim());
            println!("{}", HELP);
            continue;
        };

        let outcome = match command {
            Command::Quit => return Exit::Quit,
            Command::Menu => return Exit::Menu,
            Command::Next if session.is_complete() => return Exit::Menu,
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Next => session.next(),
            Command::Answer(i) => session.answer(i).map(|_| ()),
            Command::Place { variable, piece } => {
                place(session, &mut gestures, &shown, &variable, piece)
            }
            Command::Remove(variable) => session
                .table_mut()
                .and_then(|engine| engine.remove(&variable))
                .map(|_| ()),
            Command::Confirm => session
                .table_mut()
                .and_then(|engine| engine.confirm().map(|_| ())),
        };

        if let Err(e) = outcome {
            warn!("rejected: {}", e);
            println!("⚠️  {}", e);
        }
    }
}

fn place(
    session: &mut QuizSession,
    gestures: &mut GestureAdapter<NoHitTest>,
    shown: &[Piece],
    variable: &str,
    number: usize,
) -> QuizResult<()> {
    let engine = session.table_mut()?;
    let piece = number
        .checked_sub(1)
        .and_then(|i| shown.get(i))
        .ok_or_else(|| QuizError::UnknownPiece(format!("#{}", number)))?;

    gestures.handle(GestureEvent::DragStart { piece: piece.id.clone() }, engine)?;
    gestures.handle(
        GestureEvent::DragOver {
            slot: Some(variable.to_string()),
        },
        engine,
    )?;
    gestures.handle(
        GestureEvent::Drop {
            slot: variable.to_string(),
        },
        engine,
    )?;
    Ok(())
}
