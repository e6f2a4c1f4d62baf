use std::fmt;
use std::io::Write;
use std::sync::Arc;

use log::{debug, info};
use services::{Clock, OpenTdbConfig, OpenTdbSource, QuizLoopService};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use trivia_core::model::{AnswerOutcome, ChoiceLabel, QuizState};
use trivia_core::{QuizSession, QuizSettings, ReanswerPolicy, SessionError};

const DEFAULT_SLOTS: usize = 4;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidValue { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidValue { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  trivia [--amount <n>] [--category <id>] [--difficulty <easy|medium|hard>]");
    eprintln!("         [--type <multiple|boolean>] [--slots <n>] [--seed <n>]");
    eprintln!("         [--shuffle-questions] [--keep-first-answer]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --amount 10 --slots {DEFAULT_SLOTS}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_API_URL, TRIVIA_AMOUNT, TRIVIA_CATEGORY, TRIVIA_DIFFICULTY, TRIVIA_TYPE");
    eprintln!("  RUST_LOG (e.g. RUST_LOG=debug)");
}

struct Args {
    source: OpenTdbConfig,
    settings: QuizSettings,
    slots: usize,
    seed: Option<u64>,
}

impl Args {
    /// Returns `Ok(None)` when usage was requested.
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut parsed = Self {
            source: OpenTdbConfig::from_env(),
            settings: QuizSettings::default(),
            slots: DEFAULT_SLOTS,
            seed: None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--amount" => {
                    let value = require_value(args, "--amount")?;
                    parsed.source.amount = parse_number(value, "--amount")?;
                }
                "--category" => {
                    let value = require_value(args, "--category")?;
                    parsed.source.category = Some(parse_number(value, "--category")?);
                }
                "--difficulty" => {
                    let value = require_value(args, "--difficulty")?;
                    let difficulty = value.parse().map_err(|_| ArgsError::InvalidValue {
                        flag: "--difficulty",
                        raw: value.clone(),
                    })?;
                    parsed.source.difficulty = Some(difficulty);
                }
                "--type" => {
                    let value = require_value(args, "--type")?;
                    let kind = value.parse().map_err(|_| ArgsError::InvalidValue {
                        flag: "--type",
                        raw: value.clone(),
                    })?;
                    parsed.source.kind = Some(kind);
                }
                "--slots" => {
                    let value = require_value(args, "--slots")?;
                    let slots: usize = parse_number(value.clone(), "--slots")?;
                    if slots == 0 {
                        return Err(ArgsError::InvalidValue {
                            flag: "--slots",
                            raw: value,
                        });
                    }
                    parsed.slots = slots;
                }
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    parsed.seed = Some(parse_number(value, "--seed")?);
                }
                "--shuffle-questions" => {
                    parsed.settings.shuffle_questions = true;
                }
                "--keep-first-answer" => {
                    parsed.settings.reanswer = ReanswerPolicy::KeepFirst;
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(parsed))
    }
}

type Input = Lines<BufReader<Stdin>>;

async fn read_input(input: &mut Input, prompt: &str) -> Result<Option<String>, std::io::Error> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

fn render_question(session: &QuizSession, slots: usize) -> Result<(), Box<dyn std::error::Error>> {
    let progress = session.progress();
    let question = session.current_question()?;

    println!();
    match question.category() {
        Some(category) => println!(
            "Question {}/{} ({category})",
            session.current_index() + 1,
            progress.total
        ),
        None => println!("Question {}/{}", session.current_index() + 1, progress.total),
    }
    println!("{}", question.prompt());

    let choices = session.current_choices()?;
    if choices.len() > slots {
        debug!("showing {slots} of {} choices", choices.len());
    }
    for choice in choices.iter().take(slots) {
        println!("  {}: {}", choice.label, choice.text);
    }
    Ok(())
}

fn render_outcome(outcome: &AnswerOutcome) {
    if outcome.is_correct {
        println!("Correct!");
    } else {
        println!(
            "Incorrect. The correct answer was: {}",
            outcome.correct_answer
        );
    }
}

/// What one line of user input asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pick {
    Quit,
    Next,
    Choice(ChoiceLabel),
    Retry,
}

/// Number of choices actually on screen: never more than the question has.
fn visible_choices(session: &QuizSession, slots: usize) -> Result<usize, SessionError> {
    Ok(session.current_choices()?.len().min(slots))
}

fn interpret(line: &str, visible: usize, allow_next: bool) -> Pick {
    if line.eq_ignore_ascii_case("q") {
        return Pick::Quit;
    }
    if line.is_empty() && allow_next {
        return Pick::Next;
    }
    match line.parse::<ChoiceLabel>() {
        Ok(label) if label.index() < visible => Pick::Choice(label),
        _ => Pick::Retry,
    }
}

/// Read user input until it maps to something other than `Pick::Retry`.
async fn pick_choice(
    input: &mut Input,
    visible: usize,
    allow_next: bool,
) -> Result<Pick, Box<dyn std::error::Error>> {
    let prompt = if allow_next {
        "Press Enter for the next question, or pick again: "
    } else {
        "Your answer: "
    };
    loop {
        let Some(line) = read_input(input, prompt).await? else {
            return Ok(Pick::Quit);
        };
        match interpret(&line, visible, allow_next) {
            Pick::Retry => println!("Pick one of the listed letters (or q to quit)."),
            pick => return Ok(pick),
        }
    }
}

async fn play(
    session: &mut QuizSession,
    input: &mut Input,
    slots: usize,
) -> Result<bool, Box<dyn std::error::Error>> {
    while session.state() == QuizState::Active {
        render_question(session, slots)?;
        let visible = visible_choices(session, slots)?;
        loop {
            let answered = session.last_result().is_some();
            match pick_choice(input, visible, answered).await? {
                Pick::Quit => return Ok(false),
                Pick::Next => break,
                Pick::Retry => {}
                Pick::Choice(label) => match session.submit_answer(label) {
                    Ok(outcome) => render_outcome(&outcome),
                    Err(SessionError::UnknownChoice(_)) => {
                        println!("Pick one of the listed letters (or q to quit).");
                    }
                    Err(err) => return Err(err.into()),
                },
            }
        }
        session.advance()?;
    }
    Ok(true)
}

fn render_summary(session: &QuizSession) {
    println!();
    println!("You've completed the trivia!");
    if let Some(summary) = session.summary() {
        println!(
            "Score: {}/{} ({} skipped) in {}s",
            summary.correct(),
            summary.total(),
            summary.skipped(),
            summary.elapsed().num_seconds()
        );
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let Some(args) = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    let amount = args.source.amount;
    let source = Arc::new(OpenTdbSource::new(args.source));
    let mut loop_svc = QuizLoopService::new(source, args.settings)
        .with_amount(amount)
        .with_clock(Clock::system());
    if let Some(seed) = args.seed {
        loop_svc = loop_svc.with_seed(seed);
    }

    let mut session = loop_svc.start_or_empty().await;
    if session.state() == QuizState::Empty {
        return Err("could not load trivia questions; see log output (RUST_LOG=error)".into());
    }
    info!("starting quiz with {} question(s)", session.total_questions());

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    if play(&mut session, &mut input, args.slots).await? {
        render_summary(&session);
    } else {
        let progress = session.progress();
        println!();
        println!("Stopped after {} answered ({} correct).", progress.answered, progress.correct);
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::{Difficulty, QuestionRecord};

    fn parse(args: &[&str]) -> Result<Option<Args>, ArgsError> {
        let mut iter = args.iter().map(|s| (*s).to_string());
        Args::parse(&mut iter)
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&[
            "--amount",
            "5",
            "--difficulty",
            "hard",
            "--slots",
            "2",
            "--keep-first-answer",
            "--shuffle-questions",
        ])
        .unwrap()
        .unwrap();

        assert_eq!(args.source.amount, 5);
        assert_eq!(args.source.difficulty, Some(Difficulty::Hard));
        assert_eq!(args.slots, 2);
        assert_eq!(args.settings.reanswer, ReanswerPolicy::KeepFirst);
        assert!(args.settings.shuffle_questions);
    }

    #[test]
    fn help_short_circuits() {
        assert!(parse(&["--help"]).unwrap().is_none());
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(matches!(
            parse(&["--amount"]),
            Err(ArgsError::MissingValue { flag: "--amount" })
        ));
        assert!(matches!(
            parse(&["--slots", "0"]),
            Err(ArgsError::InvalidValue { flag: "--slots", .. })
        ));
        assert!(matches!(
            parse(&["--type", "essay"]),
            Err(ArgsError::InvalidValue { flag: "--type", .. })
        ));
        assert!(matches!(parse(&["--wat"]), Err(ArgsError::UnknownArg(_))));
    }

    #[test]
    fn true_false_question_only_accepts_its_two_letters() {
        let mut session = QuizSession::with_seed(QuizSettings::default(), 4);
        session
            .initialize(vec![QuestionRecord::new("Sky blue?", "True", ["False"])])
            .unwrap();

        let visible = visible_choices(&session, DEFAULT_SLOTS).unwrap();
        assert_eq!(visible, 2);
        assert_eq!(interpret("c", visible, false), Pick::Retry);
        assert_eq!(interpret("d", visible, true), Pick::Retry);
        assert_eq!(
            interpret("b", visible, false),
            Pick::Choice(ChoiceLabel::new(1))
        );
        assert!(session.submit_answer(ChoiceLabel::new(1)).is_ok());
    }

    #[test]
    fn slots_cap_visible_choices() {
        let mut session = QuizSession::with_seed(QuizSettings::default(), 4);
        session
            .initialize(vec![QuestionRecord::new("2+2?", "4", ["3", "5", "22"])])
            .unwrap();

        let visible = visible_choices(&session, 2).unwrap();
        assert_eq!(visible, 2);
        assert_eq!(interpret("c", visible, false), Pick::Retry);
    }

    #[test]
    fn interpret_handles_quit_and_next() {
        assert_eq!(interpret("Q", 4, false), Pick::Quit);
        assert_eq!(interpret("", 4, true), Pick::Next);
        assert_eq!(interpret("", 4, false), Pick::Retry);
    }
}
