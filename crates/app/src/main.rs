use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::{ImageOrigin, Question};
use services::{ContentGateway, GeminiConfig, GeminiGateway, QuizSettings, illustrate};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

const WINDOW_TITLE: &str = "English Vocabulary Challenge";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidQuestionCount { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidQuestionCount { raw } => {
                write!(f, "invalid --questions value: {raw} (expected a positive number)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Preview,
    Help,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "preview" => Some(Self::Preview),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    command: Command,
    /// Overrides `QUIZ_QUESTION_COUNT` when set.
    question_count: Option<usize>,
}

impl Args {
    fn parse(argv: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut args = argv.into_iter().peekable();

        // No subcommand launches the UI.
        let command = match args.peek().map(String::as_str) {
            None => Command::Ui,
            Some(first) if first.starts_with('-') => Command::Ui,
            Some(first) => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?;
                args.next();
                command
            }
        };

        let mut question_count = None;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--questions" | "-n" => {
                    let raw = args.next().ok_or(ArgsError::MissingValue {
                        flag: "--questions",
                    })?;
                    let count = raw
                        .parse::<usize>()
                        .ok()
                        .filter(|count| *count > 0)
                        .ok_or(ArgsError::InvalidQuestionCount { raw })?;
                    question_count = Some(count);
                }
                "--help" | "-h" => {
                    return Ok(Self {
                        command: Command::Help,
                        question_count: None,
                    });
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            command,
            question_count,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [ui]    [--questions <n>]");
    eprintln!("  cargo run -p app -- preview [--questions <n>]  # generate one batch and print it");
    eprintln!();
    eprintln!("Environment (a .env file in the working directory is loaded first):");
    eprintln!("  QUIZ_AI_API_KEY (or GEMINI_API_KEY)  required for generation");
    eprintln!("  QUIZ_AI_BASE_URL, QUIZ_AI_TEXT_MODEL, QUIZ_AI_IMAGE_MODEL, QUIZ_AI_TIMEOUT_SECS");
    eprintln!("  QUIZ_QUESTION_COUNT (default 3), QUIZ_PLACEHOLDER_IMAGE");
    eprintln!("  QUIZ_LOG (or RUST_LOG) log filter, default info");
}

fn init_tracing() {
    let level = std::env::var("QUIZ_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(log_fmt::layer().with_target(true))
        .try_init();
}

struct DesktopApp {
    gateway: Arc<GeminiGateway>,
}

impl UiApp for DesktopApp {
    fn gateway(&self) -> Arc<dyn ContentGateway> {
        self.gateway.clone()
    }
}

fn build_gateway(question_count: Option<usize>) -> GeminiGateway {
    let mut settings = QuizSettings::from_env();
    if let Some(count) = question_count {
        settings = settings.with_question_count(count);
    }
    let config = GeminiConfig::from_env();
    if config.is_none() {
        warn!("no API key configured; quiz generation will fail until one is set");
    }
    GeminiGateway::new(config, settings)
}

fn launch_ui(gateway: GeminiGateway) {
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        gateway: Arc::new(gateway),
    });
    let context = build_app_context(&app);

    // Some dev setups default to an always-on-top window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

async fn preview(gateway: GeminiGateway) -> Result<(), Box<dyn std::error::Error>> {
    let questions = match gateway.generate_questions().await {
        Ok(questions) => questions,
        Err(err) => {
            eprintln!("{}", err.user_message());
            return Err(err.into());
        }
    };
    info!(count = questions.len(), "batch generated");

    let questions = illustrate(&gateway, questions).await;
    for (index, question) in questions.iter().enumerate() {
        println!("{}", describe(index + 1, question));
    }
    Ok(())
}

fn describe(number: usize, question: &Question) -> String {
    let mut out = format!("{number}. {}\n", question.prompt().plain_text());
    for (key, choice) in question.choices().iter().enumerate() {
        let mark = if question.is_correct(choice) { "*" } else { " " };
        out.push_str(&format!("   {mark} {}) {choice}\n", key + 1));
    }
    if !question.explanation().is_empty() {
        out.push_str(&format!("   {}\n", question.explanation()));
    }
    let image = match question.image() {
        Some(image) if image.origin() == ImageOrigin::Generated => {
            format!("generated ({} bytes as data URI)", image.as_str().len())
        }
        Some(image) => format!("placeholder {}", image.as_str()),
        None => "none".to_string(),
    };
    out.push_str(&format!("   image: {image}"));
    out
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Err(err) = dotenv {
        if !err.not_found() {
            warn!(error = %err, "failed to load .env");
        }
    }

    let args = Args::parse(std::env::args().skip(1)).inspect_err(|err| {
        eprintln!("{err}");
        print_usage();
    })?;

    match args.command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Ui => {
            launch_ui(build_gateway(args.question_count));
            Ok(())
        }
        Command::Preview => preview(build_gateway(args.question_count)).await,
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
