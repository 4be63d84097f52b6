use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AuthService, BearerSlot, Clock, HttpGateway, QuestionAdminService, QuizService,
};
use storage::FileTokenStore;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <url>] [--token-file <path>] [--admin-key <key>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api        http://localhost:5000");
    eprintln!("  --token-file ~/.quiz-platform/token");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_URL, QUIZ_TOKEN_FILE, QUIZ_ADMIN_KEY");
}

struct Args {
    api_url: String,
    token_file: PathBuf,
    admin_key: Option<String>,
}

fn default_token_file() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".quiz-platform").join("token")
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url = std::env::var("QUIZ_API_URL")
            .ok()
            .unwrap_or_else(|| "http://localhost:5000".to_string());
        let mut token_file = std::env::var("QUIZ_TOKEN_FILE")
            .ok()
            .map_or_else(default_token_file, PathBuf::from);
        let mut admin_key = std::env::var("QUIZ_ADMIN_KEY").ok();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(args, "--api")?;
                    if !value.starts_with("http://") && !value.starts_with("https://") {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api_url = value;
                }
                "--token-file" => {
                    token_file = PathBuf::from(require_value(args, "--token-file")?);
                }
                "--admin-key" => {
                    admin_key = Some(require_value(args, "--admin-key")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_url,
            token_file,
            admin_key,
        })
    }
}

struct DesktopApp {
    auth: Arc<AuthService>,
    quizzes: Arc<QuizService>,
    admin: Arc<QuestionAdminService>,
}

impl UiApp for DesktopApp {
    fn app_name(&self) -> &str {
        "Quiz Platform"
    }

    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn quizzes(&self) -> Arc<QuizService> {
        Arc::clone(&self.quizzes)
    }

    fn admin(&self) -> Arc<QuestionAdminService> {
        Arc::clone(&self.admin)
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    log::info!("using api at {}", parsed.api_url);

    // All wiring happens here so services stay free of ambient state: one
    // bearer slot shared by the auth service and every outgoing request.
    let bearer = BearerSlot::new();
    let gateway = Arc::new(HttpGateway::new(parsed.api_url, bearer.clone()));
    let tokens = Arc::new(FileTokenStore::new(parsed.token_file));

    let auth = Arc::new(AuthService::new(
        Arc::clone(&gateway) as _,
        tokens,
        bearer,
        Clock::default_clock(),
        parsed.admin_key,
    ));
    let quizzes = Arc::new(QuizService::new(Arc::clone(&gateway) as _));
    let admin = Arc::new(QuestionAdminService::new(Arc::clone(&gateway) as _));

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        auth,
        quizzes,
        admin,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz Platform")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
