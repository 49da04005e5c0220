use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use asl_core::model::Credential;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    ApiConfig, AppServices, AuthService, Clock, ProgressService, QuizLoopService, Url,
    parse_base_url,
};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidDelay { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidDelay { raw } => write!(f, "invalid --redirect-delay value: {raw}"),
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

struct DesktopApp {
    credential: Option<Credential>,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn api_base_url(&self) -> Url {
        self.services.base_url().clone()
    }

    fn initial_credential(&self) -> Option<Credential> {
        self.credential.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn auth(&self) -> Arc<AuthService> {
        self.services.auth()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    api_url: Option<String>,
    redirect_delay: Option<Duration>,
    help: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--redirect-delay <secs>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", ApiConfig::DEFAULT_BASE_URL);
    eprintln!("  --redirect-delay 3");
    eprintln!();
    eprintln!("Environment (a .env file is honored):");
    eprintln!("  ASL_API_BASE_URL, ASL_REDIRECT_DELAY_SECS, ASL_MAX_FETCH_ATTEMPTS");
    eprintln!("  ASL_ACCESS_TOKEN  start signed in with this bearer token (never passed as a flag)");
    eprintln!("  RUST_LOG controls log output (e.g. RUST_LOG=debug)");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    let url = parse_base_url(&value)
                        .map_err(|_| ArgsError::InvalidApiUrl { raw: value.clone() })?;
                    parsed.api_url = Some(url.to_string());
                }
                "--redirect-delay" => {
                    let value = require_value(args, "--redirect-delay")?;
                    let secs: u64 = value
                        .trim()
                        .parse()
                        .map_err(|_| ArgsError::InvalidDelay { raw: value.clone() })?;
                    parsed.redirect_delay = Some(Duration::from_secs(secs));
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    /// Layer the command line over the environment-derived config.
    fn apply(&self, config: &mut ApiConfig) {
        if let Some(url) = &self.api_url {
            config.base_url.clone_from(url);
        }
        if let Some(delay) = self.redirect_delay {
            config.redirect_delay = delay;
        }
    }

}

fn credential_from_env(token: Option<String>) -> Option<Credential> {
    token.and_then(Credential::new)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is the normal case outside development.
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            return Err(err.into());
        }
    }
    env_logger::init();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let mut config = ApiConfig::from_env();
    args.apply(&mut config);
    let credential = credential_from_env(std::env::var("ASL_ACCESS_TOKEN").ok());
    log::info!(
        "using backend {} (signed in: {})",
        config.base_url,
        credential.is_some()
    );

    let services = AppServices::from_config(config, Clock::default_clock())?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        credential,
        services,
    });
    let context = build_app_context(&app);

    let desktop_cfg =
        DesktopConfig::new().with_window(WindowBuilder::new().with_title("ASL Learn"));

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
