//! A terminal client for the tennis tournament backend.
//!
//! The client logs in over HTTP, keeps the session in a local file between
//! runs and offers an interactive shell for tournaments, brackets and
//! matches.

use anyhow::{Context, Result};
use pico_args::Arguments;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tc_client::{
    api_client::ApiClient,
    commands::{SHELL_HELP, parse_command},
    config::ClientConfig,
    logging,
    navigation::TerminalNavigator,
    render,
    shell::{Reply, Shell},
};
use tennis_club::{
    auth::RegisterRequest,
    session::{
        FileStore, SessionManager, SessionMonitor, SystemClock, TokenStatus, View, Visibility,
    },
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

const HELP: &str = "\
Tennis tournament client

USAGE:
  tc_client [OPTIONS] [COMMAND]

COMMANDS:
  login                 Log in and save the session
  logout                End the saved session
  whoami                Show the saved session
  signup                Create an athlete account
  shell                 Interactive shell [default]

OPTIONS:
  --server URL          Backend URL  [env: TENNIS_API_URL, default: http://localhost:5000]
  --session-file PATH   Session file [env: TENNIS_SESSION_FILE, default: .tennis_session.json]
  --email EMAIL         Email for login/signup
  --password PASS       Password for login/signup

FLAGS:
  -h, --help            Print help information
";

struct Args {
    command: Option<String>,
    server_url: Option<String>,
    session_file: Option<PathBuf>,
    email: Option<String>,
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    logging::init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        server_url: pargs.opt_value_from_str("--server")?,
        session_file: pargs.opt_value_from_str("--session-file")?,
        email: pargs.opt_value_from_str("--email")?,
        password: pargs.opt_value_from_str("--password")?,
        command: pargs.opt_free_from_str()?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {:?}", remaining);
    }

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let config = ClientConfig::from_env(args.server_url.clone(), args.session_file.clone())?;
    config.validate()?;
    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let navigator = Arc::new(TerminalNavigator::new(View::Public));
    let session = SessionManager::load(
        Arc::new(FileStore::new(config.session_file.clone())),
        Arc::new(SystemClock),
        navigator.clone(),
        config.policy,
    )
    .context("Failed to read saved session")?;
    let api = ApiClient::with_timeout(config.api_url.clone(), session, config.request_timeout)?;

    match args.command.as_deref().unwrap_or("shell") {
        "login" => login(&api, args.email, args.password).await,
        "logout" => {
            api.session().logout()?;
            println!("Logged out.");
            Ok(())
        }
        "whoami" => whoami(&api).await,
        "signup" => signup(&api, args.email, args.password).await,
        "shell" => shell(api, navigator).await,
        other => anyhow::bail!("Unknown command '{}'. See --help", other),
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(label),
    }
}

async fn login(api: &ApiClient, email: Option<String>, password: Option<String>) -> Result<()> {
    if api.session().redirect_if_authenticated() {
        if let Some(user) = api.session().user() {
            println!("Already logged in as {}", render::user_badge(&user));
        }
        return Ok(());
    }

    let email = value_or_prompt(email, "Email")?;
    let password = value_or_prompt(password, "Password")?;

    println!("Logging in as {}...", email);
    let user = api.login(email, password).await.context("Login failed")?;
    println!("Welcome, {}", render::user_badge(&user));
    Ok(())
}

async fn whoami(api: &ApiClient) -> Result<()> {
    let session = api.session();
    let Some(user) = session.is_authenticated().then(|| session.user()).flatten() else {
        println!("Not logged in.");
        return Ok(());
    };

    println!("{}", render::user_badge(&user));
    if let Some(expires_at) = session.expires_at() {
        println!("Session expires {}", expires_at.with_timezone(&chrono::Local));
    }

    match session.validate_with(api).await {
        Some(TokenStatus::Valid) => println!("Backend accepts the session."),
        Some(TokenStatus::Rejected) => println!("Backend rejected the session; logged out."),
        Some(TokenStatus::Unavailable) => println!("Backend unreachable; session kept."),
        None => {}
    }
    Ok(())
}

async fn signup(api: &ApiClient, email: Option<String>, password: Option<String>) -> Result<()> {
    let name = prompt("Name")?;
    let surname = prompt("Surname")?;
    let email = value_or_prompt(email, "Email")?;
    let username = prompt("Username")?;
    let phone = prompt("Phone (optional)")?;
    let password = value_or_prompt(password, "Password")?;
    let confirmation = prompt("Confirm password")?;

    let mut request = RegisterRequest::new(name, surname, email, username, password);
    if !phone.is_empty() {
        request = request.with_phone(phone);
    }
    request.validate(&confirmation)?;

    let response = api.register(&request).await.context("Sign-up failed")?;
    println!(
        "{}",
        response
            .message
            .unwrap_or_else(|| "Account created. You can log in now.".to_string())
    );
    Ok(())
}

async fn shell(api: ApiClient, navigator: Arc<TerminalNavigator>) -> Result<()> {
    if !api.session().require_auth() {
        print!("{}", tc_client::shell::LOGIN_REQUIRED);
        return Ok(());
    }
    navigator.enter(View::Protected);

    let (visibility_tx, visibility_rx) = watch::channel(Visibility::Visible);
    let monitor = SessionMonitor::spawn(
        api.session().clone(),
        Arc::new(api.clone()),
        visibility_rx,
    );

    if let Some(user) = api.session().user() {
        println!("Logged in as {}", render::user_badge(&user));
    }
    print!("{SHELL_HELP}");

    let shell = Shell::new(api, navigator);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match shell.execute(command).await {
            Ok(Reply::Text(text)) => print!("{}", text),
            Ok(Reply::Quit) => break,
            Err(e) => println!("Error: {}", e),
        }

        if !shell.session().is_authenticated() {
            println!("Session ended.");
            break;
        }
    }

    drop(visibility_tx);
    monitor.stop().await;
    Ok(())
}
