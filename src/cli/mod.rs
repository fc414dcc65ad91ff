//! CLI module for the job-board session client.
//!
//! Every command that needs to know who is logged in restores the session first:
//! - `login` / `register` - authenticate and persist the token
//! - `logout` - end the session
//! - `whoami` - show the current user
//! - `profile update` - edit the profile of the current user
//! - `access <roles>` - check role-gated access for the current session
//! - `config check` - validate configuration file

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::api::{ApiError, ErrorCode, Id, LoginRequest, ProfileUpdate, RegisterRequest};
use crate::config::Config;
use crate::session::{authorize, landing_route, Access, Role, Session, User};
use crate::AppState;

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "jobboard")]
#[command(author, version, about = "Session client for the job-board API", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "jobboard.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// API URL to connect to (overrides api.base_url)
    #[arg(long, env = "JOBBOARD_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with email or username
    Login {
        /// Account email
        #[arg(long, required_unless_present = "username", conflicts_with = "username")]
        email: Option<String>,
        /// Account username
        #[arg(long)]
        username: Option<String>,
        /// Account password (can also be set via JOBBOARD_PASSWORD env var)
        #[arg(long, env = "JOBBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "JOBBOARD_PASSWORD", hide_env_values = true)]
        password: String,
        /// Register as a recruiter instead of a job seeker
        #[arg(long)]
        recruiter: bool,
        /// Company the recruiter belongs to
        #[arg(long, requires = "recruiter")]
        company_id: Option<Id>,
    },

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Profile management commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Check whether the current session may access content for the given roles
    Access {
        /// Allowed roles (job_seeker, recruiter, admin)
        #[arg(required = true)]
        roles: Vec<Role>,
    },

    /// Configuration management commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Update fields of the current user's profile
    Update {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        company_id: Option<Id>,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate configuration file
    Check,
}

// ============================================================================
// CLI Command Handlers
// ============================================================================

/// Run a CLI command
pub async fn run_command(cli: &Cli, config: Config) -> Result<()> {
    // Building the state touches neither the network nor the session file
    let state = AppState::new(config)?;
    let result = match &cli.command {
        Commands::Login {
            email,
            username,
            password,
        } => cmd_login(&state, email.as_deref(), username.as_deref(), password).await,
        Commands::Register {
            username,
            email,
            password,
            recruiter,
            company_id,
        } => {
            let request =
                RegisterRequest::new(username, email, password.as_str(), *recruiter, *company_id);
            cmd_register(&state, request).await
        }
        Commands::Logout => cmd_logout(&state).await,
        Commands::Whoami => cmd_whoami(&state).await,
        Commands::Profile(ProfileCommands::Update {
            username,
            email,
            company_id,
        }) => {
            let update = ProfileUpdate {
                username: username.clone(),
                email: email.clone(),
                company_id: *company_id,
            };
            cmd_profile_update(&state, update).await
        }
        Commands::Access { roles } => cmd_access(&state, roles).await,
        Commands::Config(ConfigCommands::Check) => cmd_config_check(cli).await,
    };

    state.session.teardown();
    result
}

/// Restore the persisted session and wait until it is ready
async fn restore_session(state: &AppState) -> Session {
    let mut rx = state.session.subscribe();
    state.session.bootstrap().await;

    // Only a Ready session says anything final about the user
    let session = match rx.wait_for(|s| s.is_ready()).await {
        Ok(session) => session.clone(),
        Err(_) => state.session.snapshot(),
    };
    session
}

/// Log in and report where the new session lands
async fn cmd_login(
    state: &AppState,
    email: Option<&str>,
    username: Option<&str>,
    password: &str,
) -> Result<()> {
    let credentials = match (email, username) {
        (Some(email), _) => LoginRequest::with_email(email, password),
        (None, Some(username)) => LoginRequest::with_username(username, password),
        (None, None) => anyhow::bail!("Either --email or --username is required"),
    };

    restore_session(state).await;

    let auth = state
        .api
        .login(&credentials)
        .await
        .map_err(|e| api_failure(state, "Login", e))?;

    start_session(state, auth.user, auth.access_token);
    Ok(())
}

/// Register a new account and start its session
async fn cmd_register(state: &AppState, request: RegisterRequest) -> Result<()> {
    restore_session(state).await;

    let auth = state
        .api
        .register(&request)
        .await
        .map_err(|e| api_failure(state, "Registration", e))?;

    println!("[OK] Account created.");
    start_session(state, auth.user, auth.access_token);
    Ok(())
}

/// Hand a fresh token to the session manager and react to the published change
fn start_session(state: &AppState, user: crate::api::RawUser, token: String) {
    let mut rx = state.session.subscribe();
    state.session.login(user, token);

    let session = rx.borrow_and_update().clone();
    if let Some(user) = &session.current_user {
        println!();
        println!("Logged in as {} ({})", user.username, user.role.label());
        println!("Continue at: {}", landing_route(&session));
        println!();
    }
}

/// End the current session
async fn cmd_logout(state: &AppState) -> Result<()> {
    let session = restore_session(state).await;
    state.session.logout();

    match session.current_user {
        Some(user) => println!("Logged out {}.", user.username),
        None => println!("Not logged in."),
    }
    Ok(())
}

/// Show the logged-in user
async fn cmd_whoami(state: &AppState) -> Result<()> {
    let session = restore_session(state).await;

    let Some(user) = &session.current_user else {
        println!("Not logged in.");
        return Ok(());
    };

    print_user(user);
    println!("Landing:     {}", landing_route(&session));
    println!();
    Ok(())
}

/// Update the profile and replace the session user with the stored result
async fn cmd_profile_update(state: &AppState, update: ProfileUpdate) -> Result<()> {
    if update.is_empty() {
        anyhow::bail!("Nothing to update. Pass --username, --email or --company-id.");
    }

    let session = restore_session(state).await;
    let user = session
        .current_user
        .ok_or_else(|| anyhow!("Not logged in. Run 'jobboard login' first."))?;

    match state.api.update_user(user.id, &update).await {
        Ok(raw) => {
            state.session.set_user(Some(User::from_raw(raw)));
            println!("[OK] Profile updated.");
            if let Some(user) = state.session.current_user() {
                print_user(&user);
            }
            Ok(())
        }
        Err(e) if e.is_unauthorized() => {
            state.session.set_user(None);
            anyhow::bail!("Session expired. Run 'jobboard login' again.");
        }
        Err(e) => Err(api_failure(state, "Profile update", e)),
    }
}

/// Check role-gated access for the current session
async fn cmd_access(state: &AppState, roles: &[Role]) -> Result<()> {
    let session = restore_session(state).await;

    match authorize(&session, roles) {
        Access::Granted => {
            println!("[OK] Access granted.");
            Ok(())
        }
        Access::Unauthenticated => anyhow::bail!("Not logged in. Run 'jobboard login' first."),
        Access::Denied(role) => anyhow::bail!(
            "Access denied: you do not have the required role. Your role: {}",
            role.label()
        ),
        Access::Loading => anyhow::bail!("Session is still loading"),
    }
}

/// Validate configuration file
async fn cmd_config_check(cli: &Cli) -> Result<()> {
    let config_path = &cli.config;

    println!("Checking configuration file: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[!!] Configuration file not found: {}",
            config_path.display()
        );
        println!();
        println!("The default configuration will be used.");
        return Ok(());
    }

    match Config::load(config_path) {
        Ok(config) => {
            println!("[OK] Configuration file is valid!");
            println!();
            println!("=== Configuration Summary ===");
            println!();
            println!("API:");
            println!("  Base URL:     {}", config.api.base_url);
            println!("  Timeout:      {}s", config.api.timeout_secs);
            println!();
            println!("Storage:");
            println!("  Session File: {}", config.storage.session_path().display());
            println!("  Token Key:    {}", config.storage.token_key);
            println!();
            println!("Logging:");
            println!("  Level:        {}", config.logging.level);
            println!();
            Ok(())
        }
        Err(e) => {
            println!("[!!] Configuration file is invalid!");
            println!();
            println!("Error: {:#}", e);
            anyhow::bail!("Invalid configuration");
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn print_user(user: &User) {
    println!();
    println!("=== User: {} ===", user.username);
    println!();
    println!("ID:          {}", user.id);
    println!("Email:       {}", user.email);
    println!("Role:        {}", user.role.label());
    if let Some(company_id) = user.company_id {
        println!("Company ID:  {}", company_id);
    }
}

/// Turn an API failure into a message for the terminal
fn api_failure(state: &AppState, action: &str, err: ApiError) -> anyhow::Error {
    match err.code() {
        ErrorCode::Transport => anyhow!(
            "{} failed: could not reach {}. Is the job-board API running? ({})",
            action,
            state.api.base_url(),
            err
        ),
        _ => match err.server_message() {
            Some(message) => anyhow!("{} failed: {}", action, message),
            None => anyhow!("{} failed: {}", action, err),
        },
    }
}
