// CampusGate CLI
//
// Design Decision: Use clap derive for ergonomic argument parsing.
// Design Decision: The binary is the composition root - it owns the session
// store, the auth session, the API client, and the wiring between them.
// Design Decision: Hydration runs exactly once, before command dispatch, so
// every command sees a settled session.

mod commands;
mod output;

use std::sync::Arc;

use campusgate_client::{ApiClient, AuthSession, FileSessionStore};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "campusgate")]
#[command(about = "CampusGate CLI - Manage gate passes, approvals, and scans")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(
        long,
        env = "CAMPUSGATE_API_URL",
        default_value = "http://localhost:5000"
    )]
    pub api_url: String,

    /// Directory holding the persisted session
    #[arg(long, env = "CAMPUSGATE_STATE_DIR", default_value = ".campusgate")]
    pub state_dir: String,

    /// Output format
    #[arg(long, short, default_value = "text", value_parser = ["text", "json"])]
    pub output: String,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and persist the session
    Login {
        /// Account role (user, department, academic, hosteloffice, gate)
        #[arg(long, short)]
        role: String,

        /// Roll number, department id, or office id
        #[arg(long, short)]
        identifier: String,

        /// Account password
        #[arg(long, short)]
        password: String,
    },

    /// Sign out and drop the persisted session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Register a new account
    Register {
        #[command(subcommand)]
        command: commands::auth::RegisterCommand,
    },

    /// Verify your email with the OTP sent after registration
    VerifyOtp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
    },

    /// Request a fresh verification OTP
    ResendOtp {
        #[arg(long)]
        email: String,
    },

    /// Request a password-reset OTP
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Reset your password using the emailed OTP
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        otp: String,
        #[arg(long)]
        new_password: String,
    },

    /// Manage your gate passes (students)
    Passes {
        #[command(subcommand)]
        command: commands::passes::PassesCommand,
    },

    /// List passes waiting at your approval stage
    Pending,

    /// Approve a pending pass at your approval stage
    Approve {
        /// Pass ID
        pass_id: String,
    },

    /// Show leave statistics for your office
    Leaves {
        /// Department-wise totals instead of per-student (academic office)
        #[arg(long)]
        by_department: bool,
    },

    /// Validate a scanned QR code (gate)
    Scan {
        /// QR code payload
        code: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campusgate_cli=warn,campusgate_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_format = output::OutputFormat::from_str(&cli.output);

    let store = Arc::new(FileSessionStore::new(&cli.state_dir));
    let session = AuthSession::new(store.clone());

    // The 401 teardown hook is the CLI's version of "redirect to login":
    // drop the in-memory session and tell the user. Auth entry commands are
    // the login view's analog, so the notice is suppressed there.
    let on_auth_command = matches!(
        cli.command,
        Commands::Login { .. }
            | Commands::Register { .. }
            | Commands::VerifyOtp { .. }
            | Commands::ResendOtp { .. }
            | Commands::ForgotPassword { .. }
            | Commands::ResetPassword { .. }
    );
    let hook_session = session.clone();
    let quiet = cli.quiet;
    let client = ApiClient::new(&cli.api_url, store).with_auth_expired_hook(Arc::new(move || {
        hook_session.logout();
        if !on_auth_command && !quiet {
            eprintln!("Session expired. Please log in again.");
        }
    }));

    session.hydrate(&client).await;

    match cli.command {
        Commands::Login {
            role,
            identifier,
            password,
        } => {
            commands::auth::login(&client, &session, output_format, role, identifier, password)
                .await
        }
        Commands::Logout => commands::auth::logout(&session, cli.quiet),
        Commands::Whoami => commands::auth::whoami(&session, output_format),
        Commands::Register { command } => {
            commands::auth::register(command, &client, &session, output_format).await
        }
        Commands::VerifyOtp { email, otp } => {
            commands::auth::verify_otp(&client, output_format, email, otp).await
        }
        Commands::ResendOtp { email } => {
            commands::auth::resend_otp(&client, output_format, email).await
        }
        Commands::ForgotPassword { email } => {
            commands::auth::forgot_password(&client, output_format, email).await
        }
        Commands::ResetPassword {
            email,
            otp,
            new_password,
        } => {
            commands::auth::reset_password(&client, output_format, email, otp, new_password).await
        }
        Commands::Passes { command } => {
            commands::passes::run(command, &client, &session, output_format, cli.quiet).await
        }
        Commands::Pending => commands::approvals::pending(&client, &session, output_format).await,
        Commands::Approve { pass_id } => {
            commands::approvals::approve(&client, &session, output_format, &pass_id, cli.quiet)
                .await
        }
        Commands::Leaves { by_department } => {
            commands::approvals::leaves(&client, &session, output_format, by_department).await
        }
        Commands::Scan { code } => {
            commands::scan::run(&client, &session, output_format, &code).await
        }
    }
}
