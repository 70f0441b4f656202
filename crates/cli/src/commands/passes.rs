// Student pass commands

use anyhow::Result;
use campusgate_client::api::passes::{self, CreatePassRequest};
use campusgate_client::{ApiClient, AuthSession};
use campusgate_core::{Pass, PassType};
use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::output::{print_field, print_table_header, print_table_row, OutputFormat};

#[derive(Subcommand)]
pub enum PassesCommand {
    /// Request a new gate pass
    Create {
        /// Pass type
        #[arg(long, short = 't', value_parser = ["out-of-station", "local", "tea-coffee"])]
        pass_type: String,

        /// Reason for the pass
        #[arg(long, short)]
        reason: String,

        /// Start of the leave window (RFC 3339)
        #[arg(long)]
        from: Option<DateTime<Utc>>,

        /// End of the leave window (RFC 3339)
        #[arg(long)]
        to: Option<DateTime<Utc>>,
    },

    /// List your passes
    List,
}

pub async fn run(
    command: PassesCommand,
    client: &ApiClient,
    session: &AuthSession,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    super::ensure_access(session, &["user"])?;

    match command {
        PassesCommand::Create {
            pass_type,
            reason,
            from,
            to,
        } => create(client, output, quiet, &pass_type, reason, from, to).await,
        PassesCommand::List => list(client, output).await,
    }
}

async fn create(
    client: &ApiClient,
    output: OutputFormat,
    quiet: bool,
    pass_type: &str,
    reason: String,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<()> {
    let pass_type = match pass_type {
        "out-of-station" => PassType::OutOfStation,
        "tea-coffee" => PassType::TeaCoffee,
        _ => PassType::Local,
    };

    let pass = passes::create_pass(
        client,
        &CreatePassRequest {
            pass_type,
            reason,
            from_date: from,
            to_date: to,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("Failed to create pass: {}", e.message()))?;

    if output.is_text() {
        if quiet {
            if let Some(id) = &pass.id {
                println!("{}", id);
            }
        } else {
            println!("Pass requested");
            print_field("ID", pass.id.as_deref().unwrap_or("-"));
            print_field("Type", pass.pass_type.label());
            if let Some(status) = &pass.status {
                print_field("Status", status.label());
            }
        }
    } else {
        output.print_value(&pass);
    }

    Ok(())
}

async fn list(client: &ApiClient, output: OutputFormat) -> Result<()> {
    let passes = passes::my_passes(client)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to fetch passes: {}", e.message()))?;

    if output.is_text() {
        print_pass_table(&passes);
    } else {
        output.print_value(&passes);
    }

    Ok(())
}

/// Shared pass table renderer, also used by the approval queues.
pub fn print_pass_table(passes: &[Pass]) {
    if passes.is_empty() {
        println!("No passes found");
        return;
    }

    print_table_header(&[("ID", 26), ("TYPE", 16), ("STATUS", 22), ("REASON", 30)]);

    for pass in passes {
        let status = pass.status.map(|s| s.label()).unwrap_or("-");
        print_table_row(&[
            (pass.id.as_deref().unwrap_or("-"), 26),
            (pass.pass_type.label(), 16),
            (status, 22),
            (pass.reason.as_deref().unwrap_or("-"), 30),
        ]);
    }
}
