// Approval-stage commands: pending queues, approvals, leave statistics
//
// The same subcommand serves every approval role; the session's role picks
// the stage-specific endpoint.

use anyhow::{bail, Result};
use campusgate_client::api::approvals;
use campusgate_client::{ApiClient, AuthSession};
use campusgate_core::Role;

use crate::output::{print_field, OutputFormat};

const APPROVAL_ROLES: [&str; 3] = ["department", "academic", "hosteloffice"];

fn approval_role(session: &AuthSession) -> Result<Role> {
    match session.role().as_deref().and_then(Role::parse) {
        Some(role) => Ok(role),
        None => bail!("Could not determine your role. Sign in again with `campusgate login`."),
    }
}

pub async fn pending(
    client: &ApiClient,
    session: &AuthSession,
    output: OutputFormat,
) -> Result<()> {
    super::ensure_access(session, &APPROVAL_ROLES)?;

    let passes = match approval_role(session)? {
        Role::Department => approvals::department_pending(client).await,
        Role::Academic => approvals::academic_pending(client).await,
        _ => approvals::hostel_pending(client).await,
    }
    .map_err(|e| anyhow::anyhow!("Failed to fetch pending passes: {}", e.message()))?;

    if output.is_text() {
        super::passes::print_pass_table(&passes);
    } else {
        output.print_value(&passes);
    }

    Ok(())
}

pub async fn approve(
    client: &ApiClient,
    session: &AuthSession,
    output: OutputFormat,
    pass_id: &str,
    quiet: bool,
) -> Result<()> {
    super::ensure_access(session, &APPROVAL_ROLES)?;

    let pass = match approval_role(session)? {
        Role::Department => approvals::department_approve(client, pass_id).await,
        Role::Academic => approvals::academic_approve(client, pass_id).await,
        _ => approvals::hostel_approve(client, pass_id).await,
    }
    .map_err(|e| anyhow::anyhow!("Failed to approve pass: {}", e.message()))?;

    if output.is_text() {
        if !quiet {
            println!("Approved pass {}", pass_id);
        }
        if let Some(status) = &pass.status {
            print_field("Status", status.label());
        }
    } else {
        output.print_value(&pass);
    }

    Ok(())
}

pub async fn leaves(
    client: &ApiClient,
    session: &AuthSession,
    output: OutputFormat,
    by_department: bool,
) -> Result<()> {
    super::ensure_access(session, &["department", "academic"])?;

    let stats = match approval_role(session)? {
        Role::Department => {
            if by_department {
                bail!("Department-wise totals are only available to the academic office.");
            }
            approvals::department_student_leaves(client).await
        }
        _ => {
            if by_department {
                approvals::academic_department_leaves(client).await
            } else {
                approvals::academic_student_leaves(client).await
            }
        }
    }
    .map_err(|e| anyhow::anyhow!("Failed to fetch leave statistics: {}", e.message()))?;

    // Statistics shapes are backend-owned; render them as JSON either way
    if output.is_text() {
        match serde_json::to_string_pretty(&stats) {
            Ok(text) => println!("{}", text),
            Err(e) => bail!("failed to encode statistics: {}", e),
        }
    } else {
        output.print_value(&stats);
    }

    Ok(())
}
