// Account commands: login, logout, whoami, registration, and the OTP and
// password-reset flows

use anyhow::Result;
use campusgate_client::api::auth::{self, LoginRequest};
use campusgate_client::{public_route, ApiClient, AuthSession, RouteDecision};
use clap::Subcommand;
use serde_json::json;

use crate::output::{print_field, OutputFormat};

#[derive(Subcommand)]
pub enum RegisterCommand {
    /// Register a student account
    Student {
        #[arg(long)]
        name: String,
        #[arg(long)]
        roll_no: String,
        #[arg(long)]
        registration_no: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        year: Option<u32>,
        #[arg(long)]
        hostel: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Register a department account
    Department {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        department_id: String,
        #[arg(long)]
        password: String,
        /// Registration codeword issued by the administration
        #[arg(long)]
        codeword: String,
    },

    /// Register an academic office account
    Academic {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        office_id: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        codeword: String,
    },

    /// Register a hostel office account
    HostelOffice {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        office_id: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        codeword: String,
    },

    /// Register a gate account
    Gate {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        gate_id: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        codeword: String,
    },
}

/// Refuse auth entry commands for signed-in sessions, the way public routes
/// bounce an authenticated visitor to their dashboard.
fn ensure_signed_out(session: &AuthSession) -> bool {
    match public_route(&session.snapshot()) {
        RouteDecision::Redirect { to, .. } => {
            println!(
                "Already signed in (dashboard: {}). Run `campusgate logout` first.",
                to
            );
            false
        }
        _ => true,
    }
}

pub async fn login(
    client: &ApiClient,
    session: &AuthSession,
    output: OutputFormat,
    role: String,
    identifier: String,
    password: String,
) -> Result<()> {
    if !ensure_signed_out(session) {
        return Ok(());
    }

    let data = auth::login(
        client,
        &LoginRequest {
            role,
            identifier,
            password,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("Login failed: {}", e.message()))?;

    session.login(&data.token, &data.user, &data.role);

    if output.is_text() {
        println!("Signed in as {}", data.user.display_name());
        print_field("Role", &data.role);
        if let RouteDecision::Redirect { to, .. } = public_route(&session.snapshot()) {
            print_field("Dashboard", &to);
        }
    } else {
        output.print_value(&serde_json::json!({
            "role": data.role,
            "user": data.user,
        }));
    }

    Ok(())
}

pub fn logout(session: &AuthSession, quiet: bool) -> Result<()> {
    session.logout();
    if !quiet {
        println!("Signed out");
    }
    Ok(())
}

pub fn whoami(session: &AuthSession, output: OutputFormat) -> Result<()> {
    super::ensure_access(session, &[])?;

    let user = session.user().unwrap_or_default();
    let role = session.role();

    if output.is_text() {
        print_field("Name", user.display_name());
        if let Some(email) = &user.email {
            print_field("Email", email);
        }
        if let Some(roll_no) = &user.roll_no {
            print_field("Roll No", roll_no);
        }
        if let Some(department) = &user.department {
            print_field("Department", department);
        }
        print_field("Role", role.as_deref().unwrap_or("unknown"));
    } else {
        output.print_value(&serde_json::json!({
            "user": user,
            "role": role,
        }));
    }

    Ok(())
}

pub async fn verify_otp(
    client: &ApiClient,
    output: OutputFormat,
    email: String,
    otp: String,
) -> Result<()> {
    let response = auth::verify_otp(client, &auth::VerifyOtpRequest { email, otp })
        .await
        .map_err(|e| anyhow::anyhow!("Verification failed: {}", e.message()))?;

    if output.is_text() {
        println!("Email verified. You can now sign in.");
    } else {
        output.print_value(&response);
    }
    Ok(())
}

pub async fn resend_otp(client: &ApiClient, output: OutputFormat, email: String) -> Result<()> {
    let response = auth::resend_otp(client, &auth::EmailRequest { email })
        .await
        .map_err(|e| anyhow::anyhow!("Could not resend OTP: {}", e.message()))?;

    if output.is_text() {
        println!("A new OTP is on its way.");
    } else {
        output.print_value(&response);
    }
    Ok(())
}

pub async fn forgot_password(
    client: &ApiClient,
    output: OutputFormat,
    email: String,
) -> Result<()> {
    let response = auth::forgot_password(client, &auth::EmailRequest { email })
        .await
        .map_err(|e| anyhow::anyhow!("Request failed: {}", e.message()))?;

    if output.is_text() {
        println!("If the address is registered, a reset OTP has been sent.");
    } else {
        output.print_value(&response);
    }
    Ok(())
}

pub async fn reset_password(
    client: &ApiClient,
    output: OutputFormat,
    email: String,
    otp: String,
    new_password: String,
) -> Result<()> {
    let response = auth::reset_password(
        client,
        &auth::ResetPasswordRequest {
            email,
            otp,
            new_password,
        },
    )
    .await
    .map_err(|e| anyhow::anyhow!("Reset failed: {}", e.message()))?;

    if output.is_text() {
        println!("Password reset. Sign in with your new password.");
    } else {
        output.print_value(&response);
    }
    Ok(())
}

pub async fn register(
    command: RegisterCommand,
    client: &ApiClient,
    session: &AuthSession,
    output: OutputFormat,
) -> Result<()> {
    if !ensure_signed_out(session) {
        return Ok(());
    }

    let response = match command {
        RegisterCommand::Student {
            name,
            roll_no,
            registration_no,
            department,
            year,
            hostel,
            email,
            password,
        } => {
            let payload = json!({
                "name": name,
                "rollNo": roll_no,
                "registrationNo": registration_no,
                "department": department,
                "year": year,
                "hostel": hostel,
                "email": email,
                "password": password,
            });
            auth::register_student(client, &payload).await
        }
        RegisterCommand::Department {
            name,
            email,
            department,
            department_id,
            password,
            codeword,
        } => {
            let payload = json!({
                "name": name,
                "email": email,
                "department": department,
                "departmentId": department_id,
                "password": password,
                "codeword": codeword,
            });
            auth::register_department(client, &payload).await
        }
        RegisterCommand::Academic {
            name,
            email,
            office_id,
            password,
            codeword,
        } => {
            let payload = json!({
                "name": name,
                "email": email,
                "officeId": office_id,
                "password": password,
                "codeword": codeword,
            });
            auth::register_academic(client, &payload).await
        }
        RegisterCommand::HostelOffice {
            name,
            email,
            office_id,
            password,
            codeword,
        } => {
            let payload = json!({
                "name": name,
                "email": email,
                "officeId": office_id,
                "password": password,
                "codeword": codeword,
            });
            auth::register_hostel_office(client, &payload).await
        }
        RegisterCommand::Gate {
            name,
            email,
            gate_id,
            password,
            codeword,
        } => {
            let payload = json!({
                "name": name,
                "email": email,
                "gateId": gate_id,
                "password": password,
                "codeword": codeword,
            });
            auth::register_gate(client, &payload).await
        }
    }
    .map_err(|e| anyhow::anyhow!("Registration failed: {}", e.message()))?;

    if output.is_text() {
        println!("Registered. Check your email for a verification OTP.");
    } else {
        output.print_value(&response);
    }

    Ok(())
}
