// Gate scanning command

use anyhow::Result;
use campusgate_client::api::gate_desk;
use campusgate_client::{ApiClient, AuthSession};

use crate::output::{print_field, OutputFormat};

pub async fn run(
    client: &ApiClient,
    session: &AuthSession,
    output: OutputFormat,
    code: &str,
) -> Result<()> {
    super::ensure_access(session, &["gate"])?;

    let result = gate_desk::scan_qr(client, code)
        .await
        .map_err(|e| anyhow::anyhow!("Scan failed: {}", e.message()))?;

    if output.is_text() {
        let valid = result.get("valid").and_then(|v| v.as_bool());
        match valid {
            Some(true) => println!("PASS VALID"),
            Some(false) => println!("PASS INVALID"),
            None => println!("Scan result:"),
        }
        if let Some(name) = result.pointer("/student/name").and_then(|v| v.as_str()) {
            print_field("Student", name);
        }
        if let Some(pass_type) = result.pointer("/pass/passType").and_then(|v| v.as_str()) {
            print_field("Pass type", pass_type);
        }
        if valid.is_none() {
            println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
        }
    } else {
        output.print_value(&result);
    }

    Ok(())
}
