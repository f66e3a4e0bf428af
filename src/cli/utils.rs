use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// One named check and its outcome
pub fn output_check(output_format: OutputFormat, name: &str, result: &anyhow::Result<()>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let line = match result {
                Ok(()) => json!({ "check": name, "pass": true }),
                Err(e) => json!({ "check": name, "pass": false, "error": format!("{:#}", e) }),
            };
            println!("{}", serde_json::to_string(&line)?);
        }
        OutputFormat::Text => match result {
            Ok(()) => println!("PASS  {}", name),
            Err(e) => println!("FAIL  {}: {:#}", name, e),
        },
    }
    Ok(())
}
