use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn handle(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let (root_status, root) = client.get_root("/api/").await?;
    let (health_status, health) = client.get_root("/health").await?;

    if !root_status.is_success() || !health_status.is_success() {
        anyhow::bail!(
            "{} is not healthy (api: {}, health: {})",
            client.base_url(),
            root_status,
            health_status
        );
    }

    output_success(
        output_format,
        &format!("{} is up", client.base_url()),
        Some(json!({ "api": root, "health": health })),
    )
}
