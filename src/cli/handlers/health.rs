use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_health(ctx: CommandContext) -> Result<()> {
    let healthy = tokio::runtime::Runtime::new()?.block_on(async {
        let store = ctx.open_store().await?;
        let connected = store.ensure_connected().await;
        let healthy = connected.is_ok() && store.health_check().await;
        store.close().await;
        connected.map(|_| healthy)
    })?;

    if !healthy {
        anyhow::bail!("Database '{}' did not answer ping", ctx.database().name);
    }

    let target = if ctx.in_memory {
        "in-memory store".to_string()
    } else {
        format!("{} ({})", ctx.database().name, ctx.database().redacted_uri())
    };
    println!("{} {}", "Healthy".green(), target);
    Ok(())
}
