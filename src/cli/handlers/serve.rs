use anyhow::Result;

use super::CommandContext;
use crate::graphql::{GRAPHQL_PATH, run_server};

pub fn handle_serve(
    mut ctx: CommandContext,
    host: Option<String>,
    port: Option<u16>,
    production: bool,
) -> Result<()> {
    let server = &mut ctx.config.server;
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    server.production |= production;
    let settings = server.clone();

    println!(
        "Starting GraphQL server on http://{}:{}{}",
        settings.host, settings.port, GRAPHQL_PATH
    );
    if settings.production {
        println!("Production mode: error details hidden, introspection disabled");
    }

    tokio::runtime::Runtime::new()?.block_on(async {
        let store = ctx.open_store().await?;
        let schema = ctx.schema(store.clone());
        run_server(schema, store, settings).await
    })?;
    Ok(())
}
