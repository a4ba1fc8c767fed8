use anyhow::Result;
use std::sync::Arc;

use super::CommandContext;
use crate::storage::MemoryStore;

pub fn handle_schema(ctx: CommandContext) -> Result<()> {
    // SDL does not depend on the data, so skip connecting
    let schema = ctx.schema(Arc::new(MemoryStore::new()));
    println!("{}", schema.sdl());
    Ok(())
}
