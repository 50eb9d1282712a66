//! `capstan projects` command

use anyhow::Result;

use capstan::core::workspace::Workspace;
use capstan::GlobalContext;

pub fn execute() -> Result<()> {
    let ctx = GlobalContext::new()?;
    let root = super::workspace_root(&ctx)?;

    let ws = Workspace::load(&root)?;
    println!("{}", serde_json::to_string_pretty(ws.definition())?);

    Ok(())
}
