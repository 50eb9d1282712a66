//! `capstan executor` command

use anyhow::Result;
use serde_json::json;

use crate::cli::ExecutorArgs;
use capstan::resolver::is_nx_schema;
use capstan::{CapabilityResolver, GlobalContext};

pub fn execute(args: ExecutorArgs) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let root = super::workspace_root(&ctx)?;

    let resolver = CapabilityResolver::for_root(&root);
    let resolved = resolver.resolve_executor_identifier(&args.identifier)?;

    if args.check_nx {
        println!("{}", is_nx_schema(&resolved.schema));
        return Ok(());
    }

    let output = json!({
        "schema": resolved.schema,
        "implementation": resolved.implementation.path,
        "export": resolved.implementation.export,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
