//! `capstan generator` command

use anyhow::{bail, Result};
use serde_json::json;

use crate::cli::GeneratorArgs;
use capstan::resolver::is_nx_schema;
use capstan::{CapabilityResolver, GlobalContext};

/// Split `<collection>:<generator>` on the last colon, so collection
/// identifiers that are file paths keep their shape.
fn split_identifier(identifier: &str) -> Result<(&str, &str)> {
    match identifier.rsplit_once(':') {
        Some((collection, generator)) if !collection.is_empty() && !generator.is_empty() => {
            Ok((collection, generator))
        }
        _ => bail!(
            "invalid generator identifier `{}`, expected `<collection>:<generator>`",
            identifier
        ),
    }
}

pub fn execute(args: GeneratorArgs) -> Result<()> {
    let (collection, generator) = split_identifier(&args.identifier)?;

    let ctx = GlobalContext::new()?;
    let root = super::workspace_root(&ctx)?;

    let resolver = CapabilityResolver::for_root(&root);
    let resolved = resolver.resolve_generator(collection, generator)?;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_identifier() {
        assert_eq!(split_identifier("@org/pkg:lib").unwrap(), ("@org/pkg", "lib"));
        assert_eq!(
            split_identifier("./collection.json:lib").unwrap(),
            ("./collection.json", "lib")
        );
        assert!(split_identifier("no-colon").is_err());
        assert!(split_identifier("trailing:").is_err());
    }
}
