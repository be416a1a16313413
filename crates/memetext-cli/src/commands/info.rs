//! Info command implementation
//!
//! Lists what is available under the asset root.

use anyhow::Result;
use memetext::assets::discover;

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let root = super::resolve_root(&args.root);
    let catalog = discover(&root)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("memetext v{}", env!("CARGO_PKG_VERSION"));
    println!("Asset root: {}", root.display());
    print_section("Fonts", &catalog.fonts);
    print_section("Frames", &catalog.frames);
    print_section("Extras", &catalog.extras);
    Ok(())
}

fn print_section(title: &str, names: &[String]) {
    println!();
    println!("{title} ({}):", names.len());
    if names.is_empty() {
        println!("  (none)");
    }
    for name in names {
        println!("  {name}");
    }
}
