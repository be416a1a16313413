//! Layout command implementation
//!
//! Runs one rebuild against the filesystem loader.

use std::sync::Arc;

use anyhow::Result;
use memetext::assets::FsAssetLoader;
use memetext::layout::{LayoutEngine, RebuildOutcome};
use memetext::types::LayoutRequest;

use crate::cli::LayoutArgs;
use crate::output::LayoutJson;

pub fn run(args: &LayoutArgs) -> Result<()> {
    let request = LayoutRequest::new(&args.text, &args.font, args.size, args.spacing);
    request.validate()?;

    let root = super::resolve_root(&args.root);
    super::catalog_with_font(&root, &args.font)?;

    let engine = LayoutEngine::new(Arc::new(FsAssetLoader::new(&root)));
    let outcome = super::runtime()?.block_on(engine.rebuild(request));
    log::debug!("Layout finished: {outcome:?}");

    let output = engine.output().get();
    if args.json {
        let json = LayoutJson::new(&args.text, &args.font, args.size, args.spacing, &output);
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    if let RebuildOutcome::Cleared { .. } = outcome {
        println!("Nothing to lay out");
        return Ok(());
    }

    println!("{:<8} {:>9} {:>9} {:>9} {:>9}", "glyph", "x", "y", "width", "height");
    for p in &output.placements {
        println!(
            "{:<8} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
            p.key, p.x, p.y, p.width, p.height
        );
    }
    println!();
    println!(
        "{} glyphs, {:.2}px wide",
        output.placements.len(),
        output.advance_width()
    );
    Ok(())
}
