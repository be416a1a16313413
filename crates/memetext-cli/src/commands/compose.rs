//! Compose command implementation
//!
//! Builds a whole canvas, waits for every image, and prints the paint plan.

use std::sync::Arc;

use anyhow::{bail, Result};
use futures::future::join_all;
use memetext::assets::FsAssetLoader;
use memetext::{Background, Editor, TextSettings};

use crate::cli::ComposeArgs;
use crate::output::PlanJson;

pub fn run(args: &ComposeArgs) -> Result<()> {
    let Some(background) = Background::parse(&args.background) else {
        bail!("Invalid background '{}'", args.background);
    };

    let root = super::resolve_root(&args.root);
    let catalog = super::catalog_with_font(&root, &args.font)?;

    let editor = Editor::new(Arc::new(FsAssetLoader::new(&root)));
    editor.set_background(background);
    match args.frame.as_deref() {
        None => {},
        Some("none") => editor.set_frame(None),
        Some(frame) => {
            if !catalog.has_frame(frame) {
                log::warn!("Frame {frame} not found under {}", root.display());
            }
            editor.set_frame(Some(frame.to_string()));
        },
    }

    let main = TextSettings {
        text: args.text.clone(),
        font_id: args.font.clone(),
        ..TextSettings::main_default()
    };
    let sub = TextSettings {
        text: args.sub_text.clone(),
        font_id: args.font.clone(),
        ..TextSettings::sub_default()
    };
    let rebuilds: Vec<_> = [editor.main_text().set(main), editor.sub_text().set(sub)]
        .into_iter()
        .flatten()
        .collect();

    let loads: Vec<_> = args
        .extras
        .iter()
        .map(|file| editor.layers().add_extra(file).load)
        .collect();

    super::runtime()?.block_on(async {
        futures::join!(join_all(rebuilds), editor.refresh(), join_all(loads))
    });

    let plan = editor.paint_plan();
    println!("{}", serde_json::to_string_pretty(&PlanJson::from(&plan))?);
    Ok(())
}
