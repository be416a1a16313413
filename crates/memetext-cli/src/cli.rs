//! CLI argument definitions using Clap v4

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// memetext - bitmap-font meme captions from the command line
#[derive(Parser, Debug)]
#[command(name = "memetext")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log debug output (warnings only otherwise)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display the fonts, frames and extras found under the asset root
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Lay out one line of text and print the glyph placements
    #[command(alias = "l")]
    Layout(LayoutArgs),

    /// Build a canvas with captions and extras and print its paint plan
    #[command(alias = "c")]
    Compose(ComposeArgs),
}

/// Where assets are read from
#[derive(Args, Debug, Clone)]
pub struct RootArg {
    /// Asset root (defaults to MEMETEXT_ASSET_ROOT, then ./public)
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub root: RootArg,

    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Text to lay out
    pub text: String,

    /// Font id (a folder under letters/)
    #[arg(short, long)]
    pub font: String,

    /// Glyph height in pixels
    #[arg(short, long, default_value_t = 120.0)]
    pub size: f32,

    /// Gap between glyphs in pixels
    #[arg(long, default_value_t = 4.0)]
    pub spacing: f32,

    #[command(flatten)]
    pub root: RootArg,

    /// Print placements as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Font id used by both captions
    #[arg(short, long)]
    pub font: String,

    /// Main caption
    #[arg(short, long, default_value = "WoW")]
    pub text: String,

    /// Sub caption
    #[arg(long, default_value = "")]
    pub sub_text: String,

    /// Extra image file names under extras/, stacked in order
    #[arg(short, long = "extra")]
    pub extras: Vec<String>,

    /// Frame file name under frames/, or "none"
    #[arg(long)]
    pub frame: Option<String>,

    /// Background: "transparent" or a #rrggbb[aa] colour
    #[arg(long, default_value = "transparent")]
    pub background: String,

    #[command(flatten)]
    pub root: RootArg,
}
