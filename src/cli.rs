//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

/// Turn a portrait photo into a professional studio headshot with Gemini.
#[derive(Parser, Debug)]
#[command(name = "headshot", version, about)]
pub struct Cli {
    /// Portrait photo to restyle (PNG or JPEG).
    #[arg(required_unless_present = "print_prompt")]
    pub image: Option<PathBuf>,

    /// Pose: default, armsCrossed, thinking.
    #[arg(long)]
    pub pose: Option<String>,

    /// Framing: chestUp, halfBody, fullBody.
    #[arg(long)]
    pub framing: Option<String>,

    /// Outfit: blazer, suit, shirt, turtleneck.
    #[arg(long)]
    pub outfit: Option<String>,

    /// Model name or short alias.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Output file path (defaults to professional-profile-photo.png).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Print the compiled prompt and exit without calling the model.
    #[arg(long)]
    pub print_prompt: bool,

    /// Print the headshot as a `data:` URL on stdout instead of saving it.
    #[arg(long, conflicts_with = "output")]
    pub data_url: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
