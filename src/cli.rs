//! CLI argument parsing with clap.

use clap::Parser;

/// Generate a cinematic video-essay thumbnail with a single command.
#[derive(Parser, Debug)]
#[command(name = "thumbgen", version, about)]
pub struct Cli {
    /// Model name or short alias (imagen-4, imagen-4-ultra, imagen-3, nano-banana).
    #[arg(short, long)]
    pub model: Option<String>,

    /// Aspect ratio (e.g., 16:9, 4:3, 1:1).
    #[arg(short, long)]
    pub aspect_ratio: Option<String>,

    /// Download path for the thumbnail (default: ai-thumbnail.jpg).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Print the image as a data URI on stdout.
    #[arg(long)]
    pub data_uri: bool,

    /// Print the prompt details and exit without generating.
    #[arg(long)]
    pub show_prompt: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}
