//! CLI Module
//!
//! Command-line interface for the mixdown clip assembler.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mixdown - assembles finished spoken-word clips
#[derive(Parser, Debug)]
#[command(name = "mixdown")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a clip from narration, stingers, and a background bed
    #[command(name = "mix")]
    Mix {
        /// Narration audio file
        #[arg(short, long)]
        narration: PathBuf,

        /// Intro stinger
        #[arg(long, default_value = "assets/intro.mp3")]
        intro: PathBuf,

        /// Outro stinger
        #[arg(long, default_value = "assets/outro.mp3")]
        outro: PathBuf,

        /// Background bed; omitted = random pick from the bundled beds
        #[arg(short, long)]
        bed: Option<PathBuf>,

        /// Display title for the clip
        #[arg(short, long, default_value = "News Briefing")]
        title: String,

        /// Directory the finished clip lands in
        #[arg(short, long, default_value = "clips")]
        output_dir: PathBuf,

        /// Asset directory holding the bundled beds
        #[arg(long, default_value = "assets")]
        asset_dir: PathBuf,

        /// JSON file overriding the default mix levels and windows
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Clear the staging directory of leftover intermediate files
    #[command(name = "clean")]
    Clean {
        /// Staging directory to clear
        #[arg(short, long, default_value = ".staging")]
        staging_dir: PathBuf,
    },
}
