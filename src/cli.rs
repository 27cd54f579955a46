use clap::{Parser, Subcommand};
use discforge::args::parse_extra_arg;
use discforge::config::DefaultArg;
use discforge_av::OverwritePolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "discforge")]
#[command(author, version, about = "Scan and transcode discs with HandBrakeCLI")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// HandBrakeCLI executable (overrides config)
    #[arg(long, global = true)]
    pub bin_path: Option<PathBuf>,

    /// Stream HandBrakeCLI output while it runs
    #[arg(long, global = true)]
    pub trace: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a disc or file and list its titles and chapters
    Scan {
        /// Disc device, VIDEO_TS folder or media file
        #[arg(required = true)]
        input: PathBuf,

        /// Scan only this title (all titles by default)
        #[arg(short, long)]
        title: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transcode a title to an output file
    Encode {
        /// Disc device, VIDEO_TS folder or media file
        #[arg(required = true)]
        input: PathBuf,

        /// Output file
        #[arg(required = true)]
        output: PathBuf,

        /// Title to transcode
        #[arg(short, long)]
        title: Option<u32>,

        /// HandBrake preset name
        #[arg(short, long)]
        preset: Option<String>,

        /// What to do when the output already exists: replace, reject or skip
        #[arg(long, value_name = "POLICY")]
        overwrite: Option<OverwritePolicy>,

        /// Write to a working file and move it into place when done
        #[arg(long)]
        atomic: bool,

        /// Directory for the working file (implies --atomic)
        #[arg(long)]
        temp_dir: Option<PathBuf>,

        /// Extra HandBrakeCLI switch, as name or name=v1,v2 (repeatable)
        #[arg(long = "arg", value_name = "SWITCH", value_parser = parse_extra_arg)]
        args: Vec<DefaultArg>,
    },

    /// Check whether HandBrakeCLI is the latest release
    Update,

    /// List HandBrakeCLI's built-in presets
    Presets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that HandBrakeCLI is available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write it
        #[arg(default_value = "discforge.toml")]
        path: PathBuf,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display version information
    Version,
}
