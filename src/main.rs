mod cli;

use discforge::config::{self, Config, DefaultArg};
use discforge_av::{check_tool, tools::get_tool_path, Finalized, HandBrake, ToolInfo};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "discforge=debug,discforge_av=debug,discforge_scan=debug".to_string()
        } else {
            "discforge=info,discforge_av=info,discforge_scan=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan { ref input, title, json } => {
            let config = load_config(&cli)?;
            scan_input(&config.handbrake(), input, title, json)
        }
        Commands::Encode {
            ref input,
            ref output,
            title,
            ref preset,
            overwrite,
            atomic,
            ref temp_dir,
            ref args,
        } => {
            let mut config = load_config(&cli)?;
            if let Some(overwrite) = overwrite {
                config.output.overwrite = overwrite.into();
            }
            if atomic {
                config.output.atomic = true;
            }
            if let Some(dir) = temp_dir {
                config.output.atomic = true;
                config.output.temp_dir = Some(dir.clone());
            }

            let hb = config.handbrake().with("input", [utf8_arg(input)?]);
            let hb = match title {
                Some(title) => hb.with("title", [title]),
                None => hb,
            };
            let hb = match preset {
                Some(preset) => hb.with("preset", [preset]),
                None => hb,
            };
            encode(&hb, args, output, &config)
        }
        Commands::Update => {
            let config = load_config(&cli)?;
            check_update(&config.handbrake())
        }
        Commands::Presets { json } => {
            let config = load_config(&cli)?;
            list_presets(&config.handbrake(), json)
        }
        Commands::CheckTools => {
            let config = load_config(&cli)?;
            check_tools(&config)
        }
        Commands::Validate {
            config: ref config_path,
        } => {
            let path = config_path.clone().or(cli.config.clone());
            validate_config(path.as_deref())
        }
        Commands::InitConfig { ref path, force } => {
            config::persist::save_config(path, &Config::default(), force)?;
            println!("Wrote default configuration to {}", path.display());
            Ok(())
        }
        Commands::Version => {
            println!("discforge {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Load config and apply the global command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = config::load_config_or_default(cli.config.as_deref())?;

    if let Some(ref bin_path) = cli.bin_path {
        config.handbrake.bin_path = bin_path.clone();
    }
    if cli.trace {
        config.handbrake.trace = true;
    }

    tracing::debug!("Using HandBrakeCLI at {:?}", config.handbrake.bin_path);
    Ok(config)
}

/// Paths go to HandBrakeCLI as strings, so they must be valid UTF-8.
fn utf8_arg(path: &Path) -> Result<&str> {
    path.to_str().with_context(|| format!("Path is not valid UTF-8: {:?}", path))
}

fn scan_input(hb: &HandBrake, input: &Path, title: Option<u32>, json: bool) -> Result<()> {
    let hb = hb.with("input", [utf8_arg(input)?]);
    let hb = match title {
        Some(title) => hb.with("title", [title]),
        None => hb,
    };

    tracing::info!("Scanning {:?}", input);
    let disc = hb
        .scan()
        .with_context(|| format!("Failed to scan {:?}", input))?;

    if json {
        let json_str = serde_json::to_string_pretty(&disc)?;
        println!("{}", json_str);
        return Ok(());
    }

    println!("Disc: {}", disc.name);
    println!("Titles: {}", disc.titles.len());
    for title in disc.titles.values() {
        print!(
            "\n  Title {}: {} ({}s), {} chapters",
            title.number,
            title.duration,
            title.seconds(),
            title.chapters.len()
        );
        if title.is_main_feature() {
            print!(" [main feature]");
        }
        println!();

        for chapter in title.ordered_chapters() {
            println!("    [{}] {}", chapter.number, chapter.duration);
        }
    }

    Ok(())
}

fn encode(hb: &HandBrake, extra: &[DefaultArg], output: &Path, config: &Config) -> Result<()> {
    let hb = extra
        .iter()
        .fold(hb.clone(), |hb, arg| hb.with(&arg.switch, &arg.values));

    tracing::info!("Encoding to {:?}", output);
    let outcome = hb
        .output(
            output,
            config.output.overwrite_policy(),
            &config.output.atomic_policy(),
        )
        .with_context(|| format!("Failed to encode to {:?}", output))?;

    match outcome {
        Finalized::Written(path) => println!("Written: {}", path.display()),
        Finalized::Skipped(path) => println!("Skipped: {}", path.display()),
        Finalized::LeftInPlace { working, target } => println!(
            "Left working file {} ({} exists)",
            working.display(),
            target.display()
        ),
    }

    Ok(())
}

fn check_update(hb: &HandBrake) -> Result<()> {
    if hb.update()? {
        println!("HandBrakeCLI is up to date");
    } else {
        println!("A newer HandBrakeCLI may be available");
    }
    Ok(())
}

fn list_presets(hb: &HandBrake, json: bool) -> Result<()> {
    let categories = hb.preset_list()?;

    if json {
        let json_str = serde_json::to_string_pretty(&categories)?;
        println!("{}", json_str);
        return Ok(());
    }

    for category in &categories {
        println!("{}", category.name);
        for preset in &category.presets {
            println!("  {}: {}", preset.name, preset.args);
        }
    }

    Ok(())
}

fn check_tools(config: &Config) -> Result<()> {
    println!("Checking external tools...\n");

    let bin_path = &config.handbrake.bin_path;
    let tool = match get_tool_path(discforge_av::handbrake::DEFAULT_BIN, Some(bin_path)) {
        Ok(path) => check_tool(&path.to_string_lossy()),
        Err(e) => {
            tracing::debug!("{}", e);
            ToolInfo {
                name: bin_path.display().to_string(),
                available: false,
                version: None,
                path: None,
            }
        }
    };

    let status = if tool.available { "✓" } else { "✗" };
    print!("{} {}", status, tool.name);

    if let Some(ref version) = tool.version {
        print!(" ({})", version.lines().next().unwrap_or(""));
    }

    if let Some(ref path) = tool.path {
        print!(" - {}", path.display());
    }

    println!();

    println!();
    if tool.available {
        println!("All required tools are available!");
    } else {
        println!("HandBrakeCLI is missing. Install it or set handbrake.bin_path.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, checking default locations");
            config::load_config_or_default(None)?
        }
    };

    println!("✓ Configuration is valid");
    println!("  HandBrakeCLI: {}", config.handbrake.bin_path.display());
    println!("  Trace: {}", config.handbrake.trace);
    println!("  Overwrite: {:?}", config.output.overwrite_policy());
    println!("  Atomic: {:?}", config.output.atomic_policy());
    println!("  Default arguments: {}", config.defaults.len());
    for arg in &config.defaults {
        let rendered: Vec<String> = std::iter::once(discforge_av::render_switch(&arg.switch))
            .chain(arg.values.iter().cloned())
            .collect();
        println!("    {}", rendered.join(" "));
    }

    Ok(())
}
