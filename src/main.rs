use asset_prep::batch::{self, BatchConfig};
use asset_prep::config::{self, AppConfig};
use asset_prep::imaging::RustBackend;
use asset_prep::output;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "asset-prep")]
#[command(about = "Resize and recompress documentation screenshots into WebP")]
#[command(long_about = "\
Resize and recompress documentation screenshots into WebP

Run from the project root. With no command, runs `optimize`.

Inputs and outputs (stock defaults, override in asset-prep.toml):

  ShortcutCycle/App Store Connect Assets/Screenshots/
  ├── HUD Light.png          → docs/assets/images/hud-light.webp        (1800px)
  │                          → docs/assets/images/hud-light-small.webp  (900px)
  └── ...
  ShortcutCycle/ShortcutCycle/Assets.xcassets/AppIcon.appiconset/1024.png
                             → docs/assets/images/app-icon.webp         (160x160)

Missing or unreadable sources are reported and skipped; outputs are
overwritten on every run.

Run 'asset-prep gen-config' to print a documented asset-prep.toml.")]
#[command(version = env!("ASSET_PREP_VERSION"))]
struct Cli {
    /// Project root; config and relative paths resolve against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file [default: <root>/asset-prep.toml, optional]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the output directory
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Override the WebP quality (1-100)
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..=100))]
    quality: Option<u32>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resize and encode every configured source (default)
    Optimize,
    /// Show what `optimize` would write, without writing anything
    Check,
    /// Print a stock asset-prep.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.as_ref().unwrap_or(&Command::Optimize) {
        Command::Optimize => {
            let batch_config = prepare(&cli)?;
            let report =
                batch::run_batch(&batch_config, &mut |event| output::print_event(&event))?;
            output::print_summary(&report);
        }
        Command::Check => {
            let batch_config = prepare(&cli)?;
            let planned = batch::plan_batch(&RustBackend::new(), &batch_config);
            output::print_plan(&planned);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config, warn when the root looks wrong, and resolve paths.
fn prepare(cli: &Cli) -> Result<BatchConfig, config::ConfigError> {
    let app_config = load_app_config(cli)?;
    output::print_root_warning(
        &cli.root,
        &config::missing_project_markers(&cli.root, &app_config.project_markers),
    );
    Ok(BatchConfig::from_app_config(&app_config, &cli.root))
}

/// Load the config file and apply command-line overrides on top.
fn load_app_config(cli: &Cli) -> Result<AppConfig, config::ConfigError> {
    let mut app_config = match &cli.config {
        Some(path) => config::load_config_file(path)?,
        None => config::load_config(&cli.root)?,
    };
    if let Some(output) = &cli.output {
        app_config.output_dir = path_string(output);
    }
    if let Some(quality) = cli.quality {
        app_config.output.quality = quality;
    }
    Ok(app_config)
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
