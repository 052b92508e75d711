use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use brawl_pack::game::{self, GameTuning, InputScript};
use brawl_pack::{PackOptions, DEFAULT_OUTPUT};

#[derive(Parser)]
#[command(name = "brawl-pack", version)]
#[command(about = "Pack sprites and sounds into a single self-contained HTML brawler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a folder and write the self-contained HTML page
    Build {
        /// Asset folder to scan recursively
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output HTML file
        #[arg(short, default_value = DEFAULT_OUTPUT)]
        o: PathBuf,

        /// Page title
        #[arg(long, default_value = brawl_pack::runtime::DEFAULT_TITLE)]
        title: String,

        /// JSON file overriding gameplay tuning values
        #[arg(long)]
        tuning: Option<PathBuf>,
    },

    /// List the assets a build would embed, without writing anything
    Scan {
        /// Asset folder to scan recursively
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the game headlessly against the assets with scripted input
    Simulate {
        /// Asset folder to scan recursively
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Number of 60 Hz frames to run
        #[arg(long, default_value_t = 600)]
        frames: u32,

        /// Seed for spawn positions
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Input to hold during the run
        #[arg(long, value_enum, default_value_t = Script::Brawl)]
        script: Script,

        /// JSON file overriding gameplay tuning values
        #[arg(long)]
        tuning: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the page locally and rebuild it when assets change
    Dev {
        /// Asset folder to scan recursively
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Server port
        #[arg(long, default_value_t = 3333)]
        port: u16,

        /// JSON file overriding gameplay tuning values
        #[arg(long)]
        tuning: Option<PathBuf>,
    },
}

/// Scripted input for the simulate command.
#[derive(Clone, Copy, ValueEnum)]
enum Script {
    /// Press nothing
    Idle,
    /// Walk right
    Walk,
    /// Walk right swinging and casting
    Brawl,
}

impl From<Script> for InputScript {
    fn from(s: Script) -> Self {
        match s {
            Script::Idle => InputScript::Idle,
            Script::Walk => InputScript::Walk,
            Script::Brawl => InputScript::Brawl,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Build {
            dir,
            o,
            title,
            tuning,
        } => {
            let options = PackOptions {
                title,
                tuning: load_tuning(tuning.as_deref())?,
            };
            let output = brawl_pack::pack_dir(&dir, &options)
                .with_context(|| format!("cannot pack '{}'", dir.display()))?;
            println!("{}", output.bundle.summary());

            brawl_pack::write_artifact(&output, &o)?;
            log::info!("wrote {} ({} bytes)", o.display(), output.html.len());
            println!("✅ {} generated! Double-click to play.", o.display());
        }

        Commands::Scan { dir, json } => {
            let bundle = brawl_pack::assets::scan_dir(&dir)
                .with_context(|| format!("cannot scan '{}'", dir.display()))?;
            if json {
                let report = serde_json::json!({
                    "assets": bundle.listing(),
                    "collisions": bundle.collisions(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for entry in bundle.listing() {
                    let source = entry
                        .source
                        .as_deref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default();
                    println!(
                        "  {:<24} {:<11} {:>10} bytes {:>10} inlined  {}",
                        entry.name, entry.mime, entry.bytes, entry.encoded, source
                    );
                }
                for c in bundle.collisions() {
                    println!(
                        "  duplicate '{}': {} replaces {}",
                        c.name,
                        c.kept.display(),
                        c.replaced.display()
                    );
                }
                println!("{}", bundle.summary());
            }
        }

        Commands::Simulate {
            dir,
            frames,
            seed,
            script,
            tuning,
            json,
        } => {
            let tuning = load_tuning(tuning.as_deref())?;
            let bundle = brawl_pack::assets::scan_dir(&dir)
                .with_context(|| format!("cannot scan '{}'", dir.display()))?;
            let summary = game::run_headless(&bundle, &tuning, script.into(), frames, seed);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", bundle.summary());
                println!("frames:      {}", summary.frames);
                println!("players:     {}", summary.players);
                println!(
                    "enemies:     {} spawned, {} left",
                    summary.enemies_spawned, summary.enemies_left
                );
                if !summary.defeated.is_empty() {
                    println!("defeated:    {}", summary.defeated.join(", "));
                }
                println!(
                    "projectiles: {} cast, {} expired, {} in flight",
                    summary.projectiles_spawned,
                    summary.projectiles_expired,
                    summary.projectiles_in_flight
                );
                println!("combat:      {} swings, {} hits", summary.sword_swings, summary.hits);
                println!("music:       {}", if summary.music { "on" } else { "off" });
            }
        }

        Commands::Dev { dir, port, tuning } => {
            let options = PackOptions {
                tuning: load_tuning(tuning.as_deref())?,
                ..PackOptions::default()
            };
            brawl_pack::server::run_dev_server(dir, options, port).context("dev server failed")?;
        }
    }
    Ok(())
}

fn load_tuning(path: Option<&Path>) -> anyhow::Result<GameTuning> {
    match path {
        Some(path) => Ok(GameTuning::load(path)?),
        None => Ok(GameTuning::default()),
    }
}
