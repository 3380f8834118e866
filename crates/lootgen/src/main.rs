mod config;
mod discovery;
mod generate;
mod output;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use config::{GeneratorConfig, DEFAULT_CONFIG_PATH};
use tracing::{error, info};

/// Generate Java loot table declarations from loot table JSON files
#[derive(Parser)]
#[command(name = "lootgen")]
#[command(about = "Generate Java loot table declarations from loot table JSON", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: lootgen.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory scanned for loot table JSON files
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// File the generated declarations are written to
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line replace the config file values.
    fn apply_overrides(self, config: &mut GeneratorConfig) {
        if let Some(source) = self.source {
            config.source.directory = source;
        }
        if let Some(output) = self.output {
            config.output.path = output;
        }
    }
}

/// Run one generation and return the process exit code. Failures are logged
/// and also written to `err_out`, so they show up even with logging off.
fn run(config: &GeneratorConfig, err_out: &mut impl Write) -> i32 {
    match generate::generate(config) {
        Ok(summary) => {
            info!(
                "Wrote {} loot tables ({} pools, {} entries) to {}",
                summary.tables,
                summary.pools,
                summary.entries,
                summary.output.display()
            );
            0
        }
        Err(e) => {
            error!("{e}");
            let _ = writeln!(err_out, "lootgen failed: {e}");
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let mut config =
        match GeneratorConfig::load_or_default(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_PATH)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                std::process::exit(1);
            }
        };
    cli.apply_overrides(&mut config);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        "lootgen v{} reading {} (depth {})",
        env!("CARGO_PKG_VERSION"),
        config.source.directory.display(),
        config.source.max_depth
    );

    let code = run(&config, &mut io::stderr());
    if code != 0 {
        std::process::exit(code);
    }
}
