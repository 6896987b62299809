//! `wsd` binary entry point.

use std::path::Path;
use std::process;
use std::sync::Arc;

use tokio::io::BufReader;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use wsd::{Cli, Console, InteractionMode, Outcome, Palette, Result, Session, VERSION};

#[tokio::main]
async fn main() {
    let cli = Cli::from_env();

    if cli.version {
        println!("{} version {VERSION}", program_name());
        process::exit(0);
    }

    if cli.help {
        println!("Usage of {}:", program_name());
        print!("{}", Cli::usage());
        process::exit(0);
    }

    init_logging(cli.debug);

    let mode = InteractionMode::detect();
    let console = Arc::new(Console::stdio(Palette::detect(), mode));

    let code = match run(&cli, mode, Arc::clone(&console)).await {
        Ok(outcome) => {
            debug!(?outcome, "Exiting");
            0
        }
        Err(err) => {
            console.fatal(&err);
            1
        }
    };

    // A blocked stdin read would keep the runtime alive past this point.
    process::exit(code);
}

async fn run(cli: &Cli, mode: InteractionMode, console: Arc<Console>) -> Result<Outcome> {
    let config = cli.to_config()?;
    let session = Session::connect(config, mode, console).await?;
    session.run(BufReader::new(tokio::io::stdin())).await
}

/// Initialize tracing/logging.
///
/// `RUST_LOG` wins over the `-debug` flag.
fn init_logging(debug: bool) {
    let fallback = if debug { "wsd=debug" } else { "wsd=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or("wsd")
        .to_string()
}
