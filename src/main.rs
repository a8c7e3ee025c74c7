use clap::Parser;

use cmdwatch::Settings;
use cmdwatch::cli::commands::{init, run, verbs, watch};
use cmdwatch::cli::{Cli, Commands};

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };
    settings.map_err(|e| anyhow::anyhow!("Configuration error: {e}"))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    cmdwatch::logging::init_with_config(&settings.logging);

    let result = match cli.command {
        Commands::Watch {
            file,
            root,
            settle_ms,
        } => watch::run_watch(&settings, file, root, settle_ms).await,
        Commands::Run { text, root } => match run::run_command(&settings, &text, root).await {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(1),
            Err(e) => Err(e),
        },
        Commands::Verbs => {
            verbs::run_verbs();
            Ok(())
        }
        Commands::Init { force } => init::run_init(force),
        Commands::Config => init::run_config(&settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
