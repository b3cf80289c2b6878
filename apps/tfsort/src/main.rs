//! tfsort CLI binary entry point.
//! Resolves configuration, runs the lint, and maps the verdict to an exit code.

use clap::Parser;
use tfsort::cli::Cli;
use tfsort::{config, lint, output, utils};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let eff = match config::resolve_effective(cli.directory.as_deref(), cli.output.as_deref()) {
        Ok(eff) => eff,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    };
    if eff.output != "human" && eff.output != "json" {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            format!("Unknown output mode '{}'; using human.", eff.output)
        );
    }

    let mode = eff.output.clone();
    let result = match lint::run_lint(&eff, |v| output::print_violation(v, &mode)) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    };
    output::print_lint(&result, &eff.output, "tfsort");
    if !result.sorted {
        std::process::exit(1);
    }
}
