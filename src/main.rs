//! Keyboard Repack - build 3rd party keyboards from the Gaia keyboard app
//!
//! Builds the Gaia keyboard for each requested layout and turns the output
//! into a standalone `<lang>-keyboard` app bundle.

use clap::Parser;
use std::io::IsTerminal;
use keyboard_repack::cli::{ExitCode, RepackArgs};
use keyboard_repack::constants::APP_BINARY_NAME;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build 3rd party keyboards for every language supported by the Gaia keyboard
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    repack: RepackArgs,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .without_time(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = cli.repack.execute() {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code.code());
    }

    std::process::exit(ExitCode::Success.code());
}
