mod adapters;
mod cli;
mod config;
mod core;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::context::Context;
use cli::{Cli, Commands, LogFormat};

fn main() {
    let args = Cli::parse();
    init_tracing(&args);

    if let Err(e) = run(&args) {
        cli::output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> crate::core::errors::Result<()> {
    let ctx = Context::from_args(args)?;

    match &args.command {
        Commands::Run { paths } => cli::commands::run::execute(&ctx, paths),
        Commands::Sweep { force } => cli::commands::sweep::execute(&ctx, *force, args.quiet),
        Commands::Decrypt {
            path,
            secret_key,
            out,
        } => cli::commands::decrypt::execute(&ctx, path, secret_key, out.as_deref()),
        Commands::Check => cli::commands::check::execute(&ctx),
    }
}

/// Logs go to stderr so `decrypt` can stream plaintext on stdout.
/// `RUST_LOG` takes precedence over `--verbose` / `--quiet`.
fn init_tracing(args: &Cli) {
    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match args.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
