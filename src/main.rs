use clap::Parser;
use tracing_subscriber::EnvFilter;
use web_fixture::cli::commands::{cmd_extract, cmd_fill};
use web_fixture::cli::config::{Cli, Commands, build_fixture_config, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Fill {
            url,
            form,
            seed,
            seed_only,
            submit,
            rng_seed,
        } => {
            let config = build_fixture_config(
                config,
                cli.selector,
                cli.browser_server.as_deref(),
                rng_seed,
            );
            cmd_fill(config, &url, &form, seed.as_deref(), seed_only, submit)?;
        }
        Commands::Extract { url, form } => {
            let config = build_fixture_config(config, cli.selector, cli.browser_server.as_deref(), None);
            cmd_extract(config, &url, &form)?;
        }
    }

    Ok(())
}

/// RUST_LOG wins; otherwise -v raises the level from warn.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
