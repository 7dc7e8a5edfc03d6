use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> eyre::Result<()> {
    // stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let output = cli::Args::parse().run()?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
