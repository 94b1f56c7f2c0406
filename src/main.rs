use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = b2a::api::Cli::parse();
    if let Err(e) = b2a::api::run_cli(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
