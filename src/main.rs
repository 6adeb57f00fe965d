use clap::Parser;
use flipscan::cli::{run, Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run::dispatch(cli).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
