use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = flaggate::cli::Cli::parse();
    if let Err(e) = flaggate::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
