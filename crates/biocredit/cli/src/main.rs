#[tokio::main]
async fn main() {
    if let Err(err) = biocredit_cli::run().await {
        eprintln!("error: {}", err);
        std::process::exit(err.exit_code());
    }
}
