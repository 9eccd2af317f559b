#[tokio::main]
async fn main() {
    if let Err(e) = pharmatrace::run().await {
        tracing::error!("{e}");
        eprintln!("pharmatrace: {e}");
        std::process::exit(1);
    }
}
