#[tokio::main]
async fn main() {
    if let Err(err) = sheetsift::app::run().await {
        tracing::error!(error = %err, "exiting");
        std::process::exit(1);
    }
}
