#[tokio::main]
async fn main() {
    if let Err(e) = authcore::run().await {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
