#[tokio::main]
async fn main() {
    if let Err(err) = decision_scale::server::run().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
