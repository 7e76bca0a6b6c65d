#[tokio::main]
async fn main() {
    let code = handoff_queue::app::startup::startup().await;
    std::process::exit(code);
}
