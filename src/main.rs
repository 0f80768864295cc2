#[tokio::main]
async fn main() {
    let code = utilkit::app::startup::startup().await;
    std::process::exit(code);
}
