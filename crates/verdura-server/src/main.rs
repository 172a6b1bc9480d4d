//! Verdura Server — application entry point.

#[tokio::main]
async fn main() {
    verdura_server::start_server().await;
}
