use toneforge_mock_reaper::{MockServer, ServerConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Quiet by default; RUST_LOG=info surfaces the listen address.
    env_logger::init();

    let config = ServerConfig::from_env();
    let server = MockServer::bind(&config).await?;
    server.run().await
}
