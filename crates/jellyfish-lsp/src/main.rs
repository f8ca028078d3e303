use tower_lsp::{LspService, Server};

mod analysis;
mod backend;
mod logging;
mod settings;

use backend::Backend;
use logging::{init_logging, LoggingConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig {
        env_filter: std::env::var("JELLYFISH_LOG").ok(),
        ..LoggingConfig::default()
    });
    log::info!("jellyfish-lsp {} starting on stdio", env!("CARGO_PKG_VERSION"));

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();
    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;

    log::info!("client disconnected");
    Ok(())
}
