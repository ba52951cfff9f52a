use clap::Parser;
use tower_lsp::{LspService, Server};

use phpdd_lsp::backend::Backend;
use phpdd_lsp::settings::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries the LSP transport, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting phpdd LSP (PID: {})", std::process::id());

    let settings = cli.settings();
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(move |client| Backend::new(client, settings));

    Server::new(stdin, stdout, socket).serve(service).await;
}
