//! elm-lens Language Server binary entry point
//!
//! Sets up logging and the tree-sitter parser, then hands over to the
//! library's `run_server()`.

use std::sync::Arc;

use anyhow::Context;
use elm_lens_lsp::{run_server, ElmParser};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let parser = ElmParser::new().context("Failed to load the Elm grammar")?;
    run_server(Arc::new(parser)).await;
    Ok(())
}
