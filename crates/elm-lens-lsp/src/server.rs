//! Language server wiring
//!
//! [`Backend`] keeps one [`Forest`] for the workspace and answers folding and
//! code lens requests from it. Documents are reparsed in full on every change.
//! Closing a document keeps its last tree so reference counts stay
//! workspace-wide.
//! Failures are logged and answered with an empty or unchanged result; no
//! error is returned to the client.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    CodeLens, CodeLensOptions, CodeLensParams, DidChangeTextDocumentParams,
    DidCloseTextDocumentParams, DidOpenTextDocumentParams, FoldingRange, FoldingRangeParams,
    FoldingRangeProviderCapability, InitializeParams, InitializeResult, InitializedParams,
    MessageType, PositionEncodingKind, ServerCapabilities, ServerInfo, TextDocumentSyncCapability, TextDocumentSyncKind,
    Url,
};
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing::{debug, error, info, warn};

use crate::config::{Capabilities, Settings};
use crate::lens::{LensDiscoverer, LensPlaceholder, LensResolver};
use crate::parser::DocumentParser;
use crate::structural::FoldingAnalyzer;
use crate::workspace::{DeclaredModuleName, ExposingList, FileId, Forest, NameResolver, TreeAccess};

/// LSP Backend state
pub struct Backend {
    /// LSP client for sending notifications
    client: Client,
    /// Source-to-tree parser
    parser: Arc<dyn DocumentParser>,
    /// Last parsed tree of every document seen since startup
    forest: Arc<RwLock<Forest>>,
    /// Negotiated at `initialize`
    capabilities: Arc<RwLock<Capabilities>>,
}

impl Backend {
    pub fn new(client: Client, parser: Arc<dyn DocumentParser>) -> Self {
        Self {
            client,
            parser,
            forest: Arc::new(RwLock::new(Forest::new())),
            capabilities: Arc::new(RwLock::new(Capabilities::default())),
        }
    }

    /// Capabilities currently in effect
    pub async fn capabilities(&self) -> Capabilities {
        *self.capabilities.read().await
    }

    /// Parse `text` and store the tree, or drop the stale one if parsing fails
    async fn update_document(&self, uri: &Url, text: &str) {
        let file_id = FileId::from(uri);
        let tree = self.parser.parse(text);
        let mut forest = self.forest.write().await;
        match tree {
            Some(tree) => {
                forest.insert(file_id, tree);
            }
            None => {
                warn!("Failed to parse document {}", uri);
                forest.remove(&file_id);
            }
        }
    }

    /// Settings file from the workspace root, falling back to defaults
    fn load_settings(params: &InitializeParams) -> Settings {
        let Some(root) = workspace_root(params) else {
            return Settings::default();
        };
        match Settings::load_from_root(&root) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring settings in {}: {}", root.display(), e);
                Settings::default()
            }
        }
    }
}

#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| &folder.uri)
        .or(params.root_uri.as_ref())
        .and_then(|uri| uri.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("elm-lens LSP server initializing");

        let settings = Self::load_settings(&params);
        let capabilities = match &params.initialization_options {
            Some(options) => settings.capabilities.with_initialization_options(options),
            None => settings.capabilities,
        };
        debug!("Negotiated capabilities: {:?}", capabilities);
        *self.capabilities.write().await = capabilities;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                position_encoding: Some(PositionEncodingKind::UTF16),
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                folding_range_provider: Some(FoldingRangeProviderCapability::Simple(true)),
                code_lens_provider: Some(CodeLensOptions {
                    resolve_provider: Some(true),
                }),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "elm-lens-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        info!("elm-lens LSP server initialized");
        self.client
            .log_message(MessageType::INFO, "elm-lens language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        info!("elm-lens LSP server shutting down");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("Document opened: {}", params.text_document.uri);
        self.update_document(&params.text_document.uri, &params.text_document.text)
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        debug!("Document changed: {}", params.text_document.uri);
        // FULL sync: the whole text is in the first change
        if let Some(change) = params.content_changes.into_iter().next() {
            self.update_document(&params.text_document.uri, &change.text)
                .await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        // The file is still part of the workspace; keep its tree
        debug!("Document closed: {}", params.text_document.uri);
    }

    async fn folding_range(&self, params: FoldingRangeParams) -> Result<Option<Vec<FoldingRange>>> {
        let uri = params.text_document.uri;
        debug!("Folding range request for: {}", uri);

        let Some(tree) = self.forest.read().await.get(&FileId::from(&uri)) else {
            warn!("Document not found for folding: {}", uri);
            return Ok(None);
        };

        let ranges = FoldingAnalyzer::generate_ranges(Some(tree.as_ref()));
        debug!("Generated {} folding ranges for {}", ranges.len(), uri);

        Ok(Some(ranges))
    }

    async fn code_lens(&self, params: CodeLensParams) -> Result<Option<Vec<CodeLens>>> {
        let uri = params.text_document.uri;
        debug!("Code lens request for: {}", uri);

        let file_id = FileId::from(&uri);
        let Some(tree) = self.forest.read().await.get(&file_id) else {
            warn!("Document not found for code lens: {}", uri);
            return Ok(None);
        };

        let lenses: Vec<CodeLens> = LensDiscoverer::new(&DeclaredModuleName)
            .discover(Some(tree.as_ref()), &file_id)
            .iter()
            .filter_map(|placeholder| match placeholder.to_code_lens(&tree) {
                Ok(lens) => Some(lens),
                Err(e) => {
                    warn!("Dropping lens for {}: {}", placeholder.data.subject_name, e);
                    None
                }
            })
            .collect();
        debug!("Discovered {} code lenses for {}", lenses.len(), uri);

        Ok(Some(lenses))
    }

    async fn code_lens_resolve(&self, lens: CodeLens) -> Result<CodeLens> {
        let placeholder = match LensPlaceholder::from_code_lens(&lens) {
            Ok(placeholder) => placeholder,
            Err(e) => {
                warn!("Cannot resolve code lens: {}", e);
                return Ok(lens);
            }
        };

        let capabilities = self.capabilities().await;
        let forest = self.forest.read().await;
        let names = NameResolver::new(&forest);
        let resolver = LensResolver::new(&*forest, &names, &names, &ExposingList, capabilities);

        match resolver.resolve(&placeholder) {
            Ok(resolved) => {
                debug!(
                    "Resolved {:?} lens for {} as {:?}",
                    placeholder.family(),
                    placeholder.data.subject_name,
                    resolved.command.title
                );
                Ok(resolved.to_code_lens(&*forest))
            }
            Err(e) => {
                error!("Failed to resolve code lens: {}", e);
                Ok(lens)
            }
        }
    }
}

/// Serve LSP over stdin/stdout until the client disconnects
pub async fn run_server(parser: Arc<dyn DocumentParser>) {
    info!(
        "Starting elm-lens Language Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(move |client| Backend::new(client, parser));
    Server::new(stdin, stdout, socket).serve(service).await;
}
