//! tower-lsp wiring between the host editor and the check controller.

use std::sync::Arc;

use chrono::Local;
use serde_json::Value;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::controller::{CheckController, CheckOutcome};
use crate::report::{self, ReportMode};
use crate::settings::Settings;

pub const CMD_HELLO: &str = "phpdd.hello";
pub const CMD_CHECK: &str = "phpdd.check";

#[derive(Clone)]
pub struct Backend {
    pub client: Client,
    pub controller: Arc<CheckController>,
}

impl Backend {
    pub fn new(client: Client, settings: Settings) -> Self {
        Self {
            client,
            controller: Arc::new(CheckController::new(settings)),
        }
    }

    /// Arms the debounced silent scan for a qualifying focus event; a new
    /// event within the delay supersedes the previous timer.
    async fn schedule_silent_check(&self, url: Url) {
        if !self.controller.wants_silent_check(&url) {
            return;
        }

        let this = self.clone();
        let target = url.clone();
        self.controller
            .trigger
            .arm(self.controller.settings.debounce, async move {
                this.run_check(Some(target), ReportMode::Silent).await;
            })
            .await;
    }

    /// The single dispatch boundary for both scan flavors. Errors never
    /// escape into the host's event handling; reporting is the only place
    /// the mode is consulted.
    pub async fn run_check(&self, requested: Option<Url>, mode: ReportMode) {
        match self.controller.check(requested).await {
            Ok(outcome) => self.report(outcome, mode).await,
            Err(err) => match mode {
                ReportMode::Interactive => {
                    tracing::warn!("check failed: {err}");
                    self.client
                        .show_message(MessageType::WARNING, err.to_string())
                        .await;
                }
                ReportMode::Silent => tracing::debug!("silent check skipped: {err}"),
            },
        }
    }

    async fn report(&self, outcome: CheckOutcome, mode: ReportMode) {
        self.client
            .publish_diagnostics(outcome.url.clone(), outcome.diagnostics.clone(), None)
            .await;

        if outcome.findings.is_empty() {
            if mode == ReportMode::Interactive {
                self.client
                    .show_message(MessageType::INFO, report::NO_ISSUES)
                    .await;
            }
            return;
        }

        let file = outcome.url.path();
        let detail = report::format_report(file, &outcome.findings, Local::now());
        self.client.log_message(MessageType::WARNING, detail).await;

        if mode == ReportMode::Interactive {
            let summary = report::format_summary(file, &outcome.findings);
            self.client.show_message(MessageType::INFO, summary).await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                execute_command_provider: Some(ExecuteCommandOptions {
                    commands: vec![CMD_HELLO.to_string(), CMD_CHECK.to_string()],
                    work_done_progress_options: Default::default(),
                }),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "phpdd LSP initialized!")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let text = params.text_document.text;

        self.controller.open_document(uri.clone(), &text).await;
        self.schedule_silent_check(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;

        if let Some(change) = params.content_changes.into_iter().last() {
            self.controller
                .change_document(uri.clone(), &change.text)
                .await;
            // The edit cleared this document's diagnostics; mirror that on
            // the client until the next scan replaces them.
            self.client
                .publish_diagnostics(uri.clone(), vec![], None)
                .await;
        }
        self.schedule_silent_check(uri).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.client
            .publish_diagnostics(uri.clone(), vec![], None)
            .await;
        self.controller.close_document(&uri).await;
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        match params.command.as_str() {
            CMD_HELLO => {
                self.client
                    .show_message(MessageType::INFO, "Hello from phpdd!")
                    .await;
            }
            CMD_CHECK => {
                let requested = params
                    .arguments
                    .first()
                    .and_then(Value::as_str)
                    .and_then(|raw| Url::parse(raw).ok());
                self.run_check(requested, ReportMode::Interactive).await;
            }
            other => tracing::warn!("unknown command: {other}"),
        }

        Ok(None)
    }
}
