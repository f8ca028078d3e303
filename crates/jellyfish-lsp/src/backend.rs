//! LSP backend: document store, diagnostics, hover, completion and semantic
//! tokens for HTML and CSS buffers.

use std::collections::HashMap;
use std::sync::Arc;

use jellyfish_editor::highlight::{self, UnterminatedKind};
use jellyfish_editor::locator::{self, Context};
use jellyfish_editor::{symbols, EditorConfig, Mode, TokenClass};
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::{self, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::analysis::{offset_at, position_at, word_at};
use crate::settings;

// ── Document ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub mode: Mode,
    pub text: String,
}

/// Mode for a newly opened document: the client's language id first, then the
/// file extension. `None` means the document is not ours.
pub fn document_mode(language_id: &str, uri: &Url) -> Option<Mode> {
    language_id.parse().ok().or_else(|| Mode::from_path(uri.path()))
}

// ── Backend ───────────────────────────────────────────────────────────────────

pub struct Backend {
    client: Client,
    docs: Arc<RwLock<HashMap<Url, Document>>>,
    config: Arc<RwLock<EditorConfig>>,
}

impl Backend {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            docs: Arc::new(RwLock::new(HashMap::new())),
            config: Arc::new(RwLock::new(EditorConfig::default())),
        }
    }

    async fn update(&self, uri: Url, doc: Document) {
        let diagnostics = diagnostics(&doc);
        self.client
            .publish_diagnostics(uri.clone(), diagnostics, None)
            .await;
        self.docs.write().await.insert(uri, doc);
    }
}

// ── LanguageServer impl ───────────────────────────────────────────────────────

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let config = settings::from_init_options(params.initialization_options.as_ref())
            .map_err(|e| jsonrpc::Error::invalid_params(format!("{:#}", e)))?;
        log::info!("max suggestions: {}", config.max_suggestions);
        *self.config.write().await = config;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(vec!["<".to_string(), ":".to_string()]),
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                semantic_tokens_provider: Some(
                    SemanticTokensServerCapabilities::SemanticTokensOptions(
                        SemanticTokensOptions {
                            legend: legend(),
                            full: Some(SemanticTokensFullOptions::Bool(true)),
                            range: Some(false),
                            ..Default::default()
                        },
                    ),
                ),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "jellyfish-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "jellyfish-lsp ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        log::info!("shutdown requested");
        Ok(())
    }

    // ── Document lifecycle ────────────────────────────────────────────────────

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let item = params.text_document;
        match document_mode(&item.language_id, &item.uri) {
            Some(mode) => self.update(item.uri, Document { mode, text: item.text }).await,
            None => log::debug!("ignoring {} ({})", item.uri, item.language_id),
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let Some(mode) = self.docs.read().await.get(&uri).map(|d| d.mode) else {
            return;
        };
        // We request FULL sync, so the last change holds the whole text.
        if let Some(change) = params.content_changes.into_iter().last() {
            self.update(uri, Document { mode, text: change.text }).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.docs.write().await.remove(&params.text_document.uri);
    }

    // ── Hover ─────────────────────────────────────────────────────────────────

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let pos = &params.text_document_position_params.position;

        let docs = self.docs.read().await;
        let Some(doc) = docs.get(uri) else {
            return Ok(None);
        };
        Ok(hover_markdown(doc, pos).map(markdown_hover))
    }

    // ── Completion ────────────────────────────────────────────────────────────

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let pos = &params.text_document_position.position;

        let docs = self.docs.read().await;
        let Some(doc) = docs.get(uri) else {
            return Ok(None);
        };
        let config = self.config.read().await;
        let items = completion_items(doc, pos, &config);

        Ok(Some(CompletionResponse::List(CompletionList {
            // The engine truncates, so a longer word may surface other entries.
            is_incomplete: true,
            items,
        })))
    }

    // ── Semantic tokens ───────────────────────────────────────────────────────

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let docs = self.docs.read().await;
        let Some(doc) = docs.get(&params.text_document.uri) else {
            return Ok(None);
        };
        Ok(Some(SemanticTokensResult::Tokens(SemanticTokens {
            result_id: None,
            data: semantic_tokens(doc),
        })))
    }
}

// ── Completion ────────────────────────────────────────────────────────────────

/// Completion items at `pos`, in suggestion order, each replacing the typed
/// word (and its `<` for tags) with the symbol's snippet.
pub fn completion_items(doc: &Document, pos: &Position, config: &EditorConfig) -> Vec<CompletionItem> {
    let text = doc.text.as_str();
    let offset = offset_at(text, pos);
    let located = locator::locate(text, offset, doc.mode);
    let context = match located.context {
        Context::Text if !config.text_context_completions => Context::None,
        c => c,
    };
    let table = symbols::table(doc.mode, context);
    let start = locator::word_start(text, offset, context);
    let range = Range::new(position_at(text, start), *pos);
    let bracketed = text[start..offset].starts_with('<');

    symbols::filter(table, located.word, config.max_suggestions)
        .into_iter()
        .enumerate()
        .map(|(i, s)| CompletionItem {
            label: s.key.to_string(),
            kind: Some(item_kind(context)),
            detail: Some(s.description.to_string()),
            sort_text: Some(format!("{:03}", i)),
            filter_text: Some(if bracketed { format!("<{}", s.key) } else { s.key.to_string() }),
            text_edit: Some(CompletionTextEdit::Edit(TextEdit {
                range,
                new_text: s.insert_text.to_string(),
            })),
            ..Default::default()
        })
        .collect()
}

fn item_kind(context: Context) -> CompletionItemKind {
    match context {
        Context::Property => CompletionItemKind::PROPERTY,
        Context::Value => CompletionItemKind::VALUE,
        _ => CompletionItemKind::SNIPPET,
    }
}

// ── Hover ─────────────────────────────────────────────────────────────────────

pub fn hover_markdown(doc: &Document, pos: &Position) -> Option<String> {
    let word = word_at(&doc.text, pos)?;
    let symbol = symbols::lookup(doc.mode, word)?;
    Some(format!(
        "**{}**\n\n{}\n\n```{}\n{}\n```",
        symbol.key, symbol.description, doc.mode, symbol.insert_text
    ))
}

fn markdown_hover(md: String) -> Hover {
    Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: md,
        }),
        range: None,
    }
}

// ── Semantic tokens ───────────────────────────────────────────────────────────

const TOKEN_TYPES: [SemanticTokenType; 7] = [
    SemanticTokenType::COMMENT,
    SemanticTokenType::OPERATOR,
    SemanticTokenType::CLASS,
    SemanticTokenType::PROPERTY,
    SemanticTokenType::STRING,
    SemanticTokenType::TYPE,
    SemanticTokenType::ENUM_MEMBER,
];

fn legend() -> SemanticTokensLegend {
    SemanticTokensLegend {
        token_types: TOKEN_TYPES.to_vec(),
        token_modifiers: vec![],
    }
}

/// Index into [`TOKEN_TYPES`]; `None` for text left unstyled.
fn token_type(class: TokenClass) -> Option<u32> {
    match class {
        TokenClass::Plain => None,
        TokenClass::Comment => Some(0),
        TokenClass::TagBracket | TokenClass::Punctuation => Some(1),
        TokenClass::Selector => Some(2),
        TokenClass::AttrName | TokenClass::Property => Some(3),
        TokenClass::String => Some(4),
        TokenClass::TagName => Some(5),
        TokenClass::Value => Some(6),
    }
}

/// Highlighter runs as delta-encoded semantic tokens. Runs crossing a line
/// break are split, one token per line.
pub fn semantic_tokens(doc: &Document) -> Vec<SemanticToken> {
    let mut data = Vec::new();
    let (mut line, mut col) = (0u32, 0u32);
    let (mut prev_line, mut prev_col) = (0u32, 0u32);

    for run in highlight::tokenize(&doc.text, doc.mode) {
        let ty = token_type(run.class);
        for (i, piece) in run.text.split('\n').enumerate() {
            if i > 0 {
                line += 1;
                col = 0;
            }
            let piece = piece.strip_suffix('\r').unwrap_or(piece);
            let length = piece.encode_utf16().count() as u32;
            if let Some(token_type) = ty.filter(|_| length > 0) {
                let delta_line = line - prev_line;
                let delta_start = if delta_line == 0 { col - prev_col } else { col };
                data.push(SemanticToken {
                    delta_line,
                    delta_start,
                    length,
                    token_type,
                    token_modifiers_bitset: 0,
                });
                prev_line = line;
                prev_col = col;
            }
            col += length;
        }
    }
    data
}

// ── Diagnostics ───────────────────────────────────────────────────────────────

pub fn diagnostics(doc: &Document) -> Vec<Diagnostic> {
    highlight::unterminated(&doc.text, doc.mode)
        .into_iter()
        .map(|u| {
            let (what, width) = match (u.kind, doc.mode) {
                (UnterminatedKind::Comment, Mode::Html) => ("comment", 4),
                (UnterminatedKind::Comment, Mode::Css) => ("comment", 2),
                (UnterminatedKind::String, _) => ("string", 1),
            };
            Diagnostic {
                range: Range::new(
                    position_at(&doc.text, u.offset),
                    position_at(&doc.text, u.offset + width),
                ),
                severity: Some(DiagnosticSeverity::WARNING),
                source: Some("jellyfish-lsp".to_string()),
                message: format!("unterminated {}", what),
                ..Default::default()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(text: &str) -> Document {
        Document { mode: Mode::Html, text: text.to_string() }
    }

    fn css(text: &str) -> Document {
        Document { mode: Mode::Css, text: text.to_string() }
    }

    fn edit(item: &CompletionItem) -> &TextEdit {
        match item.text_edit.as_ref() {
            Some(CompletionTextEdit::Edit(e)) => e,
            other => panic!("unexpected edit {:?}", other),
        }
    }

    #[test]
    fn mode_from_language_id_or_extension() {
        let uri = Url::parse("file:///site/index.HTML").unwrap();
        assert_eq!(document_mode("html", &uri), Some(Mode::Html));
        assert_eq!(document_mode("plaintext", &uri), Some(Mode::Html));
        let uri = Url::parse("file:///site/app.css").unwrap();
        assert_eq!(document_mode("css", &uri), Some(Mode::Css));
        let uri = Url::parse("file:///site/main.rs").unwrap();
        assert_eq!(document_mode("rust", &uri), None);
    }

    #[test]
    fn tag_completion_replaces_bracket_and_word() {
        let doc = html("<p>\n  <di");
        let items = completion_items(&doc, &Position::new(1, 5), &EditorConfig::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "div");
        assert_eq!(items[0].filter_text.as_deref(), Some("<div"));
        let e = edit(&items[0]);
        assert_eq!(e.range, Range::new(Position::new(1, 2), Position::new(1, 5)));
        assert_eq!(e.new_text, "<div></div>");
    }

    #[test]
    fn bare_bracket_lists_tags() {
        let doc = html("<");
        let items = completion_items(&doc, &Position::new(0, 1), &EditorConfig::default().max_suggestions(3));
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["div", "span", "p"]);
        assert_eq!(items[2].sort_text.as_deref(), Some("002"));
    }

    #[test]
    fn css_value_completion() {
        let doc = css("a {\n  display: fl");
        let items = completion_items(&doc, &Position::new(1, 13), &EditorConfig::default());
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["flex", "flex-start", "flex-end"]);
        assert_eq!(items[0].kind, Some(CompletionItemKind::VALUE));
        assert_eq!(edit(&items[0]).range.start, Position::new(1, 11));
    }

    #[test]
    fn text_context_follows_config() {
        let doc = html("<p>di");
        let pos = Position::new(0, 5);
        assert_eq!(completion_items(&doc, &pos, &EditorConfig::default()).len(), 1);
        let strict = EditorConfig::default().text_context_completions(false);
        assert!(completion_items(&doc, &pos, &strict).is_empty());
    }

    #[test]
    fn hover_describes_symbol() {
        let doc = css("p { margin: 0; }");
        let md = hover_markdown(&doc, &Position::new(0, 6)).unwrap();
        assert!(md.starts_with("**margin**"));
        assert!(md.contains("Outer spacing"));
        assert!(hover_markdown(&doc, &Position::new(0, 0)).is_none());
    }

    #[test]
    fn semantic_tokens_are_delta_encoded() {
        let doc = html("<h1>Hi</h1>");
        let tokens = semantic_tokens(&doc);
        let got: Vec<(u32, u32, u32, u32)> = tokens
            .iter()
            .map(|t| (t.delta_line, t.delta_start, t.length, t.token_type))
            .collect();
        assert_eq!(
            got,
            vec![(0, 0, 1, 1), (0, 1, 2, 5), (0, 2, 1, 1), (0, 3, 2, 1), (0, 2, 2, 5), (0, 2, 1, 1)]
        );
    }

    #[test]
    fn multiline_comment_splits_per_line() {
        let doc = css("/* a\nbc */");
        let tokens = semantic_tokens(&doc);
        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[0].delta_line, tokens[0].length), (0, 4));
        assert_eq!((tokens[1].delta_line, tokens[1].delta_start, tokens[1].length), (1, 0, 5));
    }

    #[test]
    fn unterminated_constructs_warn() {
        let doc = html("<p class=\"x>\n<!-- note");
        let diags = diagnostics(&doc);
        let messages: Vec<&str> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(messages, vec!["unterminated string", "unterminated comment"]);
        assert_eq!(diags[1].range.start, Position::new(1, 0));
        assert_eq!(diags[1].severity, Some(DiagnosticSeverity::WARNING));
        assert!(diagnostics(&css("p { color: red; }")).is_empty());
    }
}
