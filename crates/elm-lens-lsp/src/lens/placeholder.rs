//! Lens data carried between the discover and resolve requests
//!
//! A [`LensPlaceholder`] is what discovery hands the editor: an anchor span
//! and a small serializable payload. The editor sends it back verbatim when
//! it wants the lens resolved, possibly much later and after the file has
//! been reparsed, so the payload holds names and positions, never nodes.
//! The anchor travels in the payload in byte columns; the lens range the
//! editor displays is in UTF-16 columns.

use elm_lens_syntax::{Span, SyntaxTree};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_lsp::lsp_types::{CodeLens, Command, Location};

use super::LensError;
use crate::position::{file_location, file_range, lsp_range};
use crate::workspace::{FileId, ReferenceSite, TreeAccess};

/// Command id for listing reference locations
pub const SHOW_REFERENCES_COMMAND: &str = "editor.action.showReferences";
/// Command id for adding a name to the module's exposing list
pub const EXPOSE_COMMAND: &str = "elm.expose";
/// Command id for removing a name from the module's exposing list
pub const UNEXPOSE_COMMAND: &str = "elm.unexpose";

/// Which lens a placeholder will resolve into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LensFamily {
    /// "exposed" / "local" toggle
    Exposure,
    /// "N references" counter
    ReferenceCount,
}

/// Opaque payload stored in `CodeLens.data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensData {
    pub family: LensFamily,
    pub file_id: FileId,
    pub subject_name: String,
    pub is_callable: bool,
}

/// `CodeLens.data` on the wire
#[derive(Serialize, Deserialize)]
struct Payload {
    #[serde(flatten)]
    data: LensData,
    anchor: Span,
}

/// A discovered, not yet resolved lens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensPlaceholder {
    pub range: Span,
    pub data: LensData,
}

impl LensPlaceholder {
    pub fn new(range: Span, family: LensFamily, file_id: &FileId, subject_name: &str, is_callable: bool) -> Self {
        Self {
            range,
            data: LensData {
                family,
                file_id: file_id.clone(),
                subject_name: subject_name.to_string(),
                is_callable,
            },
        }
    }

    pub fn family(&self) -> LensFamily {
        self.data.family
    }

    pub fn file_id(&self) -> &FileId {
        &self.data.file_id
    }

    /// Encode for a `textDocument/codeLens` response; `tree` is the tree
    /// the placeholder was discovered in
    pub fn to_code_lens(&self, tree: &SyntaxTree) -> Result<CodeLens, LensError> {
        let payload = Payload {
            data: self.data.clone(),
            anchor: self.range,
        };
        Ok(CodeLens {
            range: lsp_range(tree, self.range),
            command: None,
            data: Some(serde_json::to_value(payload)?),
        })
    }

    /// Decode a lens sent back in a `codeLens/resolve` request. The anchor
    /// comes from the payload, not from `lens.range`.
    pub fn from_code_lens(lens: &CodeLens) -> Result<Self, LensError> {
        let data = lens.data.clone().ok_or(LensError::MissingPayload)?;
        let payload: Payload = serde_json::from_value(data)?;
        Ok(Self {
            range: payload.anchor,
            data: payload.data,
        })
    }
}

/// What activating a resolved lens does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LensAction {
    ShowReferences {
        range: Span,
        references: Vec<ReferenceSite>,
        file_id: FileId,
    },
    Expose {
        file_id: FileId,
        name: String,
    },
    Unexpose {
        file_id: FileId,
        name: String,
    },
}

impl LensAction {
    pub fn command_id(&self) -> &'static str {
        match self {
            LensAction::ShowReferences { .. } => SHOW_REFERENCES_COMMAND,
            LensAction::Expose { .. } => EXPOSE_COMMAND,
            LensAction::Unexpose { .. } => UNEXPOSE_COMMAND,
        }
    }

    /// The single argument object passed with the command. Ranges are
    /// converted with the tree of the file they point into.
    pub fn argument(&self, trees: &dyn TreeAccess) -> Value {
        match self {
            LensAction::ShowReferences {
                range,
                references,
                file_id,
            } => {
                let locations: Vec<Location> = references
                    .iter()
                    .filter_map(|site| file_location(trees, &site.file_id, site.span))
                    .collect();
                json!({
                    "range": file_range(trees, file_id, *range),
                    "references": locations,
                    "uri": file_id,
                })
            }
            LensAction::Expose { file_id, name } | LensAction::Unexpose { file_id, name } => {
                json!({ "uri": file_id, "name": name })
            }
        }
    }
}

/// Title plus an optional action; no action means a label-only lens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensCommand {
    pub title: String,
    pub action: Option<LensAction>,
}

impl LensCommand {
    pub fn label(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            action: None,
        }
    }

    pub fn with_action(title: impl Into<String>, action: LensAction) -> Self {
        Self {
            title: title.into(),
            action: Some(action),
        }
    }

    pub fn to_command(&self, trees: &dyn TreeAccess) -> Command {
        match &self.action {
            Some(action) => Command {
                title: self.title.clone(),
                command: action.command_id().to_string(),
                arguments: Some(vec![action.argument(trees)]),
            },
            None => Command {
                title: self.title.clone(),
                command: String::new(),
                arguments: None,
            },
        }
    }
}

/// A lens ready to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLens {
    pub file_id: FileId,
    pub range: Span,
    pub command: LensCommand,
}

impl ResolvedLens {
    /// Encode for a `codeLens/resolve` response
    pub fn to_code_lens(&self, trees: &dyn TreeAccess) -> CodeLens {
        CodeLens {
            range: file_range(trees, &self.file_id, self.range),
            command: Some(self.command.to_command(trees)),
            data: None,
        }
    }
}
