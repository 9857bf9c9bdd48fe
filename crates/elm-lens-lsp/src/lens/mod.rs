//! Code lenses for Elm declarations
//!
//! Lenses are computed in two requests. `textDocument/codeLens` runs the
//! [`LensDiscoverer`], which only records where each lens goes and what it is
//! about. `codeLens/resolve` runs the [`LensResolver`] on one placeholder at
//! a time, which is where export lists are read and references counted.
//!
//! Two families exist:
//! - exposure: "exposed" or "local" on every top-level function and type,
//!   optionally toggling the module's exposing list
//! - reference count: "N references" on every top-level function and type
//!   and on the module name

pub mod discover;
pub mod placeholder;
pub mod resolve;


use thiserror::Error;

use crate::workspace::FileId;

pub use discover::LensDiscoverer;
pub use placeholder::{
    LensAction, LensCommand, LensData, LensFamily, LensPlaceholder, ResolvedLens,
    EXPOSE_COMMAND, SHOW_REFERENCES_COMMAND, UNEXPOSE_COMMAND,
};
pub use resolve::{reference_label, LensResolver};

/// Errors raised while encoding or resolving lenses
#[derive(Error, Debug)]
pub enum LensError {
    /// The file a placeholder was discovered in has no tree any more
    #[error("No syntax tree for {file_id}, although a lens was discovered in it")]
    MissingTree { file_id: FileId },

    /// `CodeLens.data` was absent
    #[error("Code lens carries no payload")]
    MissingPayload,

    /// `CodeLens.data` did not decode
    #[error("Malformed code lens payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
