//! Workspace Intelligence Module
//!
//! The collaborators the lens and folding analyzers consume, and the
//! in-memory implementations the server wires them to.
//!
//! # Components
//!
//! - `traits`: `TreeAccess`, `DefinitionResolver`, `ReferenceResolver`,
//!   `ExposureClassifier` and `ModuleNameLocator`
//! - `forest`: the per-workspace cache of parsed trees, keyed by file id
//! - `resolver`: name-based definition and reference resolution over a forest
//! - `exposure`: export-list classification and module-name lookup

pub mod exposure;
pub mod forest;
pub mod resolver;
pub mod traits;


pub use exposure::{DeclaredModuleName, ExposingList};
pub use forest::{FileId, Forest};
pub use resolver::NameResolver;
pub use traits::{
    Definition, DefinitionResolver, ExposureClassifier, ModuleNameLocator, ReferenceResolver,
    ReferenceSite, SymbolKind, TreeAccess,
};
