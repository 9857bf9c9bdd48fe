//! Lens resolution
//!
//! Turns a placeholder back into a displayable lens. Every call fetches the
//! file's current tree through [`TreeAccess`]; nothing from discovery time
//! is reused, so a reparse between the two requests is harmless.

use tracing::{debug, error};

use super::placeholder::{LensAction, LensCommand, LensFamily, LensPlaceholder, ResolvedLens};
use super::LensError;
use crate::config::Capabilities;
use crate::workspace::{DefinitionResolver, ExposureClassifier, ReferenceResolver, TreeAccess};

/// Title for a reference count; only exactly one is singular
pub fn reference_label(count: usize) -> String {
    if count == 1 {
        "1 reference".to_string()
    } else {
        format!("{} references", count)
    }
}

/// Resolves placeholders against the collaborators it is built with
pub struct LensResolver<'a> {
    trees: &'a dyn TreeAccess,
    definitions: &'a dyn DefinitionResolver,
    references: &'a dyn ReferenceResolver,
    exposure: &'a dyn ExposureClassifier,
    capabilities: Capabilities,
}

impl<'a> LensResolver<'a> {
    pub fn new(
        trees: &'a dyn TreeAccess,
        definitions: &'a dyn DefinitionResolver,
        references: &'a dyn ReferenceResolver,
        exposure: &'a dyn ExposureClassifier,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            trees,
            definitions,
            references,
            exposure,
            capabilities,
        }
    }

    /// Resolve one placeholder.
    ///
    /// A missing tree means the file vanished after discovery found lenses in
    /// it; that is reported as [`LensError::MissingTree`] rather than papered
    /// over.
    pub fn resolve(&self, placeholder: &LensPlaceholder) -> Result<ResolvedLens, LensError> {
        let file_id = placeholder.file_id();
        let Some(tree) = self.trees.get(file_id) else {
            error!("No tree for {} while resolving a lens discovered in it", file_id);
            return Err(LensError::MissingTree {
                file_id: file_id.clone(),
            });
        };

        let command = match placeholder.family() {
            LensFamily::Exposure => {
                let name = &placeholder.data.subject_name;
                let exposed = self
                    .exposure
                    .is_exposed(&tree, name, placeholder.data.is_callable);
                self.exposure_command(exposed, placeholder)
            }
            LensFamily::ReferenceCount => {
                let anchor = tree
                    .root_node()
                    .named_descendant_for_point(placeholder.range.start);
                let definition =
                    anchor.and_then(|node| self.definitions.resolve(node, file_id, &tree));
                let references = match &definition {
                    Some(definition) => self.references.find_all(definition),
                    None => {
                        debug!(
                            "No definition for {} at {} in {}",
                            placeholder.data.subject_name, placeholder.range.start, file_id
                        );
                        Vec::new()
                    }
                };
                LensCommand::with_action(
                    reference_label(references.len()),
                    LensAction::ShowReferences {
                        range: placeholder.range,
                        references,
                        file_id: file_id.clone(),
                    },
                )
            }
        };

        Ok(ResolvedLens {
            file_id: file_id.clone(),
            range: placeholder.range,
            command,
        })
    }

    fn exposure_command(&self, exposed: bool, placeholder: &LensPlaceholder) -> LensCommand {
        let title = if exposed { "exposed" } else { "local" };
        if !self.capabilities.expose_unexpose_support {
            return LensCommand::label(title);
        }

        let file_id = placeholder.file_id().clone();
        let name = placeholder.data.subject_name.clone();
        let action = if exposed {
            LensAction::Unexpose { file_id, name }
        } else {
            LensAction::Expose { file_id, name }
        };
        LensCommand::with_action(title, action)
    }
}
