use crate::core::detectors::fallback::FallbackInstaller;
use crate::core::file_tree::FileTree;
use crate::core::host::{Decision, Prompter};
use crate::models::error::InstallError;
use crate::models::instruction::Instruction;
use crate::models::layout::{Confirmation, InstallerKind};
use tracing::{error, info};

/// The only place where a classification outcome depends on the user.
pub struct ConflictResolver<'a> {
    prompter: &'a dyn Prompter,
}

impl<'a> ConflictResolver<'a> {
    pub fn new(prompter: &'a dyn Prompter) -> Self {
        Self { prompter }
    }

    /// Asks every confirmation in order. The first refusal cancels the install.
    pub fn confirm_all(&self, confirmations: &[Confirmation]) -> Result<(), InstallError> {
        for confirmation in confirmations {
            match self
                .prompter
                .confirm_protected_paths(confirmation.installer, &confirmation.files)
            {
                Decision::Proceed => {
                    info!(
                        "{}: user accepted writing {} protected files",
                        confirmation.installer,
                        confirmation.files.len()
                    );
                }
                Decision::Cancel => {
                    error!("{}: protected paths declined", confirmation.installer);
                    return Err(InstallError::Cancelled {
                        installer: confirmation.installer,
                    });
                }
            }
        }
        Ok(())
    }

    /// Lets the user install everything as-is or give up. `tree` is the
    /// archive exactly as staged, wrapper included.
    pub fn resolve(
        &self,
        installer: InstallerKind,
        tree: &FileTree,
    ) -> Result<Vec<Instruction>, InstallError> {
        match self.prompter.prompt_on_conflict(installer, tree.all_files()) {
            Decision::Proceed => {
                info!("{installer}: installing {} files verbatim", tree.file_count());
                Ok(FallbackInstaller::instructions(tree))
            }
            Decision::Cancel => {
                error!("{installer}: installation cancelled");
                Err(InstallError::Cancelled { installer })
            }
        }
    }
}
