use crate::config::EngineSettings;
use crate::core::file_tree::FileTree;
use crate::core::giftwrap::Giftwrap;
use crate::core::host::{Prompter, SourceReader, StagingDir};
use crate::core::pipeline::Pipeline;
use crate::core::resolver::ConflictResolver;
use crate::models::error::InstallError;
use crate::models::instruction::Instruction;
use crate::models::layout::{Classification, InstallerKind, LayoutKind};
use crate::models::mod_dto::{InstallContextPaths, ModInfo};
use crate::utils::context::InstallContext;
use serde::Serialize;
use tracing::{info, instrument, warn};

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Supported {
    pub supported: bool,
    pub installer: InstallerKind,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct InstallResult {
    pub instructions: Vec<Instruction>,
    pub installer: InstallerKind,
    /// `Fallback` whenever the user chose to install an unclassified archive as-is.
    pub layout: LayoutKind,
}

/// Entry point for the host.
pub struct Engine<'a> {
    settings: EngineSettings,
    prompter: &'a dyn Prompter,
    reader: Option<&'a dyn SourceReader>,
}

impl<'a> Engine<'a> {
    /// Without a `reader`, staged files are read from `staging_dir` of the
    /// paths passed to `install`.
    pub fn new(
        settings: EngineSettings,
        prompter: &'a dyn Prompter,
        reader: Option<&'a dyn SourceReader>,
    ) -> Self {
        Self {
            settings,
            prompter,
            reader,
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    fn normalized(&self, raw: &FileTree) -> Option<(FileTree, Giftwrap)> {
        if self.settings.unwrap_giftwrapped {
            Giftwrap::unwrap(raw)
        } else {
            None
        }
    }

    pub fn test_supported<S: AsRef<str>>(&self, files: &[S]) -> Supported {
        let raw = FileTree::new(files);
        let tree = self.normalized(&raw).map(|(t, _)| t).unwrap_or(raw);
        Supported {
            supported: !tree.is_empty(),
            installer: Pipeline::select(&tree),
        }
    }

    #[instrument(skip_all, fields(mod_name = %mod_info.name))]
    pub fn install<S: AsRef<str>>(
        &self,
        files: &[S],
        paths: &InstallContextPaths,
        mod_info: &ModInfo,
    ) -> Result<InstallResult, InstallError> {
        // 1. Index the listing, minus any wrapper folder
        let raw = FileTree::new(files);
        let (tree, wrap) = match self.normalized(&raw) {
            Some((tree, wrap)) => (tree, Some(wrap)),
            None => (raw.clone(), None),
        };

        let staging;
        let reader: &dyn SourceReader = match self.reader {
            Some(reader) => reader,
            None => {
                staging = StagingDir::new(paths.staging_dir.clone());
                &staging
            }
        };
        let ctx = InstallContext::new(mod_info, &self.settings, reader)
            .with_source_prefix(wrap.as_ref().map(|w| w.prefix.clone()));
        let resolver = ConflictResolver::new(self.prompter);

        // 2. Classify
        let (installer, classification) = match Pipeline::run(&ctx, &tree) {
            Ok(result) => result,
            Err(err) => {
                if let InstallError::Structural {
                    installer, files, ..
                } = &err
                {
                    self.prompter.show_structural_error(
                        *installer,
                        &format!("Invalid {installer} layout"),
                        files,
                    );
                }
                warn!("Install failed: {err}");
                return Err(err);
            }
        };

        // 3. Ask whatever has to be asked, then finalize
        match classification {
            Classification::Matched(matched) => {
                resolver.confirm_all(&matched.confirmations)?;
                let instructions = match &wrap {
                    Some(wrap) => wrap.reprefix(matched.instructions),
                    None => matched.instructions,
                };
                info!(
                    "{installer} installed as {} with {} instructions",
                    matched.layout,
                    instructions.len()
                );
                Ok(InstallResult {
                    instructions,
                    installer,
                    layout: matched.layout,
                })
            }
            Classification::Conflict(report) => {
                warn!("{}: {}", report.installer, report.reason);
                resolver.confirm_all(&report.pending)?;
                let instructions = resolver.resolve(report.installer, &raw)?;
                Ok(InstallResult {
                    instructions,
                    installer: report.installer,
                    layout: LayoutKind::Fallback,
                })
            }
            Classification::NoMatch => {
                warn!("{installer} detected its layout but couldn't classify it");
                let instructions = resolver.resolve(installer, &raw)?;
                Ok(InstallResult {
                    instructions,
                    installer,
                    layout: LayoutKind::Fallback,
                })
            }
        }
    }
}
