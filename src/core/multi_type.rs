use crate::core::detectors::archive::ArchiveInstaller;
use crate::core::detectors::redmod::RedmodInstaller;
use crate::core::file_tree::FileTree;
use crate::core::instructions::dedupe_directory_markers;
use crate::models::error::InstallError;
use crate::models::layout::{
    Classification, Confirmation, ConflictReport, InstallerKind, LayoutKind, Matched,
};
use crate::utils::context::InstallContext;
use tracing::{debug, warn};

/// Kinds that can be part of a combined install, in the order their parts
/// are classified. Config kinds come first so their confirmations and
/// conflicts are always reached in the same order.
pub const MULTI_TYPE_KINDS: &[InstallerKind] = &[
    InstallerKind::ConfigXml,
    InstallerKind::ConfigJson,
    InstallerKind::Redmod,
    InstallerKind::Cet,
    InstallerKind::Redscript,
    InstallerKind::Red4Ext,
    InstallerKind::TweakXl,
    InstallerKind::Audioware,
];

/// Kinds whose own installer never picks up archives, so a single one of
/// them next to archives is already a combined install.
pub const ARCHIVE_COMPANION_KINDS: &[InstallerKind] = &[
    InstallerKind::Red4Ext,
    InstallerKind::TweakXl,
    InstallerKind::Audioware,
    InstallerKind::ConfigXml,
    InstallerKind::ConfigJson,
];

/// Several independent mod kinds shipped in one archive.
pub struct MultiTypeInstaller;

impl MultiTypeInstaller {
    fn detected_kinds(tree: &FileTree) -> Vec<InstallerKind> {
        MULTI_TYPE_KINDS
            .iter()
            .copied()
            .filter(|kind| kind.detect(tree))
            .collect()
    }

    /// The tree without REDmod directories. REDmods carry their own archives.
    fn legacy_tree(tree: &FileTree) -> FileTree {
        tree.pruned(&RedmodInstaller::mod_dirs(tree))
    }

    pub fn detect(tree: &FileTree) -> bool {
        let kinds = Self::detected_kinds(tree);
        match kinds.as_slice() {
            [] => false,
            [only] => {
                ARCHIVE_COMPANION_KINDS.contains(only)
                    && ArchiveInstaller::detect(&Self::legacy_tree(tree))
            }
            _ => true,
        }
    }

    pub fn classify(ctx: &InstallContext, tree: &FileTree) -> Result<Classification, InstallError> {
        if !Self::detect(tree) {
            return Ok(Classification::NoMatch);
        }

        let kinds = Self::detected_kinds(tree);
        let legacy = Self::legacy_tree(tree);
        let archives_present = ArchiveInstaller::detect(&legacy);

        // 1. REDmods and legacy archives never mix
        if kinds.contains(&InstallerKind::Redmod) && archives_present {
            warn!("MultiType: REDmod combined with legacy archives");
            return Err(InstallError::IncompatibleKinds {
                first: InstallerKind::Redmod,
                second: InstallerKind::Archive,
            });
        }

        let mut instructions = Vec::new();
        let mut confirmations: Vec<Confirmation> = Vec::new();

        // 2. Each part on its own, stopping at the first one that can't be placed
        for kind in &kinds {
            match kind.classify_part(ctx, tree)? {
                Classification::Matched(part) => {
                    debug!("MultiType: {kind} part is {}", part.layout);
                    instructions.extend(part.instructions);
                    confirmations.extend(part.confirmations);
                }
                Classification::Conflict(report) => {
                    return Ok(Self::conflict(*kind, report.reason, confirmations));
                }
                Classification::NoMatch => {
                    return Ok(Self::conflict(
                        *kind,
                        format!("{kind} files were detected but don't form a valid layout"),
                        confirmations,
                    ));
                }
            }
        }

        // 3. Loose archives last
        match ArchiveInstaller::classify_optional(ctx, &legacy)? {
            Classification::Matched(part) => instructions.extend(part.instructions),
            Classification::Conflict(report) => {
                return Ok(Self::conflict(
                    InstallerKind::Archive,
                    report.reason,
                    confirmations,
                ));
            }
            Classification::NoMatch => {}
        }

        debug!(
            "MultiType: {} parts, {} instructions",
            kinds.len() + usize::from(archives_present),
            instructions.len()
        );
        Ok(Classification::Matched(Matched {
            layout: LayoutKind::MultiType,
            instructions: dedupe_directory_markers(instructions),
            confirmations,
        }))
    }

    fn conflict(
        installer: InstallerKind,
        reason: String,
        pending: Vec<Confirmation>,
    ) -> Classification {
        warn!("MultiType: {installer} part conflicts: {reason}");
        Classification::Conflict(ConflictReport {
            installer,
            reason,
            pending,
        })
    }
}
