use crate::core::detectors::is_archive_file;
use crate::core::file_tree::{any_file, has_extension, is_under, root, FileTree};
use crate::core::instructions::{
    flattened_into, instructions_for_same_source_and_dest_paths, move_from_to, moved_with,
};
use crate::models::error::InstallError;
use crate::models::layout::{ArchiveLayout, Classification, InstallerKind, LayoutKind};
use crate::models::paths::{
    ARCHIVE_MOD_CANONICAL_PREFIX, ARCHIVE_MOD_HERITAGE_PREFIX, ARCHIVE_XL_EXTENSION,
};
use crate::utils::context::InstallContext;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use tracing::debug;

/// Plain `.archive` mods and their ArchiveXL `.xl` companions.
pub struct ArchiveInstaller;

impl ArchiveInstaller {
    pub fn detect(tree: &FileTree) -> bool {
        tree.dir_with_some_under(root(), is_archive_file)
    }

    /// Archives shipped next to a mod of another kind. None at all is a
    /// valid result there, not a miss.
    pub fn classify_optional(
        ctx: &InstallContext,
        tree: &FileTree,
    ) -> Result<Classification, InstallError> {
        if !Self::detect(tree) {
            return Ok(Classification::matched(LayoutKind::NoLayoutOptional, Vec::new()));
        }
        Self::classify(ctx, tree)
    }

    pub fn classify(ctx: &InstallContext, tree: &FileTree) -> Result<Classification, InstallError> {
        let canon_dir = Utf8Path::new(ARCHIVE_MOD_CANONICAL_PREFIX);
        let heritage_dir = Utf8Path::new(ARCHIVE_MOD_HERITAGE_PREFIX);

        let all_archives = tree.files_under(root(), is_archive_file);
        if all_archives.is_empty() {
            return Ok(Classification::NoMatch);
        }

        let canon_files = tree.files_under(canon_dir, any_file);
        let heritage_files = tree.files_under(heritage_dir, any_file);
        let has_canon = canon_files.iter().any(|f| is_archive_file(f));
        let has_heritage = heritage_files.iter().any(|f| is_archive_file(f));
        let strays: Vec<Utf8PathBuf> = all_archives
            .into_iter()
            .filter(|f| !is_under(f, canon_dir) && !is_under(f, heritage_dir))
            .collect();

        // 1. Canonical, with or without XL files
        if has_canon {
            if has_heritage || !strays.is_empty() {
                return Ok(Classification::conflict(
                    InstallerKind::Archive,
                    "archives found both in archive/pc/mod and elsewhere",
                ));
            }
            let layout = if canon_files
                .iter()
                .any(|f| has_extension(f, ARCHIVE_XL_EXTENSION))
            {
                ArchiveLayout::Xl
            } else {
                ArchiveLayout::Canon
            };
            debug!("Archive.{layout}: {} files", canon_files.len());
            return Ok(Classification::matched(
                LayoutKind::Archive(layout),
                instructions_for_same_source_and_dest_paths(&canon_files),
            ));
        }

        // 2. Old patch directory, relocated to the mod directory
        if has_heritage {
            if !strays.is_empty() {
                return Ok(Classification::conflict(
                    InstallerKind::Archive,
                    "archives found both in archive/pc/patch and elsewhere",
                ));
            }
            if !ctx.settings.fix_heritage_archives {
                return Ok(Classification::conflict(
                    InstallerKind::Archive,
                    "archives in archive/pc/patch are not loaded by the game",
                ));
            }
            debug!("Archive.Heritage: moving {} files", heritage_files.len());
            return Ok(Classification::matched(
                LayoutKind::Archive(ArchiveLayout::Heritage),
                moved_with(&heritage_files, move_from_to(heritage_dir, canon_dir)),
            ));
        }

        // 3. Anywhere else, flattened into the mod directory
        let mut names = HashSet::new();
        let collision = strays
            .iter()
            .find(|f| !names.insert(f.file_name().unwrap_or_default().to_lowercase()));
        if let Some(collision) = collision {
            return Ok(Classification::conflict(
                InstallerKind::Archive,
                format!(
                    "more than one archive is named {}, can't flatten them into archive/pc/mod",
                    collision.file_name().unwrap_or_default()
                ),
            ));
        }

        debug!("Archive.Other: relocating {} archives", strays.len());
        Ok(Classification::matched(
            LayoutKind::Archive(ArchiveLayout::Other),
            flattened_into(&strays, canon_dir),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineSettings;
    use crate::core::host::StagingDir;
    use crate::models::mod_dto::ModInfo;

    #[test]
    fn test_no_archives_is_a_valid_optional_result() {
        let (info, settings) = (ModInfo::default(), EngineSettings::default());
        let staging = StagingDir::new("staging");
        let ctx = InstallContext::new(&info, &settings, &staging);
        let tree = FileTree::new(["r6/scripts/MyMod/a.reds"]);

        // 1. Optional: matched with nothing to do, plain: no match
        assert_eq!(
            ArchiveInstaller::classify_optional(&ctx, &tree).unwrap(),
            Classification::matched(LayoutKind::NoLayoutOptional, Vec::new())
        );
        assert_eq!(
            ArchiveInstaller::classify(&ctx, &tree).unwrap(),
            Classification::NoMatch
        );
    }
}
