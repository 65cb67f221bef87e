use crate::core::file_tree::{any_file, has_any_extension, is_under, FileTree};
use crate::core::instructions::instructions_for_same_source_and_dest_paths;
use crate::models::layout::{Classification, InstallerKind, LayoutKind};
use crate::models::paths::{AUDIOWARE_MOD_CANONICAL_PATH_PREFIX, YAML_EXTENSIONS};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Audioware sound mods: `r6/audioware/<mod>/` with a YAML manifest.
pub struct AudiowareInstaller;

impl AudiowareInstaller {
    fn mod_dirs(tree: &FileTree) -> Vec<Utf8PathBuf> {
        tree.find_direct_subdirs_with_some(
            Utf8Path::new(AUDIOWARE_MOD_CANONICAL_PATH_PREFIX),
            |p| has_any_extension(p, YAML_EXTENSIONS),
        )
    }

    pub fn detect(tree: &FileTree) -> bool {
        !Self::mod_dirs(tree).is_empty()
    }

    pub fn classify(tree: &FileTree) -> Classification {
        let mod_dirs = Self::mod_dirs(tree);
        if mod_dirs.is_empty() {
            return Classification::NoMatch;
        }

        let files = tree.files_under(Utf8Path::new(AUDIOWARE_MOD_CANONICAL_PATH_PREFIX), any_file);
        let strays = files
            .iter()
            .filter(|f| !mod_dirs.iter().any(|d| is_under(f, d)))
            .count();
        if strays > 0 {
            return Classification::conflict(
                InstallerKind::Audioware,
                format!("{strays} files in {AUDIOWARE_MOD_CANONICAL_PATH_PREFIX} are outside a mod directory with a manifest"),
            );
        }

        debug!("Audioware.Canon: {} mods", mod_dirs.len());
        Classification::matched(
            LayoutKind::Audioware,
            instructions_for_same_source_and_dest_paths(&files),
        )
    }
}
