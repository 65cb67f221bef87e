use crate::core::detectors::with_extra_archives;
use crate::core::file_tree::{any_file, is_named, is_under, FileTree};
use crate::core::instructions::instructions_for_same_source_and_dest_paths;
use crate::models::error::InstallError;
use crate::models::layout::{CetLayout, Classification, InstallerKind, LayoutKind};
use crate::models::paths::{
    AMM_BASEDIR_PATH, CET_MOD_CANONICAL_INIT_FILE, CET_MOD_CANONICAL_PATH_PREFIX,
};
use crate::utils::context::InstallContext;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

pub struct CetInstaller;

impl CetInstaller {
    fn mod_dirs(tree: &FileTree) -> Vec<Utf8PathBuf> {
        tree.find_direct_subdirs_with_some(Utf8Path::new(CET_MOD_CANONICAL_PATH_PREFIX), |p| {
            is_named(p, CET_MOD_CANONICAL_INIT_FILE)
        })
    }

    pub fn detect(tree: &FileTree) -> bool {
        !Self::mod_dirs(tree).is_empty()
    }

    pub fn classify(ctx: &InstallContext, tree: &FileTree) -> Result<Classification, InstallError> {
        let own = Self::classify_part(tree);
        with_extra_archives(ctx, tree, InstallerKind::Cet, own)
    }

    /// Only the CET mod directories, nothing else in the tree is looked at.
    pub fn classify_part(tree: &FileTree) -> Classification {
        let mod_dirs = Self::mod_dirs(tree);
        if mod_dirs.is_empty() {
            return Classification::NoMatch;
        }

        // AMM content lives under the CET base too but is not a CET mod
        let base = Utf8Path::new(CET_MOD_CANONICAL_PATH_PREFIX);
        let strays: Vec<Utf8PathBuf> = tree
            .pruned(&[Utf8PathBuf::from(AMM_BASEDIR_PATH)])
            .files_under(base, any_file)
            .into_iter()
            .filter(|f| !mod_dirs.iter().any(|d| is_under(f, d)))
            .collect();
        if !strays.is_empty() {
            return Classification::conflict(
                InstallerKind::Cet,
                format!(
                    "{} files in {CET_MOD_CANONICAL_PATH_PREFIX} don't belong to a mod with an {CET_MOD_CANONICAL_INIT_FILE}",
                    strays.len()
                ),
            );
        }

        let files: Vec<Utf8PathBuf> = mod_dirs
            .iter()
            .flat_map(|d| tree.files_under(d, any_file))
            .collect();
        debug!("CET.Canon: {} mods, {} files", mod_dirs.len(), files.len());

        Classification::matched(
            LayoutKind::Cet(CetLayout::Canon),
            instructions_for_same_source_and_dest_paths(&files),
        )
    }
}
