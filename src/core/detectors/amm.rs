use crate::core::detectors::with_extra_archives;
use crate::core::file_tree::{any_file, is_under, root, FileTree};
use crate::core::instructions::{
    instructions_for_same_source_and_dest_paths, move_from_to, moved_with,
};
use crate::models::error::InstallError;
use crate::models::layout::{AmmLayout, Classification, InstallerKind, LayoutKind};
use crate::models::paths::{AMM_BASEDIR_PATH, AMM_CONTENT_SUBDIRS};
use crate::utils::context::InstallContext;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

/// Custom content for Appearance Menu Mod (appearances, props, decor, ...).
pub struct AmmInstaller;

impl AmmInstaller {
    /// Files in the known content directories below `base`.
    fn content_under(tree: &FileTree, base: &Utf8Path) -> Vec<Utf8PathBuf> {
        AMM_CONTENT_SUBDIRS
            .iter()
            .flat_map(|sub| tree.files_under(&base.join(sub), any_file))
            .collect()
    }

    /// Files under the top-level AMM content roots (`Collabs/`, `User/`) below `base`.
    fn everything_under(tree: &FileTree, base: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut roots: Vec<&str> = AMM_CONTENT_SUBDIRS
            .iter()
            .filter_map(|sub| sub.split('/').next())
            .collect();
        roots.dedup();
        roots
            .into_iter()
            .flat_map(|r| tree.files_under(&base.join(r), any_file))
            .collect()
    }

    pub fn detect(tree: &FileTree) -> bool {
        !Self::content_under(tree, Utf8Path::new(AMM_BASEDIR_PATH)).is_empty()
            || !Self::content_under(tree, root()).is_empty()
    }

    pub fn classify(ctx: &InstallContext, tree: &FileTree) -> Result<Classification, InstallError> {
        let own = Self::classify_part(tree);
        with_extra_archives(ctx, tree, InstallerKind::Amm, own)
    }

    pub fn classify_part(tree: &FileTree) -> Classification {
        let amm_base = Utf8Path::new(AMM_BASEDIR_PATH);
        let canon = Self::content_under(tree, amm_base);
        let toplevel = Self::content_under(tree, root());

        let (layout, base, files) = match (canon.is_empty(), toplevel.is_empty()) {
            (true, true) => return Classification::NoMatch,
            (false, false) => {
                return Classification::conflict(
                    InstallerKind::Amm,
                    "AMM content found both in the AMM directory and at the top of the archive",
                )
            }
            (false, true) => (AmmLayout::Canon, amm_base, canon),
            (true, false) => (AmmLayout::Toplevel, root(), toplevel),
        };

        let unknown = match layout {
            AmmLayout::Canon => tree.files_under(amm_base, any_file),
            AmmLayout::Toplevel => Self::everything_under(tree, root()),
        }
        .into_iter()
        .filter(|f| {
            !AMM_CONTENT_SUBDIRS
                .iter()
                .any(|sub| is_under(f, &base.join(sub)))
        })
        .count();
        if unknown > 0 {
            return Classification::conflict(
                InstallerKind::Amm,
                format!("{unknown} files are outside the known AMM content directories"),
            );
        }

        debug!("AMM.{layout}: {} files", files.len());
        let instructions = match layout {
            AmmLayout::Canon => instructions_for_same_source_and_dest_paths(&files),
            AmmLayout::Toplevel => moved_with(&files, move_from_to(root(), amm_base)),
        };
        Classification::matched(LayoutKind::Amm(layout), instructions)
    }
}
