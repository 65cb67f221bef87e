use crate::core::detectors::{is_not_archive_file, with_extra_archives};
use crate::core::file_tree::{any_file, has_extension, root, FileTree};
use crate::core::instructions::{
    instructions_for_same_source_and_dest_paths, move_from_to, moved_with,
};
use crate::models::error::InstallError;
use crate::models::layout::{AsiLayout, Classification, InstallerKind, LayoutKind};
use crate::models::paths::{ASI_MOD_EXTENSION, ASI_MOD_PATH};
use crate::utils::context::InstallContext;
use camino::Utf8Path;
use tracing::debug;

fn is_asi(path: &Utf8Path) -> bool {
    has_extension(path, ASI_MOD_EXTENSION)
}

/// ASI loader plugins.
pub struct AsiInstaller;

impl AsiInstaller {
    pub fn detect(tree: &FileTree) -> bool {
        tree.dir_with_some_in(Utf8Path::new(ASI_MOD_PATH), is_asi)
            || tree.dir_with_some_in(root(), is_asi)
    }

    pub fn classify(ctx: &InstallContext, tree: &FileTree) -> Result<Classification, InstallError> {
        let own = Self::classify_plugins(tree);
        with_extra_archives(ctx, tree, InstallerKind::Asi, own)
    }

    fn classify_plugins(tree: &FileTree) -> Classification {
        let plugins = Utf8Path::new(ASI_MOD_PATH);
        let canon = tree.dir_with_some_in(plugins, is_asi);
        let toplevel = tree.dir_with_some_in(root(), is_asi);

        match (canon, toplevel) {
            (false, false) => Classification::NoMatch,
            (true, true) => Classification::conflict(
                InstallerKind::Asi,
                "ASI plugins found both in bin/x64/plugins and at the top of the archive",
            ),
            (true, false) => {
                let files = tree.files_under(plugins, any_file);
                debug!("ASI.Canon: {} files", files.len());
                Classification::matched(
                    LayoutKind::Asi(AsiLayout::Canon),
                    instructions_for_same_source_and_dest_paths(&files),
                )
            }
            (false, true) => {
                let loose = tree.files_in(root(), is_not_archive_file);
                let all = tree.files_under(root(), is_not_archive_file);
                if loose.len() != all.len() {
                    return Classification::conflict(
                        InstallerKind::Asi,
                        "ASI plugins at the top of the archive can't be mixed with other directories",
                    );
                }
                debug!("ASI.Toplevel: moving {} files to {ASI_MOD_PATH}", loose.len());
                Classification::matched(
                    LayoutKind::Asi(AsiLayout::Toplevel),
                    moved_with(&loose, move_from_to(root(), plugins)),
                )
            }
        }
    }
}
