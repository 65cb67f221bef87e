use crate::core::detectors::{is_not_archive_file, with_extra_archives};
use crate::core::file_tree::{any_file, has_extension, is_under, root, FileTree};
use crate::core::instructions::{
    instructions_for_same_source_and_dest_paths, move_from_to, moved_with,
};
use crate::models::error::InstallError;
use crate::models::layout::{Classification, InstallerKind, LayoutKind, RedscriptLayout};
use crate::models::paths::{REDS_MOD_CANONICAL_EXTENSION, REDS_MOD_CANONICAL_PATH_PREFIX};
use crate::utils::context::InstallContext;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

fn is_reds(path: &Utf8Path) -> bool {
    has_extension(path, REDS_MOD_CANONICAL_EXTENSION)
}

pub struct RedscriptInstaller;

impl RedscriptInstaller {
    pub fn detect(tree: &FileTree) -> bool {
        tree.dir_with_some_under(Utf8Path::new(REDS_MOD_CANONICAL_PATH_PREFIX), is_reds)
            || tree.dir_with_some_in(root(), is_reds)
    }

    pub fn classify(ctx: &InstallContext, tree: &FileTree) -> Result<Classification, InstallError> {
        let own = Self::classify_part(ctx, tree);
        with_extra_archives(ctx, tree, InstallerKind::Redscript, own)
    }

    pub fn classify_part(ctx: &InstallContext, tree: &FileTree) -> Classification {
        let base = Utf8Path::new(REDS_MOD_CANONICAL_PATH_PREFIX);

        let canon_dirs = tree.find_subdirs_with_some_under(base, is_reds);
        let basedir_reds = tree.files_in(base, is_reds);
        let toplevel_reds = tree.files_in(root(), is_reds);

        let shapes = [
            !canon_dirs.is_empty(),
            !basedir_reds.is_empty(),
            !toplevel_reds.is_empty(),
        ];
        match shapes.iter().filter(|present| **present).count() {
            0 => return Classification::NoMatch,
            1 => {}
            _ => {
                return Classification::conflict(
                    InstallerKind::Redscript,
                    "scripts are spread over more than one of r6/scripts/<mod>, r6/scripts and the archive root",
                )
            }
        }

        let everything_in_base = tree.files_under(base, any_file);

        // 1. r6/scripts/<mod>/**
        if !canon_dirs.is_empty() {
            let strays = everything_in_base
                .iter()
                .filter(|f| !canon_dirs.iter().any(|d| is_under(f, d)))
                .count();
            if strays > 0 {
                return Classification::conflict(
                    InstallerKind::Redscript,
                    format!("{strays} files in {REDS_MOD_CANONICAL_PATH_PREFIX} are outside a mod directory"),
                );
            }
            debug!("Redscript.Canon: {} mods", canon_dirs.len());
            return Classification::matched(
                LayoutKind::Redscript(RedscriptLayout::Canon),
                instructions_for_same_source_and_dest_paths(&everything_in_base),
            );
        }

        let target = base.join(ctx.mod_dir_name());

        // 2. r6/scripts/*.reds, moved into a mod directory
        if !basedir_reds.is_empty() {
            let direct = tree.files_in(base, any_file);
            if direct.len() != everything_in_base.len() {
                return Classification::conflict(
                    InstallerKind::Redscript,
                    format!("{REDS_MOD_CANONICAL_PATH_PREFIX} has both loose scripts and subdirectories"),
                );
            }
            debug!("Redscript.Basedir: moving {} files to {target}", direct.len());
            return Classification::matched(
                LayoutKind::Redscript(RedscriptLayout::Basedir),
                moved_with(&direct, move_from_to(base, &target)),
            );
        }

        // 3. *.reds at the root, only valid if nothing else is nested
        let loose = tree.files_in(root(), is_not_archive_file);
        let all = tree.files_under(root(), is_not_archive_file);
        if loose.len() != all.len() {
            return Classification::conflict(
                InstallerKind::Redscript,
                "scripts at the top of the archive can't be mixed with other directories",
            );
        }
        debug!("Redscript.Toplevel: moving {} files to {target}", loose.len());
        Classification::matched(
            LayoutKind::Redscript(RedscriptLayout::Toplevel),
            moved_with(&loose, move_from_to(root(), &target)),
        )
    }
}
