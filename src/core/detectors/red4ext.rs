use crate::core::detectors::{is_known_toplevel_dir, is_not_archive_file, with_extra_archives};
use crate::core::file_tree::{any_file, has_extension, is_under, root, FileTree};
use crate::core::instructions::{
    instructions_for_same_source_and_dest_paths, move_from_to, moved_with,
};
use crate::models::error::InstallError;
use crate::models::instruction::Instruction;
use crate::models::layout::{Classification, InstallerKind, LayoutKind, Red4ExtLayout};
use crate::models::paths::{
    RED4EXT_MOD_CANONICAL_BASEDIR, RED4EXT_MOD_CANONICAL_EXTENSION,
    RED4EXT_TOPLEVEL_DIR,
};
use crate::utils::context::InstallContext;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

fn is_dll(path: &Utf8Path) -> bool {
    has_extension(path, RED4EXT_MOD_CANONICAL_EXTENSION)
}

pub struct Red4ExtInstaller;

struct Shapes {
    canon_dirs: Vec<Utf8PathBuf>,
    basedir_dlls: Vec<Utf8PathBuf>,
    modnamed_dirs: Vec<Utf8PathBuf>,
    toplevel_dlls: Vec<Utf8PathBuf>,
}

impl Shapes {
    fn find(tree: &FileTree) -> Self {
        let base = Utf8Path::new(RED4EXT_MOD_CANONICAL_BASEDIR);
        Shapes {
            canon_dirs: tree.find_subdirs_with_some_under(base, is_dll),
            basedir_dlls: tree.files_in(base, is_dll),
            modnamed_dirs: tree
                .find_direct_subdirs_with_some(root(), is_dll)
                .into_iter()
                .filter(|d| !is_known_toplevel_dir(d))
                .collect(),
            toplevel_dlls: tree.files_in(root(), is_dll),
        }
    }

    fn count(&self) -> usize {
        [
            !self.canon_dirs.is_empty(),
            !self.basedir_dlls.is_empty(),
            !self.modnamed_dirs.is_empty(),
            !self.toplevel_dlls.is_empty(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Every DLL that would be installed by one of the shapes.
    fn dlls(&self, tree: &FileTree) -> Vec<Utf8PathBuf> {
        let base = Utf8Path::new(RED4EXT_MOD_CANONICAL_BASEDIR);
        let mut dlls = tree.files_under(base, is_dll);
        for dir in &self.modnamed_dirs {
            dlls.extend(tree.files_under(dir, is_dll));
        }
        dlls.extend(self.toplevel_dlls.iter().cloned());
        dlls
    }
}

impl Red4ExtInstaller {
    pub fn detect(tree: &FileTree) -> bool {
        Shapes::find(tree).count() > 0
    }

    pub fn classify(ctx: &InstallContext, tree: &FileTree) -> Result<Classification, InstallError> {
        let own = Self::classify_part(ctx, tree)?;
        with_extra_archives(ctx, tree, InstallerKind::Red4Ext, own)
    }

    pub fn classify_part(
        ctx: &InstallContext,
        tree: &FileTree,
    ) -> Result<Classification, InstallError> {
        let shapes = Shapes::find(tree);
        match shapes.count() {
            0 => return Ok(Classification::NoMatch),
            1 => {}
            _ => {
                return Ok(Classification::conflict(
                    InstallerKind::Red4Ext,
                    "plugin DLLs are spread over more than one RED4ext layout",
                ))
            }
        }

        // 1. Never let a plugin shadow a DLL the game or a runtime ships
        let protected: Vec<String> = ctx.settings.protected_dlls().collect();
        let dangerous: Vec<Utf8PathBuf> = shapes
            .dlls(tree)
            .into_iter()
            .filter(|dll| {
                let name = dll.file_name().unwrap_or_default().to_lowercase();
                protected.iter().any(|p| *p == name)
            })
            .collect();
        if !dangerous.is_empty() {
            warn!("RED4ext: refusing to install {} protected DLLs", dangerous.len());
            return Err(InstallError::structural(
                InstallerKind::Red4Ext,
                "This mod contains DLLs that would overwrite or shadow files of the game itself",
                dangerous,
            ));
        }

        // 2. Nothing but plugins may go into red4ext/
        let base = Utf8Path::new(RED4EXT_MOD_CANONICAL_BASEDIR);
        let outside_plugins = tree
            .files_under(Utf8Path::new(RED4EXT_TOPLEVEL_DIR), any_file)
            .into_iter()
            .filter(|f| !is_under(f, base))
            .count();
        if outside_plugins > 0 {
            return Ok(Classification::conflict(
                InstallerKind::Red4Ext,
                format!("{outside_plugins} files in {RED4EXT_TOPLEVEL_DIR} are outside {RED4EXT_MOD_CANONICAL_BASEDIR}"),
            ));
        }

        let in_base = tree.files_under(base, any_file);
        let target = base.join(ctx.mod_dir_name());

        // 3. Pick the one shape that is present
        let (layout, instructions) = if !shapes.canon_dirs.is_empty() {
            let strays = in_base
                .iter()
                .filter(|f| !shapes.canon_dirs.iter().any(|d| is_under(f, d)))
                .count();
            if strays > 0 {
                return Ok(Classification::conflict(
                    InstallerKind::Red4Ext,
                    format!("{strays} files in {RED4EXT_MOD_CANONICAL_BASEDIR} are outside a plugin directory"),
                ));
            }
            (
                Red4ExtLayout::Canon,
                instructions_for_same_source_and_dest_paths(&in_base),
            )
        } else if !shapes.basedir_dlls.is_empty() {
            let direct = tree.files_in(base, any_file);
            if direct.len() != in_base.len() {
                return Ok(Classification::conflict(
                    InstallerKind::Red4Ext,
                    format!("{RED4EXT_MOD_CANONICAL_BASEDIR} has both loose DLLs and subdirectories"),
                ));
            }
            (
                Red4ExtLayout::Basedir,
                moved_with(&direct, move_from_to(base, &target)),
            )
        } else if !shapes.modnamed_dirs.is_empty() {
            if !in_base.is_empty() {
                return Ok(Classification::conflict(
                    InstallerKind::Red4Ext,
                    "plugin directories at the top of the archive mixed with red4ext/plugins",
                ));
            }
            let instructions = shapes
                .modnamed_dirs
                .iter()
                .flat_map(|dir| {
                    let dest = base.join(dir.file_name().unwrap_or_default());
                    moved_with(&tree.files_under(dir, any_file), move_from_to(dir, &dest))
                })
                .collect::<Vec<Instruction>>();
            (Red4ExtLayout::Modnamed, instructions)
        } else {
            let loose = tree.files_in(root(), is_not_archive_file);
            let all = tree.files_under(root(), is_not_archive_file);
            if loose.len() != all.len() {
                return Ok(Classification::conflict(
                    InstallerKind::Red4Ext,
                    "DLLs at the top of the archive can't be mixed with other directories",
                ));
            }
            (
                Red4ExtLayout::Toplevel,
                moved_with(&loose, move_from_to(root(), &target)),
            )
        };

        debug!("Red4Ext.{layout}: {} instructions", instructions.len());
        Ok(Classification::matched(
            LayoutKind::Red4Ext(layout),
            instructions,
        ))
    }
}
