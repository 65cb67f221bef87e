use crate::core::detectors::is_known_toplevel_dir;
use crate::core::file_tree::{any_file, root, FileTree};
use crate::models::instruction::Instruction;
use camino::Utf8PathBuf;
use tracing::info;

/// A superfluous folder around an otherwise correct archive, e.g.
/// `MyMod/bin/...` and `MyMod/r6/...`.
#[derive(Clone, Debug, PartialEq)]
pub struct Giftwrap {
    pub prefix: Utf8PathBuf,
}

impl Giftwrap {
    pub fn detect(tree: &FileTree) -> Option<Giftwrap> {
        // 1. Nothing at the root but a single directory
        if tree.dir_with_some_in(root(), any_file) {
            return None;
        }
        let [wrapper]: [Utf8PathBuf; 1] = tree.subdirs_in(root()).try_into().ok()?;
        if is_known_toplevel_dir(&wrapper) || tree.dir_with_some_in(&wrapper, any_file) {
            return None;
        }

        // 2. Which holds only the game's own top-level directories
        let inner = tree.subdirs_in(&wrapper);
        if inner.is_empty() || !inner.iter().all(|d| is_known_toplevel_dir(d)) {
            return None;
        }

        Some(Giftwrap { prefix: wrapper })
    }

    /// The tree as it looks with the wrapper removed.
    pub fn unwrap(tree: &FileTree) -> Option<(FileTree, Giftwrap)> {
        let wrap = Self::detect(tree)?;
        info!("Unwrapping superfluous top-level directory {}", wrap.prefix);
        Some((tree.subtree_from(&wrap.prefix), wrap))
    }

    /// Points instruction sources back into the wrapper, where the staged
    /// files actually are. Destinations are left alone.
    pub fn reprefix(&self, instructions: Vec<Instruction>) -> Vec<Instruction> {
        instructions
            .into_iter()
            .map(|i| i.with_source_prefix(&self.prefix))
            .collect()
    }
}
