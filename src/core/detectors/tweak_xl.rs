use crate::core::file_tree::{any_file, has_any_extension, FileTree};
use crate::core::instructions::instructions_for_same_source_and_dest_paths;
use crate::models::layout::{Classification, LayoutKind};
use crate::models::paths::{TWEAK_XL_MOD_CANONICAL_PATH_PREFIX, YAML_EXTENSIONS};
use camino::Utf8Path;
use tracing::debug;

pub struct TweakXlInstaller;

impl TweakXlInstaller {
    pub fn detect(tree: &FileTree) -> bool {
        tree.dir_with_some_under(Utf8Path::new(TWEAK_XL_MOD_CANONICAL_PATH_PREFIX), |p| {
            has_any_extension(p, YAML_EXTENSIONS)
        })
    }

    pub fn classify(tree: &FileTree) -> Classification {
        if !Self::detect(tree) {
            return Classification::NoMatch;
        }
        let files = tree.files_under(Utf8Path::new(TWEAK_XL_MOD_CANONICAL_PATH_PREFIX), any_file);
        debug!("TweakXL.Canon: {} files", files.len());
        Classification::matched(
            LayoutKind::TweakXl,
            instructions_for_same_source_and_dest_paths(&files),
        )
    }
}
