use crate::core::file_tree::FileTree;
use crate::core::instructions::instructions_for_same_source_and_dest_paths;
use crate::models::instruction::Instruction;
use crate::models::layout::{Classification, LayoutKind};

/// Last resort: everything goes exactly where it is.
pub struct FallbackInstaller;

impl FallbackInstaller {
    pub fn detect(_: &FileTree) -> bool {
        true
    }

    pub fn instructions(tree: &FileTree) -> Vec<Instruction> {
        instructions_for_same_source_and_dest_paths(tree.all_files())
    }

    pub fn classify(tree: &FileTree) -> Classification {
        Classification::matched(LayoutKind::Fallback, Self::instructions(tree))
    }
}
