use crate::core::detectors::is_known_toplevel_dir;
use crate::core::file_tree::FileTree;
use crate::core::instructions::instructions_for_same_source_and_dest_paths;
use crate::models::instruction::Instruction;
use crate::models::layout::{Classification, CoreTool, InstallerKind, LayoutKind};
use crate::models::paths::{
    CET_MOD_CANONICAL_PATH_PREFIX, RED4EXT_MOD_CANONICAL_BASEDIR,
    REDS_MOD_CANONICAL_PATH_PREFIX,
};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

impl CoreTool {
    /// Files that only the tool's own release archive contains.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            CoreTool::Cet => &["bin/x64/plugins/cyber_engine_tweaks.asi"],
            CoreTool::Redscript => &["engine/config/base/scripts.ini", "engine/tools/scc.exe"],
            CoreTool::Red4ext => &["red4ext/RED4ext.dll"],
            CoreTool::ArchiveXl => &["red4ext/plugins/ArchiveXL/ArchiveXL.dll"],
            CoreTool::TweakXl => &["red4ext/plugins/TweakXL/TweakXL.dll"],
            CoreTool::Audioware => &["red4ext/plugins/Audioware/Audioware.dll"],
            CoreTool::InputLoader => &["red4ext/plugins/input_loader/input_loader.dll"],
            CoreTool::Amm => &[
                "bin/x64/plugins/cyber_engine_tweaks/mods/AppearanceMenuMod/init.lua",
            ],
        }
    }

    /// Directories the tool expects to exist after installation.
    fn created_dirs(self) -> &'static [&'static str] {
        match self {
            CoreTool::Cet => &[CET_MOD_CANONICAL_PATH_PREFIX],
            CoreTool::Redscript => &[REDS_MOD_CANONICAL_PATH_PREFIX],
            CoreTool::Red4ext => &[RED4EXT_MOD_CANONICAL_BASEDIR],
            _ => &[],
        }
    }
}

/// Installs the modding frameworks themselves, exactly as released.
pub struct CoreInstaller;

impl CoreInstaller {
    pub fn detect(tool: CoreTool, tree: &FileTree) -> bool {
        tool.markers()
            .iter()
            .all(|marker| tree.path_in_tree(Utf8Path::new(marker)))
    }

    pub fn classify(tool: CoreTool, tree: &FileTree) -> Classification {
        if !Self::detect(tool, tree) {
            return Classification::NoMatch;
        }

        let strays: Vec<&Utf8PathBuf> = tree
            .all_files()
            .iter()
            .filter(|f| {
                let top = f.iter().next().map(Utf8Path::new);
                f.iter().count() < 2 || !top.map(is_known_toplevel_dir).unwrap_or(false)
            })
            .collect();
        if !strays.is_empty() {
            return Classification::conflict(
                InstallerKind::Core(tool),
                format!(
                    "{tool} release archive has {} unexpected files outside the game directories",
                    strays.len()
                ),
            );
        }

        let mut instructions = instructions_for_same_source_and_dest_paths(tree.all_files());
        instructions.extend(tool.created_dirs().iter().map(|d| Instruction::mkdir(*d)));

        debug!("Core.{tool}: {} instructions", instructions.len());
        Classification::matched(LayoutKind::Core(tool), instructions)
    }
}
