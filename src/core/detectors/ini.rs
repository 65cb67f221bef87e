use crate::core::detectors::with_extra_archives;
use crate::core::file_tree::{any_file, has_extension, root, FileTree};
use crate::core::instructions::{
    instructions_for_same_source_and_dest_paths, instructions_for_source_to_dest_pairs,
    move_from_to, moved_with,
};
use crate::models::error::InstallError;
use crate::models::layout::{Classification, IniLayout, InstallerKind, LayoutKind};
use crate::models::paths::{
    INI_MOD_EXTENSION, INI_MOD_PATH, RESHADE_MOD_PATH, RESHADE_SHADERS_DIR,
};
use crate::utils::context::InstallContext;
use camino::Utf8Path;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static INI_FIRST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\[.*\]|;|#)").expect("valid ini first line regex"));

fn is_ini(path: &Utf8Path) -> bool {
    has_extension(path, INI_MOD_EXTENSION)
}

/// An engine INI starts with a section or a comment. Reshade presets start
/// straight away with `Key=Value` lines.
pub(crate) fn looks_like_engine_ini(content: &str) -> bool {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .find(|line| !line.trim().is_empty())
        .map(|line| INI_FIRST_LINE.is_match(line))
        .unwrap_or(true)
}

/// Engine INI tweaks and Reshade presets/shaders.
pub struct IniInstaller;

impl IniInstaller {
    pub fn detect(tree: &FileTree) -> bool {
        tree.dir_with_some_in(Utf8Path::new(INI_MOD_PATH), is_ini)
            || tree.dir_with_some_in(root(), is_ini)
            || tree.dir_with_some_under(Utf8Path::new(RESHADE_SHADERS_DIR), any_file)
    }

    pub fn classify(ctx: &InstallContext, tree: &FileTree) -> Result<Classification, InstallError> {
        if !Self::detect(tree) {
            return Ok(Classification::NoMatch);
        }

        let ini_dir = Utf8Path::new(INI_MOD_PATH);
        let reshade_dir = Utf8Path::new(RESHADE_MOD_PATH);

        // 1. Already in place
        let mut instructions =
            instructions_for_same_source_and_dest_paths(&tree.files_in(ini_dir, is_ini));

        // 2. Top-level INIs, sorted by content
        let mut reshade = false;
        let mut pairs = Vec::new();
        for file in tree.files_in(root(), is_ini) {
            let name = file.file_name().unwrap_or_default().to_string();
            let dest = if looks_like_engine_ini(&ctx.read_source(&file)?) {
                ini_dir.join(&name)
            } else {
                reshade = true;
                reshade_dir.join(&name)
            };
            pairs.push((file, dest));
        }
        instructions.extend(instructions_for_source_to_dest_pairs(pairs));

        // 3. Shaders shipped alongside a preset
        let shaders = tree.files_under(Utf8Path::new(RESHADE_SHADERS_DIR), any_file);
        if !shaders.is_empty() {
            reshade = true;
            instructions.extend(moved_with(&shaders, move_from_to(root(), reshade_dir)));
        }

        let layout = if reshade { IniLayout::Reshade } else { IniLayout::Ini };
        debug!("INI.{layout}: {} instructions", instructions.len());
        let own = Classification::matched(LayoutKind::Ini(layout), instructions);
        with_extra_archives(ctx, tree, InstallerKind::Ini, own)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_or_comment_is_engine_ini() {
        assert!(looks_like_engine_ini("[Rendering]\nAntiAliasing=0"));
        assert!(looks_like_engine_ini("\u{feff}\n\n  ; tweak\n[A]"));
        assert!(looks_like_engine_ini("# comment"));
    }

    #[test]
    fn test_key_value_first_is_reshade() {
        assert!(!looks_like_engine_ini(
            "PreprocessorDefinitions=\nTechniques=SMAA@SMAA.fx\n[SMAA.fx]"
        ));
    }

    #[test]
    fn test_empty_file_counts_as_engine_ini() {
        assert!(looks_like_engine_ini(""));
    }
}
