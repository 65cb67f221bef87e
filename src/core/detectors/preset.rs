use crate::core::detectors::with_extra_archives;
use crate::core::file_tree::{has_extension, root, FileTree};
use crate::core::instructions::instructions_for_source_to_dest_pairs;
use crate::models::error::InstallError;
use crate::models::layout::{Classification, InstallerKind, LayoutKind, PresetLayout};
use crate::models::paths::{
    PRESET_CYBERCAT_DIR, PRESET_MOD_EXTENSION, PRESET_UNLOCKER_FEMALE_DIR,
    PRESET_UNLOCKER_MALE_DIR,
};
use crate::utils::context::InstallContext;
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tracing::debug;

fn is_preset(path: &Utf8Path) -> bool {
    has_extension(path, PRESET_MOD_EXTENSION)
}

#[derive(Debug, PartialEq)]
enum PresetFormat {
    Unlocker(&'static str),
    CyberCat,
    UnknownGender(String),
}

/// Appearance Change Unlocker presets are JSON with a `gender`, everything
/// else is treated as a CyberCAT save preset.
fn sniff(content: &str) -> PresetFormat {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(content) else {
        return PresetFormat::CyberCat;
    };
    match map.get("gender") {
        None => PresetFormat::CyberCat,
        Some(Value::String(g)) if g.eq_ignore_ascii_case("female") => {
            PresetFormat::Unlocker(PRESET_UNLOCKER_FEMALE_DIR)
        }
        Some(Value::String(g)) if g.eq_ignore_ascii_case("male") => {
            PresetFormat::Unlocker(PRESET_UNLOCKER_MALE_DIR)
        }
        Some(other) => PresetFormat::UnknownGender(other.to_string()),
    }
}

pub struct PresetInstaller;

impl PresetInstaller {
    pub fn detect(tree: &FileTree) -> bool {
        tree.dir_with_some_under(root(), is_preset)
    }

    pub fn classify(ctx: &InstallContext, tree: &FileTree) -> Result<Classification, InstallError> {
        let presets = tree.files_under(root(), is_preset);
        if presets.is_empty() {
            return Ok(Classification::NoMatch);
        }

        let mut unlocker = Vec::new();
        let mut cybercat = Vec::new();
        for preset in presets {
            let name = preset.file_name().unwrap_or_default().to_string();
            match sniff(&ctx.read_source(&preset)?) {
                PresetFormat::Unlocker(dir) => {
                    let dest = Utf8Path::new(dir).join(&name);
                    unlocker.push((preset, dest));
                }
                PresetFormat::CyberCat => {
                    let dest = Utf8Path::new(PRESET_CYBERCAT_DIR).join(&name);
                    cybercat.push((preset, dest));
                }
                PresetFormat::UnknownGender(gender) => {
                    return Ok(Classification::conflict(
                        InstallerKind::Preset,
                        format!("{preset} is for an unknown body gender {gender}"),
                    ));
                }
            }
        }

        let (layout, pairs): (PresetLayout, Vec<(Utf8PathBuf, Utf8PathBuf)>) =
            match (unlocker.is_empty(), cybercat.is_empty()) {
                (false, true) => (PresetLayout::Unlocker, unlocker),
                (true, false) => (PresetLayout::CyberCat, cybercat),
                _ => {
                    return Ok(Classification::conflict(
                        InstallerKind::Preset,
                        "the archive mixes Appearance Change Unlocker and CyberCAT presets",
                    ))
                }
            };

        debug!("Preset.{layout}: {} presets", pairs.len());
        let own = Classification::matched(
            LayoutKind::Preset(layout),
            instructions_for_source_to_dest_pairs(pairs),
        );
        with_extra_archives(ctx, tree, InstallerKind::Preset, own)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_unlocker_genders() {
        assert_eq!(
            sniff(r#"{"gender": "Female", "skin": 3}"#),
            PresetFormat::Unlocker(PRESET_UNLOCKER_FEMALE_DIR)
        );
        assert_eq!(
            sniff(r#"{"gender": "male"}"#),
            PresetFormat::Unlocker(PRESET_UNLOCKER_MALE_DIR)
        );
    }

    #[test]
    fn test_sniff_anything_else_is_cybercat() {
        assert_eq!(sniff("not json at all"), PresetFormat::CyberCat);
        assert_eq!(sniff(r#"{"appearance": []}"#), PresetFormat::CyberCat);
        assert_eq!(sniff("[1, 2]"), PresetFormat::CyberCat);
    }

    #[test]
    fn test_sniff_unknown_gender() {
        assert!(matches!(
            sniff(r#"{"gender": 2}"#),
            PresetFormat::UnknownGender(_)
        ));
    }
}
