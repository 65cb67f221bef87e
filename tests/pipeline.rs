mod common;

use common::{copy, paths_of, same, Harness, PromptCall};
use v2077_installer::models::error::InstallError;
use v2077_installer::models::instruction::Instruction;
use v2077_installer::models::layout::{
    AmmLayout, AsiLayout, CetLayout, CoreTool, InstallerKind, LayoutKind, Red4ExtLayout,
    RedscriptLayout,
};
use v2077_installer::models::paths::{
    CET_MOD_CANONICAL_PATH_PREFIX, RED4EXT_MOD_CANONICAL_BASEDIR,
};

const CET_INIT: &str = "bin/x64/plugins/cyber_engine_tweaks/mods/MyMod/init.lua";
const CET_DB: &str = "bin/x64/plugins/cyber_engine_tweaks/mods/MyMod/db.sqlite3";

#[test]
fn test_core_cet_release() {
    let harness = Harness::new();
    let files = [
        "bin/x64/plugins/cyber_engine_tweaks.asi",
        "bin/x64/plugins/cyber_engine_tweaks/scripts/json.lua",
        "bin/x64/global.ini",
    ];

    let result = harness.install(&files).unwrap();

    // 1. Everything in place, then the mods directory
    assert_eq!(result.installer, InstallerKind::Core(CoreTool::Cet));
    assert_eq!(result.layout, LayoutKind::Core(CoreTool::Cet));
    assert_eq!(
        result.instructions,
        vec![
            same(files[0]),
            same(files[1]),
            same(files[2]),
            Instruction::mkdir(CET_MOD_CANONICAL_PATH_PREFIX),
        ]
    );
}

#[test]
fn test_core_red4ext_release() {
    let harness = Harness::new();

    let result = harness
        .install(&["red4ext/RED4ext.dll", "bin/x64/winmm.dll"])
        .unwrap();

    assert_eq!(result.installer, InstallerKind::Core(CoreTool::Red4ext));
    assert_eq!(
        result.instructions.last(),
        Some(&Instruction::mkdir(RED4EXT_MOD_CANONICAL_BASEDIR))
    );
}

#[test]
fn test_core_release_with_loose_files_is_a_conflict() {
    let harness = Harness::new();
    let files = ["bin/x64/plugins/cyber_engine_tweaks.asi", "README.md"];

    let result = harness.install(&files).unwrap();

    assert_eq!(result.layout, LayoutKind::Fallback);
    assert_eq!(
        harness.calls(),
        vec![PromptCall::Conflict(
            InstallerKind::Core(CoreTool::Cet),
            paths_of(&files)
        )]
    );
}

#[test]
fn test_cet_canonical_mod() {
    let harness = Harness::new();

    let result = harness.install(&[CET_INIT, CET_DB]).unwrap();

    assert_eq!(result.installer, InstallerKind::Cet);
    assert_eq!(result.layout, LayoutKind::Cet(CetLayout::Canon));
    assert_eq!(result.instructions, vec![same(CET_INIT), same(CET_DB)]);
}

#[test]
fn test_cet_takes_canonical_archives_along() {
    let harness = Harness::new();

    let result = harness
        .install(&[CET_INIT, "archive/pc/mod/my.archive"])
        .unwrap();

    assert_eq!(result.layout, LayoutKind::Cet(CetLayout::Canon));
    assert_eq!(
        result.instructions,
        vec![same(CET_INIT), same("archive/pc/mod/my.archive")]
    );
}

#[test]
fn test_cet_with_stray_archive_is_a_conflict() {
    let harness = Harness::new();
    let files = [CET_INIT, "my.archive"];

    let result = harness.install(&files).unwrap();

    assert_eq!(result.installer, InstallerKind::Cet);
    assert_eq!(result.instructions, vec![same(CET_INIT), same("my.archive")]);
    assert_eq!(
        harness.calls(),
        vec![PromptCall::Conflict(InstallerKind::Cet, paths_of(&files))]
    );
}

#[test]
fn test_cet_files_outside_a_mod_dir_are_a_conflict() {
    let harness = Harness::cancelling();

    let err = harness
        .install(&[
            CET_INIT,
            "bin/x64/plugins/cyber_engine_tweaks/mods/loose.lua",
        ])
        .unwrap_err();

    assert!(matches!(
        err,
        InstallError::Cancelled {
            installer: InstallerKind::Cet
        }
    ));
}

#[test]
fn test_redscript_canonical_mod() {
    let harness = Harness::new();
    let files = ["r6/scripts/MyMod/a.reds", "r6/scripts/MyMod/sub/b.reds"];

    let result = harness.install(&files).unwrap();

    assert_eq!(result.layout, LayoutKind::Redscript(RedscriptLayout::Canon));
    assert_eq!(result.instructions, vec![same(files[0]), same(files[1])]);
}

#[test]
fn test_redscript_basedir_moves_into_mod_dir() {
    let harness = Harness::new();

    let result = harness.install(&["r6/scripts/a.reds"]).unwrap();

    assert_eq!(result.layout, LayoutKind::Redscript(RedscriptLayout::Basedir));
    assert_eq!(
        result.instructions,
        vec![copy("r6/scripts/a.reds", "r6/scripts/My Mod/a.reds")]
    );
}

#[test]
fn test_redscript_toplevel_moves_into_mod_dir() {
    let harness = Harness::new();

    let result = harness.install(&["a.reds", "b.reds"]).unwrap();

    assert_eq!(result.installer, InstallerKind::Redscript);
    assert_eq!(
        result.layout,
        LayoutKind::Redscript(RedscriptLayout::Toplevel)
    );
    assert_eq!(
        result.instructions,
        vec![
            copy("a.reds", "r6/scripts/My Mod/a.reds"),
            copy("b.reds", "r6/scripts/My Mod/b.reds"),
        ]
    );
}

#[test]
fn test_redscript_mixed_shapes_are_a_conflict() {
    let harness = Harness::new();
    let files = ["r6/scripts/MyMod/a.reds", "b.reds"];

    harness.install(&files).unwrap();

    assert_eq!(
        harness.calls(),
        vec![PromptCall::Conflict(InstallerKind::Redscript, paths_of(&files))]
    );
}

#[test]
fn test_directory_lookups_ignore_case() {
    let harness = Harness::new();

    let result = harness
        .install(&["R6/", "R6/Scripts/", "R6/Scripts/MyMod/a.reds"])
        .unwrap();

    // 1. Placeholders don't become instructions, spelling is kept
    assert_eq!(result.layout, LayoutKind::Redscript(RedscriptLayout::Canon));
    assert_eq!(result.instructions, vec![same("R6/Scripts/MyMod/a.reds")]);
}

#[test]
fn test_red4ext_basedir_moves_into_plugin_dir() {
    let harness = Harness::new();

    let result = harness.install(&["red4ext/plugins/my.dll"]).unwrap();

    assert_eq!(result.layout, LayoutKind::Red4Ext(Red4ExtLayout::Basedir));
    assert_eq!(
        result.instructions,
        vec![copy("red4ext/plugins/my.dll", "red4ext/plugins/My Mod/my.dll")]
    );
}

#[test]
fn test_red4ext_mod_named_dir_goes_under_plugins() {
    let harness = Harness::new();

    let result = harness
        .install(&["MyPlugin/my.dll", "MyPlugin/readme.txt"])
        .unwrap();

    assert_eq!(result.layout, LayoutKind::Red4Ext(Red4ExtLayout::Modnamed));
    assert_eq!(
        result.instructions,
        vec![
            copy("MyPlugin/my.dll", "red4ext/plugins/MyPlugin/my.dll"),
            copy("MyPlugin/readme.txt", "red4ext/plugins/MyPlugin/readme.txt"),
        ]
    );
}

#[test]
fn test_red4ext_canonical_plugin() {
    let harness = Harness::new();
    let files = [
        "red4ext/plugins/MyPlugin/my.dll",
        "red4ext/plugins/MyPlugin/readme.txt",
    ];

    let result = harness.install(&files).unwrap();

    assert_eq!(result.installer, InstallerKind::Red4Ext);
    assert_eq!(result.layout, LayoutKind::Red4Ext(Red4ExtLayout::Canon));
    assert_eq!(result.instructions, vec![same(files[0]), same(files[1])]);
}

#[test]
fn test_red4ext_toplevel_moves_into_plugin_dir() {
    let harness = Harness::new();

    let result = harness.install(&["my.dll", "readme.txt"]).unwrap();

    assert_eq!(result.installer, InstallerKind::Red4Ext);
    assert_eq!(result.layout, LayoutKind::Red4Ext(Red4ExtLayout::Toplevel));
    assert_eq!(
        result.instructions,
        vec![
            copy("my.dll", "red4ext/plugins/My Mod/my.dll"),
            copy("readme.txt", "red4ext/plugins/My Mod/readme.txt"),
        ]
    );
}

#[test]
fn test_red4ext_toplevel_must_own_every_file() {
    let harness = Harness::new();
    let files = ["my.dll", "docs/readme.txt"];

    let result = harness.install(&files).unwrap();

    // 1. No partial move, the listing goes through the conflict prompt
    assert_eq!(result.installer, InstallerKind::Red4Ext);
    assert_eq!(result.layout, LayoutKind::Fallback);
    assert_eq!(result.instructions, vec![same(files[0]), same(files[1])]);
    assert_eq!(
        harness.calls(),
        vec![PromptCall::Conflict(InstallerKind::Red4Ext, paths_of(&files))]
    );
}

#[test]
fn test_red4ext_protected_dll_is_fatal() {
    let harness = Harness::new();

    let err = harness
        .install(&["red4ext/plugins/MyPlugin/version.dll"])
        .unwrap_err();

    // 1. No prompt, only the error dialog
    match err {
        InstallError::Structural {
            installer, files, ..
        } => {
            assert_eq!(installer, InstallerKind::Red4Ext);
            assert_eq!(files, paths_of(&["red4ext/plugins/MyPlugin/version.dll"]));
        }
        other => panic!("unexpected error {other}"),
    }
    assert_eq!(
        harness.calls(),
        vec![PromptCall::StructuralDialog(
            InstallerKind::Red4Ext,
            "Invalid RED4ext layout".to_string()
        )]
    );
}

#[test]
fn test_red4ext_extra_protected_dlls_from_settings() {
    let mut harness = Harness::new();
    harness.settings.extra_protected_dlls = vec!["Shady.DLL".to_string()];

    let err = harness
        .install(&["red4ext/plugins/MyPlugin/shady.dll"])
        .unwrap_err();

    assert!(matches!(err, InstallError::Structural { .. }));
}

#[test]
fn test_asi_canonical_and_toplevel() {
    let harness = Harness::new();

    let canon = harness.install(&["bin/x64/plugins/my.asi"]).unwrap();
    let toplevel = harness.install(&["my.asi", "my.txt"]).unwrap();

    assert_eq!(canon.layout, LayoutKind::Asi(AsiLayout::Canon));
    assert_eq!(canon.instructions, vec![same("bin/x64/plugins/my.asi")]);
    assert_eq!(toplevel.layout, LayoutKind::Asi(AsiLayout::Toplevel));
    assert_eq!(
        toplevel.instructions,
        vec![
            copy("my.asi", "bin/x64/plugins/my.asi"),
            copy("my.txt", "bin/x64/plugins/my.txt"),
        ]
    );
}

#[test]
fn test_asi_takes_canonical_archives_along() {
    let harness = Harness::new();

    let result = harness
        .install(&["bin/x64/plugins/my.asi", "archive/pc/mod/a.archive"])
        .unwrap();

    assert_eq!(result.installer, InstallerKind::Asi);
    assert_eq!(result.layout, LayoutKind::Asi(AsiLayout::Canon));
    assert_eq!(
        result.instructions,
        vec![same("bin/x64/plugins/my.asi"), same("archive/pc/mod/a.archive")]
    );
    assert!(harness.calls().is_empty());
}

#[test]
fn test_asi_with_stray_archive_is_a_conflict() {
    let harness = Harness::new();
    let files = ["bin/x64/plugins/my.asi", "extra/a.archive"];

    let result = harness.install(&files).unwrap();

    assert_eq!(result.layout, LayoutKind::Fallback);
    assert_eq!(
        harness.calls(),
        vec![PromptCall::Conflict(InstallerKind::Asi, paths_of(&files))]
    );
}

#[test]
fn test_tweak_xl_canonical() {
    let harness = Harness::new();
    let files = ["r6/tweaks/MyMod/a.yaml", "r6/tweaks/MyMod/readme.md"];

    let result = harness.install(&files).unwrap();

    assert_eq!(result.installer, InstallerKind::TweakXl);
    assert_eq!(result.layout, LayoutKind::TweakXl);
    assert_eq!(result.instructions, vec![same(files[0]), same(files[1])]);
}

#[test]
fn test_audioware_canonical() {
    let harness = Harness::new();
    let files = ["r6/audioware/MyMod/mod.yml", "r6/audioware/MyMod/boom.wav"];

    let result = harness.install(&files).unwrap();

    assert_eq!(result.layout, LayoutKind::Audioware);
    assert_eq!(result.instructions, vec![same(files[0]), same(files[1])]);
}

#[test]
fn test_amm_toplevel_moves_under_amm() {
    let harness = Harness::new();

    let result = harness
        .install(&["Collabs/Custom Props/prop.lua"])
        .unwrap();

    assert_eq!(result.layout, LayoutKind::Amm(AmmLayout::Toplevel));
    assert_eq!(
        result.instructions,
        vec![copy(
            "Collabs/Custom Props/prop.lua",
            "bin/x64/plugins/cyber_engine_tweaks/mods/AppearanceMenuMod/Collabs/Custom Props/prop.lua"
        )]
    );
}

#[test]
fn test_amm_canonical_content() {
    let harness = Harness::new();
    let files = [
        "bin/x64/plugins/cyber_engine_tweaks/mods/AppearanceMenuMod/Collabs/Custom Props/prop.lua",
        "bin/x64/plugins/cyber_engine_tweaks/mods/AppearanceMenuMod/User/Decor/decor.json",
    ];

    let result = harness.install(&files).unwrap();

    assert_eq!(result.installer, InstallerKind::Amm);
    assert_eq!(result.layout, LayoutKind::Amm(AmmLayout::Canon));
    assert_eq!(result.instructions, vec![same(files[0]), same(files[1])]);
}

#[test]
fn test_unrecognized_archive_falls_back_silently() {
    let harness = Harness::new();

    let result = harness.install(&["readme.txt", "docs/manual.pdf"]).unwrap();

    assert_eq!(result.installer, InstallerKind::Fallback);
    assert_eq!(result.layout, LayoutKind::Fallback);
    assert_eq!(
        result.instructions,
        vec![same("readme.txt"), same("docs/manual.pdf")]
    );
    assert!(harness.calls().is_empty());
}

#[test]
fn test_supported() {
    let harness = Harness::new();

    let empty = harness.supported(&[]);
    let archive = harness.supported(&["archive/pc/mod/a.archive"]);
    let placeholders_only = harness.supported(&["r6/", "r6/scripts/"]);

    assert!(!empty.supported);
    assert_eq!(empty.installer, InstallerKind::Fallback);
    assert!(archive.supported);
    assert_eq!(archive.installer, InstallerKind::Archive);
    assert!(!placeholders_only.supported);
}
