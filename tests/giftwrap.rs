mod common;

use camino::Utf8Path;
use common::{copy, paths_of, same, Harness, PromptCall};
use v2077_installer::core::instructions::sources_of;
use v2077_installer::models::instruction::Instruction;
use v2077_installer::models::layout::{ArchiveLayout, CetLayout, InstallerKind, LayoutKind, RedmodLayout};

const WRAPPER: &str = "Wrapper";

fn wrapped(files: &[&str]) -> Vec<String> {
    files.iter().map(|f| format!("{WRAPPER}/{f}")).collect()
}

fn as_strs(files: &[String]) -> Vec<&str> {
    files.iter().map(String::as_str).collect()
}

#[test]
fn test_wrapped_install_matches_unwrapped_with_sources_prefixed() {
    let harness = Harness::new();
    let inner = [
        "bin/x64/plugins/cyber_engine_tweaks/mods/MyMod/init.lua",
        "archive/pc/mod/a.archive",
    ];
    let outer = wrapped(&inner);

    let plain = harness.install(&inner).unwrap();
    let result = harness.install(&as_strs(&outer)).unwrap();

    // 1. Same classification
    assert_eq!(result.installer, plain.installer);
    assert_eq!(result.layout, LayoutKind::Cet(CetLayout::Canon));

    // 2. Sources point into the wrapper, destinations don't
    let expected: Vec<Instruction> = plain
        .instructions
        .into_iter()
        .map(|i| i.with_source_prefix(Utf8Path::new(WRAPPER)))
        .collect();
    assert_eq!(result.instructions, expected);
    assert_eq!(result.instructions[0], copy(&outer[0], inner[0]));
    assert!(sources_of(&result.instructions)
        .iter()
        .all(|s| s.starts_with(WRAPPER)));
    assert!(result
        .instructions
        .iter()
        .filter_map(Instruction::destination)
        .all(|d| !d.starts_with(WRAPPER)));
}

#[test]
fn test_unwrapping_can_be_turned_off() {
    let mut harness = Harness::new();
    let outer = wrapped(&["archive/pc/mod/a.archive"]);

    let unwrapped = harness.install(&as_strs(&outer)).unwrap();
    harness.settings.unwrap_giftwrapped = false;
    let as_is = harness.install(&as_strs(&outer)).unwrap();

    assert_eq!(unwrapped.layout, LayoutKind::Archive(ArchiveLayout::Canon));
    assert_eq!(as_is.layout, LayoutKind::Archive(ArchiveLayout::Other));
    assert_eq!(
        unwrapped.instructions,
        vec![copy("Wrapper/archive/pc/mod/a.archive", "archive/pc/mod/a.archive")]
    );
}

#[test]
fn test_wrapped_redmod_reads_its_manifest_inside_the_wrapper() {
    let harness = Harness::new().with_file(
        "Wrapper/mods/MyRedmod/info.json",
        r#"{ "name": "MyRedmod", "version": "1" }"#,
    );
    let outer = wrapped(&["mods/MyRedmod/info.json", "mods/MyRedmod/archives/a.archive"]);

    let result = harness.install(&as_strs(&outer)).unwrap();

    assert_eq!(result.layout, LayoutKind::Redmod(RedmodLayout::Canon));
    assert_eq!(
        result.instructions[0],
        copy("Wrapper/mods/MyRedmod/info.json", "mods/MyRedmod/info.json")
    );
}

#[test]
fn test_wrapped_conflict_resolves_with_the_original_listing() {
    let harness = Harness::new();
    let outer = wrapped(&["archive/pc/mod/a.archive", "bin/x64/stray.archive"]);
    let files = as_strs(&outer);

    let result = harness.install(&files).unwrap();

    assert_eq!(result.installer, InstallerKind::Archive);
    assert_eq!(
        result.instructions,
        vec![same(files[0]), same(files[1])]
    );
    assert_eq!(
        harness.calls(),
        vec![PromptCall::Conflict(InstallerKind::Archive, paths_of(&files))]
    );
}

#[test]
fn test_wrapper_with_unknown_content_is_left_alone() {
    let harness = Harness::new();
    let files = ["Wrapper/docs/readme.txt", "Wrapper/archive/pc/mod/a.archive"];

    let result = harness.install(&files).unwrap();

    assert_eq!(result.layout, LayoutKind::Archive(ArchiveLayout::Other));
    assert_eq!(
        result.instructions,
        vec![copy(files[1], "archive/pc/mod/a.archive")]
    );
}
