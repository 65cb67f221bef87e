mod common;

use common::{copy, paths_of, same, Harness, PromptCall};
use v2077_installer::models::error::InstallError;
use v2077_installer::models::layout::{ArchiveLayout, InstallerKind, LayoutKind};

#[test]
fn test_canonical_archive_is_copied_in_place() {
    let harness = Harness::new();

    let result = harness.install(&["archive/pc/mod/first.archive"]).unwrap();

    assert_eq!(result.installer, InstallerKind::Archive);
    assert_eq!(result.layout, LayoutKind::Archive(ArchiveLayout::Canon));
    assert_eq!(result.instructions, vec![same("archive/pc/mod/first.archive")]);
    assert!(harness.calls().is_empty());
}

#[test]
fn test_toplevel_archive_is_relocated() {
    let harness = Harness::new();

    let result = harness.install(&["first.archive"]).unwrap();

    assert_eq!(result.layout, LayoutKind::Archive(ArchiveLayout::Other));
    assert_eq!(
        result.instructions,
        vec![copy("first.archive", "archive/pc/mod/first.archive")]
    );
}

#[test]
fn test_nested_archives_are_flattened() {
    let harness = Harness::new();

    let result = harness
        .install(&["Options/Red/red.archive", "Options/Blue/blue.archive"])
        .unwrap();

    assert_eq!(result.instructions.len(), 2);
    assert!(result
        .instructions
        .contains(&copy("Options/Red/red.archive", "archive/pc/mod/red.archive")));
    assert!(result
        .instructions
        .contains(&copy("Options/Blue/blue.archive", "archive/pc/mod/blue.archive")));
}

#[test]
fn test_flattening_same_named_archives_is_a_conflict() {
    let harness = Harness::new();
    let files = ["Options/Red/mod.archive", "Options/Blue/mod.archive"];

    let result = harness.install(&files).unwrap();

    // 1. Installed verbatim after the user agreed
    assert_eq!(result.layout, LayoutKind::Fallback);
    assert_eq!(
        harness.calls(),
        vec![PromptCall::Conflict(InstallerKind::Archive, paths_of(&files))]
    );
}

#[test]
fn test_xl_files_make_an_xl_layout() {
    let harness = Harness::new();

    let result = harness
        .install(&["archive/pc/mod/first.archive", "archive/pc/mod/first.archive.xl"])
        .unwrap();

    assert_eq!(result.layout, LayoutKind::Archive(ArchiveLayout::Xl));
    assert_eq!(result.instructions.len(), 2);
}

#[test]
fn test_other_files_in_the_canonical_dir_come_along() {
    let harness = Harness::new();

    let result = harness
        .install(&["archive/pc/mod/first.archive", "archive/pc/mod/first.txt"])
        .unwrap();

    assert_eq!(
        result.instructions,
        vec![
            same("archive/pc/mod/first.archive"),
            same("archive/pc/mod/first.txt"),
        ]
    );
}

#[test]
fn test_heritage_archives_move_to_the_mod_dir() {
    let harness = Harness::new();

    let result = harness.install(&["archive/pc/patch/first.archive"]).unwrap();

    assert_eq!(result.layout, LayoutKind::Archive(ArchiveLayout::Heritage));
    assert_eq!(
        result.instructions,
        vec![copy(
            "archive/pc/patch/first.archive",
            "archive/pc/mod/first.archive"
        )]
    );
}

#[test]
fn test_heritage_archives_conflict_when_fixing_is_disabled() {
    let mut harness = Harness::new();
    harness.settings.fix_heritage_archives = false;

    let result = harness.install(&["archive/pc/patch/first.archive"]).unwrap();

    assert_eq!(result.layout, LayoutKind::Fallback);
    assert_eq!(result.instructions, vec![same("archive/pc/patch/first.archive")]);
}

#[test]
fn test_stray_archive_conflict_proceeds_verbatim() {
    let harness = Harness::new();
    let files = ["archive/pc/mod/a.archive", "outtaplace.archive"];

    let result = harness.install(&files).unwrap();

    // 1. Both files untouched
    assert_eq!(
        result.instructions,
        vec![same("archive/pc/mod/a.archive"), same("outtaplace.archive")]
    );
    // 2. The user was asked exactly once, with the full listing
    assert_eq!(
        harness.calls(),
        vec![PromptCall::Conflict(InstallerKind::Archive, paths_of(&files))]
    );
}

#[test]
fn test_stray_archive_conflict_cancels() {
    let harness = Harness::cancelling();

    let err = harness
        .install(&["archive/pc/mod/a.archive", "outtaplace.archive"])
        .unwrap_err();

    assert!(err.is_cancellation());
    assert!(matches!(
        err,
        InstallError::Cancelled {
            installer: InstallerKind::Archive
        }
    ));
}

#[test]
fn test_classification_is_repeatable() {
    let harness = Harness::new();
    let files = ["archive/pc/mod/a.archive", "archive/pc/mod/a.xl"];

    let first = harness.install(&files).unwrap();
    let second = harness.install(&files).unwrap();

    assert_eq!(first, second);
}
