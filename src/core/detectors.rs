//! One installer per mod kind. Every installer exposes `detect`, a cheap
//! structural check, and `classify`, which decides between `NoMatch`,
//! `Conflict` and `Matched` on its own without relying on any peer.

pub mod amm;
pub mod archive;
pub mod asi;
pub mod audioware;
pub mod cet;
pub mod config_json;
pub mod config_xml;
pub mod core_tools;
pub mod fallback;
pub mod ini;
pub mod preset;
pub mod red4ext;
pub mod redmod;
pub mod redscript;
pub mod tweak_xl;

use crate::core::detectors::archive::ArchiveInstaller;
use crate::core::file_tree::{has_any_extension, FileTree};
use crate::models::error::InstallError;
use crate::models::layout::{ArchiveLayout, Classification, InstallerKind, LayoutKind};
use crate::models::paths::{ARCHIVE_MOD_EXTENSION, ARCHIVE_XL_EXTENSION, KNOWN_TOPLEVEL_DIRS};
use crate::utils::context::InstallContext;
use camino::Utf8Path;
use tracing::debug;

pub(crate) fn is_archive_file(path: &Utf8Path) -> bool {
    has_any_extension(path, &[ARCHIVE_MOD_EXTENSION, ARCHIVE_XL_EXTENSION])
}

pub(crate) fn is_not_archive_file(path: &Utf8Path) -> bool {
    !is_archive_file(path)
}

/// True for the last component of `dir` being one of the game's own top-level directories.
pub(crate) fn is_known_toplevel_dir(dir: &Utf8Path) -> bool {
    dir.file_name()
        .map(|name| {
            KNOWN_TOPLEVEL_DIRS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(name))
        })
        .unwrap_or(false)
}

/// Folds archive files shipped next to a single-kind mod into its result.
///
/// Only canonical, XL and heritage archive shapes are accepted. Stray archives
/// or an archive conflict turn the whole install into a conflict of `installer`.
pub(crate) fn with_extra_archives(
    ctx: &InstallContext,
    tree: &FileTree,
    installer: InstallerKind,
    own: Classification,
) -> Result<Classification, InstallError> {
    let Classification::Matched(mut own) = own else {
        return Ok(own);
    };

    match ArchiveInstaller::classify_optional(ctx, tree)? {
        Classification::Matched(extra) => match extra.layout {
            LayoutKind::NoLayoutOptional => Ok(Classification::Matched(own)),
            LayoutKind::Archive(ArchiveLayout::Canon)
            | LayoutKind::Archive(ArchiveLayout::Xl)
            | LayoutKind::Archive(ArchiveLayout::Heritage) => {
                debug!(
                    "{installer}: adding {} archive instructions ({})",
                    extra.instructions.len(),
                    extra.layout
                );
                own.instructions.extend(extra.instructions);
                Ok(Classification::Matched(own))
            }
            other => Ok(Classification::conflict(
                installer,
                format!("archives next to a {installer} mod must be in archive/pc/mod, found {other}"),
            )),
        },
        Classification::NoMatch => Ok(Classification::Matched(own)),
        Classification::Conflict(report) => Ok(Classification::conflict(installer, report.reason)),
    }
}
