use crate::models::error::InstallError;
use crate::models::layout::InstallerKind;
use crate::utils::file::FileUtils;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Answer to a yes/no dialog.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Cancel,
}

/// Everything the engine asks the user goes through here. The host decides
/// how (and whether) to show it.
pub trait Prompter {
    /// The archive could not be classified safely. `files` is the full
    /// original listing.
    fn prompt_on_conflict(&self, installer: InstallerKind, files: &[Utf8PathBuf]) -> Decision;

    /// Matched instructions would overwrite game files that are usually
    /// edited by hand.
    fn confirm_protected_paths(&self, installer: InstallerKind, files: &[Utf8PathBuf]) -> Decision;

    /// Informational only. Called right before a structural failure is returned.
    fn show_structural_error(&self, _installer: InstallerKind, _title: &str, _files: &[Utf8PathBuf]) {}
}

/// Read access to the content of staged files, for the few classifiers that
/// need to look inside (REDmod manifests, presets, INI sniffing).
pub trait SourceReader {
    fn read_to_string(&self, relative: &Utf8Path) -> Result<String, InstallError>;
}

/// The extracted archive on disk.
#[derive(Clone, Debug)]
pub struct StagingDir {
    root: Utf8PathBuf,
}

impl StagingDir {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Like `new`, but resolves the directory first so relative and
    /// non-canonical paths behave.
    pub fn open(root: &Utf8Path) -> Result<Self, InstallError> {
        let canonical = dunce::canonicalize(root)?;
        let root = Utf8PathBuf::from_path_buf(canonical).map_err(|p| InstallError::InvalidPath {
            path: p.display().to_string(),
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// The flat listing the engine expects: `/`-separated relative paths,
    /// directories with a trailing separator.
    pub fn list_files(&self) -> Result<Vec<String>, InstallError> {
        FileUtils::list_relative(&self.root)
    }
}

impl SourceReader for StagingDir {
    fn read_to_string(&self, relative: &Utf8Path) -> Result<String, InstallError> {
        Ok(std::fs::read_to_string(self.root.join(relative))?)
    }
}
