use crate::models::layout::InstallerKind;
use camino::Utf8PathBuf;
use derive_more::{Display, Error, From};

#[derive(Debug, Display, Error, From)]
pub enum InstallError {
    /// The user declined to proceed with an ambiguous or protected install.
    #[display("{installer} installation cancelled by user")]
    Cancelled { installer: InstallerKind },

    /// The layout was recognized but is unsafe to install as-is.
    #[display("{installer}: {reason}")]
    Structural {
        installer: InstallerKind,
        reason: String,
        files: Vec<Utf8PathBuf>,
    },

    /// Two layouts were found that can never be installed from the same archive.
    #[display("{first} and {second} layouts can't be installed from the same archive")]
    IncompatibleKinds {
        first: InstallerKind,
        second: InstallerKind,
    },

    #[display("I/O error: {_0}")]
    #[from]
    IOError(std::io::Error),

    #[display("Settings error: {_0}")]
    #[from]
    Settings(confy::ConfyError),

    #[display("Invalid path: {path}")]
    InvalidPath { path: String },
}

impl InstallError {
    /// Builds a structural failure whose message also lists the layouts the
    /// installer accepts, so the archive can be fixed by hand.
    pub fn structural(
        installer: InstallerKind,
        problem: impl AsRef<str>,
        files: Vec<Utf8PathBuf>,
    ) -> Self {
        InstallError::Structural {
            installer,
            reason: format!(
                "{}\n\nSupported layouts:\n{}",
                problem.as_ref(),
                installer.supported_layouts()
            ),
            files,
        }
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, InstallError::Cancelled { .. })
    }
}
