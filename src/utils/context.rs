use crate::config::EngineSettings;
use crate::core::host::SourceReader;
use crate::models::error::InstallError;
use crate::models::mod_dto::ModInfo;
use crate::utils::file::FileUtils;
use camino::{Utf8Path, Utf8PathBuf};

/// Per-install state shared by every classifier.
pub struct InstallContext<'a> {
    pub mod_info: &'a ModInfo,
    pub settings: &'a EngineSettings,
    reader: &'a dyn SourceReader,
    /// Wrapper folder stripped by the giftwrap step. Tree paths are relative
    /// to it, staged files are not.
    source_prefix: Option<Utf8PathBuf>,
}

impl<'a> InstallContext<'a> {
    pub fn new(
        mod_info: &'a ModInfo,
        settings: &'a EngineSettings,
        reader: &'a dyn SourceReader,
    ) -> Self {
        Self {
            mod_info,
            settings,
            reader,
            source_prefix: None,
        }
    }

    pub fn with_source_prefix(mut self, prefix: Option<Utf8PathBuf>) -> Self {
        self.source_prefix = prefix;
        self
    }

    /// Reads a staged file by its tree path.
    pub fn read_source(&self, tree_path: &Utf8Path) -> Result<String, InstallError> {
        match &self.source_prefix {
            Some(prefix) => self.reader.read_to_string(&prefix.join(tree_path)),
            None => self.reader.read_to_string(tree_path),
        }
    }

    /// The mod name as a single safe directory name.
    pub fn mod_dir_name(&self) -> String {
        let sanitized = FileUtils::sanitize_component(&self.mod_info.name);
        if sanitized.is_empty() {
            FileUtils::sanitize_component(&self.mod_info.id)
        } else {
            sanitized
        }
    }
}
