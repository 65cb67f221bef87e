use camino::Utf8PathBuf;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "v2077-installer";
const CONFIG_NAME: &str = "settings";

/// Knobs of the install engine. Stored with confy so the host can edit them
/// between runs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub version: u8,
    /// Strip a single wrapper folder around an otherwise canonical layout.
    pub unwrap_giftwrapped: bool,
    /// Relocate `archive/pc/patch` archives to `archive/pc/mod` instead of
    /// escalating them.
    pub fix_heritage_archives: bool,
    /// Emit a directory marker for the REDmod script cache with every REDmod.
    pub redmod_scripts_cache: bool,
    /// Extra DLL file names (lowercase) no RED4ext plugin may ship.
    pub extra_protected_dlls: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            version: 0,
            unwrap_giftwrapped: true,
            fix_heritage_archives: true,
            redmod_scripts_cache: true,
            extra_protected_dlls: Vec::new(),
        }
    }
}

impl EngineSettings {
    pub fn load() -> Result<EngineSettings, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    pub fn load_path(path: impl Into<PathBuf>) -> Result<EngineSettings, confy::ConfyError> {
        confy::load_path(path.into())
    }

    pub fn save_path(&self, path: impl Into<PathBuf>) -> Result<(), confy::ConfyError> {
        confy::store_path(path.into(), self)
    }

    /// Platform log directory, falling back to `./logs` next to the executable.
    pub fn log_dir() -> Utf8PathBuf {
        ProjectDirs::from("com", "martes", APP_NAME)
            .and_then(|dirs| Utf8PathBuf::from_path_buf(dirs.data_local_dir().join("logs")).ok())
            .or_else(|| {
                std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(|p| p.join("logs")))
                    .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
            })
            .unwrap_or_else(|| Utf8PathBuf::from("logs"))
    }

    /// The protected DLL names, built-in list first.
    pub fn protected_dlls(&self) -> impl Iterator<Item = String> + '_ {
        crate::models::paths::RED4EXT_KNOWN_NONOVERRIDABLE_DLLS
            .iter()
            .map(|s| s.to_string())
            .chain(self.extra_protected_dlls.iter().map(|s| s.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_enable_normalization() {
        let settings = EngineSettings::default();
        assert!(settings.unwrap_giftwrapped);
        assert!(settings.fix_heritage_archives);
        assert!(settings.redmod_scripts_cache);
    }

    #[test]
    fn test_protected_dlls_fold_case() {
        let settings = EngineSettings {
            extra_protected_dlls: vec!["D3D12.dll".into()],
            ..Default::default()
        };
        assert!(settings.protected_dlls().any(|d| d == "d3d12.dll"));
        assert!(settings.protected_dlls().any(|d| d == "version.dll"));
    }

    #[test]
    fn test_log_dir_always_resolves() {
        assert!(EngineSettings::log_dir().ends_with("logs"));
    }
}
