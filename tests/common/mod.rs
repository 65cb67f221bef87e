#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::collections::HashMap;
use tempfile::TempDir;
use v2077_installer::config::EngineSettings;
use v2077_installer::core::engine::{Engine, InstallResult, Supported};
use v2077_installer::core::host::{Decision, Prompter, SourceReader};
use v2077_installer::models::error::InstallError;
use v2077_installer::models::instruction::Instruction;
use v2077_installer::models::layout::InstallerKind;
use v2077_installer::models::mod_dto::{InstallContextPaths, ModInfo};

pub const MOD_NAME: &str = "My Mod";
pub const MOD_ID: &str = "1234";

/// Staged file contents, looked up case-insensitively.
#[derive(Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn insert(&mut self, path: &str, content: &str) {
        self.files.insert(path.to_lowercase(), content.to_string());
    }
}

impl SourceReader for MemorySource {
    fn read_to_string(&self, relative: &Utf8Path) -> Result<String, InstallError> {
        self.files
            .get(&relative.as_str().to_lowercase())
            .cloned()
            .ok_or_else(|| {
                InstallError::IOError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{relative} not staged"),
                ))
            })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PromptCall {
    Conflict(InstallerKind, Vec<Utf8PathBuf>),
    Protected(InstallerKind, Vec<Utf8PathBuf>),
    StructuralDialog(InstallerKind, String),
}

/// Answers every prompt with a fixed decision and records what was asked.
pub struct ScriptedPrompter {
    pub on_conflict: Decision,
    pub on_protected: Decision,
    pub calls: RefCell<Vec<PromptCall>>,
}

impl ScriptedPrompter {
    pub fn answering(on_conflict: Decision, on_protected: Decision) -> Self {
        Self {
            on_conflict,
            on_protected,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt_on_conflict(&self, installer: InstallerKind, files: &[Utf8PathBuf]) -> Decision {
        self.calls
            .borrow_mut()
            .push(PromptCall::Conflict(installer, files.to_vec()));
        self.on_conflict
    }

    fn confirm_protected_paths(&self, installer: InstallerKind, files: &[Utf8PathBuf]) -> Decision {
        self.calls
            .borrow_mut()
            .push(PromptCall::Protected(installer, files.to_vec()));
        self.on_protected
    }

    fn show_structural_error(&self, installer: InstallerKind, title: &str, _files: &[Utf8PathBuf]) {
        self.calls
            .borrow_mut()
            .push(PromptCall::StructuralDialog(installer, title.to_string()));
    }
}

/// One engine configuration plus its collaborators.
pub struct Harness {
    pub settings: EngineSettings,
    pub prompter: ScriptedPrompter,
    pub source: MemorySource,
    pub mod_info: ModInfo,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            settings: EngineSettings::default(),
            prompter: ScriptedPrompter::answering(Decision::Proceed, Decision::Proceed),
            source: MemorySource::default(),
            mod_info: mod_info(MOD_NAME),
        }
    }

    pub fn cancelling() -> Self {
        Self {
            prompter: ScriptedPrompter::answering(Decision::Cancel, Decision::Cancel),
            ..Self::new()
        }
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.source.insert(path, content);
        self
    }

    pub fn install(&self, files: &[&str]) -> Result<InstallResult, InstallError> {
        Engine::new(self.settings.clone(), &self.prompter, Some(&self.source)).install(
            files,
            &paths(),
            &self.mod_info,
        )
    }

    pub fn supported(&self, files: &[&str]) -> Supported {
        Engine::new(self.settings.clone(), &self.prompter, Some(&self.source)).test_supported(files)
    }

    pub fn calls(&self) -> Vec<PromptCall> {
        self.prompter.calls.borrow().clone()
    }
}

pub fn mod_info(name: &str) -> ModInfo {
    ModInfo {
        name: name.to_string(),
        id: MOD_ID.to_string(),
        version: "1.0.0".to_string(),
        create_time: None,
    }
}

pub fn paths() -> InstallContextPaths {
    InstallContextPaths {
        staging_dir: Utf8PathBuf::from("staging"),
        destination_path: Utf8PathBuf::from("game"),
    }
}

pub fn copy(source: &str, destination: &str) -> Instruction {
    Instruction::copy(source, destination)
}

pub fn same(path: &str) -> Instruction {
    Instruction::copy(path, path)
}

pub fn paths_of(files: &[&str]) -> Vec<Utf8PathBuf> {
    files.iter().map(|f| Utf8PathBuf::from(*f)).collect()
}

/// Extracts `files` (path, content) into a fresh staging directory.
/// Paths ending in `/` become empty directories.
pub fn setup_staging(files: &[(&str, &str)]) -> (TempDir, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    for (path, content) in files {
        let target = root.join(path);
        if path.ends_with('/') {
            std::fs::create_dir_all(&target).unwrap();
            continue;
        }
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&target, content).unwrap();
    }

    (tmp, root)
}
