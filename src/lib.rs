pub mod config;
pub mod core;
pub mod models;
pub mod utils;

pub use crate::config::EngineSettings;
pub use crate::core::engine::{Engine, InstallResult, Supported};
pub use crate::core::host::{Decision, Prompter, SourceReader, StagingDir};
pub use crate::models::error::InstallError;
pub use crate::models::instruction::Instruction;
pub use crate::models::layout::{InstallerKind, LayoutKind};
pub use crate::models::mod_dto::{InstallContextPaths, ModInfo};
