use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// A single declarative install operation handed back to the host.
///
/// `Copy` and `Move` both mean "place this source content at this destination".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Instruction {
    Copy {
        source: Utf8PathBuf,
        destination: Utf8PathBuf,
    },
    Move {
        source: Utf8PathBuf,
        destination: Utf8PathBuf,
    },
    #[serde(rename = "mkdir")]
    CreateDirectory { destination: Utf8PathBuf },
    #[serde(rename = "generatefile")]
    GenerateFile {
        destination: Utf8PathBuf,
        content: String,
    },
    #[serde(rename = "attribute")]
    AttachMetadata {
        key: String,
        value: serde_json::Value,
    },
}

impl Instruction {
    pub fn copy(source: impl Into<Utf8PathBuf>, destination: impl Into<Utf8PathBuf>) -> Self {
        Instruction::Copy {
            source: source.into(),
            destination: destination.into(),
        }
    }

    pub fn mkdir(destination: impl Into<Utf8PathBuf>) -> Self {
        Instruction::CreateDirectory {
            destination: destination.into(),
        }
    }

    pub fn source(&self) -> Option<&Utf8Path> {
        match self {
            Instruction::Copy { source, .. } | Instruction::Move { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn destination(&self) -> Option<&Utf8Path> {
        match self {
            Instruction::Copy { destination, .. }
            | Instruction::Move { destination, .. }
            | Instruction::CreateDirectory { destination }
            | Instruction::GenerateFile { destination, .. } => Some(destination),
            Instruction::AttachMetadata { .. } => None,
        }
    }

    /// Re-roots the source under `prefix`. Destinations never change.
    pub fn with_source_prefix(self, prefix: &Utf8Path) -> Self {
        match self {
            Instruction::Copy {
                source,
                destination,
            } => Instruction::Copy {
                source: prefix.join(source),
                destination,
            },
            Instruction::Move {
                source,
                destination,
            } => Instruction::Move {
                source: prefix.join(source),
                destination,
            },
            other => other,
        }
    }
}
