use crate::models::instruction::Instruction;
use camino::Utf8PathBuf;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Tools that ship as their own installable archive.
#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoreTool {
    #[display("CET")]
    Cet,
    #[display("Redscript")]
    Redscript,
    #[display("RED4ext")]
    Red4ext,
    #[display("ArchiveXL")]
    ArchiveXl,
    #[display("TweakXL")]
    TweakXl,
    #[display("Audioware")]
    Audioware,
    #[display("InputLoader")]
    InputLoader,
    #[display("AMM")]
    Amm,
}

/// One entry per pipeline installer. The composite and the fallback count as
/// installers of their own.
#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InstallerKind {
    #[display("Core {_0}")]
    Core(CoreTool),
    #[display("ASI")]
    Asi,
    #[display("AMM")]
    Amm,
    #[display("MultiType")]
    MultiType,
    #[display("REDmod")]
    Redmod,
    #[display("CET")]
    Cet,
    #[display("Redscript")]
    Redscript,
    #[display("RED4ext")]
    Red4Ext,
    #[display("TweakXL")]
    TweakXl,
    #[display("Audioware")]
    Audioware,
    #[display("Preset")]
    Preset,
    #[display("XML Config")]
    ConfigXml,
    #[display("JSON Config")]
    ConfigJson,
    #[display("INI")]
    Ini,
    #[display("Archive")]
    Archive,
    #[display("Fallback")]
    Fallback,
}

impl InstallerKind {
    /// Human readable description of the shapes this installer accepts.
    pub fn supported_layouts(self) -> &'static str {
        match self {
            InstallerKind::Core(_) => {
                "- the tool's release archive, unmodified (bin/, engine/, r6/, red4ext/ at the top)"
            }
            InstallerKind::Asi => {
                "- bin/x64/plugins/*.asi\n\
                 - *.asi (at the top of the archive)"
            }
            InstallerKind::Amm => {
                "- bin/x64/plugins/cyber_engine_tweaks/mods/AppearanceMenuMod/Collabs/Custom <Appearances|Entities|Props>/**\n\
                 - bin/x64/plugins/cyber_engine_tweaks/mods/AppearanceMenuMod/User/<Decor|Locations|Scripts|Themes>/**\n\
                 - Collabs/** or User/** (at the top of the archive)"
            }
            InstallerKind::MultiType => {
                "- any combination of canonical CET, Redscript, RED4ext, TweakXL, Audioware, REDmod and config layouts\n\
                 - REDmods can't be combined with archive/pc/mod archives"
            }
            InstallerKind::Redmod => {
                "- mods/<modname>/info.json with archives/, customSounds/, scripts/{exec,core}/, tweaks/base/\n\
                 - <modname>/info.json (at the top of the archive)\n\
                 - info.json (at the top of the archive, one mod only)"
            }
            InstallerKind::Cet => {
                "- bin/x64/plugins/cyber_engine_tweaks/mods/<modname>/init.lua (+ any other files)\n\
                 - optionally archive/pc/mod/*.archive"
            }
            InstallerKind::Redscript => {
                "- r6/scripts/<modname>/**/*.reds\n\
                 - r6/scripts/*.reds (moved into r6/scripts/<modname>/)\n\
                 - *.reds (at the top of the archive)\n\
                 - optionally archive/pc/mod/*.archive"
            }
            InstallerKind::Red4Ext => {
                "- red4ext/plugins/<modname>/*.dll\n\
                 - red4ext/plugins/*.dll (moved into red4ext/plugins/<modname>/)\n\
                 - <modname>/*.dll (at the top of the archive)\n\
                 - *.dll (at the top of the archive, no other files)"
            }
            InstallerKind::TweakXl => "- r6/tweaks/**/*.yaml or *.yml",
            InstallerKind::Audioware => "- r6/audioware/<modname>/*.yaml or *.yml (+ sound files)",
            InstallerKind::Preset => {
                "- *.preset anywhere (Appearance Change Unlocker or CyberCAT format)"
            }
            InstallerKind::ConfigXml => {
                "- r6/config/<inputContexts|inputDeadzones|inputUserMappings|uiInputActions>.xml\n\
                 - r6/input/**/*.xml\n\
                 - one of the known r6/config XML files at the top of the archive"
            }
            InstallerKind::ConfigJson => {
                "- engine/config/giweights.json\n\
                 - r6/config/bumpersSettings.json\n\
                 - r6/config/settings/options.json, r6/config/settings/platform/pc/options.json\n\
                 - one of the known JSON files at the top of the archive"
            }
            InstallerKind::Ini => {
                "- engine/config/platform/pc/*.ini\n\
                 - *.ini (at the top of the archive, INI tweak or Reshade preset)\n\
                 - reshade-shaders/**"
            }
            InstallerKind::Archive => {
                "- archive/pc/mod/*.archive (+ *.xl)\n\
                 - archive/pc/patch/*.archive (moved to archive/pc/mod)\n\
                 - *.archive anywhere else (moved to archive/pc/mod)"
            }
            InstallerKind::Fallback => "- anything, installed exactly as given",
        }
    }
}

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiveLayout {
    Canon,
    Heritage,
    #[display("XL")]
    Xl,
    Other,
}

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CetLayout {
    Canon,
}

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedscriptLayout {
    Basedir,
    Canon,
    Toplevel,
}

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Red4ExtLayout {
    Canon,
    Basedir,
    Modnamed,
    Toplevel,
}

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RedmodLayout {
    Canon,
    Named,
    Toplevel,
}

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmmLayout {
    Canon,
    Toplevel,
}

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsiLayout {
    Canon,
    Toplevel,
}

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetLayout {
    Unlocker,
    #[display("CyberCAT")]
    CyberCat,
}

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IniLayout {
    Ini,
    Reshade,
}

#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigLayout {
    Canon,
    Toplevel,
}

/// The concrete shape a classifier recognized.
#[derive(Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    #[display("Core.{_0}")]
    Core(CoreTool),
    #[display("Archive.{_0}")]
    Archive(ArchiveLayout),
    #[display("CET.{_0}")]
    Cet(CetLayout),
    #[display("Redscript.{_0}")]
    Redscript(RedscriptLayout),
    #[display("Red4Ext.{_0}")]
    Red4Ext(Red4ExtLayout),
    #[display("REDmod.{_0}")]
    Redmod(RedmodLayout),
    #[display("TweakXL.Canon")]
    TweakXl,
    #[display("Audioware.Canon")]
    Audioware,
    #[display("AMM.{_0}")]
    Amm(AmmLayout),
    #[display("ASI.{_0}")]
    Asi(AsiLayout),
    #[display("Preset.{_0}")]
    Preset(PresetLayout),
    #[display("INI.{_0}")]
    Ini(IniLayout),
    #[display("XML.{_0}")]
    ConfigXml(ConfigLayout),
    #[display("JSON.{_0}")]
    ConfigJson(ConfigLayout),
    #[display("MultiType")]
    MultiType,
    /// A valid "nothing of this kind here" result.
    #[display("NoLayout.Optional")]
    NoLayoutOptional,
    #[display("Fallback")]
    Fallback,
}

/// A prompt that has to be accepted before matched instructions may be used,
/// e.g. overwriting protected game files.
#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    pub installer: InstallerKind,
    pub files: Vec<Utf8PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Matched {
    pub layout: LayoutKind,
    pub instructions: Vec<Instruction>,
    pub confirmations: Vec<Confirmation>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConflictReport {
    pub installer: InstallerKind,
    pub reason: String,
    /// Confirmations collected before the conflicting part was reached.
    /// They are asked before the conflict itself.
    pub pending: Vec<Confirmation>,
}

/// Outcome of a single classifier.
///
/// `NoMatch` means "try the next installer", `Conflict` means the shape is
/// present but unsafe to guess at and has to be escalated. The two are never
/// interchangeable.
#[derive(Clone, Debug, PartialEq)]
pub enum Classification {
    NoMatch,
    Conflict(ConflictReport),
    Matched(Matched),
}

impl Classification {
    pub fn matched(layout: LayoutKind, instructions: Vec<Instruction>) -> Self {
        Classification::Matched(Matched {
            layout,
            instructions,
            confirmations: Vec::new(),
        })
    }

    pub fn conflict(installer: InstallerKind, reason: impl Into<String>) -> Self {
        Classification::Conflict(ConflictReport {
            installer,
            reason: reason.into(),
            pending: Vec::new(),
        })
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Classification::Matched(_))
    }
}
