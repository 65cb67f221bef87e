use crate::core::detectors::amm::AmmInstaller;
use crate::core::detectors::archive::ArchiveInstaller;
use crate::core::detectors::asi::AsiInstaller;
use crate::core::detectors::audioware::AudiowareInstaller;
use crate::core::detectors::cet::CetInstaller;
use crate::core::detectors::config_json::JsonConfigInstaller;
use crate::core::detectors::config_xml::XmlConfigInstaller;
use crate::core::detectors::core_tools::CoreInstaller;
use crate::core::detectors::fallback::FallbackInstaller;
use crate::core::detectors::ini::IniInstaller;
use crate::core::detectors::preset::PresetInstaller;
use crate::core::detectors::red4ext::Red4ExtInstaller;
use crate::core::detectors::redmod::RedmodInstaller;
use crate::core::detectors::redscript::RedscriptInstaller;
use crate::core::detectors::tweak_xl::TweakXlInstaller;
use crate::core::file_tree::FileTree;
use crate::core::multi_type::MultiTypeInstaller;
use crate::models::error::InstallError;
use crate::models::layout::{Classification, CoreTool, InstallerKind};
use crate::utils::context::InstallContext;
use tracing::{debug, info};

/// Installers in the order they are tried. The most specific and the most
/// dangerous to get wrong come first, the fallback always last.
pub const PIPELINE: &[InstallerKind] = &[
    InstallerKind::Core(CoreTool::Cet),
    InstallerKind::Core(CoreTool::Redscript),
    InstallerKind::Core(CoreTool::Red4ext),
    InstallerKind::Core(CoreTool::ArchiveXl),
    InstallerKind::Core(CoreTool::TweakXl),
    InstallerKind::Core(CoreTool::Audioware),
    InstallerKind::Core(CoreTool::InputLoader),
    InstallerKind::Core(CoreTool::Amm),
    InstallerKind::Asi,
    InstallerKind::Amm,
    InstallerKind::MultiType,
    InstallerKind::Redmod,
    InstallerKind::Cet,
    InstallerKind::Redscript,
    InstallerKind::Red4Ext,
    InstallerKind::TweakXl,
    InstallerKind::Audioware,
    InstallerKind::Preset,
    InstallerKind::ConfigXml,
    InstallerKind::ConfigJson,
    InstallerKind::Ini,
    InstallerKind::Archive,
    InstallerKind::Fallback,
];

impl InstallerKind {
    pub fn detect(self, tree: &FileTree) -> bool {
        match self {
            InstallerKind::Core(tool) => CoreInstaller::detect(tool, tree),
            InstallerKind::Asi => AsiInstaller::detect(tree),
            InstallerKind::Amm => AmmInstaller::detect(tree),
            InstallerKind::MultiType => MultiTypeInstaller::detect(tree),
            InstallerKind::Redmod => RedmodInstaller::detect(tree),
            InstallerKind::Cet => CetInstaller::detect(tree),
            InstallerKind::Redscript => RedscriptInstaller::detect(tree),
            InstallerKind::Red4Ext => Red4ExtInstaller::detect(tree),
            InstallerKind::TweakXl => TweakXlInstaller::detect(tree),
            InstallerKind::Audioware => AudiowareInstaller::detect(tree),
            InstallerKind::Preset => PresetInstaller::detect(tree),
            InstallerKind::ConfigXml => XmlConfigInstaller::detect(tree),
            InstallerKind::ConfigJson => JsonConfigInstaller::detect(tree),
            InstallerKind::Ini => IniInstaller::detect(tree),
            InstallerKind::Archive => ArchiveInstaller::detect(tree),
            InstallerKind::Fallback => FallbackInstaller::detect(tree),
        }
    }

    /// Full classification as the selected installer of an archive.
    pub fn classify(
        self,
        ctx: &InstallContext,
        tree: &FileTree,
    ) -> Result<Classification, InstallError> {
        match self {
            InstallerKind::Core(tool) => Ok(CoreInstaller::classify(tool, tree)),
            InstallerKind::Asi => AsiInstaller::classify(ctx, tree),
            InstallerKind::Amm => AmmInstaller::classify(ctx, tree),
            InstallerKind::MultiType => MultiTypeInstaller::classify(ctx, tree),
            InstallerKind::Redmod => RedmodInstaller::classify(ctx, tree),
            InstallerKind::Cet => CetInstaller::classify(ctx, tree),
            InstallerKind::Redscript => RedscriptInstaller::classify(ctx, tree),
            InstallerKind::Red4Ext => Red4ExtInstaller::classify(ctx, tree),
            InstallerKind::TweakXl => Ok(TweakXlInstaller::classify(tree)),
            InstallerKind::Audioware => Ok(AudiowareInstaller::classify(tree)),
            InstallerKind::Preset => PresetInstaller::classify(ctx, tree),
            InstallerKind::ConfigXml => XmlConfigInstaller::classify(tree),
            InstallerKind::ConfigJson => JsonConfigInstaller::classify(tree),
            InstallerKind::Ini => IniInstaller::classify(ctx, tree),
            InstallerKind::Archive => ArchiveInstaller::classify(ctx, tree),
            InstallerKind::Fallback => Ok(FallbackInstaller::classify(tree)),
        }
    }

    /// Classification of this kind's own files only, as one part of a
    /// combined install. Archives and unrelated files are left to the caller.
    pub fn classify_part(
        self,
        ctx: &InstallContext,
        tree: &FileTree,
    ) -> Result<Classification, InstallError> {
        match self {
            InstallerKind::Amm => Ok(AmmInstaller::classify_part(tree)),
            InstallerKind::Redmod => RedmodInstaller::classify_part(ctx, tree),
            InstallerKind::Cet => Ok(CetInstaller::classify_part(tree)),
            InstallerKind::Redscript => Ok(RedscriptInstaller::classify_part(ctx, tree)),
            InstallerKind::Red4Ext => Red4ExtInstaller::classify_part(ctx, tree),
            other => other.classify(ctx, tree),
        }
    }
}

pub struct Pipeline;

impl Pipeline {
    /// The one installer responsible for this tree. Never fails, the
    /// fallback accepts everything.
    pub fn select(tree: &FileTree) -> InstallerKind {
        let installer = PIPELINE
            .iter()
            .copied()
            .find(|kind| {
                let hit = kind.detect(tree);
                debug!("{kind}: detect {hit}");
                hit
            })
            .unwrap_or(InstallerKind::Fallback);
        info!("Selected installer {installer}");
        installer
    }

    pub fn run(
        ctx: &InstallContext,
        tree: &FileTree,
    ) -> Result<(InstallerKind, Classification), InstallError> {
        let installer = Self::select(tree);
        let classification = installer.classify(ctx, tree)?;
        Ok((installer, classification))
    }
}
