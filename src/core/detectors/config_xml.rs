use crate::core::file_tree::{any_file, has_extension, is_named, root, FileTree};
use crate::core::instructions::{
    instructions_for_same_source_and_dest_paths, instructions_for_source_to_dest_pairs,
};
use crate::models::error::InstallError;
use crate::models::layout::{
    Classification, ConfigLayout, Confirmation, InstallerKind, LayoutKind, Matched,
};
use crate::models::paths::{
    CONFIG_XML_EXTENSION, CONFIG_XML_KNOWN_FILES, CONFIG_XML_MOD_BASEDIR,
    INPUT_LOADER_MOD_BASEDIR,
};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

fn is_xml(path: &Utf8Path) -> bool {
    has_extension(path, CONFIG_XML_EXTENSION)
}

fn is_known_xml(path: &Utf8Path) -> bool {
    CONFIG_XML_KNOWN_FILES.iter().any(|name| is_named(path, name))
}

/// Input and UI XML configs. The files in `r6/config` replace the game's own,
/// so writing them is confirmed first. `r6/input` belongs to Input Loader.
pub struct XmlConfigInstaller;

impl XmlConfigInstaller {
    pub fn detect(tree: &FileTree) -> bool {
        tree.dir_with_some_under(Utf8Path::new(CONFIG_XML_MOD_BASEDIR), is_xml)
            || tree.dir_with_some_under(Utf8Path::new(INPUT_LOADER_MOD_BASEDIR), is_xml)
            || tree.dir_with_some_in(root(), |p| is_xml(p) && is_known_xml(p))
    }

    pub fn classify(tree: &FileTree) -> Result<Classification, InstallError> {
        if !Self::detect(tree) {
            return Ok(Classification::NoMatch);
        }

        let config_dir = Utf8Path::new(CONFIG_XML_MOD_BASEDIR);

        // 1. r6/config only takes the known files, directly
        let in_config = tree.files_under(config_dir, is_xml);
        let canonical = tree.files_in(config_dir, |p| is_xml(p) && is_known_xml(p));
        let unknown: Vec<Utf8PathBuf> = in_config
            .into_iter()
            .filter(|f| !canonical.contains(f))
            .collect();
        if !unknown.is_empty() {
            warn!("XML config: {} unknown files", unknown.len());
            return Err(InstallError::structural(
                InstallerKind::ConfigXml,
                "Unrecognized XML files in r6/config",
                unknown,
            ));
        }

        // 2. Input Loader takes anything below r6/input
        let input_loader = tree.files_under(Utf8Path::new(INPUT_LOADER_MOD_BASEDIR), any_file);

        // 3. Known files at the top go to r6/config
        let toplevel: Vec<(Utf8PathBuf, Utf8PathBuf)> = tree
            .files_in(root(), |p| is_xml(p) && is_known_xml(p))
            .into_iter()
            .map(|f| {
                let dest = config_dir.join(f.file_name().unwrap_or_default());
                (f, dest)
            })
            .collect();

        let mut protected = canonical.clone();
        protected.extend(toplevel.iter().map(|(_, dest)| dest.clone()));

        let layout = if toplevel.is_empty() {
            ConfigLayout::Canon
        } else {
            ConfigLayout::Toplevel
        };
        let mut instructions = instructions_for_same_source_and_dest_paths(&canonical);
        instructions.extend(instructions_for_same_source_and_dest_paths(&input_loader));
        instructions.extend(instructions_for_source_to_dest_pairs(toplevel));

        let confirmations = if protected.is_empty() {
            Vec::new()
        } else {
            vec![Confirmation {
                installer: InstallerKind::ConfigXml,
                files: protected,
            }]
        };

        debug!(
            "XML.{layout}: {} files, {} protected",
            instructions.len(),
            confirmations.iter().map(|c| c.files.len()).sum::<usize>()
        );
        Ok(Classification::Matched(Matched {
            layout: LayoutKind::ConfigXml(layout),
            instructions,
            confirmations,
        }))
    }
}
