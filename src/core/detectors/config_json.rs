use crate::core::file_tree::{has_extension, path_in, root, FileTree};
use crate::core::instructions::{
    instructions_for_same_source_and_dest_paths, instructions_for_source_to_dest_pairs,
};
use crate::models::error::InstallError;
use crate::models::layout::{Classification, ConfigLayout, InstallerKind, LayoutKind};
use crate::models::paths::{
    CONFIG_JSON_CANONICAL_FILES, CONFIG_JSON_EXTENSION, CONFIG_JSON_KNOWN_FILES, CONFIG_JSON_ROOTS,
};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

fn is_json(path: &Utf8Path) -> bool {
    has_extension(path, CONFIG_JSON_EXTENSION)
}

fn canonical_for_toplevel(path: &Utf8Path) -> Option<&'static str> {
    let name = path.file_name()?;
    CONFIG_JSON_KNOWN_FILES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, canonical)| *canonical)
}

/// Game JSON settings files. Only a fixed set of files is ever accepted.
pub struct JsonConfigInstaller;

impl JsonConfigInstaller {
    fn in_config_roots(tree: &FileTree) -> Vec<Utf8PathBuf> {
        CONFIG_JSON_ROOTS
            .iter()
            .flat_map(|r| tree.files_under(Utf8Path::new(r), is_json))
            .collect()
    }

    fn toplevel_known(tree: &FileTree) -> Vec<(Utf8PathBuf, Utf8PathBuf)> {
        tree.files_in(root(), is_json)
            .into_iter()
            .filter_map(|f| canonical_for_toplevel(&f).map(|c| (f, Utf8PathBuf::from(c))))
            .collect()
    }

    pub fn detect(tree: &FileTree) -> bool {
        !Self::in_config_roots(tree).is_empty() || !Self::toplevel_known(tree).is_empty()
    }

    pub fn classify(tree: &FileTree) -> Result<Classification, InstallError> {
        let in_place = Self::in_config_roots(tree);
        let toplevel = Self::toplevel_known(tree);
        if in_place.is_empty() && toplevel.is_empty() {
            return Ok(Classification::NoMatch);
        }

        let canonical: Vec<Utf8PathBuf> = CONFIG_JSON_CANONICAL_FILES
            .iter()
            .map(|p| Utf8PathBuf::from(*p))
            .collect();
        let unknown: Vec<Utf8PathBuf> = in_place
            .iter()
            .filter(|f| !path_in(f, &canonical))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            warn!("JSON config: {} unknown files", unknown.len());
            return Err(InstallError::structural(
                InstallerKind::ConfigJson,
                "Unrecognized JSON files in a game config directory",
                unknown,
            ));
        }

        let layout = if toplevel.is_empty() {
            ConfigLayout::Canon
        } else {
            ConfigLayout::Toplevel
        };
        let mut instructions = instructions_for_same_source_and_dest_paths(&in_place);
        instructions.extend(instructions_for_source_to_dest_pairs(toplevel));

        debug!("JSON.{layout}: {} files", instructions.len());
        Ok(Classification::matched(
            LayoutKind::ConfigJson(layout),
            instructions,
        ))
    }
}
