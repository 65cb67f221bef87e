use crate::core::detectors::archive::ArchiveInstaller;
use crate::core::detectors::{is_archive_file, is_known_toplevel_dir};
use crate::core::file_tree::{
    any_file, has_any_extension, has_extension, is_named, is_under, path_eq, root, FileTree,
};
use crate::core::instructions::{move_from_to, moved_with};
use crate::models::error::InstallError;
use crate::models::instruction::Instruction;
use crate::models::layout::{Classification, InstallerKind, LayoutKind, RedmodLayout};
use crate::models::mod_dto::{RedmodInfo, RedmodInfoArray, RedmodManifest};
use crate::models::paths::{
    ARCHIVE_MOD_EXTENSION, ARCHIVE_XL_EXTENSION, REDMOD_ARCHIVES_DIRNAME, REDMOD_BASEDIR,
    REDMOD_CUSTOMSOUNDS_DIRNAME, REDMOD_INFO_ATTRIBUTE, REDMOD_INFO_FILENAME,
    REDMOD_SCRIPTS_CACHE_DIR, REDMOD_SCRIPTS_DIRNAME, REDMOD_SCRIPTS_VALID_SUBDIRS,
    REDMOD_SCRIPT_EXTENSIONS, REDMOD_SUBTYPE_DIRNAMES, REDMOD_TWEAKS_DIRNAME,
    REDMOD_TWEAKS_VALID_SUBDIR, REDMOD_TWEAK_EXTENSION,
};
use crate::utils::context::InstallContext;
use crate::utils::file::FileUtils;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Loose files at the top of a REDmod archive that are simply not installed.
const IGNORED_DOC_EXTENSIONS: &[&str] = &["txt", "md", "pdf", "html", "url", "jpg", "png"];

fn is_manifest(path: &Utf8Path) -> bool {
    is_named(path, REDMOD_INFO_FILENAME)
}

#[derive(Clone, Debug)]
struct Candidate {
    layout: RedmodLayout,
    /// Directory holding `info.json`, the tree root for the toplevel shape.
    dir: Utf8PathBuf,
}

/// One validated mod, ready to be placed under `mods/<target>`.
struct ValidMod {
    layout: RedmodLayout,
    dir: Utf8PathBuf,
    files: Vec<Utf8PathBuf>,
    target: Utf8PathBuf,
    info: RedmodInfo,
}

/// Result of checking one candidate.
enum Checked {
    Valid(ValidMod),
    Conflict(String),
}

/// REDmod, the game's own mod format.
pub struct RedmodInstaller;

impl RedmodInstaller {
    fn candidates(tree: &FileTree) -> Vec<Candidate> {
        let canon = tree
            .find_direct_subdirs_with_some(Utf8Path::new(REDMOD_BASEDIR), is_manifest)
            .into_iter()
            .map(|dir| Candidate {
                layout: RedmodLayout::Canon,
                dir,
            });

        let named = tree
            .find_direct_subdirs_with_some(root(), is_manifest)
            .into_iter()
            .filter(|dir| !is_known_toplevel_dir(dir))
            .map(|dir| Candidate {
                layout: RedmodLayout::Named,
                dir,
            });

        let has_subtype_dir = REDMOD_SUBTYPE_DIRNAMES
            .iter()
            .any(|sub| tree.dir_exists(Utf8Path::new(sub)));
        let toplevel = (tree.dir_with_some_in(root(), is_manifest) && has_subtype_dir).then(|| {
            Candidate {
                layout: RedmodLayout::Toplevel,
                dir: root().to_path_buf(),
            }
        });

        canon.chain(named).chain(toplevel).collect()
    }

    /// Directories that belong to REDmods, for pruning them from the tree.
    /// The toplevel shape contributes its subtype directories.
    pub fn mod_dirs(tree: &FileTree) -> Vec<Utf8PathBuf> {
        Self::candidates(tree)
            .into_iter()
            .flat_map(|c| match c.layout {
                RedmodLayout::Toplevel => REDMOD_SUBTYPE_DIRNAMES
                    .iter()
                    .map(|sub| Utf8PathBuf::from(*sub))
                    .collect::<Vec<_>>(),
                _ => vec![c.dir],
            })
            .collect()
    }

    pub fn detect(tree: &FileTree) -> bool {
        !Self::candidates(tree).is_empty()
    }

    pub fn classify(ctx: &InstallContext, tree: &FileTree) -> Result<Classification, InstallError> {
        if !Self::detect(tree) {
            return Ok(Classification::NoMatch);
        }

        // 1. Whatever REDmod doesn't claim
        let remaining = tree.without_files(&Self::manifests_at_root(tree));
        let remaining = remaining.pruned(&Self::mod_dirs(tree));

        // 2. Legacy archives never go together with REDmods, valid or not
        if ArchiveInstaller::detect(&remaining) {
            warn!(
                "REDmod: {} legacy archives next to REDmods",
                remaining.files_under(root(), is_archive_file).len()
            );
            return Err(InstallError::IncompatibleKinds {
                first: InstallerKind::Redmod,
                second: InstallerKind::Archive,
            });
        }

        let own = Self::classify_part(ctx, tree)?;
        if !own.is_match() {
            return Ok(own);
        }

        // 3. Top-level docs are fine, anything else is not ours to guess at
        let (docs, leftovers): (Vec<Utf8PathBuf>, Vec<Utf8PathBuf>) =
            remaining.all_files().iter().cloned().partition(|f| {
                f.iter().count() == 1 && has_any_extension(f, IGNORED_DOC_EXTENSIONS)
            });
        if !docs.is_empty() {
            info!("REDmod: not installing {} top-level documentation files", docs.len());
        }
        if !leftovers.is_empty() {
            return Ok(Classification::conflict(
                InstallerKind::Redmod,
                format!("{} files are outside any REDmod directory", leftovers.len()),
            ));
        }

        Ok(own)
    }

    /// The REDmods alone. Used directly when REDmods are combined with other kinds.
    pub fn classify_part(
        ctx: &InstallContext,
        tree: &FileTree,
    ) -> Result<Classification, InstallError> {
        let candidates = Self::candidates(tree);
        if candidates.is_empty() {
            return Ok(Classification::NoMatch);
        }

        if candidates.len() > 1
            && candidates
                .iter()
                .any(|c| c.layout == RedmodLayout::Toplevel)
        {
            return Ok(Classification::conflict(
                InstallerKind::Redmod,
                "a REDmod at the top of the archive can't be combined with other REDmods",
            ));
        }

        let mut mods = Vec::new();
        for candidate in candidates {
            match Self::check(ctx, tree, candidate)? {
                Checked::Valid(valid) => mods.push(valid),
                Checked::Conflict(reason) => {
                    warn!("REDmod: {reason}");
                    return Ok(Classification::conflict(InstallerKind::Redmod, reason));
                }
            }
        }

        let mut targets = HashSet::new();
        if let Some(dup) = mods
            .iter()
            .find(|m| !targets.insert(m.target.as_str().to_lowercase()))
        {
            return Ok(Classification::conflict(
                InstallerKind::Redmod,
                format!("more than one REDmod would be installed into {}", dup.target),
            ));
        }

        let layout = mods
            .iter()
            .map(|m| m.layout)
            .min()
            .unwrap_or(RedmodLayout::Canon);

        // 1. Files, then the script cache marker, then the metadata
        let mut instructions: Vec<Instruction> = mods
            .iter()
            .flat_map(|m| moved_with(&m.files, move_from_to(&m.dir, &m.target)))
            .collect();
        if ctx.settings.redmod_scripts_cache {
            instructions.push(Instruction::mkdir(REDMOD_SCRIPTS_CACHE_DIR));
        }

        let infos = RedmodInfoArray {
            data: mods.into_iter().map(|m| m.info).collect(),
        };
        let value = serde_json::to_value(&infos).map_err(|e| {
            InstallError::structural(InstallerKind::Redmod, e.to_string(), Vec::new())
        })?;
        instructions.push(Instruction::AttachMetadata {
            key: REDMOD_INFO_ATTRIBUTE.to_string(),
            value,
        });

        debug!("REDmod.{layout}: {} mods", infos.data.len());
        Ok(Classification::matched(
            LayoutKind::Redmod(layout),
            instructions,
        ))
    }

    fn manifests_at_root(tree: &FileTree) -> Vec<Utf8PathBuf> {
        if Self::candidates(tree)
            .iter()
            .any(|c| c.layout == RedmodLayout::Toplevel)
        {
            tree.files_in(root(), is_manifest)
        } else {
            Vec::new()
        }
    }

    fn check(
        ctx: &InstallContext,
        tree: &FileTree,
        candidate: Candidate,
    ) -> Result<Checked, InstallError> {
        let dir = candidate.dir.as_path();

        // 1. The manifest has to parse and name the mod
        let manifest_path = tree
            .files_in(dir, is_manifest)
            .into_iter()
            .next()
            .unwrap_or_else(|| dir.join(REDMOD_INFO_FILENAME));
        let manifest = Self::read_manifest(ctx, &manifest_path)?;

        // 2. Which files belong to this mod
        let files: Vec<Utf8PathBuf> = match candidate.layout {
            RedmodLayout::Toplevel => {
                let mut files = vec![manifest_path.clone()];
                for sub in REDMOD_SUBTYPE_DIRNAMES {
                    files.extend(tree.files_under(Utf8Path::new(sub), any_file));
                }
                files
            }
            _ => tree.files_under(dir, any_file),
        };

        // 3. Each subtype directory has its own fixed shape
        if let Some(problem) = Self::subtype_problem(tree, dir, &files) {
            return Ok(Checked::Conflict(format!("{dir}: {problem}")));
        }

        // 4. Every sound the manifest declares has to be there
        Self::check_sounds(tree, dir, &manifest)?;

        // 5. The manifest name decides where the mod goes
        let name = match FileUtils::sanitize_component(&manifest.name) {
            n if n.is_empty() => ctx.mod_dir_name(),
            n => n,
        };
        let target = Utf8Path::new(REDMOD_BASEDIR).join(&name);
        if candidate.layout != RedmodLayout::Toplevel
            && dir.file_name().map(|d| d != name).unwrap_or(false)
        {
            debug!("REDmod: installing {dir} as {target}");
        }

        let info = RedmodInfo {
            name: manifest.name.clone(),
            version: manifest.version.clone(),
            relative_path: target.clone(),
            vortex_mod_id: ctx.mod_info.id.clone(),
        };

        Ok(Checked::Valid(ValidMod {
            layout: candidate.layout,
            dir: candidate.dir,
            files,
            target,
            info,
        }))
    }

    fn read_manifest(
        ctx: &InstallContext,
        manifest_path: &Utf8Path,
    ) -> Result<RedmodManifest, InstallError> {
        let content = ctx.read_source(manifest_path)?;
        let manifest: RedmodManifest =
            serde_json::from_str(content.trim_start_matches('\u{feff}')).map_err(|e| {
                InstallError::structural(
                    InstallerKind::Redmod,
                    format!("{manifest_path} is not a valid REDmod manifest: {e}"),
                    vec![manifest_path.to_path_buf()],
                )
            })?;

        if manifest.name.trim().is_empty() || manifest.version.trim().is_empty() {
            return Err(InstallError::structural(
                InstallerKind::Redmod,
                format!("{manifest_path} must have a name and a version"),
                vec![manifest_path.to_path_buf()],
            ));
        }
        Ok(manifest)
    }

    /// First violated subtype rule for the files of the mod in `dir`, if any.
    fn subtype_problem(tree: &FileTree, dir: &Utf8Path, files: &[Utf8PathBuf]) -> Option<String> {
        let archives = dir.join(REDMOD_ARCHIVES_DIRNAME);
        let sounds = dir.join(REDMOD_CUSTOMSOUNDS_DIRNAME);
        let scripts = dir.join(REDMOD_SCRIPTS_DIRNAME);
        let tweaks = dir.join(REDMOD_TWEAKS_DIRNAME);
        let tweaks_base = tweaks.join(REDMOD_TWEAKS_VALID_SUBDIR);
        let script_dirs: Vec<Utf8PathBuf> = REDMOD_SCRIPTS_VALID_SUBDIRS
            .iter()
            .map(|sub| scripts.join(sub))
            .collect();
        let in_script_dirs = |f: &Utf8Path| script_dirs.iter().any(|d| is_under(f, d));

        // archives/ holds archives directly, nothing nested
        let archive_files = tree.files_under(&archives, any_file);
        if archive_files.iter().any(|f| {
            !has_any_extension(f, &[ARCHIVE_MOD_EXTENSION, ARCHIVE_XL_EXTENSION])
                || f.parent().map(|p| !path_eq(p, &archives)).unwrap_or(true)
        }) {
            return Some(format!("{REDMOD_ARCHIVES_DIRNAME}/ may only contain archives, directly"));
        }

        if tree.files_under(&sounds, any_file).len() != tree.files_in(&sounds, any_file).len() {
            return Some(format!("{REDMOD_CUSTOMSOUNDS_DIRNAME}/ can't have subdirectories"));
        }

        if tree
            .files_under(&scripts, any_file)
            .iter()
            .any(|f| !in_script_dirs(f))
        {
            return Some(format!(
                "{REDMOD_SCRIPTS_DIRNAME}/ may only contain {}/",
                REDMOD_SCRIPTS_VALID_SUBDIRS.join("/ and ")
            ));
        }

        if tree
            .files_under(&tweaks, any_file)
            .iter()
            .any(|f| !is_under(f, &tweaks_base))
        {
            return Some(format!(
                "{REDMOD_TWEAKS_DIRNAME}/ may only contain {REDMOD_TWEAKS_VALID_SUBDIR}/"
            ));
        }

        // Typed files outside their subtype directory
        for f in files {
            if has_any_extension(f, REDMOD_SCRIPT_EXTENSIONS) && !in_script_dirs(f) {
                return Some(format!("script {f} is outside {REDMOD_SCRIPTS_DIRNAME}/"));
            }
            if has_extension(f, REDMOD_TWEAK_EXTENSION) && !is_under(f, &tweaks_base) {
                return Some(format!("tweak {f} is outside {REDMOD_TWEAKS_DIRNAME}/{REDMOD_TWEAKS_VALID_SUBDIR}/"));
            }
            if has_extension(f, ARCHIVE_MOD_EXTENSION) && !is_under(f, &archives) {
                return Some(format!("archive {f} is outside {REDMOD_ARCHIVES_DIRNAME}/"));
            }
        }

        None
    }

    fn check_sounds(
        tree: &FileTree,
        dir: &Utf8Path,
        manifest: &RedmodManifest,
    ) -> Result<(), InstallError> {
        let sounds = dir.join(REDMOD_CUSTOMSOUNDS_DIRNAME);
        let sound_files = tree.files_under(&sounds, any_file);

        if manifest.custom_sounds.is_empty() {
            if sound_files.is_empty() {
                return Ok(());
            }
            return Err(InstallError::structural(
                InstallerKind::Redmod,
                format!("{dir} has sound files but its manifest declares no customSounds"),
                sound_files,
            ));
        }

        let mut missing = Vec::new();
        for sound in manifest.custom_sounds.iter().filter(|s| !s.is_skip()) {
            match sound.sound_file() {
                None => {
                    return Err(InstallError::structural(
                        InstallerKind::Redmod,
                        format!("sound {} in {dir} doesn't name a file", sound.name),
                        Vec::new(),
                    ))
                }
                Some(file) => {
                    let expected = sounds.join(file);
                    if !tree.path_in_tree(&expected) {
                        missing.push(expected);
                    }
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(InstallError::structural(
                InstallerKind::Redmod,
                format!("{dir} is missing {} sound files its manifest declares", missing.len()),
                missing,
            ))
        }
    }
}
