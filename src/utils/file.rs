use crate::models::error::InstallError;
use camino::Utf8Path;
use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

static RESERVED_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("valid reserved chars regex"));

pub struct FileUtils;

impl FileUtils {
    /// Lists everything below `root` as `/`-separated paths relative to it.
    /// Directories carry a trailing `/` so empty ones survive the listing.
    pub fn list_relative(root: &Utf8Path) -> Result<Vec<String>, InstallError> {
        let mut listing = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| match e.into_io_error() {
                Some(io) => InstallError::IOError(io),
                None => InstallError::InvalidPath {
                    path: root.to_string(),
                },
            })?;

            // 1. Only UTF-8 paths can be expressed in instructions
            let path = Utf8Path::from_path(entry.path()).ok_or_else(|| {
                InstallError::InvalidPath {
                    path: entry.path().display().to_string(),
                }
            })?;

            // 2. Relative to the staging root, always forward slashes
            let rel = path
                .strip_prefix(root)
                .map_err(|_| InstallError::InvalidPath {
                    path: path.to_string(),
                })?;
            let rel = rel.as_str().replace('\\', "/");

            if entry.file_type().is_dir() {
                listing.push(format!("{rel}/"));
            } else {
                listing.push(rel);
            }
        }

        Ok(listing)
    }

    /// Turns a free-form mod name into a single path component that is valid
    /// on Windows. Only the first dot survives, and never a leading one.
    pub fn sanitize_component(name: &str) -> String {
        let replaced = RESERVED_CHARS.replace_all(name.trim(), "_");

        let mut out = String::with_capacity(replaced.len());
        let mut seen_dot = false;
        let mut prev_dot = false;
        for (i, c) in replaced.chars().enumerate() {
            match c {
                '.' if i == 0 || seen_dot => {
                    out.push('_');
                    prev_dot = false;
                }
                '.' => {
                    out.push('.');
                    seen_dot = true;
                    prev_dot = true;
                }
                ' ' if prev_dot => {
                    out.push('_');
                    prev_dot = false;
                }
                other => {
                    out.push(other);
                    prev_dot = false;
                }
            }
        }

        out.trim_end_matches(['.', ' ']).to_string()
    }
}
