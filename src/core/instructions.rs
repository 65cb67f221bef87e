use crate::core::file_tree::{is_directory_placeholder, strip_prefix_ci};
use crate::models::instruction::Instruction;
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashSet;

/// One `Copy` per path, source and destination identical.
pub fn instructions_for_same_source_and_dest_paths(paths: &[Utf8PathBuf]) -> Vec<Instruction> {
    paths
        .iter()
        .filter(|p| !is_directory_placeholder(p.as_str()))
        .map(|p| Instruction::copy(p.clone(), p.clone()))
        .collect()
}

/// One `Copy` per (source, destination) pair, used for every rename/move.
pub fn instructions_for_source_to_dest_pairs(
    pairs: impl IntoIterator<Item = (Utf8PathBuf, Utf8PathBuf)>,
) -> Vec<Instruction> {
    pairs
        .into_iter()
        .filter(|(source, _)| !is_directory_placeholder(source.as_str()))
        .map(|(source, destination)| Instruction::copy(source, destination))
        .collect()
}

/// Path rewrite replacing a leading `from` with `to`. When `from` is the tree
/// root there is nothing to strip, so `to` is prepended instead.
pub fn move_from_to<'a>(
    from: &'a Utf8Path,
    to: &'a Utf8Path,
) -> impl Fn(&Utf8Path) -> Utf8PathBuf + 'a {
    move |path| match strip_prefix_ci(path, from) {
        Some(rest) => to.join(rest),
        None => to.join(path),
    }
}

/// Applies `rewrite` to every path and emits the resulting pairs.
pub fn moved_with<F>(paths: &[Utf8PathBuf], rewrite: F) -> Vec<Instruction>
where
    F: Fn(&Utf8Path) -> Utf8PathBuf,
{
    instructions_for_source_to_dest_pairs(paths.iter().map(|p| (p.clone(), rewrite(p))))
}

/// Places every path in `dir` under its own file name, dropping any structure.
pub fn flattened_into(paths: &[Utf8PathBuf], dir: &Utf8Path) -> Vec<Instruction> {
    moved_with(paths, |p| match p.file_name() {
        Some(name) => dir.join(name),
        None => dir.join(p),
    })
}

/// Drops repeated `CreateDirectory` entries, keeping the first of each.
pub fn dedupe_directory_markers(instructions: Vec<Instruction>) -> Vec<Instruction> {
    let mut seen = HashSet::new();
    instructions
        .into_iter()
        .filter(|i| match i {
            Instruction::CreateDirectory { destination } => {
                seen.insert(destination.as_str().to_lowercase())
            }
            _ => true,
        })
        .collect()
}

/// Every source path the instructions read from.
pub fn sources_of(instructions: &[Instruction]) -> Vec<Utf8PathBuf> {
    instructions
        .iter()
        .filter_map(|i| i.source().map(Utf8Path::to_path_buf))
        .collect()
}
