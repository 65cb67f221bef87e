use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;

/// The root of every tree. Joining anything onto it yields the path itself.
pub const FILETREE_ROOT: &str = "";

pub fn root() -> &'static Utf8Path {
    Utf8Path::new(FILETREE_ROOT)
}

#[derive(Clone, Debug, Default)]
struct DirNode {
    /// Path of this directory as spelled by the first entry that created it.
    path: Utf8PathBuf,
    /// Keyed by the folded component name so lookups ignore case.
    dirs: BTreeMap<String, DirNode>,
    files: Vec<Utf8PathBuf>,
}

/// Indexed view of the flat file listing of one archive.
///
/// Built once per install attempt and never mutated afterwards. Directory
/// lookups are case-insensitive, returned paths keep the archive's spelling.
#[derive(Clone, Debug, Default)]
pub struct FileTree {
    root: DirNode,
    files: Vec<Utf8PathBuf>,
}

impl FileTree {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = FileTree::default();
        for raw in paths {
            tree.insert(raw.as_ref());
        }
        tree
    }

    fn insert(&mut self, raw: &str) {
        let Some((path, is_dir)) = normalize_path(raw) else {
            return;
        };

        let components: Vec<&str> = path.iter().collect();
        let dir_depth = if is_dir {
            components.len()
        } else {
            components.len() - 1
        };

        let mut node = &mut self.root;
        let mut current = Utf8PathBuf::new();
        for name in &components[..dir_depth] {
            current.push(name);
            node = node.dirs.entry(fold(name)).or_insert_with(|| DirNode {
                path: current.clone(),
                ..Default::default()
            });
        }

        if is_dir || node.files.iter().any(|f| path_eq(f, &path)) {
            return;
        }
        node.files.push(path.clone());
        self.files.push(path);
    }

    fn node(&self, dir: &Utf8Path) -> Option<&DirNode> {
        dir.iter()
            .try_fold(&self.root, |node, name| node.dirs.get(&fold(name)))
    }

    /// Every real file in input order. Directory placeholders are not included.
    pub fn all_files(&self) -> &[Utf8PathBuf] {
        &self.files
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files directly inside `dir`.
    pub fn files_in<P>(&self, dir: &Utf8Path, predicate: P) -> Vec<Utf8PathBuf>
    where
        P: Fn(&Utf8Path) -> bool,
    {
        self.node(dir)
            .map(|node| {
                node.files
                    .iter()
                    .filter(|f| predicate(f.as_path()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Files at any depth below `dir`.
    pub fn files_under<P>(&self, dir: &Utf8Path, predicate: P) -> Vec<Utf8PathBuf>
    where
        P: Fn(&Utf8Path) -> bool,
    {
        let mut out = Vec::new();
        if let Some(node) = self.node(dir) {
            collect_files(node, &predicate, &mut out);
        }
        out
    }

    pub fn subdirs_in(&self, dir: &Utf8Path) -> Vec<Utf8PathBuf> {
        self.node(dir)
            .map(|node| node.dirs.values().map(|d| d.path.clone()).collect())
            .unwrap_or_default()
    }

    pub fn dir_with_some_in<P>(&self, dir: &Utf8Path, predicate: P) -> bool
    where
        P: Fn(&Utf8Path) -> bool,
    {
        self.node(dir)
            .map(|node| node.files.iter().any(|f| predicate(f.as_path())))
            .unwrap_or(false)
    }

    pub fn dir_with_some_under<P>(&self, dir: &Utf8Path, predicate: P) -> bool
    where
        P: Fn(&Utf8Path) -> bool,
    {
        self.node(dir)
            .map(|node| any_file_under(node, &predicate))
            .unwrap_or(false)
    }

    /// Subdirectories of `dir` with at least one direct child matching `predicate`,
    /// e.g. the `<name>` in `.../mods/<name>/init.lua`.
    pub fn find_direct_subdirs_with_some<P>(&self, dir: &Utf8Path, predicate: P) -> Vec<Utf8PathBuf>
    where
        P: Fn(&Utf8Path) -> bool,
    {
        self.node(dir)
            .map(|node| {
                node.dirs
                    .values()
                    .filter(|d| d.files.iter().any(|f| predicate(f.as_path())))
                    .map(|d| d.path.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Subdirectories of `dir` with a matching file anywhere below them.
    pub fn find_subdirs_with_some_under<P>(&self, dir: &Utf8Path, predicate: P) -> Vec<Utf8PathBuf>
    where
        P: Fn(&Utf8Path) -> bool,
    {
        self.node(dir)
            .map(|node| {
                node.dirs
                    .values()
                    .filter(|d| any_file_under(d, &predicate))
                    .map(|d| d.path.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn dir_exists(&self, dir: &Utf8Path) -> bool {
        self.node(dir).is_some()
    }

    /// True when `path` names a file or a directory in the tree.
    pub fn path_in_tree(&self, path: &Utf8Path) -> bool {
        let Some((path, _)) = normalize_path(path.as_str()) else {
            return false;
        };
        if self.dir_exists(&path) {
            return true;
        }
        let parent = path.parent().unwrap_or(root());
        self.node(parent)
            .map(|node| node.files.iter().any(|f| path_eq(f, &path)))
            .unwrap_or(false)
    }

    /// A new tree rooted at `dir`, paths relative to it.
    pub fn subtree_from(&self, dir: &Utf8Path) -> FileTree {
        let Some(node) = self.node(dir) else {
            return FileTree::default();
        };

        let mut entries = Vec::new();
        collect_entries(node, &mut entries);

        let relative = entries.into_iter().filter_map(|(path, is_dir)| {
            let rel = strip_prefix_ci(&path, &node.path)?;
            if rel.as_str().is_empty() {
                return None;
            }
            Some(placeholder_aware(&rel, is_dir))
        });
        FileTree::new(relative)
    }

    /// A copy of this tree with everything at or below `dirs` removed.
    pub fn pruned(&self, dirs: &[Utf8PathBuf]) -> FileTree {
        self.retain(|path| !dirs.iter().any(|dir| is_under(path, dir)))
    }

    /// A copy of this tree without the given files.
    pub fn without_files(&self, files: &[Utf8PathBuf]) -> FileTree {
        self.retain(|path| !path_in(path, files))
    }

    fn retain<F>(&self, keep: F) -> FileTree
    where
        F: Fn(&Utf8Path) -> bool,
    {
        let mut entries = Vec::new();
        collect_entries(&self.root, &mut entries);

        // Files first in input order, then directory placeholders.
        let files = self
            .files
            .iter()
            .filter(|f| keep(f.as_path()))
            .map(|f| f.to_string());
        let dirs = entries
            .into_iter()
            .filter(|(path, is_dir)| *is_dir && keep(path.as_path()))
            .map(|(path, _)| placeholder_aware(&path, true));

        FileTree::new(files.chain(dirs))
    }
}

fn collect_files<P>(node: &DirNode, predicate: &P, out: &mut Vec<Utf8PathBuf>)
where
    P: Fn(&Utf8Path) -> bool,
{
    out.extend(node.files.iter().filter(|f| predicate(f.as_path())).cloned());
    for child in node.dirs.values() {
        collect_files(child, predicate, out);
    }
}

fn any_file_under<P>(node: &DirNode, predicate: &P) -> bool
where
    P: Fn(&Utf8Path) -> bool,
{
    node.files.iter().any(|f| predicate(f.as_path()))
        || node.dirs.values().any(|d| any_file_under(d, predicate))
}

fn collect_entries(node: &DirNode, out: &mut Vec<(Utf8PathBuf, bool)>) {
    out.extend(node.files.iter().map(|f| (f.clone(), false)));
    for child in node.dirs.values() {
        out.push((child.path.clone(), true));
        collect_entries(child, out);
    }
}

fn placeholder_aware(path: &Utf8Path, is_dir: bool) -> String {
    if is_dir {
        format!("{path}/")
    } else {
        path.to_string()
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Unifies separators and drops empty and `.` components. The flag is true
/// for directory placeholders (a trailing separator in the raw listing).
pub fn normalize_path(raw: &str) -> Option<(Utf8PathBuf, bool)> {
    let unified = raw.replace('\\', "/");
    let is_dir = unified.ends_with('/');
    let parts: Vec<&str> = unified
        .split('/')
        .filter(|p| !p.is_empty() && *p != ".")
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some((Utf8PathBuf::from(parts.join("/")), is_dir))
}

pub fn is_directory_placeholder(raw: &str) -> bool {
    raw.ends_with('/') || raw.ends_with('\\')
}

pub fn strip_prefix_ci(path: &Utf8Path, prefix: &Utf8Path) -> Option<Utf8PathBuf> {
    let mut rest = path.iter();
    for want in prefix.iter() {
        let got = rest.next()?;
        if fold(got) != fold(want) {
            return None;
        }
    }
    Some(rest.collect())
}

/// `path` is `dir` itself or lies somewhere below it.
pub fn is_under(path: &Utf8Path, dir: &Utf8Path) -> bool {
    strip_prefix_ci(path, dir).is_some()
}

pub fn path_eq(a: &Utf8Path, b: &Utf8Path) -> bool {
    a.iter().count() == b.iter().count() && is_under(a, b)
}

pub fn path_in(path: &Utf8Path, set: &[Utf8PathBuf]) -> bool {
    set.iter().any(|p| path_eq(path, p))
}

// Predicates

pub fn any_file(_: &Utf8Path) -> bool {
    true
}

pub fn has_extension(path: &Utf8Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

pub fn has_any_extension(path: &Utf8Path, exts: &[&str]) -> bool {
    exts.iter().any(|ext| has_extension(path, ext))
}

pub fn is_named(path: &Utf8Path, name: &str) -> bool {
    path.file_name()
        .map(|n| n.eq_ignore_ascii_case(name))
        .unwrap_or(false)
}
