//! Artifact tree reconstruction
//!
//! The code-generation backend returns a flat list of file records in two
//! shapes: `{path, content, lang}` and `{meta: {file, url}, source}`. This
//! module resolves each record once into a canonical form and rebuilds the
//! nested directory/file tree the client navigates.

use crate::models::RawGeneratedFile;
use std::collections::BTreeMap;

/// File extensions treated as images when classifying leaves for rendering
const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".webp", ".bmp"];

/// A generated file with path and content resolved to canonical form
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFile {
    pub path: String,
    pub content: String,
    pub lang: String,
    /// Hosted asset URL, present on asset-shaped records
    pub url: Option<String>,
}

impl ResolvedFile {
    /// Resolve a raw record: effective path is `path` falling back to
    /// `meta.file`, effective content is `content` falling back to `source`.
    /// Returns None when no non-empty path can be extracted.
    pub fn from_raw(raw: &RawGeneratedFile) -> Option<Self> {
        let path = raw
            .path
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| {
                raw.meta
                    .as_ref()
                    .and_then(|m| m.file.as_deref())
                    .filter(|p| !p.is_empty())
            })?
            .to_string();

        let content = raw
            .content
            .as_deref()
            .or(raw.source.as_deref())
            .unwrap_or("")
            .to_string();

        Some(Self {
            path,
            content,
            lang: raw.lang.clone().unwrap_or_else(|| "text".to_string()),
            url: raw.meta.as_ref().and_then(|m| m.url.clone()),
        })
    }
}

/// A node in the reconstructed artifact tree
#[derive(Debug, Clone, PartialEq)]
pub enum FileTreeNode {
    Directory {
        children: BTreeMap<String, FileTreeNode>,
    },
    File {
        content: String,
        path: String,
        lang: String,
    },
}

impl FileTreeNode {
    /// An empty root directory
    pub fn empty_root() -> Self {
        FileTreeNode::Directory {
            children: BTreeMap::new(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, FileTreeNode::Directory { .. })
    }

    /// Number of file leaves in this subtree
    pub fn file_count(&self) -> usize {
        match self {
            FileTreeNode::File { .. } => 1,
            FileTreeNode::Directory { children } => {
                children.values().map(|child| child.file_count()).sum()
            }
        }
    }

    /// Look up a node by slash-separated path (empty segments tolerated)
    pub fn lookup(&self, path: &str) -> Option<&FileTreeNode> {
        let mut current = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            match current {
                FileTreeNode::Directory { children } => {
                    current = children.get(segment)?;
                }
                FileTreeNode::File { .. } => return None,
            }
        }
        Some(current)
    }
}

/// Build a navigable tree from the backend's flat file list.
///
/// Records with no resolvable path are logged and skipped. Duplicate paths are
/// not an error: the later record in list order wins. An empty input produces
/// an empty root directory.
pub fn build_file_tree(files: &[RawGeneratedFile]) -> FileTreeNode {
    let mut children = BTreeMap::new();

    for (index, raw) in files.iter().enumerate() {
        let Some(resolved) = ResolvedFile::from_raw(raw) else {
            log::warn!("Skipping generated file record {}: no resolvable path", index);
            continue;
        };

        let path = resolved.path.clone();
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.is_empty() {
            log::warn!(
                "Skipping generated file record {}: path {:?} has no segments",
                index,
                resolved.path
            );
            continue;
        }

        insert_file(&mut children, &segments, resolved);
    }

    FileTreeNode::Directory { children }
}

fn insert_file(
    children: &mut BTreeMap<String, FileTreeNode>,
    segments: &[&str],
    file: ResolvedFile,
) {
    let (head, rest) = segments
        .split_first()
        .expect("insert_file called with at least one segment");

    if rest.is_empty() {
        children.insert(
            head.to_string(),
            FileTreeNode::File {
                content: file.content,
                path: file.path,
                lang: file.lang,
            },
        );
        return;
    }

    let entry = children
        .entry(head.to_string())
        .or_insert_with(FileTreeNode::empty_root);

    // A file node occupying an intermediate segment gives way to a directory
    if !entry.is_directory() {
        *entry = FileTreeNode::empty_root();
    }

    if let FileTreeNode::Directory { children } = entry {
        insert_file(children, rest, file);
    }
}

/// Path of the first record with a resolvable path, used by the client to
/// auto-select a file for preview
pub fn first_file_path(files: &[RawGeneratedFile]) -> Option<String> {
    files
        .iter()
        .filter_map(ResolvedFile::from_raw)
        .map(|resolved| resolved.path)
        .next()
}

/// Advisory classification of a leaf as an image, by extension match.
/// Rendering concern only; tree structure is unaffected.
pub fn is_image_file(file_name: &str) -> bool {
    let lowered = file_name.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext))
}
