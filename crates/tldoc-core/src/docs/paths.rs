//! Output locations and relative links
//!
//! Every page lives at a [`SitePath`]: a forward-slash path relative to the
//! output root. Links between pages are computed purely on those paths, so
//! they never depend on the host path separator or on the directory the
//! generator is run from. A site path becomes a filesystem path only in
//! [`SitePath::to_fs_path`].

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::naming;
use super::xref::CrossReferenceIndex;
use crate::error::DocsError;
use crate::schema::SchemaObject;

/// Root directory for function pages
pub const METHODS_DIR: &str = "methods";
/// Root directory for constructor pages
pub const CONSTRUCTORS_DIR: &str = "constructors";
/// Root directory for type pages
pub const TYPES_DIR: &str = "types";
/// Shared page documenting the built-in types
pub const CORE_INDEX: &str = "core/index.html";

/// Built-in types, compared case-insensitively
pub const CORE_TYPES: [&str; 11] = [
    "int", "long", "int128", "int256", "double", "vector", "string", "bool", "true", "bytes",
    "date",
];

/// Returns true if `type_key` names a built-in type
pub fn is_core_type(type_key: &str) -> bool {
    CORE_TYPES
        .iter()
        .any(|core| core.eq_ignore_ascii_case(type_key))
}

/// `Vector<User>` style keys, which only occur as function results
fn is_vector_key(type_key: &str) -> bool {
    type_key
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("vector<"))
}

/// Returns true if `type_key` gets a page of its own under `types/`.
/// Built-in and `Vector<T>` keys resolve to anchors on the core page.
pub fn has_type_page(type_key: &str) -> bool {
    !is_core_type(type_key) && !is_vector_key(type_key)
}

/// A page location relative to the output root, with an optional fragment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SitePath {
    path: String,
    fragment: Option<String>,
}

impl SitePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fragment: None,
        }
    }

    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }

    /// The path without its fragment
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Path components, ignoring empty and `.` segments
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        split_segments(&self.path)
    }

    /// Containing directory (`""` for pages at the root)
    pub fn parent(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(dir, _)| dir)
    }

    /// Append a segment to this path
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        let path = if self.path.is_empty() || self.path == "." {
            segment.to_string()
        } else {
            format!("{}/{}", self.path.trim_end_matches('/'), segment)
        };
        Self::new(path)
    }

    /// Host filesystem location under `root`; the fragment is dropped
    pub fn to_fs_path(&self, root: &Path) -> PathBuf {
        self.segments().fold(root.to_path_buf(), |path, s| path.join(s))
    }
}

impl From<String> for SitePath {
    fn from(value: String) -> Self {
        match value.split_once('#') {
            Some((path, fragment)) => Self::new(path).with_fragment(fragment),
            None => Self::new(value),
        }
    }
}

impl From<&str> for SitePath {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<SitePath> for String {
    fn from(value: SitePath) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for SitePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path)?;
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".")
}

/// Where a relative link starts from
#[derive(Debug, Clone, Copy)]
pub enum LinkBase<'a> {
    /// A page; links start from its containing directory
    File(&'a SitePath),
    /// A directory relative to the output root (`"."` or `""` for the root)
    Dir(&'a str),
}

impl LinkBase<'_> {
    pub const ROOT: LinkBase<'static> = LinkBase::Dir(".");

    fn dir_segments(&self) -> Vec<&str> {
        match self {
            LinkBase::File(page) => split_segments(page.parent()).collect(),
            LinkBase::Dir(dir) => split_segments(dir).collect(),
        }
    }
}

/// Link from `base` to `destination`, always `/`-separated.
///
/// A page linking to itself yields its bare file name; a directory linking
/// to itself yields `"."`.
pub fn relative_path(destination: &SitePath, base: &LinkBase<'_>) -> String {
    let base_segments = base.dir_segments();
    let dest_segments: Vec<&str> = destination.segments().collect();

    let common = base_segments
        .iter()
        .zip(&dest_segments)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; base_segments.len() - common];
    parts.extend_from_slice(&dest_segments[common..]);

    let mut link = if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    };
    if let Some(fragment) = destination.fragment() {
        link.push('#');
        link.push_str(fragment);
    }
    link
}

/// Resolves a link to a type reference, relative to the page being written
pub trait TypeLinker {
    fn type_link(&self, type_key: &str, base: &LinkBase<'_>) -> String;
}

/// Canonical output locations for objects and types
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

impl PathResolver {
    /// `methods/[ns/]name.html` or `constructors/[ns/]name.html`
    pub fn object_path(object: &SchemaObject) -> SitePath {
        let root = SitePath::new(Self::object_root(object));
        let dir = match &object.namespace {
            Some(ns) => root.join(ns),
            None => root,
        };
        dir.join(&object.html_file_name())
    }

    /// `core/index.html#key`, `types/ns/name.html` or `types/name.html`
    pub fn type_path(type_key: &str) -> SitePath {
        if is_core_type(type_key) {
            return SitePath::new(CORE_INDEX).with_fragment(type_key.to_ascii_lowercase());
        }
        if is_vector_key(type_key) {
            return SitePath::new(CORE_INDEX).with_fragment("vector");
        }

        let types = SitePath::new(TYPES_DIR);
        match type_key.split_once('.') {
            Some((namespace, name)) => types
                .join(namespace)
                .join(&naming::html_file_name(name)),
            None => types.join(&naming::html_file_name(type_key)),
        }
    }

    /// Link to the page of `type_key`, relative to `base`
    pub fn type_link(type_key: &str, base: &LinkBase<'_>) -> String {
        relative_path(&Self::type_path(type_key), base)
    }

    /// Create every directory a page will be written to. Safe to call on an
    /// existing tree.
    pub fn ensure_output_dirs(
        root: &Path,
        objects: &[SchemaObject],
        index: &CrossReferenceIndex<'_>,
    ) -> Result<(), DocsError> {
        let mut dirs = BTreeSet::new();
        dirs.insert(METHODS_DIR.to_string());
        dirs.insert(CONSTRUCTORS_DIR.to_string());
        dirs.insert(TYPES_DIR.to_string());

        for object in objects {
            dirs.insert(Self::object_path(object).parent().to_string());
        }
        for type_key in index.types() {
            if has_type_page(type_key) {
                dirs.insert(Self::type_path(type_key).parent().to_string());
            }
        }

        for dir in &dirs {
            let path = SitePath::new(dir.as_str()).to_fs_path(root);
            fs::create_dir_all(&path).map_err(|source| DocsError::io(&path, source))?;
        }
        debug!(count = dirs.len(), root = %root.display(), "output directories ready");
        Ok(())
    }

    fn object_root(object: &SchemaObject) -> &'static str {
        if object.is_function {
            METHODS_DIR
        } else {
            CONSTRUCTORS_DIR
        }
    }
}

impl TypeLinker for PathResolver {
    fn type_link(&self, type_key: &str, base: &LinkBase<'_>) -> String {
        Self::type_link(type_key, base)
    }
}
