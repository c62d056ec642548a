//! HTML reference generation
//!
//! Pages are laid out as:
//!
//! ```text
//! methods/[namespace/]name.html        one per function
//! constructors/[namespace/]name.html   one per constructor
//! types/[namespace/]name.html          one per constructed type
//! ```
//!
//! Built-in types link to anchors on `core/index.html`.

mod assets;
mod config;
mod generator;
pub mod naming;
mod paths;
mod writer;
mod xref;

pub use assets::write_default_assets;
pub use config::{AssetLinks, AssetPaths, ConfigError, DocsConfig};
pub use generator::{
    constructors_sentence, describe_argument, functions_sentence, DocsGenerator, GenerationReport,
};
pub use paths::{
    has_type_page, is_core_type, relative_path, LinkBase, PathResolver, SitePath, TypeLinker,
    CONSTRUCTORS_DIR, CORE_INDEX, CORE_TYPES, METHODS_DIR, TYPES_DIR,
};
pub use writer::{escape_html, Align, PageWriter, RowStyle};
pub use xref::CrossReferenceIndex;
