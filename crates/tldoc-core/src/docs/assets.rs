//! Bundled stylesheet and menu icon

use std::fs;
use std::path::Path;

use tracing::debug;

use super::config::AssetPaths;
use crate::error::DocsError;

const DEFAULT_STYLESHEET: &str = r#"body {
  font-family: 'Nunito', Arial, sans-serif;
  background-color: #f9f9f9;
  color: #333;
  margin: 0;
}

#main_div {
  max-width: 50em;
  margin: 0 auto;
  padding: 1em 2em;
}

h1, h2, h3 {
  font-weight: 600;
}

pre {
  background-color: #f0f0f0;
  border-radius: 4px;
  padding: 1em;
  overflow-x: auto;
  white-space: pre-wrap;
}

a {
  color: #329add;
  text-decoration: none;
}

a:hover {
  text-decoration: underline;
}

table {
  width: 100%;
  border-collapse: collapse;
  margin-bottom: 1em;
}

td {
  padding: 0.3em 0.6em;
  border-bottom: 1px solid #e0e0e0;
  vertical-align: top;
}

ul.horizontal {
  list-style: none;
  padding: 0;
  margin: 1em 0;
}

ul.horizontal li,
ul.horizontal img {
  display: inline-block;
  vertical-align: middle;
}

ul.horizontal img {
  height: 0.8em;
  margin: 0 0.4em;
}
"#;

const DEFAULT_MENU_SEPARATOR: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
  <path d="M20 8 L44 32 L20 56" fill="none" stroke="#999" stroke-width="8" stroke-linecap="round" stroke-linejoin="round"/>
</svg>
"##;

/// Write the bundled stylesheet and separator icon under `root`, leaving
/// existing files untouched. Returns how many files were written.
pub fn write_default_assets(root: &Path, assets: &AssetPaths) -> Result<usize, DocsError> {
    let mut written = 0;
    for (site_path, contents) in [
        (&assets.stylesheet, DEFAULT_STYLESHEET),
        (&assets.menu_separator, DEFAULT_MENU_SEPARATOR),
    ] {
        let path = site_path.to_fs_path(root);
        if path.exists() {
            debug!(path = %path.display(), "keeping existing asset");
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| DocsError::io(parent, source))?;
        }
        fs::write(&path, contents).map_err(|source| DocsError::io(&path, source))?;
        debug!(path = %path.display(), "wrote default asset");
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_missing_assets() {
        let tmp = TempDir::new().unwrap();
        let written = write_default_assets(tmp.path(), &AssetPaths::default()).unwrap();
        assert_eq!(written, 2);

        let css = fs::read_to_string(tmp.path().join("css/docs.css")).unwrap();
        assert!(css.contains("ul.horizontal"));
        let svg = fs::read_to_string(tmp.path().join("img/arrow.svg")).unwrap();
        assert_eq!(svg, DEFAULT_MENU_SEPARATOR);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("stroke=\"#999\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_existing_assets_are_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("css")).unwrap();
        fs::write(tmp.path().join("css/docs.css"), "/* custom */").unwrap();

        let written = write_default_assets(tmp.path(), &AssetPaths::default()).unwrap();
        assert_eq!(written, 1);
        assert_eq!(
            fs::read_to_string(tmp.path().join("css/docs.css")).unwrap(),
            "/* custom */"
        );

        assert_eq!(write_default_assets(tmp.path(), &AssetPaths::default()).unwrap(), 0);
    }
}
