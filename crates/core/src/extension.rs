//! Commerce extension probe
//!
//! Host-side detection of whether the optional commerce extension is
//! installed. The result is resolved once and handed to the generator as a
//! capability; the trail rules never touch the filesystem.

use globset::{Glob, GlobMatcher};
use regex::bytes::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

/// Directory name of the commerce extension
pub const DEFAULT_EXTENSION_SLUG: &str = "woocommerce";

/// Bytes of a plugin file searched for its header
const HEADER_BYTES: u64 = 8 * 1024;

/// Outcome of probing for the extension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStatus {
    pub installed: bool,

    /// Main plugin file, relative to the plugins directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plugin_file: Option<String>,

    /// Admin URL activating the extension
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activation_url: Option<String>,
}

/// Probe settings
#[derive(Debug, Clone)]
pub struct ExtensionProbe {
    /// Directory holding all plugins
    pub plugins_dir: PathBuf,

    pub slug: String,

    /// Admin base URL, e.g. `https://example.com/wp-admin/`
    pub admin_url: String,
}

impl ExtensionProbe {
    pub fn new(plugins_dir: PathBuf) -> Self {
        Self {
            plugins_dir,
            slug: DEFAULT_EXTENSION_SLUG.to_string(),
            admin_url: "/wp-admin/".to_string(),
        }
    }

    /// Set extension slug (builder pattern)
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Set admin base URL (builder pattern)
    pub fn with_admin_url(mut self, admin_url: impl Into<String>) -> Self {
        self.admin_url = admin_url.into();
        self
    }

    /// Look for the extension; unreadable directories count as not installed
    pub fn detect(&self) -> ExtensionStatus {
        let dir = self.plugins_dir.join(&self.slug);
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "extension directory missing");
            return ExtensionStatus::default();
        }

        let Some(file) = find_plugin_file(&dir) else {
            tracing::debug!(dir = %dir.display(), "no plugin file in extension directory");
            return ExtensionStatus::default();
        };

        let plugin_file = format!("{}/{}", self.slug, file);
        let activation_url = format!(
            "{}/plugins.php?action=activate&plugin={}",
            self.admin_url.trim_end_matches('/'),
            encode_query_value(&plugin_file)
        );

        ExtensionStatus {
            installed: true,
            plugin_file: Some(plugin_file),
            activation_url: Some(activation_url),
        }
    }
}

fn php_matcher() -> &'static GlobMatcher {
    static MATCHER: OnceLock<GlobMatcher> = OnceLock::new();
    MATCHER.get_or_init(|| {
        Glob::new("*.php")
            .expect("valid plugin file glob")
            .compile_matcher()
    })
}

fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?mi)^[ \t/*#@]*Plugin Name:[ \t]*\S").expect("valid plugin header pattern")
    })
}

/// First plugin file in sorted order, relative to `dir` with `/` separators
fn find_plugin_file(dir: &Path) -> Option<String> {
    let mut candidates: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| php_matcher().is_match(e.file_name()))
        .map(|e| e.into_path())
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .find(|path| has_plugin_header(path))
        .and_then(|path| {
            let relative = path.strip_prefix(dir).ok()?;
            let parts: Vec<String> = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            Some(parts.join("/"))
        })
}

/// Header lines are matched on raw bytes; plugin files need not be UTF-8
fn has_plugin_header(path: &Path) -> bool {
    let mut head = Vec::new();
    let read = File::open(path).and_then(|f| f.take(HEADER_BYTES).read_to_end(&mut head));

    match read {
        Ok(_) => header_re().is_match(&head),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "unreadable plugin file");
            false
        }
    }
}

/// Percent-encode a query parameter value
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "<?php\n/**\n * Plugin Name: WooCommerce\n * Version: 9.0.0\n */\n";

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let status = ExtensionProbe::new(dir.path().to_path_buf()).detect();

        assert!(!status.installed);
        assert_eq!(status.activation_url, None);
    }

    #[test]
    fn test_directory_without_plugin_file() {
        let dir = TempDir::new().unwrap();
        let ext = dir.path().join("woocommerce");
        fs::create_dir_all(&ext).unwrap();
        fs::write(ext.join("readme.txt"), "=== WooCommerce ===").unwrap();
        fs::write(ext.join("uninstall.php"), "<?php exit;").unwrap();

        assert!(!ExtensionProbe::new(dir.path().to_path_buf()).detect().installed);
    }

    #[test]
    fn test_detect_installed() {
        let dir = TempDir::new().unwrap();
        let ext = dir.path().join("woocommerce");
        fs::create_dir_all(ext.join("includes")).unwrap();
        fs::write(ext.join("woocommerce.php"), HEADER).unwrap();
        fs::write(ext.join("includes").join("class-wc.php"), "<?php class WC {}").unwrap();

        let status = ExtensionProbe::new(dir.path().to_path_buf())
            .with_admin_url("https://example.com/wp-admin/")
            .detect();

        assert!(status.installed);
        assert_eq!(status.plugin_file.as_deref(), Some("woocommerce/woocommerce.php"));
        assert_eq!(
            status.activation_url.as_deref(),
            Some("https://example.com/wp-admin/plugins.php?action=activate&plugin=woocommerce%2Fwoocommerce.php")
        );
    }

    #[test]
    fn test_custom_slug() {
        let dir = TempDir::new().unwrap();
        let ext = dir.path().join("shopkit");
        fs::create_dir_all(&ext).unwrap();
        fs::write(ext.join("shopkit.php"), "<?php\n// Plugin Name: ShopKit\n").unwrap();

        let status = ExtensionProbe::new(dir.path().to_path_buf())
            .with_slug("shopkit")
            .detect();
        assert_eq!(status.plugin_file.as_deref(), Some("shopkit/shopkit.php"));
    }

    #[test]
    fn test_latin1_header_is_detected() {
        let dir = TempDir::new().unwrap();
        let ext = dir.path().join("woocommerce");
        fs::create_dir_all(&ext).unwrap();

        let mut content = b"<?php\n/**\n * Plugin Name: WooCommerce\n * Author: Autom".to_vec();
        content.push(0xe4);
        content.extend_from_slice(b"ttic\n */\n");
        fs::write(ext.join("woocommerce.php"), content).unwrap();

        let status = ExtensionProbe::new(dir.path().to_path_buf()).detect();
        assert!(status.installed);
        assert_eq!(status.plugin_file.as_deref(), Some("woocommerce/woocommerce.php"));
    }

    #[test]
    fn test_header_read_cut_inside_utf8_char() {
        let dir = TempDir::new().unwrap();
        let ext = dir.path().join("woocommerce");
        fs::create_dir_all(&ext).unwrap();

        let mut content = HEADER.to_string();
        let padding = HEADER_BYTES as usize - 1 - content.len();
        content.push_str(&" ".repeat(padding));
        content.push('\u{e9}');
        assert_eq!(content.len(), HEADER_BYTES as usize + 1);
        fs::write(ext.join("woocommerce.php"), content).unwrap();

        assert!(ExtensionProbe::new(dir.path().to_path_buf()).detect().installed);
    }

    #[test]
    fn test_encode_query_value() {
        assert_eq!(encode_query_value("a/b c.php"), "a%2Fb%20c.php");
    }
}
