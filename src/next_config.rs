//! Next.js configuration wired to `@ducanh2912/next-pwa`.
//!
//! The file is replaced wholesale with a fixed block; existing custom
//! configuration is not merged.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileKind {
    /// `next.config.ts`
    TypeScript,
    /// `next.config.mjs`
    Module,
    /// `next.config.js`
    CommonJs,
}

impl ConfigFileKind {
    /// Detection order
    pub const PRECEDENCE: [ConfigFileKind; 3] = [
        ConfigFileKind::TypeScript,
        ConfigFileKind::Module,
        ConfigFileKind::CommonJs,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ConfigFileKind::TypeScript => "next.config.ts",
            ConfigFileKind::Module => "next.config.mjs",
            ConfigFileKind::CommonJs => "next.config.js",
        }
    }

    pub fn contents(self) -> &'static str {
        match self {
            ConfigFileKind::TypeScript => TYPESCRIPT_CONFIG,
            ConfigFileKind::Module => MODULE_CONFIG,
            ConfigFileKind::CommonJs => COMMONJS_CONFIG,
        }
    }
}

const TYPESCRIPT_CONFIG: &str = r#"import type { NextConfig } from "next";
import withPWAInit from "@ducanh2912/next-pwa";

const withPWA = withPWAInit({
  dest: "public",
  cacheOnFrontEndNav: true,
  aggressiveFrontEndNavCaching: true,
  reloadOnOnline: true,
  disable: process.env.NODE_ENV === "development",
  workboxOptions: {
    disableDevLogs: true,
  },
});

const nextConfig: NextConfig = {};

export default withPWA(nextConfig);
"#;

const MODULE_CONFIG: &str = r#"import withPWAInit from "@ducanh2912/next-pwa";

const withPWA = withPWAInit({
  dest: "public",
  cacheOnFrontEndNav: true,
  aggressiveFrontEndNavCaching: true,
  reloadOnOnline: true,
  disable: process.env.NODE_ENV === "development",
  workboxOptions: {
    disableDevLogs: true,
  },
});

/** @type {import('next').NextConfig} */
const nextConfig = {};

export default withPWA(nextConfig);
"#;

const COMMONJS_CONFIG: &str = r#"const withPWA = require("@ducanh2912/next-pwa").default({
  dest: "public",
  cacheOnFrontEndNav: true,
  aggressiveFrontEndNavCaching: true,
  reloadOnOnline: true,
  disable: process.env.NODE_ENV === "development",
  workboxOptions: {
    disableDevLogs: true,
  },
});

/** @type {import('next').NextConfig} */
const nextConfig = {};

module.exports = withPWA(nextConfig);
"#;

/// Which config file `patch_config` would write
pub fn detect_config(project_root: &Path) -> ConfigFileKind {
    ConfigFileKind::PRECEDENCE
        .into_iter()
        .find(|kind| project_root.join(kind.file_name()).is_file())
        .unwrap_or(ConfigFileKind::CommonJs)
}

pub fn config_path(project_root: &Path, kind: ConfigFileKind) -> PathBuf {
    project_root.join(kind.file_name())
}

/// Overwrite the detected config file, or create `next.config.js`
pub fn patch_config(project_root: &Path) -> Result<ConfigFileKind> {
    let kind = detect_config(project_root);
    let path = config_path(project_root, kind);
    let existed = path.exists();

    std::fs::write(&path, kind.contents())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    if existed {
        log!("config"; "✓ Updated {}", kind.file_name());
    } else {
        log!("config"; "✓ Created {}", kind.file_name());
    }
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_creates_commonjs_when_nothing_exists() {
        let dir = tempfile::tempdir().unwrap();
        let kind = patch_config(dir.path()).unwrap();

        assert_eq!(kind, ConfigFileKind::CommonJs);
        let written = fs::read_to_string(dir.path().join("next.config.js")).unwrap();
        assert!(written.contains("module.exports = withPWA(nextConfig);"));
    }

    #[test]
    fn test_typescript_config_is_overwritten_in_place() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("next.config.ts"), "export default { custom: 1 };").unwrap();

        let kind = patch_config(dir.path()).unwrap();

        assert_eq!(kind, ConfigFileKind::TypeScript);
        let written = fs::read_to_string(dir.path().join("next.config.ts")).unwrap();
        assert_eq!(written, TYPESCRIPT_CONFIG);
        assert!(!written.contains("custom"));
        assert!(!dir.path().join("next.config.js").exists());
    }

    #[test]
    fn test_precedence_prefers_typescript_over_module() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("next.config.mjs"), "").unwrap();
        assert_eq!(detect_config(dir.path()), ConfigFileKind::Module);

        fs::write(dir.path().join("next.config.ts"), "").unwrap();
        assert_eq!(detect_config(dir.path()), ConfigFileKind::TypeScript);
    }

    #[test]
    fn test_patch_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("next.config.mjs"), "export default {};").unwrap();

        patch_config(dir.path()).unwrap();
        let first = fs::read_to_string(dir.path().join("next.config.mjs")).unwrap();
        patch_config(dir.path()).unwrap();
        let second = fs::read_to_string(dir.path().join("next.config.mjs")).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, MODULE_CONFIG);
    }
}
