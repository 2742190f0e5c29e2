//! Host project checks, package-manager detection and dependency install.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Service-worker integration installed into the host project
pub const PWA_PACKAGE: &str = "@ducanh2912/next-pwa";

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("no package.json found in `{0}`, run this from the root of a Next.js project")]
    MissingPackageJson(PathBuf),

    #[error("package.json in `{path}` could not be parsed")]
    InvalidPackageJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{0}` does not depend on `next`, only Next.js projects are supported")]
    NotNextProject(PathBuf),
}

#[derive(Debug, Default, Deserialize)]
struct PackageJson {
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    dependencies: BTreeMap<String, serde_json::Value>,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: BTreeMap<String, serde_json::Value>,
}

/// What we learned from `package.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub root: PathBuf,
    pub name: Option<String>,
    pub description: Option<String>,
}

pub fn inspect_project(root: &Path) -> Result<ProjectInfo, ProjectError> {
    let path = root.join("package.json");
    if !path.is_file() {
        return Err(ProjectError::MissingPackageJson(root.to_path_buf()));
    }

    let raw = std::fs::read_to_string(&path).map_err(|e| ProjectError::Read {
        path: path.clone(),
        source: e,
    })?;
    let package: PackageJson =
        serde_json::from_str(&raw).map_err(|e| ProjectError::InvalidPackageJson {
            path: path.clone(),
            source: e,
        })?;

    if !package.dependencies.contains_key("next") && !package.dev_dependencies.contains_key("next")
    {
        return Err(ProjectError::NotNextProject(path));
    }

    Ok(ProjectInfo {
        root: root.to_path_buf(),
        name: package.name.filter(|n| !n.trim().is_empty()),
        description: package.description.filter(|d| !d.trim().is_empty()),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// Pick the manager from the lock file present in `root`
    pub fn detect(root: &Path) -> Self {
        let lock_files = [
            ("bun.lockb", PackageManager::Bun),
            ("bun.lock", PackageManager::Bun),
            ("pnpm-lock.yaml", PackageManager::Pnpm),
            ("yarn.lock", PackageManager::Yarn),
        ];
        lock_files
            .into_iter()
            .find(|(file, _)| root.join(file).exists())
            .map(|(_, manager)| manager)
            .unwrap_or(PackageManager::Npm)
    }

    pub fn program(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    pub fn install_args(self, package: &str) -> Vec<String> {
        let verb = match self {
            PackageManager::Npm => "install",
            _ => "add",
        };
        vec![verb.to_string(), package.to_string()]
    }

    /// `npm run build`, `yarn build`, ...
    pub fn run_script(self, script: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm run {script}"),
            other => format!("{} {script}", other.program()),
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// Installs a dependency into the host project
pub trait PackageInstaller {
    fn install_package(&self, name: &str) -> Result<()>;
}

/// Runs the real package manager as a blocking child process
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    pub manager: PackageManager,
    pub project_root: PathBuf,
}

impl PackageInstaller for CommandInstaller {
    fn install_package(&self, name: &str) -> Result<()> {
        let program = which::which(self.manager.program()).with_context(|| {
            format!("`{}` was not found on PATH", self.manager.program())
        })?;
        let args = self.manager.install_args(name);
        log!("install"; "{} {}", self.manager, args.join(" "));

        let status = Command::new(&program)
            .args(&args)
            .current_dir(&self.project_root)
            .status()
            .with_context(|| format!("Failed to run {}", program.display()))?;

        if !status.success() {
            bail!(
                "`{} {}` failed with {}",
                self.manager,
                args.join(" "),
                status
            );
        }

        log!("install"; "✓ Installed {name}");
        Ok(())
    }
}
