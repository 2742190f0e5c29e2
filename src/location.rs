//! Where generated assets live inside the project's `public/` directory.
//!
//! The same value drives the directory the generator writes into and the
//! `src` of every manifest icon, so the two can never drift apart.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory served at `/` by Next.js
pub const PUBLIC_DIR: &str = "public";

/// Characters escaped inside one URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("assets directory must not be empty")]
    Empty,

    #[error("assets directory `{0}` must stay inside `public/` (no `.`, `..` or backslash segments)")]
    InvalidSegment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetsLocation {
    /// `public/assets`
    Assets,
    /// `public/icons`
    Icons,
    /// `public/<suffix>`
    Custom(String),
}

impl AssetsLocation {
    /// Build a custom location from an operator-supplied suffix.
    ///
    /// Leading and trailing slashes are dropped, so `"/img/pwa/"` becomes
    /// `public/img/pwa`.
    pub fn custom(suffix: &str) -> Result<Self, LocationError> {
        let trimmed = suffix.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(LocationError::Empty);
        }
        let bad_segment = trimmed
            .split('/')
            .any(|seg| seg.is_empty() || seg == "." || seg == ".." || seg.contains('\\'));
        if bad_segment {
            return Err(LocationError::InvalidSegment(trimmed.to_string()));
        }
        Ok(AssetsLocation::Custom(trimmed.to_string()))
    }

    /// Parse a CLI value: `assets`, `icons`, or any custom suffix
    pub fn parse(value: &str) -> Result<Self, LocationError> {
        match value.trim().trim_matches('/') {
            PUBLIC_DIR => Err(LocationError::Empty),
            "assets" | "public/assets" => Ok(AssetsLocation::Assets),
            "icons" | "public/icons" => Ok(AssetsLocation::Icons),
            other => AssetsLocation::custom(other.strip_prefix("public/").unwrap_or(other)),
        }
    }

    /// Path below `public/`, with forward slashes
    pub fn serving_path(&self) -> &str {
        match self {
            AssetsLocation::Assets => "assets",
            AssetsLocation::Icons => "icons",
            AssetsLocation::Custom(suffix) => suffix,
        }
    }

    /// Path relative to the project root, e.g. `public/assets`
    pub fn relative_path(&self) -> String {
        format!("{PUBLIC_DIR}/{}", self.serving_path())
    }

    /// Filesystem directory the generator writes into
    pub fn directory(&self, project_root: &Path) -> PathBuf {
        self.serving_path()
            .split('/')
            .fold(project_root.join(PUBLIC_DIR), |dir, seg| dir.join(seg))
    }

    /// URL of a generated file as seen by the browser, percent-encoded
    pub fn icon_src(&self, file_name: &str) -> String {
        self.serving_path()
            .split('/')
            .chain(std::iter::once(file_name))
            .fold(String::new(), |mut url, segment| {
                url.push('/');
                url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
                url
            })
    }
}

impl fmt::Display for AssetsLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_path())
    }
}
