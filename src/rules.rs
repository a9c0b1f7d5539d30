//! Rewrite rules and the built-in rule table.
//!
//! A [`RuleTable`] is plain data: the literal token renames and the
//! package-to-folder mapping. Adding or removing a package is a table edit,
//! either here in [`RuleTable::builtin`] or in a TOML rule file loaded by
//! [`crate::config`].
//!
//! Validators are pure functions with no I/O.

use crate::error::{LocalizeError, Result};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// URL prefix every built-in package reference is hosted under.
pub const DEFAULT_URL_PREFIX: &str = "https://github.com/";

const REMOTE_REFERENCE_KIND: &str = "XCRemoteSwiftPackageReference";
const LOCAL_REFERENCE_KIND: &str = "XCLocalSwiftPackageReference";

/// Built-in package mapping: (identity in the repository URL, local folder).
const BUILTIN_PACKAGES: &[(&str, &str)] = &[
    ("LiquidGlass", "LiquidGlass-main"),
    ("NeteaseCloudMusicAPI-Swift", "NeteaseCloudMusicAPI-Swift"),
    ("MusicKit", "QQMusicKit"),
    ("FFmpegSwiftSDK", "ffmpeg-swift"),
];

/// A single transformation applied to the manifest text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteRule {
    /// Exact substring replacement, every occurrence.
    Literal { from: String, to: String },
    /// Replaces a `repositoryURL = ...; requirement = {...};` block for the
    /// package whose URL ends in `<identity>.git` with a `relativePath` line.
    Package {
        identity: String,
        relative_path: String,
    },
}

impl RewriteRule {
    pub fn literal(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Literal {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn package(identity: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self::Package {
            identity: identity.into(),
            relative_path: relative_path.into(),
        }
    }

    /// One-line label for logs and the summary.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { from, to } => write!(f, "{} → {}", from, to),
            Self::Package {
                identity,
                relative_path,
            } => write!(f, "{}.git → relativePath \"{}\"", identity, relative_path),
        }
    }
}

/// Ordered rule set plus the URL prefix package rules match against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    pub url_prefix: String,
    pub rules: Vec<RewriteRule>,
}

impl RuleTable {
    /// Creates a table, moving literal rules ahead of package rules.
    ///
    /// Relative order within each kind is kept.
    pub fn new(url_prefix: impl Into<String>, rules: Vec<RewriteRule>) -> Self {
        let (mut ordered, packages): (Vec<_>, Vec<_>) = rules
            .into_iter()
            .partition(|r| matches!(r, RewriteRule::Literal { .. }));
        ordered.extend(packages);

        Self {
            url_prefix: url_prefix.into(),
            rules: ordered,
        }
    }

    /// The AsideMusic migration table.
    pub fn builtin() -> Self {
        let mut rules = vec![RewriteRule::literal(
            REMOTE_REFERENCE_KIND,
            LOCAL_REFERENCE_KIND,
        )];
        rules.extend(
            BUILTIN_PACKAGES
                .iter()
                .map(|(identity, path)| RewriteRule::package(*identity, *path)),
        );
        Self::new(DEFAULT_URL_PREFIX, rules)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Package rules in application order.
    pub fn packages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rules.iter().filter_map(|r| match r {
            RewriteRule::Package {
                identity,
                relative_path,
            } => Some((identity.as_str(), relative_path.as_str())),
            RewriteRule::Literal { .. } => None,
        })
    }

    /// Validates every rule and rejects duplicate package identities.
    pub fn validate(&self) -> Result<()> {
        let mut identities = HashSet::new();

        for rule in &self.rules {
            match rule {
                RewriteRule::Literal { from, to } => validate_literal(from, to)?,
                RewriteRule::Package {
                    identity,
                    relative_path,
                } => {
                    validate_identity(identity)?;
                    validate_relative_path(relative_path)?;

                    if !identities.insert(identity.as_str()) {
                        return Err(LocalizeError::Other(anyhow::anyhow!(
                            "Duplicate package rule: {}",
                            identity
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Validates the package identity matched inside a repository URL.
///
/// ## Rules
/// - Not empty
/// - No `"` (would escape the quoted URL)
/// - No whitespace
pub fn validate_identity(identity: &str) -> Result<()> {
    if identity.is_empty() {
        return Err(LocalizeError::InvalidRule(
            identity.to_string(),
            "package identity cannot be empty".to_string(),
        ));
    }

    if let Some(ch) = identity.chars().find(|c| *c == '"' || c.is_whitespace()) {
        return Err(LocalizeError::InvalidRule(
            identity.to_string(),
            format!("package identity contains invalid character {:?}", ch),
        ));
    }

    Ok(())
}

/// Validates the folder written into `relativePath = "...";`.
///
/// ## Rules
/// - Not empty
/// - No `"` or line breaks
/// - Not absolute (Xcode resolves it against the project directory)
pub fn validate_relative_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LocalizeError::InvalidRule(
            path.to_string(),
            "relative path cannot be empty".to_string(),
        ));
    }

    if path.contains(['"', '\n', '\r']) {
        return Err(LocalizeError::InvalidRule(
            path.to_string(),
            "relative path cannot contain quotes or line breaks".to_string(),
        ));
    }

    if Path::new(path).is_absolute() || path.starts_with('/') {
        return Err(LocalizeError::InvalidRule(
            path.to_string(),
            "relative path must not be absolute".to_string(),
        ));
    }

    Ok(())
}

/// Validates a literal token rename.
pub fn validate_literal(from: &str, to: &str) -> Result<()> {
    if from.is_empty() {
        return Err(LocalizeError::InvalidRule(
            format!("{} → {}", from, to),
            "literal token cannot be empty".to_string(),
        ));
    }

    if from == to {
        return Err(LocalizeError::InvalidRule(
            format!("{} → {}", from, to),
            "literal rename has identical source and target".to_string(),
        ));
    }

    Ok(())
}
