//! Text rewriting of `project.pbxproj` package references.
//!
//! Operates on the manifest as one string with regex and substring matching.
//! The pbxproj structure is never parsed, so formatting, comments, and
//! unrelated objects pass through byte-for-byte.
//!
//! ## Package blocks
//!
//! A remote reference looks like:
//!
//! ```text
//! repositoryURL = "https://github.com/owner/LiquidGlass.git";
//! requirement = {
//!     branch = main;
//!     kind = branch;
//! };
//! ```
//!
//! and becomes `relativePath = "LiquidGlass-main";`. The requirement body is
//! matched non-greedily up to the first `};`, across line breaks.

use crate::error::Result;
use crate::rules::{RewriteRule, RuleTable};
use regex::{NoExpand, Regex};

/// Result of applying a rule table to manifest text.
#[derive(Debug, Clone)]
pub struct Rewritten {
    pub text: String,
    pub outcomes: Vec<RuleOutcome>,
}

/// How many spans a single rule replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: RewriteRule,
    pub matches: usize,
}

impl Rewritten {
    pub fn total_matches(&self) -> usize {
        self.outcomes.iter().map(|o| o.matches).sum()
    }

    /// Match count for the package rule with this identity.
    pub fn matches_for(&self, identity: &str) -> Option<usize> {
        self.outcomes.iter().find_map(|o| match &o.rule {
            RewriteRule::Package { identity: id, .. } if id == identity => Some(o.matches),
            _ => None,
        })
    }
}

/// Compiled form of a rule table.
struct CompiledRules {
    replacements: Vec<(RewriteRule, Matcher)>,
}

enum Matcher {
    Literal { from: String, to: String },
    Pattern { regex: Regex, replacement: String },
}

impl CompiledRules {
    fn new(table: &RuleTable) -> Result<Self> {
        let prefix = regex::escape(&table.url_prefix);
        let mut replacements = Vec::with_capacity(table.len());

        for rule in &table.rules {
            let matcher = match rule {
                RewriteRule::Literal { from, to } => Matcher::Literal {
                    from: from.clone(),
                    to: to.clone(),
                },
                RewriteRule::Package {
                    identity,
                    relative_path,
                } => Matcher::Pattern {
                    regex: package_pattern(&prefix, identity)?,
                    replacement: format!("relativePath = \"{}\";", relative_path),
                },
            };
            replacements.push((rule.clone(), matcher));
        }

        Ok(Self { replacements })
    }
}

/// Builds the block pattern for one package. `escaped_prefix` is already escaped.
fn package_pattern(escaped_prefix: &str, identity: &str) -> Result<Regex> {
    let pattern = format!(
        r#"(?s)repositoryURL = "{prefix}[^"]*{id}\.git";\s*requirement = \{{.*?\}};"#,
        prefix = escaped_prefix,
        id = regex::escape(identity)
    );
    Ok(Regex::new(&pattern)?)
}

/// Applies every rule in `table` to `text`, in table order.
///
/// Rules that find nothing are recorded with zero matches; that is not an
/// error. Only regex compilation can fail.
pub fn rewrite(text: &str, table: &RuleTable) -> Result<Rewritten> {
    let compiled = CompiledRules::new(table)?;
    let mut content = text.to_string();
    let mut outcomes = Vec::with_capacity(compiled.replacements.len());

    for (rule, matcher) in compiled.replacements {
        let matches = match &matcher {
            Matcher::Literal { from, to } => {
                let count = content.matches(from.as_str()).count();
                if count > 0 {
                    content = content.replace(from.as_str(), to);
                }
                count
            }
            Matcher::Pattern { regex, replacement } => {
                let count = regex.find_iter(&content).count();
                if count > 0 {
                    content = regex
                        .replace_all(&content, NoExpand(replacement))
                        .into_owned();
                }
                count
            }
        };

        log::debug!("{}: {} match(es)", rule, matches);
        outcomes.push(RuleOutcome { rule, matches });
    }

    Ok(Rewritten {
        text: content,
        outcomes,
    })
}
