//! Rule table files.
//!
//! A rule file replaces the built-in table:
//!
//! ```toml
//! url_prefix = "https://github.com/"   # optional
//!
//! [[literal]]
//! from = "XCRemoteSwiftPackageReference"
//! to = "XCLocalSwiftPackageReference"
//!
//! [[package]]
//! identity = "LiquidGlass"
//! relative_path = "LiquidGlass-main"
//! ```

use crate::error::{LocalizeError, Result};
use crate::rules::{DEFAULT_URL_PREFIX, RewriteRule, RuleTable};
use std::fs;
use std::path::Path;
use toml_edit::{DocumentMut, Item, Table};

/// Reads, parses and validates a rule file.
pub fn load_rule_table(path: &Path) -> Result<RuleTable> {
    let content = fs::read_to_string(path).map_err(|e| {
        LocalizeError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read rule file {}: {}", path.display(), e),
        ))
    })?;

    log::debug!("Loaded rule file: {}", path.display());
    parse_rule_table(&content)
}

/// Parses and validates rule file content.
pub fn parse_rule_table(content: &str) -> Result<RuleTable> {
    let doc = content.parse::<DocumentMut>()?;

    let url_prefix = match doc.get("url_prefix") {
        None => DEFAULT_URL_PREFIX.to_string(),
        Some(item) => item
            .as_str()
            .ok_or_else(|| LocalizeError::InvalidConfig("`url_prefix` must be a string".into()))?
            .to_string(),
    };

    let mut rules = Vec::new();

    for (idx, entry) in entries(&doc, "literal")?.iter().enumerate() {
        let from = required_str(entry, "literal", idx, "from")?;
        let to = required_str(entry, "literal", idx, "to")?;
        rules.push(RewriteRule::literal(from, to));
    }

    for (idx, entry) in entries(&doc, "package")?.iter().enumerate() {
        let identity = required_str(entry, "package", idx, "identity")?;
        let relative_path = required_str(entry, "package", idx, "relative_path")?;
        rules.push(RewriteRule::package(identity, relative_path));
    }

    if rules.is_empty() {
        return Err(LocalizeError::InvalidConfig(
            "no [[literal]] or [[package]] rules defined".into(),
        ));
    }

    let table = RuleTable::new(url_prefix, rules);
    table.validate()?;
    Ok(table)
}

/// Collects the `[[section]]` tables, or none if the section is absent.
fn entries<'a>(doc: &'a DocumentMut, section: &str) -> Result<Vec<&'a Table>> {
    match doc.get(section) {
        None => Ok(Vec::new()),
        Some(Item::ArrayOfTables(array)) => Ok(array.iter().collect()),
        Some(_) => Err(LocalizeError::InvalidConfig(format!(
            "`{}` must be an array of tables ([[{}]])",
            section, section
        ))),
    }
}

fn required_str<'a>(table: &'a Table, section: &str, idx: usize, key: &str) -> Result<&'a str> {
    table.get(key).and_then(|item| item.as_str()).ok_or_else(|| {
        LocalizeError::InvalidConfig(format!(
            "[[{}]] entry #{} is missing string key `{}`",
            section,
            idx + 1,
            key
        ))
    })
}
