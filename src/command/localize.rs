use crate::config::load_rule_table;
use crate::error::{LocalizeError, Result};
use crate::rewrite::{Rewritten, rewrite};
use crate::rules::{RewriteRule, RuleTable};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Project file rewritten when no `--project-file` is given.
pub const DEFAULT_PROJECT_FILE: &str = "AsideMusic.xcodeproj/project.pbxproj";

#[derive(Parser, Debug, Clone)]
pub struct LocalizeArgs {
    /// Path to the project.pbxproj to rewrite in place
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PROJECT_FILE)]
    pub project_file: PathBuf,

    /// TOML rule file replacing the built-in package table
    #[arg(long, value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Show what would change without writing the project file
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Print the active rule table and exit
    #[arg(long)]
    pub list_rules: bool,
}

pub fn execute(args: LocalizeArgs) -> Result<()> {
    let table = match &args.rules {
        Some(path) => load_rule_table(path)?,
        None => {
            let table = RuleTable::builtin();
            table.validate()?;
            table
        }
    };

    if args.list_rules {
        print_rules(&table);
        return Ok(());
    }

    log::debug!("Project file: {}", args.project_file.display());

    let original = read_manifest(&args.project_file)?;
    let rewritten = rewrite(&original, &table)?;
    let changed = rewritten.text != original;

    if !changed {
        log::debug!(
            "Content unchanged, skipping: {}",
            args.project_file.display()
        );
    } else if args.dry_run {
        log::info!("Would update: {}", args.project_file.display());
    } else {
        write_manifest(&args.project_file, &rewritten.text)?;
    }

    print_summary(&args.project_file, &rewritten, changed, args.dry_run);
    Ok(())
}

fn read_manifest(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        log::error!("Failed to read {}: {}", path.display(), e);
        LocalizeError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read {}: {}", path.display(), e),
        ))
    })
}

/// Overwrites the manifest in place. No backup is kept.
fn write_manifest(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        log::error!("Failed to write {}: {}", path.display(), e);
        LocalizeError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to write {}: {}", path.display(), e),
        ))
    })
}

fn print_rules(table: &RuleTable) {
    println!("{}", "Rule table:".bold().cyan());
    println!("  {} {}", "URL prefix:".bold(), table.url_prefix);

    for rule in &table.rules {
        let kind = match rule {
            RewriteRule::Literal { .. } => "literal",
            RewriteRule::Package { .. } => "package",
        };
        println!("  {:>8} {}", kind.dimmed(), rule);
    }
}

fn print_summary(path: &Path, rewritten: &Rewritten, changed: bool, dry_run: bool) {
    if !changed {
        println!(
            "{:>12} {} (no remote references to rewrite)",
            "Unchanged".yellow().bold(),
            path.display()
        );
        return;
    }

    if dry_run {
        println!("\n{}", "DRY RUN - No changes will be made".yellow().bold());
    } else {
        println!("\n{}", "Changes applied:".green().bold());
    }

    for outcome in &rewritten.outcomes {
        if outcome.matches == 0 {
            println!("   {} {}", "-".dimmed(), outcome.rule.describe().dimmed());
        } else if dry_run {
            println!("   • {} ({})", outcome.rule, outcome.matches);
        } else {
            println!(
                "   {} {} ({})",
                "✓".green(),
                outcome.rule,
                outcome.matches
            );
        }
    }

    println!();
    let total = rewritten.total_matches();
    if dry_run {
        println!(
            "{} {} in {} would be rewritten. Run without {} to apply.",
            total.to_string().cyan().bold(),
            if total == 1 { "reference" } else { "references" },
            path.display(),
            "--dry-run".cyan()
        );
    } else {
        println!(
            "{:>12} {} ({} {})",
            "Rewrote".green().bold(),
            path.display(),
            total,
            if total == 1 { "reference" } else { "references" }
        );
    }
}
