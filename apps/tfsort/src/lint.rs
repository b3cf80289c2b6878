//! Lint runner: discovers documents under the scan root and checks each one.
//!
//! Documents are processed one at a time in path order. Any read or parse
//! failure aborts the whole run; ordering violations only flip the run-wide
//! verdict and processing continues.

use crate::config::Effective;
use crate::error::{Error, Result};
use crate::models::{LintResult, Summary, Violation};
use crate::walk::{lint_document, Rules};
use glob::{glob, Pattern};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Collect candidate documents below `root`, skipping excluded names.
///
/// A `root` that is itself a file is returned when its extension matches.
/// Paths are returned sorted and deduplicated.
pub fn discover_files(root: &Path, extensions: &[String], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(root).map_err(|e| Error::io(root, e))?;
    if !meta.is_dir() {
        let wanted =
            has_extension(root, extensions) && !is_excluded(Path::new(""), root, exclude);
        return Ok(if wanted {
            vec![display_path(root.to_path_buf())]
        } else {
            Vec::new()
        });
    }

    // Escape the root so directories like `env[prod]` are matched literally
    let base = Pattern::escape(&root.to_string_lossy());
    let mut targets: Vec<PathBuf> = Vec::new();
    for ext in extensions {
        let pattern = format!("{}/**/*.{}", base.trim_end_matches('/'), ext);
        let entries = glob(&pattern).map_err(|source| Error::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                // `**` still descends into excluded directories; unreadable
                // entries there are not our documents
                Err(e) if is_excluded(root, e.path(), exclude) => continue,
                Err(e) => return Err(e.into()),
            };
            if !path.is_file() || is_excluded(root, &path, exclude) {
                continue;
            }
            targets.push(display_path(path));
        }
    }
    targets.sort();
    targets.dedup();
    Ok(targets)
}

fn is_excluded(root: &Path, path: &Path, exclude: &[String]) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components().any(|c| match c {
        Component::Normal(name) => exclude.iter().any(|x| name == x.as_str()),
        _ => false,
    })
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| x == e))
}

/// Drop a leading `./` so reports read `main.tf:3` for the default root.
fn display_path(path: PathBuf) -> PathBuf {
    match path.strip_prefix(".") {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path,
    }
}

/// Run the lint over every discovered document.
///
/// `on_violation` is invoked for each violation as soon as it is found so
/// human output can stream; the returned `LintResult` holds all of them.
pub fn run_lint<F>(eff: &Effective, mut on_violation: F) -> Result<LintResult>
where
    F: FnMut(&Violation),
{
    let files = discover_files(&eff.root, &eff.extensions, &eff.exclude)?;
    tracing::debug!(
        root = %eff.root.display(),
        config = ?eff.config_path,
        files = files.len(),
        "discovered documents"
    );
    let mut result = LintResult {
        violations: Vec::new(),
        summary: Summary::default(),
        sorted: true,
    };
    for path in files {
        lint_file(&path, &eff.rules, &mut result, &mut on_violation)?;
    }
    result.summary.violations = result.violations.len();
    Ok(result)
}

/// Lint a single document and fold its verdict into `result`.
pub fn lint_file<F>(
    path: &Path,
    rules: &Rules,
    result: &mut LintResult,
    on_violation: &mut F,
) -> Result<()>
where
    F: FnMut(&Violation),
{
    tracing::debug!(file = %path.display(), "linting");
    let src = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let outcome = lint_document(path, &src, rules, |v| on_violation(v))?;
    result.sorted = result.sorted && outcome.sorted;
    result.summary.files += 1;
    result.summary.containers += outcome.containers;
    result.violations.extend(outcome.violations);
    Ok(())
}
