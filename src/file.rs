// src/file.rs

use std::{
    collections::{BTreeMap, HashMap},
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use crate::config::consts::UNCATEGORIZED;
use crate::config::options::ExportOptions;
use crate::core::sanitize::sanitize_filename;
use crate::csv::to_export_string;

/// Write a single export file based on ExportOptions (path, headers policy, format).
/// Returns the final path written to.
pub fn write_export_single(
    export: &ExportOptions,
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
) -> Result<PathBuf, Box<dyn Error>> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let contents = to_export_string(headers, rows, export.include_headers, export.format);
    fs::write(&path, contents)?;
    logf!("Export: {} rows → {}", rows.len(), path.display());
    Ok(path)
}

/// Write one file per category into the directory implied by `export.out_path()`.
/// `category_col` is the column holding the category. Files come out in
/// category order so duplicate stems are numbered the same way every run.
pub fn write_export_per_category(
    export: &ExportOptions,
    headers: &Option<Vec<String>>,
    rows: &[Vec<String>],
    category_col: usize,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let outdir = export.out_path();
    ensure_directory(&outdir)?;

    let mut by_category: BTreeMap<&str, Vec<Vec<String>>> = BTreeMap::new();
    for r in rows {
        let cat = r.get(category_col).map(String::as_str).unwrap_or(UNCATEGORIZED);
        by_category.entry(cat).or_default().push(r.clone());
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut written = Vec::with_capacity(by_category.len());
    let ext = export.format.ext();

    for (category, cat_rows) in by_category {
        let stem = sanitize_filename(category, UNCATEGORIZED);
        let path = resolve_filename(&outdir, &stem, &mut seen, ext);

        let contents = to_export_string(headers, &cat_rows, export.include_headers, export.format);
        fs::write(&path, contents)?;
        written.push(path);
    }

    logf!("Export: {} category files → {}", written.len(), outdir.display());
    Ok(written)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Duplicate handling **only within this run**
pub fn resolve_filename(
    dir: &Path,
    stem: &str,                        // already sanitized, no extension
    seen_names: &mut HashMap<String, usize>,
    ext: &str,                         // "csv" | "tsv" | "json"
) -> PathBuf {
    // Case-insensitive filesystems would merge `Foo` and `FOO`.
    let count = seen_names.entry(stem.to_lowercase()).or_insert(0);

    // First occurrence: "<stem>.ext"
    // Subsequent:       "<stem> (N).ext" with N starting at 2
    let filename = if *count == 0 {
        format!("{stem}.{ext}")
    } else {
        format!("{stem} ({}).{ext}", *count + 1)
    };

    *count += 1;
    dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_stems_get_numbered() {
        let mut seen = HashMap::new();
        let dir = Path::new("out");
        assert_eq!(resolve_filename(dir, "REVOCATIONS", &mut seen, "csv"), dir.join("REVOCATIONS.csv"));
        assert_eq!(resolve_filename(dir, "REVOCATIONS", &mut seen, "csv"), dir.join("REVOCATIONS (2).csv"));
        assert_eq!(resolve_filename(dir, "revocations", &mut seen, "csv"), dir.join("revocations (3).csv"));
    }
}
