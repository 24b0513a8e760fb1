use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

use super::cleaner::{CleanStats, Classified, CleanedText, TextCleaner};

/// A transcript file together with its cleaning result
#[derive(Debug, Clone)]
pub struct CleanedFile {
    pub path: PathBuf,
    pub cleaned: CleanedText,
}

/// Find transcript files under `input`. A plain file is returned as is;
/// a directory is walked for files whose extension is in `extensions`
/// (case-insensitive), sorted by path.
pub fn collect_text_files(input: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        anyhow::bail!("Input path does not exist: {:?}", input);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| has_extension(path, extensions))
        .collect();

    files.sort();
    info!("Found {} transcript files in {:?}", files.len(), input);

    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

/// A transcript file with the verdict of every unit, clean ones included
#[derive(Debug, Clone)]
pub struct ClassifiedFile {
    pub path: PathBuf,
    pub units: Vec<Classified>,
}

fn read_transcript(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read transcript: {:?}", path))
}

pub fn clean_file(path: &Path, cleaner: &TextCleaner) -> Result<CleanedText> {
    let text = read_transcript(path)?;
    Ok(cleaner.clean(&text))
}

/// Clean every file, skipping unreadable ones. Fails only when no file
/// could be read at all.
pub fn clean_files(
    files: &[PathBuf],
    cleaner: &TextCleaner,
) -> Result<(Vec<CleanedFile>, CleanStats)> {
    let mut results = Vec::with_capacity(files.len());
    let mut totals = CleanStats::default();

    for (idx, path) in files.iter().enumerate() {
        info!("Cleaning {}/{}: {:?}", idx + 1, files.len(), path);

        match clean_file(path, cleaner) {
            Ok(cleaned) => {
                totals.merge(&cleaned.stats);
                results.push(CleanedFile {
                    path: path.clone(),
                    cleaned,
                });
            }
            Err(e) => {
                warn!("Failed to clean {:?}: {:#}", path, e);
            }
        }
    }

    if results.is_empty() && !files.is_empty() {
        anyhow::bail!("None of the {} transcript files could be read", files.len());
    }

    Ok((results, totals))
}

/// Classify every file, skipping unreadable ones like `clean_files` does
pub fn classify_files(files: &[PathBuf], cleaner: &TextCleaner) -> Result<Vec<ClassifiedFile>> {
    let mut results = Vec::with_capacity(files.len());

    for (idx, path) in files.iter().enumerate() {
        info!("Classifying {}/{}: {:?}", idx + 1, files.len(), path);

        match read_transcript(path) {
            Ok(text) => results.push(ClassifiedFile {
                path: path.clone(),
                units: cleaner.classify_text(&text),
            }),
            Err(e) => {
                warn!("Failed to classify {:?}: {:#}", path, e);
            }
        }
    }

    if results.is_empty() && !files.is_empty() {
        anyhow::bail!("None of the {} transcript files could be read", files.len());
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn txt() -> Vec<String> {
        vec!["txt".to_string()]
    }

    #[test]
    fn test_collect_text_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.txt"), "Soup").unwrap();
        fs::write(dir.path().join("nested/a.TXT"), "Salad").unwrap();
        fs::write(dir.path().join("c.json"), "{}").unwrap();

        let files = collect_text_files(dir.path(), &txt()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(names, vec!["b.txt", "nested/a.TXT"]);
    }

    #[test]
    fn test_single_file_and_missing_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("menu.dat");
        fs::write(&file, "Soup").unwrap();

        assert_eq!(collect_text_files(&file, &txt()).unwrap(), vec![file]);
        assert!(collect_text_files(&dir.path().join("missing"), &txt()).is_err());
    }

    #[test]
    fn test_clean_files_totals() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("1.txt");
        let second = dir.path().join("2.txt");
        fs::write(&first, "Salad\n~~~~").unwrap();
        fs::write(&second, "Soup\naaaa\nBread").unwrap();

        let cleaner = TextCleaner::default();
        let (results, totals) = clean_files(&[first, second], &cleaner).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[1].cleaned.lines, vec!["Soup", "Bread"]);
        assert_eq!(totals.units, 5);
        assert_eq!(totals.rejected, 2);
    }

    #[test]
    fn test_clean_files_skips_unreadable() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, "Salad").unwrap();

        let files = vec![dir.path().join("gone.txt"), good];
        let (results, totals) = clean_files(&files, &TextCleaner::default()).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(totals.kept, 1);

        assert!(clean_files(&files[..1], &TextCleaner::default()).is_err());
    }

    #[test]
    fn test_classify_files_skips_unreadable() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, "Salad\n~~~~").unwrap();

        let files = vec![good.clone(), dir.path().join("gone.txt")];
        let results = classify_files(&files, &TextCleaner::default()).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].path, good);
        let verdicts: Vec<bool> = results[0].units.iter().map(|u| u.verdict.is_clean()).collect();
        assert_eq!(verdicts, vec![true, false]);

        assert!(classify_files(&files[1..], &TextCleaner::default()).is_err());
    }
}
