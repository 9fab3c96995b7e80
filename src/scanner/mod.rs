use crate::error::{QuoteError, Result};
use crate::reader::FileKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct QuoteFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

/// フォルダ内の見積ファイルを列挙
pub fn scan_folder(folder: &Path, recursive: bool) -> Result<Vec<QuoteFile>> {
    if !folder.is_dir() {
        return Err(QuoteError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        // Officeのロックファイル・隠しファイルは対象外
        if file_name.starts_with("~$") || file_name.starts_with('.') {
            continue;
        }

        let supported = path
            .extension()
            .map(|ext| FileKind::is_supported_extension(&ext.to_string_lossy()))
            .unwrap_or(false);

        if supported {
            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            files.push(QuoteFile {
                path: path.to_path_buf(),
                file_name,
                size,
            });
        }
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"), false);
        assert!(matches!(result, Err(QuoteError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_filters_and_sorts() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("c.xlsx")).unwrap().write_all(b"dummy").unwrap();
        File::create(dir.path().join("a.csv")).unwrap().write_all(b"a,b").unwrap();
        File::create(dir.path().join("b.TXT")).unwrap();
        File::create(dir.path().join("~$c.xlsx")).unwrap();
        File::create(dir.path().join("photo.png")).unwrap();
        File::create(dir.path().join("quote.pdf")).unwrap();

        let files = scan_folder(dir.path(), false).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.csv", "b.TXT", "c.xlsx"]);
        assert_eq!(files[0].size, 3);
    }

    #[test]
    fn test_scan_folder_recursive() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("vendor");
        fs::create_dir_all(&sub).unwrap();
        File::create(dir.path().join("top.csv")).unwrap();
        File::create(sub.join("nested.csv")).unwrap();

        assert_eq!(scan_folder(dir.path(), false).unwrap().len(), 1);
        assert_eq!(scan_folder(dir.path(), true).unwrap().len(), 2);
    }
}
