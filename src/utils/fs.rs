use crate::error::{AppError, AppResult};
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 递归列出目录下所有普通文件的绝对路径
///
/// 不跟随符号链接；结果按路径排序。
pub fn absolute_file_paths(directory: &Path) -> AppResult<Vec<PathBuf>> {
    let root = if directory.is_absolute() {
        directory.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| AppError::file_read_failed(directory.display().to_string(), e))?
            .join(directory)
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| root.display().to_string());
            AppError::file_read_failed(path, io::Error::from(e))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
