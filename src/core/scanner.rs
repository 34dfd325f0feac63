//! 目录扫描 - 只看第一层

use crate::core::error::{Result, SyncError};
use std::ffi::OsString;
use std::fs::FileType;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// 条目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// 普通文件
    File,
    /// 目录
    Dir,
    /// 符号链接、设备文件等
    Other,
}

impl From<FileType> for EntryKind {
    fn from(ft: FileType) -> Self {
        if ft.is_symlink() {
            EntryKind::Other
        } else if ft.is_dir() {
            EntryKind::Dir
        } else if ft.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }
}

/// 目录中的一个条目
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub name: OsString,
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// 列出目录的直接子条目，按文件名排序，不跟随符号链接
pub async fn scan_top_level(dir: &Path) -> Result<Vec<DirEntry>> {
    let root = dir.to_path_buf();
    let list_err = |source| SyncError::List {
        path: dir.to_path_buf(),
        source,
    };

    // 使用 spawn_blocking 避免阻塞 async runtime
    let entries = tokio::task::spawn_blocking(move || -> io::Result<Vec<DirEntry>> {
        if !std::fs::metadata(&root)?.is_dir() {
            return Err(io::Error::other("不是目录"));
        }

        WalkDir::new(&root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| -> io::Result<DirEntry> {
                let entry = entry.map_err(|e| {
                    let msg = e.to_string();
                    e.into_io_error().unwrap_or_else(|| io::Error::other(msg))
                })?;
                Ok(DirEntry {
                    name: entry.file_name().to_os_string(),
                    kind: entry.file_type().into(),
                    path: entry.into_path(),
                })
            })
            .collect()
    })
    .await
    .map_err(|e| list_err(io::Error::other(e)))?
    .map_err(list_err)?;

    debug!("扫描完成: {:?}, {} 个条目", dir, entries.len());
    Ok(entries)
}

/// 检查路径上是否有条目，不跟随符号链接
///
/// 不存在返回 `None`，其他错误原样上抛。
pub async fn probe(path: &Path) -> Result<Option<EntryKind>> {
    match fs::symlink_metadata(path).await {
        Ok(metadata) => Ok(Some(metadata.file_type().into())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SyncError::Stat {
            path: path.to_path_buf(),
            source,
        }),
    }
}
