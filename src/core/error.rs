//! 同步核心的错误类型

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 同步过程中的 I/O 错误
///
/// 所有错误在发生处都不可恢复：当前 pass 立即中止并把错误交给调用方。
/// 底层的 `io::Error` 作为 source 保留，便于诊断。
#[derive(Debug, Error)]
pub enum SyncError {
    /// 计算指纹时无法读取文件
    #[error("计算指纹失败 {path}: {source}")]
    Digest {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 源文件不可读或目标文件不可写
    #[error("复制文件失败 {from} -> {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 无法删除目标文件
    #[error("删除文件失败 {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 无法列出目录
    #[error("列出目录失败 {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 无法获取条目信息（不存在除外）
    #[error("读取文件信息失败 {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SyncError {
    /// 错误类别，用于日志
    pub fn kind(&self) -> &'static str {
        match self {
            SyncError::Digest { .. } => "digest",
            SyncError::Copy { .. } => "copy",
            SyncError::Delete { .. } => "delete",
            SyncError::List { .. } => "list",
            SyncError::Stat { .. } => "stat",
        }
    }

    /// 底层 I/O 错误
    pub fn io_error(&self) -> &io::Error {
        match self {
            SyncError::Digest { source, .. }
            | SyncError::Copy { source, .. }
            | SyncError::Delete { source, .. }
            | SyncError::List { source, .. }
            | SyncError::Stat { source, .. } => source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
