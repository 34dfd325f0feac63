//! 文件传输 - 复制与删除

use crate::core::error::{Result, SyncError};
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::{self, AsyncWriteExt};
use tracing::debug;

/// 把 `from` 的全部内容复制到 `to`
///
/// 目标文件不存在则创建，存在则截断。返回前会把数据刷到磁盘，
/// 之后对 `to` 计算指纹得到的一定是新内容。两个文件句柄只在本次调用内持有。
pub async fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    let copy_err = |source| SyncError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    let mut reader = File::open(from).await.map_err(copy_err)?;
    let mut writer = File::create(to).await.map_err(copy_err)?;

    let bytes = io::copy(&mut reader, &mut writer).await.map_err(copy_err)?;
    writer.flush().await.map_err(copy_err)?;
    writer.sync_all().await.map_err(copy_err)?;

    debug!("复制完成: {:?} -> {:?} ({} 字节)", from, to, bytes);
    Ok(bytes)
}

/// 删除单个文件
///
/// 只对上一次列目录时确认存在的文件调用，文件已不存在同样视为错误。
pub async fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).await.map_err(|source| SyncError::Delete {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("删除完成: {:?}", path);
    Ok(())
}
