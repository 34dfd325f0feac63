//! 单层目录的比对与执行
//!
//! 两个 pass 结构对称：
//! - additions: 遍历 Src 的普通文件，Dst 中缺少则 ADD，内容不同则 UPDATE
//! - deletions: 遍历 Dst 的普通文件，Src 中没有同名条目则 DELETE
//!
//! 目录、符号链接等非普通文件在两个 pass 中都直接跳过。条目按列目录的顺序逐个处理。

use crate::config::SyncPair;
use crate::core::comparator::{compare_files, ActionKind, FileRelation, SyncAction};
use crate::core::engine::{ErrorPolicy, SyncEvent, SyncOptions};
use crate::core::error::Result;
use crate::core::scanner::{probe, scan_top_level, DirEntry, EntryKind};
use crate::core::transfer::{copy_file, remove_file};
use serde::Serialize;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// pass 类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    Additions,
    Deletions,
}

/// 单个 pass 的结果
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    pub actions: Vec<SyncAction>,
    /// 仅在 `ErrorPolicy::Continue` 下记录
    pub errors: Vec<String>,
}

impl PassReport {
    pub fn count(&self) -> usize {
        self.actions.len()
    }
}

/// 以 Src 为准新增或覆盖 Dst 中的文件
pub async fn reconcile_additions(
    pair: &SyncPair,
    options: &SyncOptions,
    events: Option<&mpsc::Sender<SyncEvent>>,
) -> Result<PassReport> {
    run_pass(Pass::Additions, pair, options, events).await
}

/// 删除 Dst 中 Src 没有的文件
pub async fn reconcile_deletions(
    pair: &SyncPair,
    options: &SyncOptions,
    events: Option<&mpsc::Sender<SyncEvent>>,
) -> Result<PassReport> {
    run_pass(Pass::Deletions, pair, options, events).await
}

async fn run_pass(
    pass: Pass,
    pair: &SyncPair,
    options: &SyncOptions,
    events: Option<&mpsc::Sender<SyncEvent>>,
) -> Result<PassReport> {
    let (scan_dir, other_dir) = match pass {
        Pass::Additions => (pair.src(), pair.dst()),
        Pass::Deletions => (pair.dst(), pair.src()),
    };

    info!("开始 {:?}: {:?}", pass, scan_dir);
    let entries = scan_top_level(scan_dir).await?;

    let mut report = PassReport::default();
    for entry in &entries {
        if !entry.is_file() {
            debug!("跳过非普通文件: {:?} ({:?})", entry.path, entry.kind);
            continue;
        }

        let step = match pass {
            Pass::Additions => add_or_update(entry, other_dir, options.apply).await,
            Pass::Deletions => delete_orphan(entry, other_dir, options.apply).await,
        };

        match step {
            Ok(Some(action)) => {
                if let Some(tx) = events {
                    if tx.send(SyncEvent::Action(action.clone())).await.is_err() {
                        warn!("事件接收端已关闭，丢弃: {}", action);
                    }
                }
                report.actions.push(action);
            }
            Ok(None) => {}
            Err(e) => match options.on_error {
                ErrorPolicy::FailFast => return Err(e),
                ErrorPolicy::Continue => {
                    warn!("[{}] {}", e.kind(), e);
                    report.errors.push(e.to_string());
                }
            },
        }
    }

    info!(
        "{:?} 完成: {} 个动作, {} 个错误",
        pass,
        report.count(),
        report.errors.len()
    );
    Ok(report)
}

async fn add_or_update(
    entry: &DirEntry,
    dst_dir: &Path,
    apply: bool,
) -> Result<Option<SyncAction>> {
    let dest_path = dst_dir.join(&entry.name);

    let kind = match probe(&dest_path).await? {
        None => ActionKind::Add,
        // 符号链接等不跟随，也绝不写入：链接可能指回 Src
        Some(EntryKind::Other) => {
            debug!("Dst 中同名条目不是普通文件，跳过: {:?}", dest_path);
            return Ok(None);
        }
        // 同名目录照常比较，计算指纹时会报错
        Some(EntryKind::File | EntryKind::Dir) => {
            match compare_files(&entry.path, &dest_path).await? {
                FileRelation::Equal => {
                    debug!("文件相同，跳过: {:?}", entry.name);
                    return Ok(None);
                }
                FileRelation::Different => ActionKind::Update,
            }
        }
    };

    if apply {
        copy_file(&entry.path, &dest_path).await?;
    }

    Ok(Some(SyncAction::new(kind, entry.name.clone(), dest_path)))
}

async fn delete_orphan(
    entry: &DirEntry,
    src_dir: &Path,
    apply: bool,
) -> Result<Option<SyncAction>> {
    // Src 中有同名条目（哪怕是目录）就保留
    if probe(&src_dir.join(&entry.name)).await?.is_some() {
        return Ok(None);
    }

    if apply {
        remove_file(&entry.path).await?;
    }

    Ok(Some(SyncAction::new(
        ActionKind::Delete,
        entry.name.clone(),
        entry.path.clone(),
    )))
}
