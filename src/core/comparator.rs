use crate::core::digest::calculate_file_hash;
use crate::core::error::Result;
use serde::Serialize;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 动作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKind {
    /// 目标中缺少，新增
    Add,
    /// 内容不同，覆盖
    Update,
    /// 源中没有，删除
    Delete,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Add => write!(f, "ADD"),
            ActionKind::Update => write!(f, "UPDATE"),
            ActionKind::Delete => write!(f, "DELETE"),
        }
    }
}

/// 同步动作
///
/// 只在一次 pass 中临时存在：dry run 时打印，force 时执行后打印。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncAction {
    pub kind: ActionKind,
    #[serde(serialize_with = "serialize_lossy")]
    pub name: OsString,
    pub dest_path: PathBuf,
}

impl SyncAction {
    pub fn new(kind: ActionKind, name: OsString, dest_path: PathBuf) -> Self {
        Self {
            kind,
            name,
            dest_path,
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.kind, self.dest_path.display())
    }
}

fn serialize_lossy<S>(name: &OsString, s: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_str(&name.to_string_lossy())
}

/// 文件比较结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRelation {
    /// 内容相同
    Equal,
    /// 内容不同
    Different,
}

/// 按内容指纹比较两个文件
pub async fn compare_files(source: &Path, dest: &Path) -> Result<FileRelation> {
    let src_sum = calculate_file_hash(source).await?;
    let dst_sum = calculate_file_hash(dest).await?;

    if src_sum == dst_sum {
        Ok(FileRelation::Equal)
    } else {
        debug!(
            "指纹不同: {:?} (src={}, dst={})",
            dest,
            &src_sum.as_str()[..16],
            &dst_sum.as_str()[..16]
        );
        Ok(FileRelation::Different)
    }
}

/// 动作统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSummary {
    pub add_count: usize,
    pub update_count: usize,
    pub delete_count: usize,
}

impl ActionSummary {
    /// 统计同步动作
    pub fn from_actions<'a>(actions: impl IntoIterator<Item = &'a SyncAction>) -> Self {
        let mut summary = Self::default();
        for action in actions {
            match action.kind {
                ActionKind::Add => summary.add_count += 1,
                ActionKind::Update => summary.update_count += 1,
                ActionKind::Delete => summary.delete_count += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.add_count + self.update_count + self.delete_count
    }
}
