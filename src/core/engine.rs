use crate::config::SyncPair;
use crate::core::comparator::{ActionSummary, SyncAction};
use crate::core::error::Result;
use crate::core::reconciler::{reconcile_additions, reconcile_deletions, PassReport};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// 单个条目出错时的处理方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorPolicy {
    /// 第一个错误即中止当前 pass，之后的 pass 也不再执行
    #[default]
    FailFast,
    /// 记录错误并继续处理后面的条目（列目录失败仍然中止）
    Continue,
}

/// 同步选项
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// false 为 dry run，只报告不修改 Dst
    pub apply: bool,
    pub on_error: ErrorPolicy,
}

/// 同步事件，供展示层消费
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SyncEvent {
    /// 识别出一个动作（force 模式下已执行）
    Action(SyncAction),
    /// 两个 pass 都已结束，total 为 0 表示两个目录已一致
    #[serde(rename_all = "camelCase")]
    Completed { total_changes: usize },
}

/// 同步报告
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub apply: bool,
    pub additions: PassReport,
    pub deletions: PassReport,
    pub summary: ActionSummary,
    pub start_time: i64,
    pub end_time: i64,
}

impl SyncReport {
    pub fn total_changes(&self) -> usize {
        self.additions.count() + self.deletions.count()
    }

    pub fn is_in_sync(&self) -> bool {
        self.total_changes() == 0
    }

    /// 两个 pass 记录下来的错误（只在 `ErrorPolicy::Continue` 下出现）
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.additions
            .errors
            .iter()
            .chain(&self.deletions.errors)
            .map(String::as_str)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// 同步引擎
pub struct SyncEngine {
    pair: SyncPair,
    options: SyncOptions,
}

impl SyncEngine {
    pub fn new(pair: SyncPair) -> Self {
        Self {
            pair,
            options: SyncOptions::default(),
        }
    }

    pub fn with_options(pair: SyncPair, options: SyncOptions) -> Self {
        Self { pair, options }
    }

    pub fn pair(&self) -> &SyncPair {
        &self.pair
    }

    /// 先 additions 再 deletions
    ///
    /// additions 出错时直接返回，deletions 不会执行。
    pub async fn run(&self, events: Option<mpsc::Sender<SyncEvent>>) -> Result<SyncReport> {
        let start_time = chrono::Utc::now().timestamp();
        info!(
            "开始同步: {:?} -> {:?} ({})",
            self.pair.src(),
            self.pair.dst(),
            if self.options.apply { "force" } else { "dry run" }
        );

        let additions = reconcile_additions(&self.pair, &self.options, events.as_ref())
            .await
            .inspect_err(|e| error!("新增/更新失败: {}", e))?;
        let deletions = reconcile_deletions(&self.pair, &self.options, events.as_ref())
            .await
            .inspect_err(|e| error!("删除失败: {}", e))?;

        let summary =
            ActionSummary::from_actions(additions.actions.iter().chain(&deletions.actions));
        let report = SyncReport {
            apply: self.options.apply,
            additions,
            deletions,
            summary,
            start_time,
            end_time: chrono::Utc::now().timestamp(),
        };

        self.send_event(
            events.as_ref(),
            SyncEvent::Completed {
                total_changes: report.total_changes(),
            },
        )
        .await;

        info!("同步结束: {} 个变化", report.total_changes());
        Ok(report)
    }

    async fn send_event(&self, tx: Option<&mpsc::Sender<SyncEvent>>, event: SyncEvent) {
        if let Some(tx) = tx {
            if let Err(e) = tx.send(event).await {
                warn!("事件接收端已关闭，丢弃: {:?}", e.0);
            }
        }
    }
}
