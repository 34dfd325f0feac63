//! 单向同步资料夹
//!
//! 只同步第一层文件，以 Src 为准向 Dst 新增、更新、删除文件，子目录不处理。

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod logging;

pub use crate::config::{SyncConfig, SyncPair};
pub use crate::core::{ErrorPolicy, SyncEngine, SyncError, SyncEvent, SyncOptions, SyncReport};
