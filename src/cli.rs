use crate::config::CONFIG_FILE_NAME;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// 单向同步资料夹
///
/// 只同步第一层文件，不同步子目录。以 Src 为准，向 Dst 添加文件，
/// 或更新/删除 Dst 中的文件。配置文件内容如下：
///
///     Src = '/path/to/src-dir'
///     Dst = '/path/to/dst-dir'
#[derive(Debug, Parser)]
#[command(name = "one-way-sync", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 配置文件路径
    #[arg(default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// 默认仅打印将要发生变化的文件，只有使用该参数才会实际执行
    #[arg(long)]
    pub force: bool,

    /// 单个文件出错时继续处理其他文件（默认遇到错误立即停止）
    #[arg(long)]
    pub continue_on_error: bool,

    /// 以 JSON 输出同步报告
    #[arg(long)]
    pub json: bool,

    /// 日志详细程度（-v info, -vv debug, -vvv trace）
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// 生成新的配置文件
    #[command(after_help = "示例:\n    one-way-sync new '.' 'D:/temp'")]
    New {
        /// 源目录
        src: PathBuf,
        /// 目标目录
        dst: PathBuf,
        /// 默认禁止覆盖文件，使用该参数则允许覆盖
        #[arg(long)]
        overwrite: bool,
        /// 配置文件写入位置
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}
