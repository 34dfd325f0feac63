use crate::cli::Cli;
use crate::config::SyncConfig;
use crate::core::{ErrorPolicy, SyncEngine, SyncEvent, SyncOptions, SyncReport};
use crate::logging::init_logging;
use anyhow::Context;
use std::process::ExitCode;
use tokio::sync::mpsc;
use tracing::warn;

/// 事件通道容量
const EVENT_BUFFER: usize = 64;

const IN_SYNC_MESSAGE: &str = "两个资料夹内的文件相同 (本程序不处理子目录)";

/// 执行同步（默认 dry run）
pub async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = SyncConfig::load(&cli.config)
        .with_context(|| format!("加载配置失败: {}", cli.config.display()))?;
    let log_config = config.log.clone().unwrap_or_default().with_verbosity(cli.verbose);
    let _guard = init_logging(&log_config)?;

    let options = SyncOptions {
        apply: cli.force,
        on_error: if cli.continue_on_error {
            ErrorPolicy::Continue
        } else {
            ErrorPolicy::FailFast
        },
    };
    let engine = SyncEngine::with_options(config.pair(), options);

    let report = if cli.json {
        let report = engine.run(None).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        report
    } else {
        print_header(&config, cli.force);
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let printer = tokio::spawn(print_events(rx));
        let result = engine.run(Some(tx)).await;
        // 发送端已随 run 结束释放，打印任务会自行退出
        printer.await?;
        let report = result?;
        print_errors(&report);
        println!();
        report
    };

    if report.has_errors() {
        warn!("同步完成，但有 {} 个文件出错", report.errors().count());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_header(config: &SyncConfig, force: bool) {
    if !force {
        println!("\n现在是 **Dry Run** 模式，仅打印将要发生的变化。");
        println!("只有使用 --force 参数才会实际执行。");
    }
    println!("\n[Source] {}", config.src.display());
    println!("[Target] {}\n", config.dst.display());
}

async fn print_events(mut rx: mpsc::Receiver<SyncEvent>) {
    while let Some(event) = rx.recv().await {
        if let Some(line) = render_event(&event) {
            println!("{}", line);
        }
    }
}

/// 事件在终端上的输出，无需输出时返回 `None`
fn render_event(event: &SyncEvent) -> Option<String> {
    match event {
        SyncEvent::Action(action) => Some(action.to_string()),
        SyncEvent::Completed { total_changes: 0 } => Some(IN_SYNC_MESSAGE.to_string()),
        SyncEvent::Completed { .. } => None,
    }
}

fn print_errors(report: &SyncReport) {
    for err in report.errors() {
        eprintln!("ERROR => {}", err);
    }
}
