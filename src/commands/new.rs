use crate::config::SyncConfig;
use crate::logging::{init_logging, LogConfig};
use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;
use tracing::info;

/// 生成配置文件
pub fn run(
    src: &Path,
    dst: &Path,
    output: &Path,
    overwrite: bool,
    verbose: u8,
) -> anyhow::Result<ExitCode> {
    let _guard = init_logging(&LogConfig::default().with_verbosity(verbose))?;

    let config = SyncConfig::write_new(output, src, dst, overwrite)
        .with_context(|| format!("无法生成配置文件 {}", output.display()))?;
    info!("已写入配置: {:?}", output);

    println!("Write {}", output.display());
    println!("{}", config);
    Ok(ExitCode::SUCCESS)
}
