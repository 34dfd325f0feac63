pub mod new;
pub mod sync;

use crate::cli::{Cli, Commands};
use std::process::ExitCode;

/// 根据命令行分派到具体命令
pub async fn dispatch(cli: Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Some(Commands::New {
            src,
            dst,
            overwrite,
            output,
        }) => new::run(src, dst, output, *overwrite, cli.verbose),
        None => sync::run(&cli).await,
    }
}
