//! 配置模块 - 同步目录对与配置文件

use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 默认配置文件名
pub const CONFIG_FILE_NAME: &str = "one-way-sync.toml";

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件失败 {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("解析配置文件失败 {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("序列化配置失败: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("写入配置文件失败 {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("无法解析为绝对路径 {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not Found: {0}")]
    NotFound(PathBuf),

    #[error("不是资料夹: {0}")]
    NotDirectory(PathBuf),

    #[error("不是绝对路径: {0}")]
    NotAbsolute(PathBuf),

    #[error("文件已存在: {0} (使用 --overwrite 允许覆盖)")]
    AlreadyExists(PathBuf),
}

/// 同步目录对
///
/// 以 `src` 为准，只修改 `dst`，从不修改 `src`。每次运行构造一次，之后不再改变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPair {
    src: PathBuf,
    dst: PathBuf,
}

impl SyncPair {
    /// 不做检查直接构造
    pub fn new(src: impl Into<PathBuf>, dst: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// 构造并检查两个路径都是已存在的绝对路径目录
    pub fn validated(
        src: impl Into<PathBuf>,
        dst: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let pair = Self::new(src, dst);
        check_dir(&pair.src)?;
        check_dir(&pair.dst)?;
        Ok(pair)
    }

    pub fn src(&self) -> &Path {
        &self.src
    }

    pub fn dst(&self) -> &Path {
        &self.dst
    }
}

fn check_dir(dir: &Path) -> Result<(), ConfigError> {
    let metadata = fs::metadata(dir).map_err(|_| ConfigError::NotFound(dir.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(ConfigError::NotDirectory(dir.to_path_buf()));
    }
    if !dir.is_absolute() {
        return Err(ConfigError::NotAbsolute(dir.to_path_buf()));
    }
    Ok(())
}

/// 配置文件内容
///
/// ```toml
/// Src = '/path/to/src-dir'
/// Dst = '/path/to/dst-dir'
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(rename = "Src")]
    pub src: PathBuf,
    #[serde(rename = "Dst")]
    pub dst: PathBuf,
    /// 可选的日志配置
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<LogConfig>,
}

impl SyncConfig {
    /// 读取配置文件并检查目录
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SyncConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 检查 Src 和 Dst：存在、是目录、是绝对路径
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dir(&self.src)?;
        check_dir(&self.dst)
    }

    pub fn pair(&self) -> SyncPair {
        SyncPair::new(&self.src, &self.dst)
    }

    /// 生成新的配置文件，默认禁止覆盖已有文件
    pub fn write_new(
        path: &Path,
        src: &Path,
        dst: &Path,
        overwrite: bool,
    ) -> Result<Self, ConfigError> {
        let config = SyncConfig {
            src: absolute(src)?,
            dst: absolute(dst)?,
            log: None,
        };

        let content = toml::to_string(&config)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        // 不存在才创建，避免先检查后写入之间被别人抢先
        let mut options = OpenOptions::new();
        options.write(true);
        if overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }
        let mut file = options.open(path).map_err(|source| match source.kind() {
            io::ErrorKind::AlreadyExists => ConfigError::AlreadyExists(path.to_path_buf()),
            _ => write_err(source),
        })?;
        file.write_all(content.as_bytes()).map_err(write_err)?;

        Ok(config)
    }
}

fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path).map_err(|source| ConfigError::Resolve {
        path: path.to_path_buf(),
        source,
    })
}

impl fmt::Display for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SrcDir: {}", self.src.display())?;
        write!(f, "DstDir: {}", self.dst.display())
    }
}
