//! 内容指纹 - BLAKE2b-512

use crate::core::error::{Result, SyncError};
use blake2::{Blake2b512, Digest};
use std::fmt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// 每次读取的块大小
const READ_CHUNK_SIZE: usize = 64 * 1024;

/// 文件内容指纹（小写十六进制的 BLAKE2b-512 摘要）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 计算内存数据的指纹
pub fn calculate_hash(data: &[u8]) -> Fingerprint {
    let mut hasher = Blake2b512::new();
    hasher.update(data);
    Fingerprint(hex::encode(hasher.finalize()))
}

/// 流式计算文件指纹，不会把整个文件读入内存
///
/// 只与文件内容有关，与文件名和元数据无关。
pub async fn calculate_file_hash(path: &Path) -> Result<Fingerprint> {
    let digest_err = |source| SyncError::Digest {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).await.map_err(digest_err)?;
    let mut hasher = Blake2b512::new();
    let mut buffer = vec![0u8; READ_CHUNK_SIZE];

    loop {
        let n = file.read(&mut buffer).await.map_err(digest_err)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(Fingerprint(hex::encode(hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hash_format() {
        let hash = calculate_hash(b"hello");

        assert_eq!(hash.as_str().len(), 128);
        assert!(hash
            .as_str()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_empty_input_known_digest() {
        let hash = calculate_hash(b"");
        assert_eq!(
            hash.as_str(),
            "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419\
             d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce"
        );
    }

    #[test]
    fn test_single_byte_difference() {
        assert_eq!(calculate_hash(b"hello"), calculate_hash(b"hello"));
        assert_ne!(calculate_hash(b"hello"), calculate_hash(b"hellp"));
    }

    #[tokio::test]
    async fn test_file_hash_matches_buffer_hash() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.bin");
        // 跨越多个读取块
        let data: Vec<u8> = (0..READ_CHUNK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();

        let from_file = calculate_file_hash(&path).await.unwrap();
        assert_eq!(from_file, calculate_hash(&data));
    }

    #[tokio::test]
    async fn test_hash_ignores_name() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.log");
        std::fs::write(&a, "same").unwrap();
        std::fs::write(&b, "same").unwrap();

        assert_eq!(
            calculate_file_hash(&a).await.unwrap(),
            calculate_file_hash(&b).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_digest_error() {
        let dir = TempDir::new().unwrap();
        let err = calculate_file_hash(&dir.path().join("nope"))
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::Digest { .. }));
    }
}
