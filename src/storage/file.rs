use std::path::{Path, PathBuf};

use crate::error::{Result, VisualizerError};

/// 导出时的默认文件名
pub const DEFAULT_EXPORT_FILE: &str = "integration-config.yaml";

/// 文本缓冲对应的磁盘文件：读取原文，或原样导出当前缓冲
pub struct BufferFile {
    path: PathBuf,
}

impl BufferFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取文件全文，不做任何转换
    pub fn read(&self) -> Result<String> {
        let content = std::fs::read_to_string(&self.path)?;
        tracing::debug!("已读取配置文件 {:?} ({} 字节)", self.path, content.len());
        Ok(content)
    }

    /// 按字节原样写出文本缓冲
    pub fn write(&self, text: &str) -> Result<()> {
        if self.path.file_name().is_none() {
            return Err(VisualizerError::Export(format!(
                "not a file path: {}",
                self.path.display()
            )));
        }

        // 确保父目录存在
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&self.path, text)?;
        tracing::info!("已导出配置到 {:?}", self.path);
        Ok(())
    }
}
