//! On-disk staging of video uploads
//!
//! A video is written to a temporary file so it can be probed and streamed to storage without
//! being held in memory. The file is removed when the `StagingFile` is dropped, on every path.

use std::io;
use std::path::Path;

use tempfile::{Builder, NamedTempFile};
use tokio::io::AsyncWriteExt;

pub struct StagingFile {
    temp: NamedTempFile,
    writer: tokio::fs::File,
    size: u64,
}

impl StagingFile {
    /// Create an empty staging file inside `dir`
    pub fn create(dir: &Path, extension: &str) -> io::Result<Self> {
        let suffix = format!(".{}", extension);
        let temp = Builder::new()
            .prefix("tubely-upload-")
            .suffix(&suffix)
            .tempfile_in(dir)?;
        let writer = tokio::fs::File::from_std(temp.reopen()?);

        Ok(Self {
            temp,
            writer,
            size: 0,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Bytes written so far
    pub fn size(&self) -> u64 {
        self.size
    }

    pub async fn write_all(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.writer.write_all(chunk).await?;
        self.size += chunk.len() as u64;
        Ok(())
    }

    /// Flush buffered writes so readers of [`path`](Self::path) see the full content
    pub async fn finish(&mut self) -> io::Result<()> {
        self.writer.flush().await?;
        self.writer.sync_data().await
    }
}
