//! Asynchronous JSONL feed tailing with rotation detection
//!
//! The feed is an append-only JSONL file written by a producer. The reader
//! follows it line by line, polling when it reaches the end, and reopens the
//! file when it is rotated out from under us.

use std::io::SeekFrom;
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::time::sleep;

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

/// Where to pick up the feed when opening it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedPosition {
    /// Replay everything already in the file.
    Start,
    /// Only follow records appended after opening.
    End,
}

pub struct FeedReader {
    path: PathBuf,
    reader: Option<BufReader<File>>,
    inode: Option<u64>,
    position: FeedPosition,
    poll_interval: Duration,
}

impl FeedReader {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            reader: None,
            inode: None,
            position: FeedPosition::End,
            poll_interval: Duration::from_millis(100),
        }
    }

    /// Replay the whole file before following new appends.
    pub fn from_start(mut self) -> Self {
        self.position = FeedPosition::Start;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Open the feed file at the configured position.
    pub async fn open(&mut self) -> std::io::Result<()> {
        let file = File::open(&self.path).await?;

        #[cfg(unix)]
        {
            let metadata = file.metadata().await?;
            self.inode = Some(metadata.ino());
        }

        let mut reader = BufReader::new(file);
        if self.position == FeedPosition::End {
            reader.seek(SeekFrom::End(0)).await?;
        }
        self.reader = Some(reader);

        log::info!("📖 Following feed: {}", self.path.display());
        Ok(())
    }

    /// Next non-empty line, waiting for the producer when caught up.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        loop {
            if self.rotated().await? {
                log::info!("🔄 Feed rotated, reopening: {}", self.path.display());
                // Replay the fresh file from its beginning
                self.position = FeedPosition::Start;
                self.open().await?;
            }

            let reader = self.reader.as_mut().ok_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::NotFound, "feed not opened")
            })?;

            let mut line = String::new();
            if reader.read_line(&mut line).await? == 0 {
                // Caught up with the producer
                sleep(self.poll_interval).await;
                continue;
            }

            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    /// Whether the file was replaced since it was opened.
    async fn rotated(&self) -> std::io::Result<bool> {
        #[cfg(unix)]
        {
            let metadata = tokio::fs::metadata(&self.path).await?;
            Ok(self.inode.map_or(false, |old| old != metadata.ino()))
        }

        #[cfg(not(unix))]
        {
            // Size decrease is the best heuristic without inodes
            if let Some(ref reader) = self.reader {
                let pos = reader.get_ref().stream_position().await?;
                let metadata = tokio::fs::metadata(&self.path).await?;
                Ok(metadata.len() < pos)
            } else {
                Ok(false)
            }
        }
    }
}
