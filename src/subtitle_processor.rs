use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;

// @module: Subtitle block splitting and batch grouping

/// Number of subtitle blocks grouped into one translation request.
/// An empirical bound on per-request payload size, not adaptive to
/// token count or block length.
pub const BLOCKS_PER_BATCH: usize = 50;

/// A group of consecutive subtitle blocks sent as one translation request
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// The blocks of this batch, in source order
    pub blocks: Vec<String>,
}

impl Batch {
    /// Number of blocks in this batch
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether this batch holds no blocks
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The request payload: blocks concatenated with single newlines.
    /// The blank-line separators are restored later by the formatter.
    pub fn request_text(&self) -> String {
        self.blocks.join("\n")
    }
}

/// A subtitle file split into opaque blocks
///
/// A block is one subtitle cue's text (index line, timestamp line, text
/// lines), delimited by a blank line in the source. Blocks are kept as
/// opaque text; no structured parse into index/timestamp/text happens here.
#[derive(Debug)]
pub struct SubtitleFile {
    /// Source filename
    pub source_file: PathBuf,

    /// Subtitle blocks in source order
    pub blocks: Vec<String>,
}

impl SubtitleFile {
    /// Read a subtitle file and split it into blocks
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        Ok(Self {
            source_file: path.as_ref().to_path_buf(),
            blocks: Self::split_blocks(&content),
        })
    }

    /// Build a subtitle file from in-memory content
    pub fn from_content<P: AsRef<Path>>(source_file: P, content: &str) -> Self {
        Self {
            source_file: source_file.as_ref().to_path_buf(),
            blocks: Self::split_blocks(content),
        }
    }

    /// Split raw subtitle text on the blank-line block delimiter
    ///
    /// Unix-style line endings are assumed after trimming. A file with no
    /// blank lines yields exactly one block; an empty file yields a single
    /// empty block.
    fn split_blocks(content: &str) -> Vec<String> {
        content
            .trim()
            .split("\n\n")
            .map(|block| block.to_string())
            .collect()
    }

    /// Number of blocks in the file
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Group consecutive blocks into fixed-size batches
    ///
    /// Batches are non-overlapping, cover the whole file in original order,
    /// and their count equals ceil(block_count / blocks_per_batch). The last
    /// batch may be short.
    pub fn split_into_batches(&self, blocks_per_batch: usize) -> Vec<Batch> {
        let effective_size = blocks_per_batch.max(1);

        let batches: Vec<Batch> = self
            .blocks
            .chunks(effective_size)
            .map(|window| Batch {
                blocks: window.to_vec(),
            })
            .collect();

        // Batching must never drop or reorder blocks
        let total_batched: usize = batches.iter().map(|b| b.len()).sum();
        debug_assert_eq!(total_batched, self.blocks.len());

        debug!(
            "Split {} blocks into {} batches of up to {}",
            self.blocks.len(),
            batches.len(),
            effective_size
        );

        batches
    }
}
