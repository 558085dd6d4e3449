use anyhow::{anyhow, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::path::Path;

use crate::file_utils::FileManager;
use crate::formatter;
use crate::subtitle_processor::{SubtitleFile, BLOCKS_PER_BATCH};
use crate::translation_service::TranslationService;

// @module: Application controller for subtitle translation

/// Runtime configuration for one translation run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Resolved API key
    pub api_key: String,

    /// Model identifier for the chat-completion requests
    pub model: String,

    /// Source language (free-form name or ISO code)
    pub source_language: String,

    /// Target language (free-form name or ISO code)
    pub target_language: String,
}

/// Main application controller for subtitle translation
pub struct Controller {
    // @field: Run configuration
    config: RunConfig,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: RunConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(anyhow!("Cannot create controller without an API key"));
        }

        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// Run the translation workflow for one subtitle file
    ///
    /// Reads and chunks the input, translates each batch strictly in source
    /// order, repairs the accumulated output, and writes it to `output_path`
    /// (overwriting any existing file). The output file is only written on
    /// full success; a mid-run failure salvages the raw text of the batches
    /// that did complete into `<output>.partial`.
    pub async fn run(&self, input_file: &Path, output_path: &Path) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let subtitles = SubtitleFile::from_path(input_file)?;
        let batches = subtitles.split_into_batches(BLOCKS_PER_BATCH);

        info!(
            "Translating {} blocks in {} batches ({} -> {})",
            subtitles.block_count(),
            batches.len(),
            self.config.source_language,
            self.config.target_language
        );

        // Create a progress bar for translation tracking
        let progress_bar = ProgressBar::new(batches.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} batches ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let service =
            TranslationService::new(self.config.api_key.as_str(), self.config.model.as_str());

        // Sequential on purpose: order must be preserved and one request is
        // in flight at a time
        let mut accumulated = String::new();
        let total_batches = batches.len();

        for (index, batch) in batches.iter().enumerate() {
            let result = service
                .translate_batch(
                    &batch.request_text(),
                    &self.config.source_language,
                    &self.config.target_language,
                )
                .await;

            match result {
                Ok(translated) => {
                    accumulated.push_str(&translated);
                    accumulated.push('\n');
                    progress_bar.set_position((index + 1) as u64);
                }
                Err(e) => {
                    progress_bar.finish_and_clear();
                    self.salvage_partial_output(&accumulated, output_path);
                    return Err(e.context(format!(
                        "Translation failed on batch {} of {}",
                        index + 1,
                        total_batches
                    )));
                }
            }
        }

        progress_bar.finish_and_clear();

        let normalized = formatter::normalize(&accumulated);
        FileManager::write_to_file(output_path, &normalized)?;

        info!(
            "Translation completed in {}. Output saved to {:?}",
            Self::format_duration(start_time.elapsed()),
            output_path
        );

        Ok(())
    }

    /// Write the raw text of completed batches next to the intended output
    /// so a late-batch failure does not discard the earlier successes
    fn salvage_partial_output(&self, accumulated: &str, output_path: &Path) {
        if accumulated.is_empty() {
            return;
        }

        let partial_path = {
            let mut name = output_path.as_os_str().to_owned();
            name.push(".partial");
            std::path::PathBuf::from(name)
        };

        match FileManager::write_to_file(&partial_path, accumulated) {
            Ok(()) => warn!(
                "Saved raw output of completed batches to {:?}",
                partial_path
            ),
            Err(e) => warn!("Could not save partial output: {}", e),
        }
    }

    /// Format a duration for the completion message
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
