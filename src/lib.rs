/*!
 * # srt-translator
 *
 * A Rust library for translating SRT subtitle files using an LLM
 * chat-completion endpoint.
 *
 * ## Features
 *
 * - Split an SRT file into bounded-size batches of subtitle blocks
 * - Translate each batch through the OpenAI chat-completions API
 * - Repair the model output back into well-formed SRT syntax
 * - API-key resolution from CLI argument, environment, `.env` file,
 *   or a saved per-user config file (with provenance reporting)
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: API-key resolution and the persisted config record
 * - `subtitle_processor`: block splitting and batch grouping
 * - `translation_service`: per-batch prompt construction and dispatch
 * - `formatter`: normalization/repair of raw model output
 * - `file_utils`: file system operations
 * - `app_controller`: main application controller
 * - `language_utils`: ISO language code to display-name expansion
 * - `providers`: client implementation for the chat-completion API:
 *   - `providers::openai`: OpenAI API client
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod formatter;
pub mod language_utils;
pub mod providers;
pub mod subtitle_processor;
pub mod translation_service;

// Re-export main types for easier usage
pub use app_config::{ConfigRecord, ConfigStore, KeySource, ResolvedKey};
pub use app_controller::Controller;
pub use errors::{AppError, ProviderError};
pub use formatter::normalize;
pub use subtitle_processor::{Batch, SubtitleFile, BLOCKS_PER_BATCH};
pub use translation_service::TranslationService;
