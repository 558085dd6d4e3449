/*!
 * Per-batch translation against the chat-completion API.
 *
 * This module owns prompt construction and dispatch for one batch of
 * subtitle blocks. Failures are returned to the caller per batch; policy
 * (abort, salvage partial output) belongs to the driver.
 */

use anyhow::{anyhow, Result};
use log::debug;

use crate::language_utils;
use crate::providers::openai::{OpenAI, OpenAIRequest};

/// Sampling temperature for translation requests. Pinned to zero so a rerun
/// over the same input produces the same output.
const TRANSLATION_TEMPERATURE: f32 = 0.0;

/// Translation service for subtitle batches
pub struct TranslationService {
    /// Client for the chat-completions API
    client: OpenAI,

    /// Model identifier sent with every request
    model: String,
}

impl TranslationService {
    /// Create a new translation service against the public API endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: OpenAI::new(api_key, ""),
            model: model.into(),
        }
    }

    /// Create a translation service against a custom endpoint
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: OpenAI::new(api_key, endpoint),
            model: model.into(),
        }
    }

    /// The model this service requests
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the translation instruction for one batch
    ///
    /// A fixed natural-language instruction demanding an SRT-formatted reply
    /// with no extra commentary, with the batch text appended. Language
    /// arguments given as ISO codes are expanded to their English names.
    pub fn build_instruction(batch_text: &str, source_lang: &str, target_lang: &str) -> String {
        format!(
            "Translate this srt file from {} to {}, \
             reply only with the translated srt file and add no commentary or information:\n\n{}",
            language_utils::display_name(source_lang),
            language_utils::display_name(target_lang),
            batch_text
        )
    }

    /// Translate one batch and return the raw response text
    ///
    /// Sends a single request per batch - one user message, deterministic
    /// sampling - and makes no attempt to retry or repair here.
    pub async fn translate_batch(
        &self,
        batch_text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        let instruction = Self::build_instruction(batch_text, source_lang, target_lang);

        let request = OpenAIRequest::new(self.model.as_str())
            .add_message("user", instruction)
            .temperature(TRANSLATION_TEMPERATURE);

        let response = self.client.complete(request).await?;

        if response.choices.is_empty() {
            return Err(anyhow!("OpenAI API returned no completion choices"));
        }

        if let Some(usage) = &response.usage {
            debug!(
                "Batch translated: {} prompt tokens, {} completion tokens",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(OpenAI::extract_text_from_response(&response))
    }

    /// Issue a minimal request to verify credentials and connectivity
    pub async fn test_connection(&self) -> Result<()> {
        let request = OpenAIRequest::new(self.model.as_str())
            .add_message("user", "Hello")
            .max_tokens(10);

        self.client.complete(request).await?;
        Ok(())
    }
}
