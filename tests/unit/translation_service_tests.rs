/*!
 * Tests for the translation service
 */

use srt_translator::translation_service::TranslationService;

/// Test that the instruction embeds both language names and the batch text
#[test]
fn test_build_instruction_withLanguageNames_shouldEmbedThem() {
    let batch_text = "1\n00:00:01,000 --> 00:00:02,000\nHej världen";

    let instruction = TranslationService::build_instruction(batch_text, "Swedish", "English");

    assert!(instruction.contains("from Swedish to English"));
    assert!(instruction.ends_with(batch_text));
}

/// Test that ISO codes are expanded before entering the instruction
#[test]
fn test_build_instruction_withIsoCodes_shouldExpandToNames() {
    let instruction = TranslationService::build_instruction("text", "sv", "en");

    assert!(instruction.contains("from Swedish to English"));
    assert!(!instruction.contains("from sv"));
}

/// Test that the instruction forbids commentary around the reply
#[test]
fn test_build_instruction_always_shouldDemandBareSrtReply() {
    let instruction = TranslationService::build_instruction("text", "Swedish", "English");

    assert!(instruction.contains("reply only with the translated srt file"));
    assert!(instruction.contains("no commentary"));
}

/// Test that the service reports the model it was built with
#[test]
fn test_service_model_withCustomModel_shouldReportIt() {
    let service = TranslationService::new("sk-test", "gpt-5-chat-latest");
    assert_eq!(service.model(), "gpt-5-chat-latest");
}

/// Test translating a batch against the live API
#[tokio::test]
#[ignore]
async fn test_translate_batch_withValidApiKey_shouldReturnText() {
    // This test should only run if an API key is provided
    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        return;
    }

    let service = TranslationService::new(api_key, "gpt-5-chat-latest");
    let translated = service
        .translate_batch(
            "1\n00:00:01,000 --> 00:00:02,000\nHej världen",
            "Swedish",
            "English",
        )
        .await
        .unwrap();

    assert!(!translated.is_empty());
}
