/*!
 * Tests for normalization and repair of raw model output
 */

use srt_translator::formatter::normalize;

/// Test that a code-fence wrapper is stripped
#[test]
fn test_normalize_withCodeFenceWrapper_shouldStripFence() {
    let raw = "```srt\n1\n00:00:01,000 --> 00:00:02,000\nHello\n```";
    assert_eq!(normalize(raw), "1\n00:00:01,000 --> 00:00:02,000\nHello\n");
}

/// Test that all fence variants are removed
#[test]
fn test_normalize_withFenceVariants_shouldRemoveAllOfThem() {
    let raw = "```plaintext\n1\n00:00:01,000 --> 00:00:02,000\nHello\n```\n```srt\n2\n00:00:03,000 --> 00:00:04,000\nWorld\n```";
    let result = normalize(raw);

    assert!(!result.contains("```"));
    assert!(!result.contains("plaintext"));
    assert!(result.contains("Hello"));
    assert!(result.contains("World"));
}

/// Test that a missing blank line between blocks is re-inserted
#[test]
fn test_normalize_withMissingSeparator_shouldInsertBlankLine() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\nHi\n2\n00:00:03,000 --> 00:00:04,000\nBye";
    assert_eq!(
        normalize(raw),
        "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n2\n00:00:03,000 --> 00:00:04,000\nBye\n"
    );
}

/// Test that Windows and old-Mac line endings are normalized
#[test]
fn test_normalize_withCarriageReturns_shouldUseUnixNewlines() {
    let raw = "1\r\n00:00:01,000 --> 00:00:02,000\r\nHello\rWorld";
    let result = normalize(raw);

    assert!(!result.contains('\r'));
    assert_eq!(result, "1\n00:00:01,000 --> 00:00:02,000\nHello\nWorld\n");
}

/// Test that runs of blank lines collapse to a single separator
#[test]
fn test_normalize_withExtraBlankLines_shouldCollapseToOneSeparator() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n\n\n2\n00:00:03,000 --> 00:00:04,000\nBye";
    assert_eq!(
        normalize(raw),
        "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n2\n00:00:03,000 --> 00:00:04,000\nBye\n"
    );
}

/// Test that leading/trailing blank lines are trimmed and exactly one
/// trailing newline is appended
#[test]
fn test_normalize_withSurroundingBlankLines_shouldTrimEdges() {
    let raw = "\n\n\n1\n00:00:01,000 --> 00:00:02,000\nHello\n\n\n";
    let result = normalize(raw);

    assert!(result.starts_with('1'));
    assert!(result.ends_with("Hello\n"));
    assert!(!result.ends_with("\n\n"));
}

/// Test that well-formed input passes through unchanged
#[test]
fn test_normalize_withWellFormedInput_shouldBeUnchanged() {
    let well_formed =
        "1\n00:00:01,000 --> 00:00:02,000\nHi\n\n2\n00:00:03,000 --> 00:00:04,000\nBye\n";
    assert_eq!(normalize(well_formed), well_formed);
}

/// Test that normalize is idempotent
#[test]
fn test_normalize_appliedTwice_shouldEqualSingleApplication() {
    let messy = "```srt\r\n1\r\n00:00:01,000 --> 00:00:02,000\r\nHi\n2\n00:00:03,000 --> 00:00:04,000\nBye\n\n\n\n3\n00:00:05,000 --> 00:00:06,000\nEnd\n```\n";

    let once = normalize(messy);
    let twice = normalize(&once);

    assert_eq!(once, twice);
}

/// Test repair of concatenated multi-batch output the way the driver
/// accumulates it: raw batch results joined by single newlines
#[test]
fn test_normalize_withConcatenatedBatchOutput_shouldSeparateAllBlocks() {
    let batch_one = "```srt\n1\n00:00:01,000 --> 00:00:02,000\nFirst\n2\n00:00:03,000 --> 00:00:04,000\nSecond\n```";
    let batch_two = "3\n00:00:05,000 --> 00:00:06,000\nThird";
    let accumulated = format!("{}\n{}\n", batch_one, batch_two);

    let result = normalize(&accumulated);

    assert_eq!(
        result,
        "1\n00:00:01,000 --> 00:00:02,000\nFirst\n\n\
         2\n00:00:03,000 --> 00:00:04,000\nSecond\n\n\
         3\n00:00:05,000 --> 00:00:06,000\nThird\n"
    );
}

/// Test that text lines starting with digits are not mistaken for block
/// boundaries unless a timestamp line follows
#[test]
fn test_normalize_withNumericTextLine_shouldNotSplitInsideBlock() {
    let raw = "1\n00:00:01,000 --> 00:00:02,000\nRoom\n101 is locked\n";
    assert_eq!(normalize(raw), "1\n00:00:01,000 --> 00:00:02,000\nRoom\n101 is locked\n");
}
