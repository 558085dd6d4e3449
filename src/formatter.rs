/*!
 * Normalization and repair of raw model output.
 *
 * Chat models asked for SRT frequently wrap their reply in markdown code
 * fences, drop the blank lines between cues, or pad extra ones in. This
 * module turns that raw concatenated output back into well-formed SRT
 * syntax. It is almost entirely pattern-driven text repair.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Markdown code-fence markers the model tends to wrap SRT output in,
/// longest first so the flavored variants are removed before the bare fence
const FENCE_MARKERS: [&str; 3] = ["```plaintext", "```srt", "```"];

/// Runs of three or more newlines, i.e. more than one blank line in a row
static EXTRA_BLANK_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// The start of a subtitle block: an index line followed by a timestamp
/// range line, preceded by the last character of the previous block. This
/// pattern is the authoritative definition of a block boundary, independent
/// of whatever separation the model actually emitted.
static BLOCK_BOUNDARY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S)\n(\d+\n\d{2}:\d{2}:\d{2},\d{3} --> )").unwrap());

/// Repair raw model output into well-formed subtitle text.
///
/// Steps, order-sensitive:
/// 1. Normalize all line-ending variants to `\n`.
/// 2. Strip markdown code-fence markers.
/// 3. Collapse runs of blank lines down to a single blank-line separator.
/// 4. Re-insert a blank line before every line that starts a new subtitle
///    block, per [`BLOCK_BOUNDARY_REGEX`].
/// 5. Trim leading/trailing blank lines and end with exactly one newline.
///
/// The function is idempotent: applying it twice yields the same result as
/// applying it once.
pub fn normalize(raw: &str) -> String {
    // Normalize line endings to Unix-style just in case
    let mut text = raw.replace("\r\n", "\n").replace('\r', "\n");

    // Remove the code-fence wrappers the model adds around the file
    for marker in FENCE_MARKERS {
        text = text.replace(marker, "");
    }

    // Collapse stray extra blank lines; single line breaks inside a cue and
    // true blank-line separators are left untouched
    let text = EXTRA_BLANK_REGEX.replace_all(&text, "\n\n");

    // Insert a blank line at each block boundary that lost its separator
    let text = BLOCK_BOUNDARY_REGEX.replace_all(&text, "${1}\n\n${2}");

    // The file must not start or end with blank lines, and must end with a
    // single trailing newline
    format!("{}\n", text.trim())
}
