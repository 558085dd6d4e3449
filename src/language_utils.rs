use isolang::Language;

/// Language utilities for the translation instruction
///
/// The CLI accepts languages as free-form names ("Swedish") or as ISO 639-1
/// (2-letter) / ISO 639-2 (3-letter) codes. Codes are expanded to their
/// English names before being embedded in the prompt; anything else is
/// passed through unchanged.
/// Resolve a CLI language argument to the name used in the prompt
pub fn display_name(arg: &str) -> String {
    let normalized = arg.trim();

    let code = normalized.to_lowercase();
    let language = match code.len() {
        2 => Language::from_639_1(&code),
        3 => Language::from_639_3(&code),
        _ => None,
    };

    match language {
        Some(lang) => lang.to_name().to_string(),
        None => normalized.to_string(),
    }
}
