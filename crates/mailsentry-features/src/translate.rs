//! Translator (C6, §4.6): language detection plus a deterministic,
//! offline Russian→English normalisation.

use crate::lexicon::RU_EN_LEXICON;

/// Input shorter than this many non-whitespace characters skips language
/// detection entirely and is treated as English (§4.6).
const MIN_CHARS_FOR_DETECTION: usize = 10;

/// A text-translation capability, mirroring the `Classifier` trait's
/// capability-seam pattern on the ML side: one offline implementation is
/// provided, but callers depend on the trait, not the concrete type.
pub trait TranslationEngine: Send + Sync {
    /// Translates Russian input to English; returns other input
    /// unchanged. Must never fail — on any internal error, return the
    /// original text.
    fn translate(&self, text: &str) -> String;
}

fn non_whitespace_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Detects `ru` vs `en` (defaulting to `en` for anything else or for
/// inputs below [`MIN_CHARS_FOR_DETECTION`]).
pub fn detect_language(text: &str) -> &'static str {
    if text.is_empty() || non_whitespace_chars(text) < MIN_CHARS_FOR_DETECTION {
        return "en";
    }
    match whatlang::detect_lang(text) {
        Some(whatlang::Lang::Rus) => "ru",
        _ => "en",
    }
}

/// Lexicon-substitution translator: replaces known Russian phishing
/// vocabulary with its English equivalent, longest phrases first, and
/// leaves unmatched spans untouched. Deterministic by construction — no
/// model, no stochastic decoding, matching §4.6's reproducibility
/// requirement.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconTranslator;

impl TranslationEngine for LexiconTranslator {
    fn translate(&self, text: &str) -> String {
        let mut entries: Vec<&(&str, &str)> = RU_EN_LEXICON.iter().collect();
        entries.sort_by_key(|(ru, _)| std::cmp::Reverse(ru.chars().count()));

        let mut result = text.to_string();
        for (ru, en) in entries {
            if result.to_lowercase().contains(&ru.to_lowercase()) {
                result = replace_case_insensitive(&result, ru, en);
            }
        }
        result
    }
}

fn replace_case_insensitive(haystack: &str, needle: &str, replacement: &str) -> String {
    let lower_haystack = haystack.to_lowercase();
    let lower_needle = needle.to_lowercase();
    let mut result = String::new();
    let mut rest = haystack;
    let mut rest_lower: &str = &lower_haystack;
    while let Some(idx) = rest_lower.find(lower_needle.as_str()) {
        result.push_str(&rest[..idx]);
        result.push_str(replacement);
        rest = &rest[idx + needle.len()..];
        rest_lower = &rest_lower[idx + lower_needle.len()..];
    }
    result.push_str(rest);
    result
}

/// `translate_text(text) -> text` (§4.6): detects language, translates
/// Russian input via `engine`, returns everything else unchanged. Any
/// panic-free engine failure degrades to the original text by
/// construction, since [`TranslationEngine::translate`] cannot fail.
pub fn translate_text(text: &str, engine: &dyn TranslationEngine) -> String {
    if text.is_empty() {
        return String::new();
    }
    if detect_language(text) == "ru" {
        engine.translate(text)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_defaults_to_english() {
        assert_eq!(detect_language("привет"), "en");
    }

    #[test]
    fn detects_russian_for_longer_input() {
        assert_eq!(detect_language("Ваш аккаунт будет заблокирован, подтвердите личность немедленно"), "ru");
    }

    #[test]
    fn non_russian_input_passes_through_unchanged() {
        let translated = translate_text("meeting tomorrow at 10, see you then", &LexiconTranslator);
        assert_eq!(translated, "meeting tomorrow at 10, see you then");
    }

    #[test]
    fn translates_known_russian_phrases() {
        let translated = translate_text(
            "Срочно подтвердите свой аккаунт или он будет заблокирован навсегда",
            &LexiconTranslator,
        );
        assert!(translated.to_lowercase().contains("verify your account"));
        assert!(translated.to_lowercase().contains("urgent"));
    }

    #[test]
    fn unknown_words_pass_through_untouched() {
        let translated = LexiconTranslator.translate("это неизвестное слово");
        assert!(translated.contains("неизвестное"));
    }
}
