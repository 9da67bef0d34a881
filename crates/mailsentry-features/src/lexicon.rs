//! Fixed constant tables: the English stop-word set, the
//! dataset-artefact blocklist, and the urgency-keyword set used by the
//! linguistic synthetic feature.

use std::collections::HashSet;

/// Minimal English stop-word list (a practical subset of scikit-learn's
/// built-in `ENGLISH_STOP_WORDS`, since no general-purpose stop-word
/// crate exists in the workspace's dependency graph).
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "if", "so", "than", "then", "this", "that", "these",
    "those", "is", "are", "was", "were", "be", "been", "being", "am", "to", "of", "in", "on",
    "at", "by", "for", "with", "about", "against", "between", "into", "through", "during",
    "before", "after", "above", "below", "from", "up", "down", "out", "off", "over", "under",
    "again", "further", "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "too", "very", "can", "will", "just", "should", "now", "you", "your", "yours",
    "he", "him", "his", "she", "her", "hers", "it", "its", "they", "them", "their", "we", "us",
    "our", "i", "me", "my", "what", "which", "who", "whom", "as", "have", "has", "had", "having",
    "do", "does", "did", "doing",
];

/// Dataset-provenance artefacts that would otherwise let the classifier
/// learn dataset origin instead of phishing signal — carried verbatim
/// from `DATASET_ARTIFACTS`.
pub const DATASET_ARTIFACTS: &[&str] = &[
    "jose", "enron", "ect", "monkey", "org", "nazario", "corp", "houston", "usaa", "dow", "jones",
];

/// Phrases and single tokens scanned for (whole-word) by the linguistic
/// synthetic feature — carried verbatim from `URGENCY_KEYWORDS`.
pub const URGENCY_KEYWORDS: &[&str] = &[
    "urgent",
    "immediately",
    "asap",
    "as soon as possible",
    "hurry",
    "expire",
    "expiring",
    "expires",
    "expiration",
    "deadline",
    "action required",
    "verify",
    "verify now",
    "confirm",
    "update",
    "suspended",
    "suspend",
    "locked",
    "lock",
    "blocked",
    "block",
    "security",
    "security alert",
    "unauthorized",
    "fraud",
    "fraudulent",
    "verify account",
    "verify email",
    "click here",
    "click now",
    "limited time",
    "limited offer",
    "act now",
    "don't miss",
];

pub static ALL_STOPWORDS: once_cell::sync::Lazy<HashSet<&'static str>> =
    once_cell::sync::Lazy::new(|| ENGLISH_STOPWORDS.iter().copied().collect());

/// A curated, deterministic Russian→English phishing-vocabulary
/// substitution table. Not a machine-translation model — no offline
/// Russian↔English NMT crate is available — but enough to normalise the
/// vocabulary the urgency-keyword scan and TF-IDF vectoriser actually
/// look for. Entries are whole-word, case-insensitive, longest-phrase
/// first so multi-word phrases win over their component tokens.
pub const RU_EN_LEXICON: &[(&str, &str)] = &[
    ("подтвердите свой аккаунт", "verify your account"),
    ("срочные действия требуются", "action required"),
    ("ваш аккаунт заблокирован", "your account is suspended"),
    ("нажмите здесь", "click here"),
    ("ограниченное время", "limited time"),
    ("подтвердите личность", "confirm your identity"),
    ("служба безопасности", "security"),
    ("срочный", "urgent"),
    ("немедленно", "immediately"),
    ("перевод", "transfer"),
    ("подтвердите", "confirm"),
    ("подтверждение", "confirmation"),
    ("аккаунт", "account"),
    ("заблокирован", "suspended"),
    ("заблокирована", "suspended"),
    ("пароль", "password"),
    ("безопасность", "security"),
    ("мошенничество", "fraud"),
    ("предупреждение", "alert"),
    ("действие", "action"),
    ("требуется", "required"),
    ("нажмите", "click"),
];
