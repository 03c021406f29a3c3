//! Keyword frequency extraction over customer review text.
//!
//! Tokens are runs of Latin or Cyrillic letters, lower-cased. English and
//! Russian stop words are dropped, as are tokens shorter than
//! [`MIN_TOKEN_CHARS`] characters. A token must occur at least
//! [`MIN_OCCURRENCES`] times across the whole corpus to be reported.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Minimum token length in characters (not bytes).
pub const MIN_TOKEN_CHARS: usize = 3;

/// Minimum corpus-wide occurrence count.
pub const MIN_OCCURRENCES: u32 = 3;

/// Maximum number of keywords returned.
pub const MAX_KEYWORDS: usize = 50;

const STOP_WORDS_EN: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "was", "were", "are", "but", "not", "you",
    "your", "have", "has", "had", "its", "it's", "they", "them", "there", "their", "from",
    "she", "her", "his", "him", "our", "out", "all", "any", "can", "did", "does", "too",
    "just", "also", "than", "then", "what", "when", "which", "who", "will",
    "would", "could", "should", "about", "after", "before", "been", "being", "into", "more",
    "most", "some", "such", "only", "own", "same", "other", "because", "while", "here",
    "these", "those", "over", "under", "again", "once", "how", "why", "where", "each",
];

const STOP_WORDS_RU: &[&str] = &[
    "и", "в", "во", "не", "что", "он", "на", "я", "с", "со", "как", "а", "то", "все", "она",
    "так", "его", "но", "да", "ты", "к", "у", "же", "вы", "за", "бы", "по", "только", "ее",
    "мне", "было", "вот", "от", "меня", "еще", "нет", "о", "из", "ему", "теперь", "когда",
    "даже", "ну", "ли", "если", "уже", "или", "ни", "быть", "был", "него", "до", "вас",
    "нибудь", "опять", "уж", "вам", "ведь", "там", "потом", "себя", "ничего", "ей", "может",
    "они", "тут", "где", "есть", "надо", "ней", "для", "мы", "тебя", "их", "чем", "была",
    "сам", "чтоб", "без", "будто", "чего", "раз", "тоже", "себе", "под", "будет", "тогда",
    "кто", "этот", "того", "потому", "этого", "какой", "совсем", "ним", "здесь", "этом",
    "один", "почти", "мой", "тем", "чтобы", "нее", "были", "куда", "зачем", "всех", "никогда",
    "можно", "при", "наконец", "два", "об", "другой", "хоть", "после", "над", "больше",
    "тот", "через", "эти", "нас", "про", "всего", "них", "какая", "много", "разве", "три",
    "эту", "моя", "впрочем", "хорошо", "свою", "этой", "перед", "иногда", "лучше", "чуть",
    "том", "нельзя", "такой", "им", "более", "всегда", "конечно", "всю", "между", "очень",
    "это",
];

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zа-яё]+").expect("token regex is valid"));

/// A keyword and the number of times it occurs in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u32,
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS_EN.contains(&token) || STOP_WORDS_RU.contains(&token)
}

/// Count every surviving token (stop words and short tokens removed)
/// across the corpus, without the occurrence threshold.
pub fn count_tokens<S: AsRef<str>>(texts: &[S]) -> HashMap<String, u32> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for text in texts {
        let lowered = text.as_ref().to_lowercase();
        for token in TOKEN_RE.find_iter(&lowered).map(|m| m.as_str()) {
            if token.chars().count() < MIN_TOKEN_CHARS || is_stop_word(token) {
                continue;
            }
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Extract the top keywords from a corpus of review texts.
///
/// Ordered by count descending, ties broken alphabetically.
pub fn extract_keywords<S: AsRef<str>>(texts: &[S]) -> Vec<KeywordCount> {
    let mut keywords: Vec<KeywordCount> = count_tokens(texts)
        .into_iter()
        .filter(|(_, count)| *count >= MIN_OCCURRENCES)
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect();

    keywords.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
    keywords.truncate(MAX_KEYWORDS);
    keywords
}
