use crate::analysis::hashtags::count_first_seen;
use crate::Post;

pub const TOP_THEMES: usize = 15;
pub const MIN_THEME_FREQUENCY: usize = 3;
const MIN_WORD_CHARS: usize = 4;

const STOPWORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is", "are",
    "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "cant", "dont", "wont", "this", "that", "these",
    "those", "a", "an", "you", "your", "if", "how", "why", "what", "when", "where",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

pub fn clean_text(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut cleaned = String::with_capacity(text.len());
    let mut idx = 0usize;

    while idx < chars.len() {
        let ch = chars[idx];

        if (ch == '#' || ch == '@') && chars.get(idx + 1).is_some_and(|next| is_word_char(*next)) {
            idx += 1;
            while idx < chars.len() && is_word_char(chars[idx]) {
                idx += 1;
            }
            continue;
        }

        if starts_link(&chars[idx..]) {
            while idx < chars.len() && !chars[idx].is_whitespace() {
                idx += 1;
            }
            continue;
        }

        if is_word_char(ch) || ch.is_whitespace() {
            cleaned.extend(ch.to_lowercase());
        } else {
            cleaned.push(' ');
        }
        idx += 1;
    }

    cleaned
}

pub fn topic_themes(posts: &[Post]) -> Vec<String> {
    let words: Vec<String> = posts
        .iter()
        .filter(|post| !post.text.is_empty())
        .flat_map(|post| {
            clean_text(&post.text)
                .split_whitespace()
                .filter(|word| word.chars().count() >= MIN_WORD_CHARS && !is_stopword(word))
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    count_first_seen(words.iter())
        .into_iter()
        .filter(|(_, frequency)| *frequency >= MIN_THEME_FREQUENCY)
        .take(TOP_THEMES)
        .map(|(word, _)| word)
        .collect()
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn starts_link(rest: &[char]) -> bool {
    rest.len() > 4
        && rest[..4].iter().collect::<String>() == "http"
        && !rest[4].is_whitespace()
}
