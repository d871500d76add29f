//! Search query extraction from narration text
//!
//! Stock-footage searches work best with a handful of concrete nouns,
//! so each scene's text is reduced to its first few content words and
//! combined into progressively broader queries, ending with the full
//! phrase as a last resort.

use tracing::debug;

/// Spanish function words that never make useful footage queries,
/// stored accent-stripped to match normalized candidate words.
const STOP_ES: &[&str] = &[
    "a", "al", "algo", "algunas", "algunos", "ante", "antes", "aquel", "aquella", "aquellas",
    "aquellos", "aqui", "asi", "aun", "cada", "casi", "como", "con", "contra", "cual", "cuales",
    "cuando", "de", "del", "desde", "donde", "dos", "el", "ella", "ellas", "ellos", "en", "entre",
    "era", "eran", "es", "esa", "esas", "ese", "eso", "esos", "esta", "estaba", "estaban", "estas",
    "este", "esto", "estos", "fin", "fue", "fueron", "ha", "haber", "habia", "habian", "han",
    "hasta", "hay", "la", "las", "le", "les", "lo", "los", "mas", "me", "mi", "mis", "mucha",
    "muchos", "muy", "nada", "ni", "no", "nos", "nosotras", "nosotros", "o", "os", "otra", "otras",
    "otro", "otros", "para", "pero", "poco", "por", "porque", "que", "quien", "quienes", "se",
    "sin", "sobre", "su", "sus", "tal", "tambien", "tanto", "te", "tener", "tiene", "tienen",
    "toda", "todas", "todo", "todos", "tras", "tu", "tus", "un", "una", "uno", "unos", "vuestra",
    "vuestras", "vuestro", "vuestros", "y", "ya",
];

const MAX_CANDIDATES: usize = 30;

/// Fold accented Latin letters to their base letter.
fn strip_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Content words in order of first appearance: lowercased,
/// accent-stripped, longer than three letters, stopwords removed,
/// deduplicated.
fn candidate_words(text: &str) -> Vec<String> {
    let normalized = strip_accents(&text.to_lowercase());
    let mut seen: Vec<String> = Vec::new();
    for word in normalized.split(|c: char| !c.is_alphabetic()) {
        if word.chars().count() <= 3 || STOP_ES.contains(&word) {
            continue;
        }
        if !seen.iter().any(|w| w == word) {
            seen.push(word.to_string());
        }
        if seen.len() >= MAX_CANDIDATES {
            break;
        }
    }
    seen
}

/// The first `top_k` content words of the text, falling back to the
/// trimmed text itself when nothing qualifies.
pub fn visual_keywords(text: &str, top_k: usize) -> Vec<String> {
    let mut words = candidate_words(text);
    if words.is_empty() {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        return vec![trimmed.to_string()];
    }
    words.truncate(top_k);
    words
}

/// Build footage queries for a phrase: single keywords first, then
/// two- and three-word combinations, then the full phrase. Deduped,
/// capped at `max_out`.
pub fn build_queries(text: &str, top_k: usize, max_out: usize) -> Vec<String> {
    let keywords = visual_keywords(text, top_k);

    let mut queries: Vec<String> = keywords.clone();
    if keywords.len() >= 2 {
        queries.push(keywords[..2].join(" "));
    }
    if keywords.len() >= 3 {
        queries.push(keywords[..3].join(" "));
    }
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        queries.push(trimmed.to_string());
    }

    let mut out: Vec<String> = Vec::new();
    for query in queries {
        if !out.contains(&query) {
            out.push(query);
        }
        if out.len() >= max_out {
            break;
        }
    }
    debug!(?keywords, ?out, "footage queries");
    out
}
