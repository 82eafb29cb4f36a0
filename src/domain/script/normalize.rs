//! Text normalization and word tokenization.
//!
//! Every rule sees the same normalized view of a generated text, so
//! whitespace noise from the model (CRLF, double spaces, trailing blank
//! lines) never counts as a structural deviation.

/// Normalizes generated text.
///
/// - `\r\n` and lone `\r` become `\n`
/// - runs of whitespace inside a line collapse to one space
/// - every line is trimmed
/// - leading and trailing empty lines are dropped
///
/// Interior empty lines are kept. The function is idempotent.
pub fn normalize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let lines: Vec<String> = unified
        .split('\n')
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return String::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);

    lines[first..=last].join("\n")
}

/// A normalized script split into its non-empty lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    text: String,
    lines: Vec<String>,
}

impl Script {
    /// Normalizes raw text and indexes its non-empty lines.
    pub fn parse(raw: &str) -> Self {
        let text = normalize(raw);
        let lines = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { text, lines }
    }

    /// The normalized text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Non-empty lines in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn first_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }

    pub fn last_line(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

/// Characters that join two alphanumeric runs into one word ("по-русски", "д'Артаньян").
fn is_joiner(ch: char) -> bool {
    matches!(ch, '-' | '\'' | '’')
}

/// Alphanumeric in any script, plus combining diacritics (a decomposed "й" stays one word).
fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ('\u{0300}'..='\u{036F}').contains(&ch)
}

/// Splits a line into words: maximal runs of Unicode alphanumerics,
/// where a single joiner between two word characters does not break the run.
pub fn words(line: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut chars = line.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if is_word_char(ch) {
            if start.is_none() {
                start = Some(idx);
            }
            continue;
        }

        let joins = start.is_some()
            && is_joiner(ch)
            && chars.peek().is_some_and(|&(_, next)| is_word_char(next));
        if joins {
            continue;
        }

        if let Some(begin) = start.take() {
            words.push(&line[begin..idx]);
        }
    }

    if let Some(begin) = start {
        words.push(&line[begin..]);
    }

    words
}

/// True when `rest` would extend a word ending right before it,
/// either directly or through a joiner ("Петров-Водкин").
pub(crate) fn continues_word(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(ch) if is_word_char(ch) => true,
        Some(ch) if is_joiner(ch) => chars.next().is_some_and(is_word_char),
        _ => false,
    }
}

/// Number of words in a line.
pub fn word_count(line: &str) -> usize {
    words(line).len()
}
