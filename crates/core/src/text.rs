//! Character-grid text fitting shared by hosts without a shaping engine.

use tzclock_protocol::{TextOverflow, TextWrap};

const ELLIPSIS: char = '…';

/// Fit `text` into at most `max_lines` lines of `per_line` characters.
///
/// Both limits are raised to at least one. When text is cut,
/// `TextOverflow::EllipsisEnd` replaces the last visible character with `…`.
pub fn fit_lines(
    text: &str,
    per_line: usize,
    max_lines: usize,
    wrap: TextWrap,
    overflow: TextOverflow,
) -> Vec<String> {
    let per_line = per_line.max(1);
    let max_lines = max_lines.max(1);

    let mut lines = match wrap {
        TextWrap::None => vec![text.to_owned()],
        TextWrap::WordChar => wrap_word_char(text, per_line),
    };

    let truncated = lines.len() > max_lines
        || lines.iter().take(max_lines).any(|l| l.chars().count() > per_line);
    lines.truncate(max_lines);
    for line in &mut lines {
        if line.chars().count() > per_line {
            *line = line.chars().take(per_line).collect();
        }
    }
    if truncated
        && overflow == TextOverflow::EllipsisEnd
        && let Some(last) = lines.last_mut()
    {
        let mut kept: String = last.chars().take(per_line - 1).collect();
        kept.push(ELLIPSIS);
        *last = kept;
    }
    lines
}

/// Greedy wrap after spaces and `/`; words longer than a line are split.
fn wrap_word_char(text: &str, per_line: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_inclusive([' ', '/']) {
        let word_len = word.chars().count();
        if !current.is_empty() && current.chars().count() + word_len > per_line {
            lines.push(current.trim_end().to_owned());
            current.clear();
        }
        if word_len <= per_line {
            current.push_str(word);
            continue;
        }
        let chars: Vec<char> = word.chars().collect();
        for chunk in chars.chunks(per_line) {
            if chunk.len() == per_line {
                lines.push(chunk.iter().collect());
            } else {
                current = chunk.iter().collect();
            }
        }
    }
    if !current.is_empty() {
        lines.push(current.trim_end().to_owned());
    }
    lines
}
