/// Greedy word wrap to at most `width` characters per line.
///
/// Whitespace runs collapse to single spaces. Hyphenated compounds may break after a hyphen
/// (`well-` / `known`). Pieces longer than `width` are split across lines, first filling whatever
/// room is left on the current line. Empty or all-whitespace input yields no lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        for (i, chunk) in hyphen_chunks(word).into_iter().enumerate() {
            let chunk_len = chunk.chars().count();
            // Only the first chunk of a word is separated by a space.
            let sep = usize::from(i == 0 && current_len > 0);

            if current_len + sep + chunk_len <= width {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(chunk);
                current_len += sep + chunk_len;
                continue;
            }

            if chunk_len <= width {
                lines.push(std::mem::take(&mut current));
                current.push_str(chunk);
                current_len = chunk_len;
                continue;
            }

            // Unwrappable piece: break it into width-sized chunks.
            let mut rest: Vec<char> = chunk.chars().collect();
            if current_len > 0 {
                let room = width.saturating_sub(current_len + sep);
                if room > 0 {
                    if sep == 1 {
                        current.push(' ');
                    }
                    current.extend(rest.drain(..room));
                }
                lines.push(std::mem::take(&mut current));
            }
            while rest.len() > width {
                lines.push(rest.drain(..width).collect());
            }
            current = rest.into_iter().collect();
            current_len = current.chars().count();
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

// Split `word` after each hyphen that joins an alphanumeric run to a following letter, keeping
// the hyphen on the left piece. Leading, trailing and doubled hyphens never split.
fn hyphen_chunks(word: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut start = 0usize;
    let mut prev: Option<char> = None;
    let mut iter = word.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        let next = iter.peek().map(|(_, n)| *n);
        if c == '-'
            && prev.is_some_and(char::is_alphanumeric)
            && next.is_some_and(char::is_alphabetic)
        {
            let end = i + c.len_utf8();
            chunks.push(&word[start..end]);
            start = end;
        }
        prev = Some(c);
    }
    chunks.push(&word[start..]);
    chunks
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
