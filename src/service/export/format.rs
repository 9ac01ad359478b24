//! Small text helpers shared by the renderers.

/// Human-readable duration for a fetch time given in milliseconds.
///
/// Non-numeric input (an ISO timestamp, say) is returned unchanged, and an
/// empty string renders as an em dash.
pub fn format_fetch_time(fetch_time: &str) -> String {
    match leading_float(fetch_time) {
        Some(ms) if ms < 1000.0 => format!("{} ms", ms.round() as i64),
        Some(ms) => format!("{:.2} s", ms / 1000.0),
        None if fetch_time.is_empty() => "—".to_string(),
        None => fetch_time.to_string(),
    }
}

// Longest numeric prefix, mirroring how loosely typed timings are read.
fn leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '-' | '+' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }
    text[..end].parse().ok()
}

pub fn format_ms(value: f64) -> String {
    format!("{:.2} ms", value)
}

/// Cut `text` to at most `width` characters, ending in "..." when cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Greedy word wrap; words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = if line.is_empty() { 0 } else { 1 } + word.chars().count();
        if line.chars().count() + needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Center `text` in a field of `width` characters.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_time_formats() {
        assert_eq!(format_fetch_time("850.4"), "850 ms");
        assert_eq!(format_fetch_time("12346"), "12.35 s");
        assert_eq!(format_fetch_time(""), "—");
        assert_eq!(format_fetch_time("soon"), "soon");
        // leading digits of an ISO timestamp read as a number
        assert_eq!(format_fetch_time("2024-05-01T10:00:00Z"), "2.02 s");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer sentence", 10), "a longe...");
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
        assert!(wrap("", 10).is_empty());
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn center_pads_both_sides() {
        assert_eq!(center("ab", 6), "  ab  ");
        assert_eq!(center("abc", 2), "abc");
    }
}
