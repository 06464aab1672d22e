//! Title fitting: word wrapping and truncation, measured in characters.

const ELLIPSIS: &str = "...";

/// Fits `text` to `width` characters.
///
/// Text within the width is returned as is. Longer text is word-wrapped
/// (lines joined with `\n`) when `wrap` is set, otherwise cut to `width`
/// characters followed by an ellipsis.
pub fn fit_title(text: &str, width: usize, wrap: bool) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if wrap {
        wrap_words(text, width).join("\n")
    } else {
        truncate(text, width)
    }
}

/// Greedy word wrap. Breaks only at whitespace; a word longer than `width`
/// gets a line of its own and is never split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len == 0 {
            line.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= width {
            line.push(' ');
            line.push_str(word);
            line_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_len = word_len;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub fn truncate(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_width_untouched() {
        assert_eq!(fit_title("exactly twenty chars", 20, true), "exactly twenty chars");
        assert_eq!(fit_title("exactly twenty chars", 20, false), "exactly twenty chars");
        assert_eq!(fit_title("", 20, true), "");
    }

    #[test]
    fn test_wrap_at_word_boundaries() {
        let wrapped = fit_title("acetylsalicylic acid methyl ester", 20, true);
        assert_eq!(wrapped, "acetylsalicylic acid\nmethyl ester");
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 20, "line {line:?} too long");
        }
    }

    #[test]
    fn test_long_word_kept_whole() {
        let lines = wrap_words("a pneumonoultramicroscopic b", 10);
        assert_eq!(lines, vec!["a", "pneumonoultramicroscopic", "b"]);
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(fit_title("α-tocopherol acetate", 5, false), "α-toc...");
    }
}
