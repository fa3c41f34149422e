/// URL-safe slug transform: lowercase ASCII alphanumerics joined by single
/// hyphens. Accented Latin letters fold to their base letter ("Café" becomes
/// "cafe"), runs of anything else collapse to one hyphen, and the result
/// carries no leading or trailing hyphen.
///
/// `max_len` caps the output; truncation never leaves a dangling hyphen.
pub fn slugify(input: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(input.len().min(max_len));
    let mut pending_hyphen = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch.to_ascii_lowercase());
        } else if let Some(folded) = fold_diacritic(ch) {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push_str(folded);
        } else {
            pending_hyphen = true;
        }
        if out.len() >= max_len {
            break;
        }
    }
    while out.len() > max_len || out.ends_with('-') {
        out.pop();
    }
    out
}

/// ASCII folding for the Latin letters common in the site's locales; other
/// non-ASCII characters act as separators.
fn fold_diacritic(ch: char) -> Option<&'static str> {
    let ch = ch.to_lowercase().next().unwrap_or(ch);
    Some(match ch {
        'à'..='å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'č' => "c",
        'è'..='ë' | 'ē' | 'ė' | 'ę' => "e",
        'ì'..='ï' | 'ī' | 'į' => "i",
        'ñ' | 'ń' => "n",
        'ò'..='ö' | 'ø' | 'ō' => "o",
        'š' | 'ś' => "s",
        'ù'..='ü' | 'ū' => "u",
        'ý' | 'ÿ' => "y",
        'ž' | 'ź' | 'ż' => "z",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello, World!", 220), "hello-world");
        assert_eq!(slugify("Rust & Web Dev", 140), "rust-web-dev");
    }

    #[test]
    fn folds_common_diacritics() {
        assert_eq!(slugify("Café com Pão", 220), "cafe-com-pao");
        assert_eq!(slugify("São Paulo", 220), "sao-paulo");
        assert_eq!(slugify("ÀÉÎÕÜ", 220), "aeiou");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("a  --  b", 220), "a-b");
        assert_eq!(slugify("中文 title", 220), "title");
    }

    #[test]
    fn strips_edges() {
        assert_eq!(slugify("  trimmed  ", 220), "trimmed");
        assert_eq!(slugify("!!!", 220), "");
    }

    #[test]
    fn truncates_without_trailing_hyphen() {
        assert_eq!(slugify("ab cd", 3), "ab");
        assert!(slugify(&"word ".repeat(50), 140).len() <= 140);
        assert!(!slugify(&"word ".repeat(50), 140).ends_with('-'));
    }
}
