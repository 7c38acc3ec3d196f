// src/core/sanitize.rs

/// Entities that survive some proxies unescaped, plus the NBSP char itself.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace('\u{a0}', " ")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Normalised text, or `None` when nothing visible is left.
pub fn non_empty(s: &str) -> Option<String> {
    let t = normalize_ws(&normalize_entities(s));
    if t.is_empty() { None } else { Some(t) }
}

/// File stem from a free-text label (category names, carrier names).
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() || ch == ',' || ch == '/' { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

/// Leading run of digits parsed as a count ("1,234" → 1234). Blank or "N/A" → `None`.
pub fn parse_count(s: &str) -> Option<u32> {
    let digits: String = s
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(|c| *c != ',')
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_nbsp_and_ws() {
        assert_eq!(normalize_ws(&normalize_entities("  ACME&nbsp;\n  TRUCKING\u{a0} ")), "ACME TRUCKING");
        assert_eq!(non_empty(" &nbsp; "), None);
    }

    #[test]
    fn filenames() {
        assert_eq!(sanitize_filename("NAME CHANGES", "x"), "NAME_CHANGES");
        assert_eq!(sanitize_filename("CERTIFICATES, PERMITS AND LICENSES", "x"), "CERTIFICATES_PERMITS_AND_LICENSES");
        assert_eq!(sanitize_filename("***", "category"), "category");
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count("1,234"), Some(1234));
        assert_eq!(parse_count(" 7 "), Some(7));
        assert_eq!(parse_count("N/A"), None);
        assert_eq!(parse_count(""), None);
    }
}
