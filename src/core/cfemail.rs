// src/core/cfemail.rs
//
// Cloudflare email protection: the address is a hex string whose first byte
// is an XOR key for every following byte.
//
//   <a class="__cf_email__" data-cfemail="543931...">[email&#160;protected]</a>
//   <a href="/cdn-cgi/l/email-protection#543931...">

use scraper::{Html, Selector};

const HREF_MARKER: &str = "/cdn-cgi/l/email-protection#";

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode one protected string. Bad hex, odd length or non-UTF-8 → `None`.
pub fn decode(hex: &str) -> Option<String> {
    let bytes = hex.trim().as_bytes();
    if bytes.len() < 2 || bytes.len() % 2 != 0 {
        return None;
    }

    let mut raw = Vec::with_capacity(bytes.len() / 2);
    for pair in bytes.chunks_exact(2) {
        raw.push(hex_val(pair[0])? << 4 | hex_val(pair[1])?);
    }

    let key = raw[0];
    let decoded: Vec<u8> = raw[1..].iter().map(|b| b ^ key).collect();
    String::from_utf8(decoded).ok().filter(|s| !s.is_empty())
}

/// First protected email found in the document, decoded.
pub fn find_protected_email(doc: &Html) -> Option<String> {
    if let Ok(sel) = Selector::parse("[data-cfemail]") {
        for el in doc.select(&sel) {
            if let Some(found) = el.value().attr("data-cfemail").and_then(decode) {
                return Some(found);
            }
        }
    }

    if let Ok(sel) = Selector::parse("a[href]") {
        for el in doc.select(&sel) {
            let Some(href) = el.value().attr("href") else { continue };
            if let Some(pos) = href.find(HREF_MARKER) {
                if let Some(found) = decode(&href[pos + HREF_MARKER.len()..]) {
                    return Some(found);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(key: u8, plain: &str) -> String {
        let mut out = format!("{key:02x}");
        for b in plain.bytes() {
            out.push_str(&format!("{:02x}", b ^ key));
        }
        out
    }

    #[test]
    fn decodes_known_value() {
        // key 0x42
        assert_eq!(decode(&encode(0x42, "ops@acme.com")).as_deref(), Some("ops@acme.com"));
        assert_eq!(decode(&encode(0x42, "ops@acme.com").to_uppercase()).as_deref(), Some("ops@acme.com"));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("4"), None);
        assert_eq!(decode("42a"), None);
        assert_eq!(decode("42zz"), None);
        // key only, nothing to decode
        assert_eq!(decode("42"), None);
    }

    #[test]
    fn finds_attribute_then_href() {
        let hex = encode(0x13, "dispatch@roadrunner.example");
        let attr = format!(r#"<p><a class="__cf_email__" data-cfemail="{hex}">[email&#160;protected]</a></p>"#);
        let doc = Html::parse_document(&attr);
        assert_eq!(find_protected_email(&doc).as_deref(), Some("dispatch@roadrunner.example"));

        let href = format!(r#"<p><a href="/cdn-cgi/l/email-protection#{hex}">mail</a></p>"#);
        let doc = Html::parse_document(&href);
        assert_eq!(find_protected_email(&doc).as_deref(), Some("dispatch@roadrunner.example"));

        let none = Html::parse_document("<p>no mail here</p>");
        assert_eq!(find_protected_email(&none), None);
    }
}
