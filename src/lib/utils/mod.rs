use crate::types::LanguageCode;

/// HTML-escape text content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// HTML-escape attribute values (same rules as text for this codebase).
pub fn escape_attr(s: &str) -> String {
    escape_text(s)
}

/// Point a page-relative href at the site root when the page sits one folder
/// down in a language subfolder: a leading `./` becomes `../`. Other hrefs,
/// and every href on the default language, are returned unchanged.
pub fn localize_href(href: &str, lang: LanguageCode) -> String {
    if lang.is_default() {
        return href.to_string();
    }
    match href.strip_prefix("./") {
        Some(rest) => format!("../{rest}"),
        None => href.to_string(),
    }
}

#[cfg(test)]
mod tests;
