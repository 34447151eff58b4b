//! Script detection and HTML entity decoding

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn cyrillic() -> &'static Regex {
    static CYRILLIC: OnceLock<Regex> = OnceLock::new();
    CYRILLIC.get_or_init(|| Regex::new("[А-Яа-яЁё]").expect("valid cyrillic pattern"))
}

fn entity() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| {
        Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});")
            .expect("valid entity pattern")
    })
}

/// Whether the text contains Russian letters.
///
/// Script check only, not language identification.
pub fn is_russian(text: &str) -> bool {
    cyrillic().is_match(text)
}

/// Decode numeric and common named HTML entities. Unknown entities are kept.
pub fn decode_html_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    entity()
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            decode_entity(name)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    }
    if let Some(dec) = name.strip_prefix('#') {
        return dec.parse::<u32>().ok().and_then(char::from_u32);
    }

    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "laquo" => '«',
        "raquo" => '»',
        "mdash" => '—',
        "ndash" => '–',
        "hellip" => '…',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "bdquo" => '„',
        _ => return None,
    };
    Some(ch)
}
