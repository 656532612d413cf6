//! Normalization of raw description/title text
//!
//! Upstream search APIs return text with embedded HTML markup, HTML
//! entities, and editorial boilerplate (bylines, wire-service credits,
//! translation disclaimers). The pipeline here removes all of it and
//! collapses the remaining whitespace. Steps are order-sensitive: entities
//! are decoded before tag removal so that encoded markup (`&lt;b&gt;`) is
//! stripped like literal markup.

use regex::Regex;
use std::sync::OnceLock;

/// Fixed phrases deleted wherever they occur, before pattern-based cleanup.
///
/// These are syndication notices that appear verbatim in Naver-distributed
/// copy and carry no typeable content.
const BOILERPLATE_PHRASES: &[&str] = &[
    "이 기사는 자동 번역된 기사입니다.",
    "무단 전재 및 재배포 금지.",
    "무단 전재 및 재배포 금지",
];

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

/// Attribution and byline noise, matched in one combined pass:
/// bracketed segments, full-width bracketed segments, parenthesized
/// segments, email-shaped tokens, the `<name> 기자 =` byline marker, and
/// the two wire-service copyright suffixes.
fn noise_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"\[[^\]]*\]",
            r"|【[^】]*】",
            r"|\([^)]*\)",
            r"|[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+",
            r"|[가-힣]{2,5}\s*기자\s*=",
            r"|ⓒ\s?뉴스1",
            r"|ⓒ\s?연합뉴스",
        ))
        .expect("noise pattern is valid")
    })
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern is valid"))
}

/// Collapse every run of whitespace to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    whitespace_re().replace_all(text, " ").trim().to_string()
}

/// Clean raw upstream text down to plain prose.
///
/// Decodes HTML entities, strips tag spans, deletes known boilerplate
/// phrases, removes attribution noise, and collapses whitespace. The result
/// contains none of the removed constructs, so re-applying `normalize` to
/// its own output is a no-op.
///
/// Total over any input; unbalanced markup is removed best-effort.
///
/// ```
/// use tipo_text::normalize;
/// assert_eq!(normalize("<b>Hello</b> (서울=뉴스1) world"), "Hello world");
/// ```
pub fn normalize(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    let mut text = tag_re().replace_all(&decoded, "").into_owned();
    for phrase in BOILERPLATE_PHRASES {
        if text.contains(phrase) {
            text = text.replace(phrase, "");
        }
    }
    let text = noise_re().replace_all(&text, "");
    collapse_whitespace(&text)
}
