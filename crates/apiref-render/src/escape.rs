//! Text escaping and markup helpers

use crate::RenderContext;

/// Marker glyph some backends embed in default values; rendered as its
/// escape sequence so it survives as plain text.
const SENTINEL: char = '\u{25CF}';

/// Escape free text for insertion into markup.
///
/// The sentinel glyph becomes the literal `●`, and angle brackets
/// become entities so description text cannot inject elements.
pub fn escape_html(text: &str) -> String {
    text.replace(SENTINEL, "\\u25CF")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Split a dotted member title into per-segment spans so the details
/// pane can wrap long names at the dots.
///
/// `a.b.c` becomes `<span>a</span><span>.b</span><span>.c</span>`.
pub fn wrappable_title(title: &str) -> String {
    let mut out = String::new();
    for (index, part) in title.split('.').enumerate() {
        if index == 0 {
            out.push_str(&format!("<span>{part}</span>"));
        } else {
            out.push_str(&format!("<span>.{part}</span>"));
        }
    }
    out
}

/// Escape a return-type string and rewrite known class names into
/// reference links.
///
/// Candidates are tried in configured order at each position, so a
/// longer name listed before a shorter one wins (`Highcharts` over
/// `Chart`).
pub fn linkify_types(return_type: &str, ctx: &RenderContext) -> String {
    let escaped = escape_html(return_type);
    let prefix = ctx.type_link_prefix();

    let mut out = String::new();
    let mut rest = escaped.as_str();
    'outer: while !rest.is_empty() {
        for name in &ctx.linkable_types {
            if rest.starts_with(name.as_str()) {
                out.push_str(&format!("<a href=\"{prefix}{name}\">{name}</a>"));
                rest = &rest[name.len()..];
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }
    out
}
