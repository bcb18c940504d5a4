//! HTML rendering.
//!
//! Pages are plain templates compiled into the binary. Placeholders look like
//! `{{name}}` and are substituted in a single pass, so substituted text is
//! never scanned for further placeholders. Every value taken from a request
//! or from the backend goes through [`escape_html`] first.

use crate::backend::Binding;
use std::fmt::Write;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const LOGIN_TEMPLATE: &str = include_str!("../templates/login.html");
const MESSAGE_TEMPLATE: &str = include_str!("../templates/message.html");

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn render(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

pub fn login_page(failed: bool) -> String {
    let notice = if failed {
        invalid_credentials_fragment()
    } else {
        String::new()
    };
    render(LOGIN_TEMPLATE, &[("notice", &notice)])
}

pub fn invalid_credentials_fragment() -> String {
    format!(r#"<div class="error">{INVALID_CREDENTIALS}</div>"#)
}

pub fn index_page(username: &str, bindings: &[Binding]) -> String {
    render(
        INDEX_TEMPLATE,
        &[
            ("username", &escape_html(username)),
            ("bindings", &bindings_fragment(bindings, None)),
        ],
    )
}

/// The bindings table, optionally preceded by a notice.
pub fn bindings_fragment(bindings: &[Binding], notice: Option<&str>) -> String {
    let mut html = String::new();

    if let Some(notice) = notice {
        let _ = writeln!(html, r#"<div class="notice">{}</div>"#, escape_html(notice));
    }

    if bindings.is_empty() {
        html.push_str(r#"<p class="empty">No links yet.</p>"#);
        return html;
    }

    html.push_str("<table>\n<thead><tr><th>Full URL</th><th>Short link</th></tr></thead>\n<tbody>\n");
    for binding in bindings {
        let full_url = escape_html(&binding.full_url);
        let code = escape_html(&binding.short_code);
        let _ = writeln!(
            html,
            r#"<tr><td><a href="{full_url}">{full_url}</a></td><td><a href="/{code}">{code}</a></td></tr>"#
        );
    }
    html.push_str("</tbody>\n</table>");
    html
}

pub fn message_page(title: &str, message: &str) -> String {
    render(
        MESSAGE_TEMPLATE,
        &[
            ("title", &escape_html(title)),
            ("message", &escape_html(message)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(full_url: &str, short_code: &str) -> Binding {
        Binding {
            full_url: full_url.to_string(),
            short_code: short_code.to_string(),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape_html("https://例え.jp/パス"), "https://例え.jp/パス");
    }

    #[test]
    fn render_substitutes_once() {
        let out = render("[{{a}}|{{b}}|{{missing}}|{{", &[("a", "{{b}}"), ("b", "2")]);
        assert_eq!(out, "[{{b}}|2|{{missing}}|{{");
    }

    #[test]
    fn bindings_are_escaped() {
        let html = bindings_fragment(
            &[binding("https://a.com/?q=<script>alert(1)</script>", "66ccb499")],
            None,
        );
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"<a href="/66ccb499">66ccb499</a>"#));
    }

    #[test]
    fn bindings_keep_given_order() {
        let html = bindings_fragment(
            &[binding("https://a.com", "66ccb499"), binding("https://b.com", "dda34245")],
            None,
        );
        let a = html.find("https://a.com").unwrap();
        let b = html.find("https://b.com").unwrap();
        assert!(a < b);
    }

    #[test]
    fn empty_bindings_and_notice() {
        let html = bindings_fragment(&[], Some("Failed to parse URL"));
        assert!(html.contains(r#"<div class="notice">Failed to parse URL</div>"#));
        assert!(html.contains("No links yet."));
    }

    #[test]
    fn login_page_shows_notice_only_on_failure() {
        assert!(!login_page(false).contains(INVALID_CREDENTIALS));
        assert!(login_page(true).contains(INVALID_CREDENTIALS));
        assert!(!login_page(false).contains("{{notice}}"));
    }

    #[test]
    fn index_page_escapes_username() {
        let html = index_page("<admin>", &[]);
        assert!(html.contains("Signed in as &lt;admin&gt;"));
        assert!(!html.contains("{{"));
    }
}
