//! Documentation text of properties.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::syntax::ast::{Member, MemberKind};

static PARAM_TAG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@param\s+(\S+)\s*(.*)$").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Documentation of a member: its own comment verbatim, or for a record
/// component the matching `@param` paragraph of the record's comment.
pub fn member_documentation(member: &Member, owner_doc: Option<&str>) -> Option<String> {
    if let Some(doc) = &member.doc {
        return Some(doc.clone());
    }
    match member.kind {
        MemberKind::Component => owner_doc.and_then(|doc| param_paragraph(doc, &member.name)),
        MemberKind::Field => None,
    }
}

/// `@param name` paragraph of a doc comment, whitespace collapsed.
pub fn param_paragraph(doc: &str, name: &str) -> Option<String> {
    let mut paragraph: Option<Vec<&str>> = None;
    for line in comment_lines(doc) {
        if let Some(collected) = paragraph.as_mut() {
            if line.starts_with('@') {
                break;
            }
            collected.push(line);
            continue;
        }
        if let Some(caps) = PARAM_TAG_REGEX.captures(line) {
            if &caps[1] == name {
                paragraph = Some(vec![caps.get(2).map_or("", |m| m.as_str())]);
            }
        }
    }

    let text = paragraph?.join(" ");
    let collapsed = WHITESPACE_REGEX.replace_all(text.trim(), " ").into_owned();
    (!collapsed.is_empty()).then_some(collapsed)
}

/// Lines of a `/** */` comment without delimiters or the `*` gutter.
fn comment_lines(doc: &str) -> Vec<&str> {
    let body = doc.trim();
    let body = body.strip_prefix("/**").unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);
    body.lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').map(str::trim).unwrap_or(line)
        })
        .collect()
}
