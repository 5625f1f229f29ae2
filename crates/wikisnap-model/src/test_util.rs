//! Markup builders for snapshot fixtures.

use std::fmt::Write;

use crate::session::DEFAULT_BASE_URL;

pub(crate) fn url(path: &str) -> String {
    format!("{DEFAULT_BASE_URL}/{path}")
}

/// A full wiki page with title, content region, and tag list.
pub(crate) fn page_html(title: &str, tags: &[&str], body: &str) -> String {
    page_with_breadcrumb(title, tags, body, &[])
}

pub(crate) fn page_with_breadcrumb(
    title: &str,
    tags: &[&str],
    body: &str,
    crumbs: &[&str],
) -> String {
    let crumbs: String = crumbs
        .iter()
        .map(|c| format!(r#"<a href="/{c}">{c}</a> &raquo; "#))
        .collect();
    let tags: String = tags
        .iter()
        .map(|t| format!(r#"<a href="/system:page-tags/tag/{t}">{t}</a>"#))
        .collect();
    format!(
        concat!(
            "<html><body>",
            r#"<div id="breadcrumbs">{}</div>"#,
            r#"<div id="page-title">{}</div>"#,
            r#"<div id="page-content">{}</div>"#,
            r#"<div class="page-tags"><span>{}</span></div>"#,
            "</body></html>",
        ),
        crumbs, title, body, tags
    )
}

/// Revision table for revisions given oldest first, rendered newest first.
pub(crate) fn history_html(revisions: &[(u32, &str)]) -> String {
    let mut html = String::from(
        "<table class=\"page-history\"><tr><td>rev.</td><td></td><td>flags</td>\
         <td>actions</td><td>by</td><td>date</td><td>comments</td></tr>",
    );
    for (number, user) in revisions.iter().rev() {
        let _ = write!(
            html,
            "<tr><td>{number}.</td><td></td><td>N</td><td>V S R</td>\
             <td><span class=\"printuser\"><a>{user}</a></span></td>\
             <td><span class=\"odate\">01 Dec 2014 12:00</span></td><td>edit</td></tr>"
        );
    }
    html.push_str("</table>");
    html
}

pub(crate) fn votes_html(votes: &[(&str, &str)]) -> String {
    let rows: String = votes
        .iter()
        .map(|(user, vote)| {
            format!(
                r#"<span class="printuser"><a>{user}</a></span> <span style="color:#777">{vote}</span><br/>"#
            )
        })
        .collect();
    format!("<div>{rows}</div>")
}
