//! Revision and vote list parsing.
//!
//! Both lists are captured as the markup the wiki renders for them. The
//! revision table lists newest first, one row per revision after a header
//! row. The vote list pairs each `span.printuser` with the element that
//! follows it.

use chrono::NaiveDateTime;
use scraper::{ElementRef, Html};
use serde::Serialize;

use crate::selector;

/// Timestamp rendering used by the revision table, e.g. `01 Dec 2014 12:00`.
const TIME_FORMAT: &str = "%d %b %Y %H:%M";

/// Minimum cells per revision row: number, flags, actions, size, user, time, comment.
const REVISION_CELLS: usize = 7;

/// One revision of a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Revision {
    /// Sequence number, 0 for the creation revision.
    pub number: u32,
    /// User who made the revision.
    pub user: String,
    /// When the revision was made.
    pub time: NaiveDateTime,
    /// Edit comment, possibly empty.
    pub comment: String,
}

/// One vote cast on a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Vote {
    /// Voter username.
    pub user: String,
    /// Vote value as rendered (`+` or `-`).
    pub vote: String,
}

/// Parse a revision table into revisions ordered oldest first.
///
/// A table without revision rows yields an empty list.
pub(crate) fn parse_history(raw: &str) -> Result<Vec<Revision>, String> {
    let fragment = Html::parse_fragment(raw);
    let mut revisions = fragment
        .select(selector!("tr"))
        .skip(1)
        .map(parse_revision)
        .collect::<Result<Vec<_>, _>>()?;
    revisions.reverse();

    if let Some(pair) = revisions.windows(2).find(|w| w[0].number >= w[1].number) {
        return Err(format!(
            "revision {} listed before revision {}",
            pair[0].number, pair[1].number
        ));
    }
    Ok(revisions)
}

fn parse_revision(row: ElementRef<'_>) -> Result<Revision, String> {
    let cells: Vec<String> = row
        .select(selector!("td"))
        .map(|td| td.text().collect::<String>())
        .collect();
    if cells.len() < REVISION_CELLS {
        return Err(format!(
            "revision row has {} cells, expected {REVISION_CELLS}",
            cells.len()
        ));
    }

    let number_text = cells[0].trim().trim_end_matches('.');
    let number = number_text
        .parse()
        .map_err(|_| format!("invalid revision number {number_text:?}"))?;
    let time_text = cells[5].trim();
    let time = NaiveDateTime::parse_from_str(time_text, TIME_FORMAT)
        .map_err(|e| format!("invalid revision time {time_text:?}: {e}"))?;

    Ok(Revision {
        number,
        user: cells[4].trim().to_owned(),
        time,
        comment: cells[6].trim().to_owned(),
    })
}

/// Parse a vote list in rendering order.
///
/// Votes are not merged by user: a user listed twice yields two records.
pub(crate) fn parse_votes(raw: &str) -> Result<Vec<Vote>, String> {
    let fragment = Html::parse_fragment(raw);
    fragment
        .select(selector!("span.printuser"))
        .map(|voter| {
            let user = voter.text().collect::<String>().trim().to_owned();
            let value = voter
                .next_siblings()
                .find_map(ElementRef::wrap)
                .ok_or_else(|| format!("no vote value after voter {user:?}"))?;
            Ok(Vote {
                vote: value.text().collect::<String>().trim().to_owned(),
                user,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_util::{history_html, votes_html};

    use super::*;

    #[test]
    fn test_history_is_reordered_oldest_first() {
        let raw = history_html(&[(0, "alice"), (1, "bob"), (2, "carol")]);

        let history = parse_history(&raw).unwrap();

        let users: Vec<&str> = history.iter().map(|r| r.user.as_str()).collect();
        assert_eq!(users, vec!["alice", "bob", "carol"]);
        assert_eq!(history[0].number, 0);
        assert_eq!(
            history[0].time,
            NaiveDateTime::parse_from_str("01 Dec 2014 12:00", TIME_FORMAT).unwrap()
        );
    }

    #[test]
    fn test_header_only_history_is_empty() {
        let raw = history_html(&[]);

        assert!(parse_history(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_history_rejects_out_of_order_numbers() {
        let raw = history_html(&[(0, "alice"), (2, "bob"), (1, "carol")]);

        let err = parse_history(&raw).unwrap_err();

        assert!(err.contains("revision 2 listed before revision 1"));
    }

    #[test]
    fn test_history_rejects_short_rows() {
        let raw = "<table><tr><td>rev.</td></tr><tr><td>0.</td><td>x</td></tr></table>";

        let err = parse_history(raw).unwrap_err();

        assert!(err.contains("2 cells"));
    }

    #[test]
    fn test_history_rejects_bad_time() {
        let raw = concat!(
            "<table><tr><td>rev.</td></tr>",
            "<tr><td>0.</td><td></td><td></td><td></td><td>alice</td><td>yesterday</td><td></td></tr>",
            "</table>",
        );

        assert!(parse_history(raw).unwrap_err().contains("yesterday"));
    }

    #[test]
    fn test_votes_keep_duplicate_users() {
        // Same user twice stays two records until the product decides otherwise.
        let raw = votes_html(&[("alice", "+"), ("bob", "-"), ("alice", "+")]);

        let votes = parse_votes(&raw).unwrap();

        assert_eq!(
            votes,
            vec![
                Vote { user: "alice".to_owned(), vote: "+".to_owned() },
                Vote { user: "bob".to_owned(), vote: "-".to_owned() },
                Vote { user: "alice".to_owned(), vote: "+".to_owned() },
            ]
        );
    }

    #[test]
    fn test_vote_without_value_is_rejected() {
        let raw = r#"<div><span class="printuser">alice</span></div>"#;

        assert!(parse_votes(raw).unwrap_err().contains("alice"));
    }
}
