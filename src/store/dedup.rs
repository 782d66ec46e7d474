use std::collections::HashSet;

use crate::models::Article;

/// Articles from `incoming` whose URL does not appear in `existing`.
///
/// Order follows `incoming`. Duplicates inside `incoming` are not collapsed:
/// two entries sharing an unseen URL are both returned.
pub fn filter_new(existing: &[Article], incoming: &[Article]) -> Vec<Article> {
    let seen: HashSet<&str> = existing.iter().map(|a| a.url.as_str()).collect();

    incoming
        .iter()
        .filter(|a| !seen.contains(a.url.as_str()))
        .cloned()
        .collect()
}
