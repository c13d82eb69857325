use std::cmp::Ordering;

use crate::model::{SpellEntry, Spellbook};
use crate::policy::is_visible;

impl SpellEntry<'_> {
    fn cmp_by_rate(lhs: &Self, rhs: &Self) -> Ordering {
        rhs.spell.success_rate.total_cmp(&lhs.spell.success_rate)
    }
}

fn cmp_by_average(lhs: &&Spellbook, rhs: &&Spellbook) -> Ordering {
    match (lhs.avg_success_rate, rhs.avg_success_rate) {
        (Some(lhs), Some(rhs)) => rhs.total_cmp(&lhs),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[must_use]
pub fn spell_ranking_tie_breakers() -> Vec<String> {
    vec![
        "success_rate desc".to_string(),
        "spellbook input order asc".to_string(),
        "spell input order asc".to_string(),
    ]
}

#[must_use]
pub fn spellbook_ranking_tie_breakers() -> Vec<String> {
    vec![
        "avg_success_rate desc".to_string(),
        "spellbooks without spells last".to_string(),
        "spellbook input order asc".to_string(),
    ]
}

/// Every spell `role` may see, book by book, each book's spells in stored order.
pub fn flatten_visible<'a>(
    spellbooks: &'a [Spellbook],
    role: &'a str,
) -> impl Iterator<Item = SpellEntry<'a>> + 'a {
    spellbooks.iter().flat_map(move |book| {
        book.spells
            .iter()
            .filter(move |spell| is_visible(role, &spell.effect))
            .map(move |spell| SpellEntry { spellbook_title: &book.title, spell })
    })
}

/// Rank every spell visible to `role` by success rate, highest first.
///
/// The sort is stable: spells with equal rates keep the order of the flattening pass
/// (book order, then spell order within the book).
#[must_use]
pub fn rank_all<'a>(spellbooks: &'a [Spellbook], role: &'a str) -> Vec<SpellEntry<'a>> {
    let mut ranked = flatten_visible(spellbooks, role).collect::<Vec<_>>();
    ranked.sort_by(SpellEntry::cmp_by_rate);
    tracing::debug!(role, ranked = ranked.len(), "ranked visible spells");
    ranked
}

/// Order spellbooks by their stored average, highest first; books without spells go last.
///
/// Averages cover every spell in a book, so this ordering is the same for every role.
#[must_use]
pub fn rank_spellbooks(spellbooks: &[Spellbook]) -> Vec<&Spellbook> {
    let mut ranked = spellbooks.iter().collect::<Vec<_>>();
    ranked.sort_by(cmp_by_average);
    ranked
}
