use crate::model::{SpellEntry, Spellbook};
use crate::rank::flatten_visible;

/// First spellbook whose title equals `title` exactly (case-sensitive).
#[must_use]
pub fn find_by_title<'a>(spellbooks: &'a [Spellbook], title: &str) -> Option<&'a Spellbook> {
    spellbooks.iter().find(|book| book.title == title)
}

/// Spells with effect `category` that `role` may see, in book order then spell order.
///
/// A restricted role asking for a restricted effect gets an empty result, the same as a
/// query that matched nothing.
#[must_use]
pub fn find_by_category<'a>(
    spellbooks: &'a [Spellbook],
    category: &'a str,
    role: &'a str,
) -> Vec<SpellEntry<'a>> {
    let matches = flatten_visible(spellbooks, role)
        .filter(|entry| entry.spell.effect == category)
        .collect::<Vec<_>>();
    tracing::debug!(category, role, matches = matches.len(), "effect query");
    matches
}
