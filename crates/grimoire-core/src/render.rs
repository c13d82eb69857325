//! Line-oriented text rendering. Rendering does not know where lines end up; callers push the
//! result through a [`crate::Sink`].

use crate::model::{SpellEntry, Spellbook, Wizard};

#[must_use]
pub fn format_rate(rate: Option<f32>) -> String {
    match rate {
        Some(rate) => rate.to_string(),
        None => "n/a".to_string(),
    }
}

/// Book header followed by every spell `role` may see.
#[must_use]
pub fn spellbook_summary_lines(book: &Spellbook, role: &str) -> Vec<String> {
    let mut lines = vec![
        format!("Spellbook: {}", book.title),
        format!("Author: {}", book.author),
        format!("Pages: {}", book.num_pages),
        format!("Edition: {}", book.edition),
        format!("Average Success Rate: {}", format_rate(book.avg_success_rate)),
        "Spells:".to_string(),
    ];
    lines.extend(
        book.visible_spells(role)
            .map(|spell| format!("{} {} {}", spell.name, spell.success_rate, spell.effect)),
    );
    lines
}

#[must_use]
pub fn spell_entry_lines(entry: &SpellEntry<'_>) -> [String; 2] {
    [
        format!("Spellbook: {}", entry.spellbook_title),
        format!("Spell: {} {} {}", entry.spell.name, entry.spell.success_rate, entry.spell.effect),
    ]
}

#[must_use]
pub fn spellbook_rank_line(book: &Spellbook) -> String {
    format!("{} {}", book.title, format_rate(book.avg_success_rate))
}

#[must_use]
pub fn wizard_banner_lines(wizard: &Wizard) -> Vec<String> {
    vec![
        format!("Welcome, {}!", wizard.name),
        format!("ID: {}", wizard.id),
        format!("Status: {}", wizard.position_title),
        format!("Beard Length: {}", wizard.beard_length),
    ]
}
