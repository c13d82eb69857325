use serde::{Deserialize, Serialize};

use crate::aggregate::compute_mean_quality;
use crate::policy::is_visible;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Spell {
    pub name: String,
    pub success_rate: f32,
    pub effect: String,
}

impl Spell {
    #[must_use]
    pub fn new(name: impl Into<String>, success_rate: f32, effect: impl Into<String>) -> Self {
        Self { name: name.into(), success_rate, effect: effect.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Spellbook {
    pub title: String,
    pub author: String,
    pub num_pages: u32,
    pub edition: u32,
    pub spells: Vec<Spell>,
    /// Mean success rate over every spell in the book, `None` for a book without spells.
    /// Computed once by [`Spellbook::new`]; call [`Spellbook::recompute_average`] after
    /// changing `spells`.
    pub avg_success_rate: Option<f32>,
}

impl Spellbook {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        num_pages: u32,
        edition: u32,
        spells: Vec<Spell>,
    ) -> Self {
        let mut book = Self {
            title: title.into(),
            author: author.into(),
            num_pages,
            edition,
            spells,
            avg_success_rate: None,
        };
        book.recompute_average();
        book
    }

    pub fn recompute_average(&mut self) {
        self.avg_success_rate = compute_mean_quality(&self.spells).ok();
    }

    /// Spells in stored order that `role` is allowed to see.
    pub fn visible_spells<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a Spell> + 'a {
        self.spells.iter().filter(move |spell| is_visible(role, &spell.effect))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Wizard {
    pub name: String,
    pub id: i64,
    pub password: String,
    /// Role tag used for visibility decisions.
    pub position_title: String,
    pub beard_length: f32,
}

impl Wizard {
    #[must_use]
    pub fn role(&self) -> &str {
        &self.position_title
    }
}

/// A spell paired with the title of the book it was found in.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SpellEntry<'a> {
    pub spellbook_title: &'a str,
    pub spell: &'a Spell,
}

/// Everything loaded for one session, in ingestion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub wizards: Vec<Wizard>,
    pub spellbooks: Vec<Spellbook>,
}

impl Catalog {
    /// Parse both flat-text sources into a catalog.
    ///
    /// # Errors
    /// Returns [`crate::CatalogError::Ingest`] when either source is malformed.
    pub fn from_sources(wizards: &str, spellbooks: &str) -> Result<Self, crate::CatalogError> {
        Ok(Self {
            wizards: crate::ingest::parse_wizards(wizards)?,
            spellbooks: crate::ingest::parse_spellbooks(spellbooks)?,
        })
    }

    #[must_use]
    pub fn total_spells(&self) -> usize {
        self.spellbooks.iter().map(|book| book.spells.len()).sum()
    }
}
