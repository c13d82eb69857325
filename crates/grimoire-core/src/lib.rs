//! Role-filtered spellbook catalog: ingestion, visibility, aggregation, ranking and lookup.
//!
//! Every read path that walks spells goes through [`is_visible`]. The one exception is the
//! per-book average ([`compute_mean_quality`]), which is a bibliographic property of the book
//! and is computed over all of its spells.

mod aggregate;
mod error;
mod ingest;
mod model;
mod policy;
mod query;
mod rank;
mod render;
mod sink;

pub use aggregate::compute_mean_quality;
pub use error::{CatalogError, IngestError};
pub use ingest::{parse_spellbooks, parse_wizards};
pub use model::{Catalog, Spell, SpellEntry, Spellbook, Wizard};
pub use policy::{
    check_category, is_restricted_role, is_visible, offerable_categories, KNOWN_CATEGORIES,
    RESTRICTED_ROLE,
};
pub use query::{find_by_category, find_by_title};
pub use rank::{
    flatten_visible, rank_all, rank_spellbooks, spell_ranking_tie_breakers,
    spellbook_ranking_tie_breakers,
};
pub use render::{
    format_rate, spell_entry_lines, spellbook_rank_line, spellbook_summary_lines,
    wizard_banner_lines,
};
pub use sink::{write_lines, Sink, StreamSink};
