use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use grimoire_core::{
    spell_entry_lines, spell_ranking_tie_breakers, spellbook_rank_line,
    spellbook_ranking_tie_breakers, spellbook_summary_lines, write_lines, Sink, Spell, SpellEntry,
    Spellbook, StreamSink, Wizard,
};
use serde_json::{json, Value};

use crate::config::OutputFormat;

const CLI_CONTRACT_VERSION: &str = "cli.v1";

/// The result of one catalog command, ready to render for a role.
#[derive(Debug, Clone)]
pub enum Report<'a> {
    AllSpellbooks(Vec<&'a Spellbook>),
    TitleMatch { title: &'a str, found: Option<&'a Spellbook> },
    EffectMatches { effect: &'a str, entries: Vec<SpellEntry<'a>> },
    SpellRanking(Vec<SpellEntry<'a>>),
    SpellbookRanking(Vec<&'a Spellbook>),
}

impl Report<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Report::AllSpellbooks(_) => "display",
            Report::TitleMatch { .. } => "find_title",
            Report::EffectMatches { .. } => "find_effect",
            Report::SpellRanking(_) => "rank_spells",
            Report::SpellbookRanking(_) => "rank_books",
        }
    }

    pub fn human_lines(&self, role: &str) -> Vec<String> {
        match self {
            Report::AllSpellbooks(books) => books
                .iter()
                .flat_map(|book| spellbook_summary_lines(book, role))
                .collect(),
            Report::TitleMatch { found: Some(book), .. } => spellbook_summary_lines(book, role),
            Report::TitleMatch { found: None, .. } => {
                vec!["No spellbook found with that name.".to_string()]
            }
            Report::EffectMatches { entries, .. } | Report::SpellRanking(entries) => {
                entries.iter().flat_map(spell_entry_lines).collect()
            }
            Report::SpellbookRanking(books) => {
                books.iter().map(|book| spellbook_rank_line(book)).collect()
            }
        }
    }

    pub fn to_json(&self, wizard: &Wizard) -> Value {
        let role = wizard.role();
        let mut body = json!({
            "kind": self.kind(),
            "session": {
                "name": wizard.name,
                "id": wizard.id,
                "position_title": wizard.position_title,
            },
        });
        let payload = match self {
            Report::AllSpellbooks(books) => {
                let spellbooks =
                    books.iter().map(|book| spellbook_json(book, role)).collect::<Vec<_>>();
                json!({ "spellbooks": spellbooks })
            }
            Report::TitleMatch { title, found } => json!({
                "title": title,
                "spellbook": found.map(|book| spellbook_json(book, role)),
            }),
            Report::EffectMatches { effect, entries } => json!({
                "effect": effect,
                "spells": entries_json(entries),
            }),
            Report::SpellRanking(entries) => json!({
                "tie_breakers": spell_ranking_tie_breakers(),
                "spells": entries_json(entries),
            }),
            Report::SpellbookRanking(books) => json!({
                "tie_breakers": spellbook_ranking_tie_breakers(),
                "spellbooks": books
                    .iter()
                    .enumerate()
                    .map(|(index, book)| json!({
                        "rank": index + 1,
                        "title": book.title,
                        "avg_success_rate": book.avg_success_rate,
                    }))
                    .collect::<Vec<_>>(),
            }),
        };
        if let (Value::Object(body), Value::Object(payload)) = (&mut body, payload) {
            body.extend(payload);
        }
        with_contract_version(body)
    }
}

fn spellbook_json(book: &Spellbook, role: &str) -> Value {
    json!({
        "title": book.title,
        "author": book.author,
        "num_pages": book.num_pages,
        "edition": book.edition,
        "avg_success_rate": book.avg_success_rate,
        "spells": book.visible_spells(role).collect::<Vec<&Spell>>(),
    })
}

fn entries_json(entries: &[SpellEntry<'_>]) -> Vec<Value> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            json!({
                "rank": index + 1,
                "spellbook_title": entry.spellbook_title,
                "spell": entry.spell,
            })
        })
        .collect()
}

pub fn with_contract_version(value: Value) -> Value {
    match value {
        Value::Object(mut object) => {
            object.insert(
                "contract_version".to_string(),
                Value::String(CLI_CONTRACT_VERSION.to_string()),
            );
            Value::Object(object)
        }
        other => json!({
            "contract_version": CLI_CONTRACT_VERSION,
            "payload": other
        }),
    }
}

/// Render `report` in `format` and push it through `sink`.
pub fn deliver(
    report: &Report<'_>,
    wizard: &Wizard,
    format: OutputFormat,
    sink: &mut dyn Sink,
) -> Result<()> {
    let lines = match format {
        OutputFormat::Human => report.human_lines(wizard.role()),
        OutputFormat::Json => {
            let document = serde_json::to_string_pretty(&report.to_json(wizard))?;
            document.lines().map(str::to_string).collect()
        }
    };
    write_lines(sink, &lines).context("failed to write report")?;
    tracing::info!(kind = report.kind(), lines = lines.len(), "report delivered");
    Ok(())
}

pub fn open_file_sink(path: &Path) -> Result<StreamSink<BufWriter<File>>> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    tracing::info!(path = %path.display(), "writing report to file");
    Ok(StreamSink::new(BufWriter::new(file)))
}
