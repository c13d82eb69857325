use std::str::{FromStr, SplitWhitespace};

use crate::error::{CatalogError, IngestError};
use crate::model::{Spell, Spellbook, Wizard};

// Declared counts come from untrusted input.
const PREALLOCATE_LIMIT: usize = 1024;

fn invalid_number(record: &str, field: &'static str, token: &str) -> IngestError {
    IngestError::InvalidNumber { record: record.to_string(), field, token: token.to_string() }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self { inner: input.split_whitespace() }
    }

    fn text(&mut self, record: &str, field: &'static str) -> Result<&'a str, IngestError> {
        self.inner
            .next()
            .ok_or_else(|| IngestError::UnexpectedEnd { record: record.to_string(), field })
    }

    fn number<T: FromStr>(&mut self, record: &str, field: &'static str) -> Result<T, IngestError> {
        let token = self.text(record, field)?;
        token.parse::<T>().map_err(|_| invalid_number(record, field, token))
    }

    /// Like [`Tokens::number`], but `nan` and infinities are rejected too.
    fn finite(&mut self, record: &str, field: &'static str) -> Result<f32, IngestError> {
        let token = self.text(record, field)?;
        match token.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(invalid_number(record, field, token)),
        }
    }

    fn warn_on_trailing(&mut self, source: &'static str) {
        let trailing = self.inner.by_ref().count();
        if trailing > 0 {
            tracing::warn!(source, trailing, "ignoring tokens after the declared record count");
        }
    }
}

/// Parse a wizards source: a record count followed by that many
/// `name id password position_title beard_length` records.
///
/// # Errors
/// Returns [`CatalogError::Ingest`] when a field is missing or a numeric field does not parse.
pub fn parse_wizards(input: &str) -> Result<Vec<Wizard>, CatalogError> {
    let mut tokens = Tokens::new(input);
    let count = tokens.number::<usize>("wizards header", "wizard count")?;

    let mut wizards = Vec::with_capacity(count.min(PREALLOCATE_LIMIT));
    for index in 1..=count {
        let record = format!("wizard {index}");
        wizards.push(Wizard {
            name: tokens.text(&record, "name")?.to_string(),
            id: tokens.number(&record, "id")?,
            password: tokens.text(&record, "password")?.to_string(),
            position_title: tokens.text(&record, "position title")?.to_string(),
            beard_length: tokens.number(&record, "beard length")?,
        });
    }
    tokens.warn_on_trailing("wizards");

    tracing::debug!(wizards = wizards.len(), "parsed wizards");
    Ok(wizards)
}

/// Parse a spellbooks source: a book count, then per book
/// `title author num_pages edition num_spells` followed by `num_spells` records of
/// `name success_rate effect`.
///
/// A book is only produced once all of its declared spells were read, so a truncated source
/// fails instead of yielding a short book. Each book's average is computed here.
///
/// # Errors
/// Returns [`CatalogError::Ingest`] when a field is missing or a numeric field does not parse.
pub fn parse_spellbooks(input: &str) -> Result<Vec<Spellbook>, CatalogError> {
    let mut tokens = Tokens::new(input);
    let count = tokens.number::<usize>("spellbooks header", "spellbook count")?;

    let mut spellbooks = Vec::with_capacity(count.min(PREALLOCATE_LIMIT));
    for index in 1..=count {
        let record = format!("spellbook {index}");
        let title = tokens.text(&record, "title")?;
        let record = format!("spellbook {index} `{title}`");
        let author = tokens.text(&record, "author")?;
        let num_pages = tokens.number::<u32>(&record, "page count")?;
        let edition = tokens.number::<u32>(&record, "edition")?;
        let num_spells = tokens.number::<usize>(&record, "spell count")?;

        let mut spells = Vec::with_capacity(num_spells.min(PREALLOCATE_LIMIT));
        for spell_index in 1..=num_spells {
            let spell_record = format!("spell {spell_index} of {record}");
            spells.push(Spell {
                name: tokens.text(&spell_record, "name")?.to_string(),
                success_rate: tokens.finite(&spell_record, "success rate")?,
                effect: tokens.text(&spell_record, "effect")?.to_string(),
            });
        }

        let book = Spellbook::new(title, author, num_pages, edition, spells);
        if book.avg_success_rate.is_none() {
            tracing::debug!(title, "spellbook has no spells; average is undefined");
        }
        spellbooks.push(book);
    }
    tokens.warn_on_trailing("spellbooks");

    tracing::debug!(spellbooks = spellbooks.len(), "parsed spellbooks");
    Ok(spellbooks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIZARDS: &str = "2\nMerlin 1001 wand Headmaster 30.5\nHarold 2002 pass123 Student 0.5\n";

    const SPELLBOOKS: &str = "\
2
Embers Ignatius 120 3 2
blaze 0.9 fire
ember 0.3 fire
Shadows Morgana 666 1 3
venom 0.8 poison
doom 0.4 death
froth 0.6 bubble
";

    fn assert_ingest_error(
        result: Result<impl std::fmt::Debug, CatalogError>,
        expected: &IngestError,
    ) {
        match result {
            Ok(value) => panic!("expected ingest error {expected:?}, got {value:?}"),
            Err(CatalogError::Ingest(err)) => assert_eq!(&err, expected),
            Err(err) => panic!("expected ingest error {expected:?}, got {err}"),
        }
    }

    #[test]
    fn parses_wizards_in_order() {
        let wizards = match parse_wizards(WIZARDS) {
            Ok(wizards) => wizards,
            Err(err) => panic!("wizards should parse: {err}"),
        };

        assert_eq!(wizards.len(), 2);
        assert_eq!(wizards[0].name, "Merlin");
        assert_eq!(wizards[0].id, 1001);
        assert_eq!(wizards[0].password, "wand");
        assert_eq!(wizards[0].role(), "Headmaster");
        assert!((wizards[0].beard_length - 30.5).abs() < f32::EPSILON);
        assert!(crate::policy::is_restricted_role(wizards[1].role()));
    }

    #[test]
    fn parses_spellbooks_with_spells_and_averages() {
        let books = match parse_spellbooks(SPELLBOOKS) {
            Ok(books) => books,
            Err(err) => panic!("spellbooks should parse: {err}"),
        };

        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Embers");
        assert_eq!(books[0].author, "Ignatius");
        assert_eq!(books[0].num_pages, 120);
        assert_eq!(books[0].edition, 3);
        assert_eq!(books[1].spells.len(), 3);
        assert_eq!(books[1].spells[2].effect, "bubble");

        let Some(average) = books[0].avg_success_rate else {
            panic!("Embers should have an average");
        };
        assert!((average - 0.6).abs() < 1e-6);
    }

    #[test]
    fn line_breaks_are_not_significant() {
        let flat = SPELLBOOKS.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(parse_spellbooks(&flat), parse_spellbooks(SPELLBOOKS));
    }

    #[test]
    fn book_with_zero_spells_has_no_average() {
        let books = match parse_spellbooks("1\nBlank Nobody 10 1 0\n") {
            Ok(books) => books,
            Err(err) => panic!("spellbooks should parse: {err}"),
        };
        assert!(books[0].spells.is_empty());
        assert_eq!(books[0].avg_success_rate, None);
    }

    #[test]
    fn truncated_spell_list_is_rejected() {
        assert_ingest_error(
            parse_spellbooks("1\nEmbers Ignatius 120 3 2\nblaze 0.9 fire\n"),
            &IngestError::UnexpectedEnd {
                record: "spell 2 of spellbook 1 `Embers`".to_string(),
                field: "name",
            },
        );
    }

    #[test]
    fn missing_books_are_rejected() {
        assert_ingest_error(
            parse_spellbooks("2\nBlank Nobody 10 1 0\n"),
            &IngestError::UnexpectedEnd { record: "spellbook 2".to_string(), field: "title" },
        );
    }

    #[test]
    fn non_numeric_fields_are_rejected() {
        assert_ingest_error(
            parse_wizards("1\nMerlin abc wand Headmaster 30.5\n"),
            &IngestError::InvalidNumber {
                record: "wizard 1".to_string(),
                field: "id",
                token: "abc".to_string(),
            },
        );
        assert_ingest_error(
            parse_spellbooks("1\nEmbers Ignatius 120 3 1\nblaze high fire\n"),
            &IngestError::InvalidNumber {
                record: "spell 1 of spellbook 1 `Embers`".to_string(),
                field: "success rate",
                token: "high".to_string(),
            },
        );
    }

    #[test]
    fn non_finite_success_rates_are_rejected() {
        for token in ["nan", "NaN", "inf", "-infinity"] {
            let source = format!("1\nOdd Nobody 10 1 2\na 0.5 fire\nb {token} fire\n");
            assert_ingest_error(
                parse_spellbooks(&source),
                &IngestError::InvalidNumber {
                    record: "spell 2 of spellbook 1 `Odd`".to_string(),
                    field: "success rate",
                    token: token.to_string(),
                },
            );
        }
    }

    #[test]
    fn negative_counts_are_rejected() {
        assert_ingest_error(
            parse_spellbooks("-1\n"),
            &IngestError::InvalidNumber {
                record: "spellbooks header".to_string(),
                field: "spellbook count",
                token: "-1".to_string(),
            },
        );
    }

    #[test]
    fn empty_source_is_rejected() {
        assert_ingest_error(
            parse_wizards("   \n"),
            &IngestError::UnexpectedEnd {
                record: "wizards header".to_string(),
                field: "wizard count",
            },
        );
    }

    #[test]
    fn trailing_tokens_are_ignored() {
        let wizards = match parse_wizards("1\nMerlin 1 wand Headmaster 3.0\nextra tokens\n") {
            Ok(wizards) => wizards,
            Err(err) => panic!("wizards should parse: {err}"),
        };
        assert_eq!(wizards.len(), 1);
    }
}
