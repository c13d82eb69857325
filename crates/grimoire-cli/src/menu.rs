use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use grimoire_core::{
    check_category, find_by_category, find_by_title, offerable_categories, rank_all,
    rank_spellbooks, StreamSink,
};
use tracing::{debug, info};

use crate::config::OutputFormat;
use crate::prompt::ask;
use crate::report::{deliver, open_file_sink, Report};
use crate::session::Session;

const MENU: &[&str] = &[
    "",
    "What would you like to do?",
    "1. Display all spellbooks",
    "2. Search for a spellbook by title",
    "3. Search for spells by effect",
    "4. Rank all spells by success rate",
    "5. Rank spellbooks by average success rate",
    "6. Quit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Screen,
    File(PathBuf),
}

/// Drive the interactive menu until the wizard quits or `input` runs dry.
pub fn run<R, W>(session: &Session, input: &mut R, out: &mut W) -> Result<()>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    loop {
        for line in MENU {
            writeln!(out, "{line}")?;
        }
        let Some(choice) = ask(input, out, "Your Choice: ")? else {
            info!("input closed, leaving menu");
            return Ok(());
        };
        debug!(choice = choice.as_str(), "menu choice");

        let books = session.spellbooks();
        let role = session.role();
        let outcome = match choice.as_str() {
            "1" => {
                let report = Report::AllSpellbooks(books.iter().collect());
                emit(session, &report, &Destination::Screen, out)
            }
            "2" => {
                let Some(title) = ask(input, out, "Enter the spellbook title: ")? else {
                    return Ok(());
                };
                let found = find_by_title(books, &title);
                let report = Report::TitleMatch { title: &title, found };
                emit(session, &report, &Destination::Screen, out)
            }
            "3" => {
                let Some(effect) = ask_effect(role, input, out)? else {
                    return Ok(());
                };
                let report = Report::EffectMatches {
                    effect: &effect,
                    entries: find_by_category(books, &effect, role),
                };
                match choose_destination(input, out)? {
                    Some(destination) => emit(session, &report, &destination, out),
                    None => return Ok(()),
                }
            }
            "4" => match choose_destination(input, out)? {
                Some(destination) => {
                    let report = Report::SpellRanking(rank_all(books, role));
                    emit(session, &report, &destination, out)
                }
                None => return Ok(()),
            },
            "5" => match choose_destination(input, out)? {
                Some(destination) => {
                    let report = Report::SpellbookRanking(rank_spellbooks(books));
                    emit(session, &report, &destination, out)
                }
                None => return Ok(()),
            },
            "6" => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            _ => {
                writeln!(out, "Invalid choice. Please try again.")?;
                Ok(())
            }
        };

        if let Err(err) = outcome {
            tracing::warn!(error = %err, "menu action failed");
            writeln!(out, "Error: {err:#}")?;
        }
    }
}

/// Re-prompt until the effect is one `role` may search for.
fn ask_effect<R, W>(role: &str, input: &mut R, out: &mut W) -> Result<Option<String>>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    let prompt = format!("Enter the spell effect ({}): ", offerable_categories(role).join(", "));
    loop {
        let Some(effect) = ask(input, out, &prompt)? else {
            return Ok(None);
        };
        match check_category(role, &effect) {
            Ok(_) => return Ok(Some(effect)),
            Err(err) => writeln!(out, "Error: {err}")?,
        }
    }
}

fn choose_destination<R, W>(input: &mut R, out: &mut W) -> Result<Option<Destination>>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    loop {
        writeln!(out, "How would you like the information displayed?")?;
        writeln!(out, "1. Print to screen")?;
        writeln!(out, "2. Print to file")?;
        let Some(choice) = ask(input, out, "Your Choice: ")? else {
            return Ok(None);
        };
        match choice.as_str() {
            "1" => return Ok(Some(Destination::Screen)),
            "2" => {
                return Ok(ask(input, out, "Please enter filename: ")?
                    .map(|name| Destination::File(PathBuf::from(name))));
            }
            _ => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
}

fn emit<W>(
    session: &Session,
    report: &Report<'_>,
    destination: &Destination,
    out: &mut W,
) -> Result<()>
where
    W: Write + ?Sized,
{
    match destination {
        Destination::Screen => {
            let mut sink = StreamSink::new(&mut *out);
            deliver(report, session.wizard(), OutputFormat::Human, &mut sink)?;
        }
        Destination::File(path) => {
            let mut sink = open_file_sink(path)?;
            deliver(report, session.wizard(), OutputFormat::Human, &mut sink)?;
            writeln!(out, "Saved to file!")?;
        }
    }
    Ok(())
}
