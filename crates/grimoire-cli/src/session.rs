use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use grimoire_core::{Catalog, Spellbook, Wizard};
use tracing::{info, warn};

use crate::prompt::ask;

/// A logged-in wizard together with the catalog they browse.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    wizard: Wizard,
}

impl Session {
    pub fn new(catalog: Catalog, wizard: Wizard) -> Self {
        Self { catalog, wizard }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn role(&self) -> &str {
        self.wizard.role()
    }

    pub fn spellbooks(&self) -> &[Spellbook] {
        &self.catalog.spellbooks
    }
}

/// The wizard whose id and password both match exactly.
pub fn verify<'a>(wizards: &'a [Wizard], id: i64, password: &str) -> Option<&'a Wizard> {
    wizards.iter().find(|wizard| wizard.id == id && wizard.password == password)
}

/// Prompt for credentials on `out` until a wizard matches or `max_attempts` run out.
///
/// A non-numeric id counts as a failed attempt. Input ending mid-login is an error.
pub fn login<R, W>(
    wizards: &[Wizard],
    max_attempts: u32,
    input: &mut R,
    out: &mut W,
) -> Result<Wizard>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    for attempt in 1..=max_attempts {
        let Some(raw_id) = ask(input, out, "Please enter your ID: ")? else {
            bail!("input closed before login completed");
        };
        let Some(password) = ask(input, out, "Please enter your password: ")? else {
            bail!("input closed before login completed");
        };

        let matched = raw_id.parse::<i64>().ok().and_then(|id| verify(wizards, id, &password));
        if let Some(wizard) = matched {
            info!(id = wizard.id, role = wizard.role(), "login accepted");
            return Ok(wizard.clone());
        }

        let remaining = max_attempts - attempt;
        warn!(attempt, remaining, "login rejected");
        if remaining > 0 {
            writeln!(out, "Incorrect ID or password. Attempts remaining: {remaining}")?;
        }
    }

    bail!("Too many failed login attempts.")
}
