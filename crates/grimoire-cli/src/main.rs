use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use grimoire_core::{
    find_by_category, find_by_title, rank_all, rank_spellbooks, wizard_banner_lines, Catalog,
    StreamSink, Wizard,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod menu;
mod prompt;
mod report;
mod session;

use config::{OutputFormat, Settings, SourceArgs};
use report::{deliver, open_file_sink, Report};
use session::Session;

#[derive(Debug, Parser)]
#[command(name = "grimoire")]
#[command(about = "Grimoire spellbook catalog CLI")]
struct Cli {
    #[command(flatten)]
    sources: SourceArgs,

    /// Wizard id; prompted on stdin when omitted
    #[arg(long, requires = "password")]
    id: Option<i64>,

    #[arg(long, requires = "id")]
    password: Option<String>,

    /// Fallback tracing filter when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every spellbook with the spells your role may see
    Display(OutArgs),
    FindTitle(FindTitleArgs),
    FindEffect(FindEffectArgs),
    /// Rank visible spells by success rate
    RankSpells(OutArgs),
    /// Rank spellbooks by average success rate
    RankBooks(OutArgs),
    /// Menu-driven session on stdin/stdout
    Interactive,
}

#[derive(Debug, Args)]
struct OutArgs {
    /// Write the report to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct FindTitleArgs {
    title: String,
    #[command(flatten)]
    output: OutArgs,
}

#[derive(Debug, Args)]
struct FindEffectArgs {
    effect: String,
    #[command(flatten)]
    output: OutArgs,
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid --log-level `{level}`"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn load_catalog(settings: &Settings) -> Result<Catalog> {
    let wizards = read_source(&settings.wizards, "wizards")?;
    let spellbooks = read_source(&settings.spellbooks, "spellbooks")?;
    let catalog = Catalog::from_sources(&wizards, &spellbooks).context("failed to load catalog")?;
    info!(
        wizards = catalog.wizards.len(),
        spellbooks = catalog.spellbooks.len(),
        spells = catalog.total_spells(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn read_source(path: &Path, label: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {label} file {}", path.display()))
}

/// Resolve the wizard for this run: `--id`/`--password` get exactly one try, otherwise prompt.
fn authenticate<R, W>(
    cli: &Cli,
    catalog: &Catalog,
    max_attempts: u32,
    input: &mut R,
    prompts: &mut W,
) -> Result<Wizard>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    if let (Some(id), Some(password)) = (cli.id, cli.password.as_deref()) {
        return match session::verify(&catalog.wizards, id, password) {
            Some(wizard) => {
                info!(id, role = wizard.role(), "login accepted");
                Ok(wizard.clone())
            }
            None => {
                tracing::warn!(id, "login rejected");
                bail!("incorrect id or password")
            }
        };
    }
    session::login(&catalog.wizards, max_attempts, input, prompts)
}

fn write_banner<W: Write + ?Sized>(wizard: &Wizard, out: &mut W) -> Result<()> {
    for line in wizard_banner_lines(wizard) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn run_report(session: &Session, command: &Command, format: OutputFormat) -> Result<()> {
    let books = session.spellbooks();
    let role = session.role();
    let (report, out) = match command {
        Command::Display(args) => (Report::AllSpellbooks(books.iter().collect()), args),
        Command::FindTitle(args) => (
            Report::TitleMatch { title: &args.title, found: find_by_title(books, &args.title) },
            &args.output,
        ),
        Command::FindEffect(args) => (
            Report::EffectMatches {
                effect: &args.effect,
                entries: find_by_category(books, &args.effect, role),
            },
            &args.output,
        ),
        Command::RankSpells(args) => (Report::SpellRanking(rank_all(books, role)), args),
        Command::RankBooks(args) => (Report::SpellbookRanking(rank_spellbooks(books)), args),
        Command::Interactive => bail!("interactive sessions do not produce a single report"),
    };

    match out.out.as_deref() {
        Some(path) => {
            let mut sink = open_file_sink(path)?;
            deliver(&report, session.wizard(), format, &mut sink)?;
            if format == OutputFormat::Human {
                println!("Saved to file!");
            }
        }
        None => {
            let stdout = io::stdout();
            let mut sink = StreamSink::new(stdout.lock());
            deliver(&report, session.wizard(), format, &mut sink)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let settings = Settings::load(&cli.sources).context("failed to resolve settings")?;
    let catalog = load_catalog(&settings)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    if matches!(cli.command, Command::Interactive) {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let attempts = settings.max_login_attempts;
        let wizard = authenticate(&cli, &catalog, attempts, &mut input, &mut out)?;
        write_banner(&wizard, &mut out)?;
        let session = Session::new(catalog, wizard);
        return menu::run(&session, &mut input, &mut out);
    }

    let stderr = io::stderr();
    let mut prompts = stderr.lock();
    let attempts = settings.max_login_attempts;
    let wizard = authenticate(&cli, &catalog, attempts, &mut input, &mut prompts)?;
    if settings.format == OutputFormat::Human {
        write_banner(&wizard, &mut prompts)?;
    }
    drop(prompts);

    let session = Session::new(catalog, wizard);
    run_report(&session, &cli.command, settings.format)
}
