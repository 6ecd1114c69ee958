//! The `prakriti take` command: answer the questionnaire interactively.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use prakriti_core::model::QuestionCatalog;
use prakriti_core::session::Session;

use super::OutputFormat;
use crate::config::PrakritiConfig;

pub fn execute(
    catalog_path: Option<PathBuf>,
    profile_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: OutputFormat,
    config: &PrakritiConfig,
) -> Result<()> {
    let catalog = super::resolve_catalog(catalog_path.as_deref(), config)?;
    anyhow::ensure!(!catalog.is_empty(), "catalog {} has no questions", catalog.id());

    let mut session = Session::new();
    if let Some(profile) = super::resolve_profile(profile_path.as_deref(), config)? {
        session.set_profile(profile);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    ask_all(&catalog, &mut session, &mut stdin.lock(), &mut stdout.lock())?;

    let result = session.submit(&catalog).map_err(super::explain)?.clone();
    println!();
    super::print_result(&result, session.profile(), format)?;
    if let Some(path) = super::save_result(&result, output.as_deref(), config)? {
        eprintln!("Result saved to: {}", path.display());
    }

    Ok(())
}

/// Walk the catalog one question at a time until every question is answered.
///
/// Options are numbered from 1. `b` goes back to the previous question.
fn ask_all<R: BufRead, W: Write>(
    catalog: &QuestionCatalog,
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    if let Some(profile) = session.profile() {
        writeln!(out, "Welcome, {}.", profile.display_name())?;
    }

    let total = catalog.len();
    let mut current = 0;
    let mut line = String::new();

    while current < total {
        let question = &catalog.questions()[current];
        writeln!(out, "\nQuestion {} of {}  [{}]", current + 1, total, question.group)?;
        writeln!(out, "{}", question.prompt)?;
        for (i, option) in question.options.iter().enumerate() {
            let marker = if session.answers().get(current) == Some(i) {
                "*"
            } else {
                " "
            };
            writeln!(out, " {marker}{}) {}", i + 1, option.text)?;
        }
        write!(out, "Choose 1-{}: ", question.options.len())?;
        out.flush()?;

        line.clear();
        let read = input.read_line(&mut line).context("failed to read answer")?;
        if read == 0 {
            let (answered, total) = session.progress(catalog);
            anyhow::bail!(
                "input ended after {answered} of {total} questions, please answer all questions"
            );
        }

        let reply = line.trim();
        if reply.eq_ignore_ascii_case("b") {
            current = current.saturating_sub(1);
            continue;
        }

        match reply.parse::<usize>() {
            Ok(n) if (1..=question.options.len()).contains(&n) => {
                session.answer(catalog, current, n - 1)?;
                current += 1;
            }
            _ => {
                writeln!(
                    out,
                    "Please enter a number between 1 and {}.",
                    question.options.len()
                )?;
            }
        }
    }

    Ok(())
}
