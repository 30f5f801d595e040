//! The read-eval-print loop.

use std::io::{BufRead, Write};

use tracing::error;

use phet_app::{Tracker, overrun_message};
use phet_core::account::SignupInput;
use phet_core::ledger::EntryView;
use phet_shared::AppError;

use crate::command::{Command, HELP};

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Failed commands print their message and the loop goes on. Only I/O
/// errors on `input` or `out` end the loop early.
pub fn run(tracker: &Tracker, input: impl BufRead, mut out: impl Write) -> anyhow::Result<()> {
    writeln!(out, "Phet expense tracker. Type `help` for commands.")?;
    greet(tracker, &mut out)?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match execute(tracker, command, &mut out) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => match err.downcast::<AppError>() {
                Ok(app) => {
                    if !app.is_user_error() {
                        error!(code = app.error_code(), error = %app, "Command failed");
                    }
                    writeln!(out, "{app}")?;
                }
                Err(other) => return Err(other),
            },
        }
    }

    writeln!(out, "Bye.")?;
    Ok(())
}

/// Resumes a saved session, if any.
fn greet(tracker: &Tracker, out: &mut impl Write) -> anyhow::Result<()> {
    match tracker.current_user() {
        Ok(user) => writeln!(out, "Welcome back, {}.", user.record.username)?,
        Err(AppError::NotLoggedIn) => writeln!(out, "Please login or signup.")?,
        Err(err) => writeln!(out, "{err}")?,
    }
    Ok(())
}

fn execute(tracker: &Tracker, command: Command, out: &mut impl Write) -> anyhow::Result<Flow> {
    match command {
        Command::Signup {
            email,
            username,
            password,
        } => {
            let user = tracker.signup(&SignupInput {
                email,
                username,
                password,
            })?;
            writeln!(out, "Account created. Welcome, {}.", user.record.username)?;
        }
        Command::Login { email, password } => {
            let user = tracker.login(&email, &password)?;
            writeln!(out, "Welcome back, {}.", user.record.username)?;
        }
        Command::Logout => {
            tracker.logout()?;
            writeln!(out, "Logged out.")?;
        }
        Command::Budget(raw) => {
            let status = tracker.set_budget(&raw)?;
            writeln!(
                out,
                "Budget set to {}. Remaining: {}",
                tracker.money(status.budget),
                tracker.money(status.variance)
            )?;
        }
        Command::Category(name) => {
            let name = tracker.add_category(&name)?;
            writeln!(out, "Category `{name}` added.")?;
        }
        Command::Add {
            category,
            amount,
            note,
        } => {
            let outcome = tracker.add_expense(&category, &amount, note.as_deref())?;
            writeln!(
                out,
                "Added {} to {}. Total: {}  Remaining: {}",
                tracker.money(outcome.entry.amount),
                outcome.category,
                tracker.money(outcome.total),
                tracker.money(outcome.remaining)
            )?;
            if let Some(overrun) = &outcome.overrun {
                writeln!(out, "{}", overrun_message(overrun, tracker.currency()))?;
            }
        }
        Command::Summary => print_summary(tracker, out)?,
        Command::List => {
            let entries = tracker.dashboard()?.entries;
            print_entries(tracker, &entries, out)?;
        }
        Command::Search(query) => {
            let entries = tracker.search(&query)?;
            print_entries(tracker, &entries, out)?;
        }
        Command::Delete => {
            let email = tracker.delete_account()?;
            writeln!(out, "Account {email} deleted.")?;
        }
        Command::Help => writeln!(out, "{HELP}")?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn print_summary(tracker: &Tracker, out: &mut impl Write) -> anyhow::Result<()> {
    let dashboard = tracker.dashboard()?;
    let summary = &dashboard.summary;

    writeln!(out, "{} <{}>", dashboard.username, dashboard.email)?;
    writeln!(out, "Budget:    {}", tracker.money(dashboard.budget))?;
    writeln!(
        out,
        "Spent:     {} ({}%)",
        tracker.money(summary.total),
        dashboard.status.utilization_percent
    )?;
    writeln!(out, "Remaining: {}", tracker.money(summary.remaining))?;
    writeln!(out, "Entries:   {}", summary.entry_count)?;
    for category in &summary.categories {
        writeln!(
            out,
            "  {:<14} {:>14}  ({})",
            category.name,
            tracker.money(category.subtotal).to_string(),
            category.entry_count
        )?;
    }
    Ok(())
}

fn print_entries(
    tracker: &Tracker,
    entries: &[EntryView],
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if entries.is_empty() {
        writeln!(out, "No expenses.")?;
        return Ok(());
    }
    for view in entries {
        writeln!(
            out,
            "{}  {:<14} {:>14}  {}",
            view.entry.time_label(),
            view.category,
            tracker.money(view.entry.amount).to_string(),
            view.entry.note.as_deref().unwrap_or("")
        )?;
    }
    Ok(())
}
