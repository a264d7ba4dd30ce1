//! Thin terminal adapter over the conversion engine.
//!
//! Every command maps to a single engine or snapshot call; the adapter owns
//! no conversion logic of its own.

use std::io::{self, BufRead, Write};

use cambio_core::convert::ConversionEngine;

enum Command {
    Edit(String, String),
    Reset(String),
    Rates,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let head = parts.next()?;

        match head.to_ascii_lowercase().as_str() {
            "quit" | "exit" | "q" => Some(Command::Quit),
            "help" | "?" => Some(Command::Help),
            "rates" => Some(Command::Rates),
            "reset" => parts.next().map(|c| Command::Reset(c.to_ascii_uppercase())),
            _ => {
                let amount = parts.next()?;
                Some(Command::Edit(head.to_ascii_uppercase(), amount.to_string()))
            }
        }
    }
}

pub fn run(engine: &mut ConversionEngine) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();

    render(engine, &mut out)?;
    writeln!(out, "Type 'help' for commands.")?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Some(Command::Quit) => break,
            Some(Command::Help) => print_help(&mut out)?,
            Some(Command::Rates) => print_rates(engine, &mut out)?,
            Some(Command::Reset(code)) => match engine.on_reset(&code) {
                Ok(()) => render(engine, &mut out)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            Some(Command::Edit(code, amount)) => match engine.on_edit(&code, &amount) {
                Ok(()) => render(engine, &mut out)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            None => writeln!(out, "Unrecognized command; type 'help'.")?,
        }
    }

    Ok(())
}

fn render(engine: &ConversionEngine, out: &mut impl Write) -> io::Result<()> {
    for slot in engine.slots() {
        match &slot.value {
            Some(value) => writeln!(out, "  {:<4} {}", slot.currency_code, value)?,
            None => writeln!(out, "  {:<4}", slot.currency_code)?,
        }
    }
    Ok(())
}

fn print_rates(engine: &ConversionEngine, out: &mut impl Write) -> io::Result<()> {
    let snapshot = engine.snapshot();
    writeln!(out, "1 {} =", snapshot.base_currency)?;
    for slot in engine.slots() {
        if let Some(rate) = snapshot.rate_for(&slot.currency_code) {
            writeln!(out, "  {:<4} {}", slot.currency_code, rate)?;
        }
    }
    Ok(())
}

fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  <CODE> <amount>   convert, e.g. 'USD 10'")?;
    writeln!(out, "  reset <CODE>      set a slot to exactly 1")?;
    writeln!(out, "  rates             show the loaded rate table")?;
    writeln!(out, "  quit              exit")?;
    Ok(())
}
