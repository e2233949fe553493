use anyhow::{Context, Result};
use std::io::{stdin, stdout, Write};
use tapcalc::calc_engine::{evaluate_traced, Key};
use tapcalc::config::Config;
use tapcalc::{format_for_display, Calculator};
use termion::{clear::CurrentLine as ClearLine, event::Key as TermKey, input::TermRead, raw::IntoRawMode};

pub fn run_line(config: &Config) -> Result<()> {
    println!("tapcalc - keypad calculator");
    println!("Keys: 0-9 . + - * / ( )   = or Enter: evaluate");
    println!("Backspace: delete, Esc: clear, q or Ctrl+C: quit\n");

    let mut stdout = stdout().into_raw_mode().context("entering raw mode")?;
    let mut calculator = Calculator::new();

    redraw(&mut stdout, &calculator)?;

    for key in stdin().keys() {
        match key.context("reading key")? {
            TermKey::Char('q') | TermKey::Ctrl('c') => break,
            TermKey::Char('=') | TermKey::Char('\n') => {
                if calculator.is_error() || calculator.expression().is_empty() {
                    continue;
                }
                let input = calculator.expression().to_string();
                let (result, steps) = evaluate_traced(&input);
                calculator.apply_result(result);

                // Results scroll up, the display line stays at the bottom.
                write!(stdout, "\r{}{} = {}\r\n", ClearLine, input, calculator.expression())?;
                if config.details() {
                    for (i, step) in steps.iter().enumerate() {
                        write!(
                            stdout,
                            "  Step {}: {} = {}\r\n",
                            i + 1,
                            step.operation,
                            format_for_display(step.result, config.precision())
                        )?;
                    }
                }
            }
            TermKey::Char(c) => {
                if let Some(k) = Key::from_char(c) {
                    calculator.press(k);
                }
            }
            TermKey::Backspace => calculator.delete(),
            TermKey::Esc | TermKey::Delete => calculator.clear(),
            _ => {}
        }
        redraw(&mut stdout, &calculator)?;
    }

    write!(stdout, "\r\n")?;
    stdout.flush()?;
    Ok(())
}

fn redraw(stdout: &mut impl Write, calculator: &Calculator) -> Result<()> {
    write!(stdout, "\r{}> {}", ClearLine, calculator.expression())?;
    stdout.flush()?;
    Ok(())
}
