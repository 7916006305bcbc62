//! Interactive envelope morphing demo.
//!
//! This example builds a small circular table of envelope shapes and plots the
//! interpolated shape in the terminal. Sweep the interpolation factor to watch
//! the peak glide between shapes and wrap from the last shape back to the first.
//!
//! Controls:
//! - LEFT/RIGHT: Move the factor by 0.05
//! - DOWN/UP: Move the factor by 0.01
//! - 0-9: Jump to that table position (if it exists)
//! - Q/ESC: Quit

use anyhow::Result;
use crossterm::{
    ExecutableCommand, QueueableCommand,
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::Print,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use peakmorph::{DoubleBuffer, Interpolator, shape};
use std::io::{Write, stdout};
use std::panic;
use std::time::Duration;

const ENVELOPE_SIZE: usize = 72;
const PLOT_HEIGHT: usize = 16;

fn build_interpolator() -> Result<Interpolator> {
    let mut morph = Interpolator::new(ENVELOPE_SIZE);
    // Plucked: instant attack, long decay
    morph.append_linear_shape(&shape![(0, 0.0), (2, 1.0), (40, 0.2), (71, 0.0)], 2)?;
    // Swell: slow attack, short release
    morph.append_linear_shape(&shape![(0, 0.0), (50, 1.0), (64, 0.3), (71, 0.0)], 50)?;
    // Bowed: medium attack, held body
    morph.append_linear_shape(&shape![(0, 0.0), (20, 1.0), (28, 0.7), (60, 0.6), (71, 0.0)], 20)?;
    Ok(morph)
}

/// Renders `samples` as rows of text, tallest row first.
fn plot(samples: &[f64]) -> Vec<String> {
    (0..PLOT_HEIGHT)
        .rev()
        .map(|row| {
            let threshold = (row as f64 + 0.5) / PLOT_HEIGHT as f64;
            samples
                .iter()
                .map(|&v| if v >= threshold { '#' } else { ' ' })
                .collect()
        })
        .collect()
}

fn draw(morph: &Interpolator, buffers: &DoubleBuffer, factor: f64) -> Result<()> {
    let mut out = stdout();
    out.queue(MoveTo(0, 0))?.queue(Clear(ClearType::All))?;
    out.queue(Print(format!(
        "Envelope morph  factor {:.2} / {}  (arrows sweep, 0-9 jump, q quits)",
        factor,
        morph.table().len()
    )))?;

    for (row, line) in plot(buffers.active()).iter().enumerate() {
        out.queue(MoveTo(0, row as u16 + 2))?
            .queue(Print(format!("|{}|", line)))?;
    }
    out.queue(MoveTo(0, PLOT_HEIGHT as u16 + 2))?
        .queue(Print(format!("+{}+", "-".repeat(ENVELOPE_SIZE))))?;

    out.flush()?;
    Ok(())
}

/// Cleans up terminal state (cursor, alternate screen, raw mode).
fn cleanup_terminal() {
    let _ = stdout().execute(Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Moves `factor` by `delta`, wrapping around the circular table.
fn step(factor: f64, delta: f64, shapes: usize) -> f64 {
    (factor + delta).rem_euclid(shapes as f64)
}

fn main() -> Result<()> {
    env_logger::init();

    let morph = build_interpolator()?;
    let shapes = morph.table().len();
    let mut buffers = DoubleBuffer::new(ENVELOPE_SIZE);
    let mut factor = 0.0;
    buffers.publish_with(|out| morph.interpolate(factor, out))?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(Hide)?;

    // Set up panic hook to restore terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    draw(&morph, &buffers, factor)?;

    loop {
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
        {
            let next = match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                KeyCode::Right => step(factor, 0.05, shapes),
                KeyCode::Left => step(factor, -0.05, shapes),
                KeyCode::Up => step(factor, 0.01, shapes),
                KeyCode::Down => step(factor, -0.01, shapes),
                KeyCode::Char(c) => match c.to_digit(10) {
                    Some(d) if (d as usize) < shapes => d as f64,
                    _ => continue,
                },
                _ => continue,
            };

            // An out-of-range factor keeps the previous shape on screen
            if buffers.publish_with(|out| morph.interpolate(next, out)).is_ok() {
                factor = next;
            }
            draw(&morph, &buffers, factor)?;
        }
    }

    cleanup_terminal();

    Ok(())
}
