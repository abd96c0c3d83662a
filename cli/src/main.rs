//! Interactive terminal host for the zoom/warp controller.
//!
//! Stands in for the 3D neuron canvas: wheel input drives zoom, the warp
//! and nucleus transitions are shown as they publish, and the five dendrite
//! stems become selectable once the nucleus is reached.

use std::io::{Stdout, Write, stderr, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::cursor::{Hide, MoveToColumn, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
};
use crossterm::execute;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use tokio::time::sleep;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use soma_engine::{StemIndex, ZoomController, ZoomSnapshot};

/// Raw delta carried by one wheel notch, matching the pointer convention
/// the default sensitivity was tuned for.
const WHEEL_DELTA: f64 = 100.0;

/// Fact shown for each dendrite stem once the nucleus is reached.
const STEM_FACTS: [&str; StemIndex::COUNT as usize] = [
    "dendrites receive input from thousands of neighboring cells",
    "the axon carries spikes away from the soma",
    "myelin sheaths speed conduction up to 100x",
    "synapses convert spikes into chemical signals",
    "the nucleus holds the cell's genetic program",
];

struct TerminalSession;

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        if let Err(err) = execute!(stdout(), EnableMouseCapture, Hide) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        Ok(Self)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
        let _ = disable_raw_mode();
    }
}

fn zoom_bar(zoom: f64, width: usize) -> String {
    let filled = (zoom * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "=".repeat(filled), " ".repeat(width - filled))
}

fn draw(out: &mut Stdout, snap: &ZoomSnapshot) -> Result<()> {
    let phase = if snap.has_reached_nucleus {
        "nucleus"
    } else if snap.is_warping {
        "warping"
    } else {
        "exploring"
    };
    let stem = match snap.active_stem {
        Some(stem) => STEM_FACTS[usize::from(stem.get())],
        None => "-",
    };
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    write!(
        out,
        "[{}] {:>5.1}%  {phase:<9}  stem: {stem}",
        zoom_bar(snap.zoom, 30),
        snap.zoom * 100.0,
    )?;
    out.flush()?;
    Ok(())
}

async fn run(controller: &mut ZoomController) -> Result<()> {
    let mut rx = controller.subscribe();
    let mut out = stdout();
    draw(&mut out, &controller.snapshot())?;

    loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') => controller.reset(),
                    KeyCode::Char('c') => controller.set_active_stem(None),
                    KeyCode::Char(c @ '1'..='5') => {
                        if let Ok(stem) = StemIndex::new(c as u8 - b'1') {
                            controller.set_active_stem(Some(stem));
                        }
                    }
                    KeyCode::Up => controller.handle_scroll(-WHEEL_DELTA),
                    KeyCode::Down => controller.handle_scroll(WHEEL_DELTA),
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => controller.handle_scroll(-WHEEL_DELTA),
                    MouseEventKind::ScrollDown => controller.handle_scroll(WHEEL_DELTA),
                    _ => {}
                },
                _ => {}
            }
        }

        if rx.has_changed()? {
            let snap = *rx.borrow_and_update();
            draw(&mut out, &snap)?;
        }

        sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(stderr))
        .with(EnvFilter::from_default_env())
        .init();

    println!("scroll (or arrow keys) to zoom - 1-5 select a stem, c clear, r reset, q quit");

    let mut controller = ZoomController::with_defaults();

    let session = TerminalSession::new()?;
    let result = run(&mut controller).await;
    drop(session);

    println!();
    result
}

#[cfg(test)]
mod tests {
    use super::{STEM_FACTS, zoom_bar};

    #[test]
    fn zoom_bar_spans_the_unit_interval() {
        assert_eq!(zoom_bar(0.0, 10), " ".repeat(10));
        assert_eq!(zoom_bar(1.0, 10), "=".repeat(10));
        assert_eq!(zoom_bar(0.5, 10), format!("{}{}", "=".repeat(5), " ".repeat(5)));
    }

    #[test]
    fn every_stem_has_a_fact() {
        assert!(STEM_FACTS.iter().all(|fact| !fact.is_empty()));
    }
}
