//! TerminalRenderer: flushes candy frames to a real terminal.
//!
//! A puzzle frame barely changes between ticks (a cursor step, a flash fading,
//! a status line expiring), so after the first full paint only the runs of
//! changed cells are sent. Output is staged in a reused byte buffer and written
//! once per frame.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// How a frame reached the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePaint {
    /// Screen cleared and every cell written
    Full,
    /// Only changed runs written; zero runs means nothing changed
    Diff { runs: usize },
}

/// A horizontal run of changed cells on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    /// Frame currently on screen; `None` forces a full paint
    shown: Option<FrameBuffer>,
    staging: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.staging.clear();
        self.staging.queue(terminal::EnterAlternateScreen)?;
        self.staging.queue(cursor::Hide)?;
        self.staging.queue(terminal::DisableLineWrap)?;
        self.flush_staging()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.staging.clear();
        self.staging.queue(ResetColor)?;
        self.staging.queue(SetAttribute(Attribute::Reset))?;
        self.staging.queue(terminal::EnableLineWrap)?;
        self.staging.queue(cursor::Show)?;
        self.staging.queue(terminal::LeaveAlternateScreen)?;
        self.flush_staging()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            shown: None,
            staging: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Repaint everything on the next draw (after a resize event).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Paint `fb`, then hand the previously shown buffer back through `fb`.
    ///
    /// The caller keeps rendering into the same `FrameBuffer` each frame; the
    /// two buffers trade places so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<FramePaint> {
        self.staging.clear();
        let (mut shown, paint) = match self.shown.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                let runs = encode_diff_into(&prev, fb, &mut self.staging)?;
                (prev, FramePaint::Diff { runs })
            }
            Some(mut prev) => {
                encode_full_into(fb, &mut self.staging)?;
                prev.resize(fb.width(), fb.height());
                (prev, FramePaint::Full)
            }
            None => {
                encode_full_into(fb, &mut self.staging)?;
                (FrameBuffer::new(fb.width(), fb.height()), FramePaint::Full)
            }
        };
        if paint != (FramePaint::Diff { runs: 0 }) {
            self.flush_staging()?;
        }

        std::mem::swap(&mut shown, fb);
        self.shown = Some(shown);
        Ok(paint)
    }

    fn flush_staging(&mut self) -> Result<()> {
        self.out.write_all(&self.staging)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Tracks the style last sent so repeated cells skip the escape codes.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            set_style(out, cell.style)?;
            self.style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }
}

/// Encode a clear-and-paint of the whole frame into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut pen = Pen::default();
    for y in 0..fb.height() {
        out.queue(cursor::MoveTo(0, y))?;
        for x in 0..fb.width() {
            pen.print(out, fb.get(x, y).unwrap_or_default())?;
        }
    }
    reset_style(out)
}

/// Encode only the cells of `next` that differ from `prev`, returning the run count.
///
/// Frames of different sizes cannot be diffed and are painted in full.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<usize> {
    if prev.width() != next.width() || prev.height() != next.height() {
        encode_full_into(next, out)?;
        return Ok(next.height() as usize);
    }

    let mut pen = Pen::default();
    let mut runs = 0;
    for run in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            pen.print(out, next.get(x, run.y).unwrap_or_default())?;
        }
        runs += 1;
    }
    if runs > 0 {
        reset_style(out)?;
    }
    Ok(runs)
}

/// Row-major runs of cells that differ between two same-sized frames.
pub fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> impl Iterator<Item = Run> + 'a {
    let w = next.width().min(prev.width());
    let h = next.height().min(prev.height());
    let differs = move |x: u16, y: u16| prev.get(x, y) != next.get(x, y);

    (0..h).flat_map(move |y| {
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x, y) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x, y) {
                x += 1;
            }
            Some(Run {
                x: start,
                y,
                len: x - start,
            })
        })
    })
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn reset_style(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
