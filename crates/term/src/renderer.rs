//! Terminal output for the board view.
//!
//! [`TerminalRenderer::present`] paints a [`BoardSnapshot`] through a
//! [`GameView`] and writes only the glyph runs that changed since the previous
//! frame. The first frame, and the first one after [`TerminalRenderer::invalidate`]
//! or a size change, clears the screen and writes everything.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::core::BoardSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::game_view::{GameView, Viewport};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    view: GameView,
    /// Frame being painted.
    next: FrameBuffer,
    /// Frame currently on screen; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new(view: GameView) -> Self {
        Self {
            stdout: io::stdout(),
            view,
            next: FrameBuffer::new(0, 0),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        self.out.clear();
        self.out.queue(terminal::EnterAlternateScreen)?;
        self.out.queue(cursor::Hide)?;
        self.out.queue(terminal::DisableLineWrap)?;
        self.flush().context("failed to enter the alternate screen")?;
        self.shown = None;
        Ok(())
    }

    /// Restore the terminal. Safe to call after a failed [`TerminalRenderer::enter`].
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(ResetColor)?;
        self.out.queue(terminal::EnableLineWrap)?;
        self.out.queue(cursor::Show)?;
        self.out.queue(terminal::LeaveAlternateScreen)?;
        self.flush().context("failed to leave the alternate screen")?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        Ok(())
    }

    /// Forget what is on screen so the next frame is written in full.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw one board frame; returns how many glyphs were written.
    pub fn present(&mut self, snap: &BoardSnapshot, viewport: Viewport) -> Result<usize> {
        self.view.render_into(snap, viewport, &mut self.next);

        self.out.clear();
        let written = encode_frame(self.shown.as_ref(), &self.next, &mut self.out)?;
        if !self.out.is_empty() {
            self.flush().context("failed to write board frame")?;
        }

        // The painted frame becomes the shown one; the old buffer is reused next time.
        match self.shown.as_mut() {
            Some(shown) => std::mem::swap(shown, &mut self.next),
            None => self.shown = Some(self.next.clone()),
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(GameView::default())
    }
}

/// Encode `next` into `out` as terminal commands; returns the number of glyphs written.
///
/// With a same-sized `prev` only the changed runs are encoded and identical
/// frames produce no output at all. Otherwise the screen is cleared first.
pub fn encode_frame(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> Result<usize> {
    let runs = match prev {
        Some(prev) if prev.same_size(next) => next.changed_runs(prev),
        _ => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            next.full_runs()
        }
    };
    if runs.is_empty() {
        return Ok(0);
    }

    let mut pen = Pen::default();
    let mut written = 0;
    for run in runs {
        out.queue(cursor::MoveTo(run.x, run.y))?;
        for x in run.x..run.x + run.len {
            let glyph = next.get(x, run.y).unwrap_or_default();
            pen.apply(out, glyph.style)?;
            out.queue(Print(glyph.ch))?;
            written += 1;
        }
    }

    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(ResetColor)?;
    Ok(written)
}

/// Last style sent to the terminal, so runs of equal style send it once.
#[derive(Default)]
struct Pen {
    current: Option<Style>,
}

impl Pen {
    fn apply(&mut self, out: &mut Vec<u8>, style: Style) -> Result<()> {
        if self.current == Some(style) {
            return Ok(());
        }
        // SGR reset clears colors too, so it goes first.
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(SetForegroundColor(color(style.fg)))?;
        out.queue(SetBackgroundColor(color(style.bg)))?;
        if style.bold {
            out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.current = Some(style);
        Ok(())
    }
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
