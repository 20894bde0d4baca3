//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or [`TerminalRenderer::invalidate`])
//! is a full redraw; later frames only rewrite the runs of cells that changed.
//! Encoding goes into a byte buffer first so each frame reaches the terminal
//! in a single write.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written, the diff base for the next one.
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.write_out()
    }

    /// Restore the terminal. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw a frame, diffing against the previous one when sizes match.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.out.clear();
        match self.shown.as_ref() {
            Some(prev) if prev.size() == fb.size() => encode_diff_into(prev, fb, &mut self.out)?,
            _ => encode_full_into(fb, &mut self.out)?,
        }
        self.write_out()?;

        match self.shown.as_mut() {
            Some(prev) => prev.clone_from(fb),
            None => self.shown = Some(fb.clone()),
        }
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        let mut lock = self.stdout.lock();
        lock.write_all(&self.out)?;
        lock.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Queues styled text, emitting style changes only at boundaries.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
    text: String,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self {
            out,
            style: None,
            text: String::new(),
        }
    }

    fn move_to(&mut self, x: u16, y: u16) -> Result<()> {
        self.flush_text()?;
        self.out.queue(cursor::MoveTo(x, y))?;
        Ok(())
    }

    fn paint(&mut self, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                self.flush_text()?;
                queue_style(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            self.text.push(cell.ch);
        }
        Ok(())
    }

    fn flush_text(&mut self) -> Result<()> {
        if !self.text.is_empty() {
            self.out.queue(Print(&self.text))?;
            self.text.clear();
        }
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        self.flush_text()?;
        self.out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut painter = Painter::new(out);
    for y in 0..fb.height() {
        painter.move_to(0, y)?;
        painter.paint(fb.row(y))?;
    }
    painter.finish()
}

/// Encode only the changed runs between two equally sized frames into `out`.
///
/// Frames of different sizes are redrawn in full.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    if prev.size() != next.size() {
        return encode_full_into(next, out);
    }

    let mut painter = Painter::new(out);
    for y in 0..next.height() {
        let row = next.row(y);
        for run in changed_runs(prev.row(y), row) {
            painter.move_to(run.start as u16, y)?;
            painter.paint(&row[run])?;
        }
    }
    painter.finish()
}

/// Maximal column ranges where `before` and `after` differ.
fn changed_runs<'a>(before: &'a [Cell], after: &'a [Cell]) -> impl Iterator<Item = Range<usize>> + 'a {
    let len = after.len();
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < len && before.get(x) == Some(&after[x]) {
            x += 1;
        }
        if x >= len {
            return None;
        }
        let start = x;
        while x < len && before.get(x) != Some(&after[x]) {
            x += 1;
        }
        Some(start..x)
    })
}

fn queue_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?
        .queue(SetForegroundColor(color(style.fg)))?
        .queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let a = FrameBuffer::new(6, 1);
        let mut b = a.clone();
        for x in [1, 2, 3, 5] {
            b.put_char(x, 0, 'X', CellStyle::default());
        }

        let runs: Vec<_> = changed_runs(a.row(0), b.row(0)).collect();
        assert_eq!(runs, vec![1..4, 5..6]);
    }

    #[test]
    fn identical_frames_encode_no_cells() {
        let a = FrameBuffer::new(4, 2);
        let mut diff = Vec::new();
        encode_diff_into(&a, &a.clone(), &mut diff).unwrap();

        let mut full = Vec::new();
        encode_full_into(&a, &mut full).unwrap();
        assert!(diff.len() < full.len());
    }

    #[test]
    fn diff_writes_only_changed_text() {
        let a = FrameBuffer::new(8, 2);
        let mut b = a.clone();
        b.put_str(2, 1, "ok", CellStyle::default().bold());

        let mut diff = Vec::new();
        encode_diff_into(&a, &b, &mut diff).unwrap();
        let text = String::from_utf8_lossy(&diff);
        assert!(text.contains("ok"));
        assert_eq!(text.matches('o').count(), 1);
    }
}
