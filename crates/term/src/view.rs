//! BoardView: maps a `BoardSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::BoardSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::ShapeKind;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

/// Block colours indexed by `ShapeKind::code() - 1`.
const KIND_COLORS: [Rgb; 7] = [
    Rgb::new(80, 220, 220),
    Rgb::new(240, 220, 80),
    Rgb::new(200, 120, 220),
    Rgb::new(100, 220, 120),
    Rgb::new(220, 80, 80),
    Rgb::new(80, 120, 220),
    Rgb::new(255, 165, 0),
];

fn kind_color(kind: ShapeKind) -> Rgb {
    KIND_COLORS[kind.code() as usize - 1]
}

/// Where the bordered board lands inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// Draws a bordered board with a score/next side panel.
pub struct BoardView {
    /// Terminal columns per board cell.
    cell_w: u16,
    /// Terminal rows per board cell.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer size of the bordered board for a snapshot.
    pub fn frame_size(&self, snap: &BoardSnapshot) -> (u16, u16) {
        (
            snap.width as u16 * self.cell_w + 2,
            snap.height as u16 * self.cell_h + 2,
        )
    }

    fn place(&self, snap: &BoardSnapshot, viewport: Viewport) -> Frame {
        let (w, h) = self.frame_size(snap);
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &BoardSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.place(snap, viewport);
        draw_border(fb, frame, CellStyle::default().fg(Rgb::new(200, 200, 200)));

        // Locked cells and the active piece share one pass over the overlay.
        let empty = CellStyle::default()
            .fg(Rgb::new(90, 90, 100))
            .bg(PLAY_BG)
            .dim();
        for (y, row) in snap.overlay().iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let (ch, style) = match ShapeKind::from_code(code) {
                    Some(kind) => ('█', CellStyle::default().fg(kind_color(kind)).bg(PLAY_BG).bold()),
                    None => ('·', empty),
                };
                fb.fill_rect(
                    frame.x + 1 + x as u16 * self.cell_w,
                    frame.y + 1 + y as u16 * self.cell_h,
                    self.cell_w,
                    self.cell_h,
                    ch,
                    style,
                );
            }
        }

        draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over {
            let text = "GAME OVER";
            let x = frame.x + frame.w.saturating_sub(text.len() as u16) / 2;
            let style = CellStyle::default()
                .fg(Rgb::new(255, 255, 255))
                .bg(Rgb::new(0, 0, 0))
                .bold();
            fb.put_str(x, frame.y + frame.h / 2, text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &BoardSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.fill_rect(x + 1, y, w - 2, 1, '─', style);
    fb.fill_rect(x + 1, bottom, w - 2, 1, '─', style);
    fb.fill_rect(x, y + 1, 1, h - 2, '│', style);
    fb.fill_rect(right, y + 1, 1, h - 2, '│', style);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
}

/// Label/value pairs to the right of the board, skipped when they do not fit.
fn draw_side_panel(fb: &mut FrameBuffer, snap: &BoardSnapshot, viewport: Viewport, frame: Frame) {
    const PANEL_MIN_W: u16 = 8;

    let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
    if viewport.width.saturating_sub(panel_x) < PANEL_MIN_W {
        return;
    }

    let label = CellStyle::default().bold();
    let value = CellStyle::default().fg(Rgb::new(200, 200, 200));
    let entries = [
        ("SCORE", snap.score.to_string(), value),
        ("LINES", snap.lines.to_string(), value),
        (
            "NEXT",
            snap.next.as_str().to_ascii_uppercase(),
            value.fg(kind_color(snap.next)),
        ),
    ];

    for (i, (name, text, style)) in entries.iter().enumerate() {
        let y = frame.y.saturating_add(i as u16 * 3);
        fb.put_str(panel_x, y, name, label);
        fb.put_str(panel_x, y.saturating_add(1), text, *style);
    }
}
