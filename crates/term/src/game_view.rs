//! GameView: draws a [`GameSnapshot`] into a framebuffer.
//!
//! Pure (no I/O), so layout is unit-testable. Each board cell is two columns
//! wide to roughly square up terminal glyphs.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const CELL_W: u16 = 2;
const FRAME_W: u16 = BOARD_WIDTH as u16 * CELL_W + 2;
const FRAME_H: u16 = BOARD_HEIGHT as u16 + 2;
const PANEL_GAP: u16 = 2;
const PANEL_W: u16 = 16;

const BORDER: Style = Style::fg(Rgb::new(200, 200, 200));
const WELL: Style = Style::fg(Rgb::new(70, 70, 80)).on(Rgb::new(20, 20, 28));
const LABEL: Style = Style::fg(Rgb::new(150, 150, 160));
const VALUE: Style = Style::fg(Rgb::new(240, 240, 240)).bold();
const OVERLAY: Style = Style::fg(Rgb::new(255, 255, 255))
    .on(Rgb::new(90, 40, 40))
    .bold();

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

/// Block color per piece kind
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::O => Rgb::new(240, 220, 60),
        PieceKind::I => Rgb::new(60, 210, 230),
        PieceKind::J => Rgb::new(70, 110, 230),
        PieceKind::L => Rgb::new(240, 150, 50),
        PieceKind::S => Rgb::new(90, 210, 90),
        PieceKind::Z => Rgb::new(230, 70, 70),
        PieceKind::T => Rgb::new(180, 90, 220),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Frame origin (top-left border corner) and whether the side panel fits.
    pub fn layout(&self, viewport: Viewport) -> (u16, u16, bool) {
        let with_panel = FRAME_W + PANEL_GAP + PANEL_W;
        let panel = viewport.width >= with_panel;
        let group_w = if panel { with_panel } else { FRAME_W };
        let x = viewport.width.saturating_sub(group_w) / 2;
        let y = viewport.height.saturating_sub(FRAME_H) / 2;
        (x, y, panel)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let (ox, oy, panel) = self.layout(viewport);
        fb.draw_box(ox, oy, FRAME_W, FRAME_H, BORDER);

        for (y, row) in snap.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let px = ox + 1 + x as u16 * CELL_W;
                let py = oy + 1 + y as u16;
                draw_cell(fb, px, py, *cell);
            }
        }

        if panel {
            self.draw_panel(fb, snap, ox + FRAME_W + PANEL_GAP, oy + 1);
        }

        if snap.paused {
            let text = " PAUSED ";
            let tx = ox + (FRAME_W.saturating_sub(text.len() as u16)) / 2;
            fb.put_str(tx, oy + FRAME_H / 2, text, OVERLAY);
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        fb.put_str(x, y, "SCORE", LABEL);
        fb.put_u32(x, y + 1, snap.score, VALUE);

        fb.put_str(x, y + 3, "LEVEL", LABEL);
        fb.put_u32(x, y + 4, snap.level, VALUE);

        fb.put_str(x, y + 6, "RECORD", LABEL);
        let name_end = x + PANEL_W;
        let mut cx = x;
        for ch in snap.record_player.chars() {
            if cx >= name_end {
                break;
            }
            fb.put(cx, y + 7, ch, VALUE);
            cx += 1;
        }
        fb.put_u32(x, y + 8, snap.record_score, VALUE);

        let help = [
            "\u{2190} \u{2192}  move",
            "\u{2193}    drop",
            "\u{2191}/Spc rotate",
            "P    pause",
            "Esc  quit",
        ];
        for (i, line) in help.iter().enumerate() {
            fb.put_str(x, y + 11 + i as u16, line, LABEL);
        }
    }
}

fn draw_cell(fb: &mut FrameBuffer, x: u16, y: u16, cell: Cell) {
    let (ch, style) = match cell {
        Cell::Empty => {
            fb.put(x, y, ' ', WELL);
            fb.put(x + 1, y, '.', WELL);
            return;
        }
        Cell::Locked(kind) => ('█', Style::fg(piece_color(kind))),
        Cell::Active(kind) => ('█', Style::fg(piece_color(kind)).bold()),
    };
    fb.put(x, y, ch, style);
    fb.put(x + 1, y, ch, style);
}
