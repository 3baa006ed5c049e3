//! GameView / OrderingView: map game snapshots into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{OrderingSnapshot, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Position, SessionState, Symbol, BOARD_COLS, BOARD_ROWS};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 105);
const SELECTED_BG: Rgb = Rgb::new(150, 120, 40);
const FLASH_BG: Rgb = Rgb::new(225, 225, 225);

/// Narrowest side panel that still fits "SCORE" plus a gain like "1234 +90".
pub const PANEL_MIN_W: u16 = 10;
/// Columns between the board frame and the side panel.
const PANEL_GAP: u16 = 2;

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

/// Front-end state drawn on top of a snapshot.
///
/// For the ordering game `cursor.col` is the highlighted slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlay<'a> {
    pub cursor: Option<Position>,
    pub status: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the match-3 board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered board.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_COLS as u16) * self.cell_w + 2,
            (BOARD_ROWS as u16) * self.cell_h + 2,
        )
    }

    /// Left edge of the board frame.
    ///
    /// Board and side panel are centered as one block when both fit;
    /// otherwise the board alone is centered and the panel is dropped.
    pub fn frame_start_x(&self, viewport_width: u16) -> u16 {
        let (frame_w, _) = self.frame_size();
        let with_panel = frame_w + PANEL_GAP + PANEL_MIN_W;
        if viewport_width >= with_panel {
            (viewport_width - with_panel) / 2
        } else {
            viewport_width.saturating_sub(frame_w) / 2
        }
    }

    /// Render the current session into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        overlay: &Overlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let start_x = self.frame_start_x(viewport.width);
        let start_y = anchor_start_y(self.anchor_y, viewport, frame_h + 1);

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for row in 0..BOARD_ROWS {
            for col in 0..BOARD_COLS {
                let pos = Position::new(row, col);
                let bg = if snap.selection == Some(pos) {
                    SELECTED_BG
                } else if overlay.cursor == Some(pos) {
                    CURSOR_BG
                } else if snap.is_flashing(pos) {
                    FLASH_BG
                } else {
                    PLAY_BG
                };
                match snap.symbol_at(pos) {
                    Some(symbol) => self.draw_symbol(fb, start_x, start_y, pos, symbol, bg),
                    None => self.draw_empty_cell(fb, start_x, start_y, pos, bg),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if let Some(status) = overlay.status {
            draw_status(fb, start_x, start_y + frame_h, frame_w, status);
        }

        match snap.state {
            SessionState::NotStarted => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PRESS R")
            }
            SessionState::Ended => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            SessionState::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, overlay: &Overlay<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn cell_origin(&self, start_x: u16, start_y: u16, pos: Position) -> (u16, u16) {
        (
            start_x + 1 + (pos.col as u16) * self.cell_w,
            start_y + 1 + (pos.row as u16) * self.cell_h,
        )
    }

    fn draw_symbol(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: Position,
        symbol: Symbol,
        bg: Rgb,
    ) {
        let (px, py) = self.cell_origin(start_x, start_y, pos);
        let style = CellStyle::new(symbol_color(symbol), bg).bold();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(
            px + (self.cell_w - 1) / 2,
            py + (self.cell_h - 1) / 2,
            symbol_glyph(symbol),
            style,
        );
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, pos: Position, bg: Rgb) {
        let (px, py) = self.cell_origin(start_x, start_y, pos);
        let style = CellStyle::new(Rgb::new(90, 90, 100), bg).dim();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px + (self.cell_w - 1) / 2, py + (self.cell_h - 1) / 2, '·', style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &SessionSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(PANEL_GAP);
        if viewport.width.saturating_sub(panel_x) < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        let used = fb.put_u32(panel_x, y, snap.score, value);
        if snap.flash != 0 && snap.last_score_delta > 0 {
            let gain = CellStyle::new(Rgb::new(120, 220, 120), Rgb::new(0, 0, 0)).bold();
            fb.put_char(panel_x + used + 1, y, '+', gain);
            fb.put_u32(panel_x + used + 2, y, snap.last_score_delta, gain);
        }
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        let used = fb.put_u32(panel_x, y, snap.moves_left, value);
        fb.put_char(panel_x + used, y, '/', value.dim());
        fb.put_u32(panel_x + used + 1, y, snap.moves_total, value.dim());
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "GAME", label);
        y = y.saturating_add(1);
        fb.put_char(panel_x, y, '#', value.dim());
        fb.put_u32(panel_x + 1, y, snap.game_id + 1, value);
    }
}

/// Terminal renderer for the number-ordering game.
pub struct OrderingView {
    anchor_y: AnchorY,
}

impl Default for OrderingView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl OrderingView {
    const MIN_FRAME_W: u16 = 38;
    const FRAME_H: u16 = 11;

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Columns used by one "n:value" slot, including the gap after it
    fn slot_width(snap: &OrderingSnapshot) -> u16 {
        let widest = snap.numbers().iter().copied().max().unwrap_or(0);
        2 + digit_count(widest) + 2
    }

    pub fn frame_size(&self, snap: &OrderingSnapshot) -> (u16, u16) {
        let slots = Self::slot_width(snap) * snap.count as u16 + 4;
        (slots.max(Self::MIN_FRAME_W), Self::FRAME_H)
    }

    pub fn render_into(
        &self,
        snap: &OrderingSnapshot,
        overlay: &Overlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = anchor_start_y(self.anchor_y, viewport, frame_h + 1);

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let x = start_x + 2;
        let mut y = start_y + 1;
        fb.put_str(x, y, "ORDER THE NUMBERS", label);
        y += 2;

        fb.put_str(x, y, "ROUND", label);
        let mut cx = x + 6;
        cx += fb.put_u32(cx, y, snap.round, value);
        fb.put_char(cx, y, '/', value.dim());
        fb.put_u32(cx + 1, y, snap.rounds, value.dim());
        fb.put_str(x + 18, y, "SCORE", label);
        fb.put_u32(x + 24, y, snap.score, value);
        y += 2;

        let slot_w = Self::slot_width(snap);
        let cursor_slot = overlay.cursor.map(|p| p.col as usize);
        for (i, &n) in snap.numbers().iter().enumerate() {
            let sx = x + (i as u16) * slot_w;
            let mut style = CellStyle::new(Rgb::new(240, 210, 90), Rgb::new(0, 0, 0)).bold();
            if snap.is_picked(n) {
                style = CellStyle::new(Rgb::new(110, 110, 120), Rgb::new(0, 0, 0)).dim();
            }
            if cursor_slot == Some(i) && snap.state == SessionState::Playing {
                style.bg = CURSOR_BG;
            }
            let used = fb.put_u32(sx, y, i as u32 + 1, value.dim());
            fb.put_char(sx + used, y, ':', value.dim());
            fb.put_u32(sx + used + 1, y, n, style);
        }
        y += 2;

        fb.put_str(x, y, "ORDER", label);
        let mut cx = x + 6;
        for &n in snap.picks() {
            cx += fb.put_u32(cx, y, n, value) + 1;
        }
        y += 2;

        match snap.verdict {
            Some(true) => fb.put_str(
                x,
                y,
                "CORRECT",
                CellStyle::new(Rgb::new(120, 220, 120), Rgb::new(0, 0, 0)).bold(),
            ),
            Some(false) => fb.put_str(
                x,
                y,
                "WRONG",
                CellStyle::new(Rgb::new(230, 80, 80), Rgb::new(0, 0, 0)).bold(),
            ),
            None if snap.picked == snap.count && snap.count > 0 => {
                fb.put_str(x, y, "ENTER TO CHECK", value.dim())
            }
            None => fb.put_str(x, y, "1-9 PICK  ESC RESET", value.dim()),
        }

        if let Some(status) = overlay.status {
            draw_status(fb, start_x, start_y + frame_h, frame_w, status);
        }

        match snap.state {
            SessionState::NotStarted => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PRESS R")
            }
            SessionState::Ended => {
                draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            SessionState::Playing => {}
        }
    }

    pub fn render(&self, snap: &OrderingSnapshot, overlay: &Overlay<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }
}

/// Glyph drawn for each symbol.
pub fn symbol_glyph(symbol: Symbol) -> char {
    match symbol {
        Symbol::Candy => '●',
        Symbol::Lollipop => '◆',
        Symbol::Chocolate => '■',
        Symbol::Donut => '○',
        Symbol::Cookie => '▲',
        Symbol::Cupcake => '♥',
    }
}

/// Foreground colour for each symbol.
pub fn symbol_color(symbol: Symbol) -> Rgb {
    match symbol {
        Symbol::Candy => Rgb::new(230, 70, 70),
        Symbol::Lollipop => Rgb::new(240, 120, 200),
        Symbol::Chocolate => Rgb::new(165, 105, 60),
        Symbol::Donut => Rgb::new(240, 210, 90),
        Symbol::Cookie => Rgb::new(255, 165, 0),
        Symbol::Cupcake => Rgb::new(110, 200, 230),
    }
}

fn anchor_start_y(anchor: AnchorY, viewport: Viewport, content_h: u16) -> u16 {
    match anchor {
        AnchorY::Center => viewport.height.saturating_sub(content_h) / 2,
        AnchorY::Top => 0,
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

/// One line directly below the frame, truncated to the frame width
fn draw_status(fb: &mut FrameBuffer, start_x: u16, y: u16, frame_w: u16, text: &str) {
    let style = CellStyle::new(Rgb::new(240, 200, 120), Rgb::new(0, 0, 0));
    for (i, ch) in text.chars().take(frame_w as usize).enumerate() {
        fb.put_char(start_x + i as u16, y, ch, style);
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, mid_y, text, style);
}
