//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH, MOVING_OFFSET, PIECE_SIZE};
use grid_tetris_input::KEY_HELP;

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Glyphs of the line-clear fade, from solid to gone.
const FADE_GLYPHS: [char; 4] = ['▓', '▒', '░', ' '];

/// Minimum side panel width; narrower terminals get the board only.
const PANEL_MIN_W: u16 = 14;

/// Width of the move counter bar in the side panel
const COUNT_BAR_W: u16 = 10;

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

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
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

/// Display color for a piece color index (1-9). Anything else is drawn gray.
pub fn color_rgb(color: u8) -> Rgb {
    match color {
        1 => Rgb::new(60, 100, 230),  // blue
        2 => Rgb::new(80, 220, 220),  // aqua
        3 => Rgb::new(100, 220, 120), // green
        4 => Rgb::new(240, 220, 80),  // yellow
        5 => Rgb::new(255, 165, 0),   // orange
        6 => Rgb::new(220, 70, 70),   // red
        7 => Rgb::new(210, 90, 210),  // magenta
        8 => Rgb::new(150, 150, 150), // gray
        9 => Rgb::new(245, 245, 245), // white
        _ => Rgb::new(120, 120, 120),
    }
}

/// Split a raw cell value into (color, falling). `None` when empty or invalid.
fn decode_cell(v: u8) -> Option<(u8, bool)> {
    match v {
        1..=9 => Some((v, false)),
        11..=19 => Some((v - MOVING_OFFSET, true)),
        _ => None,
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered board frame in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let panel_room = frame_w + 2 + PANEL_MIN_W;
        let start_x = if viewport.width >= panel_room {
            viewport.width.saturating_sub(panel_room) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        // Background for play area.
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            bg,
        );

        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let clearing = snap.clearing();
        for y in 0..BOARD_HEIGHT as u16 {
            let fade = match clearing {
                Some((row, frame)) if row == y as usize => Some(frame),
                _ => None,
            };
            for x in 0..BOARD_WIDTH as u16 {
                match decode_cell(snap.board[y as usize][x as usize]) {
                    Some((color, falling)) => match fade {
                        Some(frame) => self.draw_fading_cell(
                            fb,
                            start_x,
                            start_y,
                            x,
                            y,
                            color,
                            frame,
                            snap.clear_fade_frames,
                        ),
                        None => self.draw_board_cell(fb, start_x, start_y, x, y, color, falling),
                    },
                    None => self.draw_empty_cell(fb, start_x, start_y, x, y),
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        // Overlays.
        if snap.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
            self.draw_overlay_line(
                fb,
                start_x,
                start_y.saturating_add(frame_h / 2 + 1),
                frame_w,
                "Backspace: restart",
            );
        } else if snap.help_visible {
            self.draw_help(fb, start_x, start_y, frame_w, frame_h);
        } else if snap.paused {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, start_x, start_y, x, y, '·', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        color: u8,
        falling: bool,
    ) {
        let mut style = CellStyle::new(color_rgb(color), PLAY_BG);
        if falling {
            style = style.bold();
        }
        self.fill_cell_rect(fb, start_x, start_y, x, y, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_fading_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        color: u8,
        frame: u32,
        frames: u32,
    ) {
        let frames = frames.max(1);
        let step = (frame.min(frames) as usize * FADE_GLYPHS.len()) / frames as usize;
        let ch = FADE_GLYPHS[step.min(FADE_GLYPHS.len() - 1)];
        let t = ((frame.min(frames) * 255) / frames) as u8;
        let style = CellStyle::new(Rgb::new(255, 255, 255).mix(color_rgb(color), t), PLAY_BG);
        self.fill_cell_rect(fb, start_x, start_y, x, y, ch, style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < PANEL_MIN_W {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "POS", label);
        y = y.saturating_add(1);
        let cx = fb.put_i32(panel_x, y, snap.piece_x as i32, value);
        let cx = fb.put_str(cx, y, ", ", value);
        fb.put_i32(cx, y, snap.piece_y as i32, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SPEED", label);
        y = y.saturating_add(1);
        let cx = fb.put_u32(panel_x, y, snap.speed_ms, value);
        fb.put_str(cx, y, " ms", dim);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "COUNT", label);
        y = y.saturating_add(1);
        self.draw_count_bar(fb, panel_x, y, snap.counter, snap.count_max);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECE", label);
        y = y.saturating_add(1);
        for (dy, row) in snap.piece.iter().enumerate() {
            for (dx, &v) in row.iter().enumerate() {
                if let Some((color, _)) = decode_cell(v) {
                    let style = CellStyle::new(color_rgb(color), PANEL_BG);
                    self.draw_preview_cell(fb, panel_x, y, dx, dy, style);
                }
            }
        }
        y = y.saturating_add(PIECE_SIZE as u16 + 1);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let next_style = CellStyle::new(Rgb::new(170, 170, 170), PANEL_BG);
        for (dy, row) in snap.next_piece.iter().enumerate() {
            for (dx, &bit) in row.iter().enumerate() {
                if bit != 0 {
                    self.draw_preview_cell(fb, panel_x, y, dx, dy, next_style);
                }
            }
        }
    }

    fn draw_preview_cell(
        &self,
        fb: &mut FrameBuffer,
        x0: u16,
        y0: u16,
        dx: usize,
        dy: usize,
        style: CellStyle,
    ) {
        let px = x0.saturating_add(dx as u16 * self.cell_w);
        let py = y0.saturating_add(dy as u16);
        fb.fill_rect(px, py, self.cell_w, 1, '█', style);
    }

    fn draw_count_bar(&self, fb: &mut FrameBuffer, x: u16, y: u16, counter: u32, max: u32) {
        let filled = if max == 0 {
            0
        } else {
            ((counter.min(max) as u64 * COUNT_BAR_W as u64) / max as u64) as u16
        };
        let on = CellStyle::new(Rgb::new(100, 200, 120), PANEL_BG);
        let off = CellStyle::new(Rgb::new(70, 70, 80), PANEL_BG).dim();
        for i in 0..COUNT_BAR_W {
            if i < filled {
                fb.put_char(x + i, y, '■', on);
            } else {
                fb.put_char(x + i, y, '·', off);
            }
        }
    }

    fn draw_help(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let title = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let keys = CellStyle::new(Rgb::new(240, 220, 80), PANEL_BG);
        let desc = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG);

        let rows = KEY_HELP.len() as u16 * 2 + 2;
        let mut y = start_y.saturating_add(frame_h.saturating_sub(rows) / 2);
        let x = start_x.saturating_add(2);
        let w = frame_w.saturating_sub(4);

        fb.fill_rect(x, y, w, rows, ' ', desc);
        self.draw_overlay_line_styled(fb, start_x, y, frame_w, "HELP", title);
        y = y.saturating_add(2);
        for (k, d) in KEY_HELP {
            fb.put_str(x + 1, y, k, keys);
            fb.put_str(x + 3, y + 1, d, desc);
            y = y.saturating_add(2);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        self.draw_overlay_line_styled(fb, start_x, mid_y, frame_w, text, style);
    }

    fn draw_overlay_line(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        y: u16,
        frame_w: u16,
        text: &str,
    ) {
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        self.draw_overlay_line_styled(fb, start_x, y, frame_w, text, style);
    }

    fn draw_overlay_line_styled(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        y: u16,
        frame_w: u16,
        text: &str,
        style: CellStyle,
    ) {
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, y, text, style);
    }
}
