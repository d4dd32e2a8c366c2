//! PuzzleView: maps a `core::PuzzleSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{PuzzleSnapshot, TileSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Direction, RoundPhase, TileKind};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Rows above the frame: title line plus a spacer.
const HEADER_H: u16 = 2;

const FRAME_BG: Rgb = Rgb::new(60, 60, 80);
const EMPTY_BG: Rgb = Rgb::new(40, 40, 50);
const PLATFORM: Rgb = Rgb::new(180, 180, 180);

/// Where things land for a given snapshot and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    title_y: u16,
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
}

/// A lightweight terminal renderer for the route puzzle.
pub struct PuzzleView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for PuzzleView {
    fn default() -> Self {
        // 5x3 leaves a centre cell with one-cell arms on every side.
        Self {
            cell_w: 5,
            cell_h: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

impl PuzzleView {
    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn layout(&self, snap: &PuzzleSnapshot, viewport: Viewport) -> Layout {
        // Oversized grids clamp to the terminal coordinate range and clip.
        let frame_w = clamp_u16(snap.cols)
            .saturating_mul(self.cell_w)
            .saturating_add(2);
        let frame_h = clamp_u16(snap.rows)
            .saturating_mul(self.cell_h)
            .saturating_add(2);
        let block_h = HEADER_H.saturating_add(frame_h);

        let top = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(block_h) / 2,
            AnchorY::Top => 0,
        };

        Layout {
            title_y: top,
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: top.saturating_add(HEADER_H),
            frame_w,
            frame_h,
        }
    }

    /// Render a round into an existing framebuffer.
    ///
    /// `cursor` highlights the keyboard selection, if any.
    pub fn render_into(
        &self,
        snap: &PuzzleSnapshot,
        cursor: Option<(usize, usize)>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), FRAME_BG).into_cell(' '));

        let layout = self.layout(snap, viewport);

        self.draw_title(fb, snap, &layout);

        let border = CellStyle::new(Rgb::new(200, 200, 200), FRAME_BG);
        self.draw_border(
            fb,
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for row in 0..snap.rows {
            for col in 0..snap.cols {
                let Some(origin) = self.cell_origin(&layout, row, col) else {
                    continue;
                };
                if origin.0 >= viewport.width || origin.1 >= viewport.height {
                    continue;
                }
                match snap.tile(row, col) {
                    Some(tile) => self.draw_tile(fb, origin, tile, snap),
                    None => self.draw_empty_cell(fb, origin),
                }
            }
        }

        if let Some((row, col)) = cursor {
            if row < snap.rows && col < snap.cols {
                self.draw_cursor(fb, &layout, row, col);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        match snap.phase {
            RoundPhase::Failed if snap.showing_fail_message() => {
                let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(200, 80, 80)).bold();
                self.draw_overlay_text(fb, &layout, 0, " NOT CONNECTED! ", style);
            }
            RoundPhase::Cleared => {
                let style = CellStyle::new(Rgb::new(255, 215, 0), Rgb::new(0, 0, 0)).bold();
                self.draw_overlay_text(fb, &layout, 0, " CLEAR! ", style);
                let taps = format!(" {} taps - N: next ", snap.moves);
                let hint = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
                self.draw_overlay_text(fb, &layout, 1, &taps, hint);
            }
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &PuzzleSnapshot,
        cursor: Option<(usize, usize)>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    /// Map a terminal position (e.g. a mouse click) to a grid cell.
    pub fn hit_test(
        &self,
        snap: &PuzzleSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> Option<(usize, usize)> {
        let layout = self.layout(snap, viewport);
        let inner_x = x.checked_sub(layout.frame_x.saturating_add(1))?;
        let inner_y = y.checked_sub(layout.frame_y.saturating_add(1))?;
        let col = (inner_x / self.cell_w) as usize;
        let row = (inner_y / self.cell_h) as usize;
        (row < snap.rows && col < snap.cols).then_some((row, col))
    }

    /// Top-left corner of a tile box; `None` when the box does not fit in
    /// terminal coordinates.
    fn cell_origin(&self, layout: &Layout, row: usize, col: usize) -> Option<(u16, u16)> {
        let dx = u16::try_from(col).ok()?.checked_mul(self.cell_w)?;
        let dy = u16::try_from(row).ok()?.checked_mul(self.cell_h)?;
        let px = layout.frame_x.checked_add(1)?.checked_add(dx)?;
        let py = layout.frame_y.checked_add(1)?.checked_add(dy)?;
        px.checked_add(self.cell_w)?;
        py.checked_add(self.cell_h)?;
        Some((px, py))
    }

    fn draw_title(&self, fb: &mut FrameBuffer, snap: &PuzzleSnapshot, layout: &Layout) {
        let mut title = format!("LEVEL {}/{}", snap.level_number, snap.level_count);
        if let Some(name) = &snap.level_name {
            title.push_str("  ");
            title.push_str(name);
        }
        let w = title.chars().count() as u16;
        let x = layout
            .frame_x
            .saturating_add(layout.frame_w.saturating_sub(w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), FRAME_BG).bold();
        fb.put_str(x, layout.title_y, &title, style);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);

        // Only the visible part of each edge.
        for cx in x.saturating_add(1)..right.min(fb.width()) {
            fb.put_char(cx, y, '─', style);
            fb.put_char(cx, bottom, '─', style);
        }
        for cy in y.saturating_add(1)..bottom.min(fb.height()) {
            fb.put_char(x, cy, '│', style);
            fb.put_char(right, cy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, (px, py): (u16, u16)) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), EMPTY_BG).dim();
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        (px, py): (u16, u16),
        tile: &TileSnapshot,
        snap: &PuzzleSnapshot,
    ) {
        let cx = px + self.cell_w / 2;
        let cy = py + self.cell_h / 2;

        let kind = tile.visual;
        let bg = if kind.is_station() {
            PLATFORM
        } else {
            Rgb::from(tile.tint)
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', CellStyle::new(bg, bg));

        let mut track = CellStyle::new(Rgb::from(snap.line.color), bg);
        if tile.powered {
            track = track.bold();
        } else {
            track = track.dim();
        }

        let conns = kind.base_connections();
        for &dir in conns {
            match dir {
                Direction::Up => fb.fill_rect(cx, py, 1, cy - py, '┃', track),
                Direction::Down => fb.fill_rect(cx, cy + 1, 1, py + self.cell_h - cy - 1, '┃', track),
                Direction::Left => fb.fill_rect(px, cy, cx - px, 1, '━', track),
                Direction::Right => fb.fill_rect(cx + 1, cy, px + self.cell_w - cx - 1, 1, '━', track),
            }
        }

        match kind {
            TileKind::Start | TileKind::Goal => {
                let label = CellStyle::new(Rgb::new(50, 50, 50), bg).bold();
                let ch = if kind == TileKind::Start { 'S' } else { 'G' };
                fb.put_char(cx, cy, ch, label);
            }
            _ => fb.put_char(cx, cy, center_glyph(conns), track),
        }
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, layout: &Layout, row: usize, col: usize) {
        let Some((px, py)) = self.cell_origin(layout, row, col) else {
            return;
        };
        let right = px + self.cell_w - 1;
        let bottom = py + self.cell_h - 1;
        for (x, y, ch) in [(px, py, '┌'), (right, py, '┐'), (px, bottom, '└'), (right, bottom, '┘')] {
            let bg = fb.get(x, y).map(|c| c.style.bg).unwrap_or(FRAME_BG);
            fb.put_char(x, y, ch, CellStyle::new(Rgb::new(255, 215, 0), bg).bold());
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &PuzzleSnapshot,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout
            .frame_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), FRAME_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), FRAME_BG);
        let dim = value.dim();

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "TAPS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINE", label);
        y = y.saturating_add(1);
        let line_style = CellStyle::new(Rgb::from(snap.line.color), FRAME_BG);
        fb.put_str(panel_x, y, snap.line.name, line_style);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "KEYS", label);
        y = y.saturating_add(1);
        for help in [
            "arrows move",
            "space  rotate",
            "c      check",
            "r      retry",
            "n      next",
            "q      quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, help, dim);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        line: u16,
        text: &str,
        style: CellStyle,
    ) {
        let mid_y = layout
            .frame_y
            .saturating_add(layout.frame_h / 2)
            .saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = layout
            .frame_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y, text, style);
    }
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Junction glyph for a pair of connections.
fn center_glyph(conns: &[Direction]) -> char {
    let has = |d: Direction| conns.contains(&d);
    match (
        has(Direction::Up),
        has(Direction::Right),
        has(Direction::Down),
        has(Direction::Left),
    ) {
        (true, false, true, false) => '┃',
        (false, true, false, true) => '━',
        (false, true, true, false) => '┏',
        (false, false, true, true) => '┓',
        (true, false, false, true) => '┛',
        (true, true, false, false) => '┗',
        _ => '╋',
    }
}
