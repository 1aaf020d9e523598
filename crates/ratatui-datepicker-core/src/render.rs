use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

/// Writes `s` at `(x, y)` without exceeding `max_cols` display columns. A wide character that
/// would straddle the limit is dropped. Returns the number of columns written.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    s: &str,
    style: Style,
) -> u16 {
    let mut dx = 0u16;
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if dx + w > max_cols {
            break;
        }
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_style(style);
            cell.set_symbol(&ch.to_string());
        }
        if w == 2 {
            if let Some(cell) = buf.cell_mut((x + dx + 1, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
        }
        dx += w;
    }
    dx
}

/// Writes `s` horizontally centered in the first row of `area`, clipped to its width.
pub fn render_centered(area: Rect, buf: &mut Buffer, s: &str, style: Style) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let w = (UnicodeWidthStr::width(s).min(area.width as usize)) as u16;
    let x = area.x + (area.width - w) / 2;
    render_str_clipped(x, area.y, area.width - (x - area.x), buf, s, style);
}

/// Column offset of the `n`-th of `count` equal-width columns spread over `width`.
pub fn column_offset(width: u16, count: u16, n: u16) -> u16 {
    if count == 0 {
        return 0;
    }
    ((width as u32 * n as u32) / count as u32) as u16
}
