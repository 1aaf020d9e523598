use ratatui::layout::Rect;

/// Places a `width` x `height` popover next to `anchor` inside `bounds`.
///
/// Prefers the rows below the anchor, flips above when only that side has room, and otherwise
/// stays below and gets clipped. The popover is shifted left if it would leave `bounds`.
pub fn place(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let below = anchor.bottom().max(bounds.y);
    let room_below = bounds.bottom().saturating_sub(below);
    let room_above = anchor.y.saturating_sub(bounds.y);

    let (y, h) = if room_below >= height {
        (below, height)
    } else if room_above >= height {
        (anchor.y - height, height)
    } else {
        (below.min(bounds.bottom()), height.min(room_below))
    };

    let max_x = bounds.right().saturating_sub(width).max(bounds.x);
    let x = anchor.x.clamp(bounds.x, max_x);
    Rect::new(x, y, width, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_below_when_there_is_room() {
        let r = place(Rect::new(2, 1, 20, 1), 24, 10, Rect::new(0, 0, 80, 24));
        assert_eq!(r, Rect::new(2, 2, 24, 10));
    }

    #[test]
    fn flips_above_near_the_bottom() {
        let r = place(Rect::new(2, 20, 20, 1), 24, 10, Rect::new(0, 0, 80, 24));
        assert_eq!(r, Rect::new(2, 10, 24, 10));
    }

    #[test]
    fn clips_when_neither_side_fits() {
        let r = place(Rect::new(0, 3, 20, 1), 24, 10, Rect::new(0, 0, 80, 8));
        assert_eq!(r, Rect::new(0, 4, 24, 4));
    }

    #[test]
    fn shifts_left_at_the_right_edge() {
        let r = place(Rect::new(70, 0, 10, 1), 24, 10, Rect::new(0, 0, 80, 24));
        assert_eq!(r.x, 56);
        assert_eq!(r.right(), 80);
    }
}
