use ratatui::layout::Rect;

/// Places a `width` x `height` box under `anchor`, flipping above it when
/// the space below is too short, and clamping into `bounds`.
pub fn anchored_rect(anchor: Rect, width: u16, height: u16, bounds: Rect) -> Rect {
    let width = width.min(bounds.width);
    let height = height.min(bounds.height);

    let below = anchor.bottom();
    let space_below = bounds.bottom().saturating_sub(below);
    let space_above = anchor.y.saturating_sub(bounds.y);
    let y = if space_below >= height || space_below >= space_above {
        below.min(bounds.bottom().saturating_sub(height))
    } else {
        anchor.y.saturating_sub(height).max(bounds.y)
    };

    let max_x = bounds.right().saturating_sub(width);
    let x = anchor.x.clamp(bounds.x, max_x.max(bounds.x));
    Rect::new(x, y, width, height)
}
