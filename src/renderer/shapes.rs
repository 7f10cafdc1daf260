//! Raster primitives for fallback visuals, particles, the blade trail and
//! full-frame overlays

use glam::Vec2;

use super::raster::{FrameBuffer, Rgb};

/// Filled disc; pixels within `radius` of the centre
pub fn fill_circle(target: &mut FrameBuffer, center: (i64, i64), radius: i64, color: Rgb) {
    if radius < 0 {
        return;
    }
    let (cx, cy) = center;
    let r2 = radius * radius;
    let y_lo = (cy - radius).max(0);
    let y_hi = (cy + radius).min(target.height() as i64 - 1);
    for y in y_lo..=y_hi {
        let dy = y - cy;
        for x in (cx - radius)..=(cx + radius) {
            let dx = x - cx;
            if dx * dx + dy * dy <= r2 {
                target.put(x, y, color);
            }
        }
    }
}

/// Filled axis-aligned rectangle, both corners inclusive, clipped to target
pub fn fill_rect(target: &mut FrameBuffer, min: (i64, i64), max: (i64, i64), color: Rgb) {
    let x_lo = min.0.max(0);
    let y_lo = min.1.max(0);
    let x_hi = max.0.min(target.width() as i64 - 1);
    let y_hi = max.1.min(target.height() as i64 - 1);
    if x_lo > x_hi || y_lo > y_hi {
        return;
    }
    for y in y_lo..=y_hi {
        target.row_mut(y as usize)[x_lo as usize..=x_hi as usize].fill(color);
    }
}

/// Rectangle outline `thickness` pixels wide, drawn inside the corners
pub fn outline_rect(
    target: &mut FrameBuffer,
    min: (i64, i64),
    max: (i64, i64),
    thickness: i64,
    color: Rgb,
) {
    let t = thickness.max(1) - 1;
    fill_rect(target, min, (max.0, min.1 + t), color);
    fill_rect(target, (min.0, max.1 - t), max, color);
    fill_rect(target, min, (min.0 + t, max.1), color);
    fill_rect(target, (max.0 - t, min.1), max, color);
}

/// Filled square centred on `center` with the given half-width
pub fn fill_square(target: &mut FrameBuffer, center: Vec2, half_width: f32, color: Rgb) {
    let min = ((center.x - half_width) as i64, (center.y - half_width) as i64);
    let max = ((center.x + half_width) as i64, (center.y + half_width) as i64);
    fill_rect(target, min, max, color);
}

/// Thick line segment with round caps
pub fn draw_line(
    target: &mut FrameBuffer,
    from: (i64, i64),
    to: (i64, i64),
    thickness: i64,
    color: Rgb,
) {
    let radius = (thickness / 2).max(0);
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).max(1);
    for i in 0..=steps {
        let x = from.0 + dx * i / steps;
        let y = from.1 + dy * i / steps;
        fill_circle(target, (x, y), radius, color);
    }
}

/// Blend a solid colour over the whole frame: `dst = weight*color + (1-weight)*dst`
pub fn tint(target: &mut FrameBuffer, color: Rgb, weight: f32) {
    let weight = weight.clamp(0.0, 1.0);
    let inv = 1.0 - weight;
    let mix = |c: u8, d: u8| (weight * c as f32 + inv * d as f32).round() as u8;
    for y in 0..target.height() {
        for px in target.row_mut(y) {
            *px = Rgb::new(mix(color.r, px.r), mix(color.g, px.g), mix(color.b, px.b));
        }
    }
}

/// Exclamation mark glyph drawn over a bomb placeholder
pub fn bang_glyph(target: &mut FrameBuffer, center: (i64, i64), color: Rgb) {
    let (x, y) = center;
    fill_rect(target, (x - 2, y - 16), (x + 2, y + 2), color);
    fill_rect(target, (x - 2, y + 7), (x + 2, y + 11), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(target: &FrameBuffer, color: Rgb) -> usize {
        target.pixels().iter().filter(|p| **p == color).count()
    }

    #[test]
    fn test_fill_circle_clips_at_edges() {
        let mut target = FrameBuffer::filled(20, 20, Rgb::BLACK);
        fill_circle(&mut target, (0, 0), 5, Rgb::WHITE);
        assert_eq!(target.get(0, 0), Some(Rgb::WHITE));
        assert_eq!(target.get(5, 0), Some(Rgb::WHITE));
        assert_eq!(target.get(4, 4), Some(Rgb::BLACK));
        assert_eq!(target.get(6, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_fill_square_inclusive() {
        let mut target = FrameBuffer::filled(20, 20, Rgb::BLACK);
        fill_square(&mut target, Vec2::new(10.0, 10.0), 2.0, Rgb::WHITE);
        assert_eq!(count(&target, Rgb::WHITE), 25);
    }

    #[test]
    fn test_fill_rect_fully_outside_is_noop() {
        let mut target = FrameBuffer::filled(5, 5, Rgb::BLACK);
        fill_rect(&mut target, (10, 10), (20, 20), Rgb::WHITE);
        fill_rect(&mut target, (-9, -9), (-1, -1), Rgb::WHITE);
        assert_eq!(count(&target, Rgb::WHITE), 0);
    }

    #[test]
    fn test_tint_weights() {
        let mut target = FrameBuffer::filled(2, 2, Rgb::new(100, 100, 100));
        tint(&mut target, Rgb::new(255, 0, 0), 0.3);
        // 0.3*255 + 0.7*100 = 146.5, 0.7*100 = 70
        assert_eq!(target.get(1, 1), Some(Rgb::new(147, 70, 70)));
    }

    #[test]
    fn test_draw_line_covers_endpoints() {
        let mut target = FrameBuffer::filled(30, 30, Rgb::BLACK);
        draw_line(&mut target, (2, 2), (25, 20), 4, Rgb::WHITE);
        assert_eq!(target.get(2, 2), Some(Rgb::WHITE));
        assert_eq!(target.get(25, 20), Some(Rgb::WHITE));
        assert_eq!(target.get(28, 2), Some(Rgb::BLACK));
    }

    #[test]
    fn test_outline_rect_leaves_interior() {
        let mut target = FrameBuffer::filled(20, 20, Rgb::BLACK);
        outline_rect(&mut target, (2, 2), (17, 12), 2, Rgb::WHITE);
        assert_eq!(target.get(2, 2), Some(Rgb::WHITE));
        assert_eq!(target.get(3, 7), Some(Rgb::WHITE));
        assert_eq!(target.get(16, 11), Some(Rgb::WHITE));
        assert_eq!(target.get(4, 4), Some(Rgb::BLACK));
        assert_eq!(target.get(10, 7), Some(Rgb::BLACK));
        assert_eq!(target.get(18, 7), Some(Rgb::BLACK));
    }
}
