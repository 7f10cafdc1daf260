//! Sprite compositor
//!
//! Blits transparent, optionally rotated sprites onto a frame buffer. A
//! placement that would overflow the target on any side is skipped entirely
//! rather than clipped.

use bytemuck::Pod;

use super::raster::{FrameBuffer, Raster, Rgb, Rgba, Sprite};

/// Composite `sprite` centred at (`center_x`, `center_y`), rotated by
/// `angle_degrees` (counter-clockwise on screen).
///
/// Returns false when nothing was drawn because the placement overflowed.
pub fn blit(
    target: &mut FrameBuffer,
    sprite: &Sprite,
    center_x: f32,
    center_y: f32,
    angle_degrees: f32,
) -> bool {
    let rotated;
    let sprite = if angle_degrees != 0.0 {
        rotated = rotate(sprite, angle_degrees);
        &rotated
    } else {
        sprite
    };

    let (w, h) = (sprite.width() as i64, sprite.height() as i64);
    // Truncation toward zero, matching integer conversion of the float corner
    let x = (center_x - w as f32 / 2.0) as i64;
    let y = (center_y - h as f32 / 2.0) as i64;

    if x < 0 || y < 0 || x + w > target.width() as i64 || y + h > target.height() as i64 {
        return false;
    }
    let (x, y) = (x as usize, y as usize);

    match sprite {
        Sprite::Opaque(src) => copy_region(target, src, x, y),
        Sprite::Transparent(src) => blend_region(target, src, x, y),
    }
    true
}

/// Overwrite the destination region with an opaque sprite
fn copy_region(target: &mut FrameBuffer, src: &Raster<Rgb>, x: usize, y: usize) {
    let w = src.width();
    for row in 0..src.height() {
        target.row_mut(y + row)[x..x + w].copy_from_slice(src.row(row));
    }
}

/// `dst = alpha * src + (1 - alpha) * dst` per channel, alpha in [0, 1]
fn blend_region(target: &mut FrameBuffer, src: &Raster<Rgba>, x: usize, y: usize) {
    let w = src.width();
    for row in 0..src.height() {
        let dst_row = &mut target.row_mut(y + row)[x..x + w];
        for (dst, s) in dst_row.iter_mut().zip(src.row(row)) {
            let alpha = s.a as f32 / 255.0;
            let inv = 1.0 - alpha;
            *dst = Rgb::new(
                (alpha * s.r as f32 + inv * dst.r as f32) as u8,
                (alpha * s.g as f32 + inv * dst.g as f32) as u8,
                (alpha * s.b as f32 + inv * dst.b as f32) as u8,
            );
        }
    }
}

/// Rotate a sprite about its centre, growing the canvas to the rotated
/// bounding box so no corner is lost. Uncovered pixels are zero (fully
/// transparent for RGBA sprites).
pub fn rotate(sprite: &Sprite, angle_degrees: f32) -> Sprite {
    match sprite {
        Sprite::Opaque(src) => Sprite::Opaque(rotate_raster(src, angle_degrees)),
        Sprite::Transparent(src) => Sprite::Transparent(rotate_raster(src, angle_degrees)),
    }
}

/// Rotated canvas size for a `w`×`h` image
pub fn rotated_bounds(w: usize, h: usize, angle_degrees: f32) -> (usize, usize) {
    let (sin, cos) = (angle_degrees as f64).to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    let (w, h) = (w as f64, h as f64);
    ((h * sin + w * cos) as usize, (h * cos + w * sin) as usize)
}

fn rotate_raster<P: Pod>(src: &Raster<P>, angle_degrees: f32) -> Raster<P> {
    let channels = std::mem::size_of::<P>();
    debug_assert!(channels <= 4);

    let (w, h) = (src.width(), src.height());
    let (new_w, new_h) = rotated_bounds(w, h, angle_degrees);
    let mut out = Raster::filled(new_w, new_h, P::zeroed());

    let (sin, cos) = (angle_degrees as f64).to_radians().sin_cos();
    // Pivot at the integer centre; the canvas offset re-centres the result
    let (cx, cy) = ((w / 2) as f64, (h / 2) as f64);
    let tx = (1.0 - cos) * cx - sin * cy + (new_w as f64 / 2.0 - w as f64 / 2.0);
    let ty = sin * cx + (1.0 - cos) * cy + (new_h as f64 / 2.0 - h as f64 / 2.0);

    for dy in 0..new_h {
        for dx in 0..new_w {
            // Inverse of [[cos, sin], [-sin, cos]] applied to (dst - t)
            let px = dx as f64 - tx;
            let py = dy as f64 - ty;
            let sx = cos * px - sin * py;
            let sy = sin * px + cos * py;
            if let Some(pixel) = sample_bilinear(src, sx, sy, channels) {
                out.put(dx as i64, dy as i64, pixel);
            }
        }
    }
    out
}

/// Bilinear sample with a zero border; None when all four taps are outside
fn sample_bilinear<P: Pod>(src: &Raster<P>, sx: f64, sy: f64, channels: usize) -> Option<P> {
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    let mut acc = [0.0f64; 4];
    let mut any = false;
    for (x, y, weight) in taps {
        if let Some(pixel) = src.get_signed(x, y) {
            any = true;
            for (c, byte) in bytemuck::bytes_of(&pixel).iter().enumerate() {
                acc[c] += weight * *byte as f64;
            }
        }
    }
    if !any {
        return None;
    }

    let mut bytes = [0u8; 4];
    for c in 0..channels {
        bytes[c] = acc[c].round().clamp(0.0, 255.0) as u8;
    }
    Some(bytemuck::pod_read_unaligned(&bytes[..channels]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_rgba(size: usize, color: Rgba) -> Sprite {
        Sprite::Transparent(Raster::filled(size, size, color))
    }

    #[test]
    fn test_opaque_sprite_inside_copies_source() {
        let mut target = FrameBuffer::filled(100, 100, Rgb::new(10, 20, 30));
        let sprite = solid_rgba(50, Rgba::new(200, 100, 50, 255));
        assert!(blit(&mut target, &sprite, 50.0, 50.0, 0.0));

        for y in 25..75 {
            for x in 25..75 {
                assert_eq!(target.get(x, y), Some(Rgb::new(200, 100, 50)));
            }
        }
        assert_eq!(target.get(24, 50), Some(Rgb::new(10, 20, 30)));
        assert_eq!(target.get(75, 50), Some(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn test_overflow_leaves_target_unchanged() {
        let background = FrameBuffer::filled(100, 100, Rgb::new(1, 2, 3));
        let sprite = solid_rgba(50, Rgba::new(255, 255, 255, 255));

        for (cx, cy) in [(10.0, 50.0), (50.0, 10.0), (90.0, 50.0), (50.0, 90.0)] {
            let mut target = background.clone();
            assert!(!blit(&mut target, &sprite, cx, cy, 0.0));
            assert_eq!(target, background);
        }
    }

    #[test]
    fn test_half_alpha_blends() {
        let mut target = FrameBuffer::filled(10, 10, Rgb::new(0, 0, 0));
        let sprite = solid_rgba(2, Rgba::new(255, 255, 255, 51));
        assert!(blit(&mut target, &sprite, 5.0, 5.0, 0.0));
        // 0.2 * 255 = 51
        assert_eq!(target.get(4, 4), Some(Rgb::new(51, 51, 51)));
    }

    #[test]
    fn test_transparent_sprite_is_invisible() {
        let background = FrameBuffer::filled(20, 20, Rgb::new(9, 9, 9));
        let mut target = background.clone();
        let sprite = solid_rgba(8, Rgba::new(255, 0, 0, 0));
        assert!(blit(&mut target, &sprite, 10.0, 10.0, 30.0));
        assert_eq!(target, background);
    }

    #[test]
    fn test_rgb_sprite_overwrites() {
        let mut target = FrameBuffer::filled(10, 10, Rgb::WHITE);
        let sprite = Sprite::Opaque(Raster::filled(4, 2, Rgb::new(1, 2, 3)));
        assert!(blit(&mut target, &sprite, 5.0, 5.0, 0.0));
        assert_eq!(target.get(3, 4), Some(Rgb::new(1, 2, 3)));
        assert_eq!(target.get(6, 5), Some(Rgb::new(1, 2, 3)));
        assert_eq!(target.get(7, 5), Some(Rgb::WHITE));
        assert_eq!(target.get(3, 6), Some(Rgb::WHITE));
    }

    #[test]
    fn test_rotated_bounds_expand() {
        assert_eq!(rotated_bounds(50, 20, 90.0), (20, 50));
        let (w, h) = rotated_bounds(50, 50, 45.0);
        assert_eq!((w, h), (70, 70));
        let rotated = rotate(&solid_rgba(50, Rgba::new(1, 1, 1, 255)), 45.0);
        assert_eq!((rotated.width(), rotated.height()), (70, 70));
    }

    #[test]
    fn test_rotation_keeps_centre_and_clears_corners() {
        let sprite = solid_rgba(40, Rgba::new(0, 255, 0, 255));
        let Sprite::Transparent(rotated) = rotate(&sprite, 45.0) else {
            panic!("rotation changed sprite kind");
        };
        let c = rotated.width() / 2;
        assert_eq!(rotated.get(c, c), Some(Rgba::new(0, 255, 0, 255)));
        assert_eq!(rotated.get(0, 0).map(|p| p.a), Some(0));
    }

    #[test]
    fn test_quarter_turn_is_counter_clockwise() {
        // 3x1 sprite: red on the left, blue on the right
        let mut raster = Raster::filled(3, 1, Rgba::TRANSPARENT);
        raster.put(0, 0, Rgba::new(255, 0, 0, 255));
        raster.put(2, 0, Rgba::new(0, 0, 255, 255));
        let Sprite::Transparent(rotated) = rotate(&Sprite::Transparent(raster), 90.0) else {
            panic!("rotation changed sprite kind");
        };
        assert_eq!((rotated.width(), rotated.height()), (1, 3));
        // Left end ends up at the bottom, right end at the top
        assert_eq!(rotated.get(0, 2).map(|p| p.r), Some(255));
        assert_eq!(rotated.get(0, 0).map(|p| p.b), Some(255));
    }
}
