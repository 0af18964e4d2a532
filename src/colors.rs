//! Packed ARGB8888 color helpers.
//!
//! Every buffer in the crate stores pixels as `u32` in `0xAARRGGBB` order,
//! which is what SDL2's `ARGB8888` streaming textures expect.

/// Opaque white; the color buffer is cleared to this every frame.
pub const BACKGROUND: u32 = 0xFFFFFFFF;

/// Transparent white; the cleared value of the occlusion overlay.
pub const OVERLAY_CLEAR: u32 = 0x00FFFFFF;

/// Pack 8-bit channels into a single ARGB word.
#[inline]
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Split an ARGB word into `[a, r, g, b]`.
#[inline]
pub const fn unpack_argb(color: u32) -> [u8; 4] {
    [
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    ]
}

#[inline]
pub const fn alpha(color: u32) -> u8 {
    (color >> 24) as u8
}

/// Source-over blend of a non-premultiplied `src` onto `dst`.
///
/// The result keeps the destination's alpha, so blending onto an opaque
/// buffer yields an opaque buffer.
#[inline]
pub fn alpha_blend(dst: u32, src: u32) -> u32 {
    let [sa, sr, sg, sb] = unpack_argb(src);
    match sa {
        0 => return dst,
        255 => return (dst & 0xFF00_0000) | (src & 0x00FF_FFFF),
        _ => {}
    }
    let [da, dr, dg, db] = unpack_argb(dst);
    let t = sa as f64 / 255.0;
    let mix = |s: u8, d: u8| (s as f64 * t + d as f64 * (1.0 - t)).round() as u8;
    pack_argb(da, mix(sr, dr), mix(sg, dg), mix(sb, db))
}
