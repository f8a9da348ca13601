use glam::Vec3;

/// `0xRRGGBB` to RGB components in `[0, 1]`.
#[must_use]
pub fn hex_to_rgb(hex: u32) -> Vec3 {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}
