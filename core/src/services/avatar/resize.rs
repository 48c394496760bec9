//! Target dimensions for bounded avatars.

/// Computes the size an image must be scaled to so that neither side
/// exceeds `bound`.
///
/// The scale factor is `min(bound / width, bound / height)`; the limiting
/// side lands exactly on `bound` and the other side is floored. Returns
/// `None` when the image already fits, since images are never upscaled.
pub fn fit_within(width: u32, height: u32, bound: u32) -> Option<(u32, u32)> {
    if width <= bound && height <= bound {
        return None;
    }

    // Integer arithmetic keeps the limiting side exact (250.0 / 300.0 * 300.0 is not 250.0).
    let scaled = |side: u32, limiting: u32| -> u32 {
        let side = (u64::from(side) * u64::from(bound) / u64::from(limiting)) as u32;
        side.max(1)
    };

    if width >= height {
        Some((bound, scaled(height, width)))
    } else {
        Some((scaled(width, height), bound))
    }
}
