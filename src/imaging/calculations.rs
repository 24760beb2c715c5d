//! Pure calculation functions for output dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Output dimensions for one target, and whether reaching them needs a resample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaledSize {
    pub width: u32,
    pub height: u32,
    pub resized: bool,
}

impl ScaledSize {
    fn unchanged(original: (u32, u32)) -> Self {
        Self {
            width: original.0,
            height: original.1,
            resized: false,
        }
    }
}

/// Scale an image down to `max_width`, preserving aspect ratio.
///
/// Images at or below `max_width` keep their dimensions. Wider images get
/// `height = round(orig_h * max_width / orig_w)`, never less than 1px.
///
/// # Examples
/// ```
/// # use asset_prep::imaging::fit_to_width;
/// let s = fit_to_width((3600, 2000), 1800);
/// assert_eq!((s.width, s.height), (1800, 1000));
///
/// let s = fit_to_width((1200, 800), 1800);
/// assert_eq!((s.width, s.height, s.resized), (1200, 800, false));
/// ```
pub fn fit_to_width(original: (u32, u32), max_width: u32) -> ScaledSize {
    let (orig_w, orig_h) = original;
    if orig_w <= max_width {
        return ScaledSize::unchanged(original);
    }

    let ratio = max_width as f64 / orig_w as f64;
    let height = (orig_h as f64 * ratio).round().max(1.0) as u32;
    ScaledSize {
        width: max_width,
        height,
        resized: true,
    }
}

/// Icon sizing: anything wider than `max_size` becomes an exact
/// `max_size × max_size` square. Sources are assumed square already, so the
/// aspect ratio is not preserved.
pub fn fit_icon(original: (u32, u32), max_size: u32) -> ScaledSize {
    if original.0 <= max_size {
        return ScaledSize::unchanged(original);
    }
    ScaledSize {
        width: max_size,
        height: max_size,
        resized: true,
    }
}
