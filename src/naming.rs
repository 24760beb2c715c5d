//! Output filename policy.
//!
//! Every output lands in a single flat directory as `{base}.webp` or
//! `{base}-{label}.webp`. Which one a variant gets is decided by an explicit
//! primary label rather than by its position in the variant list:
//!
//! - the primary variant is written unsuffixed: `hud-light.webp`
//! - every other variant carries its label: `hud-light-small.webp`
//! - a lone variant is always unsuffixed, whatever its label
//!
//! Base names that are not configured explicitly are derived from the source
//! filename with [`derive_base_name`].

/// Extension of every file the optimizer writes.
pub const OUTPUT_EXTENSION: &str = "webp";

/// Filename for an output with no variant (the icon).
pub fn asset_filename(base: &str) -> String {
    format!("{}.{}", base, OUTPUT_EXTENSION)
}

/// Filename for one width variant of a source.
pub fn variant_filename(base: &str, label: &str, primary: &str, variant_count: usize) -> String {
    if variant_count == 1 || label == primary {
        asset_filename(base)
    } else {
        format!("{}-{}.{}", base, label, OUTPUT_EXTENSION)
    }
}

/// Derive an output base name from a source filename.
///
/// Drops the extension, lowercases, and collapses every run of
/// non-alphanumeric characters into a single dash:
/// - `"HUD Light.png"` → `"hud-light"`
/// - `"HUD-Grid Dark.png"` → `"hud-grid-dark"`
/// - `"  Menubar & languages .png"` → `"menubar-languages"`
pub fn derive_base_name(source: &str) -> String {
    let stem = match source.rfind('.') {
        Some(dot) if dot > 0 => &source[..dot],
        _ => source,
    };

    let mut name = String::with_capacity(stem.len());
    let mut pending_dash = false;
    for c in stem.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !name.is_empty() {
                name.push('-');
            }
            pending_dash = false;
            name.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    name
}
