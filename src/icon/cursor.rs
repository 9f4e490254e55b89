//! Rotation cursor glyph for the grab circle.

use once_cell::sync::Lazy;

/// Circular-arrow glyph, inlined as a data URI so hosts need no extra
/// image asset. The hotspot sits at the glyph center.
static ROTATION_CURSOR: Lazy<String> = Lazy::new(|| {
    let glyph = "<svg xmlns='http://www.w3.org/2000/svg' width='24' height='24' \
viewBox='0 0 24 24'><path d='M12 4a8 8 0 1 0 8 8' fill='none' stroke='black' \
stroke-width='2'/><path d='M20 3v6h-6z' fill='black'/></svg>";
    let encoded = glyph
        .replace('<', "%3C")
        .replace('>', "%3E")
        .replace('#', "%23")
        .replace(' ', "%20");
    format!("url(\"data:image/svg+xml,{}\") 12 12, auto", encoded)
});

/// CSS `cursor` value to show while hovering or dragging the handle.
pub fn rotation_cursor() -> &'static str {
    ROTATION_CURSOR.as_str()
}
