//! Fallback Icon Generator
//!
//! Deterministic lettered SVG badges used when no real image is available.

/// Hue/saturation/lightness pair describing the badge gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub from: Hsl,
    pub to: Hsl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub hue: u32,
    pub saturation: u32,
    pub lightness: u32,
}

/// Folds the UTF-16 code units of `name` into a 32-bit hash.
///
/// `hash = hash * 31 + unit` with wrapping `i32` arithmetic, read back as
/// unsigned. Stable across runs and platforms.
pub fn name_hash(name: &str) -> u32 {
    name.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        }) as u32
}

/// Maps a name to its badge gradient.
pub fn gradient_for(name: &str) -> Gradient {
    let hash = name_hash(name);
    let h1 = hash % 360;
    let h2 = (h1 + 120 + (hash >> 8) % 120) % 360;

    Gradient {
        from: Hsl {
            hue: h1,
            saturation: 70 + (hash >> 16) % 20,
            lightness: 45,
        },
        to: Hsl {
            hue: h2,
            saturation: 70 + (hash >> 24) % 20,
            lightness: 55,
        },
    }
}

/// Badge letter: the first character upper-cased, or `?` for an empty name.
pub fn badge_letter(name: &str) -> String {
    match name.trim().chars().next() {
        Some(c) => c.to_uppercase().collect(),
        None => "?".to_string(),
    }
}

/// Renders the 64x64 fallback SVG for `name`.
pub fn fallback_icon(name: &str) -> String {
    let Gradient { from, to } = gradient_for(name);
    let letter = xml_escape(&badge_letter(name));

    format!(
        concat!(
            r#"<svg width="64" height="64" viewBox="0 0 64 64" xmlns="http://www.w3.org/2000/svg">"#,
            r#"<defs><linearGradient id="grad" x1="0%" y1="0%" x2="100%" y2="100%">"#,
            r#"<stop offset="0%" stop-color="hsl({} {}% {}%)"/>"#,
            r#"<stop offset="100%" stop-color="hsl({} {}% {}%)"/>"#,
            r#"</linearGradient></defs>"#,
            r#"<rect width="64" height="64" rx="8" fill="url(#grad)"/>"#,
            r#"<text x="32" y="42" font-family="Arial, sans-serif" font-size="28" font-weight="bold" text-anchor="middle" fill="white">{}</text>"#,
            r#"</svg>"#
        ),
        from.hue,
        from.saturation,
        from.lightness,
        to.hue,
        to.saturation,
        to.lightness,
        letter
    )
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
