//! Deterministic per-subject colours.
//!
//! The backend stores no colour for a subject, so one is derived from the
//! subject name itself.  The same name yields the same colour on every page,
//! in every role, on every render.

/// Background colour (`#rrggbb`, lowercase) for a subject name.
///
/// Rolling 32-bit hash over the UTF-16 code units of the name
/// (`hash = unit + (hash << 5) - hash`, wrapping), then the low three bytes
/// become the red, green and blue channels.  An empty name maps to
/// `#000000`.
pub fn color_for(subject: &str) -> String {
    let hash = subject.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });

    let mut out = String::with_capacity(7);
    out.push('#');
    for shift in [0, 8, 16] {
        let channel = (hash >> shift) & 0xFF;
        out.push_str(&format!("{channel:02x}"));
    }
    out
}

/// Black or white text, whichever reads better on `background`.
///
/// `background` must be a `#rrggbb` string as produced by [`color_for`];
/// anything else gets white.
pub fn text_color_for(background: &str) -> &'static str {
    let Some(hex) = background.strip_prefix('#').filter(|h| h.len() == 6) else {
        return "#ffffff";
    };
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => {
            // ITU-R BT.601 luma
            let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
            if luma > 150.0 {
                "#000000"
            } else {
                "#ffffff"
            }
        }
        _ => "#ffffff",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_colors() {
        assert_eq!(color_for("Math"), "#287b24");
        assert_eq!(color_for("Science"), "#44328c");
        assert_eq!(color_for("English"), "#5032a1");
        assert_eq!(color_for("a"), "#610000");
    }

    #[test]
    fn test_empty_name_is_black() {
        assert_eq!(color_for(""), "#000000");
    }

    #[test]
    fn test_non_ascii_and_long_names_wrap() {
        assert_eq!(color_for("Mathématiques"), "#1c1684");
        assert_eq!(color_for("History of Art and Design, Advanced"), "#7797d1");
    }

    #[test]
    fn test_deterministic_and_spread() {
        let names = [
            "Math", "Science", "English", "History", "Geography", "Art", "Music",
            "Physics", "Chemistry", "Biology",
        ];
        for n in names {
            assert_eq!(color_for(n), color_for(n));
            assert_eq!(color_for(n).len(), 7);
        }
        let distinct: std::collections::HashSet<_> = names.iter().map(|n| color_for(n)).collect();
        assert!(distinct.len() >= names.len() - 1);
    }

    #[test]
    fn test_text_color_contrast() {
        assert_eq!(text_color_for("#000000"), "#ffffff");
        assert_eq!(text_color_for("#ffffff"), "#000000");
        assert_eq!(text_color_for("garbage"), "#ffffff");
    }
}
