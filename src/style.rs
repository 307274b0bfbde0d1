use crate::error::Error;

#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub theme: String,
    pub size_tier: String,
    /// Accepted for parity with the preview settings; the export renders
    /// with fixed base faces, so this has no effect here.
    pub font_family: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            size_tier: "medium".to_string(),
            font_family: String::new(),
        }
    }
}

/// Resolved numeric and color settings, fixed for one export run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleProfile {
    pub body_size: f32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub code_size: f32,
    pub line_height: f32, // multiplier on font size

    pub text: [u8; 3],
    pub secondary: [u8; 3],
    pub border: [u8; 3],
    pub h1: [u8; 3],
    pub h2: [u8; 3],
    pub h3: [u8; 3],
    pub code_background: [u8; 3],
    pub quote_background: [u8; 3],
    pub table_header_background: [u8; 3],
}

impl StyleProfile {
    pub fn heading_size(&self, level: u8) -> f32 {
        match level {
            1 => self.h1_size,
            2 => self.h2_size,
            _ => self.h3_size,
        }
    }

    pub fn heading_color(&self, level: u8) -> [u8; 3] {
        match level {
            1 => self.h1,
            2 => self.h2,
            _ => self.h3,
        }
    }

    pub fn line_advance(&self, font_size: f32) -> f32 {
        font_size * self.line_height
    }
}

struct ThemeColors {
    text: [u8; 3],
    secondary: [u8; 3],
    border: [u8; 3],
    h1: [u8; 3],
    h2: [u8; 3],
    h3: [u8; 3],
    code_background: [u8; 3],
    quote_background: [u8; 3],
    table_header_background: [u8; 3],
}

// The export always paints on white; themes vary ink and tint colors only.
fn theme_colors(theme: &str) -> Option<ThemeColors> {
    let colors = match theme {
        "light" => ThemeColors {
            text: [33, 33, 33],
            secondary: [117, 117, 117],
            border: [189, 189, 189],
            h1: [13, 71, 161],
            h2: [21, 101, 192],
            h3: [30, 136, 229],
            code_background: [245, 245, 245],
            quote_background: [240, 244, 248],
            table_header_background: [232, 234, 237],
        },
        "sepia" => ThemeColors {
            text: [62, 48, 32],
            secondary: [124, 104, 80],
            border: [196, 178, 152],
            h1: [121, 72, 24],
            h2: [141, 90, 36],
            h3: [160, 108, 52],
            code_background: [244, 236, 221],
            quote_background: [247, 240, 228],
            table_header_background: [238, 227, 207],
        },
        "slate" => ThemeColors {
            text: [42, 48, 56],
            secondary: [108, 117, 125],
            border: [173, 181, 189],
            h1: [52, 73, 94],
            h2: [69, 90, 110],
            h3: [84, 106, 123],
            code_background: [240, 242, 244],
            quote_background: [244, 246, 248],
            table_header_background: [226, 230, 234],
        },
        "midnight" => ThemeColors {
            text: [25, 28, 40],
            secondary: [90, 96, 120],
            border: [140, 148, 170],
            h1: [48, 63, 159],
            h2: [57, 73, 171],
            h3: [92, 107, 192],
            code_background: [236, 238, 245],
            quote_background: [240, 242, 248],
            table_header_background: [223, 227, 238],
        },
        _ => return None,
    };
    Some(colors)
}

// (body, h1, h2, h3, code, line-height)
fn tier_sizes(size_tier: &str) -> Option<(f32, f32, f32, f32, f32, f32)> {
    match size_tier {
        "small" => Some((10.0, 20.0, 16.0, 12.0, 9.0, 1.4)),
        "medium" => Some((11.0, 22.0, 18.0, 14.0, 10.0, 1.5)),
        "large" => Some((12.0, 24.0, 20.0, 16.0, 11.0, 1.6)),
        _ => None,
    }
}

pub fn resolve(theme: &str, size_tier: &str) -> Result<StyleProfile, Error> {
    let colors = theme_colors(theme)
        .ok_or_else(|| Error::Configuration(format!("unknown theme {theme:?}")))?;
    let (body, h1, h2, h3, code, line_height) = tier_sizes(size_tier)
        .ok_or_else(|| Error::Configuration(format!("unknown size tier {size_tier:?}")))?;

    Ok(StyleProfile {
        body_size: body,
        h1_size: h1,
        h2_size: h2,
        h3_size: h3,
        code_size: code,
        line_height,
        text: colors.text,
        secondary: colors.secondary,
        border: colors.border,
        h1: colors.h1,
        h2: colors.h2,
        h3: colors.h3,
        code_background: colors.code_background,
        quote_background: colors.quote_background,
        table_header_background: colors.table_header_background,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_tier_sizes() {
        let p = resolve("light", "medium").unwrap();
        assert_eq!(p.body_size, 11.0);
        assert_eq!(p.h1_size, 22.0);
        assert_eq!(p.h2_size, 18.0);
        assert_eq!(p.h3_size, 14.0);
        assert_eq!(p.code_size, 10.0);
        assert_eq!(p.line_height, 1.5);
    }

    #[test]
    fn every_theme_tier_pair_resolves() {
        for theme in ["light", "sepia", "slate", "midnight"] {
            for tier in ["small", "medium", "large"] {
                assert!(resolve(theme, tier).is_ok(), "{theme}/{tier}");
            }
        }
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let err = resolve("neon", "medium").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("neon"));
    }

    #[test]
    fn unknown_tier_is_rejected() {
        let err = resolve("light", "enormous").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn heading_role_lookup() {
        let p = resolve("sepia", "small").unwrap();
        assert_eq!(p.heading_size(1), 20.0);
        assert_eq!(p.heading_size(2), 16.0);
        assert_eq!(p.heading_size(3), 12.0);
        assert_eq!(p.heading_color(1), p.h1);
        assert_eq!(p.heading_color(9), p.h3);
    }
}
