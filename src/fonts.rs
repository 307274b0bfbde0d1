use crate::model::FontWeight;

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str
/// encoding. Unmappable characters are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F => Some(c as u8),
            0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
            0x20AC => Some(0x80),
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85),
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // bullet
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        })
        .collect()
}

/// Approximate Helvetica widths at 1000 units/em for WinAnsi bytes. The
/// output always uses the base faces, so these tables are the whole metrics
/// story.
fn helvetica_width_1000(b: u8) -> f32 {
    match b {
        32 => 278.0,                          // space
        33..=47 => 333.0,                     // punctuation
        48..=57 => 556.0,                     // digits
        58..=64 => 333.0,                     // more punctuation
        73 | 74 => 278.0,                     // I J (narrow uppercase)
        77 => 833.0,                          // M (wide)
        65..=90 => 667.0,                     // uppercase A-Z (average)
        91..=96 => 333.0,                     // brackets etc.
        102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
        109 | 119 => 833.0,                   // m w (wide)
        97..=122 => 556.0,                    // lowercase a-z (average)
        _ => 556.0,
    }
}

/// Approximate Helvetica-Bold widths; same shape classes, heavier strokes.
fn helvetica_bold_width_1000(b: u8) -> f32 {
    match b {
        32 => 278.0,
        33..=47 => 333.0,
        48..=57 => 556.0,
        58..=64 => 333.0,
        73 | 74 => 278.0,
        77 => 889.0,
        65..=90 => 722.0,
        91..=96 => 333.0,
        102 | 105 | 106 | 108 | 116 => 278.0,
        109 | 119 => 889.0,
        97..=122 => 611.0,
        _ => 611.0,
    }
}

impl FontWeight {
    fn width_1000(self, b: u8) -> f32 {
        match self {
            // Oblique shares the regular metrics
            FontWeight::Regular | FontWeight::Italic => helvetica_width_1000(b),
            FontWeight::Bold => helvetica_bold_width_1000(b),
            FontWeight::Mono => 600.0,
        }
    }

    pub(crate) fn text_width(self, text: &str, font_size: f32) -> f32 {
        to_winansi_bytes(text)
            .iter()
            .filter(|&&b| b >= 32)
            .map(|&b| self.width_1000(b) * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(self, font_size: f32) -> f32 {
        self.width_1000(32) * font_size / 1000.0
    }
}

/// Greedy word wrap: fill each line up to `max_width`, breaking between
/// words. A word wider than the line still gets a line of its own rather
/// than being cut.
pub(crate) fn wrap_text(
    text: &str,
    weight: FontWeight,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let space_w = weight.space_width(font_size);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_w: f32 = 0.0;

    for word in text.split_whitespace() {
        let ww = weight.text_width(word, font_size);
        if current.is_empty() {
            current.push_str(word);
            current_w = ww;
        } else if current_w + space_w + ww > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_w = ww;
        } else {
            current.push(' ');
            current.push_str(word);
            current_w += space_w + ww;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
