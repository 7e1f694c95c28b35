//! Startup banner: "CAL-SNAP" framed like a plate, colored column by column
//! from tomato red to leaf green.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TOMATO: Color = Color::Rgb {
    r: 0xff,
    g: 0x63,
    b: 0x47,
};
const LEAF_GREEN: Color = Color::Rgb {
    r: 0x4c,
    g: 0xaf,
    b: 0x50,
};

/// Color for column `col` of `width`.
fn column_color(col: usize, width: usize) -> Color {
    let (Color::Rgb { r: r0, g: g0, b: b0 }, Color::Rgb { r: r1, g: g1, b: b1 }) =
        (TOMATO, LEAF_GREEN)
    else {
        return LEAF_GREEN;
    };
    let t = if width <= 1 {
        0.0
    } else {
        col as f64 / (width - 1) as f64
    };
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Color::Rgb {
        r: mix(r0, r1),
        g: mix(g0, g1),
        b: mix(b0, b1),
    }
}

/// Figlet art framed in a box with a cutlery rule underneath.
fn plate_lines(title: &str) -> Vec<String> {
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(title).map(|f| f.to_string()))
        .unwrap_or_else(|| title.to_string());
    let rows: Vec<&str> = art.lines().filter(|l| !l.trim().is_empty()).collect();
    let inner = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) + 2;

    let mut lines = Vec::with_capacity(rows.len() + 3);
    lines.push(format!("╭{}╮", "─".repeat(inner)));
    for row in rows {
        let pad = inner - 1 - row.chars().count();
        lines.push(format!("│ {}{}│", row, " ".repeat(pad)));
    }
    lines.push(format!("╰{}╯", "─".repeat(inner)));
    let cutlery = "🍴";
    lines.push(format!("{:^width$}", cutlery, width = inner + 1));
    lines
}

/// Prints the banner, then version and tagline.
pub fn print_welcome() {
    let mut out = stdout();
    let lines = plate_lines("CAL-SNAP");
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(1);

    for line in &lines {
        for (col, ch) in line.chars().enumerate() {
            let _ = out.execute(SetForegroundColor(column_color(col, width)));
            let _ = out.execute(Print(ch));
        }
        let _ = out.execute(Print("\r\n"));
    }
    let _ = out.execute(SetForegroundColor(LEAF_GREEN));
    let _ = out.execute(Print(format!(
        "v{}  ·  snap a meal, get the calories\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_color_endpoints() {
        assert_eq!(column_color(0, 10), TOMATO);
        assert_eq!(column_color(9, 10), LEAF_GREEN);
        assert_eq!(column_color(0, 1), TOMATO);
    }

    #[test]
    fn test_plate_is_framed_and_aligned() {
        let lines = plate_lines("CAL");
        assert!(lines[0].starts_with('╭') && lines[0].ends_with('╮'));
        let frame_width = lines[0].chars().count();
        let body = &lines[1..lines.len() - 2];
        assert!(!body.is_empty());
        for row in body {
            assert!(row.starts_with('│') && row.ends_with('│'));
            assert_eq!(row.chars().count(), frame_width);
        }
        assert!(lines[lines.len() - 2].starts_with('╰'));
    }
}
