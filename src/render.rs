//! Console-template rendering
//!
//! Applies a compiled template and its values the way a browser console
//! does: `%s %d %i %f %o %O %c` consume one value each, `%%` is a literal
//! percent sign, anything else after `%` is kept as text, and values left
//! over once the template is exhausted are appended separated by spaces.
//!
//! `plain` drops `%c` styles; `ansi` turns them into terminal escapes.

use crate::constants::MAX_FORMAT_WIDTH;
use crate::field::display_text;
use crossterm::style::{Attribute, Color, ContentStyle};
use serde_json::Value;

/// One `%` conversion from a native template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spec {
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub conversion: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    Spec(Spec, &'a str),
}

/// Render without styling
pub fn plain(template: &str, values: &[Value]) -> String {
    render(template, values, false)
}

/// Render with `%c` styles translated to ANSI escapes
pub fn ansi(template: &str, values: &[Value]) -> String {
    render(template, values, true)
}

fn render(template: &str, values: &[Value], styled: bool) -> String {
    let mut out = String::with_capacity(template.len());
    let mut values = values.iter();
    let mut style = ContentStyle::new();

    for piece in pieces(template) {
        let text = match piece {
            Piece::Text(text) => text.to_string(),
            Piece::Spec(spec, raw) => match values.next() {
                None => raw.to_string(),
                Some(value) if spec.conversion == 'c' => {
                    if styled {
                        style = parse_css(&display_text(value));
                    }
                    continue;
                }
                Some(value) => format_value(&spec, value),
            },
        };
        push_styled(&mut out, &text, &style, styled);
    }

    for value in values {
        out.push(' ');
        push_styled(&mut out, &display_text(value), &style, styled);
    }

    out
}

fn push_styled(out: &mut String, text: &str, style: &ContentStyle, styled: bool) {
    if text.is_empty() {
        return;
    }
    if styled && *style != ContentStyle::new() {
        out.push_str(&style.apply(text).to_string());
    } else {
        out.push_str(text);
    }
}

/// Format a single value for a conversion
pub fn format_value(spec: &Spec, value: &Value) -> String {
    let precision = spec.precision.filter(|p| *p <= MAX_FORMAT_WIDTH);
    let text = match spec.conversion {
        'd' | 'i' => format_int(value, precision),
        'f' => format_float(value, precision),
        'o' => value.to_string(),
        'O' => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        _ => display_text(value),
    };
    match spec.width.filter(|w| *w <= MAX_FORMAT_WIDTH) {
        Some(width) if text.chars().count() < width => {
            format!("{}{}", " ".repeat(width - text.chars().count()), text)
        }
        _ => text,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn format_int(value: &Value, min_digits: Option<usize>) -> String {
    let int = match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        _ => match as_number(value) {
            Some(f) if f.is_finite() => format!("{}", f.trunc() as i64),
            _ => return "NaN".to_string(),
        },
    };
    match min_digits {
        Some(digits) => {
            let (sign, magnitude) = match int.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", int.as_str()),
            };
            format!("{}{:0>width$}", sign, magnitude, width = digits)
        }
        None => int,
    }
}

fn format_float(value: &Value, decimals: Option<usize>) -> String {
    let Some(f) = as_number(value) else {
        return "NaN".to_string();
    };
    match decimals {
        Some(decimals) => format!("{:.*}", decimals, f),
        None => f.to_string(),
    }
}

fn pieces(template: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let bytes = template.as_bytes();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        if bytes.get(i + 1) == Some(&b'%') {
            // "%%" -> "%"
            if text_start < i + 1 {
                pieces.push(Piece::Text(&template[text_start..i + 1]));
            }
            i += 2;
            text_start = i;
            continue;
        }
        match parse_spec(&bytes[i + 1..]) {
            Some((spec, len)) => {
                if text_start < i {
                    pieces.push(Piece::Text(&template[text_start..i]));
                }
                let end = i + 1 + len;
                pieces.push(Piece::Spec(spec, &template[i..end]));
                i = end;
                text_start = i;
            }
            None => i += 1,
        }
    }
    if text_start < bytes.len() {
        pieces.push(Piece::Text(&template[text_start..]));
    }
    pieces
}

fn parse_spec(bytes: &[u8]) -> Option<(Spec, usize)> {
    let mut pos = 0;
    let width = take_number(bytes, &mut pos);
    let mut precision = None;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        let start = pos;
        let digits = take_number(bytes, &mut pos);
        // A bare `.` means zero
        precision = if pos == start { Some(0) } else { digits };
    }
    match bytes.get(pos) {
        Some(&c @ (b's' | b'd' | b'i' | b'f' | b'o' | b'O' | b'c')) => Some((
            Spec {
                width,
                precision,
                conversion: c as char,
            },
            pos + 1,
        )),
        _ => None,
    }
}

/// Consume a digit run; `None` when empty or above `MAX_FORMAT_WIDTH`
fn take_number(bytes: &[u8], pos: &mut usize) -> Option<usize> {
    let start = *pos;
    while bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
        *pos += 1;
    }
    std::str::from_utf8(&bytes[start..*pos])
        .ok()?
        .parse()
        .ok()
        .filter(|n| *n <= MAX_FORMAT_WIDTH)
}

// =============================================================================
// CSS -> terminal style
// =============================================================================

/// Translate the subset of CSS that maps onto a terminal
///
/// `color`, `background`/`background-color`, bold `font-weight`, italic
/// `font-style` and underline `text-decoration`; everything else is ignored.
pub fn parse_css(css: &str) -> ContentStyle {
    let mut style = ContentStyle::new();
    for declaration in css.split(';') {
        let Some((prop, value)) = declaration.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match prop.trim().to_ascii_lowercase().as_str() {
            "color" => style.foreground_color = parse_color(value),
            "background" | "background-color" => {
                style.background_color = value.split_whitespace().find_map(parse_color)
            }
            "font-weight" => {
                let bold = value == "bold"
                    || value == "bolder"
                    || value.parse::<u16>().is_ok_and(|w| w >= 600);
                if bold {
                    style.attributes.set(Attribute::Bold);
                }
            }
            "font-style" if value == "italic" || value == "oblique" => {
                style.attributes.set(Attribute::Italic)
            }
            "text-decoration" | "text-decoration-line" if value.contains("underline") => {
                style.attributes.set(Attribute::Underlined)
            }
            _ => {}
        }
    }
    style
}

/// `#rgb`, `#rrggbb` or a terminal color name
pub fn parse_color(value: &str) -> Option<Color> {
    if let Some(hex) = value.strip_prefix('#') {
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            6 => Some(Color::Rgb {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => {
                let double = |i: usize| channel(&hex[i..i + 1]).map(|c| c * 17);
                Some(Color::Rgb {
                    r: double(0)?,
                    g: double(1)?,
                    b: double(2)?,
                })
            }
            _ => None,
        };
    }
    match value.to_ascii_lowercase().as_str() {
        "gray" => Some(Color::Grey),
        "orange" => Some(Color::Rgb {
            r: 0xff,
            g: 0xa5,
            b: 0x00,
        }),
        name => Color::try_from(name).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_strings() {
        let out = plain("%s %s %s", &[json!("INFO"), json!("app"), json!("hi")]);
        assert_eq!(out, "INFO app hi");
    }

    #[test]
    fn test_plain_int_width_precision() {
        assert_eq!(plain("%d", &[json!(42.9)]), "42");
        assert_eq!(plain("%.4d", &[json!(42)]), "0042");
        assert_eq!(plain("%6.3d|", &[json!(-7)]), "  -007|");
        assert_eq!(plain("%d", &[json!("12")]), "12");
        assert_eq!(plain("%d", &[json!("abc")]), "NaN");
    }

    #[test]
    fn test_plain_float() {
        assert_eq!(plain("%.2f", &[json!(3.14159)]), "3.14");
        assert_eq!(plain("%f", &[json!(1.5)]), "1.5");
        assert_eq!(plain("%8.1f", &[json!(2)]), "     2.0");
    }

    #[test]
    fn test_plain_oversized_width_and_precision_ignored() {
        assert_eq!(plain("%999999999999999999d", &[json!(42)]), "42");
        assert_eq!(plain("%.999999999999f", &[json!(1.5)]), "1.5");
        assert_eq!(plain("%.99999999999d", &[json!(7)]), "7");
        assert_eq!(plain("%.f", &[json!(2.6)]), "3");
    }

    #[test]
    fn test_plain_objects() {
        assert_eq!(plain("%o", &[json!({"a": 1})]), r#"{"a":1}"#);
        assert_eq!(plain("%O", &[json!([1])]), "[\n  1\n]");
    }

    #[test]
    fn test_plain_drops_styles() {
        let out = plain("%c%s%c!", &[json!("color:red;"), json!("hi"), json!("")]);
        assert_eq!(out, "hi!");
    }

    #[test]
    fn test_plain_literal_percent() {
        assert_eq!(plain("100%% %q %", &[]), "100% %q %");
    }

    #[test]
    fn test_plain_missing_and_extra_values() {
        assert_eq!(plain("%s and %s", &[json!("a")]), "a and %s");
        assert_eq!(plain("%s", &[json!("a"), json!({"e": 1})]), r#"a {"e":1}"#);
    }

    #[test]
    fn test_ansi_applies_style() {
        let out = ansi("%c%s%c done", &[json!("color:#ff0000;"), json!("ERR"), json!("")]);
        assert!(out.contains('\x1b'));
        assert!(out.contains("ERR"));
        assert!(out.ends_with(" done"));
    }

    #[test]
    fn test_ansi_without_styles_is_plain() {
        assert_eq!(ansi("%s!", &[json!("ok")]), "ok!");
    }

    #[test]
    fn test_parse_css() {
        let style = parse_css("color:#118C4E;background:#fff;font-weight:bold;padding:1px;");
        assert_eq!(
            style.foreground_color,
            Some(Color::Rgb {
                r: 0x11,
                g: 0x8c,
                b: 0x4e
            })
        );
        assert_eq!(
            style.background_color,
            Some(Color::Rgb {
                r: 255,
                g: 255,
                b: 255
            })
        );
        assert!(style.attributes.has(Attribute::Bold));
    }

    #[test]
    fn test_parse_color_names() {
        assert_eq!(parse_color("red"), Some(Color::Red));
        assert_eq!(parse_color("gray"), Some(Color::Grey));
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("papayawhip"), None);
    }
}
