//! Directive tokenizer
//!
//! Splits a template into literal text and directives of the form
//! `%(key)<flag><width>.<precision><type>`:
//!
//! - `key`: one or more characters other than `)`
//! - `flag`: `-`, `+`, `0`, `#`, or a space directly followed by a width
//! - `width` / `precision`: decimal digits (precision needs its leading `.`);
//!   values above `MAX_FORMAT_WIDTH` are treated as absent
//! - `type`: `s`, `d`, `f`, `o`, `O`; omitted means `s`
//!
//! Anything that does not form a directive is passed through as text.
//! Tokenizing never fails.

use crate::constants::{ASCTIME_KEY, MAX_FORMAT_WIDTH};

/// Conversion requested by a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `s` (also the default)
    String,
    /// `d`
    Int,
    /// `f`
    Float,
    /// `o`
    Object,
    /// `O`
    Inspect,
    /// Any other letter in type position; compiles to nothing
    Unknown(char),
}

impl DirectiveKind {
    fn from_char(c: char) -> Self {
        match c {
            's' => Self::String,
            'd' => Self::Int,
            'f' => Self::Float,
            'o' => Self::Object,
            'O' => Self::Inspect,
            other => Self::Unknown(other),
        }
    }
}

/// One parsed `%(key)...` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub flag: Option<char>,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub kind: DirectiveKind,
}

impl Directive {
    /// `asctime` always renders the record time, whatever its type
    pub fn is_asctime(&self) -> bool {
        self.key == ASCTIME_KEY
    }

    /// Left-justify flag present
    pub fn left_align(&self) -> bool {
        self.flag == Some('-')
    }
}

/// Piece of a tokenized template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Directive(Directive),
}

/// Iterator over the segments of a template
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let src = self.src;
        let rest = &src[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let Some(start) = rest.find("%(") else {
            self.pos = src.len();
            return Some(Segment::Text(rest));
        };

        if start > 0 {
            self.pos += start;
            return Some(Segment::Text(&rest[..start]));
        }

        match parse_directive(rest) {
            Some((directive, consumed)) => {
                self.pos += consumed;
                Some(Segment::Directive(directive))
            }
            None => {
                // Not a directive: emit the opener literally and rescan after it
                self.pos += 2;
                Some(Segment::Text(&rest[..2]))
            }
        }
    }
}

/// Tokenize a whole template
pub fn tokenize(template: &str) -> Vec<Segment<'_>> {
    Tokenizer::new(template).collect()
}

/// Only the directives of a template, in order of appearance
pub fn directives(template: &str) -> Vec<Directive> {
    Tokenizer::new(template)
        .filter_map(|segment| match segment {
            Segment::Directive(d) => Some(d),
            Segment::Text(_) => None,
        })
        .collect()
}

/// Parse a directive at the start of `input` (which begins with `%(`).
///
/// Returns the directive and the number of bytes consumed.
fn parse_directive(input: &str) -> Option<(Directive, usize)> {
    let body = &input[2..];
    let close = body.find(')')?;
    if close == 0 {
        return None;
    }
    let key = &body[..close];
    let mut pos = 2 + close + 1;
    let bytes = input.as_bytes();

    let mut flag = None;
    if let Some(&b) = bytes.get(pos) {
        match b {
            b'-' | b'+' | b'0' | b'#' => {
                flag = Some(b as char);
                pos += 1;
            }
            b' ' if bytes.get(pos + 1).is_some_and(u8::is_ascii_digit) => {
                flag = Some(' ');
                pos += 1;
            }
            _ => {}
        }
    }

    let (width, len) = digits(&input[pos..]);
    pos += len;

    let mut precision = None;
    if bytes.get(pos) == Some(&b'.') && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit) {
        let (p, len) = digits(&input[pos + 1..]);
        precision = p;
        pos += 1 + len;
    }

    let kind = match bytes.get(pos) {
        Some(b) if b.is_ascii_alphabetic() => {
            pos += 1;
            DirectiveKind::from_char(*b as char)
        }
        _ => DirectiveKind::String,
    };

    Some((
        Directive {
            key: key.to_string(),
            flag,
            width,
            precision,
            kind,
        },
        pos,
    ))
}

/// Leading decimal digits: (value if at most `MAX_FORMAT_WIDTH`, bytes consumed)
fn digits(input: &str) -> (Option<usize>, usize) {
    let len = input.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return (None, 0);
    }
    let value = input[..len]
        .parse()
        .ok()
        .filter(|n| *n <= MAX_FORMAT_WIDTH);
    (value, len)
}
