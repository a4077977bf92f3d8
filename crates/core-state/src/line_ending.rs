//! Line ending detection and restoration.
//!
//! Documents are held LF-only. On load the majority style and the trailing
//! newline are recorded so that a save writes the file back the way it came.

/// Line ending style detected from a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::Crlf => "\r\n",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineEnding::Lf => "LF",
            LineEnding::Cr => "CR",
            LineEnding::Crlf => "CRLF",
        }
    }
}

/// Result of normalizing line endings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub normalized: String,
    pub original: LineEnding,
    pub had_trailing_newline: bool,
    /// More than one style was present.
    pub mixed: bool,
}

/// Rewrite CRLF and lone CR to LF. The majority style wins (ties resolved
/// CRLF > LF > CR); a file with no breaks reports LF.
pub fn normalize_line_endings(input: &str) -> NormalizedText {
    let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                crlf += 1;
                out.push('\n');
            }
            '\r' => {
                cr += 1;
                out.push('\n');
            }
            '\n' => {
                lf += 1;
                out.push('\n');
            }
            c => out.push(c),
        }
    }
    let mut original = LineEnding::Lf;
    let mut max = 0usize;
    for (style, count) in [
        (LineEnding::Crlf, crlf),
        (LineEnding::Lf, lf),
        (LineEnding::Cr, cr),
    ] {
        if count > max {
            max = count;
            original = style;
        }
    }
    let mixed = [crlf, lf, cr].iter().filter(|c| **c > 0).count() > 1;
    NormalizedText {
        had_trailing_newline: out.ends_with('\n'),
        normalized: out,
        original,
        mixed,
    }
}

/// Inverse of [`normalize_line_endings`] for LF-joined document text.
pub fn restore_line_endings(text: &str, ending: LineEnding, trailing_newline: bool) -> String {
    let mut out = match ending {
        LineEnding::Lf => text.to_string(),
        other => text.replace('\n', other.as_str()),
    };
    if trailing_newline {
        out.push_str(ending.as_str());
    }
    out
}
