//! Cell format specs
//!
//! Row and header templates are made of `{key:spec}` placeholders where
//! `spec` follows `[[fill]align][width][.precision][type]`:
//!
//! | Part      | Values                                      |
//! |-----------|---------------------------------------------|
//! | align     | `<` left, `>` right, `^` centre             |
//! | width     | minimum character count, never truncates    |
//! | precision | max chars for `s`, decimals for `f`         |
//! | type      | `s` text, `d` integer, `f` fixed-point      |
//!
//! Without an explicit alignment text is left-aligned and numbers are
//! right-aligned.

use crate::output::{OutputError, OutputResult, Value};
use std::str::FromStr;

/// Cell alignment inside its width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '>' => Some(Self::Right),
            '^' => Some(Self::Center),
            _ => None,
        }
    }
}

/// A parsed cell format spec
#[derive(Debug, Clone, PartialEq)]
pub struct FormatSpec {
    pub fill: char,
    pub align: Option<Align>,
    pub width: usize,
    pub precision: Option<usize>,
    pub kind: Option<char>,
}

impl FromStr for FormatSpec {
    type Err = OutputError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = spec.chars().collect();
        let mut pos = 0;
        let mut fill = ' ';
        let mut align = None;

        if chars.len() >= 2 && Align::from_char(chars[1]).is_some() {
            fill = chars[0];
            align = Align::from_char(chars[1]);
            pos = 2;
        } else if let Some(a) = chars.first().and_then(|c| Align::from_char(*c)) {
            align = Some(a);
            pos = 1;
        }

        let width = take_number(&chars, &mut pos).unwrap_or(0);

        let precision = if chars.get(pos) == Some(&'.') {
            pos += 1;
            let precision = take_number(&chars, &mut pos).ok_or_else(|| {
                OutputError::Format(format!("Format specifier missing precision: '{}'", spec))
            })?;
            Some(precision)
        } else {
            None
        };

        let kind = match &chars[pos..] {
            [] => None,
            [c @ ('s' | 'd' | 'f')] => Some(*c),
            _ => {
                return Err(OutputError::Format(format!(
                    "Invalid format specifier: '{}'",
                    spec
                )))
            }
        };

        Ok(Self {
            fill,
            align,
            width,
            precision,
            kind,
        })
    }
}

fn take_number(chars: &[char], pos: &mut usize) -> Option<usize> {
    let start = *pos;
    while chars.get(*pos).is_some_and(|c| c.is_ascii_digit()) {
        *pos += 1;
    }
    if *pos == start {
        return None;
    }
    chars[start..*pos].iter().collect::<String>().parse().ok()
}

impl FormatSpec {
    /// Renders a value according to this spec
    ///
    /// # Errors
    ///
    /// Returns `OutputError::Format` when the type code does not fit the
    /// value, e.g. `d` applied to text.
    pub fn apply(&self, value: &Value) -> OutputResult<String> {
        let mismatch = |code: char| {
            OutputError::Format(format!(
                "Unknown format code '{}' for {} value",
                code,
                value.type_name()
            ))
        };

        let body = match (self.kind, value) {
            (None | Some('s'), Value::Text(s)) => match self.precision {
                Some(max) => s.chars().take(max).collect(),
                None => s.clone(),
            },
            (None | Some('d'), Value::Integer(i)) => {
                if self.precision.is_some() {
                    return Err(OutputError::Format(
                        "Precision not allowed in integer format specifier".to_string(),
                    ));
                }
                i.to_string()
            }
            (Some('f'), Value::Integer(i)) => {
                format!("{:.*}", self.precision.unwrap_or(6), *i as f64)
            }
            (Some('f'), Value::Float(x)) => format!("{:.*}", self.precision.unwrap_or(6), x),
            (None, Value::Float(x)) => match self.precision {
                Some(p) => format!("{:.*}", p, x),
                None => x.to_string(),
            },
            (Some(code), _) => return Err(mismatch(code)),
        };

        let align = self.align.unwrap_or(if value.is_numeric() {
            Align::Right
        } else {
            Align::Left
        });

        Ok(self.pad(body, align))
    }

    fn pad(&self, body: String, align: Align) -> String {
        let len = body.chars().count();
        if len >= self.width {
            return body;
        }

        let pad = self.width - len;
        let (left, right) = match align {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
            Align::Center => (pad / 2, pad - pad / 2),
        };

        let mut out = String::with_capacity(body.len() + pad);
        out.extend(std::iter::repeat(self.fill).take(left));
        out.push_str(&body);
        out.extend(std::iter::repeat(self.fill).take(right));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(s: &str) -> FormatSpec {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_width_and_type() {
        let parsed = spec("31s");
        assert_eq!(parsed.width, 31);
        assert_eq!(parsed.kind, Some('s'));
        assert_eq!(parsed.align, None);
        assert_eq!(parsed.fill, ' ');
    }

    #[test]
    fn test_parse_fill_align_precision() {
        let parsed = spec("*^10.2f");
        assert_eq!(parsed.fill, '*');
        assert_eq!(parsed.align, Some(Align::Center));
        assert_eq!(parsed.width, 10);
        assert_eq!(parsed.precision, Some(2));
        assert_eq!(parsed.kind, Some('f'));
    }

    #[test]
    fn test_parse_empty_spec() {
        let parsed = spec("");
        assert_eq!(parsed.width, 0);
        assert_eq!(parsed.kind, None);
    }

    #[test]
    fn test_parse_invalid_spec() {
        assert!("10x".parse::<FormatSpec>().is_err());
        assert!("10.s".parse::<FormatSpec>().is_err());
    }

    #[test]
    fn test_text_left_aligned_by_default() {
        assert_eq!(spec("8s").apply(&Value::from("Cocoon")).unwrap(), "Cocoon  ");
        assert_eq!(spec("8").apply(&Value::from("Cocoon")).unwrap(), "Cocoon  ");
    }

    #[test]
    fn test_numbers_right_aligned_by_default() {
        assert_eq!(spec("5").apply(&Value::from(42)).unwrap(), "   42");
        assert_eq!(spec("5d").apply(&Value::from(42)).unwrap(), "   42");
        assert_eq!(spec("6.2f").apply(&Value::from(2.5)).unwrap(), "  2.50");
    }

    #[test]
    fn test_explicit_alignment() {
        assert_eq!(spec(">6s").apply(&Value::from("abc")).unwrap(), "   abc");
        assert_eq!(spec("<5d").apply(&Value::from(7)).unwrap(), "7    ");
        assert_eq!(spec("-^7s").apply(&Value::from("ab")).unwrap(), "--ab---");
    }

    #[test]
    fn test_long_values_not_truncated() {
        assert_eq!(spec("3s").apply(&Value::from("Frightful Roar")).unwrap(), "Frightful Roar");
    }

    #[test]
    fn test_text_precision_truncates() {
        assert_eq!(spec("5.3s").apply(&Value::from("Frightful")).unwrap(), "Fri  ");
    }

    #[test]
    fn test_type_mismatch() {
        assert!(matches!(
            spec("5d").apply(&Value::from("abc")),
            Err(OutputError::Format(_))
        ));
        assert!(spec("5s").apply(&Value::from(5)).is_err());
        assert!(spec("5f").apply(&Value::from("x")).is_err());
    }
}
