//! The character-level grammar shared by every decoder.

use alloc::string::String;
use core::str::Chars;

use ts_schema::{FormatReason, NotationError};

/// Whitespace the decoders skip between tokens.
#[inline]
const fn is_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// A cursor over decoder input with one character of pushback.
///
/// Offsets are counted in characters from the start of the input. A
/// character that was read and then pushed back is not counted.
///
/// ```
/// use ts_text::Reader;
///
/// let mut reader = Reader::new(r#" { "id" : -12 }"#);
/// assert_eq!(reader.require("{"), Ok('{'));
/// assert_eq!(reader.next_member_name(true).unwrap().as_deref(), Some("id"));
/// assert_eq!(reader.require_int(), Ok(-12));
/// assert_eq!(reader.next_member_name(false), Ok(None));
/// assert_eq!(reader.require("}"), Ok('}'));
/// assert!(reader.finish().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    chars: Chars<'a>,
    consumed: usize,
    pending: Option<char>,
    scratch: String,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
            consumed: 0,
            pending: None,
            scratch: String::new(),
        }
    }

    /// The offset of the next character to be read.
    #[inline]
    pub fn position(&self) -> usize {
        self.consumed - usize::from(self.pending.is_some())
    }

    /// The offset of the character returned by the last read.
    #[inline]
    fn last(&self) -> usize {
        self.position().saturating_sub(1)
    }

    #[inline]
    fn format_error(&self, reason: FormatReason) -> NotationError {
        NotationError::format(reason, self.last())
    }

    #[inline]
    fn next(&mut self) -> Option<char> {
        if let Some(ch) = self.pending.take() {
            return Some(ch);
        }
        let ch = self.chars.next()?;
        self.consumed += 1;
        Some(ch)
    }

    /// Reads one character. The end of input is a format error.
    pub fn next_char(&mut self) -> Result<char, NotationError> {
        self.next().ok_or_else(|| {
            NotationError::format(FormatReason::UnexpectedEnd, self.position())
        })
    }

    /// Returns `ch` to the input. Only one character can be pending, and
    /// only after something has been read.
    pub fn put_back(&mut self, ch: char) -> Result<(), NotationError> {
        if self.pending.is_some() {
            return Err(NotationError::DecoderState {
                detail: "a second character was pushed back",
                offset: Some(self.position()),
            });
        }
        if self.consumed == 0 {
            return Err(NotationError::DecoderState {
                detail: "a character was pushed back before any was read",
                offset: Some(0),
            });
        }
        self.pending = Some(ch);
        Ok(())
    }

    /// Consumes whitespace and returns the first other character.
    pub fn skip_spaces(&mut self) -> Result<char, NotationError> {
        loop {
            let ch = self.next_char()?;
            if !is_space(ch) {
                return Ok(ch);
            }
        }
    }

    /// Consumes whitespace and returns the next character without
    /// consuming it. `None` at the end of input.
    ///
    /// Nothing may be pending, since the character is left in the input
    /// rather than in the pushback slot.
    pub fn peek_non_space(&mut self) -> Result<Option<char>, NotationError> {
        if self.pending.is_some() {
            return Err(NotationError::DecoderState {
                detail: "peek with a character pushed back",
                offset: Some(self.position()),
            });
        }
        loop {
            match self.chars.clone().next() {
                Some(ch) if is_space(ch) => {
                    self.chars.next();
                    self.consumed += 1;
                }
                other => return Ok(other),
            }
        }
    }

    /// Skips whitespace and requires one of the characters in `expected`.
    pub fn require(&mut self, expected: &'static str) -> Result<char, NotationError> {
        let found = self.skip_spaces()?;
        if expected.contains(found) {
            Ok(found)
        } else {
            Err(self.format_error(FormatReason::UnexpectedChar { expected, found }))
        }
    }

    /// Reads a quoted string and unescapes `\"`, `\\`, `\n` and `\t`.
    pub fn require_string(&mut self) -> Result<String, NotationError> {
        self.require("\"")?;
        let mut result = String::new();
        loop {
            match self.next_char()? {
                '"' => return Ok(result),
                '\\' => {
                    let escaped = match self.next_char()? {
                        '"' => '"',
                        '\\' => '\\',
                        'n' => '\n',
                        't' => '\t',
                        other => return Err(self.format_error(FormatReason::InvalidEscape(other))),
                    };
                    result.push(escaped);
                }
                ch => result.push(ch),
            }
        }
    }

    /// Reads decimal digits starting with `first` into a magnitude. The first
    /// non-digit is pushed back.
    fn digits(&mut self, first: char, start: usize) -> Result<u64, NotationError> {
        let mut magnitude: u64 = 0;
        let mut count = 0_usize;
        let mut ch = Some(first);
        while let Some(digit) = ch.and_then(|c| c.to_digit(10)) {
            magnitude = magnitude
                .checked_mul(10)
                .and_then(|m| m.checked_add(u64::from(digit)))
                .ok_or(NotationError::format(FormatReason::IntegerOverflow, start))?;
            count += 1;
            ch = self.next();
        }
        if let Some(stop) = ch {
            self.put_back(stop)?;
        }
        if count == 0 {
            return Err(NotationError::format(FormatReason::MissingDigits, self.position()));
        }
        Ok(magnitude)
    }

    /// Reads an optionally negative integer. At least one digit is required.
    pub fn require_int(&mut self) -> Result<i64, NotationError> {
        let first = self.skip_spaces()?;
        let start = self.last();
        if first == '-' {
            let first = self.next_char()?;
            let magnitude = self.digits(first, start)?;
            0_i64
                .checked_sub_unsigned(magnitude)
                .ok_or(NotationError::format(FormatReason::IntegerOverflow, start))
        } else {
            let magnitude = self.digits(first, start)?;
            i64::try_from(magnitude)
                .map_err(|_| NotationError::format(FormatReason::IntegerOverflow, start))
        }
    }

    /// Reads a non-negative integer. At least one digit is required.
    pub fn require_uint(&mut self) -> Result<u64, NotationError> {
        let first = self.skip_spaces()?;
        let start = self.last();
        self.digits(first, start)
    }

    /// Appends `ch` to `scratch` and advances if `accept` allows it.
    fn accept(&mut self, ch: &mut Option<char>, accept: fn(char) -> bool) -> bool {
        match *ch {
            Some(c) if accept(c) => {
                self.scratch.push(c);
                *ch = self.next();
                true
            }
            _ => false,
        }
    }

    /// Collects the text of a floating-point number into `scratch`:
    /// `-? digit* (. digit*)? ([eE] [+-]? digit*)?`.
    fn float_text(&mut self) -> Result<usize, NotationError> {
        self.scratch.clear();
        let mut ch = Some(self.skip_spaces()?);
        let start = self.last();

        self.accept(&mut ch, |c| c == '-');
        while self.accept(&mut ch, |c| c.is_ascii_digit()) {}
        if self.accept(&mut ch, |c| c == '.') {
            while self.accept(&mut ch, |c| c.is_ascii_digit()) {}
        }
        if self.accept(&mut ch, |c| c == 'e' || c == 'E') {
            self.accept(&mut ch, |c| c == '+' || c == '-');
            while self.accept(&mut ch, |c| c.is_ascii_digit()) {}
        }

        if let Some(stop) = ch {
            self.put_back(stop)?;
        }
        Ok(start)
    }

    pub fn require_double(&mut self) -> Result<f64, NotationError> {
        let start = self.float_text()?;
        self.scratch.parse().map_err(|_| {
            NotationError::format(FormatReason::InvalidFloat(self.scratch.clone()), start)
        })
    }

    pub fn require_single(&mut self) -> Result<f32, NotationError> {
        let start = self.float_text()?;
        self.scratch.parse().map_err(|_| {
            NotationError::format(FormatReason::InvalidFloat(self.scratch.clone()), start)
        })
    }

    /// Reads the next `"name":` of an object. `None` when the object closes,
    /// in which case the `}` is left pending.
    ///
    /// Every name after the first must be preceded by a comma.
    pub fn next_member_name(&mut self, first: bool) -> Result<Option<String>, NotationError> {
        let ch = self.skip_spaces()?;
        if ch == '}' {
            self.put_back(ch)?;
            return Ok(None);
        }
        if first {
            if ch != '"' {
                return Err(self.format_error(FormatReason::UnexpectedChar {
                    expected: "\"}",
                    found: ch,
                }));
            }
            self.put_back(ch)?;
        } else if ch != ',' {
            return Err(self.format_error(FormatReason::UnexpectedChar {
                expected: ",}",
                found: ch,
            }));
        }
        let name = self.require_string()?;
        self.require(":")?;
        Ok(Some(name))
    }

    /// Requires that only whitespace is left.
    pub fn finish(&mut self) -> Result<(), NotationError> {
        while let Some(ch) = self.next() {
            if !is_space(ch) {
                return Err(self.format_error(FormatReason::TrailingInput(ch)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Reader;
    use ts_schema::{ErrorKind, FormatReason, NotationError};

    fn reason(err: NotationError) -> FormatReason {
        match err {
            NotationError::Format { reason, .. } => reason,
            other => panic!("not a format error: {other}"),
        }
    }

    #[test]
    fn pushback_needs_a_read() {
        let mut reader = Reader::new("");
        let err = reader.put_back('x').unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecoderState);
        assert_eq!(reader.position(), 0);
        assert_eq!(reader.next_char().unwrap_err().offset(), Some(0));
    }

    #[test]
    fn one_character_of_pushback() {
        let mut reader = Reader::new("ab");
        assert_eq!(reader.next_char(), Ok('a'));
        reader.put_back('a').unwrap();
        assert_eq!(reader.position(), 0);

        let err = reader.put_back('b').unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecoderState);

        let err = reader.peek_non_space().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecoderState);

        assert_eq!(reader.next_char(), Ok('a'));
        assert_eq!(reader.peek_non_space(), Ok(Some('b')));
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn strings_unescape_four_sequences() {
        let mut reader = Reader::new(r#""a\"b\\c\nd\te""#);
        assert_eq!(reader.require_string().unwrap(), "a\"b\\c\nd\te");

        let mut reader = Reader::new(r#""bad\r""#);
        let err = reader.require_string().unwrap_err();
        assert_eq!(err.offset(), Some(5));
        assert_eq!(reason(err), FormatReason::InvalidEscape('r'));

        let mut reader = Reader::new(r#""open"#);
        assert_eq!(reason(reader.require_string().unwrap_err()), FormatReason::UnexpectedEnd);
    }

    #[test]
    fn integers() {
        let mut reader = Reader::new(" 42,-7 -9223372036854775808 18446744073709551615");
        assert_eq!(reader.require_int(), Ok(42));
        assert_eq!(reader.require(","), Ok(','));
        assert_eq!(reader.require_int(), Ok(-7));
        assert_eq!(reader.require_int(), Ok(i64::MIN));
        assert_eq!(reader.require_uint(), Ok(u64::MAX));

        let mut reader = Reader::new("9223372036854775808");
        assert_eq!(reason(reader.require_int().unwrap_err()), FormatReason::IntegerOverflow);

        let mut reader = Reader::new("18446744073709551616");
        assert_eq!(reason(reader.require_uint().unwrap_err()), FormatReason::IntegerOverflow);
    }

    #[test]
    fn zero_digit_integers_are_rejected() {
        let mut reader = Reader::new("-,");
        let err = reader.require_int().unwrap_err();
        assert_eq!(err.offset(), Some(1));
        assert_eq!(reason(err), FormatReason::MissingDigits);

        let mut reader = Reader::new("-5");
        assert_eq!(reason(reader.require_uint().unwrap_err()), FormatReason::MissingDigits);
    }

    #[test]
    fn floats() {
        let mut reader = Reader::new("1.5e3,-0.25 7 1E-2]");
        assert_eq!(reader.require_double(), Ok(1500.0));
        reader.require(",").unwrap();
        assert_eq!(reader.require_single(), Ok(-0.25));
        assert_eq!(reader.require_double(), Ok(7.0));
        assert_eq!(reader.require_double(), Ok(0.01));
        assert_eq!(reader.require("]"), Ok(']'));

        let mut reader = Reader::new("-e");
        let err = reader.require_double().unwrap_err();
        assert_eq!(reason(err), FormatReason::InvalidFloat("-e".into()));
    }

    #[test]
    fn member_names_need_commas() {
        let mut reader = Reader::new(r#"{"a":1 "b":2}"#);
        reader.require("{").unwrap();
        assert_eq!(reader.next_member_name(true).unwrap().as_deref(), Some("a"));
        reader.require_int().unwrap();
        let err = reader.next_member_name(false).unwrap_err();
        assert_eq!(err.offset(), Some(7));

        let mut reader = Reader::new(r#"{,"a":1}"#);
        reader.require("{").unwrap();
        assert!(reader.next_member_name(true).is_err());
    }

    #[test]
    fn trailing_input() {
        let mut reader = Reader::new("} \n x");
        reader.require("}").unwrap();
        let err = reader.finish().unwrap_err();
        assert_eq!(err.offset(), Some(4));
        assert_eq!(reason(err), FormatReason::TrailingInput('x'));
    }
}
