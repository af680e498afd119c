//! Lenient JSON parsing.
//!
//! Parses a superset of JSON into a document tree: standard syntax extended
//! with `//` and `/* */` comments, single-quoted strings, and unquoted
//! field names, for ergonomic hand-written input. Output is always
//! standard JSON.
//!
//! An empty or all-whitespace input parses to a null node rather than an
//! error. Integer literals that fit become `i64`, larger ones become
//! `BigInt`; literals with a fraction or exponent become `f64`.

use num_bigint::BigInt;

use super::error::JsogError;
use super::node::{Jsog, Primitive};

/// Parses a lenient JSON string into a tree.
pub fn parse(input: &str) -> Result<Jsog, JsogError> {
    let mut parser = Parser::new(input);
    parser.skip_trivia()?;
    if parser.at_end() {
        return Ok(Jsog::new());
    }
    let node = parser.parse_value()?;
    parser.skip_trivia()?;
    if !parser.at_end() {
        return Err(parser.error_here("unexpected trailing characters"));
    }
    Ok(node)
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            src: input.as_bytes(),
            pos: 0,
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Builds a position-aware error; line and column are 1-based, derived
    /// from the bytes consumed so far.
    fn error_at(&self, pos: usize, message: impl Into<String>) -> JsogError {
        let consumed = &self.src[..pos.min(self.src.len())];
        let line = consumed.iter().filter(|&&b| b == b'\n').count() + 1;
        let column = consumed
            .iter()
            .rev()
            .take_while(|&&b| b != b'\n')
            .count()
            + 1;
        JsogError::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    fn error_here(&self, message: impl Into<String>) -> JsogError {
        self.error_at(self.pos, message)
    }

    /// Skips whitespace and both comment styles.
    fn skip_trivia(&mut self) -> Result<(), JsogError> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => {
                    self.pos += 1;
                }
                Some(b'/') => match self.src.get(self.pos + 1) {
                    Some(b'/') => {
                        while let Some(b) = self.peek() {
                            if b == b'\n' {
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                    Some(b'*') => {
                        let start = self.pos;
                        self.pos += 2;
                        loop {
                            if self.pos + 1 >= self.src.len() {
                                return Err(self.error_at(start, "unterminated comment"));
                            }
                            if self.src[self.pos] == b'*' && self.src[self.pos + 1] == b'/' {
                                self.pos += 2;
                                break;
                            }
                            self.pos += 1;
                        }
                    }
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> Result<Jsog, JsogError> {
        match self.peek() {
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b'"') | Some(b'\'') => {
                let s = self.parse_string()?;
                Ok(Jsog::from(s))
            }
            Some(b't') | Some(b'f') | Some(b'n') => self.parse_keyword(),
            Some(b'-') | Some(b'0'..=b'9') => {
                let p = self.parse_number()?;
                Ok(Jsog::from(p))
            }
            Some(b) => Err(self.error_here(format!("unexpected character '{}'", b as char))),
            None => Err(self.error_here("unexpected end of input")),
        }
    }

    fn parse_object(&mut self) -> Result<Jsog, JsogError> {
        self.pos += 1; // '{'
        let object = Jsog::object();
        self.skip_trivia()?;
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(object);
        }
        loop {
            self.skip_trivia()?;
            let key = self.parse_field_name()?;
            self.skip_trivia()?;
            match self.bump() {
                Some(b':') => {}
                Some(b) => {
                    return Err(self.error_at(
                        self.pos - 1,
                        format!("expected ':' after field name, found '{}'", b as char),
                    ))
                }
                None => return Err(self.error_here("unexpected end of input, expected ':'")),
            }
            self.skip_trivia()?;
            let value = self.parse_value()?;
            object.put(key, value);
            self.skip_trivia()?;
            match self.bump() {
                Some(b',') => {}
                Some(b'}') => return Ok(object),
                Some(b) => {
                    return Err(self.error_at(
                        self.pos - 1,
                        format!("expected ',' or '}}', found '{}'", b as char),
                    ))
                }
                None => {
                    return Err(self.error_here("unexpected end of input, expected ',' or '}'"))
                }
            }
        }
    }

    fn parse_array(&mut self) -> Result<Jsog, JsogError> {
        self.pos += 1; // '['
        let array = Jsog::array();
        self.skip_trivia()?;
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(array);
        }
        loop {
            self.skip_trivia()?;
            let value = self.parse_value()?;
            array.add(value);
            self.skip_trivia()?;
            match self.bump() {
                Some(b',') => {}
                Some(b']') => return Ok(array),
                Some(b) => {
                    return Err(self.error_at(
                        self.pos - 1,
                        format!("expected ',' or ']', found '{}'", b as char),
                    ))
                }
                None => {
                    return Err(self.error_here("unexpected end of input, expected ',' or ']'"))
                }
            }
        }
    }

    /// A field name: a quoted string, or an unquoted identifier
    /// (`[A-Za-z_$][A-Za-z0-9_$]*`).
    fn parse_field_name(&mut self) -> Result<String, JsogError> {
        match self.peek() {
            Some(b'"') | Some(b'\'') => self.parse_string(),
            Some(b) if b.is_ascii_alphabetic() || b == b'_' || b == b'$' => {
                let start = self.pos;
                while let Some(b) = self.peek() {
                    if b.is_ascii_alphanumeric() || b == b'_' || b == b'$' {
                        self.pos += 1;
                    } else {
                        break;
                    }
                }
                Ok(String::from_utf8_lossy(&self.src[start..self.pos]).into_owned())
            }
            Some(b) => Err(self.error_here(format!(
                "expected a field name, found '{}'",
                b as char
            ))),
            None => Err(self.error_here("unexpected end of input, expected a field name")),
        }
    }

    fn parse_string(&mut self) -> Result<String, JsogError> {
        let quote = self.bump().expect("caller checked for a quote");
        let mut out = String::new();
        loop {
            let start = self.pos;
            match self.bump() {
                None => return Err(self.error_here("unterminated string")),
                Some(b) if b == quote => return Ok(out),
                Some(b'\\') => self.parse_escape(&mut out)?,
                Some(b) if b < 0x20 => {
                    return Err(self.error_at(start, "control character in string"))
                }
                Some(b) if b < 0x80 => out.push(b as char),
                Some(_) => {
                    // Re-decode the full UTF-8 sequence starting here.
                    let rest = &self.src[start..];
                    let s = std::str::from_utf8(rest)
                        .map(|s| s.chars().next())
                        .ok()
                        .flatten()
                        .ok_or_else(|| self.error_at(start, "invalid UTF-8 in string"))?;
                    out.push(s);
                    self.pos = start + s.len_utf8();
                }
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), JsogError> {
        let start = self.pos - 1;
        match self.bump() {
            None => Err(self.error_here("unexpected end of input in escape sequence")),
            Some(b'"') => {
                out.push('"');
                Ok(())
            }
            Some(b'\'') => {
                out.push('\'');
                Ok(())
            }
            Some(b'\\') => {
                out.push('\\');
                Ok(())
            }
            Some(b'/') => {
                out.push('/');
                Ok(())
            }
            Some(b'b') => {
                out.push('\u{8}');
                Ok(())
            }
            Some(b'f') => {
                out.push('\u{c}');
                Ok(())
            }
            Some(b'n') => {
                out.push('\n');
                Ok(())
            }
            Some(b'r') => {
                out.push('\r');
                Ok(())
            }
            Some(b't') => {
                out.push('\t');
                Ok(())
            }
            Some(b'u') => {
                let high = self.parse_hex4(start)?;
                if (0xD800..0xDC00).contains(&high) {
                    // High surrogate: a low surrogate escape must follow.
                    if self.peek() == Some(b'\\') && self.src.get(self.pos + 1) == Some(&b'u') {
                        self.pos += 2;
                        let low = self.parse_hex4(start)?;
                        if !(0xDC00..0xE000).contains(&low) {
                            return Err(self.error_at(start, "invalid low surrogate"));
                        }
                        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                        let c = char::from_u32(code)
                            .ok_or_else(|| self.error_at(start, "invalid unicode escape"))?;
                        out.push(c);
                        Ok(())
                    } else {
                        Err(self.error_at(start, "unpaired surrogate escape"))
                    }
                } else {
                    let c = char::from_u32(high)
                        .ok_or_else(|| self.error_at(start, "invalid unicode escape"))?;
                    out.push(c);
                    Ok(())
                }
            }
            Some(b) => Err(self.error_at(
                start,
                format!("invalid escape character '{}'", b as char),
            )),
        }
    }

    fn parse_hex4(&mut self, start: usize) -> Result<u32, JsogError> {
        if self.pos + 4 > self.src.len() {
            return Err(self.error_at(start, "unexpected end of input in unicode escape"));
        }
        let digits = &self.src[self.pos..self.pos + 4];
        let text = std::str::from_utf8(digits)
            .map_err(|_| self.error_at(start, "invalid unicode escape"))?;
        let value = u32::from_str_radix(text, 16)
            .map_err(|_| self.error_at(start, "invalid unicode escape"))?;
        self.pos += 4;
        Ok(value)
    }

    fn parse_keyword(&mut self) -> Result<Jsog, JsogError> {
        let start = self.pos;
        for (word, value) in [
            ("true", Primitive::Bool(true)),
            ("false", Primitive::Bool(false)),
            ("null", Primitive::Null),
        ] {
            if self.src[start..].starts_with(word.as_bytes()) {
                self.pos += word.len();
                return Ok(Jsog::from(value));
            }
        }
        Err(self.error_at(start, "unexpected characters, expected a value"))
    }

    fn parse_number(&mut self) -> Result<Primitive, JsogError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        let int_start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        let int_digits = self.pos - int_start;
        if int_digits == 0 {
            return Err(self.error_at(start, "malformed number"));
        }
        if int_digits > 1 && self.src[int_start] == b'0' {
            return Err(self.error_at(start, "numbers may not have leading zeros"));
        }

        let mut is_float = false;
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            let frac_start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            if self.pos == frac_start {
                return Err(self.error_at(start, "malformed number"));
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            if self.pos == exp_start {
                return Err(self.error_at(start, "malformed number"));
            }
        }

        let text = std::str::from_utf8(&self.src[start..self.pos])
            .expect("number text is ASCII");
        if is_float {
            let f = text
                .parse::<f64>()
                .map_err(|_| self.error_at(start, "malformed number"))?;
            Ok(Primitive::Float(f))
        } else {
            match text.parse::<i64>() {
                Ok(i) => Ok(Primitive::Int(i)),
                Err(_) => {
                    let big = text
                        .parse::<BigInt>()
                        .map_err(|_| self.error_at(start, "malformed number"))?;
                    Ok(Primitive::BigInt(big))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_null() {
        assert!(parse("").unwrap().is_null());
        assert!(parse("   \n\t ").unwrap().is_null());
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(parse("5").unwrap().i64_value().unwrap(), Some(5));
        assert_eq!(parse("true").unwrap().bool_value().unwrap(), Some(true));
        assert!(parse("null").unwrap().is_null());
        assert_eq!(
            parse("\"hi\"").unwrap().string_value().unwrap().as_deref(),
            Some("hi")
        );
    }

    #[test]
    fn test_lenient_extensions() {
        let tree = parse("// header\n{foo: 'bar', /* gap */ baz: 1}").unwrap();
        assert_eq!(tree.to_string(), r#"{"foo":"bar","baz":1}"#);
    }

    #[test]
    fn test_big_integer_literal() {
        let tree = parse("123456789012345678901234567890").unwrap();
        assert_eq!(
            tree.string_value().unwrap().as_deref(),
            Some("123456789012345678901234567890")
        );
    }

    #[test]
    fn test_error_carries_position() {
        let err = parse("{\"a\": }").unwrap_err();
        match err {
            JsogError::Parse { line, column, .. } => {
                assert_eq!(line, 1);
                assert!(column > 1);
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_content_fails() {
        assert!(parse("1 2").is_err());
    }

    #[test]
    fn test_raw_unicode_passthrough() {
        let tree = parse(r#""ñ 😀""#).unwrap();
        assert_eq!(
            tree.string_value().unwrap().as_deref(),
            Some("\u{f1} \u{1f600}")
        );
    }

    #[test]
    fn test_unicode_escapes_and_surrogate_pairs() {
        let tree = parse(r#""\u00f1 \ud83d\ude00""#).unwrap();
        assert_eq!(
            tree.string_value().unwrap().as_deref(),
            Some("\u{f1} \u{1f600}")
        );
        assert!(parse(r#""\ud83d""#).is_err());
    }
}
