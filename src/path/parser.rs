//! Path expression compiler.
//!
//! A single left-to-right recursive-descent pass over the expression,
//! producing the linked segment chain. Compilation is pure: no state
//! outlives the call, and the result is reusable.

use super::ast::{JsogPath, Segment};
use super::error::JsogPathError;

/// Compiles a path expression string.
pub fn compile(path: &str) -> Result<JsogPath, JsogPathError> {
    if path.is_empty() {
        return Err(JsogPathError::Empty);
    }
    let mut compiler = Compiler {
        chars: path.chars().collect(),
        pos: 0,
    };
    if compiler.chars[0] != '$' {
        return Err(JsogPathError::MustBeginWithRoot);
    }
    compiler.pos = 1;
    let head = compiler.parse_segment()?;
    Ok(JsogPath { head })
}

struct Compiler {
    chars: Vec<char>,
    pos: usize,
}

impl Compiler {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Parses the segment starting at the current position; the end of the
    /// expression is the terminal root marker.
    fn parse_segment(&mut self) -> Result<Segment, JsogPathError> {
        match self.peek() {
            None => Ok(Segment::Root),
            Some('.') => {
                self.pos += 1;
                let key = self.parse_dot_key()?;
                Ok(Segment::Key {
                    key,
                    next: Box::new(self.parse_segment()?),
                })
            }
            Some('[') => {
                self.pos += 1;
                self.parse_bracket()
            }
            Some(found) => Err(JsogPathError::UnexpectedToken {
                position: self.pos,
                found,
                expected: "'.' or '['",
            }),
        }
    }

    /// A dot identifier: letters, digits, and hyphens, plus escapes.
    fn parse_dot_key(&mut self) -> Result<String, JsogPathError> {
        let start = self.pos;
        let mut key = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' {
                key.push(c);
                self.pos += 1;
            } else if c == '\\' {
                self.pos += 1;
                self.parse_escape(&mut key)?;
            } else if c == '.' || c == '[' {
                break;
            } else {
                return Err(JsogPathError::UnexpectedToken {
                    position: self.pos,
                    found: c,
                    expected: "end of path or a navigation operator",
                });
            }
        }
        if key.is_empty() {
            return match self.peek() {
                None => Err(JsogPathError::UnexpectedEnd {
                    position: start,
                    expected: "an identifier",
                }),
                Some(found) => Err(JsogPathError::UnexpectedToken {
                    position: start,
                    found,
                    expected: "an identifier",
                }),
            };
        }
        Ok(key)
    }

    /// The contents of a bracket segment: a decimal index or a quoted key.
    fn parse_bracket(&mut self) -> Result<Segment, JsogPathError> {
        match self.peek() {
            None => Err(JsogPathError::UnexpectedEnd {
                position: self.pos,
                expected: "an index or quoted key",
            }),
            Some(c) if c.is_ascii_digit() => {
                let index = self.parse_index()?;
                Ok(Segment::Index {
                    index,
                    next: Box::new(self.parse_segment()?),
                })
            }
            Some('\'') | Some('"') => {
                let key = self.parse_quoted_key()?;
                Ok(Segment::Key {
                    key,
                    next: Box::new(self.parse_segment()?),
                })
            }
            Some(_) => Err(JsogPathError::MustBeQuoted { position: self.pos }),
        }
    }

    fn parse_index(&mut self) -> Result<usize, JsogPathError> {
        let start = self.pos;
        let mut digits = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(JsogPathError::UnexpectedEnd {
                        position: self.pos,
                        expected: "']'",
                    })
                }
                Some(']') => {
                    self.pos += 1;
                    return digits
                        .parse::<usize>()
                        .map_err(|_| JsogPathError::InvalidIndex { position: start });
                }
                Some(c) if c.is_ascii_digit() => {
                    digits.push(c);
                    self.pos += 1;
                }
                Some(_) => {
                    return Err(JsogPathError::MustBeQuoted { position: self.pos });
                }
            }
        }
    }

    /// A quoted key. Any unescaped quote character ends the key; quote
    /// characters inside a key must be escaped. The closing quote must be
    /// immediately followed by `]`.
    fn parse_quoted_key(&mut self) -> Result<String, JsogPathError> {
        self.pos += 1; // opening quote
        let mut key = String::new();
        loop {
            match self.next() {
                None => {
                    return Err(JsogPathError::UnexpectedEnd {
                        position: self.pos,
                        expected: "a closing quote",
                    })
                }
                Some('\\') => self.parse_escape(&mut key)?,
                Some('\'') | Some('"') => {
                    return match self.next() {
                        Some(']') => Ok(key),
                        Some(found) => Err(JsogPathError::UnexpectedToken {
                            position: self.pos - 1,
                            found,
                            expected: "']'",
                        }),
                        None => Err(JsogPathError::UnexpectedEnd {
                            position: self.pos,
                            expected: "']'",
                        }),
                    };
                }
                Some(c) => key.push(c),
            }
        }
    }

    /// One escape sequence, with the leading backslash already consumed.
    ///
    /// Supported escapes: `\"`, `\'`, `\t`, `\n`, `\r`, `\/`, `\\`, and
    /// `\uXXXX` with exactly four hex digits.
    fn parse_escape(&mut self, out: &mut String) -> Result<(), JsogPathError> {
        let position = self.pos;
        match self.next() {
            None => Err(JsogPathError::UnexpectedEnd {
                position,
                expected: "an escape character",
            }),
            Some('"') => {
                out.push('"');
                Ok(())
            }
            Some('\'') => {
                out.push('\'');
                Ok(())
            }
            Some('/') => {
                out.push('/');
                Ok(())
            }
            Some('\\') => {
                out.push('\\');
                Ok(())
            }
            Some('n') => {
                out.push('\n');
                Ok(())
            }
            Some('r') => {
                out.push('\r');
                Ok(())
            }
            Some('t') => {
                out.push('\t');
                Ok(())
            }
            Some('u') => {
                if self.pos + 4 > self.chars.len() {
                    return Err(JsogPathError::UnexpectedEnd {
                        position: self.pos,
                        expected: "a 4-digit unicode value",
                    });
                }
                let digits: String = self.chars[self.pos..self.pos + 4].iter().collect();
                let code = u32::from_str_radix(&digits, 16).map_err(|_| {
                    JsogPathError::InvalidEscape {
                        position: self.pos,
                        found: 'u',
                    }
                })?;
                let c = char::from_u32(code).ok_or(JsogPathError::InvalidEscape {
                    position: self.pos,
                    found: 'u',
                })?;
                self.pos += 4;
                out.push(c);
                Ok(())
            }
            Some(found) => Err(JsogPathError::InvalidEscape { position, found }),
        }
    }
}
