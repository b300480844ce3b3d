//! Lenient decoding of list literals that arrive as plain strings.
//!
//! The movie backend stores genre, cast and crew columns as the printed form
//! of a list, e.g. `['Action', 'Drama']`, and ships that text verbatim inside
//! JSON. Elements may be quoted with either quote character (the printer
//! switches to double quotes when a name contains an apostrophe).

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{ListDecodeError, Result};

/// Decode a string-encoded list of strings.
///
/// Strict JSON is tried first; anything else goes through a scanner that
/// accepts single or double quoted elements, backslash escapes and a single
/// trailing comma. Every other shape is an error, never a panic.
pub fn decode_list(input: &str) -> Result<Vec<String>> {
    let trimmed = input.trim();
    if !trimmed.starts_with('[') {
        return Err(ListDecodeError::NotAList);
    }

    if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
        return Ok(items);
    }

    ListScanner::new(trimmed).scan()
}

struct ListScanner<'a> {
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> ListScanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.char_indices().peekable(),
        }
    }

    fn scan(mut self) -> Result<Vec<String>> {
        self.expect('[')?;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.consume_if(']') {
            return self.finish(items);
        }

        loop {
            self.skip_whitespace();
            items.push(self.quoted()?);
            self.skip_whitespace();

            match self.chars.next() {
                Some((_, ',')) => {
                    self.skip_whitespace();
                    if self.consume_if(']') {
                        break;
                    }
                }
                Some((_, ']')) => break,
                Some((position, found)) => {
                    return Err(ListDecodeError::UnexpectedChar {
                        position,
                        found,
                    });
                }
                None => return Err(ListDecodeError::UnexpectedEnd),
            }
        }

        self.finish(items)
    }

    fn finish(mut self, items: Vec<String>) -> Result<Vec<String>> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((position, _)) => {
                Err(ListDecodeError::TrailingInput { position })
            }
            None => Ok(items),
        }
    }

    fn quoted(&mut self) -> Result<String> {
        let (start, quote) = match self.chars.next() {
            Some((position, quote @ ('\'' | '"'))) => (position, quote),
            Some((position, found)) => {
                return Err(ListDecodeError::UnexpectedChar { position, found });
            }
            None => return Err(ListDecodeError::UnexpectedEnd),
        };

        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, escaped)) => value.push(escaped),
                    None => {
                        return Err(ListDecodeError::UnterminatedString {
                            position: start,
                        });
                    }
                },
                Some((_, c)) if c == quote => return Ok(value),
                Some((_, c)) => value.push(c),
                None => {
                    return Err(ListDecodeError::UnterminatedString {
                        position: start,
                    });
                }
            }
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            Some((position, found)) => {
                Err(ListDecodeError::UnexpectedChar { position, found })
            }
            None => Err(ListDecodeError::UnexpectedEnd),
        }
    }

    fn consume_if(&mut self, expected: char) -> bool {
        self.chars.next_if(|(_, c)| *c == expected).is_some()
    }

    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }
}
