//! Strategy text parser.
//!
//! Parses compact strategy text like `SMA(10,30)` or `RSI(14,30,70)` into
//! [`Strategy`] values, plus comma-separated lists of the same for the
//! `[strategies] list` config entry. Errors carry the character offset of
//! the failure.

use crate::domain::error::ParseError;
use crate::domain::strategy::Strategy;

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(ch) if ch == expected => {
                self.advance();
                Ok(())
            }
            Some(ch) => Err(ParseError {
                message: format!("expected '{}', found '{}'", expected, ch),
                position: self.pos,
            }),
            None => Err(ParseError {
                message: format!("expected '{}', found end of input", expected),
                position: self.pos,
            }),
        }
    }

    fn consume_exact(&mut self, s: &str) -> bool {
        if self.remaining().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn peek_word(&self) -> String {
        let mut word = String::new();
        for ch in self.remaining().chars() {
            if ch.is_alphanumeric() || ch == '_' {
                word.push(ch);
            } else {
                break;
            }
        }
        if word.is_empty() {
            self.peek()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "end of input".to_string())
        } else {
            word
        }
    }

    fn parse_integer(&mut self) -> Result<usize, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut digits = 0;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits += 1;
                self.advance();
            } else {
                break;
            }
        }

        if digits == 0 {
            return Err(ParseError {
                message: "expected integer".to_string(),
                position: start,
            });
        }

        let num_str = &self.input[start..self.pos];
        num_str.parse::<usize>().map_err(|_| ParseError {
            message: format!("invalid integer: {}", num_str),
            position: start,
        })
    }

    fn parse_number(&mut self) -> Result<f64, ParseError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut has_dot = false;
        let mut digits = 0;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits += 1;
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        if digits == 0 {
            return Err(ParseError {
                message: "expected number".to_string(),
                position: start,
            });
        }

        let num_str = &self.input[start..self.pos];
        num_str.parse::<f64>().map_err(|_| ParseError {
            message: format!("invalid number: {}", num_str),
            position: start,
        })
    }

    fn parse_strategy(&mut self) -> Result<Strategy, ParseError> {
        self.skip_whitespace();

        if self.consume_exact("SMA(") {
            let fast = self.parse_integer()?;
            self.expect_char(',')?;
            let slow = self.parse_integer()?;
            self.expect_char(')')?;
            return Ok(Strategy::SmaCross { fast, slow });
        }

        if self.consume_exact("EMA(") {
            let fast = self.parse_integer()?;
            self.expect_char(',')?;
            let slow = self.parse_integer()?;
            self.expect_char(')')?;
            return Ok(Strategy::EmaCross { fast, slow });
        }

        if self.consume_exact("RSI(") {
            let period = self.parse_integer()?;
            self.expect_char(',')?;
            let oversold = self.parse_number()?;
            self.expect_char(',')?;
            let overbought = self.parse_number()?;
            self.expect_char(')')?;
            return Ok(Strategy::RsiReversion {
                period,
                oversold,
                overbought,
            });
        }

        if self.consume_exact("MACD(") {
            let fast = self.parse_integer()?;
            self.expect_char(',')?;
            let slow = self.parse_integer()?;
            self.expect_char(',')?;
            let signal = self.parse_integer()?;
            self.expect_char(')')?;
            return Ok(Strategy::MacdCross { fast, slow, signal });
        }

        let word = self.peek_word();
        Err(ParseError {
            message: format!("expected strategy (SMA, EMA, RSI, MACD), found '{}'", word),
            position: self.pos,
        })
    }

    fn parse(&mut self) -> Result<Strategy, ParseError> {
        let strategy = self.parse_strategy()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(ParseError {
                message: format!("unexpected input after strategy: '{}'", self.remaining()),
                position: self.pos,
            });
        }
        Ok(strategy)
    }
}

/// Parse a single strategy.
pub fn parse(input: &str) -> Result<Strategy, ParseError> {
    let mut parser = Parser::new(input);
    parser.parse()
}

/// Parse a comma-separated strategy list.
///
/// The separator is the comma between entries; commas inside an argument
/// list belong to the entry, which is why this cannot split on commas up
/// front.
pub fn parse_list(input: &str) -> Result<Vec<Strategy>, ParseError> {
    let mut parser = Parser::new(input);
    let mut strategies = Vec::new();
    loop {
        strategies.push(parser.parse_strategy()?);
        parser.skip_whitespace();
        match parser.peek() {
            None => break,
            Some(',') => {
                parser.advance();
            }
            Some(ch) => {
                return Err(ParseError {
                    message: format!("expected ',' or end of list, found '{}'", ch),
                    position: parser.pos,
                });
            }
        }
    }
    Ok(strategies)
}
