//! Reading monomials, polynomials and ideals from text.
//!
//! Grammar (whitespace is allowed between tokens):
//!
//! ```text
//! monomial   := "1" | var+
//! var        := "x" digit+
//! polynomial := term ("+" term)*
//! term       := "0" | monomial
//! ideal      := "{" "}" | "{" polynomial ("," polynomial)* "}"
//! ```
//!
//! Variables of a monomial may appear in any order but at most once. A
//! [`TextReader`] consumes the valid prefix of a token and stops in front of
//! the first character it cannot use, so several values can be read from one
//! input in sequence.

use crate::error::{ParseError, ParseResult};
use crate::ideal::Ideal;
use crate::monomial::Monomial;
use crate::order::MonomialOrder;
use crate::polynomial::Polynomial;

/// Cursor over textual input.
#[derive(Debug, Clone)]
pub struct TextReader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TextReader<'a> {
    /// Reader positioned at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Byte offset of the next unread character.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Unread input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Whether only whitespace remains.
    pub fn is_exhausted(&self) -> bool {
        self.rest().trim_start().is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek()
            && c.is_whitespace()
        {
            self.bump(c);
        }
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(found) => ParseError::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None => ParseError::UnexpectedEnd { offset: self.pos },
        }
    }

    fn expect(&mut self, want: char) -> ParseResult<()> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == want => {
                self.bump(c);
                Ok(())
            }
            _ => Err(self.unexpected()),
        }
    }

    // Decimal index after `x`, saturating at usize::MAX.
    fn read_index(&mut self) -> Option<usize> {
        let digits = self
            .rest()
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        if digits == 0 {
            return None;
        }
        let index = self.rest()[..digits].bytes().fold(0usize, |acc, d| {
            acc.saturating_mul(10).saturating_add(usize::from(d - b'0'))
        });
        self.pos += digits;
        Some(index)
    }

    /// Read a monomial in `nvars` variables.
    pub fn read_monomial(&mut self, nvars: usize) -> ParseResult<Monomial> {
        self.skip_whitespace();
        if self.peek() == Some('1') {
            self.bump('1');
            return Ok(Monomial::one(nvars));
        }
        let mut m = Monomial::one(nvars);
        let mut read = false;
        let mut delimited = true;
        loop {
            match self.peek() {
                None if read => return Ok(m),
                None => return Err(ParseError::UnexpectedEnd { offset: self.pos }),
                Some('x') if delimited => {
                    self.bump('x');
                    let index = self
                        .read_index()
                        .ok_or(ParseError::MissingIndex { offset: self.pos })?;
                    if index >= nvars {
                        return Err(ParseError::VariableOutOfRange { index, nvars });
                    }
                    if m.test(index) {
                        return Err(ParseError::DuplicateVariable { index });
                    }
                    m.set(index, true);
                    read = true;
                    delimited = false;
                }
                Some(c) if c.is_whitespace() => {
                    self.bump(c);
                    delimited = true;
                }
                Some(c) if read && c != 'x' => return Ok(m),
                Some(found) => {
                    return Err(ParseError::UnexpectedChar {
                        found,
                        offset: self.pos,
                    });
                }
            }
        }
    }

    /// Read a polynomial in `nvars` variables, sorted under `order`.
    ///
    /// Terms are added, so a repeated term cancels.
    pub fn read_polynomial(
        &mut self,
        nvars: usize,
        order: &MonomialOrder,
    ) -> ParseResult<Polynomial> {
        let mut terms = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek() == Some('0') {
                self.bump('0');
            } else {
                terms.push(self.read_monomial(nvars)?);
            }
            self.skip_whitespace();
            if self.peek() != Some('+') {
                break;
            }
            self.bump('+');
        }
        Ok(Polynomial::from_monomials(nvars, order.clone(), terms))
    }

    /// Read an ideal in `nvars` variables under `order`.
    ///
    /// Zero polynomials in the list are skipped.
    pub fn read_ideal(&mut self, nvars: usize, order: &MonomialOrder) -> ParseResult<Ideal> {
        self.expect('{')?;
        let mut ideal = Ideal::new(nvars, order.clone());
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.bump('}');
            return Ok(ideal);
        }
        loop {
            let poly = self.read_polynomial(nvars, order)?;
            if !poly.is_zero() {
                ideal.insert(poly);
            }
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.bump(','),
                Some('}') => {
                    self.bump('}');
                    return Ok(ideal);
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    /// Succeed only if nothing but whitespace remains.
    pub fn finish(mut self) -> ParseResult<()> {
        self.skip_whitespace();
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(ParseError::TrailingInput { offset: self.pos }),
        }
    }
}

impl Monomial {
    /// Read a monomial in `nvars` variables, such as `"x0 x3"` or `"1"`.
    pub fn parse(text: &str, nvars: usize) -> ParseResult<Self> {
        let mut reader = TextReader::new(text);
        let m = reader.read_monomial(nvars)?;
        reader.finish()?;
        Ok(m)
    }
}

impl Polynomial {
    /// Read a polynomial such as `"x0 x1 + x2 + 1"`.
    pub fn parse(text: &str, nvars: usize, order: MonomialOrder) -> ParseResult<Self> {
        let mut reader = TextReader::new(text);
        let p = reader.read_polynomial(nvars, &order)?;
        reader.finish()?;
        Ok(p)
    }
}

impl Ideal {
    /// Read an ideal such as `"{x0 + 1, x1 x2}"`.
    pub fn parse(text: &str, nvars: usize, order: MonomialOrder) -> ParseResult<Self> {
        let mut reader = TextReader::new(text);
        let ideal = reader.read_ideal(nvars, &order)?;
        reader.finish()?;
        Ok(ideal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monomial() {
        let m = Monomial::parse("  x3 x0", 4).unwrap();
        assert_eq!(m, Monomial::from_vars(4, &[0, 3]));
        assert_eq!(m.to_string(), "x0 x3");
        assert_eq!(Monomial::parse("x007", 8).unwrap(), Monomial::var(8, 7));
        assert!(Monomial::parse("1", 3).unwrap().is_one());
    }

    #[test]
    fn test_monomial_errors() {
        assert_eq!(
            Monomial::parse("x1 x1", 3),
            Err(ParseError::DuplicateVariable { index: 1 })
        );
        assert_eq!(
            Monomial::parse("x4", 3),
            Err(ParseError::VariableOutOfRange { index: 4, nvars: 3 })
        );
        assert_eq!(
            Monomial::parse("x99999999999999999999999", 3),
            Err(ParseError::VariableOutOfRange {
                index: usize::MAX,
                nvars: 3
            })
        );
        assert_eq!(
            Monomial::parse("x", 3),
            Err(ParseError::MissingIndex { offset: 1 })
        );
        assert_eq!(
            Monomial::parse("x1x2", 3),
            Err(ParseError::UnexpectedChar {
                found: 'x',
                offset: 2
            })
        );
        assert_eq!(Monomial::parse("  ", 3), Err(ParseError::UnexpectedEnd { offset: 2 }));
        assert_eq!(
            Monomial::parse("y", 3),
            Err(ParseError::UnexpectedChar {
                found: 'y',
                offset: 0
            })
        );
    }

    #[test]
    fn test_reader_stops_before_bad_char() {
        let mut reader = TextReader::new("x0 x2;rest");
        let m = reader.read_monomial(3).unwrap();
        assert_eq!(m, Monomial::from_vars(3, &[0, 2]));
        assert_eq!(reader.rest(), ";rest");
        assert_eq!(reader.offset(), 5);
        assert!(reader.finish().is_err());

        let mut reader = TextReader::new("x1 + x0, x2");
        let p = reader.read_polynomial(3, &MonomialOrder::Lex).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(reader.rest(), ", x2");
    }

    #[test]
    fn test_polynomial() {
        let order = MonomialOrder::Lex;
        let p = Polynomial::parse("x0 x1 + x2 + 1 + 0", 3, order.clone()).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.to_string(), "x2 + x0 x1 + 1");
        assert!(Polynomial::parse("0", 3, order.clone()).unwrap().is_zero());
        assert!(Polynomial::parse("x1 + x1", 3, order.clone()).unwrap().is_zero());
        assert_eq!(
            Polynomial::parse("x1 +", 3, order.clone()),
            Err(ParseError::UnexpectedEnd { offset: 4 })
        );
        assert_eq!(
            Polynomial::parse("", 3, order.clone()),
            Err(ParseError::UnexpectedEnd { offset: 0 })
        );
        assert_eq!(
            Polynomial::parse("x1 x2 x0", 2, order),
            Err(ParseError::VariableOutOfRange { index: 2, nvars: 2 })
        );
    }

    #[test]
    fn test_ideal() {
        let order = MonomialOrder::GRevLex;
        let ideal = Ideal::parse("{ x0 x1 + x2, x1 + 1, 0, x1 + 1 }", 3, order.clone()).unwrap();
        assert_eq!(ideal.len(), 2);
        assert_eq!(Ideal::parse(&ideal.to_string(), 3, order.clone()).unwrap(), ideal);
        assert!(Ideal::parse("{}", 3, order.clone()).unwrap().is_empty());
        assert!(Ideal::parse("{ x0, }", 3, order.clone()).is_err());
        assert!(Ideal::parse("x0", 3, order.clone()).is_err());
        assert_eq!(
            Ideal::parse("{x0", 3, order.clone()),
            Err(ParseError::UnexpectedEnd { offset: 3 })
        );
        assert_eq!(
            Ideal::parse("{x0} x1", 3, order),
            Err(ParseError::TrailingInput { offset: 5 })
        );
    }
}
