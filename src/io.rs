//! Token readers for instance, answer and output files.
//!
//! [`Tokens`] is the lenient reader used by the checker and solver: any run of
//! ASCII whitespace separates tokens. [`StrictReader`] is the validator's
//! reader: every space and newline must be exactly where the format puts it.

use anyhow::{Context, Result, bail};

pub struct Tokens<'a> {
    iter: std::str::SplitAsciiWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            iter: input.split_ascii_whitespace(),
        }
    }

    pub fn next_token(&mut self, name: &str) -> Result<&'a str> {
        self.iter
            .next()
            .with_context(|| format!("unexpected end of file, expected {}", name))
    }

    pub fn next_i64(&mut self, name: &str) -> Result<i64> {
        let token = self.next_token(name)?;
        token
            .parse()
            .with_context(|| format!("expected integer {}, found {:?}", name, token))
    }

    pub fn next_usize(&mut self, name: &str) -> Result<usize> {
        let token = self.next_token(name)?;
        token
            .parse()
            .with_context(|| format!("expected non-negative integer {}, found {:?}", name, token))
    }
}

pub struct StrictReader<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> StrictReader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    /// 1-based line of the read position.
    pub fn line(&self) -> usize {
        self.line
    }

    fn describe_next(&self) -> String {
        match self.bytes.get(self.pos) {
            None => "end of file".to_string(),
            Some(&b) => format!("{:?}", b as char),
        }
    }

    /// Reads one canonical integer in `[lo, hi]`.
    ///
    /// Canonical means an optional `-` followed by digits, with no leading
    /// zeros and no negative zero.
    pub fn read_int(&mut self, lo: i64, hi: i64, name: &str) -> Result<i64> {
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
        let token = String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned();
        if token.is_empty() {
            bail!(
                "expected integer {} on line {}, found {}",
                name,
                self.line,
                self.describe_next()
            );
        }
        let digits = token.strip_prefix('-').unwrap_or(&token);
        let canonical = !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && !(digits.len() > 1 && digits.starts_with('0'))
            && token != "-0";
        if !canonical {
            bail!(
                "expected integer {} on line {}, found {:?}",
                name,
                self.line,
                token
            );
        }
        let value: i64 = token
            .parse()
            .with_context(|| format!("integer {} = {} does not fit in 64 bits", name, token))?;
        if value < lo || value > hi {
            bail!(
                "integer {} = {} violates the range [{}, {}]",
                name,
                value,
                lo,
                hi
            );
        }
        Ok(value)
    }

    fn expect_byte(&mut self, byte: u8, what: &str) -> Result<()> {
        if self.bytes.get(self.pos) != Some(&byte) {
            bail!(
                "expected {} on line {}, found {}",
                what,
                self.line,
                self.describe_next()
            );
        }
        self.pos += 1;
        Ok(())
    }

    pub fn read_space(&mut self) -> Result<()> {
        self.expect_byte(b' ', "space")
    }

    pub fn read_eoln(&mut self) -> Result<()> {
        self.expect_byte(b'\n', "end of line")?;
        self.line += 1;
        Ok(())
    }

    pub fn read_eof(&mut self) -> Result<()> {
        if self.pos != self.bytes.len() {
            bail!(
                "expected end of file on line {}, found {}",
                self.line,
                self.describe_next()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_tokens_ignore_layout() {
        let mut tokens = Tokens::new("  3\n\n -1\t7 x");
        assert_eq!(tokens.next_usize("a").unwrap(), 3);
        assert_eq!(tokens.next_i64("b").unwrap(), -1);
        assert_eq!(tokens.next_i64("c").unwrap(), 7);
        assert!(tokens.next_i64("d").is_err());
        assert!(tokens.next_token("e").is_err());
    }

    #[test]
    fn strict_reader_accepts_exact_layout() {
        let mut r = StrictReader::new("2 10\n-5\n");
        assert_eq!(r.read_int(1, 5, "a").unwrap(), 2);
        r.read_space().unwrap();
        assert_eq!(r.read_int(1, 10, "b").unwrap(), 10);
        r.read_eoln().unwrap();
        assert_eq!(r.line(), 2);
        assert_eq!(r.read_int(-5, 0, "c").unwrap(), -5);
        r.read_eoln().unwrap();
        r.read_eof().unwrap();
    }

    #[test]
    fn strict_reader_rejects_sloppy_input() {
        for bad in ["01", "-0", "+1", "1a", ""] {
            assert!(StrictReader::new(bad).read_int(-10, 10, "x").is_err(), "{bad:?}");
        }
        let err = StrictReader::new("11").read_int(1, 10, "N").unwrap_err();
        assert_eq!(err.to_string(), "integer N = 11 violates the range [1, 10]");

        let mut r = StrictReader::new("1  2");
        r.read_int(1, 2, "a").unwrap();
        r.read_space().unwrap();
        assert!(r.read_int(1, 2, "b").is_err());

        let mut r = StrictReader::new("1\n\n");
        r.read_int(1, 1, "a").unwrap();
        r.read_eoln().unwrap();
        assert!(r.read_eof().is_err());
    }
}
