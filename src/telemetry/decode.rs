use thiserror::Error;

use super::Telemetry;

/// Why a raw record failed to decode. Non-fatal: the caller skips the cycle.
/// Never conflate this with a zeroed reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected `{expected}` at byte {at}")]
    ExpectedToken { expected: &'static str, at: usize },
    #[error("expected a number at byte {at}")]
    ExpectedNumber { at: usize },
    #[error("expected an uppercase sensor token at byte {at}")]
    ExpectedSensor { at: usize },
}

/// Decode one encoded telemetry record:
///
/// ```text
/// X-<num>-Y-<num>-BAT-<num>-GYR-[<num>, <num>, <num>]-WIND-<num>-DUST-<num>-SENS-<letters>
/// ```
///
/// `<num>` is an optionally-signed decimal (digits, optional fraction; no
/// exponent). Whitespace is allowed after `[`, after each comma and before
/// `]`, nowhere else. The match is anchored at the start of the string and
/// trailing content after a full match is ignored.
///
/// No range validation happens here. Clamping is the policy's job.
pub fn decode(raw: &str) -> Result<Telemetry, DecodeError> {
    let mut s = Scanner::new(raw);

    s.literal("X-")?;
    let x = s.number()?;
    s.literal("-Y-")?;
    let y = s.number()?;
    s.literal("-BAT-")?;
    let battery = s.number()?;

    s.literal("-GYR-[")?;
    s.spaces();
    let gx = s.number()?;
    s.literal(",")?;
    s.spaces();
    let gy = s.number()?;
    s.literal(",")?;
    s.spaces();
    let gz = s.number()?;
    s.spaces();
    s.literal("]")?;

    s.literal("-WIND-")?;
    let wind = s.number()?;
    s.literal("-DUST-")?;
    let dust = s.number()?;
    s.literal("-SENS-")?;
    let sensor = s.letters()?;

    Ok(Telemetry {
        x,
        y,
        battery,
        gyroscope: (gx, gy, gz),
        wind,
        dust,
        sensor: sensor.to_string(),
    })
}

/// Byte-level cursor over the record. The grammar is pure ASCII, so indexing
/// bytes is safe and positions in errors are byte offsets.
struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn literal(&mut self, expected: &'static str) -> Result<(), DecodeError> {
        if self.src.as_bytes()[self.pos..].starts_with(expected.as_bytes()) {
            self.pos += expected.len();
            Ok(())
        } else {
            Err(DecodeError::ExpectedToken {
                expected,
                at: self.pos,
            })
        }
    }

    fn spaces(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// `-?\d+(\.\d+)?` — the dot is only consumed when digits follow it, so
    /// a record like `X-5.-Y-...` fails on the separator, not mid-number.
    fn number(&mut self) -> Result<f64, DecodeError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        if !self.eat_digits() {
            self.pos = start;
            return Err(DecodeError::ExpectedNumber { at: start });
        }
        if self.peek() == Some(b'.') {
            let dot = self.pos;
            self.pos += 1;
            if !self.eat_digits() {
                self.pos = dot;
            }
        }
        self.src[start..self.pos]
            .parse()
            .map_err(|_| DecodeError::ExpectedNumber { at: start })
    }

    fn eat_digits(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        self.pos > start
    }

    /// `[A-Z]+`, taken verbatim. Lowercase is a decode failure, not a token.
    fn letters(&mut self) -> Result<&'a str, DecodeError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_uppercase()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(DecodeError::ExpectedSensor { at: start });
        }
        Ok(&self.src[start..self.pos])
    }
}
