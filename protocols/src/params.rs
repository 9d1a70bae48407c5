//! Text formats for parameter and signature files.
//!
//! - `common.dss`: the bit length of p in decimal, then p, q and g in hex
//! - `common2.ecs`: m in decimal, then A, B, q, x and y in hex, then the
//!   reduction exponents a, b and c in decimal
//! - DSA signatures (`.dss`): r and s in decimal, one per line
//! - ECDSA signatures (`.ecs`): r and s in hex, one per line
//!
//! Values are separated by any whitespace. Hex is written in upper case.

use core::str::{FromStr, SplitWhitespace};

use curve::BigInt;

use crate::dsa::{DsaParams, DsaSignature};
use crate::ecdsa::{EcdsaParams, EcdsaSignature};
use crate::errors::{ProtocolError, Result};

/// Whitespace-separated fields read in order.
struct Fields<'a> {
    iter: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn new(text: &'a str) -> Self {
        Fields {
            iter: text.split_whitespace(),
        }
    }

    fn next(&mut self, what: &str) -> Result<&'a str> {
        self.iter
            .next()
            .ok_or_else(|| ProtocolError::Parse(format!("missing {}", what)))
    }

    fn number<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let field = self.next(what)?;
        field
            .parse()
            .map_err(|_| ProtocolError::Parse(format!("bad {}: {}", what, field)))
    }

    fn big(&mut self, what: &str, radix: u32) -> Result<BigInt> {
        let field = self.next(what)?;
        BigInt::from_str_radix(field, radix).map_err(|_| ProtocolError::Parse(format!("bad {}: {}", what, field)))
    }

    fn finish(mut self) -> Result<()> {
        match self.iter.next() {
            None => Ok(()),
            Some(extra) => Err(ProtocolError::Parse(format!("unexpected trailing field: {}", extra))),
        }
    }
}

fn hex(value: &BigInt) -> String {
    value.to_str_radix(16).to_uppercase()
}

impl DsaParams {
    /// Parse `common.dss`. The stated bit length must match p.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut fields = Fields::new(text);
        let bits: usize = fields.number("bit length")?;
        let p = fields.big("p", 16)?;
        let q = fields.big("q", 16)?;
        let g = fields.big("g", 16)?;
        fields.finish()?;
        if p.bits() != bits {
            return Err(ProtocolError::Parse(format!(
                "p has {} bits, header says {}",
                p.bits(),
                bits
            )));
        }
        Self::new(p, q, g)
    }

    pub fn to_text(&self) -> String {
        format!("{}\n{}\n{}\n{}\n", self.bits(), hex(self.p()), hex(self.q()), hex(self.g()))
    }
}

impl EcdsaParams {
    /// Parse `common2.ecs`.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut fields = Fields::new(text);
        let m: usize = fields.number("m")?;
        let a = fields.big("A", 16)?;
        let b = fields.big("B", 16)?;
        let q = fields.big("q", 16)?;
        let x = fields.big("x", 16)?;
        let y = fields.big("y", 16)?;
        let ra: usize = fields.number("a")?;
        let rb: usize = fields.number("b")?;
        let rc: usize = fields.number("c")?;
        fields.finish()?;
        Self::new(m, a, b, q, x, y, [ra, rb, rc])
    }

    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
            self.m,
            hex(&self.a),
            hex(&self.b),
            hex(&self.q),
            hex(&self.x),
            hex(&self.y),
            self.basis[0],
            self.basis[1],
            self.basis[2]
        )
    }
}

impl DsaSignature {
    pub fn from_text(text: &str) -> Result<Self> {
        let mut fields = Fields::new(text);
        let r = fields.big("r", 10)?;
        let s = fields.big("s", 10)?;
        fields.finish()?;
        Ok(DsaSignature { r, s })
    }

    pub fn to_text(&self) -> String {
        format!("{}\n{}\n", self.r, self.s)
    }
}

impl EcdsaSignature {
    pub fn from_text(text: &str) -> Result<Self> {
        let mut fields = Fields::new(text);
        let r = fields.big("r", 16)?;
        let s = fields.big("s", 16)?;
        fields.finish()?;
        Ok(EcdsaSignature { r, s })
    }

    pub fn to_text(&self) -> String {
        format!("{}\n{}\n", hex(&self.r), hex(&self.s))
    }
}
