use std::{
    cmp::Ordering,
    fmt,
    fmt::Display,
    ops::Mul,
    str::FromStr,
};

use anyhow::Error;
use num::Integer;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
    de::{
        self,
        Unexpected,
        Visitor,
    },
};

/// An exact, non-negative rational number.
///
/// Fractions are always stored in lowest terms. Multiplying fractions never loses precision,
/// which is what allows a group of multipliers to be folded in any order with the same result.
/// Precision is only dropped when a fraction is applied to an integer with [`Fraction::apply`].
///
/// A fraction deserializes from:
/// - A fraction string (`"3/2"`).
/// - A percentage string (`"30%"`).
/// - An integer (`2`).
/// - A floating point number (`1.3`), converted to a fraction out of 4096.
/// - A two-element array (`[3, 2]`).
#[derive(Debug, Clone, Copy)]
pub struct Fraction {
    num: u64,
    den: u64,
}

impl Fraction {
    /// The multiplicative identity.
    pub const ONE: Self = Self { num: 1, den: 1 };
    /// The multiplicative zero.
    pub const ZERO: Self = Self { num: 0, den: 1 };

    /// Creates a new fraction in lowest terms.
    ///
    /// A zero denominator is treated as one.
    pub fn new(num: u64, den: u64) -> Self {
        let den = den.max(1);
        let gcd = num.gcd(&den).max(1);
        Self {
            num: num / gcd,
            den: den / gcd,
        }
    }

    /// Creates a fraction out of 100.
    pub fn percentage(percent: u64) -> Self {
        Self::new(percent, 100)
    }

    pub fn numerator(&self) -> u64 {
        self.num
    }

    pub fn denominator(&self) -> u64 {
        self.den
    }

    /// Checks if the fraction is exactly one.
    pub fn is_one(&self) -> bool {
        self.num == self.den
    }

    /// Checks if the fraction is zero.
    pub fn is_zero(&self) -> bool {
        self.num == 0
    }

    /// The reciprocal. The reciprocal of zero is zero.
    pub fn inverse(&self) -> Self {
        if self.num == 0 {
            return Self::ZERO;
        }
        Self::new(self.den, self.num)
    }

    /// Multiplies an integer by the fraction, flooring the result.
    pub fn apply(&self, value: u64) -> u64 {
        value * self.num / self.den
    }

    /// Multiplies an integer by the fraction, rounding half down.
    pub fn apply_round(&self, value: u64) -> u64 {
        let product = value * self.num;
        let floor = product / self.den;
        if (product % self.den) * 2 > self.den {
            floor + 1
        } else {
            floor
        }
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ONE
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

impl From<u64> for Fraction {
    fn from(value: u64) -> Self {
        Self::new(value, 1)
    }
}

impl From<f64> for Fraction {
    fn from(value: f64) -> Self {
        Self::new((value.max(0f64) * 4096f64).round() as u64, 4096)
    }
}

impl FromStr for Fraction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some((num, den)) = s.split_once('/') {
            let num = num
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid numerator: {num}"))?;
            let den = den
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid denominator: {den}"))?;
            Ok(Self::new(num, den))
        } else {
            let percent = s.strip_suffix('%').unwrap_or(s);
            let percent = percent
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid percentage: {s}"))?;
            Ok(Self::percentage(percent))
        }
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.num == other.num && self.den == other.den
    }
}

impl Eq for Fraction {}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num as u128 * other.den as u128).cmp(&(other.num as u128 * self.den as u128))
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Mul for Fraction {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        // Cross-reduce first to keep intermediate values small.
        let a = self.num.gcd(&rhs.den).max(1);
        let b = rhs.num.gcd(&self.den).max(1);
        Self::new(
            (self.num / a) * (rhs.num / b),
            (self.den / b) * (rhs.den / a),
        )
    }
}

impl Mul<u64> for Fraction {
    type Output = Self;

    fn mul(self, rhs: u64) -> Self::Output {
        self * Self::from(rhs)
    }
}

impl std::iter::Product for Fraction {
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::ONE, Mul::mul)
    }
}

impl Serialize for Fraction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.den == 1 {
            serializer.serialize_u64(self.num)
        } else {
            serializer.serialize_str(&format!("{}/{}", self.num, self.den))
        }
    }
}

struct FractionVisitor;

impl<'de> Visitor<'de> for FractionVisitor {
    type Value = Fraction;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "a fraction string, percentage string, number, or two-element array"
        )
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Fraction::from(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(v)
            .map(Fraction::from)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v < 0f64 {
            return Err(E::invalid_value(Unexpected::Float(v), &self));
        }
        Ok(Fraction::from(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Fraction::from_str(v).map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let num: u64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let den: u64 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        Ok(Fraction::new(num, den))
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FractionVisitor)
    }
}
