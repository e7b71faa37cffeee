use num_complex::Complex;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Exact Laurent polynomial in one indeterminate `v` with integer coefficients.
///
/// Stored sparsely as exponent -> coefficient. A zero coefficient is never
/// stored, so structural equality is polynomial equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Laurent {
    terms: BTreeMap<i32, i64>,
}

impl Laurent {
    /// The constant polynomial `c`.
    pub fn constant(c: i64) -> Self {
        Laurent::monomial(c, 0)
    }

    /// The monomial `c * v^exponent`.
    pub fn monomial(c: i64, exponent: i32) -> Self {
        let mut terms = BTreeMap::new();
        if c != 0 {
            terms.insert(exponent, c);
        }
        Laurent { terms }
    }

    /// The indeterminate `v`.
    pub fn v() -> Self {
        Laurent::monomial(1, 1)
    }

    /// `v + v^-1`, the eigenvalue of `c_s` on `c_w` when `s` is a left descent of `w`.
    pub fn v_plus_v_inv() -> Self {
        Laurent::monomial(1, 1) + Laurent::monomial(1, -1)
    }

    /// Coefficient of `v^exponent`.
    pub fn coefficient(&self, exponent: i32) -> i64 {
        self.terms.get(&exponent).copied().unwrap_or(0)
    }

    /// Iterates over `(exponent, coefficient)` in increasing exponent order.
    pub fn terms(&self) -> impl Iterator<Item = (i32, i64)> + '_ {
        self.terms.iter().map(|(&e, &c)| (e, c))
    }

    /// The bar involution `v -> v^-1`.
    pub fn bar(&self) -> Laurent {
        Laurent {
            terms: self.terms.iter().map(|(&e, &c)| (-e, c)).collect(),
        }
    }

    /// Returns the value as an integer when the polynomial is constant.
    pub fn as_constant(&self) -> Option<i64> {
        match self.terms.len() {
            0 => Some(0),
            1 => self.terms.get(&0).copied(),
            _ => None,
        }
    }

    /// Evaluates the polynomial at a non-zero complex point.
    pub fn evaluate(&self, v: Complex<f64>) -> Complex<f64> {
        self.terms
            .iter()
            .map(|(&e, &c)| v.powi(e) * c as f64)
            .sum()
    }

    fn add_term(&mut self, exponent: i32, c: i64) {
        if c == 0 {
            return;
        }
        let entry = self.terms.entry(exponent).or_insert(0);
        *entry += c;
        if *entry == 0 {
            self.terms.remove(&exponent);
        }
    }
}

impl Zero for Laurent {
    fn zero() -> Self {
        Laurent::default()
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }
}

impl One for Laurent {
    fn one() -> Self {
        Laurent::constant(1)
    }
}

impl From<i64> for Laurent {
    fn from(c: i64) -> Self {
        Laurent::constant(c)
    }
}

impl AddAssign<&Laurent> for Laurent {
    fn add_assign(&mut self, rhs: &Laurent) {
        for (&e, &c) in &rhs.terms {
            self.add_term(e, c);
        }
    }
}

impl AddAssign for Laurent {
    fn add_assign(&mut self, rhs: Laurent) {
        *self += &rhs;
    }
}

impl Add for Laurent {
    type Output = Laurent;

    fn add(mut self, rhs: Laurent) -> Laurent {
        self += &rhs;
        self
    }
}

impl Add<&Laurent> for &Laurent {
    type Output = Laurent;

    fn add(self, rhs: &Laurent) -> Laurent {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl Neg for Laurent {
    type Output = Laurent;

    fn neg(self) -> Laurent {
        Laurent {
            terms: self.terms.into_iter().map(|(e, c)| (e, -c)).collect(),
        }
    }
}

impl Neg for &Laurent {
    type Output = Laurent;

    fn neg(self) -> Laurent {
        -self.clone()
    }
}

impl Sub for Laurent {
    type Output = Laurent;

    fn sub(self, rhs: Laurent) -> Laurent {
        self + (-rhs)
    }
}

impl Sub<&Laurent> for &Laurent {
    type Output = Laurent;

    fn sub(self, rhs: &Laurent) -> Laurent {
        self + &(-rhs)
    }
}

impl Mul<&Laurent> for &Laurent {
    type Output = Laurent;

    fn mul(self, rhs: &Laurent) -> Laurent {
        let mut out = Laurent::zero();
        for (&e1, &c1) in &self.terms {
            for (&e2, &c2) in &rhs.terms {
                out.add_term(e1 + e2, c1 * c2);
            }
        }
        out
    }
}

impl Mul for Laurent {
    type Output = Laurent;

    fn mul(self, rhs: Laurent) -> Laurent {
        &self * &rhs
    }
}

impl Mul<i64> for &Laurent {
    type Output = Laurent;

    fn mul(self, rhs: i64) -> Laurent {
        if rhs == 0 {
            return Laurent::zero();
        }
        Laurent {
            terms: self.terms.iter().map(|(&e, &c)| (e, c * rhs)).collect(),
        }
    }
}

impl fmt::Display for Laurent {
    /// Highest power first: `v + v^-1`, `-2`, `3v^2 - v^-1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, (&e, &c)) in self.terms.iter().rev().enumerate() {
            match (i, c < 0) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            let magnitude = c.unsigned_abs();
            if e == 0 || magnitude != 1 {
                write!(f, "{}", magnitude)?;
            }
            match e {
                0 => {}
                1 => write!(f, "v")?,
                _ => write!(f, "v^{}", e)?,
            }
        }
        Ok(())
    }
}
