//! Complex number arithmetic on f64 components.
//!
//! Every operation is total: singular inputs (division by zero, log of zero)
//! produce non-finite components instead of panicking, and the colorizer
//! renders those as the sentinel color.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Largest |n| for which `pow` uses repeated multiplication.
const MAX_INTEGER_EXPONENT: f64 = 64.0;

/// Complex number with f64 components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    /// Zero constant.
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// Real unit.
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };

    /// Imaginary unit.
    pub const I: Self = Self { re: 0.0, im: 1.0 };

    /// Result of a division by zero. Both components are NaN.
    pub const SINGULARITY: Self = Self {
        re: f64::NAN,
        im: f64::NAN,
    };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Purely real value.
    #[inline]
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// Build from magnitude and angle (radians).
    #[inline]
    pub fn from_polar(r: f64, theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new(r * c, r * s)
    }

    /// Add two complex numbers.
    #[inline]
    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.re + other.re, self.im + other.im)
    }

    /// Subtract other from self.
    #[inline]
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(self.re - other.re, self.im - other.im)
    }

    /// Multiply two complex numbers: (a + bi)(c + di) = (ac - bd) + (ad + bc)i
    #[inline]
    pub fn mul(&self, other: &Self) -> Self {
        Self::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re,
        )
    }

    /// Divide self by other.
    ///
    /// Returns [`Complex::SINGULARITY`] when `other` is exactly zero.
    #[inline]
    pub fn div(&self, other: &Self) -> Self {
        let denom = other.norm_sq();
        if denom == 0.0 {
            return Self::SINGULARITY;
        }
        Self::new(
            (self.re * other.re + self.im * other.im) / denom,
            (self.im * other.re - self.re * other.im) / denom,
        )
    }

    /// Negation.
    #[inline]
    pub fn neg(&self) -> Self {
        Self::new(-self.re, -self.im)
    }

    /// Complex conjugate.
    #[inline]
    pub fn conj(&self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Scale both components by a real factor.
    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.re * factor, self.im * factor)
    }

    /// Squared magnitude: |z|² = re² + im²
    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Magnitude |z|.
    #[inline]
    pub fn norm(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Principal argument in (-π, π].
    #[inline]
    pub fn arg(&self) -> f64 {
        self.im.atan2(self.re)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }

    /// True when both components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    /// e^z = e^re (cos im + i sin im)
    pub fn exp(&self) -> Self {
        Self::from_polar(self.re.exp(), self.im)
    }

    /// Principal logarithm: ln|z| + i arg(z).
    ///
    /// log(0) has a real part of -inf.
    pub fn ln(&self) -> Self {
        Self::new(self.norm().ln(), self.arg())
    }

    /// base^exponent = exp(exponent · log(base)), with 0^w = 0 for every w.
    ///
    /// Small integer real exponents take the repeated-multiplication path,
    /// which agrees with the principal branch and keeps `z^2` exact.
    pub fn pow(&self, exponent: &Self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        if exponent.im == 0.0
            && exponent.re.fract() == 0.0
            && exponent.re.abs() <= MAX_INTEGER_EXPONENT
        {
            return self.powi(exponent.re as i32);
        }
        exponent.mul(&self.ln()).exp()
    }

    /// Integer power by binary exponentiation. Negative powers take the reciprocal.
    pub fn powi(&self, n: i32) -> Self {
        let mut result = Self::ONE;
        let mut base = *self;
        let mut k = n.unsigned_abs();
        while k > 0 {
            if k & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            k >>= 1;
        }
        if n < 0 {
            Self::ONE / result
        } else {
            result
        }
    }

    /// Principal square root.
    pub fn sqrt(&self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        Self::from_polar(self.norm().sqrt(), self.arg() / 2.0)
    }

    /// sin(a + bi) = sin a cosh b + i cos a sinh b
    pub fn sin(&self) -> Self {
        Self::new(
            self.re.sin() * self.im.cosh(),
            self.re.cos() * self.im.sinh(),
        )
    }

    /// cos(a + bi) = cos a cosh b - i sin a sinh b
    pub fn cos(&self) -> Self {
        Self::new(
            self.re.cos() * self.im.cosh(),
            -self.re.sin() * self.im.sinh(),
        )
    }

    pub fn tan(&self) -> Self {
        self.sin() / self.cos()
    }

    /// sinh(a + bi) = sinh a cos b + i cosh a sin b
    pub fn sinh(&self) -> Self {
        Self::new(
            self.re.sinh() * self.im.cos(),
            self.re.cosh() * self.im.sin(),
        )
    }

    /// cosh(a + bi) = cosh a cos b + i sinh a sin b
    pub fn cosh(&self) -> Self {
        Self::new(
            self.re.cosh() * self.im.cos(),
            self.re.sinh() * self.im.sin(),
        )
    }

    pub fn tanh(&self) -> Self {
        self.sinh() / self.cosh()
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::add(&self, &rhs)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::sub(&self, &rhs)
    }
}

impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::mul(&self, &rhs)
    }
}

impl Div for Complex {
    type Output = Complex;

    fn div(self, rhs: Complex) -> Complex {
        Complex::div(&self, &rhs)
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::neg(&self)
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::real(re)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}
