//! Compiled expression tree.
//!
//! A compiled expression is an owned tree evaluated by recursive walking.
//! Trees are built by the parser only, so they are acyclic and every node
//! is owned by exactly one parent.

use crate::Complex;
use std::fmt;

/// Single-argument functions, including negation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryFunc {
    Neg,
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Sqrt,
    Sinh,
    Cosh,
    Tanh,
    Conj,
    Abs,
    Re,
    Im,
}

impl UnaryFunc {
    /// Look up a callable function by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "exp" => Some(Self::Exp),
            "log" => Some(Self::Log),
            "sqrt" => Some(Self::Sqrt),
            "sinh" => Some(Self::Sinh),
            "cosh" => Some(Self::Cosh),
            "tanh" => Some(Self::Tanh),
            "conj" => Some(Self::Conj),
            "abs" => Some(Self::Abs),
            "re" => Some(Self::Re),
            "im" => Some(Self::Im),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Conj => "conj",
            Self::Abs => "abs",
            Self::Re => "re",
            Self::Im => "im",
        }
    }

    #[inline]
    pub fn apply(&self, z: Complex) -> Complex {
        match self {
            Self::Neg => -z,
            Self::Sin => z.sin(),
            Self::Cos => z.cos(),
            Self::Tan => z.tan(),
            Self::Exp => z.exp(),
            Self::Log => z.ln(),
            Self::Sqrt => z.sqrt(),
            Self::Sinh => z.sinh(),
            Self::Cosh => z.cosh(),
            Self::Tanh => z.tanh(),
            Self::Conj => z.conj(),
            Self::Abs => Complex::real(z.norm()),
            Self::Re => Complex::real(z.re),
            Self::Im => Complex::real(z.im),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    #[inline]
    pub fn apply(&self, a: Complex, b: Complex) -> Complex {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
            Self::Pow => a.pow(&b),
        }
    }
}

/// Compiled function of one complex variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Constant(Complex),
    /// The free variable `z`.
    Variable,
    Unary {
        func: UnaryFunc,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// f(z) = z, installed when nothing else has compiled.
    pub fn identity() -> Self {
        Expr::Variable
    }

    pub fn unary(func: UnaryFunc, operand: Expr) -> Self {
        Expr::Unary {
            func,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluate at `z`. Singularities propagate as non-finite values.
    pub fn eval(&self, z: Complex) -> Complex {
        match self {
            Expr::Constant(c) => *c,
            Expr::Variable => z,
            Expr::Unary { func, operand } => func.apply(operand.eval(z)),
            Expr::Binary { op, left, right } => op.apply(left.eval(z), right.eval(z)),
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Constant(_) | Expr::Variable => 1,
            Expr::Unary { operand, .. } => 1 + operand.node_count(),
            Expr::Binary { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(c) if c.im == 0.0 => write!(f, "{}", c.re),
            Expr::Constant(c) if c.re == 0.0 && c.im == 1.0 => write!(f, "i"),
            Expr::Constant(c) => write!(f, "({} + ({} * i))", c.re, c.im),
            Expr::Variable => write!(f, "z"),
            Expr::Unary {
                func: UnaryFunc::Neg,
                operand,
            } => write!(f, "-({operand})"),
            Expr::Unary { func, operand } => write!(f, "{}({operand})", func.name()),
            Expr::Binary { op, left, right } => write!(f, "({left} {} {right})", op.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_returns_input() {
        let z = Complex::new(1.5, -0.25);
        assert_eq!(Expr::identity().eval(z), z);
    }

    #[test]
    fn evaluates_nested_tree() {
        // exp(z) * 2
        let expr = Expr::binary(
            BinaryOp::Mul,
            Expr::unary(UnaryFunc::Exp, Expr::Variable),
            Expr::Constant(Complex::real(2.0)),
        );
        let v = expr.eval(Complex::ZERO);
        assert_eq!(v, Complex::real(2.0));
    }

    #[test]
    fn division_singularity_propagates() {
        let expr = Expr::binary(BinaryOp::Div, Expr::Constant(Complex::ONE), Expr::Variable);
        assert!(!expr.eval(Complex::ZERO).is_finite());
        assert!(expr.eval(Complex::real(2.0)).is_finite());
    }

    #[test]
    fn function_names_round_trip() {
        for name in ["sin", "cos", "tan", "exp", "log", "sqrt", "sinh", "cosh", "tanh", "conj", "abs", "re", "im"] {
            let func = UnaryFunc::from_name(name).unwrap();
            assert_eq!(func.name(), name);
        }
        assert!(UnaryFunc::from_name("z").is_none());
        assert!(UnaryFunc::from_name("Sin").is_none());
    }

    #[test]
    fn display_is_fully_parenthesized() {
        let expr = Expr::binary(
            BinaryOp::Add,
            Expr::binary(BinaryOp::Pow, Expr::Variable, Expr::Constant(Complex::real(2.0))),
            Expr::Constant(Complex::I),
        );
        assert_eq!(expr.to_string(), "((z ^ 2) + i)");
    }

    #[test]
    fn node_count_counts_every_node() {
        let expr = Expr::unary(
            UnaryFunc::Sin,
            Expr::binary(BinaryOp::Mul, Expr::Variable, Expr::Variable),
        );
        assert_eq!(expr.node_count(), 4);
    }
}
