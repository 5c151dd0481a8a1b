//! Recursive-descent compiler from expression text to [`Expr`].
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! Expression := Term (('+' | '-') Term)*
//! Term       := Unary (('*' | '/') Unary)*
//! Unary      := '-' Unary | Factor
//! Factor     := Base ('^' Unary)?              right-associative
//! Base       := number | 'z' | 'i' | 'pi' | 'e'
//!             | FUNC '(' Expression ')'
//!             | '(' Expression ')'
//! ```
//!
//! The whole token stream must be consumed. Both the parser's own nesting
//! (parentheses, function calls, unary minus chains, exponent chains) and the
//! height of the resulting tree are bounded by [`CompileOptions::max_depth`],
//! so long `+` or `*` chains are rejected too. Evaluating, printing and
//! dropping an [`Expr`] all recurse over its height.

use crate::expr::{BinaryOp, Expr, UnaryFunc};
use crate::tokenizer::{tokenize_with_mode, Token, TokenKind, TokenizerMode};
use crate::{Complex, SyntaxError};
use std::f64::consts::{E, PI};

/// Default bound on nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Name of the free variable.
pub const VARIABLE_NAME: &str = "z";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    pub tokenizer_mode: TokenizerMode,
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            tokenizer_mode: TokenizerMode::Lenient,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compile with default options (lenient tokenizer, depth 64).
pub fn compile(input: &str) -> Result<Expr, SyntaxError> {
    compile_with(input, &CompileOptions::default())
}

/// Compile with explicit options.
///
/// Has no side effects beyond logging dropped characters; compiling the same
/// input twice yields equal trees.
pub fn compile_with(input: &str, options: &CompileOptions) -> Result<Expr, SyntaxError> {
    let stream = tokenize_with_mode(input, options.tokenizer_mode)?;
    for (offset, ch) in &stream.skipped {
        log::warn!("Ignoring unrecognized character '{}' at offset {}", ch, offset);
    }

    let mut parser = Parser::new(&stream.tokens, options.max_depth);
    let Parsed { expr, .. } = parser.parse_expression()?;
    if let Some(token) = parser.peek() {
        return Err(SyntaxError::TrailingInput {
            found: token.kind.to_string(),
            offset: token.offset,
        });
    }
    Ok(expr)
}

/// A subtree and its height (a leaf has height 0).
struct Parsed {
    expr: Expr,
    height: usize,
}

impl Parsed {
    fn leaf(expr: Expr) -> Self {
        Self { expr, height: 0 }
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume the next token if it has exactly this kind.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        match self.peek() {
            Some(token) if &token.kind == kind => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if self.depth >= self.max_depth {
            return Err(SyntaxError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Reject a node whose subtree would be taller than the limit.
    fn check_height(&self, height: usize) -> Result<usize, SyntaxError> {
        if height > self.max_depth {
            return Err(SyntaxError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        Ok(height)
    }

    fn parse_expression(&mut self) -> Result<Parsed, SyntaxError> {
        self.nested(|p| {
            let mut left = p.parse_term()?;
            loop {
                let op = if p.eat(&TokenKind::Plus) {
                    BinaryOp::Add
                } else if p.eat(&TokenKind::Minus) {
                    BinaryOp::Sub
                } else {
                    break;
                };
                let right = p.parse_term()?;
                left = p.binary(op, left, right)?;
            }
            Ok(left)
        })
    }

    fn parse_term(&mut self) -> Result<Parsed, SyntaxError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.eat(&TokenKind::Star) {
                BinaryOp::Mul
            } else if self.eat(&TokenKind::Slash) {
                BinaryOp::Div
            } else {
                break;
            };
            let right = self.parse_unary()?;
            left = self.binary(op, left, right)?;
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Parsed, SyntaxError> {
        if self.eat(&TokenKind::Minus) {
            let operand = self.nested(|p| p.parse_unary())?;
            return self.unary(UnaryFunc::Neg, operand);
        }
        self.parse_factor()
    }

    fn parse_factor(&mut self) -> Result<Parsed, SyntaxError> {
        let base = self.parse_base()?;
        if self.eat(&TokenKind::Caret) {
            let exponent = self.nested(|p| p.parse_unary())?;
            return self.binary(BinaryOp::Pow, base, exponent);
        }
        Ok(base)
    }

    fn parse_base(&mut self) -> Result<Parsed, SyntaxError> {
        let token = self.next().ok_or(SyntaxError::UnexpectedEnd)?;
        match &token.kind {
            TokenKind::Number(value) => Ok(Parsed::leaf(Expr::Constant(Complex::real(*value)))),
            TokenKind::Ident(name) => self.parse_identifier(name, token.offset),
            TokenKind::LParen => {
                let inner = self.parse_expression()?;
                self.expect_closing(token.offset)?;
                Ok(inner)
            }
            other => Err(SyntaxError::UnexpectedToken {
                found: other.to_string(),
                offset: token.offset,
            }),
        }
    }

    fn parse_identifier(&mut self, name: &str, offset: usize) -> Result<Parsed, SyntaxError> {
        match name {
            VARIABLE_NAME => return Ok(Parsed::leaf(Expr::Variable)),
            "i" => return Ok(Parsed::leaf(Expr::Constant(Complex::I))),
            "pi" => return Ok(Parsed::leaf(Expr::Constant(Complex::real(PI)))),
            "e" => return Ok(Parsed::leaf(Expr::Constant(Complex::real(E)))),
            _ => {}
        }

        let Some(func) = UnaryFunc::from_name(name) else {
            return Err(SyntaxError::UnknownIdentifier {
                name: name.to_string(),
                offset,
            });
        };

        let open = self.next().ok_or(SyntaxError::UnexpectedEnd)?;
        if open.kind != TokenKind::LParen {
            return Err(SyntaxError::UnexpectedToken {
                found: open.kind.to_string(),
                offset: open.offset,
            });
        }
        let argument = self.parse_expression()?;
        self.expect_closing(open.offset)?;
        self.unary(func, argument)
    }

    fn unary(&self, func: UnaryFunc, operand: Parsed) -> Result<Parsed, SyntaxError> {
        let height = self.check_height(operand.height + 1)?;
        Ok(Parsed {
            expr: Expr::unary(func, operand.expr),
            height,
        })
    }

    fn binary(&self, op: BinaryOp, left: Parsed, right: Parsed) -> Result<Parsed, SyntaxError> {
        let height = self.check_height(left.height.max(right.height) + 1)?;
        Ok(Parsed {
            expr: Expr::binary(op, left.expr, right.expr),
            height,
        })
    }

    fn expect_closing(&mut self, open_offset: usize) -> Result<(), SyntaxError> {
        if self.eat(&TokenKind::RParen) {
            Ok(())
        } else {
            Err(SyntaxError::MissingClosingParen {
                offset: open_offset,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str, z: Complex) -> Complex {
        compile(input).unwrap().eval(z)
    }

    #[test]
    fn identity_expression() {
        assert_eq!(compile("z").unwrap(), Expr::Variable);
    }

    #[test]
    fn polynomial_values() {
        assert_eq!(eval("z^2+1", Complex::real(2.0)), Complex::real(5.0));
        assert_eq!(eval("z^2+1", Complex::I), Complex::ZERO);
    }

    #[test]
    fn precedence_mul_over_add() {
        assert_eq!(eval("1+2*3", Complex::ZERO), Complex::real(7.0));
        assert_eq!(eval("(1+2)*3", Complex::ZERO), Complex::real(9.0));
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(eval("10-4-3", Complex::ZERO), Complex::real(3.0));
        assert_eq!(eval("8/4/2", Complex::ZERO), Complex::real(1.0));
    }

    #[test]
    fn power_is_right_associative() {
        // 2^3^2 = 2^9 = 512
        assert_eq!(eval("2^3^2", Complex::ZERO), Complex::real(512.0));
    }

    #[test]
    fn unary_minus_binds_below_power() {
        assert_eq!(eval("-z^2", Complex::real(3.0)), Complex::real(-9.0));
        assert_eq!(eval("z*-1", Complex::real(3.0)), Complex::real(-3.0));
        assert_eq!(eval("2^-1", Complex::ZERO), Complex::real(0.5));
    }

    #[test]
    fn imaginary_unit_and_constants() {
        assert_eq!(eval("i*i", Complex::ZERO), Complex::real(-1.0));
        assert_eq!(eval("pi", Complex::ZERO), Complex::real(PI));
        assert_eq!(eval("e", Complex::ZERO), Complex::real(E));
    }

    #[test]
    fn function_calls() {
        let z = Complex::new(0.3, -0.8);
        assert_eq!(eval("sin(z)", z), z.sin());
        assert_eq!(eval("cos(z)", z), z.cos());
        assert_eq!(eval("exp(z)", z), z.exp());
        assert_eq!(eval("log(z)", z), z.ln());
        assert_eq!(eval("sqrt(z)", z), z.sqrt());
        assert_eq!(eval("conj(z)", z), z.conj());
    }

    #[test]
    fn nested_function_calls() {
        let z = Complex::new(0.5, 0.5);
        assert_eq!(eval("exp(sin(z)+1)", z), (z.sin() + Complex::ONE).exp());
    }

    #[test]
    fn missing_operand_fails() {
        let err = compile("z+*2").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnexpectedToken {
                found: "*".into(),
                offset: 2
            }
        );
    }

    #[test]
    fn unclosed_paren_fails() {
        assert_eq!(
            compile("(z").unwrap_err(),
            SyntaxError::MissingClosingParen { offset: 0 }
        );
        assert_eq!(
            compile("sin(z").unwrap_err(),
            SyntaxError::MissingClosingParen { offset: 3 }
        );
    }

    #[test]
    fn premature_end_fails() {
        assert_eq!(compile("z+").unwrap_err(), SyntaxError::UnexpectedEnd);
        assert_eq!(compile("").unwrap_err(), SyntaxError::UnexpectedEnd);
        assert_eq!(compile("sin").unwrap_err(), SyntaxError::UnexpectedEnd);
    }

    #[test]
    fn unknown_identifier_fails() {
        assert_eq!(
            compile("w+1").unwrap_err(),
            SyntaxError::UnknownIdentifier {
                name: "w".into(),
                offset: 0
            }
        );
    }

    #[test]
    fn function_without_parens_fails() {
        assert!(matches!(
            compile("sin z").unwrap_err(),
            SyntaxError::UnexpectedToken { offset: 4, .. }
        ));
    }

    #[test]
    fn trailing_tokens_fail() {
        assert_eq!(
            compile("z)").unwrap_err(),
            SyntaxError::TrailingInput {
                found: ")".into(),
                offset: 1
            }
        );
        assert!(matches!(
            compile("2 z").unwrap_err(),
            SyntaxError::TrailingInput { .. }
        ));
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let shallow = format!("{}z{}", "(".repeat(10), ")".repeat(10));
        assert!(compile(&shallow).is_ok());

        let deep = format!("{}z{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(
            compile(&deep).unwrap_err(),
            SyntaxError::NestingTooDeep {
                limit: DEFAULT_MAX_DEPTH
            }
        );

        let minus_chain = format!("{}z", "-".repeat(200));
        assert!(matches!(
            compile(&minus_chain).unwrap_err(),
            SyntaxError::NestingTooDeep { .. }
        ));
    }

    #[test]
    fn long_operator_chains_are_bounded() {
        let sum = format!("z{}", "+z".repeat(DEFAULT_MAX_DEPTH));
        assert!(compile(&sum).is_ok());

        let sum = format!("z{}", "+z".repeat(DEFAULT_MAX_DEPTH + 1));
        assert_eq!(
            compile(&sum).unwrap_err(),
            SyntaxError::NestingTooDeep {
                limit: DEFAULT_MAX_DEPTH
            }
        );

        let product = format!("z{}", "*z".repeat(DEFAULT_MAX_DEPTH + 1));
        assert!(matches!(
            compile(&product).unwrap_err(),
            SyntaxError::NestingTooDeep { .. }
        ));
    }

    #[test]
    fn tree_height_counts_every_level() {
        let options = CompileOptions {
            max_depth: 2,
            ..CompileOptions::default()
        };
        // (z + 1) * 2 has height 2, sin(z + 1) * 2 has height 3.
        assert!(compile_with("(z+1)*2", &options).is_ok());
        assert!(compile_with("sin(z+1)*2", &options).is_err());
        assert!(compile_with("z+z+z", &options).is_ok());
        assert!(compile_with("z+z+z+z", &options).is_err());
    }

    #[test]
    fn custom_depth_limit() {
        let options = CompileOptions {
            max_depth: 2,
            ..CompileOptions::default()
        };
        assert!(compile_with("(z)", &options).is_ok());
        assert!(compile_with("((z))", &options).is_err());
    }

    #[test]
    fn lenient_mode_ignores_unknown_characters() {
        assert_eq!(eval("z # + 1", Complex::ZERO), Complex::ONE);
    }

    #[test]
    fn strict_mode_rejects_unknown_characters() {
        let options = CompileOptions {
            tokenizer_mode: TokenizerMode::Strict,
            ..CompileOptions::default()
        };
        assert_eq!(
            compile_with("z # + 1", &options).unwrap_err(),
            SyntaxError::UnrecognizedCharacter { ch: '#', offset: 2 }
        );
    }

    #[test]
    fn compiling_is_repeatable() {
        let a = compile("sin(z)^2 + cos(z)^2").unwrap();
        let b = compile("sin(z)^2 + cos(z)^2").unwrap();
        assert_eq!(a, b);
    }
}
