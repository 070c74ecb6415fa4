//! Exact evaluator for the LaTeX subset produced by the literal operation and
//! the closed-form families (Gamma, Euler's identity, number theory).
//!
//! Closed forms are first rewritten to their decimal value, then the remaining
//! structural grammar (groups, `\left( \right)`, `+ - \times`, juxtaposition,
//! powers, `\frac`, `\sqrt`, `\operatorname{lcm}`) is parsed by recursive
//! descent over `BigRational`.

#![allow(dead_code)]

use std::sync::LazyLock;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use regex::{Captures, Regex};
use tangle_math::{euler_phi, prime_count};

static RE_EULER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"e\^\{\\pi i\}").expect("valid regex literal"));
static RE_PROD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\prod_\{k=1\}\^\{(\d+)\} k").expect("valid regex literal"));
static RE_GAMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\Gamma \((\d+)\)").expect("valid regex literal"));
static RE_CHOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\sum_\{k=0\}\^\{[^{}]*\} \{(\d+) \\choose k\}").expect("valid regex literal")
});
static RE_PHI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\varphi\((\d+)\)").expect("valid regex literal"));
static RE_PI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\pi\((\d+)\)").expect("valid regex literal"));

fn factorial(k: u64) -> BigInt {
    (1..=k).fold(BigInt::one(), |acc, i| acc * BigInt::from(i))
}

fn capture_u64(caps: &Captures<'_>) -> u64 {
    caps[1].parse().expect("regex captured digits")
}

/// Replaces every closed-form identity with its decimal value.
pub fn substitute_closed_forms(latex: &str) -> String {
    let s = RE_EULER.replace_all(latex, "(-1)");
    let s = RE_PROD.replace_all(&s, |c: &Captures<'_>| factorial(capture_u64(c)).to_string());
    let s = RE_GAMMA.replace_all(&s, |c: &Captures<'_>| {
        factorial(capture_u64(c).saturating_sub(1)).to_string()
    });
    let s = RE_CHOOSE.replace_all(&s, |c: &Captures<'_>| {
        num_traits::pow(BigInt::from(2), capture_u64(c) as usize).to_string()
    });
    let s = RE_PHI.replace_all(&s, |c: &Captures<'_>| euler_phi(capture_u64(c)).to_string());
    let s = RE_PI.replace_all(&s, |c: &Captures<'_>| {
        prime_count(capture_u64(c))
            .expect("pi argument within the table")
            .to_string()
    });
    s.into_owned()
}

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Num(BigInt),
    LBrace,
    RBrace,
    LParen,
    RParen,
    Plus,
    Minus,
    Times,
    Caret,
    Comma,
    Frac,
    Sqrt,
    Lcm,
}

fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let bytes = s.as_bytes();
    let mut toks = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b' ' | b'\n' | b'\t' => i += 1,
            b'0'..=b'9' => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let n: BigInt = s[start..i].parse().map_err(|e| format!("{e}"))?;
                toks.push(Tok::Num(n));
            }
            b'{' | b'}' | b'(' | b')' | b'+' | b'-' | b'^' | b',' => {
                toks.push(match c {
                    b'{' => Tok::LBrace,
                    b'}' => Tok::RBrace,
                    b'(' => Tok::LParen,
                    b')' => Tok::RParen,
                    b'+' => Tok::Plus,
                    b'-' => Tok::Minus,
                    b'^' => Tok::Caret,
                    _ => Tok::Comma,
                });
                i += 1;
            }
            b'\\' => {
                let start = i + 1;
                i = start;
                while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
                let rest = &s[i..];
                match &s[start..i] {
                    "left" if rest.starts_with('(') => {
                        toks.push(Tok::LParen);
                        i += 1;
                    }
                    "right" if rest.starts_with(')') => {
                        toks.push(Tok::RParen);
                        i += 1;
                    }
                    "times" => toks.push(Tok::Times),
                    "frac" => toks.push(Tok::Frac),
                    "sqrt" => toks.push(Tok::Sqrt),
                    "operatorname" if rest.starts_with("{lcm}") => {
                        toks.push(Tok::Lcm);
                        i += "{lcm}".len();
                    }
                    other => return Err(format!("unsupported command \\{other} at byte {start}")),
                }
            }
            other => return Err(format!("unexpected '{}' at byte {i}", other as char)),
        }
    }
    Ok(toks)
}

struct Parser {
    toks: Vec<Tok>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos)
    }

    fn next(&mut self) -> Option<Tok> {
        let t = self.toks.get(self.pos).cloned();
        self.pos += 1;
        t
    }

    fn expect(&mut self, want: Tok) -> Result<(), String> {
        match self.next() {
            Some(t) if t == want => Ok(()),
            got => Err(format!("expected {want:?}, got {got:?} at token {}", self.pos - 1)),
        }
    }

    fn expr(&mut self) -> Result<BigRational, String> {
        let mut acc = self.term()?;
        loop {
            match self.peek() {
                Some(Tok::Plus) => {
                    self.pos += 1;
                    acc += self.term()?;
                }
                Some(Tok::Minus) => {
                    self.pos += 1;
                    acc -= self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn term(&mut self) -> Result<BigRational, String> {
        let mut acc = self.power()?;
        loop {
            match self.peek() {
                Some(Tok::Times) => {
                    self.pos += 1;
                    acc *= self.power()?;
                }
                Some(
                    Tok::Num(_) | Tok::LBrace | Tok::LParen | Tok::Frac | Tok::Sqrt | Tok::Lcm,
                ) => acc *= self.power()?,
                _ => return Ok(acc),
            }
        }
    }

    fn power(&mut self) -> Result<BigRational, String> {
        if self.peek() == Some(&Tok::Minus) {
            self.pos += 1;
            return Ok(-self.power()?);
        }
        let base = self.primary()?;
        if self.peek() != Some(&Tok::Caret) {
            return Ok(base);
        }
        self.pos += 1;
        let exponent = match self.next() {
            Some(Tok::Num(k)) => k,
            Some(Tok::LBrace) => {
                let e = self.expr()?;
                self.expect(Tok::RBrace)?;
                integer(&e)?
            }
            got => return Err(format!("bad exponent {got:?}")),
        };
        let k = exponent
            .to_u32()
            .filter(|&k| k <= 256)
            .ok_or_else(|| format!("exponent {exponent} out of range"))?;
        Ok((0..k).fold(BigRational::one(), |acc, _| acc * &base))
    }

    fn group(&mut self, open: Tok, close: Tok) -> Result<BigRational, String> {
        self.expect(open)?;
        let v = self.expr()?;
        self.expect(close)?;
        Ok(v)
    }

    fn primary(&mut self) -> Result<BigRational, String> {
        match self.next() {
            Some(Tok::Num(n)) => Ok(BigRational::from_integer(n)),
            Some(Tok::LBrace) => {
                let v = self.expr()?;
                self.expect(Tok::RBrace)?;
                Ok(v)
            }
            Some(Tok::LParen) => {
                let v = self.expr()?;
                self.expect(Tok::RParen)?;
                Ok(v)
            }
            Some(Tok::Frac) => {
                let top = self.group(Tok::LBrace, Tok::RBrace)?;
                let bottom = self.group(Tok::LBrace, Tok::RBrace)?;
                if bottom.is_zero() {
                    return Err("division by zero".into());
                }
                Ok(top / bottom)
            }
            Some(Tok::Sqrt) => {
                let inner = integer(&self.group(Tok::LBrace, Tok::RBrace)?)?;
                if inner.is_negative() {
                    return Err(format!("sqrt of negative {inner}"));
                }
                let root = inner.sqrt();
                if &root * &root != inner {
                    return Err(format!("sqrt of non-square {inner}"));
                }
                Ok(BigRational::from_integer(root))
            }
            Some(Tok::Lcm) => {
                self.expect(Tok::LParen)?;
                let a = integer(&self.expr()?)?;
                self.expect(Tok::Comma)?;
                let b = integer(&self.expr()?)?;
                self.expect(Tok::RParen)?;
                Ok(BigRational::from_integer(a.lcm(&b)))
            }
            got => Err(format!("unexpected token {got:?}")),
        }
    }
}

fn integer(v: &BigRational) -> Result<BigInt, String> {
    if v.is_integer() {
        Ok(v.to_integer())
    } else {
        Err(format!("{v} is not an integer"))
    }
}

/// Exact value of a generated expression.
pub fn evaluate(latex: &str) -> Result<BigRational, String> {
    let substituted = substitute_closed_forms(latex);
    let toks = tokenize(&substituted)?;
    let mut parser = Parser { toks, pos: 0 };
    let value = parser.expr()?;
    if parser.pos != parser.toks.len() {
        return Err(format!(
            "trailing input after token {} in {substituted}",
            parser.pos
        ));
    }
    Ok(value)
}

/// Asserts that `latex` evaluates exactly to `n`.
pub fn assert_evaluates_to(latex: &str, n: u64) {
    match evaluate(latex) {
        Ok(v) => assert_eq!(
            v,
            BigRational::from_integer(BigInt::from(n)),
            "{latex} evaluated to {v}, expected {n}"
        ),
        Err(e) => panic!("could not evaluate {latex}: {e}"),
    }
}

#[test]
fn evaluator_self_check() {
    assert_evaluates_to(r"{\frac{{12}}{{4}}}", 3);
    assert_evaluates_to(r"{ \left({6}\right)^{2} - {3}}", 33);
    assert_evaluates_to(r"{2 \left({7}\right) + 1}", 15);
    assert_evaluates_to(r"{\operatorname{lcm}\left({8}, {9}\right)}", 72);
    assert_evaluates_to(r"{\sqrt{\left({13}\right)^2 - \left({12}\right)^2}}", 5);
    assert_evaluates_to(r"{-6e^{\pi i}}", 6);
    assert_evaluates_to(r"{(e^{\pi i} + 1)}", 0);
    assert_evaluates_to(r"{\sum_{k=0}^{\varphi(7)} {6 \choose k}}", 64);
    assert_evaluates_to(r"{\Gamma (4)} + \pi(7)", 10);
    assert!(evaluate(r"\sqrt{5}").is_err());
}
