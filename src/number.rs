// Copyright 2026 anywkt contributors. See the COPYRIGHT file at the
// top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The WKT numeric literal grammar:
//! `-?[0-9]+(\.[0-9]+)?([eE][-+]?[0-9]+)?`. The lexer collects a run
//! of constituent characters and then validates it here as a whole;
//! the final text-to-double conversion is left to `f64::from_str`,
//! which accepts a superset of this grammar.

use std::iter::Peekable;
use std::str::Chars;

/// Characters that can occur in a numeric literal. The lexer uses this
/// to decide where a literal ends; `+` and `-` are only *valid* in
/// sign positions, which [parse_literal](parse_literal) checks after
/// the fact.
pub fn is_constituent(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
}

fn digits1(cs: &mut Peekable<Chars>) -> Option<()> {
    let mut seen = false;
    while matches!(cs.peek(), Some(c) if c.is_ascii_digit()) {
        cs.next();
        seen = true;
    }
    if seen { Some(()) } else { None }
}

fn eat(cs: &mut Peekable<Chars>, accepted: fn(char) -> bool) -> bool {
    if matches!(cs.peek(), Some(&c) if accepted(c)) {
        cs.next();
        true
    } else {
        false
    }
}

/// Parse `s` as a WKT numeric literal, `None` if `s` does not match
/// the grammar exactly (no leading or trailing extras).
pub fn parse_literal(s: &str) -> Option<f64> {
    let mut cs = s.chars().peekable();
    eat(&mut cs, |c| c == '-');
    digits1(&mut cs)?;
    if eat(&mut cs, |c| c == '.') {
        digits1(&mut cs)?;
    }
    if eat(&mut cs, |c| c == 'e' || c == 'E') {
        eat(&mut cs, |c| c == '-' || c == '+');
        digits1(&mut cs)?;
    }
    if cs.next().is_some() {
        return None;
    }
    s.parse().ok()
}
