// Copyright 2026 anywkt contributors. See the COPYRIGHT file at the
// top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Translating a character stream to a WKT token stream. The tokens
//! carry no nesting; see [read](crate::read) if interested in geometry
//! trees rather than tokens.

use crate::pos::Pos;
use crate::number;
use kstring::KString;
use thiserror::Error;
use genawaiter::rc::Gen;
use std::fmt::Write;

#[derive(Error, Debug)]
pub enum LexError {
    #[error("IO error ({0}) after")]
    IOError(anyhow::Error),
    #[error("unrecognized character '{0}'")]
    UnrecognizedChar(char),
    #[error("invalid numeric literal '{0}'")]
    InvalidNumber(KString),
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct LexErrorWithPos {
    pub err: LexError,
    pub pos: Pos
}

impl LexError {
    fn at(self, p: Pos) -> LexErrorWithPos {
        LexErrorWithPos {
            err: self,
            pos: p
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A run of ASCII letters, carried uppercased (`POINT`, `EMPTY`,
    /// ...). Whether it is a *known* keyword is decided by the reader.
    Word(KString),
    Number(f64),
    Open,
    Close,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Token::Word(w) => f.write_str(w),
            Token::Number(n) => f.write_fmt(format_args!("{}", n)),
            Token::Open => f.write_char('('),
            Token::Close => f.write_char(')'),
            Token::Comma => f.write_char(','),
        }
    }
}

#[derive(Debug)]
pub struct TokenWithPos(pub Token, pub Pos);


// Collect `c` and the following characters accepted by `accepted`
// into `out`; the first non-accepted character is returned rather
// than consumed. `None` iff the stream ended.
fn read_while(
    c: char,
    startpos: Pos,
    cs: &mut impl Iterator<Item = anyhow::Result<(char, Pos)>>,
    accepted: fn(char) -> bool,
    out: &mut String,
) -> Result<Option<(char, Pos)>, LexErrorWithPos> {
    out.clear();
    out.push(c);
    let mut lastpos = startpos;
    loop {
        if let Some(r) = cs.next() {
            match r {
                Err(e) => return Err(LexError::IOError(e).at(lastpos)),
                Ok((c, pos)) => {
                    lastpos = pos;
                    if accepted(c) {
                        out.push(c);
                    } else {
                        return Ok(Some((c, pos)));
                    }
                }
            }
        } else {
            return Ok(None);
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}

pub fn lex<'s>(
    cs: impl Iterator<Item = anyhow::Result<(char, Pos)>> + 's,
)
    -> impl Iterator<Item = Result<TokenWithPos, LexErrorWithPos>> + 's
{
    Gen::new(|co| async move {
        let mut cs = cs;
        let mut tmp = String::new();
        let mut maybe_next_c_pos = None;
        let mut lastpos = Pos::start();
        loop {
            let c;
            let pos;
            if let Some(cp) = maybe_next_c_pos {
                (c, pos) = cp;
                maybe_next_c_pos = None;
            } else {
                if let Some(r) = cs.next() {
                    match r {
                        Err(e) => {
                            co.yield_(Err(
                                LexError::IOError(e).at(lastpos))).await;
                            return;
                        }
                        Ok(cp) => {
                            (c, pos) = cp;
                        }
                    }
                } else {
                    return;
                }
            }
            lastpos = pos;

            if c.is_whitespace() {
                // insignificant between tokens
            } else if c == '(' {
                co.yield_(Ok(TokenWithPos(Token::Open, pos))).await;
            } else if c == ')' {
                co.yield_(Ok(TokenWithPos(Token::Close, pos))).await;
            } else if c == ',' {
                co.yield_(Ok(TokenWithPos(Token::Comma, pos))).await;
            } else if is_word_char(c) {
                match read_while(c, pos, &mut cs, is_word_char, &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(mcp) => {
                        // keywords are case insensitive on input
                        tmp.make_ascii_uppercase();
                        co.yield_(Ok(
                            TokenWithPos(
                                Token::Word(KString::from_ref(&tmp)),
                                pos))).await;
                        if mcp.is_none() {
                            // avoid calling next() again!
                            return
                        }
                        maybe_next_c_pos = mcp;
                    }
                }
            } else if is_number_start(c) {
                match read_while(c, pos, &mut cs, number::is_constituent,
                                 &mut tmp) {
                    Err(e) => {
                        co.yield_(Err(e)).await;
                        return;
                    }
                    Ok(mcp) => {
                        if let Some(x) = number::parse_literal(&tmp) {
                            co.yield_(Ok(
                                TokenWithPos(Token::Number(x), pos))).await;
                        } else {
                            co.yield_(Err(LexError::InvalidNumber(
                                KString::from_ref(&tmp)).at(pos))).await;
                            return;
                        }
                        if mcp.is_none() {
                            // avoid calling next() again!
                            return
                        }
                        maybe_next_c_pos = mcp;
                    }
                }
            } else {
                co.yield_(Err(LexError::UnrecognizedChar(c).at(pos))).await;
                return;
            }
        }
    }).into_iter()
}
