// Copyright 2026 anywkt contributors. See the COPYRIGHT file at the
// top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building geometry trees from the token stream produced by
//! [parse](crate::parse), plus the public read and write entry points.

use crate::pos::Pos;
use crate::context::{self, Context};
use crate::parse::{Token, TokenWithPos, lex,
                   LexError, LexErrorWithPos};
use crate::settings::{Limits, DEFAULT_LIMITS};
use crate::value::{Coordinate, Geometry, LineString};
use crate::buffered_chars::buffered_chars;
use std::fmt::{Formatter, Display};
use std::io::{Read, Write};
use std::path::Path;
use std::fs::File;
use kstring::KString;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("{0}")]
    Lex(LexError),
    #[error("unsupported geometry type '{0}'")]
    UnsupportedGeometryType(KString),
    #[error("expected {expected}, got '{got}'")]
    Unexpected { expected: &'static str, got: Token },
    #[error("expected {0}, got end of input")]
    PrematureEof(&'static str),
    #[error("trailing '{0}' after the geometry")]
    TrailingInput(Token),
    #[error("nesting too deep")]
    NestingTooDeep,
}

#[derive(Error, Debug)]
#[error("{err} {pos}")]
pub struct ReadErrorWithPos {
    pub err: ReadError,
    pub pos: Pos
}

impl ReadError {
    fn at(self, p: Pos) -> ReadErrorWithPos {
        ReadErrorWithPos {
            err: self,
            pos: p
        }
    }
}

#[derive(Error, Debug)]
pub struct ReadErrorWithPosContext {
    err_with_pos: ReadErrorWithPos,
    container: Box<dyn Context>
}

impl Display for ReadErrorWithPosContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("{} ",
                                 self.err_with_pos.err))?;
        self.container.format_with_pos(self.err_with_pos.pos, f)?;
        Ok(())
    }
}

impl From<LexErrorWithPos> for ReadErrorWithPos {
    fn from(ep: LexErrorWithPos) -> ReadErrorWithPos {
        let LexErrorWithPos { err, pos } = ep;
        ReadErrorWithPos {
            err: ReadError::Lex(err),
            pos
        }
    }
}

#[derive(Error, Debug)]
pub enum ReadErrorWithContext {
    #[error("{}: {0}", .1.to_string_without_pos())]
    IO(std::io::Error, Box<dyn Context>)
}

#[derive(Error, Debug)]
pub enum ReadErrorWithLocation {
    #[error("{0}")]
    PC(Box<ReadErrorWithPosContext>),
    #[error("{0}")]
    IO(Box<ReadErrorWithContext>)
}

impl ReadErrorWithPos {
    /// Attach the description of the input source, for error messages
    /// like `expected a number, got ')' @1.17 in "islands.wkt"`.
    pub fn in_context(self, container: Box<dyn Context>)
                      -> ReadErrorWithLocation {
        ReadErrorWithLocation::PC(
            Box::new(
                ReadErrorWithPosContext {
                    err_with_pos: self,
                    container
                }))
    }
}

fn io_in_context(e: std::io::Error, container: Box<dyn Context>)
                 -> ReadErrorWithLocation {
    ReadErrorWithLocation::IO(Box::new(
        ReadErrorWithContext::IO(e, container)))
}


/// One-token-lookahead cursor over the lexer output. End of input is
/// idempotent: once `next` has reported `None` it keeps doing so.
struct Tokens<I: Iterator<Item = Result<TokenWithPos, LexErrorWithPos>>> {
    ts: I,
    peeked: Option<Option<TokenWithPos>>,
    lastpos: Pos,
}

impl<I: Iterator<Item = Result<TokenWithPos, LexErrorWithPos>>> Tokens<I> {
    fn new(ts: I) -> Self {
        Tokens {
            ts,
            peeked: None,
            lastpos: Pos::start(),
        }
    }

    // Position of the most recently produced token; where "end of
    // input" errors point.
    fn lastpos(&self) -> Pos {
        self.lastpos
    }

    fn take(&mut self) -> Result<Option<TokenWithPos>, ReadErrorWithPos> {
        match self.ts.next() {
            None => Ok(None),
            Some(Err(e)) => Err(e.into()),
            Some(Ok(t)) => {
                self.lastpos = t.1;
                Ok(Some(t))
            }
        }
    }

    fn next(&mut self) -> Result<Option<TokenWithPos>, ReadErrorWithPos> {
        if let Some(t) = self.peeked.take() {
            Ok(t)
        } else {
            self.take()
        }
    }

    fn peek(&mut self) -> Result<Option<&TokenWithPos>, ReadErrorWithPos> {
        if self.peeked.is_none() {
            self.peeked = Some(self.take()?);
        }
        Ok(self.peeked.as_ref().and_then(|t| t.as_ref()))
    }
}

type Ts<'t> = dyn Iterator<Item = Result<TokenWithPos, LexErrorWithPos>> + 't;

fn expect_open(ts: &mut Tokens<&mut Ts>) -> Result<(), ReadErrorWithPos> {
    match ts.next()? {
        Some(TokenWithPos(Token::Open, _)) => Ok(()),
        Some(TokenWithPos(t, pos)) =>
            Err(ReadError::Unexpected { expected: "'('", got: t }.at(pos)),
        None => Err(ReadError::PrematureEof("'('").at(ts.lastpos())),
    }
}

fn expect_close(ts: &mut Tokens<&mut Ts>) -> Result<(), ReadErrorWithPos> {
    match ts.next()? {
        Some(TokenWithPos(Token::Close, _)) => Ok(()),
        Some(TokenWithPos(t, pos)) =>
            Err(ReadError::Unexpected { expected: "')'", got: t }.at(pos)),
        None => Err(ReadError::PrematureEof("')'").at(ts.lastpos())),
    }
}

fn expect_number(ts: &mut Tokens<&mut Ts>) -> Result<f64, ReadErrorWithPos> {
    match ts.next()? {
        Some(TokenWithPos(Token::Number(x), _)) => Ok(x),
        Some(TokenWithPos(t, pos)) =>
            Err(ReadError::Unexpected { expected: "a number", got: t }.at(pos)),
        None => Err(ReadError::PrematureEof("a number").at(ts.lastpos())),
    }
}

// After an element: ',' continues the list, ')' ends it.
fn read_separator(ts: &mut Tokens<&mut Ts>) -> Result<bool, ReadErrorWithPos> {
    match ts.next()? {
        Some(TokenWithPos(Token::Comma, _)) => Ok(true),
        Some(TokenWithPos(Token::Close, _)) => Ok(false),
        Some(TokenWithPos(t, pos)) =>
            Err(ReadError::Unexpected { expected: "',' or ')'", got: t }
                .at(pos)),
        None => Err(ReadError::PrematureEof("',' or ')'").at(ts.lastpos())),
    }
}

// The zero-element form; `<KEYWORD>()` is not it.
fn eat_empty(ts: &mut Tokens<&mut Ts>) -> Result<bool, ReadErrorWithPos> {
    let is_empty = matches!(
        ts.peek()?,
        Some(TokenWithPos(Token::Word(w), _)) if w.as_str() == "EMPTY");
    if is_empty {
        ts.next()?;
    }
    Ok(is_empty)
}

fn read_coordinate(ts: &mut Tokens<&mut Ts>)
                   -> Result<Coordinate, ReadErrorWithPos> {
    let lon = expect_number(ts)?;
    let lat = expect_number(ts)?;
    Ok(Coordinate::new(lon, lat))
}

// Comma-separated coordinate pairs up to the closing paren; the
// opening paren has already been consumed.
fn read_coords(ts: &mut Tokens<&mut Ts>)
               -> Result<Vec<Coordinate>, ReadErrorWithPos> {
    let mut v = Vec::new();
    loop {
        v.push(read_coordinate(ts)?);
        if !read_separator(ts)? {
            return Ok(v);
        }
    }
}

fn read_coords_body(ts: &mut Tokens<&mut Ts>)
                    -> Result<LineString, ReadErrorWithPos> {
    if eat_empty(ts)? {
        return Ok(Vec::new());
    }
    expect_open(ts)?;
    read_coords(ts)
}

// Comma-separated parenthesized coordinate lists; the opening paren
// has already been consumed. Shared by POLYGON (rings),
// MULTILINESTRING (lines) and the members of MULTIPOLYGON.
fn read_coord_lists(ts: &mut Tokens<&mut Ts>)
                    -> Result<Vec<LineString>, ReadErrorWithPos> {
    let mut v = Vec::new();
    loop {
        expect_open(ts)?;
        v.push(read_coords(ts)?);
        if !read_separator(ts)? {
            return Ok(v);
        }
    }
}

fn read_coord_lists_body(ts: &mut Tokens<&mut Ts>)
                         -> Result<Vec<LineString>, ReadErrorWithPos> {
    if eat_empty(ts)? {
        return Ok(Vec::new());
    }
    expect_open(ts)?;
    read_coord_lists(ts)
}

// A point holds exactly one coordinate, so there is no EMPTY form;
// `POINT EMPTY` fails on the expected '('.
fn read_point_body(ts: &mut Tokens<&mut Ts>)
                   -> Result<Coordinate, ReadErrorWithPos> {
    expect_open(ts)?;
    let c = read_coordinate(ts)?;
    expect_close(ts)?;
    Ok(c)
}

fn read_multipoint_body(ts: &mut Tokens<&mut Ts>)
                        -> Result<Vec<Coordinate>, ReadErrorWithPos> {
    if eat_empty(ts)? {
        return Ok(Vec::new());
    }
    expect_open(ts)?;
    let mut v = Vec::new();
    loop {
        // each member may be bare `x y` or wrapped `(x y)`
        let wrapped = match ts.peek()? {
            Some(TokenWithPos(Token::Open, _)) => true,
            Some(TokenWithPos(Token::Number(_), _)) => false,
            _ => {
                return match ts.next()? {
                    Some(TokenWithPos(t, pos)) =>
                        Err(ReadError::Unexpected {
                            expected: "'(' or a number", got: t }.at(pos)),
                    None => Err(ReadError::PrematureEof("'(' or a number")
                                .at(ts.lastpos())),
                }
            }
        };
        if wrapped {
            ts.next()?;
            v.push(read_coordinate(ts)?);
            expect_close(ts)?;
        } else {
            v.push(read_coordinate(ts)?);
        }
        if !read_separator(ts)? {
            return Ok(v);
        }
    }
}

fn read_multipolygon_body(ts: &mut Tokens<&mut Ts>)
                          -> Result<Vec<Vec<LineString>>, ReadErrorWithPos> {
    if eat_empty(ts)? {
        return Ok(Vec::new());
    }
    expect_open(ts)?;
    let mut v = Vec::new();
    loop {
        expect_open(ts)?;
        v.push(read_coord_lists(ts)?);
        if !read_separator(ts)? {
            return Ok(v);
        }
    }
}

fn read_collection_body(ts: &mut Tokens<&mut Ts>, depth_fuel: u32)
                        -> Result<Vec<Geometry>, ReadErrorWithPos> {
    if eat_empty(ts)? {
        return Ok(Vec::new());
    }
    expect_open(ts)?;
    let mut v = Vec::new();
    loop {
        v.push(read_geometry(ts, depth_fuel)?);
        if !read_separator(ts)? {
            return Ok(v);
        }
    }
}

fn read_geometry(ts: &mut Tokens<&mut Ts>, depth_fuel: u32)
                 -> Result<Geometry, ReadErrorWithPos> {
    match ts.next()? {
        Some(TokenWithPos(Token::Word(w), pos)) => match w.as_str() {
            "POINT" =>
                Ok(Geometry::Point(read_point_body(ts)?)),
            "MULTIPOINT" =>
                Ok(Geometry::MultiPoint(read_multipoint_body(ts)?)),
            "LINESTRING" =>
                Ok(Geometry::LineString(read_coords_body(ts)?)),
            "MULTILINESTRING" =>
                Ok(Geometry::MultiLineString(read_coord_lists_body(ts)?)),
            "POLYGON" =>
                Ok(Geometry::Polygon(read_coord_lists_body(ts)?)),
            "MULTIPOLYGON" =>
                Ok(Geometry::MultiPolygon(read_multipolygon_body(ts)?)),
            "GEOMETRYCOLLECTION" => {
                if depth_fuel == 0 {
                    return Err(ReadError::NestingTooDeep.at(pos));
                }
                Ok(Geometry::Collection(
                    read_collection_body(ts, depth_fuel - 1)?))
            }
            _ => Err(ReadError::UnsupportedGeometryType(w).at(pos)),
        },
        Some(TokenWithPos(t, pos)) =>
            Err(ReadError::Unexpected {
                expected: "a geometry type keyword", got: t }.at(pos)),
        None => Err(ReadError::PrematureEof("a geometry type keyword")
                    .at(ts.lastpos())),
    }
}

/// Read exactly one WKT geometry from `fh`; anything but whitespace
/// remaining after it is an error.
pub fn read_all(
    fh: impl Read,
    limits: &Limits,
) -> Result<Geometry, ReadErrorWithPos>
{
    let mut cs = buffered_chars(fh);
    let mut lexed = lex(&mut cs);
    let mut ts = Tokens::new(&mut lexed as &mut Ts);
    let g = read_geometry(&mut ts, limits.depth_fuel)?;
    match ts.next()? {
        Some(TokenWithPos(t, pos)) =>
            Err(ReadError::TrailingInput(t).at(pos)),
        None => Ok(g)
    }
}

/// Parse a WKT string (`UnmarshalString`, if you come from other
/// bindings of this codec).
pub fn read_str(s: &str) -> Result<Geometry, ReadErrorWithPos> {
    read_all(s.as_bytes(), &DEFAULT_LIMITS)
}

pub fn read_file(path: &Path) -> Result<Geometry, ReadErrorWithLocation> {
    let file_context =
        || Box::new(context::FileContext { path: path.to_path_buf() });
    let fh = File::open(path)
        .map_err(|e| io_in_context(e, file_context()))?;
    read_all(fh, &DEFAULT_LIMITS)
        .map_err(|e| e.in_context(file_context()))
}

/// Render `g` as canonical WKT (`MarshalString`). Total: every
/// `Geometry` value has a rendering.
pub fn write_string(g: &Geometry) -> String {
    g.to_string()
}

pub fn write_all(
    out: impl Write,
    g: &Geometry
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    write!(out, "{}", g)
}

pub fn write_file(path: &Path, g: &Geometry)
                  -> Result<(), std::io::Error> {
    write_all(File::create(path)?, g)
}
