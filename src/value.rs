// Copyright 2026 anywkt contributors. See the COPYRIGHT file at the
// top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runtime data types representing a geometry.

//! [Geometry](Geometry) is a closed sum type: the variants here are
//! exactly the shapes the reader in [read](crate::read) can produce,
//! and its `Display` impl (the WKT writer) matches exhaustively, so
//! there is no "unsupported shape" failure path.

use std::fmt::Write;

/// An ordered (longitude, latitude) pair. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Coordinate {
        Coordinate { lon, lat }
    }
    pub fn lon(self) -> f64 {
        self.lon
    }
    pub fn lat(self) -> f64 {
        self.lat
    }
}

pub type LineString = Vec<Coordinate>;

/// Structurally a line string; by convention closed (first coordinate
/// equals last), which neither reader nor writer enforces.
pub type Ring = LineString;

/// A geometry tree. Sequences are ordered and may be empty, in which
/// case the writer uses the `<KEYWORD> EMPTY` form. A `Polygon`'s
/// first ring is the shell, subsequent rings are holes.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    MultiPoint(Vec<Coordinate>),
    LineString(LineString),
    MultiLineString(Vec<LineString>),
    /// Never produced by the reader (WKT has no ring production);
    /// written as a one-ring `POLYGON`, so it reads back as `Polygon`.
    Ring(Ring),
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
    Collection(Vec<Geometry>),
}

fn fmt_linestring(f: &mut std::fmt::Formatter<'_>, ps: &[Coordinate])
                  -> Result<(), std::fmt::Error> {
    f.write_char('(')?;
    for (i, p) in ps.iter().enumerate() {
        if i != 0 {
            f.write_char(',')?;
        }
        // {} on f64 is the shortest representation that reparses to
        // the identical value
        f.write_fmt(format_args!("{} {}", p.lon(), p.lat()))?;
    }
    f.write_char(')')
}

fn fmt_polygon(f: &mut std::fmt::Formatter<'_>, rings: &[Ring])
               -> Result<(), std::fmt::Error> {
    f.write_str("POLYGON(")?;
    for (i, r) in rings.iter().enumerate() {
        if i != 0 {
            f.write_char(',')?;
        }
        fmt_linestring(f, r)?;
    }
    f.write_char(')')
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Geometry::Point(p) => {
                f.write_fmt(format_args!("POINT({} {})", p.lon(), p.lat()))
            }
            Geometry::MultiPoint(ps) => {
                if ps.is_empty() {
                    return f.write_str("MULTIPOINT EMPTY");
                }
                f.write_str("MULTIPOINT(")?;
                for (i, p) in ps.iter().enumerate() {
                    if i != 0 {
                        f.write_char(',')?;
                    }
                    f.write_fmt(format_args!("({} {})", p.lon(), p.lat()))?;
                }
                f.write_char(')')
            }
            Geometry::LineString(ps) => {
                if ps.is_empty() {
                    return f.write_str("LINESTRING EMPTY");
                }
                f.write_str("LINESTRING")?;
                fmt_linestring(f, ps)
            }
            Geometry::MultiLineString(ls) => {
                if ls.is_empty() {
                    return f.write_str("MULTILINESTRING EMPTY");
                }
                f.write_str("MULTILINESTRING(")?;
                for (i, ps) in ls.iter().enumerate() {
                    if i != 0 {
                        f.write_char(',')?;
                    }
                    fmt_linestring(f, ps)?;
                }
                f.write_char(')')
            }
            // No production of its own: the shell of a one-ring
            // polygon.
            Geometry::Ring(r) => fmt_polygon(f, std::slice::from_ref(r)),
            Geometry::Polygon(rs) => {
                if rs.is_empty() {
                    return f.write_str("POLYGON EMPTY");
                }
                fmt_polygon(f, rs)
            }
            Geometry::MultiPolygon(ps) => {
                if ps.is_empty() {
                    return f.write_str("MULTIPOLYGON EMPTY");
                }
                f.write_str("MULTIPOLYGON(")?;
                for (i, rs) in ps.iter().enumerate() {
                    if i != 0 {
                        f.write_char(',')?;
                    }
                    f.write_char('(')?;
                    for (j, r) in rs.iter().enumerate() {
                        if j != 0 {
                            f.write_char(',')?;
                        }
                        fmt_linestring(f, r)?;
                    }
                    f.write_char(')')?;
                }
                f.write_char(')')
            }
            Geometry::Collection(gs) => {
                if gs.is_empty() {
                    return f.write_str("GEOMETRYCOLLECTION EMPTY");
                }
                f.write_str("GEOMETRYCOLLECTION(")?;
                for (i, g) in gs.iter().enumerate() {
                    if i != 0 {
                        f.write_char(',')?;
                    }
                    g.fmt(f)?;
                }
                f.write_char(')')
            }
        }
    }
}

impl From<Coordinate> for Geometry {
    fn from(c: Coordinate) -> Geometry {
        Geometry::Point(c)
    }
}

/// Easily create a coordinate
pub fn coord(lon: f64, lat: f64) -> Coordinate {
    Coordinate::new(lon, lat)
}

/// Easily create a point geometry
pub fn point(lon: f64, lat: f64) -> Geometry {
    Geometry::Point(Coordinate::new(lon, lat))
}

/// Easily create a geometry collection
pub fn collection(gs: Vec<Geometry>) -> Geometry {
    Geometry::Collection(gs)
}
