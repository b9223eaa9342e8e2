// Copyright 2026 anywkt contributors. See the COPYRIGHT file at the
// top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Not an example, but a program to show the struct sizes for
//! possible optimization.

use anywkt::{settings::Limits, context::{FileContext, StreamContext}, parse::{LexError, LexErrorWithPos, Token, TokenWithPos}, pos::Pos, read::{ReadError, ReadErrorWithPos, ReadErrorWithContext, ReadErrorWithLocation}, value::{Coordinate, Geometry, LineString}};
use kstring::KString;

fn pr(ctx: &str, nam: &str, siz: usize) {
    println!("{siz}\t{ctx}\t{nam}")
}

const FQTY : bool = false;

macro_rules! ctx {
    ( $ctx:expr ) => {
        macro_rules! p {
            ( $t:ty ) => {
                let typename =
                    if FQTY {
                        std::any::type_name::<$t>()
                    } else {
                        stringify!($t)
                    };
                pr($ctx, typename, std::mem::size_of::<$t>())
            }
        }
    }
}

fn main() {
    {
        ctx!("context");
        p!{FileContext};
        p!{StreamContext};
        p!{Pos};
    }

    {
        ctx!("settings");
        p!{Limits};
    }

    {
        ctx!("value");
        p!{KString};
        p!{Coordinate};
        p!{LineString};
        p!{Geometry};
    }

    {
        ctx!("parse");
        p!{Token};
        p!{TokenWithPos};
        p!{LexError};
        p!{LexErrorWithPos};

        // Item in impl Iterator<Item = Result<TokenWithPos, LexErrorWithPos>> + 's:
        p!{Result<TokenWithPos, LexErrorWithPos>};
    }

    {
        ctx!("read");
        p!{std::io::Error};
        p!{&'static str};
        p!{ReadError};
        p!{ReadErrorWithPos};
        p!{ReadErrorWithContext};
        p!{ReadErrorWithLocation};

        p!{Result<Coordinate, ReadErrorWithPos>};
        p!{Result<Vec<Coordinate>, ReadErrorWithPos>};
        p!{Result<Geometry, ReadErrorWithPos>};
        p!{Result<Geometry, ReadErrorWithLocation>};
    }
}
