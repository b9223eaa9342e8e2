// Copyright 2026 anywkt contributors. See the COPYRIGHT file at the
// top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Get characters and their positions from anything implementing
//! `Read`. The lexer in [parse](crate::parse) runs on top of this.

use crate::pos::Pos;
use std::io::{self, Read};
use anyhow::{Result, anyhow};
use utf8::BufReadDecoder;
use genawaiter::rc::Gen;


pub fn buffered_chars<R>(
    fh: R
) -> impl Iterator<Item=Result<(char, Pos)>>
    where R: Read
{
    Gen::new(|co| async move {
        let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
        let mut pos = Pos::start();
        while let Some(r) = inp.next_strict() {
            match r {
                Ok(x) => {
                    for c in x.chars() {
                        co.yield_(Ok((c, pos))).await;
                        pos = pos.advanced(c);
                    }
                },
                Err(e) => {
                    co.yield_(Err(anyhow!("buffered_chars: {}", e))).await;
                    return;
                }
            }
        }
    }).into_iter()
}
