// Copyright 2026 anywkt contributors. See the COPYRIGHT file at the
// top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anywkt::pos::Pos;
use anywkt::read::read_all;
use anywkt::parse::{Token, TokenWithPos, lex};
use anywkt::settings::{Limits, DEFAULT_LIMITS};
use anywkt::context::FileContext;
use anywkt::buffered_chars::buffered_chars;
use clap::Parser as ClapParser;
use std::path::PathBuf;
use anyhow::{Result, bail};


fn indentstr(i: usize) -> Option<&'static str> {
    "                                                                  ".get(0..i)
}

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Print the token stream (default: build the geometry and print
    /// its canonical rendering)
    #[clap(short, long, value_parser)]
    tokens: bool,
    /// Show the token position (only with --tokens)
    #[clap(long, value_parser)]
    pos: bool,
    /// Nesting budget for GEOMETRYCOLLECTION members
    #[clap(long, value_parser)]
    depth_fuel: Option<u32>,
    /// Path to the input file
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.tokens {

        // Read through the token stream of the file contents, do some
        // bookkeeping and print the tokens indented by paren depth.

        let fh = std::fs::File::open(&args.input_path)?;
        let mut cs = buffered_chars(fh);
        let ts = lex(&mut cs);
        let mut count_words = 0;
        let mut count_numbers = 0;
        let mut parenstack: Vec<Pos> = Vec::new();
        for te in ts {
            let TokenWithPos(token, pos) = te?;
            let indentlevel;
            match token {
                Token::Open => {
                    indentlevel = parenstack.len();
                    parenstack.push(pos);
                }
                Token::Close => {
                    if parenstack.pop().is_none() {
                        bail!("unexpected closing character ')' at {:?}{}",
                              args.input_path, pos)
                    }
                    indentlevel = parenstack.len();
                }
                Token::Word(_) => {
                    count_words += 1;
                    indentlevel = parenstack.len();
                }
                Token::Number(_) => {
                    count_numbers += 1;
                    indentlevel = parenstack.len();
                }
                _ => {
                    indentlevel = parenstack.len();
                }
            }
            if let Some(indent) = indentstr(indentlevel) {
                if args.pos {
                    println!("{indent}{pos} {token}");
                } else {
                    println!("{indent}{token}");
                }
            } else {
                bail!("nested too deeply at {:?}{}", args.input_path, pos)
            }
        }
        if let Some(openpos) = parenstack.pop() {
            bail!("unclosed '(' at {:?}{}", args.input_path, openpos)
        }
        println!(";; count_words = {count_words}, \
                  count_numbers = {count_numbers}");

    } else {

        // Slurp in the whole file contents as a geometry tree, then
        // print its canonical rendering.

        let limits = Limits {
            depth_fuel: args.depth_fuel.unwrap_or(DEFAULT_LIMITS.depth_fuel),
        };
        let fh = std::fs::File::open(&args.input_path)?;
        let g = read_all(fh, &limits).map_err(
            |e| e.in_context(Box::new(FileContext {
                path: args.input_path.clone()
            })))?;
        println!("{}", g);

    }
    Ok(())
}
