//! Dump the tokens of an N3-family document, one per line:
//! line number, type, then prefix and value when present.
//!
//! Input is read and fed to the lexer in fixed-size chunks, so this doubles
//! as a check that chunking does not change the output.
//!
//! ```ignore
//! <input.n3 n3_tokens --chunk-size 64
//! n3_tokens --line-mode data.nq
//! ```

use std::fs::File;
use std::io::{stdin, stdout, BufWriter, ErrorKind, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use n3lex::{Lexer, LexerOptions, Token};

#[derive(Parser, Debug)]
#[command(name = "n3_tokens", version, about = "Tokenize N3, Turtle, N-Triples or N-Quads")]
struct Cli {
    /// Document to read; stdin if absent
    input: Option<PathBuf>,

    /// Reject N3-only syntax (variables, paths, `=`, `=>`, `<=`)
    #[arg(long)]
    no_n3: bool,

    /// Accept only the N-Triples / N-Quads subset
    #[arg(long)]
    line_mode: bool,

    /// Print comments as tokens
    #[arg(long)]
    comments: bool,

    /// Bytes read per chunk
    #[arg(long, default_value_t = 4096, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: u64,
}

impl Cli {
    fn options(&self) -> LexerOptions {
        LexerOptions::default()
            .with_n3(!self.no_n3)
            .with_line_mode(self.line_mode)
            .with_comments(self.comments)
    }
}

/// Split off the longest valid UTF-8 prefix of `pending`, keeping an
/// incomplete trailing sequence for the next chunk.
fn take_text(pending: &mut Vec<u8>) -> std::io::Result<String> {
    let valid = match std::str::from_utf8(pending) {
        Ok(s) => s.len(),
        Err(e) if e.error_len().is_none() => e.valid_up_to(),
        Err(e) => return Err(std::io::Error::new(ErrorKind::InvalidData, e)),
    };
    let rest = pending.split_off(valid);
    let text = std::mem::replace(pending, rest);
    String::from_utf8(text).map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))
}

fn write_tokens(out: &mut impl Write, tokens: Vec<Token>) -> std::io::Result<()> {
    for token in tokens {
        writeln!(out, "{token}")?;
    }
    Ok(())
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut input: Box<dyn Read> = match &cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(stdin().lock()),
    };
    let mut out = BufWriter::new(stdout().lock());
    let mut lexer = Lexer::new(cli.options());

    let mut pending = Vec::new();
    loop {
        let read = (&mut input)
            .take(cli.chunk_size)
            .read_to_end(&mut pending)?;
        if read == 0 {
            break;
        }
        let text = take_text(&mut pending)?;
        write_tokens(&mut out, lexer.feed(&text)?)?;
    }
    if !pending.is_empty() {
        return Err(std::io::Error::new(
            ErrorKind::InvalidData,
            "input ends inside a UTF-8 sequence",
        ));
    }
    write_tokens(&mut out, lexer.finalize()?)?;
    out.flush()
}
