//! Streaming tokenizer for N3 and its subsets.
//!
//! Text is fed in chunks of any size. Each call returns the tokens that can
//! be decided from the text seen so far and keeps the rest buffered; the
//! final call resolves whatever is left and closes the stream with `eof`.

use std::io::ErrorKind;

use crate::LexerOptions;
use scan::{Scan, Scanner};

mod escape;
mod patterns;
mod scan;
mod token;

pub use escape::DecodeError;
pub use token::{SparqlKeyword, Token, TokenType};

/// Error type if tokenizing cannot continue.
///
/// Every error is terminal: the buffered input is discarded and the lexer
/// refuses further input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// The input cannot be read as a token, and more input will not fix it.
    #[error("Unexpected \"{issue}\" on line {line}.")]
    Syntax {
        line: usize,
        /// The leading run of non-whitespace text at the point of failure.
        issue: String,
        #[source]
        cause: Option<DecodeError>,
    },
    /// The lexer was already finalized, or failed earlier.
    #[error("lexer is closed and cannot accept more input")]
    Closed,
}

/// The main result type for this module.
pub type LexResult<T> = Result<T, LexError>;

impl From<LexError> for std::io::Error {
    fn from(value: LexError) -> Self {
        std::io::Error::new(ErrorKind::InvalidData, value)
    }
}

/// What came before the token being read.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Previous {
    Nothing,
    Token(TokenType),
    /// A `^^` marker: the next token must be a datatype.
    Datatype,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Finished,
    Failed,
}

/// Incremental lexer for one document.
#[derive(Debug)]
pub struct Lexer {
    buffer: String,
    line: usize,
    previous: Previous,
    state: State,
    options: LexerOptions,
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new(LexerOptions::default())
    }
}

impl Lexer {
    pub fn new(options: LexerOptions) -> Self {
        Lexer {
            buffer: String::new(),
            line: 1,
            previous: Previous::Nothing,
            state: State::Open,
            options,
        }
    }

    /// The current line: where the next token will start, at the earliest.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Whether the lexer was finalized or failed.
    pub fn is_closed(&self) -> bool {
        self.state != State::Open
    }

    /// Add a chunk of input and return the tokens it completes.
    ///
    /// Anything that might still continue in the next chunk stays buffered.
    pub fn feed(&mut self, chunk: &str) -> LexResult<Vec<Token>> {
        self.ensure_open()?;
        self.buffer.push_str(chunk);
        self.run(false)
    }

    /// Signal the end of input and return the remaining tokens, ending in `eof`.
    pub fn finalize(&mut self) -> LexResult<Vec<Token>> {
        self.ensure_open()?;
        let tokens = self.run(true)?;
        self.state = State::Finished;
        tracing::debug!("finalized after line {}", self.line);
        Ok(tokens)
    }

    /// Tokenize a whole document in one go.
    pub fn tokenize(mut self, input: &str) -> LexResult<Vec<Token>> {
        self.ensure_open()?;
        self.buffer.push_str(input);
        let tokens = self.run(true)?;
        self.state = State::Finished;
        Ok(tokens)
    }

    fn ensure_open(&self) -> LexResult<()> {
        match self.state {
            State::Open => Ok(()),
            State::Finished | State::Failed => Err(LexError::Closed),
        }
    }

    fn run(&mut self, finished: bool) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        match self.tokenize_to_end(&mut tokens, finished) {
            Ok(consumed) => {
                self.buffer.drain(..consumed);
                Ok(tokens)
            }
            Err(err) => {
                tracing::debug!("tokenizing failed: {}", err);
                self.buffer.clear();
                self.state = State::Failed;
                Err(err)
            }
        }
    }

    /// Emit as many tokens as the buffer allows; return the bytes consumed.
    fn tokenize_to_end(&mut self, tokens: &mut Vec<Token>, finished: bool) -> LexResult<usize> {
        let mut pos = 0;
        loop {
            // Lines holding nothing but blanks and maybe a comment.
            while let Some(caps) = patterns::line().captures(&self.buffer[pos..]) {
                let rest_len = self.buffer.len() - pos;
                let line_break = caps.get(2).map_or((0, 0), |m| (m.end(), m.len()));
                // A final `\r` may be the first half of `\r\n`.
                if !finished && line_break == (rest_len, 1) && self.buffer.ends_with('\r') {
                    return Ok(pos);
                }
                if let (true, Some(comment)) = (self.options.comments, caps.get(1)) {
                    tokens.push(Token::new(self.line, TokenType::Comment, comment.as_str()));
                }
                self.line += 1;
                pos += caps[0].len();
            }
            if let Some(space) = patterns::space().find(&self.buffer[pos..]) {
                pos += space.len();
            }

            let rest = &self.buffer[pos..];
            let trailing = patterns::trailing_comment().captures(rest);
            if rest.is_empty() || trailing.is_some() {
                if !finished {
                    return Ok(pos);
                }
                if self.previous == Previous::Datatype {
                    return Err(LexError::Syntax {
                        line: self.line,
                        issue: "^^".to_owned(),
                        cause: None,
                    });
                }
                if let (true, Some(caps)) = (self.options.comments, &trailing) {
                    tokens.push(Token::new(self.line, TokenType::Comment, &caps[1]));
                }
                tokens.push(Token::eof(self.line));
                return Ok(self.buffer.len());
            }

            if rest.starts_with("^^") {
                self.previous = Previous::Datatype;
                pos += 2;
                continue;
            }

            let previous = match &self.previous {
                Previous::Token(kind) => Some(kind),
                Previous::Nothing | Previous::Datatype => None,
            };
            let scan = Scanner::new(rest, finished, &self.options, previous)
                .scan()
                .map_err(|cause| self.syntax_error(rest, Some(cause)))?;
            match scan {
                Scan::Matched(lexeme) => {
                    let len = lexeme.len;
                    let lines = lexeme.lines;
                    let kind = match (&self.previous, lexeme.kind) {
                        (Previous::Datatype, TokenType::Iri) => TokenType::TypeIri,
                        (Previous::Datatype, TokenType::Prefixed) => TokenType::Type,
                        (Previous::Datatype, _) => return Err(self.syntax_error(rest, None)),
                        (_, kind) => kind,
                    };
                    if self.options.line_mode && !kind.in_line_subset() {
                        return Err(self.syntax_error(rest, None));
                    }
                    let token = Token {
                        line: self.line,
                        kind,
                        value: lexeme.value,
                        prefix: lexeme.prefix,
                    };
                    tracing::trace!("token {} on line {}", token.kind, token.line);
                    self.previous = Previous::Token(token.kind.clone());
                    self.line += lines;
                    tokens.push(token);
                    pos += len;
                }
                Scan::Pending => {
                    tracing::trace!("waiting for more input on line {}", self.line);
                    return Ok(pos);
                }
                Scan::NoMatch => {
                    // A line break outside a long string means the token can never complete.
                    let long_string = rest.starts_with(r#"""""#) || rest.starts_with("'''");
                    let has_break = rest.contains(|c: char| c == '\n' || c == '\r');
                    if finished || (has_break && !long_string) {
                        return Err(self.syntax_error(rest, None));
                    }
                    tracing::trace!("waiting for more input on line {}", self.line);
                    return Ok(pos);
                }
            }
        }
    }

    fn syntax_error(&self, rest: &str, cause: Option<DecodeError>) -> LexError {
        let end = rest
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(rest.len());
        LexError::Syntax {
            line: self.line,
            issue: rest[..end].to_owned(),
            cause,
        }
    }
}
