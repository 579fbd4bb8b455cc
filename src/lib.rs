//! Incremental tokenizer for N3, Turtle, TriG, N-Triples and N-Quads.
//!
//! Feed text to a [`Lexer`] as it arrives, or tokenize a whole document with
//! [`tokenize`]. The output is the same however the input is split.
//!

pub mod lexer;
mod options;

pub use lexer::{DecodeError, LexError, LexResult, Lexer, SparqlKeyword, Token, TokenType};
pub use options::LexerOptions;

/// Tokenize a complete N3 document.
pub fn tokenize(input: &str) -> LexResult<Vec<Token>> {
    Lexer::default().tokenize(input)
}

/// Tokenize a complete document with the given options.
pub fn tokenize_with(input: &str, options: LexerOptions) -> LexResult<Vec<Token>> {
    Lexer::new(options).tokenize(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump(tokens: &[Token]) -> Vec<String> {
        tokens.iter().map(Token::to_string).collect()
    }

    #[test]
    fn turtle_document() -> Result<(), LexError> {
        let tokens = tokenize_with(
            "@base <http://ex/> .\n<s> <p> ( 1 -2.5 ) ;\n  <q> [ <r> 'x' ] .\n",
            LexerOptions::default().with_n3(false),
        )?;
        assert_eq!(
            dump(&tokens),
            vec![
                "1\t@base",
                "1\tIRI\thttp://ex/",
                "1\t.",
                "2\tIRI\ts",
                "2\tIRI\tp",
                "2\t(",
                "2\tliteral\t\"1\"^^http://www.w3.org/2001/XMLSchema#integer",
                "2\tliteral\t\"-2.5\"^^http://www.w3.org/2001/XMLSchema#decimal",
                "2\t)",
                "2\t;",
                "3\tIRI\tq",
                "3\t[",
                "3\tIRI\tr",
                "3\tliteral\t\"x\"",
                "3\t]",
                "3\t.",
                "4\teof",
            ]
        );
        Ok(())
    }

    #[test]
    fn nquads_document() -> Result<(), LexError> {
        let input = "<http://a/s> <http://a/p> _:o <http://a/g> .\r\n\
                     _:s <http://a/p> \"caf\\u00E9\"@fr . # note\r\n";
        let tokens = tokenize_with(input, LexerOptions::line().with_comments(true))?;
        assert_eq!(
            dump(&tokens),
            vec![
                "1\tIRI\thttp://a/s",
                "1\tIRI\thttp://a/p",
                "1\tblank\t_:\to",
                "1\tIRI\thttp://a/g",
                "1\t.",
                "2\tblank\t_:\ts",
                "2\tIRI\thttp://a/p",
                "2\tliteral\t\"café\"",
                "2\tlangcode\tfr",
                "2\t.",
                "2\tcomment\t note",
                "3\teof",
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_input() -> Result<(), LexError> {
        assert_eq!(dump(&tokenize("")?), vec!["1\teof"]);
        assert_eq!(dump(&tokenize("\n\n")?), vec!["3\teof"]);
        Ok(())
    }

    #[test]
    fn error_message() {
        let err = tokenize("<a> <b>\n  \"open\n\" .").expect_err("string spans a line break");
        assert_eq!(err.to_string(), "Unexpected \"\"open\" on line 2.");
    }

    #[test]
    fn errors_convert_to_io() {
        let err: std::io::Error = LexError::Closed.into();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn lexer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Lexer>();
    }
}
