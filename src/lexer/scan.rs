//! Dispatch on the leading character, then run the matching recognizer.
//!
//! Each recognizer answers with a [`Scan`]: a lexeme, a request for more
//! input, or no match. A recognizer that needs to see what follows its token
//! reports [`Scan::Pending`] when the buffer ends right there, unless the
//! input is finished, in which case the end of input is a valid terminator.

use super::escape::{check_iri, unescape, DecodeError};
use super::patterns;
use super::token::{SparqlKeyword, TokenType};
use crate::LexerOptions;

const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const OWL_SAME_AS: &str = "http://www.w3.org/2002/07/owl#sameAs";
const LOG_IMPLIES: &str = "http://www.w3.org/2000/10/swap/log#implies";

/// A recognized token, before a line number is attached.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Lexeme {
    pub kind: TokenType,
    pub value: String,
    pub prefix: String,
    /// Bytes of input covered by the token.
    pub len: usize,
    /// Line breaks inside the token.
    pub lines: usize,
}

impl Lexeme {
    fn new(kind: TokenType, value: impl Into<String>, len: usize) -> Self {
        Lexeme {
            kind,
            value: value.into(),
            prefix: String::new(),
            len,
            lines: 0,
        }
    }

    fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }
}

/// Outcome of running one recognizer on the head of the buffer.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Scan {
    Matched(Lexeme),
    /// The buffer ends before the token can be decided.
    Pending,
    NoMatch,
}

pub(crate) type ScanResult = Result<Scan, DecodeError>;

/// Token family picked from the leading character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Category {
    Iri,
    Caret,
    Quoted(char),
    Blank,
    Variable,
    At,
    Dot,
    Number,
    SparqlKeyword,
    Abbreviation,
    Boolean,
    Equals,
    Punctuation(char),
    Name,
}

impl Category {
    pub(crate) fn of(first: char) -> Category {
        match first {
            '<' => Category::Iri,
            '^' => Category::Caret,
            '"' | '\'' => Category::Quoted(first),
            '_' => Category::Blank,
            '?' => Category::Variable,
            '@' => Category::At,
            '.' => Category::Dot,
            '0'..='9' | '+' | '-' => Category::Number,
            'b' | 'B' | 'p' | 'P' | 'g' | 'G' => Category::SparqlKeyword,
            'a' => Category::Abbreviation,
            'f' | 't' => Category::Boolean,
            '=' => Category::Equals,
            ',' | ';' | '[' | ']' | '(' | ')' | '{' | '}' | '!' => Category::Punctuation(first),
            _ => Category::Name,
        }
    }

    /// Whether a miss should be retried as a generic name.
    fn falls_through(self) -> bool {
        matches!(
            self,
            Category::SparqlKeyword | Category::Abbreviation | Category::Boolean | Category::Name
        )
    }
}

fn ends_with(set: &'static str) -> impl Fn(char) -> bool {
    move |c| c.is_ascii_whitespace() || set.contains(c)
}

/// Count line breaks, with `\r\n` as one.
pub(crate) fn line_breaks(s: &str) -> usize {
    s.matches('\n').count() + s.matches('\r').count() - s.matches("\r\n").count()
}

/// Recognizers over the head of the buffer.
pub(crate) struct Scanner<'a> {
    input: &'a str,
    finished: bool,
    options: &'a LexerOptions,
    previous: Option<&'a TokenType>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(
        input: &'a str,
        finished: bool,
        options: &'a LexerOptions,
        previous: Option<&'a TokenType>,
    ) -> Self {
        Scanner {
            input,
            finished,
            options,
            previous,
        }
    }

    /// Recognize the token at the start of the input.
    pub(crate) fn scan(&self) -> ScanResult {
        let Some(first) = self.input.chars().next() else {
            return Ok(Scan::Pending);
        };
        let category = Category::of(first);
        let scan = match category {
            Category::Iri => self.iri()?,
            Category::Caret => self.caret(),
            Category::Quoted(quote) => self.quoted(quote)?,
            Category::Blank => self.blank(),
            Category::Variable => self.variable(),
            Category::At => self.at(),
            Category::Dot => self.dot(),
            Category::Number => self.number(),
            Category::SparqlKeyword => self.sparql_keyword(),
            Category::Abbreviation => self.abbreviation(),
            Category::Boolean => self.boolean(),
            Category::Equals => self.equals(),
            Category::Punctuation(c) => self.punctuation(c),
            Category::Name => Scan::NoMatch,
        };
        match scan {
            Scan::NoMatch if category.falls_through() => self.name(),
            scan => Ok(scan),
        }
    }

    /// Accept `lexeme` if the text after it starts with a terminator.
    ///
    /// With `dot_before_end`, a single `.` may sit between the token and its
    /// terminator. A `.` needs one more character of lookahead either way.
    fn terminated(
        &self,
        lexeme: Lexeme,
        is_end: impl Fn(char) -> bool,
        dot_before_end: bool,
    ) -> Scan {
        let mut rest = self.input[lexeme.len..].chars();
        let verdict = match rest.next() {
            None => None,
            Some('.') if dot_before_end || is_end('.') => {
                rest.next().map(|next| is_end('.') || is_end(next))
            }
            Some(c) => Some(is_end(c)),
        };
        match verdict {
            Some(true) => Scan::Matched(lexeme),
            Some(false) => Scan::NoMatch,
            None if self.finished => Scan::Matched(lexeme),
            None => Scan::Pending,
        }
    }

    /// The character after the first one, or `Pending` if there is none yet.
    fn second(&self) -> Result<char, Scan> {
        match self.input[1..].chars().next() {
            Some(c) => Ok(c),
            None if self.finished => Err(Scan::NoMatch),
            None => Err(Scan::Pending),
        }
    }

    fn iri(&self) -> ScanResult {
        if let Some(caps) = patterns::iri().captures(self.input) {
            return Ok(Scan::Matched(Lexeme::new(
                TokenType::Iri,
                &caps[1],
                caps[0].len(),
            )));
        }
        if let Some(caps) = patterns::escaped_iri().captures(self.input) {
            let iri = unescape(&caps[1])?;
            check_iri(&iri)?;
            return Ok(Scan::Matched(Lexeme::new(
                TokenType::Iri,
                iri,
                caps[0].len(),
            )));
        }
        if !self.options.n3 || !self.input[1..].starts_with('=') {
            return Ok(Scan::NoMatch);
        }
        // `<=` may still open an IRI until a character it cannot hold shows up.
        let closes_iri = |c: char| matches!(c, ' ' | '<' | '>' | '{' | '}');
        if !self.finished && !self.input[1..].contains(closes_iri) {
            return Ok(Scan::Pending);
        }
        Ok(Scan::Matched(Lexeme::new(TokenType::Inverse, LOG_IMPLIES, 2)))
    }

    /// A lone `^` path operator; `^^` is taken by the lexer before dispatch.
    fn caret(&self) -> Scan {
        match self.second() {
            Ok(_) | Err(Scan::NoMatch) if self.options.n3 => {
                Scan::Matched(Lexeme::new(TokenType::Caret, "", 1))
            }
            Ok(_) => Scan::NoMatch,
            Err(scan) => scan,
        }
    }

    fn quoted(&self, quote: char) -> ScanResult {
        match self.single_line_string(quote)? {
            Scan::NoMatch if !self.options.line_mode => self.long_string(quote),
            scan => Ok(scan),
        }
    }

    fn single_line_string(&self, quote: char) -> ScanResult {
        let pattern = if quote == '"' {
            patterns::double_quoted()
        } else {
            patterns::single_quoted()
        };
        let Some(caps) = pattern.captures(self.input) else {
            return Ok(Scan::NoMatch);
        };
        let lexeme = Lexeme::new(TokenType::Literal, "", caps[0].len());
        match self.terminated(lexeme, |c| c != quote && c != '\\', false) {
            Scan::Matched(mut lexeme) => {
                lexeme.value = format!("\"{}\"", unescape(&caps[1])?);
                Ok(Scan::Matched(lexeme))
            }
            scan => Ok(scan),
        }
    }

    /// Triple-quoted string; the first unescaped run of three quotes closes it.
    fn long_string(&self, quote: char) -> ScanResult {
        let delimiter = if quote == '"' { r#"""""# } else { "'''" };
        let Some(rest) = self.input.strip_prefix(delimiter) else {
            return Ok(Scan::NoMatch);
        };
        let mut chars = rest.char_indices();
        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                if chars.next().is_none() {
                    break;
                }
            } else if c == quote && rest[i..].starts_with(delimiter) {
                let raw = &rest[..i];
                let body = unescape(raw)?;
                let mut lexeme = Lexeme::new(
                    TokenType::Literal,
                    format!("\"{body}\""),
                    i + 2 * delimiter.len(),
                );
                lexeme.lines = line_breaks(raw);
                return Ok(Scan::Matched(lexeme));
            }
        }
        Ok(Scan::NoMatch)
    }

    fn blank(&self) -> Scan {
        let Some(caps) = patterns::blank().captures(self.input) else {
            return Scan::NoMatch;
        };
        let lexeme = Lexeme::new(TokenType::Blank, &caps[1], caps[0].len()).with_prefix("_");
        self.terminated(lexeme, ends_with(r#",;:#()[]{}"'<"#), true)
    }

    fn variable(&self) -> Scan {
        if !self.options.n3 {
            return Scan::NoMatch;
        }
        let Some(m) = patterns::variable().find(self.input) else {
            return Scan::NoMatch;
        };
        let lexeme = Lexeme::new(TokenType::Var, m.as_str(), m.len());
        self.terminated(lexeme, ends_with(r#".,;!^#()[]{}"'<"#), false)
    }

    /// Language tag right after a literal, keyword anywhere else.
    fn at(&self) -> Scan {
        if self.previous == Some(&TokenType::Literal) {
            if let Some(caps) = patterns::langcode().captures(self.input) {
                let lexeme = Lexeme::new(TokenType::Langcode, &caps[1], caps[0].len());
                let scan =
                    self.terminated(lexeme, |c| !c.is_ascii_alphanumeric() && c != '-', false);
                if scan != Scan::NoMatch {
                    return scan;
                }
            }
        }
        let Some(m) = patterns::keyword().find(self.input) else {
            return Scan::NoMatch;
        };
        let lexeme = Lexeme::new(TokenType::Keyword(m.as_str().to_owned()), "", m.len());
        self.terminated(lexeme, ends_with("#<"), false)
    }

    fn dot(&self) -> Scan {
        match self.second() {
            Ok(c) if c.is_ascii_digit() => self.number(),
            Ok(_) | Err(Scan::NoMatch) => Scan::Matched(Lexeme::new(TokenType::Dot, "", 1)),
            Err(scan) => scan,
        }
    }

    fn number(&self) -> Scan {
        if self.options.line_mode {
            return Scan::NoMatch;
        }
        let Some(m) = patterns::number().find(self.input) else {
            return Scan::NoMatch;
        };
        let lexical = m.as_str();
        let datatype = if lexical.contains(|c: char| c == 'e' || c == 'E') {
            "double"
        } else if lexical
            .trim_start_matches(|c: char| c == '+' || c == '-')
            .bytes()
            .all(|b| b.is_ascii_digit())
        {
            "integer"
        } else {
            "decimal"
        };
        let lexeme = Lexeme::new(
            TokenType::Literal,
            format!("\"{lexical}\"^^{XSD}{datatype}"),
            m.len(),
        );
        self.terminated(lexeme, ends_with(r#".,;:#()[]{}"'<"#), false)
    }

    fn sparql_keyword(&self) -> Scan {
        let Some(m) = patterns::sparql_keyword().find(self.input) else {
            return Scan::NoMatch;
        };
        let keyword = match m.as_str().to_ascii_uppercase().as_str() {
            "PREFIX" => SparqlKeyword::Prefix,
            "BASE" => SparqlKeyword::Base,
            _ => SparqlKeyword::Graph,
        };
        let lexeme = Lexeme::new(TokenType::Sparql(keyword), "", m.len());
        self.terminated(lexeme, ends_with("#<"), false)
    }

    /// `a` for rdf:type.
    fn abbreviation(&self) -> Scan {
        let lexeme = Lexeme::new(TokenType::Abbreviation, RDF_TYPE, 1);
        self.terminated(lexeme, ends_with("<"), false)
    }

    fn boolean(&self) -> Scan {
        if self.options.line_mode {
            return Scan::NoMatch;
        }
        let Some(m) = patterns::boolean().find(self.input) else {
            return Scan::NoMatch;
        };
        let lexeme = Lexeme::new(
            TokenType::Literal,
            format!("\"{}\"^^{XSD}boolean", m.as_str()),
            m.len(),
        );
        self.terminated(lexeme, ends_with(r#".,;#()[]{}"'<"#), false)
    }

    /// `=` for owl:sameAs, `=>` for log:implies.
    fn equals(&self) -> Scan {
        if !self.options.n3 {
            return Scan::NoMatch;
        }
        match self.second() {
            Ok('>') => Scan::Matched(Lexeme::new(TokenType::Abbreviation, LOG_IMPLIES, 2)),
            Ok(_) | Err(Scan::NoMatch) => {
                Scan::Matched(Lexeme::new(TokenType::Abbreviation, OWL_SAME_AS, 1))
            }
            Err(scan) => scan,
        }
    }

    fn punctuation(&self, c: char) -> Scan {
        if c == '!' && !self.options.n3 {
            return Scan::NoMatch;
        }
        match TokenType::punctuation(c) {
            Some(kind) => Scan::Matched(Lexeme::new(kind, "", c.len_utf8())),
            None => Scan::NoMatch,
        }
    }

    /// Prefix declaration right after `@prefix`/`PREFIX`, prefixed name otherwise.
    fn name(&self) -> ScanResult {
        if self.previous.is_some_and(TokenType::declares_prefix) {
            if let Some(caps) = patterns::prefix().captures(self.input) {
                let prefix = caps.get(1).map_or("", |m| m.as_str());
                let lexeme = Lexeme::new(TokenType::Prefix, prefix, caps[0].len());
                match self.terminated(lexeme, ends_with("#<"), false) {
                    Scan::NoMatch => {}
                    scan => return Ok(scan),
                }
            }
        }
        self.prefixed()
    }

    fn prefixed(&self) -> ScanResult {
        let Some(caps) = patterns::prefixed().captures(self.input) else {
            return Ok(Scan::NoMatch);
        };
        let prefix = caps.get(1).map_or("", |m| m.as_str());
        let local = unescape(caps.get(2).map_or("", |m| m.as_str()))?;
        let lexeme =
            Lexeme::new(TokenType::Prefixed, local, caps[0].len()).with_prefix(prefix);
        Ok(self.terminated(lexeme, ends_with(r#",;!^#()[]{}"'<"#), true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_with(input: &str, finished: bool, previous: Option<&TokenType>) -> Scan {
        let options = LexerOptions::default();
        Scanner::new(input, finished, &options, previous)
            .scan()
            .expect("scan should not fail to decode")
    }

    fn scan(input: &str) -> Scan {
        scan_with(input, false, None)
    }

    fn matched(input: &str) -> Lexeme {
        match scan(input) {
            Scan::Matched(lexeme) => lexeme,
            other => panic!("expected a match for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn categories() {
        assert_eq!(Category::of('<'), Category::Iri);
        assert_eq!(Category::of('\''), Category::Quoted('\''));
        assert_eq!(Category::of('G'), Category::SparqlKeyword);
        assert_eq!(Category::of('A'), Category::Name);
        assert_eq!(Category::of('x'), Category::Name);
        assert_eq!(Category::of('!'), Category::Punctuation('!'));
        assert!(Category::Boolean.falls_through());
        assert!(!Category::Iri.falls_through());
    }

    #[test]
    fn pending_at_buffer_end() {
        assert_eq!(scan("_:b1"), Scan::Pending);
        assert_eq!(scan("_:b1."), Scan::Pending);
        assert_eq!(scan("ex:abc"), Scan::Pending);
        assert_eq!(scan("42"), Scan::Pending);
        assert_eq!(scan("4."), Scan::Pending);
        assert_eq!(scan("\"abc\""), Scan::Pending);
        assert_eq!(scan("true"), Scan::Pending);
        assert_eq!(scan("a"), Scan::Pending);
        assert_eq!(scan("."), Scan::Pending);
        assert_eq!(scan("="), Scan::Pending);
        assert_eq!(scan("<=abc"), Scan::Pending);
    }

    #[test]
    fn end_of_input_terminates() {
        for input in ["_:b1", "_:b1.", "ex:abc", "42", "\"abc\"", "true", "a", "."] {
            assert!(
                matches!(scan_with(input, true, None), Scan::Matched(_)),
                "{input:?} should match once finished"
            );
        }
    }

    #[test]
    fn unfinished_tokens_do_not_match() {
        assert_eq!(scan("<http://a"), Scan::NoMatch);
        assert_eq!(scan("\"abc"), Scan::NoMatch);
        assert_eq!(scan("\"\"\"abc\"\""), Scan::NoMatch);
        assert_eq!(scan("1e"), Scan::NoMatch);
        assert_eq!(scan("_:"), Scan::NoMatch);
        assert_eq!(scan("hello "), Scan::NoMatch);
    }

    #[test]
    fn keywords_fall_through_to_names() {
        let lexeme = matched("base:x ");
        assert_eq!(lexeme.kind, TokenType::Prefixed);
        assert_eq!((lexeme.prefix.as_str(), lexeme.value.as_str()), ("base", "x"));

        assert_eq!(matched("a:b ").kind, TokenType::Prefixed);
        assert_eq!(matched("true:x ").kind, TokenType::Prefixed);
        assert_eq!(matched("a <x>").kind, TokenType::Abbreviation);
        assert_eq!(matched("Prefix ex:").kind, TokenType::Sparql(SparqlKeyword::Prefix));
    }

    #[test]
    fn numbers_are_typed() {
        assert_eq!(
            matched("-12 ").value,
            "\"-12\"^^http://www.w3.org/2001/XMLSchema#integer"
        );
        assert_eq!(
            matched("1.5;").value,
            "\"1.5\"^^http://www.w3.org/2001/XMLSchema#decimal"
        );
        assert_eq!(
            matched(".5e1)").value,
            "\".5e1\"^^http://www.w3.org/2001/XMLSchema#double"
        );
        let lexeme = matched("7. ");
        assert_eq!(lexeme.len, 1);
    }

    #[test]
    fn strings() {
        let lexeme = matched("'it\\'s' ");
        assert_eq!(lexeme.value, "\"it's\"");
        assert_eq!(lexeme.len, 7);

        let lexeme = matched("'''a\n'b''\r\nc''' .");
        assert_eq!(lexeme.value, "\"a\n'b''\r\nc\"");
        assert_eq!(lexeme.lines, 2);

        assert_eq!(matched("\"\" ").value, "\"\"");
        assert_eq!(matched("\"\"\"x\"\"\"\"").value, "\"x\"");
    }

    #[test]
    fn language_tags_need_a_literal_before() {
        let literal = TokenType::Literal;
        match scan_with("@en-GB ", false, Some(&literal)) {
            Scan::Matched(lexeme) => {
                assert_eq!(lexeme.kind, TokenType::Langcode);
                assert_eq!(lexeme.value, "en-GB");
            }
            other => panic!("expected a language tag, got {other:?}"),
        }
        assert_eq!(
            matched("@prefix ").kind,
            TokenType::Keyword("@prefix".to_owned())
        );
    }

    #[test]
    fn prefix_declarations() {
        let keyword = TokenType::Keyword("@prefix".to_owned());
        match scan_with("ex: <http://ex#>", false, Some(&keyword)) {
            Scan::Matched(lexeme) => {
                assert_eq!(lexeme.kind, TokenType::Prefix);
                assert_eq!(lexeme.value, "ex");
                assert_eq!(lexeme.len, 3);
            }
            other => panic!("expected a prefix, got {other:?}"),
        }
        assert_eq!(matched("ex: <http://ex#>").kind, TokenType::Prefixed);
    }

    #[test]
    fn inverse_arrow() {
        assert_eq!(matched("<= {").kind, TokenType::Inverse);
        assert_eq!(matched("<=> ").kind, TokenType::Iri);
    }

    #[test]
    fn escaped_iris_are_checked() {
        let options = LexerOptions::default();
        let lexeme = Scanner::new(r"<http://a/\u00E9>", false, &options, None).scan();
        assert!(matches!(lexeme, Ok(Scan::Matched(Lexeme { ref value, .. })) if value == "http://a/é"));

        let bad = Scanner::new(r"<http://a/\u0020>", false, &options, None).scan();
        assert_eq!(bad, Err(DecodeError::IllegalIriChar(' ')));
    }

    #[test]
    fn counts_line_breaks() {
        assert_eq!(line_breaks("a\nb\r\nc\rd"), 3);
        assert_eq!(line_breaks("none"), 0);
    }
}
