//! Token types produced by the lexer.

use std::fmt;

/// SPARQL-style directive keywords, accepted in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SparqlKeyword {
    Prefix,
    Base,
    Graph,
}

impl SparqlKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            SparqlKeyword::Prefix => "PREFIX",
            SparqlKeyword::Base => "BASE",
            SparqlKeyword::Graph => "GRAPH",
        }
    }
}

/// The closed set of token tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    Iri,
    Prefixed,
    Var,
    Blank,
    Literal,
    Langcode,
    /// Datatype written as a prefixed name, after `^^`.
    Type,
    /// Datatype written as an IRI, after `^^`.
    TypeIri,
    /// Prefix name in a `@prefix`/`PREFIX` declaration.
    Prefix,
    Dot,
    Comma,
    Semicolon,
    Bang,
    Caret,
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Abbreviation,
    Inverse,
    /// `@word` directive, as written (e.g. `@prefix`).
    Keyword(String),
    Sparql(SparqlKeyword),
    Comment,
    Eof,
}

impl TokenType {
    /// The tag used for this type in token dumps and error messages.
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::Iri => "IRI",
            TokenType::Prefixed => "prefixed",
            TokenType::Var => "var",
            TokenType::Blank => "blank",
            TokenType::Literal => "literal",
            TokenType::Langcode => "langcode",
            TokenType::Type => "type",
            TokenType::TypeIri => "typeIRI",
            TokenType::Prefix => "prefix",
            TokenType::Dot => ".",
            TokenType::Comma => ",",
            TokenType::Semicolon => ";",
            TokenType::Bang => "!",
            TokenType::Caret => "^",
            TokenType::LBracket => "[",
            TokenType::RBracket => "]",
            TokenType::LParen => "(",
            TokenType::RParen => ")",
            TokenType::LBrace => "{",
            TokenType::RBrace => "}",
            TokenType::Abbreviation => "abbreviation",
            TokenType::Inverse => "inverse",
            TokenType::Keyword(word) => word,
            TokenType::Sparql(keyword) => keyword.as_str(),
            TokenType::Comment => "comment",
            TokenType::Eof => "eof",
        }
    }

    /// Single-character punctuation, if `c` is one.
    pub(crate) fn punctuation(c: char) -> Option<TokenType> {
        Some(match c {
            ',' => TokenType::Comma,
            ';' => TokenType::Semicolon,
            '!' => TokenType::Bang,
            '[' => TokenType::LBracket,
            ']' => TokenType::RBracket,
            '(' => TokenType::LParen,
            ')' => TokenType::RParen,
            '{' => TokenType::LBrace,
            '}' => TokenType::RBrace,
            _ => return None,
        })
    }

    /// Whether a prefix declaration may follow a token of this type.
    pub(crate) fn declares_prefix(&self) -> bool {
        match self {
            TokenType::Keyword(word) => word == "@prefix",
            TokenType::Sparql(keyword) => *keyword == SparqlKeyword::Prefix,
            _ => false,
        }
    }

    /// Whether the type belongs to the N-Triples / N-Quads subset.
    pub(crate) fn in_line_subset(&self) -> bool {
        matches!(
            self,
            TokenType::Iri
                | TokenType::TypeIri
                | TokenType::Blank
                | TokenType::Prefixed
                | TokenType::Literal
                | TokenType::Langcode
                | TokenType::Type
                | TokenType::Dot
                | TokenType::Comment
                | TokenType::Eof
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token along with the line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// 1-based line number.
    pub line: usize,
    pub kind: TokenType,
    /// Payload; its meaning depends on `kind`.
    pub value: String,
    /// Namespace prefix for prefixed names, datatypes and blank nodes.
    pub prefix: String,
}

impl Token {
    pub fn new(line: usize, kind: TokenType, value: impl Into<String>) -> Self {
        Token {
            line,
            kind,
            value: value.into(),
            prefix: String::new(),
        }
    }

    pub(crate) fn eof(line: usize) -> Self {
        Token::new(line, TokenType::Eof, "")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.line, self.kind)?;
        if !self.prefix.is_empty() {
            write!(f, "\t{}:", self.prefix)?;
        }
        if !self.value.is_empty() {
            write!(f, "\t{}", self.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_wire_names() {
        assert_eq!(TokenType::Iri.as_str(), "IRI");
        assert_eq!(TokenType::TypeIri.as_str(), "typeIRI");
        assert_eq!(TokenType::Keyword("@base".to_owned()).as_str(), "@base");
        assert_eq!(TokenType::Sparql(SparqlKeyword::Graph).as_str(), "GRAPH");
        assert_eq!(TokenType::Dot.to_string(), ".");
    }

    #[test]
    fn punctuation_covers_single_character_tokens() {
        assert_eq!(TokenType::punctuation('('), Some(TokenType::LParen));
        assert_eq!(TokenType::punctuation('!'), Some(TokenType::Bang));
        assert_eq!(TokenType::punctuation('.'), None);
        assert_eq!(TokenType::punctuation('^'), None);
    }

    #[test]
    fn prefix_declarations_follow_prefix_keywords_only() {
        assert!(TokenType::Keyword("@prefix".to_owned()).declares_prefix());
        assert!(TokenType::Sparql(SparqlKeyword::Prefix).declares_prefix());
        assert!(!TokenType::Keyword("@base".to_owned()).declares_prefix());
        assert!(!TokenType::Sparql(SparqlKeyword::Base).declares_prefix());
        assert!(!TokenType::Prefixed.declares_prefix());
    }

    #[test]
    fn display_includes_prefix() {
        let token = Token {
            prefix: "ex".to_owned(),
            ..Token::new(3, TokenType::Prefixed, "name")
        };
        assert_eq!(token.to_string(), "3\tprefixed\tex:\tname");
        assert_eq!(Token::eof(7).to_string(), "7\teof");
    }
}
