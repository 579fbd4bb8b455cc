//! Anchored patterns for the lexer.
//!
//! Every pattern matches at the start of the buffer only. None of them
//! checks what follows the token; that is left to the matchers, which need
//! to tell "wrong terminator" apart from "buffer ends here".
//!
//! Name character classes follow the Turtle grammar's `PN_CHARS_BASE`,
//! `PN_CHARS_U` and `PN_CHARS` productions.

use regex::Regex;
use std::sync::OnceLock;

const PN_CHARS_BASE: &str = r"A-Za-z\x{00C0}-\x{00D6}\x{00D8}-\x{00F6}\x{00F8}-\x{02FF}\x{0370}-\x{037D}\x{037F}-\x{1FFF}\x{200C}-\x{200D}\x{2070}-\x{218F}\x{2C00}-\x{2FEF}\x{3001}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFFD}\x{10000}-\x{EFFFF}";

/// Percent-encoded octet or backslash-escaped reserved character.
const PLX: &str = r"%[0-9A-Fa-f]{2}|\\[_~.\-!$&'()*+,;=/?#@%]";

fn pn_chars_u() -> String {
    format!("{PN_CHARS_BASE}_")
}

fn pn_chars() -> String {
    format!(r"{}\-0-9\x{{00B7}}\x{{0300}}-\x{{036F}}\x{{203F}}-\x{{2040}}", pn_chars_u())
}

/// `PN_PREFIX`: may contain dots, but not end with one.
fn pn_prefix() -> String {
    let chars = pn_chars();
    format!("[{PN_CHARS_BASE}](?:[{chars}.]*[{chars}])?")
}

/// `PN_LOCAL`: may contain dots and colons, but not end with a dot.
fn pn_local() -> String {
    let chars = pn_chars();
    format!(
        "(?:[{u}:0-9]|{PLX})(?:(?:[{chars}.:]|{PLX})*(?:[{chars}:]|{PLX}))?",
        u = pn_chars_u()
    )
}

/// A run of blanks ending in a line break, with an optional comment before the break.
pub(super) fn line() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(r"\A[ \t]*(?:#([^\n\r]*))?(\r\n|\n|\r)[ \t]*")
            .expect("could not compile regex for line breaks")
    })
}

pub(super) fn space() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| Regex::new(r"\A[ \t]+").expect("could not compile regex for space"))
}

/// A comment running to the end of the buffer.
pub(super) fn trailing_comment() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(r"\A#([^\n\r]*)\z").expect("could not compile regex for trailing comment")
    })
}

/// IRI body that needs no unescaping and no further checks.
pub(super) fn iri() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(r#"\A<([^\x00-\x20<>\\"{}|^`]*)>"#).expect("could not compile regex for IRI")
    })
}

/// IRI body with unicode escapes; checked after unescaping.
pub(super) fn escaped_iri() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(r"\A<((?:[^ <>{}\\]|\\[uU])+)>")
            .expect("could not compile regex for escaped IRI")
    })
}

pub(super) fn double_quoted() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(r#"\A"((?:[^"\\\n\r]|\\.)*)""#)
            .expect("could not compile regex for double-quoted string")
    })
}

pub(super) fn single_quoted() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(r"\A'((?:[^'\\\n\r]|\\.)*)'")
            .expect("could not compile regex for single-quoted string")
    })
}

pub(super) fn langcode() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(r"\A@([a-zA-Z]+(?:-[a-zA-Z0-9]+)*)")
            .expect("could not compile regex for language tag")
    })
}

pub(super) fn keyword() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| Regex::new(r"\A@[a-zA-Z]+").expect("could not compile regex for keyword"))
}

pub(super) fn sparql_keyword() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(r"\A(?i:prefix|base|graph)").expect("could not compile regex for SPARQL keyword")
    })
}

/// Integer, decimal or double, tried in that order of alternatives:
/// exponent forms first so `1.5e3` is not cut short at `1.5`.
pub(super) fn number() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(
            r"\A[+-]?(?:[0-9]+\.?[0-9]*[eE][+-]?[0-9]+|\.[0-9]+[eE][+-]?[0-9]+|[0-9]*\.?[0-9]+)",
        )
        .expect("could not compile regex for number")
    })
}

pub(super) fn boolean() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| Regex::new(r"\A(?:true|false)").expect("could not compile regex for boolean"))
}

pub(super) fn variable() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(&format!(r"\A\?[{}][{}]*", pn_chars_u(), pn_chars()))
            .expect("could not compile regex for variable")
    })
}

pub(super) fn blank() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        let chars = pn_chars();
        Regex::new(&format!(
            r"\A_:([{u}0-9](?:[{chars}.]*[{chars}])?)",
            u = pn_chars_u()
        ))
        .expect("could not compile regex for blank node")
    })
}

/// `prefix:` in a prefix declaration.
pub(super) fn prefix() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(&format!(r"\A({})?:", pn_prefix())).expect("could not compile regex for prefix")
    })
}

pub(super) fn prefixed() -> &'static Regex {
    static MATCH: OnceLock<Regex> = OnceLock::new();
    MATCH.get_or_init(|| {
        Regex::new(&format!(r"\A({})?:({})?", pn_prefix(), pn_local()))
            .expect("could not compile regex for prefixed name")
    })
}
