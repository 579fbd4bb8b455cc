/// Which dialect the lexer accepts, and whether comments are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Accept N3 extensions: variables, paths, `=`, `=>`, `<=` and `!`.
    pub n3: bool,
    /// Restrict input to the N-Triples / N-Quads subset.
    pub line_mode: bool,
    /// Emit `comment` tokens instead of skipping comments.
    pub comments: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        LexerOptions {
            n3: true,
            line_mode: false,
            comments: false,
        }
    }
}

impl LexerOptions {
    /// Options for N-Triples and N-Quads.
    pub fn line() -> Self {
        LexerOptions {
            n3: false,
            line_mode: true,
            comments: false,
        }
    }

    pub fn with_n3(mut self, n3: bool) -> Self {
        self.n3 = n3;
        self
    }

    pub fn with_line_mode(mut self, line_mode: bool) -> Self {
        self.line_mode = line_mode;
        self
    }

    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }
}
