//! The Tickle tokenizer.
//!
//! A single-pass, character-positional scanner that runs in lockstep with
//! the evaluator: each call to [`Parser::next_token`] produces one tagged
//! token, and the evaluator substitutes, accumulates words, and dispatches
//! as it consumes them.  The scanner's behavior depends on the previous
//! token's kind — a `{` opens a braced word only at the start of a word,
//! i.e. when the previous token was a separator, an end-of-line, or another
//! string — so that state lives in the parser, and every nested evaluation
//! gets a parser of its own.
//!
//! Tokens borrow slices of the input; nothing is copied or decoded here.
//! Backslash-escape decoding happens in the evaluator, and only for
//! [`TokenKind::Escape`] tokens — braced strings are always verbatim.

/// Options controlling which substitution triggers the scanner honors.
/// `subst` disables the special meaning of `{` at the start of a word, and
/// `no_eval` is read by the evaluator rather than the scanner: it turns
/// command dispatch into plain word-joining.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ParserOptions {
    pub no_commands: bool,
    pub no_escapes: bool,
    pub no_vars: bool,
    pub no_eval: bool,
    pub subst: bool,
}

impl ParserOptions {
    /// The options used to parse a string as a list: every substitution
    /// disabled, tokens taken verbatim.
    pub fn list() -> Self {
        ParserOptions {
            no_commands: true,
            no_escapes: true,
            no_vars: true,
            no_eval: true,
            subst: false,
        }
    }
}

/// The kinds of token the scanner produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// The text between a matched `[` and `]`, brackets excluded.
    Command,

    /// A raw text fragment, ended by a substitution boundary or the end of
    /// the word; backslash escapes in it are still encoded.
    Escape,

    /// A variable reference: the name after `$` or inside `${…}`.
    Variable,

    /// A verbatim string: a braced body, or a literal `$`.
    String,

    /// A command boundary: newlines, carriage returns, or `;`.
    Eol,

    /// A word boundary: a run of whitespace.
    Separator,

    /// The end of the input.
    Eof,
}

/// One token: its kind and the borrowed text it covers.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// An unrecoverable scan failure: an unterminated quote, brace, or bracket,
/// or a dangling backslash.  The evaluator turns this into a diagnostic
/// that includes the offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParseError;

/// The scanner state for one input string.
pub(crate) struct Parser<'a> {
    input: &'a str,
    pos: usize,      // byte index of the current character
    next_pos: usize, // byte index of the character after it
    ch: u8,          // current character; 0 past the end
    start: usize,    // start of the last token
    end: usize,      // end of the last token
    in_quote: bool,
    last: TokenKind, // kind of the last token produced
    options: ParserOptions,
}

/// Reads the character at `pos`, folding a backslash-newline pair into a
/// single space, and returns it with the index of the following character.
fn char_at(input: &str, pos: usize) -> (u8, usize) {
    let bytes = input.as_bytes();
    if pos >= bytes.len() {
        return (0, bytes.len());
    }
    if bytes[pos] == b'\\' && bytes.get(pos + 1) == Some(&b'\n') {
        return (b' ', pos + 2);
    }
    (bytes[pos], pos + 1)
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, options: ParserOptions) -> Self {
        let (ch, next_pos) = char_at(input, 0);
        Parser {
            input,
            pos: 0,
            next_pos,
            ch,
            start: 0,
            end: 0,
            in_quote: false,
            last: TokenKind::Eol,
            options,
        }
    }

    /// Produces the next token, or a parse error for input that cannot be
    /// tokenized.
    pub fn next_token(&mut self) -> Result<Token<'a>, ParseError> {
        let kind = self.scan()?;
        self.last = kind;
        Ok(Token {
            kind,
            text: &self.input[self.start..self.end],
        })
    }

    fn scan(&mut self) -> Result<TokenKind, ParseError> {
        while self.ch != 0 {
            match self.ch {
                b' ' | b'\t' => {
                    if self.in_quote {
                        return self.scan_string();
                    }
                    return Ok(self.scan_separator());
                }

                b'\n' | b'\r' | b';' => {
                    if self.in_quote {
                        return self.scan_string();
                    }
                    return Ok(self.scan_eol());
                }

                b'[' => {
                    let kind = self.scan_command()?;
                    if self.options.no_commands && kind == TokenKind::Command {
                        // Reparse mode: keep the brackets, yield plain text.
                        self.start -= 1;
                        self.end += 1;
                        return Ok(TokenKind::String);
                    }
                    return Ok(kind);
                }

                b'$' => {
                    if self.options.no_vars {
                        return self.scan_string();
                    }
                    return Ok(self.scan_var());
                }

                b'#' => {
                    if self.last == TokenKind::Eol {
                        self.scan_comment();
                        continue;
                    }
                    return self.scan_string();
                }

                _ => return self.scan_string(),
            }
        }

        self.start = self.pos;
        self.end = self.pos;
        if self.last != TokenKind::Eol && self.last != TokenKind::Eof {
            // The final command on a line without a trailing newline still
            // needs its end-of-line token.
            Ok(TokenKind::Eol)
        } else {
            Ok(TokenKind::Eof)
        }
    }

    fn next(&mut self) {
        self.pos = self.next_pos;
        let (ch, next_pos) = char_at(self.input, self.pos);
        self.ch = ch;
        self.next_pos = next_pos;
    }

    fn is_space(&self) -> bool {
        matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r')
    }

    fn is_var_char(&self) -> bool {
        self.ch.is_ascii_alphanumeric() || self.ch == b'_' || self.ch >= 0x80
    }

    /// A run of whitespace between words.
    fn scan_separator(&mut self) -> TokenKind {
        self.start = self.pos;
        while self.is_space() {
            self.next();
        }
        self.end = self.pos;
        TokenKind::Separator
    }

    /// A run of newlines and semicolons (and interleaved whitespace).
    fn scan_eol(&mut self) -> TokenKind {
        self.start = self.pos;
        while self.is_space() || self.ch == b';' {
            self.next();
        }
        self.end = self.pos;
        TokenKind::Eol
    }

    /// A command substitution.  Starts on `[`; nesting counts matched
    /// brackets and skips over braced bodies and escaped characters.
    fn scan_command(&mut self) -> Result<TokenKind, ParseError> {
        self.next(); // past the [
        self.start = self.pos;
        let mut level = 1;
        let mut brace_level = 0;
        loop {
            match self.ch {
                0 => return Err(ParseError),

                b'[' if brace_level == 0 => level += 1,

                b']' if brace_level == 0 => {
                    level -= 1;
                    if level == 0 {
                        self.end = self.pos;
                        self.next(); // past the ]
                        return Ok(TokenKind::Command);
                    }
                }

                b'\\' => self.next(), // skip the escaped character

                b'{' => brace_level += 1,

                b'}' if brace_level != 0 => brace_level -= 1,

                _ => (),
            }
            self.next();
        }
    }

    /// A variable reference.  Starts on `$`.  A name is a run of letters,
    /// digits, and underscores; `${…}` admits arbitrary characters up to
    /// the matching brace.  A `$` followed by neither yields a literal `$`
    /// consuming only the `$` itself.
    fn scan_var(&mut self) -> TokenKind {
        let dollar = self.pos;
        self.next();

        if self.ch == b'{' {
            let open = self.pos;
            match self.input[open + 1..].find('}') {
                Some(n) if n > 0 => {
                    self.start = open + 1;
                    self.end = open + 1 + n;
                    while self.pos < self.end {
                        self.next();
                    }
                    self.next(); // past the }
                    return TokenKind::Variable;
                }
                _ => {
                    // ${} or an unterminated ${: a literal dollar sign.
                    self.start = dollar;
                    self.end = dollar + 1;
                    return TokenKind::String;
                }
            }
        }

        self.start = self.pos;
        while self.is_var_char() {
            self.next();
        }
        self.end = self.pos;

        if self.start == self.end {
            self.start = dollar;
            self.end = dollar + 1;
            TokenKind::String
        } else {
            TokenKind::Variable
        }
    }

    /// A braced string.  Starts on `{`; nesting counts matched braces, `\`
    /// escapes the next character, and no substitution applies inside.
    fn scan_brace(&mut self) -> Result<TokenKind, ParseError> {
        self.next(); // past the {
        self.start = self.pos;
        let mut level = 1;
        loop {
            match self.ch {
                0 => return Err(ParseError),

                b'\\' => {
                    if self.next_pos >= self.input.len() {
                        return Err(ParseError);
                    }
                    self.next();
                }

                b'}' => {
                    level -= 1;
                    if level == 0 {
                        self.end = self.pos;
                        self.next(); // past the }
                        return Ok(TokenKind::String);
                    }
                }

                b'{' => level += 1,

                _ => (),
            }
            self.next();
        }
    }

    /// A text fragment.  At the start of a word this may instead open a
    /// braced or quoted string; otherwise it scans up to the next
    /// substitution trigger or word boundary.
    fn scan_string(&mut self) -> Result<TokenKind, ParseError> {
        let new_word = matches!(
            self.last,
            TokenKind::Separator | TokenKind::Eol | TokenKind::String
        );

        if new_word && !self.in_quote {
            if self.ch == b'{' && !self.options.subst {
                return self.scan_brace();
            }
            if self.ch == b'"' {
                self.in_quote = true;
                self.next();
            }
        }

        self.start = self.pos;
        while self.ch != 0 {
            match self.ch {
                b'\\' => {
                    if !self.options.no_escapes {
                        if self.next_pos >= self.input.len() {
                            return Err(ParseError);
                        }
                        self.next();
                    }
                }

                b'$' => {
                    if !self.options.no_vars {
                        self.end = self.pos;
                        return Ok(TokenKind::Escape);
                    }
                }

                b'[' => {
                    if !self.options.no_commands {
                        self.end = self.pos;
                        return Ok(TokenKind::Escape);
                    }
                }

                b' ' | b'\t' | b';' | b'\n' => {
                    if !self.in_quote {
                        self.end = self.pos;
                        return Ok(TokenKind::Escape);
                    }
                }

                b'"' => {
                    if self.in_quote {
                        self.end = self.pos;
                        self.in_quote = false;
                        self.next(); // past the closing quote
                        return Ok(TokenKind::Escape);
                    }
                }

                _ => (),
            }
            self.next();
        }

        if self.in_quote {
            return Err(ParseError); // unterminated quote
        }

        self.end = self.pos;
        Ok(TokenKind::Escape)
    }

    /// A comment: `#` at the start of a command, through the next
    /// unescaped newline.
    fn scan_comment(&mut self) {
        while self.ch != b'\n' && self.ch != 0 {
            self.next();
        }
    }
}
