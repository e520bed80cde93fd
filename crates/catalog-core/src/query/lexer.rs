/// Lexer for tokenizing CQL queries
///
/// Converts raw query text into positioned tokens. Problems are reported to
/// the shared error collector and lexing carries on with the next character.
use super::diagnostics::SyntaxErrorCollector;
use std::fmt;

/// Token kinds produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Operands
    Identifier,
    String,
    Number,

    // Connectives
    And,
    Or,
    Not,

    // Comparison operators
    Eq,   // =
    Neq,  // !=
    Like, // LIKE

    // Punctuation
    LeftParen,  // (
    RightParen, // )
    Dot,        // .

    // End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::String => write!(f, "string literal"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::And => write!(f, "AND"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::Neq => write!(f, "'!='"),
            TokenKind::Like => write!(f, "LIKE"),
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A positioned token.
///
/// `text` is the lexeme as written, except for string literals where it
/// holds the unescaped content without quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// How error messages quote this token
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::String => format!("\"{}\"", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}

/// Lexer state
pub struct Lexer<'a> {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    errors: &'a mut SyntaxErrorCollector,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer reporting into `errors`
    pub fn new(input: &str, errors: &'a mut SyntaxErrorCollector) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 0,
            errors,
        }
    }

    /// Get the next token, skipping over anything that cannot be lexed
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let (line, column) = (self.line, self.column);
            let Some(ch) = self.current_char() else {
                return Token::new(TokenKind::Eof, "", line, column);
            };

            // Single-character tokens
            let single = match ch {
                '(' => Some(TokenKind::LeftParen),
                ')' => Some(TokenKind::RightParen),
                '=' => Some(TokenKind::Eq),
                '.' => Some(TokenKind::Dot),
                _ => None,
            };
            if let Some(kind) = single {
                self.advance();
                return Token::new(kind, ch, line, column);
            }

            match ch {
                '!' => {
                    self.advance();
                    if self.current_char() == Some('=') {
                        self.advance();
                        return Token::new(TokenKind::Neq, "!=", line, column);
                    }
                    self.errors.report("expected '=' after '!'", line, column);
                    continue;
                }
                '\'' | '"' => return self.read_string(ch, line, column),
                '-' if self.peek_char().is_some_and(|c| c.is_ascii_digit()) => {
                    return self.read_number(line, column);
                }
                _ => {}
            }

            if ch.is_ascii_digit() {
                return self.read_number(line, column);
            }

            if ch.is_ascii_alphabetic() || ch == '_' {
                return self.read_identifier_or_keyword(line, column);
            }

            self.errors
                .report(format!("unexpected character '{}'", ch), line, column);
            self.advance();
        }
    }

    /// Tokenize the entire input; the last token is always `Eof`
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        tokens
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += 1;
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Numbers are validated here so the parser can convert them without
    /// failing. An out-of-range literal is reported but still produces a
    /// token, which keeps the parser from stacking a second error on it.
    fn read_number(&mut self, line: usize, column: usize) -> Token {
        let start = self.position;
        let mut has_dot = false;

        if self.current_char() == Some('-') {
            self.advance();
        }

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot && self.peek_char().is_some_and(|c| c.is_ascii_digit())
            {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.input[start..self.position].iter().collect();
        let valid = if has_dot {
            text.parse::<f64>().is_ok_and(f64::is_finite)
        } else {
            text.parse::<i64>().is_ok()
        };
        if !valid {
            self.errors
                .report(format!("invalid numeric literal '{}'", text), line, column);
        }

        Token::new(TokenKind::Number, text, line, column)
    }

    fn read_string(&mut self, quote: char, line: usize, column: usize) -> Token {
        self.advance(); // skip opening quote
        let mut value = String::new();

        loop {
            match self.current_char() {
                None => {
                    self.errors
                        .report("unterminated string literal", line, column);
                    break;
                }
                Some(ch) if ch == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.current_char() {
                        Some(escaped @ ('\\' | '\'' | '"')) => {
                            value.push(escaped);
                            self.advance();
                        }
                        // Any other sequence is kept as written
                        _ => value.push('\\'),
                    }
                }
                Some(ch) => {
                    value.push(ch);
                    self.advance();
                }
            }
        }

        Token::new(TokenKind::String, value, line, column)
    }

    fn read_identifier_or_keyword(&mut self, line: usize, column: usize) -> Token {
        let start = self.position;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.input[start..self.position].iter().collect();
        let kind = match text.to_ascii_uppercase().as_str() {
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "NOT" => TokenKind::Not,
            "LIKE" => TokenKind::Like,
            _ => TokenKind::Identifier,
        };

        Token::new(kind, text, line, column)
    }
}
