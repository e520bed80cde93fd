/// Parser for CQL queries
///
/// Recursive descent over the token stream:
///
/// ```text
/// start      := orExpr EOF
/// orExpr     := andExpr (OR andExpr)*
/// andExpr    := unary (AND unary)*
/// unary      := NOT unary | primary
/// primary    := comparison | LPAREN orExpr RPAREN
/// comparison := IDENTIFIER (EQ | NEQ | LIKE) (STRING | NUMBER)
/// ```
///
/// Mismatches are reported to the error collector and the parser skips
/// ahead to the next AND/OR/RPAREN/EOF, so independent errors in one query
/// are all surfaced. A rule that hit an error yields `None`; the tree is
/// only meaningful when the collector stayed empty.
use super::ast::{ComparisonOp, Expr, Literal};
use super::diagnostics::SyntaxErrorCollector;
use super::lexer::{Token, TokenKind};

/// Nesting limit exceeded; parsing stops at once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthExceeded {
    pub max_depth: usize,
    pub line: usize,
    pub column: usize,
}

type ParseResult = Result<Option<Expr>, DepthExceeded>;

/// A parsed subtree and its height. A chain of one connective is one
/// level, so the height is how deeply the printed or serialized form nests.
type Parsed = Result<Option<(Expr, usize)>, DepthExceeded>;

/// Parser for CQL queries
pub struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    max_depth: usize,
    last_reported: Option<usize>,
    errors: &'a mut SyntaxErrorCollector,
}

impl<'a> Parser<'a> {
    /// Create a parser over lexed tokens.
    ///
    /// `tokens` should end with `Eof`; one is appended if missing.
    pub fn new(
        mut tokens: Vec<Token>,
        max_depth: usize,
        errors: &'a mut SyntaxErrorCollector,
    ) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let (line, column) = tokens
                .last()
                .map(|t| (t.line, t.column + t.text.chars().count()))
                .unwrap_or((1, 0));
            tokens.push(Token::new(TokenKind::Eof, "", line, column));
        }
        Self {
            tokens,
            position: 0,
            max_depth,
            last_reported: None,
            errors,
        }
    }

    /// Parse a complete query
    pub fn parse(mut self) -> ParseResult {
        let mut expr = self.parse_or(0)?.map(|(expr, _)| expr);

        while !self.check(TokenKind::Eof) {
            // A ')' the operand rule already rejected is not reported again
            if self.last_reported != Some(self.position) {
                self.expected("AND, OR or end of input");
            }
            expr = None;
            if self.check(TokenKind::RightParen) {
                self.advance();
            }
            self.synchronize();
            if self.check(TokenKind::And) || self.check(TokenKind::Or) {
                self.advance();
                self.parse_or(0)?;
            }
        }

        Ok(expr)
    }

    fn parse_or(&mut self, depth: usize) -> Parsed {
        self.parse_chain(depth, TokenKind::Or, Expr::or, Self::parse_and)
    }

    fn parse_and(&mut self, depth: usize) -> Parsed {
        self.parse_chain(depth, TokenKind::And, Expr::and, Self::parse_unary)
    }

    /// `operand (connective operand)*`, left-associative
    fn parse_chain(
        &mut self,
        depth: usize,
        connective: TokenKind,
        build: fn(Expr, Expr) -> Expr,
        operand: fn(&mut Self, usize) -> Parsed,
    ) -> Parsed {
        let mut left = operand(self, depth)?;
        let mut chained = false;

        while self.check(connective) {
            let (line, column) = self.position_of_current();
            self.advance();
            let right = operand(self, depth)?;
            left = match (left, right) {
                (Some((l, left_height)), Some((r, right_height))) => {
                    let height = if chained {
                        left_height.max(right_height + 1)
                    } else {
                        left_height.max(right_height) + 1
                    };
                    self.check_height(height, line, column)?;
                    Some((build(l, r), height))
                }
                _ => None,
            };
            chained = true;
        }

        Ok(left)
    }

    fn parse_unary(&mut self, depth: usize) -> Parsed {
        if self.check(TokenKind::Not) {
            let (line, column) = self.position_of_current();
            let depth = self.enter(depth)?;
            self.advance();
            return match self.parse_unary(depth)? {
                Some((operand, height)) => {
                    self.check_height(height + 1, line, column)?;
                    Ok(Some((Expr::not(operand), height + 1)))
                }
                None => Ok(None),
            };
        }

        self.parse_primary(depth)
    }

    fn parse_primary(&mut self, depth: usize) -> Parsed {
        match self.current_token().kind {
            TokenKind::Identifier => self.parse_comparison(),
            TokenKind::LeftParen => {
                let depth = self.enter(depth)?;
                self.advance();
                let inner = self.parse_or(depth)?;
                if self.finish_group(depth)? {
                    Ok(inner)
                } else {
                    Ok(None)
                }
            }
            _ => {
                self.expected("expression");
                self.synchronize();
                Ok(None)
            }
        }
    }

    fn parse_comparison(&mut self) -> Parsed {
        let field = self.current_token().text.clone();
        self.advance();

        let op = match self.current_token().kind {
            TokenKind::Eq => ComparisonOp::Eq,
            TokenKind::Neq => ComparisonOp::Neq,
            TokenKind::Like => ComparisonOp::Like,
            _ => {
                self.expected("'=', '!=' or LIKE");
                self.synchronize();
                return Ok(None);
            }
        };
        self.advance();

        let literal = match self.current_token().kind {
            TokenKind::String => Some(Literal::String(self.current_token().text.clone())),
            // Invalid numbers were reported by the lexer
            TokenKind::Number => Literal::from_number_text(&self.current_token().text),
            _ => {
                self.expected("string or number literal");
                self.synchronize();
                return Ok(None);
            }
        };
        self.advance();

        Ok(literal.map(|literal| (Expr::compare(field, op, literal), 0)))
    }

    /// Consume the `)` closing a group. On a mismatch, keeps parsing
    /// connective-separated operands until the group closes so later errors
    /// inside it are still reported. Returns whether the group closed
    /// cleanly.
    fn finish_group(&mut self, depth: usize) -> Result<bool, DepthExceeded> {
        if self.check(TokenKind::RightParen) {
            self.advance();
            return Ok(true);
        }

        loop {
            self.expected("')'");
            self.synchronize();
            match self.current_token().kind {
                TokenKind::RightParen => {
                    self.advance();
                    return Ok(false);
                }
                TokenKind::And | TokenKind::Or => {
                    self.advance();
                    self.parse_or(depth)?;
                    if self.check(TokenKind::RightParen) {
                        self.advance();
                        return Ok(false);
                    }
                }
                _ => return Ok(false),
            }
        }
    }

    fn check_height(&self, height: usize, line: usize, column: usize) -> Result<(), DepthExceeded> {
        if height > self.max_depth {
            return Err(DepthExceeded {
                max_depth: self.max_depth,
                line,
                column,
            });
        }
        Ok(())
    }

    fn enter(&self, depth: usize) -> Result<usize, DepthExceeded> {
        let depth = depth + 1;
        if depth > self.max_depth {
            let token = self.current_token();
            return Err(DepthExceeded {
                max_depth: self.max_depth,
                line: token.line,
                column: token.column,
            });
        }
        Ok(depth)
    }

    /// Skip tokens until a connective, a closing parenthesis or the end
    fn synchronize(&mut self) {
        while !matches!(
            self.current_token().kind,
            TokenKind::And | TokenKind::Or | TokenKind::RightParen | TokenKind::Eof
        ) {
            self.advance();
        }
    }

    fn expected(&mut self, what: &str) {
        let token = &self.tokens[self.position];
        let message = format!("expected {}, found {}", what, token.describe());
        self.errors.report(message, token.line, token.column);
        self.last_reported = Some(self.position);
    }

    fn current_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn position_of_current(&self) -> (usize, usize) {
        let token = self.current_token();
        (token.line, token.column)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token().kind == kind
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }
}
