//! Recursive-descent parser.
//!
//! One function per grammar level, lowest precedence first. Nesting
//! through `not`, parentheses and list brackets is bounded by
//! [`MAX_DEPTH`] so a hostile condition cannot exhaust the stack.

use prisk_core::FactValue;

use crate::ast::{CompareOp, Expr};
use crate::error::ExprError;
use crate::token::{tokenize, Token, TokenKind};

/// Maximum nesting depth accepted by the parser.
pub const MAX_DEPTH: usize = 64;

/// Parse a condition string into an expression tree.
pub fn parse(src: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.parse_or()?;
    let tail = parser.peek();
    if tail.kind != TokenKind::Eof {
        return Err(ExprError::UnexpectedToken {
            expected: "end of input",
            found: tail.kind.describe(),
            offset: tail.offset,
        });
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // tokenize() always ends with Eof and advance() never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind_at(&self, ahead: usize) -> &TokenKind {
        let idx = (self.pos + ahead).min(self.tokens.len() - 1);
        &self.tokens[idx].kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<(), ExprError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn unexpected(&self, expected: &'static str) -> ExprError {
        let token = self.peek();
        ExprError::UnexpectedToken {
            expected,
            found: token.kind.describe(),
            offset: token.offset,
        }
    }

    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            Err(ExprError::TooDeep { limit: MAX_DEPTH })
        } else {
            Ok(())
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_or(&mut self) -> Result<Expr, ExprError> {
        let first = self.parse_and()?;
        let mut items = vec![first];
        while self.eat(&TokenKind::Or) {
            items.push(self.parse_and()?);
        }
        Ok(collapse(items, Expr::Or))
    }

    fn parse_and(&mut self) -> Result<Expr, ExprError> {
        let first = self.parse_not()?;
        let mut items = vec![first];
        while self.eat(&TokenKind::And) {
            items.push(self.parse_not()?);
        }
        Ok(collapse(items, Expr::And))
    }

    fn parse_not(&mut self) -> Result<Expr, ExprError> {
        if self.eat(&TokenKind::Not) {
            self.enter()?;
            let inner = self.parse_not()?;
            self.leave();
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ExprError> {
        let first = self.parse_operand()?;
        let mut rest = Vec::new();
        while let Some(op) = self.compare_op() {
            rest.push((op, self.parse_operand()?));
        }
        if rest.is_empty() {
            Ok(first)
        } else {
            Ok(Expr::Compare {
                first: Box::new(first),
                rest,
            })
        }
    }

    /// Consume a comparison operator if one is next. `not in` spans two tokens.
    fn compare_op(&mut self) -> Option<CompareOp> {
        let op = match self.peek().kind {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::Ne => CompareOp::Ne,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Le => CompareOp::Le,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Ge => CompareOp::Ge,
            TokenKind::In => CompareOp::In,
            TokenKind::Not if *self.peek_kind_at(1) == TokenKind::In => {
                self.advance();
                CompareOp::NotIn
            }
            _ => return None,
        };
        self.advance();
        Some(op)
    }

    fn parse_operand(&mut self) -> Result<Expr, ExprError> {
        let token = self.peek().clone();
        let expr = match token.kind {
            TokenKind::Int(n) => Expr::Literal(FactValue::Int(n)),
            TokenKind::Float(x) => Expr::Literal(FactValue::Float(x)),
            TokenKind::Str(s) => Expr::Literal(FactValue::Str(s)),
            TokenKind::True => Expr::Literal(FactValue::Bool(true)),
            TokenKind::False => Expr::Literal(FactValue::Bool(false)),
            TokenKind::None => Expr::Literal(FactValue::Null),
            TokenKind::Ident(name) => Expr::Var(name),
            TokenKind::LParen => {
                self.advance();
                self.enter()?;
                let inner = self.parse_or()?;
                self.leave();
                self.expect(&TokenKind::RParen, "')'")?;
                return Ok(inner);
            }
            TokenKind::LBracket => {
                self.advance();
                self.enter()?;
                let items = self.parse_list_items()?;
                self.leave();
                return Ok(Expr::List(items));
            }
            _ => return Err(self.unexpected("operand")),
        };
        self.advance();
        Ok(expr)
    }

    fn parse_list_items(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut items = Vec::new();
        if self.eat(&TokenKind::RBracket) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_operand()?);
            if self.eat(&TokenKind::Comma) {
                // Trailing comma before the closing bracket is allowed.
                if self.eat(&TokenKind::RBracket) {
                    return Ok(items);
                }
                continue;
            }
            self.expect(&TokenKind::RBracket, "',' or ']'")?;
            return Ok(items);
        }
    }
}

fn collapse(mut items: Vec<Expr>, build: fn(Vec<Expr>) -> Expr) -> Expr {
    if items.len() == 1 {
        items.remove(0)
    } else {
        build(items)
    }
}
