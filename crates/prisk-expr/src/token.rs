//! Tokenizer for the condition language.

use crate::error::ExprError;

/// Token kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    True,
    False,
    None,
    And,
    Or,
    Not,
    In,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Eof,
}

impl TokenKind {
    /// Human-readable rendering for error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Int(n) => format!("number {n}"),
            Self::Float(x) => format!("number {x}"),
            Self::Str(s) => format!("string {s:?}"),
            Self::Ident(name) => format!("identifier '{name}'"),
            Self::True => "'true'".into(),
            Self::False => "'false'".into(),
            Self::None => "'none'".into(),
            Self::And => "'and'".into(),
            Self::Or => "'or'".into(),
            Self::Not => "'not'".into(),
            Self::In => "'in'".into(),
            Self::Eq => "'=='".into(),
            Self::Ne => "'!='".into(),
            Self::Lt => "'<'".into(),
            Self::Le => "'<='".into(),
            Self::Gt => "'>'".into(),
            Self::Ge => "'>='".into(),
            Self::LParen => "'('".into(),
            Self::RParen => "')'".into(),
            Self::LBracket => "'['".into(),
            Self::RBracket => "']'".into(),
            Self::Comma => "','".into(),
            Self::Eof => "end of input".into(),
        }
    }
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

/// Split a condition into tokens. The last token is always [`TokenKind::Eof`].
pub fn tokenize(src: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let kind = match ch {
            '(' => single(&mut chars, TokenKind::LParen),
            ')' => single(&mut chars, TokenKind::RParen),
            '[' => single(&mut chars, TokenKind::LBracket),
            ']' => single(&mut chars, TokenKind::RBracket),
            ',' => single(&mut chars, TokenKind::Comma),
            '=' | '!' | '<' | '>' => {
                chars.next();
                let followed_by_eq = matches!(chars.peek(), Some(&(_, '=')));
                if followed_by_eq {
                    chars.next();
                }
                match (ch, followed_by_eq) {
                    ('=', true) => TokenKind::Eq,
                    ('!', true) => TokenKind::Ne,
                    ('<', true) => TokenKind::Le,
                    ('<', false) => TokenKind::Lt,
                    ('>', true) => TokenKind::Ge,
                    ('>', false) => TokenKind::Gt,
                    _ => return Err(ExprError::UnexpectedChar { ch, offset }),
                }
            }
            '"' | '\'' => lex_string(&mut chars, offset, ch)?,
            '-' => {
                chars.next();
                match chars.peek() {
                    Some(&(_, d)) if d.is_ascii_digit() => lex_number(src, &mut chars, offset)?,
                    _ => return Err(ExprError::UnexpectedChar { ch, offset }),
                }
            }
            c if c.is_ascii_digit() => lex_number(src, &mut chars, offset)?,
            c if c.is_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                keyword_or_ident(ident)
            }
            _ => return Err(ExprError::UnexpectedChar { ch, offset }),
        };

        tokens.push(Token { kind, offset });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        offset: src.len(),
    });
    Ok(tokens)
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

fn single(chars: &mut Chars<'_>, kind: TokenKind) -> TokenKind {
    chars.next();
    kind
}

fn keyword_or_ident(ident: String) -> TokenKind {
    match ident.as_str() {
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "in" => TokenKind::In,
        "true" | "True" => TokenKind::True,
        "false" | "False" => TokenKind::False,
        "none" | "None" | "null" => TokenKind::None,
        _ => TokenKind::Ident(ident),
    }
}

/// Lex a number whose first character (or leading `-`) starts at `start`.
fn lex_number(src: &str, chars: &mut Chars<'_>, start: usize) -> Result<TokenKind, ExprError> {
    let mut end = start + 1;
    let mut is_float = false;
    while let Some(&(i, c)) = chars.peek() {
        if c.is_ascii_digit() || (c == '.' && !is_float) || c == '_' {
            is_float |= c == '.';
            end = i + c.len_utf8();
            chars.next();
        } else {
            break;
        }
    }
    let literal = &src[start..end];
    let cleaned: String = literal.chars().filter(|c| *c != '_').collect();
    let invalid = || ExprError::InvalidNumber {
        literal: literal.to_string(),
        offset: start,
    };
    if is_float {
        cleaned.parse::<f64>().map(TokenKind::Float).map_err(|_| invalid())
    } else {
        cleaned.parse::<i64>().map(TokenKind::Int).map_err(|_| invalid())
    }
}

fn lex_string(chars: &mut Chars<'_>, start: usize, quote: char) -> Result<TokenKind, ExprError> {
    chars.next();
    let mut out = String::new();
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, other)) => out.push(other),
                None => break,
            },
            c if c == quote => return Ok(TokenKind::Str(out)),
            c => out.push(c),
        }
    }
    Err(ExprError::UnterminatedString { offset: start })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn comparison_and_keywords() {
        assert_eq!(
            kinds("ppl >= ppl_mid and not ethics"),
            vec![
                TokenKind::Ident("ppl".into()),
                TokenKind::Ge,
                TokenKind::Ident("ppl_mid".into()),
                TokenKind::And,
                TokenKind::Not,
                TokenKind::Ident("ethics".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn literals() {
        assert_eq!(
            kinds(r#"-5 2.5 100_000 'a\'b' "x" True None"#),
            vec![
                TokenKind::Int(-5),
                TokenKind::Float(2.5),
                TokenKind::Int(100_000),
                TokenKind::Str("a'b".into()),
                TokenKind::Str("x".into()),
                TokenKind::True,
                TokenKind::None,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn offsets_are_byte_positions() {
        let tokens = tokenize("a  ==  b").unwrap();
        assert_eq!(tokens[1].offset, 3);
        assert_eq!(tokens[2].offset, 7);
        assert_eq!(tokens[3].offset, 8);
    }

    #[test]
    fn rejects_attribute_and_call_syntax() {
        assert!(matches!(
            tokenize("os.system"),
            Err(ExprError::UnexpectedChar { ch: '.', .. })
        ));
        assert!(matches!(
            tokenize("a + b"),
            Err(ExprError::UnexpectedChar { ch: '+', .. })
        ));
        assert!(matches!(
            tokenize("x = 1"),
            Err(ExprError::UnexpectedChar { ch: '=', .. })
        ));
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(
            tokenize("name == 'abc"),
            Err(ExprError::UnterminatedString { offset: 8 })
        );
    }

    #[test]
    fn overflowing_integer() {
        assert!(matches!(
            tokenize("99999999999999999999"),
            Err(ExprError::InvalidNumber { .. })
        ));
    }
}
