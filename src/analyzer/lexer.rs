//! This lexer tokenizes Jack source.
use std::fmt;
use std::io::{BufRead, BufReader, Read};

use super::error::{AnalyzerError, AnalyzerResult};

/// Characters that always stand alone as a one-character symbol token.
pub const SYMBOLS: &[char] = &[
    '{', '}', '[', ']', '(', ')', '.', ',', ';',
    '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
];

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    Keyword,
    Symbol,
    IntegerConstant,
    StringConstant,
    Identifier,
}

impl TokenKind {
    /// The tag name used for leaves of this kind in the markup output.
    pub fn tag(&self) -> &'static str {
        match self {
            TokenKind::Keyword         => "keyword",
            TokenKind::Symbol          => "symbol",
            TokenKind::IntegerConstant => "integerConstant",
            TokenKind::StringConstant  => "stringConstant",
            TokenKind::Identifier      => "identifier",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    pub fn lookup(word: &str) -> Option<Keyword> {
        use Keyword::*;
        match word {
            "class"       => Some(Class),
            "constructor" => Some(Constructor),
            "function"    => Some(Function),
            "method"      => Some(Method),
            "field"       => Some(Field),
            "static"      => Some(Static),
            "var"         => Some(Var),
            "int"         => Some(Int),
            "char"        => Some(Char),
            "boolean"     => Some(Boolean),
            "void"        => Some(Void),
            "true"        => Some(True),
            "false"       => Some(False),
            "null"        => Some(Null),
            "this"        => Some(This),
            "let"         => Some(Let),
            "do"          => Some(Do),
            "if"          => Some(If),
            "else"        => Some(Else),
            "while"       => Some(While),
            "return"      => Some(Return),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        use Keyword::*;
        match self {
            Class       => "class",
            Constructor => "constructor",
            Function    => "function",
            Method      => "method",
            Field       => "field",
            Static      => "static",
            Var         => "var",
            Int         => "int",
            Char        => "char",
            Boolean     => "boolean",
            Void        => "void",
            True        => "true",
            False       => "false",
            Null        => "null",
            This        => "this",
            Let         => "let",
            Do          => "do",
            If          => "if",
            Else        => "else",
            While       => "while",
            Return      => "return",
        }
    }
}

/// A classified lexeme and the (1-based) line it appeared on.
/// String constants are stored without their quotes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: &str, line: usize) -> Self {
        Token { kind, lexeme: lexeme.to_owned(), line }
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => Keyword::lookup(&self.lexeme),
            _ => None,
        }
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.keyword() == Some(kw)
    }

    pub fn is_symbol(&self, sym: char) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme.len() == 1 && self.lexeme.starts_with(sym)
    }

    pub fn symbol(&self) -> Option<char> {
        match self.kind {
            TokenKind::Symbol => self.lexeme.chars().next(),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.lexeme)
    }
}

/// Reads a compilation unit line by line and returns its tokens.
///
/// Comments and whitespace produce no tokens. The first error aborts the
/// whole unit.
pub fn tokenize<T: Read + ?Sized>(reader: Box<T>) -> AnalyzerResult<Vec<Token>> {
    let mut tokens: Vec<Token> = Vec::with_capacity(256);
    let mut in_comment = false;

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line_num = index + 1;
        let line = line.map_err(|source| AnalyzerError::Io { line: line_num, source })?;
        let mut toks = tokenize_line(&line, line_num, &mut in_comment)?;
        tokens.append(&mut toks);
    }

    if in_comment {
        warn!("block comment is never closed; the rest of the file was ignored");
    }
    debug!("lexed {} token(s)", tokens.len());
    Ok(tokens)
}

/// Tokenizes a single line. `in_comment` carries an open `/* ... */` block
/// comment from one line to the next.
fn tokenize_line(line: &str, line_num: usize, in_comment: &mut bool) -> AnalyzerResult<Vec<Token>> {
    let chars: Vec<char> = line.chars().collect();
    let mut out: Vec<Token> = Vec::new();
    let mut sb = String::new();
    let mut i = 0;

    while i < chars.len() {
        if *in_comment {
            match find_comment_close(&chars, i) {
                Some(end) => {
                    *in_comment = false;
                    i = end + 2;
                    continue;
                }
                None => break,
            }
        }

        let c = chars[i];
        let next = chars.get(i + 1).copied();
        match c {
            '/' if next == Some('/') => break,
            '/' if next == Some('*') => {
                flush(&mut sb, line_num, &mut out);
                *in_comment = true;
                i += 2;
                continue;
            }
            '"' => {
                flush(&mut sb, line_num, &mut out);
                // The literal runs to the last quote before any trailing comment.
                let limit = comment_start(&chars, i);
                let end = match chars[..limit].iter().rposition(|&q| q == '"') {
                    Some(end) if end > i => end,
                    _ => return Err(AnalyzerError::UnterminatedString { line: line_num }),
                };
                let text: String = chars[i + 1..end].iter().collect();
                out.push(Token { kind: TokenKind::StringConstant, lexeme: text, line: line_num });
                i = end;
            }
            // Symbols and whitespace both bound the token being built.
            _ if SYMBOLS.contains(&c) => {
                flush(&mut sb, line_num, &mut out);
                out.push(Token { kind: TokenKind::Symbol, lexeme: c.to_string(), line: line_num });
            }
            ' ' | '\t' | '\r' | '\x0B' | '\x0C' => flush(&mut sb, line_num, &mut out),
            _ => sb.push(c),
        }
        i += 1;
    }
    flush(&mut sb, line_num, &mut out);

    Ok(out)
}

/// Index of the first `//` after `from` that is not between quotes, or the
/// line length. `from` is the opening quote of a literal.
fn comment_start(chars: &[char], from: usize) -> usize {
    let mut quoted = false;
    for j in from..chars.len() {
        match chars[j] {
            '"' => quoted = !quoted,
            '/' if !quoted && chars.get(j + 1) == Some(&'/') => return j,
            _ => {}
        }
    }
    chars.len()
}

fn find_comment_close(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&j| chars[j] == '*' && chars[j + 1] == '/')
}

fn flush(sb: &mut String, line: usize, out: &mut Vec<Token>) {
    if let Some(tok) = process_token(sb, line) {
        out.push(tok);
    }
    sb.clear();
}

/// Classifies an accumulated word. Symbols and string constants never
/// reach this point.
fn process_token(sb: &str, line: usize) -> Option<Token> {
    if sb.is_empty() {
        return None;
    }

    let kind = if Keyword::lookup(sb).is_some() {
        TokenKind::Keyword
    } else if sb.chars().all(|c| c.is_ascii_digit()) {
        TokenKind::IntegerConstant
    } else {
        TokenKind::Identifier
    };
    Some(Token::new(kind, sb, line))
}
