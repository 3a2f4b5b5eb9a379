//! The parse tree produced by the syntax analyzer and the sinks that
//! consume it.
//!
//! A tree is walked in document order as a stream of `open`, `leaf` and
//! `close` events. The markup renderer turns those events into the nested
//! document:
//!
//! ```xml
//! <class>
//!   <keyword> class </keyword>
//!   <identifier> Main </identifier>
//!   <symbol> { </symbol>
//!   <symbol> } </symbol>
//! </class>
//! ```
use std::fmt;

use super::lexer::{Token, TokenKind};

/// Non-terminals of the grammar that appear as interior nodes.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Label {
    Class,
    ClassVarDec,
    SubroutineDec,
    ParameterList,
    SubroutineBody,
    VarDec,
    Statements,
    LetStatement,
    IfStatement,
    WhileStatement,
    DoStatement,
    ReturnStatement,
    Expression,
    Term,
    ExpressionList,
}

impl Label {
    pub fn tag(&self) -> &'static str {
        use Label::*;
        match self {
            Class           => "class",
            ClassVarDec     => "classVarDec",
            SubroutineDec   => "subroutineDec",
            ParameterList   => "parameterList",
            SubroutineBody  => "subroutineBody",
            VarDec          => "varDec",
            Statements      => "statements",
            LetStatement    => "letStatement",
            IfStatement     => "ifStatement",
            WhileStatement  => "whileStatement",
            DoStatement     => "doStatement",
            ReturnStatement => "returnStatement",
            Expression      => "expression",
            Term            => "term",
            ExpressionList  => "expressionList",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Node {
    Branch(Label, Vec<Node>),
    Leaf(Token),
}

impl Node {
    pub fn label(&self) -> Option<Label> {
        match self {
            Node::Branch(label, _) => Some(*label),
            Node::Leaf(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Branch(_, children) => children,
            Node::Leaf(_) => &[],
        }
    }

    /// Leaves in left to right order.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_tokens(&mut out);
        out
    }

    fn collect_tokens<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            Node::Branch(_, children) => {
                for child in children {
                    child.collect_tokens(out);
                }
            }
            Node::Leaf(tok) => out.push(tok),
        }
    }

    /// Replays the tree into `sink` in document order.
    pub fn emit<S: TreeSink + ?Sized>(&self, sink: &mut S) {
        match self {
            Node::Branch(label, children) => {
                sink.open(*label);
                for child in children {
                    child.emit(sink);
                }
                sink.close(*label);
            }
            Node::Leaf(tok) => sink.leaf(tok.kind, &tok.lexeme),
        }
    }
}

/// Receives a tree as a flat stream of events.
pub trait TreeSink {
    fn open(&mut self, label: Label);
    fn leaf(&mut self, kind: TokenKind, text: &str);
    fn close(&mut self, label: Label);
}

/// Renders tree events as an indented markup document.
pub struct XmlRenderer {
    output: String,
    indent_level: usize,
}

impl XmlRenderer {
    pub fn new() -> Self {
        XmlRenderer { output: String::new(), indent_level: 0 }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn push_line(&mut self, s: &str) {
        for _ in 0..self.indent_level {
            self.output.push_str("  ");
        }
        self.output.push_str(s);
        self.output.push('\n');
    }
}

impl Default for XmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSink for XmlRenderer {
    fn open(&mut self, label: Label) {
        self.push_line(&format!("<{}>", label));
        self.indent_level += 1;
    }

    fn leaf(&mut self, kind: TokenKind, text: &str) {
        self.push_line(&format!("<{tag}> {} </{tag}>", escape(text), tag = kind.tag()));
    }

    fn close(&mut self, label: Label) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.push_line(&format!("</{}>", label));
    }
}

/// Renders a whole tree to markup.
pub fn render_xml(tree: &Node) -> String {
    let mut renderer = XmlRenderer::new();
    tree.emit(&mut renderer);
    renderer.finish()
}

/// Renders the flat token sequence inside a single `<tokens>` element.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut renderer = XmlRenderer::new();
    renderer.push_line("<tokens>");
    for tok in tokens {
        renderer.leaf(tok.kind, &tok.lexeme);
    }
    renderer.push_line("</tokens>");
    renderer.finish()
}

/// Escapes the three characters that are reserved in markup text.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}
