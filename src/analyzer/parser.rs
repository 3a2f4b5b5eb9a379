//! The Parser takes the token sequence from the lexer and converts it into
//! a parse tree rooted at `class`.
//!
//! Every production is a method that starts at the current position,
//! consumes exactly the tokens that belong to it and returns its subtree.
//! Some productions deliberately stop in front of a terminator so that the
//! caller consumes it:
//!
//! * `statements` stops before the `}` closing its block.
//! * `expression` stops before `)`, `]`, `;` or `,`.
//! * `parameterList` and `expressionList` stop before their closing `)`.
use super::error::{AnalyzerError, AnalyzerResult};
use super::lexer::{Keyword, Token, TokenKind};
use super::tree::{Label, Node};

/// Maximum nesting of statements, expressions and terms.
pub const MAX_DEPTH: usize = 128;

const BINARY_OPERATORS: &[char] = &['+', '-', '*', '/', '&', '|', '<', '>', '='];

pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser { tokens, position: 0, depth: 0 }
    }

    /// Index of the first token not yet consumed.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Parses the whole unit, which must be exactly one class.
    pub fn run(mut self) -> AnalyzerResult<Node> {
        let tree = self.class()?;

        if let Some(tok) = self.tokens.get(self.position) {
            return Err(self.unexpected(tok, "end of input after the class"));
        }
        debug!("parsed {} token(s) into a class tree", self.position);
        Ok(tree)
    }

    /// `'class' className '{' classVarDec* subroutineDec* '}'`
    pub fn class(&mut self) -> AnalyzerResult<Node> {
        let mut children = vec![
            self.expect_keyword(&[Keyword::Class], "`class`")?,
            self.expect_identifier("a class name")?,
            self.expect_symbol('{')?,
        ];

        loop {
            match self.peek("a declaration or `}`")?.keyword() {
                Some(Keyword::Static) | Some(Keyword::Field) => children.push(self.class_var_dec()?),
                _ => break,
            }
        }
        loop {
            match self.peek("a subroutine or `}`")?.keyword() {
                Some(Keyword::Constructor) | Some(Keyword::Function) | Some(Keyword::Method) => {
                    children.push(self.subroutine_dec()?)
                }
                _ => break,
            }
        }
        children.push(self.expect_symbol('}')?);

        Ok(Node::Branch(Label::Class, children))
    }

    /// `('static'|'field') type varName (',' varName)* ';'`
    pub fn class_var_dec(&mut self) -> AnalyzerResult<Node> {
        let mut children = vec![
            self.expect_keyword(&[Keyword::Static, Keyword::Field], "`static` or `field`")?,
            self.type_name(false)?,
        ];
        self.var_names(&mut children)?;
        Ok(Node::Branch(Label::ClassVarDec, children))
    }

    /// `('constructor'|'function'|'method') ('void'|type) name '(' parameterList ')' subroutineBody`
    pub fn subroutine_dec(&mut self) -> AnalyzerResult<Node> {
        let children = vec![
            self.expect_keyword(
                &[Keyword::Constructor, Keyword::Function, Keyword::Method],
                "`constructor`, `function` or `method`",
            )?,
            self.type_name(true)?,
            self.expect_identifier("a subroutine name")?,
            self.expect_symbol('(')?,
            self.parameter_list()?,
            self.expect_symbol(')')?,
            self.subroutine_body()?,
        ];
        Ok(Node::Branch(Label::SubroutineDec, children))
    }

    /// `((type varName) (',' type varName)*)?`, stopping before `)`.
    pub fn parameter_list(&mut self) -> AnalyzerResult<Node> {
        let mut children = Vec::new();

        if !self.peek("a parameter or `)`")?.is_symbol(')') {
            children.push(self.type_name(false)?);
            children.push(self.expect_identifier("a parameter name")?);
            while self.peek("`,` or `)`")?.is_symbol(',') {
                children.push(self.advance()?);
                children.push(self.type_name(false)?);
                children.push(self.expect_identifier("a parameter name")?);
            }
        }
        Ok(Node::Branch(Label::ParameterList, children))
    }

    /// `'{' varDec* statements '}'`
    pub fn subroutine_body(&mut self) -> AnalyzerResult<Node> {
        let mut children = vec![self.expect_symbol('{')?];
        while self.peek("a statement or `}`")?.is_keyword(Keyword::Var) {
            children.push(self.var_dec()?);
        }
        children.push(self.statements()?);
        children.push(self.expect_symbol('}')?);
        Ok(Node::Branch(Label::SubroutineBody, children))
    }

    /// `'var' type varName (',' varName)* ';'`
    pub fn var_dec(&mut self) -> AnalyzerResult<Node> {
        let mut children = vec![
            self.expect_keyword(&[Keyword::Var], "`var`")?,
            self.type_name(false)?,
        ];
        self.var_names(&mut children)?;
        Ok(Node::Branch(Label::VarDec, children))
    }

    /// `statement*`, stopping before the `}` that closes the block.
    pub fn statements(&mut self) -> AnalyzerResult<Node> {
        self.nested(|p| {
            let mut children = Vec::new();
            loop {
                let tok = p.peek("a statement or `}`")?;
                let statement = match tok.keyword() {
                    Some(Keyword::Let) => p.let_statement()?,
                    Some(Keyword::If) => p.if_statement()?,
                    Some(Keyword::While) => p.while_statement()?,
                    Some(Keyword::Do) => p.do_statement()?,
                    Some(Keyword::Return) => p.return_statement()?,
                    _ if tok.is_symbol('}') => break,
                    _ => return Err(p.unexpected(tok, "a statement or `}`")),
                };
                children.push(statement);
            }
            Ok(Node::Branch(Label::Statements, children))
        })
    }

    /// `'let' varName ('[' expression ']')? '=' expression ';'`
    pub fn let_statement(&mut self) -> AnalyzerResult<Node> {
        let mut children = vec![
            self.expect_keyword(&[Keyword::Let], "`let`")?,
            self.expect_identifier("a variable name")?,
        ];
        if self.peek("`[` or `=`")?.is_symbol('[') {
            children.push(self.advance()?);
            children.push(self.expression()?);
            children.push(self.expect_symbol(']')?);
        }
        children.push(self.expect_symbol('=')?);
        children.push(self.expression()?);
        children.push(self.expect_symbol(';')?);
        Ok(Node::Branch(Label::LetStatement, children))
    }

    /// `'if' '(' expression ')' '{' statements '}' ('else' '{' statements '}')?`
    pub fn if_statement(&mut self) -> AnalyzerResult<Node> {
        let mut children = vec![
            self.expect_keyword(&[Keyword::If], "`if`")?,
            self.expect_symbol('(')?,
            self.expression()?,
            self.expect_symbol(')')?,
        ];
        self.block(&mut children)?;

        // The `else` branch belongs to this statement, so look past the `}`.
        if self.tokens.get(self.position).map_or(false, |t| t.is_keyword(Keyword::Else)) {
            children.push(self.advance()?);
            self.block(&mut children)?;
        }
        Ok(Node::Branch(Label::IfStatement, children))
    }

    /// `'while' '(' expression ')' '{' statements '}'`
    pub fn while_statement(&mut self) -> AnalyzerResult<Node> {
        let mut children = vec![
            self.expect_keyword(&[Keyword::While], "`while`")?,
            self.expect_symbol('(')?,
            self.expression()?,
            self.expect_symbol(')')?,
        ];
        self.block(&mut children)?;
        Ok(Node::Branch(Label::WhileStatement, children))
    }

    /// `'do' subroutineCall ';'`
    pub fn do_statement(&mut self) -> AnalyzerResult<Node> {
        let mut children = vec![self.expect_keyword(&[Keyword::Do], "`do`")?];
        self.subroutine_call(&mut children)?;
        children.push(self.expect_symbol(';')?);
        Ok(Node::Branch(Label::DoStatement, children))
    }

    /// `'return' expression? ';'`
    pub fn return_statement(&mut self) -> AnalyzerResult<Node> {
        let mut children = vec![self.expect_keyword(&[Keyword::Return], "`return`")?];
        if !self.peek("an expression or `;`")?.is_symbol(';') {
            children.push(self.expression()?);
        }
        children.push(self.expect_symbol(';')?);
        Ok(Node::Branch(Label::ReturnStatement, children))
    }

    /// `term (op term)*`, stopping before whatever follows the last term.
    pub fn expression(&mut self) -> AnalyzerResult<Node> {
        self.nested(|p| {
            let mut children = vec![p.term()?];

            // An operator here always follows a term, so `-` is binary.
            while let Some(tok) = p.tokens.get(p.position) {
                match tok.symbol() {
                    Some(op) if BINARY_OPERATORS.contains(&op) => {
                        children.push(p.advance()?);
                        children.push(p.term()?);
                    }
                    _ => break,
                }
            }
            Ok(Node::Branch(Label::Expression, children))
        })
    }

    /// `integerConstant | stringConstant | keywordConstant | varName |
    /// varName '[' expression ']' | subroutineCall | '(' expression ')' | unaryOp term`
    pub fn term(&mut self) -> AnalyzerResult<Node> {
        self.nested(|p| {
            let tok = p.peek("a term")?;
            let mut children = Vec::new();

            match tok.kind {
                TokenKind::IntegerConstant | TokenKind::StringConstant => children.push(p.advance()?),
                TokenKind::Keyword => match tok.keyword() {
                    Some(Keyword::True) | Some(Keyword::False) | Some(Keyword::Null) | Some(Keyword::This) => {
                        children.push(p.advance()?)
                    }
                    _ => return Err(p.unexpected(tok, "a term")),
                },
                TokenKind::Identifier => match p.tokens.get(p.position + 1).and_then(|t| t.symbol()) {
                    Some('[') => {
                        children.push(p.advance()?);
                        children.push(p.advance()?);
                        children.push(p.expression()?);
                        children.push(p.expect_symbol(']')?);
                    }
                    Some('(') | Some('.') => p.subroutine_call(&mut children)?,
                    _ => children.push(p.advance()?),
                },
                TokenKind::Symbol => match tok.symbol() {
                    Some('(') => {
                        children.push(p.advance()?);
                        children.push(p.expression()?);
                        children.push(p.expect_symbol(')')?);
                    }
                    // A term starts either an expression or the operand of
                    // an operator, so a `-` here is unary.
                    Some('-') | Some('~') => {
                        children.push(p.advance()?);
                        children.push(p.term()?);
                    }
                    _ => return Err(p.unexpected(tok, "a term")),
                },
            }
            Ok(Node::Branch(Label::Term, children))
        })
    }

    /// `(expression (',' expression)*)?`, stopping before `)`.
    pub fn expression_list(&mut self) -> AnalyzerResult<Node> {
        let mut children = Vec::new();

        if !self.peek("an expression or `)`")?.is_symbol(')') {
            children.push(self.expression()?);
            while self.peek("`,` or `)`")?.is_symbol(',') {
                children.push(self.advance()?);
                children.push(self.expression()?);
            }
        }
        Ok(Node::Branch(Label::ExpressionList, children))
    }

    /// `name ('.' name)? '(' expressionList ')'`. A call has no node of its
    /// own; its parts are appended to the enclosing node.
    fn subroutine_call(&mut self, children: &mut Vec<Node>) -> AnalyzerResult<()> {
        children.push(self.expect_identifier("a subroutine, class or variable name")?);
        if self.peek("`.` or `(`")?.is_symbol('.') {
            children.push(self.advance()?);
            children.push(self.expect_identifier("a subroutine name")?);
        }
        children.push(self.expect_symbol('(')?);
        children.push(self.expression_list()?);
        children.push(self.expect_symbol(')')?);
        Ok(())
    }

    /// `'{' statements '}'`
    fn block(&mut self, children: &mut Vec<Node>) -> AnalyzerResult<()> {
        children.push(self.expect_symbol('{')?);
        children.push(self.statements()?);
        children.push(self.expect_symbol('}')?);
        Ok(())
    }

    /// `varName (',' varName)* ';'`
    fn var_names(&mut self, children: &mut Vec<Node>) -> AnalyzerResult<()> {
        children.push(self.expect_identifier("a variable name")?);
        while self.peek("`,` or `;`")?.is_symbol(',') {
            children.push(self.advance()?);
            children.push(self.expect_identifier("a variable name")?);
        }
        children.push(self.expect_symbol(';')?);
        Ok(())
    }

    /// `'int' | 'char' | 'boolean' | className`, plus `'void'` for return types.
    fn type_name(&mut self, allow_void: bool) -> AnalyzerResult<Node> {
        let tok = self.peek("a type")?;
        match (tok.kind, tok.keyword()) {
            (TokenKind::Identifier, _)
            | (_, Some(Keyword::Int))
            | (_, Some(Keyword::Char))
            | (_, Some(Keyword::Boolean)) => self.advance(),
            (_, Some(Keyword::Void)) if allow_void => self.advance(),
            _ => Err(self.unexpected(tok, if allow_void { "a type or `void`" } else { "a type" })),
        }
    }

    fn expect_symbol(&mut self, sym: char) -> AnalyzerResult<Node> {
        let expected = format!("`{}`", sym);
        let tok = self.peek(&expected)?;
        if tok.is_symbol(sym) {
            self.advance()
        } else {
            Err(self.unexpected(tok, &expected))
        }
    }

    fn expect_keyword(&mut self, keywords: &[Keyword], expected: &str) -> AnalyzerResult<Node> {
        let tok = self.peek(expected)?;
        match tok.keyword() {
            Some(kw) if keywords.contains(&kw) => self.advance(),
            _ => Err(self.unexpected(tok, expected)),
        }
    }

    fn expect_identifier(&mut self, expected: &str) -> AnalyzerResult<Node> {
        let tok = self.peek(expected)?;
        match tok.kind {
            TokenKind::Identifier => self.advance(),
            _ => Err(self.unexpected(tok, expected)),
        }
    }

    /// Returns the current token without consuming it.
    fn peek(&self, expected: &str) -> AnalyzerResult<&'a Token> {
        let tokens: &'a [Token] = self.tokens;
        tokens.get(self.position).ok_or_else(|| AnalyzerError::PrematureEnd {
            position: self.position,
            expected: expected.to_owned(),
        })
    }

    /// Consumes the current token as a leaf.
    fn advance(&mut self) -> AnalyzerResult<Node> {
        let tok = self.peek("a token")?;
        self.position += 1;
        Ok(Node::Leaf(tok.clone()))
    }

    /// Runs a production one nesting level deeper.
    fn nested<F>(&mut self, production: F) -> AnalyzerResult<Node>
    where
        F: FnOnce(&mut Self) -> AnalyzerResult<Node>,
    {
        if self.depth >= MAX_DEPTH {
            let line = self
                .tokens
                .get(self.position)
                .or_else(|| self.tokens.last())
                .map_or(0, |t| t.line);
            return Err(AnalyzerError::NestingTooDeep { limit: MAX_DEPTH, line, position: self.position });
        }

        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    fn unexpected(&self, tok: &Token, expected: &str) -> AnalyzerError {
        AnalyzerError::UnexpectedToken {
            kind: tok.kind.to_string(),
            lexeme: tok.lexeme.clone(),
            line: tok.line,
            position: self.position,
            expected: expected.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::lexer::tokenize;

    fn lex(src: &str) -> Vec<Token> {
        tokenize::<>(Box::new(src.as_bytes())).unwrap()
    }

    /// Compact rendering: `label(child child ...)` with leaves as their text.
    fn shape(node: &Node) -> String {
        match node {
            Node::Leaf(tok) => tok.lexeme.clone(),
            Node::Branch(label, children) => format!(
                "{}({})",
                label,
                children.iter().map(shape).collect::<Vec<_>>().join(" ")
            ),
        }
    }

    #[test]
    fn test_expression_stops_before_terminator() {
        let tokens = lex("1 + 2 )");
        let mut parser = Parser::new(&tokens);

        let tree = parser.expression().unwrap();
        assert_eq!(shape(&tree), "expression(term(1) + term(2))");
        assert_eq!(parser.position(), 3);
        assert!(tokens[parser.position()].is_symbol(')'));

        for terminator in &["]", ";", ","] {
            let tokens = lex(&format!("a * b {}", terminator));
            let mut parser = Parser::new(&tokens);
            parser.expression().unwrap();
            assert_eq!(parser.position(), 3);
        }
    }

    #[test]
    fn test_minus_disambiguation() {
        let tokens = lex("-1;");
        let tree = Parser::new(&tokens).expression().unwrap();
        assert_eq!(shape(&tree), "expression(term(- term(1)))");

        let tokens = lex("5 - 1;");
        let tree = Parser::new(&tokens).expression().unwrap();
        assert_eq!(shape(&tree), "expression(term(5) - term(1))");

        let tokens = lex("5 - -1;");
        let tree = Parser::new(&tokens).expression().unwrap();
        assert_eq!(shape(&tree), "expression(term(5) - term(- term(1)))");

        let tokens = lex("~-x;");
        let tree = Parser::new(&tokens).expression().unwrap();
        assert_eq!(shape(&tree), "expression(term(~ term(- term(x))))");
    }

    #[test]
    fn test_let_statement() {
        let tokens = lex("let x = -1;");
        let tree = Parser::new(&tokens).let_statement().unwrap();
        assert_eq!(shape(&tree), "letStatement(let x = expression(term(- term(1))) ;)");

        let tokens = lex("let arr[3] = 5;");
        let mut parser = Parser::new(&tokens);
        let tree = parser.let_statement().unwrap();
        assert_eq!(
            shape(&tree),
            "letStatement(let arr [ expression(term(3)) ] = expression(term(5)) ;)"
        );
        assert_eq!(parser.position(), tokens.len());
    }

    #[test]
    fn test_do_statement() {
        let tokens = lex("do Output.printInt(x+1);");
        let tree = Parser::new(&tokens).do_statement().unwrap();
        assert_eq!(
            shape(&tree),
            "doStatement(do Output . printInt ( expressionList(expression(term(x) + term(1))) ) ;)"
        );

        let tokens = lex("do draw();");
        let tree = Parser::new(&tokens).do_statement().unwrap();
        assert_eq!(shape(&tree), "doStatement(do draw ( expressionList() ) ;)");
    }

    #[test]
    fn test_terms() {
        let cases = vec![
            ("\"hi there\";", "term(hi there)"),
            ("true;", "term(true)"),
            ("this;", "term(this)"),
            ("a[i + 1];", "term(a [ expression(term(i) + term(1)) ])"),
            ("(x);", "term(( expression(term(x)) ))"),
            ("f(1, y);", "term(f ( expressionList(expression(term(1)) , expression(term(y))) ))"),
            ("Math.max(a, b);", "term(Math . max ( expressionList(expression(term(a)) , expression(term(b))) ))"),
        ];
        for (src, expected) in cases {
            let tokens = lex(src);
            let mut parser = Parser::new(&tokens);
            assert_eq!(shape(&parser.term().unwrap()), expected, "for {}", src);
            assert!(tokens[parser.position()].is_symbol(';'));
        }

        let tokens = lex("let;");
        assert!(matches!(
            Parser::new(&tokens).term(),
            Err(AnalyzerError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_nested_parentheses() {
        let tokens = lex("(a + (b * c)) < d;");
        let tree = Parser::new(&tokens).expression().unwrap();
        assert_eq!(
            shape(&tree),
            "expression(term(( expression(term(a) + term(( expression(term(b) * term(c)) ))) )) < term(d))"
        );
    }

    #[test]
    fn test_if_else_and_while() {
        let tokens = lex("if (x) { let y = 1; } else { return; } while (y) { do f(); }");
        let mut parser = Parser::new(&tokens);

        let tree = parser.if_statement().unwrap();
        assert_eq!(
            shape(&tree),
            "ifStatement(if ( expression(term(x)) ) { statements(letStatement(let y = expression(term(1)) ;)) } \
             else { statements(returnStatement(return ;)) })"
        );
        assert!(tokens[parser.position()].is_keyword(Keyword::While));

        let tree = parser.while_statement().unwrap();
        assert_eq!(
            shape(&tree),
            "whileStatement(while ( expression(term(y)) ) { statements(doStatement(do f ( expressionList() ) ;)) })"
        );
        assert_eq!(parser.position(), tokens.len());
    }

    #[test]
    fn test_if_without_else() {
        let tokens = lex("if (x) { } return;");
        let mut parser = Parser::new(&tokens);
        let tree = parser.if_statement().unwrap();
        assert_eq!(shape(&tree), "ifStatement(if ( expression(term(x)) ) { statements() })");
        assert!(tokens[parser.position()].is_keyword(Keyword::Return));
    }

    #[test]
    fn test_statements_stop_before_brace() {
        let tokens = lex("let a = 1; return a; }");
        let mut parser = Parser::new(&tokens);
        let tree = parser.statements().unwrap();
        assert_eq!(tree.children().len(), 2);
        assert_eq!(parser.position(), tokens.len() - 1);
    }

    #[test]
    fn test_empty_parameter_list() {
        let tokens = lex("function void f ( ) { return; }");
        let tree = Parser::new(&tokens).subroutine_dec().unwrap();
        assert_eq!(
            shape(&tree),
            "subroutineDec(function void f ( parameterList() ) \
             subroutineBody({ statements(returnStatement(return ;)) }))"
        );
    }

    #[test]
    fn test_declarations() {
        let tokens = lex("field int x, y; static Array cache;");
        let mut parser = Parser::new(&tokens);
        assert_eq!(shape(&parser.class_var_dec().unwrap()), "classVarDec(field int x , y ;)");
        assert_eq!(shape(&parser.class_var_dec().unwrap()), "classVarDec(static Array cache ;)");

        let tokens = lex("method boolean eq(Point other, int n) { var char c; var int i, j; return true; }");
        let tree = Parser::new(&tokens).subroutine_dec().unwrap();
        assert_eq!(
            shape(&tree),
            "subroutineDec(method boolean eq ( parameterList(Point other , int n) ) \
             subroutineBody({ varDec(var char c ;) varDec(var int i , j ;) \
             statements(returnStatement(return expression(term(true)) ;)) }))"
        );

        let tokens = lex("field void x;");
        assert!(matches!(
            Parser::new(&tokens).class_var_dec(),
            Err(AnalyzerError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_run_consumes_every_token() {
        let src = "
        class Point {
            field int x, y;
            static int count;

            constructor Point new(int ax, int ay) {
                let x = ax;
                let y = ay;
                let count = count + 1;
                return this;
            }

            method int dist(Point o) {
                var int dx;
                let dx = x - o.getX();
                if (dx < 0) { let dx = -dx; }
                return Math.sqrt((dx * dx) & ~0);
            }
        }
        ";
        let tokens = lex(src);
        let tree = Parser::new(&tokens).run().unwrap();

        assert_eq!(tree.label(), Some(Label::Class));
        let leaves = tree.tokens();
        assert_eq!(leaves.len(), tokens.len());
        assert!(leaves.iter().zip(tokens.iter()).all(|(a, b)| *a == b));

        let kids: Vec<Option<Label>> = tree.children().iter().map(|n| n.label()).collect();
        assert_eq!(
            kids,
            vec![
                None,
                None,
                None,
                Some(Label::ClassVarDec),
                Some(Label::ClassVarDec),
                Some(Label::SubroutineDec),
                Some(Label::SubroutineDec),
                None,
            ]
        );
    }

    #[test]
    fn test_errors() {
        // Missing closing brace of the class.
        let tokens = lex("class A { function void f() { return; }");
        match Parser::new(&tokens).run() {
            Err(AnalyzerError::PrematureEnd { position, .. }) => assert_eq!(position, tokens.len()),
            other => panic!("expected premature end, got {:?}", other),
        }

        // Not a statement keyword.
        let tokens = lex("class A { function void f() { var int x; foo; } }");
        match Parser::new(&tokens).run() {
            Err(AnalyzerError::UnexpectedToken { lexeme, position, .. }) => {
                assert_eq!(lexeme, "foo");
                assert_eq!(position, 13);
            }
            other => panic!("expected unexpected token, got {:?}", other),
        }

        // Trailing tokens after the class.
        let tokens = lex("class A { } class B { }");
        match Parser::new(&tokens).run() {
            Err(AnalyzerError::UnexpectedToken { lexeme, position, .. }) => {
                assert_eq!(lexeme, "class");
                assert_eq!(position, 4);
            }
            other => panic!("expected unexpected token, got {:?}", other),
        }

        // Missing semicolon.
        let tokens = lex("class A { function void f() { let x = 1 } }");
        assert!(matches!(
            Parser::new(&tokens).run(),
            Err(AnalyzerError::UnexpectedToken { .. })
        ));

        let tokens: Vec<Token> = Vec::new();
        assert!(matches!(
            Parser::new(&tokens).run(),
            Err(AnalyzerError::PrematureEnd { position: 0, .. })
        ));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{};", "(".repeat(20), ")".repeat(20));
        let tokens = lex(&deep);
        assert!(Parser::new(&tokens).expression().is_ok());

        let too_deep = format!("{}1{};", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        let tokens = lex(&too_deep);
        assert!(matches!(
            Parser::new(&tokens).expression(),
            Err(AnalyzerError::NestingTooDeep { limit: MAX_DEPTH, .. })
        ));

        let minuses = format!("{}1;", "-".repeat(MAX_DEPTH * 2));
        let tokens = lex(&minuses);
        assert!(matches!(
            Parser::new(&tokens).expression(),
            Err(AnalyzerError::NestingTooDeep { .. })
        ));
    }
}
