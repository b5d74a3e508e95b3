//! Symbol extraction over a token stream
//!
//! The extractor is a small state machine, not a parser. It keeps:
//!
//! - a stack of scope frames, one per open `{`, naming the namespace or class it belongs
//!   to when known. Every `{` pushes a frame and every `}` pops one, so brace balance
//!   survives anything the patterns fail to recognize.
//! - the significant tokens of the current statement. When the statement ends at `{` or
//!   `;` the patterns in [patterns](super::patterns) decide what it declared.
//! - the preprocessor directive being read, if any. Directives never touch the statement
//!   or the brace stack.
//!
//! Function bodies, enum bodies and brace initializers are opaque: inside them only braces
//! and directives are tracked, so local variables and enumerators are not reported.
//! Definitions are emitted as soon as their opening brace (or terminating `;`) is seen; a
//! function prototype ends in `;` without a body and is dropped.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::Diagnostic;
use crate::lexer::{Token, TokenKind};
use crate::lines::{LineTable, Position};
use crate::profile::LanguageProfile;
use crate::symbols::patterns::{self, Declaration, NameMatch};
use crate::symbols::{SymbolDefinition, SymbolKind};

/// A recovered problem found while extracting, located by byte span and wide line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternDiagnostic {
    pub diagnostic: Diagnostic,
    pub span: std::ops::Range<usize>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Namespace,
    Class,
    ExternC,
    Function,
    Enum,
    Initializer,
    Block,
}

/// Statement to resume when a frame closes: `struct S { ... } s;`, `int a[] = { ... };`
#[derive(Debug)]
struct Resume<'src> {
    tokens: Vec<Token<'src>>,
    open: Token<'src>,
    paren_depth: usize,
}

#[derive(Debug)]
struct Frame<'src> {
    kind: FrameKind,
    names: Vec<String>,
    opaque: bool,
    resume: Option<Resume<'src>>,
}

impl<'src> Frame<'src> {
    fn new(kind: FrameKind, names: Vec<String>, opaque: bool) -> Self {
        Self {
            kind,
            names,
            opaque,
            resume: None,
        }
    }
}

/// `int f(a) int a;` waiting for the `{` that follows its parameter declarations.
#[derive(Debug)]
struct OldStyleHead {
    found: NameMatch,
    scope: Vec<String>,
    templated: bool,
    signature: String,
}

/// What an opening brace turned out to open.
enum Opening {
    Block,
    ExternC,
    Namespace(Option<NameMatch>),
    Class(SymbolKind, Option<NameMatch>),
    Function(NameMatch),
    Initializer,
}

pub struct Extractor<'a, 'src, I> {
    tokens: I,
    profile: &'a LanguageProfile,
    lines: Option<&'a LineTable>,
    frames: Vec<Frame<'src>>,
    statement: Vec<Token<'src>>,
    paren_depth: usize,
    directive: Option<Vec<Token<'src>>>,
    old_style: Option<OldStyleHead>,
    after_backslash: bool,
    at_line_start: bool,
    ready: VecDeque<SymbolDefinition>,
    diagnostics: Vec<PatternDiagnostic>,
    finished: bool,
}

impl<'a, 'src, I> Extractor<'a, 'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    pub fn new(tokens: I, profile: &'a LanguageProfile) -> Self {
        Self {
            tokens,
            profile,
            lines: None,
            frames: Vec::new(),
            statement: Vec::new(),
            paren_depth: 0,
            directive: None,
            old_style: None,
            after_backslash: false,
            at_line_start: true,
            ready: VecDeque::new(),
            diagnostics: Vec::new(),
            finished: false,
        }
    }

    /// Report `decl_line` and `column` through `table` instead of the tokens' own wide
    /// positions. Use a narrow table to line up with tools that only break lines on CR/LF.
    pub fn with_line_table(mut self, table: &'a LineTable) -> Self {
        self.lines = Some(table);
        self
    }

    /// Diagnostics recorded so far. Complete only once the iterator is exhausted.
    pub fn take_diagnostics(&mut self) -> Vec<PatternDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn feed(&mut self, token: Token<'src>) {
        if self.directive.is_some() {
            self.feed_directive(token);
            return;
        }
        match token.kind {
            TokenKind::Newline => {
                self.at_line_start = true;
                return;
            }
            TokenKind::Whitespace | TokenKind::Comment(_) => return,
            _ => {}
        }
        let line_start = std::mem::replace(&mut self.at_line_start, false);
        if line_start && token.is_op("#") {
            self.directive = Some(vec![token]);
            self.after_backslash = false;
            return;
        }

        if self.is_opaque() {
            if token.is_op("{") {
                self.frames.push(Frame::new(FrameKind::Block, Vec::new(), true));
            } else if token.is_op("}") {
                self.close_brace(token);
            }
            return;
        }

        if token.kind != TokenKind::Operator {
            self.statement.push(token);
            return;
        }
        match token.lexeme {
            "{" => self.open_brace(token),
            "}" => self.close_brace(token),
            ";" if self.paren_depth == 0 => self.end_statement(),
            ":" if self.paren_depth == 0 && self.is_access_label() => self.statement.clear(),
            "(" => {
                self.paren_depth += 1;
                self.statement.push(token);
            }
            ")" => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                self.statement.push(token);
            }
            _ => self.statement.push(token),
        }
    }

    fn feed_directive(&mut self, token: Token<'src>) {
        let continued = std::mem::replace(
            &mut self.after_backslash,
            token.kind == TokenKind::Other && token.lexeme == "\\",
        );
        match token.kind {
            TokenKind::Newline if !continued => {
                self.finish_directive();
                self.at_line_start = true;
            }
            TokenKind::Newline | TokenKind::Whitespace | TokenKind::Comment(_) => {}
            _ if self.after_backslash => {}
            _ => {
                if let Some(directive) = self.directive.as_mut() {
                    directive.push(token);
                }
            }
        }
    }

    /// `#define NAME` and `#define NAME(args)` report a macro.
    fn finish_directive(&mut self) {
        let Some(directive) = self.directive.take() else {
            return;
        };
        if !self.profile.definitions.macros
            || directive.get(1).map(|t| t.lexeme) != Some("define")
        {
            return;
        }
        let Some(name) = directive.get(2) else {
            return;
        };
        if !matches!(name.kind, TokenKind::Identifier | TokenKind::Keyword) {
            return;
        }
        let tokens: Vec<&Token> = directive.iter().collect();
        let mut end = 3;
        if tokens
            .get(3)
            .is_some_and(|t| t.is_op("(") && t.range.span.start == name.range.span.end)
        {
            end = tokens
                .iter()
                .position(|t| t.is_op(")"))
                .map_or(tokens.len(), |close| close + 1);
        }
        let signature = patterns::signature(&tokens[..end.min(tokens.len())]);
        let found = NameMatch {
            name: name.lexeme.to_string(),
            qualifiers: Vec::new(),
            span: name.span(),
            start: name.start(),
        };
        self.emit(SymbolKind::Macro, found, Vec::new(), false, signature);
    }

    fn is_opaque(&self) -> bool {
        self.frames.last().is_some_and(|f| f.opaque)
    }

    fn in_class(&self) -> bool {
        self.frames.last().is_some_and(|f| f.kind == FrameKind::Class)
    }

    fn scope_path(&self) -> Vec<String> {
        self.frames
            .iter()
            .flat_map(|f| f.names.iter().cloned())
            .collect()
    }

    /// `public:`, `private:`, `protected:` and Qt's `public slots:`
    fn is_access_label(&self) -> bool {
        match self.statement.as_slice() {
            [first] | [first, _] => {
                first.kind == TokenKind::Keyword
                    && matches!(first.lexeme, "public" | "private" | "protected")
            }
            _ => false,
        }
    }

    fn open_brace(&mut self, open: Token<'src>) {
        if let Some(head) = self.old_style.take() {
            if self.statement.is_empty() && self.paren_depth == 0 {
                self.emit(
                    SymbolKind::Function,
                    head.found,
                    head.scope,
                    head.templated,
                    head.signature,
                );
                self.frames
                    .push(Frame::new(FrameKind::Function, Vec::new(), true));
                return;
            }
        }
        let statement = std::mem::take(&mut self.statement);
        let paren_depth = std::mem::replace(&mut self.paren_depth, 0);
        if paren_depth > 0 {
            self.push_resumable(FrameKind::Initializer, Vec::new(), statement, open, paren_depth);
            return;
        }

        let stmt = patterns::normalize(&statement);
        let (start, templated) = if self.profile.definitions.templates {
            patterns::strip_templates(&stmt)
        } else {
            (0, false)
        };
        let body = &stmt[start..];
        let bare = body.is_empty();
        let signature = patterns::signature(body);
        let opening = self.classify_opening(body);

        let scope = self.scope_path();
        match opening {
            // A bare `{` has no declarations worth reporting
            Opening::Block => self.frames.push(Frame::new(FrameKind::Block, Vec::new(), bare)),
            Opening::ExternC => {
                self.frames
                    .push(Frame::new(FrameKind::ExternC, Vec::new(), false))
            }
            Opening::Namespace(None) => {
                self.frames
                    .push(Frame::new(FrameKind::Namespace, Vec::new(), false))
            }
            Opening::Namespace(Some(found)) => {
                let mut names = found.qualifiers.clone();
                names.push(found.name.clone());
                self.emit(SymbolKind::Namespace, found, scope, templated, signature);
                self.frames.push(Frame::new(FrameKind::Namespace, names, false));
            }
            Opening::Class(kind, found) => {
                let names = match found {
                    Some(found) => {
                        let mut names = found.qualifiers.clone();
                        names.push(found.name.clone());
                        self.emit(kind, found, scope, templated, signature);
                        names
                    }
                    None => Vec::new(),
                };
                // Declarators after the body belong to the statement; keep a leading
                // typedef so `typedef struct { ... } name;` stays a typedef.
                let typedef: Vec<Token<'src>> = statement
                    .into_iter()
                    .take(1)
                    .filter(|t| t.is_keyword("typedef"))
                    .collect();
                let frame_kind = if kind == SymbolKind::Enum {
                    FrameKind::Enum
                } else {
                    FrameKind::Class
                };
                self.push_resumable(frame_kind, names, typedef, open, 0);
            }
            Opening::Function(found) => {
                self.emit(SymbolKind::Function, found, scope, templated, signature);
                self.frames
                    .push(Frame::new(FrameKind::Function, Vec::new(), true));
            }
            Opening::Initializer => {
                self.push_resumable(FrameKind::Initializer, Vec::new(), statement, open, 0)
            }
        }
    }

    fn classify_opening(&self, body: &[&Token<'src>]) -> Opening {
        let enabled = self.profile.definitions;
        if body.is_empty() {
            return Opening::Block;
        }
        if enabled.namespaces {
            if let Some(found) = patterns::namespace_pattern(body) {
                return Opening::Namespace(found);
            }
        }
        if patterns::is_extern_block(body) {
            return Opening::ExternC;
        }
        if patterns::in_member_init_list(body) || patterns::has_initializer(body) {
            return Opening::Initializer;
        }
        if let Some((kind, found)) =
            patterns::class_pattern(body, enabled.classes, enabled.qualified_names)
        {
            return Opening::Class(kind, found);
        }
        if let Some(found) =
            patterns::function_pattern(body, self.in_class(), enabled.qualified_names)
        {
            return Opening::Function(found);
        }
        if patterns::is_brace_init(body) {
            return Opening::Initializer;
        }
        Opening::Block
    }

    fn push_resumable(
        &mut self,
        kind: FrameKind,
        names: Vec<String>,
        tokens: Vec<Token<'src>>,
        open: Token<'src>,
        paren_depth: usize,
    ) {
        let opaque = kind != FrameKind::Class;
        let mut frame = Frame::new(kind, names, opaque);
        frame.resume = Some(Resume {
            tokens,
            open,
            paren_depth,
        });
        self.frames.push(frame);
    }

    fn close_brace(&mut self, close: Token<'src>) {
        self.old_style = None;
        let Some(frame) = self.frames.pop() else {
            tracing::trace!(offset = close.range.span.start, "ignoring unbalanced '}}'");
            return;
        };
        match frame.resume {
            Some(resume) => {
                self.statement = resume.tokens;
                if frame.kind == FrameKind::Initializer {
                    self.statement.push(resume.open);
                }
                self.statement.push(close);
                self.paren_depth = resume.paren_depth;
            }
            None => {
                self.statement.clear();
                self.paren_depth = 0;
            }
        }
    }

    fn end_statement(&mut self) {
        let statement = std::mem::take(&mut self.statement);
        if self.old_style.is_some() {
            // A parameter declaration of the pending old-style head
            return;
        }
        let stmt = patterns::normalize(&statement);
        let (start, templated) = if self.profile.definitions.templates {
            patterns::strip_templates(&stmt)
        } else {
            (0, false)
        };
        let body = &stmt[start..];
        match patterns::declaration(body, self.profile.definitions.qualified_names) {
            Declaration::Variables(found) => {
                let signature = patterns::signature(body);
                let scope = self.scope_path();
                for name in found {
                    self.emit(
                        SymbolKind::Variable,
                        name,
                        scope.clone(),
                        templated,
                        signature.clone(),
                    );
                }
            }
            Declaration::Prototype => {
                let qualified_names = self.profile.definitions.qualified_names;
                let old_style = if self.in_class() {
                    None
                } else {
                    patterns::old_style_head(body, qualified_names)
                };
                match old_style {
                    Some((found, close)) => {
                        self.old_style = Some(OldStyleHead {
                            found,
                            scope: self.scope_path(),
                            templated,
                            signature: patterns::signature(&body[..=close]),
                        });
                    }
                    None => tracing::trace!(
                        statement = %patterns::signature(body),
                        "discarding declaration without body"
                    ),
                }
            }
            Declaration::Other => {}
        }
    }

    fn emit(
        &mut self,
        kind: SymbolKind,
        found: NameMatch,
        mut scope_path: Vec<String>,
        templated: bool,
        signature: String,
    ) {
        let Position { line, column } = match self.lines {
            Some(table) => table.position(found.span.start),
            None => found.start,
        };
        scope_path.extend(found.qualifiers);
        self.ready.push_back(SymbolDefinition {
            name: found.name,
            kind,
            decl_line: line,
            column,
            span: found.span,
            scope_path,
            templated,
            signature,
        });
    }

    /// End of input: complete a trailing directive and record patterns that never closed.
    fn finish(&mut self) {
        if self.directive.is_some() {
            self.finish_directive();
        }
        let mut pending: Vec<&[Token<'src>]> = self
            .frames
            .iter()
            .filter(|f| f.kind == FrameKind::Initializer)
            .filter_map(|f| f.resume.as_ref().map(|r| r.tokens.as_slice()))
            .collect();
        if !self.is_opaque() {
            pending.push(&self.statement);
        }
        let incomplete: Vec<PatternDiagnostic> = pending
            .into_iter()
            .filter_map(|tokens| {
                let (first, last) = (tokens.first()?, tokens.last()?);
                Some(PatternDiagnostic {
                    diagnostic: Diagnostic::IncompleteDefinitionPattern,
                    span: first.range.span.start..last.range.span.end,
                    line: first.start().line,
                })
            })
            .collect();
        for diagnostic in &incomplete {
            tracing::trace!(
                line = diagnostic.line,
                "definition pattern cut off by end of input"
            );
        }
        self.diagnostics.extend(incomplete);
    }
}

impl<'a, 'src, I> Iterator for Extractor<'a, 'src, I>
where
    I: Iterator<Item = Token<'src>>,
{
    type Item = SymbolDefinition;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(definition) = self.ready.pop_front() {
                return Some(definition);
            }
            if self.finished {
                return None;
            }
            match self.tokens.next() {
                Some(token) => self.feed(token),
                None => {
                    self.finish();
                    self.finished = true;
                }
            }
        }
    }
}

/// Extract definitions lazily from `tokens` using the patterns `profile` enables.
pub fn extract_definitions<'a, 'src, I>(
    tokens: I,
    profile: &'a LanguageProfile,
) -> Extractor<'a, 'src, I::IntoIter>
where
    I: IntoIterator<Item = Token<'src>>,
{
    Extractor::new(tokens.into_iter(), profile)
}
