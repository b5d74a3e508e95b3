//! Definition patterns over one statement
//!
//! The extractor collects the significant tokens of a statement (everything since the last
//! `;`, `{` or `}` at the current scope) and, when the statement ends, asks the functions
//! here what it was. They look at token shapes only: no types are resolved and nothing is
//! looked up, so each answer is a best guess for C-family code that compiles.
//!
//! All functions take a normalized statement (see [normalize]) as a slice of token
//! references and report positions as indices into that slice.

use crate::lexer::{Token, TokenKind};
use crate::lines::Position;
use crate::symbols::SymbolKind;

/// Statement-level keywords that never start a declaration.
const NOT_A_DECLARATION: &[&str] = &[
    "typedef",
    "using",
    "friend",
    "static_assert",
    "_Static_assert",
    "namespace",
    "template",
    "return",
    "goto",
    "break",
    "continue",
    "throw",
    "delete",
    "case",
    "default",
    "else",
    "do",
    "if",
    "while",
    "for",
    "switch",
    "asm",
    "operator",
];

/// Specifiers that may precede a class-key.
const CLASS_PREFIX: &[&str] = &[
    "typedef",
    "export",
    "static",
    "const",
    "volatile",
    "inline",
    "extern",
    "constexpr",
];

const ATTRIBUTE_WORDS: &[&str] = &[
    "__attribute__",
    "__attribute",
    "__declspec",
    "alignas",
    "_Alignas",
    "__asm__",
    "__asm",
];

/// Words that may follow a C++ parameter list.
const TRAILING_QUALIFIERS: &[&str] = &[
    "const", "volatile", "noexcept", "override", "final", "throw", "try",
];

const TYPE_OPERATORS: &[&str] = &["decltype", "sizeof", "alignof", "typeof", "__typeof__"];

/// A name found by a pattern, with the qualifiers written in front of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NameMatch {
    pub name: String,
    pub qualifiers: Vec<String>,
    pub span: std::ops::Range<usize>,
    pub start: Position,
}

impl NameMatch {
    fn new(stmt: &[&Token<'_>], first: usize, last: usize, qualifiers: Vec<String>) -> Self {
        let name = join_name(&stmt[first..=last]);
        Self {
            name,
            qualifiers,
            span: stmt[first].range.span.start..stmt[last].range.span.end,
            start: stmt[first].start(),
        }
    }
}

/// Result of a statement that ended in `;`.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Declaration {
    Variables(Vec<NameMatch>),
    /// A function declaration without a body
    Prototype,
    Other,
}

fn is_word(token: &Token<'_>) -> bool {
    matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword)
}

/// Tokens that can close the type part of a declaration.
fn is_type_like(token: &Token<'_>) -> bool {
    is_word(token) || token.is_op(">") || token.is_op(">>") || token.is_op("}")
}

fn bracket_delta(token: &Token<'_>) -> i32 {
    if token.kind != TokenKind::Operator {
        return 0;
    }
    match token.lexeme {
        "(" | "[" | "{" => 1,
        ")" | "]" | "}" => -1,
        _ => 0,
    }
}

/// Indices of tokens outside any bracket group. The opening bracket of a top-level group is
/// included, its closing bracket is not.
fn top_level(stmt: &[&Token<'_>]) -> Vec<usize> {
    let mut depth = 0;
    let mut out = Vec::new();
    for (i, token) in stmt.iter().enumerate() {
        let delta = bracket_delta(token);
        if depth == 0 && delta >= 0 {
            out.push(i);
        }
        depth = (depth + delta).max(0);
    }
    out
}

fn matching_close(stmt: &[&Token<'_>], open: usize) -> Option<usize> {
    let mut depth = 0;
    for (i, token) in stmt.iter().enumerate().skip(open) {
        depth += bracket_delta(token);
        if depth == 0 {
            return Some(i);
        }
    }
    None
}

fn closing_angle(stmt: &[&Token<'_>], open: usize) -> Option<usize> {
    let (mut depth, mut nested) = (0, 0);
    for (i, token) in stmt.iter().enumerate().skip(open) {
        nested += bracket_delta(token);
        if nested != 0 || token.kind != TokenKind::Operator {
            continue;
        }
        match token.lexeme {
            "<" => depth += 1,
            ">" => depth -= 1,
            ">>" => depth -= 2,
            _ => continue,
        }
        if depth <= 0 {
            return Some(i);
        }
    }
    None
}

fn opening_angle(stmt: &[&Token<'_>], close: usize) -> Option<usize> {
    let (mut depth, mut nested) = (0, 0);
    for i in (0..=close).rev() {
        let token = stmt[i];
        nested -= bracket_delta(token);
        if nested != 0 || token.kind != TokenKind::Operator {
            continue;
        }
        match token.lexeme {
            ">" => depth += 1,
            ">>" => depth += 2,
            "<" => depth -= 1,
            _ => continue,
        }
        if depth <= 0 {
            return Some(i);
        }
    }
    None
}

/// Drop attribute groups (`[[...]]`, `__attribute__((...))`, `alignas(...)`) so they do not
/// look like parameter lists.
pub(crate) fn normalize<'t, 'src>(stmt: &'t [Token<'src>]) -> Vec<&'t Token<'src>> {
    let all: Vec<&Token> = stmt.iter().collect();
    let mut out = Vec::with_capacity(all.len());
    let mut i = 0;
    while i < all.len() {
        let token = all[i];
        let next_is = |op: &str| all.get(i + 1).is_some_and(|t| t.is_op(op));
        let group = if token.is_op("[") && next_is("[") {
            matching_close(&all, i)
        } else if is_word(token) && ATTRIBUTE_WORDS.contains(&token.lexeme) && next_is("(") {
            matching_close(&all, i + 1)
        } else {
            None
        };
        match group {
            Some(close) => i = close + 1,
            None => {
                out.push(token);
                i += 1;
            }
        }
    }
    out
}

/// Skip leading `template<...>` runs. Returns where the rest of the statement starts and
/// whether anything was skipped.
pub(crate) fn strip_templates(stmt: &[&Token<'_>]) -> (usize, bool) {
    let mut start = 0;
    while stmt.get(start).is_some_and(|t| t.is_keyword("template"))
        && stmt.get(start + 1).is_some_and(|t| t.is_op("<"))
    {
        match closing_angle(stmt, start + 1) {
            Some(close) => start = close + 1,
            None => break,
        }
    }
    (start, start > 0)
}

/// Walk back over `A::B<T>::` in front of the name starting at `first`. Returns the
/// qualifier names, outermost first, and the index where the qualified name begins.
fn qualifiers(stmt: &[&Token<'_>], first: usize) -> (Vec<String>, usize) {
    let mut names = Vec::new();
    let mut k = first;
    while k >= 2 && stmt[k - 1].is_op("::") {
        let mut q = k - 2;
        if stmt[q].is_op(">") || stmt[q].is_op(">>") {
            match opening_angle(stmt, q) {
                Some(open) if open >= 1 => q = open - 1,
                _ => break,
            }
        }
        if stmt[q].kind != TokenKind::Identifier {
            break;
        }
        names.insert(0, stmt[q].lexeme.to_string());
        k = q;
    }
    if k >= 1 && stmt[k - 1].is_op("::") {
        k -= 1;
    }
    (names, k)
}

/// `operator new[]`, `operator==`, `~Widget`: words are separated by one space, symbols are
/// glued on.
fn join_name(tokens: &[&Token<'_>]) -> String {
    let mut name = String::new();
    let mut previous_word = false;
    for token in tokens {
        let word = is_word(token);
        if word && previous_word {
            name.push(' ');
        }
        name.push_str(token.lexeme);
        previous_word = word;
    }
    name
}

/// Statement text with every run of trivia between tokens collapsed to one space.
pub(crate) fn signature(stmt: &[&Token<'_>]) -> String {
    let mut text = String::new();
    let mut previous_end = None;
    for token in stmt {
        if previous_end.is_some_and(|end| end < token.range.span.start) {
            text.push(' ');
        }
        text.push_str(token.lexeme);
        previous_end = Some(token.range.span.end);
    }
    text
}

/// `namespace a::b` and `inline namespace v1`. `Some(None)` is an anonymous namespace.
pub(crate) fn namespace_pattern(stmt: &[&Token<'_>]) -> Option<Option<NameMatch>> {
    let keyword = usize::from(stmt.first()?.is_keyword("inline"));
    if !stmt.get(keyword)?.is_keyword("namespace") {
        return None;
    }
    // `a::b::c`; anything after the name (a visibility macro) is ignored
    let mut names = Vec::new();
    let mut i = keyword + 1;
    while stmt.get(i).is_some_and(|t| t.kind == TokenKind::Identifier) {
        names.push(i);
        if !stmt.get(i + 1).is_some_and(|t| t.is_op("::")) {
            break;
        }
        i += 2;
    }
    let Some((&last, outer)) = names.split_last() else {
        return Some(None);
    };
    let qualifiers = outer.iter().map(|&i| stmt[i].lexeme.to_string()).collect();
    Some(Some(NameMatch::new(stmt, last, last, qualifiers)))
}

/// `extern "C" {`
pub(crate) fn is_extern_block(stmt: &[&Token<'_>]) -> bool {
    stmt.len() == 2 && stmt[0].is_keyword("extern") && stmt[1].kind == TokenKind::String
}

/// A top-level `=` that is not part of `operator=`.
pub(crate) fn has_initializer(stmt: &[&Token<'_>]) -> bool {
    top_level(stmt)
        .into_iter()
        .any(|i| stmt[i].is_op("=") && !(i > 0 && stmt[i - 1].is_keyword("operator")))
}

/// The `{` after `Widget::Widget() : member` opens a brace initializer, not a body.
pub(crate) fn in_member_init_list(stmt: &[&Token<'_>]) -> bool {
    let Some(last) = stmt.last() else {
        return false;
    };
    if last.kind != TokenKind::Identifier && !last.is_op(">") && !last.is_op(">>") {
        return false;
    }
    let top = top_level(stmt);
    let Some(open) = top.iter().copied().find(|&i| stmt[i].is_op("(")) else {
        return false;
    };
    let Some(close) = matching_close(stmt, open) else {
        return false;
    };
    top.into_iter().any(|i| i > close && stmt[i].is_op(":"))
}

/// `Type name {` with no parameter list: a brace-initialized variable.
pub(crate) fn is_brace_init(stmt: &[&Token<'_>]) -> bool {
    stmt.len() >= 2
        && stmt.last().is_some_and(|t| t.kind == TokenKind::Identifier)
        && !top_level(stmt).into_iter().any(|i| stmt[i].is_op("("))
}

/// `class`/`struct`/`union`/`enum` heads. The inner option is the name, absent for anonymous
/// types.
pub(crate) fn class_pattern(
    stmt: &[&Token<'_>],
    classes: bool,
    qualified_names: bool,
) -> Option<(SymbolKind, Option<NameMatch>)> {
    let mut i = 0;
    while stmt
        .get(i)
        .is_some_and(|t| t.kind == TokenKind::Keyword && CLASS_PREFIX.contains(&t.lexeme))
    {
        i += 1;
    }
    let key = stmt.get(i)?;
    if key.kind != TokenKind::Keyword {
        return None;
    }
    let kind = match key.lexeme {
        "class" if classes => SymbolKind::Class,
        "struct" => SymbolKind::Struct,
        "union" => SymbolKind::Union,
        "enum" => SymbolKind::Enum,
        _ => return None,
    };
    i += 1;
    if kind == SymbolKind::Enum
        && stmt
            .get(i)
            .is_some_and(|t| t.is_keyword("class") || t.is_keyword("struct"))
    {
        i += 1;
    }

    // The name is the last identifier before the base list
    let end = (i..stmt.len())
        .find(|&j| stmt[j].is_op(":"))
        .unwrap_or(stmt.len());
    if stmt[i..end]
        .iter()
        .any(|t| t.is_op("(") || t.is_op("=") || t.is_op(";"))
    {
        return None;
    }
    let mut last = end;
    while last > i
        && stmt[last - 1].kind == TokenKind::Identifier
        && stmt[last - 1].lexeme == "final"
    {
        last -= 1;
    }
    if last > i && (stmt[last - 1].is_op(">") || stmt[last - 1].is_op(">>")) {
        last = opening_angle(stmt, last - 1)?;
    }
    if last <= i || stmt[last - 1].kind != TokenKind::Identifier {
        return Some((kind, None));
    }
    let name = last - 1;
    let (quals, _) = if qualified_names {
        qualifiers(stmt, name)
    } else {
        (Vec::new(), name)
    };
    Some((kind, Some(NameMatch::new(stmt, name, name, quals))))
}

/// What one scan for a function head found.
enum Head {
    Name(NameMatch),
    /// `MACRO(args)` in front of the real head; the scan resumes after this index
    MacroCall(usize),
}

/// The name in front of the first top-level parameter list, if the statement reads as a
/// function head. Without a return type the name must be qualified or sit in a class body.
/// Leading `MACRO(args)` groups are skipped: `DECLARE_THING(x) int helper(void)`.
pub(crate) fn function_pattern(
    stmt: &[&Token<'_>],
    in_class: bool,
    qualified_names: bool,
) -> Option<NameMatch> {
    let top = top_level(stmt);
    let mut from = 0;
    loop {
        let rest = &top[top.partition_point(|&i| i < from)..];
        match function_head(stmt, from, rest, in_class, qualified_names)? {
            Head::Name(found) => return Some(found),
            Head::MacroCall(close) => from = close + 1,
        }
    }
}

/// Scan `stmt[from..]`; `top` holds its top-level indices.
fn function_head(
    stmt: &[&Token<'_>],
    from: usize,
    top: &[usize],
    in_class: bool,
    qualified_names: bool,
) -> Option<Head> {
    let mut operator = None;
    let mut paren = None;
    let mut candidates = top.iter().copied().peekable();
    while let Some(i) = candidates.next() {
        let token = stmt[i];
        if token.is_keyword("operator") && operator.is_none() {
            operator = Some(i);
            // operator() names itself with an empty pair of parentheses
            if stmt.get(i + 1).is_some_and(|t| t.is_op("("))
                && stmt.get(i + 2).is_some_and(|t| t.is_op(")"))
            {
                while candidates.peek().is_some_and(|&j| j <= i + 2) {
                    candidates.next();
                }
            }
            continue;
        }
        if token.is_op("(") && !(i > from && TYPE_OPERATORS.contains(&stmt[i - 1].lexeme)) {
            paren = Some(i);
            break;
        }
    }
    let paren = paren?;
    if paren == from {
        return None;
    }

    let (first, last) = match operator {
        Some(op) => (op, paren - 1),
        None => {
            let last = paren - 1;
            if stmt[last].kind != TokenKind::Identifier {
                return None;
            }
            if last > from && stmt[last - 1].is_op("~") {
                (last - 1, last)
            } else {
                (last, last)
            }
        }
    };

    let (quals, start) = if qualified_names {
        let (quals, start) = qualifiers(&stmt[from..], first - from);
        (quals, start + from)
    } else {
        (Vec::new(), first)
    };
    let head = &stmt[from..start];
    if head
        .first()
        .is_some_and(|t| t.kind == TokenKind::Keyword && NOT_A_DECLARATION.contains(&t.lexeme))
    {
        return None;
    }
    if head.iter().any(|t| is_type_like(t)) || !quals.is_empty() || in_class {
        return Some(Head::Name(NameMatch::new(stmt, first, last, quals)));
    }

    // An unterminated macro call in front of the real head
    if start == from && first == last {
        return matching_close(stmt, paren).map(Head::MacroCall);
    }
    None
}

/// `int f(a, b) int a; char *b;`: an old-style head whose parameter list holds bare names,
/// followed by the parameter declarations. Returns the function name and the index of the
/// `)` closing the name list.
pub(crate) fn old_style_head(
    stmt: &[&Token<'_>],
    qualified_names: bool,
) -> Option<(NameMatch, usize)> {
    let paren = stmt.iter().position(|t| t.is_op("("))?;
    let close = matching_close(stmt, paren)?;
    let params = &stmt[paren + 1..close];
    if params.is_empty() || close + 1 == stmt.len() || params.len() % 2 == 0 {
        return None;
    }
    let names_only = params.iter().enumerate().all(|(i, t)| {
        if i % 2 == 0 {
            t.kind == TokenKind::Identifier
        } else {
            t.is_op(",")
        }
    });
    let after = stmt[close + 1];
    if !names_only || !is_word(after) || TRAILING_QUALIFIERS.contains(&after.lexeme) {
        return None;
    }
    let found = function_pattern(&stmt[..=close], false, qualified_names)?;
    Some((found, close))
}

/// Split a statement into declarators at top-level commas. Commas inside template argument
/// lists of the type part do not split.
fn declarators(stmt: &[&Token<'_>]) -> Vec<std::ops::Range<usize>> {
    let mut parts = Vec::new();
    let mut from = 0;
    let mut angles: i32 = 0;
    let mut in_initializer = false;
    for i in top_level(stmt) {
        let token = stmt[i];
        if token.kind != TokenKind::Operator {
            continue;
        }
        match token.lexeme {
            "=" => in_initializer = true,
            "<" if !in_initializer && i > 0 && stmt[i - 1].kind == TokenKind::Identifier => {
                angles += 1
            }
            ">" if !in_initializer && angles > 0 => angles -= 1,
            ">>" if !in_initializer && angles > 0 => angles = (angles - 2).max(0),
            "," if angles == 0 => {
                parts.push(from..i);
                from = i + 1;
                in_initializer = false;
            }
            _ => {}
        }
    }
    parts.push(from..stmt.len());
    parts
}

/// Where the declared name ends: before `=`, `{`, `[` or a bit-field `:`.
fn name_end(decl: &[&Token<'_>]) -> (usize, bool) {
    let mut has_params = false;
    for i in top_level(decl) {
        let token = decl[i];
        if token.is_op("=") || token.is_op("{") || token.is_op("[") || token.is_op(":") {
            return (i, has_params);
        }
        if token.is_op("(") && !(i > 0 && TYPE_OPERATORS.contains(&decl[i - 1].lexeme)) {
            has_params = true;
        }
    }
    (decl.len(), has_params)
}

/// Classify a statement that ended in `;`.
pub(crate) fn declaration(stmt: &[&Token<'_>], qualified_names: bool) -> Declaration {
    let Some(first) = stmt.first() else {
        return Declaration::Other;
    };
    if first.kind == TokenKind::Keyword && NOT_A_DECLARATION.contains(&first.lexeme) {
        return Declaration::Other;
    }
    let parts = declarators(stmt);
    let is_extern = stmt.iter().any(|t| t.is_keyword("extern"));
    if is_extern && !has_initializer(stmt) {
        return Declaration::Other;
    }

    let mut found = Vec::new();
    for (n, part) in parts.into_iter().enumerate() {
        let offset = part.start;
        let decl = &stmt[part];
        let (end, has_params) = name_end(decl);
        if has_params {
            if n == 0 {
                return Declaration::Prototype;
            }
            continue;
        }
        let Some(name) = end.checked_sub(1) else {
            continue;
        };
        if decl[name].kind != TokenKind::Identifier {
            continue;
        }
        let (quals, start) = if qualified_names {
            qualifiers(decl, name)
        } else {
            (Vec::new(), name)
        };
        if n == 0 {
            let head = &decl[..start];
            if !head.iter().any(|t| is_type_like(t)) {
                return Declaration::Other;
            }
            // `struct Foo;` and `enum class E;` are forward declarations
            if head.last().is_some_and(|t| {
                t.kind == TokenKind::Keyword
                    && matches!(t.lexeme, "class" | "struct" | "union" | "enum")
            }) {
                return Declaration::Other;
            }
        }
        found.push(NameMatch::new(stmt, offset + name, offset + name, quals));
    }
    Declaration::Variables(found)
}
