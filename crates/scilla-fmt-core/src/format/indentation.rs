//! Context-stack indentation
//!
//! A single left-to-right walk over the token sequence. Block-opening
//! keywords push a [`BlockKind`], closers pop it, and every line's first code
//! token is re-indented to `units * indent_unit` where `units` is the depth of
//! the stack (minus a per-token dedent). Some keywords force a line break in
//! front of themselves, and an address type clause (`ByStr20 with ... end`)
//! is laid out on a single line.
//!
//! Comments are never moved or re-indented and do not change the stack.

use super::FormatOptions;
use super::context::{BlockKind, ContextStack};
use super::pipeline::Rule;
use crate::sequence::TokenSequence;
use crate::token::{Token, TokenKind};

/// The indentation pass.
pub struct Indentation;

impl Rule for Indentation {
    fn name(&self) -> &'static str {
        "indentation"
    }

    fn apply(&self, tokens: &mut TokenSequence, options: &FormatOptions) {
        Walker::new(options).run(tokens);
    }
}

/// What a token does to the stack once its own line has been indented.
#[derive(Debug, Default)]
struct Effect {
    dedent: usize,
    push: Option<BlockKind>,
    opens_inline: bool,
}

impl Effect {
    fn push(block: BlockKind) -> Self {
        Self {
            push: Some(block),
            ..Self::default()
        }
    }

    fn dedent(units: usize) -> Self {
        Self {
            dedent: units,
            ..Self::default()
        }
    }
}

fn is_top_level(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Import
            | TokenKind::Library
            | TokenKind::ScillaVersion
            | TokenKind::Contract
            | TokenKind::Transition
            | TokenKind::Procedure
            | TokenKind::Type
            | TokenKind::Field
    )
}

fn forces_own_line(kind: TokenKind) -> bool {
    is_top_level(kind)
        || matches!(
            kind,
            TokenKind::Match
                | TokenKind::Fun
                | TokenKind::Tfun
                | TokenKind::Let
                | TokenKind::Bar
                | TokenKind::End
        )
}

/// Tokens after which a `let` continues the enclosing binding.
fn continues_binding(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::In
            | TokenKind::Tarrow
            | TokenKind::Arrow
            | TokenKind::Fetch
            | TokenKind::Semicolon
            | TokenKind::Eq
    )
}

fn opener_for(closer: TokenKind) -> Option<BlockKind> {
    match closer {
        TokenKind::Rparen => Some(BlockKind::Paren),
        TokenKind::Rbrace => Some(BlockKind::Brace),
        TokenKind::Rsqb => Some(BlockKind::Bracket),
        _ => None,
    }
}

struct Walker<'a> {
    options: &'a FormatOptions,
    contexts: ContextStack,
    /// Position of the `field` keyword that opened the current `Field` block
    field_keyword: Option<usize>,
    /// Stack depth below the outermost single-line address clause
    inline_base: Option<usize>,
}

impl<'a> Walker<'a> {
    fn new(options: &'a FormatOptions) -> Self {
        Self {
            options,
            contexts: ContextStack::new(),
            field_keyword: None,
            inline_base: None,
        }
    }

    fn run(&mut self, tokens: &mut TokenSequence) {
        let mut i = 0;
        while i < tokens.len() {
            let kind = tokens[i].kind;
            let visited = if kind == TokenKind::Newline {
                self.visit_newline(tokens, i)
            } else if kind.is_code() {
                self.visit_code(tokens, i, kind)
            } else {
                i
            };
            i = visited + 1;
        }
    }

    fn visit_newline(&mut self, tokens: &mut TokenSequence, index: usize) -> usize {
        if self.inline_base.is_none() {
            self.end_of_line(tokens, index);
            return index;
        }

        // join the clause onto one line
        let mut index = index;
        while index > 0 && tokens[index - 1].kind.is_whitespace() {
            tokens.remove(index - 1);
            index -= 1;
        }
        while tokens.kind(index + 1).is_some_and(TokenKind::is_whitespace) {
            tokens.remove(index + 1);
        }
        if let Some(token) = tokens.get_mut(index) {
            *token = Token::synthetic(TokenKind::Whitespace, " ");
        }
        index
    }

    /// Auto-close for the line that ends at `newline`.
    ///
    /// A line ending in a comment leaves the stack alone.
    fn end_of_line(&mut self, tokens: &TokenSequence, newline: usize) {
        let Some(last) = tokens.prev_on_line(newline) else {
            return;
        };
        let last = tokens[last].kind;
        let closes = match self.contexts.base() {
            Some(BlockKind::Let) => last.is_value(),
            Some(BlockKind::Type) => ends_type_alternative(last),
            _ => false,
        };
        if closes {
            tracing::trace!("line ends with {last}, closing {}", self.contexts);
            self.contexts.close_through_bar();
        }
    }

    fn visit_code(&mut self, tokens: &mut TokenSequence, index: usize, kind: TokenKind) -> usize {
        if self.inline_base.is_some() {
            self.visit_inline(tokens, index, kind);
            return index;
        }

        let mut index = index;
        if !tokens.is_first_on_line(index) && self.breaks_before(tokens, index, kind) {
            index = self.break_line(tokens, index);
        }

        let effect = self.enter(tokens, index, kind);
        if tokens.is_first_on_line(index) {
            index = self.indent(tokens, index, effect.dedent);
        }
        if effect.opens_inline {
            self.inline_base = Some(self.contexts.len());
        }
        if let Some(block) = effect.push {
            if block == BlockKind::Field {
                self.field_keyword = Some(index);
            }
            self.contexts.push(block);
        }
        index
    }

    fn visit_inline(&mut self, tokens: &TokenSequence, index: usize, kind: TokenKind) {
        match kind {
            TokenKind::With if follows_address_type(tokens, index) => {
                self.contexts.push(BlockKind::With)
            }
            TokenKind::End => {
                self.contexts.close_block();
                if self
                    .inline_base
                    .is_some_and(|base| self.contexts.len() <= base)
                {
                    self.inline_base = None;
                }
            }
            _ => {}
        }
    }

    fn breaks_before(&self, tokens: &TokenSequence, index: usize, kind: TokenKind) -> bool {
        forces_own_line(kind)
            || tokens
                .prev_code_on_line(index)
                .is_some_and(|prev| tokens[prev].kind == TokenKind::In)
    }

    /// Insert a newline before `index` and return the token's new position.
    fn break_line(&mut self, tokens: &mut TokenSequence, index: usize) -> usize {
        tokens.insert(
            index,
            Token::synthetic(TokenKind::Newline, self.options.newline.clone()),
        );
        self.end_of_line(tokens, index);
        index + 1
    }

    fn enter(&mut self, tokens: &TokenSequence, index: usize, kind: TokenKind) -> Effect {
        match kind {
            TokenKind::Import | TokenKind::Library | TokenKind::ScillaVersion | TokenKind::Contract => {
                self.clear();
                Effect::default()
            }
            TokenKind::Transition => self.enter_top_level(BlockKind::Transition),
            TokenKind::Procedure => self.enter_top_level(BlockKind::Procedure),
            TokenKind::Type => self.enter_top_level(BlockKind::Type),
            TokenKind::Field => self.enter_top_level(BlockKind::Field),
            TokenKind::Match => Effect::push(BlockKind::Match),
            TokenKind::Fun => self.enter_function(BlockKind::Fun),
            TokenKind::Tfun => self.enter_function(BlockKind::Tfun),
            TokenKind::Let => self.enter_let(tokens, index),
            TokenKind::Bar => {
                self.contexts.close_alternative();
                Effect {
                    dedent: usize::from(!self.options.indent_pattern_alternative),
                    push: Some(BlockKind::Bar),
                    opens_inline: false,
                }
            }
            TokenKind::With => {
                if follows_address_type(tokens, index) {
                    Effect {
                        push: Some(BlockKind::With),
                        opens_inline: true,
                        ..Effect::default()
                    }
                } else {
                    if self.contexts.top() == Some(BlockKind::Match) {
                        self.contexts.replace_top(BlockKind::With);
                    }
                    Effect::default()
                }
            }
            TokenKind::End => {
                self.contexts.close_block();
                Effect::default()
            }
            TokenKind::In if self.contexts.top() == Some(BlockKind::Let) => Effect::dedent(1),
            TokenKind::Lparen => Effect::push(BlockKind::Paren),
            TokenKind::Lbrace => Effect::push(BlockKind::Brace),
            TokenKind::Lsqb => Effect::push(BlockKind::Bracket),
            TokenKind::Rparen | TokenKind::Rbrace | TokenKind::Rsqb => {
                match opener_for(kind) {
                    Some(opener) if self.contexts.close_bracket(opener) => Effect::default(),
                    _ => Effect::dedent(1),
                }
            }
            _ => Effect::default(),
        }
    }

    fn clear(&mut self) {
        self.contexts.clear();
        self.field_keyword = None;
    }

    fn enter_top_level(&mut self, block: BlockKind) -> Effect {
        self.clear();
        Effect::push(block)
    }

    /// Curried chains of the same binder share one level.
    fn enter_function(&mut self, block: BlockKind) -> Effect {
        if self.contexts.top() == Some(block) {
            Effect::dedent(1)
        } else {
            Effect::push(block)
        }
    }

    fn enter_let(&mut self, tokens: &TokenSequence, index: usize) -> Effect {
        let previous = tokens.prev_code(index).map(|prev| tokens[prev].kind);
        let fresh = match self.contexts.base() {
            Some(BlockKind::Type) => true,
            Some(BlockKind::Let) => !previous.is_some_and(continues_binding),
            _ => false,
        };
        if fresh {
            self.clear();
        }

        // bindings inside a binding share its level
        if self.contexts.top() == Some(BlockKind::Let) {
            Effect::dedent(1)
        } else {
            Effect::push(BlockKind::Let)
        }
    }

    /// Replace the leading whitespace of the line holding `index`.
    fn indent(&self, tokens: &mut TokenSequence, index: usize, dedent: usize) -> usize {
        let mut index = index;
        while index > 0 && tokens[index - 1].kind.is_whitespace() {
            tokens.remove(index - 1);
            index -= 1;
        }

        let units = self.contexts.units().saturating_sub(dedent);
        let padding = if self.contexts.contains(BlockKind::Field) {
            self.field_padding(tokens, index)
        } else {
            0
        };

        let mut text = " ".repeat(padding);
        text.push_str(&self.options.indent_unit.repeat(units));
        if text.is_empty() {
            return index;
        }
        tokens.insert(index, Token::synthetic(TokenKind::Indent, text));
        index + 1
    }

    /// Column of the declared field name, for continuation lines.
    fn field_padding(&self, tokens: &TokenSequence, index: usize) -> usize {
        let Some(keyword) = self.field_keyword else {
            return 0;
        };
        match tokens.next_code(keyword) {
            Some(name)
                if name < index
                    && matches!(
                        tokens[name].kind,
                        TokenKind::Id | TokenKind::Cid | TokenKind::Spid
                    )
                    && tokens.line_start(name) == tokens.line_start(keyword) =>
            {
                tokens.width_before(name)
            }
            _ => 0,
        }
    }
}

/// Last tokens of a line that complete a type alternative: a built-in type,
/// a user type name or a constructor without arguments.
fn ends_type_alternative(kind: TokenKind) -> bool {
    kind.is_primitive_type()
        || kind.is_adt_type()
        || matches!(kind, TokenKind::Id | TokenKind::Cid)
}

/// `with` directly after `ByStr20` opens an address type clause.
fn follows_address_type(tokens: &TokenSequence, index: usize) -> bool {
    tokens.prev_non_space(index).is_some_and(|prev| {
        tokens[prev].kind == TokenKind::BystrType && tokens[prev].text() == "ByStr20"
    })
}
