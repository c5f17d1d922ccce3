//! Stack of open blocks that drives indentation

use std::fmt;

/// An open lexical scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Let,
    Type,
    Match,
    With,
    Fun,
    Tfun,
    Transition,
    Procedure,
    /// Pattern alternative (`|`)
    Bar,
    /// Field declaration; contributes alignment padding instead of a unit
    Field,
    Paren,
    Brace,
    Bracket,
}

impl BlockKind {
    /// Contexts that `end` closes.
    pub fn is_end_target(self) -> bool {
        matches!(
            self,
            BlockKind::Match | BlockKind::With | BlockKind::Transition | BlockKind::Procedure
        )
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Let => "let",
            BlockKind::Type => "type",
            BlockKind::Match => "match",
            BlockKind::With => "with",
            BlockKind::Fun => "fun",
            BlockKind::Tfun => "tfun",
            BlockKind::Transition => "transition",
            BlockKind::Procedure => "procedure",
            BlockKind::Bar => "|",
            BlockKind::Field => "field",
            BlockKind::Paren => "(",
            BlockKind::Brace => "{",
            BlockKind::Bracket => "[",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextStack {
    blocks: Vec<BlockKind>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Innermost block.
    pub fn top(&self) -> Option<BlockKind> {
        self.blocks.last().copied()
    }

    /// Outermost block.
    pub fn base(&self) -> Option<BlockKind> {
        self.blocks.first().copied()
    }

    pub fn contains(&self, kind: BlockKind) -> bool {
        self.blocks.contains(&kind)
    }

    /// Indentation units contributed by the open blocks.
    pub fn units(&self) -> usize {
        self.blocks
            .iter()
            .filter(|&&kind| kind != BlockKind::Field)
            .count()
    }

    pub fn push(&mut self, kind: BlockKind) {
        self.blocks.push(kind);
        tracing::trace!("push {kind}: {self}");
    }

    /// Pop the innermost block.
    ///
    /// # Panics
    ///
    /// Popping an empty stack means the indentation model itself is broken;
    /// every caller checks for emptiness first.
    pub fn pop(&mut self) -> BlockKind {
        match self.blocks.pop() {
            Some(kind) => {
                tracing::trace!("pop {kind}: {self}");
                kind
            }
            None => unreachable!("context stack underflow"),
        }
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        tracing::trace!("clear");
    }

    /// Swap the innermost block for `kind`, keeping the depth.
    pub fn replace_top(&mut self, kind: BlockKind) {
        if !self.is_empty() {
            self.pop();
        }
        self.push(kind);
    }

    /// Pop up to and including the nearest `Bar`, or everything if there is none.
    pub fn close_through_bar(&mut self) {
        while !self.is_empty() {
            if self.pop() == BlockKind::Bar {
                break;
            }
        }
    }

    /// Pop the innermost block if it is `opener`.
    pub fn close_bracket(&mut self, opener: BlockKind) -> bool {
        if self.top() != Some(opener) {
            return false;
        }
        self.pop();
        true
    }

    /// Pop the previous sibling alternative and whatever is still open
    /// inside it. Nothing happens unless a `Bar` sits above the innermost
    /// `end` target or type declaration.
    pub fn close_alternative(&mut self) {
        let Some(depth) = self.blocks.iter().rposition(|&kind| {
            kind == BlockKind::Bar || kind == BlockKind::Type || kind.is_end_target()
        }) else {
            return;
        };
        if self.blocks[depth] != BlockKind::Bar {
            return;
        }
        while self.blocks.len() > depth {
            self.pop();
        }
    }

    /// Pop until one `end` target has been popped, or the stack is empty.
    pub fn close_block(&mut self) {
        while !self.is_empty() {
            if self.pop().is_end_target() {
                break;
            }
        }
    }
}

impl fmt::Display for ContextStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, kind) in self.blocks.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{kind}")?;
        }
        f.write_str("]")
    }
}
