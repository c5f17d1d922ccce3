//! Token kind taxonomy

use std::fmt;

/// Classification of every token the lexer can produce, plus the synthetic
/// [`TokenKind::Indent`] inserted by the indentation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // Terminal markers
    Illegal,
    Eof,

    // Trivia
    Newline,
    Whitespace,
    Comment,
    Indent,

    // Literals
    StringLit,
    NumLit,
    HexLit,

    // Primitive types
    IntType,
    StringType,
    BystrType,
    BnumType,
    MessageType,
    EventType,

    // Keywords
    Forall,
    Builtin,
    Library,
    Import,
    Let,
    In,
    Match,
    With,
    End,
    Fun,
    Tfun,
    Contract,
    Transition,
    Send,
    Event,
    Field,
    Accept,
    Exists,
    Delete,
    Emp,
    Map,
    ScillaVersion,
    Type,
    Of,
    Try,
    Catch,
    As,
    Procedure,
    Throw,

    // Separators
    Semicolon,
    Colon,
    Period,
    Bar,
    Lsqb,
    Rsqb,
    Lparen,
    Rparen,
    Lbrace,
    Rbrace,
    Comma,
    Arrow,
    Tarrow,
    Eq,
    And,
    Fetch,
    Assign,
    At,
    Underscore,

    // Identifiers
    Id,
    Cid,
    Tid,
    Spid,

    // Built-in algebraic data types
    Bool,
    True,
    False,
    Nat,
    Zero,
    Succ,
    Option,
    Some,
    None,
    List,
    Cons,
    Nil,
    Pair,
}

impl TokenKind {
    /// Every kind, in declaration order.
    pub const ALL: [TokenKind; 80] = [
        TokenKind::Illegal,
        TokenKind::Eof,
        TokenKind::Newline,
        TokenKind::Whitespace,
        TokenKind::Comment,
        TokenKind::Indent,
        TokenKind::StringLit,
        TokenKind::NumLit,
        TokenKind::HexLit,
        TokenKind::IntType,
        TokenKind::StringType,
        TokenKind::BystrType,
        TokenKind::BnumType,
        TokenKind::MessageType,
        TokenKind::EventType,
        TokenKind::Forall,
        TokenKind::Builtin,
        TokenKind::Library,
        TokenKind::Import,
        TokenKind::Let,
        TokenKind::In,
        TokenKind::Match,
        TokenKind::With,
        TokenKind::End,
        TokenKind::Fun,
        TokenKind::Tfun,
        TokenKind::Contract,
        TokenKind::Transition,
        TokenKind::Send,
        TokenKind::Event,
        TokenKind::Field,
        TokenKind::Accept,
        TokenKind::Exists,
        TokenKind::Delete,
        TokenKind::Emp,
        TokenKind::Map,
        TokenKind::ScillaVersion,
        TokenKind::Type,
        TokenKind::Of,
        TokenKind::Try,
        TokenKind::Catch,
        TokenKind::As,
        TokenKind::Procedure,
        TokenKind::Throw,
        TokenKind::Semicolon,
        TokenKind::Colon,
        TokenKind::Period,
        TokenKind::Bar,
        TokenKind::Lsqb,
        TokenKind::Rsqb,
        TokenKind::Lparen,
        TokenKind::Rparen,
        TokenKind::Lbrace,
        TokenKind::Rbrace,
        TokenKind::Comma,
        TokenKind::Arrow,
        TokenKind::Tarrow,
        TokenKind::Eq,
        TokenKind::And,
        TokenKind::Fetch,
        TokenKind::Assign,
        TokenKind::At,
        TokenKind::Underscore,
        TokenKind::Id,
        TokenKind::Cid,
        TokenKind::Tid,
        TokenKind::Spid,
        TokenKind::Bool,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Nat,
        TokenKind::Zero,
        TokenKind::Succ,
        TokenKind::Option,
        TokenKind::Some,
        TokenKind::None,
        TokenKind::List,
        TokenKind::Cons,
        TokenKind::Nil,
        TokenKind::Pair,
    ];

    /// Upper-case name used by the token dump.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Comment => "COMMENT",
            TokenKind::Indent => "INDENT",
            TokenKind::StringLit => "STRING_LIT",
            TokenKind::NumLit => "NUM_LIT",
            TokenKind::HexLit => "HEX_LIT",
            TokenKind::IntType => "INT_TYPE",
            TokenKind::StringType => "STRING_TYPE",
            TokenKind::BystrType => "BYSTR_TYPE",
            TokenKind::BnumType => "BNUM_TYPE",
            TokenKind::MessageType => "MESSAGE_TYPE",
            TokenKind::EventType => "EVENT_TYPE",
            TokenKind::Forall => "FORALL",
            TokenKind::Builtin => "BUILTIN",
            TokenKind::Library => "LIBRARY",
            TokenKind::Import => "IMPORT",
            TokenKind::Let => "LET",
            TokenKind::In => "IN",
            TokenKind::Match => "MATCH",
            TokenKind::With => "WITH",
            TokenKind::End => "END",
            TokenKind::Fun => "FUN",
            TokenKind::Tfun => "TFUN",
            TokenKind::Contract => "CONTRACT",
            TokenKind::Transition => "TRANSITION",
            TokenKind::Send => "SEND",
            TokenKind::Event => "EVENT",
            TokenKind::Field => "FIELD",
            TokenKind::Accept => "ACCEPT",
            TokenKind::Exists => "EXISTS",
            TokenKind::Delete => "DELETE",
            TokenKind::Emp => "EMP",
            TokenKind::Map => "MAP",
            TokenKind::ScillaVersion => "SCILLA_VERSION",
            TokenKind::Type => "TYPE",
            TokenKind::Of => "OF",
            TokenKind::Try => "TRY",
            TokenKind::Catch => "CATCH",
            TokenKind::As => "AS",
            TokenKind::Procedure => "PROCEDURE",
            TokenKind::Throw => "THROW",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Period => "PERIOD",
            TokenKind::Bar => "BAR",
            TokenKind::Lsqb => "LSQB",
            TokenKind::Rsqb => "RSQB",
            TokenKind::Lparen => "LPAREN",
            TokenKind::Rparen => "RPAREN",
            TokenKind::Lbrace => "LBRACE",
            TokenKind::Rbrace => "RBRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Arrow => "ARROW",
            TokenKind::Tarrow => "TARROW",
            TokenKind::Eq => "EQ",
            TokenKind::And => "AND",
            TokenKind::Fetch => "FETCH",
            TokenKind::Assign => "ASSIGN",
            TokenKind::At => "AT",
            TokenKind::Underscore => "UNDERSCORE",
            TokenKind::Id => "ID",
            TokenKind::Cid => "CID",
            TokenKind::Tid => "TID",
            TokenKind::Spid => "SPID",
            TokenKind::Bool => "BOOL",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Nat => "NAT",
            TokenKind::Zero => "ZERO",
            TokenKind::Succ => "SUCC",
            TokenKind::Option => "OPTION",
            TokenKind::Some => "SOME",
            TokenKind::None => "NONE",
            TokenKind::List => "LIST",
            TokenKind::Cons => "CONS",
            TokenKind::Nil => "NIL",
            TokenKind::Pair => "PAIR",
        }
    }

    /// Spaces, tabs and synthetic indentation; never newlines.
    pub const fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Indent)
    }

    /// Whitespace, newlines and synthetic indentation.
    pub const fn is_space(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Indent | TokenKind::Newline
        )
    }

    /// Tokens that carry program text (anything but trivia and the end marker).
    pub const fn is_code(self) -> bool {
        !matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Indent
                | TokenKind::Newline
                | TokenKind::Comment
                | TokenKind::Eof
        )
    }

    pub const fn is_primitive_type(self) -> bool {
        matches!(
            self,
            TokenKind::IntType
                | TokenKind::StringType
                | TokenKind::BystrType
                | TokenKind::BnumType
                | TokenKind::MessageType
                | TokenKind::EventType
        )
    }

    /// Names of the built-in algebraic data types (not their constructors).
    pub const fn is_adt_type(self) -> bool {
        matches!(
            self,
            TokenKind::Bool
                | TokenKind::Nat
                | TokenKind::Option
                | TokenKind::List
                | TokenKind::Pair
        )
    }

    /// Tokens that can end a complete value expression.
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            TokenKind::Id
                | TokenKind::Cid
                | TokenKind::Spid
                | TokenKind::NumLit
                | TokenKind::HexLit
                | TokenKind::StringLit
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Zero
                | TokenKind::Rbrace
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
