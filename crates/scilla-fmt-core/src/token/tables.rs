//! Vocabulary tables shared by the lexer and every formatting pass
//!
//! Each table is a `const` slice so the classification is fixed at compile
//! time. `TokenKind::canonical_text` is derived from these slices only.

use super::TokenKind;

pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("forall", TokenKind::Forall),
    ("builtin", TokenKind::Builtin),
    ("library", TokenKind::Library),
    ("import", TokenKind::Import),
    ("let", TokenKind::Let),
    ("in", TokenKind::In),
    ("match", TokenKind::Match),
    ("with", TokenKind::With),
    ("end", TokenKind::End),
    ("fun", TokenKind::Fun),
    ("tfun", TokenKind::Tfun),
    ("contract", TokenKind::Contract),
    ("transition", TokenKind::Transition),
    ("send", TokenKind::Send),
    ("event", TokenKind::Event),
    ("field", TokenKind::Field),
    ("accept", TokenKind::Accept),
    ("exists", TokenKind::Exists),
    ("delete", TokenKind::Delete),
    ("Emp", TokenKind::Emp),
    ("Map", TokenKind::Map),
    ("scilla_version", TokenKind::ScillaVersion),
    ("type", TokenKind::Type),
    ("of", TokenKind::Of),
    ("try", TokenKind::Try),
    ("catch", TokenKind::Catch),
    ("as", TokenKind::As),
    ("procedure", TokenKind::Procedure),
    ("throw", TokenKind::Throw),
];

pub const SEPARATORS: &[(&str, TokenKind)] = &[
    (";", TokenKind::Semicolon),
    (":", TokenKind::Colon),
    (".", TokenKind::Period),
    ("|", TokenKind::Bar),
    ("[", TokenKind::Lsqb),
    ("]", TokenKind::Rsqb),
    ("(", TokenKind::Lparen),
    (")", TokenKind::Rparen),
    ("{", TokenKind::Lbrace),
    ("}", TokenKind::Rbrace),
    (",", TokenKind::Comma),
    ("=>", TokenKind::Arrow),
    ("->", TokenKind::Tarrow),
    ("=", TokenKind::Eq),
    ("&", TokenKind::And),
    ("<-", TokenKind::Fetch),
    (":=", TokenKind::Assign),
    ("@", TokenKind::At),
    ("_", TokenKind::Underscore),
];

pub const BUILTIN_ADTS: &[(&str, TokenKind)] = &[
    ("Bool", TokenKind::Bool),
    ("True", TokenKind::True),
    ("False", TokenKind::False),
    ("Nat", TokenKind::Nat),
    ("Zero", TokenKind::Zero),
    ("Succ", TokenKind::Succ),
    ("Option", TokenKind::Option),
    ("Some", TokenKind::Some),
    ("None", TokenKind::None),
    ("List", TokenKind::List),
    ("Cons", TokenKind::Cons),
    ("Nil", TokenKind::Nil),
    ("Pair", TokenKind::Pair),
];

/// Primitive types spelled exactly one way.
pub const PRIMITIVE_TYPES: &[(&str, TokenKind)] = &[
    ("String", TokenKind::StringType),
    ("BNum", TokenKind::BnumType),
    ("Message", TokenKind::MessageType),
    ("Event", TokenKind::EventType),
];

/// The sized integer family, all classified as [`TokenKind::IntType`].
pub const INT_TYPES: &[&str] = &[
    "Int32", "Int64", "Int128", "Int256", "Uint32", "Uint64", "Uint128", "Uint256",
];

/// Prefix of the byte-string family (`ByStr`, `ByStr20`, `ByStr33`, ...).
pub const BYSTR_PREFIX: &str = "ByStr";

const TABLES: [&[(&str, TokenKind)]; 4] = [KEYWORDS, SEPARATORS, BUILTIN_ADTS, PRIMITIVE_TYPES];

fn find(table: &[(&str, TokenKind)], text: &str) -> Option<TokenKind> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == text)
        .map(|(_, kind)| *kind)
}

pub fn keyword(text: &str) -> Option<TokenKind> {
    find(KEYWORDS, text)
}

pub fn separator(text: &str) -> Option<TokenKind> {
    find(SEPARATORS, text)
}

pub fn builtin_adt(text: &str) -> Option<TokenKind> {
    find(BUILTIN_ADTS, text)
}

/// Classify a primitive type name, including the integer and byte-string families.
pub fn primitive_type(text: &str) -> Option<TokenKind> {
    if INT_TYPES.contains(&text) {
        return Some(TokenKind::IntType);
    }
    if let Some(width) = text.strip_prefix(BYSTR_PREFIX) {
        if width.bytes().all(|b| b.is_ascii_digit()) {
            return Some(TokenKind::BystrType);
        }
        return None;
    }
    find(PRIMITIVE_TYPES, text)
}

impl TokenKind {
    /// The single spelling of this kind, if it has exactly one.
    ///
    /// Families (`IntType`, `BystrType`), identifiers, literals and trivia
    /// have no canonical text.
    pub fn canonical_text(self) -> Option<&'static str> {
        TABLES
            .iter()
            .flat_map(|table| table.iter())
            .find(|(_, kind)| *kind == self)
            .map(|(text, _)| *text)
    }
}
