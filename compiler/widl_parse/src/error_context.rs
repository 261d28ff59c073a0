//! Context for "while parsing X" notes on syntax errors.

/// What was being parsed when a syntax error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    // Definitions
    Interface,
    Mixin,
    CallbackInterface,
    Callback,
    Dictionary,
    Enum,
    Typedef,
    Namespace,
    Includes,

    // Inside bodies
    Member,
    DictionaryMember,
    Arguments,
    Type,
    ExtendedAttributes,
    ConstValue,
}

impl ErrorContext {
    /// Noun phrase for the note ("an interface", "a type", ...).
    pub fn description(self) -> &'static str {
        match self {
            Self::Interface => "an interface",
            Self::Mixin => "an interface mixin",
            Self::CallbackInterface => "a callback interface",
            Self::Callback => "a callback",
            Self::Dictionary => "a dictionary",
            Self::Enum => "an enum",
            Self::Typedef => "a typedef",
            Self::Namespace => "a namespace",
            Self::Includes => "an includes statement",
            Self::Member => "an interface member",
            Self::DictionaryMember => "a dictionary member",
            Self::Arguments => "an argument list",
            Self::Type => "a type",
            Self::ExtendedAttributes => "an extended attribute list",
            Self::ConstValue => "a constant value",
        }
    }
}
