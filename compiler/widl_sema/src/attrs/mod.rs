//! Recognized extended attributes.
//!
//! Each entry lists the positions an attribute may appear on and the value
//! shapes it accepts. Names not in the table are rejected with a
//! suggestion drawn from the table.

use bitflags::bitflags;
use widl_diagnostic::IdlError;
use widl_ir::ast::{ExtAttr, ExtAttrValue};
use widl_ir::StringInterner;

use crate::suggest::suggest_similar;

bitflags! {
    /// Syntactic positions an extended attribute can be attached to.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub(crate) struct Positions: u32 {
        // === Declarations ===
        /// Interface, interface mixin or callback interface.
        const INTERFACE = 1 << 0;
        const NAMESPACE = 1 << 1;
        const DICTIONARY = 1 << 2;
        const CALLBACK = 1 << 3;
        const ENUM = 1 << 4;
        const TYPEDEF = 1 << 5;
        const INCLUDES = 1 << 6;

        // === Members ===
        const ATTRIBUTE = 1 << 8;
        const OPERATION = 1 << 9;
        const CONSTRUCTOR = 1 << 10;
        const CONST = 1 << 11;
        /// iterable, maplike, setlike and bare `stringifier;`.
        const COLLECTION = 1 << 12;
        const DICTIONARY_MEMBER = 1 << 13;

        // === Nested ===
        const ARGUMENT = 1 << 16;
        const TYPE = 1 << 17;
    }
}

impl Positions {
    /// Any interface or namespace member.
    pub(crate) const MEMBER: Self = Self::from_bits_truncate(
        Self::ATTRIBUTE.bits()
            | Self::OPERATION.bits()
            | Self::CONSTRUCTOR.bits()
            | Self::CONST.bits()
            | Self::COLLECTION.bits(),
    );

    /// Places an exposure-style annotation can go.
    const EXPOSABLE: Self =
        Self::from_bits_truncate(Self::INTERFACE.bits() | Self::NAMESPACE.bits() | Self::MEMBER.bits());

    /// Places that take a conversion annotation on a numeric or string value.
    const CONVERTIBLE: Self = Self::from_bits_truncate(
        Self::TYPE.bits()
            | Self::ARGUMENT.bits()
            | Self::ATTRIBUTE.bits()
            | Self::DICTIONARY_MEMBER.bits(),
    );

    pub(crate) fn describe(self) -> &'static str {
        const NAMES: &[(Positions, &str)] = &[
            (Positions::INTERFACE, "an interface"),
            (Positions::NAMESPACE, "a namespace"),
            (Positions::DICTIONARY, "a dictionary"),
            (Positions::CALLBACK, "a callback"),
            (Positions::ENUM, "an enum"),
            (Positions::TYPEDEF, "a typedef"),
            (Positions::INCLUDES, "an includes statement"),
            (Positions::ATTRIBUTE, "an attribute"),
            (Positions::OPERATION, "an operation"),
            (Positions::CONSTRUCTOR, "a constructor"),
            (Positions::CONST, "a constant"),
            (Positions::COLLECTION, "an iterable, maplike, setlike or stringifier declaration"),
            (Positions::DICTIONARY_MEMBER, "a dictionary member"),
            (Positions::ARGUMENT, "an argument"),
            (Positions::TYPE, "a type"),
        ];
        NAMES
            .iter()
            .find(|(flag, _)| self.contains(*flag))
            .map_or("this declaration", |(_, name)| *name)
    }
}

bitflags! {
    /// Accepted right-hand sides.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub(crate) struct Shapes: u8 {
        const NONE = 1 << 0;
        const IDENT = 1 << 1;
        const IDENT_LIST = 1 << 2;
        const STRING = 1 << 3;
        const WILDCARD = 1 << 4;
        const ARG_LIST = 1 << 5;
        const NAMED_ARG_LIST = 1 << 6;
    }
}

impl Shapes {
    pub(crate) fn of(value: &ExtAttrValue) -> Self {
        match value {
            ExtAttrValue::None => Shapes::NONE,
            ExtAttrValue::Ident(_) => Shapes::IDENT,
            ExtAttrValue::IdentList(_) => Shapes::IDENT_LIST,
            ExtAttrValue::String(_) => Shapes::STRING,
            ExtAttrValue::Wildcard => Shapes::WILDCARD,
            ExtAttrValue::ArgList(_) => Shapes::ARG_LIST,
            ExtAttrValue::NamedArgList(..) => Shapes::NAMED_ARG_LIST,
        }
    }

    fn describe(self) -> &'static str {
        const NAMES: &[(Shapes, &str)] = &[
            (Shapes::NONE, "no value"),
            (Shapes::IDENT, "an identifier"),
            (Shapes::IDENT_LIST, "an identifier list"),
            (Shapes::STRING, "a string"),
            (Shapes::WILDCARD, "`*`"),
            (Shapes::ARG_LIST, "an argument list"),
            (Shapes::NAMED_ARG_LIST, "a named argument list"),
        ];
        NAMES
            .iter()
            .find(|(flag, _)| *flag == self)
            .map_or("this value", |(_, name)| *name)
    }
}

pub(crate) struct AttrSpec {
    pub name: &'static str,
    pub positions: Positions,
    pub shapes: Shapes,
}

const fn spec(name: &'static str, positions: Positions, shapes: Shapes) -> AttrSpec {
    AttrSpec {
        name,
        positions,
        shapes,
    }
}

const ANY_NAME: Shapes = Shapes::from_bits_truncate(Shapes::IDENT.bits() | Shapes::IDENT_LIST.bits());
const GATED: Positions = Positions::from_bits_truncate(
    Positions::EXPOSABLE.bits() | Positions::DICTIONARY_MEMBER.bits(),
);

pub(crate) static KNOWN: &[AttrSpec] = &[
    spec("Affects", Positions::ATTRIBUTE.union(Positions::OPERATION), Shapes::IDENT),
    spec("Alias", Positions::OPERATION, Shapes::IDENT),
    spec("AllowShared", Positions::TYPE, Shapes::NONE),
    spec("BinaryName", Positions::ATTRIBUTE.union(Positions::OPERATION), Shapes::STRING),
    spec("BindingAlias", Positions::ATTRIBUTE, Shapes::IDENT),
    spec("Cached", Positions::ATTRIBUTE, Shapes::NONE),
    spec("CEReactions", Positions::ATTRIBUTE.union(Positions::OPERATION), Shapes::NONE),
    spec("ChromeOnly", GATED, Shapes::NONE),
    spec("Clamp", Positions::CONVERTIBLE, Shapes::NONE),
    spec("Constant", Positions::ATTRIBUTE, Shapes::NONE),
    spec("Constructor", Positions::INTERFACE, Shapes::NONE.union(Shapes::ARG_LIST)),
    spec("CrossOriginCallable", Positions::OPERATION, Shapes::NONE),
    spec("CrossOriginReadable", Positions::ATTRIBUTE, Shapes::NONE),
    spec("CrossOriginWritable", Positions::ATTRIBUTE, Shapes::NONE),
    spec("Default", Positions::OPERATION, Shapes::NONE),
    spec("DependsOn", Positions::ATTRIBUTE.union(Positions::OPERATION), Shapes::IDENT),
    spec("Deprecated", Positions::EXPOSABLE, Shapes::IDENT.union(Shapes::STRING)),
    spec("EnforceRange", Positions::CONVERTIBLE, Shapes::NONE),
    spec("Exposed", Positions::EXPOSABLE, ANY_NAME.union(Shapes::WILDCARD)),
    spec("Frozen", Positions::ATTRIBUTE, Shapes::NONE),
    spec("Func", GATED, Shapes::STRING),
    spec("GenerateConversionToJS", Positions::DICTIONARY, Shapes::NONE),
    spec("GenerateInit", Positions::DICTIONARY, Shapes::NONE),
    spec("GetterThrows", Positions::ATTRIBUTE, Shapes::NONE),
    spec("Global", Positions::INTERFACE, Shapes::NONE.union(ANY_NAME)),
    spec("HeaderFile", Positions::INTERFACE.union(Positions::NAMESPACE), Shapes::STRING),
    spec("HTMLConstructor", Positions::INTERFACE.union(Positions::CONSTRUCTOR), Shapes::NONE),
    spec("JSImplementation", Positions::INTERFACE, Shapes::STRING),
    spec("LegacyFactoryFunction", Positions::INTERFACE, Shapes::NAMED_ARG_LIST),
    spec("LegacyLenientSetter", Positions::ATTRIBUTE, Shapes::NONE),
    spec("LegacyLenientThis", Positions::ATTRIBUTE, Shapes::NONE),
    spec("LegacyNamespace", Positions::INTERFACE, Shapes::IDENT),
    spec("LegacyNoInterfaceObject", Positions::INTERFACE, Shapes::NONE),
    spec("LegacyNullToEmptyString", Positions::CONVERTIBLE, Shapes::NONE),
    spec("LegacyOverrideBuiltIns", Positions::INTERFACE, Shapes::NONE),
    spec("LegacyTreatNonObjectAsNull", Positions::CALLBACK, Shapes::NONE),
    spec("LegacyUnenumerableNamedProperties", Positions::INTERFACE, Shapes::NONE),
    spec(
        "LegacyUnforgeable",
        Positions::INTERFACE.union(Positions::ATTRIBUTE).union(Positions::OPERATION),
        Shapes::NONE,
    ),
    spec("LegacyWindowAlias", Positions::INTERFACE, ANY_NAME),
    spec("LenientSetter", Positions::ATTRIBUTE, Shapes::NONE),
    spec("LenientThis", Positions::ATTRIBUTE, Shapes::NONE),
    spec("NamedConstructor", Positions::INTERFACE, Shapes::IDENT.union(Shapes::NAMED_ARG_LIST)),
    spec("NeedResolve", Positions::INTERFACE, Shapes::NONE),
    spec("NewObject", Positions::OPERATION, Shapes::NONE),
    spec("NoInterfaceObject", Positions::INTERFACE, Shapes::NONE),
    spec("Pref", GATED, Shapes::STRING),
    spec("PrimaryGlobal", Positions::INTERFACE, Shapes::NONE.union(ANY_NAME)),
    spec("Pure", Positions::ATTRIBUTE.union(Positions::OPERATION), Shapes::NONE),
    spec("PutForwards", Positions::ATTRIBUTE, Shapes::IDENT),
    spec("Replaceable", Positions::ATTRIBUTE, Shapes::NONE),
    spec("SameObject", Positions::ATTRIBUTE, Shapes::NONE),
    spec("SecureContext", GATED, Shapes::NONE),
    spec("Serializable", Positions::INTERFACE, Shapes::NONE),
    spec("SetterThrows", Positions::ATTRIBUTE, Shapes::NONE),
    spec("StoreInSlot", Positions::ATTRIBUTE, Shapes::NONE),
    spec(
        "Throws",
        Positions::ATTRIBUTE.union(Positions::OPERATION).union(Positions::CONSTRUCTOR),
        Shapes::NONE,
    ),
    spec("Transferable", Positions::INTERFACE, Shapes::NONE),
    spec("TreatNonCallableAsNull", Positions::CALLBACK, Shapes::NONE),
    spec("TreatNullAs", Positions::CONVERTIBLE, Shapes::IDENT),
    spec("Trial", GATED, Shapes::STRING),
    spec(
        "Unforgeable",
        Positions::INTERFACE.union(Positions::ATTRIBUTE).union(Positions::OPERATION),
        Shapes::NONE,
    ),
    spec("Unscopable", Positions::ATTRIBUTE.union(Positions::OPERATION), Shapes::NONE),
    spec("UseCounter", Positions::ATTRIBUTE.union(Positions::OPERATION), Shapes::NONE),
    spec("WantsEventListenerHooks", Positions::INTERFACE, Shapes::NONE),
];

pub(crate) fn lookup(name: &str) -> Option<&'static AttrSpec> {
    KNOWN.iter().find(|spec| spec.name == name)
}

/// Check one extended attribute against the table.
pub(crate) fn check(
    interner: &StringInterner,
    attr: &ExtAttr,
    position: Positions,
) -> Result<(), IdlError> {
    let name = interner.lookup(attr.name);
    let Some(spec) = lookup(name) else {
        let err =
            IdlError::unknown_attribute(format!("unknown extended attribute `[{name}]`"), attr.loc);
        return Err(match suggest_similar(name, KNOWN.iter().map(|s| s.name)) {
            Some(similar) => err.with_suggestion(format!("did you mean `[{similar}]`?")),
            None => err,
        });
    };

    if !spec.positions.intersects(position) {
        return Err(IdlError::attribute_context(
            format!("`[{name}]` is not allowed on {}", position.describe()),
            attr.loc,
        ));
    }
    let shape = Shapes::of(&attr.value);
    if !spec.shapes.contains(shape) {
        return Err(IdlError::attribute_context(
            format!("`[{name}]` does not accept {}", shape.describe()),
            attr.loc,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
