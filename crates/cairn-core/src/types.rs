//! Concrete type identifiers.
//!
//! A `TypeTag` names a type by string so that signature text can introduce
//! arbitrary types (`point`, `matrix`) alongside the built-in ones.

use std::borrow::Cow;
use std::fmt;

/// A concrete type identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    // Well-known tags
    pub const INT: TypeTag = TypeTag(Cow::Borrowed("int"));
    pub const FLOAT: TypeTag = TypeTag(Cow::Borrowed("float"));
    pub const DOUBLE: TypeTag = TypeTag(Cow::Borrowed("double"));
    pub const BOOL: TypeTag = TypeTag(Cow::Borrowed("bool"));
    pub const TEXT: TypeTag = TypeTag(Cow::Borrowed("text"));
    pub const QUOT: TypeTag = TypeTag(Cow::Borrowed("quot"));
    /// The type of type tags and type variables themselves.
    pub const TYPE: TypeTag = TypeTag(Cow::Borrowed("type"));

    // Requirement-only tags: never the type of a value.
    pub const ANY: TypeTag = TypeTag(Cow::Borrowed("any"));
    pub const NUM: TypeTag = TypeTag(Cow::Borrowed("num"));

    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.as_str() {
            "int" => Self::INT,
            "float" => Self::FLOAT,
            "double" => Self::DOUBLE,
            "bool" => Self::BOOL,
            "text" => Self::TEXT,
            "quot" => Self::QUOT,
            "type" => Self::TYPE,
            "any" => Self::ANY,
            "num" => Self::NUM,
            _ => TypeTag(Cow::Owned(name)),
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Check if this is one of the numeric scalar types.
    pub fn is_numeric(&self) -> bool {
        *self == Self::INT || *self == Self::FLOAT || *self == Self::DOUBLE
    }

    /// Check whether a value of type `actual` satisfies this requirement.
    ///
    /// `any` admits every type, `num` admits the numeric types, every other
    /// tag admits only itself.
    pub fn admits(&self, actual: &TypeTag) -> bool {
        *self == Self::ANY || self == actual || (*self == Self::NUM && actual.is_numeric())
    }

    /// Numeric promotion: int < float < double.
    ///
    /// Returns None if either side is not numeric.
    pub fn promote(&self, other: &TypeTag) -> Option<TypeTag> {
        fn rank(tag: &TypeTag) -> Option<u8> {
            match tag.name() {
                "int" => Some(0),
                "float" => Some(1),
                "double" => Some(2),
                _ => None,
            }
        }
        let (a, b) = (rank(self)?, rank(other)?);
        Some(if a >= b { self.clone() } else { other.clone() })
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
