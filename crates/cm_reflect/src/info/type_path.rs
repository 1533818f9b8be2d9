use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::ReflectError;

// -----------------------------------------------------------------------------
// Well-known names

/// Name of the universal root type, every value is assignable to it.
pub const OBJECT: &str = "Object";
/// Name of the text type.
pub const TEXT: &str = "String";
/// Name of the reflection method handle type.
pub const METHOD_INFO: &str = "MethodInfo";
/// Name of the reflection field handle type.
pub const FIELD_INFO: &str = "FieldInfo";

// -----------------------------------------------------------------------------
// TypePath

/// A canonical, cheaply clonable type name.
///
/// Names follow a small grammar:
///
/// ```text
/// path  := ident ( '<' path ( ',' path )* '>' )? ( '[]' )*
/// ident := ( alphanumeric | '_' | '.' | '+' | ':' )+
/// ```
///
/// Converting from a string canonicalises whitespace, so `Map<String,i32>`
/// and `Map< String, i32 >` name the same type. A string that does not
/// follow the grammar is kept verbatim; the error surfaces when the name is
/// [parsed](TypePath::parse), for example while classifying it.
///
/// # Examples
///
/// ```
/// use cm_reflect::info::TypePath;
///
/// let path = TypePath::from("Map<String,Vec<i32 >>");
/// assert_eq!(path.as_str(), "Map<String, Vec<i32>>");
///
/// let array = TypePath::array_of(&path);
/// assert_eq!(array.as_str(), "Map<String, Vec<i32>>[]");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePath(Arc<str>);

impl TypePath {
    /// Parses `name` and returns its canonical [`TypePath`].
    ///
    /// Unlike the `From` conversions, this reports malformed names eagerly.
    pub fn new(name: &str) -> Result<Self, ReflectError> {
        let parsed = TypeName::parse(name)?;
        Ok(Self(Arc::from(parsed.to_string())))
    }

    /// Builds the path of a single-dimensional array of `element`.
    pub fn array_of(element: &TypePath) -> Self {
        let mut name = String::with_capacity(element.0.len() + 2);
        name.push_str(&element.0);
        name.push_str("[]");
        Self(Arc::from(name))
    }

    /// Builds the path of the generic instantiation `ident<args..>`.
    pub fn generic(ident: &str, args: &[TypePath]) -> Self {
        let mut name = String::from(ident);
        name.push('<');
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                name.push_str(", ");
            }
            name.push_str(&arg.0);
        }
        name.push('>');
        Self(Arc::from(name))
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the name into its structural form.
    #[inline]
    pub fn parse(&self) -> Result<TypeName<'_>, ReflectError> {
        TypeName::parse(&self.0)
    }

    fn canonical(name: &str) -> Self {
        match TypeName::parse(name) {
            Ok(parsed) => {
                let canonical = parsed.to_string();
                if canonical == name {
                    Self(Arc::from(name))
                } else {
                    Self(Arc::from(canonical))
                }
            }
            Err(_) => Self(Arc::from(name)),
        }
    }
}

impl From<&str> for TypePath {
    #[inline]
    fn from(value: &str) -> Self {
        Self::canonical(value)
    }
}

impl From<String> for TypePath {
    #[inline]
    fn from(value: String) -> Self {
        Self::canonical(&value)
    }
}

impl From<&TypePath> for TypePath {
    #[inline]
    fn from(value: &TypePath) -> Self {
        value.clone()
    }
}

impl AsRef<str> for TypePath {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::borrow::Borrow<str> for TypePath {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TypePath {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for TypePath {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl fmt::Debug for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

// -----------------------------------------------------------------------------
// TypeName

/// The parsed structure of a [`TypePath`].
///
/// `array_rank` counts trailing `[]` pairs, so `i32[][]` is a jagged array
/// with rank 2 whose [element](TypeName::element) is `i32[]`.
///
/// Generic nesting plus array rank is bounded by [`TypeName::MAX_DEPTH`],
/// deeper names are rejected as invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName<'a> {
    pub ident: &'a str,
    pub args: Vec<TypeName<'a>>,
    pub array_rank: usize,
}

impl<'a> TypeName<'a> {
    /// Deepest accepted nesting, counting each generic level and each `[]`.
    pub const MAX_DEPTH: usize = 64;

    /// Parses a full type name, rejecting trailing input.
    pub fn parse(input: &'a str) -> Result<Self, ReflectError> {
        let mut parser = Parser { input, pos: 0 };
        let name = parser.path(0)?;
        parser.skip_ws();
        if parser.pos != input.len() {
            return Err(ReflectError::InvalidTypeName(String::from(input)));
        }
        Ok(name)
    }

    /// Whether this is a bare identifier, without generic arguments or array suffix.
    #[inline]
    pub fn is_plain(&self) -> bool {
        self.args.is_empty() && self.array_rank == 0
    }

    /// Returns the element name of an array type, `None` otherwise.
    pub fn element(&self) -> Option<TypeName<'a>> {
        if self.array_rank == 0 {
            return None;
        }
        Some(TypeName {
            ident: self.ident,
            args: self.args.clone(),
            array_rank: self.array_rank - 1,
        })
    }

    /// Converts back into an owned canonical [`TypePath`].
    pub fn to_path(&self) -> TypePath {
        TypePath(Arc::from(self.to_string()))
    }
}

impl fmt::Display for TypeName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (index, arg) in self.args.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                fmt::Display::fmt(arg, f)?;
            }
            f.write_str(">")?;
        }
        for _ in 0..self.array_rank {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn error(&self) -> ReflectError {
        ReflectError::InvalidTypeName(String::from(self.input))
    }

    fn ident(&mut self) -> Result<&'a str, ReflectError> {
        let start = self.pos;
        // Non-ASCII identifiers are accepted byte-wise; `pos` only ever stops
        // on ASCII punctuation, so the slice stays on char boundaries.
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, b'_' | b'.' | b'+' | b':') || c >= 0x80)
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(self.error());
        }
        Ok(&self.input[start..self.pos])
    }

    fn path(&mut self, depth: usize) -> Result<TypeName<'a>, ReflectError> {
        if depth > TypeName::MAX_DEPTH {
            return Err(self.error());
        }
        self.skip_ws();
        let ident = self.ident()?;
        let mut args = Vec::new();

        self.skip_ws();
        if self.peek() == Some(b'<') {
            self.pos += 1;
            loop {
                args.push(self.path(depth + 1)?);
                self.skip_ws();
                match self.peek() {
                    Some(b',') => self.pos += 1,
                    Some(b'>') => {
                        self.pos += 1;
                        break;
                    }
                    _ => return Err(self.error()),
                }
            }
        }

        let mut array_rank = 0;
        loop {
            self.skip_ws();
            if self.peek() != Some(b'[') {
                break;
            }
            self.pos += 1;
            if self.peek() != Some(b']') {
                // Multi-dimensional arrays (`[,]`) are not part of the grammar.
                return Err(self.error());
            }
            self.pos += 1;
            array_rank += 1;
            if depth + array_rank > TypeName::MAX_DEPTH {
                return Err(self.error());
            }
        }

        Ok(TypeName {
            ident,
            args,
            array_rank,
        })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{TypeName, TypePath};
    use crate::ReflectError;

    #[test]
    fn canonical_generic_spacing() {
        let path = TypePath::from("Dictionary< i32 ,List<TestClass> >");
        assert_eq!(path.as_str(), "Dictionary<i32, List<TestClass>>");
        assert_eq!(path, TypePath::from("Dictionary<i32, List<TestClass>>"));
    }

    #[test]
    fn jagged_arrays() {
        let path = TypePath::from("i32[][]");
        let name = path.parse().unwrap();
        assert_eq!(name.array_rank, 2);
        let element = name.element().unwrap();
        assert_eq!(element.to_path().as_str(), "i32[]");
        assert!(element.element().unwrap().is_plain());
    }

    #[test]
    fn nested_class_names() {
        let name = TypeName::parse("TestClass.NestedClass").unwrap();
        assert_eq!(name.ident, "TestClass.NestedClass");
        assert!(name.is_plain());
    }

    #[test]
    fn malformed_names() {
        for bad in ["", "Vec<", "Vec<>", "i32[,]", "a b", "Map<i32,>"] {
            assert!(
                matches!(TypePath::new(bad), Err(ReflectError::InvalidTypeName(_))),
                "`{bad}` should be rejected"
            );
        }
        // The lenient conversion keeps the raw text.
        assert_eq!(TypePath::from("Vec<").as_str(), "Vec<");
    }

    #[test]
    fn nesting_is_bounded() {
        let max = TypeName::MAX_DEPTH;

        let deepest_array = format!("i32{}", "[]".repeat(max));
        assert_eq!(TypeName::parse(&deepest_array).unwrap().array_rank, max);
        let too_deep = format!("i32{}", "[]".repeat(max + 1));
        assert!(matches!(TypeName::parse(&too_deep), Err(ReflectError::InvalidTypeName(_))));

        let nested = |n: usize| format!("{}i32{}", "List<".repeat(n), ">".repeat(n));
        assert!(TypeName::parse(&nested(max)).is_ok());
        assert!(matches!(TypeName::parse(&nested(max + 1)), Err(ReflectError::InvalidTypeName(_))));

        // Rank and generic depth add up.
        let mixed = format!("{}i32[]{}", "List<".repeat(max), ">".repeat(max));
        assert!(TypeName::parse(&mixed).is_err());

        let hostile = format!("{}i32{}", "List<".repeat(200_000), ">".repeat(200_000));
        assert!(TypePath::new(&hostile).is_err());
        assert_eq!(TypePath::from(hostile.as_str()).as_str(), hostile);
    }

    #[test]
    fn builders() {
        let elem = TypePath::from("String");
        assert_eq!(TypePath::array_of(&elem).as_str(), "String[]");
        let map = TypePath::generic("Map", &[TypePath::from("i32"), TypePath::from("Vec<Foo>")]);
        assert_eq!(map.as_str(), "Map<i32, Vec<Foo>>");
    }
}
