//! The opaque type model.
//!
//! Type names arrive pre-rendered from the front end's pretty-printer and are
//! treated as text to embed. Alongside the text each `TypeRef` carries the
//! handful of structural facts lowering rules actually consult: reference-ness,
//! array-ness, and so on. The generator never parses the text back apart from
//! the two declarator splice points below.

use bitflags::bitflags;

bitflags! {
    /// Structural classification of a resolved type.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct TypeFlags: u16 {
        /// An lvalue reference after desugaring.
        const REFERENCE = 1 << 0;
        const ARRAY = 1 << 1;
        const POINTER = 1 << 2;
        const FUNCTION_POINTER = 1 << 3;
        const RECORD = 1 << 4;
        /// Record types that are not trivially default-constructible.
        const NON_TRIVIAL = 1 << 5;
        const SIGNED_INT = 1 << 6;
    }
}

/// Builtin (fundamental) type kinds, used to pick literal suffixes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuiltinKind {
    Bool,
    Char,
    SChar,
    UChar,
    Char16,
    Char32,
    WChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Int128,
    UInt128,
    Float,
    Double,
    LongDouble,
}

impl BuiltinKind {
    /// The literal suffix spelled after a constant of this type.
    pub fn literal_suffix(self) -> &'static str {
        match self {
            BuiltinKind::UInt => "u",
            BuiltinKind::ULong => "ul",
            BuiltinKind::ULongLong => "ull",
            BuiltinKind::UInt128 => "ulll",
            BuiltinKind::Long => "l",
            BuiltinKind::LongLong => "ll",
            BuiltinKind::Float => "f",
            BuiltinKind::LongDouble => "L",
            _ => "",
        }
    }

    pub fn spelling(self) -> &'static str {
        match self {
            BuiltinKind::Bool => "bool",
            BuiltinKind::Char => "char",
            BuiltinKind::SChar => "signed char",
            BuiltinKind::UChar => "unsigned char",
            BuiltinKind::Char16 => "char16_t",
            BuiltinKind::Char32 => "char32_t",
            BuiltinKind::WChar => "wchar_t",
            BuiltinKind::Short => "short",
            BuiltinKind::UShort => "unsigned short",
            BuiltinKind::Int => "int",
            BuiltinKind::UInt => "unsigned int",
            BuiltinKind::Long => "long",
            BuiltinKind::ULong => "unsigned long",
            BuiltinKind::LongLong => "long long",
            BuiltinKind::ULongLong => "unsigned long long",
            BuiltinKind::Int128 => "__int128",
            BuiltinKind::UInt128 => "unsigned __int128",
            BuiltinKind::Float => "float",
            BuiltinKind::Double => "double",
            BuiltinKind::LongDouble => "long double",
        }
    }

    pub fn is_signed_integer(self) -> bool {
        matches!(
            self,
            BuiltinKind::Char
                | BuiltinKind::SChar
                | BuiltinKind::Short
                | BuiltinKind::Int
                | BuiltinKind::Long
                | BuiltinKind::LongLong
                | BuiltinKind::Int128
        )
    }
}

/// A fully resolved, sugar-free type: canonical rendered text plus the
/// structural flags the lowering rules inspect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeRef {
    /// Canonical spelling, qualifiers included, e.g. `const std::string &`.
    pub text: String,
    pub flags: TypeFlags,
    pub builtin: Option<BuiltinKind>,
    /// Unqualified record name for record types, e.g. `Widget`.
    pub record_name: Option<String>,
}

impl TypeRef {
    pub fn named(text: impl Into<String>) -> Self {
        TypeRef {
            text: text.into(),
            flags: TypeFlags::empty(),
            builtin: None,
            record_name: None,
        }
    }

    pub fn builtin(kind: BuiltinKind) -> Self {
        let mut flags = TypeFlags::empty();
        if kind.is_signed_integer() {
            flags |= TypeFlags::SIGNED_INT;
        }
        TypeRef {
            text: kind.spelling().to_string(),
            flags,
            builtin: Some(kind),
            record_name: None,
        }
    }

    pub fn record(name: impl Into<String>) -> Self {
        let name = name.into();
        TypeRef {
            text: name.clone(),
            flags: TypeFlags::RECORD,
            builtin: None,
            record_name: Some(name),
        }
    }

    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_reference(&self) -> bool {
        self.flags.contains(TypeFlags::REFERENCE)
    }

    pub fn is_array(&self) -> bool {
        self.flags.contains(TypeFlags::ARRAY)
    }

    pub fn is_function_pointer(&self) -> bool {
        self.flags.contains(TypeFlags::FUNCTION_POINTER)
    }

    pub fn is_record(&self) -> bool {
        self.flags.contains(TypeFlags::RECORD)
    }

    pub fn is_any_pointer(&self) -> bool {
        self.flags
            .intersects(TypeFlags::POINTER | TypeFlags::FUNCTION_POINTER)
    }

    pub fn is_non_trivial(&self) -> bool {
        self.flags.contains(TypeFlags::NON_TRIVIAL)
    }

    pub fn is_signed_integer(&self) -> bool {
        self.flags.contains(TypeFlags::SIGNED_INT)
    }

    /// The spelling without a leading cv-qualifier, for positions where
    /// qualifiers are not allowed (constructions, initializer-list wrappers).
    pub fn unqualified_text(&self) -> &str {
        let mut text = self.text.as_str();
        loop {
            if let Some(rest) = text.strip_prefix("const ") {
                text = rest;
            } else if let Some(rest) = text.strip_prefix("volatile ") {
                text = rest;
            } else {
                return text;
            }
        }
    }

    /// Render a declarator introducing `name` with this type. For most types
    /// the identifier trails the type text; array, reference-to-array, and
    /// function-pointer declarators need the identifier spliced into the
    /// middle.
    pub fn declared_with_ident(&self, name: &str) -> String {
        if self.is_array()
            && let Some(pos) = self.text.find("(&)")
        {
            let mut out = self.text.clone();
            out.insert_str(pos + 2, name);
            return out;
        }
        if self.is_array()
            && let Some(pos) = memchr::memchr(b'[', self.text.as_bytes())
        {
            let mut out = self.text.clone();
            out.insert_str(pos, name);
            return out;
        }
        if self.is_function_pointer()
            && let Some(pos) = self.text.find("(*")
        {
            let mut out = self.text.clone();
            out.insert_str(pos + 2, name);
            return out;
        }
        format!("{} {}", self.text, name)
    }

    /// Declarator form for closure capture fields and constructor parameters:
    /// array captures always bind through a parenthesized reference
    /// declarator, everything else keeps the plain type text (the caller
    /// appends the identifier and any `&`).
    pub fn capture_declarator(&self, name: &str) -> String {
        if self.is_array()
            && let Some(pos) = memchr::memchr(b'[', self.text.as_bytes())
        {
            let mut out = self.text.clone();
            out.insert_str(pos, &format!("(&{})", name));
            return out;
        }
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarator_trails_for_plain_types() {
        let ty = TypeRef::builtin(BuiltinKind::Int);
        assert_eq!(ty.declared_with_ident("x"), "int x");
    }

    #[test]
    fn declarator_splices_into_arrays() {
        let ty = TypeRef::named("int [5]").with_flags(TypeFlags::ARRAY);
        assert_eq!(ty.declared_with_ident("a"), "int a[5]");
    }

    #[test]
    fn declarator_splices_into_array_references() {
        let ty = TypeRef::named("int (&)[2]").with_flags(TypeFlags::REFERENCE | TypeFlags::ARRAY);
        assert_eq!(ty.declared_with_ident("a"), "int (&a)[2]");
    }

    #[test]
    fn declarator_splices_into_function_pointers() {
        let ty = TypeRef::named("void (*)(int)").with_flags(TypeFlags::FUNCTION_POINTER);
        assert_eq!(ty.declared_with_ident("fp"), "void (*fp)(int)");
    }

    #[test]
    fn capture_declarator_parenthesizes_arrays() {
        let ty = TypeRef::named("int [3]").with_flags(TypeFlags::ARRAY);
        assert_eq!(ty.capture_declarator("arr"), "int (&arr)[3]");
    }

    #[test]
    fn unqualified_strips_cv() {
        let ty = TypeRef::named("const volatile Widget");
        assert_eq!(ty.unqualified_text(), "Widget");
    }
}
