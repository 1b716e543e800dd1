//! Declared C++ types as recognised by the type matcher.

use std::fmt;

/// A declared type: qualifiers, a base name, container arguments and
/// indirection depth.
///
/// `depth` counts pointer stars and array dimensions added by a declarator.
/// The type matcher itself always produces depth 0; the declaration
/// extractor adds depth while unwrapping `*x` and `x[n]`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct DeclaredType {
    pub is_static: bool,
    pub is_const: bool,
    pub is_inline: bool,
    /// Normalised base spelling: `int`, `long long`, `vector`, `map`, ...
    pub base: String,
    /// Container arguments, empty for primitives.
    pub args: Vec<DeclaredType>,
    /// `T::iterator`
    pub is_iterator: bool,
    pub depth: u32,
}

impl DeclaredType {
    /// A plain primitive with no qualifiers.
    pub fn primitive(base: impl Into<String>) -> Self {
        DeclaredType {
            base: base.into(),
            ..DeclaredType::default()
        }
    }

    /// A container instantiated with the given arguments.
    pub fn container(base: impl Into<String>, args: Vec<DeclaredType>) -> Self {
        DeclaredType {
            base: base.into(),
            args,
            ..DeclaredType::default()
        }
    }

    /// Copy of this type with additional indirection.
    #[must_use]
    pub fn with_depth(&self, extra: u32) -> Self {
        DeclaredType {
            depth: self.depth + extra,
            ..self.clone()
        }
    }

    pub fn is_container(&self) -> bool {
        !self.args.is_empty()
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            f.write_str("static ")?;
        }
        if self.is_const {
            f.write_str("const ")?;
        }
        if self.is_inline {
            f.write_str("inline ")?;
        }
        f.write_str(&self.base)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        if self.is_iterator {
            f.write_str("::iterator")?;
        }
        for _ in 0..self.depth {
            f.write_str("*")?;
        }
        Ok(())
    }
}
