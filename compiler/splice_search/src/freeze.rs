//! Config freezing.
//!
//! A [`Projection`] is the part of a [`LineSignature`] the search looks at,
//! plus the gold indentation when one is supplied. Freezing sorts its maps
//! into a canonical [`FrozenConfig`], a cheap-to-clone hashable key: two
//! lines with equal frozen configs are interchangeable during the search.

use rustc_hash::FxHashMap;
use splice_ir::{DeclaredName, LineCategory, LineSignature};
use std::fmt;
use std::sync::Arc;

/// Field subset kept by a projection.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ConfigKind {
    /// Category, brace flags, completeness and indentation.
    Syntax,
    /// Syntax fields plus typed declared names, used names and the
    /// prototype name.
    Table,
}

/// Name fields of a [`ConfigKind::Table`] projection.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TableFields {
    pub declared: FxHashMap<String, DeclaredName>,
    pub used: FxHashMap<String, u32>,
    pub prototype: Option<String>,
}

/// Unfrozen view of a config.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Projection {
    pub category: LineCategory,
    pub opens_scope: bool,
    pub starts_with_close: bool,
    pub ends_with_open: bool,
    pub complete: bool,
    pub indent: Option<u32>,
    /// Present exactly for table projections.
    pub table: Option<TableFields>,
}

impl Projection {
    pub fn kind(&self) -> ConfigKind {
        if self.table.is_some() {
            ConfigKind::Table
        } else {
            ConfigKind::Syntax
        }
    }
}

/// Project a signature onto a field subset.
pub fn project(signature: &LineSignature, kind: ConfigKind, indent: Option<u32>) -> Projection {
    let table = match kind {
        ConfigKind::Syntax => None,
        ConfigKind::Table => Some(TableFields {
            declared: signature.declared.clone(),
            used: signature.used.clone(),
            prototype: signature.prototype.clone(),
        }),
    };
    Projection {
        category: signature.category,
        opens_scope: signature.opens_scope,
        starts_with_close: signature.starts_with_close,
        ends_with_open: signature.ends_with_open,
        complete: signature.complete,
        indent,
        table,
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
struct Fields {
    kind: ConfigKind,
    category: LineCategory,
    opens_scope: bool,
    starts_with_close: bool,
    ends_with_open: bool,
    complete: bool,
    indent: Option<u32>,
    /// Sorted by name.
    declared: Box<[(String, DeclaredName)]>,
    /// Sorted by name.
    used: Box<[(String, u32)]>,
    prototype: Option<String>,
}

/// Canonical, hashable form of a [`Projection`].
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct FrozenConfig(Arc<Fields>);

fn sorted<V: Clone>(map: &FxHashMap<String, V>) -> Box<[(String, V)]> {
    let mut entries: Vec<(String, V)> = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    entries.into_boxed_slice()
}

pub fn freeze(projection: &Projection) -> FrozenConfig {
    let (declared, used, prototype) = match &projection.table {
        Some(table) => (
            sorted(&table.declared),
            sorted(&table.used),
            table.prototype.clone(),
        ),
        None => (Box::default(), Box::default(), None),
    };
    FrozenConfig(Arc::new(Fields {
        kind: projection.kind(),
        category: projection.category,
        opens_scope: projection.opens_scope,
        starts_with_close: projection.starts_with_close,
        ends_with_open: projection.ends_with_open,
        complete: projection.complete,
        indent: projection.indent,
        declared,
        used,
        prototype,
    }))
}

pub fn unfreeze(config: &FrozenConfig) -> Projection {
    let fields = &*config.0;
    let table = match fields.kind {
        ConfigKind::Syntax => None,
        ConfigKind::Table => Some(TableFields {
            declared: fields.declared.iter().cloned().collect(),
            used: fields.used.iter().cloned().collect(),
            prototype: fields.prototype.clone(),
        }),
    };
    Projection {
        category: fields.category,
        opens_scope: fields.opens_scope,
        starts_with_close: fields.starts_with_close,
        ends_with_open: fields.ends_with_open,
        complete: fields.complete,
        indent: fields.indent,
        table,
    }
}

impl FrozenConfig {
    /// Project and freeze in one go.
    pub fn of(signature: &LineSignature, kind: ConfigKind, indent: Option<u32>) -> Self {
        freeze(&project(signature, kind, indent))
    }

    pub fn kind(&self) -> ConfigKind {
        self.0.kind
    }

    pub fn category(&self) -> LineCategory {
        self.0.category
    }

    pub fn opens_scope(&self) -> bool {
        self.0.opens_scope
    }

    pub fn starts_with_close(&self) -> bool {
        self.0.starts_with_close
    }

    pub fn ends_with_open(&self) -> bool {
        self.0.ends_with_open
    }

    pub fn complete(&self) -> bool {
        self.0.complete
    }

    pub fn indent(&self) -> Option<u32> {
        self.0.indent
    }

    pub fn declared(&self) -> &[(String, DeclaredName)] {
        &self.0.declared
    }

    pub fn used(&self) -> &[(String, u32)] {
        &self.0.used
    }

    pub fn prototype(&self) -> Option<&str> {
        self.0.prototype.as_deref()
    }

    /// Same config with a different gold indentation.
    #[must_use]
    pub fn with_indent(&self, indent: Option<u32>) -> Self {
        if self.0.indent == indent {
            return self.clone();
        }
        let mut fields = (*self.0).clone();
        fields.indent = indent;
        FrozenConfig(Arc::new(fields))
    }
}

/// `if False False True` style: category, complete, starts with `}`,
/// ends with `{`.
impl fmt::Display for FrozenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = |b: bool| if b { "True" } else { "False" };
        write!(
            f,
            "{} {} {} {}",
            self.category().name().replace(' ', "-"),
            title(self.complete()),
            title(self.starts_with_close()),
            title(self.ends_with_open()),
        )?;
        if let Some(indent) = self.indent() {
            write!(f, " @{indent}")?;
        }
        for (name, decl) in self.declared() {
            write!(f, " +{name}:{}:{}", decl.ty, decl.depth)?;
        }
        for (name, depth) in self.used() {
            write!(f, " {name}:{depth}")?;
        }
        if let Some(name) = self.prototype() {
            write!(f, " proto:{name}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for FrozenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrozenConfig({self})")
    }
}

/// Whether a scope description could belong to any real line.
pub fn validate_syntax_config(config: &FrozenConfig) -> bool {
    match config.category() {
        LineCategory::CloseCurlyOnly if !config.starts_with_close() => false,
        LineCategory::OpenCurlyOnly if !config.ends_with_open() => false,
        _ => !(config.ends_with_open() && config.complete()),
    }
}

/// Whether a line of this shape opens a scope when it is incomplete.
fn implied_opens_scope(
    category: LineCategory,
    complete: bool,
    starts_with_close: bool,
    ends_with_open: bool,
) -> bool {
    match category {
        LineCategory::Empty
        | LineCategory::Marker
        | LineCategory::OpenCurlyOnly
        | LineCategory::CloseCurlyOnly => ends_with_open,
        LineCategory::DoWhile => false,
        LineCategory::While if starts_with_close => false,
        _ => !complete,
    }
}

/// Parse the four-field scope description used by scaffold predictors,
/// e.g. `if False False True` or `else-if False True True`.
///
/// Any flag other than `True` reads as false.
pub fn syntax_config_from_str(s: &str) -> Option<FrozenConfig> {
    let fields: Vec<&str> = s.split(' ').collect();
    let [category, complete, starts_with_close, ends_with_open] = fields[..] else {
        return None;
    };
    let category = LineCategory::from_name(&category.replace('-', " "))?;
    let (complete, starts_with_close, ends_with_open) =
        (complete == "True", starts_with_close == "True", ends_with_open == "True");
    Some(freeze(&Projection {
        category,
        opens_scope: implied_opens_scope(category, complete, starts_with_close, ends_with_open),
        starts_with_close,
        ends_with_open,
        complete,
        indent: None,
        table: None,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
