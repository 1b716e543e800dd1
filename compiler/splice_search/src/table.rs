//! Symbol table: one binding map per scope level.
//!
//! Levels are `im::HashMap`s inside an `im::Vector`, so cloning a table for
//! a sibling candidate shares every level until one of them writes.

use crate::Rejection;
use im::{HashMap, Vector};
use splice_ir::{DeclaredName, DeclaredType, Tables};

/// One declared name.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Binding {
    pub ty: DeclaredType,
    /// Introduced by a prototype, which a later definition may repeat.
    pub is_prototype: bool,
}

/// Bindings visible to one candidate.
///
/// Level 0 is the outermost scope. Types are recorded but never compared:
/// acceptance depends on names alone.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    levels: Vector<HashMap<String, Binding>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut levels = Vector::new();
        levels.push_back(HashMap::new());
        SymbolTable { levels }
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Visible at `level` or any enclosing level.
    pub fn resolves(&self, name: &str, level: usize) -> bool {
        self.levels
            .iter()
            .take(level + 1)
            .any(|bindings| bindings.contains_key(name))
    }

    /// Bound at exactly `level`.
    pub fn lookup_at(&self, name: &str, level: usize) -> Option<&Binding> {
        self.levels.get(level)?.get(name)
    }

    /// Type of the innermost binding of `name` visible from `level`.
    pub fn type_of(&self, name: &str, level: usize) -> Option<&DeclaredType> {
        self.levels
            .iter()
            .take(level + 1)
            .rev()
            .find_map(|bindings| bindings.get(name))
            .map(|binding| &binding.ty)
    }

    /// Keep the levels up to `indent` and open a fresh one above them.
    fn enter(&mut self, indent: usize) {
        self.levels.truncate(indent + 1);
        while self.levels.len() < indent + 1 {
            self.levels.push_back(HashMap::new());
        }
        self.levels.push_back(HashMap::new());
    }

    fn bind(&mut self, name: &str, level: usize, binding: Binding) {
        if let Some(bindings) = self.levels.get_mut(level) {
            bindings.insert(name.to_string(), binding);
        }
    }

    /// Check one line's names at indentation `indent` and install its
    /// declarations.
    ///
    /// Declarations come first, so a line may use what it declares. Depth 1
    /// names land in the scope the line opens.
    pub fn check_line(
        &mut self,
        indent: u32,
        declared: &[(String, DeclaredName)],
        used: &[(String, u32)],
        prototype: Option<&str>,
        tables: &Tables,
    ) -> Result<(), Rejection> {
        let indent = indent as usize;
        self.enter(indent);

        for (name, decl) in declared {
            let level = indent + decl.depth as usize;
            if self.lookup_at(name, level).is_some_and(|b| !b.is_prototype) {
                return Err(Rejection::Redeclared(name.clone()));
            }
            tracing::trace!(name = %name, ty = %decl.ty, level, "bound");
            let binding = Binding {
                ty: decl.ty.clone(),
                is_prototype: prototype == Some(name.as_str()),
            };
            self.bind(name, level, binding);
        }

        for (name, depth) in used {
            if tables.is_implicit(name) {
                continue;
            }
            if !self.resolves(name, indent + *depth as usize) {
                return Err(Rejection::Undeclared(name.clone()));
            }
        }
        Ok(())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests {
    use super::*;

    fn names(list: &[(&str, u32)]) -> Vec<(String, u32)> {
        list.iter().map(|(n, d)| ((*n).to_string(), *d)).collect()
    }

    fn typed(list: &[(&str, &str, u32)]) -> Vec<(String, DeclaredName)> {
        list.iter()
            .map(|(n, ty, depth)| {
                let ty = DeclaredType::primitive(*ty);
                ((*n).to_string(), DeclaredName { ty, depth: *depth })
            })
            .collect()
    }

    fn ints(list: &[(&str, u32)]) -> Vec<(String, DeclaredName)> {
        let list: Vec<(&str, &str, u32)> = list.iter().map(|(n, d)| (*n, "int", *d)).collect();
        typed(&list)
    }

    fn is_prototype(table: &SymbolTable, name: &str, level: usize) -> Option<bool> {
        table.lookup_at(name, level).map(|b| b.is_prototype)
    }

    fn check(
        table: &mut SymbolTable,
        indent: u32,
        declared: &[(&str, u32)],
        used: &[(&str, u32)],
    ) -> Result<(), Rejection> {
        table.check_line(indent, &ints(declared), &names(used), None, Tables::standard())
    }

    #[test]
    fn test_redeclaration_in_same_scope() {
        let mut table = SymbolTable::new();
        assert_eq!(check(&mut table, 0, &[("x", 0)], &[]), Ok(()));
        assert_eq!(
            check(&mut table, 0, &[("x", 0)], &[]),
            Err(Rejection::Redeclared("x".to_string()))
        );
    }

    #[test]
    fn test_outer_names_are_visible_inside() {
        let mut table = SymbolTable::new();
        check(&mut table, 0, &[("x", 0)], &[]).unwrap();
        assert_eq!(check(&mut table, 1, &[], &[("x", 0)]), Ok(()));
        // Shadowing in the inner scope is fine.
        assert_eq!(check(&mut table, 1, &[("x", 0)], &[]), Ok(()));
    }

    #[test]
    fn test_inner_names_vanish_when_scope_closes() {
        let mut table = SymbolTable::new();
        check(&mut table, 1, &[("y", 0)], &[]).unwrap();
        assert_eq!(
            check(&mut table, 0, &[], &[("y", 0)]),
            Err(Rejection::Undeclared("y".to_string()))
        );
    }

    #[test]
    fn test_depth_one_names_land_in_the_opened_scope() {
        let mut table = SymbolTable::new();
        // for (int i = 0; i < n; i++) {
        check(&mut table, 0, &[("n", 0)], &[]).unwrap();
        assert_eq!(check(&mut table, 0, &[("i", 1)], &[("i", 1), ("n", 1)]), Ok(()));
        assert_eq!(is_prototype(&table, "i", 1), Some(false));
        assert_eq!(check(&mut table, 1, &[], &[("i", 0)]), Ok(()));
    }

    #[test]
    fn test_prototype_may_be_defined_later() {
        let mut table = SymbolTable::new();
        let solve = ints(&[("solve", 0)]);
        let std = Tables::standard();
        assert_eq!(table.check_line(0, &solve, &[], Some("solve"), std), Ok(()));
        assert_eq!(is_prototype(&table, "solve", 0), Some(true));
        assert_eq!(table.check_line(0, &solve, &[], None, std), Ok(()));
        assert_eq!(
            table.check_line(0, &solve, &[], None, std),
            Err(Rejection::Redeclared("solve".to_string()))
        );
    }

    #[test]
    fn test_implicit_names_need_no_declaration() {
        let mut table = SymbolTable::new();
        assert_eq!(check(&mut table, 0, &[], &[("cout", 0), ("endl", 0)]), Ok(()));
    }

    #[test]
    fn test_clones_are_independent() {
        let mut table = SymbolTable::new();
        check(&mut table, 0, &[("x", 0)], &[]).unwrap();
        let mut sibling = table.clone();
        check(&mut sibling, 0, &[("y", 0)], &[]).unwrap();
        assert_eq!(table.lookup_at("y", 0), None);
        assert_eq!(is_prototype(&sibling, "x", 0), Some(false));
        assert_eq!(sibling.depth(), 2);
    }

    #[test]
    fn test_bindings_keep_their_declared_type() {
        let mut table = SymbolTable::new();
        let std = Tables::standard();
        let outer = typed(&[("x", "long long", 0)]);
        table.check_line(0, &outer, &[], None, std).unwrap();
        let inner = typed(&[("x", "double", 0)]);
        table.check_line(1, &inner, &[], None, std).unwrap();

        assert_eq!(table.type_of("x", 1), Some(&DeclaredType::primitive("double")));
        assert_eq!(table.type_of("x", 0), Some(&DeclaredType::primitive("long long")));
        assert_eq!(table.type_of("y", 1), None);
    }

    #[test]
    fn test_type_mismatch_is_not_a_rejection() {
        let mut table = SymbolTable::new();
        let std = Tables::standard();
        let proto = typed(&[("solve", "int", 0)]);
        table.check_line(0, &proto, &[], Some("solve"), std).unwrap();
        let definition = typed(&[("solve", "bool", 0)]);
        assert_eq!(table.check_line(0, &definition, &[], None, std), Ok(()));
        assert_eq!(table.type_of("solve", 0), Some(&DeclaredType::primitive("bool")));
    }
}
