//! Static vocabulary consulted by the type matcher and the symbol table.

use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::OnceLock;

/// Primitive type spellings, one word per token.
const PRIMITIVE_TYPES: &[&str] = &[
    "void",
    "short int",
    "short",
    "unsigned short int",
    "signed short int",
    "int",
    "unsigned int",
    "signed int",
    "long int",
    "long",
    "unsigned long int",
    "unsigned long",
    "signed long int",
    "signed long",
    "long long int",
    "long long",
    "unsigned long long int",
    "unsigned long long",
    "signed long long int",
    "signed long long",
    "long long unsigned",
    "char",
    "unsigned char",
    "signed char",
    "float",
    "double",
    "long double",
    "wchar_t",
    "bool",
    "string",
    "int long long",
    "ulong long",
    "unsigned",
    "size_t",
    "FILE",
    "istream",
    "ostream",
    "ofstream",
    "istringstream",
    "stringstream",
    "ifstream",
    "int64_t",
];

/// Generic containers and the number of type arguments each takes.
const CONTAINERS: &[(&str, usize)] = &[
    ("vector", 1),
    ("pair", 2),
    ("map", 2),
    ("set", 1),
    ("queue", 1),
    ("stack", 1),
    ("list", 1),
    ("priority_queue", 1),
];

/// Names that may be used without a visible declaration: library
/// functions, macros, stream objects and a few common stray words.
const IMPLICIT_NAMES: &[&str] = &[
    "cout", "cin", "endl", "break", "min", "true", "max", "false", "sort", "abs", "continue",
    "memset", "puts", "int", "getchar", "swap", "strlen", "getline", "sqrt", "INT_MAX", "ceil",
    "reverse", "acos", "strcmp", "__gcd", "gets", "make_pair", "pow", "char", "exit", "tolower",
    "string", "fabs", "register", "fixed", "freopen", "toupper", "isdigit", "strcpy",
    "max_element", "putchar", "INT_MIN", "floor", "greater", "pair", "setprecision", "long",
    "unique", "ios", "stdin", "isupper", "double", "min_element", "next_permutation", "atoi",
    "log2", "count", "stdout", "strstr", "transform", "find", "cerr", "isalpha", "lower_bound",
    "fill", "upper_bound", "assert", "islower", "data", "NULL", "__builtin_popcount",
    "LLONG_MAX", "bitset", "clock", "deque", "bool", "static_cast", "binary_search", "srand",
    "log", "ostringstream", "__typeof", "multiset", "memcpy", "auto", "iterator", "multimap",
    "CLOCKS_PER_SEC", "numeric_limits", "esto", "temp", "modf", "accumulate", "tmp", "LONG_MAX",
    "time", "int32_t", "put_char", "cnt", "float", "ULL", "LONG_LONG_MAX", "tuple", "vector",
    "make_tuple", "get", "not", "rand", "Home", "exp", "strcat", "log10", "clock_t", "towupper",
    "memcmp", "remove", "flush", "round", "time_p", "asm", "EOF", "len", "signed", "fmod",
    "__builtin_clz", "stringstream", "INFINITY", "atan", "fill_n", "strchr", "list", "atoll",
    "stable_sort", "__float128", "LLONG_MIN", "__builtin_popcountll", "loc", "locale",
    "basic_string", "levl", "trunc", "cbrt", "clog", "__builtin_ctz", "xor", "reverse_iterator",
    "LONG_LONG_MIN", "toascii", "map", "stderr", "enum", "RAND_MAX", "int64_t", "const", "maxn",
    "LC_ALL", "setlocale", "__lg", "strncpy", "set", "unsigned", "less", "EXIT_SUCCESS", "equal",
    "abort", "showpoint", "iter_swap", "qsort", "powl", "isalnum", "ios_base", "free", "log2l",
];

/// Read-only lookup tables, built once per process.
#[derive(Debug)]
pub struct Tables {
    /// Primitive spellings split into words, longest first.
    primitives: Vec<Vec<&'static str>>,
    containers: FxHashMap<&'static str, usize>,
    implicit: FxHashSet<&'static str>,
}

static STANDARD: OnceLock<Tables> = OnceLock::new();

impl Tables {
    /// The process-wide tables (lazily initialized).
    pub fn standard() -> &'static Tables {
        STANDARD.get_or_init(Tables::build)
    }

    fn build() -> Tables {
        let mut primitives: Vec<Vec<&'static str>> = PRIMITIVE_TYPES
            .iter()
            .map(|spelling| spelling.split(' ').collect())
            .collect();
        // Stable: ties keep their listed order.
        primitives.sort_by(|a, b| b.len().cmp(&a.len()));

        Tables {
            primitives,
            containers: CONTAINERS.iter().copied().collect(),
            implicit: IMPLICIT_NAMES.iter().copied().collect(),
        }
    }

    /// Primitive spellings in match-priority order.
    pub fn primitives(&self) -> impl Iterator<Item = &[&'static str]> {
        self.primitives.iter().map(Vec::as_slice)
    }

    /// Number of type arguments for a container name.
    pub fn container_arity(&self, name: &str) -> Option<usize> {
        self.containers.get(name).copied()
    }

    /// The name may be used without being declared.
    pub fn is_implicit(&self, name: &str) -> bool {
        self.implicit.contains(name)
    }
}
