//! Filter in or out nested JSON-like instances by field rules.
//!
//! Fields are addressed by dotted paths (`a.b`, `items.[2].name`). Filters
//! can test exact equality, membership, anchored or unanchored regexes, or
//! rewrite a field in place. Several filters can be combined as one
//! compound filter or applied separately.

pub mod errors;
pub mod context;
pub mod engine;
pub mod filter;
pub mod path;
mod comparison;
mod parser;

pub use context::{ErrorPolicy, FilterOptions, Mode};
pub use engine::{filter_data, filter_value, FilterEngine};
pub use errors::{FilterError, Result};
pub use filter::{EvalResult, Filter, FilterKind, FilterSpec};
pub use path::{
    as_indexable, as_indexable_mut, assign, exists, parse_path, resolve, resolve_mut, Indexable,
    Path, PathKey,
};
