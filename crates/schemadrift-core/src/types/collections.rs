//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec sized for per-file line previews (at most a handful).
pub type SmallVec3<T> = SmallVec<[T; 3]>;

/// SmallVec sized for evidence locations (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
