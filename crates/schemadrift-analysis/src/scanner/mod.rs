//! Usage scanner: exclusion-pruned file walking and line-indexed text.
//!
//! No parsing happens here. Component code, SQL, Prisma schemas and
//! structured data all go through the same text pipeline so that every
//! downstream matcher sees them uniformly.

pub mod association;
pub mod exclusions;
pub mod types;
pub mod walker;

pub use association::{related_to, AssociationRule};
pub use exclusions::ExclusionPatterns;
pub use types::{ReadFailure, ScanOutput, ScanStats, SourceFile};
pub use walker::Scanner;
