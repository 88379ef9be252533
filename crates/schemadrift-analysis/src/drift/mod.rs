//! Drift detection: field-level violations and set-level detections.

pub mod detections;
pub mod detector;
pub mod field_mismatch;
pub mod types;
pub mod variations;
pub mod view;

pub use detector::{DriftDetector, DriftResult};
pub use types::{Detection, DetectionType, Location, Severity, Violation};
pub use variations::{wrong_variations, VariationKind, WrongVariation};
