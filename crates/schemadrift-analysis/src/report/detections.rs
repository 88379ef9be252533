//! Set-level drift detections, grouped by type for rendering.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::drift::{Detection, DetectionType};

/// `{ detections }`, sorted by type then entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub detections: Vec<Detection>,
}

impl DetectionReport {
    pub fn new(mut detections: Vec<Detection>) -> Self {
        detections.sort_by(|a, b| {
            a.detection_type
                .cmp(&b.detection_type)
                .then_with(|| a.entity.cmp(&b.entity))
        });
        Self { detections }
    }

    /// Detections grouped by type; only types with at least one detection appear.
    pub fn by_type(&self) -> BTreeMap<DetectionType, Vec<&Detection>> {
        let mut groups: BTreeMap<DetectionType, Vec<&Detection>> = BTreeMap::new();
        for d in &self.detections {
            groups.entry(d.detection_type).or_default().push(d);
        }
        groups
    }

    pub fn count(&self, detection_type: DetectionType) -> usize {
        self.detections
            .iter()
            .filter(|d| d.detection_type == detection_type)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(t: DetectionType, entity: &str) -> Detection {
        Detection {
            detection_type: t,
            entity: entity.into(),
            message: String::new(),
            action: String::new(),
            evidence: Vec::new(),
            fields: None,
        }
    }

    #[test]
    fn groups_in_type_order() {
        let report = DetectionReport::new(vec![
            detection(DetectionType::Unused, "B"),
            detection(DetectionType::Missing, "Z"),
            detection(DetectionType::Unused, "A"),
        ]);
        let groups = report.by_type();
        let keys: Vec<DetectionType> = groups.keys().copied().collect();
        assert_eq!(keys, vec![DetectionType::Missing, DetectionType::Unused]);
        assert_eq!(groups[&DetectionType::Unused][0].entity, "A");
        assert_eq!(report.count(DetectionType::Unused), 2);
    }

    #[test]
    fn serializes_type_field() {
        let json = serde_json::to_value(detection(DetectionType::Outdated, "User")).unwrap();
        assert_eq!(json["type"], "outdated");
        assert!(json.get("fields").is_none());
    }
}
