use shared::{Category, Detection};

/// Identity of one inference instance.
///
/// Two snapshots carrying the same underlying inference compare equal;
/// snapshots from different inferences differ through the service's
/// processing-time marker. Known precision limit: if the service ever
/// reuses the exact processing-time value for two back-to-back
/// inferences of the same category, the second one is missed. The
/// service offers no stronger marker to key on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    category: Category,
    marker: u64,
}

impl Fingerprint {
    /// Derives the identity of a detection, or `None` when the detection
    /// can never count as an event (errors and unrecognized labels).
    pub fn of(detection: &Detection) -> Option<Fingerprint> {
        if !detection.category.is_countable() {
            return None;
        }
        Some(Fingerprint {
            category: detection.category,
            marker: detection.processing_time.to_bits(),
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection(category: Category, processing_time: f64) -> Detection {
        Detection {
            category,
            x: None,
            y: None,
            confidence: None,
            processing_time,
        }
    }

    #[test]
    fn identical_detections_share_a_fingerprint() {
        let d = detection(Category::Can, 12.3);
        assert_eq!(Fingerprint::of(&d), Fingerprint::of(&d.clone()));
    }

    #[test]
    fn distinct_markers_yield_distinct_fingerprints() {
        let first = Fingerprint::of(&detection(Category::Can, 12.3)).unwrap();
        let second = Fingerprint::of(&detection(Category::Can, 45.1)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn distinct_categories_yield_distinct_fingerprints() {
        let can = Fingerprint::of(&detection(Category::Can, 12.3)).unwrap();
        let plastic = Fingerprint::of(&detection(Category::Plastic, 12.3)).unwrap();
        assert_ne!(can, plastic);
    }

    #[test]
    fn errors_and_unknowns_have_no_fingerprint() {
        assert_eq!(Fingerprint::of(&detection(Category::Error, 3.0)), None);
        assert_eq!(Fingerprint::of(&detection(Category::Unknown, 3.0)), None);
    }
}
