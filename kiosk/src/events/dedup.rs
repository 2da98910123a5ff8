use super::fingerprint::Fingerprint;

/// Single-slot deduplicator over detection fingerprints.
///
/// The detector only ever republishes its single latest result, so the
/// only meaningful comparison is against the most recently accepted
/// identity; no history window is kept. A fingerprint that reappears
/// after a different one was accepted in between counts again.
#[derive(Debug, Default)]
pub struct EventDeduplicator {
    last_accepted: Option<Fingerprint>,
}

impl EventDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly when the fingerprint is a new event. `None`
    /// never counts.
    pub fn consider(&mut self, fingerprint: Option<Fingerprint>) -> bool {
        match fingerprint {
            None => false,
            Some(fp) if self.last_accepted == Some(fp) => false,
            Some(fp) => {
                self.last_accepted = Some(fp);
                true
            }
        }
    }

    /// Forgets the stored identity. Called on every mode entry and exit:
    /// the detector restarts with the mode session, so a remembered
    /// fingerprint would belong to a dead session.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}
