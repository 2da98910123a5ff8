mod dedup;
mod fingerprint;
mod tally;

pub use dedup::EventDeduplicator;
pub use fingerprint::Fingerprint;
pub use tally::TallyStore;
