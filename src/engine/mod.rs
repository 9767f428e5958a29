// The recommendation engine — pure functions over catalog and event snapshots.
//
// Nothing in this module performs I/O. Callers fetch a catalog snapshot and
// the event history from the storage layer and hand plain data in. Each call
// is self-contained: the similarity model is rebuilt per cycle and never
// cached across requests, so concurrent calls cannot interfere.

pub mod collaborative;
pub mod content;
pub mod hybrid;
pub mod profile;
