// --- File: crates/salonify_scheduling/src/overlap.rs ---
//! Half-open interval overlap.
//!
//! `[a.start, a.end)` and `[b.start, b.end)` overlap iff they share an
//! instant. Intervals that only touch (`a.end == b.start`) do not overlap, so
//! back-to-back bookings are legal.

use salonify_common::models::Interval;

/// True iff the two intervals share at least one minute.
pub fn overlaps(a: &Interval, b: &Interval) -> bool {
    a.start() < b.end() && b.start() < a.end()
}

/// Same predicate on `[start, end)` minute ranges.
///
/// Used where a range may not be a valid [`Interval`], e.g. a candidate
/// running past midnight or a blocked range derived from a malformed record.
pub fn overlaps_minutes(a: (u32, u32), b: (u32, u32)) -> bool {
    a.0 < b.1 && b.0 < a.1
}
