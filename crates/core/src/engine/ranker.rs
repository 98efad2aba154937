//! Smart ranking: prefer slots that sit directly against an existing booking
//! of the same length, so accepted bookings pack into contiguous blocks.

use crate::models::appointment::Appointment;
use crate::models::slot::Slot;

/// One point for a same-length booking ending exactly at the slot start, one
/// for a same-length booking starting exactly at the slot end.
pub fn score_slot(slot: &Slot, appointments: &[Appointment]) -> u32 {
    let same_length = |a: &&Appointment| a.duration_minutes() == i64::from(slot.duration);

    let before = appointments
        .iter()
        .filter(same_length)
        .any(|a| a.end_time == slot.start_time);
    let after = appointments
        .iter()
        .filter(same_length)
        .any(|a| a.start_time == slot.end_time);

    u32::from(before) + u32::from(after)
}

/// Returns only the slots with a positive score, best first and otherwise in
/// their original order. When nothing scores, the input comes back untouched.
pub fn rank_slots(slots: Vec<Slot>, appointments: &[Appointment]) -> Vec<Slot> {
    let mut scored: Vec<Slot> = slots
        .iter()
        .filter_map(|slot| {
            let score = score_slot(slot, appointments);
            (score > 0).then(|| Slot {
                score: Some(score),
                ..slot.clone()
            })
        })
        .collect();

    if scored.is_empty() {
        return slots;
    }

    // Stable sort keeps chronological order among equal scores
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}
