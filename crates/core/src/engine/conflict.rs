use crate::engine::interval::Interval;
use crate::models::appointment::Appointment;
use crate::models::slot::Slot;

/// First persisted appointment that overlaps `candidate`, if any.
pub fn find_conflict<'a, I>(candidate: &Interval, appointments: I) -> Option<&'a Appointment>
where
    I: IntoIterator<Item = &'a Appointment>,
{
    appointments
        .into_iter()
        .find(|appointment| appointment.interval().overlaps(candidate))
}

pub fn is_free(candidate: &Interval, appointments: &[Appointment]) -> bool {
    find_conflict(candidate, appointments).is_none()
}

/// Keeps only the slots no appointment overlaps, preserving order.
///
/// The caller decides the scope: appointments of one service for plain
/// availability, or every appointment for the shared-calendar view.
pub fn filter_available(slots: Vec<Slot>, appointments: &[Appointment]) -> Vec<Slot> {
    slots
        .into_iter()
        .filter(|slot| is_free(&slot.interval(), appointments))
        .collect()
}
