//! Recurrence evaluation. Pure: no clock, no store, no side effects.

use crate::models::checklist::{Recurrence, RecurrenceType};
use chrono::{Datelike, NaiveDate};

/// Does the schedule rule fire on `date`?
///
/// - daily: always
/// - weekly: weekday match, 0=Sunday..6=Saturday
/// - monthly: day-of-month match, no clamping. A rule targeting day 31
///   never fires in shorter months.
/// - once: calendar-day match against `specific_date`
///
/// A rule missing the parameter its type needs never fires (fail-safe).
pub fn applies_on(rule: &Recurrence, date: NaiveDate) -> bool {
    match rule.rtype {
        RecurrenceType::Daily => true,
        RecurrenceType::Weekly => match rule.day_of_week {
            Some(dow) => date.weekday().num_days_from_sunday() == dow,
            None => false,
        },
        RecurrenceType::Monthly => match rule.day_of_month {
            Some(dom) => date.day() == dom,
            None => false,
        },
        RecurrenceType::Once => match rule.specific_date {
            Some(d) => d == date,
            None => false,
        },
    }
}
