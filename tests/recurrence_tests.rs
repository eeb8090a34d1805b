use checkrota::core::recurrence::applies_on;
use checkrota::models::checklist::{Recurrence, RecurrenceType};
use chrono::NaiveDate;

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn rule(rtype: RecurrenceType) -> Recurrence {
    Recurrence {
        rtype,
        day_of_week: None,
        day_of_month: None,
        specific_date: None,
    }
}

#[test]
fn daily_fires_every_day() {
    let r = rule(RecurrenceType::Daily);
    assert!(applies_on(&r, d("2024-06-03")));
    assert!(applies_on(&r, d("2024-06-04")));
    assert!(applies_on(&r, d("2024-12-31")));
}

#[test]
fn weekly_matches_weekday_only() {
    // day_of_week = 1 is Monday (0 = Sunday)
    let mut r = rule(RecurrenceType::Weekly);
    r.day_of_week = Some(1);

    // 2024-06-03 is a Monday, 2024-06-04 a Tuesday
    assert!(applies_on(&r, d("2024-06-03")));
    assert!(!applies_on(&r, d("2024-06-04")));
    // the following Monday fires again
    assert!(applies_on(&r, d("2024-06-10")));
}

#[test]
fn weekly_sunday_is_zero() {
    let mut r = rule(RecurrenceType::Weekly);
    r.day_of_week = Some(0);
    // 2024-06-02 is a Sunday
    assert!(applies_on(&r, d("2024-06-02")));
    assert!(!applies_on(&r, d("2024-06-03")));
}

#[test]
fn monthly_matches_day_of_month() {
    let mut r = rule(RecurrenceType::Monthly);
    r.day_of_month = Some(15);
    assert!(applies_on(&r, d("2024-06-15")));
    assert!(!applies_on(&r, d("2024-06-14")));
    assert!(applies_on(&r, d("2024-07-15")));
}

#[test]
fn monthly_day_31_never_fires_in_short_months() {
    let mut r = rule(RecurrenceType::Monthly);
    r.day_of_month = Some(31);

    // June has 30 days: the rule fires on no day of the month
    let mut day = d("2024-06-01");
    while day <= d("2024-06-30") {
        assert!(!applies_on(&r, day), "fired unexpectedly on {}", day);
        day = day.succ_opt().unwrap();
    }

    // but it does fire on May 31
    assert!(applies_on(&r, d("2024-05-31")));
}

#[test]
fn once_matches_exact_calendar_day() {
    let mut r = rule(RecurrenceType::Once);
    r.specific_date = Some(d("2024-06-03"));
    assert!(applies_on(&r, d("2024-06-03")));
    assert!(!applies_on(&r, d("2024-06-04")));
    assert!(!applies_on(&r, d("2025-06-03")));
}

#[test]
fn missing_rule_parameters_never_fire() {
    // fail-safe: a rule without the parameter its type needs stays silent
    assert!(!applies_on(&rule(RecurrenceType::Weekly), d("2024-06-03")));
    assert!(!applies_on(&rule(RecurrenceType::Monthly), d("2024-06-03")));
    assert!(!applies_on(&rule(RecurrenceType::Once), d("2024-06-03")));
}

#[test]
fn evaluation_is_deterministic() {
    let mut r = rule(RecurrenceType::Weekly);
    r.day_of_week = Some(3);
    let day = d("2024-06-05"); // Wednesday
    let first = applies_on(&r, day);
    for _ in 0..100 {
        assert_eq!(applies_on(&r, day), first);
    }
    assert!(first);
}

#[test]
fn unknown_recurrence_type_is_rejected_at_parse() {
    assert!(RecurrenceType::from_db_str("hourly").is_none());
    assert!(RecurrenceType::from_db_str("").is_none());
    assert_eq!(
        RecurrenceType::from_db_str("weekly"),
        Some(RecurrenceType::Weekly)
    );
}
