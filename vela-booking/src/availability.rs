use chrono::{Duration, NaiveDate};
use vela_shared::ServicePackage;

/// Pure availability predicate for a requested booking date.
///
/// A date is bookable when it is not in the past, falls inside the
/// package's advance-booking window, and is not a blackout date. The
/// result is never cached; callers re-evaluate whenever the blackout
/// list or the current date changes.
pub fn is_date_available(date: NaiveDate, today: NaiveDate, package: &ServicePackage) -> bool {
    if date < today {
        return false;
    }

    let latest = today + Duration::days(package.advance_booking_days as i64);
    if date > latest {
        return false;
    }

    !package.is_blackout(date)
}
