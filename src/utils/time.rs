use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};

/// Whole years between `birth` and `on`, calendar-aware: the year
/// difference is decremented while the birthday has not yet occurred.
pub fn calculate_age(birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Birth-date window equivalent to an age bracket under `calculate_age`.
/// `after` is exclusive, `until` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDateRange {
    pub after: Option<NaiveDate>,
    pub until: NaiveDate,
}

/// Parses `"min-max"` into the closed age range [min, max] and `"min+"`
/// into an open-ended one. Malformed brackets yield no predicate.
pub fn age_bracket_range(bracket: &str, today: NaiveDate) -> Option<BirthDateRange> {
    let bracket = bracket.trim();
    if let Some(min_str) = bracket.strip_suffix('+') {
        let min: u32 = min_str.parse().ok()?;
        let until = today.checked_sub_months(Months::new(min * 12))?;
        return Some(BirthDateRange { after: None, until });
    }

    let (min_str, max_str) = bracket.split_once('-')?;
    let min: u32 = min_str.parse().ok()?;
    let max: u32 = max_str.parse().ok()?;
    if min > max {
        return None;
    }
    // Age <= max  <=>  birth date strictly after today - (max + 1) years.
    let after = today.checked_sub_months(Months::new((max + 1) * 12))?;
    let until = today.checked_sub_months(Months::new(min * 12))?;
    Some(BirthDateRange {
        after: Some(after),
        until,
    })
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

fn first_of_previous_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 1 {
        NaiveDate::from_ymd_opt(date.year() - 1, 12, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() - 1, 1)
    }
}

/// Half-open `[start, end)` UTC window for a named created-date bucket,
/// computed against the request-time clock.
pub fn date_bucket_range(
    bucket: &str,
    now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let today = now.date_naive();
    let tomorrow = today.checked_add_days(Days::new(1))?;

    match bucket {
        "today" => Some((day_start(today), day_start(tomorrow))),
        "yesterday" => {
            let yesterday = today.checked_sub_days(Days::new(1))?;
            Some((day_start(yesterday), day_start(today)))
        }
        "last7days" => {
            let start = today.checked_sub_days(Days::new(6))?;
            Some((day_start(start), day_start(tomorrow)))
        }
        "last30days" => {
            let start = today.checked_sub_days(Days::new(29))?;
            Some((day_start(start), day_start(tomorrow)))
        }
        "thisMonth" => Some((
            day_start(first_of_month(today)?),
            day_start(first_of_next_month(today)?),
        )),
        "lastMonth" => Some((
            day_start(first_of_previous_month(today)?),
            day_start(first_of_month(today)?),
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn age_decrements_before_birthday() {
        let birth = date(2000, 6, 15);
        assert_eq!(calculate_age(birth, date(2024, 6, 14)), 23);
        assert_eq!(calculate_age(birth, date(2024, 6, 15)), 24);
        assert_eq!(calculate_age(birth, date(2024, 6, 16)), 24);
    }

    #[test]
    fn closed_bracket_covers_min_to_max_inclusive() {
        let today = date(2024, 6, 15);
        let range = age_bracket_range("18-25", today).expect("range");
        assert_eq!(range.until, date(2006, 6, 15));
        assert_eq!(range.after, Some(date(1998, 6, 15)));

        // Exactly 18 today: included.
        let birth = date(2006, 6, 15);
        assert_eq!(calculate_age(birth, today), 18);
        assert!(birth <= range.until);

        // Exactly 26 today: excluded (boundary is exclusive).
        let birth = date(1998, 6, 15);
        assert_eq!(calculate_age(birth, today), 26);
        assert!(birth <= range.after.expect("after"));

        // 25 years and 364 days: still included.
        let birth = date(1998, 6, 16);
        assert_eq!(calculate_age(birth, today), 25);
        assert!(birth > range.after.expect("after") && birth <= range.until);
    }

    #[test]
    fn open_bracket_has_no_lower_bound() {
        let today = date(2024, 6, 15);
        let range = age_bracket_range("41+", today).expect("range");
        assert_eq!(range.after, None);
        assert_eq!(range.until, date(1983, 6, 15));

        let birth = date(1983, 6, 15);
        assert_eq!(calculate_age(birth, today), 41);
        assert!(birth <= range.until);

        let birth = date(1983, 6, 16);
        assert_eq!(calculate_age(birth, today), 40);
        assert!(birth > range.until);
    }

    #[test]
    fn malformed_brackets_are_ignored() {
        let today = date(2024, 6, 15);
        assert!(age_bracket_range("", today).is_none());
        assert!(age_bracket_range("abc", today).is_none());
        assert!(age_bracket_range("25-18", today).is_none());
        assert!(age_bracket_range("18-", today).is_none());
    }

    #[test]
    fn day_buckets() {
        let now = date(2024, 3, 10).and_time(NaiveTime::MIN).and_utc() + chrono::Duration::hours(15);

        let (start, end) = date_bucket_range("today", now).expect("today");
        assert_eq!(start, day_start(date(2024, 3, 10)));
        assert_eq!(end, day_start(date(2024, 3, 11)));

        let (start, end) = date_bucket_range("yesterday", now).expect("yesterday");
        assert_eq!(start, day_start(date(2024, 3, 9)));
        assert_eq!(end, day_start(date(2024, 3, 10)));

        let (start, end) = date_bucket_range("last7days", now).expect("last7days");
        assert_eq!(start, day_start(date(2024, 3, 4)));
        assert_eq!(end, day_start(date(2024, 3, 11)));
    }

    #[test]
    fn month_buckets_cross_year_boundary() {
        let now = day_start(date(2024, 1, 20));

        let (start, end) = date_bucket_range("thisMonth", now).expect("thisMonth");
        assert_eq!(start, day_start(date(2024, 1, 1)));
        assert_eq!(end, day_start(date(2024, 2, 1)));

        let (start, end) = date_bucket_range("lastMonth", now).expect("lastMonth");
        assert_eq!(start, day_start(date(2023, 12, 1)));
        assert_eq!(end, day_start(date(2024, 1, 1)));
    }

    #[test]
    fn unknown_bucket_is_ignored() {
        let now = day_start(date(2024, 3, 10));
        assert!(date_bucket_range("fortnight", now).is_none());
    }
}
