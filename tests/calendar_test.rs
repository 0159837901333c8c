use chrono::{Datelike, NaiveDate};

use tempodash::calendar::{
    assemble_month, days_in_month, degraded_month, first_weekday_offset, month_dates,
};
use tempodash::tempo::{DayRecord, TempoColor};

#[test]
fn every_month_of_a_year_is_contiguous_and_full_length() {
    for year in [2024, 2025, 2026, 2027, 2028] {
        for month0 in 0..12 {
            let n = days_in_month(year, month0).unwrap();
            let days = assemble_month(year, month0, &[]).unwrap();
            assert_eq!(days.len() as u32, n, "{}-{}", year, month0);
            let mut expected_day = 0;
            for cell in &days {
                expected_day += 1;
                assert_eq!(cell.day, expected_day);
                assert_eq!(cell.date.month0(), month0);
                assert_eq!(cell.date.year(), year);
            }
        }
    }
}

#[test]
fn leap_year_february_has_29_days() {
    assert_eq!(days_in_month(2028, 1).unwrap(), 29);
    assert_eq!(days_in_month(2026, 1).unwrap(), 28);
    let dates = month_dates(2028, 1).unwrap();
    assert_eq!(dates.last().unwrap().day(), 29);
}

#[test]
fn batch_records_land_on_their_dates() {
    let records = [
        DayRecord {
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            color: TempoColor::Red,
        },
        DayRecord {
            date: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
            color: TempoColor::White,
        },
    ];
    let days = assemble_month(2026, 1, &records).unwrap();
    assert_eq!(days[0].color, TempoColor::Red);
    assert_eq!(days[27].color, TempoColor::White);
    assert!(
        days[1..27].iter().all(|c| c.color == TempoColor::Unknown),
        "unlisted days must be unknown"
    );
}

#[test]
fn degraded_month_never_shortens() {
    for (year, month0, expected) in [(2026, 0, 31), (2026, 1, 28), (2028, 1, 29), (2026, 3, 30)] {
        let days = degraded_month(year, month0).unwrap();
        assert_eq!(days.len(), expected);
        assert!(days.iter().all(|c| c.color == TempoColor::Unknown));
    }
}

#[test]
fn grid_offset_matches_the_first_weekday() {
    // June 2026 starts on a Monday, November 2026 on a Sunday
    assert_eq!(first_weekday_offset(2026, 5).unwrap(), 0);
    assert_eq!(first_weekday_offset(2026, 10).unwrap(), 6);
}
