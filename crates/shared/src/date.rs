//! Thai calendar helpers.
//!
//! Dates shown to farmers use the Buddhist Era (BE) year, which is the
//! Gregorian year plus 543. The short form is `d/m/yy` with a two digit BE
//! year, e.g. `19/10/69` for 19 October 2026.

use time::{
    Date, Month, OffsetDateTime, UtcOffset,
    format_description::BorrowedFormatItem,
    macros::{format_description, offset},
};

pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Thailand does not observe daylight saving time.
pub const BANGKOK: UtcOffset = offset!(+7);

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

const THAI_MONTHS_SHORT: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.",
    "ธ.ค.",
];

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const YEAR_MONTH: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]");

pub const THAI_WEEKDAYS_SHORT: [&str; 7] = ["อา.", "จ.", "อ.", "พ.", "พฤ.", "ศ.", "ส."];

pub fn today() -> Date {
    OffsetDateTime::now_utc().to_offset(BANGKOK).date()
}

pub fn buddhist_year(date: Date) -> i32 {
    date.year() + BUDDHIST_ERA_OFFSET
}

pub fn thai_month_name(month: Month) -> &'static str {
    THAI_MONTHS[month as usize - 1]
}

pub fn thai_month_short(month: Month) -> &'static str {
    THAI_MONTHS_SHORT[month as usize - 1]
}

/// `19/10/69`
pub fn format_thai_short(date: Date) -> String {
    format!(
        "{}/{}/{:02}",
        date.day(),
        date.month() as u8,
        buddhist_year(date).rem_euclid(100)
    )
}

/// `19 ต.ค. 2569`
pub fn format_thai_medium(date: Date) -> String {
    format!(
        "{} {} {}",
        date.day(),
        thai_month_short(date.month()),
        buddhist_year(date)
    )
}

/// `ตุลาคม 2569`
pub fn format_thai_month(year: i32, month: Month) -> String {
    format!("{} {}", thai_month_name(month), year + BUDDHIST_ERA_OFFSET)
}

/// Parses `d/m/yy` (two digit BE year, read as 25yy) or `d/m/yyyy` (full BE year).
pub fn parse_thai_short(value: &str) -> crate::Result<Date> {
    let parts = value.trim().split('/').collect::<Vec<_>>();
    let [day, month, year] = parts.as_slice() else {
        crate::user!("invalid date '{}', expected d/m/yy", value);
    };

    let (Ok(day), Ok(month), Ok(year)) = (
        day.parse::<u8>(),
        month.parse::<u8>(),
        year.parse::<i32>(),
    ) else {
        crate::user!("invalid date '{}', expected d/m/yy", value);
    };

    let buddhist_year = match year {
        0..=99 => 2500 + year,
        _ => year,
    };

    let month = Month::try_from(month)?;

    Ok(Date::from_calendar_date(
        buddhist_year - BUDDHIST_ERA_OFFSET,
        month,
        day,
    )?)
}

/// Parses the `YYYY-MM` value of an html month input (Gregorian year).
pub fn parse_year_month(value: &str) -> Option<(i32, Month)> {
    let first = Date::parse(&format!("{}-01", value.trim()), ISO_DATE).ok()?;

    Some((first.year(), first.month()))
}

pub fn format_year_month(year: i32, month: Month) -> crate::Result<String> {
    Ok(Date::from_calendar_date(year, month, 1)?.format(YEAR_MONTH)?)
}

/// Parses the `YYYY-MM-DD` value of an html date input.
pub fn parse_iso_date(value: &str) -> crate::Result<Date> {
    let Ok(date) = Date::parse(value.trim(), ISO_DATE) else {
        crate::user!("invalid date '{}'", value);
    };

    Ok(date)
}

pub fn format_iso_date(date: Date) -> crate::Result<String> {
    Ok(date.format(ISO_DATE)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_format_thai_short() {
        assert_eq!(format_thai_short(date!(2026 - 10 - 19)), "19/10/69");
        assert_eq!(format_thai_short(date!(2057 - 01 - 02)), "2/1/00");
        assert_eq!(format_thai_short(date!(2030 - 03 - 05)), "5/3/73");
    }

    #[test]
    fn test_format_thai_medium_and_month() {
        assert_eq!(format_thai_medium(date!(2026 - 10 - 19)), "19 ต.ค. 2569");
        assert_eq!(format_thai_month(2026, Month::January), "มกราคม 2569");
    }

    #[test]
    fn test_parse_thai_short() {
        assert_eq!(parse_thai_short("19/10/69").unwrap(), date!(2026 - 10 - 19));
        assert_eq!(parse_thai_short("1/2/2570").unwrap(), date!(2027 - 02 - 01));
        assert_eq!(
            parse_thai_short(&format_thai_short(date!(2025 - 12 - 31))).unwrap(),
            date!(2025 - 12 - 31)
        );
    }

    #[test]
    fn test_parse_thai_short_rejects_garbage() {
        assert!(parse_thai_short("19-10-69").is_err());
        assert!(parse_thai_short("31/2/69").is_err());
        assert!(parse_thai_short("1/13/69").is_err());
        assert!(parse_thai_short("").is_err());
    }

    #[test]
    fn test_year_month() {
        assert_eq!(parse_year_month("2026-10"), Some((2026, Month::October)));
        assert_eq!(parse_year_month("2026-13"), None);
        assert_eq!(parse_year_month("October"), None);
        assert_eq!(parse_year_month(" 2027-01 "), Some((2027, Month::January)));
        assert_eq!(format_year_month(2026, Month::March).unwrap(), "2026-03");
    }

    #[test]
    fn test_iso_date() {
        let date = parse_iso_date("2026-10-19").unwrap();
        assert_eq!(date, date!(2026 - 10 - 19));
        assert_eq!(format_iso_date(date).unwrap(), "2026-10-19");
        assert_eq!(format_iso_date(date!(2027 - 02 - 01)).unwrap(), "2027-02-01");
        assert!(parse_iso_date("19/10/2026").is_err());
        assert!(parse_iso_date("2026-02-30").is_err());
        assert_eq!(
            parse_iso_date("").unwrap_err().to_string(),
            "invalid date ''"
        );
    }
}
