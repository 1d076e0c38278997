use strum::VariantArray;
use time::{Date, Month};

use crate::{Booking, BookingBoard, BookingKind, board::active_on};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Past,
    Available,
    Limited,
    Full,
}

impl Availability {
    /// At least half of the slots taken counts as limited.
    pub fn from_load(active: usize, capacity: usize) -> Self {
        if active >= capacity {
            Availability::Full
        } else if active * 2 >= capacity {
            Availability::Limited
        } else {
            Availability::Available
        }
    }

    /// Days a farmer can still book.
    pub fn is_bookable(&self) -> bool {
        matches!(self, Availability::Available | Availability::Limited)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Availability::Past => "day-past",
            Availability::Available => "day-available",
            Availability::Limited => "day-limited",
            Availability::Full => "day-full",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            Availability::Past => "calendar.past",
            Availability::Available => "calendar.available",
            Availability::Limited => "calendar.limited",
            Availability::Full => "calendar.full",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalendarDay {
    pub date: Date,
    pub is_today: bool,
    pub active: usize,
    pub availability: Availability,
    pub bookings: Vec<Booking>,
}

impl CalendarDay {
    pub fn day(&self) -> u8 {
        self.date.day()
    }
}

/// One month, Sunday-first. Cells outside the month are `None`.
#[derive(Debug, Clone)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: Month,
    pub kind: Option<BookingKind>,
    pub weeks: Vec<Vec<Option<CalendarDay>>>,
    value: String,
    previous: String,
    next: String,
}

impl MonthCalendar {
    /// `ตุลาคม 2569`
    pub fn title(&self) -> String {
        bambooflow_shared::format_thai_month(self.year, self.month)
    }

    /// `2026-10`, the value of the month input.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }

    pub fn next(&self) -> &str {
        &self.next
    }

    pub fn weekdays(&self) -> &'static [&'static str; 7] {
        &bambooflow_shared::THAI_WEEKDAYS_SHORT
    }
}

fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        _ => (year, month.previous()),
    }
}

fn next_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::December => (year + 1, Month::January),
        _ => (year, month.next()),
    }
}

/// Lays out `bookings` over the month.
///
/// Availability is measured against `capacity` for a single kind, or against
/// `capacity` times the number of kinds when `kind` is `None`. `owner_id`
/// limits the bookings listed on each day, not the availability.
pub fn build_month(
    bookings: &[Booking],
    year: i32,
    month: Month,
    kind: Option<BookingKind>,
    owner_id: Option<&str>,
    capacity: usize,
    today: Date,
) -> bambooflow_shared::Result<MonthCalendar> {
    let first = Date::from_calendar_date(year, month, 1)?;
    let length = time::util::days_in_year_month(year, month);
    let capacity = match kind {
        Some(_) => capacity,
        None => capacity * BookingKind::VARIANTS.len(),
    };

    let offset = first.weekday().number_days_from_sunday() as usize;
    let mut cells: Vec<Option<CalendarDay>> = vec![None; offset];

    for day in 1..=length {
        let date = Date::from_calendar_date(year, month, day)?;
        let active = active_on(bookings, date, kind);
        let availability = if date < today {
            Availability::Past
        } else {
            Availability::from_load(active, capacity)
        };

        let day_bookings = bookings
            .iter()
            .filter(|b| {
                b.date == date
                    && kind.is_none_or(|k| b.kind == k)
                    && owner_id.is_none_or(|id| b.owner_id == id)
            })
            .cloned()
            .collect();

        cells.push(Some(CalendarDay {
            date,
            is_today: date == today,
            active,
            availability,
            bookings: day_bookings,
        }));
    }

    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    let weeks = cells.chunks(7).map(|week| week.to_vec()).collect();

    let (previous_year, previous) = previous_month(year, month);
    let (next_year, next) = next_month(year, month);

    Ok(MonthCalendar {
        year,
        month,
        kind,
        weeks,
        value: bambooflow_shared::format_year_month(year, month)?,
        previous: bambooflow_shared::format_year_month(previous_year, previous)?,
        next: bambooflow_shared::format_year_month(next_year, next)?,
    })
}

impl BookingBoard {
    pub async fn month(
        &self,
        year: i32,
        month: Month,
        kind: Option<BookingKind>,
        owner_id: Option<&str>,
        today: Date,
    ) -> bambooflow_shared::Result<MonthCalendar> {
        let bookings = self.snapshot().await;

        build_month(
            &bookings,
            year,
            month,
            kind,
            owner_id,
            self.daily_capacity(),
            today,
        )
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::BookingStatus;

    fn booking(owner_id: &str, kind: BookingKind, date: Date, status: BookingStatus) -> Booking {
        Booking {
            id: format!("{owner_id}-{date}"),
            owner_id: owner_id.to_owned(),
            owner_name: owner_id.to_owned(),
            kind,
            date,
            quantity: 10,
            description: String::new(),
            status,
            created_at: 0,
        }
    }

    #[test]
    fn test_grid_shape() {
        // 1 October 2026 is a Thursday
        let calendar = build_month(
            &[],
            2026,
            Month::October,
            None,
            None,
            5,
            date!(2026 - 10 - 19),
        )
        .unwrap();

        assert_eq!(calendar.weeks.len(), 5);
        assert!(calendar.weeks.iter().all(|w| w.len() == 7));
        assert!(calendar.weeks[0][3].is_none());
        assert_eq!(calendar.weeks[0][4].as_ref().unwrap().day(), 1);

        let days = calendar.weeks.iter().flatten().flatten().count();
        assert_eq!(days, 31);

        assert_eq!(calendar.title(), "ตุลาคม 2569");
        assert_eq!(calendar.previous(), "2026-09");
        assert_eq!(calendar.next(), "2026-11");
    }

    #[test]
    fn test_february_and_year_wrap() {
        // 1 February 2026 is a Sunday, 28 days fit exactly four weeks
        let calendar = build_month(
            &[],
            2026,
            Month::February,
            None,
            None,
            5,
            date!(2026 - 01 - 01),
        )
        .unwrap();
        assert_eq!(calendar.weeks.len(), 4);

        let leap = build_month(&[], 2028, Month::February, None, None, 5, date!(2028 - 01 - 01))
            .unwrap();
        assert_eq!(leap.weeks.iter().flatten().flatten().count(), 29);

        let december =
            build_month(&[], 2026, Month::December, None, None, 5, date!(2026 - 01 - 01)).unwrap();
        assert_eq!(december.next(), "2027-01");
        let january =
            build_month(&[], 2027, Month::January, None, None, 5, date!(2026 - 01 - 01)).unwrap();
        assert_eq!(january.previous(), "2026-12");
    }

    #[test]
    fn test_availability() {
        let day = date!(2026 - 10 - 20);
        let bookings = vec![
            booking("a", BookingKind::Pickup, day, BookingStatus::Pending),
            booking("b", BookingKind::Pickup, day, BookingStatus::Confirmed),
            booking("c", BookingKind::Pickup, day, BookingStatus::Rejected),
            booking("d", BookingKind::Cutting, day, BookingStatus::Pending),
        ];

        let calendar = build_month(
            &bookings,
            2026,
            Month::October,
            Some(BookingKind::Pickup),
            Some("a"),
            2,
            date!(2026 - 10 - 19),
        )
        .unwrap();

        let cell = calendar
            .weeks
            .iter()
            .flatten()
            .flatten()
            .find(|d| d.date == day)
            .unwrap();

        assert_eq!(cell.active, 2);
        assert_eq!(cell.availability, Availability::Full);
        assert_eq!(cell.bookings.len(), 1);
        assert_eq!(cell.bookings[0].owner_id, "a");

        let past = calendar
            .weeks
            .iter()
            .flatten()
            .flatten()
            .find(|d| d.date == date!(2026 - 10 - 18))
            .unwrap();
        assert_eq!(past.availability, Availability::Past);
    }

    #[test]
    fn test_all_kinds_share_combined_capacity() {
        let day = date!(2026 - 10 - 20);
        let bookings: Vec<_> = BookingKind::VARIANTS
            .iter()
            .map(|kind| booking(kind.as_ref(), *kind, day, BookingStatus::Pending))
            .collect();

        let cell = |calendar: MonthCalendar| {
            calendar
                .weeks
                .into_iter()
                .flatten()
                .flatten()
                .find(|d| d.date == day)
                .unwrap()
        };

        let all = build_month(&bookings, 2026, Month::October, None, None, 2, date!(2026 - 10 - 19))
            .unwrap();
        let all = cell(all);
        assert_eq!(all.active, 3);
        assert_eq!(all.availability, Availability::Limited);

        let pickup = build_month(
            &bookings,
            2026,
            Month::October,
            Some(BookingKind::Pickup),
            None,
            2,
            date!(2026 - 10 - 19),
        )
        .unwrap();
        let pickup = cell(pickup);
        assert_eq!(pickup.active, 1);
        assert_eq!(pickup.availability, Availability::Limited);

        let doubled: Vec<_> = bookings.iter().chain(bookings.iter()).cloned().collect();
        let full = build_month(&doubled, 2026, Month::October, None, None, 2, date!(2026 - 10 - 19))
            .unwrap();
        assert_eq!(cell(full).availability, Availability::Full);
    }

    #[test]
    fn test_from_load() {
        assert_eq!(Availability::from_load(0, 5), Availability::Available);
        assert_eq!(Availability::from_load(2, 5), Availability::Available);
        assert_eq!(Availability::from_load(3, 5), Availability::Limited);
        assert_eq!(Availability::from_load(5, 5), Availability::Full);

        assert!(Availability::Limited.is_bookable());
        assert!(!Availability::Full.is_bookable());
        assert!(!Availability::Past.is_bookable());
    }
}
