use std::{collections::HashMap, sync::Arc};

use time::{Date, OffsetDateTime};
use tokio::sync::RwLock;
use ulid::Ulid;
use validator::Validate;

use crate::{Booking, BookingAction, BookingKind, BookingStatus};

#[derive(Validate)]
pub struct CreateBookingInput {
    pub owner_id: String,
    pub owner_name: String,
    pub kind: BookingKind,
    pub date: Date,
    #[validate(range(min = 1, max = 100000))]
    pub quantity: u32,
    #[validate(length(max = 500))]
    pub description: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookingFilter {
    pub owner_id: Option<String>,
    pub status: Option<BookingStatus>,
    pub kind: Option<BookingKind>,
    pub date: Option<Date>,
}

impl BookingFilter {
    fn matches(&self, booking: &Booking) -> bool {
        self.owner_id.as_ref().is_none_or(|id| &booking.owner_id == id)
            && self.status.is_none_or(|s| booking.status == s)
            && self.kind.is_none_or(|k| booking.kind == k)
            && self.date.is_none_or(|d| booking.date == d)
    }
}

/// Queue bookings shared by farmers and the factory. Lives in memory only.
#[derive(Clone)]
pub struct BookingBoard {
    bookings: Arc<RwLock<Vec<Booking>>>,
    daily_capacity: usize,
}

impl BookingBoard {
    pub fn new(daily_capacity: usize) -> Self {
        Self {
            bookings: Default::default(),
            daily_capacity,
        }
    }

    pub fn daily_capacity(&self) -> usize {
        self.daily_capacity
    }

    pub async fn create(
        &self,
        input: CreateBookingInput,
        today: Date,
    ) -> bambooflow_shared::Result<Booking> {
        input.validate()?;

        if input.date < today {
            bambooflow_shared::user!("The booking date has already passed");
        }

        let mut bookings = self.bookings.write().await;

        if active_on(&bookings, input.date, Some(input.kind)) >= self.daily_capacity {
            bambooflow_shared::user!(
                "No {} slots left on {}",
                input.kind,
                bambooflow_shared::format_thai_short(input.date)
            );
        }

        let booking = Booking {
            id: Ulid::new().to_string(),
            owner_id: input.owner_id,
            owner_name: input.owner_name,
            kind: input.kind,
            date: input.date,
            quantity: input.quantity,
            description: input.description.trim().to_owned(),
            status: BookingStatus::Pending,
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
        };

        bookings.push(booking.clone());

        tracing::info!(
            booking_id = %booking.id,
            owner_id = %booking.owner_id,
            kind = %booking.kind,
            "booking created"
        );

        Ok(booking)
    }

    /// Inserts without capacity or date checks.
    pub async fn insert(&self, booking: Booking) {
        self.bookings.write().await.push(booking);
    }

    pub async fn find(&self, id: &str) -> Option<Booking> {
        self.bookings
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
    }

    /// Matching bookings, earliest date first.
    pub async fn list(&self, filter: &BookingFilter) -> Vec<Booking> {
        let mut bookings = self
            .bookings
            .read()
            .await
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect::<Vec<_>>();

        bookings.sort_by(|a, b| a.date.cmp(&b.date).then(a.created_at.cmp(&b.created_at)));

        bookings
    }

    /// Active bookings from `today` on.
    pub async fn upcoming(&self, owner_id: Option<&str>, today: Date) -> Vec<Booking> {
        let filter = BookingFilter {
            owner_id: owner_id.map(ToOwned::to_owned),
            ..Default::default()
        };

        self.list(&filter)
            .await
            .into_iter()
            .filter(|b| b.date >= today && b.status.is_active())
            .collect()
    }

    pub async fn transition(
        &self,
        id: &str,
        action: BookingAction,
    ) -> bambooflow_shared::Result<Booking> {
        let mut bookings = self.bookings.write().await;

        let Some(booking) = bookings.iter_mut().find(|b| b.id == id) else {
            bambooflow_shared::not_found!("booking");
        };

        booking.status = booking.status.apply(action)?;

        tracing::info!(
            booking_id = %booking.id,
            status = %booking.status,
            "booking status changed"
        );

        Ok(booking.clone())
    }

    pub async fn count_by_status(&self) -> HashMap<BookingStatus, usize> {
        let mut counts = HashMap::new();

        for booking in self.bookings.read().await.iter() {
            *counts.entry(booking.status).or_insert(0) += 1;
        }

        counts
    }

    /// Active bookings on `date`, for one kind or all of them.
    pub async fn active_on(&self, date: Date, kind: Option<BookingKind>) -> usize {
        active_on(&self.bookings.read().await, date, kind)
    }

    pub async fn len(&self) -> usize {
        self.bookings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub(crate) async fn snapshot(&self) -> Vec<Booking> {
        self.bookings.read().await.clone()
    }
}

pub(crate) fn active_on(bookings: &[Booking], date: Date, kind: Option<BookingKind>) -> usize {
    bookings
        .iter()
        .filter(|b| b.date == date && b.status.is_active() && kind.is_none_or(|k| b.kind == k))
        .count()
}
