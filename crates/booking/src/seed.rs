use time::{Date, Duration, OffsetDateTime};
use ulid::Ulid;

use crate::{Booking, BookingBoard, BookingKind, BookingStatus};

const DEMO_BOOKINGS: [(&str, &str, BookingKind, i64, u32, BookingStatus); 6] = [
    ("demo-farmer-1", "สมชาย ใจดี", BookingKind::Pickup, 1, 120, BookingStatus::Confirmed),
    ("demo-farmer-2", "มาลี ศรีสุข", BookingKind::Cutting, 2, 300, BookingStatus::Pending),
    ("demo-farmer-3", "บุญมี รักษ์ไผ่", BookingKind::Seedling, 3, 50, BookingStatus::Pending),
    ("demo-farmer-1", "สมชาย ใจดี", BookingKind::Pickup, 5, 80, BookingStatus::Pending),
    ("demo-farmer-2", "มาลี ศรีสุข", BookingKind::Pickup, -3, 200, BookingStatus::Completed),
    ("demo-farmer-3", "บุญมี รักษ์ไผ่", BookingKind::Cutting, -1, 150, BookingStatus::Rejected),
];

/// Fills an empty board with bookings around `today`.
pub async fn seed_demo(board: &BookingBoard, today: Date) {
    if !board.is_empty().await {
        return;
    }

    let now = OffsetDateTime::now_utc().unix_timestamp();

    for (owner_id, owner_name, kind, offset, quantity, status) in DEMO_BOOKINGS {
        board
            .insert(Booking {
                id: Ulid::new().to_string(),
                owner_id: owner_id.to_owned(),
                owner_name: owner_name.to_owned(),
                kind,
                date: today + Duration::days(offset),
                quantity,
                description: String::new(),
                status,
                created_at: now,
            })
            .await;
    }

    tracing::debug!(count = DEMO_BOOKINGS.len(), "seeded demo bookings");
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;
    use crate::BookingFilter;

    #[tokio::test]
    async fn test_seed_once() {
        let board = BookingBoard::new(5);
        let today = date!(2026 - 10 - 19);

        seed_demo(&board, today).await;
        seed_demo(&board, today).await;

        assert_eq!(board.len().await, DEMO_BOOKINGS.len());
        let pending = board
            .list(&BookingFilter {
                status: Some(BookingStatus::Pending),
                ..Default::default()
            })
            .await;
        assert_eq!(pending.len(), 3);
        assert!(pending.iter().all(|b| b.date > today));
    }
}
