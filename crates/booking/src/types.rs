use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::Date;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, VariantArray,
)]
#[strum(serialize_all = "snake_case")]
pub enum BookingKind {
    Pickup,
    Cutting,
    Seedling,
}

impl BookingKind {
    pub fn label_key(&self) -> &'static str {
        match self {
            BookingKind::Pickup => "booking.kind.pickup",
            BookingKind::Cutting => "booking.kind.cutting",
            BookingKind::Seedling => "booking.kind.seedling",
        }
    }

    /// Seedling bookings count plants, the others count culms.
    pub fn unit_key(&self) -> &'static str {
        match self {
            BookingKind::Seedling => "booking.unit.seedlings",
            _ => "booking.unit.culms",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
#[strum(serialize_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum BookingAction {
    Confirm,
    Complete,
    Reject,
}

impl BookingAction {
    pub fn label_key(&self) -> &'static str {
        match self {
            BookingAction::Confirm => "booking.action.confirm",
            BookingAction::Complete => "booking.action.complete",
            BookingAction::Reject => "booking.action.reject",
        }
    }
}

impl BookingStatus {
    pub fn label_key(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "booking.status.pending",
            BookingStatus::Confirmed => "booking.status.confirmed",
            BookingStatus::Completed => "booking.status.completed",
            BookingStatus::Rejected => "booking.status.rejected",
        }
    }

    /// Active bookings hold a slot of the daily capacity.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    pub fn apply(self, action: BookingAction) -> bambooflow_shared::Result<Self> {
        let next = match (self, action) {
            (BookingStatus::Pending, BookingAction::Confirm) => BookingStatus::Confirmed,
            (BookingStatus::Confirmed, BookingAction::Complete) => BookingStatus::Completed,
            (BookingStatus::Pending | BookingStatus::Confirmed, BookingAction::Reject) => {
                BookingStatus::Rejected
            }
            (status, action) => {
                bambooflow_shared::user!("Cannot {} a {} booking", action, status);
            }
        };

        Ok(next)
    }

    /// Actions the factory can still take on a booking in this status.
    pub fn actions(&self) -> &'static [BookingAction] {
        match self {
            BookingStatus::Pending => &[BookingAction::Confirm, BookingAction::Reject],
            BookingStatus::Confirmed => &[BookingAction::Complete, BookingAction::Reject],
            BookingStatus::Completed | BookingStatus::Rejected => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub kind: BookingKind,
    pub date: Date,
    pub quantity: u32,
    pub description: String,
    pub status: BookingStatus,
    pub created_at: i64,
}

impl Booking {
    /// `d/m/yy` with a Buddhist Era year.
    pub fn short_date(&self) -> String {
        bambooflow_shared::format_thai_short(self.date)
    }
}
