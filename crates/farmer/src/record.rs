use bambooflow_session::FarmerStanding;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    AsRefStr,
    VariantArray,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FarmerStatus {
    #[default]
    Pending,
    Approved,
    NotApproved,
}

impl FarmerStatus {
    pub fn label_key(&self) -> &'static str {
        match self {
            FarmerStatus::Pending => "farmer.status.pending",
            FarmerStatus::Approved => "farmer.status.approved",
            FarmerStatus::NotApproved => "farmer.status.not_approved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmerRecord {
    pub id: String,
    #[serde(default)]
    pub line_user_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub farm_area_rai: f64,
    #[serde(default)]
    pub status: FarmerStatus,
    pub approved: bool,
    pub created_at: i64,
}

impl FarmerRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn set_status(&mut self, status: FarmerStatus) {
        self.status = status;
        self.approved = status == FarmerStatus::Approved;
    }

    /// `approved` wins over `status`: records written before statuses
    /// existed only carry the flag.
    pub(crate) fn normalized(mut self) -> Self {
        let status = match (self.approved, self.status) {
            (true, _) => FarmerStatus::Approved,
            (false, FarmerStatus::Approved) => FarmerStatus::Pending,
            (false, status) => status,
        };
        self.set_status(status);

        self
    }

    pub fn standing(&self) -> FarmerStanding {
        let farmer_id = self.id.to_owned();

        match self.status {
            FarmerStatus::Approved => FarmerStanding::Approved { farmer_id },
            FarmerStatus::Pending => FarmerStanding::Pending { farmer_id },
            FarmerStatus::NotApproved => FarmerStanding::NotApproved { farmer_id },
        }
    }
}
