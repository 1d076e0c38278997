use time::OffsetDateTime;
use ulid::Ulid;
use validator::Validate;

use crate::{FarmerRecord, FarmerStatus};

#[derive(Validate)]
pub struct RegisterInput {
    pub line_user_id: Option<String>,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub province: String,
    #[validate(length(min = 1))]
    pub farm_area_rai: String,
    pub accepted_privacy: bool,
    pub accepted_terms: bool,
}

impl RegisterInput {
    /// Blank-only values count as missing.
    fn trimmed(self) -> Self {
        Self {
            line_user_id: self.line_user_id,
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            province: self.province.trim().to_owned(),
            farm_area_rai: self.farm_area_rai.trim().to_owned(),
            accepted_privacy: self.accepted_privacy,
            accepted_terms: self.accepted_terms,
        }
    }
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> bambooflow_shared::Result<FarmerRecord> {
        let input = input.trimmed();
        input.validate()?;

        if !input.accepted_privacy || !input.accepted_terms {
            bambooflow_shared::user!("Please read and accept the privacy policy and the terms");
        }

        let farm_area_rai = super::parse_rai(&input.farm_area_rai)?;

        let mut record = FarmerRecord {
            id: Ulid::new().to_string(),
            line_user_id: input.line_user_id,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            address: input.address,
            province: input.province,
            farm_area_rai,
            status: FarmerStatus::Pending,
            approved: false,
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
        };

        if self.auto_approve {
            record.set_status(FarmerStatus::Approved);
        }

        self.repository.put(record.clone()).await?;

        tracing::info!(
            farmer_id = %record.id,
            status = %record.status,
            "farmer registered"
        );

        Ok(record)
    }
}
