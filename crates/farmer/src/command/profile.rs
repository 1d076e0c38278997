use validator::Validate;

use crate::FarmerRecord;

#[derive(Validate)]
pub struct ProfileInput {
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
}

impl ProfileInput {
    fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            province: self.province.trim().to_owned(),
            farm_area_rai: self.farm_area_rai.trim().to_owned(),
        }
    }
}

impl super::Command {
    pub async fn update_profile(
        &self,
        id: &str,
        input: ProfileInput,
    ) -> bambooflow_shared::Result<FarmerRecord> {
        let input = input.trimmed();
        input.validate()?;

        let farm_area_rai = super::parse_rai(&input.farm_area_rai)?;
        let mut record = self.load(id).await?;

        record.first_name = input.first_name;
        record.last_name = input.last_name;
        record.phone = input.phone;
        record.address = input.address;
        record.province = input.province;
        record.farm_area_rai = farm_area_rai;

        self.repository.put(record.clone()).await?;

        Ok(record)
    }
}
