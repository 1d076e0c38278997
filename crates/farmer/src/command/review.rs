use crate::{FarmerRecord, FarmerStatus};

impl super::Command {
    pub async fn approve(&self, id: &str) -> bambooflow_shared::Result<FarmerRecord> {
        self.set_status(id, FarmerStatus::Approved).await
    }

    pub async fn reject(&self, id: &str) -> bambooflow_shared::Result<FarmerRecord> {
        self.set_status(id, FarmerStatus::NotApproved).await
    }

    pub async fn set_status(
        &self,
        id: &str,
        status: FarmerStatus,
    ) -> bambooflow_shared::Result<FarmerRecord> {
        let mut record = self.load(id).await?;

        if record.status == status {
            return Ok(record);
        }

        record.set_status(status);
        self.repository.put(record.clone()).await?;

        tracing::info!(farmer_id = %record.id, status = %status, "farmer status changed");

        Ok(record)
    }
}
