use std::sync::Arc;

use crate::{FarmerRecord, FarmerRepository};

mod profile;
mod register;
mod review;

pub use profile::ProfileInput;
pub use register::RegisterInput;

#[derive(Clone)]
pub struct Command {
    pub repository: Arc<dyn FarmerRepository>,
    pub auto_approve: bool,
}

impl Command {
    pub fn new(repository: Arc<dyn FarmerRepository>, auto_approve: bool) -> Self {
        Self {
            repository,
            auto_approve,
        }
    }

    pub async fn load(&self, id: &str) -> bambooflow_shared::Result<FarmerRecord> {
        let Some(record) = self.repository.get(id).await? else {
            bambooflow_shared::not_found!("farmer");
        };

        Ok(record)
    }

    pub async fn list(&self) -> bambooflow_shared::Result<Vec<FarmerRecord>> {
        self.repository.list().await
    }

    /// Drops every farmer record, the "clear all" debug action.
    pub async fn clear(&self) -> bambooflow_shared::Result<()> {
        self.repository.clear().await?;
        tracing::info!("farmer records cleared");

        Ok(())
    }
}

/// Farm area comes from a text input; commas are accepted as thousand separators.
pub(crate) fn parse_rai(value: &str) -> bambooflow_shared::Result<f64> {
    let Ok(rai) = value.trim().replace(',', "").parse::<f64>() else {
        bambooflow_shared::user!("Farm area must be a number");
    };

    if !rai.is_finite() || rai < 0.0 {
        bambooflow_shared::user!("Farm area must be a number");
    }

    Ok(rai)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rai() {
        assert_eq!(parse_rai("12.5").unwrap(), 12.5);
        assert_eq!(parse_rai(" 1,200 ").unwrap(), 1200.0);
        assert_eq!(parse_rai("0").unwrap(), 0.0);
        assert!(parse_rai("-1").is_err());
        assert!(parse_rai("ten").is_err());
        assert!(parse_rai("NaN").is_err());
        assert!(parse_rai("").is_err());
    }
}
