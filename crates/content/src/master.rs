use std::sync::Arc;

use tokio::sync::RwLock;
use ulid::Ulid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BambooSpecies {
    pub id: String,
    pub name: String,
    pub harvest_age_months: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupPoint {
    pub id: String,
    pub name: String,
    pub province: String,
}

#[derive(Validate)]
pub struct SpeciesInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 240))]
    pub harvest_age_months: u16,
}

#[derive(Validate)]
pub struct PickupPointInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub province: String,
}

#[derive(Default)]
struct Tables {
    species: Vec<BambooSpecies>,
    pickup_points: Vec<PickupPoint>,
}

/// Reference lists maintained by admins.
#[derive(Clone, Default)]
pub struct MasterData {
    tables: Arc<RwLock<Tables>>,
}

impl MasterData {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn species(&self) -> Vec<BambooSpecies> {
        self.tables.read().await.species.clone()
    }

    pub async fn pickup_points(&self) -> Vec<PickupPoint> {
        self.tables.read().await.pickup_points.clone()
    }

    pub async fn add_species(&self, input: SpeciesInput) -> bambooflow_shared::Result<BambooSpecies> {
        input.validate()?;

        let name = input.name.trim().to_owned();
        let mut tables = self.tables.write().await;

        if tables.species.iter().any(|s| s.name.eq_ignore_ascii_case(&name)) {
            bambooflow_shared::user!("Species '{}' already exists", name);
        }

        let species = BambooSpecies {
            id: Ulid::new().to_string(),
            name,
            harvest_age_months: input.harvest_age_months,
        };
        tables.species.push(species.clone());

        Ok(species)
    }

    pub async fn remove_species(&self, id: &str) -> bambooflow_shared::Result<()> {
        let mut tables = self.tables.write().await;
        let len = tables.species.len();
        tables.species.retain(|s| s.id != id);

        if tables.species.len() == len {
            bambooflow_shared::not_found!("species");
        }

        Ok(())
    }

    pub async fn add_pickup_point(
        &self,
        input: PickupPointInput,
    ) -> bambooflow_shared::Result<PickupPoint> {
        input.validate()?;

        let name = input.name.trim().to_owned();
        let mut tables = self.tables.write().await;

        if tables.pickup_points.iter().any(|p| p.name == name) {
            bambooflow_shared::user!("Pickup point '{}' already exists", name);
        }

        let point = PickupPoint {
            id: Ulid::new().to_string(),
            name,
            province: input.province.trim().to_owned(),
        };
        tables.pickup_points.push(point.clone());

        Ok(point)
    }

    pub async fn remove_pickup_point(&self, id: &str) -> bambooflow_shared::Result<()> {
        let mut tables = self.tables.write().await;
        let len = tables.pickup_points.len();
        tables.pickup_points.retain(|p| p.id != id);

        if tables.pickup_points.len() == len {
            bambooflow_shared::not_found!("pickup point");
        }

        Ok(())
    }
}
