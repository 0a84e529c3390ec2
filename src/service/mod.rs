pub mod harvester;

pub use harvester::{Harvester, HarvestSummary};
