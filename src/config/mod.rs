pub mod traits;
pub mod simulation;
pub mod bounds;
pub mod genetic;
pub mod differential;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use simulation::SimulationConfig;
pub use bounds::BoundsConfig;
pub use genetic::GeneticConfig;
pub use differential::DifferentialConfig;
pub use traits::{ConfigSection, ConfigManifest, FieldManifest};
