pub mod objective;

pub use objective::{Objective, YieldObjective, WORST_FITNESS};
