//! Static position evaluation
//!
//! Evaluates chess positions from White's point of view using:
//! - Material count (piece values)
//! - Center control (pieces standing on d4, e4, d5, e5)
//! - Development (minor pieces that have left their starting square)
//!
//! ## Module Organization
//!
//! - `material` - Material balance evaluation
//! - `position` - Full position evaluation (material + center + development)

mod material;
mod position;

pub use material::evaluate_material;
pub use position::{evaluate_center, evaluate_development, evaluate_position};
