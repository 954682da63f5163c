pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;
pub use crate::config::AppConfig;

pub use crate::adapters::{GeminiGenerator, InMemoryFragmentStore};
pub use crate::core::planner::Planner;
pub use crate::domain::model::{Activity, DayPlan, Itinerary, TemplateFragment, TripRequest};
pub use crate::domain::ports::{FragmentStore, TextGenerator};
pub use crate::utils::error::{PlannerError, Result};
