pub mod extract;
pub mod normalize;
pub mod planner;
pub mod repair;
pub mod template;

pub use crate::domain::model::{Activity, DayPlan, Itinerary, TemplateFragment, TripRequest};
pub use crate::domain::ports::{FragmentStore, TextGenerator};
pub use crate::utils::error::Result;
