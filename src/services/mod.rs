pub mod assistant;

pub use assistant::{AssistantError, AssistantService};
