pub use super::bots::Entity as Bots;
pub use super::command_stats::Entity as CommandStats;
pub use super::commands::Entity as Commands;
pub use super::users::Entity as Users;
