use sea_orm::entity::prelude::*;

/// Running usage statistics for one (bot, command name) pair.
///
/// `command_name` is matched by text, not by `commands.id`: renaming a
/// command leaves its history behind under the old name. At most one row
/// exists per pair, backed by a unique index.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "command_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub bot_id: i32,

    pub command_name: String,

    pub usage_count: i32,

    /// Running mean in milliseconds, rounded once per update.
    pub avg_response_time: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
