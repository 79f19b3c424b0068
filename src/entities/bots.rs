use sea_orm::entity::prelude::*;

/// One configured bot instance. Commands and usage stats hang off this row
/// through `bot_id` predicates in every query; ownership is not enforced by
/// the schema, and deleting a bot does not cascade to its children.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "bots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    /// Gateway token for the bot account.
    pub token: String,

    /// Command prefix the bot listens for, e.g. "!".
    pub prefix: String,

    pub name: String,

    pub status: String,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
