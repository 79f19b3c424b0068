use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::{commands, prelude::*};

pub use crate::entities::commands::Model as Command;

#[derive(Debug, Clone)]
pub struct NewCommand {
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub response: String,
}

/// Partial update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
    pub response: Option<String>,
}

pub struct CommandRepository {
    conn: DatabaseConnection,
}

impl CommandRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, bot_id: i32, command: NewCommand) -> Result<Command> {
        let active = commands::ActiveModel {
            bot_id: Set(bot_id),
            name: Set(command.name),
            description: Set(command.description),
            enabled: Set(command.enabled),
            response: Set(command.response),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert command")?;
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Command>> {
        let command = Commands::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query command")?;
        Ok(command)
    }

    pub async fn list_for_bot(&self, bot_id: i32) -> Result<Vec<Command>> {
        let rows = Commands::find()
            .filter(commands::Column::BotId.eq(bot_id))
            .order_by_asc(commands::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list commands")?;
        Ok(rows)
    }

    pub async fn update(&self, command: Command, changes: UpdateCommand) -> Result<Command> {
        let mut active: commands::ActiveModel = command.into();

        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(enabled) = changes.enabled {
            active.enabled = Set(enabled);
        }
        if let Some(response) = changes.response {
            active.response = Set(response);
        }

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update command")?;
        Ok(model)
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Commands::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Commands::find().count(&self.conn).await?;
        Ok(count)
    }
}
