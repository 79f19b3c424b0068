use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::entities::{bots, prelude::*};

pub use crate::entities::bots::Model as Bot;

/// Fields for registering a bot.
#[derive(Debug, Clone)]
pub struct NewBot {
    pub token: String,
    pub prefix: String,
    pub name: String,
    pub status: String,
}

/// Partial update for bot settings. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateBot {
    pub token: Option<String>,
    pub prefix: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
}

pub struct BotRepository {
    conn: DatabaseConnection,
}

impl BotRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, user_id: i32, bot: NewBot) -> Result<Bot> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = bots::ActiveModel {
            user_id: Set(user_id),
            token: Set(bot.token),
            prefix: Set(bot.prefix),
            name: Set(bot.name),
            status: Set(bot.status),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert bot")?;

        info!("Registered bot {} for user {}", model.id, user_id);
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Bot>> {
        let bot = Bots::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query bot")?;
        Ok(bot)
    }

    /// Get a bot only if it belongs to the given user. Other owners' bots
    /// are indistinguishable from missing ones.
    pub async fn get_owned(&self, id: i32, user_id: i32) -> Result<Option<Bot>> {
        let bot = Bots::find_by_id(id)
            .filter(bots::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query bot")?;
        Ok(bot)
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Bot>> {
        let rows = Bots::find()
            .filter(bots::Column::UserId.eq(user_id))
            .order_by_asc(bots::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list bots")?;
        Ok(rows)
    }

    pub async fn update(&self, bot: Bot, changes: UpdateBot) -> Result<Bot> {
        let mut active: bots::ActiveModel = bot.into();

        if let Some(token) = changes.token {
            active.token = Set(token);
        }
        if let Some(prefix) = changes.prefix {
            active.prefix = Set(prefix);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(status) = changes.status {
            active.status = Set(status);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update bot")?;
        Ok(model)
    }

    /// Removes the bot row only. Commands and stats referencing it are left
    /// in place and stay reachable through their own endpoints.
    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Bots::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        let count = Bots::find().count(&self.conn).await?;
        Ok(count)
    }
}
