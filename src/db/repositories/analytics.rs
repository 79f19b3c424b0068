use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, PaginatorTrait,
    QueryFilter, Statement,
};
use thiserror::Error;

use crate::entities::{command_stats, prelude::*};

pub use crate::entities::command_stats::Model as CommandStat;

/// Errors specific to usage-stat operations.
///
/// Callers need to tell an unknown bot apart from bad input: the first maps
/// to 404 at the API boundary, the second to 400, and neither leaves a row
/// behind.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Bot {0} not found")]
    BotNotFound(i32),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}

/// Repository for per-command usage statistics.
pub struct AnalyticsRepository {
    conn: DatabaseConnection,
}

impl AnalyticsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Record one command invocation and return the post-update row.
    ///
    /// The write is a single `INSERT .. ON CONFLICT DO UPDATE` statement
    /// against the unique (`bot_id`, `command_name`) index, so concurrent
    /// recordings for the same pair cannot lose increments. No retry is
    /// attempted on storage failure; retrying a non-idempotent increment
    /// blindly would double-count.
    pub async fn record_invocation(
        &self,
        bot_id: i32,
        command_name: &str,
        response_time_ms: i32,
    ) -> Result<CommandStat, AnalyticsError> {
        let name = command_name.trim();
        if name.is_empty() {
            return Err(AnalyticsError::Invalid(
                "Command name cannot be empty".to_string(),
            ));
        }
        if response_time_ms < 0 {
            return Err(AnalyticsError::Invalid(format!(
                "Response time cannot be negative: {response_time_ms}"
            )));
        }

        // Checked before the write so an unknown bot never creates an
        // orphaned stat row.
        if Bots::find_by_id(bot_id).one(&self.conn).await?.is_none() {
            return Err(AnalyticsError::BotNotFound(bot_id));
        }

        // Column references on the right-hand side of DO UPDATE read the
        // pre-update row: the new mean reconstructs the running total from
        // the stored average before dividing, and rounds exactly once.
        let upsert = Statement::from_sql_and_values(
            DbBackend::Sqlite,
            r#"INSERT INTO "command_stats" ("bot_id", "command_name", "usage_count", "avg_response_time")
               VALUES (?, ?, 1, ?)
               ON CONFLICT("bot_id", "command_name") DO UPDATE SET
                   "avg_response_time" = CAST(ROUND(("avg_response_time" * "usage_count" + "excluded"."avg_response_time") * 1.0 / ("usage_count" + 1)) AS INTEGER),
                   "usage_count" = "usage_count" + 1"#,
            [bot_id.into(), name.into(), response_time_ms.into()],
        );
        self.conn.execute(upsert).await?;

        let row = CommandStats::find()
            .filter(command_stats::Column::BotId.eq(bot_id))
            .filter(command_stats::Column::CommandName.eq(name))
            .one(&self.conn)
            .await?
            .ok_or_else(|| {
                AnalyticsError::Database(sea_orm::DbErr::RecordNotFound(format!(
                    "Stat row for bot {bot_id} command '{name}' missing after upsert"
                )))
            })?;

        Ok(row)
    }

    /// All stat rows owned by one bot. Reading has no side effects; an
    /// existing bot with no recorded invocations yields an empty vec.
    pub async fn list_for_bot(&self, bot_id: i32) -> Result<Vec<CommandStat>, AnalyticsError> {
        if Bots::find_by_id(bot_id).one(&self.conn).await?.is_none() {
            return Err(AnalyticsError::BotNotFound(bot_id));
        }

        let rows = CommandStats::find()
            .filter(command_stats::Column::BotId.eq(bot_id))
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<u64, AnalyticsError> {
        let count = CommandStats::find().count(&self.conn).await?;
        Ok(count)
    }
}
