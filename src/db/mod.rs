use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::analytics::{AnalyticsError, CommandStat};
pub use repositories::bot::{Bot, NewBot, UpdateBot};
pub use repositories::command::{Command, NewCommand, UpdateCommand};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn bot_repo(&self) -> repositories::bot::BotRepository {
        repositories::bot::BotRepository::new(self.conn.clone())
    }

    fn command_repo(&self) -> repositories::command::CommandRepository {
        repositories::command::CommandRepository::new(self.conn.clone())
    }

    fn analytics_repo(&self) -> repositories::analytics::AnalyticsRepository {
        repositories::analytics::AnalyticsRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Bots
    // ========================================================================

    pub async fn create_bot(&self, user_id: i32, bot: NewBot) -> Result<Bot> {
        self.bot_repo().create(user_id, bot).await
    }

    pub async fn get_bot(&self, id: i32) -> Result<Option<Bot>> {
        self.bot_repo().get(id).await
    }

    pub async fn get_bot_owned(&self, id: i32, user_id: i32) -> Result<Option<Bot>> {
        self.bot_repo().get_owned(id, user_id).await
    }

    pub async fn list_bots_for_user(&self, user_id: i32) -> Result<Vec<Bot>> {
        self.bot_repo().list_for_user(user_id).await
    }

    pub async fn update_bot(&self, bot: Bot, changes: UpdateBot) -> Result<Bot> {
        self.bot_repo().update(bot, changes).await
    }

    pub async fn remove_bot(&self, id: i32) -> Result<bool> {
        self.bot_repo().remove(id).await
    }

    pub async fn count_bots(&self) -> Result<u64> {
        self.bot_repo().count().await
    }

    // ========================================================================
    // Commands
    // ========================================================================

    pub async fn create_command(&self, bot_id: i32, command: NewCommand) -> Result<Command> {
        self.command_repo().create(bot_id, command).await
    }

    pub async fn get_command(&self, id: i32) -> Result<Option<Command>> {
        self.command_repo().get(id).await
    }

    pub async fn list_commands(&self, bot_id: i32) -> Result<Vec<Command>> {
        self.command_repo().list_for_bot(bot_id).await
    }

    pub async fn update_command(&self, command: Command, changes: UpdateCommand) -> Result<Command> {
        self.command_repo().update(command, changes).await
    }

    pub async fn remove_command(&self, id: i32) -> Result<bool> {
        self.command_repo().remove(id).await
    }

    pub async fn count_commands(&self) -> Result<u64> {
        self.command_repo().count().await
    }

    // ========================================================================
    // Usage statistics
    // ========================================================================

    pub async fn record_invocation(
        &self,
        bot_id: i32,
        command_name: &str,
        response_time_ms: i32,
    ) -> Result<CommandStat, AnalyticsError> {
        self.analytics_repo()
            .record_invocation(bot_id, command_name, response_time_ms)
            .await
    }

    pub async fn list_command_stats(&self, bot_id: i32) -> Result<Vec<CommandStat>, AnalyticsError> {
        self.analytics_repo().list_for_bot(bot_id).await
    }

    pub async fn count_command_stats(&self) -> Result<u64, AnalyticsError> {
        self.analytics_repo().count().await
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn update_user_password(&self, username: &str, new_password: &str) -> Result<()> {
        self.user_repo()
            .update_password(username, new_password)
            .await
    }

    pub async fn verify_api_key(&self, api_key: &str) -> Result<Option<User>> {
        self.user_repo().verify_api_key(api_key).await
    }

    pub async fn get_user_api_key(&self, username: &str) -> Result<Option<String>> {
        self.user_repo().get_api_key(username).await
    }

    pub async fn regenerate_user_api_key(&self, username: &str) -> Result<String> {
        self.user_repo().regenerate_api_key(username).await
    }
}
