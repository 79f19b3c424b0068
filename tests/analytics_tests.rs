//! Behavior tests for the usage-statistics store: running averages, per-bot
//! scoping, and the lost-update hazard under concurrent recording.

use botdeck::db::{AnalyticsError, NewBot, NewCommand, Store, UpdateCommand};

async fn spawn_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("botdeck-stats-test-{}.db", uuid::Uuid::new_v4()));

    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("failed to create store")
}

/// The migrations seed an admin user with id 1; every test bot hangs off it.
async fn seed_bot(store: &Store, name: &str) -> i32 {
    let bot = store
        .create_bot(
            1,
            NewBot {
                token: "test-token".to_string(),
                prefix: "!".to_string(),
                name: name.to_string(),
                status: "offline".to_string(),
            },
        )
        .await
        .expect("create bot");

    bot.id
}

#[tokio::test]
async fn first_invocation_creates_stat_row() {
    let store = spawn_store().await;
    let bot_id = seed_bot(&store, "Ping Bot").await;

    let stat = store
        .record_invocation(bot_id, "ping", 50)
        .await
        .expect("record invocation");

    assert_eq!(stat.bot_id, bot_id);
    assert_eq!(stat.command_name, "ping");
    assert_eq!(stat.usage_count, 1);
    assert_eq!(stat.avg_response_time, 50);
}

#[tokio::test]
async fn running_average_is_weighted_by_count() {
    let store = spawn_store().await;
    let bot_id = seed_bot(&store, "Avg Bot").await;

    store
        .record_invocation(bot_id, "ping", 50)
        .await
        .expect("first sample");

    let stat = store
        .record_invocation(bot_id, "ping", 150)
        .await
        .expect("second sample");

    assert_eq!(stat.usage_count, 2);
    assert_eq!(stat.avg_response_time, 100);
}

#[tokio::test]
async fn average_rounds_once_after_division() {
    let store = spawn_store().await;
    let bot_id = seed_bot(&store, "Round Bot").await;

    for sample in [10, 10, 11] {
        store
            .record_invocation(bot_id, "ping", sample)
            .await
            .expect("record sample");
    }

    let stats = store.list_command_stats(bot_id).await.expect("list stats");
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].usage_count, 3);
    // round((10 + 10 + 11) / 3) = round(10.33) = 10
    assert_eq!(stats[0].avg_response_time, 10);
}

#[tokio::test]
async fn zero_response_time_is_a_valid_sample() {
    let store = spawn_store().await;
    let bot_id = seed_bot(&store, "Zero Bot").await;

    let stat = store
        .record_invocation(bot_id, "instant", 0)
        .await
        .expect("record invocation");

    assert_eq!(stat.usage_count, 1);
    assert_eq!(stat.avg_response_time, 0);
}

#[tokio::test]
async fn stats_are_scoped_per_bot() {
    let store = spawn_store().await;
    let bot_a = seed_bot(&store, "Bot A").await;
    let bot_b = seed_bot(&store, "Bot B").await;

    // Same command name under both bots; the rows must never mix.
    store
        .record_invocation(bot_a, "ping", 50)
        .await
        .expect("record for A");
    store
        .record_invocation(bot_a, "ping", 50)
        .await
        .expect("record for A");
    store
        .record_invocation(bot_b, "ping", 900)
        .await
        .expect("record for B");

    let stats_a = store.list_command_stats(bot_a).await.expect("list A");
    let stats_b = store.list_command_stats(bot_b).await.expect("list B");

    assert_eq!(stats_a.len(), 1);
    assert_eq!(stats_a[0].usage_count, 2);
    assert_eq!(stats_a[0].avg_response_time, 50);

    assert_eq!(stats_b.len(), 1);
    assert_eq!(stats_b[0].usage_count, 1);
    assert_eq!(stats_b[0].avg_response_time, 900);
}

#[tokio::test]
async fn listing_has_no_side_effects() {
    let store = spawn_store().await;
    let bot_id = seed_bot(&store, "List Bot").await;

    store
        .record_invocation(bot_id, "ping", 25)
        .await
        .expect("record invocation");
    store
        .record_invocation(bot_id, "pong", 75)
        .await
        .expect("record invocation");

    let first = store.list_command_stats(bot_id).await.expect("first list");
    let second = store.list_command_stats(bot_id).await.expect("second list");

    assert_eq!(first, second);
}

#[tokio::test]
async fn listing_for_fresh_bot_is_empty_not_an_error() {
    let store = spawn_store().await;
    let bot_id = seed_bot(&store, "Fresh Bot").await;

    let stats = store.list_command_stats(bot_id).await.expect("list stats");
    assert!(stats.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_recordings_never_lose_increments() {
    let store = spawn_store().await;
    let bot_id = seed_bot(&store, "Race Bot").await;

    let mut handles = Vec::new();
    for _ in 0..100 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.record_invocation(bot_id, "x", 40).await
        }));
    }

    for handle in handles {
        handle
            .await
            .expect("task panicked")
            .expect("record invocation");
    }

    // Every increment must land: the upsert is a single statement, so two
    // concurrent recordings cannot both read count = n and write n + 1.
    let stats = store.list_command_stats(bot_id).await.expect("list stats");
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].usage_count, 100);
    assert_eq!(stats[0].avg_response_time, 40);
}

#[tokio::test]
async fn unknown_bot_is_rejected_without_creating_a_row() {
    let store = spawn_store().await;

    let err = store
        .record_invocation(999_999, "ping", 10)
        .await
        .expect_err("recording against a missing bot must fail");

    assert!(matches!(err, AnalyticsError::BotNotFound(999_999)));
    assert_eq!(store.count_command_stats().await.expect("count"), 0);

    let err = store
        .list_command_stats(999_999)
        .await
        .expect_err("listing a missing bot must fail");
    assert!(matches!(err, AnalyticsError::BotNotFound(999_999)));
}

#[tokio::test]
async fn invalid_input_is_rejected_before_any_write() {
    let store = spawn_store().await;
    let bot_id = seed_bot(&store, "Strict Bot").await;

    let err = store
        .record_invocation(bot_id, "   ", 10)
        .await
        .expect_err("blank command name must fail");
    assert!(matches!(err, AnalyticsError::Invalid(_)));

    let err = store
        .record_invocation(bot_id, "ping", -1)
        .await
        .expect_err("negative response time must fail");
    assert!(matches!(err, AnalyticsError::Invalid(_)));

    assert_eq!(store.count_command_stats().await.expect("count"), 0);
}

#[tokio::test]
async fn renaming_a_command_leaves_history_under_the_old_name() {
    let store = spawn_store().await;
    let bot_id = seed_bot(&store, "Rename Bot").await;

    let command = store
        .create_command(
            bot_id,
            NewCommand {
                name: "greet".to_string(),
                description: "Say hello".to_string(),
                enabled: true,
                response: "Hello!".to_string(),
            },
        )
        .await
        .expect("create command");

    store
        .record_invocation(bot_id, "greet", 30)
        .await
        .expect("record invocation");

    // Stats track command names as text, not command ids: the history stays
    // behind under the old name and the renamed command starts fresh.
    store
        .update_command(
            command,
            UpdateCommand {
                name: Some("hello".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("rename command");

    store
        .record_invocation(bot_id, "hello", 70)
        .await
        .expect("record invocation");

    let mut stats = store.list_command_stats(bot_id).await.expect("list stats");
    stats.sort_by(|a, b| a.command_name.cmp(&b.command_name));

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].command_name, "greet");
    assert_eq!(stats[0].usage_count, 1);
    assert_eq!(stats[1].command_name, "hello");
    assert_eq!(stats[1].usage_count, 1);
}

#[tokio::test]
async fn command_name_is_trimmed_before_matching() {
    let store = spawn_store().await;
    let bot_id = seed_bot(&store, "Trim Bot").await;

    store
        .record_invocation(bot_id, "ping", 10)
        .await
        .expect("record invocation");
    let stat = store
        .record_invocation(bot_id, "  ping  ", 30)
        .await
        .expect("record invocation");

    assert_eq!(stat.command_name, "ping");
    assert_eq!(stat.usage_count, 2);
    assert_eq!(stat.avg_response_time, 20);
}
