//! Tests for database pool creation

use cm_shared::config::DatabaseConfig;

use crate::database::connection::{DatabasePool, PoolStatistics};

#[tokio::test]
async fn test_pool_creation_with_invalid_url() {
    let config = DatabaseConfig {
        url: "invalid://url".to_string(),
        max_connections: 2,
        connect_timeout: 1,
        idle_timeout: 60,
    };

    let result = DatabasePool::new(&config).await;
    assert!(result.is_err());
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_pool_health_check_and_migrations() {
    let config = DatabaseConfig::from_env();

    let pool = DatabasePool::new(&config).await.unwrap();
    assert!(pool.health_check().await.unwrap());
    pool.run_migrations().await.unwrap();
}

#[test]
fn test_pool_statistics_display() {
    let stats = PoolStatistics {
        connections: 5,
        idle_connections: 3,
        max_connections: 10,
    };

    let display = format!("{}", stats);
    assert!(display.contains("5/10"));
    assert!(display.contains("3 idle"));
}
