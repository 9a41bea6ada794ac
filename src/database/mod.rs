pub mod aggregate;
pub mod connection;

pub use aggregate::sum_bigint;
pub use connection::*;

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::DatabaseConfig;

    /// 内存 SQLite，单连接保证所有查询共享同一个库
    pub async fn setup_pool() -> DbPool {
        let mut config = DatabaseConfig::new("sqlite::memory:");
        config.max_connections = 1;
        config.min_connections = 1;
        config.idle_timeout_secs = 3600;
        let pool = create_pool(&config).await.expect("sqlite pool");
        run_migrations(&pool).await.expect("migrations");
        pool
    }
}
