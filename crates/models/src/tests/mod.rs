//! Postgres-backed tests. They run only when `DATABASE_URL` is set and
//! `SKIP_DB_TESTS` is not.



pub(crate) fn db_tests_enabled() -> bool {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return false;
    }
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip database tests");
        return false;
    }
    true
}

static MIGRATED: tokio::sync::OnceCell<()> = tokio::sync::OnceCell::const_new();

pub(crate) async fn migrated_db() -> anyhow::Result<sea_orm::DatabaseConnection> {
    use migration::MigratorTrait;

    let db = crate::db::connect().await?;
    MIGRATED
        .get_or_try_init(|| async {
            migration::Migrator::up(&db, None).await?;
            Ok::<(), anyhow::Error>(())
        })
        .await?;
    Ok(db)
}
