use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/returns.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    create_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

async fn table_exists(conn: &DatabaseConnection, name: &str) -> anyhow::Result<bool> {
    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
            [name.into()],
        ))
        .await?;
    Ok(!rows.is_empty())
}

async fn ensure_table(conn: &DatabaseConnection, name: &str, ddl: &str) -> anyhow::Result<()> {
    if table_exists(conn, name).await? {
        return Ok(());
    }
    tracing::info!("Creating {} table", name);
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        ddl.to_string(),
    ))
    .await?;
    Ok(())
}

async fn execute(conn: &DatabaseConnection, sql: &str) -> anyhow::Result<()> {
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        sql.to_string(),
    ))
    .await?;
    Ok(())
}

/// Minimal schema bootstrap: create every table the application needs
/// if it does not exist yet.
async fn create_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    // Sales orders mirrored from order management
    ensure_table(
        conn,
        "a001_sales_orders",
        r#"
        CREATE TABLE a001_sales_orders (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            order_number TEXT NOT NULL UNIQUE,
            customer_name TEXT NOT NULL,
            customer_email TEXT NOT NULL,
            order_status TEXT NOT NULL,
            shipped_at TEXT,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    // Order lines live in their own table: quantity_returned on a line
    // is updated under a guard while the rest of the order is read-only
    ensure_table(
        conn,
        "a001_sales_order_lines",
        r#"
        CREATE TABLE a001_sales_order_lines (
            id TEXT PRIMARY KEY NOT NULL,
            order_id TEXT NOT NULL,
            product_variant_id TEXT NOT NULL,
            sku TEXT NOT NULL,
            name TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            quantity_returned INTEGER NOT NULL DEFAULT 0,
            unit_price REAL NOT NULL,
            image_url TEXT
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS idx_a001_lines_order ON a001_sales_order_lines (order_id);",
    )
    .await?;

    // Return orders: searchable scalars as columns, the rest as JSON
    ensure_table(
        conn,
        "a002_return_orders",
        r#"
        CREATE TABLE a002_return_orders (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            comment TEXT,
            order_id TEXT NOT NULL,
            order_number TEXT NOT NULL,
            customer_email TEXT NOT NULL,
            status TEXT NOT NULL,
            header_json TEXT NOT NULL,
            items_json TEXT NOT NULL,
            state_json TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS idx_a002_returns_order ON a002_return_orders (order_id);",
    )
    .await?;
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS idx_a002_returns_status ON a002_return_orders (status);",
    )
    .await?;

    // Append-only audit trail of lifecycle events
    ensure_table(
        conn,
        "a002_return_events",
        r#"
        CREATE TABLE a002_return_events (
            id TEXT PRIMARY KEY NOT NULL,
            return_order_id TEXT NOT NULL,
            event TEXT NOT NULL,
            from_status TEXT,
            to_status TEXT NOT NULL,
            actor TEXT NOT NULL,
            note TEXT,
            created_at TEXT NOT NULL
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS idx_a002_events_return ON a002_return_events (return_order_id);",
    )
    .await?;

    // Per-year RMA number sequence
    ensure_table(
        conn,
        "a002_rma_counters",
        r#"
        CREATE TABLE a002_rma_counters (
            year INTEGER PRIMARY KEY NOT NULL,
            counter INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;

    // One inspection verdict per return item; a re-inspection replaces
    // the earlier row through the UNIQUE constraint
    ensure_table(
        conn,
        "a003_inspections",
        r#"
        CREATE TABLE a003_inspections (
            id TEXT PRIMARY KEY NOT NULL,
            code TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            comment TEXT,
            return_order_id TEXT NOT NULL,
            return_item_id TEXT NOT NULL UNIQUE,
            quantity_received INTEGER NOT NULL,
            condition TEXT NOT NULL,
            condition_notes TEXT,
            disposition TEXT NOT NULL,
            disposition_notes TEXT,
            restock_location_id TEXT,
            photo_urls_json TEXT NOT NULL DEFAULT '[]',
            inspected_by TEXT,
            inspected_at TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT,
            version INTEGER NOT NULL DEFAULT 0
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS idx_a003_inspections_return ON a003_inspections (return_order_id);",
    )
    .await?;

    // Auth system tables
    ensure_table(
        conn,
        "sys_users",
        r#"
        CREATE TABLE sys_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            email TEXT,
            password_hash TEXT NOT NULL,
            full_name TEXT,
            is_active INTEGER NOT NULL DEFAULT 1,
            role TEXT NOT NULL DEFAULT 'SUPPORT',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            last_login_at TEXT,
            created_by TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "sys_refresh_tokens",
        r#"
        CREATE TABLE sys_refresh_tokens (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            token_hash TEXT NOT NULL,
            expires_at TEXT NOT NULL,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );
    "#,
    )
    .await?;
    execute(
        conn,
        "CREATE INDEX IF NOT EXISTS idx_sys_refresh_tokens_hash ON sys_refresh_tokens (token_hash);",
    )
    .await?;

    ensure_table(
        conn,
        "sys_settings",
        r#"
        CREATE TABLE sys_settings (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            description TEXT,
            created_at TEXT,
            updated_at TEXT
        );
    "#,
    )
    .await?;

    ensure_table(
        conn,
        "system_log",
        r#"
        CREATE TABLE system_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            source TEXT NOT NULL,
            category TEXT NOT NULL,
            message TEXT NOT NULL
        );
    "#,
    )
    .await?;

    Ok(())
}
