use anyhow::{anyhow, Context, Result};
use contracts::system::auth::Role;
use contracts::system::users::User;
use sea_orm::{ConnectionTrait, DatabaseBackend, QueryResult, Statement};

use crate::shared::data::db::get_connection;

const USER_COLUMNS: &str =
    "id, username, email, full_name, is_active, role, created_at, updated_at, last_login_at, created_by";

fn user_from_row(row: &QueryResult) -> Result<User> {
    let role_code: String = row.try_get("", "role")?;
    let role = Role::from_code(&role_code)
        .ok_or_else(|| anyhow!("Unknown role stored for user: {}", role_code))?;

    Ok(User {
        id: row.try_get("", "id")?,
        username: row.try_get("", "username")?,
        email: row.try_get("", "email")?,
        full_name: row.try_get("", "full_name")?,
        is_active: row.try_get::<i32>("", "is_active")? != 0,
        role,
        created_at: row.try_get("", "created_at")?,
        updated_at: row.try_get("", "updated_at")?,
        last_login_at: row.try_get("", "last_login_at")?,
        created_by: row.try_get("", "created_by")?,
    })
}

/// Insert a staff account together with its password hash.
pub async fn create_with_password(user: &User, password_hash: &str) -> Result<()> {
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_users (id, username, email, password_hash, full_name, is_active, role, created_at, updated_at, last_login_at, created_by)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        [
            user.id.clone().into(),
            user.username.clone().into(),
            user.email.clone().into(),
            password_hash.to_string().into(),
            user.full_name.clone().into(),
            (if user.is_active { 1 } else { 0 }).into(),
            user.role.code().into(),
            user.created_at.clone().into(),
            user.updated_at.clone().into(),
            user.last_login_at.clone().into(),
            user.created_by.clone().into(),
        ],
    ))
    .await
    .context("Failed to insert user")?;

    Ok(())
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_users WHERE id = ?", USER_COLUMNS),
            [id.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(user_from_row(&row)?)),
        None => Ok(None),
    }
}

pub async fn get_by_username(username: &str) -> Result<Option<User>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            &format!("SELECT {} FROM sys_users WHERE username = ?", USER_COLUMNS),
            [username.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(Some(user_from_row(&row)?)),
        None => Ok(None),
    }
}

/// Password hash lives outside the User contract and is only read here.
pub async fn get_password_hash(user_id: &str) -> Result<Option<String>> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT password_hash FROM sys_users WHERE id = ?",
            [user_id.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let hash: String = row.try_get("", "password_hash")?;
            Ok(Some(hash))
        }
        None => Ok(None),
    }
}

pub async fn list_all() -> Result<Vec<User>> {
    let conn = get_connection();

    let rows = conn
        .query_all(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!(
                "SELECT {} FROM sys_users ORDER BY created_at DESC",
                USER_COLUMNS
            ),
        ))
        .await?;

    let mut users = Vec::new();
    for row in rows {
        users.push(user_from_row(&row)?);
    }

    Ok(users)
}

pub async fn update(user: &User) -> Result<()> {
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users
         SET email = ?, full_name = ?, is_active = ?, role = ?, updated_at = ?
         WHERE id = ?",
        [
            user.email.clone().into(),
            user.full_name.clone().into(),
            (if user.is_active { 1 } else { 0 }).into(),
            user.role.code().into(),
            user.updated_at.clone().into(),
            user.id.clone().into(),
        ],
    ))
    .await
    .context("Failed to update user")?;

    Ok(())
}

/// Hard delete; staff accounts carry no history worth keeping.
pub async fn delete(id: &str) -> Result<bool> {
    let conn = get_connection();

    let result = conn
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "DELETE FROM sys_users WHERE id = ?",
            [id.into()],
        ))
        .await
        .context("Failed to delete user")?;

    Ok(result.rows_affected() > 0)
}

pub async fn update_last_login(id: &str) -> Result<()> {
    let now = chrono::Utc::now().to_rfc3339();
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET last_login_at = ? WHERE id = ?",
        [now.into(), id.to_string().into()],
    ))
    .await
    .context("Failed to update last login")?;

    Ok(())
}

pub async fn count_users() -> Result<usize> {
    let conn = get_connection();

    let result = conn
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT COUNT(*) as count FROM sys_users".to_string(),
        ))
        .await?;

    match result {
        Some(row) => {
            let count: i64 = row.try_get("", "count")?;
            Ok(count as usize)
        }
        None => Ok(0),
    }
}

pub async fn update_password(id: &str, password_hash: &str) -> Result<()> {
    let conn = get_connection();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_users SET password_hash = ?, updated_at = ? WHERE id = ?",
        [
            password_hash.to_string().into(),
            chrono::Utc::now().to_rfc3339().into(),
            id.to_string().into(),
        ],
    ))
    .await
    .context("Failed to update password")?;

    Ok(())
}
