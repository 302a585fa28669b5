//! # Database
//!
//! SQLite persistence for users, cycles and symptoms. One connection behind an
//! async mutex; callers either run a single statement through
//! [`Database::with_connection`] or a multi-step mutation through
//! [`Database::transaction`].
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Cycle tracking schema (users, cycles, symptoms)
//! - 1.0.0: Initial sqlite store

use chrono::NaiveTime;
use log::{info, warn};
use sqlite::{Connection, ConnectionThreadSafe, State, Statement, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::{LunaError, Result};
use crate::features::calendar::CalendarSystem;
use crate::features::locales::Language;

/// Discord user snowflake
pub type UserId = i64;

const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    display_name TEXT NOT NULL DEFAULT '',
    role TEXT CHECK (role IN ('primary', 'partner')),
    language TEXT CHECK (language IN ('en', 'fa')),
    calendar_preference TEXT CHECK (calendar_preference IN ('gregorian', 'jalali')),
    partner_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
    pairing_code TEXT UNIQUE,
    reminder_time TEXT
);

CREATE TABLE IF NOT EXISTS cycles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    start_date TEXT NOT NULL,
    end_date TEXT,
    CHECK (end_date IS NULL OR end_date >= start_date)
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_cycles_one_open
    ON cycles(user_id) WHERE end_date IS NULL;
CREATE INDEX IF NOT EXISTS idx_cycles_user_start ON cycles(user_id, start_date);

CREATE TABLE IF NOT EXISTS symptoms (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cycle_id INTEGER NOT NULL REFERENCES cycles(id) ON DELETE CASCADE,
    symptom_kind TEXT NOT NULL,
    logged_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_symptoms_cycle ON symptoms(cycle_id, logged_at);
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Primary,
    Partner,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Primary, Role::Partner];

    pub fn code(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Partner => "partner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Role {
    type Err = LunaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "primary" => Ok(Role::Primary),
            "partner" => Ok(Role::Partner),
            other => Err(LunaError::validation(format!("unknown role '{other}'"))),
        }
    }
}

/// A row of the users table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub role: Option<Role>,
    pub language: Option<Language>,
    pub calendar: Option<CalendarSystem>,
    pub partner_id: Option<UserId>,
    pub pairing_code: Option<String>,
    pub reminder_time: Option<NaiveTime>,
}

impl User {
    /// Language for replies; English until one is chosen
    pub fn lang(&self) -> Language {
        self.language.unwrap_or_default()
    }

    /// Calendar for display; Gregorian until one is chosen
    pub fn calendar_or_default(&self) -> CalendarSystem {
        self.calendar.unwrap_or_default()
    }

    pub fn is_primary(&self) -> bool {
        self.role == Some(Role::Primary)
    }

    pub fn is_partner(&self) -> bool {
        self.role == Some(Role::Partner)
    }
}

pub const USER_COLUMNS: &str =
    "id, display_name, role, language, calendar_preference, partner_id, pairing_code, reminder_time";

pub fn format_reminder_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse a `HH:MM` reminder time
pub fn parse_reminder_time(s: &str) -> Result<NaiveTime> {
    if s.len() != 5 {
        return Err(LunaError::validation(format!("malformed reminder time '{s}'")));
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| LunaError::validation(format!("malformed reminder time '{s}'")))
}

/// Map a row selected with [`USER_COLUMNS`]
pub fn read_user(stmt: &Statement<'_>) -> Result<User> {
    Ok(User {
        id: stmt.read::<i64, _>(0)?,
        display_name: stmt.read::<String, _>(1)?,
        role: optional_text(stmt.read::<Value, _>(2)?)
            .map(|s| s.parse())
            .transpose()?,
        language: optional_text(stmt.read::<Value, _>(3)?)
            .map(|s| s.parse())
            .transpose()?,
        calendar: optional_text(stmt.read::<Value, _>(4)?)
            .map(|s| s.parse())
            .transpose()?,
        partner_id: optional_integer(stmt.read::<Value, _>(5)?),
        pairing_code: optional_text(stmt.read::<Value, _>(6)?),
        reminder_time: optional_text(stmt.read::<Value, _>(7)?)
            .map(|s| parse_reminder_time(&s))
            .transpose()?,
    })
}

pub fn optional_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

pub fn optional_integer(value: Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(i),
        _ => None,
    }
}

/// `Value::Null` for `None`
pub fn nullable_text(value: Option<impl Into<String>>) -> Value {
    value.map_or(Value::Null, |s| Value::String(s.into()))
}

fn bind_all(stmt: &mut Statement<'_>, params: &[Value]) -> Result<()> {
    for (index, value) in params.iter().enumerate() {
        stmt.bind((index + 1, value.clone()))?;
    }
    Ok(())
}

/// Run one statement to completion and return the number of rows it changed
pub fn execute(conn: &Connection, sql: &str, params: &[Value]) -> Result<usize> {
    let mut stmt = conn.prepare(sql)?;
    bind_all(&mut stmt, params)?;
    while stmt.next()? == State::Row {}
    changes(conn)
}

/// Collect every row of a query through `map`
pub fn query<T>(
    conn: &Connection,
    sql: &str,
    params: &[Value],
    mut map: impl FnMut(&Statement<'_>) -> Result<T>,
) -> Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    bind_all(&mut stmt, params)?;
    let mut rows = Vec::new();
    while stmt.next()? == State::Row {
        rows.push(map(&stmt)?);
    }
    Ok(rows)
}

pub fn query_one<T>(
    conn: &Connection,
    sql: &str,
    params: &[Value],
    map: impl FnMut(&Statement<'_>) -> Result<T>,
) -> Result<Option<T>> {
    Ok(query(conn, sql, params, map)?.into_iter().next())
}

fn scalar(conn: &Connection, sql: &str) -> Result<i64> {
    query_one(conn, sql, &[], |stmt| Ok(stmt.read::<i64, _>(0)?))?
        .ok_or_else(|| LunaError::not_found(format!("no row for '{sql}'")))
}

fn changes(conn: &Connection) -> Result<usize> {
    Ok(scalar(conn, "SELECT changes()")? as usize)
}

pub fn last_insert_rowid(conn: &Connection) -> Result<i64> {
    scalar(conn, "SELECT last_insert_rowid()")
}

pub fn load_user(conn: &Connection, id: UserId) -> Result<Option<User>> {
    query_one(
        conn,
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"),
        &[Value::Integer(id)],
        read_user,
    )
}

/// Like [`load_user`] but a missing row is an error
pub fn require_user(conn: &Connection, id: UserId) -> Result<User> {
    load_user(conn, id)?.ok_or_else(|| LunaError::not_found(format!("user {id}")))
}

#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<ConnectionThreadSafe>>,
}

impl Database {
    /// Open (or create) the database file and apply the schema
    pub async fn new(path: &str) -> Result<Self> {
        let connection = Connection::open_thread_safe(path)?;
        connection.execute(SCHEMA)?;
        info!("🗄️ Database ready at {path}");
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Private database that lives as long as this handle
    pub async fn in_memory() -> Result<Self> {
        Self::new(":memory:").await
    }

    /// Run `f` against the connection with exclusive access
    pub async fn with_connection<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send,
        T: Send,
    {
        let guard = self.connection.lock().await;
        f(&guard)
    }

    /// Run `f` inside `BEGIN IMMEDIATE ... COMMIT`; any error rolls back
    pub async fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send,
        T: Send,
    {
        let guard = self.connection.lock().await;
        let conn: &Connection = &guard;
        conn.execute("BEGIN IMMEDIATE")?;
        match f(conn).and_then(|value| {
            conn.execute("COMMIT")?;
            Ok(value)
        }) {
            Ok(value) => Ok(value),
            Err(e) => {
                if let Err(rollback) = conn.execute("ROLLBACK") {
                    warn!("Rollback failed after {e}: {rollback}");
                }
                Err(e)
            }
        }
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.with_connection(|conn| load_user(conn, id)).await
    }

    pub async fn set_reminder_time(&self, id: UserId, time: Option<NaiveTime>) -> Result<()> {
        self.with_connection(|conn| {
            let changed = execute(
                conn,
                "UPDATE users SET reminder_time = ? WHERE id = ?",
                &[nullable_text(time.map(format_reminder_time)), Value::Integer(id)],
            )?;
            if changed == 0 {
                return Err(LunaError::not_found(format!("user {id}")));
            }
            Ok(())
        })
        .await
    }

    /// Primaries whose reminder time falls in `hour` (0-23)
    pub async fn users_with_reminder_hour(&self, hour: u32) -> Result<Vec<User>> {
        self.with_connection(|conn| {
            query(
                conn,
                &format!(
                    "SELECT {USER_COLUMNS} FROM users \
                     WHERE role = 'primary' AND reminder_time LIKE ? ORDER BY id"
                ),
                &[Value::String(format!("{hour:02}:%"))],
                read_user,
            )
        })
        .await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Insert a user row directly, bypassing onboarding
    pub async fn insert_user(
        db: &Database,
        id: UserId,
        name: &str,
        role: Option<Role>,
        language: Option<Language>,
        calendar: Option<CalendarSystem>,
    ) -> User {
        db.with_connection(|conn| {
            execute(
                conn,
                "INSERT INTO users (id, display_name, role, language, calendar_preference) \
                 VALUES (?, ?, ?, ?, ?)",
                &[
                    Value::Integer(id),
                    Value::String(name.to_string()),
                    nullable_text(role.map(Role::code)),
                    nullable_text(language.map(Language::code)),
                    nullable_text(calendar.map(CalendarSystem::code)),
                ],
            )?;
            require_user(conn, id)
        })
        .await
        .unwrap()
    }

    /// A fully onboarded primary
    pub async fn primary(db: &Database, id: UserId, name: &str) -> User {
        insert_user(
            db,
            id,
            name,
            Some(Role::Primary),
            Some(Language::English),
            Some(CalendarSystem::Gregorian),
        )
        .await
    }

    /// Symptom rows still stored for `cycle_id`, whether or not the cycle exists
    pub async fn symptom_rows(db: &Database, cycle_id: i64) -> i64 {
        db.with_connection(|conn| {
            query_one(
                conn,
                "SELECT COUNT(*) FROM symptoms WHERE cycle_id = ?",
                &[Value::Integer(cycle_id)],
                |stmt| Ok(stmt.read::<i64, _>(0)?),
            )
        })
        .await
        .unwrap()
        .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[tokio::test]
    async fn test_schema_applies_and_user_round_trips() {
        let db = Database::in_memory().await.unwrap();
        let user = insert_user(
            &db,
            42,
            "Sara",
            Some(Role::Primary),
            Some(Language::Farsi),
            Some(CalendarSystem::Jalali),
        )
        .await;
        assert_eq!(user.role, Some(Role::Primary));
        assert_eq!(user.lang(), Language::Farsi);
        assert_eq!(user.calendar_or_default(), CalendarSystem::Jalali);
        assert_eq!(user.partner_id, None);
        assert!(db.get_user(7).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reminder_hour_lookup() {
        let db = Database::in_memory().await.unwrap();
        primary(&db, 1, "A").await;
        primary(&db, 2, "B").await;
        insert_user(&db, 3, "C", Some(Role::Partner), None, None).await;

        db.set_reminder_time(1, Some(parse_reminder_time("09:00").unwrap())).await.unwrap();
        db.set_reminder_time(2, Some(parse_reminder_time("18:00").unwrap())).await.unwrap();
        db.set_reminder_time(3, Some(parse_reminder_time("09:00").unwrap())).await.unwrap();

        let due: Vec<UserId> = db
            .users_with_reminder_hour(9)
            .await
            .unwrap()
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(due, vec![1]);

        db.set_reminder_time(1, None).await.unwrap();
        assert!(db.users_with_reminder_hour(9).await.unwrap().is_empty());
        assert!(db.set_reminder_time(99, None).await.is_err());
    }

    #[tokio::test]
    async fn test_transaction_rolls_back_on_error() {
        let db = Database::in_memory().await.unwrap();
        let result: Result<()> = db
            .transaction(|conn| {
                execute(conn, "INSERT INTO users (id, display_name) VALUES (5, 'x')", &[])?;
                Err(LunaError::conflict("abort"))
            })
            .await;
        assert!(result.is_err());
        assert!(db.get_user(5).await.unwrap().is_none());
    }

    #[test]
    fn test_parse_reminder_time() {
        assert_eq!(format_reminder_time(parse_reminder_time("08:00").unwrap()), "08:00");
        assert!(parse_reminder_time("8:00").is_err());
        assert!(parse_reminder_time("24:00").is_err());
        assert!(parse_reminder_time("12:60").is_err());
    }
}
