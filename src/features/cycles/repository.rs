//! Cycle and symptom persistence
//!
//! Opening and closing a cycle are single conditional statements, so two racing
//! requests for the same user cannot both succeed.

use chrono::{Days, NaiveDate};
use log::{debug, info};
use sqlite::{Connection, Statement, Value};

use super::{Cycle, Symptom, SymptomKind};
use crate::core::{LunaError, Result};
use crate::database::{self, optional_text, Database, UserId};
use crate::features::calendar::{format_iso_date, parse_iso_date};

const CYCLE_COLUMNS: &str = "id, user_id, start_date, end_date";

/// Sample history inserted by [`CycleRepository::reseed`]: (period days, cycle days),
/// newest first
pub const SEED_CYCLES: [(u64, u64); 3] = [(5, 28), (4, 29), (5, 27)];

/// Days before today at which the newest sample cycle starts
pub const SEED_OFFSET_DAYS: u64 = 28;

fn read_cycle(stmt: &Statement<'_>) -> Result<Cycle> {
    Ok(Cycle {
        id: stmt.read::<i64, _>(0)?,
        user_id: stmt.read::<i64, _>(1)?,
        start: parse_iso_date(&stmt.read::<String, _>(2)?)?,
        end: optional_text(stmt.read::<Value, _>(3)?)
            .map(|s| parse_iso_date(&s))
            .transpose()?,
    })
}

fn read_symptom(stmt: &Statement<'_>) -> Result<Symptom> {
    Ok(Symptom {
        id: stmt.read::<i64, _>(0)?,
        cycle_id: stmt.read::<i64, _>(1)?,
        kind: stmt.read::<String, _>(2)?.parse()?,
        logged_at: parse_iso_date(&stmt.read::<String, _>(3)?)?,
    })
}

fn date_value(date: NaiveDate) -> Value {
    Value::String(format_iso_date(date))
}

fn find_open(conn: &Connection, user_id: UserId) -> Result<Option<Cycle>> {
    database::query_one(
        conn,
        &format!("SELECT {CYCLE_COLUMNS} FROM cycles WHERE user_id = ? AND end_date IS NULL"),
        &[Value::Integer(user_id)],
        read_cycle,
    )
}

#[derive(Clone)]
pub struct CycleRepository {
    database: Database,
}

impl CycleRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Start a period. Fails with `Conflict` while another one is open.
    pub async fn open_cycle(&self, user_id: UserId, start: NaiveDate) -> Result<Cycle> {
        let inserted = self
            .database
            .with_connection(|conn| {
                database::query_one(
                    conn,
                    &format!(
                        "INSERT INTO cycles (user_id, start_date) \
                         SELECT ?, ? WHERE NOT EXISTS \
                         (SELECT 1 FROM cycles WHERE user_id = ? AND end_date IS NULL) \
                         RETURNING {CYCLE_COLUMNS}"
                    ),
                    &[Value::Integer(user_id), date_value(start), Value::Integer(user_id)],
                    read_cycle,
                )
            })
            .await?;

        match inserted {
            Some(cycle) => {
                debug!("Opened cycle {} for user {user_id} on {start}", cycle.id);
                Ok(cycle)
            }
            None => Err(LunaError::conflict(format!("user {user_id} already has an open cycle"))),
        }
    }

    /// End the open period. `NotFound` without one, `Validation` if `end` precedes its start.
    pub async fn close_cycle(&self, user_id: UserId, end: NaiveDate) -> Result<Cycle> {
        self.database
            .with_connection(|conn| {
                let closed = database::query_one(
                    conn,
                    &format!(
                        "UPDATE cycles SET end_date = ? \
                         WHERE user_id = ? AND end_date IS NULL AND start_date <= ? \
                         RETURNING {CYCLE_COLUMNS}"
                    ),
                    &[date_value(end), Value::Integer(user_id), date_value(end)],
                    read_cycle,
                )?;
                if let Some(cycle) = closed {
                    debug!("Closed cycle {} for user {user_id} on {end}", cycle.id);
                    return Ok(cycle);
                }
                match find_open(conn, user_id)? {
                    Some(open) => Err(LunaError::validation(format!(
                        "end {end} is before start {}",
                        open.start
                    ))),
                    None => Err(LunaError::not_found(format!("user {user_id} has no open cycle"))),
                }
            })
            .await
    }

    /// Record a symptom against the open cycle
    pub async fn log_symptom(
        &self,
        user_id: UserId,
        kind: SymptomKind,
        date: NaiveDate,
    ) -> Result<Symptom> {
        self.database
            .with_connection(|conn| {
                database::query_one(
                    conn,
                    "INSERT INTO symptoms (cycle_id, symptom_kind, logged_at) \
                     SELECT id, ?, ? FROM cycles WHERE user_id = ? AND end_date IS NULL \
                     RETURNING id, cycle_id, symptom_kind, logged_at",
                    &[
                        Value::String(kind.code().to_string()),
                        date_value(date),
                        Value::Integer(user_id),
                    ],
                    read_symptom,
                )
            })
            .await?
            .ok_or_else(|| LunaError::not_found(format!("user {user_id} has no open cycle")))
    }

    /// Every cycle of the user, oldest first
    pub async fn list_cycles(&self, user_id: UserId) -> Result<Vec<Cycle>> {
        self.database
            .with_connection(|conn| {
                database::query(
                    conn,
                    &format!(
                        "SELECT {CYCLE_COLUMNS} FROM cycles WHERE user_id = ? \
                         ORDER BY start_date ASC"
                    ),
                    &[Value::Integer(user_id)],
                    read_cycle,
                )
            })
            .await
    }

    /// Cycles with an end date, oldest first
    pub async fn closed_cycles(&self, user_id: UserId) -> Result<Vec<Cycle>> {
        self.database
            .with_connection(|conn| {
                database::query(
                    conn,
                    &format!(
                        "SELECT {CYCLE_COLUMNS} FROM cycles \
                         WHERE user_id = ? AND end_date IS NOT NULL ORDER BY start_date ASC"
                    ),
                    &[Value::Integer(user_id)],
                    read_cycle,
                )
            })
            .await
    }

    /// Most recently started cycle, open or closed
    pub async fn latest_cycle(&self, user_id: UserId) -> Result<Option<Cycle>> {
        self.database
            .with_connection(|conn| {
                database::query_one(
                    conn,
                    &format!(
                        "SELECT {CYCLE_COLUMNS} FROM cycles WHERE user_id = ? \
                         ORDER BY start_date DESC LIMIT 1"
                    ),
                    &[Value::Integer(user_id)],
                    read_cycle,
                )
            })
            .await
    }

    pub async fn open_cycle_for(&self, user_id: UserId) -> Result<Option<Cycle>> {
        self.database
            .with_connection(|conn| find_open(conn, user_id))
            .await
    }

    /// Symptoms of one cycle logged on `date`
    pub async fn list_symptoms(&self, cycle_id: i64, date: NaiveDate) -> Result<Vec<Symptom>> {
        self.database
            .with_connection(|conn| {
                database::query(
                    conn,
                    "SELECT id, cycle_id, symptom_kind, logged_at FROM symptoms \
                     WHERE cycle_id = ? AND logged_at = ? ORDER BY id ASC",
                    &[Value::Integer(cycle_id), date_value(date)],
                    read_symptom,
                )
            })
            .await
    }

    /// Replace the user's history with three closed sample cycles
    pub async fn reseed(&self, user_id: UserId, today: NaiveDate) -> Result<Vec<Cycle>> {
        let seeded = self
            .database
            .transaction(|conn| {
                database::execute(
                    conn,
                    "DELETE FROM cycles WHERE user_id = ?",
                    &[Value::Integer(user_id)],
                )?;

                let mut start = today
                    .checked_sub_days(Days::new(SEED_OFFSET_DAYS))
                    .ok_or_else(|| LunaError::validation(format!("cannot seed before {today}")))?;
                let mut cycles = Vec::with_capacity(SEED_CYCLES.len());
                for (period, cycle_length) in SEED_CYCLES {
                    let end = start
                        .checked_add_days(Days::new(period - 1))
                        .ok_or_else(|| LunaError::validation(format!("cannot seed at {start}")))?;
                    database::execute(
                        conn,
                        "INSERT INTO cycles (user_id, start_date, end_date) VALUES (?, ?, ?)",
                        &[Value::Integer(user_id), date_value(start), date_value(end)],
                    )?;
                    cycles.push(Cycle {
                        id: database::last_insert_rowid(conn)?,
                        user_id,
                        start,
                        end: Some(end),
                    });
                    start = start
                        .checked_sub_days(Days::new(cycle_length))
                        .ok_or_else(|| LunaError::validation(format!("cannot seed before {start}")))?;
                }
                cycles.reverse();
                Ok(cycles)
            })
            .await?;

        info!("🌱 Reseeded {} sample cycles for user {user_id}", seeded.len());
        Ok(seeded)
    }
}
