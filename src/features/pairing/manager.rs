//! Role assignment, pairing codes and the destructive role change

use log::{debug, info};
use rand::Rng;
use sqlite::{Connection, Value};

use super::state::OnboardingState;
use crate::core::{LunaError, Result};
use crate::database::{
    self, load_user, nullable_text, read_user, require_user, Database, Role, User, UserId,
    USER_COLUMNS,
};
use crate::features::calendar::CalendarSystem;
use crate::features::locales::Language;

const CODE_RANGE: std::ops::Range<u32> = 100_000..1_000_000;
const CODE_ATTEMPTS: usize = 16;

/// Result of a successful join
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub primary: User,
    pub partner: User,
}

/// Result of a confirmed role change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChangeOutcome {
    pub user: User,
    /// The account that was linked before the change, already unlinked
    pub former_partner: Option<User>,
}

fn update_user(conn: &Connection, id: UserId, assignment: &str, value: Value) -> Result<User> {
    let changed = database::execute(
        conn,
        &format!("UPDATE users SET {assignment} = ? WHERE id = ?"),
        &[value, Value::Integer(id)],
    )?;
    if changed == 0 {
        return Err(LunaError::not_found(format!("user {id}")));
    }
    require_user(conn, id)
}

/// Clear every partner reference pointing at `id`
fn clear_back_references(conn: &Connection, id: UserId) -> Result<usize> {
    database::execute(
        conn,
        "UPDATE users SET partner_id = NULL WHERE partner_id = ?",
        &[Value::Integer(id)],
    )
}

#[derive(Clone)]
pub struct PairingManager {
    database: Database,
}

impl PairingManager {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Create the user if absent, otherwise refresh the display name.
    ///
    /// Returns the record and whether it was created.
    pub async fn register(&self, user_id: UserId, display_name: &str) -> Result<(User, bool)> {
        let (user, created) = self
            .database
            .with_connection(|conn| {
                let created = load_user(conn, user_id)?.is_none();
                database::execute(
                    conn,
                    "INSERT INTO users (id, display_name) VALUES (?, ?) \
                     ON CONFLICT(id) DO UPDATE SET display_name = excluded.display_name",
                    &[Value::Integer(user_id), Value::String(display_name.to_string())],
                )?;
                Ok((require_user(conn, user_id)?, created))
            })
            .await?;
        if created {
            info!("👋 Registered user {user_id} ({display_name})");
        }
        Ok((user, created))
    }

    pub async fn set_language(&self, user_id: UserId, language: Language) -> Result<User> {
        self.database
            .with_connection(|conn| {
                update_user(conn, user_id, "language", Value::String(language.code().to_string()))
            })
            .await
    }

    pub async fn set_calendar(&self, user_id: UserId, calendar: CalendarSystem) -> Result<User> {
        self.database
            .with_connection(|conn| {
                update_user(
                    conn,
                    user_id,
                    "calendar_preference",
                    Value::String(calendar.code().to_string()),
                )
            })
            .await
    }

    /// First role choice during onboarding. Any later change goes through
    /// [`PairingManager::confirm_role_change`].
    pub async fn assign_role(&self, user_id: UserId, role: Role) -> Result<User> {
        self.database
            .with_connection(|conn| {
                let user = require_user(conn, user_id)?;
                if OnboardingState::of(&user) != OnboardingState::RolePending {
                    return Err(LunaError::conflict(format!(
                        "user {user_id} cannot pick a role in state {:?}",
                        OnboardingState::of(&user)
                    )));
                }
                update_user(conn, user_id, "role", Value::String(role.code().to_string()))
            })
            .await
    }

    /// New six-digit code for a ready primary, replacing any previous one
    pub async fn issue_pairing_code(&self, user_id: UserId) -> Result<String> {
        let code = self
            .database
            .with_connection(|conn| {
                let user = require_user(conn, user_id)?;
                if OnboardingState::of(&user) != OnboardingState::PrimaryReady {
                    return Err(LunaError::forbidden(format!(
                        "user {user_id} cannot invite a partner"
                    )));
                }
                for _ in 0..CODE_ATTEMPTS {
                    let code = rand::rng().random_range(CODE_RANGE).to_string();
                    let taken = database::query_one(
                        conn,
                        "SELECT id FROM users WHERE pairing_code = ? AND id != ?",
                        &[Value::String(code.clone()), Value::Integer(user_id)],
                        |stmt| Ok(stmt.read::<i64, _>(0)?),
                    )?;
                    if taken.is_none() {
                        update_user(conn, user_id, "pairing_code", Value::String(code.clone()))?;
                        return Ok(code);
                    }
                }
                Err(LunaError::conflict("no free pairing code"))
            })
            .await?;
        info!("💌 Issued pairing code for user {user_id}");
        Ok(code)
    }

    /// Consume `code` and link `joiner_id` as the owner's partner
    pub async fn join(&self, joiner_id: UserId, code: &str) -> Result<JoinOutcome> {
        let code = code.trim().to_string();
        let outcome = self
            .database
            .transaction(|conn| {
                let owner = database::query_one(
                    conn,
                    &format!(
                        "SELECT {USER_COLUMNS} FROM users WHERE pairing_code = ? AND role = 'primary'"
                    ),
                    &[Value::String(code)],
                    read_user,
                )?;
                let Some(primary) = owner.filter(|owner| owner.id != joiner_id) else {
                    return Err(LunaError::not_found("pairing code"));
                };

                let joiner = require_user(conn, joiner_id)?;
                if joiner.is_primary() {
                    return Err(LunaError::conflict(format!(
                        "user {joiner_id} tracks their own cycle"
                    )));
                }

                // Only this pair may point at each other afterwards
                clear_back_references(conn, primary.id)?;
                clear_back_references(conn, joiner_id)?;

                database::execute(
                    conn,
                    "UPDATE users SET role = 'partner', partner_id = ?, \
                     language = COALESCE(language, ?) WHERE id = ?",
                    &[
                        Value::Integer(primary.id),
                        nullable_text(primary.language.map(Language::code)),
                        Value::Integer(joiner_id),
                    ],
                )?;
                database::execute(
                    conn,
                    "UPDATE users SET partner_id = ?, pairing_code = NULL WHERE id = ?",
                    &[Value::Integer(joiner_id), Value::Integer(primary.id)],
                )?;

                Ok(JoinOutcome {
                    primary: require_user(conn, primary.id)?,
                    partner: require_user(conn, joiner_id)?,
                })
            })
            .await?;

        info!(
            "💞 Linked partner {} with primary {}",
            outcome.partner.id, outcome.primary.id
        );
        Ok(outcome)
    }

    /// Validate a role change request; nothing is written
    pub async fn request_role_change(&self, user_id: UserId, role: Role) -> Result<User> {
        let user = self
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| LunaError::not_found(format!("user {user_id}")))?;
        match user.role {
            None => Err(LunaError::forbidden(format!("user {user_id} has no role yet"))),
            Some(current) if current == role => Err(LunaError::conflict(format!(
                "user {user_id} is already {role}"
            ))),
            Some(_) => Ok(user),
        }
    }

    /// Unlink, wipe the user's cycle data and apply the new role, atomically
    pub async fn confirm_role_change(
        &self,
        user_id: UserId,
        role: Role,
    ) -> Result<RoleChangeOutcome> {
        let outcome = self
            .database
            .transaction(|conn| {
                let user = require_user(conn, user_id)?;
                if user.role.is_none() {
                    return Err(LunaError::forbidden(format!("user {user_id} has no role yet")));
                }
                if user.role == Some(role) {
                    return Err(LunaError::conflict(format!("user {user_id} is already {role}")));
                }

                let former_partner = match user.partner_id {
                    Some(id) => load_user(conn, id)?,
                    None => None,
                };
                clear_back_references(conn, user_id)?;
                let wiped = database::execute(
                    conn,
                    "DELETE FROM cycles WHERE user_id = ?",
                    &[Value::Integer(user_id)],
                )?;
                debug!("Role change for user {user_id} removed {wiped} cycles");
                database::execute(
                    conn,
                    "UPDATE users SET role = ?, partner_id = NULL, pairing_code = NULL WHERE id = ?",
                    &[Value::String(role.code().to_string()), Value::Integer(user_id)],
                )?;

                Ok(RoleChangeOutcome {
                    user: require_user(conn, user_id)?,
                    former_partner: match former_partner {
                        Some(former) => load_user(conn, former.id)?,
                        None => None,
                    },
                })
            })
            .await?;

        info!("🔄 User {user_id} switched role to {role}");
        Ok(outcome)
    }

    pub fn cancel_role_change(&self, user_id: UserId) {
        debug!("User {user_id} cancelled a role change");
    }

    /// The account linked to `user`, if the link is still symmetric
    pub async fn linked_partner(&self, user: &User) -> Result<Option<User>> {
        let Some(partner_id) = user.partner_id else {
            return Ok(None);
        };
        let partner = self.database.get_user(partner_id).await?;
        Ok(partner.filter(|p| p.partner_id == Some(user.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::testing::{insert_user, primary, symptom_rows};
    use crate::features::cycles::{CycleRepository, SymptomKind};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (Database, PairingManager) {
        let db = Database::in_memory().await.unwrap();
        let manager = PairingManager::new(db.clone());
        (db, manager)
    }

    #[tokio::test]
    async fn test_onboarding_flow() {
        let (_db, manager) = setup().await;
        let (user, created) = manager.register(1, "Sara").await.unwrap();
        assert!(created);
        assert_eq!(OnboardingState::of(&user), OnboardingState::Unassigned);

        // role before language is refused
        assert!(matches!(
            manager.assign_role(1, Role::Primary).await,
            Err(LunaError::Conflict(_))
        ));

        manager.set_language(1, Language::Farsi).await.unwrap();
        let user = manager.assign_role(1, Role::Primary).await.unwrap();
        assert_eq!(OnboardingState::of(&user), OnboardingState::PrimaryNoCalendar);
        let user = manager.set_calendar(1, CalendarSystem::Jalali).await.unwrap();
        assert_eq!(OnboardingState::of(&user), OnboardingState::PrimaryReady);

        // a second assignment must go through the role change flow
        assert!(matches!(
            manager.assign_role(1, Role::Partner).await,
            Err(LunaError::Conflict(_))
        ));

        let (user, created) = manager.register(1, "Sara K").await.unwrap();
        assert!(!created);
        assert_eq!(user.display_name, "Sara K");
        assert_eq!(user.role, Some(Role::Primary));
    }

    #[tokio::test]
    async fn test_pairing_code_shape_and_gate() {
        let (db, manager) = setup().await;
        insert_user(&db, 1, "Sara", Some(Role::Primary), Some(Language::English), None).await;
        assert!(matches!(
            manager.issue_pairing_code(1).await,
            Err(LunaError::Forbidden(_))
        ));

        manager.set_calendar(1, CalendarSystem::Gregorian).await.unwrap();
        let code = manager.issue_pairing_code(1).await.unwrap();
        assert_eq!(code.len(), 6);
        let value: u32 = code.parse().unwrap();
        assert!(CODE_RANGE.contains(&value));

        let again = manager.issue_pairing_code(1).await.unwrap();
        let user = db.get_user(1).await.unwrap().unwrap();
        assert_eq!(user.pairing_code, Some(again));
    }

    #[tokio::test]
    async fn test_join_links_both_ways_and_consumes_code() {
        let (db, manager) = setup().await;
        insert_user(
            &db,
            1,
            "Sara",
            Some(Role::Primary),
            Some(Language::Farsi),
            Some(CalendarSystem::Jalali),
        )
        .await;
        manager.register(2, "Ali").await.unwrap();
        manager.register(3, "Reza").await.unwrap();

        let code = manager.issue_pairing_code(1).await.unwrap();
        let outcome = manager.join(2, &code).await.unwrap();
        assert_eq!(outcome.primary.partner_id, Some(2));
        assert_eq!(outcome.primary.pairing_code, None);
        assert_eq!(outcome.partner.partner_id, Some(1));
        assert_eq!(outcome.partner.role, Some(Role::Partner));
        assert_eq!(outcome.partner.language, Some(Language::Farsi));
        assert_eq!(OnboardingState::of(&outcome.partner), OnboardingState::PartnerLinked);

        // the code is single use
        let err = manager.join(3, &code).await.unwrap_err();
        assert!(matches!(err, LunaError::NotFound(_)));
        let third = db.get_user(3).await.unwrap().unwrap();
        assert_eq!(OnboardingState::of(&third), OnboardingState::Unassigned);
    }

    #[tokio::test]
    async fn test_join_rejections() {
        let (db, manager) = setup().await;
        primary(&db, 1, "Sara").await;
        primary(&db, 2, "Mina").await;
        manager.register(3, "Ali").await.unwrap();

        assert!(matches!(manager.join(3, "123456").await, Err(LunaError::NotFound(_))));

        let code = manager.issue_pairing_code(1).await.unwrap();
        assert!(matches!(manager.join(1, &code).await, Err(LunaError::NotFound(_))));
        assert!(matches!(manager.join(2, &code).await, Err(LunaError::Conflict(_))));

        // failures leave the code usable
        manager.join(3, &code).await.unwrap();
    }

    #[tokio::test]
    async fn test_repairing_unlinks_stale_partner() {
        let (db, manager) = setup().await;
        primary(&db, 1, "Sara").await;
        manager.register(2, "Ali").await.unwrap();
        manager.register(3, "Reza").await.unwrap();

        let code = manager.issue_pairing_code(1).await.unwrap();
        manager.join(2, &code).await.unwrap();
        let code = manager.issue_pairing_code(1).await.unwrap();
        manager.join(3, &code).await.unwrap();

        let sara = db.get_user(1).await.unwrap().unwrap();
        let ali = db.get_user(2).await.unwrap().unwrap();
        let reza = db.get_user(3).await.unwrap().unwrap();
        assert_eq!(sara.partner_id, Some(3));
        assert_eq!(reza.partner_id, Some(1));
        assert_eq!(ali.partner_id, None);
        assert_eq!(OnboardingState::of(&ali), OnboardingState::PartnerUnlinked);
        assert_eq!(manager.linked_partner(&sara).await.unwrap().map(|u| u.id), Some(3));
    }

    #[tokio::test]
    async fn test_partner_switching_primaries_unlinks_old_primary() {
        let (db, manager) = setup().await;
        primary(&db, 1, "Sara").await;
        primary(&db, 2, "Mina").await;
        manager.register(3, "Ali").await.unwrap();

        let code = manager.issue_pairing_code(1).await.unwrap();
        manager.join(3, &code).await.unwrap();
        let code = manager.issue_pairing_code(2).await.unwrap();
        manager.join(3, &code).await.unwrap();

        assert_eq!(db.get_user(1).await.unwrap().unwrap().partner_id, None);
        assert_eq!(db.get_user(2).await.unwrap().unwrap().partner_id, Some(3));
        assert_eq!(db.get_user(3).await.unwrap().unwrap().partner_id, Some(2));
    }

    #[tokio::test]
    async fn test_confirmed_role_change_wipes_and_unlinks() {
        let (db, manager) = setup().await;
        let cycles = CycleRepository::new(db.clone());
        primary(&db, 1, "Sara").await;
        manager.register(2, "Ali").await.unwrap();
        let code = manager.issue_pairing_code(1).await.unwrap();
        manager.join(2, &code).await.unwrap();

        let cycle = cycles.open_cycle(1, ymd(2024, 1, 1)).await.unwrap();
        cycles.log_symptom(1, SymptomKind::Cramps, ymd(2024, 1, 1)).await.unwrap();
        assert_eq!(symptom_rows(&db, cycle.id).await, 1);
        manager.issue_pairing_code(1).await.unwrap();

        manager.request_role_change(1, Role::Partner).await.unwrap();
        let outcome = manager.confirm_role_change(1, Role::Partner).await.unwrap();

        assert_eq!(outcome.user.role, Some(Role::Partner));
        assert_eq!(outcome.user.partner_id, None);
        assert_eq!(outcome.user.pairing_code, None);
        let former = outcome.former_partner.unwrap();
        assert_eq!(former.id, 2);
        assert_eq!(former.partner_id, None);
        assert!(cycles.list_cycles(1).await.unwrap().is_empty());
        assert_eq!(symptom_rows(&db, cycle.id).await, 0);
    }

    #[tokio::test]
    async fn test_cancelled_role_change_changes_nothing() {
        let (db, manager) = setup().await;
        let cycles = CycleRepository::new(db.clone());
        primary(&db, 1, "Sara").await;
        cycles.open_cycle(1, ymd(2024, 1, 1)).await.unwrap();

        let before = db.get_user(1).await.unwrap().unwrap();
        manager.request_role_change(1, Role::Partner).await.unwrap();
        manager.cancel_role_change(1);

        assert_eq!(db.get_user(1).await.unwrap().unwrap(), before);
        assert_eq!(cycles.list_cycles(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_role_change_to_same_role_conflicts() {
        let (db, manager) = setup().await;
        primary(&db, 1, "Sara").await;
        assert!(matches!(
            manager.request_role_change(1, Role::Primary).await,
            Err(LunaError::Conflict(_))
        ));
        assert!(matches!(
            manager.confirm_role_change(1, Role::Primary).await,
            Err(LunaError::Conflict(_))
        ));
    }
}
