//! Onboarding and linkage state derived from a user record

use crate::database::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnboardingState {
    /// Registered, no language chosen yet
    Unassigned,
    /// Language chosen, waiting for a role
    RolePending,
    PrimaryNoCalendar,
    PrimaryReady,
    PartnerUnlinked,
    PartnerLinked,
}

impl OnboardingState {
    pub fn of(user: &User) -> Self {
        if user.language.is_none() && user.role.is_none() {
            return OnboardingState::Unassigned;
        }
        match (user.role, user.calendar, user.partner_id) {
            (None, _, _) => OnboardingState::RolePending,
            (Some(Role::Primary), None, _) => OnboardingState::PrimaryNoCalendar,
            (Some(Role::Primary), Some(_), _) => OnboardingState::PrimaryReady,
            (Some(Role::Partner), _, None) => OnboardingState::PartnerUnlinked,
            (Some(Role::Partner), _, Some(_)) => OnboardingState::PartnerLinked,
        }
    }
}
