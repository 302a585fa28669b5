//! # Pairing Feature
//!
//! Role life cycle and partner linkage: onboarding states, single-use pairing
//! codes and the destructive role change.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Join and role change run in one transaction
//! - 1.1.0: Confirm/cancel step before a role change
//! - 1.0.0: Pairing codes and partner links

pub mod manager;
pub mod state;

pub use manager::{JoinOutcome, PairingManager, RoleChangeOutcome};
pub use state::OnboardingState;
