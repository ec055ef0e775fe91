//! # Ticket Lifecycle State Machine
//!
//! The etat transition rules, kept separate from the HTTP handlers so they
//! can be tested exhaustively. Allowed edges:
//!
//! ```text
//! ouvert ──▶ en_cours ──▶ ferme
//!    ▲                      │
//!    └──── reopen ◀─────────┘   (admin/assistant only)
//! ```
//!
//! Requesting the current state again is an idempotent no-op; closure side
//! effects (date_resolution, duree) fire only when entering ferme from a
//! non-ferme state. Assigning a collaborateur to an ouvert ticket moves it to
//! en_cours as a documented side effect of the assignment itself.

use auth::{role::ADMIN_OR_ASSISTANT, Role};
use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::TicketEtat;
use error::{AppError, Result};

/// Outcome of a status-change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Requested state equals the current state; nothing to persist
    Noop,
    /// ouvert → en_cours
    Start,
    /// en_cours → ferme, with closure side effects
    Close {
        date_resolution: DateTime<Utc>,
        duree:           i32,
    },
    /// ferme → ouvert
    Reopen,
}

/// Decide what a status-change request does, or reject it.
///
/// # Errors
///
/// `Validation` for transitions outside the state machine; `Forbidden` when a
/// collaborateur attempts a reopen.
pub fn plan_status_change(
    current: &TicketEtat,
    requested: &TicketEtat,
    actor_role: &Role,
    opened_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Transition> {
    if current == requested {
        return Ok(Transition::Noop);
    }

    match (current, requested) {
        (TicketEtat::Ouvert, TicketEtat::EnCours) => Ok(Transition::Start),
        (TicketEtat::EnCours, TicketEtat::Ferme) => {
            Ok(Transition::Close {
                date_resolution: now,
                duree:           duration_hours(opened_at, now),
            })
        },
        (TicketEtat::Ferme, TicketEtat::Ouvert) => {
            auth::require_any(actor_role, ADMIN_OR_ASSISTANT)?;
            Ok(Transition::Reopen)
        },
        (current, requested) => {
            Err(AppError::validation(format!(
                "Cannot change ticket status from {} to {}",
                current, requested
            )))
        },
    }
}

/// Status an assignment implies, if any: an ouvert ticket becomes en_cours.
#[must_use]
pub fn assignment_etat(current: &TicketEtat) -> Option<TicketEtat> {
    match current {
        TicketEtat::Ouvert => Some(TicketEtat::EnCours),
        TicketEtat::EnCours | TicketEtat::Ferme => None,
    }
}

/// Resolution time in whole hours, rounded half away from zero.
#[must_use]
pub fn duration_hours(opened_at: DateTime<Utc>, closed_at: DateTime<Utc>) -> i32 {
    let millis = (closed_at - opened_at).num_milliseconds();
    (millis as f64 / 3_600_000.0).round() as i32
}
