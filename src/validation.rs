//! Input validation for tournaments.
//!
//! Checks structural integrity of a tournament and its events before a
//! model is built. Detects:
//! - Missing names
//! - Empty or non-unique event lists
//! - Empty player / localization / timeslot pools
//! - Duplicate entities within a pool
//! - Match shapes that cannot describe any schedule
//!
//! Every problem is collected; the caller gets the whole batch at once.
//! Semantic problems of teams and matchups are reported as
//! [`ConfigError`](crate::error::ConfigError) when the model is built.

use crate::models::{Event, Tournament};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// Validation result.
pub type ValidationResult = Result<(), ValidationReport>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A tournament or event has an empty name.
    MissingName,
    /// The tournament has no events.
    NoEvents,
    /// Two events share the same name.
    DuplicateEvent,
    /// An event has no players.
    EmptyPlayers,
    /// An event has no localizations.
    EmptyLocalizations,
    /// An event has no timeslots.
    EmptyTimeslots,
    /// A player, localization or timeslot appears twice in one pool.
    DuplicateEntity,
    /// Matches per player, timeslots per match or players per match is
    /// zero, or the players cannot be split into full matches.
    InvalidMatchShape,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// All validation errors found in one pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    /// Detected problems, in discovery order.
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Human-readable messages.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Whether an error of the given kind was reported.
    pub fn has(&self, kind: &ValidationErrorKind) -> bool {
        self.errors.iter().any(|e| &e.kind == kind)
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no error was reported.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn into_result(self) -> ValidationResult {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for e in &self.errors {
            write!(f, "\n- {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

/// Validates a tournament and every event in it.
///
/// Checks:
/// 1. The tournament has a name
/// 2. There is at least one event
/// 3. Event names are unique
/// 4. Every event passes [`validate_event`]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(report)` with all detected issues.
pub fn validate_tournament(tournament: &Tournament) -> ValidationResult {
    let mut errors = Vec::new();

    if tournament.name.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingName,
            "Tournament has no name",
        ));
    }

    if tournament.events.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoEvents,
            format!("Tournament '{}' has no events", tournament.name),
        ));
    }

    let mut names = HashSet::new();
    for event in &tournament.events {
        if !names.insert(event.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateEvent,
                format!("Duplicate event: {}", event.name),
            ));
        }
        check_event(event, &mut errors);
    }

    ValidationReport { errors }.into_result()
}

/// Validates a single event.
///
/// Checks:
/// 1. The event has a name
/// 2. Player, localization and timeslot pools are non-empty
/// 3. No pool lists the same entity twice
/// 4. Match shape parameters are positive
/// 5. The player count is a multiple of the players per match
pub fn validate_event(event: &Event) -> ValidationResult {
    let mut errors = Vec::new();
    check_event(event, &mut errors);
    ValidationReport { errors }.into_result()
}

fn check_event(event: &Event, errors: &mut Vec<ValidationError>) {
    let name = event.name.as_str();

    if name.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingName,
            "Event has no name",
        ));
    }

    if event.players.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPlayers,
            format!("Event '{name}' has no players"),
        ));
    }
    if event.localizations.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyLocalizations,
            format!("Event '{name}' has no localizations"),
        ));
    }
    if event.timeslots.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTimeslots,
            format!("Event '{name}' has no timeslots"),
        ));
    }

    if let Some(p) = first_duplicate(&event.players) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateEntity,
            format!("Event '{name}' lists player '{p}' twice"),
        ));
    }
    if let Some(l) = first_duplicate(&event.localizations) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateEntity,
            format!("Event '{name}' lists localization '{l}' twice"),
        ));
    }
    if let Some(t) = first_duplicate(&event.timeslots) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateEntity,
            format!("Event '{name}' lists timeslot '{t}' twice"),
        ));
    }

    for (value, what) in [
        (event.matches_per_player, "matches per player"),
        (event.timeslots_per_match, "timeslots per match"),
        (event.players_per_match, "players per match"),
    ] {
        if value == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidMatchShape,
                format!("Event '{name}': {what} must be positive"),
            ));
        }
    }

    if event.players_per_match > 0 && event.players.len() % event.players_per_match != 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidMatchShape,
            format!(
                "Event '{name}': {} players cannot be split into matches of {}",
                event.players.len(),
                event.players_per_match
            ),
        ));
    }
}

fn first_duplicate<T: Eq + Hash>(items: &[T]) -> Option<&T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().find(|item| !seen.insert(*item))
}
