//! Event-kind catalog and the daily-event status state machine.
//!
//! Kinds and statuses are stored as text in `daily_events`; the repository
//! layer keeps the raw strings and the engines parse them here when they need
//! the semantics (rank sensitivity, score ordering, transition rules).

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// The mini-game (or poll) a daily event runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Timed-tap duel: fastest reaction in milliseconds, lower score wins.
    ReactionDuel,
    /// Stroop-style color matching: highest score wins.
    ColorClash,
    /// Rapid arithmetic: highest score wins.
    QuickMath,
    /// Repeat-the-sequence memory game: highest score wins.
    SimonSays,
    /// Opinion poll: participation only, never ranked.
    Poll,
}

/// Which direction a kind's raw score sorts for ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOrder {
    /// Lower score is better (reaction times).
    Ascending,
    /// Higher score is better.
    Descending,
}

impl EventKind {
    /// Every kind the scheduler may draw from.
    pub const ALL: [EventKind; 5] = [
        EventKind::ReactionDuel,
        EventKind::ColorClash,
        EventKind::QuickMath,
        EventKind::SimonSays,
        EventKind::Poll,
    ];

    /// Kinds eligible when the poll pool has no active question left.
    pub const NON_POLL: [EventKind; 4] = [
        EventKind::ReactionDuel,
        EventKind::ColorClash,
        EventKind::QuickMath,
        EventKind::SimonSays,
    ];

    /// The stored text form (matches the `ck_daily_events_kind` constraint).
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::ReactionDuel => "reaction_duel",
            EventKind::ColorClash => "color_clash",
            EventKind::QuickMath => "quick_math",
            EventKind::SimonSays => "simon_says",
            EventKind::Poll => "poll",
        }
    }

    /// Parse the stored text form. Returns `None` for unknown kinds.
    pub fn parse(s: &str) -> Option<EventKind> {
        match s {
            "reaction_duel" => Some(EventKind::ReactionDuel),
            "color_clash" => Some(EventKind::ColorClash),
            "quick_math" => Some(EventKind::QuickMath),
            "simon_says" => Some(EventKind::SimonSays),
            "poll" => Some(EventKind::Poll),
            _ => None,
        }
    }

    /// Whether the close transition ranks submissions for this kind.
    pub fn is_rank_sensitive(self) -> bool {
        !matches!(self, EventKind::Poll)
    }

    /// Score ordering used when assigning ranks.
    pub fn score_order(self) -> ScoreOrder {
        match self {
            EventKind::ReactionDuel => ScoreOrder::Ascending,
            _ => ScoreOrder::Descending,
        }
    }
}

// ---------------------------------------------------------------------------
// EventStatus state machine
// ---------------------------------------------------------------------------

/// Lifecycle status of a daily event.
///
/// The machine is strictly monotonic: `Scheduled -> Open -> Closed`, no state
/// is skipped and `Closed` is terminal. The transition engine additionally
/// guards every UPDATE with a status predicate so re-running a transition on
/// an already-moved event is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Scheduled,
    Open,
    Closed,
}

impl EventStatus {
    /// The stored text form (matches the `ck_daily_events_status` constraint).
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Scheduled => "scheduled",
            EventStatus::Open => "open",
            EventStatus::Closed => "closed",
        }
    }

    /// Parse the stored text form. Returns `None` for unknown statuses.
    pub fn parse(s: &str) -> Option<EventStatus> {
        match s {
            "scheduled" => Some(EventStatus::Scheduled),
            "open" => Some(EventStatus::Open),
            "closed" => Some(EventStatus::Closed),
            _ => None,
        }
    }

    /// Statuses reachable from `self`. Terminal states return an empty slice.
    pub fn valid_transitions(self) -> &'static [EventStatus] {
        match self {
            EventStatus::Scheduled => &[EventStatus::Open],
            EventStatus::Open => &[EventStatus::Closed],
            EventStatus::Closed => &[],
        }
    }

    /// Check whether a transition from `self` to `to` is valid.
    pub fn can_transition(self, to: EventStatus) -> bool {
        self.valid_transitions().contains(&to)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
