//! Localized notification copy.
//!
//! Squads store a locale (`en` or `he`); every composer takes it and
//! returns ready-to-send title and body strings. Unknown locales fall back
//! to English rather than erroring, since stale client data must never block
//! a fan-out.

use squadgame_core::event::EventKind;

/// Supported copy locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    He,
}

impl Locale {
    pub fn parse(s: &str) -> Self {
        match s {
            "he" => Locale::He,
            _ => Locale::En,
        }
    }
}

/// Title and body for one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationCopy {
    pub title: String,
    pub body: String,
}

/// Player-facing label for an event kind.
pub fn kind_label(locale: Locale, kind: EventKind) -> &'static str {
    match (locale, kind) {
        (Locale::En, EventKind::ReactionDuel) => "Reaction Duel",
        (Locale::En, EventKind::ColorClash) => "Color Clash",
        (Locale::En, EventKind::QuickMath) => "Quick Math",
        (Locale::En, EventKind::SimonSays) => "Simon Says",
        (Locale::En, EventKind::Poll) => "Squad Poll",
        (Locale::He, EventKind::ReactionDuel) => "דו-קרב תגובה",
        (Locale::He, EventKind::ColorClash) => "קרב צבעים",
        (Locale::He, EventKind::QuickMath) => "חשבון מהיר",
        (Locale::He, EventKind::SimonSays) => "המלך אמר",
        (Locale::He, EventKind::Poll) => "סקר החוליה",
    }
}

/// Copy announcing that a daily event just opened.
pub fn event_opened(locale: Locale, squad_name: &str, kind: EventKind) -> NotificationCopy {
    let label = kind_label(locale, kind);
    match locale {
        Locale::En => NotificationCopy {
            title: "Daily challenge is live!".to_string(),
            body: format!("{label} just opened for {squad_name}. You have 5 minutes!"),
        },
        Locale::He => NotificationCopy {
            title: "האתגר היומי התחיל!".to_string(),
            body: format!("{label} נפתח עכשיו ב-{squad_name}. חמש דקות על השעון!"),
        },
    }
}

/// Copy announcing results after an event closed. `winner_name` is `None`
/// when nobody played or the event kind has no ranking.
pub fn event_closed(
    locale: Locale,
    squad_name: &str,
    winner_name: Option<&str>,
) -> NotificationCopy {
    match (locale, winner_name) {
        (Locale::En, Some(winner)) => NotificationCopy {
            title: "Results are in".to_string(),
            body: format!("{winner} takes today's crown in {squad_name}!"),
        },
        (Locale::En, None) => NotificationCopy {
            title: "Results are in".to_string(),
            body: format!("Today's round in {squad_name} is closed."),
        },
        (Locale::He, Some(winner)) => NotificationCopy {
            title: "התוצאות הגיעו".to_string(),
            body: format!("הכתר היומי של {squad_name} הולך ל-{winner}!"),
        },
        (Locale::He, None) => NotificationCopy {
            title: "התוצאות הגיעו".to_string(),
            body: format!("הסיבוב היומי של {squad_name} נסגר."),
        },
    }
}

/// Copy announcing a freshly crowned winner.
pub fn crown_awarded(locale: Locale, winner_name: &str) -> NotificationCopy {
    match locale {
        Locale::En => NotificationCopy {
            title: "A new crown holder".to_string(),
            body: format!("{winner_name} rules the squad for the next 24 hours."),
        },
        Locale::He => NotificationCopy {
            title: "כתר חדש בחוליה".to_string(),
            body: format!("הכתר ל-24 השעות הקרובות שייך ל-{winner_name}."),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
