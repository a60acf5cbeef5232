//! Daily scheduling window: timezone-aware "today" and the open-time draw.
//!
//! Each squad gets one event per local calendar day, opening at a random
//! minute between 08:00 and 21:59 squad-local time and closing five minutes
//! later. Local wall-clock times are resolved to UTC instants through
//! [`chrono_tz::Tz`] with an explicit daylight-saving policy instead of any
//! string round-tripping.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use rand::Rng;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Earliest hour (inclusive, local) an event may open.
pub const OPEN_HOUR_EARLIEST: u32 = 8;

/// Latest hour (inclusive, local) an event may open; with minutes 0-59 the
/// last possible open is 21:59, keeping the close window before 22:05.
pub const OPEN_HOUR_LATEST: u32 = 21;

/// How long an event stays open.
pub const EVENT_DURATION_MINS: i64 = 5;

/// Parse an IANA timezone name (e.g. `"Asia/Jerusalem"`).
pub fn parse_timezone(name: &str) -> Result<Tz, CoreError> {
    name.parse::<Tz>()
        .map_err(|_| CoreError::Validation(format!("Unknown timezone: {name}")))
}

/// The calendar date it currently is in `tz`.
pub fn local_today(tz: Tz, now: Timestamp) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Draw a uniformly random open time within the allowed window.
pub fn draw_open_time(rng: &mut impl Rng) -> NaiveTime {
    let hour = rng.random_range(OPEN_HOUR_EARLIEST..=OPEN_HOUR_LATEST);
    let minute = rng.random_range(0..60);
    NaiveTime::from_hms_opt(hour, minute, 0).expect("window draw is a valid wall-clock time")
}

/// Resolve a local open time on `date` in `tz` to the UTC `(open_at, close_at)`
/// pair stored on the event row.
pub fn event_window(date: NaiveDate, open: NaiveTime, tz: Tz) -> (Timestamp, Timestamp) {
    let open_at = resolve_local(tz, date.and_time(open)).with_timezone(&Utc);
    let close_at = open_at + Duration::minutes(EVENT_DURATION_MINS);
    (open_at, close_at)
}

/// Resolve a local wall-clock time to an instant.
///
/// Daylight-saving policy: ambiguous times (clocks fell back) take the earlier
/// instant; nonexistent times (clocks sprang forward) roll ahead in 30-minute
/// probes until the wall clock exists again. The probe walk is capped; past
/// the cap the naive time is interpreted as UTC, which can only happen with a
/// pathological zone definition.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => {
            let mut probe = naive;
            for _ in 0..48 {
                probe += Duration::minutes(30);
                match tz.from_local_datetime(&probe) {
                    LocalResult::Single(dt) => return dt,
                    LocalResult::Ambiguous(earlier, _) => return earlier,
                    LocalResult::None => continue,
                }
            }
            Utc.from_utc_datetime(&naive).with_timezone(&tz)
        }
    }
}
