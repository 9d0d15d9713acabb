//! Live/upcoming event lookup and display labels.

use chrono::{DateTime, FixedOffset, Utc};

use crate::catalog::EpgIndex;
use crate::config::ScheduleConfig;

/// The event of interest a channel is showing or will show next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Airing {
    Live { title: String, start: DateTime<Utc> },
    Next { title: String, start: DateTime<Utc> },
}

/// Look up the current or soonest event for a channel. Pure read; when both
/// slots are anomalously populated with overlapping windows, Live wins
/// deterministically.
pub fn lookup(index: &EpgIndex, channel_id: &str) -> Option<Airing> {
    if let Some(programme) = index.live(channel_id) {
        return Some(Airing::Live {
            title: programme.title.clone(),
            start: programme.start,
        });
    }
    index.upcoming(channel_id).map(|programme| Airing::Next {
        title: programme.title.clone(),
        start: programme.start,
    })
}

/// Render the playlist display label: `<title> | <HH:MM> <tz-label>`, with
/// the start time in the deployment time zone.
pub fn airing_label(airing: &Airing, schedule: &ScheduleConfig) -> String {
    let offset = FixedOffset::east_opt(schedule.utc_offset_hours * 3600)
        .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"));
    let (title, start) = match airing {
        Airing::Live { title, start } | Airing::Next { title, start } => (title, start),
    };
    format!(
        "{title} | {} {}",
        start.with_timezone(&offset).format("%H:%M"),
        schedule.tz_label
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use chrono::TimeZone;

    fn index_with(text: &str) -> EpgIndex {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
        EpgIndex::build(text, now, &AppConfig::default())
    }

    #[test]
    fn live_wins_over_upcoming() {
        let text = "\
<programme start=\"20240101120000\" stop=\"20240101130000\" channel=\"sp1\">
<title>Premier League Live</title>
</programme>
<programme start=\"20240101150000\" stop=\"20240101170000\" channel=\"sp1\">
<title>Premier League Later</title>
</programme>\n";
        let index = index_with(text);
        match lookup(&index, "sp1") {
            Some(Airing::Live { title, .. }) => assert_eq!(title, "Premier League Live"),
            other => panic!("Expected Live, got {other:?}"),
        }
    }

    #[test]
    fn upcoming_when_nothing_is_live() {
        let text = "\
<programme start=\"20240101150000\" stop=\"20240101170000\" channel=\"sp1\">
<title>Premier League Later</title>
</programme>\n";
        let index = index_with(text);
        match lookup(&index, "sp1") {
            Some(Airing::Next { title, .. }) => assert_eq!(title, "Premier League Later"),
            other => panic!("Expected Next, got {other:?}"),
        }
    }

    #[test]
    fn unknown_channel_has_nothing() {
        let index = index_with("");
        assert_eq!(lookup(&index, "sp1"), None);
    }

    #[test]
    fn label_renders_in_deployment_zone() {
        // 12:00 UTC is 19:00 in UTC+7.
        let airing = Airing::Live {
            title: "Premier League Matchday".to_string(),
            start: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        };
        let schedule = AppConfig::default().schedule;
        assert_eq!(
            airing_label(&airing, &schedule),
            "Premier League Matchday | 19:00 WIB"
        );
    }

    #[test]
    fn label_wraps_past_midnight() {
        // 20:30 UTC is 03:30 next day in UTC+7.
        let airing = Airing::Next {
            title: "NBA Finals".to_string(),
            start: Utc.with_ymd_and_hms(2024, 1, 1, 20, 30, 0).unwrap(),
        };
        let schedule = AppConfig::default().schedule;
        assert_eq!(airing_label(&airing, &schedule), "NBA Finals | 03:30 WIB");
    }
}
