//! Background jobs: idle-session sweep and the weekday bulletin calendar.

use alpha_core::research::{task::ist, BulletinKind};
use alpha_core::{RequestTicket, Slot};
use chrono::{DateTime, FixedOffset, Timelike, Utc};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::state::{AppState, WebSocketMessage};

const SWEEP_INTERVAL_SECS: u64 = 60;
const SCHEDULE_TICK_SECS: u64 = 20;

/// Drop idle sessions once a minute, forever.
pub async fn sweep_idle_sessions(state: AppState) {
    let mut interval = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        let expired = state.expire_idle_sessions(Utc::now()).await;
        if !expired.is_empty() {
            debug!(count = expired.len(), "Idle sessions swept");
        }
    }
}

/// Issue each bulletin when its IST minute comes round, forever.
///
/// Ticks several times a minute and fires each wall-clock minute at most once.
pub async fn run_bulletin_schedule(state: AppState) {
    let mut interval = tokio::time::interval(Duration::from_secs(SCHEDULE_TICK_SECS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_minute: Option<DateTime<FixedOffset>> = None;

    info!("Bulletin schedule started");
    loop {
        interval.tick().await;
        let Some(minute) = Utc::now()
            .with_timezone(&ist())
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
        else {
            continue;
        };
        if last_minute == Some(minute) {
            continue;
        }
        last_minute = Some(minute);

        for kind in BulletinKind::due_at(minute) {
            publish_bulletin(&state, kind).await;
        }
    }
}

/// Generate one bulletin and commit it to every logged-in session's
/// bulletin slot. Returns how many sessions accepted it.
pub async fn publish_bulletin(state: &AppState, kind: BulletinKind) -> usize {
    let tickets: Vec<(String, RequestTicket)> = {
        let mut sessions = state.sessions.write().await;
        sessions
            .iter_mut()
            .filter(|(_, entry)| entry.session.authenticated)
            .map(|(id, entry)| (id.clone(), entry.slots.begin(Slot::Bulletin)))
            .collect()
    };
    if tickets.is_empty() {
        debug!(kind = kind.as_str(), "No logged-in sessions, bulletin skipped");
        return 0;
    }

    let result = state.desk.bulletin(kind).await;

    let mut delivered = 0;
    for (session_id, ticket) in tickets {
        let accepted = match state.sessions.write().await.get_mut(&session_id) {
            Some(entry) => entry.slots.commit(ticket, result.clone()),
            None => false,
        };
        if accepted {
            delivered += 1;
        }
        state.broadcast(WebSocketMessage::ResearchCompleted {
            session_id,
            slot: Slot::Bulletin,
            generation: ticket.generation,
            accepted,
        });
    }

    info!(kind = kind.as_str(), delivered, "Scheduled bulletin published");
    delivered
}
