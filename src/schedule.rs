//! Projection of the nested stop response into a flat, display-ready schedule.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::schema::{StopData, StopInfoResponse, Thread};

/// Arrival times of one thread, in event order.
pub type Group = Vec<DateTime<Utc>>;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ScheduleView {
    pub stop_name: String,
    pub routes: Vec<RouteView>,
}

/// Arrivals of a single route. Each group holds the times of one thread, so a
/// route with several active runs yields several groups.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RouteView {
    pub route_name: String,
    pub estimated: Vec<Group>,
    pub scheduled: Vec<Group>,
}

impl RouteView {
    pub fn is_empty(&self) -> bool {
        self.estimated.is_empty() && self.scheduled.is_empty()
    }
}

impl ScheduleView {
    /// Projects a decoded response, `None` when it carries no `data`.
    pub fn from_response(resp: &StopInfoResponse) -> Option<Self> {
        resp.data.as_ref().map(project)
    }
}

/// Builds the schedule view. Source order is preserved for transports,
/// threads and events. Threads that do not board passengers or have no
/// events are dropped; unparsable times are skipped.
pub fn project(data: &StopData) -> ScheduleView {
    let routes = data
        .transports
        .iter()
        .map(|transport| {
            let mut route = RouteView {
                route_name: transport.name.clone().unwrap_or_default(),
                ..Default::default()
            };

            for thread in transport.threads.iter().filter(|t| boards(t)) {
                let (estimated, scheduled) = partition(thread);
                if !estimated.is_empty() {
                    route.estimated.push(estimated);
                }
                if !scheduled.is_empty() {
                    route.scheduled.push(scheduled);
                }
            }

            route
        })
        .collect();

    ScheduleView {
        stop_name: data.name.clone().unwrap_or_default(),
        routes,
    }
}

fn boards(thread: &Thread) -> bool {
    !thread.no_boarding && !thread.events().is_empty()
}

/// Splits a thread's events into (estimated, scheduled) timestamp lists.
fn partition(thread: &Thread) -> (Group, Group) {
    let mut estimated = Vec::new();
    let mut scheduled = Vec::new();

    for event in thread.events() {
        if let Some(ts) = event.estimated.as_ref().and_then(|t| t.timestamp()) {
            estimated.push(ts);
        }
        if let Some(ts) = event.scheduled.as_ref().and_then(|t| t.timestamp()) {
            scheduled.push(ts);
        }
    }

    (estimated, scheduled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{BriefSchedule, Event, ScheduleTime, Transport};

    fn time(value: &str) -> Option<ScheduleTime> {
        Some(ScheduleTime {
            value: Some(value.to_string()),
            ..Default::default()
        })
    }

    fn event(scheduled: Option<&str>, estimated: Option<&str>) -> Event {
        Event {
            scheduled: scheduled.and_then(time),
            estimated: estimated.and_then(time),
            vehicle_id: None,
        }
    }

    fn thread(no_boarding: bool, events: Vec<Event>) -> Thread {
        Thread {
            thread_id: None,
            no_boarding,
            brief_schedule: Some(BriefSchedule { events }),
        }
    }

    fn stop(threads: Vec<Thread>) -> StopData {
        StopData {
            name: Some("Test Stop".into()),
            transports: vec![Transport {
                name: Some("Bus 1".into()),
                threads,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_no_boarding_thread_contributes_nothing() {
        let events = vec![
            event(Some("1700000000"), Some("1700000060")),
            event(Some("1700000600"), Some("1700000660")),
            event(Some("1700001200"), Some("1700001260")),
        ];
        let view = project(&stop(vec![thread(true, events)]));

        assert_eq!(view.routes.len(), 1);
        assert!(view.routes[0].is_empty());
    }

    #[test]
    fn test_thread_without_events_is_skipped() {
        let view = project(&stop(vec![thread(false, vec![])]));
        assert!(view.routes[0].is_empty());
    }

    #[test]
    fn test_malformed_estimate_is_dropped() {
        let events = vec![
            event(None, Some("not-a-number")),
            event(None, Some("1700000000")),
        ];
        let view = project(&stop(vec![thread(false, events)]));

        assert_eq!(view.routes[0].estimated, vec![vec![ts(1_700_000_000)]]);
        assert!(view.routes[0].scheduled.is_empty());
    }

    #[test]
    fn test_groups_follow_thread_order() {
        let threads = vec![
            thread(false, vec![event(Some("1700000900"), None)]),
            thread(false, vec![event(Some("1700000300"), None)]),
        ];
        let view = project(&stop(threads));

        assert_eq!(
            view.routes[0].scheduled,
            vec![vec![ts(1_700_000_900)], vec![ts(1_700_000_300)]]
        );
    }

    #[test]
    fn test_event_with_both_times_feeds_both_lists() {
        let view = project(&stop(vec![thread(
            false,
            vec![event(Some("1700000000"), Some("1700000120"))],
        )]));

        let route = &view.routes[0];
        assert_eq!(route.scheduled, vec![vec![ts(1_700_000_000)]]);
        assert_eq!(route.estimated, vec![vec![ts(1_700_000_120)]]);
    }

    #[test]
    fn test_thread_with_only_unparsable_times_adds_no_group() {
        let threads = vec![
            thread(false, vec![event(Some(""), Some(""))]),
            thread(false, vec![event(Some("1700000000"), None)]),
        ];
        let view = project(&stop(threads));

        assert_eq!(view.routes[0].scheduled.len(), 1);
        assert!(view.routes[0].estimated.is_empty());
    }

    #[test]
    fn test_from_response_without_data() {
        assert!(ScheduleView::from_response(&StopInfoResponse::default()).is_none());
    }
}
