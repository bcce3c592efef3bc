// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! iCalendar invites for booked demos.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Length of a demo session.
pub const DEMO_DURATION_MINUTES: i64 = 30;

const ICS_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Inputs for a single-event invite.
#[derive(Debug, Clone)]
pub struct Invite<'a> {
    /// Stable identifier; reusing it lets clients update the same event.
    pub uid: &'a str,
    pub organizer_name: &'a str,
    pub organizer_email: &'a str,
    pub attendee_name: &'a str,
    pub attendee_email: &'a str,
    /// `YYYY-MM-DD`
    pub date: &'a str,
    /// `HH:MM`
    pub time: &'a str,
    pub summary: &'a str,
    pub description: &'a str,
}

/// Parses a booking slot. Booking slots carry no zone and are read as UTC.
pub fn parse_slot(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;
    Some(date.and_time(time).and_utc())
}

/// Renders a `METHOD:REQUEST` calendar with one 30-minute event.
///
/// Returns `None` when the slot does not parse; the caller then sends the
/// confirmation without an invite.
pub fn render_invite(invite: &Invite<'_>, now: DateTime<Utc>) -> Option<String> {
    let start = parse_slot(invite.date, invite.time)?;
    let end = start + TimeDelta::minutes(DEMO_DURATION_MINUTES);

    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Frontdesk//Demo Booking//EN".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:REQUEST".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", invite.uid),
        format!("DTSTAMP:{}", now.format(ICS_TIME_FORMAT)),
        format!("DTSTART:{}", start.format(ICS_TIME_FORMAT)),
        format!("DTEND:{}", end.format(ICS_TIME_FORMAT)),
        format!("SUMMARY:{}", escape_text(invite.summary)),
        format!("DESCRIPTION:{}", escape_text(invite.description)),
        format!(
            "ORGANIZER;CN={}:MAILTO:{}",
            escape_param(invite.organizer_name),
            invite.organizer_email
        ),
        format!(
            "ATTENDEE;CN={};RSVP=TRUE:MAILTO:{}",
            escape_param(invite.attendee_name),
            invite.attendee_email
        ),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    // RFC 5545 requires CRLF line endings.
    Some(lines.join("\r\n"))
}

fn escape_text(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

fn escape_param(value: &str) -> String {
    let cleaned: String = value.chars().filter(|c| !c.is_control()).collect();
    if cleaned.contains([':', ';', ',']) {
        format!("\"{}\"", cleaned.replace('"', ""))
    } else {
        cleaned
    }
}
