// ICS calendar export
// Turns ranked schedules into RFC 5545 calendar text, one weekly
// recurring event per section meeting.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use uuid::Uuid;

use crate::services::optimizer::{
    RankedSchedule, ScheduleError, ScheduledMeeting, ScheduledSection, SectionRecord,
};
use crate::utils::time::parse_hhmm;

pub const DEFAULT_TIMEZONE: &str = "America/New_York";

const RRULE_DAYS: [&str; 7] = ["MO", "TU", "WE", "TH", "FR", "SA", "SU"];

fn day_index(name: &str) -> Result<usize, ScheduleError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "monday" => Ok(0),
        "tuesday" => Ok(1),
        "wednesday" => Ok(2),
        "thursday" => Ok(3),
        "friday" => Ok(4),
        "saturday" => Ok(5),
        "sunday" => Ok(6),
        _ => Err(ScheduleError::UnknownDay(name.to_string())),
    }
}

/// Per-section term dates and room info pulled from the raw course feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionMetadata {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
}

fn parse_mmddyyyy(date_str: Option<&String>) -> Option<NaiveDate> {
    date_str.and_then(|s| NaiveDate::parse_from_str(s, "%m/%d/%Y").ok())
}

/// Build a CRN -> metadata map from the raw course feed.
pub fn section_metadata(records: &[SectionRecord]) -> HashMap<String, SectionMetadata> {
    let mut metadata = HashMap::new();

    for record in records {
        let crn = record.course_reference_number.trim();
        if crn.is_empty() {
            continue;
        }

        // Prefer the first meeting with actual times, fall back to any
        // meeting block
        let slot = record
            .meetings_faculty
            .iter()
            .filter_map(|block| block.meeting_time.as_ref())
            .find(|slot| slot.begin_time.is_some())
            .or_else(|| {
                record
                    .meetings_faculty
                    .first()
                    .and_then(|block| block.meeting_time.as_ref())
            });
        let Some(slot) = slot else {
            metadata.insert(crn.to_string(), SectionMetadata::default());
            continue;
        };

        let building = slot
            .building_description
            .as_deref()
            .or(slot.building.as_deref());
        let location = [building, slot.room.as_deref()]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        metadata.insert(
            crn.to_string(),
            SectionMetadata {
                start_date: parse_mmddyyyy(slot.start_date.as_ref()),
                end_date: parse_mmddyyyy(slot.end_date.as_ref()),
                location: if location.is_empty() { None } else { Some(location) },
            },
        );
    }

    metadata
}

/// Earliest start and latest end date among the sections the schedules
/// actually use.
pub fn derive_term_bounds(
    schedules: &[RankedSchedule],
    metadata: &HashMap<String, SectionMetadata>,
) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let crns: HashSet<&str> = schedules
        .iter()
        .flat_map(|schedule| schedule.sections.iter())
        .map(|section| section.crn.as_str())
        .collect();

    let start = metadata
        .iter()
        .filter(|(crn, _)| crns.contains(crn.as_str()))
        .filter_map(|(_, meta)| meta.start_date)
        .min();
    let end = metadata
        .iter()
        .filter(|(crn, _)| crns.contains(crn.as_str()))
        .filter_map(|(_, meta)| meta.end_date)
        .max();

    (start, end)
}

fn next_weekday_on_or_after(start: NaiveDate, target_weekday: usize) -> NaiveDate {
    let delta =
        (target_weekday as i64 - i64::from(start.weekday().num_days_from_monday())).rem_euclid(7);
    start + Duration::days(delta)
}

fn last_weekday_on_or_before(end: NaiveDate, target_weekday: usize) -> NaiveDate {
    let delta =
        (i64::from(end.weekday().num_days_from_monday()) - target_weekday as i64).rem_euclid(7);
    end - Duration::days(delta)
}

fn format_dt(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

fn meeting_time(hhmm: &str) -> Result<NaiveTime, ScheduleError> {
    let minutes = parse_hhmm(hhmm)?;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .ok_or_else(|| ScheduleError::InvalidTime(hhmm.to_string()))
}

fn build_event_lines(
    schedule_name: &str,
    section: &ScheduledSection,
    meeting: &ScheduledMeeting,
    term_start: NaiveDate,
    term_end: NaiveDate,
    timezone: &str,
    metadata: &HashMap<String, SectionMetadata>,
) -> Result<Vec<String>, ScheduleError> {
    let weekday_index = day_index(&meeting.day)?;
    let rrule_day = RRULE_DAYS[weekday_index];
    let begin_time = meeting_time(&meeting.begin_time)?;
    let end_time = meeting_time(&meeting.end_time)?;

    let first_date = next_weekday_on_or_after(term_start, weekday_index);
    let mut last_date = last_weekday_on_or_before(term_end, weekday_index);
    if last_date < first_date {
        last_date = first_date;
    }

    let dtstart = first_date.and_time(begin_time);
    let dtend = first_date.and_time(end_time);
    let until = last_date.and_time(end_time);

    let crn = section.crn.trim();
    let uid_seed = format!(
        "{}-{}-{}-{}-{}",
        schedule_name, crn, meeting.day, meeting.begin_time, meeting.end_time
    );
    let uid = Uuid::new_v5(&Uuid::NAMESPACE_URL, uid_seed.as_bytes());

    let summary = format!(
        "{} {}",
        section.subject_course.trim(),
        section.title.trim()
    );

    let mut lines = vec![
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", uid),
        format!("SUMMARY:{}", summary.trim()),
        format!("DTSTAMP:{}Z", format_dt(Utc::now().naive_utc())),
        format!("DTSTART;TZID={}:{}", timezone, format_dt(dtstart)),
        format!("DTEND;TZID={}:{}", timezone, format_dt(dtend)),
        format!(
            "RRULE:FREQ=WEEKLY;BYDAY={};UNTIL={}",
            rrule_day,
            format_dt(until)
        ),
    ];

    if let Some(location) = metadata.get(crn).and_then(|meta| meta.location.as_ref()) {
        lines.push(format!("LOCATION:{}", location));
    }
    if !crn.is_empty() {
        lines.push(format!("DESCRIPTION:CRN: {}", crn));
    }

    lines.push("END:VEVENT".to_string());
    Ok(lines)
}

/// Render one schedule as ICS calendar text. CRLF line endings per the
/// ICS format.
pub fn build_calendar(
    schedule: &RankedSchedule,
    term_start: NaiveDate,
    term_end: NaiveDate,
    timezone: &str,
    metadata: &HashMap<String, SectionMetadata>,
) -> Result<String, ScheduleError> {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Planbook//Schedule Export//EN".to_string(),
        format!("X-WR-CALNAME:{}", schedule.name),
    ];

    for section in &schedule.sections {
        for meeting in &section.meeting_times {
            lines.extend(build_event_lines(
                &schedule.name,
                section,
                meeting,
                term_start,
                term_end,
                timezone,
                metadata,
            )?);
        }
    }

    lines.push("END:VCALENDAR".to_string());
    Ok(lines.join("\r\n") + "\r\n")
}

/// File name for an exported schedule ("Schedule 1" -> "schedule_1.ics")
pub fn calendar_filename(schedule_name: &str) -> String {
    format!("{}.ics", schedule_name.to_lowercase().replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schedule_with_one_meeting(day: &str, begin: &str, end: &str) -> RankedSchedule {
        RankedSchedule {
            name: "Schedule 1".to_string(),
            score: 0.0,
            sections: vec![ScheduledSection {
                crn: "12345".to_string(),
                subject_course: "CSCI1200".to_string(),
                title: "Data Structures".to_string(),
                credits: 4.0,
                meeting_times: vec![ScheduledMeeting {
                    day: day.to_string(),
                    begin_time: begin.to_string(),
                    end_time: end.to_string(),
                }],
            }],
        }
    }

    #[test]
    fn test_day_index_mapping() {
        assert_eq!(day_index("Monday").unwrap(), 0);
        assert_eq!(day_index(" wednesday ").unwrap(), 2);
        assert_eq!(RRULE_DAYS[day_index("Friday").unwrap()], "FR");
        assert!(matches!(day_index("Funday"), Err(ScheduleError::UnknownDay(_))));
    }

    #[test]
    fn test_weekday_window_helpers() {
        // 2025-01-14 is a Tuesday; next Monday is the 20th
        let tue = NaiveDate::from_ymd_opt(2025, 1, 14).unwrap();
        assert_eq!(
            next_weekday_on_or_after(tue, 0),
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()
        );
        // A date already on the target weekday is returned unchanged
        assert_eq!(next_weekday_on_or_after(tue, 1), tue);

        // 2025-05-01 is a Thursday; last Friday on or before is Apr 25
        let thu = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert_eq!(
            last_weekday_on_or_before(thu, 4),
            NaiveDate::from_ymd_opt(2025, 4, 25).unwrap()
        );
        assert_eq!(last_weekday_on_or_before(thu, 3), thu);
    }

    #[test]
    fn test_section_metadata_from_feed() {
        let records: Vec<SectionRecord> = serde_json::from_value(json!([
            {
                "courseReferenceNumber": "12345",
                "meetingsFaculty": [{ "meetingTime": {
                    "beginTime": "1000",
                    "endTime": "1150",
                    "startDate": "01/06/2025",
                    "endDate": "04/30/2025",
                    "buildingDescription": "Low Center",
                    "room": "3051",
                } }],
            },
            {
                "courseReferenceNumber": "67890",
                "meetingsFaculty": [{ "meetingTime": {
                    "startDate": "not a date",
                    "building": "DCC",
                } }],
            },
        ]))
        .unwrap();

        let metadata = section_metadata(&records);
        assert_eq!(
            metadata["12345"],
            SectionMetadata {
                start_date: NaiveDate::from_ymd_opt(2025, 1, 6),
                end_date: NaiveDate::from_ymd_opt(2025, 4, 30),
                location: Some("Low Center 3051".to_string()),
            }
        );
        // Unparseable dates become None; bare building still counts
        assert_eq!(
            metadata["67890"],
            SectionMetadata {
                start_date: None,
                end_date: None,
                location: Some("DCC".to_string()),
            }
        );
    }

    #[test]
    fn test_derive_term_bounds_only_uses_scheduled_crns() {
        let schedules = vec![schedule_with_one_meeting("Monday", "1000", "1150")];
        let metadata = HashMap::from([
            (
                "12345".to_string(),
                SectionMetadata {
                    start_date: NaiveDate::from_ymd_opt(2025, 1, 6),
                    end_date: NaiveDate::from_ymd_opt(2025, 4, 30),
                    location: None,
                },
            ),
            // Not referenced by any schedule; must be ignored
            (
                "99999".to_string(),
                SectionMetadata {
                    start_date: NaiveDate::from_ymd_opt(2024, 9, 1),
                    end_date: NaiveDate::from_ymd_opt(2025, 12, 15),
                    location: None,
                },
            ),
        ]);

        let (start, end) = derive_term_bounds(&schedules, &metadata);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 4, 30));
    }

    #[test]
    fn test_build_calendar_structure() {
        let schedule = schedule_with_one_meeting("Monday", "1000", "1150");
        let metadata = HashMap::from([(
            "12345".to_string(),
            SectionMetadata {
                start_date: None,
                end_date: None,
                location: Some("Low Center 3051".to_string()),
            },
        )]);

        let term_start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(); // Monday
        let term_end = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(); // Wednesday

        let text =
            build_calendar(&schedule, term_start, term_end, DEFAULT_TIMEZONE, &metadata).unwrap();

        assert!(text.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(text.ends_with("END:VCALENDAR\r\n"));
        assert!(text.contains("X-WR-CALNAME:Schedule 1"));
        assert!(text.contains("SUMMARY:CSCI1200 Data Structures"));
        assert!(text.contains("DTSTART;TZID=America/New_York:20250106T100000"));
        assert!(text.contains("DTEND;TZID=America/New_York:20250106T115000"));
        // Last Monday on or before 2025-04-30 is the 28th
        assert!(text.contains("RRULE:FREQ=WEEKLY;BYDAY=MO;UNTIL=20250428T115000"));
        assert!(text.contains("LOCATION:Low Center 3051"));
        assert!(text.contains("DESCRIPTION:CRN: 12345"));
    }

    #[test]
    fn test_build_calendar_rejects_bad_meeting() {
        let schedule = schedule_with_one_meeting("Funday", "1000", "1150");
        let term_start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let term_end = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();

        let result =
            build_calendar(&schedule, term_start, term_end, DEFAULT_TIMEZONE, &HashMap::new());
        assert!(matches!(result, Err(ScheduleError::UnknownDay(_))));

        let schedule = schedule_with_one_meeting("Monday", "10:00", "1150");
        let result =
            build_calendar(&schedule, term_start, term_end, DEFAULT_TIMEZONE, &HashMap::new());
        assert!(matches!(result, Err(ScheduleError::InvalidTime(_))));
    }

    #[test]
    fn test_event_uids_are_stable() {
        let schedule = schedule_with_one_meeting("Monday", "1000", "1150");
        let term_start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let term_end = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();

        let a = build_calendar(&schedule, term_start, term_end, DEFAULT_TIMEZONE, &HashMap::new())
            .unwrap();
        let b = build_calendar(&schedule, term_start, term_end, DEFAULT_TIMEZONE, &HashMap::new())
            .unwrap();

        let uid_line = |text: &str| {
            text.lines()
                .find(|line| line.starts_with("UID:"))
                .map(str::to_string)
        };
        assert_eq!(uid_line(&a), uid_line(&b));
        assert!(uid_line(&a).is_some());
    }

    #[test]
    fn test_calendar_filename() {
        assert_eq!(calendar_filename("Schedule 1"), "schedule_1.ics");
        assert_eq!(calendar_filename("Schedule 25"), "schedule_25.ics");
    }
}
