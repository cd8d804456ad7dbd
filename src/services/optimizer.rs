// Schedule optimizer
// Enumerates non-conflicting section combinations for a set of course
// requirements and ranks them by a weighted schedule score.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::utils::time::{minutes_to_hhmm, parse_hhmm, InvalidTime};

pub const DAY_NAMES_LONG: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

pub const DEFAULT_HASS_SUBJECT: &str = "INQR";
pub const DEFAULT_MAX_SCHEDULES: usize = 25;

const EARLY_CLASS_THRESHOLD: u32 = 10 * 60; // 10:00
const LATE_CLASS_THRESHOLD: u32 = 18 * 60; // 18:00
const EARLY_LATE_PENALTY_PER_MIN: f64 = 0.2;
const ACTIVE_DAY_IDEAL_RANGE: (usize, usize) = (3, 4);
const ACTIVE_DAY_BONUS: f64 = 100.0;
const ACTIVE_DAY_PENALTY_PER_DAY: f64 = 50.0;
const DISTRIBUTION_WEIGHT: f64 = 20.0;
const IDLE_TIME_PENALTY: f64 = 0.05;
const SPAN_PENALTY: f64 = 0.05;

/// Error type for schedule operations
#[derive(Debug)]
pub enum ScheduleError {
    InvalidTime(String),
    UnknownDay(String),
    InvalidOptions(String),
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ScheduleError::InvalidTime(e) => write!(f, "Invalid time format: {}", e),
            ScheduleError::UnknownDay(e) => write!(f, "Unknown day name: {}", e),
            ScheduleError::InvalidOptions(e) => write!(f, "Invalid options: {}", e),
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<InvalidTime> for ScheduleError {
    fn from(err: InvalidTime) -> Self {
        ScheduleError::InvalidTime(err.0)
    }
}

/// Raw section payload as delivered by the SIS course feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionRecord {
    pub course_reference_number: String,
    pub subject: String,
    pub subject_course: String,
    pub course_title: String,
    pub seats_available: i64,
    pub credit_hours: Option<f64>,
    pub meetings_faculty: Vec<MeetingBlock>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingBlock {
    pub meeting_time: Option<MeetingSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingSlot {
    pub begin_time: Option<String>,
    pub end_time: Option<String>,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub credit_hour_session: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub building_description: Option<String>,
    pub building: Option<String>,
    pub room: Option<String>,
}

impl MeetingSlot {
    fn day_flags(&self) -> [bool; 5] {
        [
            self.monday,
            self.tuesday,
            self.wednesday,
            self.thursday,
            self.friday,
        ]
    }
}

/// Normalized meeting time for a single day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeetingTime {
    /// Day index: 0=Mon ... 4=Fri
    pub day: usize,
    /// Minutes since midnight
    pub begin_time: u32,
    pub end_time: u32,
}

impl MeetingTime {
    pub fn overlaps_with(&self, other: &MeetingTime) -> bool {
        if self.day != other.day {
            return false;
        }
        !(self.end_time <= other.begin_time || self.begin_time >= other.end_time)
    }
}

#[derive(Debug, Clone)]
pub struct Section {
    pub crn: String,
    pub subject_course: String,
    pub title: String,
    pub credits: f64,
    pub meeting_times: Vec<MeetingTime>,
}

impl Section {
    pub fn conflicts_with(&self, other: &Section) -> bool {
        self.meeting_times
            .iter()
            .any(|mt1| other.meeting_times.iter().any(|mt2| mt1.overlaps_with(mt2)))
    }
}

#[derive(Debug, Clone)]
struct Course {
    subject_course: String,
    title: String,
    credits: f64,
    sections: Vec<Section>,
}

impl Course {
    fn new(subject_course: String, title: String, credits: f64) -> Self {
        Self {
            subject_course,
            title,
            credits,
            sections: Vec::new(),
        }
    }

    fn add_section(&mut self, record: &SectionRecord) {
        let meeting_times = extract_meeting_times(record);
        if meeting_times.is_empty() {
            log::debug!(
                "Skipping section {} for {} due to missing meeting times",
                record.course_reference_number,
                self.subject_course
            );
            return;
        }

        self.sections.push(Section {
            crn: record.course_reference_number.trim().to_string(),
            subject_course: self.subject_course.clone(),
            title: self.title.clone(),
            credits: self.credits,
            meeting_times,
        });
    }
}

/// Extract and validate meeting times from a section payload.
///
/// Meetings missing time info, or with malformed or non-positive time
/// ranges, are skipped so schedules never carry unknown times.
pub fn extract_meeting_times(record: &SectionRecord) -> Vec<MeetingTime> {
    let mut meeting_times = Vec::new();

    for block in &record.meetings_faculty {
        let Some(slot) = &block.meeting_time else {
            continue;
        };
        let (Some(begin), Some(end)) = (&slot.begin_time, &slot.end_time) else {
            continue;
        };

        let (begin_minutes, end_minutes) = match (parse_hhmm(begin), parse_hhmm(end)) {
            (Ok(b), Ok(e)) => (b, e),
            _ => {
                log::debug!("Skipping meeting with invalid time format: {}-{}", begin, end);
                continue;
            }
        };

        if begin_minutes >= end_minutes {
            log::debug!("Skipping meeting with non-positive duration: {}-{}", begin, end);
            continue;
        }

        for (day, active) in slot.day_flags().iter().enumerate() {
            if *active {
                meeting_times.push(MeetingTime {
                    day,
                    begin_time: begin_minutes,
                    end_time: end_minutes,
                });
            }
        }
    }

    meeting_times
}

/// Prefer the section's creditHours, otherwise sum the per-meeting
/// creditHourSession values.
pub fn compute_section_credits(record: &SectionRecord) -> f64 {
    let credits = record.credit_hours.unwrap_or(0.0);
    if credits != 0.0 {
        return credits;
    }

    record
        .meetings_faculty
        .iter()
        .filter_map(|block| block.meeting_time.as_ref())
        .filter_map(|slot| slot.credit_hour_session)
        .sum()
}

/// Weights controlling how candidate schedules are scored.
#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub early_class_threshold: u32,
    pub late_class_threshold: u32,
    pub early_late_penalty_per_min: f64,
    pub active_day_ideal_range: (usize, usize),
    pub active_day_bonus: f64,
    pub active_day_penalty_per_day: f64,
    pub distribution_weight: f64,
    pub idle_time_penalty: f64,
    pub span_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            early_class_threshold: EARLY_CLASS_THRESHOLD,
            late_class_threshold: LATE_CLASS_THRESHOLD,
            early_late_penalty_per_min: EARLY_LATE_PENALTY_PER_MIN,
            active_day_ideal_range: ACTIVE_DAY_IDEAL_RANGE,
            active_day_bonus: ACTIVE_DAY_BONUS,
            active_day_penalty_per_day: ACTIVE_DAY_PENALTY_PER_DAY,
            distribution_weight: DISTRIBUTION_WEIGHT,
            idle_time_penalty: IDLE_TIME_PENALTY,
            span_penalty: SPAN_PENALTY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptimizerOptions {
    /// Requirement name -> list of course groups; each group is a set of
    /// courses taken together, and exactly one group satisfies the
    /// requirement.
    pub requirements: BTreeMap<String, Vec<Vec<String>>>,
    /// Subject code treated as the HASS elective pool
    pub hass_subject: String,
    /// Truncate results to the top N schedules by score
    pub max_schedules: usize,
    pub min_seats_available: i64,
    pub include_subjects: Option<HashSet<String>>,
    pub exclude_subjects: Option<HashSet<String>>,
    pub scoring: ScoringWeights,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            requirements: default_requirements(),
            hass_subject: DEFAULT_HASS_SUBJECT.to_string(),
            max_schedules: DEFAULT_MAX_SCHEDULES,
            min_seats_available: 1,
            include_subjects: None,
            exclude_subjects: None,
            scoring: ScoringWeights::default(),
        }
    }
}

fn default_requirements() -> BTreeMap<String, Vec<Vec<String>>> {
    fn group(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    BTreeMap::from([
        ("cs_requirement".to_string(), vec![group(&["CSCI1200"])]),
        ("math_requirement".to_string(), vec![group(&["MATH1020"])]),
        (
            "biol_requirement".to_string(),
            vec![
                group(&["BIOL1010", "BIOL1015"]),
                group(&["BIOL1010", "BIOL1016"]),
            ],
        ),
    ])
}

/// One ranked schedule in the optimizer output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSchedule {
    pub name: String,
    pub score: f64,
    pub sections: Vec<ScheduledSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSection {
    pub crn: String,
    pub subject_course: String,
    pub title: String,
    pub credits: f64,
    pub meeting_times: Vec<ScheduledMeeting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMeeting {
    /// Long day name ("Monday")
    pub day: String,
    /// 'HHMM' strings
    pub begin_time: String,
    pub end_time: String,
}

/// Score a candidate schedule. Higher is better.
///
/// Factors:
/// - Penalize classes before 10:00 or after 18:00
/// - Reward 3-4 active days; penalize too many or too few
/// - Reward even distribution of meetings across active days
/// - Penalize idle gaps and long daily spans
pub fn evaluate_schedule(schedule: &[&Section], weights: &ScoringWeights) -> f64 {
    if schedule.is_empty() {
        return f64::NEG_INFINITY;
    }

    let mut score = 0.0;
    let mut days: [Vec<(u32, u32)>; 5] = Default::default();

    // Early/late penalties + collect per-day windows
    for section in schedule {
        for mt in &section.meeting_times {
            days[mt.day].push((mt.begin_time, mt.end_time));
            if mt.begin_time < weights.early_class_threshold {
                score -= f64::from(weights.early_class_threshold - mt.begin_time)
                    * weights.early_late_penalty_per_min;
            }
            if mt.end_time > weights.late_class_threshold {
                score -= f64::from(mt.end_time - weights.late_class_threshold)
                    * weights.early_late_penalty_per_min;
            }
        }
    }

    // Active days and distribution
    let day_counts: Vec<f64> = days
        .iter()
        .filter(|d| !d.is_empty())
        .map(|d| d.len() as f64)
        .collect();
    let active_days = day_counts.len();

    if weights.active_day_ideal_range.0 <= active_days
        && active_days <= weights.active_day_ideal_range.1
    {
        score += weights.active_day_bonus;
    } else {
        score -= active_days.abs_diff(weights.active_day_ideal_range.1) as f64
            * weights.active_day_penalty_per_day;
    }

    if day_counts.len() > 1 {
        score -= sample_stdev(&day_counts) * weights.distribution_weight;
    }

    // Compactness (idle time) and span
    let mut spans = Vec::new();
    for day_times in &days {
        if day_times.is_empty() {
            continue;
        }
        let start = day_times.iter().map(|t| t.0).min().unwrap_or(0);
        let end = day_times.iter().map(|t| t.1).max().unwrap_or(0);
        let total_class_time: u32 = day_times.iter().map(|t| t.1 - t.0).sum();
        let idle_time = (end - start) - total_class_time;
        spans.push(f64::from(end - start));
        score -= f64::from(idle_time) * weights.idle_time_penalty;
    }

    if !spans.is_empty() {
        score -= mean(&spans) * weights.span_penalty;
    }

    (score * 100.0).round() / 100.0
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_stdev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0);
    variance.sqrt()
}

/// Generate all non-conflicting section combinations for a set of
/// courses, pruning conflicts incrementally rather than post-filtering.
fn section_combinations<'a>(courses: &[&'a Course]) -> Vec<Vec<&'a Section>> {
    let mut combos: Vec<Vec<&Section>> = vec![Vec::new()];

    for course in courses {
        if course.sections.is_empty() {
            return Vec::new();
        }
        let mut next: Vec<Vec<&Section>> = Vec::new();
        for section in &course.sections {
            for combo in &combos {
                if combo.iter().all(|existing| !section.conflicts_with(existing)) {
                    let mut extended = combo.clone();
                    extended.push(section);
                    next.push(extended);
                }
            }
        }
        combos = next;
        if combos.is_empty() {
            return Vec::new();
        }
    }

    combos
}

/// Build requirements from the section feed, enumerate conflict-free
/// course/section combinations, score them, and return the top N.
///
/// Returns an empty list when any requirement cannot be satisfied or no
/// conflict-free schedule exists.
pub fn optimize_courses(
    records: &[SectionRecord],
    options: &OptimizerOptions,
) -> Result<Vec<RankedSchedule>, ScheduleError> {
    if options.max_schedules == 0 {
        return Err(ScheduleError::InvalidOptions(
            "max_schedules must be positive".to_string(),
        ));
    }

    // Course containers for required + HASS electives
    let mut required: BTreeMap<String, Option<Course>> = options
        .requirements
        .values()
        .flatten()
        .flatten()
        .map(|code| (code.clone(), None))
        .collect();
    let mut hass: BTreeMap<String, Course> = BTreeMap::new();

    for record in records {
        if record.seats_available < options.min_seats_available {
            continue;
        }
        if let Some(include) = &options.include_subjects {
            if !include.contains(&record.subject) {
                continue;
            }
        }
        if let Some(exclude) = &options.exclude_subjects {
            if exclude.contains(&record.subject) {
                continue;
            }
        }

        let credits = compute_section_credits(record);

        if let Some(entry) = required.get_mut(&record.subject_course) {
            entry
                .get_or_insert_with(|| {
                    Course::new(
                        record.subject_course.clone(),
                        record.course_title.clone(),
                        credits,
                    )
                })
                .add_section(record);
        }

        if record.subject == options.hass_subject {
            hass.entry(record.subject_course.clone())
                .or_insert_with(|| {
                    Course::new(
                        record.subject_course.clone(),
                        record.course_title.clone(),
                        credits,
                    )
                })
                .add_section(record);
        }
    }

    // Resolve requirement specs against available courses, dropping
    // groups where any course is missing or has no usable sections.
    let mut requirement_groups: Vec<Vec<Vec<&Course>>> = Vec::new();
    for (name, groups) in &options.requirements {
        let mut concrete: Vec<Vec<&Course>> = Vec::new();
        for group in groups {
            let mut resolved = Vec::new();
            let mut missing = false;
            for code in group {
                match required.get(code).and_then(|c| c.as_ref()) {
                    Some(course) if !course.sections.is_empty() => resolved.push(course),
                    _ => {
                        missing = true;
                        break;
                    }
                }
            }
            if !missing {
                concrete.push(resolved);
            }
        }
        if concrete.is_empty() {
            log::debug!("Requirement {} cannot be satisfied", name);
        }
        requirement_groups.push(concrete);
    }

    // HASS electives: each available course is its own group
    let hass_groups: Vec<Vec<&Course>> = hass
        .values()
        .filter(|course| !course.sections.is_empty())
        .map(|course| vec![course])
        .collect();
    requirement_groups.push(hass_groups);

    // Course combinations: choose one group per requirement
    let mut course_combos: Vec<Vec<&Course>> = vec![Vec::new()];
    for groups in &requirement_groups {
        if groups.is_empty() {
            // Requirement not fulfillable -> zero schedules overall
            return Ok(Vec::new());
        }
        let mut next = Vec::new();
        for group in groups {
            for combo in &course_combos {
                let mut extended = combo.clone();
                extended.extend(group.iter().copied());
                next.push(extended);
            }
        }
        course_combos = next;
    }

    // All valid, conflict-free schedules across section choices
    let mut valid_schedules: Vec<Vec<&Section>> = Vec::new();
    for combo in &course_combos {
        valid_schedules.extend(section_combinations(combo));
    }

    if valid_schedules.is_empty() {
        return Ok(Vec::new());
    }

    let mut scored: Vec<(Vec<&Section>, f64)> = valid_schedules
        .into_iter()
        .map(|schedule| {
            let score = evaluate_schedule(&schedule, &options.scoring);
            (schedule, score)
        })
        .collect();
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let output = scored
        .into_iter()
        .take(options.max_schedules)
        .enumerate()
        .map(|(i, (schedule, score))| RankedSchedule {
            name: format!("Schedule {}", i + 1),
            score,
            sections: schedule
                .iter()
                .map(|section| ScheduledSection {
                    crn: section.crn.clone(),
                    subject_course: section.subject_course.clone(),
                    title: section.title.clone(),
                    credits: section.credits,
                    meeting_times: section
                        .meeting_times
                        .iter()
                        .map(|mt| ScheduledMeeting {
                            day: DAY_NAMES_LONG[mt.day].to_string(),
                            begin_time: minutes_to_hhmm(mt.begin_time),
                            end_time: minutes_to_hhmm(mt.end_time),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    Ok(output)
}
