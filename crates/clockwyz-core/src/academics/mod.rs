//! Courses, assignments and grades.
//!
//! A [`CourseBook`] owns the course list and the current selection.
//! Syllabus extractions are confirmed into it and come back as schedule
//! drafts for the assignments they contain.

pub mod syllabus;

pub use syllabus::{extract_course_info, CannedSyllabusReader, CourseInfo, Extraction, SyllabusReader};

use chrono::{DateTime, NaiveDateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::grid::ClockTime;
use crate::schedule::{EventDraft, EventType, Priority};

pub const DEFAULT_COURSE_COLOR: &str = "#3b82f6";
pub const DEFAULT_SEMESTER: &str = "Fall 2024";
pub const DEFAULT_CREDITS: u32 = 3;
/// Length of the study block scheduled for each extracted assignment.
pub const ASSIGNMENT_BLOCK_MINUTES: i64 = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingTime {
    pub day: Weekday,
    pub start: ClockTime,
    pub end: ClockTime,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    Homework,
    Exam,
    Project,
    Quiz,
    Paper,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub due: NaiveDateTime,
    pub kind: AssignmentKind,
    pub points: u32,
    pub completed: bool,
    pub grade: Option<u32>,
    #[serde(default)]
    pub extracted_from_syllabus: bool,
    pub confidence: Option<f32>,
}

impl Assignment {
    /// The schedule block for this assignment under `course_code`.
    pub fn to_draft(&self, course_code: &str, color: &str) -> EventDraft {
        let exam = self.kind == AssignmentKind::Exam;
        let mut draft = EventDraft::new(
            format!("{course_code}: {}", self.title),
            if exam { EventType::Assignment } else { EventType::Study },
            self.due,
            ASSIGNMENT_BLOCK_MINUTES,
        );
        draft.priority = Some(if exam { Priority::High } else { Priority::Medium });
        draft.emoji = Some(if exam { "📝" } else { "📚" }.to_string());
        draft.color = Some(color.to_string());
        draft.course = Some(course_code.to_string());
        draft
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: String,
    pub assignment_id: String,
    pub score: f64,
    pub max_score: f64,
    pub date: NaiveDateTime,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyllabusData {
    pub id: String,
    pub file_name: String,
    pub uploaded_at: DateTime<Utc>,
    pub extracted_text: String,
    pub assignments: Vec<Assignment>,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    pub code: String,
    pub professor: String,
    pub credits: u32,
    pub semester: String,
    pub color: String,
    pub location: Option<String>,
    pub meeting_times: Vec<MeetingTime>,
    pub syllabus: Option<SyllabusData>,
    pub assignments: Vec<Assignment>,
    pub grades: Vec<Grade>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn stats(&self, now: NaiveDateTime) -> CourseStats {
        let total = self.assignments.len();
        let completed = self.assignments.iter().filter(|a| a.completed).count();
        let total_points: u32 = self.assignments.iter().map(|a| a.points).sum();
        let earned: f64 = self.grades.iter().map(|g| g.score).sum();
        let max: f64 = self.grades.iter().map(|g| g.max_score).sum();
        let current_grade = if total_points > 0 && max > 0.0 {
            earned / max * 100.0
        } else {
            0.0
        };
        CourseStats {
            total_assignments: total,
            completed_assignments: completed,
            completion_rate: if total > 0 {
                completed as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            current_grade,
            upcoming_deadlines: self
                .assignments
                .iter()
                .filter(|a| !a.completed && a.due > now)
                .count(),
        }
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [&self.name, &self.code, &self.professor]
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseStats {
    pub total_assignments: usize,
    pub completed_assignments: usize,
    pub completion_rate: f64,
    /// Percentage of graded points earned, 0 when nothing is graded.
    pub current_grade: f64,
    pub upcoming_deadlines: usize,
}

/// The add-course form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub name: String,
    pub code: String,
    pub professor: String,
    pub credits: u32,
    pub semester: String,
    pub color: String,
    pub location: Option<String>,
    pub meeting_times: Vec<MeetingTime>,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            professor: String::new(),
            credits: DEFAULT_CREDITS,
            semester: DEFAULT_SEMESTER.to_string(),
            color: DEFAULT_COURSE_COLOR.to_string(),
            location: None,
            meeting_times: Vec::new(),
        }
    }
}

impl CourseDraft {
    /// # Errors
    ///
    /// `MissingField` naming the first blank of name, code and professor.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [("name", &self.name), ("code", &self.code), ("professor", &self.professor)] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseBook {
    courses: Vec<Course>,
    selected: Option<String>,
}

impl CourseBook {
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            selected: None,
        }
    }

    // ── Queries ──

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn selected(&self) -> Option<&Course> {
        self.selected.as_deref().and_then(|id| self.course(id))
    }

    /// Courses matching `query` on name, code or professor, and `semester`
    /// exactly unless it is `None`.
    pub fn search(&self, query: &str, semester: Option<&str>) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| c.matches(query) && semester.map_or(true, |s| c.semester == s))
            .collect()
    }

    /// Distinct semesters in insertion order.
    pub fn semesters(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for course in &self.courses {
            if !seen.contains(&course.semester.as_str()) {
                seen.push(&course.semester);
            }
        }
        seen
    }

    // ── Mutations ──

    pub fn add(&mut self, draft: CourseDraft, now: DateTime<Utc>) -> Result<String, ValidationError> {
        draft.validate()?;
        let id = Uuid::new_v4().to_string();
        tracing::info!(course = %draft.code, "adding course");
        self.courses.push(Course {
            id: id.clone(),
            name: draft.name.trim().to_string(),
            code: draft.code.trim().to_string(),
            professor: draft.professor.trim().to_string(),
            credits: draft.credits,
            semester: draft.semester,
            color: draft.color,
            location: draft.location.filter(|l| !l.trim().is_empty()),
            meeting_times: draft.meeting_times,
            syllabus: None,
            assignments: Vec::new(),
            grades: Vec::new(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    /// Remove a course. The selection is cleared when it pointed at it.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.courses.len();
        self.courses.retain(|c| c.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.courses.len() != before
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.filter(|id| self.course(id).is_some()).map(str::to_string);
    }

    /// Flip completion of an assignment of the selected course.
    pub fn toggle_assignment(&mut self, assignment_id: &str, now: DateTime<Utc>) -> Option<bool> {
        let selected = self.selected.clone()?;
        let course = self.courses.iter_mut().find(|c| c.id == selected)?;
        let assignment = course.assignments.iter_mut().find(|a| a.id == assignment_id)?;
        assignment.completed = !assignment.completed;
        course.updated_at = now;
        Some(assignment.completed)
    }

    /// Accept a syllabus extraction.
    ///
    /// With a course selected the assignments are appended to it; otherwise
    /// a course is created from whatever [`extract_course_info`] finds.
    /// Returns one schedule draft per extracted assignment.
    pub fn confirm_extraction(
        &mut self,
        file_name: &str,
        extraction: Extraction,
        now: DateTime<Utc>,
    ) -> Vec<EventDraft> {
        let syllabus = SyllabusData {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            uploaded_at: now,
            extracted_text: extraction.text.clone(),
            assignments: extraction.assignments.clone(),
            confidence: extraction.confidence,
        };

        let selected = self
            .selected
            .clone()
            .and_then(|id| self.courses.iter().position(|c| c.id == id));
        let index = match selected {
            Some(index) => {
                let course = &mut self.courses[index];
                course.assignments.extend(extraction.assignments.iter().cloned());
                course.syllabus = Some(syllabus);
                course.updated_at = now;
                index
            }
            None => {
                let info = extract_course_info(&extraction.text);
                self.courses.push(Course {
                    id: Uuid::new_v4().to_string(),
                    name: info.name.unwrap_or_else(|| "Extracted Course".to_string()),
                    code: info.code.unwrap_or_else(|| "COURSE".to_string()),
                    professor: info.professor.unwrap_or_else(|| "Professor".to_string()),
                    credits: info.credits.unwrap_or(DEFAULT_CREDITS),
                    semester: DEFAULT_SEMESTER.to_string(),
                    color: DEFAULT_COURSE_COLOR.to_string(),
                    location: info.location,
                    meeting_times: Vec::new(),
                    syllabus: Some(syllabus),
                    assignments: extraction.assignments.clone(),
                    grades: Vec::new(),
                    created_at: now,
                    updated_at: now,
                });
                self.courses.len() - 1
            }
        };

        let course = &self.courses[index];
        tracing::info!(
            course = %course.code,
            assignments = extraction.assignments.len(),
            "confirmed syllabus extraction"
        );
        extraction
            .assignments
            .iter()
            .map(|a| a.to_draft(&course.code, &course.color))
            .collect()
    }
}
