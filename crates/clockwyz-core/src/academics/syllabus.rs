//! Syllabus reading and course-info extraction.

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Assignment, AssignmentKind};
use crate::error::ServiceError;

static COURSE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]{2,4}\s*\d{3}[A-Z]?)\s*[:\-]?\s*(.+)").unwrap());
static PROFESSOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:instructor|professor|prof|taught by)[:\s]+([A-Z][a-z]*\.?(?:[ \t]+[A-Z][a-z]*\.?)*)").unwrap()
});
static CREDITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(\d+)\s*credit").unwrap());
static LOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i:room|location|meets in)[: \t]+([A-Za-z0-9 \t]*\d+)").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Only the head of the document is searched for the course line.
const COURSE_LINE_SCAN: usize = 10;

/// What a reader pulled out of a syllabus document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub text: String,
    pub assignments: Vec<Assignment>,
    /// 0.0 to 1.0
    pub confidence: f32,
}

/// Course fields recognised in free syllabus text. Anything not found is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    pub code: Option<String>,
    pub name: Option<String>,
    pub professor: Option<String>,
    pub credits: Option<u32>,
    pub location: Option<String>,
}

/// Turns an uploaded syllabus into text and assignments.
pub trait SyllabusReader: Send + Sync {
    fn name(&self) -> &str;

    /// Only image uploads are accepted.
    fn read(&self, file_name: &str, content_type: &str, bytes: &[u8]) -> Result<Extraction, ServiceError>;
}

/// Returns the same extraction for every image.
#[derive(Debug, Clone, Default)]
pub struct CannedSyllabusReader;

impl CannedSyllabusReader {
    pub const TEXT: &'static str = "CS 461 Software Engineering\nInstructor: Dr. Smith\nAssignment 1: Project Proposal - Due September 15, 2024\nMidterm Exam - October 20, 2024\nFinal Project - Due December 10, 2024\nFinal Exam - December 18, 2024";

    fn assignment(title: &str, due: (i32, u32, u32), kind: AssignmentKind, points: u32, confidence: f32) -> Assignment {
        let due = NaiveDate::from_ymd_opt(due.0, due.1, due.2)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN);
        Assignment {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: None,
            due,
            kind,
            points,
            completed: false,
            grade: None,
            extracted_from_syllabus: true,
            confidence: Some(confidence),
        }
    }
}

impl SyllabusReader for CannedSyllabusReader {
    fn name(&self) -> &str {
        "canned-syllabus"
    }

    fn read(&self, file_name: &str, content_type: &str, bytes: &[u8]) -> Result<Extraction, ServiceError> {
        if !content_type.starts_with("image/") {
            return Err(ServiceError::InvalidInput {
                service: self.name().to_string(),
                message: format!("{file_name} is {content_type}, expected an image"),
            });
        }
        if bytes.is_empty() {
            return Err(ServiceError::InvalidInput {
                service: self.name().to_string(),
                message: format!("{file_name} is empty"),
            });
        }
        tracing::debug!(file = file_name, size = bytes.len(), "reading syllabus");
        Ok(Extraction {
            text: Self::TEXT.to_string(),
            assignments: vec![
                Self::assignment("Project Proposal", (2024, 9, 15), AssignmentKind::Homework, 100, 0.95),
                Self::assignment("Midterm Exam", (2024, 10, 20), AssignmentKind::Exam, 200, 0.88),
                Self::assignment("Final Project", (2024, 12, 10), AssignmentKind::Project, 300, 0.92),
            ],
            confidence: 0.91,
        })
    }
}

/// Pull code, name, professor, credits and location out of syllabus text.
pub fn extract_course_info(text: &str) -> CourseInfo {
    let mut info = CourseInfo::default();

    if let Some(caps) = text
        .lines()
        .take(COURSE_LINE_SCAN)
        .find_map(|line| COURSE_LINE.captures(line))
    {
        info.code = Some(WHITESPACE.replace_all(&caps[1], " ").into_owned());
        info.name = Some(caps[2].trim().to_string());
    }
    if let Some(caps) = PROFESSOR.captures(text) {
        info.professor = Some(caps[1].trim().to_string());
    }
    if let Some(caps) = CREDITS.captures(text) {
        info.credits = caps[1].parse().ok();
    }
    if let Some(caps) = LOCATION.captures(text) {
        info.location = Some(caps[1].trim().to_string());
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_text_yields_course_and_professor() {
        let info = extract_course_info(CannedSyllabusReader::TEXT);
        assert_eq!(info.code.as_deref(), Some("CS 461"));
        assert_eq!(info.name.as_deref(), Some("Software Engineering"));
        assert_eq!(info.professor.as_deref(), Some("Dr. Smith"));
        assert_eq!(info.credits, None);
        assert_eq!(info.location, None);
    }

    #[test]
    fn credits_and_location() {
        let text = "MATH  201B - Linear Algebra\nTaught by Ada Lovelace\n4 Credits\nMeets in: Hall 12";
        let info = extract_course_info(text);
        assert_eq!(info.code.as_deref(), Some("MATH 201B"));
        assert_eq!(info.name.as_deref(), Some("Linear Algebra"));
        assert_eq!(info.professor.as_deref(), Some("Ada Lovelace"));
        assert_eq!(info.credits, Some(4));
        assert_eq!(info.location.as_deref(), Some("Hall 12"));
    }

    #[test]
    fn course_line_only_in_head() {
        let mut text = "intro\n".repeat(COURSE_LINE_SCAN);
        text.push_str("CS 101 Late Title");
        assert_eq!(extract_course_info(&text).code, None);
    }

    #[test]
    fn reader_accepts_images_only() {
        let reader = CannedSyllabusReader;
        let err = reader.read("notes.pdf", "application/pdf", b"%PDF").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput { .. }));
        assert!(reader.read("scan.png", "image/png", &[]).is_err());

        let extraction = reader.read("scan.png", "image/png", &[0x89, 0x50]).unwrap();
        assert_eq!(extraction.assignments.len(), 3);
        assert!(extraction.assignments.iter().all(|a| a.extracted_from_syllabus));
        assert_eq!(extraction.assignments[1].kind, AssignmentKind::Exam);
    }
}
