//! Meetings: the new-meeting form, the meeting list and its queries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::schedule::{EventDraft, EventType};

/// Color of meeting blocks created from this module.
pub const MEETING_COLOR: &str = "#6366f1";
pub const MEETING_EMOJI: &str = "👥";
pub const DEFAULT_ORGANIZER: &str = "You";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Zoom,
    Teams,
    Meet,
    Other,
}

impl Platform {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Zoom => "🔵",
            Self::Teams => "🟣",
            Self::Meet => "🟢",
            Self::Other => "📹",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingKind {
    #[default]
    Team,
    Client,
    Interview,
    Presentation,
    Casual,
    Other,
}

impl MeetingKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Team => "Team Meeting",
            Self::Client => "Client Call",
            Self::Interview => "Interview",
            Self::Presentation => "Presentation",
            Self::Casual => "Casual Chat",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
    Tentative,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Organizer,
    #[default]
    Required,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: ParticipantStatus,
    pub role: ParticipantRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpTask {
    pub id: String,
    pub title: String,
    pub assigned_to: String,
    pub due: Option<NaiveDateTime>,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: Option<String>,
    pub link: Option<String>,
    pub platform: Platform,
    pub participants: Vec<Participant>,
    pub organizer: String,
    pub agenda: Vec<String>,
    pub status: MeetingStatus,
    pub kind: MeetingKind,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub follow_up_tasks: Vec<FollowUpTask>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
            || self
                .participants
                .iter()
                .any(|p| p.name.to_lowercase().contains(&query))
    }

    /// The schedule block mirroring this meeting.
    pub fn to_draft(&self) -> EventDraft {
        let mut draft = EventDraft::new(
            self.title.clone(),
            EventType::Meeting,
            self.start,
            (self.end - self.start).num_minutes(),
        );
        draft.color = Some(MEETING_COLOR.to_string());
        draft.emoji = Some(MEETING_EMOJI.to_string());
        draft.location = self.location.clone();
        draft.description = self.description.clone();
        draft
    }
}

/// The new-meeting form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingDraft {
    pub title: String,
    pub description: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub platform: Platform,
    pub kind: MeetingKind,
    participants: Vec<Participant>,
    agenda: Vec<String>,
}

impl Default for MeetingDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            start: None,
            end: None,
            location: None,
            link: None,
            platform: Platform::default(),
            kind: MeetingKind::default(),
            participants: Vec::new(),
            agenda: vec![String::new()],
        }
    }
}

impl MeetingDraft {
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn agenda(&self) -> &[String] {
        &self.agenda
    }

    /// # Errors
    ///
    /// `MissingField` when the name or email is blank.
    pub fn add_participant(&mut self, name: &str, email: &str) -> Result<String, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".into()));
        }
        if email.trim().is_empty() {
            return Err(ValidationError::MissingField("email".into()));
        }
        let id = Uuid::new_v4().to_string();
        self.participants.push(Participant {
            id: id.clone(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            status: ParticipantStatus::Pending,
            role: ParticipantRole::Required,
        });
        Ok(id)
    }

    pub fn remove_participant(&mut self, id: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        self.participants.len() != before
    }

    pub fn add_agenda_item(&mut self) {
        self.agenda.push(String::new());
    }

    pub fn update_agenda_item(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.agenda.get_mut(index) {
            Some(item) => {
                *item = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_agenda_item(&mut self, index: usize) -> bool {
        if index < self.agenda.len() {
            self.agenda.remove(index);
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingBook {
    meetings: Vec<Meeting>,
}

impl MeetingBook {
    pub fn new(meetings: Vec<Meeting>) -> Self {
        Self { meetings }
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    /// Meetings of `kind` (all kinds for `None`) matching `query` on title,
    /// description or a participant name, earliest first.
    pub fn filtered(&self, kind: Option<MeetingKind>, query: &str) -> Vec<&Meeting> {
        let mut found: Vec<&Meeting> = self
            .meetings
            .iter()
            .filter(|m| kind.map_or(true, |k| m.kind == k) && m.matches(query))
            .collect();
        found.sort_by_key(|m| m.start);
        found
    }

    /// Scheduled meetings that have not started.
    pub fn upcoming(&self, now: NaiveDateTime) -> Vec<&Meeting> {
        self.filtered(None, "")
            .into_iter()
            .filter(|m| m.start > now && m.status == MeetingStatus::Scheduled)
            .collect()
    }

    pub fn on_day(&self, day: NaiveDate) -> Vec<&Meeting> {
        self.filtered(None, "")
            .into_iter()
            .filter(|m| m.start.date() == day)
            .collect()
    }

    /// Create a scheduled meeting from the form.
    ///
    /// Blank agenda items are dropped. Returns the new meeting id and the
    /// schedule block to add alongside it.
    ///
    /// # Errors
    ///
    /// `EmptyTitle`, `MissingField` for an unset start or end, and
    /// `InvalidTimeRange` when the meeting does not end after it starts.
    pub fn create(&mut self, draft: MeetingDraft, now: DateTime<Utc>) -> Result<(String, EventDraft), ValidationError> {
        if draft.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let start = draft.start.ok_or_else(|| ValidationError::MissingField("start".into()))?;
        let end = draft.end.ok_or_else(|| ValidationError::MissingField("end".into()))?;
        if end <= start {
            return Err(ValidationError::InvalidTimeRange { start, end });
        }

        let meeting = Meeting {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            description: draft.description.filter(|d| !d.trim().is_empty()),
            start,
            end,
            location: draft.location.filter(|l| !l.trim().is_empty()),
            link: draft.link.filter(|l| !l.trim().is_empty()),
            platform: draft.platform,
            participants: draft.participants,
            organizer: DEFAULT_ORGANIZER.to_string(),
            agenda: draft.agenda.into_iter().filter(|item| !item.trim().is_empty()).collect(),
            status: MeetingStatus::Scheduled,
            kind: draft.kind,
            is_recurring: false,
            follow_up_tasks: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        tracing::info!(meeting = %meeting.title, participants = meeting.participants.len(), "created meeting");
        let event = meeting.to_draft();
        let id = meeting.id.clone();
        self.meetings.push(meeting);
        Ok((id, event))
    }

    pub fn set_status(&mut self, id: &str, status: MeetingStatus, now: DateTime<Utc>) -> bool {
        match self.meetings.iter_mut().find(|m| m.id == id) {
            Some(meeting) => {
                meeting.status = status;
                meeting.updated_at = now;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.meetings.len();
        self.meetings.retain(|m| m.id != id);
        self.meetings.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn form(title: &str, start: NaiveDateTime, minutes: i64) -> MeetingDraft {
        MeetingDraft {
            title: title.into(),
            start: Some(start),
            end: Some(start + chrono::Duration::minutes(minutes)),
            ..MeetingDraft::default()
        }
    }

    #[test]
    fn participants_need_name_and_email() {
        let mut draft = MeetingDraft::default();
        assert_eq!(
            draft.add_participant("Alice", " "),
            Err(ValidationError::MissingField("email".into()))
        );
        let id = draft.add_participant("Alice Johnson", "alice@company.com").unwrap();
        assert_eq!(draft.participants()[0].status, ParticipantStatus::Pending);
        assert!(draft.remove_participant(&id));
        assert!(draft.participants().is_empty());
    }

    #[test]
    fn create_drops_blank_agenda_and_builds_event() {
        let mut draft = form("Standup", at(16, 9, 0), 30);
        draft.update_agenda_item(0, "Blockers");
        draft.add_agenda_item();
        draft.add_agenda_item();
        draft.update_agenda_item(2, "Priorities");
        assert!(!draft.update_agenda_item(9, "nope"));

        let mut book = MeetingBook::default();
        let (id, event) = book.create(draft, Utc::now()).unwrap();
        let meeting = &book.meetings()[0];
        assert_eq!(meeting.id, id);
        assert_eq!(meeting.agenda, vec!["Blockers", "Priorities"]);
        assert_eq!(meeting.organizer, DEFAULT_ORGANIZER);
        assert_eq!(event.event_type, EventType::Meeting);
        assert_eq!(event.duration_minutes, 30);
        assert_eq!(event.color.as_deref(), Some(MEETING_COLOR));
    }

    #[test]
    fn create_requires_title_and_times() {
        let mut book = MeetingBook::default();
        assert_eq!(
            book.create(form(" ", at(16, 9, 0), 30), Utc::now()),
            Err(ValidationError::EmptyTitle)
        );
        let mut no_end = form("Sync", at(16, 9, 0), 30);
        no_end.end = None;
        assert_eq!(
            book.create(no_end, Utc::now()),
            Err(ValidationError::MissingField("end".into()))
        );
        assert!(matches!(
            book.create(form("Sync", at(16, 9, 0), 0), Utc::now()),
            Err(ValidationError::InvalidTimeRange { .. })
        ));
        assert!(book.meetings().is_empty());
    }

    #[test]
    fn queries_sort_and_filter() {
        let mut book = MeetingBook::default();
        let mut client = form("Client Presentation", at(17, 14, 0), 60);
        client.kind = MeetingKind::Client;
        client.add_participant("Michael Chen", "michael@client.com").unwrap();
        book.create(client, Utc::now()).unwrap();
        book.create(form("Weekly Team Standup", at(16, 9, 0), 30), Utc::now()).unwrap();
        let (kickoff, _) = book.create(form("Project Kickoff", at(20, 10, 0), 90), Utc::now()).unwrap();

        let all = book.filtered(None, "");
        assert_eq!(all[0].title, "Weekly Team Standup");
        assert_eq!(book.filtered(Some(MeetingKind::Client), "").len(), 1);
        assert_eq!(book.filtered(None, "michael").len(), 1);

        book.set_status(&kickoff, MeetingStatus::Cancelled, Utc::now());
        let upcoming = book.upcoming(at(16, 12, 0));
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "Client Presentation");
        assert_eq!(book.on_day(at(16, 0, 0).date()).len(), 1);
    }
}
