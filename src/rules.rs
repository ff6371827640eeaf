//! Substitution rules for the two broken fetch calls in the meeting page.
//!
//! Each rule matches a call preamble (captured), the pasted "Phone" column
//! definition, and the call's original body. The replacement keeps the
//! preamble and re-emits the body, dropping the column definition.

use crate::shape::shape_pattern;
use regex::Regex;
use std::fmt;
use thiserror::Error;

/// Table-column definition that ended up inside both request bodies.
const PHONE_COLUMN_BLOCK: &str = r##"{
          title: "Phone",
          dataIndex: "candidatePhone",
          key: "candidatePhone",
          width: 120,
          render: (phone: string) =>
            phone ? (
              <a
                href={`tel:${phone}`}
                style={{ color: "#1890ff", fontSize: "12px" }}
              >
                {phone}
              </a>
            ) : (
              <span style={{ color: "#999", fontSize: "12px" }}>N/A</span>
            ),
        },"##;

const INTERVIEW_AGENDA_PREAMBLE: &str = r#"
      const response = await fetch("/api/generate-interview-agenda", {
        method: "POST",
        headers: {
          "Content-Type": "application/json",
          "Authorization": `Bearer ${localStorage.getItem("token")}`
        },"#;

const INTERVIEW_AGENDA_BODY: &str = r#"body: JSON.stringify({
          resumeId: selectedResume.id,
          interview_type: "Technical" // Default to Technical, can be made dynamic
        })
      });"#;

const CREATE_MEETING_PREAMBLE: &str = r#"
      const response = await fetch('/api/meetings', {
        method: 'POST',
        headers: {
          'Content-Type': 'application/json',
          'Authorization': `Bearer ${localStorage.getItem('token')}`
        },"#;

const CREATE_MEETING_BODY: &str = r#"body: JSON.stringify({
          meetingTime: meetingTime.toISOString(),
          meetingLink: values.meetingLink,
          meetingType: values.meetingType || 'TECHNICAL',
          interviewType: values.interviewType || 'TECHNICAL',
          agenda: generatedAgenda, // Include the generated agenda
          status: 'SCHEDULED',
          resumeId: selectedResume.id,
          jobId: jobId
        })
      });"#;

/// One of the fetch calls that received the pasted column block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallSite {
    /// `POST /api/generate-interview-agenda`
    InterviewAgenda,
    /// `POST /api/meetings`
    CreateMeeting,
}

impl CallSite {
    /// All call sites, in application order.
    pub const ALL: [CallSite; 2] = [CallSite::InterviewAgenda, CallSite::CreateMeeting];

    pub fn id(self) -> &'static str {
        match self {
            CallSite::InterviewAgenda => "interview-agenda-body",
            CallSite::CreateMeeting => "create-meeting-body",
        }
    }

    pub fn endpoint(self) -> &'static str {
        match self {
            CallSite::InterviewAgenda => "/api/generate-interview-agenda",
            CallSite::CreateMeeting => "/api/meetings",
        }
    }

    fn preamble(self) -> &'static str {
        match self {
            CallSite::InterviewAgenda => INTERVIEW_AGENDA_PREAMBLE,
            CallSite::CreateMeeting => CREATE_MEETING_PREAMBLE,
        }
    }

    /// Request body as it should appear right after the headers block.
    pub fn body(self) -> &'static str {
        match self {
            CallSite::InterviewAgenda => INTERVIEW_AGENDA_BODY,
            CallSite::CreateMeeting => CREATE_MEETING_BODY,
        }
    }

    /// Build the substitution rule that repairs this call site.
    pub fn rule(self) -> Result<SubstitutionRule, RuleError> {
        let pattern = format!(
            r"(?s)({preamble}\s+){column}\s+{body}",
            preamble = shape_pattern(self.preamble()),
            column = shape_pattern(PHONE_COLUMN_BLOCK),
            body = shape_pattern(self.body()),
        );
        let pattern = Regex::new(&pattern).map_err(|source| RuleError::Pattern {
            id: self.id(),
            source,
        })?;

        Ok(SubstitutionRule {
            call_site: self,
            pattern,
            // `$` is an expansion marker in regex templates
            replacement: format!("${{1}}{}", self.body().replace('$', "$$")),
        })
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.endpoint())
    }
}

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("Invalid pattern for rule '{id}': {source}")]
    Pattern {
        id: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// A compiled pattern plus replacement template, tied to one call site.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    call_site: CallSite,
    pattern: Regex,
    replacement: String,
}

/// Output of a single rule application.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Substitution carries the rewritten content"]
pub struct Substitution {
    pub content: String,
    pub matches: usize,
}

impl SubstitutionRule {
    pub fn id(&self) -> &'static str {
        self.call_site.id()
    }

    pub fn call_site(&self) -> CallSite {
        self.call_site
    }

    /// Replace every non-overlapping match in `content`.
    pub fn apply(&self, content: &str) -> Substitution {
        let matches = self.pattern.find_iter(content).count();
        if matches == 0 {
            return Substitution {
                content: content.to_string(),
                matches,
            };
        }

        let content = self
            .pattern
            .replace_all(content, self.replacement.as_str())
            .into_owned();
        Substitution { content, matches }
    }
}

/// The two repair rules, in the order they must be applied.
pub fn builtin_rules() -> Result<Vec<SubstitutionRule>, RuleError> {
    CallSite::ALL.iter().map(|site| site.rule()).collect()
}

/// Broken form of a call site, as it appears before the fix.
#[cfg(test)]
pub(crate) fn broken_call(site: CallSite) -> String {
    format!(
        "{}\n        {}\n        {}",
        site.preamble(),
        PHONE_COLUMN_BLOCK,
        site.body()
    )
}

#[cfg(test)]
pub(crate) fn fixed_call(site: CallSite) -> String {
    format!("{}\n        {}", site.preamble(), site.body())
}
