//! Enrollment requirement classification
//!
//! The upstream `enrl_requirement` field is free text made of `<br/>`-separated
//! clauses. Each clause maps to at most one canonical tag through an ordered
//! rule table: exact clauses first, then keyword rules, first match wins.

use std::fmt;

/// Clause separator in the upstream requirement text
const CLAUSE_SEPARATOR: &str = "<br/>";

/// Canonical enrollment requirement tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementTag {
    FreshmenSophomores,
    AddInstructorConsent,
    DropInstructorConsent,
    AddDepartmentConsent,
    DropDepartmentConsent,
    MajorMusic,
    MajorMasterMusic,
    MajorMsl,
    MajorNotMsl,
    MajorBme,
    MajorRtvf,
    MajorIsp,
    MajorOther,
    SchoolMedill,
    ClassRequirement,
    ClosedToRegistration,
    DualEnrollment,
    Other,
}

impl RequirementTag {
    /// Exported spelling of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FreshmenSophomores => "Freshmen;Sophmores",
            Self::AddInstructorConsent => "AddInstructorConsent",
            Self::DropInstructorConsent => "DropInstructorConsent",
            Self::AddDepartmentConsent => "AddDepartmentConsent",
            Self::DropDepartmentConsent => "DropDepartmentConsent",
            Self::MajorMusic => "MajorMusic",
            Self::MajorMasterMusic => "MajorMasterMusic",
            Self::MajorMsl => "MajorMSL",
            Self::MajorNotMsl => "MajorNotMSL",
            Self::MajorBme => "MajorBME",
            Self::MajorRtvf => "MajorRTVF",
            Self::MajorIsp => "MajorISP",
            Self::MajorOther => "MajorOther",
            Self::SchoolMedill => "SchoolMedill",
            Self::ClassRequirement => "ClassRequirement",
            Self::ClosedToRegistration => "ClosedToRegistration",
            Self::DualEnrollment => "DualEnrollment",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for RequirementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clauses recognized verbatim
const EXACT_RULES: &[(&str, RequirementTag)] = &[
    (
        "Enrollment Requirements: Reserved for Freshmen and Sophomores",
        RequirementTag::FreshmenSophomores,
    ),
    (
        "Add Consent: Instructor Consent Required",
        RequirementTag::AddInstructorConsent,
    ),
    (
        "Drop Consent: Instructor Consent Required",
        RequirementTag::DropInstructorConsent,
    ),
    (
        "Enrollment Requirements: Registration is reserved for Music Majors Only",
        RequirementTag::MajorMusic,
    ),
    (
        "Enrollment Requirements: Registration is reserved for Music Majors/Minors.  Non-music students should register for the corresponding GEN_MUS course under the same catalog number.  Specific questions should be directed to the Music department.",
        RequirementTag::MajorMusic,
    ),
    (
        "Add Consent: Department Consent Required",
        RequirementTag::AddDepartmentConsent,
    ),
    (
        "Drop Consent: Department Consent Required",
        RequirementTag::DropDepartmentConsent,
    ),
    (
        "Enrollment Requirements: Restricted to Music Undergrads/Grads",
        RequirementTag::MajorMusic,
    ),
    (
        "Enrollment Requirements: Reserved for Master of Music Students",
        RequirementTag::MajorMasterMusic,
    ),
    (
        "Enrollment Requirements: Enrollment only open to MSL degree candidates.",
        RequirementTag::MajorMsl,
    ),
    (
        "Enrollment Requirements: MSL Students are not eligible to enroll",
        RequirementTag::MajorNotMsl,
    ),
    (
        "Enrollment Requirements: Business Associations or Corporations is a pre-requisite for this course.",
        RequirementTag::ClassRequirement,
    ),
    (
        "Enrollment Requirements: Registration is restricted to BME Students Only.",
        RequirementTag::MajorBme,
    ),
    (
        "Enrollment Requirements: Basic Tax OR LLM Tax",
        RequirementTag::ClassRequirement,
    ),
    (
        "Enrollment Requirements: Pre-Registration is reserved for CS and CE majors only.",
        RequirementTag::MajorMusic,
    ),
    (
        "Enrollment Requirements: This section is currently closed to registration.  Please contact the department directly with any questions.",
        RequirementTag::ClosedToRegistration,
    ),
    (
        "Enrollment Requirements: ISP Majors",
        RequirementTag::MajorIsp,
    ),
];

/// How a keyword rule compares its needles against a clause
#[derive(Debug, Clone, Copy)]
enum Match {
    /// Substring of the clause as written
    Exact,
    /// Substring of the lower-cased clause (needles are lower case)
    IgnoreCase,
}

/// Outcome of a keyword rule
#[derive(Debug, Clone, Copy)]
enum Action {
    Tag(RequirementTag),
    Drop,
}

/// A keyword rule fires when any of its needles is found
struct KeywordRule {
    needles: &'static [(&'static str, Match)],
    action: Action,
}

const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        needles: &[
            (" must have taken ", Match::Exact),
            (" must have completed ", Match::Exact),
            ("prerequisite", Match::IgnoreCase),
            ("pre-req", Match::IgnoreCase),
        ],
        action: Action::Tag(RequirementTag::ClassRequirement),
    },
    KeywordRule {
        needles: &[("reserved for Music Majors Only", Match::Exact)],
        action: Action::Tag(RequirementTag::MajorMusic),
    },
    KeywordRule {
        needles: &[("Reserved for Medill", Match::Exact)],
        action: Action::Tag(RequirementTag::SchoolMedill),
    },
    KeywordRule {
        needles: &[("for radio/tv/film major", Match::IgnoreCase)],
        action: Action::Tag(RequirementTag::MajorRtvf),
    },
    KeywordRule {
        needles: &[
            ("reserved for", Match::IgnoreCase),
            ("restricted ", Match::IgnoreCase),
        ],
        action: Action::Tag(RequirementTag::MajorOther),
    },
    KeywordRule {
        needles: &[
            ("shopping cart", Match::Exact),
            ("must also register", Match::Exact),
        ],
        action: Action::Tag(RequirementTag::DualEnrollment),
    },
    KeywordRule {
        needles: &[
            ("pre-registration", Match::IgnoreCase),
            ("preregistration", Match::IgnoreCase),
        ],
        action: Action::Drop,
    },
];

impl KeywordRule {
    fn matches(&self, clause: &str, lowered: &str) -> bool {
        self.needles.iter().any(|(needle, mode)| match mode {
            Match::Exact => clause.contains(needle),
            Match::IgnoreCase => lowered.contains(needle),
        })
    }
}

/// Classifies a single clause
///
/// Returns `None` for empty clauses and for pre-registration notices.
pub fn classify_clause(clause: &str) -> Option<RequirementTag> {
    if let Some((_, tag)) = EXACT_RULES.iter().find(|(text, _)| *text == clause) {
        return Some(*tag);
    }

    let lowered = clause.to_lowercase();
    if let Some(rule) = KEYWORD_RULES
        .iter()
        .find(|rule| rule.matches(clause, &lowered))
    {
        return match rule.action {
            Action::Tag(tag) => Some(tag),
            Action::Drop => None,
        };
    }

    if clause.is_empty() {
        None
    } else {
        Some(RequirementTag::Other)
    }
}

/// Classifies every `<br/>`-separated clause of a requirement blob
///
/// Tags are returned in clause order; duplicates are kept.
///
/// # Example
///
/// ```
/// use catalog_crawl::normalize::{classify_requirements, RequirementTag};
///
/// let tags = classify_requirements(
///     "Add Consent: Instructor Consent Required<br/>Drop Consent: Instructor Consent Required",
/// );
/// assert_eq!(
///     tags,
///     vec![RequirementTag::AddInstructorConsent, RequirementTag::DropInstructorConsent]
/// );
/// ```
pub fn classify_requirements(requirements: &str) -> Vec<RequirementTag> {
    requirements
        .split(CLAUSE_SEPARATOR)
        .filter_map(classify_clause)
        .collect()
}
