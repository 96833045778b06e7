use serde::{Deserialize, Serialize};

/// Separator placed between contact segments.
pub const CONTACT_SEPARATOR: &str = " | ";

/// One resume form submission. Built once, rendered once, then dropped.
///
/// Every field is optional on the wire; missing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(alias = "linkedin")]
    pub profile_url: String,
    pub summary: String,
    pub experience: ExperienceEntry,
    pub education: EducationEntry,
    pub skills: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub start: String,
    pub end: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

/// Conditional resume sections, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    Summary,
    Experience,
    Education,
    Skills,
}

impl Section {
    /// Title printed on the section's shaded band.
    pub fn title(self) -> &'static str {
        match self {
            Section::Summary => "PROFESSIONAL SUMMARY",
            Section::Experience => "EXPERIENCE",
            Section::Education => "EDUCATION",
            Section::Skills => "SKILLS",
        }
    }
}

/// Whitespace-only input counts as empty.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl ResumeRecord {
    /// Sections to render, in fixed order. A section is included exactly when
    /// its trigger field (summary, experience role, degree, skills) is non-blank.
    pub fn sections(&self) -> Vec<Section> {
        let triggers = [
            (Section::Summary, &self.summary),
            (Section::Experience, &self.experience.role),
            (Section::Education, &self.education.degree),
            (Section::Skills, &self.skills),
        ];
        triggers
            .into_iter()
            .filter(|(_, trigger)| !is_blank(trigger))
            .map(|(section, _)| section)
            .collect()
    }

    /// Email, phone, location and profile URL joined by `" | "`, skipping blank segments.
    pub fn contact_line(&self) -> String {
        [&self.email, &self.phone, &self.location, &self.profile_url]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(CONTACT_SEPARATOR)
    }
}

impl ExperienceEntry {
    /// `"<role> at <company>"`, or just the role when the company is blank.
    pub fn heading(&self) -> String {
        let role = self.role.trim();
        let company = self.company.trim();
        if company.is_empty() {
            role.to_string()
        } else {
            format!("{role} at {company}")
        }
    }

    /// `"<start> - <end>"`; a blank side is dropped with its dash. `None` when both are blank.
    pub fn date_range(&self) -> Option<String> {
        match (self.start.trim(), self.end.trim()) {
            ("", "") => None,
            (start, "") => Some(start.to_string()),
            ("", end) => Some(end.to_string()),
            (start, end) => Some(format!("{start} - {end}")),
        }
    }
}

impl EducationEntry {
    /// Degree on the first line, `"<institution> (<year>)"` on the second.
    pub fn body(&self) -> String {
        let degree = self.degree.trim();
        let second = match (self.institution.trim(), self.year.trim()) {
            ("", "") => String::new(),
            (inst, "") => inst.to_string(),
            ("", year) => format!("({year})"),
            (inst, year) => format!("{inst} ({year})"),
        };
        if second.is_empty() {
            degree.to_string()
        } else {
            format!("{degree}\n{second}")
        }
    }
}

/// Download filename for a generated resume: `<name>_Resume.pdf`.
///
/// Characters that are unsafe in filenames or headers become `_`.
/// A blank name gives the generic `Resume.pdf`.
pub fn resume_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "Resume.pdf".to_string()
    } else {
        format!("{cleaned}_Resume.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_has_no_sections() {
        assert!(ResumeRecord::default().sections().is_empty());
    }

    #[test]
    fn test_sections_follow_triggers_in_fixed_order() {
        let record = ResumeRecord {
            skills: "Rust".to_string(),
            summary: "Builds things.".to_string(),
            education: EducationEntry {
                degree: "BSc".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            record.sections(),
            vec![Section::Summary, Section::Education, Section::Skills]
        );
    }

    #[test]
    fn test_experience_requires_role() {
        let record = ResumeRecord {
            experience: ExperienceEntry {
                role: "   ".to_string(),
                company: "Acme".to_string(),
                start: "2020".to_string(),
                end: "2023".to_string(),
                description: "Shipped it".to_string(),
            },
            ..Default::default()
        };
        assert!(!record.sections().contains(&Section::Experience));
    }

    #[test]
    fn test_contact_line_full() {
        let record = ResumeRecord {
            email: "j@x.com".to_string(),
            phone: "555-1234".to_string(),
            location: "NYC".to_string(),
            profile_url: "linkedin.com/in/jd".to_string(),
            ..Default::default()
        };
        assert_eq!(
            record.contact_line(),
            "j@x.com | 555-1234 | NYC | linkedin.com/in/jd"
        );
    }

    #[test]
    fn test_contact_line_skips_blank_segments() {
        let record = ResumeRecord {
            email: "j@x.com".to_string(),
            location: "NYC".to_string(),
            ..Default::default()
        };
        assert_eq!(record.contact_line(), "j@x.com | NYC");
        assert_eq!(ResumeRecord::default().contact_line(), "");
    }

    #[test]
    fn test_experience_heading_and_dates() {
        let mut exp = ExperienceEntry {
            role: "Engineer".to_string(),
            company: "Acme".to_string(),
            start: "2020".to_string(),
            end: "Present".to_string(),
            ..Default::default()
        };
        assert_eq!(exp.heading(), "Engineer at Acme");
        assert_eq!(exp.date_range().as_deref(), Some("2020 - Present"));

        exp.company.clear();
        exp.end.clear();
        assert_eq!(exp.heading(), "Engineer");
        assert_eq!(exp.date_range().as_deref(), Some("2020"));

        exp.start.clear();
        assert_eq!(exp.date_range(), None);
    }

    #[test]
    fn test_education_body() {
        let edu = EducationEntry {
            degree: "BSc Computer Science".to_string(),
            institution: "MIT".to_string(),
            year: "2019".to_string(),
        };
        assert_eq!(edu.body(), "BSc Computer Science\nMIT (2019)");

        let degree_only = EducationEntry {
            degree: "PhD".to_string(),
            ..Default::default()
        };
        assert_eq!(degree_only.body(), "PhD");
    }

    #[test]
    fn test_resume_filename() {
        assert_eq!(resume_filename("Jane Doe"), "Jane Doe_Resume.pdf");
        assert_eq!(resume_filename("  "), "Resume.pdf");
        assert_eq!(resume_filename("a/b\"c"), "a_b_c_Resume.pdf");
    }

    #[test]
    fn test_deserialize_accepts_partial_json_and_linkedin_alias() {
        let record: ResumeRecord =
            serde_json::from_str(r#"{"name":"A","linkedin":"in/a","experience":{"role":"Dev"}}"#)
                .unwrap();
        assert_eq!(record.name, "A");
        assert_eq!(record.profile_url, "in/a");
        assert_eq!(record.experience.role, "Dev");
        assert!(record.skills.is_empty());
    }
}
