//! Outreach message templates. Placeholders are `[Name]` and `[Job Title]`,
//! matched case-insensitively.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::workspace::models::Profile;

static NAME_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[name\]").expect("name placeholder pattern"));
static JOB_TITLE_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[job title\]").expect("job title placeholder pattern"));

pub fn fill_template(template: &str, profile: &Profile) -> String {
    let filled = NAME_PLACEHOLDER.replace_all(template, NoExpand(&profile.name));
    JOB_TITLE_PLACEHOLDER
        .replace_all(&filled, NoExpand(&profile.job_title))
        .into_owned()
}

/// Fills the template, or `None` when it is blank and there is nothing to send.
pub fn fill_if_present(template: &str, profile: &Profile) -> Option<String> {
    (!template.trim().is_empty()).then(|| fill_template(template, profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> Profile {
        Profile {
            page_title: "Jane Doe - Staff Engineer | LinkedIn".to_string(),
            link: "https://x/in/jane".to_string(),
            name: "Jane Doe".to_string(),
            job_title: "Staff Engineer".to_string(),
            checked: false,
        }
    }

    #[test]
    fn test_fills_every_placeholder() {
        let filled = fill_template("Hi [Name], as a [Job Title]... thanks [Name]!", &jane());
        assert_eq!(filled, "Hi Jane Doe, as a Staff Engineer... thanks Jane Doe!");
    }

    #[test]
    fn test_placeholders_are_case_insensitive() {
        let filled = fill_template("Hi [NAME] / [job TITLE]", &jane());
        assert_eq!(filled, "Hi Jane Doe / Staff Engineer");
    }

    #[test]
    fn test_dollar_signs_in_values_are_literal() {
        let mut profile = jane();
        profile.name = "$1 Bill".to_string();
        assert_eq!(fill_template("Hi [Name]", &profile), "Hi $1 Bill");
    }

    #[test]
    fn test_blank_template_yields_nothing() {
        assert_eq!(fill_if_present("  \n ", &jane()), None);
        assert_eq!(
            fill_if_present("Hello [Name]", &jane()).as_deref(),
            Some("Hello Jane Doe")
        );
    }
}
