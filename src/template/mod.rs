//! Static message templates and keyword matching.
//!
//! The catalog is an immutable, ordered list built once at startup. The
//! matcher scores a free-text prompt against every keyword-tagged template and
//! falls back to the single template with no keywords when nothing scores.

pub mod substitution;

pub use substitution::{substitute, MessageVariables, VariableDefaults};

use serde::Serialize;

/// A keyword-tagged message pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    /// Lower-case keywords matched as substrings of the prompt.
    pub keywords: Vec<String>,
    pub subject_pattern: String,
    pub body_pattern: String,
}

impl Template {
    pub fn new(
        id: &str,
        name: &str,
        keywords: &[&str],
        subject_pattern: &str,
        body_pattern: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            subject_pattern: subject_pattern.to_string(),
            body_pattern: body_pattern.to_string(),
        }
    }

    /// The general fallback carries no keywords and never competes on score.
    pub fn is_fallback(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Number of keywords that occur in an already lower-cased prompt.
    pub fn score(&self, lowered_prompt: &str) -> usize {
        self.keywords
            .iter()
            .filter(|k| lowered_prompt.contains(k.as_str()))
            .count()
    }

    /// Render subject and body with placeholder substitution.
    pub fn render(
        &self,
        variables: &MessageVariables,
        defaults: &VariableDefaults,
    ) -> (String, String) {
        (
            substitute(&self.subject_pattern, variables, defaults),
            substitute(&self.body_pattern, variables, defaults),
        )
    }
}

/// Errors raised while assembling a catalog.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Template catalog must contain exactly one fallback template, found {0}")]
    FallbackCount(usize),

    #[error("Duplicate template id '{0}'")]
    DuplicateId(String),
}

/// Ordered, read-only set of templates.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
    fallback: usize,
}

impl TemplateCatalog {
    /// Build a catalog, checking there is exactly one keyword-less fallback.
    pub fn new(templates: Vec<Template>) -> Result<Self, CatalogError> {
        let fallbacks: Vec<usize> = templates
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_fallback())
            .map(|(i, _)| i)
            .collect();
        if fallbacks.len() != 1 {
            return Err(CatalogError::FallbackCount(fallbacks.len()));
        }

        for (i, template) in templates.iter().enumerate() {
            if templates[..i].iter().any(|t| t.id == template.id) {
                return Err(CatalogError::DuplicateId(template.id.clone()));
            }
        }

        Ok(Self {
            fallback: fallbacks[0],
            templates,
        })
    }

    /// The catalog shipped with Herald.
    pub fn builtin() -> Self {
        Self {
            fallback: BUILTIN_FALLBACK,
            templates: builtin_templates(),
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn fallback(&self) -> &Template {
        &self.templates[self.fallback]
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Select the best template for a prompt.
///
/// The strictly highest keyword count wins; on a tie the earlier catalog
/// entry is kept. A best score of zero selects the fallback template.
pub fn match_template<'a>(catalog: &'a TemplateCatalog, prompt: &str) -> &'a Template {
    let lowered = prompt.to_lowercase();

    let mut best: Option<(&Template, usize)> = None;
    for template in catalog.templates().iter().filter(|t| !t.is_fallback()) {
        let score = template.score(&lowered);
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((template, score));
        }
    }

    match best {
        Some((template, _)) => template,
        None => catalog.fallback(),
    }
}

const BUILTIN_FALLBACK: usize = 6;

fn builtin_templates() -> Vec<Template> {
    vec![
        Template::new(
            "feature-announcement",
            "Feature Announcement",
            &[
                "new feature",
                "feature",
                "launch",
                "announce",
                "release",
                "introducing",
                "shipped",
                "what's new",
            ],
            "Something new just landed in {appName}",
            "Hi {user},\n\nWe just shipped an update to {appName} that we think you'll love. \
             It's live on your account right now.\n\nTake a look: {ctaLink}\n\nThe {appName} team",
        ),
        Template::new(
            "feedback-request",
            "Feedback Request",
            &["feedback", "survey", "opinion", "testimonial", "rate us", "your thoughts"],
            "{user}, how is {appName} working for you?",
            "Hi {user},\n\nYou've been using {appName} for a while and we'd love to hear \
             what's working and what isn't. It takes two minutes.\n\nShare your feedback: \
             {ctaLink}\n\nThanks for helping us improve,\nThe {appName} team",
        ),
        Template::new(
            "welcome",
            "Welcome",
            &[
                "welcome",
                "onboard",
                "getting started",
                "sign up",
                "signed up",
                "signup",
                "joined",
                "new user",
            ],
            "Welcome to {appName}, {user}!",
            "Hi {user},\n\nThanks for joining {appName}. Your account is ready and your first \
             streak starts today.\n\nGet started: {ctaLink}\n\nThe {appName} team",
        ),
        Template::new(
            "streak-reminder",
            "Streak Reminder",
            &["streak", "reminder", "remind", "daily", "keep going", "don't break"],
            "Don't break your streak, {user}",
            "Hi {user},\n\nYour {appName} streak is still alive, but today's contribution \
             hasn't landed yet. A single commit keeps it going.\n\nOpen your dashboard: \
             {ctaLink}\n\nThe {appName} team",
        ),
        Template::new(
            "re-engagement",
            "Re-engagement",
            &["miss you", "come back", "inactive", "re-engage", "haven't seen", "win back"],
            "We miss you at {appName}",
            "Hi {user},\n\nIt's been a while since we saw you on {appName}. A lot has changed \
             and your streak is waiting to be restarted.\n\nPick up where you left off: \
             {ctaLink}\n\nThe {appName} team",
        ),
        Template::new(
            "maintenance-notice",
            "Maintenance Notice",
            &["maintenance", "downtime", "outage", "incident", "scheduled", "migration"],
            "Scheduled maintenance for {appName}",
            "Hi {user},\n\n{appName} will undergo scheduled maintenance shortly. Streaks \
             will not be affected by the downtime.\n\nStatus and details: {ctaLink}\n\n\
             The {appName} team",
        ),
        Template::new(
            "general",
            "General Update",
            &[],
            "An update from {appName}",
            "Hi {user},\n\nWe have an update to share with you from the {appName} team.\n\n\
             Read more: {ctaLink}\n\nThe {appName} team",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tpl(id: &str, keywords: &[&str]) -> Template {
        Template::new(id, id, keywords, "s", "b")
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let builtin = TemplateCatalog::builtin();
        let checked = TemplateCatalog::new(builtin.templates().to_vec()).unwrap();
        assert_eq!(checked.fallback().id, "general");
        assert_eq!(builtin.fallback().id, "general");
        assert!(builtin.fallback().is_fallback());
    }

    #[test]
    fn test_catalog_rejects_missing_fallback() {
        let result = TemplateCatalog::new(vec![tpl("a", &["x"])]);
        assert_eq!(result.unwrap_err(), CatalogError::FallbackCount(0));
    }

    #[test]
    fn test_catalog_rejects_two_fallbacks() {
        let result = TemplateCatalog::new(vec![tpl("a", &[]), tpl("b", &[])]);
        assert_eq!(result.unwrap_err(), CatalogError::FallbackCount(2));
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let result = TemplateCatalog::new(vec![tpl("a", &["x"]), tpl("a", &["y"]), tpl("g", &[])]);
        assert_eq!(result.unwrap_err(), CatalogError::DuplicateId("a".to_string()));
    }

    #[test]
    fn test_match_highest_score_wins() {
        // B is listed first but A has two hits
        let catalog = TemplateCatalog::new(vec![
            tpl("b", &["alpha"]),
            tpl("a", &["alpha", "beta"]),
            tpl("general", &[]),
        ])
        .unwrap();

        let chosen = match_template(&catalog, "alpha and beta please");
        assert_eq!(chosen.id, "a");
    }

    #[test]
    fn test_match_tie_keeps_first_listed() {
        let catalog = TemplateCatalog::new(vec![
            tpl("first", &["alpha"]),
            tpl("second", &["beta"]),
            tpl("general", &[]),
        ])
        .unwrap();

        assert_eq!(match_template(&catalog, "beta alpha").id, "first");
    }

    #[test]
    fn test_match_zero_score_returns_fallback() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(match_template(&catalog, "xyzzy plugh").name, "General Update");
        assert_eq!(match_template(&catalog, "").name, "General Update");
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(
            match_template(&catalog, "Please WRITE a FEEDBACK request").name,
            "Feedback Request"
        );
    }

    #[test]
    fn test_builtin_matches_common_prompts() {
        let catalog = TemplateCatalog::builtin();
        let cases = [
            ("write a feedback request", "Feedback Request"),
            ("announce new feature", "Feature Announcement"),
            ("welcome email for users who just signed up", "Welcome"),
            ("remind people about their daily streak", "Streak Reminder"),
            ("tell inactive users to come back", "Re-engagement"),
            ("scheduled downtime tonight", "Maintenance Notice"),
            ("remind members their membership renewal is due", "Streak Reminder"),
            ("welcome new users to the app", "Welcome"),
            ("quick news about our commitment to privacy", "General Update"),
            ("how to return a purchase", "General Update"),
            ("previews of the redesigned dashboard", "General Update"),
        ];

        for (prompt, expected) in cases {
            assert_eq!(match_template(&catalog, prompt).name, expected, "prompt: {}", prompt);
        }
    }

    #[test]
    fn test_fallback_never_wins_over_positive_score() {
        // Fallback listed first must still lose to any scoring template
        let catalog =
            TemplateCatalog::new(vec![tpl("general", &[]), tpl("x", &["ping"])]).unwrap();
        assert_eq!(match_template(&catalog, "ping").id, "x");
    }

    #[test]
    fn test_render_substitutes_patterns() {
        let catalog = TemplateCatalog::builtin();
        let template = catalog.get("feedback-request").unwrap();
        let defaults = VariableDefaults::new("Herald", "https://h.example/fb");
        let vars = MessageVariables {
            user: Some("Ada".to_string()),
            ..Default::default()
        };

        let (subject, body) = template.render(&vars, &defaults);
        assert_eq!(subject, "Ada, how is Herald working for you?");
        assert!(body.contains("https://h.example/fb"));
        assert!(!body.contains('{'));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_match_is_total_and_deterministic(prompt in ".{0,120}") {
                let catalog = TemplateCatalog::builtin();
                let first = match_template(&catalog, &prompt);
                let second = match_template(&catalog, &prompt);
                prop_assert_eq!(&first.id, &second.id);
            }
        }
    }
}
