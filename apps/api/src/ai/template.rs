//! Deterministic generator used when `AI_MODE=simulated`. Produces
//! role-keyed canned content with no network I/O and no artificial
//! latency. Useful for local development and environments without a
//! Gemini key.

use async_trait::async_trait;

use crate::ai::{AiError, ContentGenerator, PortfolioDraft, ProjectDraft};

pub struct TemplateGenerator;

/// Role keyword → skill set. Matched as a lowercase substring of the
/// supplied role; first match wins.
const ROLE_SKILLS: &[(&str, &[&str])] = &[
    (
        "frontend",
        &[
            "React",
            "TypeScript",
            "Next.js",
            "CSS",
            "Tailwind CSS",
            "Accessibility",
            "Responsive Design",
            "Jest",
            "Webpack",
            "REST APIs",
        ],
    ),
    (
        "backend",
        &[
            "Rust",
            "PostgreSQL",
            "REST API Design",
            "Docker",
            "Redis",
            "Message Queues",
            "Observability",
            "CI/CD",
            "Linux",
            "System Design",
        ],
    ),
    (
        "design",
        &[
            "Figma",
            "Typography",
            "Design Systems",
            "Prototyping",
            "User Research",
            "Wireframing",
            "Illustration",
            "Branding",
            "Motion Design",
            "Accessibility",
        ],
    ),
    (
        "data",
        &[
            "Python",
            "SQL",
            "Pandas",
            "Machine Learning",
            "Data Visualization",
            "Statistics",
            "Airflow",
            "Spark",
            "dbt",
            "Experiment Design",
        ],
    ),
];

const DEFAULT_SKILLS: &[&str] = &[
    "Communication",
    "Problem Solving",
    "Project Management",
    "Git",
    "Documentation",
    "Agile Delivery",
    "Mentoring",
    "Public Speaking",
    "Research",
    "Collaboration",
];

fn skills_for_role(role: &str) -> &'static [&'static str] {
    let role = role.to_lowercase();
    ROLE_SKILLS
        .iter()
        .find(|(keyword, _)| role.contains(keyword))
        .map(|(_, skills)| *skills)
        .unwrap_or(DEFAULT_SKILLS)
}

#[async_trait]
impl ContentGenerator for TemplateGenerator {
    async fn generate_bio(
        &self,
        name: &str,
        role: &str,
        skills: &[String],
    ) -> Result<String, AiError> {
        let focus = if skills.is_empty() {
            skills_for_role(role)[..3].join(", ")
        } else {
            skills.join(", ")
        };
        Ok(format!(
            "{name} is a {role} who enjoys turning rough ideas into polished, reliable \
             work. Recent projects lean on {focus}, with an emphasis on clear \
             communication and steady iteration. Outside of client work, {name} keeps a \
             steady habit of learning in public and sharing what sticks."
        ))
    }

    async fn generate_project_description(
        &self,
        title: &str,
        tags: &[String],
    ) -> Result<String, AiError> {
        let stack = if tags.is_empty() {
            String::new()
        } else {
            format!(" Built with {}.", tags.join(", "))
        };
        Ok(format!(
            "{title} started as a weekend experiment and grew into a small but complete \
             product. The focus was on shipping a fast, dependable core before adding \
             features, with measurable attention to load time and error rates.{stack}"
        ))
    }

    async fn suggest_skills(&self, role: &str) -> Result<Vec<String>, AiError> {
        Ok(skills_for_role(role)
            .iter()
            .map(|s| s.to_string())
            .collect())
    }

    async fn generate_portfolio(&self, name: &str, role: &str) -> Result<PortfolioDraft, AiError> {
        let skills = self.suggest_skills(role).await?;
        let bio = self.generate_bio(name, role, &skills[..3.min(skills.len())]).await?;

        let projects = vec![
            ProjectDraft {
                title: "Portfolio Starter".to_string(),
                description: self
                    .generate_project_description("Portfolio Starter", &skills[..2.min(skills.len())])
                    .await?,
                tags: skills.iter().take(3).cloned().collect(),
            },
            ProjectDraft {
                title: "Team Dashboard".to_string(),
                description: self
                    .generate_project_description("Team Dashboard", &[])
                    .await?,
                tags: skills.iter().skip(3).take(3).cloned().collect(),
            },
            ProjectDraft {
                title: "Open Source Contribution".to_string(),
                description: self
                    .generate_project_description("Open Source Contribution", &[])
                    .await?,
                tags: skills.iter().skip(6).take(3).cloned().collect(),
            },
        ];

        Ok(PortfolioDraft {
            bio,
            skills,
            projects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_role_matching_is_substring_based() {
        assert_eq!(skills_for_role("Senior Frontend Engineer")[0], "React");
        assert_eq!(skills_for_role("backend developer")[0], "Rust");
        assert_eq!(skills_for_role("Product Designer")[0], "Figma");
    }

    #[test]
    fn test_unknown_role_falls_back_to_defaults() {
        assert_eq!(skills_for_role("Marine Biologist"), DEFAULT_SKILLS);
    }

    #[test]
    fn test_suggestions_are_deterministic_and_capped() {
        let a = run(TemplateGenerator.suggest_skills("frontend")).unwrap();
        let b = run(TemplateGenerator.suggest_skills("frontend")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);
    }

    #[test]
    fn test_bio_mentions_name_and_role() {
        let bio = run(TemplateGenerator.generate_bio("Ada", "backend engineer", &[])).unwrap();
        assert!(bio.contains("Ada"));
        assert!(bio.contains("backend engineer"));
    }

    #[test]
    fn test_portfolio_draft_has_three_projects() {
        let draft = run(TemplateGenerator.generate_portfolio("Ada", "data analyst")).unwrap();
        assert_eq!(draft.projects.len(), 3);
        assert_eq!(draft.skills.len(), 10);
        assert!(!draft.bio.is_empty());
    }
}
