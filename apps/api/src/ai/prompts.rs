// AI Content Gateway prompt templates.
// All prompts for the generation endpoints are defined here.

pub fn bio_prompt(name: &str, role: &str, skills: &[String]) -> String {
    let skills_text = if skills.is_empty() {
        String::new()
    } else {
        format!(" with skills in {}", skills.join(", "))
    };
    format!(
        "Write a professional portfolio bio for {name}, a {role}{skills_text}. \
         Keep it under 120 words. Make it engaging and professional."
    )
}

pub fn project_description_prompt(title: &str, tags: &[String]) -> String {
    let tags_text = if tags.is_empty() {
        String::new()
    } else {
        format!(" with technologies: {}", tags.join(", "))
    };
    format!(
        "Write a concise project description for \"{title}\"{tags_text} suitable for a \
         portfolio. Focus on impact and technical implementation. Keep it under 100 words."
    )
}

pub fn skill_suggestions_prompt(role: &str) -> String {
    format!(
        "Suggest 10 relevant technical and professional skills that a {role} should \
         showcase in their portfolio. Return only a comma-separated list of skills, \
         no explanations."
    )
}

/// The full-portfolio prompt pins the exact JSON structure; the response
/// is still scanned for the first JSON object before parsing.
const PORTFOLIO_PROMPT_TEMPLATE: &str = r#"Generate a complete portfolio JSON for {name}, a {role}. Return only valid JSON with this exact structure:
{
  "bio": "professional description under 120 words",
  "skills": ["skill1", "skill2", "skill3", "skill4", "skill5", "skill6", "skill7", "skill8", "skill9", "skill10"],
  "projects": [
    {
      "title": "Project Title 1",
      "description": "Project description under 100 words",
      "tags": ["tag1", "tag2", "tag3"]
    },
    {
      "title": "Project Title 2",
      "description": "Project description under 100 words",
      "tags": ["tag1", "tag2", "tag3"]
    },
    {
      "title": "Project Title 3",
      "description": "Project description under 100 words",
      "tags": ["tag1", "tag2", "tag3"]
    }
  ]
}

Make the content realistic and relevant for a {role}."#;

pub fn portfolio_prompt(name: &str, role: &str) -> String {
    PORTFOLIO_PROMPT_TEMPLATE
        .replace("{name}", name)
        .replace("{role}", role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bio_prompt_mentions_skills_when_present() {
        let prompt = bio_prompt("Ada", "Engineer", &["Rust".to_string()]);
        assert!(prompt.contains("with skills in Rust"));
    }

    #[test]
    fn test_bio_prompt_without_skills() {
        let prompt = bio_prompt("Ada", "Engineer", &[]);
        assert!(!prompt.contains("with skills in"));
        assert!(prompt.contains("Ada, a Engineer"));
    }

    #[test]
    fn test_portfolio_prompt_substitutes_both_placeholders() {
        let prompt = portfolio_prompt("Ada", "Data Scientist");
        assert!(prompt.contains("for Ada, a Data Scientist"));
        assert!(prompt.contains("relevant for a Data Scientist"));
        assert!(!prompt.contains("{name}"));
        assert!(!prompt.contains("{role}"));
    }
}
