//! Portfolio bootstrap — generates a full draft, then persists profile,
//! skills and projects as a recorded sequence of writes. Either every
//! write lands, or the recorded compensations undo them in reverse; if a
//! compensation itself fails the error names what survived instead of
//! completing silently.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::ai::ContentGenerator;
use crate::errors::AppError;
use crate::models::profile::{ProfileRow, SocialLinks};
use crate::models::project::{ProjectPayload, ProjectRow};
use crate::models::skill::{has_duplicate_name, SkillLevel, SkillRow};
use crate::store::profiles::ProfileWrite;
use crate::store::{profiles, projects, skills};
use crate::subscription::can_create_portfolio;
use crate::themes::DEFAULT_THEME;

#[derive(Debug, Deserialize)]
pub struct BootstrapRequest {
    pub name: String,
    pub role: String,
    /// Required when the user has no profile yet.
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BootstrapResponse {
    pub profile: ProfileRow,
    pub skills: Vec<SkillRow>,
    pub projects: Vec<ProjectRow>,
    pub skills_added: usize,
    pub projects_added: usize,
    pub projects_skipped: usize,
}

/// One completed write, recorded so it can be compensated.
#[derive(Debug)]
pub enum BootstrapStep {
    ProfileCreated,
    ProfileReplaced { previous: Box<ProfileRow> },
    SkillInserted { id: Uuid, name: String },
    ProjectInserted { id: Uuid, title: String },
}

impl BootstrapStep {
    pub fn describe(&self) -> String {
        match self {
            BootstrapStep::ProfileCreated => "profile".to_string(),
            BootstrapStep::ProfileReplaced { .. } => "profile".to_string(),
            BootstrapStep::SkillInserted { name, .. } => format!("skill '{name}'"),
            BootstrapStep::ProjectInserted { title, .. } => format!("project '{title}'"),
        }
    }
}

/// Append-only record of completed writes. Compensations run in reverse
/// completion order.
#[derive(Debug, Default)]
pub struct SagaLog {
    steps: Vec<BootstrapStep>,
}

impl SagaLog {
    pub fn record(&mut self, step: BootstrapStep) {
        self.steps.push(step);
    }

    pub fn compensations(&self) -> impl Iterator<Item = &BootstrapStep> {
        self.steps.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

struct ApplyCounts {
    skills_added: usize,
    projects_added: usize,
    projects_skipped: usize,
}

/// Runs the full bootstrap: generate → write profile → write skills →
/// write projects, compensating on failure.
pub async fn run_bootstrap(
    pool: &PgPool,
    generator: &dyn ContentGenerator,
    user_id: Uuid,
    request: BootstrapRequest,
) -> Result<BootstrapResponse, AppError> {
    if request.name.trim().is_empty() || request.role.trim().is_empty() {
        return Err(AppError::Validation(
            "name and role are required".to_string(),
        ));
    }

    // Generation happens before any write; a failure here leaves no state.
    let draft = generator
        .generate_portfolio(request.name.trim(), request.role.trim())
        .await
        .map_err(|e| AppError::Ai(e.to_string()))?;

    let existing = profiles::get_profile(pool, user_id).await?;
    let username = match &existing {
        Some(p) => p.username.clone(),
        None => {
            let supplied = request.username.as_deref().unwrap_or("").trim().to_string();
            if supplied.is_empty() {
                return Err(AppError::Validation(
                    "username is required to create a profile".to_string(),
                ));
            }
            supplied
        }
    };

    let mut log = SagaLog::default();
    let applied = apply_draft(
        pool,
        user_id,
        &request,
        &username,
        &draft,
        existing,
        &mut log,
    )
    .await;

    let counts = match applied {
        Ok(counts) => counts,
        Err(err) => {
            warn!(
                "Bootstrap for user {user_id} failed after {} completed writes, rolling back",
                log.len()
            );
            return match rollback(pool, user_id, &log).await {
                Ok(()) => Err(err),
                Err(surviving) => Err(AppError::Internal(anyhow::anyhow!(
                    "bootstrap failed and rollback is incomplete; surviving writes: {}",
                    surviving.join(", ")
                ))),
            };
        }
    };

    // Refresh-after-mutation: return the full post-write collections.
    let profile = profiles::get_profile(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    let all_skills = skills::list_skills(pool, user_id).await?;
    let all_projects = projects::list_projects(pool, user_id).await?;

    info!(
        "Bootstrapped portfolio for user {user_id}: {} skills, {} projects",
        counts.skills_added, counts.projects_added
    );

    Ok(BootstrapResponse {
        profile,
        skills: all_skills,
        projects: all_projects,
        skills_added: counts.skills_added,
        projects_added: counts.projects_added,
        projects_skipped: counts.projects_skipped,
    })
}

async fn apply_draft(
    pool: &PgPool,
    user_id: Uuid,
    request: &BootstrapRequest,
    username: &str,
    draft: &crate::ai::PortfolioDraft,
    existing: Option<ProfileRow>,
    log: &mut SagaLog,
) -> Result<ApplyCounts, AppError> {
    let plan = existing
        .as_ref()
        .map(|p| p.subscription_plan.clone())
        .unwrap_or_else(|| "free".to_string());

    match existing {
        Some(previous) => {
            let links = previous.social_links.0.clone();
            profiles::update_profile(
                pool,
                user_id,
                ProfileWrite {
                    name: request.name.trim(),
                    role: request.role.trim(),
                    bio: &draft.bio,
                    avatar_url: previous.avatar_url.as_deref(),
                    social_links: &links,
                    username,
                },
            )
            .await?;
            log.record(BootstrapStep::ProfileReplaced {
                previous: Box::new(previous),
            });
        }
        None => {
            let links = SocialLinks::new();
            profiles::insert_profile(
                pool,
                user_id,
                ProfileWrite {
                    name: request.name.trim(),
                    role: request.role.trim(),
                    bio: &draft.bio,
                    avatar_url: None,
                    social_links: &links,
                    username,
                },
                DEFAULT_THEME,
            )
            .await?;
            log.record(BootstrapStep::ProfileCreated);
        }
    }

    // Skills: duplicates against stored state (and within the draft) skip.
    let mut have = skills::list_skills(pool, user_id).await?;
    let mut skills_added = 0;
    for name in draft.skills.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if has_duplicate_name(&have, name) {
            continue;
        }
        let row = skills::insert_skill(pool, user_id, name, SkillLevel::Intermediate).await?;
        log.record(BootstrapStep::SkillInserted {
            id: row.id,
            name: row.name.clone(),
        });
        have.push(row);
        skills_added += 1;
    }

    // Projects: required fields and the plan gate apply, same as the form.
    let mut count = projects::count_projects(pool, user_id).await? as u32;
    let mut projects_added = 0;
    let mut projects_skipped = 0;
    for p in &draft.projects {
        if p.title.trim().is_empty() || p.description.trim().is_empty() {
            projects_skipped += 1;
            continue;
        }
        if !can_create_portfolio(&plan, count) {
            projects_skipped += 1;
            continue;
        }
        let payload = ProjectPayload {
            title: p.title.trim().to_string(),
            description: p.description.trim().to_string(),
            tags: p.tags.clone(),
            image_url: None,
            live_url: None,
            repo_url: None,
        };
        let row = projects::insert_project(pool, user_id, &payload).await?;
        log.record(BootstrapStep::ProjectInserted {
            id: row.id,
            title: row.title.clone(),
        });
        count += 1;
        projects_added += 1;
    }

    Ok(ApplyCounts {
        skills_added,
        projects_added,
        projects_skipped,
    })
}

/// Runs compensations in reverse completion order. Returns descriptions
/// of the writes whose compensation failed.
async fn rollback(pool: &PgPool, user_id: Uuid, log: &SagaLog) -> Result<(), Vec<String>> {
    let mut surviving = Vec::new();

    for step in log.compensations() {
        let result: Result<(), sqlx::Error> = match step {
            BootstrapStep::ProjectInserted { id, .. } => {
                projects::delete_project(pool, *id, user_id).await.map(|_| ())
            }
            BootstrapStep::SkillInserted { id, .. } => {
                skills::delete_skill(pool, *id, user_id).await.map(|_| ())
            }
            BootstrapStep::ProfileReplaced { previous } => profiles::update_profile(
                pool,
                user_id,
                ProfileWrite {
                    name: &previous.name,
                    role: &previous.role,
                    bio: &previous.bio,
                    avatar_url: previous.avatar_url.as_deref(),
                    social_links: &previous.social_links.0,
                    username: &previous.username,
                },
            )
            .await
            .map(|_| ()),
            BootstrapStep::ProfileCreated => {
                profiles::delete_profile(pool, user_id).await.map(|_| ())
            }
        };

        if let Err(e) = result {
            error!("Compensation failed for {}: {e}", step.describe());
            surviving.push(step.describe());
        }
    }

    if surviving.is_empty() {
        Ok(())
    } else {
        Err(surviving)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saga_log_records_in_completion_order() {
        let mut log = SagaLog::default();
        assert!(log.is_empty());

        log.record(BootstrapStep::ProfileCreated);
        log.record(BootstrapStep::SkillInserted {
            id: Uuid::new_v4(),
            name: "Rust".to_string(),
        });
        log.record(BootstrapStep::ProjectInserted {
            id: Uuid::new_v4(),
            title: "Demo".to_string(),
        });
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_compensations_run_in_reverse() {
        let mut log = SagaLog::default();
        log.record(BootstrapStep::ProfileCreated);
        log.record(BootstrapStep::SkillInserted {
            id: Uuid::new_v4(),
            name: "Rust".to_string(),
        });
        log.record(BootstrapStep::ProjectInserted {
            id: Uuid::new_v4(),
            title: "Demo".to_string(),
        });

        let order: Vec<String> = log.compensations().map(|s| s.describe()).collect();
        assert_eq!(order, vec!["project 'Demo'", "skill 'Rust'", "profile"]);
    }

    #[test]
    fn test_step_descriptions_name_the_record() {
        let step = BootstrapStep::SkillInserted {
            id: Uuid::new_v4(),
            name: "PostgreSQL".to_string(),
        };
        assert_eq!(step.describe(), "skill 'PostgreSQL'");
    }
}
