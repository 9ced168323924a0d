//! Top-level view routing
//!
//! A pure function from session, job, and ephemeral UI flags to the one
//! screen that should be active. No side effects; rendering is a table
//! lookup over the returned tag.
//!
//! The caller owns the companion invariant: leaving the workspace
//! (logout, persona change) resets the job to idle, so a stale progress
//! view can never reappear for a different session.

use crate::job::{JobState, JobStatus};
use crate::session::Session;

/// Ephemeral UI flags that influence routing
#[derive(Debug, Clone, Copy, Default)]
pub struct UiFlags {
    /// The user asked to sign in from the landing screen
    pub login_requested: bool,

    /// The user explicitly re-opened the persona selector
    pub persona_selector_forced: bool,
}

/// Which pane is active inside the workspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspacePane {
    /// The submission wizard (editable)
    Wizard,
    /// Progress / result view; running vs. finished is rendered inside
    Progress,
}

/// The active top-level screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Signed out, browsing
    Landing,
    /// Login / registration
    Auth,
    /// The persona directory
    PersonaSelection,
    /// The main workspace
    Workspace {
        pane: WorkspacePane,
        /// Failure banner shown over the pane, if any
        banner: Option<String>,
    },
}

/// Decide the active view. Exactly one view results from any input.
pub fn route(session: Option<&Session>, job: &JobState, flags: &UiFlags) -> View {
    let session = match session {
        None => {
            return if flags.login_requested {
                View::Auth
            } else {
                View::Landing
            };
        }
        Some(session) => session,
    };

    if flags.persona_selector_forced || session.user.persona.is_none() {
        return View::PersonaSelection;
    }

    match job.status {
        JobStatus::Idle | JobStatus::Submitting => View::Workspace {
            pane: WorkspacePane::Wizard,
            banner: None,
        },
        JobStatus::Running | JobStatus::Succeeded => View::Workspace {
            pane: WorkspacePane::Progress,
            banner: None,
        },
        JobStatus::Failed => {
            let banner = job.error.clone();
            if job.job_id.is_some() {
                // The run failed after acknowledgement: keep the last
                // screen and show the banner over it
                View::Workspace {
                    pane: WorkspacePane::Progress,
                    banner,
                }
            } else {
                // Submission itself failed: back to the editable wizard
                View::Workspace {
                    pane: WorkspacePane::Wizard,
                    banner,
                }
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UserProfile;

    fn session(persona: Option<&str>) -> Session {
        Session {
            token: "tok-1".to_string(),
            user: UserProfile {
                id: 1,
                email: "ada@acme.com".to_string(),
                first_name: Some("Ada".to_string()),
                last_name: None,
                company_name: None,
                persona: persona.map(str::to_string),
            },
        }
    }

    fn job(status: JobStatus, job_id: Option<&str>, error: Option<&str>) -> JobState {
        JobState {
            status,
            job_id: job_id.map(str::to_string),
            current_step: None,
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn test_signed_out_routes_to_landing() {
        let view = route(None, &JobState::default(), &UiFlags::default());
        assert_eq!(view, View::Landing);
    }

    #[test]
    fn test_signed_out_with_login_requested_routes_to_auth() {
        let flags = UiFlags { login_requested: true, ..Default::default() };
        let view = route(None, &JobState::default(), &flags);
        assert_eq!(view, View::Auth);
    }

    #[test]
    fn test_missing_persona_routes_to_selection() {
        let session = session(None);
        let view = route(Some(&session), &JobState::default(), &UiFlags::default());
        assert_eq!(view, View::PersonaSelection);
    }

    #[test]
    fn test_forced_selector_overrides_existing_persona() {
        let session = session(Some("cto"));
        let flags = UiFlags { persona_selector_forced: true, ..Default::default() };
        let view = route(Some(&session), &JobState::default(), &flags);
        assert_eq!(view, View::PersonaSelection);
    }

    #[test]
    fn test_idle_and_submitting_show_wizard() {
        let session = session(Some("cto"));

        for status in [JobStatus::Idle, JobStatus::Submitting] {
            let view = route(Some(&session), &job(status, None, None), &UiFlags::default());
            assert_eq!(
                view,
                View::Workspace { pane: WorkspacePane::Wizard, banner: None }
            );
        }
    }

    #[test]
    fn test_running_and_succeeded_show_progress() {
        let session = session(Some("cto"));

        for status in [JobStatus::Running, JobStatus::Succeeded] {
            let view = route(
                Some(&session),
                &job(status, Some("job-1"), None),
                &UiFlags::default(),
            );
            assert_eq!(
                view,
                View::Workspace { pane: WorkspacePane::Progress, banner: None }
            );
        }
    }

    #[test]
    fn test_submission_failure_returns_to_wizard_with_banner() {
        let session = session(Some("cto"));
        let view = route(
            Some(&session),
            &job(JobStatus::Failed, None, Some("Only .zip or .md files are supported")),
            &UiFlags::default(),
        );
        assert_eq!(
            view,
            View::Workspace {
                pane: WorkspacePane::Wizard,
                banner: Some("Only .zip or .md files are supported".to_string()),
            }
        );
    }

    #[test]
    fn test_run_failure_keeps_progress_view_with_banner() {
        let session = session(Some("cto"));
        let view = route(
            Some(&session),
            &job(JobStatus::Failed, Some("job-1"), Some("Model quota exceeded")),
            &UiFlags::default(),
        );
        assert_eq!(
            view,
            View::Workspace {
                pane: WorkspacePane::Progress,
                banner: Some("Model quota exceeded".to_string()),
            }
        );
    }

    #[test]
    fn test_persona_selection_transitions_straight_to_workspace() {
        // Before selection: the selector is active
        let before = session(None);
        assert_eq!(
            route(Some(&before), &JobState::default(), &UiFlags::default()),
            View::PersonaSelection
        );

        // After set_persona the profile carries the persona; the very
        // next evaluation lands in the workspace, never on Landing
        let after = session(Some("cto"));
        assert_eq!(
            route(Some(&after), &JobState::default(), &UiFlags::default()),
            View::Workspace { pane: WorkspacePane::Wizard, banner: None }
        );
    }
}
