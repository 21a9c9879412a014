/// Task status lifecycle rules
///
/// The update path for tasks carries two side effects beyond the written
/// fields:
///
/// - assigning a user to a task still in todo advances it to doing, and
///   stamps `started_at` if it was never set
/// - explicitly setting status to done stamps `ended_at` if it was never set
///
/// There is deliberately no inverse: moving a task back to todo or doing
/// clears neither stamp, so a reopened task keeps its original start and
/// end times. Transitions between the three columns are otherwise
/// unrestricted.
///
/// The planner is a pure function so these rules can be tested without a
/// database; [`super::task::Task::update`] applies the resulting plan.

use chrono::{DateTime, Utc};

use super::task::{Task, UpdateTask};
use super::types::WorkStatus;

/// Effective status and date stamps for a pending task update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPlan {
    /// Status the task ends up in
    pub status: WorkStatus,

    /// started_at after the update
    pub started_at: Option<DateTime<Utc>>,

    /// ended_at after the update
    pub ended_at: Option<DateTime<Utc>>,
}

/// Computes the status and date stamps a patch resolves to
///
/// An explicit status in the patch wins over the assignment auto-advance.
pub fn plan_update(current: &Task, patch: &UpdateTask, now: DateTime<Utc>) -> StatusPlan {
    let mut status = patch.status.unwrap_or(current.status);
    let mut started_at = current.started_at;
    let mut ended_at = current.ended_at;

    // Assignment on a todo task pulls it onto the board.
    let assignment_advance = patch.assigned_user_id.is_some()
        && current.status == WorkStatus::Todo
        && patch.status.is_none();

    if assignment_advance {
        status = WorkStatus::Doing;
        if started_at.is_none() {
            started_at = Some(now);
        }
    }

    // Only an explicit done stamps the end date.
    if patch.status == Some(WorkStatus::Done) && ended_at.is_none() {
        ended_at = Some(now);
    }

    StatusPlan {
        status,
        started_at,
        ended_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Priority;
    use chrono::Duration;
    use uuid::Uuid;

    fn sample_task(status: WorkStatus) -> Task {
        let now = Utc::now();
        Task {
            id: Uuid::new_v4(),
            name: "Wire up login form".to_string(),
            description: String::new(),
            priority: Priority::Medium,
            status,
            story_id: Uuid::new_v4(),
            estimated_hours: 2.0,
            assigned_user_id: None,
            started_at: None,
            ended_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn assign_patch() -> UpdateTask {
        UpdateTask {
            assigned_user_id: Some(Uuid::new_v4()),
            ..Default::default()
        }
    }

    #[test]
    fn test_assignment_on_todo_advances_to_doing_and_stamps_start() {
        let task = sample_task(WorkStatus::Todo);
        let now = Utc::now();

        let plan = plan_update(&task, &assign_patch(), now);

        assert_eq!(plan.status, WorkStatus::Doing);
        assert_eq!(plan.started_at, Some(now));
        assert_eq!(plan.ended_at, None);
    }

    #[test]
    fn test_reassignment_on_doing_keeps_existing_start() {
        let mut task = sample_task(WorkStatus::Doing);
        let original_start = Utc::now() - Duration::hours(3);
        task.started_at = Some(original_start);

        let plan = plan_update(&task, &assign_patch(), Utc::now());

        assert_eq!(plan.status, WorkStatus::Doing);
        assert_eq!(plan.started_at, Some(original_start));
    }

    #[test]
    fn test_assignment_does_not_overwrite_existing_start_on_todo() {
        let mut task = sample_task(WorkStatus::Todo);
        let original_start = Utc::now() - Duration::hours(1);
        task.started_at = Some(original_start);

        let plan = plan_update(&task, &assign_patch(), Utc::now());

        assert_eq!(plan.status, WorkStatus::Doing);
        assert_eq!(plan.started_at, Some(original_start));
    }

    #[test]
    fn test_explicit_status_wins_over_assignment_advance() {
        let task = sample_task(WorkStatus::Todo);
        let patch = UpdateTask {
            assigned_user_id: Some(Uuid::new_v4()),
            status: Some(WorkStatus::Todo),
            ..Default::default()
        };

        let plan = plan_update(&task, &patch, Utc::now());

        assert_eq!(plan.status, WorkStatus::Todo);
        assert_eq!(plan.started_at, None);
    }

    #[test]
    fn test_explicit_done_stamps_end_once() {
        let task = sample_task(WorkStatus::Doing);
        let now = Utc::now();
        let patch = UpdateTask {
            status: Some(WorkStatus::Done),
            ..Default::default()
        };

        let plan = plan_update(&task, &patch, now);
        assert_eq!(plan.status, WorkStatus::Done);
        assert_eq!(plan.ended_at, Some(now));

        // A second explicit done keeps the first stamp.
        let mut done_task = sample_task(WorkStatus::Done);
        let original_end = now - Duration::minutes(30);
        done_task.ended_at = Some(original_end);

        let plan = plan_update(&done_task, &patch, now);
        assert_eq!(plan.ended_at, Some(original_end));
    }

    #[test]
    fn test_reopening_keeps_both_stamps() {
        let mut task = sample_task(WorkStatus::Done);
        let started = Utc::now() - Duration::hours(5);
        let ended = Utc::now() - Duration::hours(1);
        task.started_at = Some(started);
        task.ended_at = Some(ended);

        let patch = UpdateTask {
            status: Some(WorkStatus::Todo),
            ..Default::default()
        };

        let plan = plan_update(&task, &patch, Utc::now());

        assert_eq!(plan.status, WorkStatus::Todo);
        assert_eq!(plan.started_at, Some(started));
        assert_eq!(plan.ended_at, Some(ended));
    }

    #[test]
    fn test_plain_field_patch_changes_nothing() {
        let task = sample_task(WorkStatus::Doing);
        let patch = UpdateTask {
            name: Some("Rename".to_string()),
            ..Default::default()
        };

        let plan = plan_update(&task, &patch, Utc::now());

        assert_eq!(plan.status, WorkStatus::Doing);
        assert_eq!(plan.started_at, None);
        assert_eq!(plan.ended_at, None);
    }

    #[test]
    fn test_done_to_doing_is_allowed() {
        let mut task = sample_task(WorkStatus::Done);
        task.ended_at = Some(Utc::now());

        let patch = UpdateTask {
            status: Some(WorkStatus::Doing),
            ..Default::default()
        };

        let plan = plan_update(&task, &patch, Utc::now());
        assert_eq!(plan.status, WorkStatus::Doing);
        assert!(plan.ended_at.is_some());
    }
}
