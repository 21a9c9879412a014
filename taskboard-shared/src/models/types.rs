/// Status and priority enums shared by stories and tasks
///
/// Both map onto PostgreSQL enum types (`work_status`, `work_priority`) and
/// serialize as lowercase strings. Serde and sqlx reject any value outside
/// the enum, so an invalid status can never enter the store.

use serde::{Deserialize, Serialize};

/// Kanban column a story or task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "work_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WorkStatus {
    /// Not started
    Todo,

    /// In progress
    Doing,

    /// Finished
    Done,
}

impl WorkStatus {
    /// Converts status to string for logs and display
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkStatus::Todo => "todo",
            WorkStatus::Doing => "doing",
            WorkStatus::Done => "done",
        }
    }
}

/// Priority of a story or task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "work_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Converts priority to string for logs and display
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_status_as_str() {
        assert_eq!(WorkStatus::Todo.as_str(), "todo");
        assert_eq!(WorkStatus::Doing.as_str(), "doing");
        assert_eq!(WorkStatus::Done.as_str(), "done");
    }

    #[test]
    fn test_priority_as_str() {
        assert_eq!(Priority::Low.as_str(), "low");
        assert_eq!(Priority::Medium.as_str(), "medium");
        assert_eq!(Priority::High.as_str(), "high");
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&WorkStatus::Doing).unwrap();
        assert_eq!(json, "\"doing\"");

        let parsed: WorkStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(parsed, WorkStatus::Done);
    }

    #[test]
    fn test_status_rejects_unknown_value() {
        let result: Result<WorkStatus, _> = serde_json::from_str("\"blocked\"");
        assert!(result.is_err());
    }
}
