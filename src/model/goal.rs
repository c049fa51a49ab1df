use serde::{Deserialize, Serialize};

/// Writing targets, persisted per-user under `GOAL_SETTINGS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSettings {
    /// Total word target for the draft
    pub target: u64,
    /// Free-form due date ("" = none)
    #[serde(default)]
    pub due_date: String,
    /// Words-per-day target
    pub daily_target: u64,
}

impl Default for GoalSettings {
    fn default() -> Self {
        GoalSettings {
            target: 5000,
            due_date: String::new(),
            daily_target: 500,
        }
    }
}

/// Daily baseline, persisted per-user under `GOAL_PROGRESS`.
/// `date` is the day the baseline was taken; a new day resets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub start_of_day_count: u64,
    #[serde(default)]
    pub date: String,
}

/// A user-defined milestone, persisted per-user under `CUSTOM_GOALS`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomGoal {
    pub label: String,
    pub target: u64,
}
