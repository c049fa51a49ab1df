use chrono::NaiveDate;
use serde::Serialize;

use crate::doc::{Document, PropertyStore, PropsError, Scope, get_json, set_json};
use crate::model::goal::{CustomGoal, GoalProgress, GoalSettings};

pub const GOAL_SETTINGS_KEY: &str = "GOAL_SETTINGS";
pub const GOAL_PROGRESS_KEY: &str = "GOAL_PROGRESS";
pub const CUSTOM_GOALS_KEY: &str = "CUSTOM_GOALS";

/// Words in the whole document, whitespace-delimited
pub fn word_count<D: Document>(doc: &D) -> u64 {
    (0..doc.len())
        .filter_map(|i| doc.text(i))
        .map(|t| t.split_whitespace().count() as u64)
        .sum()
}

/// Goal settings plus live progress, for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatus {
    pub settings: GoalSettings,
    pub current_word_count: u64,
    pub words_written_today: u64,
    pub custom_goals: Vec<CustomGoal>,
}

/// Load goal state, rolling the daily baseline over on a new day.
///
/// Malformed stored values silently fall back to defaults (user scope has no
/// warning channel). When the stored date is not `today`, the baseline resets
/// to the current count and the rollover is persisted immediately.
pub fn goal_status<D: Document, P: PropertyStore>(
    doc: &D,
    props: &mut P,
    today: NaiveDate,
) -> Result<GoalStatus, PropsError> {
    let settings: GoalSettings =
        get_json(props, Scope::User, GOAL_SETTINGS_KEY).unwrap_or_default();
    let mut progress: GoalProgress =
        get_json(props, Scope::User, GOAL_PROGRESS_KEY).unwrap_or_default();
    let custom_goals: Vec<CustomGoal> =
        get_json(props, Scope::User, CUSTOM_GOALS_KEY).unwrap_or_default();

    let current = word_count(doc);
    let today = today.to_string();
    if progress.date != today {
        progress.date = today;
        progress.start_of_day_count = current;
        set_json(props, Scope::User, GOAL_PROGRESS_KEY, &progress)?;
    }

    Ok(GoalStatus {
        settings,
        current_word_count: current,
        words_written_today: current.saturating_sub(progress.start_of_day_count),
        custom_goals,
    })
}

pub fn save_goal_settings<P: PropertyStore>(
    props: &mut P,
    settings: &GoalSettings,
) -> Result<(), PropsError> {
    set_json(props, Scope::User, GOAL_SETTINGS_KEY, settings)
}

/// Append a milestone and persist the full list
pub fn add_milestone<P: PropertyStore>(
    props: &mut P,
    label: &str,
    target: u64,
) -> Result<Vec<CustomGoal>, PropsError> {
    let mut goals: Vec<CustomGoal> =
        get_json(props, Scope::User, CUSTOM_GOALS_KEY).unwrap_or_default();
    goals.push(CustomGoal {
        label: label.to_string(),
        target,
    });
    set_json(props, Scope::User, CUSTOM_GOALS_KEY, &goals)?;
    Ok(goals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{MemDoc, MemProps};
    use pretty_assertions::assert_eq;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn word_count_spans_paragraphs() {
        let doc = MemDoc::from_lines(["one two", "", "  three  four five "]);
        assert_eq!(word_count(&doc), 5);
    }

    #[test]
    fn first_status_uses_defaults_and_sets_baseline() {
        let doc = MemDoc::from_lines(["one two three"]);
        let mut props = MemProps::new();
        let status = goal_status(&doc, &mut props, day("2026-08-24")).unwrap();

        assert_eq!(status.settings, GoalSettings::default());
        assert_eq!(status.current_word_count, 3);
        assert_eq!(status.words_written_today, 0);
        assert!(status.custom_goals.is_empty());
    }

    #[test]
    fn same_day_accumulates_new_day_resets() {
        let mut doc = MemDoc::from_lines(["one two three"]);
        let mut props = MemProps::new();
        goal_status(&doc, &mut props, day("2026-08-24")).unwrap();

        doc.append_text(0, " four five");
        let status = goal_status(&doc, &mut props, day("2026-08-24")).unwrap();
        assert_eq!(status.words_written_today, 2);

        let status = goal_status(&doc, &mut props, day("2026-08-25")).unwrap();
        assert_eq!(status.words_written_today, 0);
        assert_eq!(status.current_word_count, 5);
    }

    #[test]
    fn shrinking_document_clamps_at_zero() {
        let mut doc = MemDoc::from_lines(["one two three"]);
        let mut props = MemProps::new();
        goal_status(&doc, &mut props, day("2026-08-24")).unwrap();

        doc.set_text(0, "one");
        let status = goal_status(&doc, &mut props, day("2026-08-24")).unwrap();
        assert_eq!(status.words_written_today, 0);
    }

    #[test]
    fn malformed_stored_goal_state_silently_defaults() {
        let doc = MemDoc::from_lines(["word"]);
        let mut props = MemProps::new();
        props.set(Scope::User, GOAL_SETTINGS_KEY, "garbage").unwrap();
        props.set(Scope::User, CUSTOM_GOALS_KEY, "{bad").unwrap();

        let status = goal_status(&doc, &mut props, day("2026-08-24")).unwrap();
        assert_eq!(status.settings, GoalSettings::default());
        assert!(status.custom_goals.is_empty());
    }

    #[test]
    fn milestones_append_and_persist() {
        let mut props = MemProps::new();
        add_milestone(&mut props, "first draft", 2000).unwrap();
        let goals = add_milestone(&mut props, "polish", 4000).unwrap();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].label, "first draft");

        let stored: Vec<CustomGoal> = get_json(&props, Scope::User, CUSTOM_GOALS_KEY).unwrap();
        assert_eq!(stored, goals);
    }
}
