//! Doughnut chart data derived from the task list.
//!
//! Rendering is left to the caller; these functions only produce labelled,
//! coloured segments.

use crate::schedule::Category;
use crate::types::{Summary, Task};

/// One slice of a doughnut chart
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartSegment {
    /// Legend label
    pub label: String,
    /// Slice size
    pub value: usize,
    /// Fill colour, as a CSS hex string
    pub color: &'static str,
    /// Fill colour under the pointer
    pub hover_color: &'static str,
    /// Tooltip lines shown for the slice
    pub tooltip: Vec<String>,
}

const COMPLETED_COLOR: (&str, &str) = ("#4CAF50", "#66BB6A");
const REMAINING_COLOR: (&str, &str) = ("#ddd", "#ccc");

const fn category_colors(category: Category) -> (&'static str, &'static str) {
    match category {
        Category::School => ("#36A2EB", "#5AB4EF"),
        Category::Work => ("#FF6384", "#FF829B"),
        Category::Leisure => ("#FFCE56", "#FFD878"),
    }
}

/// Completed versus remaining tasks
#[must_use]
pub fn completion_chart(summary: Summary) -> Vec<ChartSegment> {
    let of_total = |count: usize| format!("{count} of {} tasks", summary.total);

    vec![
        ChartSegment {
            label: "Completed".to_string(),
            value: summary.completed,
            color: COMPLETED_COLOR.0,
            hover_color: COMPLETED_COLOR.1,
            tooltip: vec![of_total(summary.completed)],
        },
        ChartSegment {
            label: "Remaining".to_string(),
            value: summary.remaining(),
            color: REMAINING_COLOR.0,
            hover_color: REMAINING_COLOR.1,
            tooltip: vec![of_total(summary.remaining())],
        },
    ]
}

/// Task count per category, with the tasks listed in each tooltip
///
/// Every category gets a segment, empty ones included, so legend colours
/// stay stable.
#[must_use]
pub fn category_chart(tasks: &[Task]) -> Vec<ChartSegment> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let in_category: Vec<&Task> = tasks.iter().filter(|task| task.category == category).collect();
            let completed = in_category.iter().filter(|task| task.completed).count();

            let mut tooltip: Vec<String> = in_category.iter().map(|task| tooltip_line(task)).collect();
            tooltip.push(format!("{completed} of {} completed", in_category.len()));

            let (color, hover_color) = category_colors(category);
            ChartSegment {
                label: category.label().to_string(),
                value: in_category.len(),
                color,
                hover_color,
                tooltip,
            }
        })
        .collect()
}

fn tooltip_line(task: &Task) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    match task.schedule_label() {
        Some(schedule) => format!("{mark} {} ({schedule})", task.text),
        None => format!("{mark} {}", task.text),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::schedule::ScheduledTime;
    use crate::types::{NewTask, TaskId};
    use chrono::NaiveDate;

    #[test]
    fn completion_chart_splits_summary() {
        let segments = completion_chart(Summary { completed: 2, total: 5 });

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label, "Completed");
        assert_eq!(segments[0].value, 2);
        assert_eq!(segments[0].color, "#4CAF50");
        assert_eq!(segments[0].hover_color, "#66BB6A");
        assert_eq!(segments[1].label, "Remaining");
        assert_eq!(segments[1].value, 3);
        assert_eq!(segments[1].color, "#ddd");
        assert_eq!(segments[1].tooltip, ["3 of 5 tasks"]);
    }

    #[test]
    fn empty_list_gives_zero_segments() {
        let segments = completion_chart(Summary::default());
        assert!(segments.iter().all(|segment| segment.value == 0));

        let by_category = category_chart(&[]);
        assert_eq!(by_category.len(), 3);
        assert!(by_category.iter().all(|segment| segment.tooltip == ["0 of 0 completed"]));
    }

    #[test]
    fn category_chart_lists_tasks_with_schedule() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 5).unwrap();
        let time = ScheduledTime::from_hm(9, 0).unwrap();
        let mut done = Task::new(TaskId::new(1), NewTask::new("Report").with_category(Category::Work));
        done.toggle();
        let tasks = vec![
            Task::new(TaskId::new(0), NewTask::new("Homework").with_date(date).with_time(time)),
            done,
            Task::new(TaskId::new(2), NewTask::new("Standup").with_category(Category::Work).with_time(time)),
        ];

        let segments = category_chart(&tasks);

        let labels: Vec<_> = segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["School", "Work", "Leisure"]);
        assert_eq!(segments[0].tooltip, ["[ ] Homework (2024-10-05 09:00)", "0 of 1 completed"]);
        assert_eq!(segments[1].value, 2);
        assert_eq!(
            segments[1].tooltip,
            ["[x] Report", "[ ] Standup (09:00)", "1 of 2 completed"]
        );
        assert_eq!(segments[2].value, 0);
    }
}
