//! Plain-text rendering for the command line.

use crate::chart::ChartSegment;
use crate::types::Task;
use std::fmt::Write as _;

const BAR_WIDTH: usize = 30;

/// One line per task: id, checkbox, text, category and schedule
#[must_use]
pub fn render_task(task: &Task) -> String {
    let mark = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!("{:>4} {mark} {} ({})", task.id, task.text, task.category);
    if let Some(schedule) = task.schedule_label() {
        let _ = write!(line, " @ {schedule}");
    }
    line
}

/// Task lines, or a placeholder for an empty view
#[must_use]
pub fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks".to_string();
    }
    tasks.iter().map(render_task).collect::<Vec<_>>().join("\n")
}

/// Horizontal bar per segment, scaled against the total of all segments
#[must_use]
pub fn render_chart(segments: &[ChartSegment]) -> String {
    let total: usize = segments.iter().map(|segment| segment.value).sum();
    let label_width = segments.iter().map(|segment| segment.label.len()).max().unwrap_or(0);

    let mut out = String::new();
    for segment in segments {
        let filled = if total == 0 { 0 } else { segment.value * BAR_WIDTH / total };
        let _ = writeln!(
            out,
            "{:<label_width$} {:<bar_width$} {:>3} {}",
            segment.label,
            "#".repeat(filled),
            segment.value,
            segment.color,
            bar_width = BAR_WIDTH,
        );
        for line in &segment.tooltip {
            let _ = writeln!(out, "{:<label_width$}   {line}", "");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::chart::completion_chart;
    use crate::schedule::{Category, ScheduledTime};
    use crate::types::{NewTask, Summary, TaskId};

    #[test]
    fn task_line_shows_state_and_schedule() {
        let mut task = Task::new(
            TaskId::new(12),
            NewTask::new("Run")
                .with_category(Category::Leisure)
                .with_time(ScheduledTime::from_hm(6, 30).unwrap()),
        );
        assert_eq!(render_task(&task), "  12 [ ] Run (leisure) @ 06:30");

        task.toggle();
        assert!(render_task(&task).contains("[x] Run"));
    }

    #[test]
    fn empty_list_has_placeholder() {
        assert_eq!(render_tasks(&[]), "No tasks");
    }

    #[test]
    fn chart_bars_scale_with_values() {
        let rendered = render_chart(&completion_chart(Summary { completed: 1, total: 2 }));
        let lines: Vec<_> = rendered.lines().collect();

        assert!(lines[0].starts_with("Completed"));
        assert_eq!(lines[0].matches('#').count() - 1, BAR_WIDTH / 2);
        assert!(lines[1].trim_start().starts_with("1 of 2 tasks"));
        assert!(lines[2].starts_with("Remaining"));
    }
}
