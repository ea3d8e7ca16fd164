use tabled::settings::Style;
use tabled::{Table, Tabled};
use tasklist_core::config::Palette;
use tasklist_core::error::AppError;
use tasklist_core::{Filter, Row, View};

#[derive(Tabled)]
struct DisplayRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "done")]
    checkbox: &'static str,
    #[tabled(rename = "task")]
    text: String,
}

impl DisplayRow {
    fn new(row: &Row, palette: &Palette) -> Self {
        let (checkbox, text) = if row.completed {
            ("[x]", palette.mutedize(&format!("{} ✓", row.text)))
        } else {
            ("[ ]", row.text.clone())
        };

        Self {
            row: row.row,
            checkbox,
            text,
        }
    }
}

/// Draws the whole view: filter bar, one table row per visible task and the
/// counters for the full list.
pub fn render_text(view: &View, palette: &Palette) -> String {
    let mut out = filter_bar(view.filter, palette);
    out.push('\n');

    if view.is_empty() {
        out.push_str("No tasks.\n");
    } else {
        let rows: Vec<DisplayRow> = view
            .rows
            .iter()
            .map(|row| DisplayRow::new(row, palette))
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        out.push_str(&table.to_string());
        out.push('\n');
    }

    out.push_str(&format!(
        "Total: {} | Active: {} | Completed: {}",
        view.counts.total, view.counts.active, view.counts.completed
    ));
    out
}

pub fn render_json(view: &View) -> Result<String, AppError> {
    Ok(serde_json::to_string(view)?)
}

fn filter_bar(selected: Filter, palette: &Palette) -> String {
    let labels: Vec<String> = Filter::ALL
        .into_iter()
        .map(|filter| {
            if filter == selected {
                palette.accentize(&format!("[{filter}]"))
            } else {
                filter.to_string()
            }
        })
        .collect();
    format!("Filter: {}", labels.join(" "))
}

#[cfg(test)]
mod tests {
    use super::{render_json, render_text};
    use tasklist_core::config::palette_for_theme;
    use tasklist_core::{Filter, Task, TaskList, View};

    fn view(filter: Filter) -> View {
        let tasks = vec![
            Task {
                id: 2,
                text: "Walk dog".to_string(),
                completed: true,
            },
            Task {
                id: 1,
                text: "Buy milk".to_string(),
                completed: false,
            },
        ];
        View::build(&TaskList::from_tasks(tasks).0, filter)
    }

    #[test]
    fn text_view_lists_rows_and_counts() {
        let rendered = render_text(&view(Filter::All), &palette_for_theme(None));

        assert!(rendered.starts_with("Filter: [all] active completed"));
        assert!(rendered.contains("[x]"));
        assert!(rendered.contains("Walk dog ✓"));
        assert!(rendered.contains("[ ]"));
        assert!(rendered.contains("Buy milk"));
        assert!(rendered.ends_with("Total: 2 | Active: 1 | Completed: 1"));
    }

    #[test]
    fn filtered_text_view_keeps_full_counts() {
        let rendered = render_text(&view(Filter::Active), &palette_for_theme(None));

        assert!(rendered.contains("Filter: all [active] completed"));
        assert!(!rendered.contains("Walk dog"));
        assert!(rendered.contains("Total: 2 | Active: 1 | Completed: 1"));
    }

    #[test]
    fn empty_view_says_so() {
        let empty = View::build(&TaskList::new(), Filter::Completed);
        let rendered = render_text(&empty, &palette_for_theme(None));
        assert!(rendered.contains("No tasks."));
        assert!(rendered.contains("Total: 0 | Active: 0 | Completed: 0"));
    }

    #[test]
    fn themed_view_styles_completed_text() {
        let rendered = render_text(&view(Filter::All), &palette_for_theme(Some("noir")));
        assert!(rendered.contains("\x1b[9;38;5;244m"));
        assert!(rendered.contains("Walk dog"));
        assert!(rendered.contains("\x1b[38;5;208m[all]\x1b[0m"));
    }

    #[test]
    fn json_view_carries_rows_and_counts() {
        let json: serde_json::Value =
            serde_json::from_str(&render_json(&view(Filter::Completed)).unwrap()).unwrap();

        assert_eq!(json["filter"], "completed");
        assert_eq!(json["counts"]["active"], 1);
        assert_eq!(json["tasks"].as_array().unwrap().len(), 1);
        assert_eq!(json["tasks"][0]["text"], "Walk dog");
    }
}
