use std::sync::Mutex;

use console::{style, Term};
use dialoguer::Confirm;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use uuid::Uuid;

use duetick_core::{Celebrate, ConfirmPrompt, Notifier, TaskRow, TickSink, TickView};

#[derive(Tabled)]
struct ListRow {
    #[tabled(rename = "Task")]
    text: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "ID")]
    id: String,
}

pub fn print_task_table(rows: &[TaskRow]) {
    if rows.is_empty() {
        println!("No tasks yet.");
        return;
    }

    let list_rows: Vec<ListRow> = rows
        .iter()
        .map(|row| ListRow {
            text: row.text.clone(),
            status: if row.is_done { "done" } else { "pending" }.to_string(),
            remaining: row.remaining.clone(),
            id: row.id.to_string(),
        })
        .collect();

    let mut table = Table::new(list_rows);
    table.with(Style::rounded());
    println!("{table}");
}

/// Styled stderr notifier: the terminal stand-in for the original alert
/// dialog, shared by validation messages, near-due warnings and reminders.
#[derive(Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", style(message).yellow().bold());
    }
}

/// Interactive yes/no gate before destructive actions.
pub struct ConsolePrompt;

impl ConfirmPrompt for ConsolePrompt {
    fn confirm(&self, question: &str) -> bool {
        Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// One-shot completion celebration, the terminal form of the confetti burst.
#[derive(Default, Clone, Copy)]
pub struct ConfettiBurst;

impl Celebrate for ConfettiBurst {
    fn celebrate(&self) {
        println!("{}", style("🎉 ✨ 🎉  Task complete!  🎉 ✨ 🎉").green().bold());
    }
}

struct BoardRow {
    id: Uuid,
    label: String,
    view: TickView,
}

struct BoardState {
    rows: Vec<BoardRow>,
    drawn: usize,
}

/// Live countdown display: one line per countdown, redrawn in place on every
/// tick. Rows appear in the order countdowns first report in.
pub struct CountdownBoard {
    term: Term,
    state: Mutex<BoardState>,
}

impl CountdownBoard {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            state: Mutex::new(BoardState {
                rows: Vec::new(),
                drawn: 0,
            }),
        }
    }

    fn redraw(&self, state: &mut BoardState) {
        let _ = self.term.clear_last_lines(state.drawn);
        for row in &state.rows {
            let line = match &row.view {
                TickView::Remaining(hms) => {
                    format!("⏳ {}  {}", style(hms).cyan(), row.label)
                }
                TickView::Overdue => {
                    format!("{}  {}", style("⏰ Overdue!").red().bold(), row.label)
                }
            };
            let _ = self.term.write_line(&line);
        }
        state.drawn = state.rows.len();
    }
}

impl TickSink for CountdownBoard {
    fn render(&self, task_id: Uuid, label: &str, view: TickView) {
        let mut state = self.state.lock().expect("board lock poisoned");
        match state.rows.iter_mut().find(|r| r.id == task_id) {
            Some(row) => row.view = view,
            None => state.rows.push(BoardRow {
                id: task_id,
                label: label.to_string(),
                view,
            }),
        }
        self.redraw(&mut state);
    }
}
