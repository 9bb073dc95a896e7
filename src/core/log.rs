use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::visible_width;
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 60;

/// ANSI colour per audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "status" => Colour::Cyan,
        "edit" => Colour::Yellow,
        "backfill" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "backup" | "init" => Colour::Blue,
        _ => Colour::White,
    }
}

/// `operation (target)`, truncated to `MAX_OP_WIDTH` visible characters
/// with only the operation word coloured.
fn render_op_target(entry: &LogEntry) -> String {
    let plain = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let visible = if plain.chars().count() > MAX_OP_WIDTH {
        let mut s: String = plain.chars().take(MAX_OP_WIDTH - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&entry.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = pool.with_conn(|conn| load_log(conn))?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rendered: Vec<String> = entries.iter().map(render_op_target).collect();

        let op_w = rendered
            .iter()
            .map(|s| visible_width(s))
            .max()
            .unwrap_or(10);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (entry, op_target) in entries.iter().zip(rendered) {
            let date = chrono::DateTime::parse_from_rfc3339(&entry.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| entry.date.clone());
            let padding = " ".repeat(op_w.saturating_sub(visible_width(&op_target)));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                entry.id, date, op_target, padding, entry.message,
            );
        }

        Ok(())
    }
}
