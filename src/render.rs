//! Terminal projection of the directory state.

use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use yansi::Paint;

use crate::models::{DraftField, FormDraft, UserRecord};

pub const EMPTY_LIST_MESSAGE: &str = "No users registered";

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

pub fn records_table(records: &[UserRecord]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["ID", "Name", "Email", "Phone"]);
    for r in records {
        table.add_row(vec![
            r.id.to_string(),
            r.full_name.clone(),
            r.email.clone(),
            r.phone_number.clone(),
        ]);
    }
    table
}

/// The record list as printed by the CLI, with the empty-list placeholder.
pub fn render_records(records: &[UserRecord]) -> String {
    if records.is_empty() {
        return Paint::new(EMPTY_LIST_MESSAGE).dim().to_string();
    }
    records_table(records).to_string()
}

pub fn render_draft(draft: &FormDraft) -> String {
    let mut table = new_table();
    let title = match draft.edit_target_id {
        Some(id) => format!("Editing user {}", id),
        None => "New user".to_string(),
    };
    table.set_header(vec![title, String::new()]);
    for field in DraftField::ALL {
        table.add_row(vec![field.label().to_string(), draft.field(field).to_string()]);
    }
    table.to_string()
}
