//! Plain-text rendering of a document, driven by the editor views.

use telos_blocks::{
    Block, BlockKind, DocumentSnapshot, EditorView, Field, FieldMode, FieldView, describe,
    editor_view,
};

/// Render the whole document, one numbered block per entry.
pub fn render_document(title: &str, document: &DocumentSnapshot) -> String {
    let mut out = format!("# {title}\n");
    if document.is_empty() {
        out.push_str("  (empty, `add <kind>` to start)\n");
    }
    for (index, block) in document.blocks().iter().enumerate() {
        out.push_str(&render_block(index + 1, block));
    }
    out
}

/// Render one block with its 1-based position.
pub fn render_block(position: usize, block: &Block) -> String {
    let info = describe(block.kind());
    let mut out = format!("{position:>3}. [{} {}]", info.label, block.id().short());
    let view = editor_view(block);
    match view.kind {
        BlockKind::Table => render_table(&mut out, &view),
        _ => render_fields(&mut out, &view.fields),
    }
    out
}

fn field_text(field: &FieldView) -> String {
    if field.value.is_empty() {
        format!("({})", field.placeholder)
    } else {
        field.value.clone()
    }
}

fn render_fields(out: &mut String, fields: &[FieldView]) {
    for field in fields {
        match field.mode {
            FieldMode::Toggle => {
                let mark = if field.value == "true" { "[x]" } else { "[ ]" };
                out.push_str(&format!(" {mark}"));
            }
            FieldMode::Display => out.push_str(&format!(" <{}>", field.value)),
            FieldMode::SingleLine => {
                let label = match field.field {
                    Field::Language => "lang: ",
                    Field::Caption => "caption: ",
                    Field::ImageUrl => "url: ",
                    _ => "",
                };
                out.push_str(&format!(" {label}{}", field_text(field)));
            }
            FieldMode::MultiLine { .. } => {
                out.push('\n');
                for line in field_text(field).split('\n') {
                    out.push_str(&format!("       {line}\n"));
                }
                // Multi-line fields already end the entry.
                return;
            }
        }
    }
    out.push('\n');
}

fn render_table(out: &mut String, view: &EditorView) {
    out.push('\n');
    let mut current_row = None;
    for field in &view.fields {
        let Field::Cell { row, col } = field.field else {
            continue;
        };
        if current_row != Some(row) {
            if current_row.is_some() {
                out.push_str(" |\n");
            }
            out.push_str(&format!("       {row}:"));
            current_row = Some(row);
        }
        let sep = if col == 0 { " " } else { " | " };
        out.push_str(&format!("{sep}{}", field.value));
    }
    if current_row.is_some() {
        out.push_str(" |\n");
    }
    let actions: Vec<_> = view.actions.iter().map(|a| a.label()).collect();
    out.push_str(&format!("       ({})\n", actions.join(" · ")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use telos_blocks::{BlockEdit, BlockStore, CodeEdit, TodoEdit};

    #[test]
    fn test_render_todo_line() {
        let mut store = BlockStore::new();
        let id = store.add(BlockKind::Todo).ids()[0];
        store
            .apply_edit(&id, BlockEdit::Todo(TodoEdit::SetContent("journal".into())))
            .unwrap();
        store
            .apply_edit(&id, BlockEdit::Todo(TodoEdit::SetChecked(true)))
            .unwrap();

        let text = render_block(1, store.get_block(&id).unwrap());
        assert!(text.starts_with("  1. [To-do "));
        assert!(text.ends_with(" [x] journal\n"));
    }

    #[test]
    fn test_render_placeholders() {
        let mut store = BlockStore::new();
        let snapshot = store.add(BlockKind::Image);
        let text = render_block(1, &snapshot.blocks()[0]);
        assert!(text.contains("url: (Paste image URL)"));
        assert!(text.contains("caption: (Add a caption...)"));
    }

    #[test]
    fn test_render_code_multiline() {
        let mut store = BlockStore::new();
        let id = store.add(BlockKind::Code).ids()[0];
        store
            .apply_edit(&id, BlockEdit::Code(CodeEdit::SetContent("a\nb".into())))
            .unwrap();
        let text = render_block(1, store.get_block(&id).unwrap());
        assert!(text.contains("lang: (Language)"));
        assert!(text.contains("\n       a\n       b\n"));
    }

    #[test]
    fn test_render_table_grid() {
        let mut store = BlockStore::new();
        let snapshot = store.add(BlockKind::Table);
        let text = render_block(1, &snapshot.blocks()[0]);
        assert!(text.contains("       0:  |  |\n       1:  |  |\n"));
        assert!(text.contains("(Add row · Add column)"));
    }

    #[test]
    fn test_render_empty_document() {
        let store = BlockStore::new();
        let text = render_document("Telos", &store.snapshot());
        assert!(text.starts_with("# Telos\n"));
        assert!(text.contains("(empty"));
        assert!(!text.contains('\u{2014}'));
    }
}
