//! Block editors — one editing strategy per kind.
//!
//! Each editor takes the current payload of its kind plus an edit and returns
//! the next payload; it never touches the document. [`apply_edit`] dispatches
//! on the block's kind and hands the result back for `BlockStore::update`.
//!
//! Editors also describe their affordances ([`EditorView`]) so a rendering
//! layer can draw the right fields without matching on kinds itself.

use crate::{
    Block, BlockError, BlockKind, BlockPayload, CodePayload, DEFAULT_TABLE_COLUMNS,
    ImagePayload, Result, TablePayload, TextPayload, TodoPayload,
};

// ============================================================================
// Edits
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextEdit {
    /// Replace the whole content (one event per keystroke, no diffing).
    SetContent(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoEdit {
    SetChecked(bool),
    SetContent(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageEdit {
    /// Set the image URL. An empty string clears it.
    SetImageUrl(String),
    /// Set the caption. An empty string clears it.
    SetCaption(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeEdit {
    /// Set the language label. An empty string clears it.
    SetLanguage(String),
    SetContent(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableEdit {
    SetCell { row: usize, col: usize, value: String },
    AddRow,
    AddColumn,
}

/// An edit addressed to one kind's editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockEdit {
    Text(TextEdit),
    Todo(TodoEdit),
    Image(ImageEdit),
    Code(CodeEdit),
    Table(TableEdit),
}

impl BlockEdit {
    /// The kind of block this edit is meant for.
    pub fn kind(&self) -> BlockKind {
        match self {
            BlockEdit::Text(_) => BlockKind::Text,
            BlockEdit::Todo(_) => BlockKind::Todo,
            BlockEdit::Image(_) => BlockKind::Image,
            BlockEdit::Code(_) => BlockKind::Code,
            BlockEdit::Table(_) => BlockKind::Table,
        }
    }
}

// ============================================================================
// Views
// ============================================================================

/// Which payload field an affordance edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Content,
    Checked,
    ImageUrl,
    /// The image itself, display-only once a URL is set.
    Image,
    Caption,
    Language,
    Cell { row: usize, col: usize },
}

/// How a field is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMode {
    SingleLine,
    /// Multi-line text area with a suggested visible row count.
    MultiLine { rows: usize },
    Toggle,
    Display,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub mode: FieldMode,
    /// Current value; "true"/"false" for toggles.
    pub value: String,
    pub placeholder: &'static str,
}

impl FieldView {
    fn new(field: Field, mode: FieldMode, value: impl Into<String>, placeholder: &'static str) -> Self {
        Self {
            field,
            mode,
            value: value.into(),
            placeholder,
        }
    }
}

/// Block-level actions beyond field edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorAction {
    AddRow,
    AddColumn,
}

impl EditorAction {
    pub fn label(&self) -> &'static str {
        match self {
            EditorAction::AddRow => "Add row",
            EditorAction::AddColumn => "Add column",
        }
    }

    /// The edit this action sends.
    pub fn edit(&self) -> BlockEdit {
        match self {
            EditorAction::AddRow => BlockEdit::Table(TableEdit::AddRow),
            EditorAction::AddColumn => BlockEdit::Table(TableEdit::AddColumn),
        }
    }
}

/// What an editor shows for one block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorView {
    pub kind: BlockKind,
    pub fields: Vec<FieldView>,
    pub actions: Vec<EditorAction>,
}

/// Visible rows for a multi-line field: one per line, at least `min`.
fn multiline_rows(content: &str, min: usize) -> usize {
    content.split('\n').count().max(min)
}

// ============================================================================
// Editors
// ============================================================================

/// Editing strategy for one block kind.
pub trait BlockEditor {
    /// The kind this editor handles.
    const KIND: BlockKind;
    type Payload;
    type Edit;

    /// Produce the next payload. The input is left untouched.
    fn apply(payload: &Self::Payload, edit: Self::Edit) -> Result<Self::Payload>;

    /// Describe the affordances for `payload`.
    fn view(payload: &Self::Payload) -> EditorView;
}

pub struct TextEditor;

impl BlockEditor for TextEditor {
    const KIND: BlockKind = BlockKind::Text;
    type Payload = TextPayload;
    type Edit = TextEdit;

    fn apply(_payload: &TextPayload, edit: TextEdit) -> Result<TextPayload> {
        match edit {
            TextEdit::SetContent(content) => Ok(TextPayload { content }),
        }
    }

    fn view(payload: &TextPayload) -> EditorView {
        EditorView {
            kind: Self::KIND,
            fields: vec![FieldView::new(
                Field::Content,
                FieldMode::MultiLine {
                    rows: multiline_rows(&payload.content, 1),
                },
                &payload.content,
                "Type something...",
            )],
            actions: Vec::new(),
        }
    }
}

pub struct TodoEditor;

impl BlockEditor for TodoEditor {
    const KIND: BlockKind = BlockKind::Todo;
    type Payload = TodoPayload;
    type Edit = TodoEdit;

    fn apply(payload: &TodoPayload, edit: TodoEdit) -> Result<TodoPayload> {
        let mut next = payload.clone();
        match edit {
            TodoEdit::SetChecked(checked) => next.checked = checked,
            TodoEdit::SetContent(content) => next.content = content,
        }
        Ok(next)
    }

    fn view(payload: &TodoPayload) -> EditorView {
        EditorView {
            kind: Self::KIND,
            fields: vec![
                FieldView::new(Field::Checked, FieldMode::Toggle, payload.checked.to_string(), ""),
                FieldView::new(Field::Content, FieldMode::SingleLine, &payload.content, "To-do item"),
            ],
            actions: Vec::new(),
        }
    }
}

pub struct ImageEditor;

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl BlockEditor for ImageEditor {
    const KIND: BlockKind = BlockKind::Image;
    type Payload = ImagePayload;
    type Edit = ImageEdit;

    fn apply(payload: &ImagePayload, edit: ImageEdit) -> Result<ImagePayload> {
        let mut next = payload.clone();
        match edit {
            ImageEdit::SetImageUrl(url) => next.image_url = non_empty(url),
            ImageEdit::SetCaption(caption) => next.caption = non_empty(caption),
        }
        Ok(next)
    }

    fn view(payload: &ImagePayload) -> EditorView {
        let image = match payload.image_url.as_deref() {
            Some(url) if payload.has_image() => {
                FieldView::new(Field::Image, FieldMode::Display, url, "")
            }
            _ => FieldView::new(Field::ImageUrl, FieldMode::SingleLine, "", "Paste image URL"),
        };
        let caption = FieldView::new(
            Field::Caption,
            FieldMode::SingleLine,
            payload.caption.as_deref().unwrap_or_default(),
            "Add a caption...",
        );
        EditorView {
            kind: Self::KIND,
            fields: vec![image, caption],
            actions: Vec::new(),
        }
    }
}

pub struct CodeEditor;

impl BlockEditor for CodeEditor {
    const KIND: BlockKind = BlockKind::Code;
    type Payload = CodePayload;
    type Edit = CodeEdit;

    fn apply(payload: &CodePayload, edit: CodeEdit) -> Result<CodePayload> {
        let mut next = payload.clone();
        match edit {
            CodeEdit::SetLanguage(language) => next.language = non_empty(language),
            CodeEdit::SetContent(content) => next.content = content,
        }
        Ok(next)
    }

    fn view(payload: &CodePayload) -> EditorView {
        EditorView {
            kind: Self::KIND,
            fields: vec![
                FieldView::new(
                    Field::Language,
                    FieldMode::SingleLine,
                    payload.language.as_deref().unwrap_or_default(),
                    "Language",
                ),
                FieldView::new(
                    Field::Content,
                    FieldMode::MultiLine {
                        rows: multiline_rows(&payload.content, 3),
                    },
                    &payload.content,
                    "Enter code...",
                ),
            ],
            actions: Vec::new(),
        }
    }
}

pub struct TableEditor;

impl BlockEditor for TableEditor {
    const KIND: BlockKind = BlockKind::Table;
    type Payload = TablePayload;
    type Edit = TableEdit;

    fn apply(payload: &TablePayload, edit: TableEdit) -> Result<TablePayload> {
        match edit {
            TableEdit::SetCell { row, col, value } => {
                if payload.cell(row, col).is_none() {
                    return Err(BlockError::CellOutOfBounds {
                        row,
                        col,
                        rows: payload.row_count(),
                        cols: payload.column_count(),
                    });
                }
                let mut rows = payload.rows.clone();
                rows[row][col] = value;
                Ok(TablePayload { rows })
            }
            TableEdit::AddRow => {
                let width = match payload.column_count() {
                    0 => DEFAULT_TABLE_COLUMNS,
                    n => n,
                };
                let mut rows = payload.rows.clone();
                rows.push(vec![String::new(); width]);
                Ok(TablePayload { rows })
            }
            // Rowless tables have nowhere to put a column; they stay rowless.
            TableEdit::AddColumn => {
                let mut rows = payload.rows.clone();
                for row in &mut rows {
                    row.push(String::new());
                }
                Ok(TablePayload { rows })
            }
        }
    }

    fn view(payload: &TablePayload) -> EditorView {
        let fields = payload
            .rows
            .iter()
            .enumerate()
            .flat_map(|(row, cells)| {
                cells.iter().enumerate().map(move |(col, value)| {
                    FieldView::new(Field::Cell { row, col }, FieldMode::SingleLine, value, "")
                })
            })
            .collect();
        EditorView {
            kind: Self::KIND,
            fields,
            actions: vec![EditorAction::AddRow, EditorAction::AddColumn],
        }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Run `edit` through the editor for `block`'s kind and return the new payload.
///
/// An edit meant for another kind is rejected with `EditKindMismatch`.
pub fn apply_edit(block: &Block, edit: BlockEdit) -> Result<BlockPayload> {
    match (block.payload(), edit) {
        (BlockPayload::Text(p), BlockEdit::Text(e)) => TextEditor::apply(p, e).map(Into::into),
        (BlockPayload::Todo(p), BlockEdit::Todo(e)) => TodoEditor::apply(p, e).map(Into::into),
        (BlockPayload::Image(p), BlockEdit::Image(e)) => ImageEditor::apply(p, e).map(Into::into),
        (BlockPayload::Code(p), BlockEdit::Code(e)) => CodeEditor::apply(p, e).map(Into::into),
        (BlockPayload::Table(p), BlockEdit::Table(e)) => TableEditor::apply(p, e).map(Into::into),
        (payload, edit) => Err(BlockError::EditKindMismatch {
            edit: edit.kind(),
            block: payload.kind(),
        }),
    }
}

/// The editor view for `block`.
pub fn editor_view(block: &Block) -> EditorView {
    match block.payload() {
        BlockPayload::Text(p) => TextEditor::view(p),
        BlockPayload::Todo(p) => TodoEditor::view(p),
        BlockPayload::Image(p) => ImageEditor::view(p),
        BlockPayload::Code(p) => CodeEditor::view(p),
        BlockPayload::Table(p) => TableEditor::view(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockId, registry};

    fn table(rows: &[&[&str]]) -> TablePayload {
        TablePayload {
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_text_replaces_content() {
        let next = TextEditor::apply(
            &TextPayload {
                content: "old".into(),
            },
            TextEdit::SetContent("new\nlines".into()),
        )
        .unwrap();
        assert_eq!(next.content, "new\nlines");
        assert_eq!(
            TextEditor::view(&next).fields[0].mode,
            FieldMode::MultiLine { rows: 2 }
        );
    }

    #[test]
    fn test_todo_fields_are_independent() {
        let start = TodoPayload {
            content: "water plants".into(),
            checked: false,
        };
        let checked = TodoEditor::apply(&start, TodoEdit::SetChecked(true)).unwrap();
        assert_eq!(checked.content, "water plants");
        assert!(checked.checked);

        let renamed = TodoEditor::apply(&checked, TodoEdit::SetContent("walk".into())).unwrap();
        assert!(renamed.checked);
        assert_eq!(renamed.content, "walk");
    }

    #[test]
    fn test_image_view_switches_on_url() {
        let empty = ImagePayload::default();
        let view = ImageEditor::view(&empty);
        assert_eq!(view.fields[0].field, Field::ImageUrl);
        assert_eq!(view.fields[0].placeholder, "Paste image URL");

        let set = ImageEditor::apply(&empty, ImageEdit::SetImageUrl("https://x.test/a.png".into())).unwrap();
        let view = ImageEditor::view(&set);
        assert_eq!(view.fields[0].field, Field::Image);
        assert_eq!(view.fields[0].mode, FieldMode::Display);
        assert_eq!(view.fields[1].field, Field::Caption);

        let captioned = ImageEditor::apply(&set, ImageEdit::SetCaption("sunset".into())).unwrap();
        assert_eq!(captioned.image_url, set.image_url);
        assert_eq!(captioned.caption.as_deref(), Some("sunset"));
    }

    #[test]
    fn test_image_empty_url_clears() {
        let set = ImagePayload {
            image_url: Some("https://x.test/a.png".into()),
            caption: None,
        };
        let cleared = ImageEditor::apply(&set, ImageEdit::SetImageUrl(String::new())).unwrap();
        assert_eq!(cleared.image_url, None);
    }

    #[test]
    fn test_code_fields_are_independent() {
        let start = CodePayload {
            content: "fn main() {}".into(),
            language: None,
        };
        let labeled = CodeEditor::apply(&start, CodeEdit::SetLanguage("rust".into())).unwrap();
        assert_eq!(labeled.content, "fn main() {}");
        assert_eq!(labeled.language.as_deref(), Some("rust"));

        let view = CodeEditor::view(&labeled);
        assert_eq!(view.fields[1].mode, FieldMode::MultiLine { rows: 3 });
    }

    #[test]
    fn test_table_add_column_then_row_is_3x3() {
        let grid = TablePayload::default();
        let grid = TableEditor::apply(&grid, TableEdit::AddColumn).unwrap();
        let grid = TableEditor::apply(&grid, TableEdit::AddRow).unwrap();
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.column_count(), 3);
        assert!(grid.is_rectangular());
        assert!(grid.rows.iter().flatten().all(String::is_empty));
    }

    #[test]
    fn test_table_set_cell_changes_only_that_cell() {
        let grid = table(&[&["a", "b"], &["c", "d"], &["e", "f"]]);
        let next = TableEditor::apply(
            &grid,
            TableEdit::SetCell {
                row: 1,
                col: 0,
                value: "X".into(),
            },
        )
        .unwrap();
        assert_eq!(next, table(&[&["a", "b"], &["X", "d"], &["e", "f"]]));
    }

    #[test]
    fn test_table_set_cell_out_of_bounds() {
        let grid = TablePayload::default();
        let err = TableEditor::apply(
            &grid,
            TableEdit::SetCell {
                row: 0,
                col: 2,
                value: "X".into(),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            BlockError::CellOutOfBounds {
                row: 0,
                col: 2,
                rows: 2,
                cols: 2
            }
        );
    }

    #[test]
    fn test_table_rowless_boundaries() {
        let empty = TablePayload { rows: Vec::new() };
        let still_empty = TableEditor::apply(&empty, TableEdit::AddColumn).unwrap();
        assert_eq!(still_empty.row_count(), 0);

        let one_row = TableEditor::apply(&empty, TableEdit::AddRow).unwrap();
        assert_eq!(one_row.rows, vec![vec![String::new(), String::new()]]);
    }

    #[test]
    fn test_table_view_lists_cells_and_actions() {
        let view = TableEditor::view(&TablePayload::default());
        assert_eq!(view.fields.len(), 4);
        assert_eq!(view.fields[3].field, Field::Cell { row: 1, col: 1 });
        assert_eq!(view.actions, vec![EditorAction::AddRow, EditorAction::AddColumn]);
        assert_eq!(view.actions[1].label(), "Add column");
    }

    #[test]
    fn test_dispatch_rejects_mismatched_edit() {
        let block = registry::create_default(BlockKind::Todo, BlockId::new());
        let err = apply_edit(&block, BlockEdit::Text(TextEdit::SetContent("x".into()))).unwrap_err();
        assert_eq!(
            err,
            BlockError::EditKindMismatch {
                edit: BlockKind::Text,
                block: BlockKind::Todo
            }
        );
    }

    #[test]
    fn test_dispatch_view_per_kind() {
        for kind in BlockKind::all() {
            let block = registry::create_default(kind, BlockId::new());
            assert_eq!(editor_view(&block).kind, kind);
        }
    }
}
