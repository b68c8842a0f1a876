//! Editing session: parses command lines and drives the block store.

use std::io::Write;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use telos_blocks::{
    BlockEdit, BlockId, BlockKind, BlockStore, CodeEdit, DocumentSnapshot, ImageEdit, TableEdit,
    TextEdit, TodoEdit, catalog, registry::PICKER_HEADING, resolve_block_prefix,
};

use crate::config::Config;
use crate::render::render_document;

pub const HELP: &str = "\
commands:
  list                          show the document
  kinds                         list block kinds
  add <kind>                    append a block (text, todo, image, code, table)
  rm <ref>                      remove a block
  mv <ref> <ref>                move the first block to where the second one is
  set <ref> <field> <value>     set content | url | caption | lang (\\n for newline)
  check <ref> | uncheck <ref>   toggle a to-do
  cell <ref> <row> <col> <val>  edit a table cell (0-based)
  addrow <ref> | addcol <ref>   grow a table
  json                          print the document as JSON
  help | quit
<ref> is a 1-based position (any number) or a prefix of the block id.";

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Kinds,
    Add(BlockKind),
    Remove(String),
    Move(String, String),
    Set {
        target: String,
        field: String,
        value: String,
    },
    Check(String, bool),
    Cell {
        target: String,
        row: usize,
        col: usize,
        value: String,
    },
    AddRow(String),
    AddColumn(String),
    Json,
    Help,
    Quit,
}

fn one_arg(args: &[&str], usage: &str) -> Result<String> {
    match args {
        [arg] => Ok(arg.to_string()),
        _ => bail!("usage: {usage}"),
    }
}

/// The text after the first `n` words, with its inner spacing kept.
fn after_words(line: &str, n: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..n {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}

fn unescape(value: &str) -> String {
    value.replace("\\n", "\n")
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            bail!("empty command");
        };
        let args: Vec<&str> = words.collect();
        let command = match verb {
            "list" | "ls" => Command::List,
            "kinds" => Command::Kinds,
            "add" => {
                let kind = one_arg(&args, "add <kind>")?;
                Command::Add(
                    BlockKind::from_str(&kind).ok_or_else(|| anyhow!("unknown block kind '{kind}'"))?,
                )
            }
            "rm" | "remove" => Command::Remove(one_arg(&args, "rm <ref>")?),
            "mv" | "move" => match args.as_slice() {
                [source, target] => Command::Move(source.to_string(), target.to_string()),
                _ => bail!("usage: mv <ref> <ref>"),
            },
            "set" => match args.as_slice() {
                [target, field, ..] => Command::Set {
                    target: target.to_string(),
                    field: field.to_string(),
                    value: unescape(after_words(line, 3)),
                },
                _ => bail!("usage: set <ref> <field> <value>"),
            },
            "check" => Command::Check(one_arg(&args, "check <ref>")?, true),
            "uncheck" => Command::Check(one_arg(&args, "uncheck <ref>")?, false),
            "cell" => match args.as_slice() {
                [target, row, col, rest @ ..] => Command::Cell {
                    target: target.to_string(),
                    row: row.parse().context("row must be a number")?,
                    col: col.parse().context("column must be a number")?,
                    value: unescape(&rest.join(" ")),
                },
                _ => bail!("usage: cell <ref> <row> <col> <value>"),
            },
            "addrow" => Command::AddRow(one_arg(&args, "addrow <ref>")?),
            "addcol" => Command::AddColumn(one_arg(&args, "addcol <ref>")?),
            "json" => Command::Json,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => bail!("unknown command '{other}' (try `help`)"),
        };
        Ok(command)
    }
}

/// Map a `set` field name to the edit for a block of `kind`.
pub fn field_edit(kind: BlockKind, field: &str, value: String) -> Result<BlockEdit> {
    let edit = match (kind, field) {
        (BlockKind::Text, "content" | "text") => BlockEdit::Text(TextEdit::SetContent(value)),
        (BlockKind::Todo, "content" | "text") => BlockEdit::Todo(TodoEdit::SetContent(value)),
        (BlockKind::Image, "url") => BlockEdit::Image(ImageEdit::SetImageUrl(value)),
        (BlockKind::Image, "caption") => BlockEdit::Image(ImageEdit::SetCaption(value)),
        (BlockKind::Code, "lang" | "language") => BlockEdit::Code(CodeEdit::SetLanguage(value)),
        (BlockKind::Code, "content" | "code") => BlockEdit::Code(CodeEdit::SetContent(value)),
        (kind, field) => bail!("{kind} blocks have no field '{field}'"),
    };
    Ok(edit)
}

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub struct Session {
    title: String,
    store: BlockStore,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let store = if config.welcome {
            BlockStore::with_welcome()
        } else {
            BlockStore::new()
        };
        tracing::info!(document = %store.document_id(), blocks = store.block_count(), "session started");
        Self {
            title: config.title.clone(),
            store,
        }
    }

    pub fn snapshot(&self) -> DocumentSnapshot {
        self.store.snapshot()
    }

    /// Resolve a block reference: a number is a 1-based position, anything
    /// else an id prefix.
    fn resolve(&self, reference: &str) -> Result<BlockId> {
        let snapshot = self.store.snapshot();
        if let Ok(n) = reference.trim_start_matches('#').parse::<usize>() {
            return match n.checked_sub(1).and_then(|i| snapshot.blocks().get(i)) {
                Some(block) => Ok(block.id()),
                None => bail!("no block at position {n}"),
            };
        }
        Ok(resolve_block_prefix(snapshot.ids().into_iter(), reference)?)
    }

    fn kind_of(&self, id: &BlockId) -> Result<BlockKind> {
        self.store
            .get_block(id)
            .map(|b| b.kind())
            .ok_or_else(|| anyhow!("block {} not found", id.short()))
    }

    fn edit(&mut self, reference: &str, edit: BlockEdit) -> Result<DocumentSnapshot> {
        let id = self.resolve(reference)?;
        Ok(self.store.apply_edit(&id, edit)?)
    }

    /// Run one command, writing its output to `out`.
    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<Outcome> {
        tracing::debug!(?command, "execute");
        let changed = match command {
            Command::List => Some(self.store.snapshot()),
            Command::Kinds => {
                writeln!(out, "{PICKER_HEADING}")?;
                for (kind, info) in catalog() {
                    writeln!(out, "  {:<6} {:<6} ({})", kind.as_str(), info.label, info.icon)?;
                }
                None
            }
            Command::Add(kind) => Some(self.store.add(kind)),
            Command::Remove(reference) => {
                let id = self.resolve(&reference)?;
                Some(self.store.remove(&id))
            }
            Command::Move(source, target) => {
                let source = self.resolve(&source)?;
                let target = self.resolve(&target)?;
                Some(self.store.move_block(&source, &target))
            }
            Command::Set {
                target,
                field,
                value,
            } => {
                let id = self.resolve(&target)?;
                let edit = field_edit(self.kind_of(&id)?, &field, value)?;
                Some(self.store.apply_edit(&id, edit)?)
            }
            Command::Check(target, checked) => {
                Some(self.edit(&target, BlockEdit::Todo(TodoEdit::SetChecked(checked)))?)
            }
            Command::Cell {
                target,
                row,
                col,
                value,
            } => Some(self.edit(&target, BlockEdit::Table(TableEdit::SetCell { row, col, value }))?),
            Command::AddRow(target) => Some(self.edit(&target, BlockEdit::Table(TableEdit::AddRow))?),
            Command::AddColumn(target) => {
                Some(self.edit(&target, BlockEdit::Table(TableEdit::AddColumn))?)
            }
            Command::Json => {
                writeln!(out, "{}", self.store.snapshot().to_json()?)?;
                None
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                None
            }
            Command::Quit => return Ok(Outcome::Quit),
        };
        if let Some(snapshot) = changed {
            write!(out, "{}", render_document(&self.title, &snapshot))?;
        }
        Ok(Outcome::Continue)
    }

    /// Parse and run one input line. Blank lines and `//` comments are skipped.
    pub fn execute_line(&mut self, line: &str, out: &mut impl Write) -> Result<Outcome> {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") {
            return Ok(Outcome::Continue);
        }
        let command: Command = line.parse()?;
        self.execute(command, out)
    }
}
