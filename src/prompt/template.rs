use crate::prompt::styles;
use std::collections::HashMap;
use std::fmt;

/// Width of the longest header word ("Context"); columns never get narrower.
pub const MIN_COLUMN_LEN: usize = 7;
/// Widest column the templates will pad to; wider requests are cut down to this.
pub const MAX_COLUMN_LEN: usize = u16::MAX as usize;

/// A helper callable from a template pipeline.
#[derive(Clone, Copy)]
pub enum TemplateFunc {
    /// Takes a count followed by the text, e.g. `trunc 10`.
    Counted(fn(i64, &str) -> String),
    /// Takes only the text, e.g. `bold`.
    Styled(fn(&str) -> String),
}

impl fmt::Debug for TemplateFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateFunc::Counted(_) => f.write_str("Counted(..)"),
            TemplateFunc::Styled(_) => f.write_str("Styled(..)"),
        }
    }
}

pub type FuncMap = HashMap<&'static str, TemplateFunc>;

/// Templates for one rendering session plus the helpers they reference.
#[derive(Clone, Debug)]
pub struct TableTemplates {
    pub inactive: String,
    pub active: String,
    pub label: String,
    pub funcs: FuncMap,
}

impl TableTemplates {
    /// Applies the named style helper, leaving the text as-is for unknown names.
    pub fn style(&self, name: &str, s: &str) -> String {
        match self.funcs.get(name) {
            Some(TemplateFunc::Styled(f)) => f(s),
            _ => s.to_string(),
        }
    }
}

/// Builds the row and header templates for the picker list.
///
/// With `show_all` every row shows Context, Cluster and File side by side,
/// each padded and cut to `max_column_len` chars, kept within
/// [`MIN_COLUMN_LEN`]..=[`MAX_COLUMN_LEN`].
/// Without it only the context is shown, unpadded.
pub fn new_table_output_templates(max_column_len: usize, show_all: bool) -> TableTemplates {
    let funcs = func_map();

    if !show_all {
        return TableTemplates {
            inactive: single_row("  ", ""),
            active: single_row("▸ ", " | bold | cyan"),
            label: "  Context ".to_string(),
            funcs,
        };
    }

    let width = max_column_len.clamp(MIN_COLUMN_LEN, MAX_COLUMN_LEN);
    // each gap is the column width minus the header word in front of it
    let label = format!(
        "  Context{} | Cluster{} | File{} ",
        " ".repeat(width - 7),
        " ".repeat(width - 7),
        " ".repeat(width - 4),
    );
    TableTemplates {
        inactive: table_row("  ", width, ""),
        active: table_row("▸ ", width, " | bold | cyan"),
        label,
        funcs,
    }
}

fn table_row(prefix: &str, width: usize, style: &str) -> String {
    let columns: Vec<String> = ["Context", "Cluster", "File"]
        .iter()
        .map(|field| format!(r#"{{{{ repeat {width} " " | print .{field} | trunc {width}{style} }}}}"#))
        .collect();
    format!("{prefix}{} |", columns.join(" | "))
}

fn single_row(prefix: &str, style: &str) -> String {
    format!(r#"{prefix}{{{{ repeat 0 " " | print .Context{style} }}}}"#)
}

fn func_map() -> FuncMap {
    let mut funcs = FuncMap::new();
    funcs.insert("trunc", TemplateFunc::Counted(trunc));
    funcs.insert("repeat", TemplateFunc::Counted(repeat));
    funcs.insert("cyan", TemplateFunc::Styled(styles::cyan));
    funcs.insert("bold", TemplateFunc::Styled(styles::bold));
    // faint renders the help line, green the confirmed choice
    funcs.insert("faint", TemplateFunc::Styled(styles::faint));
    funcs.insert("green", TemplateFunc::Styled(styles::green));
    funcs
}

/// First `len` chars of `s`; `s` itself when `len <= 0` or `s` is shorter.
pub fn trunc(len: i64, s: &str) -> String {
    if len <= 0 {
        return s.to_string();
    }
    let len = len as usize;
    match s.char_indices().nth(len) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}

pub fn repeat(count: i64, s: &str) -> String {
    s.repeat(count.max(0) as usize)
}
