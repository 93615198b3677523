// Prompt module root: filtering, templates and the selection runner live in `prompt/`

pub mod engine;
pub mod filter;
pub mod model;
pub mod run;
pub mod styles;
pub mod template;
pub mod widget;

pub use filter::{fuzzy_filter_konf, fuzzy_match};
pub use model::Picker;
pub use run::{PromptError, Select, SelectError, Selection, terminal};
pub use template::{FuncMap, TableTemplates, TemplateFunc, new_table_output_templates};
pub use widget::TerminalSelect;

// Messages driving the picker
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    WindowSize { height: usize },
    KeyUp,
    KeyDown,
    KeyEnter,
    KeyEsc,
    KeyBackspace,
    Rune(char),
}
