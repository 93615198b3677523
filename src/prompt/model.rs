use crate::prompt::engine;
use crate::prompt::filter::fuzzy_filter_konf;
use crate::prompt::template::TableTemplates;
use crate::prompt::Msg;
use crate::store::Metadata;

pub const DEFAULT_PAGE_SIZE: usize = 10;
// label, search line and help line around the list
pub const RESERVED_LINES: usize = 3;

pub const HELP_TEXT: &str = "Use the arrow keys to navigate: ↓ ↑, type to filter";

// Picker state driven by the terminal program
#[derive(Clone, Debug)]
pub struct Picker {
    pub items: Vec<Metadata>,
    pub templates: TableTemplates,
    pub show_all: bool,
    pub search: String,
    // position within the filtered list
    pub cursor: usize,
    // first filtered position shown on screen
    pub offset: usize,
    pub page_size: usize,
    pub max_page_size: usize,
    // index into `items` confirmed with Enter
    pub chosen: Option<usize>,
    pub aborted: bool,
}

impl Picker {
    pub fn new(
        items: Vec<Metadata>,
        templates: TableTemplates,
        show_all: bool,
        page_size: usize,
    ) -> Self {
        let page_size = page_size.max(1);
        Picker {
            items,
            templates,
            show_all,
            search: String::new(),
            cursor: 0,
            offset: 0,
            page_size,
            max_page_size: page_size,
            chosen: None,
            aborted: false,
        }
    }

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::WindowSize { height } => {
                let fits = height.saturating_sub(RESERVED_LINES).max(1);
                self.page_size = usize::min(self.max_page_size, fits);
                self.scroll_to_cursor();
            }
            Msg::KeyUp => {
                self.cursor = self.cursor.saturating_sub(1);
                self.scroll_to_cursor();
            }
            Msg::KeyDown => {
                if self.cursor + 1 < self.filtered().len() {
                    self.cursor += 1;
                }
                self.scroll_to_cursor();
            }
            Msg::KeyEnter => {
                self.chosen = self.filtered().get(self.cursor).copied();
            }
            Msg::KeyEsc => self.aborted = true,
            Msg::KeyBackspace => {
                if self.search.pop().is_some() {
                    self.reset_cursor();
                }
            }
            Msg::Rune(ch) => {
                self.search.push(ch);
                self.reset_cursor();
            }
        }
    }

    /// Indices into `items` that match the current search term, in store order.
    pub fn filtered(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, it)| fuzzy_filter_konf(&self.search, it, self.show_all))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn view(&self) -> String {
        let mut lines = vec![
            self.templates.label.clone(),
            format!("{} {}", self.templates.style("faint", "Search:"), self.search),
        ];
        let filtered = self.filtered();
        for (pos, &idx) in filtered
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.page_size)
        {
            let template = if pos == self.cursor {
                &self.templates.active
            } else {
                &self.templates.inactive
            };
            let row = engine::execute(template, &self.items[idx], &self.templates.funcs)
                .unwrap_or_else(|e| format!("  template error: {e}"));
            lines.push(row);
        }
        if filtered.is_empty() {
            lines.push(self.templates.style("faint", "  no matching contexts"));
        }
        lines.push(self.templates.style("faint", HELP_TEXT));
        lines.join("\n")
    }

    fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.page_size {
            self.offset = self.cursor + 1 - self.page_size;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::template::new_table_output_templates;
    use regex::Regex;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn picker(show_all: bool, page_size: usize) -> Picker {
        let items = vec![
            Metadata::new("dev", "c1", "f1.yaml"),
            Metadata::new("prod", "c2", "f2.yaml"),
            Metadata::new("staging", "c3", "f3.yaml"),
            Metadata::new("dev-eu", "c4", "f4.yaml"),
        ];
        Picker::new(items, new_table_output_templates(10, show_all), show_all, page_size)
    }

    fn type_str(p: &mut Picker, s: &str) {
        for ch in s.chars() {
            p.update(Msg::Rune(ch));
        }
    }

    #[test]
    fn typing_filters_by_context() {
        let mut p = picker(false, 10);
        type_str(&mut p, "dv");
        assert_eq!(p.filtered(), vec![0, 3]);
        p.update(Msg::KeyBackspace);
        assert_eq!(p.search, "d");
        // "staging" has no d, "prod" does
        assert_eq!(p.filtered(), vec![0, 1, 3]);
    }

    #[test]
    fn show_all_filters_across_columns() {
        let mut p = picker(true, 10);
        type_str(&mut p, "f3");
        assert_eq!(p.filtered(), vec![2]);
    }

    #[test]
    fn enter_reports_original_index() {
        let mut p = picker(false, 10);
        type_str(&mut p, "dv");
        p.update(Msg::KeyDown);
        p.update(Msg::KeyEnter);
        assert_eq!(p.chosen, Some(3));
    }

    #[test]
    fn enter_without_matches_chooses_nothing() {
        let mut p = picker(false, 10);
        type_str(&mut p, "zzz");
        p.update(Msg::KeyEnter);
        assert_eq!(p.chosen, None);
        assert!(strip_ansi(&p.view()).contains("no matching contexts"));
    }

    #[test]
    fn cursor_stays_in_bounds_and_resets_on_search() {
        let mut p = picker(false, 10);
        p.update(Msg::KeyUp);
        assert_eq!(p.cursor, 0);
        for _ in 0..10 {
            p.update(Msg::KeyDown);
        }
        assert_eq!(p.cursor, 3);
        p.update(Msg::Rune('p'));
        assert_eq!(p.cursor, 0);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn esc_aborts() {
        let mut p = picker(false, 10);
        p.update(Msg::KeyEsc);
        assert!(p.aborted);
        assert_eq!(p.chosen, None);
    }

    #[test]
    fn view_marks_active_row() {
        let mut p = picker(true, 10);
        p.update(Msg::KeyDown);
        let out = strip_ansi(&p.view());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "  Context    | Cluster    | File       ");
        assert_eq!(lines[1], "Search: ");
        assert_eq!(lines[2], "  dev        | c1         | f1.yaml    |");
        assert_eq!(lines[3], "▸ prod       | c2         | f2.yaml    |");
        assert_eq!(lines.last().copied(), Some(HELP_TEXT));
    }

    #[test]
    fn page_scrolls_with_cursor() {
        let mut p = picker(false, 2);
        p.update(Msg::KeyDown);
        p.update(Msg::KeyDown);
        assert_eq!(p.offset, 1);
        let out = strip_ansi(&p.view());
        let rows: Vec<&str> = out.lines().skip(2).take(2).collect();
        assert_eq!(rows, vec!["  prod", "▸ staging"]);
        p.update(Msg::KeyUp);
        p.update(Msg::KeyUp);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn window_size_limits_page() {
        let mut p = picker(false, 10);
        p.update(Msg::WindowSize { height: 5 });
        assert_eq!(p.page_size, 2);
        p.update(Msg::WindowSize { height: 40 });
        assert_eq!(p.page_size, 10);
    }
}
