use std::io::{self, Stdout, Write};

use colored::Colorize;
use crossterm::{
    cursor,
    event::KeyCode,
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::navigation::{map_key_code, navigation_loop, NavKey};
use crate::cli::output::OutputPreferences;
use crate::cli::table::{horizontal_rule, visible_width};
use crate::cli::views::{accounts_table, ViewSettings};
use crate::domain::account::AccountId;
use crate::tree::{render, AccountNode, ExpansionSet, Row};

const HIGHLIGHT: &str = "> ";
const NORMAL: &str = "  ";
const FOOTER_HINT: &str =
    "↑ ↓ move, → expand, ← collapse, Enter toggles or selects, Esc quits.";
const PLAIN_FOOTER_HINT: &str =
    "Up/Down move, Right expand, Left collapse, Enter toggle/select, Esc quit.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseResult {
    Selected(AccountId),
    Closed,
    Empty,
}

/// Keyboard driven view over an account forest.
///
/// Owns the expansion state; the forest itself is only borrowed and never
/// changes while browsing.
pub struct TreeBrowser<'a> {
    forest: &'a [AccountNode],
    expansion: ExpansionSet,
    cursor: usize,
}

impl<'a> TreeBrowser<'a> {
    pub fn new(forest: &'a [AccountNode]) -> Self {
        Self::with_expansion(forest, ExpansionSet::new())
    }

    pub fn with_expansion(forest: &'a [AccountNode], expansion: ExpansionSet) -> Self {
        Self {
            forest,
            expansion,
            cursor: 0,
        }
    }

    pub fn rows(&self) -> Vec<Row> {
        render(self.forest, &self.expansion)
    }

    pub fn expansion(&self) -> &ExpansionSet {
        &self.expansion
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Applies one key. Returns the outcome once browsing ends.
    fn step(&mut self, key: NavKey) -> Option<BrowseResult> {
        let rows = self.rows();
        if rows.is_empty() {
            return Some(BrowseResult::Empty);
        }
        let len = rows.len();
        self.cursor = self.cursor.min(len - 1);
        let current = &rows[self.cursor];

        match key {
            NavKey::Up => self.cursor = self.cursor.checked_sub(1).unwrap_or(len - 1),
            NavKey::Down => self.cursor = (self.cursor + 1) % len,
            NavKey::Home => self.cursor = 0,
            NavKey::End => self.cursor = len - 1,
            NavKey::Right => {
                if current.has_children {
                    self.expansion.expand(&current.id);
                }
            }
            NavKey::Left => {
                if current.expanded {
                    self.expansion.collapse(&current.id);
                } else if let Some(parent) = parent_row(&rows, self.cursor) {
                    self.cursor = parent;
                }
            }
            NavKey::Char(' ') => {
                if current.has_children {
                    self.expansion.toggle(&current.id);
                }
            }
            NavKey::Enter => {
                if current.has_children {
                    self.expansion.toggle(&current.id);
                } else {
                    return Some(BrowseResult::Selected(current.id.clone()));
                }
            }
            NavKey::Esc | NavKey::Char('q') => return Some(BrowseResult::Closed),
            _ => {}
        }
        None
    }

    pub fn run(&mut self, settings: &ViewSettings, prefs: &OutputPreferences) -> BrowseResult {
        if self.forest.is_empty() {
            return BrowseResult::Empty;
        }

        if terminal::enable_raw_mode().is_err() {
            return BrowseResult::Closed;
        }

        let mut stdout = io::stdout();
        let cursor_hidden = stdout.execute(cursor::Hide).is_ok();
        let mut drawn_lines: u16 = 0;

        let result = loop {
            let mut render_error = None;
            let key = navigation_loop(|| {
                match self.draw(&mut stdout, settings, prefs, drawn_lines) {
                    Ok(lines) => drawn_lines = lines,
                    Err(err) => render_error = Some(err),
                }
            });
            if let Some(err) = render_error {
                tracing::warn!("tree browser stopped drawing: {}", err);
                break BrowseResult::Closed;
            }
            if let Some(outcome) = self.step(key) {
                break outcome;
            }
        };

        if cursor_hidden {
            stdout.execute(cursor::Show).ok();
        }
        terminal::disable_raw_mode().ok();
        result
    }

    fn draw(
        &self,
        stdout: &mut Stdout,
        settings: &ViewSettings,
        prefs: &OutputPreferences,
        previous: u16,
    ) -> io::Result<u16> {
        if previous > 0 {
            stdout.execute(cursor::MoveToPreviousLine(previous))?;
        }
        stdout.execute(cursor::MoveToColumn(0))?;
        stdout.execute(terminal::Clear(ClearType::FromCursorDown))?;

        let lines = self.render_with_highlight(settings, prefs);
        let width = lines.iter().map(|line| visible_width(line)).max().unwrap_or(0);
        let hint = if prefs.plain_mode {
            PLAIN_FOOTER_HINT
        } else {
            FOOTER_HINT
        };
        let rule_char = if prefs.plain_mode { "-" } else { "─" };

        for line in &lines {
            write!(stdout, "{}\r\n", line)?;
        }
        write!(stdout, "{}\r\n", rule_char.repeat(width.max(visible_width(hint))))?;
        write!(stdout, "{}\r\n", hint)?;
        stdout.flush()?;
        Ok(u16::try_from(lines.len() + 2).unwrap_or(u16::MAX))
    }

    fn render_with_highlight(
        &self,
        settings: &ViewSettings,
        prefs: &OutputPreferences,
    ) -> Vec<String> {
        let table = accounts_table(&self.rows(), settings, prefs);
        let widths = table.compute_widths();
        let headers: Vec<String> = table
            .columns
            .iter()
            .map(|column| column.header.to_uppercase())
            .collect();

        let mut lines = vec![
            format!("{}{}", NORMAL, table.render_row(&headers, &widths)),
            format!("{}{}", NORMAL, horizontal_rule(&widths, table.padding)),
        ];
        for (idx, row) in table.rows.iter().enumerate() {
            let content = table.render_row(row, &widths);
            if idx == self.cursor {
                let line = format!("{}{}", HIGHLIGHT, content);
                if prefs.use_color() {
                    lines.push(line.reversed().to_string());
                } else {
                    lines.push(line);
                }
            } else {
                lines.push(format!("{}{}", NORMAL, content));
            }
        }
        lines
    }

    /// Feeds `keys` through the same state machine as [`TreeBrowser::run`],
    /// without a terminal.
    pub fn run_simulated(&mut self, keys: &[KeyCode]) -> BrowseResult {
        if self.forest.is_empty() {
            return BrowseResult::Empty;
        }
        for key in keys {
            if let Some(outcome) = self.step(map_key_code(*key)) {
                return outcome;
            }
        }
        BrowseResult::Closed
    }
}

/// Index of the closest row above `index` that sits one level higher.
fn parent_row(rows: &[Row], index: usize) -> Option<usize> {
    let depth = rows[index].depth;
    if depth == 0 {
        return None;
    }
    rows[..index].iter().rposition(|row| row.depth + 1 == depth)
}
