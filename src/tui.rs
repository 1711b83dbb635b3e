//! Terminal UI - full-screen test and results pages in raw mode

use crate::notepad::Notepad;
use crate::scoring::{Results, format_time};
use crate::status_bar::StatusBarState;
use crate::view::Page;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use std::io::{self, Write, stdout};
use unicode_width::UnicodeWidthStr;

const NOTES_PLACEHOLDER: &str = "Your scribble notes here...";
const EMPTY_MESSAGE: &str = "No questions available for the selected category.";

/// What a key press means on the test page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Next,
    Previous,
    /// 1-based option position
    Choose(usize),
    ToggleNotes,
    ToggleStyle,
    Quit,
    /// Editing key for the focused notepad
    Edit(KeyEvent),
}

/// Map a key press to an input; `notes_focused` routes typing to the notepad
pub fn map_key(key: KeyEvent, notes_focused: bool) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Input::Quit);
    }
    match key.code {
        KeyCode::Tab => return Some(Input::ToggleNotes),
        KeyCode::F(2) => return Some(Input::ToggleStyle),
        _ => {}
    }

    if notes_focused {
        return match key.code {
            KeyCode::Esc => Some(Input::ToggleNotes),
            _ => Some(Input::Edit(key)),
        };
    }

    match key.code {
        KeyCode::Right | KeyCode::Enter | KeyCode::Char('n') => Some(Input::Next),
        KeyCode::Left | KeyCode::Char('p') => Some(Input::Previous),
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Input::Choose(d as usize)),
        KeyCode::Esc | KeyCode::Char('q') => Some(Input::Quit),
        _ => None,
    }
}

fn header(title: &str, category: &str, width: usize) -> Vec<String> {
    let exam = format!("EXAM CATEGORY: {}", category.to_uppercase());
    let gap = width.saturating_sub(title.width() + exam.width() + 2).max(2);
    vec![
        format!(" \x1b[1;36m{}\x1b[0m{}\x1b[90m{}\x1b[0m", title, " ".repeat(gap), exam),
        format!("\x1b[90m{}\x1b[0m", "─".repeat(width)),
    ]
}

/// Lines for the test route: the current question or the empty placeholder
pub fn render_test_screen(
    title: &str,
    page: &Page<'_>,
    notepad: &Notepad,
    status: &StatusBarState,
    width: usize,
) -> Vec<String> {
    let mut lines = Vec::new();
    match page {
        Page::Empty { category } => {
            lines.extend(header(title, category, width));
            lines.push(String::new());
            lines.push(format!(" {}", EMPTY_MESSAGE));
            lines.push(String::new());
            lines.push(" \x1b[90mq quit\x1b[0m".to_string());
            return lines;
        }
        Page::Submitted => {
            lines.push(" Submitting...".to_string());
            return lines;
        }
        Page::Question {
            category,
            number,
            total,
            text,
            options,
            remaining,
            is_first,
            is_last,
        } => {
            lines.extend(header(title, category, width));
            lines.push(format!(" \x1b[1;33m⏱ {}\x1b[0m", format_time(*remaining)));
            lines.push(String::new());
            lines.push(format!(" \x1b[1mQuestion {} / {}\x1b[0m", number, total));
            lines.push(format!(" {}", text));
            lines.push(String::new());
            for option in options {
                let mark = if option.selected {
                    "\x1b[32m[x]\x1b[0m"
                } else {
                    "[ ]"
                };
                lines.push(format!("   {} {}. {}", mark, option.position, option.value));
            }
            lines.push(String::new());

            let previous = if *is_first {
                "\x1b[90m← Previous\x1b[0m"
            } else {
                "← Previous"
            };
            let next = if *is_last {
                "\x1b[1;32mSubmit ⏎\x1b[0m"
            } else {
                "Next →"
            };
            lines.push(format!(" {}    {}", previous, next));
        }
    }

    lines.push(String::new());
    lines.push(format!("\x1b[90m{}\x1b[0m", "─".repeat(width)));
    lines.push(if status.notes_focused {
        " \x1b[1mNotepad\x1b[0m \x1b[90m(Tab/Esc to leave)\x1b[0m".to_string()
    } else {
        " \x1b[1mNotepad\x1b[0m \x1b[90m(Tab to write)\x1b[0m".to_string()
    });
    if notepad.is_empty() && !status.notes_focused {
        lines.push(format!(" \x1b[90m{}\x1b[0m", NOTES_PLACEHOLDER));
    } else {
        lines.extend(
            notepad
                .lines(status.notes_focused)
                .into_iter()
                .map(|l| format!(" {}", l)),
        );
    }
    lines.push(String::new());
    lines.push(status.render(Some(width)));
    lines.push(
        " \x1b[90m1-9 select · ←/→ move · F2 status style · q quit\x1b[0m".to_string(),
    );
    lines
}

/// Lines for the results route
pub fn render_results_screen(
    title: &str,
    category: &str,
    results: &Results,
    width: usize,
) -> Vec<String> {
    let mut lines = header(title, category, width);
    lines.push(String::new());
    lines.push(" \x1b[1mResults\x1b[0m".to_string());
    lines.push(String::new());
    lines.push(format!("   Score       \x1b[1;36m{}\x1b[0m", results.score));
    lines.push(format!("   Correct     \x1b[32m{}\x1b[0m", results.correct));
    lines.push(format!("   Wrong       \x1b[31m{}\x1b[0m", results.wrong));
    lines.push(format!("   Skipped     \x1b[90m{}\x1b[0m", results.skipped));
    lines.push(format!("   Time taken  {}", results.time_taken));
    lines.push(String::new());
    lines.push(" \x1b[90mPress any key to exit\x1b[0m".to_string());
    lines
}

pub struct Tui;

impl Tui {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }

    pub fn width(&self) -> usize {
        terminal::size().map(|(w, _)| w as usize).unwrap_or(80)
    }

    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        let mut out = stdout();
        queue!(
            out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::All)
        )?;
        for line in lines {
            queue!(
                out,
                crossterm::style::Print(line),
                crossterm::style::Print("\r\n")
            )?;
        }
        out.flush()
    }

    pub fn restore(&self) -> io::Result<()> {
        execute!(stdout(), cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status_bar::StatusDisplayStyle;
    use crate::view::OptionLine;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Strip ANSI colour codes for assertions
    fn plain(line: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in line.chars() {
            match (in_escape, c) {
                (false, '\x1b') => in_escape = true,
                (true, 'm') => in_escape = false,
                (true, _) => {}
                (false, c) => out.push(c),
            }
        }
        out
    }

    #[test]
    fn test_map_key_answering() {
        assert_eq!(map_key(press(KeyCode::Char('3')), false), Some(Input::Choose(3)));
        assert_eq!(map_key(press(KeyCode::Enter), false), Some(Input::Next));
        assert_eq!(map_key(press(KeyCode::Left), false), Some(Input::Previous));
        assert_eq!(map_key(press(KeyCode::Char('q')), false), Some(Input::Quit));
        assert_eq!(map_key(press(KeyCode::Char('0')), false), None);
        assert_eq!(map_key(press(KeyCode::Tab), false), Some(Input::ToggleNotes));
    }

    #[test]
    fn test_map_key_notes_focused() {
        let q = press(KeyCode::Char('q'));
        assert_eq!(map_key(q, true), Some(Input::Edit(q)));
        assert_eq!(map_key(press(KeyCode::Esc), true), Some(Input::ToggleNotes));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, true), Some(Input::Quit));
    }

    #[test]
    fn test_map_key_ignores_release() {
        let mut key = press(KeyCode::Char('1'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key, false), None);
    }

    #[test]
    fn test_render_question() {
        let page = Page::Question {
            category: "cardiology".into(),
            number: 3,
            total: 3,
            text: "Which valve?",
            options: vec![
                OptionLine {
                    position: 1,
                    value: "Aortic",
                    selected: false,
                },
                OptionLine {
                    position: 2,
                    value: "Mitral",
                    selected: true,
                },
            ],
            remaining: 65,
            is_first: false,
            is_last: true,
        };
        let status = StatusBarState::new(StatusDisplayStyle::Text);
        let lines: Vec<String> =
            render_test_screen("CLINICAL SCHOLAR", &page, &Notepad::new(), &status, 60)
                .iter()
                .map(|l| plain(l))
                .collect();

        assert!(lines[0].contains("EXAM CATEGORY: CARDIOLOGY"));
        assert!(lines.iter().any(|l| l.contains("⏱ 01:05")));
        assert!(lines.iter().any(|l| l.contains("Question 3 / 3")));
        assert!(lines.iter().any(|l| l.contains("[ ] 1. Aortic")));
        assert!(lines.iter().any(|l| l.contains("[x] 2. Mitral")));
        assert!(lines.iter().any(|l| l.contains("Submit")));
        assert!(lines.iter().any(|l| l.contains(NOTES_PLACEHOLDER)));
    }

    #[test]
    fn test_render_empty() {
        let page = Page::Empty {
            category: "dermatology".into(),
        };
        let status = StatusBarState::new(StatusDisplayStyle::Emoji);
        let lines = render_test_screen("CLINICAL SCHOLAR", &page, &Notepad::new(), &status, 60);
        assert!(lines.iter().any(|l| l.contains(EMPTY_MESSAGE)));
        assert!(!lines.iter().any(|l| l.contains("Notepad")));
    }

    #[test]
    fn test_render_results() {
        let results = Results {
            score: 10,
            correct: 1,
            wrong: 1,
            skipped: 1,
            time_taken: "00:42".into(),
        };
        let lines: Vec<String> = render_results_screen("CLINICAL SCHOLAR", "cardiology", &results, 60)
            .iter()
            .map(|l| plain(l))
            .collect();
        assert!(lines.iter().any(|l| l.contains("Score       10")));
        assert!(lines.iter().any(|l| l.contains("Time taken  00:42")));
    }
}
