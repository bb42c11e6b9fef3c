//! User-facing output of a session action.
//!
//! A `Report` is an ordered list of notices. Renderers decide how each
//! kind looks; the session only decides what is said.

use serde::Serialize;

/// One line of output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Notice {
    Success(String),
    /// Empty results and missing input; the action still completed
    Warning(String),
    Error(String),
    Heading(String),
    Line(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub notices: Vec<Notice>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.notices.push(Notice::Success(text.into()));
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.notices.push(Notice::Warning(text.into()));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notices.push(Notice::Error(text.into()));
    }

    pub fn heading(&mut self, text: impl Into<String>) {
        self.notices.push(Notice::Heading(text.into()));
    }

    pub fn line(&mut self, text: impl Into<String>) {
        self.notices.push(Notice::Line(text.into()));
    }

    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| matches!(n, Notice::Error(_)))
    }

    pub fn has_warnings(&self) -> bool {
        self.notices.iter().any(|n| matches!(n, Notice::Warning(_)))
    }

    /// Move every notice of `other` to the end of this report
    pub fn append(&mut self, mut other: Report) {
        self.notices.append(&mut other.notices);
    }

    /// Text of every `Line` notice, in order
    pub fn lines(&self) -> Vec<&str> {
        self.notices
            .iter()
            .filter_map(|n| match n {
                Notice::Line(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// "Title: <title> | Genres: <genres>"
pub fn movie_line(title: &str, genres: &str) -> String {
    format!("Title: {} | Genres: {}", title, genres)
}
