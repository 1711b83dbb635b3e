//! Question source - question records and the per-category question bank

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN_BANK: &str = include_str!("../assets/questions.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub id: u32,
    pub value: String,
}

impl QuizOption {
    pub fn new(id: u32, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }
}

/// A single question; its identity is its position in the loaded sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<QuizOption>,
    pub correct_option: u32,
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<QuizOption>, correct_option: u32) -> Self {
        Self {
            text: text.into(),
            options,
            correct_option,
        }
    }

    /// Display value of the designated correct option, if the id resolves
    pub fn correct_value(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.id == self.correct_option)
            .map(|o| o.value.as_str())
    }
}

/// Anything that can produce the ordered questions for a category
pub trait QuestionSource {
    fn fetch(&self, category: &str) -> Vec<Question>;
}

/// In-memory bank of questions keyed by lowercase category
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    categories: BTreeMap<String, Vec<Question>>,
}

impl QuestionBank {
    /// Bank shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_BANK).context("Built-in question bank is malformed")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read question bank {}", path.display()))?;
        Self::from_json(&raw)
            .with_context(|| format!("Failed to parse question bank {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: BTreeMap<String, Vec<Question>> = serde_json::from_str(raw)?;
        let mut bank = Self::default();
        for (category, questions) in parsed {
            bank.insert(&category, questions);
        }
        Ok(bank)
    }

    /// Add questions to a category, appending to any already present
    pub fn insert(&mut self, category: &str, questions: Vec<Question>) {
        self.categories
            .entry(normalize(category))
            .or_default()
            .extend(questions);
    }

    /// Categories with their question counts, sorted by name
    pub fn categories(&self) -> Vec<(&str, usize)> {
        self.categories
            .iter()
            .map(|(name, questions)| (name.as_str(), questions.len()))
            .collect()
    }
}

impl QuestionSource for QuestionBank {
    fn fetch(&self, category: &str) -> Vec<Question> {
        self.categories
            .get(&normalize(category))
            .cloned()
            .unwrap_or_default()
    }
}

fn normalize(category: &str) -> String {
    category.trim().to_lowercase()
}
