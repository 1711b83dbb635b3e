//! Shared test context - selected category and the results of the last attempt
//!
//! Handed to the test view at construction instead of being looked up globally.
//! Everything runs on one logical thread, so a `Rc<RefCell<_>>` is enough.

use crate::scoring::Results;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct ContextState {
    category: String,
    results: Option<Results>,
}

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    inner: Rc<RefCell<ContextState>>,
}

impl AppContext {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ContextState {
                category: category.into(),
                results: None,
            })),
        }
    }

    pub fn category(&self) -> String {
        self.inner.borrow().category.clone()
    }

    pub fn set_category(&self, category: impl Into<String>) {
        self.inner.borrow_mut().category = category.into();
    }

    pub fn set_results(&self, results: Results) {
        self.inner.borrow_mut().results = Some(results);
    }

    pub fn results(&self) -> Option<Results> {
        self.inner.borrow().results.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let context = AppContext::new("cardiology");
        let other = context.clone();
        other.set_category("neurology");
        assert_eq!(context.category(), "neurology");

        assert!(context.results().is_none());
        other.set_results(Results {
            score: 10,
            correct: 1,
            wrong: 0,
            skipped: 0,
            time_taken: "00:03".into(),
        });
        assert_eq!(context.results().map(|r| r.score), Some(10));
    }
}
