//! Test view - question display, per-question countdown, answer capture and scoring
//!
//! Lifecycle of one attempt: `Loading -> Active(index) -> Submitted`.
//! `Active` moves between neighbouring indices on advance/retreat and ends in
//! `Submitted` on submit. Nothing leaves `Submitted`.
//!
//! The view owns at most one running timer. Any question change drops the
//! current [`TimerGuard`] before starting a new one, and dropping the view
//! drops the guard, so only the newest timer moves the per-question countdown.
//! Ticks already fired by an earlier timer of the same attempt still count
//! towards the elapsed total.

use crate::config::TestConfig;
use crate::context::AppContext;
use crate::countdown::Countdown;
use crate::navigation::{Navigator, Route};
use crate::question::{Question, QuestionSource};
use crate::scoring::{self, Results, UserAnswers};
use crate::timer::{Scheduler, TimerGuard, TimerId};
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Active(usize),
    Submitted,
}

/// One selectable line on the question page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLine<'a> {
    /// 1-based position, the key that selects it
    pub position: usize,
    pub value: &'a str,
    pub selected: bool,
}

/// What the page should show right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page<'a> {
    /// No questions for the category; nothing is interactive
    Empty { category: String },
    Question {
        category: String,
        number: usize,
        total: usize,
        text: &'a str,
        options: Vec<OptionLine<'a>>,
        remaining: u32,
        is_first: bool,
        is_last: bool,
    },
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub remaining: u32,
    pub elapsed: u32,
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    /// Reaching zero has no side effect beyond display
    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

pub struct TestView<S: Scheduler, N: Navigator> {
    context: AppContext,
    scheduler: S,
    navigator: N,
    settings: TestConfig,
    category: Option<String>,
    questions: Vec<Question>,
    answers: UserAnswers,
    phase: Phase,
    countdown: Countdown,
    timer: Option<TimerGuard>,
    /// First timer of the current attempt; ids are handed out in increasing order
    attempt_timer: Option<TimerId>,
}

impl<S: Scheduler, N: Navigator> TestView<S, N> {
    pub fn new(context: AppContext, scheduler: S, navigator: N, settings: TestConfig) -> Self {
        let countdown = Countdown::new(settings.countdown_secs);
        Self {
            context,
            scheduler,
            navigator,
            settings,
            category: None,
            questions: Vec::new(),
            answers: UserAnswers::new(),
            phase: Phase::Loading,
            countdown,
            timer: None,
            attempt_timer: None,
        }
    }

    /// Fetch questions for the context's category if it changed since the last load.
    ///
    /// A reload is a fresh attempt: recorded answers are dropped rather than
    /// carried over to whatever question now sits at the same index.
    pub fn load_questions(&mut self, source: &impl QuestionSource) -> usize {
        if self.phase == Phase::Submitted {
            return self.questions.len();
        }
        let category = self.context.category();
        if self.category.as_deref() == Some(category.as_str()) {
            return self.questions.len();
        }

        let questions = source.fetch(&category);
        info!(
            "Loaded {} questions for category '{}'",
            questions.len(),
            category
        );
        if !self.answers.is_empty() {
            warn!(
                "Discarding {} answered questions from category '{}'",
                self.answers.answered(),
                self.category.as_deref().unwrap_or_default()
            );
        }

        self.answers.clear();
        self.questions = questions;
        self.category = Some(category);
        self.countdown.restart(self.settings.countdown_secs);

        if self.questions.is_empty() {
            self.stop_timer();
            self.attempt_timer = None;
            self.phase = Phase::Loading;
        } else {
            self.phase = Phase::Active(0);
            self.start_timer();
            self.attempt_timer = self.timer.as_ref().map(TimerGuard::id);
        }
        self.questions.len()
    }

    /// Move to the next question; no-op on the last one
    pub fn advance(&mut self) -> bool {
        let Phase::Active(index) = self.phase else {
            return false;
        };
        if index + 1 >= self.questions.len() {
            return false;
        }
        self.show(index + 1);
        true
    }

    /// Move to the previous question; no-op on the first one
    pub fn retreat(&mut self) -> bool {
        let Phase::Active(index) = self.phase else {
            return false;
        };
        if index == 0 {
            return false;
        }
        self.show(index - 1);
        true
    }

    /// Add `value` to the selections for question `index`. Selections are never removed.
    pub fn record_answer(&mut self, index: usize, value: &str) -> bool {
        if !matches!(self.phase, Phase::Active(_)) || index >= self.questions.len() {
            return false;
        }
        let added = self.answers.record(index, value);
        if added {
            debug!("Question {}: selected '{}'", index + 1, value);
        }
        added
    }

    /// Record the option at 1-based `position` of the current question
    pub fn choose(&mut self, position: usize) -> bool {
        let Phase::Active(index) = self.phase else {
            return false;
        };
        let Some(value) = position
            .checked_sub(1)
            .and_then(|i| self.questions[index].options.get(i))
            .map(|o| o.value.clone())
        else {
            return false;
        };
        self.record_answer(index, &value)
    }

    /// Score every question, hand the results to the context and go to the results route
    pub fn submit(&mut self) -> Option<Results> {
        if !matches!(self.phase, Phase::Active(_)) {
            return None;
        }
        self.stop_timer();

        let results = scoring::score_attempt(
            &self.questions,
            &self.answers,
            self.countdown.elapsed(),
            self.settings.points_per_correct,
        );
        info!(
            "Submitted: {} correct, {} wrong, {} skipped, score {} in {}",
            results.correct, results.wrong, results.skipped, results.score, results.time_taken
        );

        self.answers.clear();
        self.phase = Phase::Submitted;
        self.context.set_results(results.clone());
        self.navigator.navigate(Route::Results);
        Some(results)
    }

    /// Apply one tick. Only the current timer moves the per-question countdown;
    /// ticks already fired by earlier timers of this attempt still add elapsed time.
    pub fn on_tick(&mut self, id: TimerId) -> bool {
        if !matches!(self.phase, Phase::Active(_)) {
            return false;
        }
        let current = self.timer.as_ref().map(TimerGuard::id);
        if current == Some(id) {
            self.countdown.tick();
            return true;
        }
        match (self.attempt_timer, current) {
            (Some(first), Some(current)) if id >= first && id < current => {
                self.countdown.add_elapsed();
                true
            }
            _ => false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self, index: usize) -> &[String] {
        self.answers.get(index)
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn elapsed(&self) -> u32 {
        self.countdown.elapsed()
    }

    pub fn is_last(&self) -> bool {
        matches!(self.phase, Phase::Active(i) if i + 1 == self.questions.len())
    }

    pub fn timer_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            remaining: self.countdown.remaining(),
            elapsed: self.countdown.elapsed(),
            answered: self.answers.answered(),
            total: self.questions.len(),
        }
    }

    pub fn page(&self) -> Page<'_> {
        let category = self
            .category
            .clone()
            .unwrap_or_else(|| self.context.category());
        match self.phase {
            Phase::Loading => Page::Empty { category },
            Phase::Submitted => Page::Submitted,
            Phase::Active(index) => {
                let question = &self.questions[index];
                let options = question
                    .options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| OptionLine {
                        position: i + 1,
                        value: &option.value,
                        selected: self.answers.is_selected(index, &option.value),
                    })
                    .collect();
                Page::Question {
                    category,
                    number: index + 1,
                    total: self.questions.len(),
                    text: &question.text,
                    options,
                    remaining: self.countdown.remaining(),
                    is_first: index == 0,
                    is_last: index + 1 == self.questions.len(),
                }
            }
        }
    }

    fn show(&mut self, index: usize) {
        self.phase = Phase::Active(index);
        self.countdown.reset(self.settings.countdown_secs);
        self.start_timer();
    }

    fn start_timer(&mut self) {
        self.stop_timer();
        self.timer = Some(self.scheduler.start(self.settings.tick_period()));
    }

    fn stop_timer(&mut self) {
        self.timer = None;
    }
}
