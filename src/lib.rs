//! Timed multiple-choice exam in the terminal
//!
//! A [`view::TestView`] loads the questions for the category held in an
//! [`context::AppContext`], runs a per-question countdown through a
//! [`timer::Scheduler`], records answers and, on submit, writes
//! [`scoring::Results`] back into the context before asking its
//! [`navigation::Navigator`] for the results route.

pub mod config;
pub mod context;
pub mod countdown;
pub mod events;
pub mod navigation;
pub mod notepad;
pub mod preview;
pub mod question;
pub mod scoring;
pub mod status_bar;
pub mod timer;
pub mod tui;
pub mod view;
