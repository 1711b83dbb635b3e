//! Render a single screen to stdout without a live timer, for eyeballing layouts

use crate::config::Config;
use crate::context::AppContext;
use crate::events::{AppEvent, Events};
use crate::navigation::Router;
use crate::notepad::Notepad;
use crate::question::QuestionBank;
use crate::status_bar::StatusBarState;
use crate::timer::VirtualClock;
use crate::tui;
use crate::view::TestView;
use anyhow::{Result, bail};

pub const SCENES: [&str; 3] = ["question", "empty", "results"];

pub fn run(scene: &str, config: &Config, bank: &QuestionBank, category: &str) -> Result<()> {
    let lines = render(scene, config, bank, category, 72)?;
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

pub fn render(
    scene: &str,
    config: &Config,
    bank: &QuestionBank,
    category: &str,
    width: usize,
) -> Result<Vec<String>> {
    let (events, rx) = Events::new();
    let clock = VirtualClock::new(events);
    let context = match scene {
        "empty" => AppContext::new(""),
        _ => AppContext::new(category),
    };
    let mut view = TestView::new(
        context,
        clock.clone(),
        Router::new(),
        config.test.clone(),
    );
    view.load_questions(bank);

    // A few seconds in with the first option picked
    clock.advance(config.test.tick_period() * 12);
    for event in rx.try_iter() {
        if let AppEvent::Tick(id) = event {
            view.on_tick(id);
        }
    }
    view.choose(1);

    let lines = match scene {
        "question" | "empty" => {
            let mut status = StatusBarState::new(config.ui.status_style.into());
            status.progress = view.progress();
            tui::render_test_screen(&config.ui.title, &view.page(), &Notepad::new(), &status, width)
        }
        "results" => {
            let Some(results) = view.submit() else {
                bail!("No questions for category '{}', nothing to submit", category);
            };
            tui::render_results_screen(&config.ui.title, category, &results, width)
        }
        other => bail!(
            "Unknown scene '{}', expected one of: {}",
            other,
            SCENES.join(", ")
        ),
    };
    Ok(lines)
}
