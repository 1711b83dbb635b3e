use scholar::config::Config;
use scholar::context::AppContext;
use scholar::events::{AppEvent, Events};
use scholar::navigation::{Navigator, Route, Router};
use scholar::notepad::Notepad;
use scholar::preview;
use scholar::question::QuestionBank;
use scholar::status_bar::StatusBarState;
use scholar::timer::TokioScheduler;
use scholar::tui::{self, Input, Tui};
use scholar::view::TestView;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scholar")]
struct Cli {
    /// Exam category to load
    #[arg(short, long)]
    category: Option<String>,

    /// Config file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON question bank to use instead of the built-in one
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Print the results as JSON after the test
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List the available categories
    Categories,
    /// Render one screen without running the timer (question, empty, results)
    Preview {
        #[arg(default_value = "question")]
        scene: String,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let bank_path = cli
        .questions
        .clone()
        .or_else(|| config.questions.path.as_ref().map(PathBuf::from));
    let bank = match bank_path {
        Some(path) => QuestionBank::from_file(&path)?,
        None => QuestionBank::builtin()?,
    };

    let category = cli
        .category
        .clone()
        .unwrap_or_else(|| config.questions.default_category.clone());

    match cli.command {
        Some(Command::Categories) => {
            for (name, count) in bank.categories() {
                println!("{} ({} questions)", name, count);
            }
            Ok(())
        }
        Some(Command::Preview { scene }) => preview::run(&scene, &config, &bank, &category),
        None => run_test(&config, &bank, &category, cli.json).await,
    }
}

async fn run_test(config: &Config, bank: &QuestionBank, category: &str, json: bool) -> Result<()> {
    let context = AppContext::new(category);
    let (events, events_rx) = Events::new();
    let mut view = TestView::new(
        context.clone(),
        TokioScheduler::new(events.clone()),
        events,
        config.test.clone(),
    );
    view.load_questions(bank);

    let mut router = Router::new();
    let mut notepad = Notepad::new();
    let mut status = StatusBarState::new(config.ui.status_style.into());
    let mut term_events = EventStream::new();
    let mut tui = Tui::new().context("Failed to set up terminal")?;

    loop {
        status.progress = view.progress();
        let lines =
            tui::render_test_screen(&config.ui.title, &view.page(), &notepad, &status, tui.width());
        tui.draw(&lines)?;

        tokio::select! {
            Ok(event) = events_rx.recv_async() => match event {
                AppEvent::Tick(id) => {
                    if view.on_tick(id) {
                        status.update_spinner();
                    }
                }
                AppEvent::Navigate(route) => router.navigate(route),
            },

            Some(term_event) = term_events.next() => {
                let Event::Key(key) = term_event? else {
                    continue;
                };
                let Some(input) = tui::map_key(key, status.notes_focused) else {
                    continue;
                };
                match input {
                    Input::Next => {
                        if view.is_last() {
                            view.submit();
                        } else {
                            view.advance();
                        }
                    }
                    Input::Previous => {
                        view.retreat();
                    }
                    Input::Choose(position) => {
                        view.choose(position);
                    }
                    Input::ToggleNotes => status.notes_focused = !status.notes_focused,
                    Input::ToggleStyle => {
                        status.toggle_display_style();
                        log::debug!("Status style: {}", status.display_style.name());
                    }
                    Input::Edit(key) => {
                        notepad.handle_key(key);
                    }
                    Input::Quit => break,
                }
            }

            else => break,
        }

        if router.current() == Route::Results {
            break;
        }
    }
    drop(view);

    let results = context.results();
    match &results {
        Some(results) => {
            let lines = tui::render_results_screen(
                &config.ui.title,
                &context.category(),
                results,
                tui.width(),
            );
            tui.draw(&lines)?;
            while let Some(event) = term_events.next().await {
                if let Event::Key(key) = event? {
                    if key.kind == KeyEventKind::Press {
                        break;
                    }
                }
            }
        }
        None => log::info!("Exited without submitting"),
    }
    drop(tui);

    save_notes(config, &notepad)?;

    if json {
        if let Some(results) = results {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
    }
    Ok(())
}

fn save_notes(config: &Config, notepad: &Notepad) -> Result<()> {
    let Some(path) = &config.ui.notes_path else {
        return Ok(());
    };
    if notepad.is_empty() {
        return Ok(());
    }
    fs::write(path, notepad.text()).with_context(|| format!("Failed to write notes to {}", path))?;
    log::info!("Notes saved to {}", path);
    Ok(())
}
