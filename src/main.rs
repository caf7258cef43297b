mod app;
mod event;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use rust_i18n::t;

use combicards::config::Config;
use combicards::content::{Category, ContentStore, Dataset, Difficulty};
use combicards::engine::filter::{FilterUpdate, Selection};
use combicards::logging;
use combicards::session::Outcome;

use app::{App, AppScreen, FlashKind};
use event::{AppEvent, EventHandler};
use ui::components::filter_panel::FilterPanel;
use ui::components::flashcard::Flashcard;
use ui::components::progress_bar::DeckProgress;
use ui::components::quiz_panel::QuizPanel;
use ui::components::stats_panel::StatsPanel;
use ui::layout::{Popup, ScreenLayout, pack_hints};
use ui::theme::Theme;

rust_i18n::i18n!("locales", fallback = "en");

#[derive(Parser)]
#[command(
    name = "combicards",
    version,
    about = "Terminal flashcards and exam questions for combinatorics"
)]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Interface language (en, pt-BR)")]
    locale: Option<String>,

    #[arg(long, help = "Directory with cards.json and questions.json")]
    data_dir: Option<String>,

    #[arg(long, help = "Base URL serving cards.json and questions.json")]
    url: Option<String>,

    #[arg(short, long, help = "Start filtered to one category")]
    category: Option<Selection<Category>>,

    #[arg(short, long, help = "Start filtered to one difficulty")]
    difficulty: Option<Selection<Difficulty>>,

    #[arg(short, long, help = "Start with a search term")]
    search: Option<String>,

    #[arg(long, help = "Open the exam questions first")]
    quiz: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = logging::default_log_path();
    if let Err(e) = logging::init_file(&log_path) {
        eprintln!("logging disabled: {e}");
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        log::warn!("config unreadable, using defaults: {e}");
        Config::default()
    });
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    if let Some(url) = cli.url {
        config.data_url = Some(url);
    }
    let locales = rust_i18n::available_locales!();
    config.validate(&Theme::available_themes(), &locales);
    rust_i18n::set_locale(&config.locale);

    let theme: &'static Theme = Box::leak(Box::new(Theme::load(&config.theme).unwrap_or_default()));
    let content = ContentStore::new(config.dataset_source());
    log::info!("starting with theme {} and locale {}", theme.name, config.locale);

    let events = EventHandler::new(Duration::from_millis(100));
    let mut app = App::new(config, theme, content, events.sender());

    app.set_initial_filter(FilterUpdate {
        category: cli.category,
        difficulty: cli.difficulty,
        tags: None,
        search: cli.search,
    });

    app.start_load(Dataset::Cards);
    if cli.quiz {
        app.go_to(AppScreen::Quiz);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        log::error!("{err:?}");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::Loaded(loaded) => app.on_loaded(loaded),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.search_input.is_some() {
        handle_search_key(app, key);
        return;
    }

    match app.screen {
        AppScreen::Flashcards => handle_flashcard_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Filters => handle_filter_key(app, key),
        AppScreen::Stats => match key.code {
            KeyCode::Esc | KeyCode::Char('t') | KeyCode::Char('q') => app.back(),
            _ => {}
        },
        AppScreen::Help => app.back(),
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.close_search(true),
        KeyCode::Esc => app.close_search(false),
        KeyCode::Backspace => app.search_pop(),
        KeyCode::Char(ch) => app.search_push(ch),
        _ => {}
    }
}

/// Keys shared by the two main screens.
fn handle_common_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Tab => app.toggle_mode(),
        KeyCode::Char('t') => app.go_to(AppScreen::Stats),
        KeyCode::Char('?') => app.go_to(AppScreen::Help),
        KeyCode::Char('R') => app.retry(),
        KeyCode::Char('w') => app.save_config(),
        _ => return false,
    }
    true
}

fn handle_flashcard_key(app: &mut App, key: KeyEvent) {
    if handle_common_key(app, key) {
        return;
    }
    match key.code {
        KeyCode::Right | KeyCode::Char('l') => app.study.next(),
        KeyCode::Left | KeyCode::Char('h') => app.study.previous(),
        KeyCode::Char(' ') => app.study.flip(),
        KeyCode::Char('r') => app.study.random(),
        KeyCode::Char('s') => app.study.toggle_study_mode(),
        KeyCode::Char('z') => app.study.reset_stats(),
        KeyCode::Char('v') => app.study.toggle_reverse(),
        KeyCode::Char('x') => app.shuffle(),
        KeyCode::Char('e') => {
            if app.study.current_card().is_some() {
                app.show_explanation = !app.show_explanation;
            }
        }
        KeyCode::Char('1') => app.record(Outcome::Correct),
        KeyCode::Char('2') => app.record(Outcome::Incorrect),
        KeyCode::Char('3') => app.record(Outcome::Skipped),
        KeyCode::Char('/') => app.open_search(),
        KeyCode::Char('f') => app.go_to(AppScreen::Filters),
        KeyCode::Char('c') => app.clear_filters(),
        _ => {}
    }
    app.process_changes();
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    if handle_common_key(app, key) {
        return;
    }
    let quiz = &mut app.quiz;
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => quiz.select_next_option(),
        KeyCode::Up => quiz.select_previous_option(),
        KeyCode::Char(ch @ '1'..='8') => {
            quiz.select(ch as usize - '1' as usize);
        }
        KeyCode::Enter => {
            if let Some(feedback) = quiz.submit() {
                log::debug!("quiz answer correct={}", feedback.is_correct);
            }
        }
        KeyCode::Char('k') => quiz.skip(),
        KeyCode::Right | KeyCode::Char('n') => quiz.next(),
        KeyCode::Left | KeyCode::Char('p') => quiz.previous(),
        KeyCode::Char('r') => quiz.random(),
        _ => {}
    }
}

fn handle_filter_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => app.back(),
        KeyCode::Down | KeyCode::Char('j') => app.filter_cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => app.filter_cursor_up(),
        KeyCode::Right | KeyCode::Char('l') => app.filter_change(true),
        KeyCode::Left | KeyCode::Char('h') => app.filter_change(false),
        KeyCode::Enter | KeyCode::Char(' ') => app.filter_change(true),
        KeyCode::Char('c') => app.clear_filters(),
        KeyCode::Char('/') => app.open_search(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = ScreenLayout::new(area, app.base_screen != AppScreen::Quiz);
    render_header(frame, app, layout.header);

    match app.base_screen {
        AppScreen::Quiz => {
            frame.render_widget(QuizPanel::new(&app.quiz, app.questions_loading, app.theme), layout.content);
            if let Some(sidebar) = layout.sidebar {
                let view = app.study.view();
                frame.render_widget(StatsPanel::full(view, app.quiz.tally(), app.theme), sidebar);
            }
        }
        _ => render_flashcards(frame, app, &layout),
    }

    render_footer(frame, app, layout.footer);

    match app.screen {
        AppScreen::Filters => {
            let popup = Popup::Filters.area(area);
            frame.render_widget(Clear, popup);
            frame.render_widget(FilterPanel::new(app.study.view(), app.filter_cursor, app.theme), popup);
        }
        AppScreen::Stats => {
            let popup = Popup::Stats.area(area);
            frame.render_widget(Clear, popup);
            frame.render_widget(StatsPanel::full(app.study.view(), app.quiz.tally(), app.theme), popup);
        }
        AppScreen::Help => render_help(frame, app, area),
        AppScreen::Flashcards | AppScreen::Quiz => {}
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let view = app.study.view();

    let screen_name = match app.base_screen {
        AppScreen::Quiz => t!("screen.quiz"),
        _ => t!("screen.flashcards"),
    };
    let mut info = vec![format!(" {screen_name}")];
    if app.base_screen == AppScreen::Flashcards {
        if let Some(pos) = view.position {
            info.push(t!("status.card", current = pos + 1, total = view.filtered).into_owned());
        }
        if view.filtered != view.total {
            info.push(t!("status.filtered", count = view.filtered, total = view.total).into_owned());
        }
        if view.reversed {
            info.push(t!("status.reversed").into_owned());
        }
        if view.study_mode {
            info.push(t!("status.study").into_owned());
        }
        if !view.filter.search.is_empty() {
            info.push(t!("status.search", text = view.filter.search.as_str()).into_owned());
        }
    }

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", t!("app.title")),
            Style::default()
                .fg(colors.bg())
                .bg(colors.accent())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.join(" | "),
            Style::default().fg(colors.header_fg()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_flashcards(frame: &mut ratatui::Frame, app: &App, layout: &ScreenLayout) {
    let view = app.study.view();

    if let Some(bar) = layout.progress {
        let current = view.position.map_or(0, |p| p + 1);
        frame.render_widget(DeckProgress::new(t!("stats.deck"), current, view.filtered, app.theme), bar);
    }

    frame.render_widget(Flashcard::new(view, app.show_explanation, app.theme), layout.content);

    if let Some(sidebar) = layout.sidebar {
        frame.render_widget(StatsPanel::sidebar(view, app.theme), sidebar);
    }
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;

    if let Some(input) = &app.search_input {
        let lines = vec![
            Line::from(vec![
                Span::styled(" / ", Style::default().fg(colors.accent())),
                Span::styled(format!("{input}█"), Style::default().fg(colors.fg())),
            ]),
            Line::styled(format!(" {}", t!("hints.search_edit")), Style::default().fg(colors.text_dim())),
        ];
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    if let Some(flash) = &app.flash {
        let color = match flash.kind {
            FlashKind::Info => colors.accent(),
            FlashKind::Success => colors.success(),
            FlashKind::Error => colors.error(),
        };
        frame.render_widget(
            Paragraph::new(Line::styled(format!(" {}", flash.text), Style::default().fg(color))),
            area,
        );
        return;
    }

    let keys: Vec<&str> = match app.screen {
        AppScreen::Quiz => vec![
            "select", "submit", "skip", "navigate", "random", "switch", "stats", "help", "quit",
        ],
        AppScreen::Filters => vec!["select", "cycle", "toggle", "clear", "search", "back"],
        AppScreen::Stats | AppScreen::Help => vec!["back"],
        AppScreen::Flashcards => vec![
            "navigate", "flip", "random", "explanation", "study", "shuffle", "reverse", "search",
            "filters", "stats", "switch", "help", "quit",
        ],
    };
    let hints: Vec<String> = keys.iter().map(|k| hint(k)).collect();
    let lines: Vec<Line> = pack_hints(&hints, area.width as usize)
        .into_iter()
        .take(area.height as usize)
        .map(|l| Line::styled(l, Style::default().fg(colors.text_dim())))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn hint(key: &str) -> String {
    match key {
        "navigate" => t!("hints.navigate"),
        "flip" => t!("hints.flip"),
        "random" => t!("hints.random"),
        "shuffle" => t!("hints.shuffle"),
        "reverse" => t!("hints.reverse"),
        "explanation" => t!("hints.explanation"),
        "study" => t!("hints.study"),
        "search" => t!("hints.search"),
        "filters" => t!("hints.filters"),
        "stats" => t!("hints.stats"),
        "switch" => t!("hints.switch"),
        "help" => t!("hints.help"),
        "quit" => t!("hints.quit"),
        "back" => t!("hints.back"),
        "select" => t!("hints.select"),
        "submit" => t!("hints.submit"),
        "skip" => t!("hints.skip"),
        "toggle" => t!("hints.toggle"),
        "cycle" => t!("hints.cycle"),
        "clear" => t!("hints.clear"),
        _ => return String::new(),
    }
    .into_owned()
}

fn render_help(frame: &mut ratatui::Frame, app: &App, area: Rect) {
    let colors = &app.theme.colors;
    let popup = Popup::Help.area(area);
    frame.render_widget(Clear, popup);

    let entries = [
        t!("help.navigate"),
        t!("help.flip"),
        t!("help.random"),
        t!("help.shuffle"),
        t!("help.reverse"),
        t!("help.explanation"),
        t!("help.study"),
        t!("help.rate"),
        t!("help.reset"),
        t!("help.search"),
        t!("help.filters"),
        t!("help.stats"),
        t!("help.switch"),
        t!("help.retry"),
        t!("help.save"),
        t!("help.quit"),
    ];
    let lines: Vec<Line> = entries
        .into_iter()
        .map(|e| Line::styled(format!(" {e}"), Style::default().fg(colors.fg())))
        .collect();
    let block = Block::bordered()
        .title(format!(" {} ", t!("help.title")))
        .border_style(Style::default().fg(colors.border_focused()));
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        popup,
    );
}
