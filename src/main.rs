mod app;
mod audio;
mod catalog;
mod config;
mod event;
mod session;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use audio::speech::SystemSpeech;
use audio::tone::TerminalTone;
use audio::{NullSpeech, NullTone, SpeechService, ToneService};
use catalog::Catalog;
use config::Config;
use event::{AppEvent, EventHandler};
use session::quiz::{SessionMode, SessionPhase};
use ui::components::learn_card::LearnCard;
use ui::components::option_grid::OptionGrid;
use ui::components::result_panel::ResultPanel;
use ui::components::unit_list::UnitList;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "wordling", version, about = "Terminal vocabulary trainer for kids")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Text-to-speech voice")]
    voice: Option<String>,

    #[arg(short, long, help = "Speech rate multiplier (0.5-2.0)")]
    rate: Option<f32>,

    #[arg(long, help = "Disable speech and tones")]
    no_audio: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("failed to load config")?;
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(voice) = cli.voice {
        config.voice = voice;
    }
    if let Some(rate) = cli.rate {
        config.speech_rate = rate;
    }
    config.validate();

    let catalog = Catalog::load().context("failed to load word catalog")?;

    let audio_on = config.audio_enabled && !cli.no_audio;
    let speech: Box<dyn SpeechService> = if audio_on {
        Box::new(SystemSpeech::new(&config.voice, config.speech_rate))
    } else {
        Box::new(NullSpeech)
    };
    let tone: Box<dyn ToneService> = if audio_on {
        Box::new(TerminalTone)
    } else {
        Box::new(NullTone)
    };

    let mut app = App::new(config, catalog, speech, tone);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Keep the effective settings, CLI overrides included, for next launch
    let _ = app.config.save();

    if let Err(err) = result {
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
            AppEvent::Tick(now) => app.tick(now),
            AppEvent::Resize => {}
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

    match app.screen {
        AppScreen::MainMenu => handle_menu_key(app, key),
        AppScreen::UnitSelect => handle_unit_select_key(app, key),
        AppScreen::Learn => handle_learn_key(app, key),
        AppScreen::Exercise => handle_exercise_key(app, key),
        AppScreen::Result => handle_result_key(app, key),
    }
}

fn handle_menu_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.choose_mode(SessionMode::Learn),
        KeyCode::Char('2') => app.choose_mode(SessionMode::Exercise),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.choose_mode(SessionMode::Learn),
            1 => app.choose_mode(SessionMode::Exercise),
            2 => app.should_quit = true,
            _ => {}
        },
        _ => {}
    }
}

fn handle_unit_select_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Back to the menu; the chosen mode is kept
        KeyCode::Esc | KeyCode::Char('q') => app.screen = AppScreen::MainMenu,
        KeyCode::Up | KeyCode::Char('k') => app.select_prev_unit(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_unit(),
        KeyCode::Enter | KeyCode::Char(' ') => app.start_session(),
        _ => {}
    }
}

fn handle_learn_key(app: &mut App, key: KeyEvent) {
    let celebrating = app
        .session
        .as_ref()
        .is_some_and(|s| s.phase() == SessionPhase::Celebration);
    if celebrating {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.go_home(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_home(),
        KeyCode::Left | KeyCode::Char('h') => app.learn_previous(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') | KeyCode::Enter => {
            app.learn_next()
        }
        KeyCode::Char('r') => app.replay(),
        _ => {}
    }
}

fn handle_exercise_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_home(),
        KeyCode::Char(ch @ '1'..='8') => {
            let index = ch as usize - '1' as usize;
            app.submit_option(index);
        }
        KeyCode::Char('r') => app.replay(),
        _ => {}
    }
}

fn handle_result_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.retry(),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => app.go_home(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::MainMenu => render_menu(frame, app),
        AppScreen::UnitSelect => render_unit_select(frame, app),
        AppScreen::Learn => render_learn(frame, app),
        AppScreen::Exercise => render_exercise(frame, app),
        AppScreen::Result => render_result(frame, app),
    }
}

fn header_line(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " wordling ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.to_string(),
            Style::default().fg(colors.pending()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn footer_line(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hints: &str) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(Line::from(Span::styled(
        hints.to_string(),
        Style::default().fg(colors.pending()),
    )));
    frame.render_widget(footer, area);
}

fn render_menu(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    header_line(frame, app, layout[0], "");
    let menu_area = ui::layout::centered_rect(50, 80, layout[1]);
    frame.render_widget(&app.menu, menu_area);
    footer_line(frame, app, layout[2], " [1] Learn  [2] Quiz  [q] Quit ");
}

fn render_unit_select(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    let mode_name = match app.app_mode {
        SessionMode::Learn => "Learn",
        SessionMode::Exercise => "Quiz",
    };
    header_line(frame, app, layout.header, &format!("| {mode_name}"));

    let list_area = ui::layout::centered_rect(60, 90, layout.main);
    let list = UnitList::new(
        app.catalog.units(),
        app.unit_selected,
        app.app_mode == SessionMode::Exercise,
        app.theme,
    );
    frame.render_widget(list, list_area);

    footer_line(
        frame,
        app,
        layout.footer,
        " [↑/↓] Choose  [Enter] Start  [Esc] Back ",
    );
}

fn render_learn(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    if let Some(ref session) = app.session {
        header_line(frame, app, layout.header, "| Learn");

        let card_area = ui::layout::centered_rect(60, 90, layout.main);
        frame.render_widget(LearnCard::new(session, app.theme), card_area);

        let hints = if session.phase() == SessionPhase::Celebration {
            " [Enter] Home "
        } else {
            " [←/→] Cards  [r] Hear again  [Esc] Home "
        };
        footer_line(frame, app, layout.footer, hints);
    }
}

fn render_exercise(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    if let Some(ref session) = app.session {
        header_line(frame, app, layout.header, "| Quiz");
        frame.render_widget(OptionGrid::new(session, app.theme), layout.main);
        let hints = exercise_hints(session.options().len());
        footer_line(frame, app, layout.footer, &hints);
    }
}

/// The answer-key hint tracks how many options are actually on screen.
fn exercise_hints(option_count: usize) -> String {
    format!(" [1-{option_count}] Answer  [r] Hear again  [Esc] Home ")
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    if let Some(ref session) = app.session {
        header_line(frame, app, layout.header, "| Result");
        let panel_area = ui::layout::centered_rect(50, 80, layout.main);
        frame.render_widget(ResultPanel::new(session, app.theme), panel_area);
        footer_line(frame, app, layout.footer, " [r] Play again  [Enter] Home ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_hints_track_option_count() {
        assert!(exercise_hints(4).contains("[1-4]"));
        assert!(exercise_hints(8).contains("[1-8]"));
    }
}
