use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::audio::{SpeechService, ToneOutcome, ToneService};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::session::karaoke::{KaraokeEvent, KaraokeSequence};
use crate::session::quiz::{AnswerState, Session, SessionMode, SessionPhase, WordSource};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    MainMenu,
    UnitSelect,
    Learn,
    Exercise,
    Result,
}

/// The one outstanding playback schedule, if any. Owning it here means
/// teardown is a drop: a canceled sequence has no way left to fire.
struct ActiveKaraoke {
    seq: KaraokeSequence,
    started: Instant,
}

pub struct App {
    pub screen: AppScreen,
    pub app_mode: SessionMode,
    pub session: Option<Session>,
    pub catalog: Catalog,
    pub config: Config,
    pub theme: &'static Theme,
    pub menu: Menu<'static>,
    pub unit_selected: usize,
    pub should_quit: bool,
    karaoke: Option<ActiveKaraoke>,
    speech: Box<dyn SpeechService>,
    tone: Box<dyn ToneService>,
    rng: SmallRng,
}

impl App {
    pub fn new(
        config: Config,
        catalog: Catalog,
        speech: Box<dyn SpeechService>,
        tone: Box<dyn ToneService>,
    ) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        Self {
            screen: AppScreen::MainMenu,
            app_mode: SessionMode::Learn,
            session: None,
            catalog,
            config,
            theme,
            menu,
            unit_selected: 0,
            should_quit: false,
            karaoke: None,
            speech,
            tone,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Pick learn or exercise at the main menu. The choice sticks until the
    /// main menu changes it again; going back to unit selection keeps it.
    pub fn choose_mode(&mut self, mode: SessionMode) {
        self.app_mode = mode;
        self.unit_selected = 0;
        self.screen = AppScreen::UnitSelect;
    }

    /// Rows on the unit-select screen: every unit, plus the all-units
    /// challenge row in exercise mode.
    pub fn unit_rows(&self) -> usize {
        let extra = if self.app_mode == SessionMode::Exercise { 1 } else { 0 };
        self.catalog.units().len() + extra
    }

    pub fn select_next_unit(&mut self) {
        self.unit_selected = (self.unit_selected + 1) % self.unit_rows().max(1);
    }

    pub fn select_prev_unit(&mut self) {
        let rows = self.unit_rows().max(1);
        self.unit_selected = (self.unit_selected + rows - 1) % rows;
    }

    fn selected_source(&self) -> Option<WordSource> {
        let units = self.catalog.units();
        if self.unit_selected < units.len() {
            Some(WordSource::Unit(units[self.unit_selected].id))
        } else if self.app_mode == SessionMode::Exercise {
            Some(WordSource::AllUnits)
        } else {
            None
        }
    }

    pub fn start_session(&mut self) {
        if let Some(source) = self.selected_source() {
            self.start_session_from(source, self.app_mode);
        }
    }

    /// Restart with the same source and mode (result-screen "play again").
    pub fn retry(&mut self) {
        if let Some(session) = &self.session {
            let (source, mode) = (session.source, session.mode);
            self.start_session_from(source, mode);
        }
    }

    fn start_session_from(&mut self, source: WordSource, mode: SessionMode) {
        let Some(session) = Session::start(
            source,
            mode,
            &self.catalog,
            self.config.quiz_settings(),
            &mut self.rng,
        ) else {
            return;
        };
        self.cancel_playback();
        self.speech.speak(&session.current().text);
        self.screen = match mode {
            SessionMode::Learn => AppScreen::Learn,
            SessionMode::Exercise => AppScreen::Exercise,
        };
        self.session = Some(session);
    }

    /// Answer the active question with the option at display position
    /// `index`. Out-of-range picks and repeat submissions fall through
    /// silently; an accepted answer plays the outcome tone and schedules
    /// the karaoke sequence for the correct word — after a wrong guess too,
    /// so the learner still hears the right reading.
    pub fn submit_option(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(option) = session.options().get(index) else {
            return;
        };
        let option_id = option.id.clone();
        let Some(outcome) = session.submit(&option_id) else {
            return;
        };

        self.tone.play(match outcome {
            AnswerState::Correct => ToneOutcome::Correct,
            _ => ToneOutcome::Incorrect,
        });

        let generation = session.generation();
        let text = session.current().text.clone();
        self.speech.cancel();
        self.karaoke = Some(ActiveKaraoke {
            seq: KaraokeSequence::new(&text, self.config.karaoke_timing(), generation),
            started: Instant::now(),
        });
    }

    pub fn learn_next(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.advance(&mut self.rng) {
            SessionPhase::Active => self.speech.speak(&session.current().text),
            SessionPhase::Celebration => self.speech.cancel(),
            SessionPhase::Complete => {}
        }
    }

    pub fn learn_previous(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let before = session.position();
        session.previous();
        if session.position() != before {
            self.speech.speak(&session.current().text);
        }
    }

    /// Speak the current word again on demand.
    pub fn replay(&mut self) {
        if let Some(session) = &self.session {
            if session.phase() == SessionPhase::Active {
                self.speech.speak(&session.current().text);
            }
        }
    }

    /// Reachable from every screen: tear the session down, cancel every
    /// pending timer and in-flight utterance, back to the main menu.
    pub fn go_home(&mut self) {
        self.cancel_playback();
        self.session = None;
        self.screen = AppScreen::MainMenu;
    }

    fn cancel_playback(&mut self) {
        self.karaoke = None;
        self.speech.cancel();
    }

    /// Heartbeat from the event pump, stamped with the instant it fired.
    /// Polls the active karaoke schedule against that clock and applies
    /// whatever came due.
    pub fn tick(&mut self, now: Instant) {
        let Some(active) = self.karaoke.as_mut() else {
            return;
        };
        let elapsed = now.saturating_duration_since(active.started).as_millis() as u64;
        let generation = active.seq.generation();
        let events = active.seq.poll(elapsed);
        if !events.is_empty() {
            self.apply_karaoke_events(generation, events);
        }
    }

    /// Apply due playback events. A firing that outlived its question — the
    /// session was torn down or has moved on — is discarded whole; stale
    /// timers never mutate state they were not scheduled for.
    pub fn apply_karaoke_events(&mut self, generation: u64, events: Vec<KaraokeEvent>) {
        let Some(session) = self.session.as_mut() else {
            self.karaoke = None;
            return;
        };
        if session.generation() != generation {
            self.karaoke = None;
            return;
        }

        for event in events {
            match event {
                KaraokeEvent::Step { index, unit } => {
                    session.set_highlight(Some(index));
                    self.speech.speak(&unit);
                }
                KaraokeEvent::Complete => {
                    self.karaoke = None;
                    if session.mode == SessionMode::Exercise {
                        match session.advance(&mut self.rng) {
                            SessionPhase::Complete => {
                                self.speech.cancel();
                                self.screen = AppScreen::Result;
                            }
                            SessionPhase::Active => {
                                self.speech.speak(&session.current().text);
                            }
                            SessionPhase::Celebration => {}
                        }
                    }
                }
            }
        }
    }

    pub fn karaoke_active(&self) -> bool {
        self.karaoke.is_some()
    }
}
