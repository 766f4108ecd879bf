use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::{Catalog, WordEntry};
use crate::session::{sampler, score};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    Learn,
    Exercise,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerState {
    Unanswered,
    Correct,
    Incorrect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Active,
    /// Learn mode reached the end of the unit; stay on screen and cheer.
    Celebration,
    /// Exercise run finished; the caller moves to the result view.
    Complete,
}

/// Word-source strategy, chosen when the session starts: one unit in
/// catalog order, or the whole catalog pooled together (the challenge run).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordSource {
    Unit(u32),
    AllUnits,
}

#[derive(Clone, Copy, Debug)]
pub struct QuizSettings {
    pub distractor_count: usize,
    pub quiz_length: usize,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            distractor_count: 3,
            quiz_length: 10,
        }
    }
}

/// Transient run state for one learn or exercise pass. Created on entry to
/// a session screen, mutated only through the methods below, dropped on
/// navigation home. Pending playback timers are owned elsewhere; the
/// `generation` counter here is what lets their stale firings be detected.
pub struct Session {
    pub mode: SessionMode,
    pub source: WordSource,
    words: Vec<WordEntry>,
    pool: Vec<WordEntry>,
    position: usize,
    score: usize,
    options: Vec<WordEntry>,
    answer_state: AnswerState,
    phase: SessionPhase,
    missed: Vec<WordEntry>,
    chosen: Option<String>,
    highlight: Option<usize>,
    generation: u64,
    settings: QuizSettings,
}

impl Session {
    /// Returns None if the source resolves to an unknown unit or an empty
    /// word list. Learn keeps the unit's order; exercise shuffles the pool
    /// uniformly and caps the run at `quiz_length` questions, drawing
    /// options for the first question immediately.
    pub fn start<R: Rng>(
        source: WordSource,
        mode: SessionMode,
        catalog: &Catalog,
        settings: QuizSettings,
        rng: &mut R,
    ) -> Option<Self> {
        let pool = match source {
            WordSource::Unit(id) => catalog.unit(id)?.words.clone(),
            WordSource::AllUnits => catalog.all_words(),
        };
        if pool.is_empty() {
            return None;
        }

        let words = match mode {
            SessionMode::Learn => pool.clone(),
            SessionMode::Exercise => {
                let mut words = pool.clone();
                words.shuffle(rng);
                words.truncate(settings.quiz_length.max(1));
                words
            }
        };

        let mut session = Self {
            mode,
            source,
            words,
            pool,
            position: 0,
            score: 0,
            options: Vec::new(),
            answer_state: AnswerState::Unanswered,
            phase: SessionPhase::Active,
            missed: Vec::new(),
            chosen: None,
            highlight: None,
            generation: 0,
            settings,
        };
        if mode == SessionMode::Exercise {
            session.draw_options(rng);
        }
        Some(session)
    }

    pub fn current(&self) -> &WordEntry {
        &self.words[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn options(&self) -> &[WordEntry] {
        &self.options
    }

    pub fn answer_state(&self) -> AnswerState {
        self.answer_state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn missed(&self) -> &[WordEntry] {
        &self.missed
    }

    /// Id of the option picked for the active question, once answered.
    pub fn chosen(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn set_highlight(&mut self, index: Option<usize>) {
        self.highlight = index;
    }

    /// Monotonic question counter; bumped whenever `position` moves or the
    /// run ends, so playback scheduled for an earlier question can be told
    /// apart from the live one.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stars(&self) -> u8 {
        score::stars(self.score, self.words.len())
    }

    /// Evaluate an answer for the active question. Returns the resulting
    /// state, or None if the submission was ignored: learn mode, a finished
    /// run, or a question that was already answered (at most one scored
    /// attempt per question).
    pub fn submit(&mut self, option_id: &str) -> Option<AnswerState> {
        if self.mode != SessionMode::Exercise
            || self.phase != SessionPhase::Active
            || self.answer_state != AnswerState::Unanswered
        {
            return None;
        }

        self.chosen = Some(option_id.to_string());
        if option_id == self.current().id {
            self.score += 1;
            self.answer_state = AnswerState::Correct;
        } else {
            self.answer_state = AnswerState::Incorrect;
            let current = self.current().clone();
            self.missed.push(current);
        }
        Some(self.answer_state)
    }

    /// Move to the next question, or end the run when the last index is
    /// active: learn celebrates in place, exercise completes. The score is
    /// never touched here.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> SessionPhase {
        if self.phase != SessionPhase::Active {
            return self.phase;
        }
        self.generation += 1;
        self.highlight = None;

        if self.position + 1 >= self.words.len() {
            self.phase = match self.mode {
                SessionMode::Learn => SessionPhase::Celebration,
                SessionMode::Exercise => SessionPhase::Complete,
            };
            return self.phase;
        }

        self.position += 1;
        self.answer_state = AnswerState::Unanswered;
        self.chosen = None;
        if self.mode == SessionMode::Exercise {
            self.draw_options(rng);
        }
        SessionPhase::Active
    }

    /// Step back one card. Learn mode only — exercise answers are not
    /// revisitable.
    pub fn previous(&mut self) {
        if self.mode != SessionMode::Learn
            || self.phase != SessionPhase::Active
            || self.position == 0
        {
            return;
        }
        self.generation += 1;
        self.highlight = None;
        self.position -= 1;
    }

    fn draw_options<R: Rng>(&mut self, rng: &mut R) {
        let correct = self.words[self.position].clone();
        self.options =
            sampler::sample_options(&correct, &self.pool, self.settings.distractor_count, rng);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn catalog() -> Catalog {
        let json = r##"{"units": [
            {"id": 1, "title": "動物", "icon": "🐾", "color": "#fff", "words": [
                {"id": "dog", "text": "狗", "emoji": "🐶"},
                {"id": "cat", "text": "貓", "emoji": "🐱"},
                {"id": "fish", "text": "魚", "emoji": "🐟"},
                {"id": "bird", "text": "小鳥", "emoji": "🐦"}
            ]},
            {"id": 2, "title": "水果", "icon": "🍎", "color": "#fff", "words": [
                {"id": "apple", "text": "蘋果", "emoji": "🍎"},
                {"id": "banana", "text": "香蕉", "emoji": "🍌"}
            ]}
        ]}"##;
        Catalog::from_json(json).unwrap()
    }

    fn exercise() -> (Session, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(7);
        let session = Session::start(
            WordSource::Unit(1),
            SessionMode::Exercise,
            &catalog(),
            QuizSettings::default(),
            &mut rng,
        )
        .unwrap();
        (session, rng)
    }

    #[test]
    fn test_start_unknown_unit_is_none() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert!(
            Session::start(
                WordSource::Unit(99),
                SessionMode::Learn,
                &catalog(),
                QuizSettings::default(),
                &mut rng,
            )
            .is_none()
        );
    }

    #[test]
    fn test_learn_keeps_catalog_order() {
        let mut rng = SmallRng::seed_from_u64(0);
        let session = Session::start(
            WordSource::Unit(1),
            SessionMode::Learn,
            &catalog(),
            QuizSettings::default(),
            &mut rng,
        )
        .unwrap();
        let ids: Vec<&str> = (0..session.len()).map(|i| session.words[i].id.as_str()).collect();
        assert_eq!(ids, vec!["dog", "cat", "fish", "bird"]);
        assert!(session.options().is_empty());
    }

    #[test]
    fn test_exercise_caps_at_quiz_length() {
        let mut rng = SmallRng::seed_from_u64(0);
        let settings = QuizSettings {
            distractor_count: 3,
            quiz_length: 2,
        };
        let session = Session::start(
            WordSource::Unit(1),
            SessionMode::Exercise,
            &catalog(),
            settings,
            &mut rng,
        )
        .unwrap();
        assert_eq!(session.len(), 2);
    }

    #[test]
    fn test_options_always_contain_exactly_one_correct() {
        let (mut session, mut rng) = exercise();
        loop {
            let correct = session.current().id.clone();
            let hits = session
                .options()
                .iter()
                .filter(|w| w.id == correct)
                .count();
            assert_eq!(hits, 1);
            // min(distractors + 1, pool size): unit 1 has 4 words
            assert_eq!(session.options().len(), 4);

            session.submit(&correct);
            if session.advance(&mut rng) != SessionPhase::Active {
                break;
            }
        }
    }

    #[test]
    fn test_correct_submit_scores_once() {
        let (mut session, _rng) = exercise();
        let correct = session.current().id.clone();
        assert_eq!(session.submit(&correct), Some(AnswerState::Correct));
        assert_eq!(session.score(), 1);
        assert_eq!(session.chosen(), Some(correct.as_str()));

        // Second submission for the same question is ignored
        assert_eq!(session.submit(&correct), None);
        assert_eq!(session.submit("dog"), None);
        assert_eq!(session.score(), 1);
        assert!(session.missed().is_empty());
    }

    #[test]
    fn test_incorrect_submit_records_missed_entry() {
        let (mut session, _rng) = exercise();
        let correct = session.current().clone();
        let wrong = session
            .options()
            .iter()
            .find(|w| w.id != correct.id)
            .unwrap()
            .id
            .clone();

        assert_eq!(session.submit(&wrong), Some(AnswerState::Incorrect));
        assert_eq!(session.score(), 0);
        assert_eq!(session.missed(), &[correct]);

        // No second attempt
        assert_eq!(session.submit(&wrong), None);
        assert_eq!(session.missed().len(), 1);
    }

    #[test]
    fn test_advance_resets_answer_state_and_bumps_generation() {
        let (mut session, mut rng) = exercise();
        let correct = session.current().id.clone();
        session.submit(&correct);
        session.set_highlight(Some(0));
        let generation = session.generation();

        assert_eq!(session.advance(&mut rng), SessionPhase::Active);
        assert_eq!(session.position(), 1);
        assert_eq!(session.answer_state(), AnswerState::Unanswered);
        assert_eq!(session.chosen(), None);
        assert_eq!(session.highlight(), None);
        assert_eq!(session.generation(), generation + 1);
    }

    #[test]
    fn test_advance_past_last_completes_without_touching_score() {
        let (mut session, mut rng) = exercise();
        for _ in 0..session.len() {
            let correct = session.current().id.clone();
            session.submit(&correct);
            session.advance(&mut rng);
        }
        assert_eq!(session.phase(), SessionPhase::Complete);
        assert_eq!(session.score(), 4);
        assert_eq!(session.stars(), 3);

        // Advancing a finished session stays terminal and does not panic
        assert_eq!(session.advance(&mut rng), SessionPhase::Complete);
        assert_eq!(session.score(), 4);
    }

    #[test]
    fn test_submit_after_complete_ignored() {
        let (mut session, mut rng) = exercise();
        for _ in 0..session.len() {
            let correct = session.current().id.clone();
            session.submit(&correct);
            session.advance(&mut rng);
        }
        assert_eq!(session.submit("dog"), None);
    }

    #[test]
    fn test_learn_ends_in_celebration() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut session = Session::start(
            WordSource::Unit(2),
            SessionMode::Learn,
            &catalog(),
            QuizSettings::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(session.advance(&mut rng), SessionPhase::Active);
        assert_eq!(session.advance(&mut rng), SessionPhase::Celebration);
        // Learn runs are never scored
        assert_eq!(session.score(), 0);
        assert_eq!(session.stars(), 0);
    }

    #[test]
    fn test_previous_learn_only() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut session = Session::start(
            WordSource::Unit(1),
            SessionMode::Learn,
            &catalog(),
            QuizSettings::default(),
            &mut rng,
        )
        .unwrap();
        session.previous(); // at 0: saturates
        assert_eq!(session.position(), 0);
        session.advance(&mut rng);
        session.previous();
        assert_eq!(session.position(), 0);

        let (mut exercise, mut rng) = exercise();
        exercise.advance(&mut rng);
        let position = exercise.position();
        exercise.previous(); // exercise: no-op
        assert_eq!(exercise.position(), position);
    }

    #[test]
    fn test_submit_ignored_in_learn_mode() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut session = Session::start(
            WordSource::Unit(1),
            SessionMode::Learn,
            &catalog(),
            QuizSettings::default(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(session.submit("dog"), None);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_all_units_pool_spans_catalog() {
        let mut rng = SmallRng::seed_from_u64(9);
        let settings = QuizSettings {
            distractor_count: 3,
            quiz_length: 6,
        };
        let session = Session::start(
            WordSource::AllUnits,
            SessionMode::Exercise,
            &catalog(),
            settings,
            &mut rng,
        )
        .unwrap();
        assert_eq!(session.len(), 6);
        assert_eq!(session.pool.len(), 6); // 4 + 2 words pooled
    }
}
