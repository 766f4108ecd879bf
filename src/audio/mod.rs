pub mod speech;
pub mod tone;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneOutcome {
    Correct,
    Incorrect,
}

/// Text-to-speech port. A `speak` call supersedes any in-flight utterance;
/// implementations must never let two overlap. Failures are swallowed — a
/// session without audio is the worst allowed outcome.
pub trait SpeechService {
    fn speak(&mut self, text: &str);
    fn cancel(&mut self);
}

/// Short feedback cue after an answer. Best-effort; failures are swallowed.
pub trait ToneService {
    fn play(&mut self, outcome: ToneOutcome);
}

/// No-op speech for `--no-audio` and for tests that don't observe calls.
pub struct NullSpeech;

impl SpeechService for NullSpeech {
    fn speak(&mut self, _text: &str) {}
    fn cancel(&mut self) {}
}

pub struct NullTone;

impl ToneService for NullTone {
    fn play(&mut self, _outcome: ToneOutcome) {}
}
