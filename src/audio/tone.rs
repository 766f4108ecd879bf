use std::io::{self, Write};

use crate::audio::{ToneOutcome, ToneService};

/// Terminal-bell feedback. A terminal can only ring one bell, so the wrong
/// answer gets the cue and a correct answer is confirmed by the spoken word
/// that follows immediately. Write errors are ignored.
pub struct TerminalTone;

impl ToneService for TerminalTone {
    fn play(&mut self, outcome: ToneOutcome) {
        if outcome == ToneOutcome::Incorrect {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(b"\x07");
            let _ = stdout.flush();
        }
    }
}
