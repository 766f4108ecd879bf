use std::process::{Child, Command, Stdio};

use crate::audio::SpeechService;

/// Subprocess-backed TTS: `say` on macOS (which honors the configured
/// voice), `espeak-ng` elsewhere. Spawn failures mean the engine is
/// missing; the session simply runs silent. At most one child is alive at
/// a time — a new utterance kills the previous one first, so playback can
/// never overlap.
pub struct SystemSpeech {
    voice: String,
    rate: f32,
    child: Option<Child>,
}

impl SystemSpeech {
    /// `rate` is a multiplier on normal speaking speed (1.0 = normal).
    pub fn new(voice: &str, rate: f32) -> Self {
        Self {
            voice: voice.to_string(),
            rate,
            child: None,
        }
    }

    fn words_per_minute(&self) -> u32 {
        // Both engines take words per minute; ~180 is their normal pace.
        (180.0 * self.rate).round().clamp(60.0, 400.0) as u32
    }

    fn spawn(&self, text: &str) -> Option<Child> {
        let wpm = self.words_per_minute().to_string();
        let mut command = if cfg!(target_os = "macos") {
            let mut c = Command::new("say");
            c.args(["-v", &self.voice, "-r", &wpm, text]);
            c
        } else {
            let mut c = Command::new("espeak-ng");
            c.args(["-v", "zh", "-s", &wpm, text]);
            c
        };
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .ok()
    }
}

impl SpeechService for SystemSpeech {
    fn speak(&mut self, text: &str) {
        self.cancel();
        self.child = self.spawn(text);
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for SystemSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_clamps_to_engine_range() {
        assert_eq!(SystemSpeech::new("Mei-Jia", 0.1).words_per_minute(), 60);
        assert_eq!(SystemSpeech::new("Mei-Jia", 1.0).words_per_minute(), 180);
        assert_eq!(SystemSpeech::new("Mei-Jia", 10.0).words_per_minute(), 400);
    }

    #[test]
    fn test_cancel_without_child_is_noop() {
        let mut speech = SystemSpeech::new("Mei-Jia", 1.0);
        speech.cancel();
        speech.cancel();
    }
}
