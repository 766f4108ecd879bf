/// Post-answer playback: speak and highlight the word one character at a
/// time, then signal completion after a fixed dwell so the next question is
/// never delayed by word length.
///
/// The sequence is a pure schedule polled with elapsed milliseconds; the
/// caller owns the wall clock (the event loop's tick in production, a
/// virtual clock in tests). Cancellation is dropping the sequence: an
/// un-polled schedule can never fire.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KaraokeTiming {
    /// Delay before the first character.
    pub lead_in_ms: u64,
    /// Interval between characters.
    pub step_ms: u64,
    /// Total display time; fires `Complete` even if characters remain.
    pub dwell_ms: u64,
}

impl Default for KaraokeTiming {
    fn default() -> Self {
        Self {
            lead_in_ms: 400,
            step_ms: 1200,
            dwell_ms: 5500,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KaraokeEvent {
    /// Highlight character `index` and speak `unit`.
    Step { index: usize, unit: String },
    /// Dwell elapsed; the answer has been shown long enough.
    Complete,
}

pub struct KaraokeSequence {
    units: Vec<String>,
    timing: KaraokeTiming,
    next_step: usize,
    complete_fired: bool,
    generation: u64,
}

impl KaraokeSequence {
    /// `generation` identifies the question this sequence was scheduled
    /// for; consumers discard events whose generation no longer matches
    /// the live session, so a stale firing cannot touch a newer question.
    pub fn new(text: &str, timing: KaraokeTiming, generation: u64) -> Self {
        Self {
            units: text.chars().map(String::from).collect(),
            timing,
            next_step: 0,
            complete_fired: false,
            generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_finished(&self) -> bool {
        self.complete_fired
    }

    /// Return every event due at `elapsed_ms` since the sequence started.
    /// Steps fire in order; a step scheduled at or past the dwell deadline
    /// is cut short and never fires. After `Complete` the sequence is inert.
    pub fn poll(&mut self, elapsed_ms: u64) -> Vec<KaraokeEvent> {
        let mut events = Vec::new();
        if self.complete_fired {
            return events;
        }

        while self.next_step < self.units.len() {
            let due = self.timing.lead_in_ms + self.next_step as u64 * self.timing.step_ms;
            if due >= self.timing.dwell_ms || due > elapsed_ms {
                break;
            }
            events.push(KaraokeEvent::Step {
                index: self.next_step,
                unit: self.units[self.next_step].clone(),
            });
            self.next_step += 1;
        }

        if elapsed_ms >= self.timing.dwell_ms {
            self.complete_fired = true;
            events.push(KaraokeEvent::Complete);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> KaraokeTiming {
        KaraokeTiming {
            lead_in_ms: 400,
            step_ms: 1200,
            dwell_ms: 5500,
        }
    }

    fn step(index: usize, unit: &str) -> KaraokeEvent {
        KaraokeEvent::Step {
            index,
            unit: unit.to_string(),
        }
    }

    #[test]
    fn test_nothing_before_lead_in() {
        let mut seq = KaraokeSequence::new("蘋果", timing(), 0);
        assert!(seq.poll(0).is_empty());
        assert!(seq.poll(399).is_empty());
    }

    #[test]
    fn test_steps_fire_at_interval() {
        let mut seq = KaraokeSequence::new("蘋果", timing(), 0);
        assert_eq!(seq.poll(400), vec![step(0, "蘋")]);
        assert!(seq.poll(1599).is_empty());
        assert_eq!(seq.poll(1600), vec![step(1, "果")]);
    }

    #[test]
    fn test_late_poll_drains_all_due_steps() {
        // A slow tick must not lose steps; they arrive batched, in order.
        let mut seq = KaraokeSequence::new("蘋果", timing(), 0);
        assert_eq!(seq.poll(2000), vec![step(0, "蘋"), step(1, "果")]);
    }

    #[test]
    fn test_dwell_completes_even_with_steps_remaining() {
        // 5 chars: steps due at 400..5200, but dwell cuts off at 5500 and
        // the step due at 5200 still fits. With a shorter dwell it would not.
        let short = KaraokeTiming {
            lead_in_ms: 400,
            step_ms: 1200,
            dwell_ms: 3000,
        };
        let mut seq = KaraokeSequence::new("冰淇淋", short, 0);
        let events = seq.poll(3000);
        // Steps due at 400 and 1600 fire; the one due at 2800 fires too,
        // then Complete. The step due at 4000 (past dwell) never will.
        assert_eq!(
            events,
            vec![
                step(0, "冰"),
                step(1, "淇"),
                step(2, "淋"),
                KaraokeEvent::Complete
            ]
        );
        assert!(seq.is_finished());
    }

    #[test]
    fn test_step_scheduled_past_dwell_is_suppressed() {
        let short = KaraokeTiming {
            lead_in_ms: 400,
            step_ms: 1200,
            dwell_ms: 1600,
        };
        // Second step due exactly at the dwell deadline: suppressed.
        let mut seq = KaraokeSequence::new("蘋果", short, 0);
        let events = seq.poll(10_000);
        assert_eq!(events, vec![step(0, "蘋"), KaraokeEvent::Complete]);
    }

    #[test]
    fn test_complete_fires_once() {
        let mut seq = KaraokeSequence::new("狗", timing(), 0);
        let events = seq.poll(6000);
        assert_eq!(events, vec![step(0, "狗"), KaraokeEvent::Complete]);
        assert!(seq.poll(7000).is_empty());
        assert!(seq.poll(100_000).is_empty());
    }

    #[test]
    fn test_generation_is_preserved() {
        let seq = KaraokeSequence::new("狗", timing(), 42);
        assert_eq!(seq.generation(), 42);
    }
}
