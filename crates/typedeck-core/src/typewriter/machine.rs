//! Per-instance animation state machine.
//!
//! A `Typewriter` owns the progress counters for one block and advances
//! them one step at a time. It holds no timer itself: `step` reports how
//! long to wait before the next step, and whoever drives the machine (the
//! registry's deadline polling) owns the scheduling.

use std::time::Duration;

use super::pace::Pace;
use super::render;

/// Result of advancing a typewriter by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// More to reveal; run the next step after this delay
    Scheduled(Duration),
    /// Every line is revealed; no further steps will do anything
    Completed,
}

/// Typewriter animation state for one block
#[derive(Debug, Clone)]
pub struct Typewriter {
    lines: Vec<String>,
    line_index: usize,
    char_index: usize,
    started: bool,
    completed: bool,
    pace: Pace,
}

impl Typewriter {
    pub fn new(lines: Vec<String>, pace: Pace) -> Self {
        Self {
            lines,
            line_index: 0,
            char_index: 0,
            started: false,
            completed: false,
            pace,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_index(&self) -> usize {
        self.line_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn pace(&self) -> Pace {
        self.pace
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the instance started. Returns true on the first activation;
    /// later calls (a second visibility report, say) are no-ops.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    /// Text currently visible for this instance
    pub fn visible_text(&self) -> String {
        render::visible_text(&self.lines, self.line_index, self.char_index)
    }

    /// Full text of the final state, newline-joined
    pub fn full_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Advance one step: reveal the next character, advance past a
    /// finished line, or complete.
    ///
    /// `char_index` runs to the line length plus one; the extra state is
    /// "line fully shown, about to advance", and the advance itself is a
    /// separate step so the line-break pause lands between lines.
    /// Advancing past the last line completes in the same step.
    pub fn step(&mut self) -> StepOutcome {
        if self.completed {
            return StepOutcome::Completed;
        }

        if self.line_index >= self.lines.len() {
            return self.finish();
        }

        let current_len = self.lines[self.line_index].chars().count();
        if self.char_index <= current_len {
            self.char_index += 1;
            StepOutcome::Scheduled(self.pace.speed)
        } else {
            self.line_index += 1;
            self.char_index = 0;
            if self.line_index >= self.lines.len() {
                self.finish()
            } else {
                StepOutcome::Scheduled(self.pace.delay)
            }
        }
    }

    fn finish(&mut self) -> StepOutcome {
        self.completed = true;
        self.line_index = self.lines.len();
        self.char_index = 0;
        StepOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(items: &[&str]) -> Typewriter {
        Typewriter::new(items.iter().map(|s| s.to_string()).collect(), Pace::brisk())
    }

    /// Steps until completion, with a generous bound so a broken machine
    /// fails the test instead of spinning.
    fn steps_to_complete(tw: &mut Typewriter) -> usize {
        for count in 1..=10_000 {
            if tw.step() == StepOutcome::Completed {
                return count;
            }
        }
        panic!("machine never completed");
    }

    #[test]
    fn test_empty_lines_complete_in_one_step() {
        let mut tw = machine(&[]);
        tw.start();
        assert_eq!(steps_to_complete(&mut tw), 1);
        assert!(tw.is_completed());
        assert_eq!(tw.visible_text(), "");
    }

    #[test]
    fn test_single_empty_line_completes_in_two_steps() {
        let mut tw = machine(&[""]);
        tw.start();
        // One render step at char index zero, then the advance finishes
        assert_eq!(steps_to_complete(&mut tw), 2);
        assert_eq!(tw.line_index(), 1);
        assert_eq!(tw.char_index(), 0);
    }

    #[test]
    fn test_step_count_per_line() {
        // Each line: chars+1 reveal steps (prefixes 0..=len) plus one
        // advance step; the final advance doubles as the finish.
        let mut tw = machine(&["ab", "c"]);
        tw.start();
        assert_eq!(steps_to_complete(&mut tw), (2 + 2) + (1 + 2));
    }

    #[test]
    fn test_steps_after_completion_are_noops() {
        let mut tw = machine(&["hi"]);
        tw.start();
        steps_to_complete(&mut tw);
        let snapshot = tw.visible_text();
        for _ in 0..5 {
            assert_eq!(tw.step(), StepOutcome::Completed);
        }
        assert_eq!(tw.visible_text(), snapshot);
        assert_eq!(tw.line_index(), 1);
    }

    #[test]
    fn test_start_is_one_shot() {
        let mut tw = machine(&["hi"]);
        assert!(tw.start());
        tw.step();
        tw.step();
        let (li, ci) = (tw.line_index(), tw.char_index());
        // A second activation must not restart or reset progress
        assert!(!tw.start());
        assert_eq!((tw.line_index(), tw.char_index()), (li, ci));
    }

    #[test]
    fn test_delays_follow_the_pace() {
        let mut tw = Typewriter::new(vec!["a".to_string(), "b".to_string()], Pace::relaxed());
        tw.start();
        // Reveal steps for "a": prefixes 0 and 1, then the overshoot state
        assert_eq!(tw.step(), StepOutcome::Scheduled(Pace::relaxed().speed));
        assert_eq!(tw.step(), StepOutcome::Scheduled(Pace::relaxed().speed));
        // Advance to the next line pauses for the line-break delay
        assert_eq!(tw.step(), StepOutcome::Scheduled(Pace::relaxed().delay));
        assert_eq!(tw.line_index(), 1);
    }

    #[test]
    fn test_visible_text_progression() {
        let mut tw = machine(&["hi"]);
        tw.start();
        assert_eq!(tw.visible_text(), "");
        tw.step();
        assert_eq!(tw.visible_text(), "h");
        tw.step();
        assert_eq!(tw.visible_text(), "hi");
        tw.step(); // overshoot state still shows the whole line
        assert_eq!(tw.visible_text(), "hi");
        tw.step(); // advance past the only line; finishes
        assert!(tw.is_completed());
        assert_eq!(tw.visible_text(), "hi");
    }
}
