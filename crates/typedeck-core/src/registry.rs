//! Instance registry.
//!
//! The setup routine owns every animation instance; watchers and widgets
//! refer to them only by `RegionId`. Ids are arena slots, stable for the
//! life of the page, so nothing holds a live reference across callbacks.
//!
//! Scheduling is data, not callbacks: each instance carries the deadline
//! of its next step, and `poll` runs every step that has come due. That
//! makes the pending step cancellable (clear the deadline) and keeps the
//! steps of one instance strictly ordered.

use std::time::Instant;

use crate::typewriter::{StepOutcome, Typewriter};

/// Stable identifier of a registered instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(u32);

impl RegionId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One registered animation instance: the state machine plus the deadline
/// of its next scheduled step
#[derive(Debug)]
pub struct Instance {
    machine: Typewriter,
    next_step: Option<Instant>,
}

impl Instance {
    fn new(machine: Typewriter) -> Self {
        Self {
            machine,
            next_step: None,
        }
    }

    pub fn machine(&self) -> &Typewriter {
        &self.machine
    }

    /// Whether a step is currently scheduled
    pub fn is_scheduled(&self) -> bool {
        self.next_step.is_some()
    }

    /// Activate the instance; the first step is scheduled one character
    /// delay out. No-op after the first call.
    pub fn start(&mut self, now: Instant) {
        if self.machine.start() {
            self.next_step = Some(now + self.machine.pace().speed);
        }
    }

    /// Drop the pending step, freezing the instance where it is. The
    /// machine state is untouched, so the revealed text stays on screen.
    pub fn cancel(&mut self) {
        self.next_step = None;
    }

    /// Run every step that has come due. Deadlines accumulate from the
    /// previous deadline, not from `now`, so a late tick catches up and
    /// the cadence holds.
    fn poll(&mut self, now: Instant) -> bool {
        let mut stepped = false;
        while let Some(due) = self.next_step {
            if due > now {
                break;
            }
            match self.machine.step() {
                StepOutcome::Scheduled(delay) => self.next_step = Some(due + delay),
                StepOutcome::Completed => self.next_step = None,
            }
            stepped = true;
        }
        stepped
    }
}

/// Arena of animation instances
#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Option<Instance>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a machine and return its id
    pub fn insert(&mut self, machine: Typewriter) -> RegionId {
        let id = RegionId(self.slots.len() as u32);
        self.slots.push(Some(Instance::new(machine)));
        id
    }

    pub fn get(&self, id: RegionId) -> Option<&Instance> {
        self.slots.get(id.index()).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Instance> {
        self.slots.get_mut(id.index()).and_then(|slot| slot.as_mut())
    }

    /// Tear down an instance, cancelling its pending step
    pub fn remove(&mut self, id: RegionId) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(slot) if slot.is_some() => {
                if let Some(instance) = slot.as_mut() {
                    instance.cancel();
                }
                *slot = None;
                true
            }
            _ => false,
        }
    }

    /// Activate an instance if it exists and has not started yet
    pub fn start(&mut self, id: RegionId, now: Instant) {
        if let Some(instance) = self.get_mut(id) {
            instance.start(now);
        }
    }

    /// Cancel the pending step of every instance
    pub fn cancel_all(&mut self) {
        for instance in self.slots.iter_mut().flatten() {
            instance.cancel();
        }
    }

    /// Advance every instance with a due step. Returns true if anything
    /// stepped, i.e. the page needs a redraw.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut stepped = false;
        for instance in self.slots.iter_mut().flatten() {
            stepped |= instance.poll(now);
        }
        stepped
    }

    /// Earliest pending deadline across all instances
    pub fn next_deadline(&self) -> Option<Instant> {
        self.slots
            .iter()
            .flatten()
            .filter_map(|instance| instance.next_step)
            .min()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.slots.iter().flatten()
    }

    /// (completed, total) across registered instances
    pub fn progress(&self) -> (usize, usize) {
        let total = self.iter().count();
        let completed = self.iter().filter(|i| i.machine().is_completed()).count();
        (completed, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typewriter::Pace;
    use std::time::Duration;

    fn machine(items: &[&str]) -> Typewriter {
        Typewriter::new(items.iter().map(|s| s.to_string()).collect(), Pace::brisk())
    }

    #[test]
    fn test_start_schedules_exactly_one_step() {
        let mut registry = Registry::new();
        let id = registry.insert(machine(&["hi"]));
        let now = Instant::now();

        assert!(!registry.get(id).unwrap().is_scheduled());
        registry.start(id, now);
        assert!(registry.get(id).unwrap().is_scheduled());

        // A second activation does not reschedule or reset
        let deadline = registry.next_deadline();
        registry.start(id, now + Duration::from_secs(5));
        assert_eq!(registry.next_deadline(), deadline);
    }

    #[test]
    fn test_poll_runs_due_steps_in_order() {
        let mut registry = Registry::new();
        let id = registry.insert(machine(&["ab"]));
        let start = Instant::now();
        registry.start(id, start);

        // Nothing due yet
        assert!(!registry.poll(start));

        // One character delay later the first reveal runs
        let speed = Pace::brisk().speed;
        assert!(registry.poll(start + speed));
        assert_eq!(registry.get(id).unwrap().machine().char_index(), 1);

        // A late poll catches up on several steps at once, in order
        assert!(registry.poll(start + speed * 3));
        assert_eq!(registry.get(id).unwrap().machine().char_index(), 3);
    }

    #[test]
    fn test_runs_to_completion_and_goes_quiet() {
        let mut registry = Registry::new();
        let id = registry.insert(machine(&["ab", "c"]));
        let start = Instant::now();
        registry.start(id, start);

        registry.poll(start + Duration::from_secs(60));
        assert!(registry.get(id).unwrap().machine().is_completed());
        assert!(!registry.get(id).unwrap().is_scheduled());
        assert_eq!(registry.next_deadline(), None);
        assert!(!registry.poll(start + Duration::from_secs(120)));
        assert_eq!(registry.progress(), (1, 1));
    }

    #[test]
    fn test_cancel_freezes_in_place() {
        let mut registry = Registry::new();
        let id = registry.insert(machine(&["hello"]));
        let start = Instant::now();
        registry.start(id, start);

        let speed = Pace::brisk().speed;
        registry.poll(start + speed * 2);
        let revealed = registry.get(id).unwrap().machine().visible_text();

        registry.cancel_all();
        assert!(!registry.get(id).unwrap().is_scheduled());
        assert!(!registry.poll(start + Duration::from_secs(60)));
        assert_eq!(registry.get(id).unwrap().machine().visible_text(), revealed);
    }

    #[test]
    fn test_remove_tears_down() {
        let mut registry = Registry::new();
        let id = registry.insert(machine(&["hi"]));
        registry.start(id, Instant::now());

        assert!(registry.remove(id));
        assert!(registry.get(id).is_none());
        assert!(!registry.remove(id));
        assert_eq!(registry.next_deadline(), None);
    }

    #[test]
    fn test_independent_instances() {
        let mut registry = Registry::new();
        let a = registry.insert(machine(&["aa"]));
        let b = registry.insert(machine(&["bb"]));
        let start = Instant::now();

        registry.start(a, start);
        registry.poll(start + Pace::brisk().speed);
        assert_eq!(registry.get(a).unwrap().machine().char_index(), 1);
        // b never started, never steps
        assert!(!registry.get(b).unwrap().machine().is_started());
        assert_eq!(registry.get(b).unwrap().machine().char_index(), 0);
    }
}
