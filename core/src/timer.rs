/// Tick-driven stopwatch for one session.
///
/// The engine never schedules anything itself: a driver calls [`SessionTimer::tick`]
/// once per second and the timer decides whether that tick counts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionTimer {
    running: bool,
    elapsed_seconds: u32,
}

impl SessionTimer {
    pub const fn new() -> Self {
        Self {
            running: false,
            elapsed_seconds: 0,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    /// Returns whether this call started the timer, later calls are no-ops.
    pub fn start(&mut self) -> bool {
        !core::mem::replace(&mut self.running, true)
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Counts one second if running, returns whether the elapsed time changed.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_while_running() {
        let mut timer = SessionTimer::new();

        assert!(!timer.tick());
        assert_eq!(timer.elapsed_seconds(), 0);

        assert!(timer.start());
        assert!(timer.tick());
        assert!(timer.tick());
        assert_eq!(timer.elapsed_seconds(), 2);

        timer.stop();
        assert!(!timer.tick());
        assert_eq!(timer.elapsed_seconds(), 2);
    }

    #[test]
    fn start_is_idempotent() {
        let mut timer = SessionTimer::new();

        assert!(timer.start());
        timer.tick();
        assert!(!timer.start());
        assert_eq!(timer.elapsed_seconds(), 1);
    }
}
