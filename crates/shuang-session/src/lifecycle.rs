use tracing::{debug, info, warn};

use super::types::{SessionError, SessionState};
use super::PracticeSession;

impl PracticeSession {
    /// Begin (or resume) typing.
    ///
    /// A finished run is reset with fresh text first. Fails with
    /// [`SessionError::NoText`] when there is nothing to type.
    pub fn start(&mut self, now: u64) -> Result<(), SessionError> {
        match self.state {
            SessionState::Running => return Ok(()),
            SessionState::Paused => {
                self.resume(now);
                return Ok(());
            }
            SessionState::NotStarted | SessionState::Completed => {}
        }

        if self.cursor >= self.units.len() {
            self.reset();
        }
        if self.cursor >= self.units.len() {
            warn!("start requested without text");
            return Err(SessionError::NoText);
        }

        self.state = SessionState::Running;
        self.stats.start(now);
        self.open_current(now);
        info!(scheme = self.table.code(), mode = %self.config.mode, "practice started");
        Ok(())
    }

    pub fn pause(&mut self, now: u64) {
        if self.state != SessionState::Running {
            return;
        }
        self.state = SessionState::Paused;
        self.stats.pause(now);
        debug!(cursor = self.cursor, "paused");
    }

    pub fn resume(&mut self, now: u64) {
        if self.state != SessionState::Paused {
            return;
        }
        self.state = SessionState::Running;
        self.stats.resume(self.cursor, now);
        debug!(cursor = self.cursor, "resumed");
    }

    /// Pause a running session or resume a paused one; other states are
    /// left alone. Returns the resulting state.
    pub fn toggle_pause(&mut self, now: u64) -> SessionState {
        match self.state {
            SessionState::Running => self.pause(now),
            SessionState::Paused => self.resume(now),
            SessionState::NotStarted | SessionState::Completed => {}
        }
        self.state
    }

    /// Discard progress and statistics and generate new text.
    pub fn reset(&mut self) {
        self.state = SessionState::NotStarted;
        self.stats.reset();
        self.generate();
        debug!("session reset");
    }

    pub(crate) fn finish(&mut self, now: u64) {
        self.state = SessionState::Completed;
        // Freezes the clock at completion.
        self.stats.pause(now);
        info!(
            completed = self.stats.completed(),
            errors = self.stats.error_count(),
            "practice completed"
        );
    }
}
