use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{Resume, StepKind, StepMode, Suspend};

/// Shared cancellation flag, checked at every suspension point
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Message from the observer side to a suspended run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Release the current suspension
    Advance,
    /// Switch mode; takes effect at the current suspension
    SetMode(StepMode),
    /// End the run at the current suspension
    Cancel,
}

/// Observer-side handle that drives a [`StepController`].
///
/// Cheap to clone and safe to move to another thread (a stdin reader, a
/// Ctrl-C handler).
#[derive(Debug, Clone)]
pub struct StepHandle {
    tx: Sender<Signal>,
    cancel: CancelToken,
}

impl StepHandle {
    pub fn advance(&self) {
        self.send(Signal::Advance);
    }

    pub fn set_mode(&self, mode: StepMode) {
        self.send(Signal::SetMode(mode));
    }

    /// Cancel the run. Sticky: later suspensions also cancel.
    pub fn cancel(&self) {
        self.cancel.cancel();
        self.send(Signal::Cancel);
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn send(&self, signal: Signal) {
        // A finished run has dropped its receiver; nothing left to wake.
        if self.tx.send(signal).is_err() {
            tracing::trace!(?signal, "signal after run ended");
        }
    }
}

/// Engine-side suspension driven by messages from [`StepHandle`]s.
///
/// The mode is re-read at every suspension, so a run can switch between
/// manual and auto stepping while it is in flight.
#[derive(Debug)]
pub struct StepController {
    rx: Receiver<Signal>,
    mode: StepMode,
    cancel: CancelToken,
}

impl StepController {
    pub fn new(mode: StepMode) -> (Self, StepHandle) {
        let (tx, rx) = mpsc::channel();
        let cancel = CancelToken::new();
        let controller = Self {
            rx,
            mode,
            cancel: cancel.clone(),
        };
        (controller, StepHandle { tx, cancel })
    }

    pub fn mode(&self) -> StepMode {
        self.mode
    }

    pub fn is_auto(&self) -> bool {
        self.mode == StepMode::Auto
    }

    fn cancelled(&self) -> Resume {
        self.cancel.cancel();
        tracing::info!("run cancelled at suspension point");
        Resume::Cancel
    }

    /// Wait out `delay`, waking early on advance, cancel or a mode change.
    /// Returns `None` when the mode changed to manual and the caller must
    /// re-enter the manual wait.
    fn wait_auto(&mut self, delay: Duration) -> Option<Resume> {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Some(Resume::Continue);
            }
            match self.rx.recv_timeout(remaining) {
                Ok(Signal::Advance) | Err(RecvTimeoutError::Timeout) => {
                    return Some(Resume::Continue)
                }
                Ok(Signal::SetMode(mode)) => {
                    self.mode = mode;
                    if mode == StepMode::Manual {
                        return None;
                    }
                }
                Ok(Signal::Cancel) => return Some(self.cancelled()),
                Err(RecvTimeoutError::Disconnected) => {
                    // No observer left; keep the pacing and carry on.
                    std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
                    return Some(Resume::Continue);
                }
            }
        }
    }

    /// Apply signals queued before this suspension began.
    ///
    /// Mode switches and cancels still count. Queued advances are stale: only
    /// an advance sent after the latest emission may release the run.
    fn drain_pending(&mut self) -> Option<Resume> {
        let mut stale = 0usize;
        let resume = loop {
            match self.rx.try_recv() {
                Ok(Signal::Advance) => stale += 1,
                Ok(Signal::SetMode(mode)) => self.mode = mode,
                Ok(Signal::Cancel) => break Some(self.cancelled()),
                Err(_) => break None,
            }
        };
        if stale > 0 {
            tracing::debug!(stale, "discarded advances sent before this step");
        }
        resume
    }

    fn wait_manual(&mut self) -> Option<Resume> {
        match self.rx.recv() {
            Ok(Signal::Advance) => Some(Resume::Continue),
            Ok(Signal::SetMode(mode)) => {
                self.mode = mode;
                None
            }
            Ok(Signal::Cancel) => Some(self.cancelled()),
            // Nobody can ever advance us again.
            Err(_) => Some(self.cancelled()),
        }
    }
}

impl Suspend for StepController {
    fn suspend(&mut self, kind: StepKind, delay: Duration) -> Resume {
        if self.cancel.is_cancelled() {
            return Resume::Cancel;
        }
        if let Some(resume) = self.drain_pending() {
            return resume;
        }
        loop {
            if self.cancel.is_cancelled() {
                return Resume::Cancel;
            }
            tracing::trace!(?kind, mode = %self.mode, "suspend");
            let resumed = match self.mode {
                StepMode::Auto => self.wait_auto(delay),
                StepMode::Manual => self.wait_manual(),
            };
            if let Some(resume) = resumed {
                return resume;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_auto_mode_waits_for_delay() {
        let (mut controller, _handle) = StepController::new(StepMode::Auto);
        let start = Instant::now();
        let resume = controller.suspend(StepKind::Visit, Duration::from_millis(30));
        assert_eq!(resume, Resume::Continue);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_auto_mode_without_handle_still_paces() {
        let (mut controller, handle) = StepController::new(StepMode::Auto);
        drop(handle);
        let start = Instant::now();
        let resume = controller.suspend(StepKind::Visit, Duration::from_millis(20));
        assert_eq!(resume, Resume::Continue);
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_manual_mode_releases_on_advance() {
        let (mut controller, handle) = StepController::new(StepMode::Manual);
        let sender = thread::spawn(move || {
            thread::sleep(Duration::from_millis(30));
            handle.advance();
        });
        assert_eq!(
            controller.suspend(StepKind::Visit, Duration::ZERO),
            Resume::Continue
        );
        sender.join().unwrap();
    }

    #[test]
    fn test_advances_sent_before_suspension_are_discarded() {
        let (mut controller, handle) = StepController::new(StepMode::Manual);
        for _ in 0..3 {
            handle.advance();
        }
        let sender = thread::spawn(move || {
            thread::sleep(Duration::from_millis(60));
            handle.cancel();
        });
        let start = Instant::now();
        assert_eq!(
            controller.suspend(StepKind::Visit, Duration::ZERO),
            Resume::Cancel
        );
        assert!(start.elapsed() >= Duration::from_millis(60));
        sender.join().unwrap();
    }

    #[test]
    fn test_queued_mode_switch_still_applies() {
        let (mut controller, handle) = StepController::new(StepMode::Auto);
        handle.advance();
        handle.set_mode(StepMode::Manual);
        handle.set_mode(StepMode::Auto);
        let resume = controller.suspend(StepKind::Visit, Duration::from_millis(10));
        assert_eq!(resume, Resume::Continue);
        assert!(controller.is_auto());
    }

    #[test]
    fn test_manual_mode_blocks_until_advance() {
        let (mut controller, handle) = StepController::new(StepMode::Manual);
        let sender = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            handle.advance();
        });
        let start = Instant::now();
        assert_eq!(
            controller.suspend(StepKind::Relax, Duration::ZERO),
            Resume::Continue
        );
        assert!(start.elapsed() >= Duration::from_millis(50));
        sender.join().unwrap();
    }

    #[test]
    fn test_cancel_is_sticky() {
        let (mut controller, handle) = StepController::new(StepMode::Manual);
        handle.cancel();
        assert_eq!(
            controller.suspend(StepKind::Visit, Duration::ZERO),
            Resume::Cancel
        );
        handle.advance();
        assert_eq!(
            controller.suspend(StepKind::Visit, Duration::ZERO),
            Resume::Cancel
        );
        assert!(handle.cancel_token().is_cancelled());
    }

    #[test]
    fn test_cancel_interrupts_auto_wait() {
        let (mut controller, handle) = StepController::new(StepMode::Auto);
        let sender = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.cancel();
        });
        let start = Instant::now();
        let resume = controller.suspend(StepKind::Visit, Duration::from_secs(10));
        assert_eq!(resume, Resume::Cancel);
        assert!(start.elapsed() < Duration::from_secs(5));
        sender.join().unwrap();
    }

    #[test]
    fn test_dropped_handles_cancel_manual_wait() {
        let (mut controller, handle) = StepController::new(StepMode::Manual);
        drop(handle);
        assert_eq!(
            controller.suspend(StepKind::Visit, Duration::ZERO),
            Resume::Cancel
        );
    }

    #[test]
    fn test_switch_manual_to_auto_mid_wait() {
        let (mut controller, handle) = StepController::new(StepMode::Manual);
        handle.set_mode(StepMode::Auto);
        let resume = controller.suspend(StepKind::Visit, Duration::from_millis(10));
        assert_eq!(resume, Resume::Continue);
        assert!(controller.is_auto());
    }

    #[test]
    fn test_switch_auto_to_manual_mid_wait() {
        let (mut controller, handle) = StepController::new(StepMode::Auto);
        let sender = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.set_mode(StepMode::Manual);
            thread::sleep(Duration::from_millis(20));
            handle.advance();
            handle
        });
        let resume = controller.suspend(StepKind::Visit, Duration::from_secs(10));
        assert_eq!(resume, Resume::Continue);
        assert_eq!(controller.mode(), StepMode::Manual);
        sender.join().unwrap();
    }
}
