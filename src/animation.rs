//! Fixed-cadence ticker thread with cooperative cancellation.
//!
//! The stop flag is checked at every tick boundary; a tick that has started always
//! runs to completion before the thread exits.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

/// Clears the running flag and the loop count however the ticker thread exits
struct LoopGuard {
    running: Arc<AtomicBool>,
    active_loops: Arc<AtomicUsize>,
}

impl Drop for LoopGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        self.active_loops.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Background ticker: `Stopped` until `start`, `Running` until `stop`
#[derive(Default)]
pub struct Ticker {
    running: Arc<AtomicBool>,
    active_loops: Arc<AtomicUsize>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the ticker thread calling `tick` every `interval`
    ///
    /// Returns `false` without spawning if already running.
    pub fn start<F>(&mut self, interval: Duration, mut tick: F) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        // A thread that ended on its own (tick panicked) still needs joining
        self.join();

        self.active_loops.fetch_add(1, Ordering::AcqRel);
        let guard = LoopGuard {
            running: Arc::clone(&self.running),
            active_loops: Arc::clone(&self.active_loops),
        };

        self.handle = Some(thread::spawn(move || {
            let guard = guard;
            let mut deadline = Instant::now();

            while guard.running.load(Ordering::Acquire) {
                tick();

                deadline += interval;
                let now = Instant::now();
                if deadline > now {
                    thread::sleep(deadline - now);
                } else {
                    // Fell behind; drop the missed ticks instead of bursting
                    deadline = now;
                }
            }
        }));

        debug!("Ticker started ({:?} interval)", interval);
        true
    }

    /// Request cancellation and wait for the in-flight tick to finish
    ///
    /// Safe to call in any state.
    pub fn stop(&mut self) {
        let was_running = self.running.swap(false, Ordering::AcqRel);
        self.join();
        if was_running {
            debug!("Ticker stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Number of live ticker threads (0 or 1)
    pub fn active_loops(&self) -> usize {
        self.active_loops.load(Ordering::Acquire)
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    const FAST: Duration = Duration::from_millis(1);

    #[test]
    fn test_stop_when_stopped_is_noop() {
        let mut ticker = Ticker::new();
        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());
        assert_eq!(ticker.active_loops(), 0);
    }

    #[test]
    fn test_double_start_keeps_one_loop() {
        let mut ticker = Ticker::new();
        assert!(ticker.start(FAST, || {}));
        assert!(!ticker.start(FAST, || {}));
        assert!(ticker.is_running());
        assert_eq!(ticker.active_loops(), 1);

        ticker.stop();
        assert!(!ticker.is_running());
        assert_eq!(ticker.active_loops(), 0);
    }

    #[test]
    fn test_ticks_until_stopped() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);

        let mut ticker = Ticker::new();
        ticker.start(FAST, move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let started = Instant::now();
        while count.load(Ordering::Relaxed) < 3 && started.elapsed() < Duration::from_secs(5) {
            thread::sleep(FAST);
        }
        ticker.stop();

        let stopped_at = count.load(Ordering::Relaxed);
        assert!(stopped_at >= 3);

        thread::sleep(Duration::from_millis(20));
        assert_eq!(count.load(Ordering::Relaxed), stopped_at);
    }

    #[test]
    fn test_restart_after_stop() {
        let mut ticker = Ticker::new();
        assert!(ticker.start(FAST, || {}));
        ticker.stop();
        assert!(ticker.start(FAST, || {}));
        assert_eq!(ticker.active_loops(), 1);
    }

    #[test]
    fn test_panicking_tick_clears_running_flag() {
        let mut ticker = Ticker::new();
        ticker.start(FAST, || panic!("tick failed"));

        let started = Instant::now();
        while ticker.is_running() && started.elapsed() < Duration::from_secs(5) {
            thread::sleep(FAST);
        }
        assert!(!ticker.is_running());

        ticker.stop();
        assert_eq!(ticker.active_loops(), 0);
    }
}
