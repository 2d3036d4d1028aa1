use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;

/// Labels shown while a chat request is outstanding, in display order.
pub const LOADING_MESSAGES: [&str; 6] = [
    "🏟️ Scouting your perfect playing field...",
    "🌍 Exploring the sports scene in your city...",
    "📍 Pinpointing premium venues nearby...",
    "🔍 Hunting down the best courts & grounds...",
    "⚡ Checking live availability & slots...",
    "🎯 Matching you with top-rated venues...",
];

const INDEX_BITS: u32 = 8;
const INDEX_MASK: u64 = (1 << INDEX_BITS) - 1;

fn pack(generation: u64, index: usize) -> u64 {
    (generation << INDEX_BITS) | index as u64
}

/// Moves to the next label if `generation` is still current. A ticker left
/// over from an earlier `start` never touches the index of a newer one.
fn advance(state: &AtomicU64, generation: u64) -> bool {
    state
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
            if current >> INDEX_BITS != generation {
                return None;
            }
            let next = ((current & INDEX_MASK) as usize + 1) % LOADING_MESSAGES.len();
            Some(pack(generation, next))
        })
        .is_ok()
}

struct Ticker {
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

/// Cycles through [`LOADING_MESSAGES`] on a fixed period.
///
/// The rotation runs as a tokio task owned by this value. `stop` and `Drop`
/// both signal and abort the task, so no periodic callback outlives its owner.
pub struct LoadingRotation {
    /// Generation in the high bits, label index in the low bits.
    state: Arc<AtomicU64>,
    period: Duration,
    ticker: Option<Ticker>,
}

impl LoadingRotation {
    pub fn new(period: Duration) -> Self {
        Self {
            state: Arc::new(AtomicU64::new(0)),
            period,
            ticker: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Resets to the first label and starts advancing once per period.
    ///
    /// Outside a tokio runtime the label stays on the first message.
    pub fn start(&mut self) {
        self.stop();
        let generation = (self.state.load(Ordering::SeqCst) >> INDEX_BITS) + 1;
        self.state.store(pack(generation, 0), Ordering::SeqCst);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("No tokio runtime, loading label will not rotate");
            return;
        };

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let state = Arc::clone(&self.state);
        let period = self.period;

        let handle = runtime.spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if !advance(&state, generation) {
                            break;
                        }
                    }
                    _ = &mut shutdown_rx => break,
                }
            }
        });

        self.ticker = Some(Ticker {
            shutdown_tx: Some(shutdown_tx),
            handle,
        });
    }

    /// Releases the timer. The current index is kept until the next `start`.
    pub fn stop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            if let Some(tx) = ticker.shutdown_tx.take() {
                let _ = tx.send(());
            }
            ticker.handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.handle.is_finished())
    }

    pub fn index(&self) -> usize {
        (self.state.load(Ordering::SeqCst) & INDEX_MASK) as usize
    }

    pub fn label(&self) -> &'static str {
        LOADING_MESSAGES[self.index() % LOADING_MESSAGES.len()]
    }
}

impl Drop for LoadingRotation {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for LoadingRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadingRotation")
            .field("index", &self.index())
            .field("period", &self.period)
            .field("running", &self.ticker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_first_label() {
        let rotation = LoadingRotation::new(Duration::from_secs(3));
        assert_eq!(rotation.index(), 0);
        assert_eq!(rotation.label(), LOADING_MESSAGES[0]);
        assert!(!rotation.is_running());
    }

    #[test]
    fn test_start_without_runtime_does_not_panic() {
        let mut rotation = LoadingRotation::new(Duration::from_secs(3));
        rotation.start();
        assert!(!rotation.is_running());
        assert_eq!(rotation.index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_visits_each_label_once_per_period() {
        let mut rotation = LoadingRotation::new(Duration::from_secs(3));
        rotation.start();

        let mut seen = vec![rotation.index()];
        for _ in 0..19 {
            tokio::time::sleep(Duration::from_millis(500)).await;
            let idx = rotation.index();
            if seen.last() != Some(&idx) {
                seen.push(idx);
            }
        }

        assert_eq!(seen, vec![0, 1, 2, 3]);
        rotation.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_wraps_after_last_label() {
        let mut rotation = LoadingRotation::new(Duration::from_secs(3));
        rotation.start();

        tokio::time::sleep(Duration::from_millis(6 * 3000 + 500)).await;
        assert_eq!(rotation.index(), 0);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(rotation.index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_and_restart_resets() {
        let mut rotation = LoadingRotation::new(Duration::from_secs(3));
        rotation.start();
        tokio::time::sleep(Duration::from_millis(6500)).await;
        assert_eq!(rotation.index(), 2);

        rotation.stop();
        assert!(!rotation.is_running());
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(rotation.index(), 2);

        rotation.start();
        assert_eq!(rotation.index(), 0);
        assert!(rotation.is_running());
    }

    #[test]
    fn test_stale_generation_cannot_advance() {
        let state = AtomicU64::new(pack(1, 4));
        assert!(advance(&state, 1));
        assert_eq!(state.load(Ordering::SeqCst) & INDEX_MASK, 5);

        state.store(pack(2, 0), Ordering::SeqCst);
        assert!(!advance(&state, 1));
        assert_eq!(state.load(Ordering::SeqCst), pack(2, 0));

        assert!(advance(&state, 2));
        assert_eq!(state.load(Ordering::SeqCst) & INDEX_MASK, 1);
    }
}
