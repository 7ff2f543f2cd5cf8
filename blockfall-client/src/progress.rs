//! Terminal progress indicator
//!
//! Native stand-in for the web page's top loading bar: a single-line spinner
//! on stderr that appears while loading work is in flight. `show` waits a
//! caller-chosen delay before anything is drawn, so short blips finish
//! invisibly; `hide` inside the delay cancels the appearance outright.
//!
//! Appearance (colors) is fixed at construction. There is no reconfiguration
//! surface afterwards; callers only ever show and hide.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
const SPIN_INTERVAL: Duration = Duration::from_millis(120);

/// One-time appearance settings
#[derive(Debug, Clone)]
pub struct ProgressStyle {
    /// Spinner color
    pub bar_rgb: (u8, u8, u8),
    /// Trim color for the brackets around the spinner
    pub trim_rgb: (u8, u8, u8),
}

impl Default for ProgressStyle {
    /// The classic look: `#29d` bar over a dark shadow trim
    fn default() -> Self {
        Self {
            bar_rgb: (0x22, 0x99, 0xdd),
            trim_rgb: (0x30, 0x30, 0x30),
        }
    }
}

/// Indicator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Hidden,
    /// Delay timer running; the generation invalidates stale timers
    Pending { generation: u64 },
    Visible { generation: u64 },
}

/// State plus the generation counter guarding it
#[derive(Debug)]
struct Slot {
    state: State,
    counter: u64,
}

struct Inner {
    style: ProgressStyle,
    slot: Mutex<Slot>,
}

/// Delayed-show loading indicator.
pub struct ProgressIndicator {
    inner: Arc<Inner>,
}

impl ProgressIndicator {
    pub fn new(style: ProgressStyle) -> Self {
        Self {
            inner: Arc::new(Inner {
                style,
                slot: Mutex::new(Slot {
                    state: State::Hidden,
                    counter: 0,
                }),
            }),
        }
    }

    /// Schedule the indicator to appear after `delay`.
    ///
    /// While a show is pending or the indicator is visible, further calls do
    /// nothing; the earliest request wins. A [`ProgressIndicator::hide`]
    /// inside the delay means nothing is ever drawn.
    pub fn show(&self, delay: Duration) {
        let generation = {
            let mut slot = self.inner.slot.lock().unwrap();
            match slot.state {
                State::Hidden => {
                    slot.counter += 1;
                    let generation = slot.counter;
                    slot.state = State::Pending { generation };
                    generation
                }
                State::Pending { .. } | State::Visible { .. } => return,
            }
        };

        debug!("Progress show scheduled in {:?}", delay);

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !inner.reveal(generation) {
                return;
            }

            // Animate until hidden (or a newer cycle takes over)
            let mut tick = 1;
            loop {
                tokio::time::sleep(SPIN_INTERVAL).await;
                if !inner.redraw(generation, tick) {
                    return;
                }
                tick += 1;
            }
        });
    }

    /// Remove the indicator: cancel a pending show, erase a visible one.
    pub fn hide(&self) {
        let mut slot = self.inner.slot.lock().unwrap();
        match slot.state {
            State::Hidden => {}
            State::Pending { .. } => {
                debug!("Progress show cancelled before drawing");
                slot.state = State::Hidden;
            }
            State::Visible { .. } => {
                slot.state = State::Hidden;
                erase();
            }
        }
    }

    /// Whether the indicator is currently drawn
    pub fn is_visible(&self) -> bool {
        matches!(
            self.inner.slot.lock().unwrap().state,
            State::Visible { .. }
        )
    }

    /// Whether a show is scheduled but not yet drawn
    pub fn is_pending(&self) -> bool {
        matches!(
            self.inner.slot.lock().unwrap().state,
            State::Pending { .. }
        )
    }
}

impl Inner {
    /// Timer fired: transition to visible and draw the first frame.
    ///
    /// Returns false when this timer's cycle was cancelled or superseded.
    fn reveal(&self, generation: u64) -> bool {
        let mut slot = self.slot.lock().unwrap();
        if slot.state != (State::Pending { generation }) {
            return false;
        }
        slot.state = State::Visible { generation };
        draw(&self.style, 0);
        true
    }

    /// Animation tick: redraw if this cycle is still the visible one.
    ///
    /// Drawing happens under the state lock so a concurrent `hide` can never
    /// be followed by a stale frame.
    fn redraw(&self, generation: u64, tick: usize) -> bool {
        let slot = self.slot.lock().unwrap();
        if slot.state != (State::Visible { generation }) {
            return false;
        }
        draw(&self.style, tick);
        true
    }
}

fn draw(style: &ProgressStyle, tick: usize) {
    let (br, bg, bb) = style.bar_rgb;
    let (tr, tg, tb) = style.trim_rgb;
    let spinner = SPINNER[tick % SPINNER.len()];

    let mut err = io::stderr();
    let _ = write!(
        err,
        "\r\x1b[38;2;{tr};{tg};{tb}m[\x1b[38;2;{br};{bg};{bb}m{spinner} loading \x1b[38;2;{tr};{tg};{tb}m]\x1b[0m"
    );
    let _ = err.flush();
}

fn erase() {
    let mut err = io::stderr();
    let _ = write!(err, "\r\x1b[2K");
    let _ = err.flush();
}
