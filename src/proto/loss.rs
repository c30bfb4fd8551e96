//! Test affordance: an independent Bernoulli packet drop plus an
//! artificial per-send delay, applied by both senders (on data
//! packets) and both receivers (on the ack path). Not protocol
//! behaviour — must be disableable, which it is via `loss_rate = 0.0`
//! and `send_delay = Duration::ZERO`.

use std::thread;
use std::time::Duration;

use rand::Rng;

pub struct LossInjector {
    loss_rate: f64,
    send_delay: Duration,
}

impl LossInjector {
    pub fn new(loss_rate: f64, send_delay: Duration) -> Self {
        LossInjector {
            loss_rate,
            send_delay,
        }
    }

    /// `true` roughly `loss_rate` of the time. Never drops when
    /// `loss_rate == 0.0`.
    pub fn should_drop(&self) -> bool {
        if self.loss_rate <= 0.0 {
            return false;
        }
        rand::thread_rng().gen_bool(self.loss_rate.min(1.0))
    }

    /// Sleeps for the configured artificial transfer delay, if any.
    pub fn delay(&self) {
        if !self.send_delay.is_zero() {
            thread::sleep(self.send_delay);
        }
    }
}
