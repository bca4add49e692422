//! Poll scheduling.

use std::time::Duration;

use async_stream::stream;
use futures_timer::Delay;
use futures_util::Stream;

/// Tick numbers starting at `0`: one immediately, then one per `interval`.
///
/// Uses `futures-timer`, so it runs on any executor, including the browser.
/// The interval is measured from when the consumer polls for the next tick,
/// so a slow refresh delays the next one instead of piling up.
pub fn ticks(interval: Duration) -> impl Stream<Item = u64> {
    stream! {
        let mut n = 0u64;
        loop {
            yield n;
            n += 1;
            Delay::new(interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[tokio::test]
    async fn test_first_tick_is_immediate() {
        let started = std::time::Instant::now();
        let ticks: Vec<u64> = ticks(Duration::from_millis(20)).take(3).collect().await;
        assert_eq!(ticks, vec![0, 1, 2]);
        assert!(started.elapsed() >= Duration::from_millis(40));
    }
}
