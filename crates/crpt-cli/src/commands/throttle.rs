use anyhow::Result;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crpt_throttle::{SlidingWindowLimiter, TimeUnit};

/// Run `callers` threads against a fresh throttle and print when each one
/// was admitted.
pub fn run_throttle(requests: usize, per: TimeUnit, callers: usize) -> Result<()> {
    let limiter = Arc::new(SlidingWindowLimiter::per(per, requests)?);
    let window = limiter.window();
    let offsets = Arc::new(Mutex::new(Vec::with_capacity(callers)));
    let start = Instant::now();

    println!(
        "Throttle: {} request(s) per {} ({} ms), {} caller(s)\n",
        requests,
        per,
        window.as_millis(),
        callers
    );

    let handles: Vec<_> = (0..callers)
        .map(|caller| {
            let limiter = Arc::clone(&limiter);
            let offsets = Arc::clone(&offsets);
            thread::spawn(move || {
                limiter.acquire();
                let offset = start.elapsed();
                offsets
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push((offset, caller));
            })
        })
        .collect();

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("throttle caller thread panicked"))?;
    }

    let mut offsets = offsets
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    offsets.sort();

    for (offset, caller) in &offsets {
        println!("  caller {:>3} admitted at {:>8} ms", caller, offset.as_millis());
    }

    let admitted: Vec<Duration> = offsets.iter().map(|(offset, _)| *offset).collect();
    println!(
        "\nMost admissions in any {} ms interval: {}",
        window.as_millis(),
        max_in_window(&admitted, window)
    );

    Ok(())
}

/// Largest number of sorted `offsets` falling inside one interval of length
/// `window`.
fn max_in_window(offsets: &[Duration], window: Duration) -> usize {
    offsets
        .iter()
        .enumerate()
        .map(|(i, start)| {
            offsets[i..]
                .iter()
                .take_while(|offset| **offset - *start < window)
                .count()
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(values: &[u64]) -> Vec<Duration> {
        values.iter().map(|v| Duration::from_millis(*v)).collect()
    }

    #[test]
    fn test_max_in_window() {
        let window = Duration::from_millis(100);
        assert_eq!(max_in_window(&[], window), 0);
        assert_eq!(max_in_window(&ms(&[0, 0, 100, 100, 200]), window), 2);
        assert_eq!(max_in_window(&ms(&[0, 10, 20, 150]), window), 3);
    }
}
