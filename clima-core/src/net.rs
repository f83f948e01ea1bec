use std::{future::Future, time::Duration};

use crate::error::Error;

/// Default wall-clock deadline for a single service call, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 8_000;

/// Race a request future against a fixed deadline.
///
/// The timer lives inside this wrapper and is dropped on every exit path, so
/// no cancellation can fire after the call has completed. Expiry aborts the
/// pending call and surfaces as [`Error::Timeout`], which callers report
/// with the dedicated timed-out message rather than the generic one.
pub async fn with_deadline<T, F>(deadline: Duration, fut: F) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn completes_before_the_deadline() {
        let out = with_deadline(Duration::from_millis(100), async { Ok::<_, Error>(7) }).await;
        assert_eq!(out.unwrap(), 7);
    }

    #[tokio::test]
    async fn expiry_maps_to_the_timeout_error() {
        let out: Result<(), Error> = with_deadline(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;

        assert!(matches!(out, Err(Error::Timeout)));
    }

    #[tokio::test]
    async fn inner_errors_pass_through_unchanged() {
        let out: Result<(), Error> = with_deadline(Duration::from_millis(100), async {
            Err(Error::NotFound)
        })
        .await;

        assert!(matches!(out, Err(Error::NotFound)));
    }
}
