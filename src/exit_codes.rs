//! Exit code constants for the chopstick CLI.
//!
//! - 0: Success (all workers acquired and released the resource)
//! - 1: User error (bad args, invalid configuration)
//! - 2: Retries exhausted (bounded-retry mode gave up)
//! - 3: Worker failure (a worker thread panicked)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// Retries exhausted: a worker in bounded-retry mode never acquired the resource.
pub const RETRIES_EXHAUSTED: i32 = 2;

/// Worker failure: a worker thread panicked.
pub const WORKER_FAILURE: i32 = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let codes = [SUCCESS, USER_ERROR, RETRIES_EXHAUSTED, WORKER_FAILURE];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn success_is_zero() {
        assert_eq!(SUCCESS, 0);
    }
}
