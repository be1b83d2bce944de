/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}
