//! The ObjectId generator: a 12-byte identifier composed of a big-endian
//! timestamp, a per-process random field, and a monotonic counter (§3, §4.9).
//!
//! Process-wide state (the remembered pid, `process_random`, and `counter`)
//! lives behind a single `Mutex` guarded by a lazily-initialized
//! `OnceLock`, mirroring the teacher's use of one process-wide `AtomicU32`
//! (`cli::constants::DISPLAY_LEVEL`) for its own global state: one lazily
//! initialized global, locked only as long as a `next()` call needs it.

use std::sync::{Mutex, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

struct State {
    pid: u32,
    process_random: [u8; 5],
    counter: u32,
}

impl State {
    fn fresh(pid: u32) -> Self {
        let mut rng = rand::thread_rng();
        State {
            pid,
            process_random: rng.gen(),
            counter: rng.gen_range(0..(1 << 24)),
        }
    }
}

fn state() -> &'static Mutex<State> {
    static STATE: OnceLock<Mutex<State>> = OnceLock::new();
    STATE.get_or_init(|| Mutex::new(State::fresh(current_pid())))
}

fn current_pid() -> u32 {
    std::process::id()
}

/// Generates ObjectId byte sequences: 12 bytes of
/// `[big-endian timestamp][5-byte process-random][big-endian counter]`.
#[derive(Debug, Default)]
pub struct ObjectIdGenerator;

impl ObjectIdGenerator {
    pub fn new() -> Self {
        ObjectIdGenerator
    }

    /// Produces the next 12-byte ObjectId. `time` overrides the timestamp
    /// field with the given Unix seconds; `None` uses the current time.
    ///
    /// Detects a pid change (e.g. after `fork()`) on every call and
    /// regenerates `process_random` so a forked child never repeats a
    /// parent's random field (§5, "Signal/fork safety").
    pub fn next(&self, time: Option<u32>) -> [u8; 12] {
        let t = time.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("system clock is before the Unix epoch")
                .as_secs() as u32
        });

        let mut guard = state().lock().expect("ObjectId state mutex poisoned");
        let pid = current_pid();
        if guard.pid != pid {
            *guard = State::fresh(pid);
        }

        let r = guard.process_random;
        let c = (guard.counter << 8).to_be_bytes();
        guard.counter = (guard.counter + 1) & 0x00FF_FFFF;
        drop(guard);

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&t.to_be_bytes());
        bytes[4..9].copy_from_slice(&r);
        bytes[9..12].copy_from_slice(&c[0..3]);
        bytes
    }

    /// Test aid: resets the counter to `value`, or to a fresh random value
    /// when `None`. Does not touch `process_random` or the remembered pid.
    pub fn reset_counter(&self, value: Option<u32>) {
        let mut guard = state().lock().expect("ObjectId state mutex poisoned");
        guard.counter = match value {
            Some(v) => v & 0x00FF_FFFF,
            None => rand::thread_rng().gen_range(0..(1 << 24)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// `ObjectIdGenerator` shares one process-wide counter (§5); tests that
    /// assert its exact value across calls must not interleave with each
    /// other when the harness runs tests in parallel threads.
    static COUNTER_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn next_produces_twelve_bytes() {
        let gen = ObjectIdGenerator::new();
        let id = gen.next(None);
        assert_eq!(id.len(), 12);
    }

    #[test]
    fn timestamp_field_matches_supplied_time() {
        let gen = ObjectIdGenerator::new();
        let id = gen.next(Some(0x6123_4567));
        assert_eq!(&id[0..4], &0x6123_4567u32.to_be_bytes());
    }

    #[test]
    fn successive_calls_increment_counter_by_one() {
        let _guard = COUNTER_TEST_LOCK.lock().unwrap();
        let gen = ObjectIdGenerator::new();
        gen.reset_counter(Some(41));
        let a = gen.next(Some(0));
        let b = gen.next(Some(0));
        assert_eq!(&a[0..9], &b[0..9]);
        let ca = u32::from_be_bytes([0, a[9], a[10], a[11]]);
        let cb = u32::from_be_bytes([0, b[9], b[10], b[11]]);
        assert_eq!(cb, ca + 1);
    }

    #[test]
    fn counter_wraps_mod_2_24() {
        let _guard = COUNTER_TEST_LOCK.lock().unwrap();
        let gen = ObjectIdGenerator::new();
        gen.reset_counter(Some(0x00FF_FFFF));
        let a = gen.next(Some(0));
        let b = gen.next(Some(0));
        let ca = u32::from_be_bytes([0, a[9], a[10], a[11]]);
        let cb = u32::from_be_bytes([0, b[9], b[10], b[11]]);
        assert_eq!(ca, 0x00FF_FFFF);
        assert_eq!(cb, 0);
    }

    #[test]
    fn reset_counter_to_explicit_value_is_honored() {
        let _guard = COUNTER_TEST_LOCK.lock().unwrap();
        let gen = ObjectIdGenerator::new();
        gen.reset_counter(Some(100));
        let id = gen.next(Some(0));
        let c = u32::from_be_bytes([0, id[9], id[10], id[11]]);
        assert_eq!(c, 100);
    }
}
