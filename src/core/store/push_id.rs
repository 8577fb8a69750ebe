//! Time-ordered unique keys.
//!
//! 20 characters: 8 encode the millisecond timestamp, 12 are random. Keys
//! sort lexicographically in creation order. Within one millisecond the
//! random part is incremented instead of regenerated, so keys from one
//! generator stay strictly increasing.

use rand::Rng;

const PUSH_CHARS: &[u8; 64] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

/// Stateful push id generator.
#[derive(Debug, Default)]
pub struct PushIdGenerator {
    last_millis: i64,
    last_random: [u8; 12],
}

impl PushIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose keys all sort after `key`, an existing push id.
    /// Falls back to a fresh generator when `key` is not one.
    pub fn after(key: &str) -> Self {
        let digits: Option<Vec<u8>> = key
            .bytes()
            .map(|b| PUSH_CHARS.iter().position(|&c| c == b).map(|i| i as u8))
            .collect();
        match digits {
            Some(digits) if digits.len() == 20 => {
                let last_millis = digits[..8]
                    .iter()
                    .fold(0i64, |acc, &d| acc * 64 + i64::from(d));
                let mut last_random = [0u8; 12];
                last_random.copy_from_slice(&digits[8..]);
                Self {
                    last_millis,
                    last_random,
                }
            }
            _ => Self::default(),
        }
    }

    /// Next key for the current wall clock.
    pub fn next_id(&mut self) -> String {
        self.next_id_at(chrono::Utc::now().timestamp_millis())
    }

    /// Next key for an explicit timestamp.
    pub fn next_id_at(&mut self, millis: i64) -> String {
        // A clock step backwards must not reorder keys.
        let millis = millis.max(self.last_millis);
        let duplicate = millis == self.last_millis;
        self.last_millis = millis;

        if duplicate {
            for i in (0..12).rev() {
                if self.last_random[i] == 63 {
                    self.last_random[i] = 0;
                } else {
                    self.last_random[i] += 1;
                    break;
                }
            }
        } else {
            let mut rng = rand::thread_rng();
            for slot in self.last_random.iter_mut() {
                *slot = rng.gen_range(0..64);
            }
        }

        let mut id = Vec::with_capacity(20);
        let mut now = millis;
        let mut time_chars = [0u8; 8];
        for slot in time_chars.iter_mut().rev() {
            *slot = PUSH_CHARS[(now % 64) as usize];
            now /= 64;
        }
        id.extend_from_slice(&time_chars);
        id.extend(self.last_random.iter().map(|&i| PUSH_CHARS[i as usize]));

        String::from_utf8_lossy(&id).into_owned()
    }
}
