//! Replays recorded listings from a cassette.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::format::{Cassette, Interaction, Method};

/// Key for indexing interactions by method and listed path.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CallKey {
    method: Method,
    path: PathBuf,
}

/// Serves recorded interactions per (method, path) pair, in recorded order.
///
/// A walker visits directories in whatever order it likes, so lookups are
/// keyed by path rather than by global sequence.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<CallKey, Vec<Interaction>>,
    cursors: HashMap<CallKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<CallKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = CallKey { method: interaction.method, path: interaction.path.clone() };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction recorded for `method` on `path`.
    ///
    /// # Errors
    ///
    /// Returns a description of what the cassette holds when nothing (more)
    /// was recorded for this call.
    pub fn next_interaction(
        &mut self,
        method: Method,
        path: &Path,
    ) -> Result<&Interaction, String> {
        let key = CallKey { method, path: path.to_path_buf() };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> = self
                .queues
                .keys()
                .map(|k| format!("{:?} {}", k.method, k.path.display()))
                .collect();
            available.sort();
            return Err(format!(
                "cassette has no {method:?} recorded for {}; recorded calls: [{}]",
                path.display(),
                available.join(", ")
            ));
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        let Some(interaction) = queue.get(*cursor) else {
            return Err(format!(
                "cassette exhausted: all {} {method:?} calls for {} have been replayed",
                queue.len(),
                path.display()
            ));
        };
        *cursor += 1;
        Ok(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::Outcome;
    use chrono::Utc;
    use std::ffi::OsString;

    fn names(path: &str, seq: u64, names: &[&str]) -> Interaction {
        Interaction {
            seq,
            method: Method::ReadDirnames,
            path: PathBuf::from(path),
            outcome: Outcome::Names { names: names.iter().map(OsString::from).collect() },
        }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette { name: "test".into(), recorded_at: Utc::now(), interactions }
    }

    #[test]
    fn replays_per_path_in_recorded_order() {
        let cassette = make_cassette(vec![
            names("/a", 0, &["one"]),
            names("/b", 1, &["x"]),
            names("/a", 2, &["one", "two"]),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);

        let mut next_seq = |path: &str| {
            replayer.next_interaction(Method::ReadDirnames, Path::new(path)).unwrap().seq
        };
        assert_eq!(next_seq("/b"), 1);
        assert_eq!(next_seq("/a"), 0);
        assert_eq!(next_seq("/a"), 2);
    }

    #[test]
    fn exhausted_key_is_an_error() {
        let cassette = make_cassette(vec![names("/a", 0, &[])]);
        let mut replayer = CassetteReplayer::new(&cassette);
        replayer.next_interaction(Method::ReadDirnames, Path::new("/a")).unwrap();

        let err = replayer.next_interaction(Method::ReadDirnames, Path::new("/a")).unwrap_err();
        assert!(err.contains("cassette exhausted"), "{err}");
    }

    #[test]
    fn unknown_call_lists_what_was_recorded() {
        let cassette = make_cassette(vec![names("/a", 0, &[])]);
        let mut replayer = CassetteReplayer::new(&cassette);

        let err = replayer.next_interaction(Method::ReadDirents, Path::new("/a")).unwrap_err();
        assert!(err.contains("no ReadDirents recorded for /a"), "{err}");
        assert!(err.contains("ReadDirnames /a"), "{err}");
    }
}
