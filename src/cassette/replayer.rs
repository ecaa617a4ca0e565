//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Serves interactions from a loaded cassette, in order, per port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<(String, String), VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Take the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem if the cassette never recorded
    /// this port/method, or all its interactions were already served.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, String> {
        let available = self.available();
        let Some(queue) = self.queues.get_mut(&(port.to_string(), method.to_string())) else {
            return Err(format!(
                "no interactions recorded for {port}::{method}. Available: [{}]",
                available.join(", ")
            ));
        };
        queue
            .pop_front()
            .ok_or_else(|| format!("cassette exhausted for {port}::{method}"))
    }

    fn available(&self) -> Vec<String> {
        let mut pairs: Vec<String> =
            self.queues.keys().map(|(port, method)| format!("{port}::{method}")).collect();
        pairs.sort();
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, method: &str) -> Interaction {
        Interaction {
            seq,
            port: "image_model".into(),
            method: method.into(),
            input: json!({}),
            output: json!({"Ok": {"parts": []}}),
        }
    }

    fn cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        }
    }

    #[test]
    fn serves_in_recorded_order() {
        let mut replayer = CassetteReplayer::new(&cassette(vec![
            interaction(0, "generate_content"),
            interaction(1, "generate_content"),
        ]));
        assert_eq!(replayer.next_interaction("image_model", "generate_content").unwrap().seq, 0);
        assert_eq!(replayer.next_interaction("image_model", "generate_content").unwrap().seq, 1);
    }

    #[test]
    fn exhaustion_is_an_error() {
        let mut replayer =
            CassetteReplayer::new(&cassette(vec![interaction(0, "generate_content")]));
        replayer.next_interaction("image_model", "generate_content").unwrap();
        let err = replayer.next_interaction("image_model", "generate_content").unwrap_err();
        assert!(err.contains("exhausted"));
    }

    #[test]
    fn unknown_method_lists_available() {
        let mut replayer =
            CassetteReplayer::new(&cassette(vec![interaction(0, "generate_content")]));
        let err = replayer.next_interaction("image_model", "describe").unwrap_err();
        assert!(err.contains("no interactions recorded"));
        assert!(err.contains("image_model::generate_content"));
    }
}
