//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_model;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;
use crate::error::HeadshotError;

/// Retrieve the next recorded output for a given port and method.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, HeadshotError> {
    let mut guard = replayer
        .lock()
        .map_err(|e| HeadshotError::Cassette(format!("replayer lock poisoned: {e}")))?;
    let interaction = guard.next_interaction(port, method).map_err(HeadshotError::Cassette)?;
    Ok(interaction.output)
}

/// Deserialize a replayed output recorded with the Ok/Err convention.
///
/// A recorded `Err` comes back as [`HeadshotError::Api`] with status 0 so it
/// flows through the same failure path as a live API error.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, HeadshotError> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        let message = err_val.as_str().unwrap_or("replayed error").to_string();
        return Err(HeadshotError::Api { status: 0, message });
    }
    let value = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(value)
        .map_err(|e| HeadshotError::Cassette(format!("Failed to parse recorded output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ModelResponse;
    use serde_json::json;

    #[test]
    fn replays_ok_value() {
        let response: ModelResponse =
            replay_result(json!({"Ok": {"parts": [{"text": "hello"}]}})).unwrap();
        assert_eq!(response.text(), "hello");
    }

    #[test]
    fn replays_err_as_api_error() {
        let err =
            replay_result::<ModelResponse>(json!({"Err": "API error (503): busy"})).unwrap_err();
        assert!(matches!(err, HeadshotError::Api { status: 0, .. }));
    }

    #[test]
    fn bare_value_without_wrapper() {
        let response: ModelResponse = replay_result(json!({"parts": []})).unwrap();
        assert!(response.parts.is_empty());
    }
}
