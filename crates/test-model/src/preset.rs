use folio_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// One scripted reply of a [`ScriptedProvider`](crate::ScriptedProvider).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetReply {
    /// The call succeeds with the given text.
    #[serde(rename = "text")]
    Text(String),
    /// The call fails with an error of the given kind.
    #[serde(rename = "failure")]
    Failure(ErrorKind),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let replies = vec![
            PresetReply::Text("Una frase potente.".to_string()),
            PresetReply::Failure(ErrorKind::Transport),
        ];

        let serialized = serde_json::to_string(&replies).unwrap();
        let deserialized: Vec<PresetReply> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(replies, deserialized);
    }
}
