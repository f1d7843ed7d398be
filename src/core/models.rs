use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend task state. Only the three terminal labels are known to the
/// tracker; every other label is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskState {
    Success,
    Failure,
    Revoked,
    Other(String),
}

impl TaskState {
    pub fn from_label(label: &str) -> Self {
        match label {
            "SUCCESS" => TaskState::Success,
            "FAILURE" => TaskState::Failure,
            "REVOKED" => TaskState::Revoked,
            other => TaskState::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TaskState::Success => "SUCCESS",
            TaskState::Failure => "FAILURE",
            TaskState::Revoked => "REVOKED",
            TaskState::Other(label) => label,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskState::Other(_))
    }
}

impl From<String> for TaskState {
    fn from(label: String) -> Self {
        match TaskState::from_label(&label) {
            TaskState::Other(_) => TaskState::Other(label),
            known => known,
        }
    }
}

impl From<TaskState> for String {
    fn from(state: TaskState) -> Self {
        match state {
            TaskState::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw text of a status field, placed into the output as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldValue(String);

impl FieldValue {
    #[cfg(test)]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    #[serde(
        default,
        deserialize_with = "deserialize_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_records: Option<FieldValue>,
    #[serde(
        default,
        deserialize_with = "deserialize_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<FieldValue>,
    #[serde(
        default,
        deserialize_with = "deserialize_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<FieldValue>,
}

impl TaskStatus {
    #[cfg(test)]
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            total_records: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

/// The status endpoint reports running tasks with empty strings in place of
/// numbers and timestamps, so `null`, `""` and a missing key are all absent.
fn deserialize_field<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(FieldValue(s))),
        Some(Value::Number(n)) => Ok(Some(FieldValue(n.to_string()))),
        Some(Value::Bool(b)) => Ok(Some(FieldValue(b.to_string()))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a scalar status field, got {}",
            other
        ))),
    }
}
