use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Upsert,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeStatus {
    Pending,
    Insync,
}

/// A CNAME mutation for a single record, built and consumed within one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRequest {
    pub action: ChangeAction,
    pub record_name: String,
    pub value: Option<String>,
    pub ttl: Option<i64>,
}

impl ChangeRequest {
    pub fn upsert(record_name: &str, value: &str, ttl: i64) -> Self {
        Self {
            action: ChangeAction::Upsert,
            record_name: record_name.to_string(),
            value: Some(value.to_string()),
            ttl: Some(ttl),
        }
    }

    pub fn delete(record_name: &str) -> Self {
        Self {
            action: ChangeAction::Delete,
            record_name: record_name.to_string(),
            value: None,
            ttl: None,
        }
    }

    /// Delete payloads only carry the name; the type is implicitly CNAME.
    pub fn into_batch(self, comment: &str) -> ChangeBatch {
        let record_set = match self.action {
            ChangeAction::Delete => RecordSet {
                name: self.record_name,
                ttl: None,
                values: Vec::new(),
            },
            ChangeAction::Upsert => RecordSet {
                name: self.record_name,
                ttl: self.ttl,
                values: self.value.into_iter().collect(),
            },
        };

        ChangeBatch {
            action: self.action,
            record_set,
            comment: comment.to_string(),
        }
    }
}

/// A CNAME record set as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub name: String,
    pub ttl: Option<i64>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeBatch {
    pub action: ChangeAction,
    pub record_set: RecordSet,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeInfo {
    pub id: String,
    pub status: ChangeStatus,
}

/// Provider-assigned identifier of a submitted change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChangeHandle(String);

impl ChangeHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChangeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
