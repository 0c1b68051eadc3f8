use serde::Serialize;

/// Strips a single trailing dot and folds ASCII case, so names compare the way DNS does.
pub fn normalize_name(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}

/// Fully-qualified form with exactly one trailing dot, as Route53 reports zone names.
pub fn fqdn(name: &str) -> String {
    format!("{}.", normalize_name(name))
}

/// A resolved hosted zone. Only the resolver builds these, so `id` and `nameservers`
/// are always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    name: String,
    id: String,
    nameservers: Vec<String>,
}

impl Zone {
    pub(crate) fn new(name: &str, id: String, nameservers: Vec<String>) -> Self {
        Self {
            name: fqdn(name),
            id,
            nameservers,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nameservers(&self) -> &[String] {
        &self.nameservers
    }
}
