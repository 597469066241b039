//! Tolerant model of an n8n workflow document.
//!
//! Workflow JSON is third-party and loosely shaped, so every field here is
//! optional and every read is "field if present, else default". A document
//! that fails to parse as JSON at all is the caller's problem; a document
//! with odd field shapes still yields a usable record.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::path::Path;

pub const WEBHOOK_NODE_TYPE: &str = "n8n-nodes-base.webhook";
pub const EXECUTE_WORKFLOW_NODE_TYPE: &str = "n8n-nodes-base.executeWorkflow";
pub const START_NODE_TYPE: &str = "n8n-nodes-base.start";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    tags: Vec<Value>,
    #[serde(default)]
    pub settings: WorkflowSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowSettings {
    #[serde(default, rename = "executionOrder")]
    pub execution_order: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowNode {
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub parameters: NodeParameters,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeParameters {
    #[serde(default)]
    path: Value,
    #[serde(default, rename = "workflowId")]
    workflow_id: Value,
}

impl NodeParameters {
    /// Webhook path when configured as a non-empty string.
    pub fn path(&self) -> Option<&str> {
        non_empty_str(&self.path)
    }

    /// Referenced sub-workflow id when configured as a non-empty string.
    pub fn workflow_id(&self) -> Option<&str> {
        non_empty_str(&self.workflow_id)
    }
}

impl WorkflowDocument {
    /// Workflow display name, falling back to the file-derived id.
    pub fn display_name(&self, id: &str) -> String {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(id)
            .to_string()
    }

    /// Webhook paths declared by entry nodes, in node-array order.
    pub fn webhook_paths(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(|node| node.node_type == WEBHOOK_NODE_TYPE)
            .filter_map(|node| node.parameters.path())
    }

    /// Sub-workflow ids referenced by execute-workflow nodes, in node order.
    pub fn sub_workflow_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(|node| node.node_type == EXECUTE_WORKFLOW_NODE_TYPE)
            .filter_map(|node| node.parameters.workflow_id())
    }

    /// Notes on the start node, when present and non-empty.
    pub fn start_notes(&self) -> Option<&str> {
        self.nodes
            .iter()
            .find(|node| node.node_type == START_NODE_TYPE)
            .and_then(|node| node.notes.as_deref())
            .filter(|notes| !notes.is_empty())
    }

    /// Tags declared on the workflow. n8n stores these either as plain
    /// strings or as objects carrying a `name`; both shapes are accepted.
    pub fn declared_tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().filter_map(|tag| match tag {
            Value::String(name) => Some(name.as_str()),
            Value::Object(fields) => fields.get("name").and_then(Value::as_str),
            _ => None,
        })
    }
}

pub fn load_workflow_from_path(path: &Path) -> Result<WorkflowDocument> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))
}

fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(value: Value) -> WorkflowDocument {
        serde_json::from_value(value).expect("document should parse")
    }

    #[test]
    fn minimal_document_parses() {
        let doc = document(json!({}));
        assert_eq!(doc.display_name("fallback-id"), "fallback-id");
        assert_eq!(doc.webhook_paths().count(), 0);
        assert_eq!(doc.sub_workflow_ids().count(), 0);
    }

    #[test]
    fn webhook_paths_skip_unconfigured_nodes() {
        let doc = document(json!({
            "nodes": [
                {"type": WEBHOOK_NODE_TYPE, "parameters": {"path": "intake"}},
                {"type": WEBHOOK_NODE_TYPE, "parameters": {}},
                {"type": WEBHOOK_NODE_TYPE, "parameters": {"path": ""}},
                {"type": "n8n-nodes-base.set", "parameters": {"path": "not-a-webhook"}},
            ]
        }));
        assert_eq!(doc.webhook_paths().collect::<Vec<_>>(), vec!["intake"]);
    }

    #[test]
    fn non_string_parameters_are_ignored() {
        let doc = document(json!({
            "nodes": [
                {"type": EXECUTE_WORKFLOW_NODE_TYPE, "parameters": {"workflowId": {"value": 7}}},
                {"type": EXECUTE_WORKFLOW_NODE_TYPE, "parameters": {"workflowId": "error_handler"}},
            ]
        }));
        assert_eq!(
            doc.sub_workflow_ids().collect::<Vec<_>>(),
            vec!["error_handler"]
        );
    }

    #[test]
    fn declared_tags_accept_both_shapes() {
        let doc = document(json!({
            "tags": ["critical", {"name": "crm"}, 42, {"id": "no-name"}]
        }));
        assert_eq!(
            doc.declared_tags().collect::<Vec<_>>(),
            vec!["critical", "crm"]
        );
    }

    #[test]
    fn start_notes_require_content() {
        let doc = document(json!({
            "nodes": [{"type": START_NODE_TYPE, "notes": ""}]
        }));
        assert_eq!(doc.start_notes(), None);

        let doc = document(json!({
            "nodes": [{"type": START_NODE_TYPE, "notes": "Routes inbound leads"}]
        }));
        assert_eq!(doc.start_notes(), Some("Routes inbound leads"));
    }
}
