#![allow(dead_code)]

// Shared fixtures: a scratch workflows tree plus workflow JSON builders.

use flowcat::BuilderConfig;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temporary repository with a `workflows/` tree laid out the way the
/// builder expects. Dropped with the test.
pub struct WorkflowTree {
    temp: TempDir,
}

impl WorkflowTree {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        fs::create_dir_all(temp.path().join("workflows")).expect("create workflows dir");
        Self { temp }
    }

    pub fn root(&self) -> PathBuf {
        self.temp.path().to_path_buf()
    }

    pub fn workflows_dir(&self) -> PathBuf {
        self.temp.path().join("workflows")
    }

    pub fn config(&self) -> BuilderConfig {
        BuilderConfig::for_workflows_dir(self.workflows_dir())
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.workflows_dir().join("metadata/workflows_catalog.yaml")
    }

    /// Write a workflow document under the given root (e.g. "domains/crm").
    pub fn write_workflow(&self, root: &str, id: &str, document: &Value) -> PathBuf {
        let dir = self.workflows_dir().join(root);
        fs::create_dir_all(&dir).expect("create workflow root");
        let path = dir.join(format!("{id}.json"));
        fs::write(&path, serde_json::to_vec_pretty(document).unwrap()).expect("write workflow");
        path
    }

    /// Write raw bytes as a workflow file, for malformed-input cases.
    pub fn write_raw(&self, root: &str, file_name: &str, contents: &str) -> PathBuf {
        let dir = self.workflows_dir().join(root);
        fs::create_dir_all(&dir).expect("create workflow root");
        let path = dir.join(file_name);
        fs::write(&path, contents).expect("write raw file");
        path
    }
}

pub fn workflow(name: &str) -> Value {
    json!({"name": name, "nodes": []})
}

pub fn workflow_with_nodes(name: &str, nodes: Vec<Value>) -> Value {
    json!({"name": name, "nodes": nodes})
}

pub fn webhook_node(path: &str) -> Value {
    json!({"type": "n8n-nodes-base.webhook", "parameters": {"path": path}})
}

pub fn execute_workflow_node(workflow_id: &str) -> Value {
    json!({"type": "n8n-nodes-base.executeWorkflow", "parameters": {"workflowId": workflow_id}})
}

pub fn start_node(notes: &str) -> Value {
    json!({"type": "n8n-nodes-base.start", "notes": notes})
}
