use ahash::AHashMap;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::error::Result;

pub const TASK_SUCCEEDED: &str = "Task ran successfully";
pub const TASK_FAILED: &str = "Failed to run task";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PluginTask {
    pub plugin: PluginRef,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginGroup {
    pub id: String,
    pub name: String,
    pub tasks: Vec<PluginTask>,
}

#[async_trait]
pub trait PluginTaskRunner: Send + Sync {
    async fn plugin_tasks(&self) -> Result<Vec<PluginTask>>;
    async fn run_plugin_task(&self, plugin_id: &str) -> Result<bool>;
}

/// Groups tasks by plugin id. Groups are ordered by plugin name
/// (case-insensitive); tasks keep the order the server returned.
pub fn group_by_plugin(tasks: Vec<PluginTask>) -> Vec<PluginGroup> {
    let mut groups: Vec<PluginGroup> = Vec::new();
    let mut positions: AHashMap<String, usize> = AHashMap::new();

    for task in tasks {
        let position = *positions.entry(task.plugin.id.clone()).or_insert_with(|| {
            groups.push(PluginGroup {
                id: task.plugin.id.clone(),
                name: task.plugin.name.clone(),
                tasks: Vec::new(),
            });
            groups.len() - 1
        });
        groups[position].tasks.push(task);
    }

    groups.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    groups
}

/// Runs the plugin's task; any error counts as a failed run.
pub async fn run_task(runner: &dyn PluginTaskRunner, plugin_id: &str) -> bool {
    match runner.run_plugin_task(plugin_id).await {
        Ok(result) => result,
        Err(err) => {
            warn!("Error running plugin task for {}: {}", plugin_id, err);
            false
        }
    }
}
