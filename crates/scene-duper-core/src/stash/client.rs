use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::queries;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::model::SceneRecord;
use crate::ports::{CatalogQuery, SceneDeleter};
use crate::resolution::DestroyRequest;
use crate::tasks::{PluginTask, PluginTaskRunner};

const API_KEY_HEADER: &str = "ApiKey";

/// Talks to the catalog server's GraphQL endpoint.
///
/// No request timeout is set: a pending delete waits for the server.
pub struct StashClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct AllScenesData {
    #[serde(rename = "allScenes")]
    all_scenes: Vec<SceneRecord>,
}

#[derive(Debug, Deserialize)]
struct SceneDestroyData {
    #[serde(rename = "sceneDestroy")]
    scene_destroy: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PluginTasksData {
    #[serde(rename = "pluginTasks")]
    plugin_tasks: Vec<PluginTask>,
}

#[derive(Debug, Deserialize)]
struct RunPluginTaskData {
    #[serde(rename = "runPluginTask")]
    run_plugin_task: Option<Value>,
}

impl StashClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .user_agent(concat!("scene-duper/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn request<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }));
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let body = builder.send().await?.error_for_status()?.text().await?;
        decode_response(&body)
    }
}

/// Unwraps `data` from a GraphQL response body. A non-empty `errors` array
/// wins over any partial data.
pub(crate) fn decode_response<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: GraphQlResponse<T> = serde_json::from_str(body)?;
    if !response.errors.is_empty() {
        let messages: Vec<&str> = response.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(Error::GraphQl(messages.join("; ")));
    }
    response
        .data
        .ok_or_else(|| Error::MalformedResponse("response has no data".to_string()))
}

/// Loose truthiness of a mutation result: null, false, 0 and "" are failures.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[async_trait]
impl CatalogQuery for StashClient {
    async fn all_scenes(&self) -> Result<Vec<SceneRecord>> {
        let data: AllScenesData = self.request(queries::ALL_SCENES, json!({})).await?;
        debug!("Fetched {} scenes from {}", data.all_scenes.len(), self.endpoint);
        Ok(data.all_scenes)
    }
}

#[async_trait]
impl SceneDeleter for StashClient {
    async fn destroy_scene(&self, request: &DestroyRequest) -> Result<bool> {
        let variables = json!({
            "id": request.scene_id,
            "deleteGenerated": request.delete_generated,
            "deleteFile": request.delete_file,
        });
        let data: SceneDestroyData = self.request(queries::SCENE_DESTROY, variables).await?;
        Ok(is_truthy(data.scene_destroy.as_ref()))
    }
}

#[async_trait]
impl PluginTaskRunner for StashClient {
    async fn plugin_tasks(&self) -> Result<Vec<PluginTask>> {
        let data: PluginTasksData = self.request(queries::PLUGIN_TASKS, json!({})).await?;
        Ok(data.plugin_tasks)
    }

    async fn run_plugin_task(&self, plugin_id: &str) -> Result<bool> {
        let data: RunPluginTaskData = self
            .request(queries::RUN_PLUGIN_TASK, json!({ "pluginID": plugin_id }))
            .await?;
        Ok(is_truthy(data.run_plugin_task.as_ref()))
    }
}
