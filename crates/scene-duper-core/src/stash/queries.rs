pub const ALL_SCENES: &str = r#"
query AllScenes {
    allScenes {
        id
        title
        date
        created_at
        updated_at
        files {
            path
            size
            fingerprints {
                type
                value
            }
            width
            height
            duration
        }
        paths {
            screenshot
        }
        stash_ids {
            endpoint
            stash_id
        }
    }
}
"#;

pub const SCENE_DESTROY: &str = r#"
mutation SceneDestroy($id: ID!, $deleteGenerated: Boolean!, $deleteFile: Boolean!) {
    sceneDestroy(input: { id: $id, delete_generated: $deleteGenerated, delete_file: $deleteFile })
}
"#;

pub const PLUGIN_TASKS: &str = r#"
query PluginTasks {
    pluginTasks {
        plugin {
            name
            id
        }
        name
    }
}
"#;

pub const RUN_PLUGIN_TASK: &str = r#"
mutation RunPluginTask($pluginID: ID!) {
    runPluginTask(plugin_id: $pluginID)
}
"#;
