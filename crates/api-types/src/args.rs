//! Request payloads for the script execution calls.

use serde::{Deserialize, Serialize};

/// Arguments for executing a standalone serialized script.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecuteScriptArgs {
    pub serialized_script: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl ExecuteScriptArgs {
    pub fn new(serialized_script: impl Into<String>, dry_run: bool) -> Self {
        Self {
            serialized_script: serialized_script.into(),
            dry_run: Some(dry_run),
        }
    }
}

/// Where the engine should load a module's content from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ModuleContent {
    /// The compressed module, uploaded with the request.
    Local(Vec<u8>),
    /// The engine fetches the module by its id.
    Remote,
}

/// Arguments for executing a script module.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExecuteModuleArgs {
    pub module_id: String,
    pub content: ModuleContent,
    pub serialized_params: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
}

impl ExecuteModuleArgs {
    /// Arguments for a module whose compressed content is sent along.
    pub fn local(
        module_id: impl Into<String>,
        compressed_module: Vec<u8>,
        serialized_params: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            content: ModuleContent::Local(compressed_module),
            serialized_params: serialized_params.into(),
            dry_run: Some(dry_run),
        }
    }

    /// Arguments for a module the engine resolves remotely.
    pub fn remote(
        module_id: impl Into<String>,
        serialized_params: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            content: ModuleContent::Remote,
            serialized_params: serialized_params.into(),
            dry_run: Some(dry_run),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execute_script_args() {
        let args = ExecuteScriptArgs::new("print(\"hello\")", true);
        assert_eq!(args.serialized_script, "print(\"hello\")");
        assert_eq!(args.dry_run, Some(true));
    }

    #[test]
    fn test_module_args_content_source() {
        let local = ExecuteModuleArgs::local("github.com/org/module", vec![1, 2, 3], "{}", false);
        assert_eq!(local.content, ModuleContent::Local(vec![1, 2, 3]));
        assert_eq!(local.dry_run, Some(false));

        let remote = ExecuteModuleArgs::remote("github.com/org/module", "{\"n\":1}", true);
        assert_eq!(remote.content, ModuleContent::Remote);
        assert_eq!(remote.serialized_params, "{\"n\":1}");
    }

    #[test]
    fn test_module_content_serialization() {
        let json = serde_json::to_string(&ModuleContent::Remote).unwrap();
        assert_eq!(json, "\"remote\"");

        let json = serde_json::to_string(&ModuleContent::Local(vec![7])).unwrap();
        assert_eq!(json, r#"{"local":[7]}"#);
    }
}
