//! Stack parameters, optionally overridden from gantry.toml

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Parameter file probed at the stack root.
pub const PARAMS_FILE: &str = "gantry.toml";

/// Tunable stack parameters. Every field has a default matching the demo
/// stack, so a parameter file only needs the overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StackParams {
    pub cluster_name: String,
    pub kubernetes_version: String,
    pub listener_port: i64,
    pub service_port: i64,
    pub container_port: i64,
    pub replicas: i64,
    pub app_image: String,
    pub alarm_threshold: i64,
    pub alarm_evaluation_periods: i64,
}

impl Default for StackParams {
    fn default() -> Self {
        StackParams {
            cluster_name: "hello-eks".to_string(),
            kubernetes_version: "1.21".to_string(),
            listener_port: 80,
            service_port: 80,
            container_port: 8080,
            replicas: 3,
            app_image: "paulbouwer/hello-kubernetes:1.5".to_string(),
            alarm_threshold: 20,
            alarm_evaluation_periods: 3,
        }
    }
}

/// Load parameters from `gantry.toml` under root, falling back to defaults
/// when the file is absent.
pub fn load_params(root: &Path) -> anyhow::Result<StackParams> {
    let path = root.join(PARAMS_FILE);
    if !path.exists() {
        tracing::debug!("No {} found, using default parameters", PARAMS_FILE);
        return Ok(StackParams::default());
    }

    let text = std::fs::read_to_string(&path)?;
    let params: StackParams = toml::from_str(&text)?;

    tracing::debug!("Parameters loaded from: {}", path.display());
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_stack() {
        let params = StackParams::default();
        assert_eq!(params.cluster_name, "hello-eks");
        assert_eq!(params.listener_port, 80);
        assert_eq!(params.container_port, 8080);
        assert_eq!(params.alarm_threshold, 20);
    }

    #[test]
    fn test_load_params_missing_file_uses_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let params = load_params(temp_dir.path()).unwrap();
        assert_eq!(params, StackParams::default());
    }

    #[test]
    fn test_load_params_partial_override() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(PARAMS_FILE),
            "replicas = 5\nalarm_threshold = 50\n",
        )
        .unwrap();

        let params = load_params(temp_dir.path()).unwrap();
        assert_eq!(params.replicas, 5);
        assert_eq!(params.alarm_threshold, 50);
        // Untouched fields keep their defaults
        assert_eq!(params.cluster_name, "hello-eks");
    }
}
