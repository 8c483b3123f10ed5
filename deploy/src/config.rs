use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTRACT: &str = "WANNABENFT";

/// Constructor arguments of the current WANNABENFT deployment: two contract
/// addresses followed by a 32-byte root hash.
pub const DEFAULT_ARGS: [&str; 3] = [
    "0x01BE23585060835E02B77ef475b0Cc51aA1e0709",
    "0xb3dCcb4Cf7a26f6cf6B120Cf5A73875B7BBc655B",
    "0x2ed0feb3e7fd2022120aa84fab1945545a9f2ffc9076fd6156fa96eaff4c1311",
];

/// What to deploy: a contract name and its constructor arguments, in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    pub contract: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for DeploymentRequest {
    fn default() -> Self {
        Self {
            contract: DEFAULT_CONTRACT.to_string(),
            args: DEFAULT_ARGS.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

impl DeploymentRequest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read deployment file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid deployment file {}", path.display()))
    }

    /// Applies command line overrides. An empty `args` keeps the current ones.
    pub fn with_overrides(mut self, contract: Option<String>, args: Vec<String>) -> Self {
        if let Some(contract) = contract {
            self.contract = contract;
        }
        if !args.is_empty() {
            self.args = args;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_request() {
        let request = DeploymentRequest::default();
        assert_eq!(request.contract, "WANNABENFT");
        assert_eq!(
            request.args,
            vec![
                "0x01BE23585060835E02B77ef475b0Cc51aA1e0709",
                "0xb3dCcb4Cf7a26f6cf6B120Cf5A73875B7BBc655B",
                "0x2ed0feb3e7fd2022120aa84fab1945545a9f2ffc9076fd6156fa96eaff4c1311",
            ]
        );
    }

    #[test]
    fn overrides() {
        let request = DeploymentRequest::default().with_overrides(None, vec![]);
        assert_eq!(request, DeploymentRequest::default());

        let request = DeploymentRequest::default()
            .with_overrides(Some("Other".to_string()), vec!["0x00".to_string()]);
        assert_eq!(request.contract, "Other");
        assert_eq!(request.args, vec!["0x00"]);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "contract": "WANNABENFT",
                "args": [
                    "0xb0897686c545045aFc77CF20eC7A532E3120E0F1",
                    "0x3d2341ADb2D31f1c5530cDC622016af293177AE0",
                    "0xf86195cf7690c55907b2b611ebb7343a6f649bff128701cc542f0569e2c549da"
                ]
            }}"#
        )
        .unwrap();

        let request = DeploymentRequest::from_file(file.path()).unwrap();
        assert_eq!(request.contract, "WANNABENFT");
        assert_eq!(request.args.len(), 3);
        assert_eq!(request.args[0], "0xb0897686c545045aFc77CF20eC7A532E3120E0F1");
    }

    #[test]
    fn missing_args_default_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "contract": "Greeter" }}"#).unwrap();

        let request = DeploymentRequest::from_file(file.path()).unwrap();
        assert_eq!(request.contract, "Greeter");
        assert!(request.args.is_empty());
    }

    #[test]
    fn invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(DeploymentRequest::from_file(file.path()).is_err());
        assert!(DeploymentRequest::from_file(Path::new("/nonexistent/deployment.json")).is_err());
    }
}
