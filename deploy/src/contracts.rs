use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use ethers::{
    abi::{
        token::{LenientTokenizer, Tokenizer},
        Abi, Token,
    },
    types::Bytes,
};
use serde::Deserialize;
use walkdir::WalkDir;

/// Compiled contract as emitted by Hardhat under `artifacts/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    #[serde(default)]
    pub source_name: String,
    pub abi: Abi,
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read artifact {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid artifact {}", path.display()))
    }

    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Tokenizes `args` against the constructor inputs, keeping their order.
    pub fn encode_constructor_args(&self, args: &[String]) -> Result<Vec<Token>> {
        let inputs = self
            .abi
            .constructor
            .as_ref()
            .map(|constructor| constructor.inputs.as_slice())
            .unwrap_or_default();

        if inputs.len() != args.len() {
            bail!(
                "contract {} expects {} constructor argument(s), got {}",
                self.contract_name,
                inputs.len(),
                args.len()
            );
        }

        inputs
            .iter()
            .zip(args)
            .map(|(param, value)| {
                LenientTokenizer::tokenize(&param.kind, value).map_err(|err| {
                    anyhow!(
                        "invalid value {:?} for constructor parameter `{}` ({}): {}",
                        value,
                        param.name,
                        param.kind,
                        err
                    )
                })
            })
            .collect()
    }
}

/// Lookup over a Hardhat artifacts directory.
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolves `name` to a deployable artifact. Accepts a bare contract name
    /// or a fully qualified `path/To.sol:Name`.
    pub fn contract_factory(&self, name: &str) -> Result<Artifact> {
        if !self.root.is_dir() {
            bail!("artifacts directory {} not found", self.root.display());
        }

        let (path, contract_name) = match name.split_once(':') {
            Some((source, contract_name)) => (
                self.root.join(source).join(format!("{contract_name}.json")),
                contract_name,
            ),
            None => (self.find(name)?, name),
        };
        if !path.is_file() {
            bail!("artifact for contract {:?} not found", name);
        }

        let artifact = Artifact::from_file(&path)?;
        if artifact.contract_name != contract_name {
            bail!(
                "artifact {} holds contract {}, expected {}",
                path.display(),
                artifact.contract_name,
                contract_name
            );
        }
        if artifact.bytecode.is_empty() {
            bail!(
                "contract {} has no bytecode, it is abstract or an interface",
                artifact.fully_qualified_name()
            );
        }

        log::info!("resolved artifact {}", artifact.fully_qualified_name());
        Ok(artifact)
    }

    fn find(&self, name: &str) -> Result<PathBuf> {
        let file_name = format!("{name}.json");
        let mut candidates = Vec::new();
        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != "build-info")
        {
            let entry = entry?;
            if entry.file_type().is_file() && entry.file_name() == file_name.as_str() {
                candidates.push(entry.into_path());
            }
        }

        match candidates.len() {
            0 => Err(anyhow!("artifact for contract {:?} not found", name)),
            1 => Ok(candidates.remove(0)),
            _ => {
                candidates.sort();
                let candidates = candidates
                    .iter()
                    .map(|path| format!("  {}", path.display()))
                    .collect::<Vec<_>>()
                    .join("\n");
                Err(anyhow!(
                    "multiple artifacts for contract {:?}, use the fully qualified name:\n{}",
                    name,
                    candidates
                ))
            }
        }
    }
}
