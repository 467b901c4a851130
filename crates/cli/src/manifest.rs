use anyhow::{Context, Result, bail};
use sigmatch::{Signature, ValueType};
use sigmatch_metadata::{ParameterSpec, SignatureManifest, SignatureSpec};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST_NAME: &str = "signatures.json";

#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub path: PathBuf,
    pub manifest: SignatureManifest,
}

impl LoadedManifest {
    /// Build all declared signatures, naming the manifest on failure.
    pub fn signatures(&self) -> Result<Vec<Signature>> {
        let signatures = self
            .manifest
            .build_all()
            .with_context(|| format!("invalid manifest: {}", self.path.display()))?;
        tracing::debug!(
            count = signatures.len(),
            path = %self.path.display(),
            "loaded signatures"
        );
        Ok(signatures)
    }
}

pub fn load_manifest(manifest_path: &Path) -> Result<LoadedManifest> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let path = resolve_against(&cwd, manifest_path);

    if !path.exists() {
        bail!("manifest not found: {}", path.display());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read manifest: {}", path.display()))?;
    let manifest: SignatureManifest = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse manifest JSON: {}", path.display()))?;

    Ok(LoadedManifest { path, manifest })
}

fn default_specs() -> Vec<SignatureSpec> {
    vec![
        SignatureSpec {
            command: vec!["greet".to_string()],
            parameters: vec![ParameterSpec {
                name: "name".to_string(),
                types: vec![ValueType::String],
                description: "Who to greet".to_string(),
                optional: true,
                variadic: false,
            }],
            description: "Print a greeting".to_string(),
        },
        SignatureSpec {
            command: vec!["sum".to_string()],
            parameters: vec![ParameterSpec {
                name: "numbers".to_string(),
                types: vec![ValueType::Number],
                description: "Numbers to add".to_string(),
                optional: false,
                variadic: true,
            }],
            description: "Add numbers together".to_string(),
        },
    ]
}

pub fn write_default_manifest(project_dir: &Path, overwrite: bool) -> Result<PathBuf> {
    let dest = project_dir.join(DEFAULT_MANIFEST_NAME);
    if dest.exists() && !overwrite {
        bail!("{} already exists", dest.display());
    }

    let manifest =
        SignatureManifest::new(&default_specs()).context("failed to encode default signatures")?;
    let mut out =
        serde_json::to_string_pretty(&manifest).context("failed to serialize manifest")?;
    out.push('\n');

    let tmp = dest.with_extension("tmp");
    fs::write(&tmp, out.as_bytes())
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    if overwrite && dest.exists() {
        fs::remove_file(&dest).with_context(|| format!("failed to remove {}", dest.display()))?;
    }
    fs::rename(&tmp, &dest)
        .with_context(|| format!("failed to move {} into place", dest.display()))?;
    Ok(dest)
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_temp_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let pid = std::process::id();
        let dir = std::env::temp_dir().join(format!("sigmatch-{prefix}-{pid}-{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn manifest_deserializes_camel_case() {
        let json = r#"{
  "schemaVersion": 1,
  "signatures": [
    {
      "command": ["foo", "bar"],
      "parameters": [
        { "name": "baz", "type": ["string"], "optional": true }
      ]
    }
  ]
}"#;
        let m: SignatureManifest = serde_json::from_str(json).unwrap();
        assert_eq!(m.schema_version, Some(1));
        let signatures = m.build_all().unwrap();
        assert_eq!(signatures.len(), 1);
        assert_eq!(signatures[0].to_string(), "foo bar [baz]");
    }

    #[test]
    fn write_default_manifest_round_trips() {
        let dir = make_temp_dir("manifest-defaults");
        let dest = write_default_manifest(&dir, false).unwrap();
        assert!(!dir.join("signatures.tmp").exists());

        let loaded = load_manifest(&dest).unwrap();
        let rendered: Vec<String> = loaded
            .signatures()
            .unwrap()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(rendered, vec!["greet [name]", "sum <numbers...>"]);

        assert!(write_default_manifest(&dir, false).is_err());
        write_default_manifest(&dir, true).unwrap();

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_manifest_resolves_relative_paths() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            resolve_against(&cwd, Path::new(DEFAULT_MANIFEST_NAME)),
            cwd.join(DEFAULT_MANIFEST_NAME)
        );
        let absolute = std::env::temp_dir().join("abs.json");
        assert_eq!(resolve_against(&cwd, &absolute), absolute);
    }

    #[test]
    fn load_manifest_reports_missing_file() {
        let dir = make_temp_dir("manifest-missing");
        let err = load_manifest(&dir.join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("manifest not found"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn signatures_names_manifest_on_invalid_entry() {
        let dir = make_temp_dir("manifest-invalid");
        let path = dir.join(DEFAULT_MANIFEST_NAME);
        fs::write(
            &path,
            r#"{ "signatures": [ { "command": ["x"], "parameters": [ { "name": "a", "optional": true }, { "name": "b" } ] } ] }"#,
        )
        .unwrap();
        let err = load_manifest(&path).unwrap().signatures().unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("invalid manifest"), "{chain}");
        assert!(chain.contains("required parameter after an optional parameter"), "{chain}");
        let _ = fs::remove_dir_all(&dir);
    }
}
