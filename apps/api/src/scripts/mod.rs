//! Script workspace — the user's editable styling scripts (YAML, JSON,
//! pseudo-code). Files live in memory and are run through the script relay.

pub mod handlers;

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

const NEW_SCRIPT_CONTENT: &str = "# New Fashion Script\n";
const NEW_SCRIPT_LANGUAGE: &str = "python";
/// Language given to an imported file whose extension is not recognized.
const IMPORTED_LANGUAGE_FALLBACK: &str = "javascript";

const CONFIG_YAML: &str = r#"# Styllen Configuration Script
# Define Outfit Parameters for AI Generation

occasion: "cocktail_party"
season: "winter"
preferences:
  style: "minimalist_chic"
  colors: ["black", "silver"]
  materials: ["silk", "velvet"]
user_profile:
  height: "175cm"
  body_type: "athletic"

# Request
generate_outfit_plan()"#;

const STYLES_JSON: &str = r#"{
  "trending_colors": ["Viva Magenta", "Electric Blue"],
  "fabric_weights": {
     "summer": "120gsm",
     "winter": "400gsm"
  }
}"#;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Script {0} not found")]
    NotFound(String),

    #[error("The workspace must keep at least one script")]
    LastFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptFile {
    pub id: String,
    pub name: String,
    pub language: String,
    pub content: String,
}

impl ScriptFile {
    fn new(name: String, language: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            language,
            content,
        }
    }
}

/// Editor language for an imported file name.
pub fn language_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("yaml" | "yml") => "yaml",
        Some("json") => "json",
        Some("py") => "python",
        Some("txt") => "plaintext",
        _ => IMPORTED_LANGUAGE_FALLBACK,
    }
}

fn seed_files() -> Vec<ScriptFile> {
    vec![
        ScriptFile {
            id: "1".to_string(),
            name: "config.yaml".to_string(),
            language: "yaml".to_string(),
            content: CONFIG_YAML.to_string(),
        },
        ScriptFile {
            id: "2".to_string(),
            name: "styles.json".to_string(),
            language: "json".to_string(),
            content: STYLES_JSON.to_string(),
        },
    ]
}

/// Ordered list of scripts. Never empty.
#[derive(Clone)]
pub struct ScriptStore {
    inner: Arc<RwLock<Vec<ScriptFile>>>,
}

impl Default for ScriptStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(seed_files())),
        }
    }
}

impl ScriptStore {
    pub async fn list(&self) -> Vec<ScriptFile> {
        self.inner.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Result<ScriptFile, ScriptError> {
        self.inner
            .read()
            .await
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| ScriptError::NotFound(id.to_string()))
    }

    /// Adds a script. Missing fields get the blank-script defaults; the
    /// name is numbered after the current file count.
    pub async fn create(
        &self,
        name: Option<String>,
        language: Option<String>,
        content: Option<String>,
    ) -> ScriptFile {
        let mut files = self.inner.write().await;
        let file = ScriptFile::new(
            name.unwrap_or_else(|| format!("script_{}.py", files.len() + 1)),
            language.unwrap_or_else(|| NEW_SCRIPT_LANGUAGE.to_string()),
            content.unwrap_or_else(|| NEW_SCRIPT_CONTENT.to_string()),
        );
        files.push(file.clone());
        file
    }

    /// Adds an imported file, picking the language from its extension.
    pub async fn import(&self, name: String, content: String) -> ScriptFile {
        let language = language_for(&name).to_string();
        self.create(Some(name), Some(language), Some(content)).await
    }

    pub async fn update(
        &self,
        id: &str,
        name: Option<String>,
        content: Option<String>,
    ) -> Result<ScriptFile, ScriptError> {
        let mut files = self.inner.write().await;
        let file = files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| ScriptError::NotFound(id.to_string()))?;
        if let Some(name) = name {
            file.name = name;
        }
        if let Some(content) = content {
            file.content = content;
        }
        Ok(file.clone())
    }

    pub async fn remove(&self, id: &str) -> Result<(), ScriptError> {
        let mut files = self.inner.write().await;
        let index = files
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| ScriptError::NotFound(id.to_string()))?;
        if files.len() == 1 {
            return Err(ScriptError::LastFile);
        }
        files.remove(index);
        Ok(())
    }
}
