//! Knowledge base: units, formula identifiers and hint texts.
//!
//! A knowledge base is a TOML-defined bundle that is loaded once at startup
//! and only read afterwards. One knowledge base is bundled into the binary;
//! others can be loaded from a file or discovered in a directory. When no
//! knowledge base can be loaded the process runs in degraded mode: lookups
//! return `None` and callers substitute built-in constants.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::hint::HintKey;
use crate::quantity::{Formula, QuantityKind};

// ── Errors ──────────────────────────────────────────────────────────────

#[derive(Debug, Error, Diagnostic)]
pub enum KnowledgeError {
    #[error("Knowledge base not available; cannot build problem.")]
    #[diagnostic(
        code(newton::knowledge::unavailable),
        help(
            "The service started without a knowledge base. Check the startup log and the \
             NEWTON_KNOWLEDGE setting, then restart."
        )
    )]
    Unavailable,

    #[error("no knowledge base found in {dir}")]
    #[diagnostic(
        code(newton::knowledge::not_found),
        help("Place one of newton.toml, newton-second-law.toml or knowledge.toml in the directory.")
    )]
    NotFound { dir: String },

    #[error("failed to read knowledge file: {path}")]
    #[diagnostic(code(newton::knowledge::io), help("Ensure the file exists and is readable."))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse knowledge base {origin}: {message}")]
    #[diagnostic(
        code(newton::knowledge::parse),
        help("Check the TOML syntax against data/knowledge/newton.toml.")
    )]
    Parse { origin: String, message: String },

    #[error("invalid knowledge base \"{id}\": {message}")]
    #[diagnostic(
        code(newton::knowledge::invalid),
        help(
            "Each quantity, formula target and hint key may appear at most once, \
             with non-empty text."
        )
    )]
    Invalid { id: String, message: String },
}

pub type KnowledgeResult<T> = std::result::Result<T, KnowledgeError>;

// ── Read-only lookup interface ──────────────────────────────────────────

/// Narrow read-only view of a knowledge base.
pub trait KnowledgeSource: Send + Sync {
    /// Canonical unit symbol for a quantity.
    fn unit_symbol(&self, kind: QuantityKind) -> Option<&str>;

    /// Remediation text for a hint key.
    fn hint_text(&self, key: HintKey) -> Option<&str>;

    /// Identifier of the formula individual for a rearrangement.
    fn formula_id(&self, formula: Formula) -> Option<&str>;
}

// ── Data model ──────────────────────────────────────────────────────────

/// Where a knowledge base came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnowledgeOrigin {
    /// Bundled into the binary via `include_str!`.
    Bundled,
    /// Loaded from a file on disk.
    File(PathBuf),
}

impl std::fmt::Display for KnowledgeOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bundled => f.write_str("(bundled)"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitEntry {
    pub quantity: QuantityKind,
    pub symbol: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormulaEntry {
    pub target: QuantityKind,
    pub id: String,
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HintEntry {
    pub key: HintKey,
    pub text: String,
}

/// A loaded knowledge base. Immutable once built.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub origin: KnowledgeOrigin,
    units: HashMap<QuantityKind, UnitEntry>,
    formulas: HashMap<QuantityKind, FormulaEntry>,
    hints: HashMap<HintKey, HintEntry>,
}

// ── TOML deserialization helpers ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct KnowledgeToml {
    knowledge: KnowledgeMeta,
    #[serde(default)]
    units: Vec<UnitEntry>,
    #[serde(default)]
    formulas: Vec<FormulaEntry>,
    #[serde(default)]
    hints: Vec<HintEntry>,
}

#[derive(Debug, Deserialize)]
struct KnowledgeMeta {
    id: String,
    name: String,
    version: String,
    #[serde(default)]
    description: String,
}

const BUNDLED_TOML: &str = include_str!("../../data/knowledge/newton.toml");

/// File names tried, in order, when searching a directory.
pub const CANDIDATE_FILE_NAMES: [&str; 3] =
    ["newton.toml", "newton-second-law.toml", "knowledge.toml"];

fn index_unique<K, V>(
    id: &str,
    what: &str,
    entries: Vec<V>,
    key: impl Fn(&V) -> K,
) -> KnowledgeResult<HashMap<K, V>>
where
    K: std::hash::Hash + Eq + std::fmt::Debug,
{
    let mut map = HashMap::with_capacity(entries.len());
    for entry in entries {
        let k = key(&entry);
        if map.contains_key(&k) {
            return Err(KnowledgeError::Invalid {
                id: id.to_string(),
                message: format!("duplicate {what} entry for {k:?}"),
            });
        }
        map.insert(k, entry);
    }
    Ok(map)
}

impl KnowledgeBase {
    /// Parse a knowledge base from TOML text.
    pub fn parse(toml_str: &str, origin: KnowledgeOrigin) -> KnowledgeResult<Self> {
        let parsed: KnowledgeToml =
            toml::from_str(toml_str).map_err(|e| KnowledgeError::Parse {
                origin: origin.to_string(),
                message: e.to_string(),
            })?;
        let id = parsed.knowledge.id;

        if let Some(u) = parsed.units.iter().find(|u| u.symbol.trim().is_empty()) {
            return Err(KnowledgeError::Invalid {
                id,
                message: format!("empty unit symbol for {}", u.quantity),
            });
        }
        if let Some(h) = parsed.hints.iter().find(|h| h.text.trim().is_empty()) {
            return Err(KnowledgeError::Invalid {
                id,
                message: format!("empty text for hint \"{}\"", h.key),
            });
        }

        let units = index_unique(&id, "unit", parsed.units, |u| u.quantity)?;
        let formulas = index_unique(&id, "formula", parsed.formulas, |f| f.target)?;
        let hints = index_unique(&id, "hint", parsed.hints, |h| h.key)?;

        Ok(Self {
            id,
            name: parsed.knowledge.name,
            version: parsed.knowledge.version,
            description: parsed.knowledge.description,
            origin,
            units,
            formulas,
            hints,
        })
    }

    /// The knowledge base compiled into the binary.
    pub fn bundled() -> KnowledgeResult<Self> {
        Self::parse(BUNDLED_TOML, KnowledgeOrigin::Bundled)
    }

    /// Load a knowledge base from a TOML file.
    pub fn load_file(path: &Path) -> KnowledgeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| KnowledgeError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, KnowledgeOrigin::File(path.to_path_buf()))
    }

    /// Search `dir` for the first candidate file that loads, skipping `exclude`.
    pub fn discover(dir: &Path, exclude: Option<&Path>) -> KnowledgeResult<Self> {
        for name in CANDIDATE_FILE_NAMES {
            let candidate = dir.join(name);
            if Some(candidate.as_path()) == exclude || !candidate.is_file() {
                continue;
            }
            match Self::load_file(&candidate) {
                Ok(kb) => return Ok(kb),
                Err(e) => {
                    tracing::warn!(
                        path = %candidate.display(),
                        "Failed to load knowledge candidate: {e}"
                    );
                }
            }
        }
        Err(KnowledgeError::NotFound {
            dir: dir.display().to_string(),
        })
    }

    /// Unit entries sorted in slot order.
    pub fn units(&self) -> Vec<&UnitEntry> {
        QuantityKind::ALL
            .iter()
            .filter_map(|k| self.units.get(k))
            .collect()
    }

    /// Formula entries sorted in slot order.
    pub fn formulas(&self) -> Vec<&FormulaEntry> {
        QuantityKind::ALL
            .iter()
            .filter_map(|k| self.formulas.get(k))
            .collect()
    }
}

impl KnowledgeSource for KnowledgeBase {
    fn unit_symbol(&self, kind: QuantityKind) -> Option<&str> {
        self.units.get(&kind).map(|u| u.symbol.as_str())
    }

    fn hint_text(&self, key: HintKey) -> Option<&str> {
        self.hints.get(&key).map(|h| h.text.as_str())
    }

    fn formula_id(&self, formula: Formula) -> Option<&str> {
        self.formulas.get(&formula.target()).map(|f| f.id.as_str())
    }
}

// ── Startup configuration ────────────────────────────────────────────────

/// Which knowledge base to load at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KnowledgeConfig {
    #[default]
    Bundled,
    File(PathBuf),
    Directory(PathBuf),
    /// Run without a knowledge base (degraded mode).
    Disabled,
}

impl KnowledgeConfig {
    /// Interpret a user setting: `none`/`off` disables, a directory is
    /// searched, anything else is a file path.
    pub fn from_setting(value: &str) -> Self {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "" | "bundled" => Self::Bundled,
            "none" | "off" => Self::Disabled,
            _ => {
                let path = PathBuf::from(value);
                if path.is_dir() {
                    Self::Directory(path)
                } else {
                    Self::File(path)
                }
            }
        }
    }
}

// ── Shared handle ───────────────────────────────────────────────────────

/// Immutable, cheaply cloneable handle to the startup knowledge base.
#[derive(Debug, Clone, Default)]
pub struct Knowledge {
    base: Option<Arc<KnowledgeBase>>,
}

impl Knowledge {
    pub fn new(base: KnowledgeBase) -> Self {
        Self {
            base: Some(Arc::new(base)),
        }
    }

    /// A handle in degraded mode.
    pub fn unavailable() -> Self {
        Self { base: None }
    }

    /// Load according to `config`. Never fails: load errors are logged and
    /// yield a degraded handle.
    pub fn load(config: &KnowledgeConfig) -> Self {
        match Self::try_load(config) {
            Ok(Some(kb)) => {
                tracing::info!(
                    id = %kb.id,
                    version = %kb.version,
                    origin = %kb.origin,
                    "Knowledge base loaded"
                );
                Self::new(kb)
            }
            Ok(None) => {
                tracing::warn!("Knowledge base disabled; running in degraded mode");
                Self::unavailable()
            }
            Err(e) => {
                tracing::error!("Could not load knowledge base: {e}");
                Self::unavailable()
            }
        }
    }

    fn try_load(config: &KnowledgeConfig) -> KnowledgeResult<Option<KnowledgeBase>> {
        match config {
            KnowledgeConfig::Bundled => KnowledgeBase::bundled().map(Some),
            KnowledgeConfig::Directory(dir) => KnowledgeBase::discover(dir, None).map(Some),
            KnowledgeConfig::File(path) => match KnowledgeBase::load_file(path) {
                Ok(kb) => Ok(Some(kb)),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        "Failed to load knowledge file, trying sibling candidates: {e}"
                    );
                    let dir = path
                        .parent()
                        .filter(|p| !p.as_os_str().is_empty())
                        .unwrap_or_else(|| Path::new("."));
                    KnowledgeBase::discover(dir, Some(path)).map(Some).map_err(|_| e)
                }
            },
            KnowledgeConfig::Disabled => Ok(None),
        }
    }

    pub fn is_available(&self) -> bool {
        self.base.is_some()
    }

    pub fn base(&self) -> Option<&KnowledgeBase> {
        self.base.as_deref()
    }

    pub fn source(&self) -> Option<&dyn KnowledgeSource> {
        self.base.as_deref().map(|kb| kb as &dyn KnowledgeSource)
    }
}
