//! Estado de sesión compartido
//!
//! Este módulo define el `SessionStore` que se inyecta en el gateway y en
//! los servicios. Es el único estado mutable compartido: solo lo escriben
//! el login y el logout.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::models::{Driver, Professional, Session, UserEntry};
use crate::utils::errors::{AppError, AppResult};

pub const USER_KEY: &str = "user";
pub const PROFESSIONAL_KEY: &str = "professional";
pub const DRIVER_KEY: &str = "driver";

/// Almacenamiento de las tres entradas opacas de la sesión
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Leer todas las entradas presentes
    async fn load(&self) -> AppResult<HashMap<String, String>>;

    /// Reemplazar todas las entradas de una vez
    async fn save_all(&self, entries: HashMap<String, String>) -> AppResult<()>;

    /// Borrar todas las entradas
    async fn clear(&self) -> AppResult<()>;
}

/// Sesión persistida en un archivo JSON
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> AppResult<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| AppError::Session(format!("Corrupt session file: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(AppError::Session(e.to_string())),
        }
    }

    async fn save_all(&self, entries: HashMap<String, String>) -> AppResult<()> {
        let serialized = serde_json::to_string(&entries)
            .map_err(|e| AppError::Session(e.to_string()))?;

        // Escribir en un temporal y renombrar: el archivo final nunca queda a medias
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, serialized)
            .await
            .map_err(|e| AppError::Session(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| AppError::Session(e.to_string()))?;

        debug!("💾 Sesión guardada en {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Session(e.to_string())),
        }
    }
}

/// Sesión en memoria, para tests y ejecuciones efímeras
#[derive(Default)]
pub struct MemorySessionStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_raw(&self, key: &str, value: &str) {
        self.entries.write().await.insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> AppResult<HashMap<String, String>> {
        Ok(self.entries.read().await.clone())
    }

    async fn save_all(&self, entries: HashMap<String, String>) -> AppResult<()> {
        *self.entries.write().await = entries;
        Ok(())
    }

    async fn clear(&self) -> AppResult<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

/// Sesión del conductor inyectable
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Store en memoria sin sesión
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStorage::new()))
    }

    /// Recuperar la sesión persistida al arrancar.
    ///
    /// Si falta alguna de las tres entradas (o alguna no se puede leer),
    /// se borra lo que hubiera y no se restaura nada.
    pub async fn restore(&self) -> AppResult<Option<Session>> {
        let entries = match self.storage.load().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("⚠️ No se pudo leer la sesión persistida: {}", e);
                self.storage.clear().await?;
                return Ok(None);
            }
        };

        if entries.is_empty() {
            debug!("🔍 No hay sesión persistida");
            return Ok(None);
        }

        match decode_session(&entries) {
            Some(session) => {
                info!("✅ Sesión restaurada para {}", session.user.username);
                *self.current.write().await = Some(session.clone());
                Ok(Some(session))
            }
            None => {
                warn!("⚠️ Sesión persistida incompleta, se descarta");
                self.storage.clear().await?;
                Ok(None)
            }
        }
    }

    /// Guardar una sesión nueva (todo o nada) y publicarla
    pub async fn establish(&self, session: Session) -> AppResult<()> {
        let entries = encode_session(&session)?;
        self.storage.save_all(entries).await?;

        info!("🔐 Sesión iniciada para {}", session.user.username);
        *self.current.write().await = Some(session);
        Ok(())
    }

    /// Borrar la sesión local
    pub async fn clear(&self) -> AppResult<()> {
        *self.current.write().await = None;
        self.storage.clear().await?;
        info!("👋 Sesión cerrada");
        Ok(())
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Sesión activa o error de autorización
    pub async fn require(&self) -> AppResult<Session> {
        self.current()
            .await
            .ok_or_else(|| AppError::Unauthorized("No active session".to_string()))
    }

    pub async fn token(&self) -> Option<String> {
        self.current.read().await.as_ref().map(|s| s.token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }
}

fn encode_session(session: &Session) -> AppResult<HashMap<String, String>> {
    let user_entry = UserEntry {
        user: session.user.clone(),
        token: session.token.clone(),
    };

    let to_json = |value: serde_json::Result<String>| {
        value.map_err(|e| AppError::Session(e.to_string()))
    };

    let mut entries = HashMap::new();
    entries.insert(USER_KEY.to_string(), to_json(serde_json::to_string(&user_entry))?);
    entries.insert(
        PROFESSIONAL_KEY.to_string(),
        to_json(serde_json::to_string(&session.professional))?,
    );
    entries.insert(DRIVER_KEY.to_string(), to_json(serde_json::to_string(&session.driver))?);
    Ok(entries)
}

fn decode_session(entries: &HashMap<String, String>) -> Option<Session> {
    let user_entry: UserEntry = serde_json::from_str(entries.get(USER_KEY)?).ok()?;
    let professional: Professional = serde_json::from_str(entries.get(PROFESSIONAL_KEY)?).ok()?;
    let driver: Driver = serde_json::from_str(entries.get(DRIVER_KEY)?).ok()?;

    Some(Session {
        user: user_entry.user,
        token: user_entry.token,
        professional,
        driver,
    })
}
