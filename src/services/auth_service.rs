//! Servicio de autenticación del conductor

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::client::FleetGateway;
use crate::dto::LoginRequest;
use crate::models::Session;
use crate::state::SessionStore;
use crate::utils::errors::{AppError, AppResult};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AuthService {
    gateway: Arc<dyn FleetGateway>,
    session: SessionStore,
}

impl AuthService {
    pub fn new(gateway: Arc<dyn FleetGateway>, session: SessionStore) -> Self {
        Self { gateway, session }
    }

    /// Login completo: token, perfil profesional y perfil de conductor.
    ///
    /// La sesión solo se guarda cuando las tres consultas han ido bien.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Session> {
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        info!("🔐 Autenticando a {}", request.username);
        // Un 401 en el login son credenciales malas, no una sesión caducada
        let response = match self.gateway.login(&request).await {
            Err(AppError::Unauthorized(_)) => {
                warn!("❌ Credenciales incorrectas para {}", request.username);
                return Err(AppError::Validation(INVALID_CREDENTIALS.to_string()));
            }
            other => other?,
        };

        let professional = self
            .gateway
            .professional_for_user(response.user.id, &response.token)
            .await?;
        let driver = self
            .gateway
            .driver_for_professional(professional.id, &response.token)
            .await?;

        let session = Session {
            user: response.user,
            token: response.token,
            professional,
            driver,
        };
        self.session.establish(session.clone()).await?;

        info!("✅ Login correcto, conductor {}", session.driver_id());
        Ok(session)
    }

    /// Logout: el aviso al backend es best-effort, la sesión local se borra siempre
    pub async fn logout(&self) -> AppResult<()> {
        if self.session.is_authenticated().await {
            if let Err(e) = self.gateway.logout().await {
                warn!("⚠️ Logout remoto falló, se borra la sesión local igualmente: {}", e);
            }
        }
        self.session.clear().await
    }

    /// Recuperar la sesión persistida al arrancar
    pub async fn restore(&self) -> AppResult<Option<Session>> {
        self.session.restore().await
    }
}
