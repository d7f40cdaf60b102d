use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;
use tracing::{info, instrument};

use super::domain::{LoginInput, NewUsuario, RegisterInput, Usuario};
use super::repository::UserRepository;
use crate::admin::{require_admin, AdminAuthorizer};
use crate::errors::ServiceError;
use crate::input::text;

pub const USUARIO_NO_ENCONTRADO: &str = "Usuario no encontrado";
pub const CREDENCIALES_INCORRECTAS: &str = "Credenciales incorrectas.";

pub fn hash_password(plain: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Db(format!("password hash: {e}")))
}

fn verify_password(plain: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// Minimal shape check: something before and after a single `@`.
fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Users business service independent of web framework
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    admin: Arc<dyn AdminAuthorizer>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>, admin: Arc<dyn AdminAuthorizer>) -> Self {
        Self { repo, admin }
    }

    /// Register a new user with an argon2-hashed password.
    ///
    /// Checks run in order: required fields, email taken, phone taken,
    /// phone blank, phone digit count (8 to 12 after stripping non-digits).
    #[instrument(skip(self, input), fields(email = ?input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<Usuario, ServiceError> {
        let nombre = text(&input.nombre)
            .ok_or_else(|| ServiceError::validation("El nombre no puede estar vacío"))?;
        let email = text(&input.email)
            .ok_or_else(|| ServiceError::validation("El email no puede estar vacío"))?;
        if !looks_like_email(email) {
            return Err(ServiceError::validation("Email inválido"));
        }
        let contrasena = input
            .contrasena
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ServiceError::validation("La contraseña no puede estar vacía"))?;
        let telefono = input.telefono.as_deref().map(str::trim).unwrap_or_default();

        if self.repo.exists_by_email(email).await? {
            return Err(ServiceError::validation("El correo ya está registrado"));
        }
        if !telefono.is_empty() && self.repo.exists_by_telefono(telefono).await? {
            return Err(ServiceError::validation("El número de teléfono ya está registrado"));
        }
        models::usuario::validate_telefono(telefono)?;

        let created = self
            .repo
            .create(NewUsuario {
                nombre: nombre.to_string(),
                email: email.to_string(),
                telefono: telefono.to_string(),
                password_hash: hash_password(contrasena)?,
                is_admin: false,
            })
            .await?;
        info!(user_id = created.id, email = %created.email, "user_registered");
        Ok(created.into())
    }

    /// Boolean credential check; unknown email and wrong password look the same.
    #[instrument(skip(self, input), fields(email = ?input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<Usuario, ServiceError> {
        let unauthorized = || ServiceError::Unauthorized(CREDENCIALES_INCORRECTAS.into());
        let email = text(&input.email).ok_or_else(unauthorized)?;
        let contrasena = input.contrasena.as_deref().ok_or_else(unauthorized)?;
        let user = self.repo.find_by_email(email).await?.ok_or_else(unauthorized)?;
        if !verify_password(contrasena, &user.password) {
            return Err(unauthorized());
        }
        Ok(user.into())
    }

    pub async fn list(&self) -> Result<Vec<Usuario>, ServiceError> {
        Ok(self.repo.list().await?.into_iter().map(Usuario::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Usuario, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Usuario::from)
            .ok_or_else(|| ServiceError::not_found(USUARIO_NO_ENCONTRADO))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Usuario, ServiceError> {
        self.repo
            .find_by_email(email)
            .await?
            .map(Usuario::from)
            .ok_or_else(|| ServiceError::not_found(USUARIO_NO_ENCONTRADO))
    }

    /// Admin-only delete. A missing admin email is a bad request here, not a denial.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64, email_admin: Option<&str>) -> Result<(), ServiceError> {
        let email_admin = email_admin
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ServiceError::validation("Debe enviar el email del admin"))?;
        require_admin(
            self.admin.as_ref(),
            Some(email_admin),
            "No tiene permisos para eliminar usuarios",
        )
        .await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found(USUARIO_NO_ENCONTRADO));
        }
        info!(user_id = id, by = %email_admin, "user_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::LocalAdminAuthorizer;
    use crate::users::repository::mock::MockUserRepository;

    fn service() -> (UserService, Arc<MockUserRepository>) {
        let repo = Arc::new(MockUserRepository::default());
        let admin = Arc::new(LocalAdminAuthorizer::new(repo.clone()));
        (UserService::new(repo.clone(), admin), repo)
    }

    fn input(email: &str, telefono: &str) -> RegisterInput {
        RegisterInput {
            nombre: Some("Ana".into()),
            email: Some(email.into()),
            telefono: Some(telefono.into()),
            contrasena: Some("secreta1".into()),
        }
    }

    #[tokio::test]
    async fn register_hashes_and_hides_password() {
        let (svc, repo) = service();
        let user = svc.register(input("ana@correo.cl", "12345678")).await.unwrap();
        assert!(!user.is_admin);
        let stored = repo.find_by_email("ana@correo.cl").await.unwrap().unwrap();
        assert_ne!(stored.password, "secreta1");
        assert!(stored.password.starts_with("$argon2"));
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none() && json.get("contrasena").is_none());
        assert_eq!(json["isAdmin"], false);
    }

    #[tokio::test]
    async fn register_validation_order() {
        let (svc, _) = service();
        svc.register(input("ana@correo.cl", "12345678")).await.unwrap();

        let dup_email = svc.register(input("ana@correo.cl", "87654321")).await;
        assert_eq!(dup_email, Err(ServiceError::validation("El correo ya está registrado")));

        let dup_phone = svc.register(input("otra@correo.cl", "12345678")).await;
        assert_eq!(dup_phone, Err(ServiceError::validation("El número de teléfono ya está registrado")));

        let blank = svc.register(input("b@correo.cl", " ")).await;
        assert_eq!(blank, Err(ServiceError::validation("El número de teléfono no puede estar vacío")));

        let short = svc.register(input("c@correo.cl", "+56 1234")).await;
        assert_eq!(
            short,
            Err(ServiceError::validation("El número de teléfono debe tener entre 8 y 12 dígitos."))
        );

        let no_name = svc.register(RegisterInput { nombre: None, ..input("d@correo.cl", "11112222") }).await;
        assert_eq!(no_name, Err(ServiceError::validation("El nombre no puede estar vacío")));

        let bad_email = svc.register(input("sin-arroba", "11112222")).await;
        assert_eq!(bad_email, Err(ServiceError::validation("Email inválido")));
    }

    #[tokio::test]
    async fn login_checks_password() {
        let (svc, _) = service();
        svc.register(input("ana@correo.cl", "12345678")).await.unwrap();
        let ok = svc
            .login(LoginInput { email: Some("ana@correo.cl".into()), contrasena: Some("secreta1".into()) })
            .await;
        assert!(ok.is_ok());
        for (email, pass) in [("ana@correo.cl", "otra"), ("nadie@correo.cl", "secreta1")] {
            let err = svc
                .login(LoginInput { email: Some(email.into()), contrasena: Some(pass.into()) })
                .await;
            assert_eq!(err, Err(ServiceError::Unauthorized(CREDENCIALES_INCORRECTAS.into())));
        }
    }

    #[tokio::test]
    async fn delete_requires_admin_email() {
        let (svc, repo) = service();
        repo.create(NewUsuario {
            nombre: "Admin".into(),
            email: "admin@amilimetros.cl".into(),
            telefono: "+56911111111".into(),
            password_hash: hash_password("Admin123!").unwrap(),
            is_admin: true,
        })
        .await
        .unwrap();
        let ana = svc.register(input("ana@correo.cl", "12345678")).await.unwrap();

        assert_eq!(
            svc.delete(ana.id, None).await,
            Err(ServiceError::validation("Debe enviar el email del admin"))
        );
        assert_eq!(
            svc.delete(ana.id, Some("ana@correo.cl")).await,
            Err(ServiceError::forbidden("No tiene permisos para eliminar usuarios"))
        );
        assert_eq!(svc.delete(ana.id, Some("admin@amilimetros.cl")).await, Ok(()));
        assert_eq!(
            svc.delete(ana.id, Some("admin@amilimetros.cl")).await,
            Err(ServiceError::not_found(USUARIO_NO_ENCONTRADO))
        );
    }
}
