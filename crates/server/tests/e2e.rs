use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use uuid::Uuid;

use configs::{AppConfig, BootstrapConfig};
use server::openapi::{AnimalesApi, FormulariosApi, UsuariosApi};
use server::routes;
use server::ServiceKind;
use service::admin::{DirectoryAdminAuthorizer, LocalAdminAuthorizer};
use service::animals::{repository::mock::MockAnimalRepository, AnimalService};
use service::bootstrap;
use service::forms::{repository::mock::MockFormRepository, FormService};
use service::peers::http::{HttpAnimalRegistry, HttpUserDirectory};
use service::users::repository::{mock::MockUserRepository, UserRepository};
use service::users::UserService;

const PEER_TIMEOUT: Duration = Duration::from_secs(5);

async fn spawn(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

struct Cluster {
    usuarios: String,
    animales: String,
    formularios: String,
    users: Arc<MockUserRepository>,
    admin_email: String,
}

/// usuarios, animales and formularios on ephemeral ports, talking over HTTP.
async fn start_cluster() -> anyhow::Result<Cluster> {
    let seed = BootstrapConfig::default();
    let users = Arc::new(MockUserRepository::default());
    assert!(bootstrap::seed_admin(users.as_ref(), &seed).await?);
    let user_svc = UserService::new(users.clone(), Arc::new(LocalAdminAuthorizer::new(users.clone())));
    let usuarios = spawn(routes::app(routes::usuarios::router(Arc::new(user_svc)), UsuariosApi::openapi())).await?;

    let directory = Arc::new(HttpUserDirectory::new(&usuarios, PEER_TIMEOUT)?);
    let animal_svc = AnimalService::new(
        Arc::new(MockAnimalRepository::default()),
        Arc::new(DirectoryAdminAuthorizer::new(directory.clone())),
    );
    let animales = spawn(routes::app(routes::animales::router(Arc::new(animal_svc)), AnimalesApi::openapi())).await?;

    let form_svc = FormService::new(
        Arc::new(MockFormRepository::default()),
        directory.clone(),
        Arc::new(HttpAnimalRegistry::new(&animales, PEER_TIMEOUT)?),
        Arc::new(DirectoryAdminAuthorizer::new(directory)),
    );
    let formularios =
        spawn(routes::app(routes::formularios::router(Arc::new(form_svc)), FormulariosApi::openapi())).await?;

    Ok(Cluster { usuarios, animales, formularios, users, admin_email: seed.admin_email })
}

fn answers() -> Value {
    json!({
        "direccion": "Los Aromos 123", "tipoVivienda": "Casa", "tieneMallasVentanas": true,
        "viveEnDepartamento": false, "tieneOtrosAnimales": false, "motivoAdopcion": "Compañía"
    })
}

#[tokio::test]
async fn e2e_register_adopt_and_review() -> anyhow::Result<()> {
    let app = start_cluster().await?;
    let c = reqwest::Client::new();

    let ana = json!({"nombre": "Ana", "email": "ana@correo.cl", "telefono": "12345678", "contrasena": "secreta1"});
    let res = c.post(format!("{}/auth/register", app.usuarios)).json(&ana).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let user: Value = res.json().await?;
    assert_eq!(user["isAdmin"], false);
    let stored = app.users.find_by_email("ana@correo.cl").await?.expect("stored user");
    assert_ne!(stored.password, "secreta1");

    let res = c.post(format!("{}/auth/register", app.usuarios)).json(&ana).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "El correo ya está registrado");

    let res = c
        .post(format!("{}/auth/login", app.usuarios))
        .json(&json!({"email": "ana@correo.cl", "contrasena": "secreta1"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["success"], true);

    let max = json!({
        "emailAdmin": app.admin_email, "nombre": "Max", "especie": "Perro", "raza": "Labrador",
        "edad": "3 años", "descripcion": "Juguetón"
    });
    let res = c.post(format!("{}/animales", app.animales)).json(&max).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let animal: Value = res.json().await?;
    assert_eq!(animal["isAdoptado"], false);

    let mut denied = max.clone();
    denied["emailAdmin"] = json!("ana@correo.cl");
    let res = c.post(format!("{}/animales", app.animales)).json(&denied).send().await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);

    let adopt = format!("{}/formularios/adoptar/{}/{}", app.formularios, user["id"], animal["id"]);
    let res = c.post(&adopt).json(&answers()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let form: Value = res.json().await?;
    assert_eq!(form["estado"], "PENDIENTE");

    let res = c.post(&adopt).json(&answers()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c
        .put(format!("{}/formularios/{}/aprobar", app.formularios, form["id"]))
        .json(&json!({"emailAdmin": app.admin_email, "comentarios": "OK"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let reviewed: Value = res.json().await?;
    assert_eq!(reviewed["estado"], "APROBADO");
    assert_eq!(reviewed["comentariosAdmin"], "OK");
    assert!(reviewed["fechaRevision"].is_string());

    let res = c.post(&adopt).json(&answers()).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    Ok(())
}

#[tokio::test]
async fn e2e_unknown_references_are_rejected() -> anyhow::Result<()> {
    let app = start_cluster().await?;
    let c = reqwest::Client::new();

    let res = c
        .post(format!("{}/formularios/adoptar/999/1", app.formularios))
        .json(&answers())
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    assert_eq!(res.text().await?, "Usuario no encontrado");

    let res = c.get(format!("{}/health", app.animales)).send().await?;
    assert_eq!(res.json::<Value>().await?["status"], "ok");
    let res = c.get(format!("{}/api-docs/openapi.json", app.formularios)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn e2e_usuarios_against_postgres() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL missing; skip e2e database test.");
        return Ok(());
    };
    let mut cfg = AppConfig::default();
    cfg.database.url = url;
    cfg.bootstrap.seed_demo_data = false;
    let db = models::db::connect_with_config(&cfg.database).await?;
    let app = server::startup::build_app(ServiceKind::Usuarios, &cfg, db).await?;
    let base = spawn(app).await?;
    let c = reqwest::Client::new();

    let id = Uuid::new_v4();
    let email = format!("user_{}@example.com", id.simple());
    let telefono = format!("9{:08}", id.as_u128() % 100_000_000);
    let res = c
        .post(format!("{}/auth/register", base))
        .json(&json!({"nombre": "Tester", "email": email, "telefono": telefono, "contrasena": "S3curePass!"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c.get(format!("{}/auth/usuario/correo/{}", base, email)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?["email"], email);
    Ok(())
}
