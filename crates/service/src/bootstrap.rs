//! "Seed if empty" routines run once at process start. Each one checks the
//! row count first, so restarting a service never duplicates data.

use std::path::Path;

use tracing::{info, warn};

use configs::BootstrapConfig;

use crate::animals::domain::AnimalFields;
use crate::animals::repository::AnimalRepository;
use crate::catalog::domain::ProductoFields;
use crate::catalog::repository::ProductoRepository;
use crate::errors::ServiceError;
use crate::users::domain::NewUsuario;
use crate::users::repository::UserRepository;
use crate::users::service::hash_password;

// (nombre, especie, raza, edad, descripcion, imagen)
const DEMO_ANIMALS: [(&str, &str, &str, &str, &str, &str); 5] = [
    ("Max", "Perro", "Labrador", "3 años", "Perro cariñoso y juguetón, ideal para familias con niños", "max.jpg"),
    ("Luna", "Gato", "Siamés", "2 años", "Gata tranquila y afectuosa, perfecta para apartamentos", "luna.jpg"),
    ("Rocky", "Perro", "Pastor Alemán", "5 años", "Perro guardián, entrenado y muy leal", "rocky.jpg"),
    ("Mimi", "Gato", "Persa", "1 año", "Gatita juguetona y curiosa, le encanta explorar", "mimi.jpg"),
    ("Toby", "Perro", "Beagle", "4 años", "Perro energético y sociable, excelente con otros animales", "toby.jpg"),
];

// (nombre, descripcion, precio, categoria, imagen)
const DEMO_PRODUCTS: [(&str, &str, f64, &str, &str); 5] = [
    ("Alimento Premium Perro", "Alimento balanceado 15kg", 35990.0, "Alimento", "comidaperro.webp"),
    ("Pelota Interactiva", "Pelota de goma con sonido", 8990.0, "Juguetes", "pelota.jpg"),
    ("Collar Ajustable", "Collar de nylon para perros", 6990.0, "Accesorios", "collar.webp"),
    ("Arena para Gatos", "Arena aglomerante 10kg", 12990.0, "Alimento", "arena.jpg"),
    ("Rascador para Gatos", "Rascador de sisal", 25990.0, "Accesorios", "rascador.jpg"),
];

/// Missing images are not fatal: the row is seeded without one.
async fn load_image(cfg: &BootstrapConfig, file: &str) -> Option<Vec<u8>> {
    let dir = cfg.image_dir.as_deref()?;
    let path = Path::new(dir).join(file);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "seed_image_missing");
            None
        }
    }
}

/// Create the initial admin when the user store is empty. Returns whether
/// a user was created.
pub async fn seed_admin(repo: &dyn UserRepository, cfg: &BootstrapConfig) -> Result<bool, ServiceError> {
    if repo.count().await? > 0 {
        return Ok(false);
    }
    repo.create(NewUsuario {
        nombre: "Admin".into(),
        email: cfg.admin_email.clone(),
        telefono: cfg.admin_phone.clone(),
        password_hash: hash_password(&cfg.admin_password)?,
        is_admin: true,
    })
    .await?;
    info!(email = %cfg.admin_email, "admin_seeded");
    Ok(true)
}

pub async fn seed_animals(repo: &dyn AnimalRepository, cfg: &BootstrapConfig) -> Result<usize, ServiceError> {
    if !cfg.seed_demo_data || repo.count().await? > 0 {
        return Ok(0);
    }
    for (nombre, especie, raza, edad, descripcion, file) in DEMO_ANIMALS {
        let fields = AnimalFields {
            nombre: nombre.into(),
            especie: especie.into(),
            raza: raza.into(),
            edad: edad.into(),
            descripcion: descripcion.into(),
        };
        repo.create(fields, load_image(cfg, file).await).await?;
    }
    info!(count = DEMO_ANIMALS.len(), "animals_seeded");
    Ok(DEMO_ANIMALS.len())
}

pub async fn seed_products(repo: &dyn ProductoRepository, cfg: &BootstrapConfig) -> Result<usize, ServiceError> {
    if !cfg.seed_demo_data || repo.count().await? > 0 {
        return Ok(0);
    }
    for (nombre, descripcion, precio, categoria, file) in DEMO_PRODUCTS {
        let fields = ProductoFields {
            nombre: nombre.into(),
            descripcion: descripcion.into(),
            categoria: categoria.into(),
            precio,
        };
        repo.create(fields, load_image(cfg, file).await).await?;
    }
    info!(count = DEMO_PRODUCTS.len(), "products_seeded");
    Ok(DEMO_PRODUCTS.len())
}
