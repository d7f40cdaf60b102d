use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use models::animal;

use crate::animals::domain::{AnimalFields, AnimalFilter};
use crate::animals::repository::AnimalRepository;
use crate::errors::ServiceError;

pub struct SeaOrmAnimalRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl AnimalRepository for SeaOrmAnimalRepository {
    async fn list(&self, filter: AnimalFilter) -> Result<Vec<animal::Model>, ServiceError> {
        let mut q = animal::Entity::find();
        q = match filter {
            AnimalFilter::All => q,
            AnimalFilter::Adoptado(flag) => q.filter(animal::Column::IsAdoptado.eq(flag)),
            AnimalFilter::Especie(e) => q.filter(animal::Column::Especie.eq(e)),
            AnimalFilter::NombreContains(n) => q.filter(
                Expr::expr(Func::lower(Expr::col(animal::Column::Nombre)))
                    .like(format!("%{}%", n.to_lowercase())),
            ),
        };
        Ok(q.order_by_asc(animal::Column::Id).all(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<animal::Model>, ServiceError> {
        Ok(animal::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn create(
        &self,
        f: AnimalFields,
        imagen: Option<Vec<u8>>,
    ) -> Result<animal::Model, ServiceError> {
        let am = animal::ActiveModel {
            nombre: Set(f.nombre),
            especie: Set(f.especie),
            raza: Set(f.raza),
            edad: Set(f.edad),
            descripcion: Set(f.descripcion),
            imagen: Set(imagen),
            is_adoptado: Set(false),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn update(
        &self,
        id: i64,
        f: AnimalFields,
        is_adoptado: bool,
    ) -> Result<Option<animal::Model>, ServiceError> {
        let Some(found) = animal::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut am: animal::ActiveModel = found.into();
        am.nombre = Set(f.nombre);
        am.especie = Set(f.especie);
        am.raza = Set(f.raza);
        am.edad = Set(f.edad);
        am.descripcion = Set(f.descripcion);
        am.is_adoptado = Set(is_adoptado);
        Ok(Some(am.update(&self.db).await?))
    }

    async fn set_imagen(&self, id: i64, imagen: Vec<u8>) -> Result<bool, ServiceError> {
        let res = animal::Entity::update_many()
            .col_expr(animal::Column::Imagen, Expr::value(imagen))
            .filter(animal::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn mark_adoptado(&self, id: i64) -> Result<bool, ServiceError> {
        let res = animal::Entity::update_many()
            .col_expr(animal::Column::IsAdoptado, Expr::value(true))
            .filter(animal::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = animal::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(animal::Entity::find().count(&self.db).await?)
    }
}
