//! Record store: single-statement CRUD against the `registros` table.

use crate::domain::{NewRegistro, Registro};
use crate::error::{map_unique_violation, AppError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const COLUMNS: &str = "id, dni, nombres, apellidos, fechaNacimiento, genero, ciudad, fechaCreacion";

pub struct RegistroService;

impl RegistroService {
    /// Insert a validated record. The store assigns `id` and `fechaCreacion`.
    pub async fn insert(pool: &SqlitePool, new: &NewRegistro) -> Result<Registro, AppError> {
        let sql = format!(
            "INSERT INTO registros (dni, nombres, apellidos, fechaNacimiento, genero, ciudad) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, dni = %new.dni, "query");
        let row = sqlx::query(&sql)
            .bind(&new.dni)
            .bind(&new.nombres)
            .bind(&new.apellidos)
            .bind(new.fecha_nacimiento)
            .bind(new.genero.as_str())
            .bind(new.ciudad.as_str())
            .fetch_one(pool)
            .await
            .map_err(map_unique_violation)?;
        Ok(row_to_registro(&row)?)
    }

    /// All records, newest first. Rows created within the same second fall back to id order.
    pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Registro>, AppError> {
        let sql = format!(
            "SELECT {} FROM registros ORDER BY fechaCreacion DESC, id DESC",
            COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query(&sql).fetch_all(pool).await?;
        let records = rows.iter().map(row_to_registro).collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Registro>, AppError> {
        let sql = format!("SELECT {} FROM registros WHERE id = ?", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query(&sql).bind(id).fetch_optional(pool).await?;
        Ok(row.as_ref().map(row_to_registro).transpose()?)
    }

    /// Overwrite all six form fields. Returns `None` when no row has this id.
    pub async fn update(pool: &SqlitePool, id: i64, new: &NewRegistro) -> Result<Option<Registro>, AppError> {
        let sql = format!(
            "UPDATE registros SET dni = ?, nombres = ?, apellidos = ?, fechaNacimiento = ?, genero = ?, ciudad = ? \
             WHERE id = ? RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id, dni = %new.dni, "query");
        let row = sqlx::query(&sql)
            .bind(&new.dni)
            .bind(&new.nombres)
            .bind(&new.apellidos)
            .bind(new.fecha_nacimiento)
            .bind(new.genero.as_str())
            .bind(new.ciudad.as_str())
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(map_unique_violation)?;
        Ok(row.as_ref().map(row_to_registro).transpose()?)
    }

    /// Returns `false` when no row has this id.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
        tracing::debug!(id, "delete registro");
        let result = sqlx::query("DELETE FROM registros WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of stored records; doubles as the readiness check.
    pub async fn count(pool: &SqlitePool) -> Result<i64, AppError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registros").fetch_one(pool).await?;
        Ok(n)
    }
}

fn row_to_registro(row: &SqliteRow) -> Result<Registro, sqlx::Error> {
    Ok(Registro {
        id: row.try_get("id")?,
        dni: row.try_get("dni")?,
        nombres: row.try_get("nombres")?,
        apellidos: row.try_get("apellidos")?,
        fecha_nacimiento: row.try_get("fechaNacimiento")?,
        genero: row.try_get("genero")?,
        ciudad: row.try_get("ciudad")?,
        fecha_creacion: row.try_get("fechaCreacion")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{City, Gender};
    use crate::store::test_pool;
    use chrono::NaiveDate;

    fn new_registro(dni: &str) -> NewRegistro {
        NewRegistro {
            dni: dni.into(),
            nombres: "Ana Maria".into(),
            apellidos: "Lopez Ruiz".into(),
            fecha_nacimiento: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            genero: Gender::Femenino,
            ciudad: City::Quito,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamp() {
        let pool = test_pool().await;
        let a = RegistroService::insert(&pool, &new_registro("1234567890")).await.unwrap();
        let b = RegistroService::insert(&pool, &new_registro("0987654321")).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(a.dni, "1234567890");
        assert_eq!(a.fecha_nacimiento, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        let fetched = RegistroService::get_by_id(&pool, a.id).await.unwrap().unwrap();
        assert_eq!(fetched, a);
    }

    #[tokio::test]
    async fn duplicate_dni_is_conflict() {
        let pool = test_pool().await;
        RegistroService::insert(&pool, &new_registro("1234567890")).await.unwrap();
        let err = RegistroService::insert(&pool, &new_registro("1234567890")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn get_all_is_newest_first() {
        let pool = test_pool().await;
        let first = RegistroService::insert(&pool, &new_registro("1111111111")).await.unwrap();
        let second = RegistroService::insert(&pool, &new_registro("2222222222")).await.unwrap();
        // force distinct timestamps in the opposite order of ids
        sqlx::query("UPDATE registros SET fechaCreacion = '2020-01-01 00:00:00' WHERE id = ?")
            .bind(second.id)
            .execute(&pool)
            .await
            .unwrap();
        let all = RegistroService::get_all(&pool).await.unwrap();
        assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn same_second_ties_fall_back_to_id() {
        let pool = test_pool().await;
        let first = RegistroService::insert(&pool, &new_registro("1111111111")).await.unwrap();
        let second = RegistroService::insert(&pool, &new_registro("2222222222")).await.unwrap();
        sqlx::query("UPDATE registros SET fechaCreacion = '2024-01-01 00:00:00'")
            .execute(&pool)
            .await
            .unwrap();
        let all = RegistroService::get_all(&pool).await.unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn update_keeps_own_dni_without_conflict() {
        let pool = test_pool().await;
        let r = RegistroService::insert(&pool, &new_registro("1234567890")).await.unwrap();
        let mut changed = new_registro("1234567890");
        changed.ciudad = City::Cuenca;
        let updated = RegistroService::update(&pool, r.id, &changed).await.unwrap().unwrap();
        assert_eq!(updated.ciudad, "Cuenca");
        assert_eq!(updated.fecha_creacion, r.fecha_creacion);
    }

    #[tokio::test]
    async fn update_to_other_records_dni_is_conflict() {
        let pool = test_pool().await;
        RegistroService::insert(&pool, &new_registro("1111111111")).await.unwrap();
        let r = RegistroService::insert(&pool, &new_registro("2222222222")).await.unwrap();
        let err = RegistroService::update(&pool, r.id, &new_registro("1111111111")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn missing_rows_signal_not_found() {
        let pool = test_pool().await;
        assert!(RegistroService::get_by_id(&pool, 42).await.unwrap().is_none());
        assert!(RegistroService::update(&pool, 42, &new_registro("1234567890")).await.unwrap().is_none());
        assert!(!RegistroService::delete(&pool, 42).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let pool = test_pool().await;
        let r = RegistroService::insert(&pool, &new_registro("1234567890")).await.unwrap();
        assert_eq!(RegistroService::count(&pool).await.unwrap(), 1);
        assert!(RegistroService::delete(&pool, r.id).await.unwrap());
        assert!(RegistroService::get_by_id(&pool, r.id).await.unwrap().is_none());
        assert_eq!(RegistroService::count(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn rows_with_labels_outside_the_form_still_load() {
        let pool = test_pool().await;
        sqlx::query(
            "INSERT INTO registros (dni, nombres, apellidos, fechaNacimiento, genero, ciudad) \
             VALUES ('5555555555', 'Luis', 'Mera', '1980-02-02', 'No binario', 'Lima')",
        )
        .execute(&pool)
        .await
        .unwrap();
        RegistroService::insert(&pool, &new_registro("1234567890")).await.unwrap();

        let all = RegistroService::get_all(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        let legacy = all.iter().find(|r| r.dni == "5555555555").unwrap();
        assert_eq!(legacy.genero, "No binario");
        assert_eq!(legacy.ciudad, "Lima");
    }
}
