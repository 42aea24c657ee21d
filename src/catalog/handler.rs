//! # Uniform Handler
//!
//! Translates the four verbs of the uniform endpoint into table-client calls
//! and shapes the outcome into a [`Reply`] or a [`UniformError`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::storage::{Direction, FilterExpr, SelectQuery, StorageError, TableClient};

use super::errors::{Operation, UniformError, UniformResult};
use super::model::Uniform;
use super::response::{Envelope, Reply};
use super::validation::{build_patch, parse_body, require_id, validate_create, UpdateMode};

pub const CREATED: &str = "Uniforme creado exitosamente";
pub const UPDATED: &str = "Uniforme actualizado exitosamente";
pub const DELETED: &str = "Uniforme eliminado exitosamente";

/// Default table name
pub const DEFAULT_TABLE: &str = "uniformes";

/// Request handler for the uniform resource
#[derive(Clone)]
pub struct UniformHandler {
    client: Arc<dyn TableClient>,
    table: String,
    update_mode: UpdateMode,
}

impl UniformHandler {
    pub fn new(client: Arc<dyn TableClient>) -> Self {
        Self {
            client,
            table: DEFAULT_TABLE.to_string(),
            update_mode: UpdateMode::default(),
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = mode;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }

    /// POST: validate and insert one uniform
    pub async fn create(&self, body: &[u8]) -> UniformResult<Reply<Vec<Uniform>>> {
        let op = Operation::Create;
        let payload = parse_body(body, op).map_err(|e| log_unexpected(op, e))?;
        let new = validate_create(&payload).map_err(|e| log_validation(op, e))?;

        let rows = self
            .client
            .insert(&self.table, vec![new.into_row()])
            .await
            .map_err(|e| storage_failure(op, e))?;

        let data = decode_rows(op, rows)?;
        info!(table = %self.table, count = data.len(), "uniform created");
        Ok(Reply::created(Envelope::with_message(data, CREATED)))
    }

    /// PUT: overwrite the data fields of the uniform with the given id
    pub async fn update(&self, body: &[u8]) -> UniformResult<Reply<Vec<Uniform>>> {
        let op = Operation::Update;
        let payload = parse_body(body, op).map_err(|e| log_unexpected(op, e))?;
        let id = require_id(&payload).map_err(|e| log_validation(op, e))?;
        let patch = build_patch(&payload, self.update_mode);

        let rows = self
            .client
            .update(&self.table, patch, &FilterExpr::eq("id", id.to_value()))
            .await
            .map_err(|e| storage_failure(op, e))?;

        let data = decode_rows(op, rows)?;
        info!(table = %self.table, %id, count = data.len(), "uniform updated");
        Ok(Reply::ok(Envelope::with_message(data, UPDATED)))
    }

    /// DELETE: remove the uniform with the given id
    pub async fn delete(&self, body: &[u8]) -> UniformResult<Reply<()>> {
        let op = Operation::Delete;
        let payload = parse_body(body, op).map_err(|e| log_unexpected(op, e))?;
        let id = require_id(&payload).map_err(|e| log_validation(op, e))?;

        self.client
            .delete(&self.table, &FilterExpr::eq("id", id.to_value()))
            .await
            .map_err(|e| storage_failure(op, e))?;

        info!(table = %self.table, %id, "uniform deleted");
        Ok(Reply::ok(Envelope::message(DELETED)))
    }

    /// GET: every uniform, newest first
    pub async fn list(&self) -> UniformResult<Reply<Vec<Uniform>>> {
        let op = Operation::List;
        let query = SelectQuery::all().order("created_at", Direction::Descending);

        let rows = self
            .client
            .select(&self.table, &query)
            .await
            .map_err(|e| storage_failure(op, e))?;

        let data = decode_rows(op, rows)?;
        debug!(table = %self.table, count = data.len(), "uniforms listed");
        Ok(Reply::ok(Envelope::data(data)))
    }
}

/// Rejections keep the datastore's message; transport failures are
/// unexpected
fn storage_failure(op: Operation, err: StorageError) -> UniformError {
    error!(operation = op.as_str(), error = %err, "storage call failed");
    if err.is_rejection() {
        UniformError::storage(op, err.message())
    } else {
        UniformError::unexpected(op, err.message())
    }
}

/// Rows pass through untouched; only a non-object row is refused
fn decode_rows(op: Operation, rows: Vec<Value>) -> UniformResult<Vec<Uniform>> {
    rows.into_iter()
        .map(|row| match row {
            Value::Object(fields) => Ok(fields),
            other => {
                error!(operation = op.as_str(), row = %other, "storage returned a non-object row");
                Err(UniformError::storage(op, format!("Invalid row: {other}")))
            }
        })
        .collect()
}

fn log_validation(op: Operation, err: UniformError) -> UniformError {
    debug!(operation = op.as_str(), error = %err, "request rejected");
    err
}

fn log_unexpected(op: Operation, err: UniformError) -> UniformError {
    error!(operation = op.as_str(), error = ?err, "unexpected failure");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::validation::{INVALID_CREATE, MISSING_ID};
    use crate::storage::MemoryTableClient;
    use axum::http::StatusCode;
    use serde_json::json;

    fn setup() -> (Arc<MemoryTableClient>, UniformHandler) {
        let client = Arc::new(MemoryTableClient::new());
        let handler = UniformHandler::new(client.clone());
        (client, handler)
    }

    const CAMISA: &[u8] =
        r#"{"nombre":"Camisa","genero":"niño","tallas":["S","M"],"precio":150,"stock":10}"#
            .as_bytes();

    #[tokio::test]
    async fn test_create_returns_created_record() {
        let (client, handler) = setup();

        let reply = handler.create(CAMISA).await.unwrap();
        assert_eq!(reply.status, StatusCode::CREATED);
        assert_eq!(reply.body.message.as_deref(), Some(CREATED));

        let data = reply.body.data.unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["nombre"], "Camisa");
        assert_eq!(data[0]["tallas"], json!(["S", "M"]));
        assert_eq!(data[0]["precio"], json!(150));
        assert_eq!(client.row_count("uniformes"), 1);
    }

    #[tokio::test]
    async fn test_invalid_create_does_not_insert() {
        let (client, handler) = setup();

        let err = handler.create(br#"{"nombre":"Camisa"}"#).await.unwrap_err();
        assert_eq!(err, UniformError::validation(INVALID_CREATE));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_stores_untyped_values_verbatim() {
        let (_client, handler) = setup();
        let body = json!({
            "nombre": "Camisa",
            "genero": "niño",
            "tallas": [1],
            "precio": "150",
            "stock": 2.5
        });

        let reply = handler.create(body.to_string().as_bytes()).await.unwrap();
        assert_eq!(reply.status, StatusCode::CREATED);

        let data = reply.body.data.unwrap();
        assert_eq!(data[0]["tallas"], json!([1]));
        assert_eq!(data[0]["precio"], "150");
        assert_eq!(data[0]["stock"], json!(2.5));
    }

    #[tokio::test]
    async fn test_odd_values_do_not_break_later_reads() {
        let (client, handler) = setup();
        let created = handler.create(CAMISA).await.unwrap().body.data.unwrap();

        let body = json!({"id": created[0]["id"], "nombre": "Camisa", "precio": "caro"});
        let updated = handler.update(body.to_string().as_bytes()).await.unwrap();
        assert_eq!(updated.status, StatusCode::OK);
        assert_eq!(updated.body.data.unwrap()[0]["precio"], "caro");

        let listed = handler.list().await.unwrap().body.data.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["precio"], "caro");
        assert_eq!(client.row_count("uniformes"), 1);
    }

    #[test]
    fn test_extra_storage_columns_are_kept() {
        let rows = vec![json!({"id": 1, "nombre": "Falda", "proveedor": "Textiles del Norte"})];
        let data = decode_rows(Operation::List, rows).unwrap();
        assert_eq!(data[0]["proveedor"], "Textiles del Norte");

        let err = decode_rows(Operation::List, vec![json!("not a row")]).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_update_without_id_skips_storage() {
        let (client, handler) = setup();

        let err = handler.update(b"{}").await.unwrap_err();
        assert_eq!(err, UniformError::validation(MISSING_ID));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_update_overwrites_absent_fields_by_default() {
        let (_client, handler) = setup();
        let created = handler.create(CAMISA).await.unwrap().body.data.unwrap();
        let body = json!({"id": created[0]["id"], "nombre": "Camisa blanca"});
        let reply = handler.update(body.to_string().as_bytes()).await.unwrap();

        let data = reply.body.data.unwrap();
        assert_eq!(data[0]["nombre"], "Camisa blanca");
        assert_eq!(data[0]["genero"], Value::Null);
        assert_eq!(data[0]["stock"], Value::Null);
    }

    #[tokio::test]
    async fn test_partial_update_mode_keeps_absent_fields() {
        let client = Arc::new(MemoryTableClient::new());
        let handler = UniformHandler::new(client).with_update_mode(UpdateMode::Partial);
        let created = handler.create(CAMISA).await.unwrap().body.data.unwrap();

        let body = json!({"id": created[0]["id"], "stock": 0});
        let data = handler
            .update(body.to_string().as_bytes())
            .await
            .unwrap()
            .body
            .data
            .unwrap();

        assert_eq!(data[0]["stock"], 0);
        assert_eq!(data[0]["genero"], "niño");
    }

    #[tokio::test]
    async fn test_delete_twice_succeeds() {
        let (client, handler) = setup();
        let created = handler.create(CAMISA).await.unwrap().body.data.unwrap();
        let body = json!({"id": created[0]["id"]}).to_string();

        let first = handler.delete(body.as_bytes()).await.unwrap();
        assert_eq!(first.status, StatusCode::OK);
        assert_eq!(first.body.message.as_deref(), Some(DELETED));

        let second = handler.delete(body.as_bytes()).await.unwrap();
        assert_eq!(second.status, StatusCode::OK);
        assert_eq!(client.row_count("uniformes"), 0);
    }

    #[tokio::test]
    async fn test_storage_rejection_on_create_keeps_detail() {
        let (client, handler) = setup();
        client.fail_with(Some(StorageError::rejected("permission denied for table")));

        let err = handler.create(CAMISA).await.unwrap_err();
        assert_eq!(
            err,
            UniformError::Storage {
                message: "Error al crear el uniforme",
                detail: Some("permission denied for table".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_unexpected() {
        let (client, handler) = setup();
        client.fail_with(Some(StorageError::Transport("connection refused".to_string())));

        let err = handler.list().await.unwrap_err();
        assert_eq!(err.envelope().error, "Error interno del servidor");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_custom_table() {
        let client = Arc::new(MemoryTableClient::new());
        let handler = UniformHandler::new(client.clone()).with_table("catalogo");

        handler.create(CAMISA).await.unwrap();
        assert_eq!(client.row_count("catalogo"), 1);
        assert_eq!(client.row_count("uniformes"), 0);
    }
}
