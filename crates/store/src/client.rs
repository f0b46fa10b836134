//! Generic query client for the external record store.
//!
//! The store speaks a small REST dialect: one route per table under `rest/`,
//! equality/range filters and ordering as query parameters, JSON bodies both
//! ways, and an `{"error": ...}` envelope on failures. Rows are always scoped
//! to a user; the per-entity modules add that filter, this layer only
//! executes requests and maps responses.

use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
    error::{Result, StoreError},
    session::Session,
};

/// Equality/range filter on one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    Eq(&'static str, String),
    Gte(&'static str, String),
    Lte(&'static str, String),
}

impl Filter {
    pub fn user(user_id: Uuid) -> Filter {
        Filter::Eq("user_id", user_id.to_string())
    }

    fn query_pair(&self) -> (String, String) {
        match self {
            Filter::Eq(column, value) => ((*column).to_string(), format!("eq.{value}")),
            Filter::Gte(column, value) => ((*column).to_string(), format!("gte.{value}")),
            Filter::Lte(column, value) => ((*column).to_string(), format!("lte.{value}")),
        }
    }
}

/// Result ordering on one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub descending: bool,
}

impl Order {
    pub fn asc(column: &'static str) -> Order {
        Order {
            column,
            descending: false,
        }
    }

    pub fn desc(column: &'static str) -> Order {
        Order {
            column,
            descending: true,
        }
    }

    fn query_value(self) -> String {
        let direction = if self.descending { "desc" } else { "asc" };
        format!("{}.{direction}", self.column)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: Url,
    api_key: String,
    http: reqwest::Client,
}

impl StoreClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| StoreError::Server(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| StoreError::Server(format!("invalid base_url: {err}")))
    }

    fn request(&self, method: Method, url: Url, bearer: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }

    /// `select * from {table} where {filters} [order by ...] [limit n]`.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        session: &Session,
        table: &str,
        filters: &[Filter],
        order: Option<Order>,
        limit: Option<u32>,
    ) -> Result<Vec<T>> {
        let url = self.endpoint(&format!("rest/{table}"))?;
        let mut request = self.request(Method::GET, url, &session.access_token);
        for filter in filters {
            request = request.query(&[filter.query_pair()]);
        }
        if let Some(order) = order {
            request = request.query(&[("order", order.query_value())]);
        }
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit.to_string())]);
        }

        let response = request.send().await.map_err(StoreError::Transport)?;
        decode(response).await
    }

    /// Inserts one row and returns the stored representation.
    pub(crate) async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        session: &Session,
        table: &str,
        row: &T,
    ) -> Result<R> {
        let url = self.endpoint(&format!("rest/{table}"))?;
        let response = self
            .request(Method::POST, url, &session.access_token)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(StoreError::Transport)?;

        let mut rows: Vec<R> = decode(response).await?;
        match rows.pop() {
            Some(row) if rows.is_empty() => Ok(row),
            _ => Err(StoreError::Server(
                "insert did not return exactly one row".to_string(),
            )),
        }
    }

    /// Replaces the row with the given id.
    pub(crate) async fn update<T: Serialize>(
        &self,
        session: &Session,
        table: &str,
        id: Uuid,
        row: &T,
    ) -> Result<()> {
        let url = self.endpoint(&format!("rest/{table}"))?;
        let response = self
            .request(Method::PATCH, url, &session.access_token)
            .query(&[("id", format!("eq.{id}"))])
            .json(row)
            .send()
            .await
            .map_err(StoreError::Transport)?;

        check_status(response).await?;
        Ok(())
    }

    /// `GET auth/user`: resolves the access token to its user.
    pub(crate) async fn whoami(&self, access_token: &str) -> Result<api_types::session::UserInfo> {
        let url = self.endpoint("auth/user")?;
        let response = self
            .request(Method::GET, url, access_token)
            .send()
            .await
            .map_err(StoreError::Transport)?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let response = check_status(response).await?;
    response.json::<T>().await.map_err(StoreError::Transport)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string());

    Err(error_for_status(status, body))
}

fn error_for_status(status: StatusCode, body: String) -> StoreError {
    match status {
        StatusCode::UNAUTHORIZED => StoreError::Unauthorized,
        StatusCode::FORBIDDEN => StoreError::Forbidden,
        StatusCode::NOT_FOUND => StoreError::NotFound,
        StatusCode::CONFLICT => StoreError::Conflict(body),
        StatusCode::UNPROCESSABLE_ENTITY => StoreError::Validation(body),
        _ => StoreError::Server(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_render_the_store_dialect() {
        let user = Uuid::nil();
        assert_eq!(
            Filter::user(user).query_pair(),
            (
                "user_id".to_string(),
                "eq.00000000-0000-0000-0000-000000000000".to_string()
            )
        );
        assert_eq!(
            Filter::Gte("occurred_at", "2026-08-01T06:00:00Z".to_string()).query_pair(),
            (
                "occurred_at".to_string(),
                "gte.2026-08-01T06:00:00Z".to_string()
            )
        );
    }

    #[test]
    fn order_renders_column_and_direction() {
        assert_eq!(Order::asc("occurred_at").query_value(), "occurred_at.asc");
        assert_eq!(Order::desc("occurred_at").query_value(), "occurred_at.desc");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(StoreClient::new("not a url", "key").is_err());
    }

    #[test]
    fn statuses_map_to_typed_errors() {
        let body = || "detalle".to_string();
        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED, body()),
            StoreError::Unauthorized
        ));
        assert!(matches!(
            error_for_status(StatusCode::FORBIDDEN, body()),
            StoreError::Forbidden
        ));
        assert!(matches!(
            error_for_status(StatusCode::NOT_FOUND, body()),
            StoreError::NotFound
        ));
        assert!(matches!(
            error_for_status(StatusCode::CONFLICT, body()),
            StoreError::Conflict(detail) if detail == "detalle"
        ));
        assert!(matches!(
            error_for_status(StatusCode::UNPROCESSABLE_ENTITY, body()),
            StoreError::Validation(_)
        ));
        assert!(matches!(
            error_for_status(StatusCode::BAD_GATEWAY, body()),
            StoreError::Server(_)
        ));
    }
}
