//! HTTP client for the hosted document store
//!
//! Speaks the store's document REST surface: one URL per document
//! (`GET`/`PUT`/`DELETE /v1/{collection}/{id}`) and a query endpoint
//! (`POST /v1/{collection}:query`) carrying an optional equality filter and
//! ordering.

use super::{collections, DocumentStore, ProfileReader};
use crate::config::StoreConfig;
use crate::domain::{Announcement, ClassSchedule, ExamTimetable, Homework, Profile, Role};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Document store HTTP client
#[derive(Clone)]
pub struct HttpDocumentStore {
    config: StoreConfig,
    http_client: Client,
}

/// Query request body for the `:query` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    r#where: Option<WhereClause>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<OrderBy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WhereClause {
    field: String,
    op: String,
    value: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderBy {
    field: String,
    direction: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    documents: Vec<T>,
}

impl QueryRequest {
    fn new() -> Self {
        Self {
            r#where: None,
            order_by: None,
        }
    }

    fn where_eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.r#where = Some(WhereClause {
            field: field.to_string(),
            op: "==".to_string(),
            value: value.into(),
        });
        self
    }

    fn order_desc(mut self, field: &str) -> Self {
        self.order_by = Some(OrderBy {
            field: field.to_string(),
            direction: "desc".to_string(),
        });
        self
    }
}

impl HttpDocumentStore {
    pub fn new(config: StoreConfig) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    fn doc_url(&self, collection: &str, id: &str) -> String {
        format!("{}/v1/{}/{}", self.config.url, collection, id)
    }

    fn query_url(&self, collection: &str) -> String {
        format!("{}/v1/{}:query", self.config.url, collection)
    }

    async fn get_doc<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        let response = self
            .http_client
            .get(self.doc_url(collection, id))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(collection, response).await?;
        let doc = response.json::<T>().await.map_err(|e| {
            AppError::Store(format!("invalid document in {collection}: {e}"))
        })?;
        Ok(Some(doc))
    }

    async fn put_doc<T: Serialize + Sync>(&self, collection: &str, id: &str, doc: &T) -> Result<()> {
        let response = self
            .http_client
            .put(self.doc_url(collection, id))
            .bearer_auth(&self.config.api_key)
            .json(doc)
            .send()
            .await
            .map_err(transport_error)?;
        check_status(collection, response).await?;
        Ok(())
    }

    async fn delete_doc(&self, collection: &str, id: &str) -> Result<()> {
        let response = self
            .http_client
            .delete(self.doc_url(collection, id))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(transport_error)?;

        // Deleting an absent document is not an error
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        check_status(collection, response).await?;
        Ok(())
    }

    async fn query_docs<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: QueryRequest,
    ) -> Result<Vec<T>> {
        let response = self
            .http_client
            .post(self.query_url(collection))
            .bearer_auth(&self.config.api_key)
            .json(&query)
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(collection, response).await?;
        let body = response.json::<QueryResponse<T>>().await.map_err(|e| {
            AppError::Store(format!("invalid query response from {collection}: {e}"))
        })?;
        Ok(body.documents)
    }
}

fn transport_error(e: reqwest::Error) -> AppError {
    AppError::Store(format!("document store unreachable: {e}"))
}

async fn check_status(collection: &str, response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Store(format!(
        "{collection} request failed with {status}: {body}"
    )))
}

#[async_trait]
impl ProfileReader for HttpDocumentStore {
    async fn get_profile(&self, subject_id: &str) -> Result<Option<Profile>> {
        self.get_doc(collections::USERS, subject_id).await
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn put_profile(&self, profile: &Profile) -> Result<()> {
        self.put_doc(collections::USERS, &profile.subject_id, profile)
            .await
    }

    async fn delete_profile(&self, subject_id: &str) -> Result<()> {
        self.delete_doc(collections::USERS, subject_id).await
    }

    async fn list_profiles_by_role(&self, role: Role) -> Result<Vec<Profile>> {
        self.query_docs(
            collections::USERS,
            QueryRequest::new().where_eq("role", role.as_str()),
        )
        .await
    }

    async fn insert_announcement(&self, announcement: &Announcement) -> Result<()> {
        self.put_doc(collections::ANNOUNCEMENTS, &announcement.id, announcement)
            .await
    }

    async fn list_announcements(&self) -> Result<Vec<Announcement>> {
        self.query_docs(
            collections::ANNOUNCEMENTS,
            QueryRequest::new().order_desc("createdAt"),
        )
        .await
    }

    async fn delete_announcement(&self, id: &str) -> Result<()> {
        self.delete_doc(collections::ANNOUNCEMENTS, id).await
    }

    async fn insert_homework(&self, homework: &Homework) -> Result<()> {
        self.put_doc(collections::HOMEWORK, &homework.id, homework)
            .await
    }

    async fn list_homework(&self, class_name: Option<&str>) -> Result<Vec<Homework>> {
        let mut query = QueryRequest::new().order_desc("createdAt");
        if let Some(class_name) = class_name {
            query = query.where_eq("className", class_name);
        }
        self.query_docs(collections::HOMEWORK, query).await
    }

    async fn delete_homework(&self, id: &str) -> Result<()> {
        self.delete_doc(collections::HOMEWORK, id).await
    }

    async fn put_schedule(&self, schedule: &ClassSchedule) -> Result<()> {
        self.put_doc(collections::SCHEDULES, &schedule.class_name, schedule)
            .await
    }

    async fn get_schedule(&self, class_name: &str) -> Result<Option<ClassSchedule>> {
        self.get_doc(collections::SCHEDULES, class_name).await
    }

    async fn list_schedules(&self) -> Result<Vec<ClassSchedule>> {
        self.query_docs(
            collections::SCHEDULES,
            QueryRequest::new().order_desc("createdAt"),
        )
        .await
    }

    async fn put_exam_timetable(&self, timetable: &ExamTimetable) -> Result<()> {
        self.put_doc(
            collections::EXAM_TIMETABLES,
            &timetable.class_name,
            timetable,
        )
        .await
    }

    async fn get_exam_timetable(&self, class_name: &str) -> Result<Option<ExamTimetable>> {
        self.get_doc(collections::EXAM_TIMETABLES, class_name).await
    }

    async fn list_exam_timetables(&self) -> Result<Vec<ExamTimetable>> {
        self.query_docs(
            collections::EXAM_TIMETABLES,
            QueryRequest::new().order_desc("createdAt"),
        )
        .await
    }
}
