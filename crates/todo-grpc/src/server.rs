//! Todo gRPC server.
//!
//! Implements the `Todos` gRPC interface over the shared service layer.
//! Every failure is surfaced as a proper gRPC status — `NotFound` maps to
//! `not_found`, a datastore timeout to `deadline_exceeded`, and anything
//! else to `internal`.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::info;

use todo_core::pagination;
use todo_core::{Todo, TodoDraft};
use todo_service::{StoreError, TodoService};

use crate::proto;
use crate::proto::todos_server::Todos;

/// gRPC implementation of the todo service.
pub struct TodoGrpcServer {
    service: Arc<dyn TodoService>,
}

impl TodoGrpcServer {
    /// Create a new todo gRPC server.
    pub fn new(service: Arc<dyn TodoService>) -> Self {
        Self { service }
    }

    /// Get the tonic service for mounting on a gRPC server.
    pub fn into_service(self) -> proto::todos_server::TodosServer<Self> {
        proto::todos_server::TodosServer::new(self)
    }
}

fn to_record(todo: &Todo) -> proto::TodoRecord {
    proto::TodoRecord {
        id: todo.id.to_string(),
        title: todo.title.clone(),
        description: todo.description.clone(),
        created_at: todo.created_at.to_rfc3339(),
        updated_at: todo.updated_at.to_rfc3339(),
    }
}

fn to_status(err: StoreError) -> Status {
    match err {
        StoreError::NotFound(_) => Status::not_found("Not Found"),
        StoreError::Timeout => Status::deadline_exceeded("datastore operation timed out"),
        other => Status::internal(other.to_string()),
    }
}

#[tonic::async_trait]
impl Todos for TodoGrpcServer {
    async fn create(
        &self,
        request: Request<proto::TodoInput>,
    ) -> Result<Response<proto::TodoRecord>, Status> {
        let req = request.into_inner();

        let todo = self
            .service
            .create(TodoDraft {
                title: req.title,
                description: req.description,
            })
            .await
            .map_err(to_status)?;

        info!(id = %todo.id, "todo created via gRPC");
        Ok(Response::new(to_record(&todo)))
    }

    async fn list(
        &self,
        request: Request<proto::ListRequest>,
    ) -> Result<Response<proto::TodoList>, Status> {
        let req = request.into_inner();

        let page = pagination::current_page(req.page);
        let per_page = pagination::per_page(req.per_page);
        let offset = pagination::offset(page, per_page);

        let (results, total) = self
            .service
            .get_all(&req.q, per_page as u64, offset as u64)
            .await
            .map_err(to_status)?;

        let data: Vec<proto::TodoRecord> = results.iter().map(to_record).collect();

        Ok(Response::new(proto::TodoList {
            data,
            meta: Some(proto::Meta {
                per_page,
                page,
                page_count: pagination::total_page(total as i64, per_page),
                total_count: total as i64,
            }),
        }))
    }

    async fn get(
        &self,
        request: Request<proto::TodoIdRequest>,
    ) -> Result<Response<proto::TodoRecord>, Status> {
        let req = request.into_inner();

        let todo = self.service.get_by_id(&req.id).await.map_err(to_status)?;
        Ok(Response::new(to_record(&todo)))
    }

    async fn update(
        &self,
        request: Request<proto::UpdateRequest>,
    ) -> Result<Response<proto::TodoRecord>, Status> {
        let req = request.into_inner();

        self.service
            .update(
                &req.id,
                TodoDraft {
                    title: req.title,
                    description: req.description,
                },
            )
            .await
            .map_err(to_status)?;

        // The service returns no record on success; echo the id.
        Ok(Response::new(proto::TodoRecord {
            id: req.id,
            ..Default::default()
        }))
    }

    async fn delete(
        &self,
        request: Request<proto::TodoIdRequest>,
    ) -> Result<Response<proto::DeleteReply>, Status> {
        let req = request.into_inner();

        self.service.delete(&req.id).await.map_err(to_status)?;

        info!(id = %req.id, "todo deleted via gRPC");
        Ok(Response::new(proto::DeleteReply { success: true }))
    }
}
