//! todo-grpc — gRPC delivery for the todo service.
//!
//! Implements the `todo.v1.Todos` service as a thin front end over the
//! shared service layer, mirroring the REST delivery's semantics: same
//! pagination arithmetic, same error taxonomy, surfaced here as gRPC
//! status codes instead of HTTP envelopes.

pub mod server;

/// Generated protobuf types and gRPC service stubs.
pub mod proto {
    tonic::include_proto!("todo.v1");

    /// File descriptor set for gRPC server reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("todo_descriptor");
}

pub use server::TodoGrpcServer;
