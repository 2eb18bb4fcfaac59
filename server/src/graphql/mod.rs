mod hr;
mod types;

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Schema, SimpleObject};
use platform_api::{ApiResult, into_graphql};
use serde::Serialize;
use tracing::instrument;

pub use hr::{HrMutation, HrQuery};

use crate::session::SessionRegistry;

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(registry: Arc<SessionRegistry>) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(registry)
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.health", skip_all)]
    async fn health(&self, ctx: &Context<'_>) -> async_graphql::Result<HealthPayload> {
        let sessions = ctx
            .data::<Arc<SessionRegistry>>()
            .map_err(|_| into_graphql(anyhow::anyhow!("missing session registry")))?
            .len()
            .map_err(into_graphql)?;
        Ok(HealthPayload {
            ok: true,
            sessions: sessions as i32,
        })
    }

    #[instrument(name = "graphql.version", skip_all)]
    async fn version(&self) -> ApiResult<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    async fn hr(&self) -> HrQuery {
        HrQuery
    }
}

#[Object]
impl MutationRoot {
    async fn hr(&self) -> HrMutation {
        HrMutation
    }
}

#[derive(Clone, Debug, SimpleObject, Serialize)]
pub struct HealthPayload {
    pub ok: bool,
    pub sessions: i32,
}
