use std::sync::Arc;

use futures::future;
use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::json;
use uuid::Uuid;

use crate::core::client::deployment_client_trait::DeploymentClient;
use crate::core::logging::metric_logger::{messages, MetricLogger};
use crate::domain::health::error::MetricError;
use crate::domain::health::model::{
    ComponentMetricRepresentation, ComponentRepresentation, DeploymentInCircle,
};
use crate::domain::health::projection::resolve_period;
use crate::domain::health::query::build_query;
use crate::domain::health::service::plugin_gateway::PluginGateway;

/// Assembles per-component metric series for a circle.
pub struct CircleMetricService {
    deployments: Arc<dyn DeploymentClient>,
    gateway: PluginGateway,
    logger: Arc<dyn MetricLogger>,
    max_concurrent_queries: usize,
}

impl CircleMetricService {
    pub fn new(
        deployments: Arc<dyn DeploymentClient>,
        gateway: PluginGateway,
        logger: Arc<dyn MetricLogger>,
        max_concurrent_queries: usize,
    ) -> Self {
        Self {
            deployments,
            gateway,
            logger,
            max_concurrent_queries: max_concurrent_queries.max(1),
        }
    }

    /// Metric series of every component deployed in the circle.
    ///
    /// All-or-nothing: the first failure aborts the request and no partial
    /// representation is returned. Components keep the order of the
    /// deployment listing.
    pub async fn components(
        &self,
        circle_header: &str,
        circle_id: &str,
        projection_type: &str,
        metric_type: &str,
        workspace_id: Uuid,
    ) -> Result<ComponentMetricRepresentation, MetricError> {
        let built = build_query(metric_type, circle_id).inspect_err(|err| {
            self.logger.error(
                messages::METRIC_TYPE_ERROR,
                "components",
                err,
                &json!({ "circleId": circle_id, "metricType": metric_type }),
            );
        })?;

        let (range, interval) = resolve_period(projection_type).inspect_err(|err| {
            self.logger.error(
                messages::PROJECTION_TYPE_ERROR,
                "components",
                err,
                &json!({ "circleId": circle_id, "projectionType": projection_type }),
            );
        })?;

        let components = self
            .fetch_components(circle_header, circle_id, workspace_id)
            .await?;

        let mut representation = ComponentMetricRepresentation {
            period: projection_type.to_string(),
            metric_type: metric_type.to_string(),
            components: Vec::with_capacity(components.len()),
        };

        if components.is_empty() {
            return Ok(representation);
        }

        let plugin = self.gateway.resolve(workspace_id).await?;
        let (plugin, query, range, interval) = (&plugin, &built.query, &range, &interval);

        // Completion order is free; each result lands in its listing slot.
        // The first failure returns at once and drops the queries in flight.
        let mut slots: Vec<Option<ComponentRepresentation>> =
            (0..components.len()).map(|_| None).collect();
        stream::iter(components.into_iter().enumerate())
            .map(|(index, component)| async move {
                let data = plugin.execute(query, range, interval).await?;
                Ok::<_, MetricError>((
                    index,
                    ComponentRepresentation {
                        name: component.name,
                        module: component.module_name,
                        data,
                    },
                ))
            })
            .buffer_unordered(self.max_concurrent_queries)
            .try_for_each(|(index, component)| {
                slots[index] = Some(component);
                future::ready(Ok(()))
            })
            .await?;
        representation.components = slots.into_iter().flatten().collect();

        self.logger.info(
            messages::COMPONENTS_METRICS_DONE,
            &json!({
                "circleId": circle_id,
                "workspaceId": workspace_id,
                "measurement": built.measurement,
                "components": representation.components.len(),
            }),
        );

        Ok(representation)
    }

    async fn fetch_components(
        &self,
        circle_header: &str,
        circle_id: &str,
        workspace_id: Uuid,
    ) -> Result<Vec<DeploymentInCircle>, MetricError> {
        let context = json!({ "circleId": circle_id, "workspaceId": workspace_id });

        let body = self
            .deployments
            .get_components(circle_header, circle_id, workspace_id)
            .await
            .map_err(|e| {
                self.logger
                    .error(messages::GET_COMPONENTS_ERROR, "fetch_components", &e, &context);
                MetricError::ComponentListUnavailable(e)
            })?;

        serde_json::from_slice::<Vec<DeploymentInCircle>>(&body).map_err(|e| {
            self.logger
                .error(messages::PARSE_COMPONENTS_ERROR, "fetch_components", &e, &context);
            MetricError::MalformedComponentList(e)
        })
    }
}
