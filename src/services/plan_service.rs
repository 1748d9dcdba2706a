use std::collections::HashSet;

use serde_json::Value;

use crate::database::models::Plan;
use crate::database::Store;
use crate::error::ApiError;

pub struct PlanService<'a> {
    store: &'a dyn Store,
}

impl<'a> PlanService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Plan>, ApiError> {
        Ok(self.store.list_plans().await?)
    }

    /// Validate the request body, then apply the order in one transaction
    pub async fn reorder(&self, body: &Value) -> Result<usize, ApiError> {
        let order = parse_order(body)?;
        self.store.reorder_plans(&order).await?;
        tracing::info!("Reordered {} plans", order.len());
        Ok(order.len())
    }
}

/// Extract `order` from `{ "order": [...] }`: a non-empty list of distinct strings
pub fn parse_order(body: &Value) -> Result<Vec<String>, ApiError> {
    let items = body
        .get("order")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::bad_request("'order' must be an array of plan ids"))?;

    if items.is_empty() {
        return Err(ApiError::bad_request("'order' must not be empty"));
    }

    let mut seen = HashSet::with_capacity(items.len());
    let mut order = Vec::with_capacity(items.len());
    for item in items {
        let id = item
            .as_str()
            .ok_or_else(|| ApiError::bad_request("'order' must contain only plan id strings"))?;
        if !seen.insert(id) {
            return Err(ApiError::bad_request(format!("Plan '{}' is listed more than once", id)));
        }
        order.push(id.to_string());
    }
    Ok(order)
}
