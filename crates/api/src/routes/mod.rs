//! API route definitions.
//!
//! Every route is listed once in [`route_table`] together with who may call
//! it. [`api_routes_with_state`] turns the table into a router.

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{MethodRouter, delete, get, post, put},
};

use crate::{
    AppState,
    middleware::{auth_middleware, require_roles},
};
use amaramba_shared::Role;

pub mod customers;
pub mod health;
pub mod products;
pub mod submission;
pub mod uploads;

/// Who may call a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token required.
    Public,
    /// Bearer token with one of these roles.
    Roles(&'static [Role]),
}

/// One routed endpoint.
pub struct RouteEntry {
    /// HTTP method.
    pub method: Method,
    /// Path pattern.
    pub path: &'static str,
    /// Access rule.
    pub access: Access,
    /// Handler.
    pub handler: MethodRouter<AppState>,
}

impl RouteEntry {
    fn new(
        method: Method,
        path: &'static str,
        access: Access,
        handler: MethodRouter<AppState>,
    ) -> Self {
        Self {
            method,
            path,
            access,
            handler,
        }
    }
}

impl std::fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteEntry")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("access", &self.access)
            .finish_non_exhaustive()
    }
}

/// Every API route, in registration order.
#[must_use]
pub fn route_table() -> Vec<RouteEntry> {
    use Access::{Public, Roles};

    vec![
        RouteEntry::new(Method::GET, "/health", Public, get(health::health_check)),
        // Products
        RouteEntry::new(
            Method::GET,
            "/api/products",
            Roles(Role::ALL),
            get(products::list_products),
        ),
        RouteEntry::new(
            Method::GET,
            "/api/products/{id}",
            Roles(Role::ALL),
            get(products::get_product),
        ),
        RouteEntry::new(
            Method::POST,
            "/api/products",
            Roles(Role::STAFF),
            post(products::create_product),
        ),
        RouteEntry::new(
            Method::PUT,
            "/api/products/{id}",
            Roles(Role::STAFF),
            put(products::update_product),
        ),
        RouteEntry::new(
            Method::DELETE,
            "/api/products/{id}",
            Roles(Role::STAFF),
            delete(products::delete_product),
        ),
        // Customers
        RouteEntry::new(
            Method::GET,
            "/api/customers",
            Roles(Role::STAFF),
            get(customers::list_customers),
        ),
        RouteEntry::new(
            Method::GET,
            "/api/customers/{id}",
            Roles(Role::STAFF),
            get(customers::get_customer),
        ),
        RouteEntry::new(
            Method::POST,
            "/api/customers",
            Roles(Role::STAFF),
            post(customers::create_customer),
        ),
        RouteEntry::new(
            Method::PUT,
            "/api/customers/{id}",
            Roles(Role::STAFF),
            put(customers::update_customer),
        ),
        RouteEntry::new(
            Method::DELETE,
            "/api/customers/{id}",
            Roles(Role::STAFF),
            delete(customers::delete_customer),
        ),
        // Public form submission
        RouteEntry::new(Method::POST, "/api/submission", Public, post(submission::submit_form)),
        // Object storage
        RouteEntry::new(
            Method::POST,
            "/s3-upload/upload-single-new-folder",
            Roles(Role::ALL),
            post(uploads::upload_to_scan_folder),
        ),
        RouteEntry::new(
            Method::POST,
            "/s3-upload/upload-pdf",
            Roles(Role::ALL),
            post(uploads::upload_pdf),
        ),
        RouteEntry::new(
            Method::POST,
            "/api/uploads/s3-upload",
            Roles(Role::ALL),
            post(uploads::upload_to_report_folder),
        ),
        RouteEntry::new(
            Method::DELETE,
            "/s3-upload/object",
            Roles(Role::STAFF),
            delete(uploads::delete_object),
        ),
    ]
}

/// Creates the API router from the route table.
///
/// Protected entries get the role gate first and JWT validation around it,
/// so a missing token is 401 and a wrong role is 403.
pub fn api_routes_with_state(state: &AppState) -> Router<AppState> {
    route_table()
        .into_iter()
        .fold(Router::new(), |router, entry| {
            tracing::info!(
                method = %entry.method,
                path = entry.path,
                access = ?entry.access,
                "Registering route"
            );
            let handler = match entry.access {
                Access::Public => entry.handler,
                Access::Roles(roles) => entry
                    .handler
                    .route_layer(middleware::from_fn_with_state(roles, require_roles))
                    .route_layer(middleware::from_fn_with_state(
                        state.clone(),
                        auth_middleware,
                    )),
            };
            router.route(entry.path, handler)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_route_table_has_no_duplicates() {
        let table = route_table();
        let unique: HashSet<(String, &str)> = table
            .iter()
            .map(|e| (e.method.to_string(), e.path))
            .collect();
        assert_eq!(unique.len(), table.len());
    }

    #[test]
    fn test_route_table_access_rules() {
        let table = route_table();
        let access = |method: Method, path: &str| {
            table
                .iter()
                .find(|e| e.method == method && e.path == path)
                .map(|e| e.access)
        };

        assert_eq!(access(Method::GET, "/health"), Some(Access::Public));
        assert_eq!(access(Method::POST, "/api/submission"), Some(Access::Public));
        assert_eq!(
            access(Method::GET, "/api/products"),
            Some(Access::Roles(Role::ALL))
        );
        assert_eq!(
            access(Method::POST, "/api/products"),
            Some(Access::Roles(Role::STAFF))
        );
        assert_eq!(
            access(Method::GET, "/api/customers"),
            Some(Access::Roles(Role::STAFF))
        );
        assert_eq!(
            access(Method::POST, "/s3-upload/upload-pdf"),
            Some(Access::Roles(Role::ALL))
        );
        assert_eq!(
            access(Method::DELETE, "/s3-upload/object"),
            Some(Access::Roles(Role::STAFF))
        );
    }

    #[test]
    fn test_route_table_size() {
        assert_eq!(route_table().len(), 16);
    }
}
