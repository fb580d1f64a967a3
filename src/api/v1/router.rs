use super::handler;
use crate::application_port::ProfileService;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    profile_service: Arc<dyn ProfileService>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::get()
        .and(warp::path("profile"))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(with(profile_service))
        .and_then(handler::get_profile)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::v1::{ApiErrorCode, recover_error};
    use crate::application_impl::ProfileResolver;
    use crate::domain_model::*;
    use crate::infra_memory::*;
    use serde_json::Value;
    use std::collections::BTreeSet;
    use warp::http::StatusCode;

    fn service(profiles: Arc<InMemoryProfileStore>) -> Arc<dyn ProfileService> {
        let memberships = Arc::new(InMemoryMembershipStore::new());
        memberships.push(
            "u1".parse().unwrap(),
            CompanyMembership {
                company_id: CompanyId("c1".to_string()),
                company_name: "Acme".to_string(),
                company_slug: "acme".to_string(),
                membership_role: "admin".to_string(),
                is_active: true,
                permissions: BTreeSet::from(["view_dashboard".to_string()]),
            },
        );
        Arc::new(ProfileResolver::new(
            profiles,
            memberships,
            Arc::new(RecordingDiagnosticSink::new()),
        ))
    }

    fn profiles() -> Arc<InMemoryProfileStore> {
        let profiles = Arc::new(InMemoryProfileStore::new());
        profiles.insert(Identity {
            id: "u1".parse().unwrap(),
            email: "a@b.com".to_string(),
            full_name: "A B".to_string(),
            role: Role::User,
        });
        profiles
    }

    async fn get(service: Arc<dyn ProfileService>, path: &str) -> (StatusCode, Value) {
        let api = routes(service).recover(recover_error);
        let res = warp::test::request()
            .method("GET")
            .path(path)
            .reply(&api)
            .await;
        let body = serde_json::from_slice(res.body()).unwrap();
        (res.status(), body)
    }

    #[tokio::test]
    async fn returns_resolved_profile() {
        let (status, body) = get(service(profiles()), "/profile/u1").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["identity"]["email"], "a@b.com");
        assert_eq!(body["data"]["memberships"][0]["company_slug"], "acme");
    }

    #[tokio::test]
    async fn unknown_user_is_forbidden() {
        let (status, body) = get(service(profiles()), "/profile/u2").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "ProfileUnavailable");
    }

    #[tokio::test]
    async fn identity_store_outage_is_forbidden() {
        let store = profiles();
        store.set_unavailable(true);

        let (status, body) = get(service(store), "/profile/u1").await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "ProfileUnavailable");
    }

    #[tokio::test]
    async fn unmatched_route_is_not_found() {
        let (status, body) = get(service(profiles()), "/profiles").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NotFound");
    }

    #[tokio::test]
    async fn blank_user_id_is_rejected() {
        let (status, body) = get(service(profiles()), "/profile/%20").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "InvalidUserId");
    }

    #[tokio::test]
    async fn percent_encoded_user_id_is_decoded() {
        let store = profiles();
        store.insert(Identity {
            id: "a b".parse().unwrap(),
            email: "ab@b.com".to_string(),
            full_name: "A B".to_string(),
            role: Role::User,
        });

        let (status, body) = get(service(store), "/profile/a%20b").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["identity"]["id"], "a b");
    }

    #[tokio::test]
    async fn unhandled_rejection_is_internal_error() {
        let api = routes(service(profiles())).recover(recover_error);
        let res = warp::test::request()
            .method("POST")
            .path("/profile/u1")
            .reply(&api)
            .await;
        let body: Value = serde_json::from_slice(res.body()).unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "InternalError");
        assert_eq!(
            ApiErrorCode::internal("boom"),
            ApiErrorCode::InternalError
        );
    }
}
