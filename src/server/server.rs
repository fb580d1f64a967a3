use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::{self, Settings};
use anyhow::anyhow;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, Pool};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct Server {
    pub profile_service: Arc<dyn ProfileService>,
    cancel: CancellationToken,
    pool: Option<Pool<MySql>>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let mut pool = None;

        let (profile_store, membership_store): (Arc<dyn ProfileStore>, Arc<dyn MembershipStore>) =
            match settings.profile.backend.as_str() {
                "memory" => {
                    let seed = match settings.profile.seed_path.as_deref() {
                        Some(path) => Seed::load(path)?,
                        None => Seed::default(),
                    };
                    let (profile_store, membership_store) = seed.into_stores()?;
                    info!(identities = profile_store.len(), "in-memory stores seeded");
                    let profile_store: Arc<dyn ProfileStore> = Arc::new(profile_store);
                    let membership_store: Arc<dyn MembershipStore> = Arc::new(membership_store);
                    (profile_store, membership_store)
                }
                "mysql" => {
                    let mysql = settings
                        .mysql
                        .as_ref()
                        .ok_or_else(|| anyhow!("mysql backend requires a [mysql] section"))?;
                    let mysql_pool = MySqlPoolOptions::new()
                        .max_connections(mysql.max_connections)
                        .connect(&mysql.dsn)
                        .await?;
                    pool = Some(mysql_pool.clone());
                    let profile_store: Arc<dyn ProfileStore> =
                        Arc::new(MySqlProfileStore::new(mysql_pool.clone()));
                    let membership_store: Arc<dyn MembershipStore> =
                        Arc::new(MySqlMembershipStore::new(mysql_pool));
                    (profile_store, membership_store)
                }
                other => return Err(anyhow!("Unknown profile backend: {}", other)),
            };

        let diagnostics: Arc<dyn DiagnosticSink> = Arc::new(TracingDiagnosticSink::new());
        let config = resolver_config(&settings.resolver);
        debug!(?config);

        let profile_service: Arc<dyn ProfileService> = Arc::new(
            ProfileResolver::new(profile_store, membership_store, diagnostics).with_config(config),
        );

        info!(backend = %settings.profile.backend, "server started");

        Ok(Self {
            profile_service,
            cancel: CancellationToken::new(),
            pool,
        })
    }

    /// Cancelled once the server should stop accepting requests.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        self.cancel.cancel();

        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("mysql pool closed");
        }
    }
}

pub fn resolver_config(resolver: &settings::Resolver) -> ResolverConfig {
    ResolverConfig {
        identity_timeout: resolver.identity_timeout_ms.map(Duration::from_millis),
        membership_timeout: resolver.membership_timeout_ms.map(Duration::from_millis),
        membership_retry: RetryPolicy {
            max_attempts: resolver.membership_max_attempts.max(1),
            initial_backoff: Duration::from_millis(resolver.membership_backoff_ms),
            max_backoff: Duration::from_millis(resolver.membership_max_backoff_ms),
        },
    }
}
