use profile_resolver::api;
use profile_resolver::logger::*;
use profile_resolver::server::*;
use profile_resolver::settings::*;
use std::fs;
use std::sync::Arc;
use tokio::signal;
use warp::Filter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    debug!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let address = cli
        .address
        .as_deref()
        .unwrap_or(&project_settings.http.address);
    let address: std::net::SocketAddr = address.parse()?;
    if let Some(tls) = &project_settings.http.tls {
        for (what, path) in [("cert", &tls.cert_path), ("key", &tls.key_path)] {
            if !fs::metadata(path)?.is_file() {
                return Err(anyhow::anyhow!(
                    "TLS {} is not a regular file: {:?}",
                    what,
                    path
                ));
            }
        }
    }

    let server = Arc::new(Server::try_new(&project_settings).await?);

    let api_v1 = warp::path("api")
        .and(warp::path("v1"))
        .and(api::v1::routes(server.profile_service.clone()))
        .recover(api::v1::recover_error);

    let cancel = server.cancellation_token();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            match signal::ctrl_c().await {
                Ok(()) => info!("received SIGINT"),
                Err(e) => error!("could not register SIGINT: {}", e),
            }
            cancel.cancel();
        }
    });
    let shutdown = async move { cancel.cancelled().await };

    info!(%address, tls = project_settings.http.tls.is_some(), "listening");
    match &project_settings.http.tls {
        Some(tls) => {
            warp::serve(api_v1)
                .tls()
                .cert_path(&tls.cert_path)
                .key_path(&tls.key_path)
                .bind_with_graceful_shutdown(address, shutdown)
                .1
                .await
        }
        None => {
            warp::serve(api_v1)
                .bind_with_graceful_shutdown(address, shutdown)
                .1
                .await
        }
    }

    let shutdown_timeout = std::time::Duration::from_secs(30);
    match tokio::time::timeout(shutdown_timeout, server.shutdown()).await {
        Ok(_) => info!("server shutdown successfully"),
        Err(_) => error!("server shutdown timed out"),
    }

    Ok(())
}
