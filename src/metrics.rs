use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

pub fn install_exporter(listen_addr: &str) -> anyhow::Result<SocketAddr> {
    let addr: SocketAddr = listen_addr.parse()?;
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    Ok(addr)
}
