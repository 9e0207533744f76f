use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("CARECONNECT_HOST")
            .ok()
            .and_then(|value| match value.parse() {
                Ok(addr) => Some(addr),
                Err(_) => {
                    warn!("CARECONNECT_HOST is not a valid IP address, using 0.0.0.0");
                    None
                }
            })
            .unwrap_or_else(|| IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let port = env::var("CARECONNECT_PORT")
            .ok()
            .and_then(|value| match value.parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    warn!("CARECONNECT_PORT is not a valid port number, using 3000");
                    None
                }
            })
            .unwrap_or(3000);

        Self { host, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}
