use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

pub const GOOGLE_DNS_SERVER: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::new(8, 8, 8, 8), 53));
pub const LOG_FILE: &str = "dnsfun.log";
pub const INPUT_CHAR_LIMIT: usize = 100;

// Config holds the fixed settings of a session. There are no runtime
// overrides; tests build their own to point at a local server.
#[derive(Debug, Clone)]
pub struct Config {
    pub upstream: SocketAddr,
    pub log_file: PathBuf,
    pub input_char_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            upstream: GOOGLE_DNS_SERVER,
            log_file: PathBuf::from(LOG_FILE),
            input_char_limit: INPUT_CHAR_LIMIT,
        }
    }
}
