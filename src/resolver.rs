use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use rand::Rng;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::domain_name::DomainName;
use crate::error::{map_encode_err, map_network_err, DNSResolverError, Result};
use crate::message::DNSMessage;
use crate::query::{self, DNSHeader};
use crate::rr_types::RRType;

// How long a single exchange may take before it counts as a network failure.
pub const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(2);

const MAX_UDP_RESPONSE: usize = 1024;

// ARecord is a resolved address together with the name that was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ARecord {
    pub hostname: DomainName,
    pub address: Ipv4Addr,
}

impl fmt::Display for ARecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  ({})", self.address, self.hostname)
    }
}

// Lookup is what a session needs from a resolver.
pub trait Lookup {
    fn lookup_a(&self, domain: &str) -> Result<Vec<ARecord>>;
    fn lookup_cname(&self, domain: &str) -> Result<Vec<DomainName>>;
}

// Resolver is a stub client that sends every question to one fixed
// recursive upstream and blocks until the answer arrives.
pub struct Resolver {
    upstream: SocketAddr,
    runtime: Runtime,
}

impl Resolver {
    pub fn new(upstream: SocketAddr) -> Result<Resolver> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| map_network_err("start the runtime", &e))?;
        Ok(Resolver { upstream, runtime })
    }

    pub fn upstream(&self) -> SocketAddr {
        self.upstream
    }

    // Returns the first A record of the domain.
    pub fn resolve_a(&self, domain: &str) -> Result<ARecord> {
        let mut records = self.resolve_a_records(domain)?;
        Ok(records.remove(0))
    }

    // Returns every A record of the domain, in the order the upstream sent them.
    pub fn resolve_a_records(&self, domain: &str) -> Result<Vec<ARecord>> {
        let fqdn = DomainName::fqdn(domain);
        let message = self.query(&fqdn, RRType::A)?;

        let records: Vec<ARecord> = message
            .a_answers()
            .into_iter()
            .map(|address| ARecord {
                hostname: fqdn.clone(),
                address,
            })
            .collect();
        if records.is_empty() {
            return Err(DNSResolverError::NotFound(
                RRType::A.to_string(),
                fqdn.to_string(),
            ));
        }
        Ok(records)
    }

    // Returns the CNAME targets of the domain. An answer section without
    // any CNAME records yields an empty list, an empty answer section
    // NotFound.
    pub fn resolve_cname(&self, domain: &str) -> Result<Vec<DomainName>> {
        let fqdn = DomainName::fqdn(domain);
        let message = self.query(&fqdn, RRType::CNAME)?;

        if message.answers().is_empty() {
            return Err(DNSResolverError::NotFound(
                RRType::CNAME.to_string(),
                fqdn.to_string(),
            ));
        }
        Ok(message.cname_answers())
    }

    fn query(&self, domain: &DomainName, record_type: RRType) -> Result<DNSMessage> {
        self.runtime.block_on(self.exchange(domain, record_type))
    }

    async fn exchange(&self, domain: &DomainName, record_type: RRType) -> Result<DNSMessage> {
        let id: u16 = rand::thread_rng().gen();
        let query = query::build_query(id, domain, record_type)?;

        debug!(
            "Querying {} for {} about {} type",
            self.upstream, domain, record_type
        );
        let mut reply = self.send_udp(&query).await?;
        if Self::check_reply(id, &reply)?.truncated() {
            debug!("truncated response for {}, retrying over tcp", domain);
            reply = self.send_tcp(&query).await?;
            Self::check_reply(id, &reply)?;
        }

        let message = DNSMessage::decode(&reply)?;
        debug!(
            answers = message.answers().len(),
            rcode = message.header().response_code(),
            "response for {} {}",
            domain,
            record_type
        );
        Ok(message)
    }

    // Makes sure the reply answers our query before anything else is decoded.
    fn check_reply(id: u16, reply: &[u8]) -> Result<DNSHeader> {
        let header = DNSHeader::decode(&mut reply.iter())?;
        if header.id() != id || !header.is_response() {
            return Err(DNSResolverError::Network(
                String::from("receive"),
                String::from("mismatched response"),
            ));
        }
        Ok(header)
    }

    fn local_addr(&self) -> SocketAddr {
        match self.upstream {
            SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
            SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        }
    }

    async fn send_udp(&self, query: &[u8]) -> Result<Vec<u8>> {
        let socket = UdpSocket::bind(self.local_addr())
            .await
            .map_err(|e| map_network_err("bind", &e))?;
        socket
            .connect(self.upstream)
            .await
            .map_err(|e| DNSResolverError::Network(format!("connect to {}", self.upstream), e.to_string()))?;
        socket
            .send(query)
            .await
            .map_err(|e| map_network_err("send", &e))?;

        let mut buf = [0; MAX_UDP_RESPONSE];
        let no = tokio::time::timeout(EXCHANGE_TIMEOUT, socket.recv(&mut buf))
            .await
            .map_err(|e| map_network_err("receive", &e))?
            .map_err(|e| map_network_err("receive", &e))?;

        Ok(buf[..no].to_vec())
    }

    async fn send_tcp(&self, query: &[u8]) -> Result<Vec<u8>> {
        let exchange = async {
            let mut stream = TcpStream::connect(self.upstream)
                .await
                .map_err(|e| DNSResolverError::Network(format!("connect to {}", self.upstream), e.to_string()))?;

            let len = u16::try_from(query.len()).map_err(|e| map_encode_err("tcp frame", &e))?;
            let mut framed = Vec::with_capacity(query.len() + 2);
            framed.extend(len.to_be_bytes());
            framed.extend(query);
            stream
                .write_all(&framed)
                .await
                .map_err(|e| map_network_err("send", &e))?;

            let reply_len = stream
                .read_u16()
                .await
                .map_err(|e| map_network_err("receive", &e))?;
            let mut reply = vec![0; usize::from(reply_len)];
            stream
                .read_exact(&mut reply)
                .await
                .map_err(|e| map_network_err("receive", &e))?;
            Ok::<_, DNSResolverError>(reply)
        };

        tokio::time::timeout(EXCHANGE_TIMEOUT, exchange)
            .await
            .map_err(|e| map_network_err("receive", &e))?
    }
}

impl Lookup for Resolver {
    fn lookup_a(&self, domain: &str) -> Result<Vec<ARecord>> {
        self.resolve_a_records(domain)
    }

    fn lookup_cname(&self, domain: &str) -> Result<Vec<DomainName>> {
        self.resolve_cname(domain)
    }
}
