#![allow(dead_code)]
use std::collections::{HashMap, HashSet};
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::runtime::{Builder, Runtime};

pub const TYPE_A: u16 = 1;
pub const TYPE_CNAME: u16 = 5;

#[derive(Debug, Clone)]
pub enum Answer {
    A(String, Ipv4Addr),
    CName(String, String),
}

impl Answer {
    fn r_type(&self) -> u16 {
        match self {
            Answer::A(..) => TYPE_A,
            Answer::CName(..) => TYPE_CNAME,
        }
    }
}

// Zone is what the mock server knows, keyed by lowercase FQDN and type.
#[derive(Debug, Clone, Default)]
pub struct Zone {
    records: HashMap<(String, u16), Vec<Answer>>,
    truncate_udp: HashSet<String>,
    wrong_id: HashSet<String>,
    not_response: HashSet<String>,
}

impl Zone {
    pub fn a(mut self, name: &str, address: [u8; 4]) -> Zone {
        self.records
            .entry((name.to_owned(), TYPE_A))
            .or_default()
            .push(Answer::A(name.to_owned(), Ipv4Addr::from(address)));
        self
    }

    // Adds an answer of any type to the response for (name, q_type).
    pub fn answer(mut self, name: &str, q_type: u16, answer: Answer) -> Zone {
        self.records
            .entry((name.to_owned(), q_type))
            .or_default()
            .push(answer);
        self
    }

    pub fn cname(self, name: &str, target: &str) -> Zone {
        self.answer(name, TYPE_CNAME, Answer::CName(name.to_owned(), target.to_owned()))
    }

    // UDP answers for name come back empty with the TC bit set.
    pub fn truncated(mut self, name: &str) -> Zone {
        self.truncate_udp.insert(name.to_owned());
        self
    }

    // Answers for name carry a different transaction id.
    pub fn wrong_id(mut self, name: &str) -> Zone {
        self.wrong_id.insert(name.to_owned());
        self
    }

    // Answers for name come back with the QR bit cleared.
    pub fn not_response(mut self, name: &str) -> Zone {
        self.not_response.insert(name.to_owned());
        self
    }
}

pub struct MockDnsServer {
    addr: SocketAddr,
    runtime: Option<Runtime>,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
}

impl MockDnsServer {
    pub fn start(zone: Zone) -> io::Result<MockDnsServer> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()?;
        let (udp, tcp) = runtime.block_on(async {
            let udp = UdpSocket::bind("127.0.0.1:0").await?;
            let tcp = TcpListener::bind(udp.local_addr()?).await?;
            Ok::<_, io::Error>((udp, tcp))
        })?;
        let addr = udp.local_addr()?;
        let zone = Arc::new(zone);
        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));

        let udp_zone = zone.clone();
        let udp_count = udp_queries.clone();
        runtime.spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                if let Ok((len, peer)) = udp.recv_from(&mut buf).await {
                    udp_count.fetch_add(1, Ordering::SeqCst);
                    let response = build_response(&udp_zone, &buf[..len], true);
                    let _ = udp.send_to(&response, peer).await;
                }
            }
        });

        let tcp_count = tcp_queries.clone();
        runtime.spawn(async move {
            loop {
                let Ok((mut stream, _)) = tcp.accept().await else {
                    continue;
                };
                tcp_count.fetch_add(1, Ordering::SeqCst);
                let zone = zone.clone();
                tokio::spawn(async move {
                    let Ok(len) = stream.read_u16().await else {
                        return;
                    };
                    let mut query = vec![0u8; usize::from(len)];
                    if stream.read_exact(&mut query).await.is_err() {
                        return;
                    }
                    let response = build_response(&zone, &query, false);
                    let mut framed = (response.len() as u16).to_be_bytes().to_vec();
                    framed.extend(response);
                    let _ = stream.write_all(&framed).await;
                });
            }
        });

        Ok(MockDnsServer {
            addr,
            runtime: Some(runtime),
            udp_queries,
            tcp_queries,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

// A UDP socket that swallows every query.
pub fn silent_server() -> io::Result<std::net::UdpSocket> {
    std::net::UdpSocket::bind("127.0.0.1:0")
}

fn encode_name(name: &str, out: &mut Vec<u8>) {
    for label in name.trim_end_matches('.').split('.').filter(|l| !l.is_empty()) {
        out.push(label.len() as u8);
        out.extend(label.as_bytes());
    }
    out.push(0);
}

// Reads the question name and type, returning them with the offset right
// after the question.
fn parse_question(query: &[u8]) -> Option<(String, u16, usize)> {
    let mut pos = 12;
    let mut labels = vec![];
    loop {
        let len = usize::from(*query.get(pos)?);
        pos += 1;
        if len == 0 {
            break;
        }
        labels.push(String::from_utf8_lossy(query.get(pos..pos + len)?).to_lowercase());
        pos += len;
    }
    let q_type = u16::from_be_bytes([*query.get(pos)?, *query.get(pos + 1)?]);
    let name = if labels.is_empty() {
        String::from(".")
    } else {
        format!("{}.", labels.join("."))
    };
    Some((name, q_type, pos + 4))
}

fn build_response(zone: &Zone, query: &[u8], over_udp: bool) -> Vec<u8> {
    let Some((name, q_type, question_end)) = parse_question(query) else {
        return vec![];
    };
    if question_end > query.len() {
        return vec![];
    }

    let truncate = over_udp && zone.truncate_udp.contains(&name);
    let answers = if truncate {
        vec![]
    } else {
        zone.records.get(&(name.clone(), q_type)).cloned().unwrap_or_default()
    };

    let mut response = Vec::with_capacity(512);
    let mut id = [query[0], query[1]];
    if zone.wrong_id.contains(&name) {
        id[1] = id[1].wrapping_add(1);
    }
    response.extend(id);
    let mut flags = if truncate { 0x83 } else { 0x81 };
    if zone.not_response.contains(&name) {
        flags &= 0x7f;
    }
    response.push(flags);
    response.push(0x80);
    response.extend(1u16.to_be_bytes());
    response.extend((answers.len() as u16).to_be_bytes());
    response.extend([0, 0, 0, 0]);
    response.extend(&query[12..question_end]);

    for answer in &answers {
        let (owner, rdata) = match answer {
            Answer::A(owner, address) => (owner, address.octets().to_vec()),
            Answer::CName(owner, target) => {
                let mut rdata = vec![];
                encode_name(target, &mut rdata);
                (owner, rdata)
            }
        };
        if *owner == name {
            // pointer to the question name
            response.extend([0xc0, 0x0c]);
        } else {
            encode_name(owner, &mut response);
        }
        response.extend(answer.r_type().to_be_bytes());
        response.extend(1u16.to_be_bytes());
        response.extend(300u32.to_be_bytes());
        response.extend((rdata.len() as u16).to_be_bytes());
        response.extend(rdata);
    }
    response
}
