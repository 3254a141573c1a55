use std::fmt;
use std::slice::Iter;

use itertools::Itertools;

use crate::error::{DNSResolverError, Result};
use crate::utils;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;

// DomainName represents a fully qualified domain name, always stored with
// its trailing dot. The root is ".".
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct DomainName(String);

impl DomainName {
    // Normalizes user input into fully qualified form.
    pub fn fqdn(domain: &str) -> DomainName {
        let trimmed = domain.trim();
        if trimmed.ends_with('.') {
            DomainName(trimmed.to_owned())
        } else {
            DomainName(format!("{trimmed}."))
        }
    }

    fn from_labels(labels: &[String]) -> DomainName {
        if labels.is_empty() {
            return DomainName(String::from("."));
        }
        DomainName(format!("{}.", labels.iter().join(".")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "."
    }

    // Encodes the domain name into a sequence of labels ending in a zero octet.
    pub fn encode(&self, encoded: &mut Vec<u8>) -> Result<()> {
        let mut wire = vec![];
        if !self.is_root() {
            let name = self.0.strip_suffix('.').unwrap_or(&self.0);
            for part in name.split('.') {
                if part.is_empty() {
                    return Err(encode_err(format!("empty label in `{}`", self.0)));
                }
                if part.len() > MAX_LABEL_LEN {
                    return Err(encode_err(format!(
                        "label `{part}` is longer than {MAX_LABEL_LEN} octets"
                    )));
                }
                wire.push(part.len() as u8);
                wire.extend(part.as_bytes());
            }
        }
        wire.push(0);
        if wire.len() > MAX_NAME_LEN {
            return Err(encode_err(format!(
                "`{}` is longer than {MAX_NAME_LEN} octets",
                self.0
            )));
        }
        encoded.extend(wire);
        Ok(())
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn encode_err(detail: String) -> DNSResolverError {
    DNSResolverError::Encode(String::from("name"), detail)
}

fn decode_err(detail: &str) -> DNSResolverError {
    DNSResolverError::Decode(String::from("name"), String::from(detail))
}

// LabelSequenceParser is a parser that knows how to construct
// domain names where a domain name is represented as:
// 1. a sequence of labels ending in a zero octet
// 2. a pointer
// 3. a sequence of labels ending with a pointer
//
// message is the entire DNS message, required to go back to where a
// pointer is pointing. Every iterator handed to the parser must be a
// suffix of message.
pub struct LabelSequenceParser<'a> {
    message: &'a [u8],
    labels: Vec<String>,
    wire_len: usize,
}

impl<'a> LabelSequenceParser<'a> {
    pub fn new(message: &'a [u8]) -> LabelSequenceParser<'a> {
        LabelSequenceParser {
            message,
            labels: vec![],
            wire_len: 1,
        }
    }

    fn position(&self, iter: &Iter<'a, u8>) -> usize {
        self.message.len() - iter.as_slice().len()
    }

    // Constructs the domain name from its wire format. On return iter sits
    // right after the name as it appears in place, i.e. after the first
    // pointer if there is one.
    pub fn construct_domain_name(mut self, iter: &mut Iter<'a, u8>) -> Result<DomainName> {
        let mut jumped: Option<Iter<'a, u8>> = None;

        loop {
            let cursor = match jumped.as_mut() {
                Some(target) => target,
                None => &mut *iter,
            };
            let position = self.position(cursor);
            let len = *cursor.next().ok_or_else(|| decode_err("name is truncated"))?;

            // If length is 0, then there are no more labels.
            if len == 0 {
                break;
            }

            match len >> 6 {
                0b11 => {
                    let next = *cursor
                        .next()
                        .ok_or_else(|| decode_err("pointer is truncated"))?;
                    let offset = usize::from(u16::from_be_bytes([len & 0b0011_1111, next]));
                    // Only backwards pointers, which also rules out loops.
                    if offset >= position {
                        return Err(decode_err("pointer does not point backwards"));
                    }
                    jumped = Some(self.message[offset..].iter());
                }
                0b00 => {
                    let label = utils::take_exact(cursor, usize::from(len), "name")?;
                    self.wire_len += label.len() + 1;
                    if self.wire_len > MAX_NAME_LEN {
                        return Err(decode_err("name is longer than 255 octets"));
                    }
                    self.labels
                        .push(String::from_utf8_lossy(&label).into_owned());
                }
                _ => return Err(decode_err("unsupported label type")),
            }
        }

        Ok(DomainName::from_labels(&self.labels))
    }
}
