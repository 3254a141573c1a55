use std::slice::Iter;

use crate::domain_name::{DomainName, LabelSequenceParser};
use crate::error::{DNSResolverError, Result};
use crate::rr_types::{RRType, CLASS_IN};
use crate::utils;

const FLAG_RESPONSE: u16 = 0b1000_0000_0000_0000;
const FLAG_TRUNCATED: u16 = 0b0000_0010_0000_0000;
const FLAG_RECURSION_DESIRED: u16 = 0b0000_0001_0000_0000;
const RCODE_MASK: u16 = 0b0000_0000_0000_1111;

#[derive(Debug, Clone, PartialEq)]
pub struct DNSHeader {
    id: u16,
    flags: u16,
    qd_count: u16,
    an_count: u16,
    ns_count: u16,
    ar_count: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DNSQuestion {
    name: DomainName,
    q_type: u16,
    class: u16,
}

impl DNSQuestion {
    pub fn new(name: DomainName, q_type: RRType) -> DNSQuestion {
        DNSQuestion {
            name,
            q_type: q_type.code(),
            class: CLASS_IN,
        }
    }

    pub fn name(&self) -> &DomainName {
        &self.name
    }

    pub fn q_type(&self) -> u16 {
        self.q_type
    }

    pub fn encode(&self, encoded: &mut Vec<u8>) -> Result<()> {
        self.name.encode(encoded)?;
        encoded.extend(self.q_type.to_be_bytes());
        encoded.extend(self.class.to_be_bytes());
        Ok(())
    }

    pub fn decode<'a>(iter: &mut Iter<'a, u8>, message: &'a [u8]) -> Result<DNSQuestion> {
        let name = LabelSequenceParser::new(message).construct_domain_name(iter)?;

        let parts = utils::u8_bytes_to_u16_vec(iter, 2)?;
        Ok(DNSQuestion {
            name,
            q_type: parts[0],
            class: parts[1],
        })
    }
}

impl DNSHeader {
    pub fn new(id: u16, flags: u16, qd_count: u16, an_count: u16, ns_count: u16, ar_count: u16) -> DNSHeader {
        DNSHeader {
            id,
            flags,
            qd_count,
            an_count,
            ns_count,
            ar_count,
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn num_questions(&self) -> u16 {
        self.qd_count
    }

    pub fn num_answers(&self) -> u16 {
        self.an_count
    }

    pub fn num_authorities(&self) -> u16 {
        self.ns_count
    }

    pub fn num_additionals(&self) -> u16 {
        self.ar_count
    }

    pub fn is_response(&self) -> bool {
        self.flags & FLAG_RESPONSE != 0
    }

    pub fn truncated(&self) -> bool {
        self.flags & FLAG_TRUNCATED != 0
    }

    pub fn response_code(&self) -> u16 {
        self.flags & RCODE_MASK
    }

    pub fn encode(&self, encoded: &mut Vec<u8>) {
        encoded.extend(self.id.to_be_bytes());
        encoded.extend(self.flags.to_be_bytes());
        encoded.extend(self.qd_count.to_be_bytes());
        encoded.extend(self.an_count.to_be_bytes());
        encoded.extend(self.ns_count.to_be_bytes());
        encoded.extend(self.ar_count.to_be_bytes());
    }

    pub fn decode<'a, T>(header_bytes: &mut T) -> Result<DNSHeader>
    where
        T: Iterator<Item = &'a u8>,
    {
        let parts = utils::u8_bytes_to_u16_vec(header_bytes, 6).map_err(|_| {
            DNSResolverError::Decode(String::from("header"), String::from("message is shorter than 12 bytes"))
        })?;

        Ok(DNSHeader {
            id: parts[0],
            flags: parts[1],
            qd_count: parts[2],
            an_count: parts[3],
            ns_count: parts[4],
            ar_count: parts[5],
        })
    }
}

// Builds a single question query asking the upstream to recurse for us.
pub fn build_query(id: u16, domain: &DomainName, record_type: RRType) -> Result<Vec<u8>> {
    let header = DNSHeader::new(id, FLAG_RECURSION_DESIRED, 1, 0, 0, 0);
    let question = DNSQuestion::new(domain.clone(), record_type);
    let mut query: Vec<u8> = vec![];
    header.encode(&mut query);
    question.encode(&mut query)?;
    Ok(query)
}
