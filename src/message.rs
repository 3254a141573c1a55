use std::net::Ipv4Addr;

use crate::domain_name::DomainName;
use crate::error::Result;
use crate::query::{DNSHeader, DNSQuestion};
use crate::resource_record::{DNSRecord, RecordData};

// DNSMessage represents a DNS message.
#[derive(Debug)]
pub struct DNSMessage {
    header: DNSHeader,
    questions: Vec<DNSQuestion>,
    answers: Vec<DNSRecord>,
    authorities: Vec<DNSRecord>,
    additionals: Vec<DNSRecord>,
}

impl DNSMessage {
    // Decode the message from its wire format into our representation.
    pub fn decode(message: &[u8]) -> Result<DNSMessage> {
        let mut message_iter = message.iter();
        let mut questions = vec![];
        let mut answers = vec![];
        let mut authorities = vec![];
        let mut additionals = vec![];

        let header = DNSHeader::decode(&mut message_iter)?;
        for _ in 0..header.num_questions() {
            questions.push(DNSQuestion::decode(&mut message_iter, message)?);
        }
        for _ in 0..header.num_answers() {
            answers.push(DNSRecord::decode(&mut message_iter, message)?);
        }
        for _ in 0..header.num_authorities() {
            authorities.push(DNSRecord::decode(&mut message_iter, message)?);
        }
        for _ in 0..header.num_additionals() {
            additionals.push(DNSRecord::decode(&mut message_iter, message)?);
        }

        Ok(DNSMessage {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    pub fn header(&self) -> &DNSHeader {
        &self.header
    }

    pub fn questions(&self) -> &[DNSQuestion] {
        &self.questions
    }

    // Returns the entire answers section.
    pub fn answers(&self) -> &[DNSRecord] {
        &self.answers
    }

    pub fn authorities(&self) -> &[DNSRecord] {
        &self.authorities
    }

    pub fn additionals(&self) -> &[DNSRecord] {
        &self.additionals
    }

    // Returns every IPv4 address in the answers section, in order.
    pub fn a_answers(&self) -> Vec<Ipv4Addr> {
        self.answers
            .iter()
            .filter_map(|ans| match ans.data() {
                RecordData::A(addr) => Some(*addr),
                _ => None,
            })
            .collect()
    }

    // Returns every CNAME target in the answers section, in order.
    pub fn cname_answers(&self) -> Vec<DomainName> {
        self.answers
            .iter()
            .filter_map(|ans| match ans.data() {
                RecordData::CName(target) => Some(target.clone()),
                _ => None,
            })
            .collect()
    }
}
